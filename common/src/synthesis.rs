//! 模擬推奨結果の組み立て
//!
//! 実際の文書解析は行わず、固定の文面と言語シナリオから
//! ProcessedResultを一括で生成する。

use crate::language::LanguageScenario;
use crate::phrases::{render_phrase_details, PhraseCategory};
use crate::redaction::{client_label, ClientProfile, RedactionPolicy};
use crate::types::{Priority, ProcessedResult, Recommendation};
use chrono::NaiveDate;

pub const PICTURE_SYMBOL_THEMES: &str = "Picture & Symbol Themes";
pub const INTERFACE_MODIFICATIONS: &str = "Interface Modifications";
pub const ADDITIONAL_FEATURES: &str = "Additional Features";

const MEDICAL_HISTORY: &str = "Patient has cerebral palsy affecting fine motor control, particularly in the upper extremities. Cognitive abilities are age-appropriate. Auditory processing is intact, with normal hearing. Visual acuity is normal with corrective lenses.";

const ADDITIONAL_NOTES: &str = "Patient shows high interest in technology and responds well to interactive features. Family has requested specific vocabulary related to sports (especially basketball) and video games. School integration should include academic vocabulary aligned with current curriculum. Consider implementing a customized keyboard layout that minimizes required movement range while maximizing commonly used phrases.";

/// 推奨カテゴリの並び（表示順）
pub fn category_order() -> Vec<&'static str> {
    let mut order = vec![PICTURE_SYMBOL_THEMES];
    order.extend(PhraseCategory::ALL.iter().map(|c| c.label()));
    order.push(INTERFACE_MODIFICATIONS);
    order.push(ADDITIONAL_FEATURES);
    order
}

/// 処理日を "Month Day, Year" 形式に整形
pub fn format_processed_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// 模擬結果を生成
pub fn build_result(
    profile: &ClientProfile,
    redaction: RedactionPolicy,
    scenario: LanguageScenario,
    date: NaiveDate,
) -> ProcessedResult {
    ProcessedResult {
        client_name: client_label(profile, redaction),
        communication_needs: communication_needs(scenario),
        medical_history: MEDICAL_HISTORY.to_string(),
        recommendations: recommendations(scenario),
        additional_notes: ADDITIONAL_NOTES.to_string(),
        processed_date: format_processed_date(date),
        secondary_language: scenario.secondary(),
    }
}

fn communication_needs(scenario: LanguageScenario) -> Vec<String> {
    let language_need = match scenario.secondary() {
        Some(language) => format!("Bilingual needs (English & {})", language),
        None => "English language only".to_string(),
    };

    vec![
        "Limited verbal speech, requires tablet-based AAC".to_string(),
        language_need,
        "Prefers visual symbols with minimal text".to_string(),
        "Color-coding helps with navigation".to_string(),
        "Requires large button support due to motor control limitations".to_string(),
    ]
}

fn recommendations(scenario: LanguageScenario) -> Vec<Recommendation> {
    let mut recs = Vec::with_capacity(PhraseCategory::ALL.len() + 3);

    recs.push(Recommendation::new(
        PICTURE_SYMBOL_THEMES,
        "Friendly, youthful icons with neutral designs. Color-coded categories for intuitive navigation. Large buttons incorporating PCS (Picture Communication Symbols). High contrast visuals for improved visibility.",
        Priority::High,
    ));

    for category in PhraseCategory::ALL {
        recs.push(Recommendation::new(
            category.label(),
            render_phrase_details(category, scenario),
            category.priority(),
        ));
    }

    recs.push(Recommendation::new(
        INTERFACE_MODIFICATIONS,
        interface_modifications(scenario),
        Priority::Medium,
    ));
    recs.push(Recommendation::new(
        ADDITIONAL_FEATURES,
        additional_features(scenario),
        Priority::Low,
    ));

    recs
}

fn interface_modifications(scenario: LanguageScenario) -> String {
    let toggle = scenario
        .secondary()
        .map(|language| format!("Implement bilingual toggle feature (English/{}). ", language))
        .unwrap_or_default();

    format!(
        "{}Use large buttons (minimum 2cm×2cm) with 0.5cm spacing. Configure visual themes with high contrast colors. Set up a simplified navigation structure with color-coded categories.",
        toggle
    )
}

fn additional_features(scenario: LanguageScenario) -> String {
    let mut lines = vec!["Voice Preference: Youthful, gender-neutral tone".to_string()];
    if let Some(language) = scenario.secondary() {
        lines.push(format!(
            "Bilingual Support: Full English-{} toggle capability",
            language
        ));
    }
    lines.push("Symbol & Text Balance: 80% symbols with 20% supporting text".to_string());
    lines.push("Smart Home Integration: Basic commands for lights, TV, and music".to_string());
    lines.push("Accessibility Feature: Adjustable touch sensitivity settings".to_string());
    lines.join("\n")
}
