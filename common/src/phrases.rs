//! 推奨フレーズ表
//!
//! カテゴリごとに英語の正準フレーズ列を持ち、各言語の訳は
//! 同じインデックスで対応する並列テーブルとして定義する。
//! 訳が欠けている場合は空の訳として描画する（パニックしない）。

use crate::language::{LanguageScenario, SecondaryLanguage};
use crate::types::Priority;

/// フレーズを持つカテゴリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhraseCategory {
    BasicNeeds,
    SocialCommunications,
    AcademicSupport,
    DailyActivities,
    EmergencyCommunication,
}

impl PhraseCategory {
    pub const ALL: [PhraseCategory; 5] = [
        PhraseCategory::BasicNeeds,
        PhraseCategory::SocialCommunications,
        PhraseCategory::AcademicSupport,
        PhraseCategory::DailyActivities,
        PhraseCategory::EmergencyCommunication,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PhraseCategory::BasicNeeds => "Basic Needs",
            PhraseCategory::SocialCommunications => "Social Communications",
            PhraseCategory::AcademicSupport => "Academic Support",
            PhraseCategory::DailyActivities => "Daily Activities",
            PhraseCategory::EmergencyCommunication => "Emergency Communication",
        }
    }

    pub fn priority(&self) -> Priority {
        match self {
            PhraseCategory::SocialCommunications | PhraseCategory::AcademicSupport => Priority::Medium,
            _ => Priority::High,
        }
    }

    /// 英語の正準フレーズ
    pub fn english(&self) -> &'static [&'static str] {
        ENGLISH.phrases(*self)
    }
}

/// 1言語分のフレーズ表
#[derive(Debug)]
pub struct PhraseTable {
    basic_needs: &'static [&'static str],
    social_communications: &'static [&'static str],
    academic_support: &'static [&'static str],
    daily_activities: &'static [&'static str],
    emergency_communication: &'static [&'static str],
}

impl PhraseTable {
    pub fn phrases(&self, category: PhraseCategory) -> &'static [&'static str] {
        match category {
            PhraseCategory::BasicNeeds => self.basic_needs,
            PhraseCategory::SocialCommunications => self.social_communications,
            PhraseCategory::AcademicSupport => self.academic_support,
            PhraseCategory::DailyActivities => self.daily_activities,
            PhraseCategory::EmergencyCommunication => self.emergency_communication,
        }
    }
}

static ENGLISH: PhraseTable = PhraseTable {
    basic_needs: &[
        "I am hungry.",
        "I need to use the bathroom.",
        "Help me, please!",
        "I need a break.",
        "I want to drink water.",
        "I'm tired.",
    ],
    social_communications: &[
        "Hi! How are you?",
        "I feel happy.",
        "Can we be friends?",
        "That's funny!",
        "I like talking to you.",
        "I'm excited about...",
        "Let's have fun!",
    ],
    academic_support: &[
        "What's the answer?",
        "I need help with my homework.",
        "Let's read together.",
        "I like science experiments!",
        "Can you explain that again?",
        "I have a question.",
        "I understand.",
    ],
    daily_activities: &[
        "What's next on my schedule?",
        "It's time to do my chores.",
        "I need to brush my teeth.",
        "Let's go outside.",
        "I want to watch TV.",
        "Time for my medicine.",
        "I'm ready to go.",
    ],
    emergency_communication: &[
        "I am in pain.",
        "I can't breathe!",
        "Call my caregiver.",
        "I feel dizzy.",
        "I need my medicine.",
        "Something is wrong!",
        "Help me now!",
    ],
};

static SPANISH: PhraseTable = PhraseTable {
    basic_needs: &[
        "Tengo hambre.",
        "Necesito ir al baño.",
        "¡Ayúdame, por favor!",
        "Necesito un descanso.",
        "Quiero beber agua.",
        "Estoy cansado/a.",
    ],
    social_communications: &[
        "¡Hola! ¿Cómo estás?",
        "Me siento feliz.",
        "¿Podemos ser amigos?",
        "¡Eso es gracioso!",
        "Me gusta hablar contigo.",
        "Estoy entusiasmado/a por...",
        "¡Divirtámonos!",
    ],
    academic_support: &[
        "¿Cuál es la respuesta?",
        "Necesito ayuda con mi tarea.",
        "Leamos juntos.",
        "¡Me gustan los experimentos de ciencia!",
        "¿Puedes explicarlo de nuevo?",
        "Tengo una pregunta.",
        "Entiendo.",
    ],
    daily_activities: &[
        "¿Qué sigue en mi horario?",
        "Es hora de hacer mis deberes.",
        "Necesito cepillarme los dientes.",
        "Salgamos afuera.",
        "Quiero ver televisión.",
        "Hora de mi medicina.",
        "Estoy listo/a para ir.",
    ],
    emergency_communication: &[
        "Tengo dolor.",
        "¡No puedo respirar!",
        "Llama a mi cuidador.",
        "Me siento mareado/a.",
        "Necesito mi medicina.",
        "¡Algo está mal!",
        "¡Ayúdame ahora!",
    ],
};

static FRENCH: PhraseTable = PhraseTable {
    basic_needs: &[
        "J'ai faim.",
        "J'ai besoin d'aller aux toilettes.",
        "Aide-moi, s'il te plaît !",
        "J'ai besoin d'une pause.",
        "Je veux boire de l'eau.",
        "Je suis fatigué(e).",
    ],
    social_communications: &[
        "Salut ! Comment ça va ?",
        "Je me sens heureux/heureuse.",
        "On peut être amis ?",
        "C'est drôle !",
        "J'aime te parler.",
        "J'ai hâte de...",
        "Amusons-nous !",
    ],
    academic_support: &[
        "Quelle est la réponse ?",
        "J'ai besoin d'aide pour mes devoirs.",
        "Lisons ensemble.",
        "J'aime les expériences de science !",
        "Tu peux réexpliquer ?",
        "J'ai une question.",
        "Je comprends.",
    ],
    daily_activities: &[
        "Qu'est-ce qui vient ensuite dans mon emploi du temps ?",
        "C'est l'heure de faire mes tâches.",
        "Je dois me brosser les dents.",
        "Allons dehors.",
        "Je veux regarder la télé.",
        "C'est l'heure de mon médicament.",
        "Je suis prêt(e) à partir.",
    ],
    emergency_communication: &[
        "J'ai mal.",
        "Je ne peux pas respirer !",
        "Appelle mon aidant.",
        "J'ai des vertiges.",
        "J'ai besoin de mon médicament.",
        "Quelque chose ne va pas !",
        "Aide-moi tout de suite !",
    ],
};

static MANDARIN: PhraseTable = PhraseTable {
    basic_needs: &[
        "我饿了。",
        "我需要上厕所。",
        "请帮帮我！",
        "我需要休息一下。",
        "我想喝水。",
        "我累了。",
    ],
    social_communications: &[
        "你好！你好吗？",
        "我很开心。",
        "我们可以做朋友吗？",
        "真好笑！",
        "我喜欢和你聊天。",
        "我很期待……",
        "我们一起玩吧！",
    ],
    academic_support: &[
        "答案是什么？",
        "我需要帮忙做作业。",
        "我们一起读书吧。",
        "我喜欢科学实验！",
        "你能再解释一遍吗？",
        "我有一个问题。",
        "我明白了。",
    ],
    daily_activities: &[
        "我的日程表上接下来是什么？",
        "该做家务了。",
        "我需要刷牙。",
        "我们去外面吧。",
        "我想看电视。",
        "该吃药了。",
        "我准备好出发了。",
    ],
    emergency_communication: &[
        "我很疼。",
        "我喘不过气来！",
        "给我的护理人员打电话。",
        "我头晕。",
        "我需要我的药。",
        "出问题了！",
        "现在就帮帮我！",
    ],
};

static VIETNAMESE: PhraseTable = PhraseTable {
    basic_needs: &[
        "Tôi đói.",
        "Tôi cần đi vệ sinh.",
        "Làm ơn giúp tôi!",
        "Tôi cần nghỉ một chút.",
        "Tôi muốn uống nước.",
        "Tôi mệt.",
    ],
    social_communications: &[
        "Chào bạn! Bạn khỏe không?",
        "Tôi thấy vui.",
        "Chúng ta làm bạn nhé?",
        "Buồn cười quá!",
        "Tôi thích nói chuyện với bạn.",
        "Tôi rất háo hức về...",
        "Cùng vui chơi nào!",
    ],
    academic_support: &[
        "Câu trả lời là gì?",
        "Tôi cần giúp làm bài tập về nhà.",
        "Cùng đọc sách nhé.",
        "Tôi thích thí nghiệm khoa học!",
        "Bạn giải thích lại được không?",
        "Tôi có một câu hỏi.",
        "Tôi hiểu rồi.",
    ],
    daily_activities: &[
        "Tiếp theo trong lịch của tôi là gì?",
        "Đến giờ làm việc nhà rồi.",
        "Tôi cần đánh răng.",
        "Mình ra ngoài đi.",
        "Tôi muốn xem TV.",
        "Đến giờ uống thuốc rồi.",
        "Tôi sẵn sàng đi rồi.",
    ],
    emergency_communication: &[
        "Tôi bị đau.",
        "Tôi không thở được!",
        "Gọi người chăm sóc tôi.",
        "Tôi thấy chóng mặt.",
        "Tôi cần thuốc của tôi.",
        "Có chuyện không ổn!",
        "Giúp tôi ngay!",
    ],
};

/// 言語ごとの訳テーブル
pub fn table_for(language: SecondaryLanguage) -> &'static PhraseTable {
    match language {
        SecondaryLanguage::Spanish => &SPANISH,
        SecondaryLanguage::French => &FRENCH,
        SecondaryLanguage::Mandarin => &MANDARIN,
        SecondaryLanguage::Vietnamese => &VIETNAMESE,
    }
}

/// カテゴリの詳細テキストを生成
///
/// ```text
/// Suggested phrases:
/// - "I am hungry." / "Tengo hambre."
/// ```
pub fn render_phrase_details(category: PhraseCategory, scenario: LanguageScenario) -> String {
    let translations = scenario
        .secondary()
        .map(|language| table_for(language).phrases(category));
    render_phrase_lines(category.english(), translations)
}

pub(crate) fn render_phrase_lines(english: &[&str], translations: Option<&[&str]>) -> String {
    let mut lines = Vec::with_capacity(english.len() + 1);
    lines.push("Suggested phrases:".to_string());

    for (index, phrase) in english.iter().enumerate() {
        match translations {
            Some(table) => {
                let translated = table.get(index).copied().unwrap_or_default();
                lines.push(format!("- \"{}\" / \"{}\"", phrase, translated));
            }
            None => lines.push(format!("- \"{}\"", phrase)),
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_parallel() {
        for language in SecondaryLanguage::ALL {
            for category in PhraseCategory::ALL {
                assert_eq!(
                    table_for(language).phrases(category).len(),
                    category.english().len(),
                    "{:?}/{:?} の訳数が英語と一致しない",
                    language,
                    category
                );
            }
        }
    }

    #[test]
    fn test_table_lookup() {
        let spanish = table_for(SecondaryLanguage::Spanish);
        assert_eq!(spanish.phrases(PhraseCategory::BasicNeeds)[0], "Tengo hambre.");
        let french = table_for(SecondaryLanguage::French);
        assert_eq!(
            french.phrases(PhraseCategory::EmergencyCommunication)[6],
            "Aide-moi tout de suite !"
        );
    }

    #[test]
    fn test_render_english_only() {
        let details = render_phrase_details(PhraseCategory::BasicNeeds, LanguageScenario::EnglishOnly);
        let lines: Vec<&str> = details.lines().collect();
        assert_eq!(lines[0], "Suggested phrases:");
        assert_eq!(lines[1], "- \"I am hungry.\"");
        assert_eq!(lines.len(), 7);
        assert!(!details.contains(" / "));
    }

    #[test]
    fn test_render_bilingual() {
        let details = render_phrase_details(
            PhraseCategory::SocialCommunications,
            LanguageScenario::Bilingual(SecondaryLanguage::Spanish),
        );
        assert!(details.contains("- \"Hi! How are you?\" / \"¡Hola! ¿Cómo estás?\""));
        assert!(details.contains("- \"Let's have fun!\" / \"¡Divirtámonos!\""));
    }

    #[test]
    fn test_render_missing_translation_is_empty_segment() {
        let details = render_phrase_lines(&["One.", "Two."], Some(&["Uno."][..]));
        assert_eq!(details, "Suggested phrases:\n- \"One.\" / \"Uno.\"\n- \"Two.\" / \"\"");
    }

    #[test]
    fn test_category_priorities() {
        assert_eq!(PhraseCategory::BasicNeeds.priority(), Priority::High);
        assert_eq!(PhraseCategory::SocialCommunications.priority(), Priority::Medium);
        assert_eq!(PhraseCategory::AcademicSupport.priority(), Priority::Medium);
        assert_eq!(PhraseCategory::DailyActivities.priority(), Priority::High);
        assert_eq!(PhraseCategory::EmergencyCommunication.priority(), Priority::High);
    }
}
