//! 第二言語シナリオ
//!
//! バイリンガル対応の有無と対象言語を1つに決める。
//! 選択は明示的なポリシー（ランダム or 固定）で行い、
//! 結果の全フレーズ・全テキストが同じ言語を参照する。

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 対応する第二言語
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecondaryLanguage {
    Spanish,
    French,
    Mandarin,
    Vietnamese,
}

impl SecondaryLanguage {
    pub const ALL: [SecondaryLanguage; 4] = [
        SecondaryLanguage::Spanish,
        SecondaryLanguage::French,
        SecondaryLanguage::Mandarin,
        SecondaryLanguage::Vietnamese,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            SecondaryLanguage::Spanish => "Spanish",
            SecondaryLanguage::French => "French",
            SecondaryLanguage::Mandarin => "Mandarin",
            SecondaryLanguage::Vietnamese => "Vietnamese",
        }
    }

    /// ISO 639-1 コード
    pub fn code(&self) -> &'static str {
        match self {
            SecondaryLanguage::Spanish => "es",
            SecondaryLanguage::French => "fr",
            SecondaryLanguage::Mandarin => "zh",
            SecondaryLanguage::Vietnamese => "vi",
        }
    }
}

impl fmt::Display for SecondaryLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for SecondaryLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        SecondaryLanguage::ALL
            .iter()
            .copied()
            .find(|l| l.code() == lower || l.display_name().to_lowercase() == lower)
            .or(match lower.as_str() {
                "chinese" => Some(SecondaryLanguage::Mandarin),
                "espanol" | "español" => Some(SecondaryLanguage::Spanish),
                _ => None,
            })
            .ok_or_else(|| {
                format!(
                    "Unknown language: {}. Use spanish, french, mandarin or vietnamese",
                    s
                )
            })
    }
}

/// 言語シナリオ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageScenario {
    EnglishOnly,
    Bilingual(SecondaryLanguage),
}

impl LanguageScenario {
    pub fn secondary(&self) -> Option<SecondaryLanguage> {
        match self {
            LanguageScenario::EnglishOnly => None,
            LanguageScenario::Bilingual(language) => Some(*language),
        }
    }
}

/// シナリオ選択ポリシー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScenarioPolicy {
    /// 50%でバイリンガル、言語は一様に選ぶ
    #[default]
    Random,
    Fixed(LanguageScenario),
}

impl ScenarioPolicy {
    pub fn resolve(&self, rng: &mut dyn RngCore) -> LanguageScenario {
        match self {
            ScenarioPolicy::Fixed(scenario) => *scenario,
            ScenarioPolicy::Random => {
                if rng.random_bool(0.5) {
                    let index = rng.random_range(0..SecondaryLanguage::ALL.len());
                    LanguageScenario::Bilingual(SecondaryLanguage::ALL[index])
                } else {
                    LanguageScenario::EnglishOnly
                }
            }
        }
    }
}

impl FromStr for ScenarioPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "random" | "auto" => Ok(ScenarioPolicy::Random),
            "none" | "english" | "en" => Ok(ScenarioPolicy::Fixed(LanguageScenario::EnglishOnly)),
            other => other
                .parse::<SecondaryLanguage>()
                .map(|l| ScenarioPolicy::Fixed(LanguageScenario::Bilingual(l))),
        }
    }
}

impl fmt::Display for ScenarioPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioPolicy::Random => write!(f, "random"),
            ScenarioPolicy::Fixed(LanguageScenario::EnglishOnly) => write!(f, "none"),
            ScenarioPolicy::Fixed(LanguageScenario::Bilingual(l)) => {
                write!(f, "{}", l.display_name().to_lowercase())
            }
        }
    }
}
