//! クライアント名の匿名化
//!
//! 匿名化が有効な場合、表示ラベルには先頭の識別子と年齢のみを使い、
//! 実名は出さない。出力ファイル名も同じラベルから作るため、
//! 画面表示とファイル名は常に同じ識別子になる。

use regex::Regex;
use serde::{Deserialize, Serialize};

/// 匿名化時のプレースホルダ
pub const REDACTED_PLACEHOLDER: &str = "[Patient]";

/// ファイル名が空になった場合の代替
const FALLBACK_IDENTIFIER: &str = "Client";

/// 匿名化ポリシー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedactionPolicy {
    /// 実名を出さない（臨床向け）
    #[default]
    Redacted,
    /// 実名をそのまま使う（デモ用途のみ）
    Plain,
}

/// 模擬クライアント情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientProfile {
    pub name: String,
    pub age: Option<u32>,
}

impl Default for ClientProfile {
    fn default() -> Self {
        Self {
            name: "Jordan Rivera".to_string(),
            age: Some(14),
        }
    }
}

/// 表示用クライアントラベルを生成
///
/// Redacted: `[Patient], 14 years old` / Plain: `Jordan Rivera, 14 years old`
pub fn client_label(profile: &ClientProfile, policy: RedactionPolicy) -> String {
    let identifier = match policy {
        RedactionPolicy::Redacted => REDACTED_PLACEHOLDER,
        RedactionPolicy::Plain => profile.name.trim(),
    };

    match profile.age {
        Some(age) => format!("{}, {} years old", identifier, age),
        None => identifier.to_string(),
    }
}

/// ラベルをファイル名に使える形に変換
///
/// 括弧とカンマは除去、空白の連続は `_` に、パスとして危険な文字も `_` に置換する。
///
/// # Examples
/// ```
/// use aac_intake_common::redaction::sanitize_identifier;
///
/// assert_eq!(sanitize_identifier("[Patient], 14 years old"), "Patient_14_years_old");
/// ```
pub fn sanitize_identifier(label: &str) -> String {
    lazy_static::lazy_static! {
        static ref BRACKETS_RE: Regex = Regex::new(r"[\[\]\(\)\{\},]").unwrap();
        static ref UNSAFE_RE: Regex = Regex::new(r#"[/\\:*?"<>|]"#).unwrap();
        static ref SPACE_RE: Regex = Regex::new(r"\s+").unwrap();
    }

    let without_brackets = BRACKETS_RE.replace_all(label, "");
    let safe = UNSAFE_RE.replace_all(&without_brackets, "_");
    let joined = SPACE_RE.replace_all(safe.trim(), "_");
    let trimmed = joined.trim_matches('_');

    if trimmed.is_empty() {
        FALLBACK_IDENTIFIER.to_string()
    } else {
        trimmed.to_string()
    }
}
