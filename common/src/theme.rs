//! 表示テーマ（ライト/ダーク）
//!
//! 起動時に一度だけプラットフォームの配色から決め、その後は手動で切り替える。
//! 表示専用でデータには影響しない。

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }

    /// 端末の `COLORFGBG`（例: "15;0"）から背景色を推定
    ///
    /// 最後の要素が背景色番号。0〜6と8は暗い背景とみなす。
    /// 値がない・読めない場合はライト。
    pub fn from_colorfgbg(value: Option<&str>) -> Self {
        let background = value
            .and_then(|v| v.rsplit(';').next())
            .and_then(|bg| bg.trim().parse::<u8>().ok());

        match background {
            Some(0..=6) | Some(8) => Theme::Dark,
            _ => Theme::Light,
        }
    }
}
