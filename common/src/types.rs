//! データモデル
//!
//! CLIと将来のWeb(WASM)で共有される型:
//! - UploadedFile: アップロード/処理中の1ファイル
//! - ProcessedResult: 解析結果（処理完了時に一括生成、以後不変）
//! - Recommendation: 推奨項目1件

use crate::error::Result;
use crate::language::SecondaryLanguage;
use crate::validation::FileCandidate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ファイルステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    #[default]
    Idle,
    Uploading,
    Processing,
    Complete,
    Error,
}

impl FileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileStatus::Idle => "idle",
            FileStatus::Uploading => "uploading",
            FileStatus::Processing => "processing",
            FileStatus::Complete => "complete",
            FileStatus::Error => "error",
        }
    }
}

/// アップロード/処理中のファイル
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub size: u64,
    pub status: FileStatus,
    /// 0〜100（uploading/processing中のみ意味を持つ）
    pub progress: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UploadedFile {
    /// 検証済みの候補から新しいアップロードを作成
    pub fn accepted(candidate: &FileCandidate) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: candidate.name.clone(),
            mime_type: candidate.mime_type.clone(),
            size: candidate.size,
            status: FileStatus::Uploading,
            progress: 0.0,
            error: None,
        }
    }
}

/// 推奨の優先度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// 表示用ラベル（"High"など）
    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// レポート用の大文字表記
    pub fn as_upper(&self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }
}

/// 推奨項目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: String,
    pub details: String,
    pub priority: Priority,
}

impl Recommendation {
    pub fn new(category: impl Into<String>, details: impl Into<String>, priority: Priority) -> Self {
        Self {
            category: category.into(),
            details: details.into(),
            priority,
        }
    }
}

/// 解析結果
///
/// recommendationsの順序はカテゴリ順で意味を持つ（優先度順ではない）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedResult {
    pub client_name: String,
    pub communication_needs: Vec<String>,
    pub medical_history: String,
    pub recommendations: Vec<Recommendation>,
    pub additional_notes: String,
    pub processed_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_language: Option<SecondaryLanguage>,
}

impl ProcessedResult {
    pub fn is_bilingual(&self) -> bool {
        self.secondary_language.is_some()
    }

    pub fn recommendation(&self, category: &str) -> Option<&Recommendation> {
        self.recommendations.iter().find(|r| r.category == category)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
