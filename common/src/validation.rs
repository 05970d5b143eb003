//! アップロード検証
//!
//! 受け付けるのはPDFとWord文書のみ、サイズ上限は5MiB。
//! 検証はアップロード受付時に同期的に行い、失敗してもワークフローはIdleのまま。

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// アップロードサイズ上限（5 MiB）
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// 受け付けるメディアタイプ
pub const ACCEPTED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// 受け付ける拡張子（フォルダ走査用）
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

/// アップロード候補ファイル（ブラウザ/OSが報告した値そのまま）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileCandidate {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size,
        }
    }
}

/// アップロード拒否理由
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("Please upload PDF or DOCX files only (got \"{0}\")")]
    InvalidFileType(String),

    #[error("File size exceeds 5MB limit ({size} bytes > {limit} bytes)")]
    FileTooLarge { size: u64, limit: u64 },
}

impl UploadError {
    /// 通知の見出し用の短い文言
    pub fn summary(&self) -> &'static str {
        match self {
            UploadError::InvalidFileType(_) => "Please upload PDF or DOCX files only",
            UploadError::FileTooLarge { .. } => "File size exceeds 5MB limit",
        }
    }
}

/// メディアタイプが受付対象か判定
///
/// `; charset=...` などのパラメータと大文字小文字は無視する。
pub fn is_accepted_mime_type(mime_type: &str) -> bool {
    let essence = mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    ACCEPTED_MIME_TYPES.contains(&essence.as_str())
}

/// 拡張子が受付対象か判定
pub fn is_accepted_extension(ext: &str) -> bool {
    ACCEPTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
}

/// アップロード候補を検証（種別 → サイズの順）
pub fn validate_upload(candidate: &FileCandidate) -> Result<(), UploadError> {
    if !is_accepted_mime_type(&candidate.mime_type) {
        return Err(UploadError::InvalidFileType(candidate.mime_type.clone()));
    }

    if candidate.size > MAX_UPLOAD_BYTES {
        return Err(UploadError::FileTooLarge {
            size: candidate.size,
            limit: MAX_UPLOAD_BYTES,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

    #[test]
    fn test_accepts_pdf_and_word() {
        assert!(validate_upload(&FileCandidate::new("intake.pdf", "application/pdf", 2_000_000)).is_ok());
        assert!(validate_upload(&FileCandidate::new("intake.doc", "application/msword", 10)).is_ok());
        assert!(validate_upload(&FileCandidate::new("intake.docx", DOCX, 10)).is_ok());
    }

    #[test]
    fn test_rejects_other_types() {
        for mime in ["image/png", "text/plain", "", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"] {
            let result = validate_upload(&FileCandidate::new("x", mime, 10));
            assert_eq!(result, Err(UploadError::InvalidFileType(mime.to_string())), "mime: {}", mime);
        }
    }

    #[test]
    fn test_mime_parameters_and_case_ignored() {
        assert!(is_accepted_mime_type("Application/PDF"));
        assert!(is_accepted_mime_type("application/pdf; charset=binary"));
        assert!(!is_accepted_mime_type("application/pdfx"));
    }

    #[test]
    fn test_size_limit_boundary() {
        let at_limit = FileCandidate::new("a.pdf", "application/pdf", MAX_UPLOAD_BYTES);
        assert!(validate_upload(&at_limit).is_ok());

        let over = FileCandidate::new("a.pdf", "application/pdf", MAX_UPLOAD_BYTES + 1);
        assert_eq!(
            validate_upload(&over),
            Err(UploadError::FileTooLarge { size: MAX_UPLOAD_BYTES + 1, limit: MAX_UPLOAD_BYTES })
        );
    }

    #[test]
    fn test_type_checked_before_size() {
        let both_bad = FileCandidate::new("a.png", "image/png", MAX_UPLOAD_BYTES * 2);
        assert!(matches!(validate_upload(&both_bad), Err(UploadError::InvalidFileType(_))));
    }

    #[test]
    fn test_accepted_extension() {
        assert!(is_accepted_extension("pdf"));
        assert!(is_accepted_extension("DOCX"));
        assert!(is_accepted_extension("doc"));
        assert!(!is_accepted_extension("txt"));
    }

    #[test]
    fn test_error_messages() {
        let msg = UploadError::InvalidFileType("image/png".into()).to_string();
        assert!(msg.contains("PDF or DOCX"));
        let msg = UploadError::FileTooLarge { size: 6, limit: 5 }.to_string();
        assert!(msg.contains("5MB"));
    }
}
