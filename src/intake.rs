//! 入力資料の読み取り
//!
//! ファイルパスから受付候補（名前・MIMEタイプ・サイズ）を作り、
//! バッチ処理用にフォルダ内の資料を列挙する。

use crate::error::{AacError, Result};
use aac_intake_common::validation::is_accepted_extension;
use aac_intake_common::FileCandidate;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 拡張子からMIMEタイプを推定（不明なら octet-stream）
pub fn detect_mime_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first()
        .map(|m| m.essence_str().to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string())
}

/// ファイルから受付候補を作成
///
/// 内容は読まない。サイズはメタデータから取得する。
pub fn candidate_from_path(path: &Path, mime_override: Option<&str>) -> Result<FileCandidate> {
    if !path.is_file() {
        return Err(AacError::FileNotFound(path.display().to_string()));
    }

    let size = std::fs::metadata(path)?.len();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let mime_type = match mime_override {
        Some(mime) => mime.to_string(),
        None => detect_mime_type(path),
    };

    tracing::debug!(file = %name, mime = %mime_type, size, "intake candidate");
    Ok(FileCandidate::new(name, mime_type, size))
}

/// フォルダ内の受付対象（拡張子 pdf/doc/docx）をファイル名順で列挙
pub fn scan_intake_folder(folder: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(AacError::FolderNotFound(folder.display().to_string()));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut documents: Vec<PathBuf> = WalkDir::new(folder)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|path| {
            path.extension()
                .map(|ext| is_accepted_extension(&ext.to_string_lossy()))
                .unwrap_or(false)
        })
        .collect();

    documents.sort_by(|a, b| a.file_name().cmp(&b.file_name()).then_with(|| a.cmp(b)));

    Ok(documents)
}
