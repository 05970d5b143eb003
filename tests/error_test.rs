//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use aac_intake::error::AacError;
use aac_intake::{export, intake};
use aac_intake_common::{UploadError, WorkflowAction, WorkflowError, WorkflowState};
use std::path::Path;
use tempfile::tempdir;

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = intake::scan_intake_folder(Path::new("/nonexistent/path/12345"), false);
    assert!(matches!(result, Err(AacError::FolderNotFound(_))));
}

/// 資料のないフォルダをスキャンした場合
#[test]
fn test_scan_folder_no_documents() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("test.txt"), "hello").unwrap();
    std::fs::write(dir.path().join("scan.png"), "png").unwrap();

    let result = intake::scan_intake_folder(dir.path(), false);
    assert!(result.unwrap().is_empty());
}

/// 壊れた結果JSONを読み込んだ場合
#[test]
fn test_load_invalid_result_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("result.json");
    std::fs::write(&path, "{ not json").unwrap();

    let result = export::load_result_json(&path);
    assert!(matches!(result, Err(AacError::Common(aac_intake_common::Error::Json(_)))));
}

#[test]
fn test_load_missing_result_json() {
    let result = export::load_result_json(Path::new("/nonexistent/result.json"));
    assert!(matches!(result, Err(AacError::FileNotFound(_))));
}

/// AacErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        AacError::Config("テスト設定エラー".to_string()),
        AacError::FileNotFound("intake.pdf".to_string()),
        AacError::FolderNotFound("/path/to/folder".to_string()),
        AacError::Export("Excel生成エラー".to_string()),
        AacError::Interaction("入力中断".to_string()),
        AacError::NoDocumentsFound("フォルダ".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラー表示が空: {:?}", err);
    }
}

/// ワークフローエラーの変換とメッセージ
#[test]
fn test_workflow_error_conversion() {
    let err: AacError = WorkflowError::Upload(UploadError::FileTooLarge {
        size: 6 * 1024 * 1024,
        limit: 5 * 1024 * 1024,
    })
    .into();
    assert!(matches!(err, AacError::Workflow(_)));
    assert!(err.to_string().contains("5MB"));

    let err: AacError = WorkflowError::InvalidTransition {
        from: WorkflowState::Idle,
        action: WorkflowAction::RequestReport,
    }
    .into();
    assert!(err.to_string().contains("cannot request report while idle"));
}
