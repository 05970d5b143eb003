use aac_intake_common::WorkflowError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AacError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] aac_intake_common::Error),

    #[error("ワークフローエラー: {0}")]
    Workflow(#[from] WorkflowError),

    #[error("出力エラー: {0}")]
    Export(String),

    #[error("対話入力エラー: {0}")]
    Interaction(String),

    #[error("処理対象の資料が見つかりません: {0}")]
    NoDocumentsFound(String),
}

pub type Result<T> = std::result::Result<T, AacError>;
