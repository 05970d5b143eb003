//! AAC Intake Common Library
//!
//! CLIと将来のWeb(WASM)で共有される型・状態機械・レポート生成

pub mod analyzer;
pub mod error;
pub mod export;
pub mod language;
pub mod phrases;
pub mod redaction;
pub mod report;
pub mod synthesis;
pub mod theme;
pub mod ticker;
pub mod types;
pub mod validation;
pub mod workflow;

pub use analyzer::{AnalysisError, Analyzer, Clock, FixedClock, MockAnalyzer, SynthesisOptions, SystemClock};
pub use error::{Error, Result};
pub use language::{LanguageScenario, ScenarioPolicy, SecondaryLanguage};
pub use redaction::{ClientProfile, RedactionPolicy};
pub use report::{build_report, render_report, report_file_name, report_file_stem, ReportArtifact};
pub use theme::Theme;
pub use ticker::{ManualTicker, Schedule, Ticker, TimerId, TimerKind, TimerToken};
pub use types::{FileStatus, Priority, ProcessedResult, Recommendation, UploadedFile};
pub use validation::{validate_upload, FileCandidate, UploadError, MAX_UPLOAD_BYTES};
pub use workflow::{
    Notice, NoticeLevel, WorkflowAction, WorkflowConfig, WorkflowController, WorkflowError,
    WorkflowEvent, WorkflowState,
};

pub use uuid::Uuid;
