//! ワークフローコントローラ（状態機械）
//!
//! idle → uploading → processing → complete ⇄ downloading
//! 処理失敗時は error → retry で idle に戻る。
//!
//! タイマーは Ticker 経由で開始し、発火は `on_timer` でトークンを受け取る。
//! 現在のタイマー・ファイルに一致しないトークンは無視する（リセット後の遅延発火など）。
//!
//! ## 変更履歴
//! - 処理失敗時の Error 状態と retry を追加
//! - テーマをコントローラ所有に変更
//! - 100%到達後・結果表示前の待ち（既定0）を追加

use crate::analyzer::Analyzer;
use crate::report::{build_report, ReportArtifact};
use crate::theme::Theme;
use crate::ticker::{ManualTicker, Ticker, TimerKind, TimerToken};
use crate::types::{FileStatus, ProcessedResult, UploadedFile};
use crate::validation::{validate_upload, FileCandidate, UploadError};
use rand::{Rng, RngCore};
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub const DEFAULT_UPLOAD_TICK_MS: u64 = 200;
pub const DEFAULT_MAX_PROGRESS_INCREMENT: f64 = 15.0;
pub const DEFAULT_PROCESSING_DELAY_MS: u64 = 4000;

/// タイミング設定
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkflowConfig {
    pub upload_tick: Duration,
    /// 1ティックあたりの進捗増分の上限（[0, max) で一様）
    pub max_progress_increment: f64,
    pub processing_delay: Duration,
    /// 100%到達から処理開始までの待ち（0なら即座）
    pub upload_settle_delay: Duration,
    /// 解析完了から結果表示までの待ち（0なら即座）
    pub result_reveal_delay: Duration,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            upload_tick: Duration::from_millis(DEFAULT_UPLOAD_TICK_MS),
            max_progress_increment: DEFAULT_MAX_PROGRESS_INCREMENT,
            processing_delay: Duration::from_millis(DEFAULT_PROCESSING_DELAY_MS),
            upload_settle_delay: Duration::ZERO,
            result_reveal_delay: Duration::ZERO,
        }
    }
}

impl WorkflowConfig {
    pub fn from_millis(upload_tick_ms: u64, max_progress_increment: f64, processing_delay_ms: u64) -> Self {
        Self {
            upload_tick: Duration::from_millis(upload_tick_ms),
            max_progress_increment,
            processing_delay: Duration::from_millis(processing_delay_ms),
            ..Self::default()
        }
    }

    /// 100%到達後と結果表示前の待ちを設定
    pub fn with_reveal_delays(mut self, upload_settle_ms: u64, result_reveal_ms: u64) -> Self {
        self.upload_settle_delay = Duration::from_millis(upload_settle_ms);
        self.result_reveal_delay = Duration::from_millis(result_reveal_ms);
        self
    }

    /// 進まない設定（増分0以下・非有限、ティック0）を既定値に置き換える
    fn normalized(mut self) -> Self {
        if !self.max_progress_increment.is_finite() || self.max_progress_increment <= 0.0 {
            warn!(
                value = self.max_progress_increment,
                "invalid max progress increment, using default"
            );
            self.max_progress_increment = DEFAULT_MAX_PROGRESS_INCREMENT;
        }
        if self.upload_tick.is_zero() {
            self.upload_tick = Duration::from_millis(DEFAULT_UPLOAD_TICK_MS);
        }
        self
    }
}

/// コントローラの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowState {
    Idle,
    Uploading,
    Processing,
    Complete,
    Downloading,
    Error,
}

impl WorkflowState {
    /// タイマー待ちの状態
    pub fn is_busy(&self) -> bool {
        matches!(self, WorkflowState::Uploading | WorkflowState::Processing)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::Uploading => "uploading",
            WorkflowState::Processing => "processing",
            WorkflowState::Complete => "complete",
            WorkflowState::Downloading => "downloading",
            WorkflowState::Error => "error",
        }
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 外部からのトリガー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowAction {
    AcceptFile,
    RequestReport,
    BackToResults,
    Reset,
    Retry,
}

impl fmt::Display for WorkflowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WorkflowAction::AcceptFile => "accept a file",
            WorkflowAction::RequestReport => "request report",
            WorkflowAction::BackToResults => "go back to results",
            WorkflowAction::Reset => "reset",
            WorkflowAction::Retry => "retry",
        };
        f.write_str(s)
    }
}

/// ワークフローエラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkflowError {
    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("cannot {action} while {from}")]
    InvalidTransition {
        from: WorkflowState,
        action: WorkflowAction,
    },

    #[error("no processed result available")]
    NoResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// ユーザー向け通知（トースト相当）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

/// コントローラが蓄積するイベント
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowEvent {
    StateChanged {
        from: WorkflowState,
        to: WorkflowState,
    },
    Progress {
        file_id: Uuid,
        progress: f64,
    },
    Notice(Notice),
}

/// ワークフローコントローラ
pub struct WorkflowController<T: Ticker, A: Analyzer, R: RngCore> {
    config: WorkflowConfig,
    ticker: T,
    analyzer: A,
    rng: R,
    state: WorkflowState,
    file: Option<UploadedFile>,
    result: Option<ProcessedResult>,
    /// 表示待ちの結果（result_reveal_delay 中のみ）
    pending_result: Option<ProcessedResult>,
    upload_timer: Option<TimerToken>,
    /// 単発タイマー（待ち・処理・表示は順に1つずつ）
    step_timer: Option<TimerToken>,
    theme: Theme,
    events: Vec<WorkflowEvent>,
}

impl<T: Ticker, A: Analyzer, R: RngCore> WorkflowController<T, A, R> {
    pub fn new(config: WorkflowConfig, ticker: T, analyzer: A, rng: R, theme: Theme) -> Self {
        Self {
            config: config.normalized(),
            ticker,
            analyzer,
            rng,
            state: WorkflowState::Idle,
            file: None,
            result: None,
            pending_result: None,
            upload_timer: None,
            step_timer: None,
            theme,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    pub fn file(&self) -> Option<&UploadedFile> {
        self.file.as_ref()
    }

    pub fn result(&self) -> Option<&ProcessedResult> {
        self.result.as_ref()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    pub fn ticker_mut(&mut self) -> &mut T {
        &mut self.ticker
    }

    pub fn pending_event_count(&self) -> usize {
        self.events.len()
    }

    /// 未処理のイベントを取り出す
    pub fn drain_events(&mut self) -> Vec<WorkflowEvent> {
        std::mem::take(&mut self.events)
    }

    /// ファイルを受け付けてアップロードを開始（Idleのみ）
    ///
    /// 検証に失敗した場合はエラー通知を積み、Idleのまま。
    pub fn accept_file(&mut self, candidate: &FileCandidate) -> Result<Uuid, WorkflowError> {
        if self.state != WorkflowState::Idle {
            return Err(self.invalid(WorkflowAction::AcceptFile));
        }

        if let Err(err) = validate_upload(candidate) {
            warn!(file = %candidate.name, mime = %candidate.mime_type, size = candidate.size, "upload rejected: {}", err);
            self.notify(NoticeLevel::Error, err.summary(), err.to_string());
            return Err(err.into());
        }

        let file = UploadedFile::accepted(candidate);
        let file_id = file.id;
        info!(file = %file.name, size = file.size, "upload accepted");

        self.upload_timer = Some(self.ticker.start_interval(
            self.config.upload_tick,
            TimerKind::UploadProgress,
            file_id,
        ));
        self.file = Some(file);
        self.result = None;
        self.transition(WorkflowState::Uploading);

        Ok(file_id)
    }

    /// タイマー発火を処理。現在のタイマーでなければ false
    pub fn on_timer(&mut self, token: TimerToken) -> bool {
        let active_file = self.file.as_ref().map(|f| f.id);
        if active_file != Some(token.file_id) {
            debug!(timer = token.id, "ignoring timer for inactive file");
            return false;
        }

        match token.kind {
            TimerKind::UploadProgress if is_current(self.upload_timer, &token) => {
                self.tick_upload();
                true
            }
            TimerKind::UploadSettled if is_current(self.step_timer, &token) => {
                self.step_timer = None;
                self.start_processing();
                true
            }
            TimerKind::ProcessingComplete if is_current(self.step_timer, &token) => {
                self.finish_processing();
                true
            }
            TimerKind::ResultReveal if is_current(self.step_timer, &token) => {
                self.step_timer = None;
                self.reveal_result();
                true
            }
            _ => {
                debug!(timer = token.id, kind = ?token.kind, "ignoring stale timer");
                false
            }
        }
    }

    /// Complete → Downloading
    pub fn request_report(&mut self) -> Result<(), WorkflowError> {
        if self.state != WorkflowState::Complete {
            return Err(self.invalid(WorkflowAction::RequestReport));
        }
        self.transition(WorkflowState::Downloading);
        Ok(())
    }

    /// Downloading → Complete
    pub fn back_to_results(&mut self) -> Result<(), WorkflowError> {
        if self.state != WorkflowState::Downloading {
            return Err(self.invalid(WorkflowAction::BackToResults));
        }
        self.transition(WorkflowState::Complete);
        Ok(())
    }

    /// 任意の非Idle状態 → Idle（タイマー停止、ファイルと結果を破棄）
    pub fn reset(&mut self) -> Result<(), WorkflowError> {
        if self.state == WorkflowState::Idle {
            return Err(self.invalid(WorkflowAction::Reset));
        }
        self.clear();
        Ok(())
    }

    /// Error → Idle
    pub fn retry(&mut self) -> Result<(), WorkflowError> {
        if self.state != WorkflowState::Error {
            return Err(self.invalid(WorkflowAction::Retry));
        }
        self.clear();
        Ok(())
    }

    /// 現在の結果からレポートを生成（状態は変えない）
    pub fn export_report(&self) -> Result<ReportArtifact, WorkflowError> {
        self.result.as_ref().map(build_report).ok_or(WorkflowError::NoResult)
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        debug!(theme = ?self.theme, "theme toggled");
        self.theme
    }

    /// 全タイマーを停止（状態はそのまま）
    pub fn teardown(&mut self) {
        if let Some(token) = self.upload_timer.take() {
            self.ticker.cancel(&token);
        }
        if let Some(token) = self.step_timer.take() {
            self.ticker.cancel(&token);
        }
    }

    fn tick_upload(&mut self) {
        let increment = self.rng.random::<f64>() * self.config.max_progress_increment;
        let Some(file) = self.file.as_mut() else {
            return;
        };

        file.progress = (file.progress + increment).min(100.0);
        let (file_id, progress) = (file.id, file.progress);
        self.events.push(WorkflowEvent::Progress { file_id, progress });

        if progress < 100.0 {
            return;
        }

        if let Some(token) = self.upload_timer.take() {
            self.ticker.cancel(&token);
        }

        if self.config.upload_settle_delay.is_zero() {
            self.start_processing();
        } else {
            self.step_timer = Some(self.ticker.start_timeout(
                self.config.upload_settle_delay,
                TimerKind::UploadSettled,
                file_id,
            ));
        }
    }

    fn start_processing(&mut self) {
        let Some(file) = self.file.as_mut() else {
            return;
        };
        file.status = FileStatus::Processing;
        let file_id = file.id;

        self.step_timer = Some(self.ticker.start_timeout(
            self.config.processing_delay,
            TimerKind::ProcessingComplete,
            file_id,
        ));
        self.transition(WorkflowState::Processing);
    }

    fn finish_processing(&mut self) {
        if let Some(token) = self.step_timer.take() {
            self.ticker.cancel(&token);
        }

        let outcome = match self.file.as_ref() {
            Some(file) => self.analyzer.analyze(file, &mut self.rng),
            None => return,
        };

        match outcome {
            Ok(result) => {
                let Some(file) = self.file.as_mut() else {
                    return;
                };
                file.status = FileStatus::Complete;
                file.progress = 100.0;
                let file_id = file.id;

                self.pending_result = Some(result);
                if self.config.result_reveal_delay.is_zero() {
                    self.reveal_result();
                } else {
                    // ファイルは完了表示、結果と通知は待ってから
                    self.step_timer = Some(self.ticker.start_timeout(
                        self.config.result_reveal_delay,
                        TimerKind::ResultReveal,
                        file_id,
                    ));
                }
            }
            Err(err) => {
                warn!("processing failed: {}", err);
                if let Some(file) = self.file.as_mut() {
                    file.status = FileStatus::Error;
                    file.error = Some(err.to_string());
                }
                self.notify(NoticeLevel::Error, "Processing Failed", err.to_string());
                self.transition(WorkflowState::Error);
            }
        }
    }

    fn reveal_result(&mut self) {
        let Some(result) = self.pending_result.take() else {
            return;
        };
        self.result = Some(result);
        self.notify(
            NoticeLevel::Success,
            "Processing Complete",
            "AI analysis and AAC recommendations are ready to view",
        );
        self.transition(WorkflowState::Complete);
    }

    fn clear(&mut self) {
        self.teardown();
        self.file = None;
        self.result = None;
        self.pending_result = None;
        self.transition(WorkflowState::Idle);
    }

    fn transition(&mut self, to: WorkflowState) {
        let from = self.state;
        self.state = to;
        debug!(%from, %to, "state changed");
        self.events.push(WorkflowEvent::StateChanged { from, to });
    }

    fn notify(&mut self, level: NoticeLevel, title: impl Into<String>, description: impl Into<String>) {
        let notice = Notice {
            level,
            title: title.into(),
            description: description.into(),
        };
        match level {
            NoticeLevel::Error => warn!(title = %notice.title, "{}", notice.description),
            _ => info!(title = %notice.title, "{}", notice.description),
        }
        self.events.push(WorkflowEvent::Notice(notice));
    }

    fn invalid(&self, action: WorkflowAction) -> WorkflowError {
        debug!(state = %self.state, %action, "rejected transition");
        WorkflowError::InvalidTransition {
            from: self.state,
            action,
        }
    }
}

fn is_current(active: Option<TimerToken>, token: &TimerToken) -> bool {
    active.is_some_and(|t| t.id == token.id)
}

impl<A: Analyzer, R: RngCore> WorkflowController<ManualTicker, A, R> {
    /// タイマーを順に発火させ、待ち状態を抜けるまで進める
    pub fn run_to_settled(&mut self) -> WorkflowState {
        while self.state.is_busy() {
            match self.ticker.advance() {
                Some(token) => {
                    self.on_timer(token);
                }
                None => break,
            }
        }
        self.state
    }
}

impl<T: Ticker, A: Analyzer, R: RngCore> Drop for WorkflowController<T, A, R> {
    fn drop(&mut self) {
        self.teardown();
    }
}
