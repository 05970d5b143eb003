//! 受付〜処理完了までの実行
//!
//! `--instant` / バッチでは ManualTicker で待ち時間なしに進め、
//! 通常は TokioTicker で実時間のタイマーを使う。

use crate::cli::SynthesisArgs;
use crate::config::Config;
use crate::error::Result;
use crate::progress::ProgressView;
use crate::runtime::{settle, TokioTicker};
use aac_intake_common::{
    ClientProfile, FileCandidate, ManualTicker, MockAnalyzer, ProcessedResult, RedactionPolicy,
    ReportArtifact, SynthesisOptions, Theme, Ticker, TimerToken, WorkflowConfig,
    WorkflowController, WorkflowError, WorkflowState,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc::UnboundedReceiver;

pub type MockController<T> = WorkflowController<T, MockAnalyzer, StdRng>;

/// 実行設定（設定ファイル + コマンドライン）
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub workflow: WorkflowConfig,
    pub synthesis: SynthesisOptions,
    pub seed: Option<u64>,
    pub theme: Theme,
}

impl PipelineOptions {
    /// コマンドライン指定を設定ファイルより優先して合成
    pub fn from_config(config: &Config, args: &SynthesisArgs, theme: Theme) -> Result<Self> {
        let scenario = match args.language {
            Some(policy) => policy,
            None => config.scenario_policy()?,
        };
        let redaction = if args.no_redact {
            RedactionPolicy::Plain
        } else {
            config.redaction()
        };

        Ok(Self {
            workflow: config.workflow_config(),
            synthesis: SynthesisOptions {
                scenario,
                redaction,
                profile: ClientProfile::default(),
            },
            seed: args.seed,
            theme,
        })
    }

    /// シードをずらした設定（バッチで1ファイルごとに使う）
    pub fn with_seed_offset(&self, offset: u64) -> Self {
        Self {
            seed: self.seed.map(|s| s.wrapping_add(offset)),
            ..self.clone()
        }
    }
}

pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

pub fn build_controller<T: Ticker>(options: &PipelineOptions, ticker: T) -> MockController<T> {
    WorkflowController::new(
        options.workflow,
        ticker,
        MockAnalyzer::new(options.synthesis.clone()),
        make_rng(options.seed),
        options.theme,
    )
}

fn flush<T: Ticker>(controller: &mut MockController<T>, view: &mut ProgressView) {
    for event in controller.drain_events() {
        view.handle(&event);
    }
}

fn accept<T: Ticker>(
    controller: &mut MockController<T>,
    candidate: &FileCandidate,
    view: &mut ProgressView,
) -> Result<()> {
    // 拒否時の通知も表示してからエラーを返す
    let accepted = controller.accept_file(candidate);
    flush(controller, view);
    accepted?;
    Ok(())
}

/// 待ち時間なしで受付から完了まで進める
pub fn run_instant(
    controller: &mut MockController<ManualTicker>,
    candidate: &FileCandidate,
    view: &mut ProgressView,
) -> Result<WorkflowState> {
    accept(controller, candidate, view)?;
    let state = controller.run_to_settled();
    flush(controller, view);
    Ok(state)
}

/// 1ファイルを新しいコントローラで処理（バッチ用）
pub fn process_instant(
    candidate: &FileCandidate,
    options: &PipelineOptions,
    view: &mut ProgressView,
) -> Result<MockController<ManualTicker>> {
    let mut controller = build_controller(options, ManualTicker::new());
    run_instant(&mut controller, candidate, view)?;
    Ok(controller)
}

/// 実行エンジン（タイマー実装の切り替え）
pub enum Engine {
    Instant(MockController<ManualTicker>),
    Realtime {
        controller: MockController<TokioTicker>,
        receiver: UnboundedReceiver<TimerToken>,
    },
}

macro_rules! dispatch {
    ($engine:expr, $c:ident => $body:expr) => {
        match $engine {
            Engine::Instant($c) => $body,
            Engine::Realtime { controller: $c, .. } => $body,
        }
    };
}

impl Engine {
    /// Realtime は tokio ランタイム内で使うこと
    pub fn new(options: &PipelineOptions, instant: bool) -> Self {
        if instant {
            Engine::Instant(build_controller(options, ManualTicker::new()))
        } else {
            let (ticker, receiver) = TokioTicker::new();
            Engine::Realtime {
                controller: build_controller(options, ticker),
                receiver,
            }
        }
    }

    /// ファイルを受け付け、待ち状態を抜けるまで進める
    pub async fn process(
        &mut self,
        candidate: &FileCandidate,
        view: &mut ProgressView,
    ) -> Result<WorkflowState> {
        match self {
            Engine::Instant(controller) => run_instant(controller, candidate, view),
            Engine::Realtime {
                controller,
                receiver,
            } => {
                accept(controller, candidate, view)?;
                Ok(settle(controller, receiver, |event| view.handle(event)).await)
            }
        }
    }

    pub fn state(&self) -> WorkflowState {
        dispatch!(self, c => c.state())
    }

    pub fn result(&self) -> Option<&ProcessedResult> {
        dispatch!(self, c => c.result())
    }

    pub fn theme(&self) -> Theme {
        dispatch!(self, c => c.theme())
    }

    pub fn toggle_theme(&mut self) -> Theme {
        dispatch!(self, c => c.toggle_theme())
    }

    pub fn request_report(&mut self) -> std::result::Result<(), WorkflowError> {
        dispatch!(self, c => c.request_report())
    }

    pub fn back_to_results(&mut self) -> std::result::Result<(), WorkflowError> {
        dispatch!(self, c => c.back_to_results())
    }

    pub fn reset(&mut self) -> std::result::Result<(), WorkflowError> {
        dispatch!(self, c => c.reset())
    }

    pub fn retry(&mut self) -> std::result::Result<(), WorkflowError> {
        dispatch!(self, c => c.retry())
    }

    pub fn export_report(&self) -> std::result::Result<ReportArtifact, WorkflowError> {
        dispatch!(self, c => c.export_report())
    }

    pub fn pending_event_count(&self) -> usize {
        dispatch!(self, c => c.pending_event_count())
    }

    /// 溜まったイベントを表示へ流す
    pub fn flush_events(&mut self, view: &mut ProgressView) {
        dispatch!(self, c => flush(c, view))
    }
}
