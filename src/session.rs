//! 対話セッション（結果表示・ダウンロード画面）
//!
//! 処理完了後の画面遷移を dialoguer の選択肢で操作する。
//! 操作の適用（apply_action）はプロンプトから切り離してあり、単体でテストできる。

use crate::cli::ExportFormat;
use crate::error::{AacError, Result};
use crate::export;
use crate::intake::candidate_from_path;
use crate::pipeline::Engine;
use crate::progress::ProgressView;
use aac_intake_common::{render_report, ProcessedResult, WorkflowState};
use dialoguer::{Input, Select};
use std::path::{Path, PathBuf};

/// 画面で選べる操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    /// 結果画面 → ダウンロード画面
    DownloadReport,
    /// ダウンロード画面でレポートを保存
    SaveReport,
    /// ダウンロード画面 → 結果画面
    BackToResults,
    /// リセットして別のファイルを処理
    ProcessAnother,
    /// 失敗後にやり直す
    Retry,
    ToggleTheme,
    Quit,
}

impl SessionAction {
    pub fn label(&self) -> &'static str {
        match self {
            SessionAction::DownloadReport => "レポートをダウンロード",
            SessionAction::SaveReport => "保存",
            SessionAction::BackToResults => "結果に戻る",
            SessionAction::ProcessAnother => "別のファイルを処理",
            SessionAction::Retry => "やり直す",
            SessionAction::ToggleTheme => "テーマ切り替え",
            SessionAction::Quit => "終了",
        }
    }
}

/// 操作の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Continue,
    Saved(Vec<PathBuf>),
    /// Idleに戻った（次のファイルが必要）
    NeedFile,
    Exit,
}

/// 状態ごとに選べる操作
pub fn available_actions(state: WorkflowState) -> Vec<SessionAction> {
    match state {
        WorkflowState::Complete => vec![
            SessionAction::DownloadReport,
            SessionAction::ProcessAnother,
            SessionAction::ToggleTheme,
            SessionAction::Quit,
        ],
        WorkflowState::Downloading => vec![
            SessionAction::SaveReport,
            SessionAction::BackToResults,
            SessionAction::ProcessAnother,
            SessionAction::ToggleTheme,
            SessionAction::Quit,
        ],
        WorkflowState::Error => vec![SessionAction::Retry, SessionAction::Quit],
        WorkflowState::Idle => vec![SessionAction::ProcessAnother, SessionAction::Quit],
        WorkflowState::Uploading | WorkflowState::Processing => vec![SessionAction::Quit],
    }
}

/// 操作を適用
pub fn apply_action(
    engine: &mut Engine,
    action: SessionAction,
    format: ExportFormat,
    output_dir: &Path,
) -> Result<SessionOutcome> {
    match action {
        SessionAction::DownloadReport => {
            engine.request_report()?;
            Ok(SessionOutcome::Continue)
        }
        SessionAction::SaveReport => {
            if engine.state() != WorkflowState::Downloading {
                return Err(AacError::Interaction("ダウンロード画面でのみ保存できます".into()));
            }
            let result = engine.result().ok_or(aac_intake_common::WorkflowError::NoResult)?;
            let written = export::export_result(result, format, output_dir)?;
            Ok(SessionOutcome::Saved(written))
        }
        SessionAction::BackToResults => {
            engine.back_to_results()?;
            Ok(SessionOutcome::Continue)
        }
        SessionAction::ProcessAnother => {
            if engine.state() != WorkflowState::Idle {
                engine.reset()?;
            }
            Ok(SessionOutcome::NeedFile)
        }
        SessionAction::Retry => {
            engine.retry()?;
            Ok(SessionOutcome::NeedFile)
        }
        SessionAction::ToggleTheme => {
            let theme = engine.toggle_theme();
            tracing::debug!(?theme, "theme changed from session");
            Ok(SessionOutcome::Continue)
        }
        SessionAction::Quit => Ok(SessionOutcome::Exit),
    }
}

/// 結果画面の表示内容（推奨・ニーズ・病歴・備考の全文）
pub fn render_results_view(result: &ProcessedResult) -> String {
    let mut lines = vec![
        format!("クライアント: {}", result.client_name),
        format!("処理日: {}", result.processed_date),
    ];
    if let Some(language) = result.secondary_language {
        lines.push(format!("言語: English / {}", language));
    }

    lines.push(String::new());
    lines.push("推奨:".to_string());
    for rec in &result.recommendations {
        lines.push(format!("  [{}] {}", rec.priority.label(), rec.category));
        lines.extend(rec.details.lines().map(|line| format!("      {}", line)));
    }

    lines.push(String::new());
    lines.push("コミュニケーションニーズ:".to_string());
    lines.extend(result.communication_needs.iter().map(|n| format!("  - {}", n)));

    lines.push(String::new());
    lines.push("病歴:".to_string());
    lines.extend(result.medical_history.lines().map(|line| format!("  {}", line)));

    lines.push(String::new());
    lines.push("備考:".to_string());
    lines.extend(result.additional_notes.lines().map(|line| format!("  {}", line)));

    lines.join("\n")
}

fn show_view(engine: &Engine) {
    match (engine.state(), engine.result()) {
        (WorkflowState::Complete, Some(result)) => {
            println!("\n📋 解析結果 ({:?})\n", engine.theme());
            println!("{}\n", render_results_view(result));
        }
        (WorkflowState::Downloading, Some(result)) => {
            println!("\n📄 レポートプレビュー\n");
            println!("{}", render_report(result));
        }
        (WorkflowState::Error, _) => {
            println!("\n✖ 処理に失敗しました");
        }
        _ => {}
    }
}

fn prompt_action(actions: &[SessionAction]) -> Result<SessionAction> {
    let labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();
    let index = Select::new()
        .with_prompt("操作を選択")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(|e| AacError::Interaction(e.to_string()))?;
    Ok(actions[index])
}

fn prompt_file() -> Result<Option<PathBuf>> {
    let input: String = Input::new()
        .with_prompt("資料ファイルのパス（空欄で終了）")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| AacError::Interaction(e.to_string()))?;

    let trimmed = input.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(PathBuf::from(trimmed)))
    }
}

/// 対話セッションを実行
pub async fn run_interactive(
    engine: &mut Engine,
    view: &mut ProgressView,
    format: ExportFormat,
    output_dir: &Path,
    mime_override: Option<&str>,
) -> Result<()> {
    loop {
        show_view(engine);

        let action = prompt_action(&available_actions(engine.state()))?;
        let outcome = match apply_action(engine, action, format, output_dir) {
            Ok(outcome) => outcome,
            Err(e) => {
                println!("✖ {}", e);
                continue;
            }
        };
        view.set_theme(engine.theme());
        // 画面遷移のイベントは次の受付まで持ち越さない
        engine.flush_events(view);

        match outcome {
            SessionOutcome::Continue => {}
            SessionOutcome::Saved(paths) => {
                println!("✔ {}件のファイルを保存しました", paths.len());
            }
            SessionOutcome::Exit => break,
            SessionOutcome::NeedFile => {
                // 受付に成功するか空欄で終了するまで繰り返す
                loop {
                    let Some(path) = prompt_file()? else {
                        return Ok(());
                    };
                    let candidate = match candidate_from_path(&path, mime_override) {
                        Ok(c) => c,
                        Err(e) => {
                            println!("✖ {}", e);
                            continue;
                        }
                    };
                    match engine.process(&candidate, view).await {
                        Ok(_) => break,
                        Err(e) => println!("✖ {}", e),
                    }
                }
            }
        }
    }

    Ok(())
}
