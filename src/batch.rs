//! フォルダ一括処理
//!
//! 各ファイルを独立したコントローラ（ManualTicker）で並列に処理する。
//! 匿名化するとレポート名が同じになるため、出力は資料名ごとのサブフォルダに分ける。

use crate::cli::ExportFormat;
use crate::error::{AacError, Result};
use crate::export;
use crate::intake::{candidate_from_path, scan_intake_folder};
use crate::pipeline::{process_instant, PipelineOptions};
use crate::progress::ProgressView;
use aac_intake_common::WorkflowState;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// 1ファイルの処理結果
#[derive(Debug)]
pub struct BatchItem {
    pub source: PathBuf,
    pub outcome: std::result::Result<Vec<PathBuf>, String>,
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub items: Vec<BatchItem>,
}

impl BatchSummary {
    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|i| i.outcome.is_ok()).count()
    }

    pub fn failed(&self) -> Vec<&BatchItem> {
        self.items.iter().filter(|i| i.outcome.is_err()).collect()
    }
}

/// 資料名からサブフォルダ名を作成
fn item_dir(output_dir: &Path, source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "document".to_string());
    output_dir.join(stem)
}

fn process_one(
    source: &Path,
    options: &PipelineOptions,
    format: ExportFormat,
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let candidate = candidate_from_path(source, None)?;
    let controller = process_instant(&candidate, options, &mut ProgressView::quiet())?;

    let result = match (controller.state(), controller.result()) {
        (WorkflowState::Complete, Some(result)) => result,
        (state, _) => {
            let reason = controller
                .file()
                .and_then(|f| f.error.clone())
                .unwrap_or_else(|| format!("finished in state {}", state));
            return Err(AacError::Export(reason));
        }
    };

    let dir = item_dir(output_dir, source);
    let mut written = Vec::new();
    if format.includes_text() {
        written.push(export::write_text_report(result, &dir)?);
    }
    if format.includes_excel() {
        written.push(export::write_excel_report(result, &dir)?);
    }
    let json_path = dir.join("result.json");
    export::save_result_json(result, &json_path)?;
    written.push(json_path);

    Ok(written)
}

/// フォルダ内の資料をすべて処理
pub fn run_batch(
    folder: &Path,
    recursive: bool,
    options: &PipelineOptions,
    format: ExportFormat,
    output_dir: &Path,
) -> Result<BatchSummary> {
    let documents = scan_intake_folder(folder, recursive)?;
    if documents.is_empty() {
        return Err(AacError::NoDocumentsFound(folder.display().to_string()));
    }

    tracing::info!(count = documents.len(), folder = %folder.display(), "batch started");

    let items: Vec<BatchItem> = documents
        .par_iter()
        .enumerate()
        .map(|(index, source)| {
            let outcome = process_one(
                source,
                &options.with_seed_offset(index as u64),
                format,
                output_dir,
            )
            .map_err(|e| e.to_string());
            if let Err(reason) = &outcome {
                tracing::warn!(file = %source.display(), "batch item failed: {}", reason);
            }
            BatchItem {
                source: source.clone(),
                outcome,
            }
        })
        .collect();

    Ok(BatchSummary { items })
}
