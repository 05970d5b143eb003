pub mod excel;

use crate::cli::ExportFormat;
use crate::error::{AacError, Result};
use aac_intake_common::{build_report, report_file_stem, ProcessedResult};
use std::path::{Path, PathBuf};

/// 出力ディレクトリを用意
fn ensure_dir(output_dir: &Path) -> Result<()> {
    if !output_dir.exists() {
        std::fs::create_dir_all(output_dir)?;
    }
    Ok(())
}

/// テキストレポートを書き出し、そのパスを返す
pub fn write_text_report(result: &ProcessedResult, output_dir: &Path) -> Result<PathBuf> {
    ensure_dir(output_dir)?;
    let artifact = build_report(result);
    let path = output_dir.join(&artifact.file_name);
    std::fs::write(&path, artifact.content)?;
    tracing::debug!(path = %path.display(), "text report written");
    Ok(path)
}

/// Excelレポートを書き出し、そのパスを返す（テキストと同じファイル名で拡張子のみ異なる）
pub fn write_excel_report(result: &ProcessedResult, output_dir: &Path) -> Result<PathBuf> {
    ensure_dir(output_dir)?;
    let path = output_dir.join(format!("{}.xlsx", report_file_stem(result)));
    excel::generate_excel(result, &path)?;
    tracing::debug!(path = %path.display(), "excel report written");
    Ok(path)
}

/// 解析結果をJSONで保存
pub fn save_result_json(result: &ProcessedResult, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    let json = result.to_json_pretty()?;
    std::fs::write(path, json)?;
    Ok(())
}

/// 保存済みの解析結果を読み込み
pub fn load_result_json(path: &Path) -> Result<ProcessedResult> {
    if !path.is_file() {
        return Err(AacError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(ProcessedResult::from_json(&content)?)
}

/// 指定形式でレポートを出力
pub fn export_result(
    result: &ProcessedResult,
    format: ExportFormat,
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    if format.includes_text() {
        let path = write_text_report(result, output_dir)?;
        println!("✔ テキスト出力: {}", path.display());
        written.push(path);
    }

    if format.includes_excel() {
        println!("- Excelを生成中...");
        let path = write_excel_report(result, output_dir)?;
        println!("✔ Excel出力: {}", path.display());
        written.push(path);
    }

    Ok(written)
}
