//! テキストレポート出力
//!
//! ProcessedResult → プレーンテキストの純関数。
//! 同じ結果からは常にバイト単位で同一の出力になる。

use crate::redaction::sanitize_identifier;
use crate::types::ProcessedResult;

/// レポート1行目
pub const REPORT_HEADER: &str = "AAC CUSTOMIZATION RECOMMENDATION REPORT";

/// 出力ファイル名の接頭辞
pub const REPORT_FILE_PREFIX: &str = "AAC_Recommendations_";

const DETAIL_INDENT: &str = "   ";

/// ダウンロード用の成果物
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifact {
    pub file_name: String,
    pub content: String,
}

/// 拡張子なしのファイル名（表示ラベルと同じ識別子から生成）
pub fn report_file_stem(result: &ProcessedResult) -> String {
    format!("{}{}", REPORT_FILE_PREFIX, sanitize_identifier(&result.client_name))
}

/// テキストレポートのファイル名
pub fn report_file_name(result: &ProcessedResult) -> String {
    format!("{}.txt", report_file_stem(result))
}

/// レポート本文を生成
pub fn render_report(result: &ProcessedResult) -> String {
    let mut lines: Vec<String> = vec![
        REPORT_HEADER.to_string(),
        format!("Client: {}", result.client_name),
        format!("Date: {}", result.processed_date),
        String::new(),
        "COMMUNICATION NEEDS:".to_string(),
    ];

    lines.extend(result.communication_needs.iter().map(|need| format!("- {}", need)));

    lines.push(String::new());
    lines.push("MEDICAL HISTORY:".to_string());
    lines.push(result.medical_history.clone());

    lines.push(String::new());
    lines.push("RECOMMENDATIONS:".to_string());
    for (index, rec) in result.recommendations.iter().enumerate() {
        if index > 0 {
            lines.push(String::new());
        }
        lines.push(format!("[{} PRIORITY] {}", rec.priority.as_upper(), rec.category));
        lines.extend(rec.details.lines().map(|line| format!("{}{}", DETAIL_INDENT, line)));
    }

    lines.push(String::new());
    lines.push("ADDITIONAL NOTES:".to_string());
    lines.push(result.additional_notes.clone());

    if let Some(language) = result.secondary_language {
        lines.push(String::new());
        lines.push(format!("LANGUAGE SUPPORT: English / {}", language));
    }

    let mut report = lines.join("\n");
    report.push('\n');
    report
}

/// ファイル名と本文をまとめて生成
pub fn build_report(result: &ProcessedResult) -> ReportArtifact {
    ReportArtifact {
        file_name: report_file_name(result),
        content: render_report(result),
    }
}
