//! Excel生成（共通ライブラリ）
//!
//! ProcessedResult を2シート構成のワークブックにする:
//! - Summary: クライアント・日付・コミュニケーションニーズ・病歴・備考
//! - Recommendations: 推奨カテゴリごとに1行（優先度・詳細）

use crate::error::{Error, Result};
use crate::types::{Priority, ProcessedResult};
use rust_xlsxwriter::*;

const LABEL_COL_WIDTH: f64 = 24.0;
const VALUE_COL_WIDTH: f64 = 90.0;
const PRIORITY_COL_WIDTH: f64 = 12.0;

struct Formats {
    title: Format,
    label: Format,
    value: Format,
    header: Format,
}

impl Formats {
    fn new() -> Self {
        Self {
            title: Format::new().set_bold().set_font_size(14.0),
            label: Format::new()
                .set_bold()
                .set_font_size(9.0)
                .set_font_color(Color::RGB(0x555555))
                .set_background_color(Color::RGB(0xF5F5F5))
                .set_align(FormatAlign::Top)
                .set_border(FormatBorder::Hair)
                .set_border_color(Color::RGB(0xAAAAAA)),
            value: Format::new()
                .set_font_size(11.0)
                .set_align(FormatAlign::Left)
                .set_align(FormatAlign::Top)
                .set_text_wrap()
                .set_border(FormatBorder::Hair)
                .set_border_color(Color::RGB(0xCCCCCC)),
            header: Format::new()
                .set_bold()
                .set_background_color(Color::RGB(0xDDE7F0))
                .set_border(FormatBorder::Thin)
                .set_border_color(Color::RGB(0xAAAAAA)),
        }
    }
}

/// 優先度ごとの背景色
fn priority_format(priority: Priority) -> Format {
    let color = match priority {
        Priority::High => 0xF8D7DA,
        Priority::Medium => 0xFFF3CD,
        Priority::Low => 0xD4EDDA,
    };
    Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::Top)
        .set_background_color(Color::RGB(color))
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC))
}

fn write_summary(
    worksheet: &mut Worksheet,
    result: &ProcessedResult,
    formats: &Formats,
) -> std::result::Result<(), XlsxError> {
    worksheet.set_name("Summary")?;
    worksheet.set_column_width(0, LABEL_COL_WIDTH)?;
    worksheet.set_column_width(1, VALUE_COL_WIDTH)?;

    worksheet.write_string_with_format(0, 0, "AAC Customization Recommendations", &formats.title)?;

    let language = match result.secondary_language {
        Some(language) => format!("English / {}", language),
        None => "English".to_string(),
    };
    let rows = [
        ("Client", result.client_name.clone()),
        ("Date", result.processed_date.clone()),
        ("Languages", language),
        ("Communication Needs", result.communication_needs.join("\n")),
        ("Medical History", result.medical_history.clone()),
        ("Additional Notes", result.additional_notes.clone()),
    ];

    for (offset, (label, value)) in rows.iter().enumerate() {
        let row = offset as u32 + 2;
        worksheet.write_string_with_format(row, 0, *label, &formats.label)?;
        worksheet.write_string_with_format(row, 1, value, &formats.value)?;
    }

    Ok(())
}

fn write_recommendations(
    worksheet: &mut Worksheet,
    result: &ProcessedResult,
    formats: &Formats,
) -> std::result::Result<(), XlsxError> {
    worksheet.set_name("Recommendations")?;
    worksheet.set_column_width(0, LABEL_COL_WIDTH)?;
    worksheet.set_column_width(1, PRIORITY_COL_WIDTH)?;
    worksheet.set_column_width(2, VALUE_COL_WIDTH)?;

    worksheet.write_string_with_format(0, 0, "Category", &formats.header)?;
    worksheet.write_string_with_format(0, 1, "Priority", &formats.header)?;
    worksheet.write_string_with_format(0, 2, "Details", &formats.header)?;

    for (offset, rec) in result.recommendations.iter().enumerate() {
        let row = offset as u32 + 1;
        worksheet.write_string_with_format(row, 0, &rec.category, &formats.label)?;
        worksheet.write_string_with_format(
            row,
            1,
            rec.priority.as_upper(),
            &priority_format(rec.priority),
        )?;
        worksheet.write_string_with_format(row, 2, &rec.details, &formats.value)?;
    }

    Ok(())
}

/// Excelをバッファに生成
pub fn generate_excel_buffer(result: &ProcessedResult) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let formats = Formats::new();

    write_summary(workbook.add_worksheet(), result, &formats)
        .map_err(|e| Error::Excel(format!("Summaryシート書き込みエラー: {}", e)))?;
    write_recommendations(workbook.add_worksheet(), result, &formats)
        .map_err(|e| Error::Excel(format!("Recommendationsシート書き込みエラー: {}", e)))?;

    workbook
        .save_to_buffer()
        .map_err(|e| Error::Excel(format!("Excel保存エラー: {}", e)))
}
