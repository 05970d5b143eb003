//! テキスト/Excel出力の統合テスト

use aac_intake::cli::ExportFormat;
use aac_intake::export;
use aac_intake_common::analyzer::{Clock, SystemClock};
use aac_intake_common::synthesis::build_result;
use aac_intake_common::{
    ClientProfile, LanguageScenario, ProcessedResult, RedactionPolicy, SecondaryLanguage,
};
use tempfile::tempdir;

fn create_test_result(scenario: LanguageScenario) -> ProcessedResult {
    build_result(
        &ClientProfile::default(),
        RedactionPolicy::Redacted,
        scenario,
        SystemClock.today(),
    )
}

#[test]
fn test_text_report_written() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = create_test_result(LanguageScenario::EnglishOnly);

    let path = export::write_text_report(&result, dir.path()).expect("テキスト出力失敗");
    assert_eq!(
        path.file_name().unwrap().to_string_lossy(),
        "AAC_Recommendations_Patient_14_years_old.txt"
    );

    let content = std::fs::read_to_string(&path).expect("読み込み失敗");
    assert_eq!(content.lines().next(), Some("AAC CUSTOMIZATION RECOMMENDATION REPORT"));
    assert!(!content.contains("Jordan"), "実名が含まれている");
}

#[test]
fn test_export_is_byte_identical() {
    let dir_a = tempdir().unwrap();
    let dir_b = tempdir().unwrap();
    let result = create_test_result(LanguageScenario::Bilingual(SecondaryLanguage::Vietnamese));

    let a = export::write_text_report(&result, dir_a.path()).unwrap();
    let b = export::write_text_report(&result, dir_b.path()).unwrap();
    assert_eq!(std::fs::read(a).unwrap(), std::fs::read(b).unwrap());
}

#[test]
fn test_excel_report_written() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = create_test_result(LanguageScenario::Bilingual(SecondaryLanguage::Spanish));

    let path = export::write_excel_report(&result, dir.path()).expect("Excel出力失敗");
    assert_eq!(path.extension().unwrap(), "xlsx");
    assert_eq!(path.file_stem().unwrap().to_string_lossy(), "AAC_Recommendations_Patient_14_years_old");

    let metadata = std::fs::metadata(&path).expect("ファイルメタデータ取得失敗");
    assert!(metadata.len() > 0, "Excelファイルが空");
}

#[test]
fn test_export_both_formats() {
    let dir = tempdir().unwrap();
    let result = create_test_result(LanguageScenario::EnglishOnly);

    let written = export::export_result(&result, ExportFormat::Both, &dir.path().join("out")).unwrap();
    assert_eq!(written.len(), 2);
    assert!(written.iter().all(|p| p.exists()));
}

#[test]
fn test_result_json_round_trip_through_files() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("result.json");
    let result = create_test_result(LanguageScenario::Bilingual(SecondaryLanguage::French));

    export::save_result_json(&result, &path).unwrap();
    let loaded = export::load_result_json(&path).unwrap();
    assert_eq!(loaded, result);

    // 再出力しても同じレポートになる
    let from_loaded = export::write_text_report(&loaded, dir.path()).unwrap();
    let content = std::fs::read_to_string(from_loaded).unwrap();
    assert!(content.trim_end().ends_with("LANGUAGE SUPPORT: English / French"));
}
