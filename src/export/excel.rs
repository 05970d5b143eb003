//! Excel生成（CLI版）
//!
//! 共通ライブラリの excel_core でバッファを作り、ファイルに書き出す。

use crate::error::Result;
use aac_intake_common::export::excel_core::generate_excel_buffer;
use aac_intake_common::ProcessedResult;
use std::path::Path;

pub fn generate_excel(result: &ProcessedResult, output_path: &Path) -> Result<()> {
    let buffer = generate_excel_buffer(result)?;
    std::fs::write(output_path, buffer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AacError;

    #[test]
    fn test_excel_error_is_common_error() {
        let err: AacError = aac_intake_common::Error::Excel("Excel保存エラー: disk full".into()).into();
        assert!(matches!(err, AacError::Common(aac_intake_common::Error::Excel(_))));
        assert_eq!(err.to_string(), "Excel error: Excel保存エラー: disk full");
    }

    #[test]
    fn test_generate_excel_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let result = aac_intake_common::synthesis::build_result(
            &aac_intake_common::ClientProfile::default(),
            aac_intake_common::RedactionPolicy::Redacted,
            aac_intake_common::LanguageScenario::EnglishOnly,
            aac_intake_common::Clock::today(&aac_intake_common::SystemClock),
        );
        let missing = dir.path().join("missing").join("report.xlsx");
        assert!(matches!(generate_excel(&result, &missing), Err(AacError::Io(_))));
    }
}
