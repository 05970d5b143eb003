//! CLIと将来のWeb(WASM)ラッパーで共有する出力処理

#[cfg(feature = "excel")]
pub mod excel_core;
