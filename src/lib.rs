//! AAC Intake CLI
//!
//! 評価資料の受付から推奨レポートの保存までを端末上で行う。

pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod intake;
pub mod logging;
pub mod pipeline;
pub mod progress;
pub mod runtime;
pub mod session;
