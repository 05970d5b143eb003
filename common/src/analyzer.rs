//! 解析ステップ
//!
//! 処理タイマー満了時にコントローラから呼ばれる。
//! 現状は模擬結果を返す MockAnalyzer のみだが、実解析を差し込めるよう
//! 失敗（AnalysisError）を返せる形にしてある。

use crate::language::ScenarioPolicy;
use crate::redaction::{ClientProfile, RedactionPolicy};
use crate::synthesis::build_result;
use crate::types::{ProcessedResult, UploadedFile};
use chrono::NaiveDate;
use rand::RngCore;
use thiserror::Error;
use tracing::debug;

/// 解析失敗
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("analysis failed: {0}")]
    Failed(String),
}

/// 解析器
pub trait Analyzer {
    fn analyze(
        &mut self,
        file: &UploadedFile,
        rng: &mut dyn RngCore,
    ) -> Result<ProcessedResult, AnalysisError>;
}

/// 処理日の取得元
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// ローカル時刻の今日
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// 固定日付（テスト用）
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// 模擬結果の生成設定
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynthesisOptions {
    pub scenario: ScenarioPolicy,
    pub redaction: RedactionPolicy,
    pub profile: ClientProfile,
}

/// 模擬解析器
#[derive(Debug, Clone)]
pub struct MockAnalyzer<C: Clock = SystemClock> {
    options: SynthesisOptions,
    clock: C,
}

impl MockAnalyzer<SystemClock> {
    pub fn new(options: SynthesisOptions) -> Self {
        Self {
            options,
            clock: SystemClock,
        }
    }
}

impl<C: Clock> MockAnalyzer<C> {
    pub fn with_clock(options: SynthesisOptions, clock: C) -> Self {
        Self { options, clock }
    }

    pub fn options(&self) -> &SynthesisOptions {
        &self.options
    }
}

impl<C: Clock> Analyzer for MockAnalyzer<C> {
    fn analyze(
        &mut self,
        file: &UploadedFile,
        rng: &mut dyn RngCore,
    ) -> Result<ProcessedResult, AnalysisError> {
        let scenario = self.options.scenario.resolve(rng);
        debug!(file = %file.name, ?scenario, "synthesizing mock recommendations");

        Ok(build_result(
            &self.options.profile,
            self.options.redaction,
            scenario,
            self.clock.today(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::{LanguageScenario, SecondaryLanguage};
    use crate::validation::FileCandidate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_mock_analyzer_uses_clock_and_policy() {
        let options = SynthesisOptions {
            scenario: ScenarioPolicy::Fixed(LanguageScenario::Bilingual(SecondaryLanguage::French)),
            ..Default::default()
        };
        let clock = FixedClock(NaiveDate::from_ymd_opt(2026, 3, 9).unwrap());
        let mut analyzer = MockAnalyzer::with_clock(options, clock);
        let file = UploadedFile::accepted(&FileCandidate::new("intake.pdf", "application/pdf", 10));
        let mut rng = StdRng::seed_from_u64(0);

        let result = analyzer.analyze(&file, &mut rng).expect("解析失敗");
        assert_eq!(result.processed_date, "March 9, 2026");
        assert_eq!(result.secondary_language, Some(SecondaryLanguage::French));
        assert_eq!(result.client_name, "[Patient], 14 years old");
    }

    #[test]
    fn test_analysis_error_display() {
        let err = AnalysisError::Failed("model unavailable".into());
        assert_eq!(err.to_string(), "analysis failed: model unavailable");
    }
}
