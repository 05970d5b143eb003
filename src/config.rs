use crate::cli::ThemePreference;
use crate::error::{AacError, Result};
use aac_intake_common::workflow::{
    DEFAULT_MAX_PROGRESS_INCREMENT, DEFAULT_PROCESSING_DELAY_MS, DEFAULT_UPLOAD_TICK_MS,
};
use aac_intake_common::{RedactionPolicy, ScenarioPolicy, WorkflowConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 処理待ち時間の環境変数による上書き
pub const PROCESSING_DELAY_ENV: &str = "AAC_INTAKE_PROCESSING_DELAY_MS";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub upload_tick_ms: u64,
    pub max_progress_increment: f64,
    pub processing_delay_ms: u64,
    /// 100%到達から処理開始までの待ち（ミリ秒、0で即座）
    pub upload_settle_ms: u64,
    /// 解析完了から結果表示までの待ち（ミリ秒、0で即座）
    pub result_reveal_ms: u64,
    /// クライアント名を伏せる（既定: true）
    pub redact: bool,
    pub theme: ThemePreference,
    pub output_dir: Option<PathBuf>,
    /// random / none / spanish / french / mandarin / vietnamese
    pub language: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            upload_tick_ms: DEFAULT_UPLOAD_TICK_MS,
            max_progress_increment: DEFAULT_MAX_PROGRESS_INCREMENT,
            processing_delay_ms: DEFAULT_PROCESSING_DELAY_MS,
            upload_settle_ms: 0,
            result_reveal_ms: 0,
            redact: true,
            theme: ThemePreference::Auto,
            output_dir: None,
            language: "random".into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides(std::env::var(PROCESSING_DELAY_ENV).ok().as_deref());
        Ok(config)
    }

    /// 指定パスから読み込み（なければ既定値）
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| AacError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("aac-intake").join("config.json"))
    }

    /// 環境変数の値を反映（数値として読めない場合は無視）
    pub fn apply_env_overrides(&mut self, processing_delay: Option<&str>) {
        if let Some(raw) = processing_delay {
            match raw.trim().parse::<u64>() {
                Ok(ms) => self.processing_delay_ms = ms,
                Err(_) => tracing::warn!(value = raw, "ignoring invalid {}", PROCESSING_DELAY_ENV),
            }
        }
    }

    pub fn workflow_config(&self) -> WorkflowConfig {
        WorkflowConfig::from_millis(
            self.upload_tick_ms,
            self.max_progress_increment,
            self.processing_delay_ms,
        )
        .with_reveal_delays(self.upload_settle_ms, self.result_reveal_ms)
    }

    pub fn redaction(&self) -> RedactionPolicy {
        if self.redact {
            RedactionPolicy::Redacted
        } else {
            RedactionPolicy::Plain
        }
    }

    pub fn scenario_policy(&self) -> Result<ScenarioPolicy> {
        self.language.parse().map_err(AacError::Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.processing_delay_ms, 4000);
        assert_eq!(config.upload_tick_ms, 200);
        assert_eq!(config.redaction(), RedactionPolicy::Redacted);
        assert_eq!(config.scenario_policy().unwrap(), ScenarioPolicy::Random);
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("none.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            processing_delay_ms: 10,
            redact: false,
            theme: ThemePreference::Dark,
            language: "french".into(),
            ..Default::default()
        };
        config.save_to(&path).expect("保存失敗");

        let loaded = Config::load_from(&path).expect("読み込み失敗");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"processing_delay_ms": 50}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.processing_delay_ms, 50);
        assert_eq!(config.upload_tick_ms, 200);
        assert!(config.redact);
    }

    #[test]
    fn test_env_override() {
        let mut config = Config::default();
        config.apply_env_overrides(Some("250"));
        assert_eq!(config.processing_delay_ms, 250);

        config.apply_env_overrides(Some("soon"));
        assert_eq!(config.processing_delay_ms, 250);

        config.apply_env_overrides(None);
        assert_eq!(config.processing_delay_ms, 250);
    }

    #[test]
    fn test_reveal_delays_reach_workflow_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"upload_settle_ms": 500, "result_reveal_ms": 800}"#).unwrap();

        let workflow = Config::load_from(&path).unwrap().workflow_config();
        assert_eq!(workflow.upload_settle_delay, std::time::Duration::from_millis(500));
        assert_eq!(workflow.result_reveal_delay, std::time::Duration::from_millis(800));

        let defaults = Config::default().workflow_config();
        assert!(defaults.upload_settle_delay.is_zero());
        assert!(defaults.result_reveal_delay.is_zero());
    }

    #[test]
    fn test_invalid_language() {
        let config = Config {
            language: "klingon".into(),
            ..Default::default()
        };
        assert!(matches!(config.scenario_policy(), Err(AacError::Config(_))));
    }
}
