use aac_intake_common::{ScenarioPolicy, Theme};
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aac-intake")]
#[command(about = "AAC評価資料の受付・推奨レポート生成ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// 模擬解析の生成オプション
#[derive(Args, Debug, Clone, Default)]
pub struct SynthesisArgs {
    /// 第二言語 (random/none/spanish/french/mandarin/vietnamese)
    #[arg(short, long)]
    pub language: Option<ScenarioPolicy>,

    /// 乱数シード（再現用）
    #[arg(long)]
    pub seed: Option<u64>,

    /// クライアント名を伏せない（デモ用途のみ）
    #[arg(long)]
    pub no_redact: bool,

    /// MIMEタイプを指定（省略時は拡張子から推定）
    #[arg(long)]
    pub mime: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 資料を受け付けて解析し、結果JSONを出力
    Analyze {
        /// 評価資料（PDF/DOC/DOCX）
        #[arg(required = true)]
        file: PathBuf,

        /// 出力JSONファイル（デフォルト: 入力と同じフォルダ/result.json）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 待ち時間なしで処理
        #[arg(long)]
        instant: bool,

        #[command(flatten)]
        synthesis: SynthesisArgs,
    },

    /// 解析結果JSONからレポートを生成
    Export {
        /// 入力JSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 出力形式 (text/excel/both)
        #[arg(short, long, default_value = "text")]
        format: ExportFormat,

        /// 出力ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 受付から結果表示・レポート保存まで一括実行
    Run {
        /// 評価資料（PDF/DOC/DOCX）
        #[arg(required = true)]
        file: PathBuf,

        /// 出力ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (text/excel/both)
        #[arg(short, long, default_value = "text")]
        format: ExportFormat,

        /// 待ち時間なしで処理
        #[arg(long)]
        instant: bool,

        /// 対話セッションを開かずにレポートを保存して終了
        #[arg(long)]
        no_interactive: bool,

        #[command(flatten)]
        synthesis: SynthesisArgs,
    },

    /// フォルダ内の資料をまとめて処理
    Batch {
        /// 資料フォルダのパス
        #[arg(required = true)]
        folder: PathBuf,

        /// 出力ディレクトリ（デフォルト: 入力フォルダ）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (text/excel/both)
        #[arg(short, long, default_value = "text")]
        format: ExportFormat,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,

        #[command(flatten)]
        synthesis: SynthesisArgs,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 処理待ち時間（ミリ秒）を設定
        #[arg(long)]
        set_processing_delay: Option<u64>,

        /// テーマを設定 (auto/light/dark)
        #[arg(long)]
        set_theme: Option<ThemePreference>,

        /// 匿名化を設定 (on/off)
        #[arg(long)]
        set_redaction: Option<Toggle>,

        /// 第二言語の既定値を設定
        #[arg(long)]
        set_language: Option<ScenarioPolicy>,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Text,
    Excel,
    Both,
}

impl ExportFormat {
    pub fn includes_text(&self) -> bool {
        matches!(self, ExportFormat::Text | ExportFormat::Both)
    }

    pub fn includes_excel(&self) -> bool {
        matches!(self, ExportFormat::Excel | ExportFormat::Both)
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "both" => Ok(ExportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use text, excel, or both", s)),
        }
    }
}

/// テーマ設定
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    /// 端末の配色から推定（起動時に一度だけ）
    #[default]
    Auto,
    Light,
    Dark,
}

impl ThemePreference {
    /// 起動時のテーマを決定
    pub fn resolve(&self, colorfgbg: Option<&str>) -> Theme {
        match self {
            ThemePreference::Auto => Theme::from_colorfgbg(colorfgbg),
            ThemePreference::Light => Theme::Light,
            ThemePreference::Dark => Theme::Dark,
        }
    }
}

impl std::str::FromStr for ThemePreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ThemePreference::Auto),
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            _ => Err(format!("Unknown theme: {}. Use auto, light, or dark", s)),
        }
    }
}

impl std::fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemePreference::Auto => write!(f, "auto"),
            ThemePreference::Light => write!(f, "light"),
            ThemePreference::Dark => write!(f, "dark"),
        }
    }
}

/// on/off 指定
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn is_on(&self) -> bool {
        matches!(self, Toggle::On)
    }
}

impl std::str::FromStr for Toggle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "on" | "true" | "yes" => Ok(Toggle::On),
            "off" | "false" | "no" => Ok(Toggle::Off),
            _ => Err(format!("Unknown value: {}. Use on or off", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aac_intake_common::{LanguageScenario, SecondaryLanguage};

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("TXT".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert_eq!("xlsx".parse::<ExportFormat>().unwrap(), ExportFormat::Excel);
        assert!("both".parse::<ExportFormat>().unwrap().includes_text());
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_theme_preference_resolve() {
        assert_eq!(ThemePreference::Dark.resolve(Some("0;15")), Theme::Dark);
        assert_eq!(ThemePreference::Auto.resolve(Some("15;0")), Theme::Dark);
        assert_eq!(ThemePreference::Auto.resolve(None), Theme::Light);
    }

    #[test]
    fn test_parse_run_command() {
        let cli = Cli::parse_from([
            "aac-intake",
            "run",
            "intake.pdf",
            "--instant",
            "--language",
            "vietnamese",
            "--seed",
            "7",
            "-f",
            "both",
        ]);
        match cli.command {
            Commands::Run { file, instant, format, synthesis, .. } => {
                assert_eq!(file, PathBuf::from("intake.pdf"));
                assert!(instant);
                assert_eq!(format, ExportFormat::Both);
                assert_eq!(
                    synthesis.language,
                    Some(ScenarioPolicy::Fixed(LanguageScenario::Bilingual(SecondaryLanguage::Vietnamese)))
                );
                assert_eq!(synthesis.seed, Some(7));
                assert!(!synthesis.no_redact);
            }
            _ => panic!("runコマンドとして解析されていない"),
        }
    }
}
