use aac_intake::{batch, cli, config, export, intake, logging, pipeline, progress, session};
use aac_intake_common::{Theme, WorkflowState};
use anyhow::{bail, Context};
use clap::Parser;
use cli::{Cli, Commands, SynthesisArgs};
use config::Config;
use pipeline::{Engine, PipelineOptions};
use progress::ProgressView;
use std::path::{Path, PathBuf};

/// 起動時に一度だけテーマを決める
fn startup_theme(config: &Config) -> Theme {
    config
        .theme
        .resolve(std::env::var("COLORFGBG").ok().as_deref())
}

/// 受付から完了まで実行
async fn process_file(
    file: &Path,
    synthesis: &SynthesisArgs,
    instant: bool,
    config: &Config,
    theme: Theme,
) -> anyhow::Result<(Engine, ProgressView)> {
    let options = PipelineOptions::from_config(config, synthesis, theme)?;
    let candidate = intake::candidate_from_path(file, synthesis.mime.as_deref())
        .with_context(|| format!("資料を読み込めません: {}", file.display()))?;

    let mut view = ProgressView::new(theme);
    let mut engine = Engine::new(&options, instant);
    let state = engine
        .process(&candidate, &mut view)
        .await
        .with_context(|| format!("受付できません: {}", candidate.name))?;
    view.finish();

    if state != WorkflowState::Complete {
        bail!("処理が完了しませんでした（状態: {}）", state);
    }

    Ok((engine, view))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let config = Config::load().context("設定の読み込みに失敗しました")?;
    let theme = startup_theme(&config);

    match cli.command {
        Commands::Analyze { file, output, instant, synthesis } => {
            println!("🗂  aac-intake - 資料解析\n");

            let (engine, _view) = process_file(&file, &synthesis, instant, &config, theme).await?;
            let result = engine.result().context("解析結果がありません")?;

            let output = output.unwrap_or_else(|| {
                file.parent()
                    .map(|p| p.join("result.json"))
                    .unwrap_or_else(|| PathBuf::from("result.json"))
            });
            export::save_result_json(result, &output)?;
            println!("✔ 結果を保存: {}", output.display());

            println!("\n✅ 解析完了");
        }

        Commands::Export { input, format, output } => {
            println!("📄 aac-intake - レポート出力\n");

            let result = export::load_result_json(&input)
                .with_context(|| format!("解析結果を読み込めません: {}", input.display()))?;
            let output_dir = output
                .or_else(|| config.output_dir.clone())
                .unwrap_or_else(|| PathBuf::from("."));

            export::export_result(&result, format, &output_dir)?;

            println!("\n✅ 出力完了");
        }

        Commands::Run { file, output, format, instant, no_interactive, synthesis } => {
            println!("🚀 aac-intake - 一括処理\n");

            let output_dir = output
                .or_else(|| config.output_dir.clone())
                .unwrap_or_else(|| PathBuf::from("."));
            let (mut engine, mut view) =
                process_file(&file, &synthesis, instant, &config, theme).await?;

            if no_interactive {
                let result = engine.result().context("解析結果がありません")?;
                export::export_result(result, format, &output_dir)?;
            } else {
                session::run_interactive(
                    &mut engine,
                    &mut view,
                    format,
                    &output_dir,
                    synthesis.mime.as_deref(),
                )
                .await?;
            }

            println!("\n✅ 完了");
        }

        Commands::Batch { folder, output, format, recursive, synthesis } => {
            println!("📚 aac-intake - フォルダ処理\n");

            let options = PipelineOptions::from_config(&config, &synthesis, theme)?;
            let output_dir = output.unwrap_or_else(|| folder.clone());

            let summary = batch::run_batch(&folder, recursive, &options, format, &output_dir)?;
            for item in &summary.items {
                match &item.outcome {
                    Ok(paths) => println!("✔ {} → {}件", item.source.display(), paths.len()),
                    Err(reason) => println!("✖ {}: {}", item.source.display(), reason),
                }
            }

            println!(
                "\n✅ {}件処理（失敗 {}件）",
                summary.succeeded(),
                summary.failed().len()
            );
        }

        Commands::Config { show, set_processing_delay, set_theme, set_redaction, set_language } => {
            let mut config = config;
            let mut changed = false;

            if let Some(ms) = set_processing_delay {
                config.processing_delay_ms = ms;
                changed = true;
                println!("✔ 処理待ち時間を設定しました: {}ms", ms);
            }

            if let Some(pref) = set_theme {
                config.theme = pref;
                changed = true;
                println!("✔ テーマを設定しました: {}", pref);
            }

            if let Some(toggle) = set_redaction {
                config.redact = toggle.is_on();
                changed = true;
                println!("✔ 匿名化を{}にしました", if toggle.is_on() { "有効" } else { "無効" });
            }

            if let Some(policy) = set_language {
                config.language = policy.to_string();
                changed = true;
                println!("✔ 第二言語を設定しました: {}", policy);
            }

            if changed {
                config.save().context("設定の保存に失敗しました")?;
            }

            if show || !changed {
                println!("設定:");
                println!("  アップロード間隔: {}ms", config.upload_tick_ms);
                println!("  最大増分: {}", config.max_progress_increment);
                println!("  処理待ち時間: {}ms", config.processing_delay_ms);
                println!(
                    "  表示前の待ち: {}ms / {}ms",
                    config.upload_settle_ms, config.result_reveal_ms
                );
                println!("  匿名化: {}", if config.redact { "有効" } else { "無効" });
                println!("  テーマ: {}", config.theme);
                println!("  第二言語: {}", config.language);
                if let Some(dir) = &config.output_dir {
                    println!("  出力先: {}", dir.display());
                }
            }
        }
    }

    Ok(())
}
