use anyhow::Context;
use clap::Parser;
use filetreer::config::cli::DEFAULT_OUTPUT_FILE;
use filetreer::config::{CliCommand, ConfigCommand, GenerateArgs};
use filetreer::domain::ports::Storage;
use filetreer::utils::{logger, prompt, validation::Validate};
use filetreer::{CliConfig, FileTreerError, LocalStorage, TreeConfig, TreeEngine};
use std::path::{Path, PathBuf};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    let config_dir = cli.config_dir.clone().unwrap_or_else(TreeConfig::default_dir);
    let mut config = TreeConfig::new(&config_dir);
    config.load();
    tracing::debug!("Settings: {:?}", config);

    match cli.command {
        CliCommand::Generate(args) => {
            if let Err(e) = run_generate(&args, config).await {
                tracing::error!(
                    "❌ Generation failed: {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    e.severity()
                );
                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(e.exit_code());
            }
        }
        CliCommand::Config(command) => run_config(command, &config_dir, config)?,
    }

    Ok(())
}

async fn run_generate(args: &GenerateArgs, mut config: TreeConfig) -> Result<(), FileTreerError> {
    args.apply_to(&mut config)?;
    config.validate()?;

    if !args.yes && !confirm_unlimited(&config) {
        eprintln!("Cancelled");
        return Ok(());
    }

    let engine = TreeEngine::new_with_monitoring(config.clone(), args.monitor);
    let output = engine.run(args.path.clone()).await?;

    if !args.quiet {
        println!("{}", output.content);
    }

    let data = format!("{}\n", output.content);
    let storage = LocalStorage::default();
    let saved: Option<PathBuf> = if let Some(path) = &args.output {
        Some(storage.write_file(path, data.as_bytes()).await?)
    } else if args.save {
        let primary = args.path.join(DEFAULT_OUTPUT_FILE);
        Some(
            storage
                .write_with_fallback(&primary, Path::new(DEFAULT_OUTPUT_FILE), data.as_bytes())
                .await?,
        )
    } else {
        None
    };
    if let Some(path) = saved {
        tracing::info!("📁 File tree saved to: {}", path.display());
    }

    if args.save_config {
        if let Err(e) = config.save() {
            tracing::warn!("Failed to save settings: {}", e);
        }
    }

    Ok(())
}

/// 有不限制的設定時先確認；非互動環境直接繼續
fn confirm_unlimited(config: &TreeConfig) -> bool {
    let warnings = config.unlimited_settings();
    if warnings.is_empty() {
        return true;
    }

    let question = format!(
        "The following settings are unlimited, scanning may take a while:\n  {}\nContinue?",
        warnings.join("\n  ")
    );
    match prompt::confirm(&question) {
        Some(answer) => answer,
        None => {
            tracing::warn!("Unlimited settings ({}), proceeding", warnings.join(", "));
            true
        }
    }
}

fn run_config(command: ConfigCommand, config_dir: &Path, config: TreeConfig) -> anyhow::Result<()> {
    match command {
        ConfigCommand::Show => {
            eprintln!("# {}", config.config_file.display());
            println!("{}", config.to_json_string()?);
        }
        ConfigCommand::Reset => {
            let defaults = TreeConfig::new(config_dir);
            defaults.save().with_context(|| {
                format!("failed to write {}", defaults.config_file.display())
            })?;
            println!("✅ Settings reset: {}", defaults.config_file.display());
        }
        ConfigCommand::Ignore => {
            println!("{}", config.ignore_patterns_string());
        }
    }
    Ok(())
}
