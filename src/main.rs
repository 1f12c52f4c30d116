use clap::Parser;
use small_fx::config::toml_config::{FxConfig, OutputMode, StepConfig};
use small_fx::utils::{logger, validation::Validate};
use small_fx::{CliConfig, FxEngine, LocalStorage};

fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("Starting small-fx CLI");
    tracing::info!("Loading configuration from: {}", args.config);

    let mut config = match FxConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    config.apply_overrides(args.input.clone(), args.output.clone());

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    if args.dry_run {
        display_config_summary(&config);
        return Ok(());
    }

    let engine = FxEngine::new(LocalStorage::new(".".to_string()), config)?;
    tracing::debug!("Config: {:?}", engine.config());

    match engine.run() {
        Ok(output_path) => {
            println!("✅ Pipeline completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!("Pipeline failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(2);
        }
    }

    Ok(())
}

fn display_config_summary(config: &FxConfig) {
    println!("📋 Pipeline: {} v{}", config.pipeline.name, config.pipeline.version);
    if let Some(description) = &config.pipeline.description {
        println!("  {}", description);
    }
    println!("  Input: {}", config.input.path);
    if let Some(field) = &config.input.records_field {
        println!("  Records field: {}", field);
    }

    println!();
    println!("🛠️ Steps:");
    if config.steps.is_empty() {
        println!("  (none, records pass through)");
    }
    for (i, step) in config.steps.iter().enumerate() {
        let detail = match step {
            StepConfig::Filter { when: Some(when) } => format!("where '{}'", when.field),
            StepConfig::Filter { when: None } => String::new(),
            StepConfig::Select { fields, required } => {
                format!("{}{}", fields.join(", "), if *required { " (required)" } else { "" })
            }
            StepConfig::Flatten { field, into, kind } => format!(
                "'{}' -> '{}'{}",
                field,
                into.as_deref().unwrap_or(field.as_str()),
                kind.map(|k| format!(" ({} only)", k)).unwrap_or_default()
            ),
            StepConfig::Kind { field, kind } => format!("'{}' is {}", field, kind),
        };
        println!("  {}. {} {}", i + 1, step.op(), detail);
    }

    println!();
    let mode = match config.output.mode {
        OutputMode::Records => "records".to_string(),
        OutputMode::First => "first".to_string(),
        OutputMode::Exists => "exists".to_string(),
        OutputMode::Index => format!(
            "index by '{}'",
            config.output.index_by.as_deref().unwrap_or_default()
        ),
    };
    println!("💾 Output: {} ({})", config.output.path, mode);
    println!();
    println!("✅ Dry run complete, nothing was read or written.");
}
