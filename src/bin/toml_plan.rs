use anyhow::Context;
use clap::Parser;
use proximity_slots::core::ingest::parse_entities;
use proximity_slots::core::report;
use proximity_slots::core::{ConfigProvider, StrategyKind};
use proximity_slots::utils::{logger, validation::Validate};
use proximity_slots::{LocalStorage, PlanEngine, ProximityPipeline, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-plan")]
#[command(about = "Proximity slot planner driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "plan-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override detection.threshold_km from config
    #[arg(long)]
    threshold_km: Option<f64>,

    /// Override coloring.strategy from config
    #[arg(long, value_enum)]
    strategy: Option<StrategyKind>,

    /// Validate config and input, print a summary, write nothing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    logger::init_logger(args.verbose || config.verbose(), config.json_logs());
    tracing::info!("🚀 Starting TOML-based slot planner");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    if let Some(threshold) = args.threshold_km {
        config.detection.threshold_km = Some(threshold);
        tracing::info!("🔧 Threshold overridden to: {} km", threshold);
    }
    if let Some(strategy) = args.strategy {
        config.coloring.strategy = Some(strategy);
        tracing::info!("🔧 Strategy overridden to: {}", strategy.as_str());
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No files will be written");
        perform_dry_run(&config)?;
        return Ok(());
    }

    let pipeline = ProximityPipeline::new(LocalStorage::current_dir(), config);
    let engine = PlanEngine::new(pipeline);

    match engine.run().await {
        Ok(run) => {
            print!("{}", report::format_text_report(&run.result));
            for path in &run.outputs {
                println!("📁 Output saved to: {}", path);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ Planning failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}

fn display_config_summary(config: &TomlConfig) {
    tracing::info!("📋 Plan: {}", config.plan.name);
    if let Some(description) = &config.plan.description {
        tracing::info!("   {}", description);
    }
    tracing::info!("📥 Input: {}", config.input_path());
    tracing::info!("📏 Threshold: {} km", config.threshold_km());
    tracing::info!("🎨 Strategy: {}", config.strategy().as_str());
    tracing::info!(
        "💾 Output: {} ({})",
        config.output_path(),
        config
            .output_formats()
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
}

fn perform_dry_run(config: &TomlConfig) -> anyhow::Result<()> {
    let data = std::fs::read(config.input_path())
        .with_context(|| format!("reading input file '{}'", config.input_path()))?;
    let entities = parse_entities(&data, &config.columns(), config.strict_coordinates())
        .with_context(|| format!("parsing entities from '{}'", config.input_path()))?;

    println!("🔍 Dry run summary:");
    println!("   Entities: {}", entities.len());
    println!(
        "   Pairs to check: {}",
        entities.len() * entities.len().saturating_sub(1) / 2
    );
    println!("   Threshold: {} km", config.threshold_km());
    println!("   Strategy: {}", config.strategy().as_str());
    println!("   Would write to: {}", config.output_path());
    Ok(())
}
