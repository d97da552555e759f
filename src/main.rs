//! Pose metrics replay: runs a recorded landmark stream through the pipeline.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use pose_metrics::{
    app::{AppConfig, InputSource, MetricsApp, OutputFormat},
    config::Config,
    side::Laterality,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON-lines landmark stream to replay ("-" for stdin)
    #[arg(short, long, default_value = "-")]
    input: String,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Side of the body to report (left, right, both)
    #[arg(short, long)]
    side: Option<String>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Write the effective configuration to this path and exit
    #[arg(long)]
    write_config: Option<String>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Pose Metrics");

    // Load configuration if provided
    let config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        Config::from_file(config_path).with_context(|| format!("Failed to load config file {config_path}"))?
    } else {
        Config::default()
    };
    config.validate()?;

    if let Some(path) = &args.write_config {
        config.to_file(path)?;
        info!("Configuration written to {}", path);
        return Ok(());
    }

    let laterality = args.side.as_deref().map(str::parse::<Laterality>).transpose()?;
    let format: OutputFormat = args.format.parse()?;

    // Create and run application
    let mut app = MetricsApp::new(AppConfig {
        input: InputSource::from_arg(&args.input),
        format,
        config,
        laterality,
    })?;
    let summary = app.run()?;

    if summary.dropped > 0 {
        log::warn!("{} lines could not be decoded", summary.dropped);
    }

    Ok(())
}
