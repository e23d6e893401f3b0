use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::debug;
use study_pipeline::config::DEFAULT_CONFIG_PATH;
use study_pipeline::utils::load_dotenv;
use study_pipeline::utils::logging::init_logging;
use study_pipeline::{NoopStages, Pipeline, PipelineConfig, get_data_directories};

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Set config file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Override the configured logging level
    #[arg(short, long)]
    logging_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let dotenv = load_dotenv();

    let (mut cfg, source) = PipelineConfig::load_with_source(&args.config)
        .with_context(|| format!("loading config {}", args.config.display()))?;
    if let Some(level) = args.logging_level {
        cfg.logging_level = level;
    }

    // Setup logging
    init_logging(&cfg.logging_level);
    dotenv.log();
    source.log();
    debug!("config : {cfg:?}");

    let data_dirs = get_data_directories().context("resolving data directories")?;

    Pipeline::new(cfg, data_dirs)
        .run(&mut NoopStages)
        .context("pipeline failed")?;
    Ok(())
}
