use anyhow::Result;
use clap::Parser;
use std::io;

use devsys_backend::agent::{DebugRelay, StatelessLLMFactory};
use devsys_backend::config::{default_config_paths, Config, ErrorTrackingConfig};
use devsys_backend::scripts::{write_issue_report, KNOWN_ISSUES};
use devsys_backend::telemetry;

/// Report known project issues, or ask the configured LLM for a debugging check
#[derive(Debug, Parser)]
#[command(name = "ai-debug-report")]
struct Args {
    /// Ask the completion service instead of printing the built-in report
    #[arg(long)]
    live: bool,

    /// Config file used in live mode
    #[arg(long, env = "CONFIG_PATH")]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if !args.live {
        write_issue_report(&mut io::stdout().lock(), &KNOWN_ISSUES)?;
        return Ok(());
    }

    dotenvy::dotenv().ok();
    let _guard = telemetry::init(&ErrorTrackingConfig::from_env());

    let candidates = match args.config {
        Some(path) => vec![path],
        None => default_config_paths(),
    };
    let (config, _) = Config::discover(&candidates)?;
    let relay = DebugRelay::new(StatelessLLMFactory::create_llm(&config.llm_config)?);

    println!("🔍 Running AI Debugging...");
    println!("{}", relay.run_ai_debugging().await);
    Ok(())
}
