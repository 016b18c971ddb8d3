use anyhow::Result;
use clap::Parser;
use std::io;
use std::time::Duration;

use devsys_backend::scripts::{simulate_deployment, DEFAULT_STEP_PAUSE};

/// Print a mock deployment, one step at a time
#[derive(Debug, Parser)]
#[command(name = "simulate-deploy")]
struct Args {
    /// Pause between steps, in milliseconds
    #[arg(long, default_value_t = DEFAULT_STEP_PAUSE.as_millis() as u64)]
    pause_ms: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    simulate_deployment(&mut io::stdout().lock(), Duration::from_millis(args.pause_ms))?;
    Ok(())
}
