use std::io::{self, Write};
use std::thread;
use std::time::Duration;

pub const DEPLOY_STEPS: [&str; 7] = [
    "Initializing build environment...",
    "Checking dependencies...",
    "Running test suite...",
    "Performing security audit...",
    "Deploying to staging server...",
    "Verifying deployment status...",
    "Finalizing deployment...",
];

pub const DEFAULT_STEP_PAUSE: Duration = Duration::from_secs(1);

/// Print each deployment step, sleeping `pause` after every one
pub fn simulate_deployment<W: Write>(out: &mut W, pause: Duration) -> io::Result<()> {
    writeln!(out, "🚀 Running Deployment Simulation...")?;
    for step in DEPLOY_STEPS {
        writeln!(out, "⏳ {}", step)?;
        out.flush()?;
        thread::sleep(pause);
    }
    writeln!(out, "✅ Deployment Simulation Completed Successfully!")?;
    Ok(())
}
