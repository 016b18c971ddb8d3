//! Standalone console scripts shipped alongside the server.

pub mod deploy_simulation;
pub mod issue_report;

pub use deploy_simulation::*;
pub use issue_report::*;
