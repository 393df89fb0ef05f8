// Sat Oct 17 2026 - Alex

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bounded-dispatch")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Bounded task scheduler with per-id result retrieval", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// JSON scheduler config; flags given on the command line take precedence.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a batch of doubling tasks through the scheduler
    Run(RunArgs),
    /// Print the effective scheduler configuration
    Config(ConfigArgs),
}

#[derive(Parser, Debug)]
pub struct RunArgs {
    #[arg(short, long, default_value = "10")]
    pub tasks: u64,

    #[arg(short, long)]
    pub workers: Option<usize>,

    #[arg(long)]
    pub capacity: Option<usize>,

    /// Simulated work per task
    #[arg(long, default_value = "0")]
    pub delay_ms: u64,

    /// Make every k-th task fail
    #[arg(long)]
    pub fail_every: Option<u64>,

    #[arg(long)]
    pub timeout_ms: Option<u64>,

    #[arg(long)]
    pub no_progress: bool,
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[arg(short, long)]
    pub workers: Option<usize>,

    #[arg(long)]
    pub capacity: Option<usize>,
}

impl RunArgs {
    pub fn validate(&self) -> Result<(), String> {
        if self.tasks == 0 {
            return Err("--tasks must be greater than 0".to_string());
        }
        if self.fail_every == Some(0) {
            return Err("--fail-every must be greater than 0".to_string());
        }
        Ok(())
    }
}
