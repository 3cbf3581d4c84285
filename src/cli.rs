// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "whiteboard-marker")]
#[command(about = "Headless whiteboard marker session", long_about = None)]
pub struct Cli {
    /// Session description (JSON); built-in defaults when omitted
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Override the number of ticks to simulate
    #[arg(long)]
    pub ticks: Option<u32>,

    /// Override the fixed tick length in seconds
    #[arg(long)]
    pub dt: Option<f32>,

    /// Pace ticks against the wall clock instead of running flat out
    #[arg(long, default_value = "false")]
    pub realtime: bool,

    /// Only log warnings and errors unless RUST_LOG says otherwise
    #[arg(long, short, default_value = "false")]
    pub quiet: bool,
}
