use std::path::PathBuf;

use clap::Parser;

/// webpanel: a desktop panel that hosts an embedded web client.
#[derive(Parser, Debug)]
#[command(name = "webpanel", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log directive override (e.g. "webpanel=debug").
    #[arg(long)]
    pub log_level: Option<String>,

    /// Guest URL override.
    #[arg(long)]
    pub url: Option<String>,

    /// Report the network as offline regardless of connectivity.
    #[arg(long)]
    pub offline: bool,

    /// Enable the debug entry point (F12).
    #[arg(long)]
    pub debug: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
