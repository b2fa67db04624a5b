use clap::Parser;
use std::path::PathBuf;

/// Command-line surface for the agent's HTTP endpoint.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Interface to bind the match server on.
    #[arg(long, default_value = "127.0.0.1")]
    pub hostname: String,

    /// Port to bind the match server on.
    #[arg(long, default_value_t = 9147)]
    pub port: u16,

    /// Name this agent reports in INFO replies.
    #[arg(long, default_value = "ggp-player")]
    pub name: String,

    /// Dump the final search tree of each match to this path as DOT.
    #[arg(long)]
    pub graphviz: Option<PathBuf>,

    /// Repeat for more verbose logging (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
