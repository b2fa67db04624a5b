//! Standalone General Game Playing agent.
//!
//! Speaks the GGP match protocol over HTTP: `INFO`, `START`, `PLAY`, `STOP`,
//! `ABORT`. See `gdl-transport` for the wire format and `gdl-session` for
//! the per-match state machine.
mod cli;
mod logging;

use clap::Parser;
use gdl_transport::PlayerConfig;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = cli::Args::parse();
    logging::init(args.verbose);

    let config = PlayerConfig {
        name: args.name,
        graphviz_path: args.graphviz,
    };
    gdl_transport::run(&args.hostname, args.port, config).await
}
