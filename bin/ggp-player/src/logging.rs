use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, TermLogger, TerminalMode, WriteLogger,
};
use std::time::{SystemTime, UNIX_EPOCH};

/// Dual logging (terminal + timestamped file under `logs/`). `verbose`
/// raises the terminal level; the file always keeps full detail so a
/// post-mortem never depends on how the agent was launched.
pub fn init(verbose: u8) {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let term_level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let config = ConfigBuilder::new()
        .set_location_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    let time = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = WriteLogger::new(
        LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = TermLogger::new(term_level, config, TerminalMode::Mixed, ColorChoice::Auto);
    CombinedLogger::init(vec![term, file]).expect("initialize logger");
}
