use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Config;
use thiserror::Error;

pub const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.6f)} {T:>15.15} {h({l:>5.5})} {t}:{L} - {m}{n}";

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Invalid logging config ({0})")]
    Config(#[from] log4rs::config::runtime::ConfigErrors),

    #[error("Logger is already set ({0})")]
    AlreadyInitialized(#[from] log::SetLoggerError),
}

/// Console logging to stderr, so prompts on stdout stay readable.
pub fn init_logging(level: LevelFilter) -> Result<(), LoggingError> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;

    log4rs::init_config(config)?;
    Ok(())
}
