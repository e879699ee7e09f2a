use std::sync::Arc;
use std::time::Duration;

use spdlog::sink::{RotatingFileSink, RotationPolicy, StdStream, StdStreamSink};
use spdlog::{Level, LevelFilter, Logger, LoggerBuilder};

use crate::config::{Config, LogLevel};

impl LogLevel {
    fn level(self) -> Level {
        match self {
            LogLevel::Critical => Level::Critical,
            LogLevel::Error => Level::Error,
            LogLevel::Warn => Level::Warn,
            LogLevel::Info => Level::Info,
            LogLevel::Debug => Level::Debug,
            LogLevel::Trace => Level::Trace,
        }
    }
}

// stdout carries the summary line and --print output, logs stay on stderr
fn add_console_sink(builder: &mut LoggerBuilder) -> spdlog::Result<()> {
    let stderr = Arc::new(StdStreamSink::builder()
        .std_stream(StdStream::Stderr)
        .build()?);
    builder.sink(stderr);
    Ok(())
}

/// Without a `[log]` section and without `verbose` the default spdlog logger stays in place.
/// A location adds a daily rotated file, console output is kept when asked for
/// or when there is no file at all. `verbose` lowers the level to debug.
pub fn configure_logger(config: &Config, verbose: bool) -> spdlog::Result<()> {
    let (level, log_to_console, location) = match config.log {
        Some(ref log) => (log.level, log.log_to_console, log.location.as_ref()),
        None if verbose => (LogLevel::Debug, true, None),
        None => return Ok(()),
    };
    let level = if verbose { LogLevel::Debug } else { level };

    let mut builder = Logger::builder();

    if let Some(location) = location {
        let daily_sink = Arc::new(RotatingFileSink::builder()
            .base_path(location)
            .rotation_policy(RotationPolicy::Daily { hour: 0, minute: 0 })
            .max_files(60)
            .rotate_on_open(false)
            .build()?);
        builder.sink(daily_sink);
    }

    if log_to_console || location.is_none() {
        add_console_sink(&mut builder)?;
    }

    let logger = Arc::new(builder.build()?);
    logger.set_flush_level_filter(LevelFilter::MoreSevereEqual(Level::Info));
    logger.set_flush_period(Some(Duration::from_secs(2)));
    logger.set_level_filter(LevelFilter::MoreSevereEqual(level.level()));

    spdlog::set_default_logger(logger);

    Ok(())
}
