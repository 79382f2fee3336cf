use chrono::{DateTime, Utc};
use colored::*;
use log::{Level, LevelFilter, Metadata, Record};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::io::{self, Write};
use std::sync::RwLock;
use std::time::{Duration, Instant};

static LOGGER: Lazy<ConsoleLogger> = Lazy::new(ConsoleLogger::new);

pub fn init() -> Result<(), String> {
    init_with_config(LoggerConfig::default())
}

pub fn init_with_config(config: LoggerConfig) -> Result<(), String> {
    let max_level = config.min_level;
    LOGGER.update_config(config);

    log::set_logger(&*LOGGER).map_err(|e| format!("Failed to set logger: {:?}", e))?;
    log::set_max_level(max_level);
    Ok(())
}

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub min_level: LevelFilter,
    pub show_colors: bool,
    pub show_file_location: bool,
    pub output_json: bool,
    pub timestamp_format: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LevelFilter::Info,
            show_colors: true,
            show_file_location: false,
            output_json: false,
            timestamp_format: "%Y-%m-%d %H:%M:%S%.3f".to_string(),
        }
    }
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.min_level = level;
        self
    }

    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.show_colors = enabled;
        self
    }

    pub fn with_json_output(mut self, enabled: bool) -> Self {
        self.output_json = enabled;
        self
    }

    pub fn production() -> Self {
        Self {
            min_level: LevelFilter::Info,
            show_colors: false,
            output_json: true,
            ..Default::default()
        }
    }

    pub fn development() -> Self {
        Self {
            min_level: LevelFilter::Debug,
            show_colors: true,
            show_file_location: true,
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize)]
struct LogLine<'a> {
    timestamp: DateTime<Utc>,
    level: &'static str,
    target: &'a str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<u32>,
}

fn level_color(level: Level) -> Color {
    match level {
        Level::Trace => Color::Cyan,
        Level::Debug => Color::Blue,
        Level::Info => Color::Green,
        Level::Warn => Color::Yellow,
        Level::Error => Color::Red,
    }
}

pub struct ConsoleLogger {
    config: RwLock<LoggerConfig>,
}

impl ConsoleLogger {
    fn new() -> Self {
        Self {
            config: RwLock::new(LoggerConfig::default()),
        }
    }

    fn update_config(&self, config: LoggerConfig) {
        if let Ok(mut current) = self.config.write() {
            *current = config;
        }
    }

    fn format_console(&self, line: &LogLine<'_>, config: &LoggerConfig) -> String {
        let timestamp = line.timestamp.format(&config.timestamp_format).to_string();
        let level = format!("{:<5}", line.level);
        let location = match (config.show_file_location, line.file, line.line) {
            (true, Some(file), Some(n)) => format!(" ({}:{})", file, n),
            _ => String::new(),
        };

        if !config.show_colors {
            return format!(
                "{} [{}] {}: {}{}",
                timestamp, level, line.target, line.message, location
            );
        }

        let color = line
            .level
            .parse::<Level>()
            .map(level_color)
            .unwrap_or(Color::White);
        format!(
            "{} [{}] {}: {}{}",
            timestamp.bright_black(),
            level.color(color).bold(),
            line.target.bright_blue(),
            line.message,
            location.bright_black()
        )
    }
}

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.config
            .read()
            .map(|config| metadata.level() <= config.min_level)
            .unwrap_or(true)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let Ok(config) = self.config.read() else {
            return;
        };

        let line = LogLine {
            timestamp: Utc::now(),
            level: record.level().as_str(),
            target: record.target(),
            message: record.args().to_string(),
            file: record.file(),
            line: record.line(),
        };

        let output = if config.output_json {
            serde_json::to_string(&line).unwrap_or_default()
        } else {
            self.format_console(&line, &config)
        };
        eprintln!("{}", output);
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

/// Logs the elapsed time of a model call when dropped.
pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn new(name: &str) -> Self {
        log::debug!("Starting {}", name);
        Self {
            start: Instant::now(),
            name: name.to_string(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        log::info!("{} finished in {}ms", self.name, self.elapsed().as_millis());
    }
}

pub fn timer(name: &str) -> Timer {
    Timer::new(name)
}
