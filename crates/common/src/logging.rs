//! Provides utilities to initialize logging.
use std::env;

use tracing::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// Environment variable name for the service label, which is appended to the
/// whoami string.
pub const SVC_LABEL_ENVVAR: &str = "STAKING_SVC_LABEL";

/// Environment variable that enables the source file in log lines when set to `1`.
pub const LOG_FILE_ENVVAR: &str = "LOG_FILE";

/// Environment variable that enables the line number in log lines when set to `1`.
pub const LOG_LINE_NUM_ENVVAR: &str = "LOG_LINE_NUM";

/// Configuration for the logger.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// The whoami string, which is used to identify the service in logs.
    whoami: String,

    /// Whether to write logs to stderr instead of stdout.
    to_stderr: bool,
}

impl LoggerConfig {
    /// Creates a new empty instance with whoami set.
    pub const fn new(whoami: String) -> Self {
        Self {
            whoami,
            to_stderr: false,
        }
    }

    /// Creates a new instance with the whoami string set to the provided
    /// string.
    pub fn with_base_name(s: &str) -> Self {
        Self::new(get_whoami_string(s))
    }

    /// Sends logs to stderr, keeping stdout free for command output.
    pub fn with_stderr(mut self) -> Self {
        self.to_stderr = true;
        self
    }

    /// Returns the whoami string.
    pub fn whoami(&self) -> &str {
        &self.whoami
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::with_base_name("(staking)")
    }
}

/// Initializes the logging subsystem with the provided config.
pub fn init(config: LoggerConfig) {
    let filt = tracing_subscriber::EnvFilter::from_default_env();

    let log_file = env_flag(LOG_FILE_ENVVAR);
    let log_line_num = env_flag(LOG_LINE_NUM_ENVVAR);

    let format = tracing_subscriber::fmt::format()
        .with_file(log_file)
        .with_line_number(log_line_num);

    if config.to_stderr {
        let stderr_sub = tracing_subscriber::fmt::layer()
            .compact()
            .event_format(format)
            .with_writer(std::io::stderr)
            .with_filter(filt);

        tracing_subscriber::registry().with(stderr_sub).init();
    } else {
        let stdout_sub = tracing_subscriber::fmt::layer()
            .compact()
            .event_format(format)
            .with_filter(filt);

        tracing_subscriber::registry().with(stdout_sub).init();
    }

    info!(whoami = %config.whoami, "logging started");
}

fn env_flag(name: &str) -> bool {
    env::var(name).is_ok_and(|v| v == "1")
}

/// Gets the service label from the standard envvar, which should be included
/// in the whoami string.
pub fn get_service_label_from_env() -> Option<String> {
    env::var(SVC_LABEL_ENVVAR).ok()
}

/// Computes a standard whoami string.
pub fn get_whoami_string(base: &str) -> String {
    match get_service_label_from_env() {
        Some(label) => format!("{base}%{label}"),
        None => base.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stderr_keeps_whoami() {
        let config = LoggerConfig::new("staking-cli".to_string()).with_stderr();

        assert_eq!(config.whoami(), "staking-cli");
        assert!(config.to_stderr);
    }
}
