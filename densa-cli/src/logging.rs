//! Structured diagnostics for the densa CLI.
//!
//! Diagnostics always go to stderr so the label table on stdout stays
//! machine-readable. `RUST_LOG` selects levels and `DENSA_LOG_FORMAT` picks
//! between human-readable lines and JSON objects.

use std::env::{self, VarError};

use thiserror::Error;
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, Layer, fmt::format::FmtSpan, layer::SubscriberExt};

const LOG_FORMAT_ENV: &str = "DENSA_LOG_FORMAT";
const LOG_FILTER_ENV: &str = "RUST_LOG";
const DEFAULT_FILTER: &str = "warn,densa_core=info,densa_cli=info";

/// Errors raised while installing the diagnostics subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// A logging variable held bytes that are not UTF-8.
    #[error("environment variable `{name}` is not valid UTF-8")]
    InvalidUnicode {
        /// Name of the offending variable.
        name: &'static str,
    },
    /// `DENSA_LOG_FORMAT` named a format densa does not emit.
    #[error("unsupported log format `{provided}`; expected `human` or `json`")]
    UnsupportedFormat {
        /// Normalised value supplied by the user.
        provided: String,
    },
    /// The `log` facade already had a logger when densa tried to bridge it.
    #[error("failed to bridge `log` records into tracing: {source}")]
    LogBridge {
        /// Error raised by `tracing-log`.
        #[source]
        source: tracing_log::log::SetLoggerError,
    },
}

/// Rendering used for stderr diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Compact human-readable lines.
    #[default]
    Human,
    /// One JSON object per event, including the span list.
    Json,
}

impl LogFormat {
    fn parse(raw: &str) -> Result<Self, LoggingError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(LoggingError::UnsupportedFormat {
                provided: other.to_owned(),
            }),
        }
    }
}

/// Whether [`init_logging`] installed the subscriber or found one in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggingInit {
    /// densa's subscriber now receives every event.
    Installed,
    /// A global subscriber was already set; it was left untouched.
    AlreadyInstalled,
}

/// Logging settings resolved from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    format: LogFormat,
    filter: String,
}

impl LoggingConfig {
    /// Reads `DENSA_LOG_FORMAT` and `RUST_LOG` from the process environment.
    ///
    /// # Errors
    /// Returns [`LoggingError`] when a variable is not UTF-8 or the format is
    /// unknown.
    pub fn from_env() -> Result<Self, LoggingError> {
        Self::from_lookup(env::var)
    }

    /// Resolves settings through `lookup`, which mirrors [`env::var`].
    ///
    /// An unset `RUST_LOG` falls back to `warn` globally with densa crates
    /// at `info`.
    ///
    /// # Errors
    /// Returns [`LoggingError`] when a variable is not UTF-8 or the format is
    /// unknown.
    pub fn from_lookup(
        lookup: impl Fn(&'static str) -> Result<String, VarError>,
    ) -> Result<Self, LoggingError> {
        let read = |name: &'static str| match lookup(name) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => Err(LoggingError::InvalidUnicode { name }),
        };
        let format = read(LOG_FORMAT_ENV)?
            .map(|raw| LogFormat::parse(&raw))
            .transpose()?
            .unwrap_or_default();
        let filter = read(LOG_FILTER_ENV)?.unwrap_or_else(|| DEFAULT_FILTER.to_owned());
        Ok(Self { format, filter })
    }

    /// Selected output format.
    #[must_use]
    pub const fn format(&self) -> LogFormat {
        self.format
    }

    /// Filter directives handed to [`EnvFilter`].
    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    // Unparseable directives fall back to the default filter.
    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }

    /// Sets the global subscriber and routes `log` records through it.
    ///
    /// # Errors
    /// Returns [`LoggingError::LogBridge`] when another `log` logger is
    /// already registered.
    pub fn install(&self) -> Result<LoggingInit, LoggingError> {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(std::io::stderr);
        let fmt_layer = match self.format {
            LogFormat::Json => fmt_layer
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .boxed(),
            LogFormat::Human => fmt_layer.boxed(),
        };
        let subscriber = tracing_subscriber::registry()
            .with(self.env_filter())
            .with(fmt_layer);

        if tracing::subscriber::set_global_default(subscriber).is_err() {
            return Ok(LoggingInit::AlreadyInstalled);
        }
        LogTracer::init().map_err(|source| LoggingError::LogBridge { source })?;
        Ok(LoggingInit::Installed)
    }
}

/// Installs densa's diagnostics subscriber unless one is already set.
///
/// # Errors
/// Returns [`LoggingError`] when the environment is invalid or the `log`
/// bridge cannot be registered.
pub fn init_logging() -> Result<LoggingInit, LoggingError> {
    LoggingConfig::from_env()?.install()
}
