//! Configuration for the genres resolver: cache memoization switches and logging.
//!
//! Configuration is read from TOML. Every field has a default, so an empty document (or no file
//! at all) yields [`ResolverConfig::default`]. Unknown keys are rejected.
//!
//! ```toml
//! [cache]
//! memoize_members = false
//!
//! [logging]
//! level = "genres=debug"
//! json = true
//! ```

use std::path::Path;
use std::sync::Once;

use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

pub type Result<T, E = ConfigError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse toml config: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // The default `Display` embeds a source snippet; keep only the message.
        ConfigError::Toml(err.message().to_owned())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolverConfig {
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ResolverConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a config file from TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

/// Which resolution results are memoized.
///
/// Memoization never changes results, only how often declarations are fetched and binding
/// contexts rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Keep every declaration fetched from the provider (including misses).
    #[serde(default = "default_true")]
    pub memoize_declarations: bool,

    /// Keep the binding context built for each leaf type.
    #[serde(default = "default_true")]
    pub memoize_contexts: bool,

    /// Keep the resolved type of each `(leaf, member)` pair selected by identity.
    #[serde(default = "default_true")]
    pub memoize_members: bool,
}

impl CacheConfig {
    /// A configuration that recomputes everything on every call.
    pub fn disabled() -> Self {
        Self {
            memoize_declarations: false,
            memoize_contexts: false,
            memoize_members: false,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            memoize_declarations: true,
            memoize_contexts: true,
            memoize_members: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// A simple level (`info`, `debug`, ...) or a full `EnvFilter` directive string.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,

    /// Emit logs in JSON format.
    #[serde(default)]
    pub json: bool,

    /// Write logs to stderr. When disabled, events are still filtered but discarded.
    #[serde(default = "default_true")]
    pub stderr: bool,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_owned()
    }

    /// Normalize a comma-separated directive list. Bare level names are case-insensitive and
    /// accept `warning`/`err`; `target=level` directives pass through untouched. An empty list
    /// means the default level.
    pub(crate) fn normalize_level_directives(input: &str) -> String {
        let directives: Vec<String> = input
            .split(',')
            .map(str::trim)
            .filter(|directive| !directive.is_empty())
            .map(|directive| match directive.to_ascii_lowercase().as_str() {
                "warn" | "warning" => "warn".to_owned(),
                "error" | "err" => "error".to_owned(),
                level @ ("trace" | "debug" | "info" | "off") => level.to_owned(),
                _ => directive.to_owned(),
            })
            .collect();

        if directives.is_empty() {
            Self::default_level()
        } else {
            directives.join(",")
        }
    }

    /// Configured directives followed by those of `rust_log`, if any.
    fn merged_directives(&self, rust_log: Option<&str>) -> String {
        let mut directives = Self::normalize_level_directives(&self.level);
        if let Some(extra) = rust_log.map(str::trim).filter(|extra| !extra.is_empty()) {
            directives.push(',');
            directives.push_str(extra);
        }
        directives
    }

    /// The effective filter: the configured level merged with `RUST_LOG` when set. Directives
    /// that fail to parse are skipped; with nothing usable left, events at `info` and above
    /// pass.
    pub fn env_filter(&self) -> EnvFilter {
        let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
        EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .parse_lossy(self.merged_directives(rust_log.as_deref()))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            json: false,
            stderr: true,
        }
    }
}

static TRACING_INIT: Once = Once::new();

/// Install the global `tracing` subscriber described by `config`.
///
/// Only the first call in a process has an effect. Returns `true` if this call installed the
/// subscriber; `false` if tracing was already initialized (by this function or by the host).
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let mut installed = false;
    TRACING_INIT.call_once(|| {
        let filter = config.env_filter();

        let make_writer = if !config.stderr {
            BoxMakeWriter::new(std::io::sink)
        } else if cfg!(debug_assertions) {
            // Keeps `cargo test` output capture working.
            BoxMakeWriter::new(tracing_subscriber::fmt::writer::TestWriter::with_stderr)
        } else {
            BoxMakeWriter::new(std::io::stderr)
        };

        let base_layer: Box<dyn tracing_subscriber::Layer<_> + Send + Sync> = if config.json {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(make_writer)
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_writer(make_writer)
                .boxed()
        };

        let subscriber = tracing_subscriber::registry().with(filter).with(base_layer);
        installed = tracing::subscriber::set_global_default(subscriber).is_ok();
        if installed {
            tracing::debug!(
                target: "genres.config",
                level = %config.level,
                json = config.json,
                "tracing initialized"
            );
        }
    });
    installed
}
