//! Configuration loading from pibench.toml
//!
//! PiBench configuration can be specified in a `pibench.toml` file in the project root.
//! The configuration is automatically discovered by walking up from the current directory.
//! Command-line flags override every value found here.

use pibench_core::{Precision, RemainderPolicy};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file looked up by [`PiBenchConfig::discover`]
pub const CONFIG_FILE_NAME: &str = "pibench.toml";

/// PiBench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PiBenchConfig {
    /// Harness configuration
    #[serde(default)]
    pub run: RunConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Harness defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Series length used when none is given on the command line
    #[serde(default)]
    pub steps: Option<u64>,
    /// Thread counts to sweep, in order
    #[serde(default = "default_threads")]
    pub threads: Vec<usize>,
    /// Trials per thread count
    #[serde(default = "default_repeats")]
    pub repeats: usize,
    /// Use Kahan summation
    #[serde(default)]
    pub compensated: bool,
    /// Record per-chunk spans
    #[serde(default)]
    pub measure_chunks: bool,
    /// Floating-point width: "f32" or "f64"
    #[serde(default)]
    pub precision: Precision,
    /// Remainder handling: "truncate" or "absorb-into-last"
    #[serde(default)]
    pub remainder: RemainderPolicy,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            steps: None,
            threads: default_threads(),
            repeats: default_repeats(),
            compensated: false,
            measure_chunks: false,
            precision: Precision::default(),
            remainder: RemainderPolicy::default(),
        }
    }
}

fn default_threads() -> Vec<usize> {
    vec![1]
}
fn default_repeats() -> usize {
    1
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "human", "json", "csv"
    #[serde(default = "default_format")]
    pub format: String,
    /// Show a progress bar on stderr
    #[serde(default = "default_progress")]
    pub progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            progress: default_progress(),
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}
fn default_progress() -> bool {
    true
}

impl PiBenchConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let dir = std::env::current_dir().ok()?;
        Self::discover_from(&dir)
    }

    /// Walk up from `start` looking for `pibench.toml`
    pub fn discover_from(start: &Path) -> Option<Self> {
        let mut dir = start.to_path_buf();
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => Some(config),
                    Err(e) => {
                        tracing::warn!(path = %config_path.display(), "ignoring config: {}", e);
                        None
                    }
                };
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# PiBench Configuration

[run]
# Series length (uncomment to run without a positional STEPS argument)
# steps = 1000000
# Thread counts to sweep, in order
threads = [1]
# Trials per thread count
repeats = 1
# Kahan compensated summation
compensated = false
# Record per-chunk start/stop spans
measure_chunks = false
# Floating-point width: "f32" or "f64"
precision = "f64"
# Trailing terms when steps is not a multiple of threads:
# "truncate" drops them (reported), "absorb-into-last" evaluates them in the last partition
remainder = "truncate"

[output]
# Default output format: human, json, csv
format = "human"
# Show a progress bar on stderr
progress = true
"#
        .to_string()
    }
}
