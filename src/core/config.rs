use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString, IntoStaticStr};

use super::error::{ChunkerError, Result};

pub const ENV_PREFIX: &str = "SEMCHUNK";

pub const DEFAULT_BUFFER_SIZE: usize = 1;

pub const DEFAULT_MAX_CONCURRENCY: usize = 4;


#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BreakpointMethod {
    #[default]
    Percentile,
    StandardDeviation,
    Interquartile,
}

impl BreakpointMethod {
    pub fn default_amount(self) -> f64 {
        match self {
            Self::Percentile => 95.0,
            Self::StandardDeviation => 3.0,
            Self::Interquartile => 1.5,
        }
    }
}

fn default_buffer_size() -> i64 { DEFAULT_BUFFER_SIZE as i64 }
fn default_method() -> String { BreakpointMethod::default().as_ref().to_string() }
fn default_max_concurrency() -> usize { DEFAULT_MAX_CONCURRENCY }

/// Raw, unvalidated chunker settings as they arrive from code, env or a file.
///
/// Nothing here is trusted until [`ChunkerSettings::build`] turns it into a
/// [`ChunkerConfig`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkerSettings {
    #[serde(default = "default_buffer_size")]
    pub buffer_size: i64,

    #[serde(default = "default_method")]
    pub breakpoint_method: String,

    #[serde(default)]
    pub breakpoint_amount: Option<f64>,

    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    #[serde(default)]
    pub embedding_timeout_secs: Option<u64>,
}

impl Default for ChunkerSettings {
    fn default() -> Self {
        Self {
            buffer_size: default_buffer_size(),
            breakpoint_method: default_method(),
            breakpoint_amount: None,
            max_concurrency: default_max_concurrency(),
            embedding_timeout_secs: None,
        }
    }
}

impl ChunkerSettings {
    pub fn with_buffer_size(mut self, buffer_size: i64) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.breakpoint_method = method.into();
        self
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.breakpoint_amount = Some(amount);
        self
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    pub fn with_embedding_timeout_secs(mut self, secs: u64) -> Self {
        self.embedding_timeout_secs = Some(secs);
        self
    }

    /// Reads `SEMCHUNK_*` variables, e.g. `SEMCHUNK_BREAKPOINT_METHOD=interquartile`.
    pub fn from_env() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize::<Self>()?;
        Ok(settings)
    }

    /// Loads a settings file (any format the `config` crate detects by
    /// extension), with `SEMCHUNK_*` variables layered on top.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize::<Self>()?;
        Ok(settings)
    }

    pub fn build(self) -> Result<ChunkerConfig> {
        if self.buffer_size < 0 {
            return Err(ChunkerError::invalid_config(format!(
                "buffer_size must be >= 0, got {}",
                self.buffer_size
            )));
        }

        let method = BreakpointMethod::from_str(self.breakpoint_method.trim()).map_err(|_| {
            ChunkerError::invalid_config(format!(
                "unknown breakpoint_method '{}'",
                self.breakpoint_method
            ))
        })?;

        let amount = self
            .breakpoint_amount
            .unwrap_or_else(|| method.default_amount());

        if !amount.is_finite() {
            return Err(ChunkerError::invalid_config(format!(
                "breakpoint_amount must be finite, got {}",
                amount
            )));
        }
        if method == BreakpointMethod::Percentile && !(0.0..=100.0).contains(&amount) {
            return Err(ChunkerError::invalid_config(format!(
                "percentile breakpoint_amount must be within [0, 100], got {}",
                amount
            )));
        }

        if self.max_concurrency == 0 {
            return Err(ChunkerError::invalid_config("max_concurrency must be >= 1"));
        }

        Ok(ChunkerConfig {
            buffer_size: self.buffer_size as usize,
            method,
            amount,
            max_concurrency: self.max_concurrency,
            embedding_timeout: self.embedding_timeout_secs.map(Duration::from_secs),
        })
    }
}


#[derive(Debug, Clone, PartialEq)]
pub struct ChunkerConfig {
    buffer_size: usize,
    method: BreakpointMethod,
    amount: f64,
    max_concurrency: usize,
    embedding_timeout: Option<Duration>,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self::new(BreakpointMethod::default())
    }
}

impl ChunkerConfig {
    pub fn builder() -> ChunkerSettings {
        ChunkerSettings::default()
    }

    pub fn new(method: BreakpointMethod) -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            method,
            amount: method.default_amount(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            embedding_timeout: None,
        }
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    pub fn method(&self) -> BreakpointMethod {
        self.method
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    pub fn embedding_timeout(&self) -> Option<Duration> {
        self.embedding_timeout
    }

    /// Timeouts are not expressible through `ChunkerSettings` below one
    /// second, so callers that need finer control set them here.
    pub fn with_embedding_timeout(mut self, timeout: Duration) -> Self {
        self.embedding_timeout = Some(timeout);
        self
    }
}
