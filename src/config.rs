//! Runtime configuration for the snapping pipeline and its HTTP adapters.
//!
//! Every struct has a usable `Default`; `from_env` overlays environment
//! variables on top of it.

use std::env;
use std::time::Duration;

use crate::coordinate::DEFAULT_DEDUPE_EPSILON;
use crate::error::ConfigError;
use crate::per_point::{Concurrency, PointFailurePolicy};
use crate::pipeline::FallbackPolicy;

pub const DEFAULT_STEPS_PER_SEGMENT: usize = 20;
const DEFAULT_API_TIMEOUT_MS: u64 = 12_000;
const DEFAULT_SNAP_TIMEOUT_MS: u64 = 10_000;

/// Backend REST API (route points, batch snap endpoint).
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub access_token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
            timeout: Duration::from_millis(DEFAULT_API_TIMEOUT_MS),
            access_token: None,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = env::var("TRACE_API_URL").map_err(|_| ConfigError::Missing("TRACE_API_URL"))?;
        Ok(Self {
            base_url: trim_base_url(&base_url),
            timeout: millis_or_default(env::var("TRACE_API_TIMEOUT_MS").ok(), DEFAULT_API_TIMEOUT_MS),
            access_token: env::var("TRACE_API_TOKEN").ok().filter(|token| !token.is_empty()),
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }
}

/// OSRM-compatible nearest-road service.
#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "car".to_string(),
            timeout_secs: 10,
        }
    }
}

impl OsrmConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("OSRM_BASE_URL")
                .map(|url| trim_base_url(&url))
                .unwrap_or(defaults.base_url),
            profile: env::var("OSRM_PROFILE").unwrap_or(defaults.profile),
            timeout_secs: defaults.timeout_secs,
        }
    }
}

/// Which snapping capability the pipeline delegates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    Batch,
    PerPoint,
}

impl StrategyKind {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "batch" => Ok(StrategyKind::Batch),
            "per-point" | "per_point" => Ok(StrategyKind::PerPoint),
            _ => Err(ConfigError::Invalid {
                key: "TRACE_SNAP_STRATEGY",
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SnapConfig {
    pub strategy: StrategyKind,
    /// Path of the batch endpoint, relative to `ApiConfig::base_url`.
    pub snap_path: String,
    pub timeout: Duration,
    pub steps_per_segment: usize,
    /// Densification hint sent to the batch endpoint. The pipeline already
    /// densifies locally, so the server should not subdivide again.
    pub server_steps_per_segment: usize,
    pub dedupe_epsilon: f64,
    pub fallback: FallbackPolicy,
    pub on_point_failure: PointFailurePolicy,
    pub concurrency: Concurrency,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Batch,
            snap_path: "/roads/snap".to_string(),
            timeout: Duration::from_millis(DEFAULT_SNAP_TIMEOUT_MS),
            steps_per_segment: DEFAULT_STEPS_PER_SEGMENT,
            server_steps_per_segment: 1,
            dedupe_epsilon: DEFAULT_DEDUPE_EPSILON,
            fallback: FallbackPolicy::Strict,
            on_point_failure: PointFailurePolicy::KeepOriginal,
            concurrency: Concurrency::Parallel,
        }
    }
}

impl SnapConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup("TRACE_SNAP_STRATEGY") {
            config.strategy = StrategyKind::parse(&value)?;
        }
        if let Some(value) = lookup("TRACE_SNAP_FALLBACK") {
            let normalized = value.trim().to_ascii_lowercase();
            config.fallback = match normalized.as_str() {
                "strict" => FallbackPolicy::Strict,
                "densified" => FallbackPolicy::Densified,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "TRACE_SNAP_FALLBACK",
                        value,
                    });
                }
            };
        }
        if let Some(value) = lookup("TRACE_SNAP_POINT_FAILURE") {
            let normalized = value.trim().to_ascii_lowercase();
            config.on_point_failure = match normalized.as_str() {
                "keep-original" => PointFailurePolicy::KeepOriginal,
                "drop" => PointFailurePolicy::Drop,
                "propagate" => PointFailurePolicy::Propagate,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "TRACE_SNAP_POINT_FAILURE",
                        value,
                    });
                }
            };
        }
        config.timeout = millis_or_default(lookup("TRACE_SNAP_TIMEOUT_MS"), DEFAULT_SNAP_TIMEOUT_MS);

        Ok(config)
    }
}

fn trim_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

fn millis_or_default(raw: Option<String>, default_ms: u64) -> Duration {
    let ms = raw
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .unwrap_or(default_ms);
    Duration::from_millis(ms)
}
