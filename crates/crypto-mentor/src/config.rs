//! Runtime configuration

use std::str::FromStr;
use std::time::Duration;

use crate::model::ChartRange;
use crate::retry::RetryPolicy;

/// Mentor configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentorConfig {
    /// Simulated delay before each feed call
    pub feed_latency: Duration,

    /// Simulated delay before each recommendation
    pub recommendation_latency: Duration,

    /// Fixed RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,

    /// Range used for chat chart requests
    pub chart_range: ChartRange,

    pub retry: RetryPolicy,
}

impl Default for MentorConfig {
    fn default() -> Self {
        Self {
            feed_latency: Duration::ZERO,
            recommendation_latency: Duration::ZERO,
            seed: None,
            chart_range: ChartRange::default(),
            retry: RetryPolicy::default(),
        }
    }
}

impl MentorConfig {
    /// Load from `MENTOR_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key lookup. Unset keys keep their default and
    /// unparseable values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let millis = |key: &str, default: Duration| {
            parse_var::<u64>(&lookup, key).map_or(default, Duration::from_millis)
        };

        Self {
            feed_latency: millis("MENTOR_FEED_LATENCY_MS", defaults.feed_latency),
            recommendation_latency: millis(
                "MENTOR_RECOMMENDATION_LATENCY_MS",
                defaults.recommendation_latency,
            ),
            seed: parse_var(&lookup, "MENTOR_SEED"),
            chart_range: parse_var(&lookup, "MENTOR_CHART_RANGE").unwrap_or(defaults.chart_range),
            retry: RetryPolicy {
                max_retries: parse_var(&lookup, "MENTOR_MAX_RETRIES")
                    .unwrap_or(defaults.retry.max_retries),
                base_delay: millis("MENTOR_RETRY_BASE_MS", defaults.retry.base_delay),
                ..defaults.retry
            },
        }
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring invalid configuration value");
            None
        }
    }
}
