use std::time::Duration;

use tokio_retry::strategy::{jitter, ExponentialBackoff};

use super::types::ApiError;

/// Exponential backoff applied to idempotent failures (transport errors and
/// 5xx responses). Client errors are returned immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 500,
            max_delay_ms: 30_000,
            jitter: true,
        }
    }
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    pub fn from_config(config: &crate::config::RuntimeConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            base_delay_ms: config.retry_base_delay_ms,
            ..Self::default()
        }
    }

    /// Delays before each retry, `max_retries` of them. The n-th delay is
    /// `base * 2^n`, capped at `max_delay_ms`.
    pub fn backoff(&self) -> impl Iterator<Item = Duration> {
        let spread: fn(Duration) -> Duration = if self.jitter {
            jitter
        } else {
            std::convert::identity
        };
        ExponentialBackoff::from_millis(2)
            .factor(self.base_delay_ms / 2)
            .max_delay(Duration::from_millis(self.max_delay_ms))
            .take(self.max_retries as usize)
            .map(spread)
    }
}

pub fn is_retryable(error: &ApiError) -> bool {
    if error.is_network() {
        return true;
    }
    matches!(error.http_status(), Some(status) if status >= 500)
}

pub async fn sleep(delay: Duration) {
    if delay.is_zero() {
        return;
    }
    #[cfg(target_arch = "wasm32")]
    {
        let ms = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        gloo_timers::future::TimeoutFuture::new(ms).await;
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tokio::time::sleep(delay).await;
    }
}
