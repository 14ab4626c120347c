use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub api_base_url: String,
    pub time_zone: String,
    pub poll_interval_secs: u32,
    pub max_retries: u32,
    pub retry_base_delay_ms: u64,
    pub cache_stale_secs: u32,
    pub log_level: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            time_zone: "UTC".to_string(),
            poll_interval_secs: 30,
            max_retries: 3,
            retry_base_delay_ms: 500,
            cache_stale_secs: 30,
            log_level: "info".to_string(),
        }
    }
}

impl RuntimeConfig {
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }

    pub fn poll_interval_ms(&self) -> u32 {
        self.poll_interval_secs.max(5).saturating_mul(1000)
    }

    fn normalized(mut self) -> Self {
        let trimmed = self.api_base_url.trim().trim_end_matches('/');
        self.api_base_url = if trimmed.is_empty() {
            DEFAULT_API_BASE_URL.to_string()
        } else {
            trimmed.to_string()
        };
        if self.time_zone.parse::<chrono_tz::Tz>().is_err() {
            log::warn!("unknown time zone {:?}, using UTC", self.time_zone);
            self.time_zone = "UTC".to_string();
        }
        self
    }
}

static RUNTIME_CONFIG: OnceLock<RuntimeConfig> = OnceLock::new();

fn cache(config: RuntimeConfig) -> RuntimeConfig {
    let config = config.normalized();
    let _ = RUNTIME_CONFIG.set(config.clone());
    RUNTIME_CONFIG.get().cloned().unwrap_or(config)
}

/// Configuration resolved so far; defaults until [`init`] has completed.
pub fn current() -> RuntimeConfig {
    RUNTIME_CONFIG.get().cloned().unwrap_or_default()
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::RuntimeConfig;

    // window.__EXPENSE_ENV = { API_BASE_URL: "...", TIME_ZONE: "..." } from env.js
    fn read_global(name: &str) -> Option<serde_json::Value> {
        let window = web_sys::window()?;
        let any = js_sys::Reflect::get(&window, &name.into()).ok()?;
        if any.is_undefined() || any.is_null() {
            return None;
        }
        let json = js_sys::JSON::stringify(&any).ok()?.as_string()?;
        serde_json::from_str(&json).ok()
    }

    fn from_value(value: serde_json::Value) -> Option<RuntimeConfig> {
        let object = value.as_object()?;
        let lowered: serde_json::Map<String, serde_json::Value> = object
            .iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), v.clone()))
            .collect();
        serde_json::from_value(serde_json::Value::Object(lowered)).ok()
    }

    pub fn snapshot_from_globals() -> Option<RuntimeConfig> {
        read_global("__EXPENSE_ENV")
            .and_then(from_value)
            .or_else(|| read_global("__EXPENSE_CONFIG").and_then(from_value))
    }

    pub async fn fetch_runtime_config() -> Option<RuntimeConfig> {
        let resp = reqwest::get("./config.json").await.ok()?;
        if !resp.status().is_success() {
            return None;
        }
        resp.json::<RuntimeConfig>().await.ok()
    }
}

pub async fn init() -> RuntimeConfig {
    if let Some(cached) = RUNTIME_CONFIG.get() {
        return cached.clone();
    }
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(existing) = browser::snapshot_from_globals() {
            return cache(existing);
        }
        if let Some(fetched) = browser::fetch_runtime_config().await {
            return cache(fetched);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Ok(url) = std::env::var("API_BASE_URL") {
            return cache(RuntimeConfig {
                api_base_url: url,
                ..RuntimeConfig::default()
            });
        }
    }
    cache(RuntimeConfig::default())
}

pub async fn await_api_base_url() -> String {
    init().await.api_base_url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = RuntimeConfig::default();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.time_zone, "UTC");
        assert_eq!(config.poll_interval_secs, 30);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_base_delay_ms, 500);
        assert_eq!(config.log_level(), log::Level::Info);
    }

    #[test]
    fn partial_json_falls_back_per_field() {
        let config: RuntimeConfig =
            serde_json::from_str(r#"{"api_base_url":"https://api.example.com/","time_zone":"Europe/Paris"}"#)
                .unwrap();
        let config = config.normalized();
        assert_eq!(config.api_base_url, "https://api.example.com");
        assert_eq!(config.time_zone, "Europe/Paris");
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn invalid_time_zone_and_blank_url_are_replaced() {
        let config = RuntimeConfig {
            api_base_url: "  ".into(),
            time_zone: "Mars/Olympus".into(),
            ..RuntimeConfig::default()
        }
        .normalized();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.time_zone, "UTC");
    }

    #[test]
    fn poll_interval_has_floor() {
        let config = RuntimeConfig {
            poll_interval_secs: 1,
            ..RuntimeConfig::default()
        };
        assert_eq!(config.poll_interval_ms(), 5_000);
    }
}
