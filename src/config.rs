use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "raft-agent";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Order-source endpoint used when nothing overrides it.
pub const DEFAULT_ORDERS_URL: &str = "http://localhost:5001/api/orders";

/// Bounded timeout for the order-source request.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 5;

/// Character budget for each extraction request.
pub const EXTRACTION_CHUNK_CHARS: usize = 1500;

/// Completion model used when `OPENROUTER_MODEL` is unset.
pub const DEFAULT_COMPLETION_MODEL: &str = "openai/gpt-4o-mini";

/// Completion base URL used when `OPENROUTER_API_BASE` is unset.
pub const DEFAULT_COMPLETION_BASE: &str = "https://openrouter.ai/api/v1";

pub const ENV_COMPLETION_MODEL: &str = "OPENROUTER_MODEL";
pub const ENV_COMPLETION_BASE: &str = "OPENROUTER_API_BASE";
pub const ENV_COMPLETION_KEY: &str = "OPENROUTER_API_KEY";

/// Log filter applied when `RUST_LOG` is not set.
pub fn default_log_filter(verbose: bool) -> &'static str {
    if verbose {
        "raft_agent=debug,raft_agent_lib=debug"
    } else {
        "raft_agent=info,raft_agent_lib=info"
    }
}

/// Completion-capability settings, read once at process start.
///
/// Nothing here is validated: a missing key only surfaces as an error
/// when the capability is first invoked.
#[derive(Debug, Clone)]
pub struct CompletionSettings {
    pub model: String,
    pub base_url: String,
    pub api_key: String,
}

impl CompletionSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            model: non_empty(ENV_COMPLETION_MODEL)
                .unwrap_or_else(|| DEFAULT_COMPLETION_MODEL.to_string()),
            base_url: non_empty(ENV_COMPLETION_BASE)
                .unwrap_or_else(|| DEFAULT_COMPLETION_BASE.to_string()),
            api_key: lookup(ENV_COMPLETION_KEY).unwrap_or_default(),
        }
    }
}

/// Where and how long to wait for the upstream order listing.
#[derive(Debug, Clone)]
pub struct OrderSourceSettings {
    pub url: String,
    pub timeout: Duration,
}

impl Default for OrderSourceSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_ORDERS_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }
}

/// Check that an endpoint is an absolute http(s) URL with a host.
pub fn validate_endpoint(url: &str) -> Result<(), String> {
    let after_scheme = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
        .ok_or_else(|| format!("{url} must start with http:// or https://"))?;

    let authority = after_scheme.split('/').next().unwrap_or("");
    let host = authority.rsplit_once(':').map_or(authority, |(h, _)| h);

    if host.is_empty() {
        return Err(format!("{url} has no host"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn completion_settings_read_all_keys() {
        let settings = CompletionSettings::from_lookup(lookup_from(&[
            (ENV_COMPLETION_MODEL, "meta/llama-3"),
            (ENV_COMPLETION_BASE, "http://localhost:8080/v1"),
            (ENV_COMPLETION_KEY, "sk-test"),
        ]));
        assert_eq!(settings.model, "meta/llama-3");
        assert_eq!(settings.base_url, "http://localhost:8080/v1");
        assert_eq!(settings.api_key, "sk-test");
    }

    #[test]
    fn missing_credentials_are_not_an_error() {
        let settings = CompletionSettings::from_lookup(lookup_from(&[]));
        assert_eq!(settings.model, DEFAULT_COMPLETION_MODEL);
        assert_eq!(settings.base_url, DEFAULT_COMPLETION_BASE);
        assert!(settings.api_key.is_empty());
    }

    #[test]
    fn blank_model_falls_back_to_default() {
        let settings = CompletionSettings::from_lookup(lookup_from(&[(ENV_COMPLETION_MODEL, "  ")]));
        assert_eq!(settings.model, DEFAULT_COMPLETION_MODEL);
    }

    #[test]
    fn order_source_defaults() {
        let settings = OrderSourceSettings::default();
        assert_eq!(settings.url, "http://localhost:5001/api/orders");
        assert_eq!(settings.timeout, Duration::from_secs(5));
    }

    #[test]
    fn endpoint_validation() {
        assert!(validate_endpoint("http://localhost:5001/api/orders").is_ok());
        assert!(validate_endpoint("https://orders.example.com").is_ok());
        assert!(validate_endpoint("http://127.0.0.1:1").is_ok());
        assert!(validate_endpoint("ftp://localhost/orders").is_err());
        assert!(validate_endpoint("localhost:5001").is_err());
        assert!(validate_endpoint("http://").is_err());
        assert!(validate_endpoint("http://:5001/orders").is_err());
    }

    #[test]
    fn log_filter_switches_on_verbose() {
        assert!(default_log_filter(false).contains("=info"));
        assert!(default_log_filter(true).contains("=debug"));
    }

    #[test]
    fn app_name_matches_binary() {
        assert_eq!(APP_NAME, "raft-agent");
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
