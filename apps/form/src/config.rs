use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_API_URL: &str =
    "https://designandbuildhqrecruitformbackend.onrender.com/api/applications/submit";
pub const DEFAULT_DRAFT_PATH: &str = "recruit-draft.json";

/// Client configuration loaded from environment variables (and `.env`).
/// Every setting has a default.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub draft_path: PathBuf,
    /// `None` waits for the intake server indefinitely.
    pub submit_timeout: Option<Duration>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let submit_timeout = lookup("RECRUIT_SUBMIT_TIMEOUT_SECS")
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .with_context(|| {
                        format!("RECRUIT_SUBMIT_TIMEOUT_SECS must be whole seconds, got '{raw}'")
                    })
            })
            .transpose()?;

        Ok(Config {
            api_url: lookup("RECRUIT_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            draft_path: lookup("RECRUIT_DRAFT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DRAFT_PATH)),
            submit_timeout,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.draft_path, PathBuf::from(DEFAULT_DRAFT_PATH));
        assert_eq!(config.submit_timeout, None);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_overrides_are_read() {
        let config = config_from(&[
            ("RECRUIT_API_URL", "http://localhost:5000/api/applications/submit"),
            ("RECRUIT_DRAFT_PATH", "/tmp/draft.json"),
            ("RECRUIT_SUBMIT_TIMEOUT_SECS", "45"),
        ])
        .unwrap();
        assert_eq!(config.api_url, "http://localhost:5000/api/applications/submit");
        assert_eq!(config.draft_path, PathBuf::from("/tmp/draft.json"));
        assert_eq!(config.submit_timeout, Some(Duration::from_secs(45)));
    }

    #[test]
    fn test_bad_timeout_is_rejected() {
        let err = config_from(&[("RECRUIT_SUBMIT_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("RECRUIT_SUBMIT_TIMEOUT_SECS"));
    }
}
