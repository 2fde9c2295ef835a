use std::time::Duration;

use crate::error::ConfigError;

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
const MODEL_VAR: &str = "GEMINI_MODEL";
const API_BASE_VAR: &str = "GEMINI_API_BASE";
const TIMEOUT_VAR: &str = "GEMINI_TIMEOUT_SECS";
const DIRECTOR_VAR: &str = "PROGRAM_DIRECTOR";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_DIRECTOR: &str = "Program Director";

#[derive(Debug, Clone)]
pub struct Config {
    /// Missing key is not fatal here: the gateway reports it on first use.
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    pub timeout: Duration,
    pub program_director: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let timeout = match non_empty(TIMEOUT_VAR) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        name: TIMEOUT_VAR,
                        value: raw,
                    })
                }
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            api_key: non_empty(API_KEY_VAR),
            model: non_empty(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base: non_empty(API_BASE_VAR)
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            timeout,
            program_director: non_empty(DIRECTOR_VAR)
                .unwrap_or_else(|| DEFAULT_DIRECTOR.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.api_key, None);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.program_director, "Program Director");
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let config = config_from(&[(API_KEY_VAR, "   ")]).unwrap();
        assert_eq!(config.api_key, None);
    }

    #[test]
    fn overrides_are_read() {
        let config = config_from(&[
            (API_KEY_VAR, "secret"),
            (MODEL_VAR, "other-model"),
            (API_BASE_VAR, "http://localhost:8080/"),
            (TIMEOUT_VAR, "5"),
            (DIRECTOR_VAR, "Jane Doe"),
        ])
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.model, "other-model");
        assert_eq!(config.api_base, "http://localhost:8080");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.program_director, "Jane Doe");
    }

    #[test]
    fn bad_timeout_is_rejected() {
        for raw in ["soon", "0", "-3"] {
            let err = config_from(&[(TIMEOUT_VAR, raw)]).unwrap_err();
            assert_eq!(
                err,
                ConfigError::Invalid {
                    name: TIMEOUT_VAR,
                    value: raw.to_string()
                }
            );
        }
    }
}
