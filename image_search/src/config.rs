use std::{env, fmt::Display, str::FromStr};

use tracing::info;

use crate::SearchError;

pub const DEFAULT_ENDPOINT: &str = "https://commons.wikimedia.org/w/api.php";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    pub port: u16,
    pub search_endpoint: String,
    pub result_limit: u32,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            port: 3030,
            search_endpoint: DEFAULT_ENDPOINT.to_string(),
            result_limit: 10,
        }
    }
}

impl ProxyConfig {
    pub fn load() -> Result<Self, SearchError> {
        let defaults = Self::default();
        Ok(Self {
            port: try_load("PROXY_PORT", defaults.port)?,
            search_endpoint: try_load("IMAGE_SEARCH_ENDPOINT", defaults.search_endpoint)?,
            result_limit: try_load("IMAGE_SEARCH_LIMIT", defaults.result_limit)?,
        })
    }
}

fn try_load<T>(key: &str, default: T) -> Result<T, SearchError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| SearchError::Config(format!("Invalid {key} value {raw:?}: {e}"))),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}
