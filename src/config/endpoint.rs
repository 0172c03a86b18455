use crate::utils::error::Result;
use crate::utils::validation::{validate_url, Validate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LOCAL_BASE: &str = "http://127.0.0.1:8000";
pub const DEFAULT_PRODUCTION_BASE: &str = "https://seu-dominio-api.vercel.app";

const LOOPBACK_HOSTS: [&str; 2] = ["localhost", "127.0.0.1"];

/// The two API bases the client can talk to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub local_base: String,
    pub production_base: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            local_base: DEFAULT_LOCAL_BASE.to_string(),
            production_base: DEFAULT_PRODUCTION_BASE.to_string(),
        }
    }
}

impl EndpointConfig {
    /// Picks the local base for loopback hosts and the production base for
    /// everything else.
    pub fn resolve(&self, host: &str) -> ResolvedApi {
        let base = if is_loopback(host) {
            &self.local_base
        } else {
            &self.production_base
        };
        tracing::debug!("Resolved API base for host '{}': {}", host, base);
        ResolvedApi::new(base)
    }
}

impl Validate for EndpointConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api.local_base", &self.local_base)?;
        validate_url("api.production_base", &self.production_base)?;
        Ok(())
    }
}

pub fn is_loopback(host: &str) -> bool {
    let host = host.trim();
    LOOPBACK_HOSTS
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(host))
}

/// Base URL chosen at startup. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedApi {
    base_url: String,
}

impl ResolvedApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `base + endpoint`, with exactly one slash between them.
    pub fn url_for(&self, endpoint: &str) -> String {
        if endpoint.is_empty() {
            return self.base_url.clone();
        }
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loopback_hosts_resolve_to_local_base() {
        let config = EndpointConfig::default();
        for host in ["localhost", "127.0.0.1", "LOCALHOST", " localhost "] {
            assert_eq!(config.resolve(host).base_url(), DEFAULT_LOCAL_BASE);
        }
    }

    #[test]
    fn test_other_hosts_resolve_to_production_base() {
        let config = EndpointConfig::default();
        for host in ["helptech.example.com", "192.168.0.10", "localhost.example.com", ""] {
            assert_eq!(config.resolve(host).base_url(), DEFAULT_PRODUCTION_BASE);
        }
    }

    #[test]
    fn test_url_for_joins_with_single_slash() {
        let api = ResolvedApi::new("http://127.0.0.1:8000/");
        assert_eq!(api.url_for("/recibo"), "http://127.0.0.1:8000/recibo");
        assert_eq!(api.url_for("recibo"), "http://127.0.0.1:8000/recibo");
        assert_eq!(api.url_for(""), "http://127.0.0.1:8000");
    }

    #[test]
    fn test_custom_bases_are_validated() {
        let config = EndpointConfig {
            local_base: "not a url".to_string(),
            production_base: DEFAULT_PRODUCTION_BASE.to_string(),
        };
        assert!(config.validate().is_err());
        assert!(EndpointConfig::default().validate().is_ok());
    }
}
