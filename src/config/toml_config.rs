use crate::config::endpoint::{EndpointConfig, DEFAULT_LOCAL_BASE, DEFAULT_PRODUCTION_BASE};
use crate::core::ConfigProvider;
use crate::domain::model::PayloadStyle;
use crate::utils::error::{DocError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_OUTPUT_DIR: &str = "./downloads";
pub const DEFAULT_RELEASE_DELAY_MS: u64 = 2000;
pub const DEFAULT_HOST: &str = "localhost";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub api: ApiConfig,
    pub request: RequestConfig,
    pub download: DownloadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub local_base: String,
    pub production_base: String,
    /// Host the client considers itself to be running on.
    pub host: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            local_base: DEFAULT_LOCAL_BASE.to_string(),
            production_base: DEFAULT_PRODUCTION_BASE.to_string(),
            host: DEFAULT_HOST.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestConfig {
    pub style: PayloadStyle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    pub output_dir: String,
    pub release_delay_ms: u64,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            release_delay_ms: DEFAULT_RELEASE_DELAY_MS,
        }
    }
}

impl TomlConfig {
    /// Loads and parses a TOML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DocError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DocError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DocError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn endpoints(&self) -> EndpointConfig {
        EndpointConfig {
            local_base: self.api.local_base.clone(),
            production_base: self.api.production_base.clone(),
        }
    }

    fn host(&self) -> &str {
        &self.api.host
    }

    fn payload_style(&self) -> PayloadStyle {
        self.request.style
    }

    fn output_dir(&self) -> &str {
        &self.download.output_dir
    }

    fn release_delay(&self) -> Duration {
        Duration::from_millis(self.download.release_delay_ms)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.endpoints().validate()?;
        validate_non_empty_string("api.host", &self.api.host)?;
        validate_path("download.output_dir", &self.download.output_dir)?;
        validate_range(
            "download.release_delay_ms",
            self.download.release_delay_ms,
            1,
            60_000,
        )?;
        Ok(())
    }
}
