use crate::config::endpoint::ResolvedApi;
use crate::utils::error::{DocError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const HEALTH_ENDPOINT: &str = "/health";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub time: Option<String>,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

pub async fn check_health(client: &Client, api: &ResolvedApi) -> Result<HealthStatus> {
    let url = api.url_for(HEALTH_ENDPOINT);
    tracing::debug!("📡 GET {}", url);

    let response = client.get(&url).send().await?;
    if !response.status().is_success() {
        return Err(DocError::RequestFailed {
            status: response.status().as_u16(),
        });
    }

    Ok(response.json().await?)
}
