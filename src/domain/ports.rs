use crate::config::endpoint::EndpointConfig;
use crate::domain::model::{PayloadStyle, SavedFile};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

pub trait Storage: Send + Sync {
    /// Writes `data` under `path` and returns where it landed.
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<PathBuf>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn endpoints(&self) -> EndpointConfig;
    fn host(&self) -> &str;
    fn payload_style(&self) -> PayloadStyle;
    fn output_dir(&self) -> &str;
    fn release_delay(&self) -> Duration;
}

/// Capability to persist downloaded bytes under a suggested name.
#[async_trait]
pub trait FileSaver: Send + Sync {
    async fn save(&self, bytes: Vec<u8>, suggested_name: &str) -> Result<SavedFile>;
}

/// User-facing alerts.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}
