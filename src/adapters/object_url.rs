use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

const DEFAULT_ORIGIN: &str = "docgen-client";

/// Handle to bytes held in an [`ObjectUrlStore`], e.g. `blob:docgen-client/<uuid>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registry of temporary in-memory blobs. Clones share the same registry.
#[derive(Debug, Clone)]
pub struct ObjectUrlStore {
    origin: String,
    blobs: Arc<Mutex<HashMap<ObjectUrl, Arc<Vec<u8>>>>>,
}

impl Default for ObjectUrlStore {
    fn default() -> Self {
        Self::new(DEFAULT_ORIGIN)
    }
}

impl ObjectUrlStore {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            blobs: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn create(&self, bytes: Vec<u8>) -> ObjectUrl {
        let url = ObjectUrl(format!("blob:{}/{}", self.origin, Uuid::new_v4()));
        let mut blobs = self.blobs.lock().await;
        blobs.insert(url.clone(), Arc::new(bytes));
        url
    }

    /// Bytes behind `url`, or `None` once it has been revoked.
    pub async fn resolve(&self, url: &ObjectUrl) -> Option<Arc<Vec<u8>>> {
        let blobs = self.blobs.lock().await;
        blobs.get(url).cloned()
    }

    pub async fn is_live(&self, url: &ObjectUrl) -> bool {
        self.blobs.lock().await.contains_key(url)
    }

    /// Releases `url`. Returns false if it was already gone.
    pub async fn revoke(&self, url: &ObjectUrl) -> bool {
        let mut blobs = self.blobs.lock().await;
        blobs.remove(url).is_some()
    }

    pub async fn live_count(&self) -> usize {
        self.blobs.lock().await.len()
    }
}
