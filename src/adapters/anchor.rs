use crate::adapters::object_url::{ObjectUrl, ObjectUrlStore};
use crate::core::{FileSaver, SavedFile, Storage};
use crate::utils::error::{DocError, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::path::PathBuf;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Grace period before a saved blob's object URL is revoked.
pub const DEFAULT_RELEASE_DELAY: Duration = Duration::from_secs(2);

const FALLBACK_FILENAME: &str = "download.pdf";

/// A transient "save as" link: the blob it points at and the name to save under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveLink {
    pub href: ObjectUrl,
    pub download: String,
}

/// Saves bytes the way a browser anchor-click download does: register the
/// blob under an object URL, activate a link to it, drop the link, and revoke
/// the URL once the grace period has passed.
pub struct AnchorSaver<S: Storage> {
    storage: S,
    urls: ObjectUrlStore,
    release_delay: Duration,
}

impl<S: Storage> AnchorSaver<S> {
    pub fn new(storage: S, urls: ObjectUrlStore, release_delay: Duration) -> Self {
        Self {
            storage,
            urls,
            release_delay,
        }
    }

    pub fn with_default_delay(storage: S, urls: ObjectUrlStore) -> Self {
        Self::new(storage, urls, DEFAULT_RELEASE_DELAY)
    }

    pub fn object_urls(&self) -> &ObjectUrlStore {
        &self.urls
    }

    pub fn release_delay(&self) -> Duration {
        self.release_delay
    }

    async fn activate(&self, link: &SaveLink) -> Result<PathBuf> {
        let bytes = self
            .urls
            .resolve(&link.href)
            .await
            .ok_or_else(|| DocError::SaveError {
                filename: link.download.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("{} was revoked before the save", link.href),
                ),
            })?;

        self.storage
            .write_file(&link.download, &bytes)
            .await
            .map_err(|e| match e {
                DocError::IoError(source) => DocError::SaveError {
                    filename: link.download.clone(),
                    source,
                },
                other => other,
            })
    }

    fn schedule_release(&self, url: ObjectUrl) -> JoinHandle<()> {
        let urls = self.urls.clone();
        let delay = self.release_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if urls.revoke(&url).await {
                tracing::debug!("Released {}", url);
            }
        })
    }
}

#[async_trait]
impl<S: Storage> FileSaver for AnchorSaver<S> {
    async fn save(&self, bytes: Vec<u8>, suggested_name: &str) -> Result<SavedFile> {
        let size_bytes = bytes.len();
        let href = self.urls.create(bytes).await;
        let link = SaveLink {
            href,
            download: safe_filename(suggested_name),
        };
        tracing::debug!("Activating save link {} -> {}", link.href, link.download);

        let result = self.activate(&link).await;

        // The link is gone either way; the blob outlives it by the grace period.
        let SaveLink { href, download } = link;
        self.schedule_release(href);

        let path = result?;
        Ok(SavedFile {
            path,
            filename: download,
            size_bytes,
            saved_at: Utc::now(),
        })
    }
}

/// Strips path separators and reserved characters from a server-provided name.
pub fn safe_filename(name: &str) -> String {
    let cleaned = sanitize_filename::sanitize(name.trim());
    if cleaned.trim().is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
        fail: bool,
    }

    impl MockStorage {
        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.lock().await.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<PathBuf> {
            if self.fail {
                return Err(DocError::IoError(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only",
                )));
            }
            self.files
                .lock()
                .await
                .insert(path.to_string(), data.to_vec());
            Ok(PathBuf::from("mem").join(path))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_object_url_released_only_after_delay() {
        let storage = MockStorage::default();
        let urls = ObjectUrlStore::default();
        let saver = AnchorSaver::with_default_delay(storage.clone(), urls.clone());

        let saved = saver.save(b"%PDF-1.4".to_vec(), "recibo.pdf").await.unwrap();
        assert_eq!(saved.filename, "recibo.pdf");
        assert_eq!(saved.size_bytes, 8);
        assert_eq!(storage.get_file("recibo.pdf").await.unwrap(), b"%PDF-1.4");

        assert_eq!(urls.live_count().await, 1);

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert_eq!(urls.live_count().await, 1);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(urls.live_count().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_write_still_releases_blob() {
        let storage = MockStorage {
            fail: true,
            ..Default::default()
        };
        let urls = ObjectUrlStore::default();
        let saver = AnchorSaver::new(storage, urls.clone(), Duration::from_millis(100));

        let err = saver.save(vec![1, 2, 3], "carta.pdf").await.unwrap_err();
        assert!(matches!(err, DocError::SaveError { ref filename, .. } if filename == "carta.pdf"));

        tokio::time::sleep(Duration::from_millis(101)).await;
        assert_eq!(urls.live_count().await, 0);
    }

    #[tokio::test]
    async fn test_unsafe_names_are_sanitized() {
        let storage = MockStorage::default();
        let saver = AnchorSaver::with_default_delay(storage.clone(), ObjectUrlStore::default());

        let saved = saver.save(vec![0], "../../etc/passwd").await.unwrap();
        assert!(!saved.filename.contains('/'));
        assert!(storage.get_file(&saved.filename).await.is_some());
    }

    #[test]
    fn test_safe_filename_fallback() {
        assert_eq!(safe_filename("nota_0042.pdf"), "nota_0042.pdf");
        assert_eq!(safe_filename("   "), "download.pdf");
        assert_eq!(safe_filename("a/b.pdf"), "ab.pdf");
    }
}
