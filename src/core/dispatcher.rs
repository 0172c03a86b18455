use crate::config::endpoint::ResolvedApi;
use crate::core::{FileSaver, Notifier, SavedFile};
use crate::utils::error::{DocError, Result};
use regex::Regex;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::{Client, Method};
use std::sync::LazyLock;

/// The one message users see for any failed download.
pub const DOWNLOAD_FAILED_MESSAGE: &str = "Download failed: the document could not be generated";

static FILENAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bfilename\s*=\s*(?:"([^"]*)"|([^;\s"]+))"#).expect("filename pattern is valid")
});

/// Where a request goes: a path under the resolved API base, or a full URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Endpoint(String),
    Url(String),
}

impl Target {
    pub fn parse(target: &str) -> Self {
        let lower = target.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Target::Url(target.to_string())
        } else {
            Target::Endpoint(target.to_string())
        }
    }

    pub fn resolve(&self, api: &ResolvedApi) -> String {
        match self {
            Target::Endpoint(path) => api.url_for(path),
            Target::Url(url) => url.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    /// Sent as `application/json` when present.
    pub body: Option<serde_json::Value>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post_json(body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
            ..Self::default()
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

#[derive(Debug)]
pub enum DispatchOutcome {
    Saved(SavedFile),
    Failed,
}

impl DispatchOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, DispatchOutcome::Saved(_))
    }

    pub fn saved_file(&self) -> Option<&SavedFile> {
        match self {
            DispatchOutcome::Saved(saved) => Some(saved),
            DispatchOutcome::Failed => None,
        }
    }
}

/// Runs one request/response/save cycle. Failures end at this layer: they are
/// logged, shown to the user once, and reported as [`DispatchOutcome::Failed`].
pub struct DownloadDispatcher<F: FileSaver, N: Notifier> {
    client: Client,
    api: ResolvedApi,
    saver: F,
    notifier: N,
}

impl<F: FileSaver, N: Notifier> DownloadDispatcher<F, N> {
    pub fn new(api: ResolvedApi, saver: F, notifier: N) -> Self {
        Self::with_client(Client::new(), api, saver, notifier)
    }

    pub fn with_client(client: Client, api: ResolvedApi, saver: F, notifier: N) -> Self {
        Self {
            client,
            api,
            saver,
            notifier,
        }
    }

    pub fn api(&self) -> &ResolvedApi {
        &self.api
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn saver(&self) -> &F {
        &self.saver
    }

    pub async fn dispatch(
        &self,
        target: &Target,
        options: RequestOptions,
        suggested_filename: &str,
    ) -> DispatchOutcome {
        let url = target.resolve(&self.api);

        match self.try_dispatch(&url, options, suggested_filename).await {
            Ok(saved) => {
                tracing::info!(
                    "📄 Saved {} ({} bytes) to {}",
                    saved.filename,
                    saved.size_bytes,
                    saved.path.display()
                );
                DispatchOutcome::Saved(saved)
            }
            Err(e) => {
                tracing::error!(
                    "❌ Download from {} failed: {} (Category: {:?})",
                    url,
                    e,
                    e.category()
                );
                self.notifier.alert(DOWNLOAD_FAILED_MESSAGE);
                DispatchOutcome::Failed
            }
        }
    }

    async fn try_dispatch(
        &self,
        url: &str,
        options: RequestOptions,
        suggested_filename: &str,
    ) -> Result<SavedFile> {
        let RequestOptions {
            method,
            headers,
            query,
            body,
        } = options;

        // Build the request
        tracing::debug!("📡 {} {}", method, url);
        let mut request = self.client.request(method, url);

        for (key, value) in &headers {
            request = request.header(key.as_str(), value.as_str());
        }

        if !query.is_empty() {
            request = request.query(&query);
        }

        if let Some(body) = &body {
            request = request.json(body);
        }

        // Send it
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("📡 API response status: {}", status);

        if !status.is_success() {
            return Err(DocError::RequestFailed {
                status: status.as_u16(),
            });
        }

        // Header name first, caller's suggestion otherwise
        let filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(filename_from_content_disposition)
            .unwrap_or_else(|| suggested_filename.to_string());

        // Whole body in memory, then hand it to the saver
        let bytes = response.bytes().await?;
        tracing::debug!("📥 Received {} bytes, saving as {}", bytes.len(), filename);

        self.saver.save(bytes.to_vec(), &filename).await
    }
}

/// Extracts `name` from `...; filename="name"`. Quotes are optional and the
/// match is case-insensitive; `filename*=` is not recognised.
pub fn filename_from_content_disposition(header: &str) -> Option<String> {
    let captures = FILENAME_PATTERN.captures(header)?;
    // Quoted names may contain `;`, unquoted ones end at it.
    let name = captures
        .get(1)
        .or_else(|| captures.get(2))?
        .as_str()
        .trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
