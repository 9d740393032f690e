//! Document sources: the abstraction over where rule JSON comes from.
//!
//! A source knows how to turn a location string into a response body.
//! It does not parse anything; malformed bodies are the loader's concern.
//!
//! Implementations: HTTP (`reqwest`), local files, an in-memory map, and a
//! router that picks HTTP or file by the location's scheme.

use async_trait::async_trait;
use splitpay_core::FetchError;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Fetches the raw body of a rule document.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Human-readable source name for logs.
    fn name(&self) -> &str;

    async fn fetch(&self, location: &str) -> Result<String, FetchError>;
}

/// Fetches documents over HTTP(S).
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    /// Create an HTTP source with a per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network {
                location: String::new(),
                reason: format!("failed to create HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self, location: &str) -> Result<String, FetchError> {
        debug!(location, "GET rule document");
        let response = self
            .client
            .get(location)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Network {
                location: location.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                location: location.to_string(),
                status_code: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| FetchError::Network {
            location: location.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Reads documents from the local filesystem.
#[derive(Debug, Default)]
pub struct FileSource;

#[async_trait]
impl DocumentSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch(&self, location: &str) -> Result<String, FetchError> {
        let path = location.strip_prefix("file://").unwrap_or(location);
        tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FetchError::NotFound(location.to_string())
            } else {
                FetchError::Io {
                    location: location.to_string(),
                    reason: e.to_string(),
                }
            }
        })
    }
}

/// Serves documents from memory. Unknown locations are `NotFound`.
#[derive(Debug, Default, Clone)]
pub struct StaticSource {
    documents: HashMap<String, String>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a body for a location.
    pub fn with(mut self, location: impl Into<String>, body: impl Into<String>) -> Self {
        self.documents.insert(location.into(), body.into());
        self
    }
}

#[async_trait]
impl DocumentSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch(&self, location: &str) -> Result<String, FetchError> {
        self.documents
            .get(location)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(location.to_string()))
    }
}

/// Sends `http://` and `https://` locations to HTTP, everything else to
/// the filesystem.
pub struct RoutingSource {
    http: HttpSource,
    file: FileSource,
}

impl RoutingSource {
    pub fn new(http: HttpSource) -> Self {
        Self {
            http,
            file: FileSource,
        }
    }
}

#[async_trait]
impl DocumentSource for RoutingSource {
    fn name(&self) -> &str {
        "routing"
    }

    async fn fetch(&self, location: &str) -> Result<String, FetchError> {
        if location.trim().is_empty() {
            return Err(FetchError::UnsupportedLocation(location.to_string()));
        }
        if is_http(location) {
            self.http.fetch(location).await
        } else {
            self.file.fetch(location).await
        }
    }
}

fn is_http(location: &str) -> bool {
    let lower = location.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
