//! Avatar fetching
//!
//! One render fans out one task per member onto a `JoinSet`, bounded by a
//! semaphore, and waits for all of them before drawing starts. Each task is
//! its own failure domain: an error, a timeout or even a panic only loses
//! that member's avatar.

use crate::config::FetchConfig;
use crate::error::RenderError;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tierlist_domain::MemberId;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Why a single avatar could not be fetched
#[derive(Debug, Error)]
pub enum FetchError {
    /// Scheme other than http, https or file
    #[error("Unsupported avatar URI: {0}")]
    UnsupportedUri(String),

    /// Server answered with a non-success status
    #[error("HTTP {0}")]
    Status(u16),

    /// Body larger than the configured limit
    #[error("Avatar larger than {limit} bytes")]
    TooLarge {
        /// Configured limit
        limit: usize,
    },

    /// No answer within the deadline
    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    /// Connection, DNS or protocol failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Local file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where avatar bytes come from
///
/// Implementations must be cheap to share; one instance serves every fetch
/// of a render (and every render of a renderer).
pub trait AvatarSource: Send + Sync + 'static {
    /// Fetch the raw bytes behind `uri`
    fn fetch(&self, uri: &str) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;
}

/// Fetches `http://`, `https://` and `file://` avatars
///
/// All HTTP requests go through one pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpAvatarSource {
    client: reqwest::Client,
    max_bytes: usize,
    timeout: Duration,
}

impl HttpAvatarSource {
    /// Build the shared HTTP client
    pub fn new(config: &FetchConfig) -> Result<Self, RenderError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| RenderError::Client(e.to_string()))?;

        Ok(Self {
            client,
            max_bytes: config.max_avatar_bytes,
            timeout: config.timeout(),
        })
    }

    /// Classify a client error; the client deadline reports as a timeout
    fn client_error(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else if let Some(status) = e.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Transport(e.to_string())
        }
    }

    async fn fetch_http(&self, uri: &str) -> Result<Vec<u8>, FetchError> {
        let mut response = self
            .client
            .get(uri)
            .send()
            .await
            .map_err(|e| self.client_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        if let Some(len) = response.content_length() {
            if len > self.max_bytes as u64 {
                return Err(FetchError::TooLarge { limit: self.max_bytes });
            }
        }

        // Content-Length may be absent or wrong; enforce the limit while reading.
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| self.client_error(e))? {
            if body.len() + chunk.len() > self.max_bytes {
                return Err(FetchError::TooLarge { limit: self.max_bytes });
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }

    async fn fetch_file(&self, path: &str) -> Result<Vec<u8>, FetchError> {
        let metadata = tokio::fs::metadata(path).await?;
        if metadata.len() > self.max_bytes as u64 {
            return Err(FetchError::TooLarge { limit: self.max_bytes });
        }
        Ok(tokio::fs::read(path).await?)
    }
}

impl AvatarSource for HttpAvatarSource {
    async fn fetch(&self, uri: &str) -> Result<Vec<u8>, FetchError> {
        if let Some(path) = uri.strip_prefix("file://") {
            return self.fetch_file(path).await;
        }
        if uri.starts_with("http://") || uri.starts_with("https://") {
            return self.fetch_http(uri).await;
        }
        Err(FetchError::UnsupportedUri(uri.to_string()))
    }
}

/// Counts for one fan-out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchReport {
    /// Avatars asked for
    pub requested: usize,
    /// Avatars that arrived
    pub fetched: usize,
    /// Avatars lost to errors, timeouts or panics
    pub failed: usize,
}

/// Result of a fan-out: bytes for every member whose fetch succeeded
#[derive(Debug, Default)]
pub struct FetchedAvatars {
    /// Raw (undecoded) avatar bytes; absent members failed
    pub avatars: HashMap<MemberId, Vec<u8>>,
    /// Outcome counts
    pub report: FetchReport,
}

/// Bounded concurrent fetcher over an [`AvatarSource`]
pub struct AvatarFetcher<S> {
    source: Arc<S>,
    max_concurrent: usize,
    timeout: Duration,
}

impl<S: AvatarSource> AvatarFetcher<S> {
    /// Create a fetcher over `source`
    pub fn new(source: S, config: &FetchConfig) -> Self {
        Self {
            source: Arc::new(source),
            max_concurrent: config.max_concurrent_fetches.max(1),
            timeout: config.timeout(),
        }
    }

    /// Fetch every (member, URI) pair and wait for all of them
    ///
    /// Never fails as a whole; failures are logged and counted.
    pub async fn fetch_all(&self, requests: Vec<(MemberId, String)>) -> FetchedAvatars {
        let mut fetched = FetchedAvatars {
            avatars: HashMap::with_capacity(requests.len()),
            report: FetchReport {
                requested: requests.len(),
                ..FetchReport::default()
            },
        };
        if requests.is_empty() {
            return fetched;
        }

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut join_set = JoinSet::new();

        for (id, uri) in requests {
            let source = Arc::clone(&self.source);
            let semaphore = Arc::clone(&semaphore);
            let timeout = self.timeout;

            join_set.spawn(async move {
                // The semaphore is never closed, so acquire cannot fail.
                let _permit = semaphore.acquire_owned().await.ok();
                let result = match tokio::time::timeout(timeout, source.fetch(&uri)).await {
                    Ok(result) => result,
                    Err(_) => Err(FetchError::Timeout(timeout)),
                };
                (id, uri, result)
            });
        }

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((id, _, Ok(bytes))) => {
                    fetched.avatars.insert(id, bytes);
                }
                Ok((id, uri, Err(e))) => {
                    tracing::warn!("Avatar fetch failed for member {} ({}): {}", id, uri, e);
                }
                Err(e) => {
                    tracing::warn!("Avatar fetch task aborted: {}", e);
                }
            }
        }

        fetched.report.fetched = fetched.avatars.len();
        fetched.report.failed = fetched.report.requested - fetched.report.fetched;
        tracing::debug!(
            "Fetched {}/{} avatars ({} failed)",
            fetched.report.fetched,
            fetched.report.requested,
            fetched.report.failed
        );
        fetched
    }
}
