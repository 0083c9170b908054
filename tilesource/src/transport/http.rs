//! HTTP transport backed by reqwest.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::{RequestHandle, ResponseCallback, Transport, TransportResponse};
use crate::source::SourceError;

/// Default timeout for descriptor requests in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Transport that fetches descriptors over HTTP(S).
///
/// Each call to [`Transport::fetch`] spawns one tokio task; the completion
/// callback runs on that task. Dropping the returned [`RequestHandle`]
/// cancels the task before the callback fires. Cancellation is checked
/// just before the callback is invoked, so a drop that races an in-flight
/// completion can still let the callback run; callers that must never
/// observe a completion after release have to gate the callback on their
/// own state, as [`TileSource`] does by handing it only a weak reference.
/// The transport must be used from within a tokio runtime.
///
/// [`TileSource`]: crate::source::TileSource
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with the default request timeout.
    pub fn new() -> Result<Self, SourceError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a transport with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new().expect("failed to create default HTTP transport")
    }
}

impl Transport for HttpTransport {
    fn fetch(&self, url: &str, callback: ResponseCallback) -> RequestHandle {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let client = self.client.clone();
        let url = url.to_string();

        tokio::spawn(async move {
            debug!(url = %url, "fetching descriptor");
            let response = tokio::select! {
                () = token.cancelled() => return,
                response = fetch_url(&client, &url) => response,
            };
            if token.is_cancelled() {
                return;
            }
            callback(response);
        });

        RequestHandle::new(cancel)
    }
}

/// Map an HTTP exchange onto the transport response taxonomy.
async fn fetch_url(client: &Client, url: &str) -> TransportResponse {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            warn!(url = %url, error = %e, "descriptor request failed");
            return TransportResponse::Error(e.to_string());
        }
    };

    let status = response.status();
    if status == StatusCode::NOT_MODIFIED {
        return TransportResponse::NotModified;
    }
    if status == StatusCode::NO_CONTENT {
        return TransportResponse::NoContent;
    }
    if !status.is_success() {
        warn!(url = %url, status = %status, "descriptor request rejected");
        return TransportResponse::Error(format!("HTTP {status} from {url}"));
    }

    match response.bytes().await {
        Ok(body) if body.is_empty() => TransportResponse::NoContent,
        Ok(body) => TransportResponse::Body(body.to_vec()),
        Err(e) => {
            warn!(url = %url, error = %e, "failed to read descriptor body");
            TransportResponse::Error(e.to_string())
        }
    }
}
