//! Transport contract for fetching remote descriptors.
//!
//! A [`Transport`] performs the actual network or cache fetch. The source
//! never talks to the network itself: it hands the transport a URL and a
//! completion callback, and receives a [`RequestHandle`] that releases the
//! request when dropped. The callback is invoked exactly once with a
//! [`TransportResponse`] - unless the handle was released first, in which
//! case it is never invoked.
//!
//! Retry, backoff and timeout policy all belong to the transport; the
//! source treats every response as final for that attempt.

mod http;

pub use http::HttpTransport;

#[cfg(test)]
pub use mock::MockTransport;

use tokio_util::sync::CancellationToken;

/// Outcome of a single descriptor fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportResponse {
    /// The fetch failed at the transport level (network, TLS, HTTP status).
    Error(String),
    /// The resource has not changed since it was last fetched.
    NotModified,
    /// The fetch succeeded but carried no usable payload.
    NoContent,
    /// The fetch succeeded; the raw response body.
    Body(Vec<u8>),
}

/// Completion callback handed to [`Transport::fetch`].
pub type ResponseCallback = Box<dyn FnOnce(TransportResponse) + Send + 'static>;

/// Performs descriptor fetches.
///
/// Implementations must invoke the callback exactly once per fetch, from an
/// arbitrary execution context, unless the returned handle is released
/// first.
pub trait Transport: Send + Sync {
    /// Start fetching `url`; the callback receives the response.
    fn fetch(&self, url: &str, callback: ResponseCallback) -> RequestHandle;
}

/// Ownership of one in-flight request.
///
/// Dropping the handle releases the request: the transport stops the fetch
/// if it can and no longer invokes the callback.
#[derive(Debug)]
pub struct RequestHandle {
    cancel: CancellationToken,
}

impl RequestHandle {
    /// Wrap a cancellation token observed by the transport's fetch task.
    pub fn new(cancel: CancellationToken) -> Self {
        Self { cancel }
    }
}

impl Drop for RequestHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
pub mod mock {
    //! Deferred-completion transport for tests.
    //!
    //! Fetches are recorded without being completed; a test completes them
    //! explicitly with the response of its choice, modelling the fully
    //! asynchronous completion of a real transport while staying on one
    //! thread.

    use parking_lot::Mutex;
    use tokio_util::sync::CancellationToken;

    use super::{RequestHandle, ResponseCallback, Transport, TransportResponse};

    struct PendingFetch {
        url: String,
        cancel: CancellationToken,
        callback: ResponseCallback,
    }

    #[derive(Default)]
    struct Inner {
        pending: Vec<PendingFetch>,
        issued: usize,
    }

    /// Transport that holds fetches until the test completes them.
    #[derive(Default)]
    pub struct MockTransport {
        inner: Mutex<Inner>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Total number of fetches issued, completed or not.
        pub fn request_count(&self) -> usize {
            self.inner.lock().issued
        }

        /// Number of fetches that have not been completed yet.
        pub fn pending_count(&self) -> usize {
            self.inner.lock().pending.len()
        }

        /// URL of the most recently issued fetch.
        pub fn last_url(&self) -> Option<String> {
            self.inner.lock().pending.last().map(|p| p.url.clone())
        }

        /// Complete the oldest pending fetch with `response`.
        ///
        /// Returns `false` if there was no pending fetch or its handle had
        /// been released; the callback is not invoked in either case.
        pub fn complete_next(&self, response: TransportResponse) -> bool {
            let fetch = {
                let mut inner = self.inner.lock();
                if inner.pending.is_empty() {
                    return false;
                }
                inner.pending.remove(0)
            };
            if fetch.cancel.is_cancelled() {
                return false;
            }
            (fetch.callback)(response);
            true
        }
    }

    impl Transport for MockTransport {
        fn fetch(&self, url: &str, callback: ResponseCallback) -> RequestHandle {
            let cancel = CancellationToken::new();
            let mut inner = self.inner.lock();
            inner.issued += 1;
            inner.pending.push(PendingFetch {
                url: url.to_string(),
                cancel: cancel.clone(),
                callback,
            });
            RequestHandle::new(cancel)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        #[test]
        fn test_complete_next_invokes_callback_once() {
            let transport = MockTransport::new();
            let calls = Arc::new(AtomicUsize::new(0));
            let seen = Arc::clone(&calls);
            let _handle = transport.fetch(
                "https://example.com/tiles.json",
                Box::new(move |response| {
                    assert_eq!(response, TransportResponse::NotModified);
                    seen.fetch_add(1, Ordering::SeqCst);
                }),
            );

            assert_eq!(transport.request_count(), 1);
            assert_eq!(transport.last_url().as_deref(), Some("https://example.com/tiles.json"));
            assert!(transport.complete_next(TransportResponse::NotModified));
            assert_eq!(calls.load(Ordering::SeqCst), 1);
            assert!(!transport.complete_next(TransportResponse::NotModified));
        }

        #[test]
        fn test_released_handle_suppresses_callback() {
            let transport = MockTransport::new();
            let handle = transport.fetch(
                "https://example.com/tiles.json",
                Box::new(|_| panic!("callback must not run after release")),
            );
            drop(handle);
            assert!(!transport.complete_next(TransportResponse::NoContent));
        }
    }
}
