//! Fetcher port for downloading remote payloads.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

/// Boxed future type alias used by [`Fetcher`] to keep the trait dyn-compatible.
pub type FetchFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Vec<u8>, Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// Downloads the raw bytes behind a URL.
pub trait Fetcher: Send + Sync {
    /// Returns `true` if this fetcher can perform downloads at all.
    fn is_available(&self) -> bool;

    /// Downloads `url` and returns the response body.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure or a non-success HTTP status.
    fn fetch(&self, url: &str) -> FetchFuture<'_>;
}
