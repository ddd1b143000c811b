//! Response metadata wrapper

use reqwest::StatusCode;
use reqwest::header::HeaderMap;

/// A decoded result together with the HTTP status and headers it arrived with
#[derive(Debug, Clone)]
pub struct DetailedResponse<T> {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Decoded body
    pub result: T,
}

impl<T> DetailedResponse<T> {
    /// Returns the decoded body, dropping the metadata
    pub fn into_result(self) -> T {
        self.result
    }

    /// Value of the `X-Global-Transaction-Id` header, if present
    #[must_use]
    pub fn transaction_id(&self) -> Option<&str> {
        self.headers
            .get(crate::error::HDR_GLOBAL_TRANSACTION_ID)
            .and_then(|v| v.to_str().ok())
    }
}
