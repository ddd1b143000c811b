//! Byte stream returned by CSV profile requests

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::{Bytes, BytesMut};
use futures::stream::{BoxStream, Stream, StreamExt, TryStreamExt};
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use tokio::io::AsyncRead;
use tokio_util::io::StreamReader;

use crate::error::PersonalityInsightsError;

/// An open response body streamed as CSV bytes
///
/// Dropping the stream (or calling [`CsvStream::close`]) releases the
/// underlying connection.
pub struct CsvStream {
    status: StatusCode,
    headers: HeaderMap,
    inner: BoxStream<'static, Result<Bytes, reqwest::Error>>,
}

impl std::fmt::Debug for CsvStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvStream")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

impl CsvStream {
    pub(crate) fn from_response(response: reqwest::Response) -> Self {
        Self {
            status: response.status(),
            headers: response.headers().clone(),
            inner: response.bytes_stream().boxed(),
        }
    }

    /// HTTP status code of the response
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Reads the remaining body into memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails mid-body.
    pub async fn bytes(mut self) -> Result<Bytes, PersonalityInsightsError> {
        let mut buf = BytesMut::new();
        while let Some(chunk) = self.inner.try_next().await? {
            buf.extend_from_slice(&chunk);
        }
        Ok(buf.freeze())
    }

    /// Reads the remaining body as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails mid-body or the body is not UTF-8.
    pub async fn text(self) -> Result<String, PersonalityInsightsError> {
        let bytes = self.bytes().await?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| PersonalityInsightsError::Serde(format!("CSV body is not UTF-8: {e}")))
    }

    /// Adapts the body into an [`AsyncRead`]
    pub fn into_async_read(self) -> impl AsyncRead + Send + Unpin {
        StreamReader::new(self.inner.map_err(std::io::Error::other))
    }

    /// Releases the underlying connection without reading the rest of the body
    pub fn close(self) {
        tracing::debug!(status = %self.status, "closing CSV stream");
    }
}

impl Stream for CsvStream {
    type Item = Result<Bytes, PersonalityInsightsError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner
            .poll_next_unpin(cx)
            .map(|item| item.map(|chunk| chunk.map_err(PersonalityInsightsError::from)))
    }
}
