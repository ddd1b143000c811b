use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;

use crate::{
    config::Config, error::PersonalityInsightsError, stream::CsvStream,
    types::response::DetailedResponse,
};

/// Personality Insights API client
///
/// The client is generic over a [`Config`] implementation that provides authentication
/// and service configuration. It holds only immutable state and can be shared across tasks.
#[derive(Debug, Clone)]
pub struct Client<C: Config> {
    http: reqwest::Client,
    config: C,
}

impl Client<crate::config::PersonalityInsightsConfig> {
    /// Creates a new client with default configuration
    ///
    /// Reads the service URL, version and credentials from `PERSONALITY_INSIGHTS_*`
    /// environment variables.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(crate::config::PersonalityInsightsConfig::new())
    }
}

impl<C: Config + Default> Default for Client<C> {
    fn default() -> Self {
        Self::with_config(C::default())
    }
}

impl<C: Config> Client<C> {
    /// Creates a new client with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the reqwest client cannot be built.
    #[must_use]
    pub fn with_config(config: C) -> Self {
        Self {
            http: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(5))
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .expect("reqwest client"),
            config,
        }
    }

    /// Replaces the HTTP client with a custom one
    ///
    /// Useful for setting custom timeouts, proxies, or other HTTP configuration.
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Returns a reference to the client's configuration
    #[must_use]
    pub const fn config(&self) -> &C {
        &self.config
    }

    /// Starts a POST request with config headers, query, extra headers and credentials applied.
    ///
    /// `protocol` headers are inserted last and replace any extra header of the same name.
    pub(crate) fn post(
        &self,
        path: &str,
        protocol: HeaderMap,
        extra_headers: &[(String, String)],
    ) -> Result<reqwest::RequestBuilder, PersonalityInsightsError> {
        let mut headers = self.config.headers()?;

        for (name, value) in extra_headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                PersonalityInsightsError::Validation(format!("Invalid header name: {name}"))
            })?;
            let value = HeaderValue::from_str(value).map_err(|_| {
                PersonalityInsightsError::Validation(format!("Invalid value for header {name}"))
            })?;
            headers.insert(name, value);
        }

        for (name, value) in protocol {
            if let Some(name) = name {
                headers.insert(name, value);
            }
        }

        let builder = self
            .http
            .post(self.config.url(path))
            .headers(headers)
            .query(&self.config.query());
        Ok(self.config.authenticate(builder))
    }

    pub(crate) async fn execute<O>(
        &self,
        request: reqwest::Request,
    ) -> Result<DetailedResponse<O>, PersonalityInsightsError>
    where
        O: DeserializeOwned,
    {
        let response = self.send(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.bytes().await?;

        let result: O =
            serde_json::from_slice(&bytes).map_err(|e| crate::error::map_deser(&e, &bytes))?;
        Ok(DetailedResponse {
            status,
            headers,
            result,
        })
    }

    /// Sends a request and hands back the open body as a stream.
    pub(crate) async fn execute_stream(
        &self,
        request: reqwest::Request,
    ) -> Result<CsvStream, PersonalityInsightsError> {
        let response = self.send(request).await?;
        Ok(CsvStream::from_response(response))
    }

    async fn send(
        &self,
        request: reqwest::Request,
    ) -> Result<reqwest::Response, PersonalityInsightsError> {
        // Validate config before any request
        self.config.validate()?;

        tracing::debug!(method = %request.method(), url = %request.url(), "sending request");
        let response = self.http.execute(request).await?;

        let status = response.status();
        tracing::debug!(%status, "received response");
        if status.is_success() {
            return Ok(response);
        }

        let headers = response.headers().clone();
        let bytes = response.bytes().await?;
        let err = crate::error::deserialize_api_error(status, &headers, &bytes);
        tracing::warn!(
            %status,
            transaction_id = headers
                .get(crate::error::HDR_GLOBAL_TRANSACTION_ID)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("-"),
            "request failed"
        );
        Err(err)
    }
}
