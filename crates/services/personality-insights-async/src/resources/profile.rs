use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, CONTENT_LANGUAGE, CONTENT_TYPE, HeaderMap, HeaderValue,
};

use crate::{
    client::Client,
    config::Config,
    error::PersonalityInsightsError,
    stream::CsvStream,
    types::{
        options::{ProfileBody, ProfileOptions},
        profile,
        response::DetailedResponse,
    },
};

/// Path of the profile endpoint
pub const PROFILE_PATH: &str = "/v3/profile";

const ACCEPT_JSON: &str = "application/json";
const ACCEPT_CSV: &str = "text/csv";

/// API resource for the `/v3/profile` endpoint
pub struct Profile<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Profile<'c, C> {
    /// Creates a new Profile resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Generate a personality profile as JSON
    ///
    /// # Errors
    ///
    /// Returns a validation error for incomplete options (before any request is sent),
    /// or an error if the request fails or the service returns a non-2xx status.
    pub async fn create(
        &self,
        options: ProfileOptions,
    ) -> Result<profile::Profile, PersonalityInsightsError> {
        self.create_with_response(options)
            .await
            .map(DetailedResponse::into_result)
    }

    /// Generate a personality profile, keeping the response status and headers
    ///
    /// # Errors
    ///
    /// Same as [`Profile::create`].
    pub async fn create_with_response(
        &self,
        options: ProfileOptions,
    ) -> Result<DetailedResponse<profile::Profile>, PersonalityInsightsError> {
        let request = self.build(options, ACCEPT_JSON)?;
        self.client.execute(request).await
    }

    /// Generate a personality profile as CSV
    ///
    /// The returned stream holds the connection open until it is read to the end,
    /// closed, or dropped.
    ///
    /// # Errors
    ///
    /// Same as [`Profile::create`].
    pub async fn create_csv(
        &self,
        options: ProfileOptions,
    ) -> Result<CsvStream, PersonalityInsightsError> {
        let request = self.build(options, ACCEPT_CSV)?;
        self.client.execute_stream(request).await
    }

    fn build(
        &self,
        options: ProfileOptions,
        accept: &'static str,
    ) -> Result<reqwest::Request, PersonalityInsightsError> {
        let (body, params) = options.into_parts()?;

        let mut protocol = HeaderMap::new();
        protocol.insert(ACCEPT, HeaderValue::from_static(accept));
        protocol.insert(
            CONTENT_TYPE,
            HeaderValue::from_static(body.content_type().as_str()),
        );
        if let Some(language) = params.content_language() {
            protocol.insert(CONTENT_LANGUAGE, HeaderValue::from_static(language.as_str()));
        }
        if let Some(language) = params.accept_language() {
            protocol.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(language.as_str()));
        }

        let builder = self
            .client
            .post(PROFILE_PATH, protocol, params.headers())?
            .query(&params.query_flags());

        let builder = match body {
            ProfileBody::Content(content) => builder.body(
                serde_json::to_vec(&content)
                    .map_err(|e| PersonalityInsightsError::Serde(e.to_string()))?,
            ),
            ProfileBody::Raw { body, .. } => builder.body(body),
        };

        Ok(builder.build()?)
    }
}

impl<C: Config> crate::Client<C> {
    /// Returns the Profile API resource
    #[must_use]
    pub const fn profile(&self) -> Profile<'_, C> {
        Profile::new(self)
    }
}
