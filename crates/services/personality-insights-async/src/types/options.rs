//! Per-call options for `POST /v3/profile`

use crate::error::PersonalityInsightsError;
use crate::types::content::{Content, ContentLanguage};

/// Headers the client derives from the call itself; `with_header` may not set them
pub const RESERVED_HEADERS: [&str; 3] = ["content-type", "accept", "authorization"];

/// Content-Type of the request body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileContentType {
    /// `application/json`
    Json,
    /// `text/plain`
    Plain,
    /// `text/html`
    Html,
}

impl ProfileContentType {
    /// Returns the MIME type sent in the `Content-Type` header
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Plain => "text/plain",
            Self::Html => "text/html",
        }
    }
}

/// Language requested for trait names and descriptions in the response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptLanguage {
    /// Arabic
    Ar,
    /// German
    De,
    /// English
    En,
    /// Spanish
    Es,
    /// French
    Fr,
    /// Italian
    It,
    /// Japanese
    Ja,
    /// Korean
    Ko,
    /// Brazilian Portuguese
    PtBr,
    /// Simplified Chinese
    ZhCn,
    /// Traditional Chinese
    ZhTw,
}

impl AcceptLanguage {
    /// Returns the value sent in the `Accept-Language` header
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ar => "ar",
            Self::De => "de",
            Self::En => "en",
            Self::Es => "es",
            Self::Fr => "fr",
            Self::It => "it",
            Self::Ja => "ja",
            Self::Ko => "ko",
            Self::PtBr => "pt-br",
            Self::ZhCn => "zh-cn",
            Self::ZhTw => "zh-tw",
        }
    }
}

/// Request body for a profile call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileBody {
    /// Structured content, serialized as JSON
    Content(Content),
    /// A pre-serialized body sent verbatim with the given content type
    Raw {
        /// Value of the `Content-Type` header
        content_type: ProfileContentType,
        /// Body text
        body: String,
    },
}

impl ProfileBody {
    /// Content type implied by this body
    #[must_use]
    pub const fn content_type(&self) -> ProfileContentType {
        match self {
            Self::Content(_) => ProfileContentType::Json,
            Self::Raw { content_type, .. } => *content_type,
        }
    }
}

/// Options for a single profile request
///
/// Build with one of the `from_*` constructors, then set optional parameters.
/// `ProfileOptions::default()` carries no body and is rejected before any request is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileOptions {
    body: Option<ProfileBody>,
    content_language: Option<ContentLanguage>,
    accept_language: Option<AcceptLanguage>,
    raw_scores: Option<bool>,
    csv_headers: Option<bool>,
    consumption_preferences: Option<bool>,
    headers: Vec<(String, String)>,
}

impl ProfileOptions {
    /// Analyze structured content sent as `application/json`
    #[must_use]
    pub fn from_content(content: Content) -> Self {
        Self {
            body: Some(ProfileBody::Content(content)),
            ..Self::default()
        }
    }

    /// Analyze plain text sent as `text/plain`
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::from_raw(ProfileContentType::Plain, text)
    }

    /// Analyze HTML sent as `text/html`
    #[must_use]
    pub fn from_html(html: impl Into<String>) -> Self {
        Self::from_raw(ProfileContentType::Html, html)
    }

    /// Send `body` verbatim with the given content type
    #[must_use]
    pub fn from_raw(content_type: ProfileContentType, body: impl Into<String>) -> Self {
        Self {
            body: Some(ProfileBody::Raw {
                content_type,
                body: body.into(),
            }),
            ..Self::default()
        }
    }

    /// Set the language of the input (`Content-Language`)
    #[must_use]
    pub const fn with_content_language(mut self, language: ContentLanguage) -> Self {
        self.content_language = Some(language);
        self
    }

    /// Set the language of the response (`Accept-Language`)
    #[must_use]
    pub const fn with_accept_language(mut self, language: AcceptLanguage) -> Self {
        self.accept_language = Some(language);
        self
    }

    /// Request raw scores alongside normalized percentiles
    #[must_use]
    pub const fn with_raw_scores(mut self, raw_scores: bool) -> Self {
        self.raw_scores = Some(raw_scores);
        self
    }

    /// Request column headers in CSV output
    #[must_use]
    pub const fn with_csv_headers(mut self, csv_headers: bool) -> Self {
        self.csv_headers = Some(csv_headers);
        self
    }

    /// Request consumption preferences
    #[must_use]
    pub const fn with_consumption_preferences(mut self, consumption_preferences: bool) -> Self {
        self.consumption_preferences = Some(consumption_preferences);
        self
    }

    /// Add a header to this request only
    ///
    /// Names in [`RESERVED_HEADERS`] are rejected when the request is built.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Request body, if set
    #[must_use]
    pub const fn body(&self) -> Option<&ProfileBody> {
        self.body.as_ref()
    }

    /// Content type of the request body, if a body is set
    #[must_use]
    pub fn content_type(&self) -> Option<ProfileContentType> {
        self.body.as_ref().map(ProfileBody::content_type)
    }

    /// Input language, if set
    #[must_use]
    pub const fn content_language(&self) -> Option<ContentLanguage> {
        self.content_language
    }

    /// Response language, if set
    #[must_use]
    pub const fn accept_language(&self) -> Option<AcceptLanguage> {
        self.accept_language
    }

    /// Extra per-request headers
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Query flags that were explicitly set, as `true`/`false` strings
    #[must_use]
    pub fn query_flags(&self) -> Vec<(&'static str, &'static str)> {
        [
            ("raw_scores", self.raw_scores),
            ("csv_headers", self.csv_headers),
            ("consumption_preferences", self.consumption_preferences),
        ]
        .into_iter()
        .filter_map(|(name, flag)| flag.map(|f| (name, if f { "true" } else { "false" })))
        .collect()
    }

    /// Checks that the options describe a request the service can accept.
    ///
    /// # Errors
    ///
    /// Returns [`PersonalityInsightsError::Validation`] if no body is set, the
    /// content has no non-empty item, a raw body is empty, or an extra header
    /// names one of [`RESERVED_HEADERS`].
    pub fn validate(&self) -> Result<(), PersonalityInsightsError> {
        if let Some((name, _)) = self
            .headers
            .iter()
            .find(|(name, _)| RESERVED_HEADERS.iter().any(|r| name.eq_ignore_ascii_case(r)))
        {
            return Err(PersonalityInsightsError::Validation(format!(
                "header {name} is set by the client and cannot be overridden"
            )));
        }

        match &self.body {
            None => Err(PersonalityInsightsError::Validation(
                "profile options require a content type and a body".into(),
            )),
            Some(ProfileBody::Content(content)) => {
                if content.is_empty() {
                    return Err(PersonalityInsightsError::Validation(
                        "content must contain at least one content item".into(),
                    ));
                }
                if !content
                    .content_items
                    .iter()
                    .any(|item| !item.content.trim().is_empty())
                {
                    return Err(PersonalityInsightsError::Validation(
                        "content must contain at least one non-empty content item".into(),
                    ));
                }
                Ok(())
            }
            Some(ProfileBody::Raw { body, .. }) if body.trim().is_empty() => Err(
                PersonalityInsightsError::Validation("request body must not be empty".into()),
            ),
            Some(ProfileBody::Raw { .. }) => Ok(()),
        }
    }

    /// Consumes the options, returning the validated body.
    pub(crate) fn into_parts(self) -> Result<(ProfileBody, Self), PersonalityInsightsError> {
        self.validate()?;
        let mut rest = self;
        match rest.body.take() {
            Some(body) => Ok((body, rest)),
            None => Err(PersonalityInsightsError::Validation(
                "profile options require a content type and a body".into(),
            )),
        }
    }
}
