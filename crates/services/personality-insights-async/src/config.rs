use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use secrecy::{ExposeSecret, SecretString};

use crate::error::PersonalityInsightsError;

/// Default Personality Insights service URL
pub const PERSONALITY_INSIGHTS_DEFAULT_BASE: &str =
    "https://api.us-south.personality-insights.watson.cloud.ibm.com";
/// Default API version date sent as the `version` query parameter
pub const PERSONALITY_INSIGHTS_DEFAULT_VERSION: &str = "2017-10-13";
/// Username used when authenticating with an API key over HTTP Basic
pub const APIKEY_USERNAME: &str = "apikey";
/// Query parameter carrying the API version date
pub const QUERY_VERSION: &str = "version";

const SDK_USER_AGENT: &str = concat!("personality-insights-async/", env!("CARGO_PKG_VERSION"));

/// Authentication method for the Personality Insights service
#[derive(Clone, Debug)]
pub enum PersonalityInsightsAuth {
    /// `Authorization: Bearer <token>`
    Bearer(SecretString),
    /// HTTP Basic authentication
    Basic {
        /// Basic auth username (`apikey` when using an API key)
        username: String,
        /// Basic auth password or API key
        password: SecretString,
    },
    /// No credentials attached
    None,
}

/// Configuration for the Personality Insights client
///
/// Debug output redacts credentials via [`SecretString`].
#[derive(Clone, Debug)]
pub struct PersonalityInsightsConfig {
    api_base: String,
    version: String,
    auth: PersonalityInsightsAuth,
    default_headers: Vec<(String, String)>,
}

fn env_trimmed(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Default for PersonalityInsightsConfig {
    fn default() -> Self {
        let api_base = env_trimmed("PERSONALITY_INSIGHTS_URL")
            .unwrap_or_else(|| PERSONALITY_INSIGHTS_DEFAULT_BASE.into());
        let version = env_trimmed("PERSONALITY_INSIGHTS_VERSION")
            .unwrap_or_else(|| PERSONALITY_INSIGHTS_DEFAULT_VERSION.into());

        let bearer = env_trimmed("PERSONALITY_INSIGHTS_BEARER_TOKEN");
        let username = env_trimmed("PERSONALITY_INSIGHTS_USERNAME");
        let password = env_trimmed("PERSONALITY_INSIGHTS_PASSWORD");
        let apikey = env_trimmed("PERSONALITY_INSIGHTS_APIKEY");

        let auth = match (bearer, username, password, apikey) {
            (Some(t), ..) => PersonalityInsightsAuth::Bearer(SecretString::from(t)),
            (None, Some(u), Some(p), _) => PersonalityInsightsAuth::Basic {
                username: u,
                password: SecretString::from(p),
            },
            (None, _, _, Some(k)) => PersonalityInsightsAuth::Basic {
                username: APIKEY_USERNAME.into(),
                password: SecretString::from(k),
            },
            _ => PersonalityInsightsAuth::None,
        };

        Self {
            api_base,
            version,
            auth,
            default_headers: vec![],
        }
    }
}

impl PersonalityInsightsConfig {
    /// Creates a new configuration with default settings
    ///
    /// Attempts to read from environment variables:
    /// - `PERSONALITY_INSIGHTS_URL` for the service URL
    /// - `PERSONALITY_INSIGHTS_VERSION` for the API version date (defaults to `2017-10-13`)
    /// - `PERSONALITY_INSIGHTS_BEARER_TOKEN` for bearer token authentication
    /// - `PERSONALITY_INSIGHTS_USERNAME` and `PERSONALITY_INSIGHTS_PASSWORD` for basic authentication
    /// - `PERSONALITY_INSIGHTS_APIKEY` for API key authentication over basic auth
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the service base URL
    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Sets the API version date, e.g. `2017-10-13`
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Sets bearer token authentication
    #[must_use]
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.auth = PersonalityInsightsAuth::Bearer(SecretString::from(token.into()));
        self
    }

    /// Sets HTTP Basic authentication
    #[must_use]
    pub fn with_basic(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = PersonalityInsightsAuth::Basic {
            username: username.into(),
            password: SecretString::from(password.into()),
        };
        self
    }

    /// Sets API key authentication (basic auth with the `apikey` username)
    #[must_use]
    pub fn with_api_key(self, key: impl Into<String>) -> Self {
        self.with_basic(APIKEY_USERNAME, key)
    }

    /// Disables authentication
    #[must_use]
    pub fn with_no_auth(mut self) -> Self {
        self.auth = PersonalityInsightsAuth::None;
        self
    }

    /// Adds a header sent with every request
    #[must_use]
    pub fn with_default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Returns the configured service base URL
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Returns the configured API version date
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the configured authentication method
    #[must_use]
    pub const fn auth(&self) -> &PersonalityInsightsAuth {
        &self.auth
    }
}

/// Configuration trait for the Personality Insights client
///
/// Implement this trait to provide custom authentication and service configuration.
pub trait Config: Send + Sync {
    /// Returns HTTP headers to include in every request
    ///
    /// # Errors
    ///
    /// Returns an error if a header name or value contains invalid characters.
    fn headers(&self) -> Result<HeaderMap, PersonalityInsightsError>;

    /// Constructs the full URL for a service endpoint
    fn url(&self, path: &str) -> String;

    /// Returns query parameters to include in every request
    fn query(&self) -> Vec<(&str, &str)>;

    /// Attaches credentials to an outgoing request
    fn authenticate(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder;

    /// Validates the configuration before any request is sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the version is missing or a configured credential is empty.
    fn validate(&self) -> Result<(), PersonalityInsightsError>;
}

impl Config for PersonalityInsightsConfig {
    fn headers(&self) -> Result<HeaderMap, PersonalityInsightsError> {
        let mut h = HeaderMap::new();
        h.insert(USER_AGENT, HeaderValue::from_static(SDK_USER_AGENT));

        for (name, value) in &self.default_headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                PersonalityInsightsError::Config(format!("Invalid header name: {name}"))
            })?;
            let value = HeaderValue::from_str(value).map_err(|_| {
                PersonalityInsightsError::Config(format!("Invalid value for header {name}"))
            })?;
            h.insert(name, value);
        }

        Ok(h)
    }

    fn url(&self, path: &str) -> String {
        let base = self.api_base.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    fn query(&self) -> Vec<(&str, &str)> {
        vec![(QUERY_VERSION, self.version.as_str())]
    }

    fn authenticate(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            PersonalityInsightsAuth::Bearer(token) => request.bearer_auth(token.expose_secret()),
            PersonalityInsightsAuth::Basic { username, password } => {
                request.basic_auth(username, Some(password.expose_secret()))
            }
            PersonalityInsightsAuth::None => request,
        }
    }

    fn validate(&self) -> Result<(), PersonalityInsightsError> {
        if self.version.trim().is_empty() {
            return Err(PersonalityInsightsError::Config(
                "Missing API version: set PERSONALITY_INSIGHTS_VERSION or call with_version"
                    .into(),
            ));
        }

        match &self.auth {
            PersonalityInsightsAuth::Bearer(t) if t.expose_secret().trim().is_empty() => {
                Err(PersonalityInsightsError::Config(
                    "Empty bearer token: set PERSONALITY_INSIGHTS_BEARER_TOKEN".into(),
                ))
            }
            PersonalityInsightsAuth::Basic { username, password }
                if username.trim().is_empty() || password.expose_secret().trim().is_empty() =>
            {
                Err(PersonalityInsightsError::Config(
                    "Empty basic credentials: set PERSONALITY_INSIGHTS_USERNAME and PERSONALITY_INSIGHTS_PASSWORD, or PERSONALITY_INSIGHTS_APIKEY".into(),
                ))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::EnvGuard;
    use reqwest::header::AUTHORIZATION;
    use serial_test::serial;

    #[test]
    #[serial(env)]
    fn config_reads_env_vars() {
        let _env = EnvGuard::clear_config();
        let _url = EnvGuard::set("PERSONALITY_INSIGHTS_URL", "https://pi.example.com");
        let _ver = EnvGuard::set("PERSONALITY_INSIGHTS_VERSION", "2016-10-20");
        let _tok = EnvGuard::set("PERSONALITY_INSIGHTS_BEARER_TOKEN", "tok-123");

        let cfg = PersonalityInsightsConfig::new();
        assert_eq!(cfg.api_base(), "https://pi.example.com");
        assert_eq!(cfg.version(), "2016-10-20");
        assert!(matches!(cfg.auth(), PersonalityInsightsAuth::Bearer(_)));
    }

    #[test]
    #[serial(env)]
    fn config_defaults() {
        let _env = EnvGuard::clear_config();

        let cfg = PersonalityInsightsConfig::new();
        assert_eq!(cfg.api_base(), PERSONALITY_INSIGHTS_DEFAULT_BASE);
        assert_eq!(cfg.version(), PERSONALITY_INSIGHTS_DEFAULT_VERSION);
        assert!(matches!(cfg.auth(), PersonalityInsightsAuth::None));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    #[serial(env)]
    fn bearer_takes_precedence_over_basic() {
        let _env = EnvGuard::clear_config();
        let _tok = EnvGuard::set("PERSONALITY_INSIGHTS_BEARER_TOKEN", "tok");
        let _user = EnvGuard::set("PERSONALITY_INSIGHTS_USERNAME", "user");
        let _pass = EnvGuard::set("PERSONALITY_INSIGHTS_PASSWORD", "pass");

        let cfg = PersonalityInsightsConfig::new();
        assert!(matches!(cfg.auth(), PersonalityInsightsAuth::Bearer(_)));
    }

    #[test]
    #[serial(env)]
    fn apikey_env_maps_to_basic() {
        let _env = EnvGuard::clear_config();
        let _key = EnvGuard::set("PERSONALITY_INSIGHTS_APIKEY", "  key-abc \n");

        let cfg = PersonalityInsightsConfig::new();
        match cfg.auth() {
            PersonalityInsightsAuth::Basic { username, password } => {
                assert_eq!(username, APIKEY_USERNAME);
                assert_eq!(password.expose_secret(), "key-abc");
            }
            other => panic!("Expected Basic auth, got {other:?}"),
        }
    }

    #[test]
    fn query_carries_version() {
        let cfg = PersonalityInsightsConfig::new().with_version("2017-10-13");
        assert_eq!(cfg.query(), vec![("version", "2017-10-13")]);
    }

    #[test]
    fn url_joins_with_single_slash() {
        let cfg = PersonalityInsightsConfig::new().with_api_base("http://localhost:8080/api/");
        assert_eq!(cfg.url("/v3/profile"), "http://localhost:8080/api/v3/profile");

        let cfg = cfg.with_api_base("http://localhost:8080");
        assert_eq!(cfg.url("v3/profile"), "http://localhost:8080/v3/profile");
    }

    #[test]
    fn headers_include_user_agent_and_defaults() {
        let cfg = PersonalityInsightsConfig::new()
            .with_default_header("X-Watson-Learning-Opt-Out", "true");
        let h = cfg.headers().unwrap();
        let ua = h.get(USER_AGENT).unwrap().to_str().unwrap();
        assert!(ua.starts_with("personality-insights-async/"));
        assert_eq!(
            h.get("x-watson-learning-opt-out").unwrap().to_str().unwrap(),
            "true"
        );
    }

    #[test]
    fn invalid_default_header_is_config_error() {
        let cfg = PersonalityInsightsConfig::new().with_default_header("X-Bad", "line\nbreak");
        match cfg.headers() {
            Err(PersonalityInsightsError::Config(msg)) => assert!(msg.contains("x-bad")),
            other => panic!("Expected Config error, got {other:?}"),
        }

        let cfg = PersonalityInsightsConfig::new().with_default_header("bad header", "v");
        assert!(matches!(cfg.headers(), Err(PersonalityInsightsError::Config(_))));
    }

    #[test]
    fn validate_rejects_empty_version() {
        let cfg = PersonalityInsightsConfig::new().with_no_auth().with_version("  ");
        match cfg.validate() {
            Err(PersonalityInsightsError::Config(msg)) => assert!(msg.contains("version")),
            other => panic!("Expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_empty_credentials() {
        let cfg = PersonalityInsightsConfig::new().with_bearer("   ");
        assert!(cfg.validate().is_err());

        let cfg = PersonalityInsightsConfig::new().with_basic("", "pass");
        assert!(cfg.validate().is_err());

        let cfg = PersonalityInsightsConfig::new().with_api_key("\n");
        assert!(cfg.validate().is_err());

        let cfg = PersonalityInsightsConfig::new().with_bearer("  valid  ");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let cfg = PersonalityInsightsConfig::new().with_bearer("super-secret-token-12345");
        let debug_str = format!("{cfg:?}");
        assert!(!debug_str.contains("super-secret-token-12345"));
        assert!(debug_str.contains("[REDACTED]"), "got: {debug_str}");

        let cfg = PersonalityInsightsConfig::new().with_basic("user", "hunter2-password");
        let debug_str = format!("{cfg:?}");
        assert!(!debug_str.contains("hunter2-password"));
    }

    fn authorization(cfg: &PersonalityInsightsConfig) -> String {
        let request = cfg
            .authenticate(reqwest::Client::new().post("http://localhost/v3/profile"))
            .build()
            .unwrap();
        request.headers()[AUTHORIZATION].to_str().unwrap().to_string()
    }

    #[test]
    fn explicit_credentials_are_sent_verbatim() {
        let cfg = PersonalityInsightsConfig::new().with_bearer(" tok en ");
        assert_eq!(authorization(&cfg), "Bearer  tok en ");

        // base64("user :p@ss word ")
        let cfg = PersonalityInsightsConfig::new().with_basic("user ", ":p@ss word ");
        assert_eq!(authorization(&cfg), "Basic dXNlciA6cEBzcyB3b3JkIA==");
    }
}
