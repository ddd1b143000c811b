#![deny(warnings)]
#![deny(clippy::all)]
#![deny(missing_docs)]

//! # `personality-insights-async`
//!
//! Async client for the Personality Insights v3 profile API.
//!
//! ## Quick Start
//!
//! ```no_run
//! use personality_insights_async::{Client, PersonalityInsightsConfig, types::*};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PersonalityInsightsConfig::new()
//!     .with_version("2017-10-13")
//!     .with_bearer("my-token");
//! let client = Client::with_config(config);
//!
//! let content = Content::new(vec![ContentItem::new("I love hiking and reading.")]);
//! let options = ProfileOptions::from_content(content).with_raw_scores(true);
//! let profile = client.profile().create(options).await?;
//! println!("{} words in {}", profile.word_count, profile.processed_language);
//! # Ok(())
//! # }
//! ```
//!
//! ## Authentication
//!
//! Bearer token, HTTP Basic (including `apikey` credentials) or none.
//! See [`PersonalityInsightsConfig`] for configuration options.

/// HTTP client implementation
pub mod client;
/// Configuration types for the client
pub mod config;
/// Error types
pub mod error;
/// API resource implementations
pub mod resources;
/// Streaming CSV responses
pub mod stream;
/// Test support utilities (for use in tests)
#[doc(hidden)]
pub mod test_support;
/// Request and response types
pub mod types;

pub use crate::client::Client;
pub use crate::config::{PersonalityInsightsAuth, PersonalityInsightsConfig};
pub use crate::error::{ApiErrorObject, PersonalityInsightsError};
pub use crate::stream::CsvStream;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::types::*;
    pub use crate::{Client, CsvStream, PersonalityInsightsConfig, PersonalityInsightsError};
}
