//! Request and response types for the Personality Insights API

/// Input payload types
pub mod content;
/// Per-call profile options
pub mod options;
/// Profile result types
pub mod profile;
/// Response metadata
pub mod response;

pub use content::{Content, ContentItem, ContentItemType, ContentLanguage};
pub use options::{AcceptLanguage, ProfileBody, ProfileContentType, ProfileOptions};
pub use profile::{
    Behavior, ConsumptionPreferences, ConsumptionPreferencesCategory, Profile, Trait,
    TraitCategory, Warning, WarningId,
};
pub use response::DetailedResponse;
