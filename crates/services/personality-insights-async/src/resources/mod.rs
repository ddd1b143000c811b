//! API resource implementations for the Personality Insights client

/// Profile API resource
pub mod profile;

pub use profile::Profile;
