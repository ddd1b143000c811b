//! Helpers shared by unit and integration tests.

use crate::config::PersonalityInsightsConfig;

/// Every environment variable read by [`PersonalityInsightsConfig::new`].
pub const CONFIG_ENV_VARS: [&str; 6] = [
    "PERSONALITY_INSIGHTS_URL",
    "PERSONALITY_INSIGHTS_VERSION",
    "PERSONALITY_INSIGHTS_BEARER_TOKEN",
    "PERSONALITY_INSIGHTS_USERNAME",
    "PERSONALITY_INSIGHTS_PASSWORD",
    "PERSONALITY_INSIGHTS_APIKEY",
];

/// Restores an environment variable to its previous value on drop.
///
/// Mutating the environment is only sound while no other thread reads it;
/// pair with `#[serial(env)]`.
pub struct EnvGuard {
    key: &'static str,
    prev: Option<String>,
}

impl EnvGuard {
    /// Sets `key` to `val` until the guard drops.
    #[must_use]
    pub fn set(key: &'static str, val: &str) -> Self {
        let prev = std::env::var(key).ok();
        // SAFETY: callers serialize env access with `#[serial(env)]`.
        unsafe { std::env::set_var(key, val) };
        Self { key, prev }
    }

    /// Unsets `key` until the guard drops.
    #[must_use]
    pub fn remove(key: &'static str) -> Self {
        let prev = std::env::var(key).ok();
        // SAFETY: callers serialize env access with `#[serial(env)]`.
        unsafe { std::env::remove_var(key) };
        Self { key, prev }
    }

    /// Unsets every variable in [`CONFIG_ENV_VARS`].
    #[must_use]
    pub fn clear_config() -> Vec<Self> {
        CONFIG_ENV_VARS.into_iter().map(Self::remove).collect()
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.prev.take() {
            // SAFETY: see `EnvGuard::set`.
            Some(v) => unsafe { std::env::set_var(self.key, v) },
            // SAFETY: see `EnvGuard::remove`.
            None => unsafe { std::env::remove_var(self.key) },
        }
    }
}

/// Config pointed at a mock server with bearer auth and a fixed version.
#[must_use]
pub fn mock_config(base: impl Into<String>, version: &str, token: &str) -> PersonalityInsightsConfig {
    PersonalityInsightsConfig::new()
        .with_api_base(base)
        .with_version(version)
        .with_bearer(token)
}
