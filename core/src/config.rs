//! Client configuration, injected into `MovieClient` rather than read globally.

use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";

/// Client configuration, read from `MOVIES_*` environment variables.
///
/// Passed by value to whichever component performs HTTP calls; nothing in
/// the crate reads the environment on its own.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed("MOVIES_").from_env::<ClientConfig>()
    }

    /// Same as `from_env` but over an explicit variable set.
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed("MOVIES_").from_iter(vars)
    }
}
