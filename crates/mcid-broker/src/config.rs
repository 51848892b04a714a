use std::env;

/// Environment variables that override the stored provider configuration
pub const ENV_CLIENT_ID: &str = "MINECRAFT_IDP_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "MINECRAFT_IDP_CLIENT_SECRET";
pub const ENV_REDIRECT_URI: &str = "MINECRAFT_IDP_REDIRECT_URI";

/// Provider configuration as persisted by the admin surface
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

/// Overrides sourced from the process environment
///
/// Blank values are treated as unset so an empty export does not shadow a
/// stored credential.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
}

impl ConfigOverrides {
    pub fn from_env() -> Self {
        Self {
            client_id: env_override(ENV_CLIENT_ID),
            client_secret: env_override(ENV_CLIENT_SECRET),
            redirect_uri: env_override(ENV_REDIRECT_URI),
        }
    }
}

fn env_override(name: &str) -> Option<String> {
    env::var(name).ok().and_then(non_blank)
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Effective configuration after applying overrides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl ProviderConfig {
    /// Resolve the effective values, preferring overrides field by field
    pub fn resolve(&self, overrides: &ConfigOverrides) -> ResolvedConfig {
        ResolvedConfig {
            client_id: pick(&overrides.client_id, &self.client_id),
            client_secret: pick(&overrides.client_secret, &self.client_secret),
            redirect_uri: pick(&overrides.redirect_uri, &self.redirect_uri),
        }
    }
}

fn pick(over: &Option<String>, stored: &str) -> String {
    match over {
        Some(value) => value.clone(),
        None => stored.to_string(),
    }
}
