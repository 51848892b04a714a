use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};

use crate::config::AuthEndpoints;
use crate::errors::{AuthError, Result};
use crate::models::{MinecraftLoginRequest, MinecraftLoginResponse, MinecraftProfile};

/// Bearer token for api.minecraftservices.com
#[derive(Debug, Clone)]
pub struct MinecraftAccessToken {
    pub token: String,
}

/// Outcome of the profile lookup
///
/// A 404 from the profile endpoint is a branch signal, not a failure: the
/// account authenticated fine but owns no Java Edition profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileOutcome {
    Owned(MinecraftProfile),
    NotOwned,
}

/// Client for the Minecraft services hops
#[derive(Debug, Clone)]
pub struct MinecraftClient {
    http: Client,
    endpoints: AuthEndpoints,
}

impl MinecraftClient {
    pub fn new(http: Client, endpoints: AuthEndpoints) -> Self {
        Self { http, endpoints }
    }

    /// Exchange an XSTS token for a Minecraft access token
    ///
    /// An absent user hash is forwarded as an empty segment; the service
    /// rejects the malformed identity token and the failure surfaces here.
    #[instrument(skip_all)]
    pub async fn login_with_xbox(
        &self,
        user_hash: Option<&str>,
        xsts_token: &str,
    ) -> Result<MinecraftAccessToken> {
        let request = MinecraftLoginRequest {
            identity_token: format!("XBL3.0 x={};{xsts_token}", user_hash.unwrap_or_default()),
        };

        debug!("Logging in to Minecraft services with XSTS token");
        let response = self
            .http
            .post(&self.endpoints.mc_login)
            .header("Accept", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let error = AuthError::http(status, body);
            warn!("Minecraft login failed: {error}");
            return Err(error);
        }

        let body: MinecraftLoginResponse = response.json().await?;
        Ok(MinecraftAccessToken {
            token: body.access_token,
        })
    }

    /// Fetch the Java Edition profile for an authenticated account
    #[instrument(skip_all)]
    pub async fn fetch_profile(&self, access: &MinecraftAccessToken) -> Result<ProfileOutcome> {
        debug!("Fetching Minecraft profile");
        let response = self
            .http
            .get(&self.endpoints.mc_profile)
            .bearer_auth(&access.token)
            .header("Accept", "application/json")
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!("Account owns no Java Edition profile");
            return Ok(ProfileOutcome::NotOwned);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let error = AuthError::http(status, body);
            warn!("Minecraft profile request failed: {error}");
            return Err(error);
        }

        let profile: MinecraftProfile = response.json().await?;
        Ok(ProfileOutcome::Owned(profile))
    }
}
