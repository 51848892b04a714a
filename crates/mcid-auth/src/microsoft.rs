use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::errors::{AuthError, Result};
use crate::models::MicrosoftTokenResponse;

/// Token-exchange half of the Microsoft OAuth2 dance
///
/// The browser redirect itself belongs to the surrounding broker; this
/// client only turns its outputs (authorization code, refresh token) into
/// Microsoft access tokens. Client credentials go in the POST body, not
/// Basic auth.
#[derive(Debug, Clone)]
pub struct MicrosoftAuthClient {
    http: Client,
    token_url: String,
}

impl MicrosoftAuthClient {
    pub fn new(http: Client, token_url: impl Into<String>) -> Self {
        Self {
            http,
            token_url: token_url.into(),
        }
    }

    /// Exchange an authorization code for Microsoft tokens
    #[instrument(skip_all)]
    pub async fn exchange_code(
        &self,
        client_id: &str,
        client_secret: &str,
        code: &str,
        redirect_uri: &str,
    ) -> Result<MicrosoftTokenResponse> {
        let params = [
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("code", code),
            ("grant_type", "authorization_code"),
            ("redirect_uri", redirect_uri),
        ];

        debug!("Exchanging authorization code for Microsoft tokens");
        let response = self.http.post(&self.token_url).form(&params).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let error = AuthError::http(status, body);
            warn!("Microsoft token exchange failed: {error}");
            return Err(error);
        }

        Ok(response.json().await?)
    }

    /// Refresh Microsoft tokens using a refresh token
    #[instrument(skip_all)]
    pub async fn refresh_token(
        &self,
        client_id: &str,
        client_secret: &str,
        refresh_token: &str,
    ) -> Result<MicrosoftTokenResponse> {
        let params = [
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ];

        debug!("Refreshing Microsoft access token");
        let response = self.http.post(&self.token_url).form(&params).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let error = AuthError::http(status, body);
            warn!("Microsoft token refresh failed: {error}");
            return Err(error);
        }

        Ok(response.json().await?)
    }
}
