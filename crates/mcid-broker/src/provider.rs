use std::collections::BTreeMap;

use reqwest::Client;
use tracing::{debug, info, instrument};
use url::Url;

use mcid_auth::config::endpoints;
use mcid_auth::xbox::XstsToken;
use mcid_auth::{
    AuthEndpoints, HttpTimeouts, MicrosoftAuthClient, MicrosoftTokenResponse, MinecraftClient,
    MinecraftProfile, ProfileOutcome, XboxAuthClient, DEFAULT_SCOPE,
};

use crate::config::ResolvedConfig;
use crate::errors::{BrokerError, Result};
use crate::identity::{attributes, bedrock_unique_id, Edition, FederatedIdentity};

/// Per-login context carried for log correlation only
#[derive(Debug, Clone, Default)]
pub struct LoginContext {
    pub realm: Option<String>,
}

/// Drives the full exchange chain and shapes the resulting identity
#[derive(Debug, Clone)]
pub struct MinecraftIdentityProvider {
    config: ResolvedConfig,
    microsoft: MicrosoftAuthClient,
    xbox: XboxAuthClient,
    minecraft: MinecraftClient,
}

impl MinecraftIdentityProvider {
    pub fn new(config: ResolvedConfig) -> mcid_auth::Result<Self> {
        Self::with_endpoints(config, AuthEndpoints::default())
    }

    /// Build a provider against explicit exchange URLs
    pub fn with_endpoints(
        config: ResolvedConfig,
        endpoints: AuthEndpoints,
    ) -> mcid_auth::Result<Self> {
        let timeouts = HttpTimeouts::default();
        let http = Client::builder()
            .connect_timeout(timeouts.connect)
            .timeout(timeouts.request)
            .user_agent("mcid-broker")
            .build()?;

        Ok(Self {
            config,
            microsoft: MicrosoftAuthClient::new(http.clone(), endpoints.ms_token.clone()),
            xbox: XboxAuthClient::new(http.clone(), endpoints.clone()),
            minecraft: MinecraftClient::new(http, endpoints),
        })
    }

    /// URL the user agent is sent to for the Microsoft authorization step
    pub fn authorization_url(&self, state: Option<&str>) -> mcid_auth::Result<Url> {
        let mut url = Url::parse(endpoints::MS_AUTHORIZE)?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("client_id", &self.config.client_id)
                .append_pair("response_type", "code")
                .append_pair("redirect_uri", &self.config.redirect_uri)
                .append_pair("scope", DEFAULT_SCOPE);
            if let Some(state) = state {
                query.append_pair("state", state);
            }
        }
        Ok(url)
    }

    /// Redeem the authorization code delivered to the redirect URI
    pub async fn exchange_code(&self, code: &str) -> mcid_auth::Result<MicrosoftTokenResponse> {
        self.microsoft
            .exchange_code(
                &self.config.client_id,
                &self.config.client_secret,
                code,
                &self.config.redirect_uri,
            )
            .await
    }

    /// Obtain fresh Microsoft tokens from a stored refresh token
    pub async fn refresh_token(&self, refresh_token: &str) -> mcid_auth::Result<MicrosoftTokenResponse> {
        self.microsoft
            .refresh_token(&self.config.client_id, &self.config.client_secret, refresh_token)
            .await
    }

    /// Run the exchange chain from a Microsoft access token to an identity
    ///
    /// Owning a Java Edition profile selects the Java branch; a 404 from the
    /// profile endpoint selects the Bedrock branch instead of failing.
    #[instrument(skip_all, fields(realm = context.realm.as_deref().unwrap_or("-")))]
    pub async fn resolve_identity(
        &self,
        ms_access_token: &str,
        context: &LoginContext,
    ) -> Result<FederatedIdentity> {
        let user_token = self.xbox.authenticate_with_xbox(ms_access_token).await?;
        let xsts = self.xbox.obtain_xsts_token(&user_token).await?;

        let access = self
            .minecraft
            .login_with_xbox(user_token.user_hash.as_deref(), &xsts.token)
            .await?;

        let identity = match self.minecraft.fetch_profile(&access).await? {
            ProfileOutcome::Owned(profile) => {
                debug!(username = %profile.name, "Resolved Java Edition profile");
                java_identity(&profile, &xsts)
            }
            ProfileOutcome::NotOwned => {
                debug!("No Java Edition profile, resolving as Bedrock");
                bedrock_identity(&xsts)?
            }
        };

        info!(
            edition = identity.edition.as_str(),
            username = %identity.username,
            "Minecraft identity resolved"
        );
        Ok(identity)
    }
}

fn java_identity(profile: &MinecraftProfile, xsts: &XstsToken) -> FederatedIdentity {
    let mut attrs = BTreeMap::new();
    attrs.insert(attributes::MINECRAFT_UUID.to_string(), profile.id.clone());
    attrs.insert(attributes::MINECRAFT_USERNAME.to_string(), profile.name.clone());
    attrs.insert(
        attributes::MINECRAFT_EDITION.to_string(),
        Edition::Java.as_str().to_string(),
    );
    if let Some(gamertag) = &xsts.gamertag {
        attrs.insert(attributes::XBOX_GAMERTAG.to_string(), gamertag.clone());
    }
    if let Some(xid) = &xsts.xbox_user_id {
        attrs.insert(attributes::XBOX_USER_ID.to_string(), xid.clone());
    }

    FederatedIdentity {
        id: profile.formatted_uuid(),
        username: profile.name.clone(),
        edition: Edition::Java,
        attributes: attrs,
    }
}

fn bedrock_identity(xsts: &XstsToken) -> Result<FederatedIdentity> {
    let gamertag = xsts
        .gamertag
        .as_deref()
        .filter(|g| !g.trim().is_empty())
        .ok_or(BrokerError::MissingGamertag)?;

    let mut attrs = BTreeMap::new();
    attrs.insert(attributes::MINECRAFT_USERNAME.to_string(), gamertag.to_string());
    attrs.insert(
        attributes::MINECRAFT_EDITION.to_string(),
        Edition::Bedrock.as_str().to_string(),
    );
    attrs.insert(attributes::XBOX_GAMERTAG.to_string(), gamertag.to_string());
    if let Some(xid) = &xsts.xbox_user_id {
        attrs.insert(attributes::XBOX_USER_ID.to_string(), xid.clone());
    }

    Ok(FederatedIdentity {
        id: bedrock_unique_id(xsts.xbox_user_id.as_deref(), gamertag),
        username: gamertag.to_string(),
        edition: Edition::Bedrock,
        attributes: attrs,
    })
}
