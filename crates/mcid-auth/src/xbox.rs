use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};

use crate::config::{AuthEndpoints, RP_MINECRAFT_SERVICES, RP_XBOX_USER_AUTH, SANDBOX_RETAIL};
use crate::errors::{AuthError, Result, XboxPolicyError};
use crate::models::{
    XboxAuthProperties, XboxAuthRequest, XboxAuthResponse, XstsAuthProperties, XstsAuthRequest,
    XstsErrorBody,
};

/// Result of the Xbox Live user-authentication hop
///
/// A missing user hash is tolerated here; the Minecraft hop rejects the
/// login later with a generic failure.
#[derive(Debug, Clone)]
pub struct XboxUserToken {
    pub token: String,
    pub user_hash: Option<String>,
}

/// XSTS token scoped to Minecraft services, with the identity claims that
/// ride along regardless of which edition branch is taken downstream
#[derive(Debug, Clone)]
pub struct XstsToken {
    pub token: String,
    pub user_hash: Option<String>,
    pub gamertag: Option<String>,
    pub xbox_user_id: Option<String>,
}

/// Client for the two Xbox Live exchanges
#[derive(Debug, Clone)]
pub struct XboxAuthClient {
    http: Client,
    endpoints: AuthEndpoints,
}

impl XboxAuthClient {
    pub fn new(http: Client, endpoints: AuthEndpoints) -> Self {
        Self { http, endpoints }
    }

    /// Exchange a Microsoft access token for an Xbox user token
    #[instrument(skip_all)]
    pub async fn authenticate_with_xbox(&self, ms_access_token: &str) -> Result<XboxUserToken> {
        let request = XboxAuthRequest {
            properties: XboxAuthProperties {
                auth_method: "RPS".to_string(),
                site_name: "user.auth.xboxlive.com".to_string(),
                rps_ticket: format!("d={ms_access_token}"),
            },
            relying_party: RP_XBOX_USER_AUTH.to_string(),
            token_type: "JWT".to_string(),
        };

        debug!("Authenticating with Xbox Live");
        let response = self
            .http
            .post(&self.endpoints.xbl_authenticate)
            .header("Accept", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let error = AuthError::http(status, body);
            warn!("Xbox Live authentication failed: {error}");
            return Err(error);
        }

        let body: XboxAuthResponse = response.json().await?;
        let user_hash = body.user_hash().map(str::to_owned);
        if user_hash.is_none() {
            warn!("Xbox Live response carried no user hash claim");
        }

        Ok(XboxUserToken {
            token: body.token,
            user_hash,
        })
    }

    /// Exchange an Xbox user token for an XSTS token scoped to Minecraft
    /// services, carrying the gamertag and Xbox user id claims forward
    #[instrument(skip_all)]
    pub async fn obtain_xsts_token(&self, user_token: &XboxUserToken) -> Result<XstsToken> {
        let request = XstsAuthRequest {
            properties: XstsAuthProperties {
                sandbox_id: SANDBOX_RETAIL.to_string(),
                user_tokens: vec![user_token.token.clone()],
            },
            relying_party: RP_MINECRAFT_SERVICES.to_string(),
            token_type: "JWT".to_string(),
        };

        debug!("Requesting XSTS token for Minecraft services");
        let response = self
            .http
            .post(&self.endpoints.xsts_authorize)
            .header("Accept", "application/json")
            .json(&request)
            .send()
            .await?;

        // 401 carries a structured account-state error, not a transport failure
        if response.status() == StatusCode::UNAUTHORIZED {
            let body: XstsErrorBody = response.json().await?;
            let error = XboxPolicyError::from_xerr(body.xerr, body.redirect);
            warn!(code = error.code, "XSTS authorization denied: {}", error.message);
            return Err(error.into());
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let error = AuthError::http(status, body);
            warn!("XSTS token request failed: {error}");
            return Err(error);
        }

        let body: XboxAuthResponse = response.json().await?;
        let user_hash = body.user_hash().map(str::to_owned);
        let gamertag = body.gamertag().map(str::to_owned);
        let xbox_user_id = body.xbox_user_id().map(str::to_owned);

        Ok(XstsToken {
            token: body.token,
            user_hash,
            gamertag,
            xbox_user_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client(server: &MockServer) -> XboxAuthClient {
        XboxAuthClient::new(Client::new(), AuthEndpoints::with_base(&server.uri()))
    }

    fn user_token(token: &str, user_hash: Option<&str>) -> XboxUserToken {
        XboxUserToken {
            token: token.to_string(),
            user_hash: user_hash.map(str::to_owned),
        }
    }

    #[tokio::test]
    async fn test_authenticate_with_xbox_sends_prefixed_ticket() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/authenticate"))
            .and(body_partial_json(json!({
                "Properties": {
                    "AuthMethod": "RPS",
                    "SiteName": "user.auth.xboxlive.com",
                    "RpsTicket": "d=ms-token"
                },
                "RelyingParty": "http://auth.xboxlive.com",
                "TokenType": "JWT"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Token": "T1",
                "DisplayClaims": {"xui": [{"uhs": "h1"}]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let token = client(&server).authenticate_with_xbox("ms-token").await.unwrap();
        assert_eq!(token.token, "T1");
        assert_eq!(token.user_hash.as_deref(), Some("h1"));
    }

    #[tokio::test]
    async fn test_authenticate_with_xbox_tolerates_missing_claims() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/authenticate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Token": "T1",
                "DisplayClaims": {"xui": []}
            })))
            .mount(&server)
            .await;

        let token = client(&server).authenticate_with_xbox("ms-token").await.unwrap();
        assert_eq!(token.token, "T1");
        assert_eq!(token.user_hash, None);
    }

    #[tokio::test]
    async fn test_authenticate_with_xbox_maps_non_200_to_generic_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/authenticate"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad ticket"))
            .mount(&server)
            .await;

        let result = client(&server).authenticate_with_xbox("ms-token").await;
        match result {
            Err(AuthError::Http { status, body_snippet }) => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert!(body_snippet.contains("bad ticket"));
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_obtain_xsts_token_scopes_to_minecraft_relying_party() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/xsts/authorize"))
            .and(body_partial_json(json!({
                "Properties": {
                    "SandboxId": "RETAIL",
                    "UserTokens": ["T1"]
                },
                "RelyingParty": "rp://api.minecraftservices.com/",
                "TokenType": "JWT"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Token": "T2",
                "DisplayClaims": {"xui": [{"uhs": "h1", "gtg": "Gamer1", "xid": "X1"}]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let xsts = client(&server)
            .obtain_xsts_token(&user_token("T1", Some("h1")))
            .await
            .unwrap();

        assert_eq!(xsts.token, "T2");
        assert_eq!(xsts.user_hash.as_deref(), Some("h1"));
        assert_eq!(xsts.gamertag.as_deref(), Some("Gamer1"));
        assert_eq!(xsts.xbox_user_id.as_deref(), Some("X1"));
    }

    #[tokio::test]
    async fn test_obtain_xsts_token_parses_401_into_policy_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/xsts/authorize"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "Identity": "0",
                "XErr": 2148916233u64,
                "Message": "",
                "Redirect": "https://start.ui.xboxlive.com/CreateAccount"
            })))
            .mount(&server)
            .await;

        let result = client(&server).obtain_xsts_token(&user_token("T1", Some("h1"))).await;
        match result {
            Err(AuthError::XboxPolicy(policy)) => {
                assert!(policy.needs_xbox_account());
                assert!(policy.message.contains("doesn't have an Xbox account"));
                assert_eq!(
                    policy.redirect.as_deref(),
                    Some("https://start.ui.xboxlive.com/CreateAccount")
                );
            }
            other => panic!("expected policy error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_obtain_xsts_token_maps_other_failures_to_generic_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/xsts/authorize"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let result = client(&server).obtain_xsts_token(&user_token("T1", Some("h1"))).await;
        match result {
            Err(AuthError::Http { status, .. }) => {
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }
}
