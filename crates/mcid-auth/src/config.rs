use std::time::Duration;

/// Production endpoints for the token-exchange chain
pub mod endpoints {
    pub const MS_AUTHORIZE: &str = "https://login.live.com/oauth20_authorize.srf";
    pub const MS_TOKEN: &str = "https://login.live.com/oauth20_token.srf";
    pub const XBL_AUTHENTICATE: &str = "https://user.auth.xboxlive.com/user/authenticate";
    pub const XSTS_AUTHORIZE: &str = "https://xsts.auth.xboxlive.com/xsts/authorize";
    pub const MC_LOGIN: &str = "https://api.minecraftservices.com/authentication/login_with_xbox";
    pub const MC_PROFILE: &str = "https://api.minecraftservices.com/minecraft/profile";
}

/// OAuth scope requested when initiating the Microsoft authorization step
pub const DEFAULT_SCOPE: &str = "XboxLive.signin offline_access";

/// Relying parties and sandbox
pub const RP_XBOX_USER_AUTH: &str = "http://auth.xboxlive.com";
pub const RP_MINECRAFT_SERVICES: &str = "rp://api.minecraftservices.com/";
pub const SANDBOX_RETAIL: &str = "RETAIL";

/// Exchange URLs used by the stage clients
///
/// Defaults to the production endpoints; `with_base` points every exchange
/// at a single host so the clients can run against a local mock server.
#[derive(Debug, Clone)]
pub struct AuthEndpoints {
    pub ms_token: String,
    pub xbl_authenticate: String,
    pub xsts_authorize: String,
    pub mc_login: String,
    pub mc_profile: String,
}

impl Default for AuthEndpoints {
    fn default() -> Self {
        Self {
            ms_token: endpoints::MS_TOKEN.to_string(),
            xbl_authenticate: endpoints::XBL_AUTHENTICATE.to_string(),
            xsts_authorize: endpoints::XSTS_AUTHORIZE.to_string(),
            mc_login: endpoints::MC_LOGIN.to_string(),
            mc_profile: endpoints::MC_PROFILE.to_string(),
        }
    }
}

impl AuthEndpoints {
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            ms_token: format!("{base}/oauth20_token.srf"),
            xbl_authenticate: format!("{base}/user/authenticate"),
            xsts_authorize: format!("{base}/xsts/authorize"),
            mc_login: format!("{base}/authentication/login_with_xbox"),
            mc_profile: format!("{base}/minecraft/profile"),
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpTimeouts {
    pub connect: Duration,
    pub request: Duration,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(15),
            request: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_base_strips_trailing_slash() {
        let endpoints = AuthEndpoints::with_base("http://127.0.0.1:9000/");
        assert_eq!(
            endpoints.xbl_authenticate,
            "http://127.0.0.1:9000/user/authenticate"
        );
        assert_eq!(
            endpoints.mc_profile,
            "http://127.0.0.1:9000/minecraft/profile"
        );
    }

    #[test]
    fn test_default_points_at_production() {
        let endpoints = AuthEndpoints::default();
        assert_eq!(endpoints.xsts_authorize, endpoints::XSTS_AUTHORIZE);
        assert_eq!(endpoints.mc_login, endpoints::MC_LOGIN);
    }
}
