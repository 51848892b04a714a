use serde::{Deserialize, Serialize};

/// Microsoft OAuth token response (from both code and refresh_token grants)
#[derive(Debug, Clone, Deserialize)]
pub struct MicrosoftTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub expires_in: u64,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Xbox Live user.authenticate request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct XboxAuthRequest {
    pub properties: XboxAuthProperties,
    pub relying_party: String,
    pub token_type: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct XboxAuthProperties {
    pub auth_method: String,
    pub site_name: String,
    pub rps_ticket: String,
}

/// XSTS authorize request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct XstsAuthRequest {
    pub properties: XstsAuthProperties,
    pub relying_party: String,
    pub token_type: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct XstsAuthProperties {
    pub sandbox_id: String,
    pub user_tokens: Vec<String>,
}

/// Response shape shared by the user-authenticate and XSTS hops
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct XboxAuthResponse {
    pub token: String,
    #[serde(default)]
    pub display_claims: XboxDisplayClaims,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct XboxDisplayClaims {
    #[serde(default)]
    pub xui: Vec<XuiClaim>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct XuiClaim {
    #[serde(default)]
    pub uhs: Option<String>,
    #[serde(default)]
    pub gtg: Option<String>,
    #[serde(default)]
    pub xid: Option<String>,
}

impl XboxAuthResponse {
    /// User hash from the first xui claim, if any
    pub fn user_hash(&self) -> Option<&str> {
        self.display_claims.xui.first().and_then(|c| c.uhs.as_deref())
    }

    /// Gamertag from the first xui claim, if any
    pub fn gamertag(&self) -> Option<&str> {
        self.display_claims.xui.first().and_then(|c| c.gtg.as_deref())
    }

    /// Xbox user id (xid) from the first xui claim, if any
    pub fn xbox_user_id(&self) -> Option<&str> {
        self.display_claims.xui.first().and_then(|c| c.xid.as_deref())
    }
}

/// XSTS 401 error body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct XstsErrorBody {
    #[serde(rename = "XErr")]
    pub xerr: u64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub redirect: Option<String>,
}

/// Minecraft login_with_xbox request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinecraftLoginRequest {
    pub identity_token: String,
}

/// Minecraft login_with_xbox response
#[derive(Debug, Clone, Deserialize)]
pub struct MinecraftLoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Java Edition ownership record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MinecraftProfile {
    /// UUID without hyphens
    pub id: String,
    /// Player name
    pub name: String,
    #[serde(default)]
    pub skins: Vec<Skin>,
    #[serde(default)]
    pub capes: Vec<Cape>,
}

impl MinecraftProfile {
    /// UUID in canonical 8-4-4-4-12 form
    pub fn formatted_uuid(&self) -> String {
        format_uuid(&self.id)
    }
}

/// Insert hyphens at offsets 8/12/16/20; anything that is not a plain
/// 32-character id comes back unchanged
pub fn format_uuid(id: &str) -> String {
    if id.len() != 32 || !id.is_ascii() {
        return id.to_string();
    }
    format!(
        "{}-{}-{}-{}-{}",
        &id[..8],
        &id[8..12],
        &id[12..16],
        &id[16..20],
        &id[20..]
    )
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Skin {
    pub id: String,
    pub state: String,
    pub url: String,
    pub variant: String,
    #[serde(default)]
    pub alias: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cape {
    pub id: String,
    pub state: String,
    pub url: String,
    #[serde(default)]
    pub alias: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_uuid_inserts_hyphens_at_fixed_offsets() {
        assert_eq!(
            format_uuid("069a79f444e94726a5befca90e38aaf5"),
            "069a79f4-44e9-4726-a5be-fca90e38aaf5"
        );
    }

    #[test]
    fn test_format_uuid_roundtrips_with_unhyphenated_form() {
        let raw = "11111111222233334444555555555555";
        let formatted = format_uuid(raw);
        assert_eq!(formatted.len(), 36);
        assert_eq!(formatted.replace('-', ""), raw);
    }

    #[test]
    fn test_format_uuid_is_identity_for_other_lengths() {
        assert_eq!(format_uuid(""), "");
        assert_eq!(format_uuid("abc"), "abc");
        assert_eq!(
            format_uuid("069a79f4-44e9-4726-a5be-fca90e38aaf5"),
            "069a79f4-44e9-4726-a5be-fca90e38aaf5"
        );
    }

    #[test]
    fn test_xbox_request_wire_shape() {
        let request = XboxAuthRequest {
            properties: XboxAuthProperties {
                auth_method: "RPS".to_string(),
                site_name: "user.auth.xboxlive.com".to_string(),
                rps_ticket: "d=ms-token".to_string(),
            },
            relying_party: "http://auth.xboxlive.com".to_string(),
            token_type: "JWT".to_string(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["Properties"]["AuthMethod"], "RPS");
        assert_eq!(json["Properties"]["SiteName"], "user.auth.xboxlive.com");
        assert_eq!(json["Properties"]["RpsTicket"], "d=ms-token");
        assert_eq!(json["RelyingParty"], "http://auth.xboxlive.com");
        assert_eq!(json["TokenType"], "JWT");
    }

    #[test]
    fn test_xsts_request_wire_shape() {
        let request = XstsAuthRequest {
            properties: XstsAuthProperties {
                sandbox_id: "RETAIL".to_string(),
                user_tokens: vec!["user-token".to_string()],
            },
            relying_party: "rp://api.minecraftservices.com/".to_string(),
            token_type: "JWT".to_string(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["Properties"]["SandboxId"], "RETAIL");
        assert_eq!(json["Properties"]["UserTokens"][0], "user-token");
        assert_eq!(json["RelyingParty"], "rp://api.minecraftservices.com/");
    }

    #[test]
    fn test_xbox_response_claims_are_optional() {
        let body: XboxAuthResponse =
            serde_json::from_str(r#"{"Token":"T1","DisplayClaims":{"xui":[]}}"#).unwrap();
        assert_eq!(body.token, "T1");
        assert_eq!(body.user_hash(), None);
        assert_eq!(body.gamertag(), None);
        assert_eq!(body.xbox_user_id(), None);
    }

    #[test]
    fn test_xbox_response_reads_first_xui_entry() {
        let body: XboxAuthResponse = serde_json::from_str(
            r#"{"Token":"T2","DisplayClaims":{"xui":[{"uhs":"h1","gtg":"Gamer1","xid":"X1"}]}}"#,
        )
        .unwrap();
        assert_eq!(body.user_hash(), Some("h1"));
        assert_eq!(body.gamertag(), Some("Gamer1"));
        assert_eq!(body.xbox_user_id(), Some("X1"));
    }

    #[test]
    fn test_xsts_error_body_field_names() {
        let body: XstsErrorBody = serde_json::from_str(
            r#"{"Identity":"0","XErr":2148916233,"Message":"","Redirect":"https://start.ui.xboxlive.com"}"#,
        )
        .unwrap();
        assert_eq!(body.xerr, 2148916233);
        assert_eq!(body.redirect.as_deref(), Some("https://start.ui.xboxlive.com"));
    }

    #[test]
    fn test_minecraft_login_request_uses_camel_case() {
        let request = MinecraftLoginRequest {
            identity_token: "XBL3.0 x=h1;T2".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["identityToken"], "XBL3.0 x=h1;T2");
    }
}
