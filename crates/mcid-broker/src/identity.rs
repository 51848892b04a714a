use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Which edition the identity was resolved against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edition {
    Java,
    Bedrock,
}

impl Edition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Edition::Java => "java",
            Edition::Bedrock => "bedrock",
        }
    }
}

/// Attribute keys attached to every resolved identity
pub mod attributes {
    pub const MINECRAFT_UUID: &str = "minecraft_uuid";
    pub const MINECRAFT_USERNAME: &str = "minecraft_username";
    pub const MINECRAFT_EDITION: &str = "minecraft_edition";
    pub const XBOX_GAMERTAG: &str = "xbox_gamertag";
    pub const XBOX_USER_ID: &str = "xbox_user_id";
}

/// Identity handed to the surrounding broker once the chain completes
///
/// The id is stable across logins: the hyphenated profile UUID for Java,
/// an `xbox-` prefixed identifier for Bedrock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederatedIdentity {
    pub id: String,
    pub username: String,
    pub edition: Edition,
    pub attributes: BTreeMap<String, String>,
}

/// Stable Bedrock identifier, preferring the Xbox user id claim
///
/// When the xid claim is absent the gamertag hash stands in. The hash uses
/// 32-bit wrapping arithmetic so ids minted by earlier deployments keep
/// resolving to the same account.
pub fn bedrock_unique_id(xbox_user_id: Option<&str>, gamertag: &str) -> String {
    match xbox_user_id {
        Some(xid) => format!("xbox-{xid}"),
        None => format!("xbox-{}", gamertag_hash(gamertag)),
    }
}

fn gamertag_hash(gamertag: &str) -> i32 {
    gamertag
        .chars()
        .fold(0i32, |h, c| h.wrapping_mul(31).wrapping_add(c as i32))
}
