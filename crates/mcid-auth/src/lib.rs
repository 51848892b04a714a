//! Token-exchange pipeline for Minecraft sign-in through a Microsoft account
//!
//! The chain runs in four hops:
//!
//! 1. Microsoft OAuth2 token endpoint (authorization code or refresh token)
//! 2. Xbox Live user authentication (RPS ticket)
//! 3. XSTS authorization scoped to Minecraft services
//! 4. Minecraft services login, then the Java Edition profile lookup
//!
//! Each hop has its own client so callers can compose them behind a broker
//! or drive a single exchange in isolation. Tokens never appear in logs.

pub mod config;
pub mod errors;
pub mod microsoft;
pub mod minecraft;
pub mod models;
pub mod xbox;

pub use config::{AuthEndpoints, HttpTimeouts, DEFAULT_SCOPE};
pub use errors::{AuthError, Result, XboxPolicyError};
pub use microsoft::MicrosoftAuthClient;
pub use minecraft::{MinecraftAccessToken, MinecraftClient, ProfileOutcome};
pub use models::{MicrosoftTokenResponse, MinecraftProfile};
pub use xbox::{XboxAuthClient, XboxUserToken, XstsToken};
