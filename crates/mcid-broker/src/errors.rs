use thiserror::Error;

use mcid_auth::{AuthError, XboxPolicyError};

/// Failures surfaced to the login flow
///
/// Policy errors keep their precomputed user-facing message; everything
/// else collapses into a single retryable message so upstream details
/// never leak to the end user.
#[derive(Error, Debug)]
pub enum BrokerError {
    #[error("{0}")]
    XboxPolicy(XboxPolicyError),

    #[error("Could not retrieve Xbox Gamertag for Bedrock user")]
    MissingGamertag,

    #[error("Minecraft authentication failed. Please try again.")]
    Authentication(#[source] AuthError),
}

impl From<AuthError> for BrokerError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::XboxPolicy(policy) => Self::XboxPolicy(policy),
            other => Self::Authentication(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, BrokerError>;
