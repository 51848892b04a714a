use thiserror::Error;

/// Failures raised by the token-exchange hops
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP error {status}: {body_snippet}")]
    Http {
        status: reqwest::StatusCode,
        body_snippet: String,
    },

    #[error(transparent)]
    XboxPolicy(#[from] XboxPolicyError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl AuthError {
    /// Generic transport failure carrying the upstream status and a truncated body
    pub(crate) fn http(status: reqwest::StatusCode, body: String) -> Self {
        Self::Http {
            status,
            body_snippet: body.chars().take(200).collect(),
        }
    }
}

/// Account-state error reported by the XSTS step
///
/// Always fatal to the current attempt; the message is precomputed from the
/// `XErr` code so callers can surface it to the user verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct XboxPolicyError {
    pub code: u64,
    pub message: String,
    pub redirect: Option<String>,
}

impl XboxPolicyError {
    pub fn from_xerr(code: u64, redirect: Option<String>) -> Self {
        Self {
            code,
            message: policy_message(code),
            redirect,
        }
    }

    /// True only for the missing-Xbox-profile code; the one case the user
    /// can fix by creating an account
    pub fn needs_xbox_account(&self) -> bool {
        self.code == 2_148_916_233
    }
}

fn policy_message(code: u64) -> String {
    match code {
        2_148_916_233 => "This Microsoft account doesn't have an Xbox account. \
                          Please create an Xbox account first at xbox.com/live"
            .to_string(),
        2_148_916_235 => "Xbox Live is not available in your country.".to_string(),
        2_148_916_236 | 2_148_916_237 => {
            "This account requires adult verification (South Korea).".to_string()
        }
        2_148_916_238 => "This is a child account and needs to be added to a family.".to_string(),
        code => format!("Xbox Live authentication failed (Error code: {code})"),
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
