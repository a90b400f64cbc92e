//! HTTP client for the rewards/claim backend.
//!
//! Two thin wrappers: a claim-status check and a score submission. Both are
//! blocking calls meant to run on background threads; their errors are
//! logged by the caller and never alter game flow.

use serde::Deserialize;
use std::fmt;

/// Default backend base URL, overridable with `--backend-url`.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3001";

/// Identifier of the reward token credited for a submitted score.
pub const REWARD_TOKEN_ID: &str = "flappy-session";

/// Failure classes for backend calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendError {
    /// 401: token rejected outright.
    Unauthorized,
    /// Other 4xx: authentication or request error.
    Auth,
    /// 5xx: the backend fell over.
    Server,
    /// Body was not the JSON shape we expect.
    Format,
    /// The request never completed.
    Network,
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "unauthorized (401)"),
            Self::Auth => write!(f, "authentication or request error"),
            Self::Server => write!(f, "internal server error"),
            Self::Format => write!(f, "invalid response format, expected JSON"),
            Self::Network => write!(f, "request did not complete"),
        }
    }
}

impl std::error::Error for BackendError {}

/// Per-session credentials, taken from the command line at startup. Both
/// values must be present for any backend call to happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user_id: String,
    pub access_token: String,
}

/// The two calls the game makes against the rewards backend. A trait so
/// tests can substitute a scripted backend.
pub trait ClaimBackend: Send + Sync {
    /// Whether this user has already claimed the session reward.
    fn check_claim(&self, creds: &Credentials) -> Result<bool, BackendError>;

    /// Submit a final score; returns the credited token amount.
    fn submit_score(
        &self,
        creds: &Credentials,
        token_id: &str,
        points: u32,
    ) -> Result<u32, BackendError>;
}

// Responses arrive wrapped in a `message` envelope.
#[derive(Deserialize)]
struct Envelope<T> {
    message: T,
}

#[derive(Deserialize)]
struct ClaimStatusBody {
    #[serde(rename = "hasClaimed")]
    has_claimed: bool,
}

#[derive(Deserialize)]
struct SubmitBody {
    #[serde(rename = "tokensEarned")]
    tokens_earned: u32,
}

/// Production backend over ureq.
pub struct HttpClaimBackend {
    base_url: String,
}

impl HttpClaimBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    fn claim_status_url(&self, user_id: &str) -> String {
        format!("{}/api/claim/status?userId={}", self.base_url, user_id)
    }

    fn submit_url(&self) -> String {
        format!("{}/api/claim/submit", self.base_url)
    }
}

fn classify(err: ureq::Error) -> BackendError {
    match err {
        ureq::Error::Status(401, _) => BackendError::Unauthorized,
        ureq::Error::Status(code, _) if code >= 500 => BackendError::Server,
        ureq::Error::Status(_, _) => BackendError::Auth,
        ureq::Error::Transport(_) => BackendError::Network,
    }
}

fn decode<T: for<'de> Deserialize<'de>>(response: ureq::Response) -> Result<T, BackendError> {
    if !response.content_type().contains("application/json") {
        return Err(BackendError::Format);
    }
    let body: Envelope<T> = response.into_json().map_err(|_| BackendError::Format)?;
    Ok(body.message)
}

impl ClaimBackend for HttpClaimBackend {
    fn check_claim(&self, creds: &Credentials) -> Result<bool, BackendError> {
        let response = ureq::get(&self.claim_status_url(&creds.user_id))
            .set("Content-Type", "application/json")
            .set("Authorization", &creds.access_token)
            .call()
            .map_err(classify)?;

        let body: ClaimStatusBody = decode(response)?;
        Ok(body.has_claimed)
    }

    fn submit_score(
        &self,
        creds: &Credentials,
        token_id: &str,
        points: u32,
    ) -> Result<u32, BackendError> {
        let response = ureq::post(&self.submit_url())
            .set("Authorization", &creds.access_token)
            .send_json(serde_json::json!({
                "userId": creds.user_id,
                "tokenId": token_id,
                "points": points,
            }))
            .map_err(classify)?;

        let body: SubmitBody = decode(response)?;
        Ok(body.tokens_earned)
    }
}
