//! Score reporting policy around the claim backend.
//!
//! The state machine decides *when* a report happens (exactly once per entry
//! to game over, via [`crate::game::types::GameSession::begin_score_report`]);
//! this module decides *whether*, and carries it out. Network failure is swallowed here
//! and surfaced only as a log line — the session's score arithmetic never
//! depends on it.
//!
//! Claim-check policy: a failed or unresolved claim check is treated as
//! "not yet claimed" and submission is still attempted. The backend is
//! authoritative for double-claim protection, and a rejected submission is
//! itself swallowed, so the policy can only fail toward telemetry.

use crate::backend::{BackendError, ClaimBackend, Credentials, REWARD_TOKEN_ID};
use crate::game::types::ClaimStatus;

/// What happened to a score report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    /// Submission credited this many tokens.
    Submitted { tokens: u32 },
    /// Reward already claimed; submission skipped.
    SkippedClaimed,
    /// No credentials; backend never contacted.
    SkippedUnauthenticated,
    /// Submission failed; gameplay continues regardless.
    Failed(BackendError),
}

impl ReportOutcome {
    /// Log line for the in-session message log. Failures get neutral text;
    /// no error dialog ever interrupts gameplay.
    pub fn log_line(&self) -> String {
        match self {
            Self::Submitted { tokens } => format!("Earned {} tokens for this run!", tokens),
            Self::SkippedClaimed => "Reward already claimed for this session.".to_string(),
            Self::SkippedUnauthenticated => "Playing unauthenticated; score not submitted.".to_string(),
            Self::Failed(err) => format!("Score submission unavailable ({})", err),
        }
    }
}

/// Bridges session scores to the claim backend.
pub struct ScoreReporter<B: ClaimBackend> {
    backend: B,
    creds: Option<Credentials>,
}

impl<B: ClaimBackend> ScoreReporter<B> {
    pub fn new(backend: B, creds: Option<Credentials>) -> Self {
        Self { backend, creds }
    }

    pub fn authenticated(&self) -> bool {
        self.creds.is_some()
    }

    /// Fetch claim status once at session bootstrap. `None` when
    /// unauthenticated; failure maps to "not yet claimed" per the policy
    /// above, with the error carried for logging.
    pub fn fetch_claim(&self) -> Option<(ClaimStatus, Option<BackendError>)> {
        let creds = self.creds.as_ref()?;
        match self.backend.check_claim(creds) {
            Ok(has_claimed) => Some((
                ClaimStatus {
                    has_claimed,
                    tokens_earned: 0,
                },
                None,
            )),
            Err(err) => Some((
                ClaimStatus {
                    has_claimed: false,
                    tokens_earned: 0,
                },
                Some(err),
            )),
        }
    }

    /// Submit a final score unless the reward was already claimed. The
    /// caller passes the claim status it holds; `None` (check unresolved)
    /// counts as not claimed.
    pub fn report_score(&self, claim: Option<&ClaimStatus>, score: u32) -> ReportOutcome {
        let Some(creds) = self.creds.as_ref() else {
            return ReportOutcome::SkippedUnauthenticated;
        };
        if claim.is_some_and(|c| c.has_claimed) {
            return ReportOutcome::SkippedClaimed;
        }
        match self.backend.submit_score(creds, REWARD_TOKEN_ID, score) {
            Ok(tokens) => ReportOutcome::Submitted { tokens },
            Err(err) => ReportOutcome::Failed(err),
        }
    }
}
