//! Audit pipeline error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    /// The engine process could not be started or stopped responding,
    /// after one restart attempt. Fails the whole analysis.
    #[error("Engine unavailable: {0}")]
    EngineUnavailable(String),

    /// The transcript could not be replayed (illegal or unresolvable move).
    #[error("Invalid transcript: {0}")]
    InvalidTranscript(String),

    /// The engine returned data we could not use mid-game.
    #[error("Evaluation fault: {0}")]
    Evaluation(String),
}
