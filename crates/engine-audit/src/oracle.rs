//! Position-evaluation oracle: injectable trait plus the UCI-backed client.

use std::time::Duration;

use tracing::{info, warn};

use crate::error::AuditError;
use crate::uci::UciEngine;

/// A position-evaluation oracle.
///
/// One query evaluates a position at a fixed depth, either unconstrained
/// (the engine's best line) or restricted to a single candidate move.
/// `Ok(None)` means the oracle could not score the position; callers must
/// treat that as "no deviation computed", never as an even evaluation.
#[allow(async_fn_in_trait)]
pub trait Oracle {
    async fn evaluate(
        &mut self,
        fen: &str,
        depth: u32,
        root_move: Option<&str>,
    ) -> Result<Option<i32>, AuditError>;
}

/// Oracle backed by a single UCI engine process.
///
/// The process is spawned lazily on first query. A failed or timed-out
/// query tears the process down and retries once against a fresh one;
/// a second failure surfaces as `EngineUnavailable`. Callers that share
/// one `UciOracle` across requests must serialize access — the engine
/// speaks one request/response session at a time.
pub struct UciOracle {
    engine_path: String,
    query_timeout: Duration,
    engine: Option<UciEngine>,
}

impl UciOracle {
    pub fn new(engine_path: impl Into<String>, query_timeout: Duration) -> Self {
        Self {
            engine_path: engine_path.into(),
            query_timeout,
            engine: None,
        }
    }

    /// One query attempt against the current process, spawning it if needed.
    /// Any failure leaves the process torn down so the next attempt starts clean.
    async fn query(
        &mut self,
        fen: &str,
        depth: u32,
        root_move: Option<&str>,
    ) -> Result<Option<i32>, AuditError> {
        let engine = match self.engine.as_mut() {
            Some(engine) => engine,
            None => {
                info!(path = %self.engine_path, "Starting engine process");
                let started = UciEngine::new(&self.engine_path).await?;
                self.engine.insert(started)
            }
        };

        match tokio::time::timeout(self.query_timeout, engine.evaluate(fen, depth, root_move))
            .await
        {
            Ok(Ok(score)) => Ok(score),
            Ok(Err(e)) => {
                self.engine = None;
                Err(e)
            }
            Err(_) => {
                // A timed-out conversation leaves the protocol desynced.
                self.engine = None;
                Err(AuditError::EngineUnavailable(format!(
                    "Engine query timed out after {:?}",
                    self.query_timeout
                )))
            }
        }
    }

    /// Quit the engine process if one is running. Tolerates a process
    /// that already exited.
    pub async fn shutdown(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            info!("Stopping engine process");
            engine.quit().await;
        }
    }
}

impl Oracle for UciOracle {
    async fn evaluate(
        &mut self,
        fen: &str,
        depth: u32,
        root_move: Option<&str>,
    ) -> Result<Option<i32>, AuditError> {
        match self.query(fen, depth, root_move).await {
            Ok(score) => Ok(score),
            Err(first) => {
                warn!(error = %first, "Engine query failed, restarting once");
                self.query(fen, depth, root_move).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[tokio::test]
    async fn missing_engine_binary_is_unavailable_after_retry() {
        let mut oracle = UciOracle::new(
            "/nonexistent/uci-engine-binary",
            Duration::from_secs(5),
        );
        let err = oracle.evaluate(START_FEN, 18, None).await.unwrap_err();
        assert!(matches!(err, AuditError::EngineUnavailable(_)));
        // Both attempts failed to spawn; nothing half-started is kept around.
        assert!(oracle.engine.is_none());
    }

    #[tokio::test]
    async fn shutdown_without_a_running_engine_is_tolerated() {
        let mut oracle = UciOracle::new(
            "/nonexistent/uci-engine-binary",
            Duration::from_secs(5),
        );
        // Never started, shut down twice: both are no-ops.
        oracle.shutdown().await;
        oracle.shutdown().await;
        assert!(oracle.engine.is_none());
    }
}
