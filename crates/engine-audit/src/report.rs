//! Final report assembly and the top-level pipeline entry point.

use serde::{Deserialize, Serialize};

use chess_core::{GameData, GameMetadata};

use crate::error::AuditError;
use crate::evaluator::MoveRecord;
use crate::likelihood::{aggregate, MoverStatistics};
use crate::oracle::Oracle;
use crate::walker::{walk_game, GameWalk};

/// Per-side statistics, keyed the way the response serializes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSummaries {
    pub white: MoverStatistics,
    pub black: MoverStatistics,
}

/// The terminal analysis artifact. Immutable once assembled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub white: String,
    pub black: String,
    pub date: String,
    pub result: String,
    pub players: PlayerSummaries,
    pub moves: Vec<MoveRecord>,
    pub suspicious_moves: Vec<MoveRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisReport {
    /// Structural assembly only; all computation happens upstream.
    pub fn assemble(metadata: &GameMetadata, walk: GameWalk) -> Self {
        let players = PlayerSummaries {
            white: aggregate(&walk.white_losses),
            black: aggregate(&walk.black_losses),
        };
        Self {
            white: metadata.white.clone(),
            black: metadata.black.clone(),
            date: metadata.date.clone(),
            result: metadata.result.clone(),
            players,
            moves: walk.moves,
            suspicious_moves: walk.suspicious_moves,
            error: None,
        }
    }

    /// The well-formed empty report the boundary returns when analysis
    /// dies mid-game: error message set, move lists empty, stats zeroed.
    pub fn degraded(error: impl Into<String>) -> Self {
        Self {
            white: "Unknown".to_string(),
            black: "Unknown".to_string(),
            date: "Unknown".to_string(),
            result: "*".to_string(),
            players: PlayerSummaries {
                white: aggregate(&[]),
                black: aggregate(&[]),
            },
            moves: Vec::new(),
            suspicious_moves: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// Run the whole pipeline for one parsed game: replay and evaluate every
/// ply, aggregate both sides, assemble the report.
///
/// Deterministic for a deterministic oracle: the same transcript always
/// yields the same report.
pub async fn audit_game<O: Oracle>(
    oracle: &mut O,
    game: &GameData,
    depth: u32,
) -> Result<AnalysisReport, AuditError> {
    let walk = walk_game(oracle, &game.moves, depth).await?;
    Ok(AnalysisReport::assemble(&game.metadata, walk))
}
