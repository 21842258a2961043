//! Per-ply move evaluation: centipawn loss against the engine's best line.

use serde::{Deserialize, Serialize};

use crate::error::AuditError;
use crate::oracle::Oracle;
use crate::SUSPICION_THRESHOLD_CP;

/// The side a ply belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mover {
    White,
    Black,
}

/// One analyzed ply. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRecord {
    pub mover: Mover,
    /// The played move in UCI notation.
    #[serde(rename = "move")]
    pub move_uci: String,
    /// How many centipawns the played move gave up against the engine's
    /// best line. Never negative.
    pub centipawn_loss: i32,
    /// True when the loss is below the suspicion threshold, i.e. the
    /// player found an engine-grade move. The flag marks *good* play;
    /// a run of them is what drives the likelihood score up.
    pub suspicious: bool,
}

/// Evaluate one ply: two oracle round-trips against the pre-move position,
/// first unconstrained, then restricted to the played move, both at the
/// same depth and both scored from the side to move.
///
/// When either evaluation is absent the loss is zero: missing data is
/// neutral, neither penalized nor rewarded.
pub async fn evaluate_move<O: Oracle>(
    oracle: &mut O,
    fen_before: &str,
    move_uci: &str,
    mover: Mover,
    depth: u32,
) -> Result<MoveRecord, AuditError> {
    let best = oracle.evaluate(fen_before, depth, None).await?;
    let played = oracle.evaluate(fen_before, depth, Some(move_uci)).await?;

    let centipawn_loss = match (best, played) {
        (Some(best), Some(played)) => (best - played).max(0),
        _ => 0,
    };

    Ok(MoveRecord {
        mover,
        move_uci: move_uci.to_string(),
        centipawn_loss,
        suspicious: centipawn_loss < SUSPICION_THRESHOLD_CP,
    })
}
