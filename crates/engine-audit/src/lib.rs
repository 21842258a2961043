//! Engine-assistance audit pipeline.
//!
//! Replays a finished game against a UCI engine, scores each played move
//! by its centipawn loss relative to the engine's best line, and folds the
//! per-move losses into a per-player engine-likelihood heuristic. The
//! likelihood is a heuristic signal, not a calibrated cheat detector.

pub mod error;
pub mod evaluator;
pub mod likelihood;
pub mod oracle;
pub mod report;
pub mod uci;
pub mod walker;

pub use error::AuditError;
pub use evaluator::{evaluate_move, Mover, MoveRecord};
pub use likelihood::{aggregate, MoverStatistics};
pub use oracle::{Oracle, UciOracle};
pub use report::{audit_game, AnalysisReport};
pub use walker::{walk_game, GameWalk};

/// A played move losing fewer than this many centipawns against the
/// engine's best line counts toward the engine-likelihood signal.
pub const SUSPICION_THRESHOLD_CP: i32 = 10;

/// Sentinel a forced-mate score collapses to, so mate and centipawn
/// evaluations stay comparable. Far outside any real centipawn range.
pub const MATE_SCORE_CP: i32 = 100_000;

/// Default search depth per oracle query.
pub const DEFAULT_DEPTH: u32 = 18;
