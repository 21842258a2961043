//! Game replay: walks a transcript ply-by-ply, evaluating each move.

use shakmaty::{fen::Fen, san::San, CastlingMode, Chess, Color, EnPassantMode, Position};

use crate::error::AuditError;
use crate::evaluator::{evaluate_move, Mover, MoveRecord};
use crate::oracle::Oracle;

/// Everything a walked game produces: the full record list, the
/// suspicious subset, and the per-side loss sequences, all in ply order.
#[derive(Debug, Default)]
pub struct GameWalk {
    pub moves: Vec<MoveRecord>,
    pub suspicious_moves: Vec<MoveRecord>,
    pub white_losses: Vec<i32>,
    pub black_losses: Vec<i32>,
}

/// Replay `san_moves` from the standard initial position, evaluating each
/// ply before applying it.
///
/// The mover is taken from the board's turn state, not from move-index
/// parity, so irregular transcripts still attribute plies correctly. The
/// loop is inherently sequential: every query needs the position produced
/// by all prior moves.
pub async fn walk_game<O: Oracle>(
    oracle: &mut O,
    san_moves: &[String],
    depth: u32,
) -> Result<GameWalk, AuditError> {
    let mut pos = Chess::default();
    let mut walk = GameWalk::default();

    for san_str in san_moves {
        let san: San = san_str
            .parse()
            .map_err(|e| AuditError::InvalidTranscript(format!("Unreadable move '{san_str}': {e}")))?;
        let mv = san
            .to_move(&pos)
            .map_err(|e| AuditError::InvalidTranscript(format!("Illegal move '{san_str}': {e}")))?;

        let fen_before = Fen::from_position(&pos, EnPassantMode::Legal).to_string();
        let mover = match pos.turn() {
            Color::White => Mover::White,
            Color::Black => Mover::Black,
        };
        let uci = mv.to_uci(CastlingMode::Standard).to_string();

        let record = evaluate_move(oracle, &fen_before, &uci, mover, depth).await?;

        if record.suspicious {
            walk.suspicious_moves.push(record.clone());
        }
        match mover {
            Mover::White => walk.white_losses.push(record.centipawn_loss),
            Mover::Black => walk.black_losses.push(record.centipawn_loss),
        }
        walk.moves.push(record);

        pos = pos
            .play(mv)
            .map_err(|e| AuditError::InvalidTranscript(format!("Cannot apply '{san_str}': {e}")))?;
    }

    Ok(walk)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Oracle scripted with one loss per ply: the unconstrained query
    /// returns a fixed baseline, the constrained query returns the
    /// baseline minus that ply's loss.
    struct ScriptOracle {
        losses: Vec<i32>,
        ply: usize,
    }

    impl ScriptOracle {
        fn new(losses: &[i32]) -> Self {
            Self {
                losses: losses.to_vec(),
                ply: 0,
            }
        }
    }

    impl Oracle for ScriptOracle {
        async fn evaluate(
            &mut self,
            _fen: &str,
            _depth: u32,
            root_move: Option<&str>,
        ) -> Result<Option<i32>, AuditError> {
            match root_move {
                None => Ok(Some(30)),
                Some(_) => {
                    let loss = self.losses.get(self.ply).copied().unwrap_or(0);
                    self.ply += 1;
                    Ok(Some(30 - loss))
                }
            }
        }
    }

    fn sans(moves: &[&str]) -> Vec<String> {
        moves.iter().map(|m| m.to_string()).collect()
    }

    #[tokio::test]
    async fn records_partition_by_mover_in_ply_order() {
        let moves = sans(&["e4", "e5", "Nf3", "Nc6", "Bb5"]);
        let mut oracle = ScriptOracle::new(&[0, 15, 4, 60, 9]);
        let walk = walk_game(&mut oracle, &moves, 18).await.unwrap();

        assert_eq!(walk.moves.len(), 5);
        let movers: Vec<Mover> = walk.moves.iter().map(|r| r.mover).collect();
        assert_eq!(
            movers,
            vec![
                Mover::White,
                Mover::Black,
                Mover::White,
                Mover::Black,
                Mover::White
            ]
        );

        // Per-side sequences keep ply order and cover every record exactly once.
        assert_eq!(walk.white_losses, vec![0, 4, 9]);
        assert_eq!(walk.black_losses, vec![15, 60]);
        assert_eq!(
            walk.white_losses.len() + walk.black_losses.len(),
            walk.moves.len()
        );
    }

    #[tokio::test]
    async fn suspicious_subset_matches_threshold() {
        let moves = sans(&["d4", "d5", "c4", "e6"]);
        let mut oracle = ScriptOracle::new(&[3, 25, 9, 10]);
        let walk = walk_game(&mut oracle, &moves, 18).await.unwrap();

        let flagged: Vec<&str> = walk
            .suspicious_moves
            .iter()
            .map(|r| r.move_uci.as_str())
            .collect();
        assert_eq!(flagged, vec!["d2d4", "c2c4"]);
        for rec in &walk.moves {
            assert_eq!(rec.suspicious, rec.centipawn_loss < 10);
            assert!(rec.centipawn_loss >= 0);
        }
    }

    #[tokio::test]
    async fn castling_is_reported_in_uci() {
        let moves = sans(&["e4", "e5", "Nf3", "Nc6", "Bc4", "Bc5", "O-O"]);
        let mut oracle = ScriptOracle::new(&[0; 7]);
        let walk = walk_game(&mut oracle, &moves, 18).await.unwrap();
        assert_eq!(walk.moves.last().unwrap().move_uci, "e1g1");
    }

    #[tokio::test]
    async fn illegal_move_is_invalid_transcript() {
        let moves = sans(&["e4", "Ke2"]);
        let mut oracle = ScriptOracle::new(&[0, 0]);
        let err = walk_game(&mut oracle, &moves, 18).await.unwrap_err();
        assert!(matches!(err, AuditError::InvalidTranscript(_)));
    }

    #[tokio::test]
    async fn empty_game_walks_to_empty_output() {
        let mut oracle = ScriptOracle::new(&[]);
        let walk = walk_game(&mut oracle, &[], 18).await.unwrap();
        assert!(walk.moves.is_empty());
        assert!(walk.suspicious_moves.is_empty());
    }
}
