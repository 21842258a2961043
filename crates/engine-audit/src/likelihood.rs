//! Per-player aggregation of centipawn losses into an engine-likelihood score.

use serde::{Deserialize, Serialize};

use crate::SUSPICION_THRESHOLD_CP;

/// Aggregated statistics for one side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoverStatistics {
    /// Arithmetic mean centipawn loss.
    pub avg_loss: f64,
    /// Heuristic in [0, 1]: how engine-like the side's play looks. Not a
    /// calibrated probability — there is no reference human population
    /// behind it.
    pub engine_likelihood: f64,
}

/// Fold one side's ordered loss sequence into its statistics.
///
/// The likelihood rewards both a high rate of near-optimal moves and low
/// variance across the game: an engine is consistently near-best and never
/// wildly suboptimal on a single move. The 0.7/0.3 weighting favors the
/// near-optimality rate as the primary signal.
pub fn aggregate(losses: &[i32]) -> MoverStatistics {
    if losses.is_empty() {
        return MoverStatistics {
            avg_loss: 0.0,
            engine_likelihood: 0.0,
        };
    }

    let n = losses.len() as f64;
    let avg_loss = losses.iter().map(|&l| l as f64).sum::<f64>() / n;

    let perfect = losses
        .iter()
        .filter(|&&l| l < SUSPICION_THRESHOLD_CP)
        .count() as f64
        / n;

    // Sample standard deviation; a single data point carries no variance
    // information, so it contributes none rather than dividing by zero.
    let stdev = if losses.len() > 1 {
        let var = losses
            .iter()
            .map(|&l| {
                let d = l as f64 - avg_loss;
                d * d
            })
            .sum::<f64>()
            / (n - 1.0);
        var.sqrt()
    } else {
        0.0
    };

    let engine_likelihood = (0.7 * perfect + 0.3 * (1.0 / (1.0 + stdev))).min(1.0);

    MoverStatistics {
        avg_loss,
        engine_likelihood,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sequence_scores_zero() {
        let stats = aggregate(&[]);
        assert_eq!(stats.avg_loss, 0.0);
        assert_eq!(stats.engine_likelihood, 0.0);
    }

    #[test]
    fn all_perfect_moves_score_one() {
        let stats = aggregate(&[0, 0, 0, 0]);
        assert_eq!(stats.avg_loss, 0.0);
        assert_eq!(stats.engine_likelihood, 1.0);
    }

    #[test]
    fn single_bad_move_has_no_variance() {
        // perfect_fraction = 0, stdev = 0 => 0.3 from the consistency term.
        let stats = aggregate(&[40]);
        assert_eq!(stats.avg_loss, 40.0);
        assert!((stats.engine_likelihood - 0.3).abs() < 1e-12);
    }

    #[test]
    fn likelihood_stays_in_unit_interval() {
        let cases: [&[i32]; 6] = [
            &[0],
            &[9, 9, 9, 9, 9, 9],
            &[0, 500, 0, 500],
            &[100_000],
            &[1, 2, 3, 4, 5, 600, 7],
            &[10, 10, 10],
        ];
        for losses in cases {
            let stats = aggregate(losses);
            assert!(
                (0.0..=1.0).contains(&stats.engine_likelihood),
                "out of range for {losses:?}"
            );
            assert!(stats.avg_loss >= 0.0);
        }
    }

    #[test]
    fn mean_and_stdev_shape() {
        // losses 10, 20, 30: mean 20, sample stdev 10.
        let stats = aggregate(&[10, 20, 30]);
        assert_eq!(stats.avg_loss, 20.0);
        // perfect_fraction 0, so likelihood = 0.3 / (1 + 10).
        assert!((stats.engine_likelihood - 0.3 / 11.0).abs() < 1e-12);
    }

    #[test]
    fn threshold_is_strict() {
        // A loss of exactly 10 is not "perfect".
        let stats = aggregate(&[10, 10]);
        assert!((stats.engine_likelihood - 0.3).abs() < 1e-12);
    }
}
