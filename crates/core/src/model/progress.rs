use serde::{Deserialize, Serialize};

/// Running practice statistics across completed rounds.
///
/// `success_rate` is the rounded running mean of every correctness percentage
/// folded in so far; it reads as 0 while nothing has been completed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    completed: u32,
    success_rate: u8,
}

impl Progress {
    /// A fresh progress counter: nothing completed yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn completed(&self) -> u32 {
        self.completed
    }

    #[must_use]
    pub fn success_rate(&self) -> u8 {
        self.success_rate
    }

    /// Folds one correctness percentage into the running statistics.
    ///
    /// Pure: returns the updated value, leaving `self` untouched. Inputs are
    /// clamped to [0, 100], which keeps the mean in range as well.
    #[must_use]
    pub fn record(self, percentage: u8) -> Self {
        let percentage = percentage.min(100);
        let completed = self.completed + 1;
        let sum = u64::from(self.success_rate) * u64::from(self.completed) + u64::from(percentage);
        // Round half up.
        let success_rate = (2 * sum + u64::from(completed)) / (2 * u64::from(completed));
        Self {
            completed,
            success_rate: success_rate as u8,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn fold_all(percentages: &[u8]) -> Progress {
        percentages
            .iter()
            .fold(Progress::new(), |progress, &p| progress.record(p))
    }

    #[test]
    fn starts_at_zero() {
        let progress = Progress::new();
        assert_eq!(progress.completed(), 0);
        assert_eq!(progress.success_rate(), 0);
    }

    #[test]
    fn two_round_scenario_averages_to_seventy() {
        let progress = Progress::new().record(80);
        assert_eq!(progress.completed(), 1);
        assert_eq!(progress.success_rate(), 80);

        let progress = progress.record(60);
        assert_eq!(progress.completed(), 2);
        assert_eq!(progress.success_rate(), 70);
    }

    #[test]
    fn success_rate_tracks_the_running_mean() {
        // The fold recomputes from the already-rounded previous rate, so it
        // can drift from the exact mean by a point; the step values below are
        // the defined sequence.
        let samples: [u8; 7] = [100, 0, 55, 80, 33, 100, 67];
        let expected_rates: [u8; 7] = [100, 50, 52, 59, 54, 62, 63];

        let mut progress = Progress::new();
        for (&p, &rate) in samples.iter().zip(&expected_rates) {
            progress = progress.record(p);
            assert_eq!(progress.success_rate(), rate);
        }

        let mean =
            f64::from(samples.iter().map(|&p| u32::from(p)).sum::<u32>()) / samples.len() as f64;
        assert_eq!(progress.completed() as usize, samples.len());
        assert!((f64::from(progress.success_rate()) - mean).abs() <= 1.0);
    }

    #[test]
    fn stays_in_range_at_the_boundaries() {
        let all_wrong = fold_all(&[0, 0, 0]);
        assert_eq!(all_wrong.success_rate(), 0);

        let all_right = fold_all(&[100, 100, 100]);
        assert_eq!(all_right.success_rate(), 100);
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        let progress = Progress::new().record(200);
        assert_eq!(progress.success_rate(), 100);
    }
}
