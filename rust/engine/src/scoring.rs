use serde::{Deserialize, Serialize};

/// Constants of the scoring formula.
///
/// `score = max(0, base_points - tries * try_penalty - elapsed_secs / seconds_per_point)`
/// where `base_points` grows by `points_per_match` for every matched pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRules {
    /// Added to base points for every matched pair
    pub points_per_match: u32,
    /// Subtracted once per completed pair of flips, matched or not
    pub try_penalty: u32,
    /// Seconds of play that cost one point; `0` disables the time penalty
    pub seconds_per_point: u64,
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self {
            points_per_match: 10,
            try_penalty: 2,
            seconds_per_point: 2,
        }
    }
}

impl ScoreRules {
    /// Computes the live score, clamped at zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilematch_engine::scoring::ScoreRules;
    ///
    /// let rules = ScoreRules::default();
    /// // two matches, three tries, seven seconds: 20 - 6 - 3
    /// assert_eq!(rules.score(20, 3, 7), 11);
    /// // penalties never push the score below zero
    /// assert_eq!(rules.score(0, 5, 100), 0);
    /// ```
    pub fn score(&self, base_points: u32, tries: u32, elapsed_secs: u64) -> u32 {
        let time_penalty = elapsed_secs
            .checked_div(self.seconds_per_point)
            .unwrap_or(0);
        let penalty = u64::from(tries)
            .saturating_mul(u64::from(self.try_penalty))
            .saturating_add(time_penalty);
        let score = u64::from(base_points).saturating_sub(penalty);
        // score <= base_points, so this never truncates
        u32::try_from(score).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_penalty_uses_whole_two_second_steps() {
        let rules = ScoreRules::default();
        assert_eq!(rules.score(10, 0, 0), 10);
        assert_eq!(rules.score(10, 0, 1), 10);
        assert_eq!(rules.score(10, 0, 2), 9);
        assert_eq!(rules.score(10, 0, 3), 9);
    }

    #[test]
    fn zero_seconds_per_point_disables_time_penalty() {
        let rules = ScoreRules {
            seconds_per_point: 0,
            ..ScoreRules::default()
        };
        assert_eq!(rules.score(10, 1, 10_000), 8);
    }

    #[test]
    fn large_penalties_saturate_at_zero() {
        let rules = ScoreRules::default();
        assert_eq!(rules.score(10, u32::MAX, u64::MAX), 0);
    }

    #[test]
    fn one_second_per_point_with_huge_elapsed_time() {
        let rules = ScoreRules {
            seconds_per_point: 1,
            ..ScoreRules::default()
        };
        assert_eq!(rules.score(0, 1, u64::MAX), 0);
        assert_eq!(rules.score(u32::MAX, u32::MAX, u64::MAX), 0);
    }
}
