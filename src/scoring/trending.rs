use chrono::{DateTime, Utc};

use crate::config::Biases;

#[derive(Debug, Clone, Copy)]
pub struct TrendingScorer {
    likes_bias: f64,
    comments_bias: f64,
    time_bias: f64,
}

impl TrendingScorer {
    pub fn new(biases: &Biases) -> Self {
        Self {
            likes_bias: biases.likes_bias,
            comments_bias: biases.comments_bias,
            time_bias: biases.time_bias as f64,
        }
    }

    /// `(likes * lb + 1) * (comments * cb + 1) / (seconds + tb + 1)`
    pub fn score(&self, likes_count: u64, comments_count: u64, seconds_since_answered: u64) -> f64 {
        let likes = likes_count as f64 * self.likes_bias + 1.0;
        let comments = comments_count as f64 * self.comments_bias + 1.0;
        let age = seconds_since_answered as f64 + self.time_bias + 1.0;

        likes * comments / age
    }
}

pub fn seconds_since(answered_at: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    (now - answered_at).num_seconds().max(0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn biases(likes: f64, comments: f64, time: i64) -> Biases {
        Biases::new(likes, comments, time, 7).unwrap()
    }

    #[test]
    fn zero_engagement_gives_baseline() {
        let scorer = TrendingScorer::new(&biases(1.0, 1.0, 86_400));
        let score = scorer.score(0, 0, 0);
        assert!((score - 1.0 / 86_401.0).abs() < 1e-15);
    }

    #[test]
    fn zero_biases_still_score() {
        let scorer = TrendingScorer::new(&biases(0.0, 0.0, 0));
        assert!((scorer.score(1_000, 1_000, 0) - 1.0).abs() < 1e-12);
        assert!((scorer.score(0, 0, 9) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn score_is_positive_and_finite_for_random_inputs() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..2_000 {
            let scorer = TrendingScorer::new(&biases(
                rng.gen_range(0.0..50.0),
                rng.gen_range(0.0..50.0),
                rng.gen_range(0..1_000_000),
            ));
            let score = scorer.score(
                rng.gen_range(0..1_000_000),
                rng.gen_range(0..1_000_000),
                rng.gen_range(0..100_000_000),
            );
            assert!(score.is_finite());
            assert!(score > 0.0);
        }
    }

    #[test]
    fn score_is_monotonic_in_each_input() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2_000 {
            let scorer = TrendingScorer::new(&biases(
                rng.gen_range(0.0..10.0),
                rng.gen_range(0.0..10.0),
                rng.gen_range(0..200_000),
            ));
            let likes = rng.gen_range(0..10_000u64);
            let comments = rng.gen_range(0..10_000u64);
            let seconds = rng.gen_range(0..10_000_000u64);
            let bump = rng.gen_range(1..1_000u64);
            let base = scorer.score(likes, comments, seconds);

            assert!(scorer.score(likes + bump, comments, seconds) >= base);
            assert!(scorer.score(likes, comments + bump, seconds) >= base);
            assert!(scorer.score(likes, comments, seconds + bump) <= base);
        }
    }

    #[test]
    fn future_answers_count_as_just_answered() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(seconds_since(now + Duration::minutes(5), now), 0);
        assert_eq!(seconds_since(now - Duration::minutes(10), now), 600);
    }
}
