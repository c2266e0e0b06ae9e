use chrono::{DateTime, Duration, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::item::{Item, ItemId};

const ANSWER_RATE: f64 = 0.8;
const COMMENT_RATE: f64 = 0.35;
const MAX_AGE_HOURS: i64 = 24 * 10;

pub fn generate_synthetic_candidates(count: usize, now: DateTime<Utc>, seed: u64) -> Vec<Item> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut items = Vec::new();

    for idx in 0..count {
        let mut question = Item::new(format!("synthetic_{}", idx), format!("synthetic question {}", idx));
        if rng.gen::<f64>() < ANSWER_RATE {
            let age = sample_age(&mut rng);
            question = question
                .answered_at(now - age)
                .with_likes(sample_likes(&mut rng));
        }

        let comments = sample_comments(&mut rng);
        for comment_idx in 0..comments {
            items.push(comment(&question.id, idx, comment_idx, now));
        }
        items.push(question);
    }

    items
}

fn comment(parent: &ItemId, idx: usize, comment_idx: usize, now: DateTime<Utc>) -> Item {
    Item::new(
        format!("synthetic_{}_comment_{}", idx, comment_idx),
        format!("comment {} on synthetic question {}", comment_idx, idx),
    )
    .comment_on(parent)
    .answered_at(now)
}

fn sample_age(rng: &mut StdRng) -> Duration {
    Duration::minutes(rng.gen_range(0..MAX_AGE_HOURS * 60))
}

fn sample_likes(rng: &mut StdRng) -> u64 {
    // long tail: most questions get a handful, a few get many
    let roll = rng.gen::<f64>();
    (roll.powi(4) * 200.0) as u64
}

fn sample_comments(rng: &mut StdRng) -> usize {
    let mut comments = 0;
    while comments < 5 && rng.gen::<f64>() < COMMENT_RATE {
        comments += 1;
    }
    comments
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn same_seed_same_batch() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let first = generate_synthetic_candidates(20, now, 42);
        let second = generate_synthetic_candidates(20, now, 42);

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.answered_at, b.answered_at);
            assert_eq!(a.likes_count, b.likes_count);
        }
    }

    #[test]
    fn zero_count_is_empty() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert!(generate_synthetic_candidates(0, now, 9).is_empty());
    }

    #[test]
    fn every_question_is_present_once() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let items = generate_synthetic_candidates(30, now, 1);
        let questions = items.iter().filter(|item| item.parent_id.is_none()).count();
        assert_eq!(questions, 30);
        assert!(items.iter().all(|item| item.answered_at.map_or(true, |at| at <= now)));
    }
}
