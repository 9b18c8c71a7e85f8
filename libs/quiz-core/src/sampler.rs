//! Stratified sampling of questions across difficulty tiers.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::{Difficulty, Question};

/// Draw `per_tier` questions from each difficulty tier using a fresh thread RNG.
///
/// Returns an empty vector when `per_tier` is zero or any tier holds fewer
/// than `per_tier` questions.
pub fn sample(pool: &[Question], per_tier: usize) -> Vec<Question> {
    sample_with_rng(pool, per_tier, &mut rand::thread_rng())
}

/// Same as [`sample`] with a caller-supplied RNG.
pub fn sample_with_rng<R: Rng + ?Sized>(
    pool: &[Question],
    per_tier: usize,
    rng: &mut R,
) -> Vec<Question> {
    if per_tier == 0 {
        return Vec::new();
    }

    let mut drawn = Vec::with_capacity(per_tier * 3);

    for tier in Difficulty::ALL {
        let mut bucket: Vec<&Question> = pool.iter().filter(|q| q.difficulty == tier).collect();
        if bucket.len() < per_tier {
            return Vec::new();
        }
        bucket.shuffle(rng);
        drawn.extend(bucket.into_iter().take(per_tier).cloned());
    }

    drawn.shuffle(rng);
    drawn
}

/// Count questions per tier as `(easy, medium, hard)`.
pub fn tier_counts(pool: &[Question]) -> (usize, usize, usize) {
    pool.iter().fold((0, 0, 0), |(e, m, h), q| match q.difficulty {
        Difficulty::Easy => (e + 1, m, h),
        Difficulty::Medium => (e, m + 1, h),
        Difficulty::Hard => (e, m, h + 1),
    })
}
