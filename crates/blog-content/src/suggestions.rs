//! Random "you might also like" picks.
//!
//! The selection is only as deterministic as the RNG handed in: production
//! callers pass an entropy-seeded generator and get a different pick on every
//! call, tests pass a seeded one.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::Article;

pub const DEFAULT_MAX_SUGGESTIONS: usize = 3;

/// Up to `max_results` published articles other than `exclude_id`, in random order.
pub fn random_suggestions<'a, R: Rng + ?Sized>(
    all_articles: &'a [Article],
    exclude_id: Option<&str>,
    max_results: usize,
    rng: &mut R,
) -> Vec<&'a Article> {
    let mut candidates: Vec<&Article> = all_articles
        .iter()
        .filter(|a| !a.draft && Some(a.id.as_str()) != exclude_id)
        .collect();
    candidates.shuffle(rng);
    candidates.truncate(max_results);
    candidates
}
