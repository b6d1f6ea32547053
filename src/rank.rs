//! Ordering, filtering and truncation of scored candidates.

use std::cmp::Ordering;

use crate::score::Query;

/// One candidate paired with its relevance score for the current call.
#[derive(Debug)]
pub struct ScoredMatch<'a> {
    pub path: &'a str,
    pub score: f64,
}

/// Byte-wise path order; a strict prefix sorts before its extensions.
pub fn alphabetic(a: &ScoredMatch<'_>, b: &ScoredMatch<'_>) -> Ordering {
    a.path.cmp(b.path)
}

/// Score descending, ties broken alphabetically.
pub fn by_score(a: &ScoredMatch<'_>, b: &ScoredMatch<'_>) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| alphabetic(a, b))
}

/// Order the score buffer, drop non-matches and truncate to `limit`.
///
/// Queries of `""` or `"."` are ordered purely alphabetically; all others
/// by descending score. With `sort` disabled the buffer keeps its
/// enumeration order and scores are used only for filtering. A `limit` of
/// 0 means unlimited.
pub fn rank(mut buffer: Vec<ScoredMatch<'_>>, query: &Query, sort: bool, limit: usize) -> Vec<String> {
    if sort {
        if query.sorts_alphabetically() {
            buffer.sort_unstable_by(alphabetic);
        } else {
            buffer.sort_unstable_by(by_score);
        }
    }

    let limit = if limit == 0 { buffer.len() } else { limit };
    let mut results = Vec::with_capacity(limit.min(buffer.len()));
    for entry in &buffer {
        if results.len() == limit {
            break;
        }
        if entry.score > 0.0 {
            results.push(entry.path.to_string());
        }
    }
    results
}
