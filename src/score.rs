//! Per-candidate fuzzy scoring.
//!
//! A candidate matches when the abbreviation is a subsequence of it under
//! the active case rule. The score of a match is the best achievable sum of
//! per-character scores over all valid alignments, normalized so that a
//! fully consecutive match of the whole candidate scores exactly 1.0.

use crate::matcher::SearchOptions;

/// Character matched immediately after a path separator.
const PATHSEP_FACTOR: f64 = 0.9;
/// Character matched after `-`, `_`, space, a digit, or at a lower→upper
/// camel-case boundary.
const BOUNDARY_FACTOR: f64 = 0.8;
/// Character matched immediately after a dot.
const DOT_FACTOR: f64 = 0.7;
/// Plain gap between consecutive matched characters; scaled by 1/distance.
const GAP_FACTOR: f64 = 0.75;

/// Sentinel for memo slots that have not been computed yet.
const UNSET: f64 = f64::MAX;

/// A normalized abbreviation plus the flags resolved once per ranking call.
#[derive(Debug, Clone)]
pub struct Query {
    needle: Vec<u8>,
    case_sensitive: bool,
    recurse: bool,
    always_show_dot_files: bool,
    never_show_dot_files: bool,
}

impl Query {
    /// Build a query from a raw abbreviation.
    ///
    /// Spaces are stripped when `ignore_spaces` is requested, and the
    /// abbreviation is ASCII-downcased unless `case_sensitive` is. The
    /// dot-file flags come from the matcher's construction-time
    /// configuration; `never_show_dot_files` wins when both are set.
    pub fn new(
        abbrev: &str,
        options: &SearchOptions,
        always_show_dot_files: bool,
        never_show_dot_files: bool,
    ) -> Self {
        let mut needle: Vec<u8> = abbrev.bytes().collect();
        if options.ignore_spaces {
            needle.retain(|b| *b != b' ');
        }
        if !options.case_sensitive {
            needle.make_ascii_lowercase();
        }
        Self {
            needle,
            case_sensitive: options.case_sensitive,
            recurse: options.recurse,
            always_show_dot_files: always_show_dot_files && !never_show_dot_files,
            never_show_dot_files,
        }
    }

    /// Queries of `""` or `"."` rank candidates alphabetically, ignoring
    /// scores.
    pub(crate) fn sorts_alphabetically(&self) -> bool {
        self.needle.is_empty() || self.needle.as_slice() == b"."
    }
}

/// Score one candidate path against a query.
///
/// Returns a value in `[0.0, 1.0]` where 0 means "does not match" and
/// higher values mean tighter, better-anchored matches. Deterministic for
/// identical inputs.
pub fn score(path: &str, query: &Query) -> f64 {
    score_into(path, query, &mut Vec::new())
}

/// Same as [`score`], reusing a caller-provided memo buffer across calls.
pub(crate) fn score_into(path: &str, query: &Query, memo: &mut Vec<f64>) -> f64 {
    let haystack = path.as_bytes();
    let hidden = is_dot_file(haystack);

    if query.needle.is_empty() {
        // An empty abbreviation matches everything it is allowed to show.
        if hidden && (query.never_show_dot_files || !query.always_show_dot_files) {
            return 0.0;
        }
        return 1.0;
    }

    if haystack.len() < query.needle.len() {
        return 0.0;
    }

    memo.clear();
    memo.resize(haystack.len() * query.needle.len(), UNSET);

    let mut info = MatchInfo {
        haystack,
        needle: &query.needle,
        max_score_per_char: (1.0 / haystack.len() as f64 + 1.0 / query.needle.len() as f64) / 2.0,
        case_sensitive: query.case_sensitive,
        recurse: query.recurse,
        dot_match: false,
        memo,
    };
    let score = info.score_from(0, 0, 0);

    if hidden
        && (query.never_show_dot_files || (!query.always_show_dot_files && !info.dot_match))
    {
        return 0.0;
    }
    score
}

/// A candidate is dot-hidden when any of its path segments begins with `.`.
fn is_dot_file(haystack: &[u8]) -> bool {
    haystack
        .iter()
        .enumerate()
        .any(|(i, &b)| b == b'.' && (i == 0 || haystack[i - 1] == b'/'))
}

struct MatchInfo<'a> {
    haystack: &'a [u8],
    needle: &'a [u8],
    max_score_per_char: f64,
    case_sensitive: bool,
    recurse: bool,
    /// Whether any explored alignment matched a needle dot against a
    /// segment-leading dot in the haystack.
    dot_match: bool,
    memo: &'a mut Vec<f64>,
}

impl MatchInfo<'_> {
    /// Best score for matching `needle[needle_idx..]` against
    /// `haystack[haystack_start..]`, with the previous match at `last_idx`.
    ///
    /// Walks the needle greedily, taking the leftmost occurrence of each
    /// character; when recurse-mode is on, also tries skipping each
    /// accepted occurrence in case a later one yields a tighter alignment.
    /// Memoized on (needle_idx, haystack_start) so pathological inputs
    /// (e.g. long runs of one character) stay polynomial.
    fn score_from(&mut self, needle_idx: usize, haystack_start: usize, last_idx: usize) -> f64 {
        let slot = needle_idx * self.haystack.len() + haystack_start;
        if self.memo[slot] != UNSET {
            return self.memo[slot];
        }

        let mut total = 0.0;
        let mut best_via_skip = 0.0;
        let mut last = last_idx;
        let mut start = haystack_start;
        let mut matched_all = true;

        for i in needle_idx..self.needle.len() {
            let c = self.needle[i];
            // Stop scanning once there is no longer room for the rest of
            // the needle.
            let upper = self.haystack.len() - (self.needle.len() - i);
            let mut found = false;

            for j in start..=upper {
                let mut d = self.haystack[j];
                if c == b'.' && d == b'.' && (j == 0 || self.haystack[j - 1] == b'/') {
                    self.dot_match = true;
                }
                if !self.case_sensitive {
                    d = d.to_ascii_lowercase();
                }
                if c != d {
                    continue;
                }
                found = true;

                let mut char_score = self.max_score_per_char;
                let distance = j - last;
                if distance > 1 {
                    let prev = self.haystack[j - 1];
                    let factor = if prev == b'/' {
                        PATHSEP_FACTOR
                    } else if prev == b'-' || prev == b'_' || prev == b' ' || prev.is_ascii_digit()
                    {
                        BOUNDARY_FACTOR
                    } else if prev.is_ascii_lowercase() && self.haystack[j].is_ascii_uppercase() {
                        BOUNDARY_FACTOR
                    } else if prev == b'.' {
                        DOT_FACTOR
                    } else {
                        GAP_FACTOR / distance as f64
                    };
                    char_score *= factor;
                }

                // A later occurrence of this character may yield a better
                // overall alignment; try it before committing to this one.
                if self.recurse && j + 1 < self.haystack.len() {
                    let skipped = self.score_from(i, j + 1, last);
                    if total + skipped > best_via_skip {
                        best_via_skip = total + skipped;
                    }
                }

                total += char_score;
                last = j;
                start = j + 1;
                break;
            }

            if !found {
                matched_all = false;
                break;
            }
        }

        let result = if matched_all {
            total.max(best_via_skip)
        } else {
            best_via_skip
        };
        self.memo[slot] = result;
        result
    }
}
