//! The matcher façade: one ranking request end to end.

use tracing::debug;

use crate::{
    error::Result,
    rank,
    score::Query,
    source::PathSource,
    stripe,
};

/// Construction-time configuration of a [`Matcher`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MatcherOptions {
    /// Show dot files regardless of what the abbreviation looks like.
    pub always_show_dot_files: bool,
    /// Hide dot files unconditionally; wins over `always_show_dot_files`.
    pub never_show_dot_files: bool,
}

/// Per-call options for [`Matcher::rank_for`].
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Match case-sensitively instead of ASCII case-folding.
    pub case_sensitive: bool,
    /// Maximum number of results; 0 means unlimited.
    pub limit: usize,
    /// Worker count for the scoring fan-out; 0 means one per available
    /// core. Small candidate sets always use a single worker.
    pub workers: usize,
    /// Sort results; when disabled, results keep enumeration order and
    /// scores are used only for filtering.
    pub sort: bool,
    /// Strip spaces from the abbreviation before matching.
    pub ignore_spaces: bool,
    /// Search for the best alignment instead of committing to the first.
    pub recurse: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            limit: 0,
            workers: 0,
            sort: true,
            ignore_spaces: false,
            recurse: true,
        }
    }
}

/// Fuzzy path matcher bound to a path source.
///
/// Constructed once, then serves any number of independent ranking calls;
/// nothing is retained between calls beyond the configuration.
pub struct Matcher<S> {
    source: S,
    options: MatcherOptions,
}

impl<S: PathSource> Matcher<S> {
    pub fn new(source: S, options: MatcherOptions) -> Self {
        Self { source, options }
    }

    /// Rank the source's current candidates against `abbrev`.
    ///
    /// Candidates are re-fetched from the path source on every call, scored
    /// in parallel, then ordered, filtered and truncated per `options`.
    /// Returns the matching paths, best first.
    pub fn rank_for(&mut self, abbrev: &str, options: &SearchOptions) -> Result<Vec<String>> {
        let query = Query::new(
            abbrev,
            options,
            self.options.always_show_dot_files,
            self.options.never_show_dot_files,
        );
        let workers = if options.workers == 0 {
            default_workers()
        } else {
            options.workers
        };

        let paths = self.source.paths()?;
        debug!(candidates = paths.len(), workers, "scoring candidates");

        let buffer = stripe::score_all(paths, &query, workers)?;
        let results = rank::rank(buffer, &query, options.sort, options.limit);
        debug!(matches = results.len(), "ranking complete");
        Ok(results)
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    fn matcher(paths: &[&str]) -> Matcher<Vec<String>> {
        Matcher::new(candidates(paths), MatcherOptions::default())
    }

    #[test]
    fn subsequence_matches_only() {
        let mut m = matcher(&["foo/bar.txt", "foo/baz.txt", "qux.txt"]);
        let results = m.rank_for("fb", &SearchOptions::default()).unwrap();
        assert_eq!(results, vec!["foo/bar.txt", "foo/baz.txt"]);
    }

    #[test]
    fn empty_abbreviation_lists_everything_alphabetically() {
        let mut m = matcher(&["qux.txt", "foo/baz.txt", "foo/bar.txt"]);
        let results = m.rank_for("", &SearchOptions::default()).unwrap();
        assert_eq!(results, vec!["foo/bar.txt", "foo/baz.txt", "qux.txt"]);
    }

    #[test]
    fn limit_returns_prefix_of_unbounded_ranking() {
        let mut m = matcher(&["foo/bar.txt", "foo/baz.txt", "qux.txt"]);
        let unbounded = m.rank_for("fb", &SearchOptions::default()).unwrap();

        let options = SearchOptions {
            limit: 1,
            ..SearchOptions::default()
        };
        let bounded = m.rank_for("fb", &options).unwrap();
        assert_eq!(bounded.len(), 1);
        assert_eq!(bounded[0], unbounded[0]);
    }

    #[test]
    fn dot_files_hidden_unless_forced() {
        let paths = &[".git/config", "src/main"];

        let mut hidden = matcher(paths);
        let results = hidden.rank_for("c", &SearchOptions::default()).unwrap();
        assert_eq!(results, vec!["src/main"]);

        let mut shown = Matcher::new(
            candidates(paths),
            MatcherOptions {
                always_show_dot_files: true,
                ..MatcherOptions::default()
            },
        );
        let results = shown.rank_for("c", &SearchOptions::default()).unwrap();
        assert!(results.contains(&".git/config".to_string()));
    }

    #[test]
    fn never_show_dot_files_wins() {
        let mut m = Matcher::new(
            candidates(&[".git/config", "src/main"]),
            MatcherOptions {
                always_show_dot_files: true,
                never_show_dot_files: true,
            },
        );
        let results = m.rank_for("c", &SearchOptions::default()).unwrap();
        assert_eq!(results, vec!["src/main"]);
    }

    #[test]
    fn output_is_invariant_across_worker_counts() {
        let paths: Vec<String> = (0..3000)
            .map(|i| format!("src/module{}/file{}.rs", i % 11, i))
            .collect();
        let mut m = Matcher::new(paths, MatcherOptions::default());

        let reference = m
            .rank_for(
                "sf",
                &SearchOptions {
                    workers: 1,
                    ..SearchOptions::default()
                },
            )
            .unwrap();
        for workers in [2, 4, 8] {
            let results = m
                .rank_for(
                    "sf",
                    &SearchOptions {
                        workers,
                        ..SearchOptions::default()
                    },
                )
                .unwrap();
            assert_eq!(results, reference, "worker count {workers} changed output");
        }
    }

    #[test]
    fn repeated_calls_are_deterministic() {
        let mut m = matcher(&["foo/bar.txt", "foo/baz.txt", "qux.txt"]);
        let first = m.rank_for("ft", &SearchOptions::default()).unwrap();
        for _ in 0..5 {
            assert_eq!(m.rank_for("ft", &SearchOptions::default()).unwrap(), first);
        }
    }

    #[test]
    fn sort_disabled_keeps_source_order() {
        let mut m = matcher(&["zebra.txt", "alpha.txt", "mango.txt"]);
        let options = SearchOptions {
            sort: false,
            ..SearchOptions::default()
        };
        let results = m.rank_for("a", &options).unwrap();
        assert_eq!(results, vec!["zebra.txt", "alpha.txt", "mango.txt"]);
    }

    #[test]
    fn case_sensitivity_is_per_call() {
        let mut m = matcher(&["README.md", "readme.txt"]);

        let insensitive = m.rank_for("readme", &SearchOptions::default()).unwrap();
        assert_eq!(insensitive.len(), 2);

        let options = SearchOptions {
            case_sensitive: true,
            ..SearchOptions::default()
        };
        let sensitive = m.rank_for("README", &options).unwrap();
        assert_eq!(sensitive, vec!["README.md"]);
    }

    #[test]
    fn fetches_candidates_once_per_call() {
        struct CountingSource {
            paths: Vec<String>,
            fetches: usize,
        }

        impl crate::source::PathSource for CountingSource {
            fn paths(&mut self) -> crate::error::Result<&[String]> {
                self.fetches += 1;
                // Grow by one candidate per fetch so staleness is visible.
                self.paths.push(format!("file{}.txt", self.fetches));
                Ok(&self.paths)
            }
        }

        let source = CountingSource {
            paths: Vec::new(),
            fetches: 0,
        };
        let mut m = Matcher::new(source, MatcherOptions::default());

        assert_eq!(
            m.rank_for("file", &SearchOptions::default()).unwrap(),
            vec!["file1.txt"]
        );
        // The second call must re-fetch and see the new candidate.
        assert_eq!(
            m.rank_for("file", &SearchOptions::default()).unwrap(),
            vec!["file1.txt", "file2.txt"]
        );
    }
}
