//! pathpick - a fast fuzzy path matcher for interactive file navigation.
//!
//! Given a collection of candidate paths and a short user-typed
//! abbreviation, pathpick scores every candidate, orders them best-first
//! and returns the top results. Scoring is fanned out across call-scoped
//! worker threads, and the result order is deterministic regardless of
//! worker count.
//!
//! # Quick start
//!
//! ```
//! use pathpick::{Matcher, MatcherOptions, SearchOptions};
//!
//! let paths = vec![
//!     "src/main.rs".to_string(),
//!     "src/matcher.rs".to_string(),
//!     "README.md".to_string(),
//! ];
//! let mut matcher = Matcher::new(paths, MatcherOptions::default());
//!
//! let results = matcher.rank_for("sma", &SearchOptions::default()).unwrap();
//! assert_eq!(results, vec!["src/main.rs", "src/matcher.rs"]);
//! ```
//!
//! Any type implementing [`PathSource`] can feed the matcher; [`Scanner`]
//! is a filesystem-backed implementation that enumerates files under a
//! root directory.

pub mod error;
pub mod matcher;
pub mod rank;
pub mod scan;
pub mod score;
pub mod source;
pub mod stripe;

pub use error::{Error, Result};
pub use matcher::{Matcher, MatcherOptions, SearchOptions};
pub use scan::{ScanOptions, Scanner};
pub use score::Query;
pub use source::PathSource;
