use crate::error::Result;

/// A provider of candidate paths for the matcher.
///
/// The matcher calls [`paths`](PathSource::paths) once per ranking call and
/// borrows the listing for the duration of that call. Implementations may
/// rescan lazily and cache between calls; that is their business, not the
/// matcher's.
pub trait PathSource {
    /// Return the current ordered candidate paths.
    fn paths(&mut self) -> Result<&[String]>;
}

/// An in-memory candidate list. Never fails.
impl PathSource for Vec<String> {
    fn paths(&mut self) -> Result<&[String]> {
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_source_returns_itself() {
        let mut source = vec!["a".to_string(), "b".to_string()];
        assert_eq!(source.paths().unwrap(), ["a", "b"]);
    }
}
