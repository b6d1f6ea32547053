//! Filesystem-backed path source.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::debug;

use crate::{
    error::{Error, Result},
    source::PathSource,
};

/// Options controlling a filesystem scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Stop collecting after this many files; 0 means unlimited.
    pub max_files: usize,
    /// Maximum directory depth below the root.
    pub max_depth: usize,
    /// Descend into directories whose name starts with a dot.
    pub scan_dot_directories: bool,
    /// Glob patterns for paths that should never be listed.
    pub ignore: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            max_files: 30_000,
            max_depth: 15,
            scan_dot_directories: false,
            ignore: Vec::new(),
        }
    }
}

/// Recursively enumerates regular files under a root directory.
///
/// Paths are reported relative to the root, in sorted order. Dot files are
/// listed (whether they are shown is the matcher's concern), but dot
/// directories are not descended into unless configured. The listing is
/// cached until [`flush`](Scanner::flush).
#[derive(Debug)]
pub struct Scanner {
    root: PathBuf,
    options: ScanOptions,
    ignore: Option<GlobSet>,
    cached: Option<Vec<String>>,
}

impl Scanner {
    pub fn new(root: impl Into<PathBuf>, options: ScanOptions) -> Result<Self> {
        let ignore = if options.ignore.is_empty() {
            None
        } else {
            let mut builder = GlobSetBuilder::new();
            for pattern in &options.ignore {
                let glob = Glob::new(pattern).map_err(|e| {
                    Error::Config(format!("invalid ignore pattern '{pattern}': {e}"))
                })?;
                builder.add(glob);
            }
            let set = builder
                .build()
                .map_err(|e| Error::Config(format!("invalid ignore patterns: {e}")))?;
            Some(set)
        };

        Ok(Self {
            root: root.into(),
            options,
            ignore,
            cached: None,
        })
    }

    /// Drop the cached listing so the next ranking call rescans.
    pub fn flush(&mut self) {
        self.cached = None;
    }

    fn scan(&self) -> Result<Vec<String>> {
        let mut paths = Vec::new();
        self.walk_dir(&self.root, 0, &mut paths)?;
        paths.sort_unstable();
        debug!(root = %self.root.display(), files = paths.len(), "scan complete");
        Ok(paths)
    }

    fn walk_dir(&self, dir: &Path, depth: usize, paths: &mut Vec<String>) -> Result<()> {
        if depth > self.options.max_depth {
            return Ok(());
        }

        // Sort entries so the enumeration order is stable across platforms.
        let mut entries: Vec<_> =
            std::fs::read_dir(dir)?.collect::<std::io::Result<Vec<_>>>()?;
        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            if self.options.max_files != 0 && paths.len() >= self.options.max_files {
                return Ok(());
            }

            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                let name = entry.file_name();
                if !self.options.scan_dot_directories
                    && name.to_string_lossy().starts_with('.')
                {
                    continue;
                }
                self.walk_dir(&entry.path(), depth + 1, paths)?;
            } else if file_type.is_file() {
                let path = entry.path();
                let relative = path.strip_prefix(&self.root).unwrap_or(&path);
                if let Some(ignore) = &self.ignore
                    && ignore.is_match(relative)
                {
                    continue;
                }
                paths.push(relative.to_string_lossy().into_owned());
            }
            // Symlinks are skipped.
        }

        Ok(())
    }
}

impl PathSource for Scanner {
    fn paths(&mut self) -> Result<&[String]> {
        if self.cached.is_none() {
            self.cached = Some(self.scan()?);
        }
        Ok(self.cached.as_deref().unwrap_or(&[]))
    }
}
