//! Search list loading and the normalized search set

use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::StoreError;

/// Default search list file name, relative to the working directory.
pub const DEFAULT_SEARCH_FILE: &str = "search.txt";

/// Reads the newline-delimited list of codenames.
#[derive(Debug, Clone)]
pub struct SearchListLoader {
    path: PathBuf,
}

impl SearchListLoader {
    /// Loader backed by `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Search list location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the list, one entry per line, as written.
    ///
    /// Invalid UTF-8 is decoded with replacement characters. If the file does
    /// not exist it is created empty and an empty list is returned; any other
    /// read failure is an error.
    pub fn load(&self) -> Result<Vec<String>, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes)
                .lines()
                .map(str::to_string)
                .collect()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No search list at {}", self.path.display());
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.path)
                    .map_err(|source| StoreError::Io {
                        path: self.path.clone(),
                        source,
                    })?;
                info!("Created empty search list {}", self.path.display());
                Ok(Vec::new())
            }
            Err(source) => Err(StoreError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

/// Normalize a codename: trimmed and lower-cased.
pub fn normalize(line: &str) -> String {
    line.trim().to_lowercase()
}

/// Set of normalized codenames.
///
/// Duplicates collapse; the order of first appearance is kept for display.
#[derive(Debug, Clone, Default)]
pub struct SearchSet {
    ordered: Vec<String>,
    keys: HashSet<String>,
}

impl SearchSet {
    /// Build a set from raw search list lines. Lines that are blank after
    /// normalization are dropped.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for line in lines {
            let key = normalize(line.as_ref());
            if !key.is_empty() && set.keys.insert(key.clone()) {
                set.ordered.push(key);
            }
        }
        set
    }

    /// Exact membership test.
    pub fn contains(&self, name: &str) -> bool {
        self.keys.contains(name)
    }

    /// Membership test for a short name, lower-casing it first when
    /// `ignore_case` is set.
    pub fn matches(&self, short_name: &str, ignore_case: bool) -> bool {
        if ignore_case {
            self.contains(&short_name.to_lowercase())
        } else {
            self.contains(short_name)
        }
    }

    /// Number of distinct codenames
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Whether there is nothing to search for
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Codenames in order of first appearance
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }
}
