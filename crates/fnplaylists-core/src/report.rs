//! Report output, one line per processed candidate

use std::fmt;
use std::io::{self, Write};
use tracing::debug;

/// How a candidate resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A playlist export with a display name
    Found(String),
    /// A playlist export without a resolvable display name
    FoundNoDisplayName,
    /// No playlist export in the package
    NotAPlaylist,
}

/// Result for one candidate entry.
///
/// `source_name` is the export's object name for the two playlist outcomes
/// and the entry's file name without extension for [`Outcome::NotAPlaylist`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Name the report line starts with
    pub source_name: String,
    /// Resolution outcome
    pub outcome: Outcome,
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Outcome::Found(display_name) => write!(f, "{} --> {}", self.source_name, display_name),
            Outcome::FoundNoDisplayName => write!(
                f,
                "{} didn't have UIDisplayName property",
                self.source_name
            ),
            Outcome::NotAPlaylist => write!(f, "{} was not a playlist", self.source_name),
        }
    }
}

/// Receives results in processing order.
pub trait Reporter {
    /// Report the result for the entry at `entry_path`.
    fn emit(&mut self, entry_path: &str, result: &MatchResult) -> io::Result<()>;
}

/// Writes each result as a text line.
#[derive(Debug)]
pub struct LineReporter<W> {
    out: W,
}

impl<W: Write> LineReporter<W> {
    /// Report to `out`
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for LineReporter<W> {
    fn emit(&mut self, entry_path: &str, result: &MatchResult) -> io::Result<()> {
        debug!("{}: {:?}", entry_path, result.outcome);
        writeln!(self.out, "{result}")?;
        self.out.flush()
    }
}

/// Collects results in memory.
impl Reporter for Vec<MatchResult> {
    fn emit(&mut self, _entry_path: &str, result: &MatchResult) -> io::Result<()> {
        self.push(result.clone());
        Ok(())
    }
}
