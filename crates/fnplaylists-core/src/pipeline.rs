//! Matching pipeline
//!
//! For every entry of the mounted index:
//!
//! 1. derive the short name of its index path (file name, extension removed)
//! 2. keep it as a candidate only if the short name is in the search set
//! 3. load the candidate's package and pick the first playlist export
//! 4. resolve that export's `UIDisplayName` against the localized text table
//! 5. report the outcome
//!
//! Candidates are processed in the provider's index order and each one is
//! reported on its own, even when several share a short name.

use std::path::Path;
use tracing::{debug, info, warn};

use crate::asset::{AssetPackage, EngineVersion, KeyGuid, LocalizedTextTable};
use crate::config::Configuration;
use crate::error::RunError;
use crate::provider::{AssetEntry, AssetProvider, MountProvider};
use crate::report::{MatchResult, Outcome, Reporter};
use crate::search::SearchSet;

/// Class name fragment identifying playlist exports (compared ignoring case).
pub const PLAYLIST_CLASS: &str = "FortPlaylistAthena";

/// Text property holding a playlist's display name.
pub const DISPLAY_NAME_PROPERTY: &str = "UIDisplayName";

/// Engine version the archive set is mounted for.
pub const TARGET_ENGINE_VERSION: EngineVersion = EngineVersion::Ue4_25;

/// Short name of a virtual path: the part after the last `/`, without the
/// part from the last `.` on.
///
/// ```
/// use fnplaylists_core::short_name;
///
/// assert_eq!(short_name("Athena/Playlists/Foo.uasset"), "Foo");
/// assert_eq!(short_name("Foo.uasset"), "Foo");
/// assert_eq!(short_name("Athena/Playlists/Foo"), "Foo");
/// ```
pub fn short_name(path: &str) -> &str {
    let file_name = path.rsplit_once('/').map_or(path, |(_, name)| name);
    file_name.rsplit_once('.').map_or(file_name, |(stem, _)| stem)
}

/// Whether an export class name marks a playlist.
pub fn is_playlist_class(class_name: &str) -> bool {
    class_name
        .to_ascii_lowercase()
        .contains(&PLAYLIST_CLASS.to_ascii_lowercase())
}

/// Classify a loaded package.
///
/// `entry_name` is reported when the package has no playlist export (or could
/// not be loaded at all).
pub fn classify(
    package: Option<&AssetPackage>,
    entry_name: &str,
    table: Option<&LocalizedTextTable>,
) -> MatchResult {
    let Some(export) = package.and_then(|p| p.find_export(is_playlist_class)) else {
        return MatchResult {
            source_name: entry_name.to_string(),
            outcome: Outcome::NotAPlaylist,
        };
    };

    let outcome = export
        .object()
        .get_text(DISPLAY_NAME_PROPERTY)
        .and_then(|text| text.resolve(table))
        .map_or(Outcome::FoundNoDisplayName, Outcome::Found);

    MatchResult {
        source_name: export.object_name().to_string(),
        outcome,
    }
}

/// Options changing how entries are matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
    /// Lower-case short names before the membership test
    pub ignore_case: bool,
}

/// Counters of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Archives mounted by the submitted key
    pub archives_mounted: usize,
    /// Whether a localized text table was available
    pub localized_text_loaded: bool,
    /// Entries whose short name was in the search set
    pub candidates: usize,
    /// Candidates reported with a display name
    pub found: usize,
    /// Candidates reported without a display name
    pub missing_display_name: usize,
    /// Candidates without a playlist export
    pub not_playlist: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: &Outcome) {
        self.candidates += 1;
        match outcome {
            Outcome::Found(_) => self.found += 1,
            Outcome::FoundNoDisplayName => self.missing_display_name += 1,
            Outcome::NotAPlaylist => self.not_playlist += 1,
        }
    }
}

/// A validated run over one configuration and search set.
#[derive(Debug, Clone)]
pub struct Pipeline<'a> {
    config: &'a Configuration,
    search: &'a SearchSet,
    options: MatchOptions,
}

impl<'a> Pipeline<'a> {
    /// Check the run preconditions: key length, install path, non-empty
    /// search set.
    pub fn new(config: &'a Configuration, search: &'a SearchSet) -> Result<Self, RunError> {
        config.validate()?;
        if search.is_empty() {
            return Err(RunError::EmptySearchList);
        }

        Ok(Self {
            config,
            search,
            options: MatchOptions::default(),
        })
    }

    /// Change the match options
    #[must_use]
    pub const fn with_options(mut self, options: MatchOptions) -> Self {
        self.options = options;
        self
    }

    /// Mount the archive set at the configured install path, then [`run`](Self::run).
    pub fn mount_and_run<P, R>(&self, reporter: &mut R) -> Result<RunSummary, RunError>
    where
        P: MountProvider,
        R: Reporter,
    {
        let install_path = Path::new(&self.config.install_path);
        info!(
            "Mounting {} for {}",
            install_path.display(),
            TARGET_ENGINE_VERSION
        );
        let mut provider = P::mount(install_path, TARGET_ENGINE_VERSION)?;
        self.run(&mut provider, reporter)
    }

    /// Submit the key, load localized text, then match and report every
    /// candidate of the provider's index.
    pub fn run<P, R>(&self, provider: &mut P, reporter: &mut R) -> Result<RunSummary, RunError>
    where
        P: AssetProvider,
        R: Reporter,
    {
        let mut summary = RunSummary::default();

        let mounted = provider.submit_key(KeyGuid::MAIN, self.config.aes_key.trim())?;
        if mounted == 0 {
            return Err(RunError::KeyRejected {
                key: self.config.aes_key.clone(),
            });
        }
        info!("Mounted {} pak files", mounted);
        summary.archives_mounted = mounted;

        let language = self.config.language;
        let table = provider.load_localized_text(language);
        if table.is_some() {
            info!("Loaded locres for language {}", language);
        } else {
            warn!("Failed to load locres for language {}", language);
        }
        summary.localized_text_loaded = table.is_some();

        for (index_path, entry) in provider.entries() {
            if !self
                .search
                .matches(short_name(index_path), self.options.ignore_case)
            {
                continue;
            }

            debug!("Candidate {}", entry.path());
            let package = provider.load_package(entry);
            let result = classify(
                package.as_ref(),
                entry.name_without_extension(),
                table.as_ref(),
            );
            summary.record(&result.outcome);
            reporter.emit(entry.path(), &result)?;
        }

        info!(
            "Processed {} candidates: {} found, {} without display name, {} not a playlist",
            summary.candidates, summary.found, summary.missing_display_name, summary.not_playlist
        );

        Ok(summary)
    }
}
