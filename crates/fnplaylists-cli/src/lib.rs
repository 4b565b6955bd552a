//! Playlist lookup command
//!
//! This library provides the run logic of the `fnplaylists` binary so it can
//! be driven with any output writer.

use clap::Args;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use fnplaylists_core::{
    ConfigStore, DEFAULT_CONFIG_FILE, DEFAULT_SEARCH_FILE, LineReporter, MatchOptions, Pipeline,
    RunSummary, SearchListLoader, SearchSet,
};
use fnplaylists_dump::DumpProvider;

/// Files and matching options of a run.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Settings file, written with defaults when missing or invalid
    #[arg(short, long, env = "FNPLAYLISTS_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Search list with one playlist codename per line
    #[arg(short, long, env = "FNPLAYLISTS_SEARCH", default_value = DEFAULT_SEARCH_FILE)]
    pub search: PathBuf,

    /// Launcher manifest used to detect the install directory
    #[arg(long, env = "FNPLAYLISTS_LAUNCHER_MANIFEST")]
    pub launcher_manifest: Option<PathBuf>,

    /// Match codenames regardless of the case of asset file names
    #[arg(long)]
    pub ignore_case: bool,
}

/// Load the settings and search list, then report every matching playlist
/// to `out`.
pub fn run<W: Write>(args: &RunArgs, out: W) -> anyhow::Result<RunSummary> {
    let mut store = ConfigStore::new(args.config.clone());
    if let Some(manifest) = &args.launcher_manifest {
        store = store.with_launcher_manifest(Some(manifest.clone()));
    }
    let config = store.load();
    config.validate()?;

    let lines = SearchListLoader::new(args.search.clone()).load()?;
    let search = SearchSet::from_lines(&lines);

    let pipeline = Pipeline::new(&config, &search)?.with_options(MatchOptions {
        ignore_case: args.ignore_case,
    });
    info!("Searching for {} playlists", search.len());

    let mut reporter = LineReporter::new(out);
    let summary = pipeline.mount_and_run::<DumpProvider, _>(&mut reporter)?;
    Ok(summary)
}
