//! End-to-end pipeline runs against the in-memory provider.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use fnplaylists_core::{
    AssetEntry, AssetPackage, AssetProvider, Configuration, Export, KeyGuid, Language,
    LineReporter, LocalizedTextTable, MatchOptions, MatchResult, MemoryProvider, ObjectInstance,
    Outcome, Pipeline, PropertyValue, ProviderError, RunError, RunSummary, SearchSet, TextValue,
};
use pretty_assertions::assert_eq;

fn valid_key() -> String {
    format!("0x{}", "0123456789ABCDEF".repeat(4))
}

fn config() -> Configuration {
    Configuration {
        install_path: "/games/Fortnite/FortniteGame".to_string(),
        aes_key: valid_key(),
        language: Language::En,
    }
}

fn english() -> LocalizedTextTable {
    LocalizedTextTable::new(Language::En)
        .with_entry("Playlists", "EPIC_01_NAME", "Solo")
        .with_entry("Playlists", "DUOS_NAME", "Duos")
}

fn playlist(object_name: &'static str, class_name: &'static str, key: &'static str) -> AssetPackage {
    AssetPackage::new(vec![Export::new(object_name, class_name, move || {
        ObjectInstance::new().with_property(
            "UIDisplayName",
            PropertyValue::Text(TextValue::new("Playlists", key, "")),
        )
    })])
}

/// Run the pipeline and collect the report text.
fn run_report(
    config: &Configuration,
    search: &SearchSet,
    provider: &mut MemoryProvider,
    options: MatchOptions,
) -> Result<(String, RunSummary), RunError> {
    let mut reporter = LineReporter::new(Vec::new());
    let summary = Pipeline::new(config, search)?
        .with_options(options)
        .run(provider, &mut reporter)?;
    let out = String::from_utf8(reporter.into_inner()).expect("report is UTF-8");
    Ok((out, summary))
}

#[test]
fn test_playlist_resolves_to_display_name() {
    let config = config();
    let search = SearchSet::from_lines(["epic_playlist_01"]);
    let mut provider = MemoryProvider::new()
        .with_key(KeyGuid::MAIN, valid_key(), 4)
        .with_localized_text(english())
        .with_package("Athena/Playlists/EPIC_Playlist_01.uasset", || {
            playlist("Playlist_Epic_01", "FortPlaylistAthena", "EPIC_01_NAME")
        });

    let (out, summary) =
        run_report(&config, &search, &mut provider, MatchOptions::default()).unwrap();

    assert_eq!(out, "Playlist_Epic_01 --> Solo\n");
    assert_eq!(
        summary,
        RunSummary {
            archives_mounted: 4,
            localized_text_loaded: true,
            candidates: 1,
            found: 1,
            missing_display_name: 0,
            not_playlist: 0,
        }
    );
}

#[test]
fn test_non_playlist_reports_entry_name() {
    let config = config();
    let search = SearchSet::from_lines(["epic_playlist_01"]);
    let mut provider = MemoryProvider::new()
        .with_key(KeyGuid::MAIN, valid_key(), 1)
        .with_localized_text(english())
        .with_package("Athena/Playlists/EPIC_Playlist_01.uasset", || {
            playlist("Playlist_Epic_01", "AthenaGliderItemDefinition", "EPIC_01_NAME")
        });

    let (out, summary) =
        run_report(&config, &search, &mut provider, MatchOptions::default()).unwrap();

    assert_eq!(out, "EPIC_Playlist_01 was not a playlist\n");
    assert_eq!(summary.not_playlist, 1);
}

#[test]
fn test_rejected_key_aborts_before_reporting() {
    let config = config();
    let search = SearchSet::from_lines(["epic_playlist_01"]);
    let mut provider = MemoryProvider::new()
        .with_key(KeyGuid::MAIN, format!("0x{}", "F".repeat(64)), 1)
        .with_package("Athena/Playlists/EPIC_Playlist_01.uasset", || {
            playlist("Playlist_Epic_01", "FortPlaylistAthena", "EPIC_01_NAME")
        });

    let mut reporter: Vec<MatchResult> = Vec::new();
    let err = Pipeline::new(&config, &search)
        .unwrap()
        .run(&mut provider, &mut reporter)
        .unwrap_err();

    assert!(matches!(&err, RunError::KeyRejected { key } if *key == valid_key()));
    assert_eq!(
        err.to_string(),
        format!(
            "The aes key '{}' doesn't work with any pak file, please check it",
            valid_key()
        )
    );
    assert!(reporter.is_empty());
}

#[test]
fn test_key_is_trimmed_before_submission() {
    let mut config = config();
    config.aes_key = format!("  {}\n", valid_key());
    let search = SearchSet::from_lines(["epic_playlist_01"]);
    let mut provider = MemoryProvider::new()
        .with_key(KeyGuid::MAIN, valid_key(), 2)
        .with_localized_text(english())
        .with_package("Athena/Playlists/EPIC_Playlist_01.uasset", || {
            playlist("Playlist_Epic_01", "FortPlaylistAthena", "EPIC_01_NAME")
        });

    let (_, summary) =
        run_report(&config, &search, &mut provider, MatchOptions::default()).unwrap();
    assert_eq!(summary.archives_mounted, 2);
}

#[test]
fn test_missing_localized_text_degrades_every_candidate() {
    let config = config();
    let search = SearchSet::from_lines(["playlist_solo", "playlist_duos"]);
    let mut provider = MemoryProvider::new()
        .with_key(KeyGuid::MAIN, valid_key(), 1)
        .with_localized_text(LocalizedTextTable::new(Language::Fr))
        .with_package("Athena/Playlists/Playlist_Solo.uasset", || {
            playlist("Playlist_Solo", "FortPlaylistAthena", "EPIC_01_NAME")
        })
        .with_package("Athena/Playlists/Playlist_Duos.uasset", || {
            playlist("Playlist_Duos", "FortPlaylistAthena", "DUOS_NAME")
        });

    let (out, summary) =
        run_report(&config, &search, &mut provider, MatchOptions::default()).unwrap();

    assert_eq!(
        out,
        "Playlist_Duos didn't have UIDisplayName property\n\
         Playlist_Solo didn't have UIDisplayName property\n"
    );
    assert!(!summary.localized_text_loaded);
    assert_eq!(summary.missing_display_name, 2);
}

#[test]
fn test_shared_short_name_reported_per_entry() {
    let config = config();
    let search = SearchSet::from_lines(["playlist_duos"]);
    let mut provider = MemoryProvider::new()
        .with_key(KeyGuid::MAIN, valid_key(), 1)
        .with_localized_text(english())
        .with_package("Athena/Playlists/Playlist_Duos.uasset", || {
            playlist("Playlist_Duos", "FortPlaylistAthena", "DUOS_NAME")
        })
        .with_package("Creative/Playlists/Playlist_Duos.uasset", || {
            AssetPackage::new(Vec::new())
        })
        .with_entry("Athena/Playlists/Playlist_Duos.ubulk");

    let (out, summary) =
        run_report(&config, &search, &mut provider, MatchOptions::default()).unwrap();

    assert_eq!(
        out,
        "Playlist_Duos --> Duos\n\
         Playlist_Duos was not a playlist\n\
         Playlist_Duos was not a playlist\n"
    );
    assert_eq!(summary.candidates, 3);
    assert_eq!(summary.found, 1);
    assert_eq!(summary.not_playlist, 2);
}

#[test]
fn test_non_candidates_are_skipped_silently() {
    let config = config();
    let search = SearchSet::from_lines(["playlist_solo"]);
    let mut provider = MemoryProvider::new()
        .with_key(KeyGuid::MAIN, valid_key(), 1)
        .with_localized_text(english())
        .with_entry("Athena/Items/Glider_ID_001.uasset")
        .with_entry("Athena/Playlists/Playlist_Squads.uasset");

    let (out, summary) =
        run_report(&config, &search, &mut provider, MatchOptions::default()).unwrap();

    assert_eq!(out, "");
    assert_eq!(summary.candidates, 0);
}

#[test]
fn test_missing_display_property() {
    let config = config();
    let search = SearchSet::from_lines(["playlist_solo"]);
    let mut provider = MemoryProvider::new()
        .with_key(KeyGuid::MAIN, valid_key(), 1)
        .with_localized_text(english())
        .with_package("Athena/Playlists/Playlist_Solo.uasset", || {
            AssetPackage::new(vec![Export::with_object(
                "Playlist_Solo",
                "FortPlaylistAthena",
                ObjectInstance::new().with_property("MaxPlayers", PropertyValue::Int(100)),
            )])
        });

    let (out, _) = run_report(&config, &search, &mut provider, MatchOptions::default()).unwrap();
    assert_eq!(out, "Playlist_Solo didn't have UIDisplayName property\n");
}

#[test]
fn test_source_string_fallback() {
    let config = config();
    let search = SearchSet::from_lines(["playlist_ltm"]);
    let mut provider = MemoryProvider::new()
        .with_key(KeyGuid::MAIN, valid_key(), 1)
        .with_localized_text(english())
        .with_package("Athena/Playlists/Playlist_LTM.uasset", || {
            AssetPackage::new(vec![Export::with_object(
                "Playlist_LTM",
                "FortPlaylistAthena",
                ObjectInstance::new().with_property(
                    "UIDisplayName",
                    PropertyValue::Text(TextValue::new("Playlists", "UNKNOWN", "Food Fight")),
                ),
            )])
        });

    let (out, _) = run_report(&config, &search, &mut provider, MatchOptions::default()).unwrap();
    assert_eq!(out, "Playlist_LTM --> Food Fight\n");
}

#[test]
fn test_preconditions_are_checked_in_order() {
    let search = SearchSet::from_lines(["playlist_solo"]);
    let empty = SearchSet::from_lines(["", "  "]);

    let mut short_key = config();
    short_key.aes_key = format!("0x{}", "A".repeat(63));
    short_key.install_path = String::new();
    assert!(matches!(
        Pipeline::new(&short_key, &empty),
        Err(RunError::InvalidKeyLength {
            expected: 66,
            actual: 65
        })
    ));

    let mut no_path = config();
    no_path.install_path = String::new();
    assert!(matches!(
        Pipeline::new(&no_path, &empty),
        Err(RunError::MissingInstallPath)
    ));

    assert!(matches!(
        Pipeline::new(&config(), &empty),
        Err(RunError::EmptySearchList)
    ));
    assert!(Pipeline::new(&config(), &search).is_ok());
}

/// Provider whose index keeps the original path case.
struct CaseKeepingProvider {
    entries: Vec<PathEntry>,
}

struct PathEntry(String);

impl AssetEntry for PathEntry {
    fn path(&self) -> &str {
        &self.0
    }
}

impl AssetProvider for CaseKeepingProvider {
    type Entry = PathEntry;

    fn submit_key(&mut self, _guid: KeyGuid, _key: &str) -> Result<usize, ProviderError> {
        Ok(1)
    }

    fn load_localized_text(&self, _language: Language) -> Option<LocalizedTextTable> {
        Some(english())
    }

    fn entries(&self) -> impl Iterator<Item = (&str, &Self::Entry)> {
        self.entries.iter().map(|entry| (entry.path(), entry))
    }

    fn load_package(&self, entry: &Self::Entry) -> Option<AssetPackage> {
        entry
            .path()
            .ends_with("EPIC_Playlist_01.uasset")
            .then(|| playlist("Playlist_Epic_01", "FortPlaylistAthena", "EPIC_01_NAME"))
    }
}

#[test]
fn test_ignore_case_option() {
    let config = config();
    let search = SearchSet::from_lines(["epic_playlist_01", "playlist_solo"]);
    let mut provider = CaseKeepingProvider {
        entries: vec![
            PathEntry("Athena/Playlists/EPIC_Playlist_01.uasset".to_string()),
            PathEntry("Athena/Playlists/playlist_solo.uasset".to_string()),
        ],
    };

    let mut reporter = LineReporter::new(Vec::new());
    Pipeline::new(&config, &search)
        .unwrap()
        .run(&mut provider, &mut reporter)
        .unwrap();
    assert_eq!(
        String::from_utf8(reporter.into_inner()).unwrap(),
        "playlist_solo was not a playlist\n"
    );

    let mut reporter = LineReporter::new(Vec::new());
    Pipeline::new(&config, &search)
        .unwrap()
        .with_options(MatchOptions { ignore_case: true })
        .run(&mut provider, &mut reporter)
        .unwrap();
    assert_eq!(
        String::from_utf8(reporter.into_inner()).unwrap(),
        "Playlist_Epic_01 --> Solo\nplaylist_solo was not a playlist\n"
    );
}

#[test]
fn test_results_carry_outcomes() {
    let config = config();
    let search = SearchSet::from_lines(["playlist_solo"]);
    let mut provider = MemoryProvider::new()
        .with_key(KeyGuid::MAIN, valid_key(), 1)
        .with_localized_text(english())
        .with_package("Athena/Playlists/Playlist_Solo.uasset", || {
            playlist("Playlist_Solo", "FortPlaylistAthena", "EPIC_01_NAME")
        });

    let mut results: Vec<MatchResult> = Vec::new();
    Pipeline::new(&config, &search)
        .unwrap()
        .run(&mut provider, &mut results)
        .unwrap();

    assert_eq!(
        results,
        vec![MatchResult {
            source_name: "Playlist_Solo".to_string(),
            outcome: Outcome::Found("Solo".to_string()),
        }]
    );
}
