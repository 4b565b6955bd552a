//! Playlist display name lookup for Fortnite game data
//!
//! This crate holds everything between the settings file and the report:
//! the settings and search list stores, the asset model handed out by an
//! archive provider and the matching pipeline that turns playlist codenames
//! into display names.
//!
//! # Components
//!
//! - **Settings**: [`ConfigStore`] and [`Configuration`], with launcher based
//!   install detection
//! - **Search list**: [`SearchListLoader`] and the normalized [`SearchSet`]
//! - **Providers**: the [`AssetProvider`] and [`MountProvider`] traits and an
//!   in-memory [`MemoryProvider`]
//! - **Pipeline**: [`Pipeline`] and the [`Reporter`] it writes results to
//!
//! # Example
//!
//! ```
//! use fnplaylists_core::{
//!     AssetPackage, Configuration, Export, KeyGuid, Language, LineReporter,
//!     LocalizedTextTable, MemoryProvider, ObjectInstance, Pipeline, PropertyValue, SearchSet,
//!     TextValue,
//! };
//!
//! let key = format!("0x{}", "AB".repeat(32));
//! let config = Configuration {
//!     install_path: "FortniteGame".to_string(),
//!     aes_key: key.clone(),
//!     language: Language::En,
//! };
//! let search = SearchSet::from_lines(["Playlist_DefaultSolo"]);
//!
//! let mut provider = MemoryProvider::new()
//!     .with_key(KeyGuid::MAIN, key, 1)
//!     .with_localized_text(LocalizedTextTable::new(Language::En).with_entry("", "SOLO", "Solo"))
//!     .with_package("Game/Athena/Playlist_DefaultSolo.uasset", || {
//!         AssetPackage::new(vec![Export::with_object(
//!             "Playlist_DefaultSolo",
//!             "FortPlaylistAthena",
//!             ObjectInstance::new().with_property(
//!                 "UIDisplayName",
//!                 PropertyValue::Text(TextValue::new("", "SOLO", "")),
//!             ),
//!         )])
//!     });
//!
//! let mut reporter = LineReporter::new(Vec::new());
//! let summary = Pipeline::new(&config, &search)
//!     .unwrap()
//!     .run(&mut provider, &mut reporter)
//!     .unwrap();
//!
//! assert_eq!(summary.found, 1);
//! assert_eq!(reporter.into_inner(), b"Playlist_DefaultSolo --> Solo\n");
//! ```

#![warn(missing_docs)]

pub mod asset;
pub mod config;
pub mod error;
pub mod language;
pub mod launcher;
pub mod memory;
pub mod pipeline;
pub mod provider;
pub mod report;
pub mod search;

pub use error::{ProviderError, RunError, StoreError};

// Re-export commonly used types
pub use asset::{
    AssetPackage, EngineVersion, Export, KeyGuid, LocalizedTextTable, ObjectInstance,
    PropertyValue, TextValue,
};
pub use config::{AES_KEY_LENGTH, ConfigStore, Configuration, DEFAULT_CONFIG_FILE};
pub use language::Language;
pub use memory::{MemoryEntry, MemoryProvider};
pub use pipeline::{
    DISPLAY_NAME_PROPERTY, MatchOptions, PLAYLIST_CLASS, Pipeline, RunSummary,
    TARGET_ENGINE_VERSION, classify, is_playlist_class, short_name,
};
pub use provider::{AssetEntry, AssetProvider, MountProvider};
pub use report::{LineReporter, MatchResult, Outcome, Reporter};
pub use search::{DEFAULT_SEARCH_FILE, SearchListLoader, SearchSet};
