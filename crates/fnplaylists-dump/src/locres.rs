//! Localized text dumps
//!
//! `Content/Localization/Game/<tag>/Game.json` holds the game's text table
//! for one language as `{ "<namespace>": { "<key>": "<string>" } }`.

use fnplaylists_core::{Language, LocalizedTextTable};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Location of the localized text dump for `language` under `install_path`.
pub fn table_path(install_path: &Path, language: Language) -> PathBuf {
    install_path
        .join("Content")
        .join("Localization")
        .join("Game")
        .join(language.tag())
        .join("Game.json")
}

/// Parse a localized text dump.
pub fn parse_table(
    content: &str,
    language: Language,
) -> Result<LocalizedTextTable, serde_json::Error> {
    let namespaces: HashMap<String, HashMap<String, String>> = serde_json::from_str(content)?;

    let mut table = LocalizedTextTable::new(language);
    for (namespace, entries) in namespaces {
        for (key, value) in entries {
            table.insert(namespace.clone(), key, value);
        }
    }
    Ok(table)
}

/// Load the localized text table for `language`, if the dump has a valid one.
pub fn load_table(install_path: &Path, language: Language) -> Option<LocalizedTextTable> {
    let path = table_path(install_path, language);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            debug!("No localized text at {}: {}", path.display(), e);
            return None;
        }
    };

    match parse_table(&content, language) {
        Ok(table) => {
            debug!("Loaded {} localized strings from {}", table.len(), path.display());
            Some(table)
        }
        Err(e) => {
            warn!("Invalid localized text dump {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_table_path_uses_language_tag() {
        let path = table_path(Path::new("FortniteGame"), Language::PtBr);
        assert!(path.ends_with("Content/Localization/Game/pt-BR/Game.json"));
    }

    #[test]
    fn test_parse_table() {
        let table = parse_table(
            r#"{"": {"SOLO": "Solo"}, "Playlists": {"DUOS": "Duos", "SQUADS": "Squads"}}"#,
            Language::En,
        )
        .unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.get("", "SOLO"), Some("Solo"));
        assert_eq!(table.get("Playlists", "SQUADS"), Some("Squads"));
        assert_eq!(table.get("Playlists", "SOLO"), None);
    }

    #[test]
    fn test_load_table() {
        let dir = TempDir::new().unwrap();
        assert!(load_table(dir.path(), Language::De).is_none());

        let path = table_path(dir.path(), Language::De);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"Playlists": {"SOLO": "Solo"}}"#).unwrap();
        let table = load_table(dir.path(), Language::De).unwrap();
        assert_eq!(table.language(), Language::De);
        assert_eq!(table.get("Playlists", "SOLO"), Some("Solo"));

        fs::write(&path, r#"{"Playlists": ["SOLO"]}"#).unwrap();
        assert!(load_table(dir.path(), Language::De).is_none());
    }
}
