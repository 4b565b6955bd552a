//! Install directory detection through the Epic Games Launcher manifest
//!
//! The launcher keeps a JSON manifest (`LauncherInstalled.dat`) listing every
//! installed application. The game's install directory is looked up there
//! when the settings file has to be generated.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Application name of the game in the launcher manifest.
pub const FORTNITE_APP_NAME: &str = "Fortnite";

/// Subdirectory of the install location holding the packaged game data.
pub const GAME_SUBDIRECTORY: &str = "FortniteGame";

/// Manifest file name, relative to the launcher data directory.
pub const MANIFEST_FILE: &str = "LauncherInstalled.dat";

/// Parsed launcher manifest.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LauncherInstalled {
    /// Installed applications
    pub installation_list: Vec<InstallItem>,
}

/// One installed application.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstallItem {
    /// Install directory
    pub install_location: String,
    /// Launcher application name
    pub app_name: String,
    /// Installed version
    pub app_version: String,
}

impl LauncherInstalled {
    /// Parse manifest contents.
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// First installed application called `app_name`.
    pub fn find(&self, app_name: &str) -> Option<&InstallItem> {
        self.installation_list
            .iter()
            .find(|item| item.app_name == app_name)
    }
}

/// Platform location of the launcher manifest, if the platform has one.
pub fn default_manifest_path() -> Option<PathBuf> {
    let launcher_dir = if cfg!(windows) {
        std::env::var_os("PROGRAMDATA").map(PathBuf::from)
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
    } else {
        None
    }?;

    Some(
        launcher_dir
            .join("Epic")
            .join("UnrealEngineLauncher")
            .join(MANIFEST_FILE),
    )
}

/// Detect the game's install directory from the launcher manifest.
///
/// Returns `None` and logs why when the manifest is missing, unreadable or
/// invalid, or when the game is not listed.
pub fn detect_install_path(manifest: Option<&Path>) -> Option<String> {
    let Some(manifest) = manifest.filter(|path| path.is_file()) else {
        warn!("Failed to find Epic Games Launcher Installation");
        return None;
    };

    let content = match std::fs::read_to_string(manifest) {
        Ok(content) => content,
        Err(e) => {
            warn!(
                "Failed to read launcher manifest {}: {}",
                manifest.display(),
                e
            );
            return None;
        }
    };

    let installed = match LauncherInstalled::parse(&content) {
        Ok(installed) => installed,
        Err(e) => {
            warn!("Invalid launcher installation: {}", e);
            return None;
        }
    };

    if let Some(game) = installed.find(FORTNITE_APP_NAME) {
        info!(
            "Fortnite Installation detected: {} (version {})",
            game.install_location, game.app_version
        );
        Some(
            Path::new(&game.install_location)
                .join(GAME_SUBDIRECTORY)
                .to_string_lossy()
                .into_owned(),
        )
    } else {
        warn!("Fortnite is not installed");
        None
    }
}
