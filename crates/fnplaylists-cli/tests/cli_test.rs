//! Integration tests for the fnplaylists CLI

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use fnplaylists_dump::key_check;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn valid_key() -> String {
    format!("0x{}", "0123456789ABCDEF".repeat(4))
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).expect("Failed to write fixture file");
}

/// Working directory with a dumped install under `FortniteGame/`.
fn workspace() -> TempDir {
    let dir = TempDir::new().expect("Failed to create working directory");
    let install = dir.path().join("FortniteGame");

    let archive = install.join("Content/Paks/pakchunk10-WindowsClient");
    write(
        &archive.join("archive.json"),
        &format!(
            r#"{{"mountPoint": "../../../FortniteGame/Content/", "engineVersion": "GAME_UE4_25", "encryptionKeyGuid": "00000000000000000000000000000000", "keyCheck": "{}"}}"#,
            key_check(&valid_key()).unwrap()
        ),
    );
    write(
        &archive.join("Athena/Playlists/EPIC_Playlist_01.json"),
        r#"[{"Type": "FortPlaylistAthena", "Name": "Playlist_Epic_01", "Properties": {"UIDisplayName": {"Namespace": "", "Key": "EPIC_01", "SourceString": ""}}}]"#,
    );
    write(
        &archive.join("Athena/Playlists/Playlist_NoName.json"),
        r#"[{"Type": "FortPlaylistAthena", "Name": "Playlist_NoName", "Properties": {}}]"#,
    );
    write(
        &archive.join("Athena/Items/Glider_ID_001.json"),
        r#"[{"Type": "AthenaGliderItemDefinition", "Name": "Glider_ID_001"}]"#,
    );
    write(
        &install.join("Content/Localization/Game/en/Game.json"),
        r#"{"": {"EPIC_01": "Solo"}}"#,
    );

    write(
        &dir.path().join("config.json"),
        &format!(
            r#"{{"installPath": "{}", "aesKey": "{}", "language": "EN"}}"#,
            install.to_string_lossy().replace('\\', "\\\\"),
            valid_key()
        ),
    );
    dir
}

fn fnplaylists(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("fnplaylists").unwrap();
    cmd.current_dir(dir)
        .env_remove("FNPLAYLISTS_CONFIG")
        .env_remove("FNPLAYLISTS_SEARCH")
        .env("FNPLAYLISTS_LAUNCHER_MANIFEST", dir.join("LauncherInstalled.dat"));
    cmd
}

#[test]
fn test_help_command() {
    let mut cmd = Command::cargo_bin("fnplaylists").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("playlist codenames"))
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--search"))
        .stdout(predicate::str::contains("--ignore-case"))
        .stdout(predicate::str::contains("--log-level"));
}

#[test]
fn test_version_command() {
    let mut cmd = Command::cargo_bin("fnplaylists").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fnplaylists"));
}

#[test]
fn test_first_run_creates_settings() {
    let dir = TempDir::new().unwrap();

    fnplaylists(dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::starts_with(
            "Please enter a valid aes key in the config file",
        ));

    let written = fs::read_to_string(dir.path().join("config.json")).unwrap();
    assert!(written.contains("\"installPath\": \"\""));
    assert!(written.contains("\"language\": \"EN\""));
}

#[test]
fn test_empty_search_list() {
    let dir = workspace();

    fnplaylists(dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::starts_with("The search list is empty"));
    assert!(dir.path().join("search.txt").exists());
}

#[test]
fn test_reports_matches() {
    let dir = workspace();
    write(
        &dir.path().join("search.txt"),
        "epic_playlist_01\nPlaylist_NoName\n\nglider_id_001\nPlaylist_Missing\n",
    );

    fnplaylists(dir.path())
        .assert()
        .success()
        .stdout(
            "Glider_ID_001 was not a playlist\n\
             Playlist_Epic_01 --> Solo\n\
             Playlist_NoName didn't have UIDisplayName property\n",
        )
        .stderr(predicate::str::contains("Mounted 1 pak files"));
}

#[test]
fn test_rejected_key() {
    let dir = workspace();
    let other_key = format!("0x{}", "A".repeat(64));
    write(
        &dir.path().join("custom.json"),
        &fs::read_to_string(dir.path().join("config.json"))
            .unwrap()
            .replace(&valid_key(), &other_key),
    );
    write(&dir.path().join("search.txt"), "epic_playlist_01\n");

    fnplaylists(dir.path())
        .args(["--config", "custom.json"])
        .assert()
        .failure()
        .stdout(predicate::str::diff(format!(
            "The aes key '{other_key}' doesn't work with any pak file, please check it\n"
        )));
}

#[test]
fn test_search_list_from_env() {
    let dir = workspace();
    write(&dir.path().join("codenames.txt"), "EPIC_PLAYLIST_01\n");

    fnplaylists(dir.path())
        .env("FNPLAYLISTS_SEARCH", "codenames.txt")
        .args(["--log-level", "error"])
        .assert()
        .success()
        .stdout("Playlist_Epic_01 --> Solo\n");
}

#[test]
fn test_latin1_search_list_still_matches() {
    let dir = workspace();
    fs::write(
        dir.path().join("search.txt"),
        b"playlist_caf\xe9\nepic_playlist_01\n",
    )
    .unwrap();

    fnplaylists(dir.path())
        .assert()
        .success()
        .stdout("Playlist_Epic_01 --> Solo\n");
}
