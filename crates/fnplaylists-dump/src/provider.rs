//! Provider over an extracted archive dump

use fnplaylists_core::{
    AssetEntry, AssetPackage, AssetProvider, EngineVersion, KeyGuid, Language,
    LocalizedTextTable, MountProvider, ProviderError,
};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::archive::{self, Archive, Encryption, MANIFEST_FILE};
use crate::locres;
use crate::package::parse_package;

/// Extension of package dumps on disk.
const DUMP_EXTENSION: &str = "json";

/// Extension packages are indexed under.
const PACKAGE_EXTENSION: &str = "uasset";

/// A package of a mounted archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpEntry {
    path: String,
    file: PathBuf,
    archive: usize,
}

impl DumpEntry {
    /// Dump file backing the entry
    pub fn file(&self) -> &Path {
        &self.file
    }
}

impl AssetEntry for DumpEntry {
    fn path(&self) -> &str {
        &self.path
    }
}

/// Asset provider reading an extracted archive dump under an install
/// directory.
///
/// Archives are discovered at mount time. Unencrypted archives are indexed
/// right away, encrypted ones when a matching key is submitted. When two
/// archives hold the same path the one sorting later by directory name wins.
#[derive(Debug)]
pub struct DumpProvider {
    install_path: PathBuf,
    version: EngineVersion,
    archives: Vec<Archive>,
    mounted: Vec<bool>,
    entries: BTreeMap<String, DumpEntry>,
}

impl DumpProvider {
    /// Discovered archives, sorted by directory name
    pub fn archives(&self) -> &[Archive] {
        &self.archives
    }

    /// Number of archives currently mounted
    pub fn mounted_archives(&self) -> usize {
        self.mounted.iter().filter(|m| **m).count()
    }

    /// Engine version the dump was mounted for
    pub const fn version(&self) -> EngineVersion {
        self.version
    }

    /// Look up an entry by virtual path, ignoring case
    pub fn entry(&self, path: &str) -> Option<&DumpEntry> {
        self.entries.get(&path.to_lowercase())
    }

    fn discover(paks: &Path, version: EngineVersion) -> Result<Vec<Archive>, ProviderError> {
        let read_dir = fs::read_dir(paks).map_err(|source| ProviderError::Io {
            path: paks.to_path_buf(),
            source,
        })?;

        let mut dirs = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|source| ProviderError::Io {
                path: paks.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if path.is_dir() && path.join(MANIFEST_FILE).is_file() {
                dirs.push(path);
            } else {
                debug!("Skipping {} (no {})", path.display(), MANIFEST_FILE);
            }
        }
        dirs.sort();

        let mut archives = Vec::with_capacity(dirs.len());
        for dir in dirs {
            match Archive::open(&dir) {
                Ok(archive) => {
                    if !archive.supports(version) {
                        warn!(
                            "Archive {} targets {} instead of {}",
                            archive.name(),
                            archive.engine_version().unwrap_or_default(),
                            version
                        );
                    }
                    archives.push(archive);
                }
                Err(e) => warn!("Skipping archive {}: {}", dir.display(), e),
            }
        }

        Ok(archives)
    }

    /// Index every package dump of archive `index`.
    fn mount_archive(&mut self, index: usize) -> Result<usize, ProviderError> {
        let archive = &self.archives[index];
        let dir = archive.dir();
        let mut indexed = 0;

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|e| ProviderError::Io {
                path: e.path().unwrap_or(dir).to_path_buf(),
                source: io::Error::from(e),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let file = entry.path();
            if file.extension().and_then(|ext| ext.to_str()) != Some(DUMP_EXTENSION) {
                continue;
            }
            let Ok(relative) = file.strip_prefix(dir) else {
                continue;
            };
            if relative == Path::new(MANIFEST_FILE) {
                continue;
            }

            let path = virtual_path(archive.mount_point(), relative);
            let key = path.to_lowercase();
            if self
                .entries
                .get(&key)
                .is_some_and(|existing| existing.archive > index)
            {
                continue;
            }

            self.entries.insert(
                key,
                DumpEntry {
                    path,
                    file: file.to_path_buf(),
                    archive: index,
                },
            );
            indexed += 1;
        }

        debug!("Mounted archive {} with {} packages", archive.name(), indexed);
        self.mounted[index] = true;
        Ok(indexed)
    }
}

/// Virtual path of a package dump: mount point plus the `/`-joined relative
/// path, with the dump extension swapped for the package extension.
fn virtual_path(mount_point: &str, relative: &Path) -> String {
    let relative = relative.with_extension(PACKAGE_EXTENSION);
    let components: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    format!("{}{}", mount_point, components.join("/"))
}

impl MountProvider for DumpProvider {
    fn mount(install_path: &Path, version: EngineVersion) -> Result<Self, ProviderError> {
        if !install_path.is_dir() {
            return Err(ProviderError::InstallPathNotFound(
                install_path.to_path_buf(),
            ));
        }

        let paks = install_path.join("Content").join("Paks");
        let archives = if paks.is_dir() {
            Self::discover(&paks, version)?
        } else {
            warn!("No archive directory at {}", paks.display());
            Vec::new()
        };

        let mut provider = Self {
            install_path: install_path.to_path_buf(),
            version,
            mounted: vec![false; archives.len()],
            archives,
            entries: BTreeMap::new(),
        };

        for index in 0..provider.archives.len() {
            if provider.archives[index].encryption() == &Encryption::None {
                provider.mount_archive(index)?;
            }
        }

        info!(
            "Found {} archives, {} mounted without a key",
            provider.archives.len(),
            provider.mounted_archives()
        );
        Ok(provider)
    }
}

impl AssetProvider for DumpProvider {
    type Entry = DumpEntry;

    fn submit_key(&mut self, guid: KeyGuid, key: &str) -> Result<usize, ProviderError> {
        let Some(check) = archive::key_check(key) else {
            warn!("Key for {} is not valid hex", guid);
            return Ok(0);
        };

        let mut mounted = 0;
        for index in 0..self.archives.len() {
            if !self.mounted[index] && self.archives[index].accepts(guid, &check) {
                self.mount_archive(index)?;
                mounted += 1;
            }
        }

        debug!("Key for {} mounted {} archives", guid, mounted);
        Ok(mounted)
    }

    fn load_localized_text(&self, language: Language) -> Option<LocalizedTextTable> {
        locres::load_table(&self.install_path, language)
    }

    fn entries(&self) -> impl Iterator<Item = (&str, &Self::Entry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    fn load_package(&self, entry: &Self::Entry) -> Option<AssetPackage> {
        let content = match fs::read_to_string(&entry.file) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read {}: {}", entry.file.display(), e);
                return None;
            }
        };

        match parse_package(&content) {
            Ok(package) => Some(package),
            Err(e) => {
                warn!("Invalid package dump {}: {}", entry.file.display(), e);
                None
            }
        }
    }
}
