//! Asset provider over a JSON dump of Fortnite's archives
//!
//! [`DumpProvider`] implements the provider traits of `fnplaylists-core`
//! over a directory tree laid out as below. The layout and its JSON shapes
//! are defined by this crate; no extraction tool writes them, and real
//! `.pak` archives are not read. A dump has to be prepared in this format:
//!
//! ```text
//! <install>/Content/Paks/<archive>/archive.json
//! <install>/Content/Paks/<archive>/**/<package>.json
//! <install>/Content/Localization/Game/<tag>/Game.json
//! ```
//!
//! Encrypted archives carry a key check (SHA-256 of the key bytes, see
//! [`key_check`]) in place of encrypted content. Only a key whose check
//! matches mounts them.

#![warn(missing_docs)]

pub mod archive;
pub mod locres;
pub mod package;
pub mod provider;

pub use archive::{Archive, ArchiveManifest, Encryption, ManifestError, key_check};
pub use package::parse_package;
pub use provider::{DumpEntry, DumpProvider};
