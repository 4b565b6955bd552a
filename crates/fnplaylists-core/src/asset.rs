//! Asset model handed out by an asset provider
//!
//! Packages, their exports and the property bags behind them are produced by
//! the provider for each request. The pipeline only borrows them to classify
//! an export and read its display name.

use std::cell::LazyCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::language::Language;

/// Engine version the archive set is mounted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineVersion {
    /// Unreal Engine 4.24 game builds
    Ue4_24,
    /// Unreal Engine 4.25 game builds
    Ue4_25,
    /// Unreal Engine 4.26 game builds
    Ue4_26,
    /// Unreal Engine 4.27 game builds
    Ue4_27,
}

impl EngineVersion {
    /// Version tag as written in archive metadata.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Ue4_24 => "GAME_UE4_24",
            Self::Ue4_25 => "GAME_UE4_25",
            Self::Ue4_26 => "GAME_UE4_26",
            Self::Ue4_27 => "GAME_UE4_27",
        }
    }
}

impl fmt::Display for EngineVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for EngineVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GAME_UE4_24" => Ok(Self::Ue4_24),
            "GAME_UE4_25" => Ok(Self::Ue4_25),
            "GAME_UE4_26" => Ok(Self::Ue4_26),
            "GAME_UE4_27" => Ok(Self::Ue4_27),
            other => Err(format!("unknown engine version tag: {other}")),
        }
    }
}

/// Identity of an archive encryption key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyGuid([u8; 16]);

impl KeyGuid {
    /// The main key identity, used by every archive not encrypted with a
    /// dedicated key.
    pub const MAIN: Self = Self([0; 16]);

    /// Create a GUID from raw bytes
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Raw bytes
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl fmt::Display for KeyGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_upper(self.0))
    }
}

impl FromStr for KeyGuid {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s.trim()).map_err(|e| format!("invalid key guid hex: {e}"))?;
        let bytes: [u8; 16] = bytes
            .try_into()
            .map_err(|b: Vec<u8>| format!("key guid must be 16 bytes, got {}", b.len()))?;
        Ok(Self(bytes))
    }
}

/// Table of localized strings for one language, keyed by namespace and key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedTextTable {
    language: Language,
    namespaces: HashMap<String, HashMap<String, String>>,
}

impl LocalizedTextTable {
    /// Create an empty table
    pub fn new(language: Language) -> Self {
        Self {
            language,
            namespaces: HashMap::new(),
        }
    }

    /// Builder-style insert
    #[must_use]
    pub fn with_entry(
        mut self,
        namespace: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.insert(namespace, key, value);
        self
    }

    /// Add or replace a localized string
    pub fn insert(
        &mut self,
        namespace: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.namespaces
            .entry(namespace.into())
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Look up a localized string.
    pub fn get(&self, namespace: &str, key: &str) -> Option<&str> {
        self.namespaces
            .get(namespace)
            .and_then(|entries| entries.get(key))
            .map(String::as_str)
    }

    /// Language of the table
    pub const fn language(&self) -> Language {
        self.language
    }

    /// Number of strings across all namespaces
    pub fn len(&self) -> usize {
        self.namespaces.values().map(HashMap::len).sum()
    }

    /// Whether the table holds no strings
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A localizable text value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextValue {
    /// Localization namespace
    pub namespace: String,
    /// Localization key within the namespace
    pub key: String,
    /// Text as authored, used when the table has no entry
    pub source_string: String,
}

impl TextValue {
    /// Create a text value
    pub fn new(
        namespace: impl Into<String>,
        key: impl Into<String>,
        source_string: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            key: key.into(),
            source_string: source_string.into(),
        }
    }

    /// Resolve the text against a localized text table.
    ///
    /// Without a table nothing resolves. With one, the table's entry wins and
    /// the source string is the fallback. An empty result resolves to `None`.
    pub fn resolve(&self, table: Option<&LocalizedTextTable>) -> Option<String> {
        let table = table?;
        let resolved = table
            .get(&self.namespace, &self.key)
            .unwrap_or(self.source_string.as_str());
        (!resolved.is_empty()).then(|| resolved.to_string())
    }
}

/// A typed property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Localizable text
    Text(TextValue),
    /// Plain string or name
    Str(String),
    /// Boolean
    Bool(bool),
    /// Integer of any width
    Int(i64),
    /// Floating point
    Float(f64),
    /// Array of values
    Array(Vec<PropertyValue>),
    /// Nested struct
    Struct(ObjectInstance),
}

/// Property bag of a resolved export object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectInstance {
    properties: BTreeMap<String, PropertyValue>,
}

impl ObjectInstance {
    /// Create an empty object
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.insert(name, value);
        self
    }

    /// Add or replace a property
    pub fn insert(&mut self, name: impl Into<String>, value: PropertyValue) {
        self.properties.insert(name.into(), value);
    }

    /// Look up a property by name
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// Look up a text-typed property. Properties of other types yield `None`.
    pub fn get_text(&self, name: &str) -> Option<&TextValue> {
        match self.get(name)? {
            PropertyValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Number of properties
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Whether the object has no properties
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Iterate over properties in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }
}

type ObjectResolver = Box<dyn FnOnce() -> ObjectInstance>;

/// One export record of a package.
///
/// The backing object is resolved the first time [`Export::object`] is called.
pub struct Export {
    object_name: String,
    class_name: String,
    object: LazyCell<ObjectInstance, ObjectResolver>,
}

impl Export {
    /// Create an export whose object is produced by `resolve` on first access.
    pub fn new(
        object_name: impl Into<String>,
        class_name: impl Into<String>,
        resolve: impl FnOnce() -> ObjectInstance + 'static,
    ) -> Self {
        Self {
            object_name: object_name.into(),
            class_name: class_name.into(),
            object: LazyCell::new(Box::new(resolve)),
        }
    }

    /// Create an export around an already resolved object
    pub fn with_object(
        object_name: impl Into<String>,
        class_name: impl Into<String>,
        object: ObjectInstance,
    ) -> Self {
        Self::new(object_name, class_name, move || object)
    }

    /// Object name of the export
    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    /// Class name of the export
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Resolve the backing object.
    pub fn object(&self) -> &ObjectInstance {
        LazyCell::force(&self.object)
    }
}

impl fmt::Debug for Export {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Export")
            .field("object_name", &self.object_name)
            .field("class_name", &self.class_name)
            .finish_non_exhaustive()
    }
}

/// A loaded package: its exports in package order.
#[derive(Debug, Default)]
pub struct AssetPackage {
    exports: Vec<Export>,
}

impl AssetPackage {
    /// Create a package from its exports
    pub fn new(exports: Vec<Export>) -> Self {
        Self { exports }
    }

    /// Exports in package order
    pub fn exports(&self) -> &[Export] {
        &self.exports
    }

    /// First export whose class name satisfies `predicate`.
    pub fn find_export(&self, predicate: impl Fn(&str) -> bool) -> Option<&Export> {
        self.exports.iter().find(|e| predicate(e.class_name()))
    }
}
