//! Package export dumps
//!
//! A package dump is a JSON array with one object per export:
//!
//! ```json
//! [
//!   {
//!     "Type": "FortPlaylistAthena",
//!     "Name": "Playlist_DefaultSolo",
//!     "Properties": {
//!       "UIDisplayName": {
//!         "Namespace": "",
//!         "Key": "2A8E3A3B4C7BC3A3D8E9B0A4D9B0B2E5",
//!         "SourceString": "Solo"
//!       },
//!       "MaxPlayers": 100
//!     }
//!   }
//! ]
//! ```
//!
//! Only the export headers are decoded up front. `Properties` stays raw JSON
//! until the export's object is first resolved.

use fnplaylists_core::{AssetPackage, Export, ObjectInstance, PropertyValue, TextValue};
use serde::Deserialize;
use serde_json::value::RawValue;
use serde_json::{Map, Value};
use tracing::warn;

#[derive(Debug, Deserialize)]
struct RawExport {
    #[serde(rename = "Type")]
    class_name: String,
    #[serde(rename = "Name")]
    object_name: String,
    #[serde(rename = "Properties", default)]
    properties: Option<Box<RawValue>>,
}

/// Parse a package dump.
pub fn parse_package(content: &str) -> Result<AssetPackage, serde_json::Error> {
    let raw: Vec<RawExport> = serde_json::from_str(content)?;

    let exports = raw
        .into_iter()
        .map(|export| {
            let name = export.object_name.clone();
            let properties = export.properties;
            Export::new(export.object_name, export.class_name, move || {
                properties.map_or_else(ObjectInstance::new, |raw| resolve_object(&name, &raw))
            })
        })
        .collect();

    Ok(AssetPackage::new(exports))
}

fn resolve_object(export_name: &str, raw: &RawValue) -> ObjectInstance {
    match serde_json::from_str::<Map<String, Value>>(raw.get()) {
        Ok(properties) => object_from_map(properties),
        Err(e) => {
            warn!("Invalid properties of export {}: {}", export_name, e);
            ObjectInstance::new()
        }
    }
}

fn object_from_map(properties: Map<String, Value>) -> ObjectInstance {
    let mut object = ObjectInstance::new();
    for (name, value) in properties {
        if let Some(value) = property_value(value) {
            object.insert(name, value);
        }
    }
    object
}

/// Convert a dumped property value. `null` has no property representation.
fn property_value(value: Value) -> Option<PropertyValue> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(PropertyValue::Bool(b)),
        Value::Number(n) => Some(
            n.as_i64()
                .map(PropertyValue::Int)
                .unwrap_or_else(|| PropertyValue::Float(n.as_f64().unwrap_or(f64::NAN))),
        ),
        Value::String(s) => Some(PropertyValue::Str(s)),
        Value::Array(items) => Some(PropertyValue::Array(
            items.into_iter().filter_map(property_value).collect(),
        )),
        Value::Object(map) if map.contains_key("SourceString") => {
            Some(PropertyValue::Text(text_value(&map)))
        }
        Value::Object(map) => Some(PropertyValue::Struct(object_from_map(map))),
    }
}

fn text_value(map: &Map<String, Value>) -> TextValue {
    let field = |name: &str| {
        map.get(name)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    TextValue::new(field("Namespace"), field("Key"), field("SourceString"))
}
