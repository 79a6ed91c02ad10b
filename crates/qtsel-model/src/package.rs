//! Raw and canonical package records.
//!
//! Upstream metadata is loosely typed: fields go missing, archive lists arrive
//! either as a joined string or as an array, and sizes live in several places.
//! [`RawPackageRecord`] accepts all of that without failing, and [`normalize`]
//! is the only place that interprets it.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A field that upstream sends either as one joined string or as a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    /// Comma or whitespace separated items.
    Joined(String),
    /// Items as a JSON array.
    List(Vec<String>),
}

impl StringOrList {
    /// Split into trimmed, non-empty items in their original order.
    #[must_use]
    pub fn items(&self) -> Vec<String> {
        match self {
            Self::Joined(text) => text
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
            Self::List(items) => items
                .iter()
                .map(|item| item.trim())
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Sizes nested under `UpdateFile` in some upstream documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawUpdateFile {
    #[serde(
        rename = "CompressedSize",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub compressed_size: Option<String>,
    #[serde(
        rename = "UncompressedSize",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub uncompressed_size: Option<String>,
}

/// A package record exactly as upstream sent it.
///
/// Every field is optional and a field of the wrong JSON type reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawPackageRecord {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub compressed_size: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub uncompressed_size: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub downloadable_archives: Option<StringOrList>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<StringOrList>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub auto_depend_on: Option<StringOrList>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub archive_sizes: Option<BTreeMap<String, String>>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub update_file: Option<RawUpdateFile>,
}

/// Deserialize a field, reading values of the wrong shape as `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// A normalized package record. Every field has a value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    pub display_name: String,
    /// Fully qualified dotted name, unique within one updates document.
    pub name: String,
    pub description: String,
    pub release_date: String,
    pub version: String,
    pub compressed_size: String,
    pub uncompressed_size: String,
    pub downloadable_archives: Vec<String>,
    pub dependencies: Vec<String>,
    pub auto_depend_on: Vec<String>,
    /// Archive base name (text before the first `-`) to raw size.
    pub archive_sizes: BTreeMap<String, String>,
}

impl PackageRecord {
    /// Whether the package ships at least one archive.
    #[must_use]
    pub fn has_archives(&self) -> bool {
        !self.downloadable_archives.is_empty()
    }

    /// The dotted name split into segments.
    pub fn name_segments(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.name.split('.')
    }

    /// The final two dotted segments, when the name has at least two.
    #[must_use]
    pub fn last_two_segments(&self) -> Option<(&str, &str)> {
        let mut rev = self.name_segments().rev();
        let last = rev.next()?;
        let second = rev.next()?;
        Some((second, last))
    }
}

/// Archive base name with the disambiguating suffix removed.
///
/// `qtbase-Windows-Windows_10-MSVC2019-Windows-Windows_10-X86_64.7z` becomes `qtbase`.
#[must_use]
pub fn archive_base_name(archive: &str) -> &str {
    archive.split('-').next().unwrap_or(archive)
}

/// Turn a raw record into its canonical form.
#[must_use]
pub fn normalize(raw: RawPackageRecord) -> PackageRecord {
    let update_file = raw.update_file.unwrap_or_default();
    let compressed_size = raw
        .compressed_size
        .or(update_file.compressed_size)
        .unwrap_or_default();
    let uncompressed_size = raw
        .uncompressed_size
        .or(update_file.uncompressed_size)
        .unwrap_or_default();
    let downloadable_archives = raw
        .downloadable_archives
        .map(|archives| archives.items())
        .unwrap_or_default();

    let archive_sizes = match raw.archive_sizes {
        Some(sizes) => sizes
            .into_iter()
            .map(|(archive, size)| (archive_base_name(archive.trim()).to_string(), size))
            .collect(),
        None => match downloadable_archives.as_slice() {
            [only] if !compressed_size.is_empty() => {
                BTreeMap::from([(archive_base_name(only).to_string(), compressed_size.clone())])
            }
            _ => BTreeMap::new(),
        },
    };

    PackageRecord {
        display_name: raw.display_name.unwrap_or_default(),
        name: raw.name.unwrap_or_default(),
        description: raw.description.unwrap_or_default(),
        release_date: raw.release_date.unwrap_or_default(),
        version: raw.version.unwrap_or_default(),
        compressed_size,
        uncompressed_size,
        downloadable_archives,
        dependencies: raw.dependencies.map(|d| d.items()).unwrap_or_default(),
        auto_depend_on: raw.auto_depend_on.map(|d| d.items()).unwrap_or_default(),
        archive_sizes,
    }
}

/// Normalize every record of an updates document.
///
/// Accepts an object keyed by package name or a plain array. A record without
/// a `Name` takes its object key. Output is ordered by name. Anything else
/// yields no records.
#[must_use]
pub fn normalize_updates(document: &Value) -> Vec<PackageRecord> {
    let mut records: Vec<PackageRecord> = match document {
        Value::Object(entries) => entries
            .iter()
            .map(|(key, value)| {
                let mut raw = raw_record(value);
                if raw.name.is_none() {
                    raw.name = Some(key.clone());
                }
                normalize(raw)
            })
            .collect(),
        Value::Array(entries) => entries.iter().map(|v| normalize(raw_record(v))).collect(),
        _ => Vec::new(),
    };
    records.sort_by(|a, b| a.name.cmp(&b.name));
    records
}

fn raw_record(value: &Value) -> RawPackageRecord {
    RawPackageRecord::deserialize(value).unwrap_or_default()
}
