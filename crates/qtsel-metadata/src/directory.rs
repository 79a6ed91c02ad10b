//! Version and tool lists derived from a platform directory listing.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use qtsel_model::QtVersion;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Qt folder names such as `qt6_620` or `qt5_51212_wasm`.
static QT_FOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^qt\d_(\d+)").expect("Invalid Qt folder regex"));

/// Folder suffixes that never hold installable binaries.
const SKIPPED_SUFFIXES: [&str; 2] = ["_preview", "_src_doc_examples"];

const TOOL_PREFIX: &str = "tools_";

/// Folders published for one host and target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directory {
    /// Qt version folders, e.g. `qt6_620`.
    #[serde(default)]
    pub qt: Vec<String>,
    /// Tool folders, e.g. `tools_ifw`.
    #[serde(default)]
    pub tools: Vec<String>,
}

/// Versions grouped by `major.minor`, ascending within and across groups.
pub type VersionGroups = Vec<Vec<QtVersion>>;

/// Derive the stratified version list from the Qt folders of a listing.
#[must_use]
pub fn derive_versions(directory: &Directory) -> VersionGroups {
    let versions: BTreeSet<QtVersion> = directory
        .qt
        .iter()
        .map(|folder| folder.trim_end_matches('/'))
        .filter(|folder| !SKIPPED_SUFFIXES.iter().any(|s| folder.ends_with(s)))
        .filter_map(|folder| {
            let digits = QT_FOLDER.captures(folder)?.get(1)?.as_str();
            let version = QtVersion::from_compact_digits(digits);
            if version.is_none() {
                debug!(folder, "skipping folder without a usable version");
            }
            version
        })
        .collect();

    stratify(&versions.into_iter().collect::<Vec<_>>())
}

/// Group consecutive versions that share `major.minor`.
#[must_use]
pub fn stratify(sorted: &[QtVersion]) -> VersionGroups {
    sorted
        .chunk_by(|a, b| a.major_minor() == b.major_minor())
        .map(<[QtVersion]>::to_vec)
        .collect()
}

/// Derive the sorted tool names from the tool folders of a listing.
#[must_use]
pub fn derive_tools(directory: &Directory) -> Vec<String> {
    directory
        .tools
        .iter()
        .map(|folder| folder.trim_end_matches('/'))
        .filter(|folder| folder.starts_with(TOOL_PREFIX))
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> QtVersion {
        s.parse().unwrap()
    }

    fn listing(qt: &[&str], tools: &[&str]) -> Directory {
        Directory {
            qt: qt.iter().map(ToString::to_string).collect(),
            tools: tools.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn test_stratify() {
        let groups = stratify(&[v("6.1.0"), v("6.1.1"), v("6.1.2"), v("6.2.0")]);
        assert_eq!(
            groups,
            vec![vec![v("6.1.0"), v("6.1.1"), v("6.1.2")], vec![v("6.2.0")]]
        );
        assert!(stratify(&[]).is_empty());
    }

    #[test]
    fn test_derive_versions_sorts_and_dedups() {
        let directory = listing(
            &[
                "qt6_620/",
                "qt5_5152",
                "qt5_59",
                "qt6_620_wasm",
                "qt5_51212",
                "qt6_610",
                "qt6_611",
            ],
            &[],
        );
        assert_eq!(
            derive_versions(&directory),
            vec![
                vec![v("5.9.0")],
                vec![v("5.12.12")],
                vec![v("5.15.2")],
                vec![v("6.1.0"), v("6.1.1")],
                vec![v("6.2.0")],
            ]
        );
    }

    #[test]
    fn test_derive_versions_skips_preview_and_sources() {
        let directory = listing(
            &["qt6_620_preview", "qt5_5152_src_doc_examples", "qt6_630", "qt", "qt6_6"],
            &[],
        );
        assert_eq!(derive_versions(&directory), vec![vec![v("6.3.0")]]);
    }

    #[test]
    fn test_derive_tools() {
        let directory = listing(
            &[],
            &["tools_qtcreator/", "tools_ifw", "tools_ifw/", "sdktool", "tools_cmake"],
        );
        assert_eq!(
            derive_tools(&directory),
            vec!["tools_cmake", "tools_ifw", "tools_qtcreator"]
        );
    }

    #[test]
    fn test_directory_deserializes_with_missing_keys() {
        let directory: Directory = serde_json::from_str(r#"{"qt": ["qt6_620"]}"#).unwrap();
        assert_eq!(directory.qt, vec!["qt6_620"]);
        assert!(directory.tools.is_empty());
    }
}
