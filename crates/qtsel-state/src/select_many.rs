//! Multi-choice selectors.

use std::collections::BTreeMap;
use std::sync::Arc;

use qtsel_model::PackageRecord;

use crate::load_state::LoadState;

/// One candidate in a multi-choice selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectableElement {
    name: String,
    package: Option<Arc<PackageRecord>>,
    size: Option<String>,
    selected: bool,
}

impl SelectableElement {
    /// An element backed by a package record, keyed by the package name.
    #[must_use]
    pub fn from_package(package: Arc<PackageRecord>, selected: bool) -> Self {
        Self {
            name: package.name.clone(),
            package: Some(package),
            size: None,
            selected,
        }
    }

    /// An archive entry with only a raw size.
    #[must_use]
    pub fn from_archive(name: impl Into<String>, size: impl Into<String>, selected: bool) -> Self {
        Self {
            name: name.into(),
            package: None,
            size: Some(size.into()),
            selected,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn package(&self) -> Option<&PackageRecord> {
        self.package.as_deref()
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Raw size in bytes as upstream reports it.
    ///
    /// Package-backed elements derive it from the package's archive sizes: the
    /// single entry when there is one, else the sum of the numeric entries.
    #[must_use]
    pub fn size(&self) -> Option<String> {
        let Some(package) = &self.package else {
            return self.size.clone();
        };
        let mut sizes = package.archive_sizes.values();
        match (sizes.next(), sizes.next()) {
            (None, _) => None,
            (Some(only), None) => Some(only.clone()),
            _ => {
                let total: u64 = package
                    .archive_sizes
                    .values()
                    .filter_map(|size| size.trim().parse::<u64>().ok())
                    .sum();
                Some(total.to_string())
            }
        }
    }

    #[must_use]
    pub fn with_selected(&self, selected: bool) -> Self {
        Self {
            selected,
            ..self.clone()
        }
    }
}

/// Name-ordered elements of a multi-choice selector.
pub type ElementMap = BTreeMap<String, SelectableElement>;

/// Choose any subset of named options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectMany {
    state: LoadState,
    options: Arc<ElementMap>,
}

impl SelectMany {
    pub fn new(state: LoadState, options: ElementMap) -> Self {
        Self {
            state,
            options: Arc::new(options),
        }
    }

    #[must_use]
    pub fn loading() -> Self {
        Self::new(LoadState::Loading, ElementMap::new())
    }

    /// Package-backed options, every one turned `on` or off. State is `Loaded`.
    #[must_use]
    pub fn from_packages(packages: Vec<PackageRecord>, on: bool) -> Self {
        let options = packages
            .into_iter()
            .map(|package| {
                let element = SelectableElement::from_package(Arc::new(package), on);
                (element.name.clone(), element)
            })
            .collect();
        Self::new(LoadState::Loaded, options)
    }

    /// Archive options from an archive-to-size map. State is `Loaded`.
    #[must_use]
    pub fn from_archives(archives: BTreeMap<String, String>, on: bool) -> Self {
        let options = archives
            .into_iter()
            .map(|(name, size)| {
                let element = SelectableElement::from_archive(name.clone(), size, on);
                (name, element)
            })
            .collect();
        Self::new(LoadState::Loaded, options)
    }

    #[must_use]
    pub fn state(&self) -> LoadState {
        self.state
    }

    #[must_use]
    pub fn options(&self) -> &ElementMap {
        &self.options
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SelectableElement> {
        self.options.get(name)
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// True when there is at least one option and every option is on.
    #[must_use]
    pub fn has_all_on(&self) -> bool {
        !self.options.is_empty() && self.options.values().all(SelectableElement::is_selected)
    }

    #[must_use]
    pub fn has_all_off(&self) -> bool {
        !self.has_selections()
    }

    #[must_use]
    pub fn has_selections(&self) -> bool {
        self.options.values().any(SelectableElement::is_selected)
    }

    /// Names of the options that are on, in name order.
    #[must_use]
    pub fn options_turned_on(&self) -> Vec<&str> {
        self.turned_on().map(SelectableElement::name).collect()
    }

    /// The options that are on, in name order.
    pub fn turned_on(&self) -> impl Iterator<Item = &SelectableElement> {
        self.options.values().filter(|element| element.selected)
    }

    /// Turn one existing option on or off. The result is `Selected`.
    #[must_use]
    pub fn copy_with_option_set(&self, name: &str, on: bool) -> Self {
        debug_assert!(
            self.options.contains_key(name),
            "unknown option {name:?}"
        );
        let mut options = ElementMap::clone(&self.options);
        if let Some(element) = options.get_mut(name) {
            element.selected = on;
        }
        Self::new(LoadState::Selected, options)
    }

    /// Turn every option on or off. The result is `Loaded`.
    #[must_use]
    pub fn copy_with_all_options(&self, on: bool) -> Self {
        let options = self
            .options
            .iter()
            .map(|(name, element)| (name.clone(), element.with_selected(on)))
            .collect();
        Self::new(LoadState::Loaded, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn archives() -> SelectMany {
        SelectMany::from_archives(
            BTreeMap::from([
                ("qtbase".to_string(), "38014223".to_string()),
                ("qtsvg".to_string(), "345123".to_string()),
            ]),
            true,
        )
    }

    fn package(name: &str, sizes: &[(&str, &str)]) -> PackageRecord {
        PackageRecord {
            name: name.to_string(),
            downloadable_archives: sizes.iter().map(|(a, _)| format!("{a}.7z")).collect(),
            archive_sizes: sizes
                .iter()
                .map(|(a, s)| (a.to_string(), s.to_string()))
                .collect(),
            ..PackageRecord::default()
        }
    }

    #[test]
    fn test_queries_on_fresh_archives() {
        let archives = archives();
        assert_eq!(archives.state(), LoadState::Loaded);
        assert!(archives.has_all_on());
        assert!(archives.has_selections());
        assert!(!archives.has_all_off());
        assert_eq!(archives.options_turned_on(), vec!["qtbase", "qtsvg"]);
    }

    #[test]
    fn test_empty_is_never_all_on() {
        let empty = SelectMany::default();
        assert!(!empty.has_all_on());
        assert!(empty.has_all_off());
        assert!(empty.is_empty());
    }

    #[test]
    fn test_copy_with_option_set() {
        let next = archives().copy_with_option_set("qtsvg", false);
        assert_eq!(next.state(), LoadState::Selected);
        assert_eq!(next.options_turned_on(), vec!["qtbase"]);
        assert!(!next.has_all_on());
        assert!(archives().has_all_on());
    }

    #[test]
    fn test_copy_with_all_options() {
        let next = archives()
            .copy_with_option_set("qtsvg", false)
            .copy_with_all_options(false);
        assert_eq!(next.state(), LoadState::Loaded);
        assert!(next.has_all_off());
        let next = next.copy_with_all_options(true);
        assert!(next.has_all_on());
    }

    #[test]
    fn test_package_elements_keyed_by_name() {
        let modules = SelectMany::from_packages(
            vec![
                package("qt.qt6.620.addons.qtcharts.win64_mingw81", &[("qtcharts", "100")]),
                package("qt.qt6.620.addons.qtpositioning.win64_mingw81", &[]),
            ],
            false,
        );
        assert!(modules.has_all_off());
        let charts = modules
            .get("qt.qt6.620.addons.qtcharts.win64_mingw81")
            .unwrap();
        assert_eq!(
            charts.package().map(|p| p.name.as_str()),
            Some("qt.qt6.620.addons.qtcharts.win64_mingw81")
        );
    }

    #[test]
    fn test_element_size() {
        let single = SelectableElement::from_package(
            Arc::new(package("a", &[("qtcharts", "100")])),
            false,
        );
        assert_eq!(single.size().as_deref(), Some("100"));

        let several = SelectableElement::from_package(
            Arc::new(package("b", &[("qtlocation", "200"), ("qtpositioning", "50")])),
            false,
        );
        assert_eq!(several.size().as_deref(), Some("250"));

        let none = SelectableElement::from_package(Arc::new(package("c", &[])), false);
        assert_eq!(none.size(), None);

        let archive = SelectableElement::from_archive("qtbase", "38014223", true);
        assert_eq!(archive.size().as_deref(), Some("38014223"));
    }
}
