//! Version selector with options grouped by `major.minor`.

use std::sync::Arc;

use qtsel_metadata::VersionGroups;
use qtsel_model::QtVersion;

use crate::load_state::LoadState;
use crate::selection::Selection;

/// Like [`SelectOne`](crate::SelectOne), but the options are stratified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSelector {
    selected: Selection<QtVersion>,
    groups: Arc<[Vec<QtVersion>]>,
}

impl Default for VersionSelector {
    fn default() -> Self {
        Self::inert(LoadState::NotLoaded)
    }
}

impl VersionSelector {
    /// Freshly loaded groups: `Loaded` when any exist, `NotLoaded` otherwise.
    #[must_use]
    pub fn loaded(groups: VersionGroups) -> Self {
        Self::from_shared(groups.into())
    }

    fn from_shared(groups: Arc<[Vec<QtVersion>]>) -> Self {
        let state = LoadState::loaded_if(!groups.is_empty());
        Self {
            selected: Selection::from_load_state(state),
            groups,
        }
    }

    /// An empty selector in a `Loading` or `NotLoaded` state.
    #[must_use]
    pub fn inert(state: LoadState) -> Self {
        Self {
            selected: Selection::from_load_state(state),
            groups: Arc::from(Vec::new()),
        }
    }

    /// The same groups with nothing selected.
    #[must_use]
    pub fn reloaded(&self) -> Self {
        Self::from_shared(Arc::clone(&self.groups))
    }

    #[must_use]
    pub fn selected(&self) -> &Selection<QtVersion> {
        &self.selected
    }

    #[must_use]
    pub fn value(&self) -> Option<&QtVersion> {
        self.selected.value()
    }

    #[must_use]
    pub fn state(&self) -> LoadState {
        self.selected.state()
    }

    #[must_use]
    pub fn groups(&self) -> &[Vec<QtVersion>] {
        &self.groups
    }

    /// Every version in display order.
    pub fn versions(&self) -> impl Iterator<Item = &QtVersion> {
        self.groups.iter().flatten()
    }

    #[must_use]
    pub fn contains(&self, version: &QtVersion) -> bool {
        self.versions().any(|candidate| candidate == version)
    }

    /// Choose `version`; `Selected` when it is in any group, `Loaded` otherwise.
    #[must_use]
    pub fn copy_with_option(&self, version: Option<QtVersion>) -> Self {
        debug_assert!(
            !self.groups.is_empty(),
            "copy_with_option on a version selector without versions"
        );
        let selected = match version {
            Some(version) if self.contains(&version) => Selection::from_value(Some(version)),
            _ => Selection::from_load_state(LoadState::Loaded),
        };
        Self {
            selected,
            groups: Arc::clone(&self.groups),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> QtVersion {
        s.parse().unwrap()
    }

    fn selector() -> VersionSelector {
        VersionSelector::loaded(vec![
            vec![v("6.1.0"), v("6.1.1"), v("6.1.2")],
            vec![v("6.2.0")],
        ])
    }

    #[test]
    fn test_membership_flattens_groups() {
        let selector = selector();
        assert!(selector.contains(&v("6.1.2")));
        assert!(selector.contains(&v("6.2.0")));
        assert!(!selector.contains(&v("6.3.0")));
        assert_eq!(selector.versions().count(), 4);
    }

    #[test]
    fn test_copy_with_option() {
        let chosen = selector().copy_with_option(Some(v("6.2.0")));
        assert_eq!(chosen.state(), LoadState::Selected);
        assert_eq!(chosen.value(), Some(&v("6.2.0")));

        let missing = selector().copy_with_option(Some(v("5.15.2")));
        assert_eq!(missing.state(), LoadState::Loaded);
        assert_eq!(missing.groups(), selector().groups());
    }

    #[test]
    fn test_loaded_state_depends_on_groups() {
        assert_eq!(selector().state(), LoadState::Loaded);
        assert_eq!(VersionSelector::loaded(Vec::new()).state(), LoadState::NotLoaded);
        assert_eq!(
            VersionSelector::inert(LoadState::Loading).state(),
            LoadState::Loading
        );
    }

    #[test]
    fn test_reloaded_clears_selection() {
        let chosen = selector().copy_with_option(Some(v("6.1.1")));
        assert_eq!(chosen.reloaded(), selector());
    }
}
