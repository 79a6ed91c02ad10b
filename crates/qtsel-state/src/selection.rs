//! Single-choice selectors.

use std::fmt;
use std::sync::Arc;

use crate::load_state::LoadState;

/// Text shown for a selector with nothing chosen.
pub const NO_SELECTION: &str = "---";

/// A chosen value together with its lifecycle state.
///
/// The "no selection" sentinel is `None`. Only `Selected` carries a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<T> {
    value: Option<T>,
    state: LoadState,
}

impl<T> Selection<T> {
    /// `Selected` for a concrete value, `Loaded` for the sentinel.
    #[must_use]
    pub fn from_value(value: Option<T>) -> Self {
        match value {
            Some(value) => Self {
                value: Some(value),
                state: LoadState::Selected,
            },
            None => Self::from_load_state(LoadState::Loaded),
        }
    }

    /// A selection holding the sentinel in the given state.
    #[must_use]
    pub fn from_load_state(state: LoadState) -> Self {
        debug_assert!(
            !state.has_selection(),
            "a Selected selection needs a value"
        );
        Self { value: None, state }
    }

    #[must_use]
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    #[must_use]
    pub fn state(&self) -> LoadState {
        self.state
    }

    #[must_use]
    pub fn has_selection(&self) -> bool {
        self.state.has_selection()
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => value.fmt(f),
            None => f.write_str(NO_SELECTION),
        }
    }
}

/// Choose one option from an ordered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOne<T> {
    selected: Selection<T>,
    options: Arc<[T]>,
    allow_empty: bool,
}

impl<T> Default for SelectOne<T> {
    fn default() -> Self {
        Self::inert(LoadState::NotLoaded)
    }
}

impl<T> SelectOne<T> {
    pub fn new(selected: Selection<T>, options: impl Into<Arc<[T]>>, allow_empty: bool) -> Self {
        Self {
            selected,
            options: options.into(),
            allow_empty,
        }
    }

    /// A selector with no options in a `Loading` or `NotLoaded` state.
    #[must_use]
    pub fn inert(state: LoadState) -> Self {
        Self::new(Selection::from_load_state(state), Vec::new(), true)
    }

    #[must_use]
    pub fn loading() -> Self {
        Self::inert(LoadState::Loading)
    }

    #[must_use]
    pub fn selected(&self) -> &Selection<T> {
        &self.selected
    }

    #[must_use]
    pub fn value(&self) -> Option<&T> {
        self.selected.value()
    }

    #[must_use]
    pub fn state(&self) -> LoadState {
        self.selected.state()
    }

    #[must_use]
    pub fn options(&self) -> &[T] {
        &self.options
    }

    /// The option list, shared with this selector.
    #[must_use]
    pub fn shared_options(&self) -> Arc<[T]> {
        Arc::clone(&self.options)
    }

    #[must_use]
    pub fn allow_empty(&self) -> bool {
        self.allow_empty
    }
}

impl<T: Clone + PartialEq> SelectOne<T> {
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.options.contains(value)
    }

    /// Choose `value`, keeping the options.
    ///
    /// The result is `Selected` when `value` is an option and `Loaded`
    /// otherwise, including for the sentinel. Calling this on a selector
    /// without options is a caller bug.
    #[must_use]
    pub fn copy_with_option(&self, value: Option<T>) -> Self {
        debug_assert!(
            !self.options.is_empty(),
            "copy_with_option on a selector without options"
        );
        let selected = match value {
            Some(value) if self.contains(&value) => Selection::from_value(Some(value)),
            _ => Selection::from_load_state(LoadState::Loaded),
        };
        Self {
            selected,
            options: Arc::clone(&self.options),
            allow_empty: self.allow_empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arches() -> SelectOne<String> {
        SelectOne::new(
            Selection::from_load_state(LoadState::Loaded),
            vec!["win64_mingw81".to_string(), "win64_msvc2019_64".to_string()],
            true,
        )
    }

    #[test]
    fn test_selection_constructors() {
        let chosen = Selection::from_value(Some("6.2.0"));
        assert_eq!(chosen.state(), LoadState::Selected);
        assert_eq!(chosen.value(), Some(&"6.2.0"));

        let sentinel: Selection<&str> = Selection::from_value(None);
        assert_eq!(sentinel.state(), LoadState::Loaded);
        assert_eq!(sentinel.to_string(), NO_SELECTION);

        let loading: Selection<&str> = Selection::from_load_state(LoadState::Loading);
        assert!(loading.value().is_none());
        assert!(!loading.has_selection());
    }

    #[test]
    fn test_copy_with_member_selects() {
        let next = arches().copy_with_option(Some("win64_mingw81".to_string()));
        assert_eq!(next.state(), LoadState::Selected);
        assert_eq!(next.value().map(String::as_str), Some("win64_mingw81"));
        assert_eq!(next.options().len(), 2);
        assert!(next.allow_empty());
    }

    #[test]
    fn test_copy_with_non_member_is_loaded() {
        let next = arches().copy_with_option(Some("android_armv7".to_string()));
        assert_eq!(next.state(), LoadState::Loaded);
        assert!(next.value().is_none());

        let next = arches().copy_with_option(None);
        assert_eq!(next.state(), LoadState::Loaded);
    }

    #[test]
    fn test_copy_shares_options() {
        let before = arches();
        let after = before.copy_with_option(None);
        assert!(Arc::ptr_eq(&before.shared_options(), &after.shared_options()));
    }

    #[test]
    fn test_default_is_inert() {
        let selector: SelectOne<String> = SelectOne::default();
        assert_eq!(selector.state(), LoadState::NotLoaded);
        assert!(selector.options().is_empty());
    }
}
