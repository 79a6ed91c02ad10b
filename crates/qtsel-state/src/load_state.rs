//! Loading lifecycle shared by every selector.

use std::fmt;

/// Where a selector is in its load/select lifecycle.
///
/// `NotLoaded` and `Loading` selectors are inert: their options are not valid
/// and nothing can be chosen. `Loaded` means options are ready but nothing is
/// chosen. `Selected` means a concrete, valid choice exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LoadState {
    #[default]
    NotLoaded,
    Loading,
    Loaded,
    Selected,
}

impl LoadState {
    /// `Loaded` when there is something to choose from, `NotLoaded` otherwise.
    #[must_use]
    pub const fn loaded_if(has_options: bool) -> Self {
        if has_options {
            Self::Loaded
        } else {
            Self::NotLoaded
        }
    }

    #[must_use]
    pub const fn has_selection(self) -> bool {
        matches!(self, Self::Selected)
    }

    #[must_use]
    pub const fn is_loading(self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Whether interaction with the selector should be disabled.
    #[must_use]
    pub const fn is_inert(self) -> bool {
        matches!(self, Self::NotLoaded | Self::Loading)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotLoaded => "not loaded",
            Self::Loading => "loading",
            Self::Loaded => "loaded",
            Self::Selected => "selected",
        }
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queries() {
        assert!(LoadState::Selected.has_selection());
        assert!(!LoadState::Loaded.has_selection());
        assert!(LoadState::Loading.is_loading());
        assert!(LoadState::Loading.is_inert());
        assert!(LoadState::NotLoaded.is_inert());
        assert!(!LoadState::Loaded.is_inert());
        assert_eq!(LoadState::loaded_if(false), LoadState::NotLoaded);
        assert_eq!(LoadState::loaded_if(true), LoadState::Loaded);
    }
}
