//! How complete a selection is, from a renderer's point of view.

use qtsel_state::CompositeState;

/// Shown when the version is chosen but the architecture is not.
pub const SELECT_ARCHITECTURE: &str = "Please select an architecture.";

/// The four renderer outcomes, checked in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// Neither a version nor any tool variant is chosen.
    NothingSelected,
    /// Tool variants are chosen but no architecture is.
    ToolsOnly,
    /// A version is chosen but no architecture is.
    NeedsArchitecture,
    /// Version and architecture are chosen.
    Complete,
}

impl Readiness {
    #[must_use]
    pub fn of(state: &CompositeState) -> Self {
        let has_version = state.version().selected().has_selection();
        let has_arch = state.arch().selected().has_selection();
        let has_tools = state.has_selected_tools();

        if !has_version && !has_tools {
            Self::NothingSelected
        } else if has_tools && !has_arch {
            Self::ToolsOnly
        } else if state.has_outputs() {
            Self::Complete
        } else {
            Self::NeedsArchitecture
        }
    }
}
