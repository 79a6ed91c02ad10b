//! Tickets that tie an in-flight fetch to the state that requested it.
//!
//! Fetches resolve in any order. Before a `*_loaded` result is applied the
//! orchestration layer checks its ticket against the current state with
//! [`CompositeState::is_current`](crate::CompositeState::is_current).

/// What a pending fetch will load.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LoadTarget {
    /// Version groups and tool names for the current host and target.
    VersionsTools,
    /// Architectures for the selected version.
    Architectures,
    /// Modules and archives for the selected architecture.
    ModulesArchives,
    /// Archive sizes recomputed for the listed module packages.
    Archives { modules: Vec<String> },
    /// Variants of one added tool.
    ToolVariants(String),
}

/// A pending fetch, stamped with the generation it was issued in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    pub(crate) target: LoadTarget,
    pub(crate) generation: u64,
}

impl LoadTicket {
    #[must_use]
    pub fn target(&self) -> &LoadTarget {
        &self.target
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
