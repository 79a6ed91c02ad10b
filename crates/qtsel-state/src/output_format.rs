//! Output-format options kept alongside the selection.

use std::fmt;

/// Major version of the install-qt-action GitHub Action to target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionVersion {
    V2,
    V3,
    #[default]
    V4,
}

impl ActionVersion {
    pub const ALL: [ActionVersion; 3] = [ActionVersion::V2, ActionVersion::V3, ActionVersion::V4];

    /// The tag used after `@` in a workflow `uses:` line.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::V2 => "v2",
            Self::V3 => "v3",
            Self::V4 => "v4",
        }
    }

    /// v2 takes `tool,version,variant` tuples; later versions take `tool,variant`.
    #[must_use]
    pub const fn uses_versioned_tools(&self) -> bool {
        matches!(self, Self::V2)
    }

    /// Whether the action accepts `archives`. Every version accepts `tools-only`.
    #[must_use]
    pub const fn supports_archives(&self) -> bool {
        !matches!(self, Self::V2)
    }
}

impl fmt::Display for ActionVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
