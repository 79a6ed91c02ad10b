//! Renderers that turn a [`CompositeState`](qtsel_state::CompositeState) into
//! text a user can paste: an aqt command, an install-qt-action workflow step,
//! or a script for the official online installer.
//!
//! Incomplete selections render as a short guard message instead of a command.
//! The checks run in a fixed order, see [`Readiness`].

pub mod action;
pub mod aqt;
pub mod config;
pub mod guard;
pub mod official;

pub use action::render_install_qt_action;
pub use aqt::render_aqt_command;
pub use config::RenderConfig;
pub use guard::{Readiness, SELECT_ARCHITECTURE};
pub use official::render_official_installer;

/// The output formats a selection can be rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Aqt,
    InstallQtAction,
    OfficialInstaller,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [
        OutputFormat::Aqt,
        OutputFormat::InstallQtAction,
        OutputFormat::OfficialInstaller,
    ];

    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Aqt => "aqt",
            Self::InstallQtAction => "install-qt-action",
            Self::OfficialInstaller => "Official installer",
        }
    }

    /// Render `state` in this format.
    #[must_use]
    pub fn render(&self, state: &qtsel_state::CompositeState, config: &RenderConfig) -> String {
        match self {
            Self::Aqt => render_aqt_command(state, config),
            Self::InstallQtAction => render_install_qt_action(state, config),
            Self::OfficialInstaller => render_official_installer(state, config),
        }
    }
}
