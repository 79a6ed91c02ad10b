//! Messages that drive the selection state.
//!
//! The orchestration layer turns user input and fetch results into
//! [`Message`]s and feeds them through [`update`]. Results of fetches carry
//! the [`LoadTicket`] they were issued with; stale ones are dropped.

use std::collections::BTreeMap;

use qtsel_metadata::VersionGroups;
use qtsel_model::{Host, PackageRecord, QtVersion, Target};
use tracing::debug;

use crate::composite::CompositeState;
use crate::output_format::ActionVersion;
use crate::ticket::LoadTicket;
use crate::tool::ToolData;

/// Every transition of [`CompositeState`], as data.
#[derive(Debug, Clone)]
pub enum Message {
    SetHost(Host),
    SetTarget(Target),
    VersionsToolsLoaded {
        ticket: LoadTicket,
        versions: VersionGroups,
        tools: Vec<String>,
    },
    /// `None` clears the version.
    SetVersion(Option<QtVersion>),
    ArchesLoaded {
        ticket: LoadTicket,
        arches: Vec<String>,
    },
    /// `None` clears the architecture.
    SetArchitecture(Option<String>),
    ModulesArchivesLoaded {
        ticket: LoadTicket,
        modules: Vec<PackageRecord>,
        archives: BTreeMap<String, String>,
    },
    ArchivesLoaded {
        ticket: LoadTicket,
        archives: BTreeMap<String, String>,
    },
    SetModule {
        module: String,
        on: bool,
    },
    ToggleModules(bool),
    SetArchive {
        archive: String,
        on: bool,
    },
    ToggleArchives(bool),
    AddTool(String),
    ToolVariantsLoaded {
        ticket: LoadTicket,
        tool: ToolData,
    },
    RemoveTool(String),
    SetToolVariant {
        tool: String,
        variant: String,
        on: bool,
    },
    ToggleToolVariants {
        tool: String,
        on: bool,
    },
    SetActionVersion(ActionVersion),
}

impl Message {
    /// Short name for logging.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::SetHost(_) => "set_host",
            Self::SetTarget(_) => "set_target",
            Self::VersionsToolsLoaded { .. } => "versions_tools_loaded",
            Self::SetVersion(_) => "set_version",
            Self::ArchesLoaded { .. } => "arches_loaded",
            Self::SetArchitecture(_) => "set_architecture",
            Self::ModulesArchivesLoaded { .. } => "modules_archives_loaded",
            Self::ArchivesLoaded { .. } => "archives_loaded",
            Self::SetModule { .. } => "set_module",
            Self::ToggleModules(_) => "toggle_modules",
            Self::SetArchive { .. } => "set_archive",
            Self::ToggleArchives(_) => "toggle_archives",
            Self::AddTool(_) => "add_tool",
            Self::ToolVariantsLoaded { .. } => "tool_variants_loaded",
            Self::RemoveTool(_) => "remove_tool",
            Self::SetToolVariant { .. } => "set_tool_variant",
            Self::ToggleToolVariants { .. } => "toggle_tool_variants",
            Self::SetActionVersion(_) => "set_action_version",
        }
    }

    /// The ticket of a fetch result, if this message is one.
    #[must_use]
    pub fn ticket(&self) -> Option<&LoadTicket> {
        match self {
            Self::VersionsToolsLoaded { ticket, .. }
            | Self::ArchesLoaded { ticket, .. }
            | Self::ModulesArchivesLoaded { ticket, .. }
            | Self::ArchivesLoaded { ticket, .. }
            | Self::ToolVariantsLoaded { ticket, .. } => Some(ticket),
            _ => None,
        }
    }
}

/// Apply `message` to `state`, returning the next state.
///
/// Fetch results whose ticket is no longer current leave the state unchanged.
#[must_use]
pub fn update(state: &CompositeState, message: Message) -> CompositeState {
    if let Some(ticket) = message.ticket()
        && !state.is_current(ticket)
    {
        debug!(
            message = message.label(),
            ticket_generation = ticket.generation(),
            generation = state.generation(),
            "dropping stale fetch result"
        );
        return state.clone();
    }

    match message {
        Message::SetHost(host) => state.set_host(host),
        Message::SetTarget(target) => state.set_target(target),
        Message::VersionsToolsLoaded {
            versions, tools, ..
        } => state.versions_tools_loaded(versions, tools),
        Message::SetVersion(version) => state.set_version(version),
        Message::ArchesLoaded { arches, .. } => state.arches_loaded(arches),
        Message::SetArchitecture(arch) => state.set_architecture(arch),
        Message::ModulesArchivesLoaded {
            modules, archives, ..
        } => state.modules_archives_loaded(modules, archives),
        Message::ArchivesLoaded { archives, .. } => state.archives_loaded(archives),
        Message::SetModule { module, on } => state.set_module(&module, on),
        Message::ToggleModules(on) => state.toggle_modules(on),
        Message::SetArchive { archive, on } => state.set_archive(&archive, on),
        Message::ToggleArchives(on) => state.toggle_archives(on),
        Message::AddTool(name) => state.add_tool(&name),
        Message::ToolVariantsLoaded { tool, .. } => state.tool_variants_loaded(tool),
        Message::RemoveTool(name) => state.remove_tool(&name),
        Message::SetToolVariant { tool, variant, on } => {
            state.set_tool_variant(&tool, &variant, on)
        }
        Message::ToggleToolVariants { tool, on } => state.toggle_tool_variants(&tool, on),
        Message::SetActionVersion(version) => state.set_action_version(version),
    }
}
