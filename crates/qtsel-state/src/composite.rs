//! The aggregate selection state and its cascading transitions.
//!
//! Selections form a chain: host and target, then version, then architecture,
//! then modules and archives. Changing a link resets everything after it.
//! Added tools depend on host and target only.
//!
//! Every transition takes `&self` and returns a new state. Option lists and
//! element maps are shared between states through `Arc`, so a transition only
//! allocates for the branches it replaces.

use std::collections::BTreeMap;
use std::sync::Arc;

use qtsel_metadata::VersionGroups;
use qtsel_model::{Host, PackageRecord, QtVersion, Target};
use tracing::trace;

use crate::load_state::LoadState;
use crate::output_format::ActionVersion;
use crate::select_many::{SelectMany, SelectableElement};
use crate::selection::{SelectOne, Selection};
use crate::ticket::{LoadTarget, LoadTicket};
use crate::tool::ToolData;
use crate::versions::VersionSelector;

/// Tools added by the user, keyed by tool name.
pub type ToolMap = BTreeMap<String, Arc<ToolData>>;

/// An immutable snapshot of everything the user has chosen so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeState {
    host: Host,
    target: Target,
    /// Tool names offered by the tool adder. Never holds a selection.
    tool_names: SelectOne<String>,
    selected_tools: Arc<ToolMap>,
    version: VersionSelector,
    arch: SelectOne<String>,
    modules: SelectMany,
    archives: SelectMany,
    action_version: SelectOne<ActionVersion>,
    /// Bumped whenever a coordinate changes or reloads.
    generation: u64,
    /// Bumped whenever host or target changes.
    platform_generation: u64,
}

impl CompositeState {
    /// Initial state for `host`/`target`, waiting for versions and tools.
    ///
    /// A target the host does not offer falls back to desktop.
    #[must_use]
    pub fn new(host: Host, target: Target) -> Self {
        Self {
            host,
            target: host.legal_target_or_default(target),
            tool_names: SelectOne::loading(),
            selected_tools: Arc::default(),
            version: VersionSelector::inert(LoadState::Loading),
            arch: SelectOne::default(),
            modules: SelectMany::default(),
            archives: SelectMany::default(),
            action_version: SelectOne::new(
                Selection::from_value(Some(ActionVersion::default())),
                ActionVersion::ALL.to_vec(),
                false,
            ),
            generation: 0,
            platform_generation: 0,
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    #[must_use]
    pub fn host(&self) -> Host {
        self.host
    }

    #[must_use]
    pub fn target(&self) -> Target {
        self.target
    }

    /// Host selector over every supported host.
    #[must_use]
    pub fn host_selector(&self) -> SelectOne<Host> {
        SelectOne::new(
            Selection::from_value(Some(self.host)),
            Host::ALL.to_vec(),
            false,
        )
    }

    /// Target selector over exactly the targets legal for the current host.
    #[must_use]
    pub fn target_selector(&self) -> SelectOne<Target> {
        SelectOne::new(
            Selection::from_value(Some(self.target)),
            self.host.targets().to_vec(),
            false,
        )
    }

    #[must_use]
    pub fn tool_names(&self) -> &SelectOne<String> {
        &self.tool_names
    }

    #[must_use]
    pub fn selected_tools(&self) -> &ToolMap {
        &self.selected_tools
    }

    #[must_use]
    pub fn tool(&self, name: &str) -> Option<&ToolData> {
        self.selected_tools.get(name).map(Arc::as_ref)
    }

    #[must_use]
    pub fn version(&self) -> &VersionSelector {
        &self.version
    }

    #[must_use]
    pub fn arch(&self) -> &SelectOne<String> {
        &self.arch
    }

    #[must_use]
    pub fn modules(&self) -> &SelectMany {
        &self.modules
    }

    #[must_use]
    pub fn archives(&self) -> &SelectMany {
        &self.archives
    }

    #[must_use]
    pub fn action_version_selector(&self) -> &SelectOne<ActionVersion> {
        &self.action_version
    }

    #[must_use]
    pub fn action_version(&self) -> ActionVersion {
        self.action_version.value().copied().unwrap_or_default()
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether both a version and an architecture are chosen.
    #[must_use]
    pub fn has_outputs(&self) -> bool {
        self.version.selected().has_selection() && self.arch.selected().has_selection()
    }

    /// Whether any variant of any added tool is turned on.
    #[must_use]
    pub fn has_selected_tools(&self) -> bool {
        self.selected_tools.values().any(|tool| tool.has_selections())
    }

    /// Name of the base package for the chosen version and architecture,
    /// e.g. `qt.qt6.620.win64_mingw81`.
    #[must_use]
    pub fn base_package_name(&self) -> Option<String> {
        let version = self.version.value()?;
        let arch = self.arch.value()?;
        Some(format!(
            "qt.qt{}.{}.{arch}",
            version.major,
            version.compact()
        ))
    }

    /// Package names of the modules that are turned on.
    #[must_use]
    pub fn selected_module_packages(&self) -> Vec<String> {
        self.modules
            .options_turned_on()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    // ------------------------------------------------------------------
    // Load tickets
    // ------------------------------------------------------------------

    /// Stamp a fetch that is about to be issued for `target`.
    #[must_use]
    pub fn ticket(&self, target: LoadTarget) -> LoadTicket {
        let generation = match target {
            LoadTarget::ToolVariants(_) => self.platform_generation,
            _ => self.generation,
        };
        LoadTicket { target, generation }
    }

    /// Whether the result of the fetch behind `ticket` may still be applied.
    #[must_use]
    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        match &ticket.target {
            LoadTarget::ToolVariants(name) => {
                ticket.generation == self.platform_generation
                    && self.tool(name).is_some_and(ToolData::is_loading)
            }
            target => {
                ticket.generation == self.generation
                    && match target {
                        LoadTarget::VersionsTools => self.version.state().is_loading(),
                        LoadTarget::Architectures => self.arch.state().is_loading(),
                        LoadTarget::ModulesArchives => self.modules.is_loading(),
                        LoadTarget::Archives { modules } => {
                            !self.modules.state().is_inert()
                                && *modules == self.selected_module_packages()
                        }
                        LoadTarget::ToolVariants(_) => false,
                    }
            }
        }
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Switch host. Keeps the target when still legal, else falls back to desktop.
    /// Versions and tool names go back to `Loading`; everything downstream is cleared.
    #[must_use]
    pub fn set_host(&self, host: Host) -> Self {
        let target = host.legal_target_or_default(self.target);
        self.with_platform(host, target)
    }

    /// Switch target on the current host, with the same cascade as [`Self::set_host`].
    #[must_use]
    pub fn set_target(&self, target: Target) -> Self {
        debug_assert!(
            self.host.supports(target),
            "target {target} is not offered on {}",
            self.host
        );
        self.with_platform(self.host, self.host.legal_target_or_default(target))
    }

    fn with_platform(&self, host: Host, target: Target) -> Self {
        trace!(%host, %target, "platform changed");
        Self {
            host,
            target,
            tool_names: SelectOne::loading(),
            selected_tools: Arc::default(),
            version: VersionSelector::inert(LoadState::Loading),
            arch: SelectOne::default(),
            modules: SelectMany::default(),
            archives: SelectMany::default(),
            action_version: self.action_version.clone(),
            generation: self.generation + 1,
            platform_generation: self.platform_generation + 1,
        }
    }

    /// Install version groups and tool names. Nothing is selected.
    #[must_use]
    pub fn versions_tools_loaded(&self, versions: VersionGroups, tools: Vec<String>) -> Self {
        let tool_state = LoadState::loaded_if(!tools.is_empty());
        self.with_versions(
            VersionSelector::loaded(versions),
            SelectOne::new(Selection::from_load_state(tool_state), tools, true),
        )
    }

    fn with_versions(&self, version: VersionSelector, tool_names: SelectOne<String>) -> Self {
        Self {
            version,
            tool_names,
            arch: SelectOne::default(),
            modules: SelectMany::default(),
            archives: SelectMany::default(),
            ..self.clone()
        }
    }

    /// Choose a version, or pass `None` to clear it and reload the existing lists.
    ///
    /// A concrete version puts the architecture selector into `Loading`.
    #[must_use]
    pub fn set_version(&self, version: Option<QtVersion>) -> Self {
        let next = match version {
            None => {
                let tool_names = SelectOne::new(
                    Selection::from_load_state(LoadState::loaded_if(
                        !self.tool_names.options().is_empty(),
                    )),
                    self.tool_names.shared_options(),
                    true,
                );
                self.with_versions(self.version.reloaded(), tool_names)
            }
            Some(version) => {
                debug_assert!(
                    self.version.contains(&version),
                    "version {version} is not offered"
                );
                Self {
                    version: self.version.copy_with_option(Some(version)),
                    arch: SelectOne::loading(),
                    modules: SelectMany::default(),
                    archives: SelectMany::default(),
                    ..self.clone()
                }
            }
        };
        next.bumped()
    }

    /// Install the architecture list.
    ///
    /// A single architecture is selected outright and cannot be cleared.
    /// Several leave the choice open; none leaves the selector `NotLoaded`.
    #[must_use]
    pub fn arches_loaded(&self, arches: Vec<String>) -> Self {
        self.with_arches(arches.into())
    }

    fn with_arches(&self, arches: Arc<[String]>) -> Self {
        let arch = match &*arches {
            [only] => SelectOne::new(Selection::from_value(Some(only.clone())), arches, false),
            [] => SelectOne::new(
                Selection::from_load_state(LoadState::NotLoaded),
                arches,
                true,
            ),
            _ => SelectOne::new(Selection::from_load_state(LoadState::Loaded), arches, true),
        };
        Self {
            arch,
            modules: SelectMany::default(),
            archives: SelectMany::default(),
            ..self.clone()
        }
    }

    /// Choose an architecture, or pass `None` to reload the existing list.
    ///
    /// A concrete architecture puts modules and archives into `Loading`.
    /// Clearing a lone architecture is a no-op: it cannot be deselected.
    #[must_use]
    pub fn set_architecture(&self, arch: Option<String>) -> Self {
        let next = match arch {
            None if self.arch.options().len() == 1 => return self.clone(),
            None => self.with_arches(self.arch.shared_options()),
            Some(arch) => {
                debug_assert!(self.arch.contains(&arch), "architecture {arch} is not offered");
                Self {
                    arch: self.arch.copy_with_option(Some(arch)),
                    modules: SelectMany::loading(),
                    archives: SelectMany::loading(),
                    ..self.clone()
                }
            }
        };
        next.bumped()
    }

    /// Install modules (all off) and archives (all on).
    #[must_use]
    pub fn modules_archives_loaded(
        &self,
        modules: Vec<PackageRecord>,
        archives: BTreeMap<String, String>,
    ) -> Self {
        Self {
            modules: SelectMany::from_packages(modules, false),
            archives: SelectMany::from_archives(archives, true),
            ..self.clone()
        }
    }

    /// Replace the archive list after the module selection changed.
    ///
    /// Archives already listed keep their on/off state; new ones start on.
    #[must_use]
    pub fn archives_loaded(&self, archives: BTreeMap<String, String>) -> Self {
        let previous = &self.archives;
        let options = archives
            .into_iter()
            .map(|(name, size)| {
                let on = previous.get(&name).is_none_or(SelectableElement::is_selected);
                let element = SelectableElement::from_archive(name.clone(), size, on);
                (name, element)
            })
            .collect();
        let state = if previous.state().has_selection() {
            LoadState::Selected
        } else {
            LoadState::Loaded
        };
        Self {
            archives: SelectMany::new(state, options),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn set_module(&self, module: &str, on: bool) -> Self {
        Self {
            modules: self.modules.copy_with_option_set(module, on),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn toggle_modules(&self, on: bool) -> Self {
        Self {
            modules: self.modules.copy_with_all_options(on),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn set_archive(&self, archive: &str, on: bool) -> Self {
        Self {
            archives: self.archives.copy_with_option_set(archive, on),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn toggle_archives(&self, on: bool) -> Self {
        Self {
            archives: self.archives.copy_with_all_options(on),
            ..self.clone()
        }
    }

    /// Add a tool in the loading state, replacing any existing entry.
    #[must_use]
    pub fn add_tool(&self, name: &str) -> Self {
        self.with_tool(Arc::new(ToolData::loading(name)))
    }

    /// Replace a loading tool with its fetched variants.
    ///
    /// Results for a tool that has since been removed are ignored.
    #[must_use]
    pub fn tool_variants_loaded(&self, tool: ToolData) -> Self {
        if !self.selected_tools.contains_key(tool.name()) {
            trace!(tool = tool.name(), "ignoring variants for a removed tool");
            return self.clone();
        }
        self.with_tool(Arc::new(tool))
    }

    #[must_use]
    pub fn remove_tool(&self, name: &str) -> Self {
        let mut tools = ToolMap::clone(&self.selected_tools);
        tools.remove(name);
        Self {
            selected_tools: Arc::new(tools),
            ..self.clone()
        }
    }

    /// Turn one variant of an added tool on or off.
    #[must_use]
    pub fn set_tool_variant(&self, tool: &str, variant: &str, on: bool) -> Self {
        self.map_tool(tool, |data| data.copy_with_variant_set(variant, on))
    }

    /// Turn every variant of an added tool on or off.
    #[must_use]
    pub fn toggle_tool_variants(&self, tool: &str, on: bool) -> Self {
        self.map_tool(tool, |data| data.copy_with_toggled_variants(on))
    }

    /// Select the install-qt-action version used for the workflow output.
    #[must_use]
    pub fn set_action_version(&self, version: ActionVersion) -> Self {
        Self {
            action_version: self.action_version.copy_with_option(Some(version)),
            ..self.clone()
        }
    }

    fn map_tool(&self, name: &str, f: impl FnOnce(&ToolData) -> ToolData) -> Self {
        debug_assert!(
            self.selected_tools.contains_key(name),
            "tool {name} was never added"
        );
        let Some(tool) = self.selected_tools.get(name) else {
            return self.clone();
        };
        self.with_tool(Arc::new(f(tool)))
    }

    fn with_tool(&self, tool: Arc<ToolData>) -> Self {
        let mut tools = ToolMap::clone(&self.selected_tools);
        tools.insert(tool.name().to_string(), tool);
        Self {
            selected_tools: Arc::new(tools),
            ..self.clone()
        }
    }

    fn bumped(self) -> Self {
        Self {
            generation: self.generation + 1,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> QtVersion {
        s.parse().unwrap()
    }

    fn loaded() -> CompositeState {
        CompositeState::new(Host::Windows, Target::Desktop).versions_tools_loaded(
            vec![vec![v("6.1.0"), v("6.1.1"), v("6.1.2")], vec![v("6.2.0")]],
            vec!["tools_ifw".to_string(), "tools_qtcreator".to_string()],
        )
    }

    #[test]
    fn test_new_falls_back_to_desktop() {
        let state = CompositeState::new(Host::Linux, Target::Ios);
        assert_eq!(state.target(), Target::Desktop);
        assert_eq!(state.version().state(), LoadState::Loading);
        assert_eq!(state.tool_names().state(), LoadState::Loading);
        assert_eq!(state.action_version(), ActionVersion::V4);
    }

    #[test]
    fn test_target_selector_tracks_host() {
        let state = CompositeState::new(Host::Mac, Target::Ios).set_host(Host::Linux);
        assert_eq!(state.target(), Target::Desktop);
        assert_eq!(
            state.target_selector().options(),
            &[Target::Desktop, Target::Android]
        );

        let state = CompositeState::new(Host::Mac, Target::Android).set_host(Host::Windows);
        assert_eq!(state.target(), Target::Android);
    }

    #[test]
    fn test_versions_tools_loaded_empty_is_not_loaded() {
        let state =
            CompositeState::new(Host::Windows, Target::Winrt).versions_tools_loaded(vec![], vec![]);
        assert_eq!(state.version().state(), LoadState::NotLoaded);
        assert_eq!(state.tool_names().state(), LoadState::NotLoaded);
    }

    #[test]
    fn test_set_version_loads_arches() {
        let state = loaded().set_version(Some(v("6.2.0")));
        assert_eq!(state.version().state(), LoadState::Selected);
        assert_eq!(state.arch().state(), LoadState::Loading);
        assert!(!state.has_outputs());
    }

    #[test]
    fn test_many_arches_leave_choice_open() {
        let state = loaded()
            .set_version(Some(v("6.2.0")))
            .arches_loaded(vec!["win64_mingw81".to_string(), "win64_msvc2019_64".to_string()]);
        assert_eq!(state.arch().state(), LoadState::Loaded);
        assert!(state.arch().allow_empty());
        assert!(state.arch().value().is_none());

        let state = state.arches_loaded(vec![]);
        assert_eq!(state.arch().state(), LoadState::NotLoaded);
    }

    #[test]
    fn test_set_architecture_none_reloads() {
        let state = loaded()
            .set_version(Some(v("6.2.0")))
            .arches_loaded(vec!["win64_mingw81".to_string(), "win64_msvc2019_64".to_string()])
            .set_architecture(Some("win64_mingw81".to_string()));
        assert_eq!(state.modules().state(), LoadState::Loading);
        assert_eq!(
            state.base_package_name().as_deref(),
            Some("qt.qt6.620.win64_mingw81")
        );

        let reloaded = state.set_architecture(None);
        assert_eq!(reloaded.arch().state(), LoadState::Loaded);
        assert_eq!(reloaded.arch().options().len(), 2);
        assert_eq!(reloaded.modules().state(), LoadState::NotLoaded);
    }

    #[test]
    fn test_tools_survive_version_changes() {
        let state = loaded()
            .add_tool("tools_ifw")
            .set_version(Some(v("6.1.1")))
            .set_version(None);
        assert!(state.tool("tools_ifw").is_some());
    }

    #[test]
    fn test_remove_tool() {
        let state = loaded().add_tool("tools_ifw").remove_tool("tools_ifw");
        assert!(state.selected_tools().is_empty());
    }

    #[test]
    fn test_variants_for_removed_tool_are_ignored() {
        let state = loaded().add_tool("tools_ifw");
        let removed = state.remove_tool("tools_ifw");
        let next = removed.tool_variants_loaded(ToolData::loaded("tools_ifw", vec![]));
        assert!(next.selected_tools().is_empty());
    }

    #[test]
    fn test_set_action_version() {
        let state = loaded().set_action_version(ActionVersion::V2);
        assert_eq!(state.action_version(), ActionVersion::V2);
        assert_eq!(state.action_version_selector().state(), LoadState::Selected);
        assert_eq!(state.version(), loaded().version());
    }
}
