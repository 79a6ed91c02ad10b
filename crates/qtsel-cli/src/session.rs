//! Drives a [`CompositeState`] through the fetch collaborator.
//!
//! Each user step becomes a [`Message`]. Steps that need new metadata take a
//! ticket before the fetch and hand the result back through [`update`], so a
//! result that no longer matches the state is dropped by the reducer.

use qtsel_metadata::{Catalog, FetchError, MetadataSource, module_name};
use qtsel_model::{Host, ModelError, QtVersion, Target};
use qtsel_output::{OutputFormat, RenderConfig};
use qtsel_state::{ActionVersion, CompositeState, LoadTarget, Message, ToolData, update};
use thiserror::Error;
use tracing::{info, info_span, trace};

/// A step the session could not perform.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Qt {version} is not published for {host}/{target}")]
    UnknownVersion {
        version: QtVersion,
        host: Host,
        target: Target,
    },

    #[error("architecture {arch} is not available for Qt {version}")]
    UnknownArchitecture { arch: String, version: QtVersion },

    #[error("no Qt version is selected")]
    NoVersion,

    #[error("no architecture is selected")]
    NoArchitecture,

    #[error("module {0} is not available")]
    UnknownModule(String),

    #[error("archive {0} is not available")]
    UnknownArchive(String),

    #[error("tool {0} is not published")]
    UnknownTool(String),

    #[error("tool {tool} has no variant {variant}")]
    UnknownVariant { tool: String, variant: String },
}

impl SessionError {
    /// Returns whether retrying the same step may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Fetch(err) if err.is_retryable())
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// The selection state together with the catalog that feeds it.
#[derive(Debug)]
pub struct Session<S> {
    catalog: Catalog<S>,
    state: CompositeState,
}

impl<S: MetadataSource> Session<S> {
    /// Start on `host`/`target` and load its versions and tools.
    pub fn open(source: S, host: Host, target: Target) -> Result<Self> {
        let target = host.check_target(target)?;
        let mut session = Self {
            catalog: Catalog::new(source),
            state: CompositeState::new(host, target),
        };
        session.load_versions_tools()?;
        Ok(session)
    }

    #[must_use]
    pub fn state(&self) -> &CompositeState {
        &self.state
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog<S> {
        &self.catalog
    }

    /// Feed one message through the reducer.
    pub fn apply(&mut self, message: Message) {
        trace!(message = message.label(), "applying");
        self.state = update(&self.state, message);
    }

    fn load_versions_tools(&mut self) -> Result<()> {
        let (host, target) = (self.state.host(), self.state.target());
        let ticket = self.state.ticket(LoadTarget::VersionsTools);
        let (versions, tools) = self.catalog.fetch_versions_and_tools(host, target)?;
        self.apply(Message::VersionsToolsLoaded {
            ticket,
            versions,
            tools,
        });
        Ok(())
    }

    // ------------------------------------------------------------------
    // Platform
    // ------------------------------------------------------------------

    pub fn set_host(&mut self, host: Host) -> Result<()> {
        self.apply(Message::SetHost(host));
        self.load_versions_tools()
    }

    pub fn set_target(&mut self, target: Target) -> Result<()> {
        let target = self.state.host().check_target(target)?;
        self.apply(Message::SetTarget(target));
        self.load_versions_tools()
    }

    // ------------------------------------------------------------------
    // Version and architecture
    // ------------------------------------------------------------------

    /// Choose a version and load its architectures.
    ///
    /// When only one architecture exists it is chosen too, and its modules load.
    pub fn select_version(&mut self, version: QtVersion) -> Result<()> {
        if !self.state.version().contains(&version) {
            return Err(SessionError::UnknownVersion {
                version,
                host: self.state.host(),
                target: self.state.target(),
            });
        }
        let _span = info_span!("select_version", %version).entered();
        self.apply(Message::SetVersion(Some(version)));

        let ticket = self.state.ticket(LoadTarget::Architectures);
        let arches =
            self.catalog
                .fetch_architectures(self.state.host(), self.state.target(), &version)?;
        info!(count = arches.len(), "architectures loaded");
        self.apply(Message::ArchesLoaded { ticket, arches });

        if let Some(only) = self.state.arch().value().cloned() {
            self.select_architecture(&only)?;
        }
        Ok(())
    }

    pub fn clear_version(&mut self) {
        self.apply(Message::SetVersion(None));
    }

    /// Choose an architecture and load its modules and archives.
    pub fn select_architecture(&mut self, arch: &str) -> Result<()> {
        let version = self.state.version().value().copied().ok_or(SessionError::NoVersion)?;
        if !self.state.arch().contains(&arch.to_string()) {
            return Err(SessionError::UnknownArchitecture {
                arch: arch.to_string(),
                version,
            });
        }
        let _span = info_span!("select_architecture", arch).entered();
        self.apply(Message::SetArchitecture(Some(arch.to_string())));

        let (host, target) = (self.state.host(), self.state.target());
        let ticket = self.state.ticket(LoadTarget::ModulesArchives);
        let modules = self.catalog.fetch_modules(host, target, &version, arch)?;
        let archives = self
            .catalog
            .fetch_archive_sizes(host, target, &version, arch, &[])?;
        info!(
            modules = modules.len(),
            archives = archives.len(),
            "modules and archives loaded"
        );
        self.apply(Message::ModulesArchivesLoaded {
            ticket,
            modules,
            archives,
        });
        Ok(())
    }

    pub fn clear_architecture(&mut self) {
        self.apply(Message::SetArchitecture(None));
    }

    fn selected_coordinates(&self) -> Result<(QtVersion, String)> {
        let version = self.state.version().value().copied().ok_or(SessionError::NoVersion)?;
        let arch = self
            .state
            .arch()
            .value()
            .cloned()
            .ok_or(SessionError::NoArchitecture)?;
        Ok((version, arch))
    }

    // ------------------------------------------------------------------
    // Modules and archives
    // ------------------------------------------------------------------

    /// Package name of a module given either its package name or its short name.
    fn module_key(&self, name: &str) -> Result<String> {
        self.state
            .modules()
            .options()
            .keys()
            .find(|key| key.as_str() == name || module_name(key) == name)
            .cloned()
            .ok_or_else(|| SessionError::UnknownModule(name.to_string()))
    }

    /// Turn the named modules on or off, then refresh the archive list.
    pub fn set_modules<I, N>(&mut self, names: I, on: bool) -> Result<()>
    where
        I: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        let mut changed = false;
        for name in names {
            let module = self.module_key(name.as_ref())?;
            self.apply(Message::SetModule { module, on });
            changed = true;
        }
        if changed {
            self.refresh_archives()?;
        }
        Ok(())
    }

    pub fn toggle_modules(&mut self, on: bool) -> Result<()> {
        self.apply(Message::ToggleModules(on));
        self.refresh_archives()
    }

    /// Recompute archive sizes for the modules that are turned on.
    fn refresh_archives(&mut self) -> Result<()> {
        let (version, arch) = self.selected_coordinates()?;
        let packages = self.state.selected_module_packages();
        let short: Vec<String> = packages
            .iter()
            .map(|package| module_name(package).to_string())
            .collect();
        let ticket = self
            .state
            .ticket(LoadTarget::Archives { modules: packages });
        let archives = self.catalog.fetch_archive_sizes(
            self.state.host(),
            self.state.target(),
            &version,
            &arch,
            &short,
        )?;
        self.apply(Message::ArchivesLoaded { ticket, archives });
        Ok(())
    }

    pub fn set_archives<I, N>(&mut self, names: I, on: bool) -> Result<()>
    where
        I: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        for name in names {
            let archive = name.as_ref();
            if self.state.archives().get(archive).is_none() {
                return Err(SessionError::UnknownArchive(archive.to_string()));
            }
            self.apply(Message::SetArchive {
                archive: archive.to_string(),
                on,
            });
        }
        Ok(())
    }

    pub fn toggle_archives(&mut self, on: bool) {
        self.apply(Message::ToggleArchives(on));
    }

    // ------------------------------------------------------------------
    // Tools
    // ------------------------------------------------------------------

    /// Add a tool and load its variants. All variants start off.
    pub fn add_tool(&mut self, name: &str) -> Result<()> {
        if !self.state.tool_names().contains(&name.to_string()) {
            return Err(SessionError::UnknownTool(name.to_string()));
        }
        let _span = info_span!("add_tool", tool = name).entered();
        self.apply(Message::AddTool(name.to_string()));

        let ticket = self
            .state
            .ticket(LoadTarget::ToolVariants(name.to_string()));
        let variants =
            self.catalog
                .fetch_tool_variants(self.state.host(), self.state.target(), name)?;
        info!(count = variants.len(), "tool variants loaded");
        self.apply(Message::ToolVariantsLoaded {
            ticket,
            tool: ToolData::loaded(name, variants),
        });
        Ok(())
    }

    pub fn remove_tool(&mut self, name: &str) {
        self.apply(Message::RemoveTool(name.to_string()));
    }

    pub fn set_tool_variant(&mut self, tool: &str, variant: &str, on: bool) -> Result<()> {
        let data = self
            .state
            .tool(tool)
            .ok_or_else(|| SessionError::UnknownTool(tool.to_string()))?;
        if !data.variants().contains_key(variant) {
            return Err(SessionError::UnknownVariant {
                tool: tool.to_string(),
                variant: variant.to_string(),
            });
        }
        self.apply(Message::SetToolVariant {
            tool: tool.to_string(),
            variant: variant.to_string(),
            on,
        });
        Ok(())
    }

    pub fn toggle_tool_variants(&mut self, tool: &str, on: bool) -> Result<()> {
        if self.state.tool(tool).is_none() {
            return Err(SessionError::UnknownTool(tool.to_string()));
        }
        self.apply(Message::ToggleToolVariants {
            tool: tool.to_string(),
            on,
        });
        Ok(())
    }

    pub fn set_action_version(&mut self, version: ActionVersion) {
        self.apply(Message::SetActionVersion(version));
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    /// `config` with the installer name for the current host filled in from
    /// the source, unless the config already overrides it.
    pub fn render_config(&self, config: &RenderConfig) -> Result<RenderConfig> {
        let host = self.state.host();
        if config.unified_installers.contains_key(&host) {
            return Ok(config.clone());
        }
        let name = self.catalog.fetch_unified_installer_name(host)?;
        Ok(config.clone().with_unified_installer(host, name))
    }

    pub fn render(&self, format: OutputFormat, config: &RenderConfig) -> Result<String> {
        let config = self.render_config(config)?;
        Ok(format.render(&self.state, &config))
    }
}
