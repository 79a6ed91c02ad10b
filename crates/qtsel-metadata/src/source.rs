//! The fetch collaborator boundary and the catalog built on top of it.
//!
//! A [`MetadataSource`] only moves documents: it knows nothing about records
//! or derivations. [`Catalog`] turns those documents into the views the
//! selection state consumes.

use std::collections::BTreeMap;

use qtsel_model::{Host, PackageRecord, QtVersion, Target, normalize_updates};
use serde_json::Value;
use tracing::{debug, info_span};

use crate::directory::{Directory, VersionGroups, derive_tools, derive_versions};
use crate::error::{FetchError, Result};
use crate::locator::{extension_for_arch, folder_extensions, qt_folder};
use crate::packages::{
    derive_architectures, derive_archives, derive_modules, derive_tool_variants,
};

/// Retrieves raw metadata documents for a host and target.
pub trait MetadataSource {
    /// The directory listing for `host`/`target`.
    fn directory(&self, host: Host, target: Target) -> Result<Directory>;

    /// The raw updates document named `stem` (a Qt folder or tool name).
    fn updates(&self, host: Host, target: Target, stem: &str) -> Result<Value>;

    /// File name of the official online installer for `host`.
    fn unified_installer_name(&self, host: Host) -> Result<String> {
        Ok(host.unified_installer().to_string())
    }
}

impl<S: MetadataSource + ?Sized> MetadataSource for &S {
    fn directory(&self, host: Host, target: Target) -> Result<Directory> {
        (**self).directory(host, target)
    }

    fn updates(&self, host: Host, target: Target, stem: &str) -> Result<Value> {
        (**self).updates(host, target, stem)
    }

    fn unified_installer_name(&self, host: Host) -> Result<String> {
        (**self).unified_installer_name(host)
    }
}

/// Typed fetches over a [`MetadataSource`].
#[derive(Debug, Clone)]
pub struct Catalog<S> {
    source: S,
}

impl<S: MetadataSource> Catalog<S> {
    /// Wrap a source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// The wrapped source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The directory listing, rejecting targets the host never offers.
    pub fn fetch_directory(&self, host: Host, target: Target) -> Result<Directory> {
        if !host.supports(target) {
            return Err(FetchError::Unsupported(format!("{host}/{target}")));
        }
        self.source.directory(host, target)
    }

    /// Stratified versions and sorted tool names for `host`/`target`.
    pub fn fetch_versions_and_tools(
        &self,
        host: Host,
        target: Target,
    ) -> Result<(VersionGroups, Vec<String>)> {
        let _span = info_span!("fetch_versions_and_tools", %host, %target).entered();
        let directory = self.fetch_directory(host, target)?;
        let versions = derive_versions(&directory);
        let tools = derive_tools(&directory);
        debug!(
            groups = versions.len(),
            tools = tools.len(),
            "derived versions and tools"
        );
        Ok((versions, tools))
    }

    /// Every package record published for `version`, across all folder extensions.
    ///
    /// A missing extension folder is skipped; a missing base folder is an error.
    pub fn fetch_version_records(
        &self,
        host: Host,
        target: Target,
        version: &QtVersion,
    ) -> Result<Vec<PackageRecord>> {
        let mut records = Vec::new();
        for ext in folder_extensions(target, version) {
            let folder = qt_folder(version, ext);
            match self.source.updates(host, target, &folder) {
                Ok(document) => records.extend(normalize_updates(&document)),
                Err(err) if err.is_not_found() && !ext.is_empty() => {
                    debug!(%folder, "extension folder not published");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(records)
    }

    /// Architectures available for `version`.
    pub fn fetch_architectures(
        &self,
        host: Host,
        target: Target,
        version: &QtVersion,
    ) -> Result<Vec<String>> {
        let _span = info_span!("fetch_architectures", %host, %target, %version).entered();
        let records = self.fetch_version_records(host, target, version)?;
        let arches = derive_architectures(&records, version);
        debug!(count = arches.len(), "derived architectures");
        Ok(arches)
    }

    /// Records of the folder that holds `arch`.
    fn fetch_arch_records(
        &self,
        host: Host,
        target: Target,
        version: &QtVersion,
        arch: &str,
    ) -> Result<Vec<PackageRecord>> {
        let folder = qt_folder(version, extension_for_arch(target, version, arch));
        let document = self.source.updates(host, target, &folder)?;
        Ok(normalize_updates(&document))
    }

    /// Add-on module packages for `version` and `arch`.
    pub fn fetch_modules(
        &self,
        host: Host,
        target: Target,
        version: &QtVersion,
        arch: &str,
    ) -> Result<Vec<PackageRecord>> {
        let _span = info_span!("fetch_modules", %host, %target, %version, arch).entered();
        let records = self.fetch_arch_records(host, target, version, arch)?;
        let modules = derive_modules(&records, version, arch);
        debug!(count = modules.len(), "derived modules");
        Ok(modules)
    }

    /// Archive sizes for the base package plus `modules` (short module names).
    pub fn fetch_archive_sizes(
        &self,
        host: Host,
        target: Target,
        version: &QtVersion,
        arch: &str,
        modules: &[String],
    ) -> Result<BTreeMap<String, String>> {
        let _span = info_span!("fetch_archive_sizes", %host, %target, %version, arch).entered();
        let records = self.fetch_arch_records(host, target, version, arch)?;
        let archives = derive_archives(&records, version, arch, modules);
        debug!(count = archives.len(), "derived archives");
        Ok(archives)
    }

    /// Installable variants of `tool`.
    pub fn fetch_tool_variants(
        &self,
        host: Host,
        target: Target,
        tool: &str,
    ) -> Result<Vec<PackageRecord>> {
        let _span = info_span!("fetch_tool_variants", %host, %target, tool).entered();
        let document = self.source.updates(host, target, tool)?;
        Ok(derive_tool_variants(&normalize_updates(&document)))
    }

    /// File name of the official online installer for `host`.
    pub fn fetch_unified_installer_name(&self, host: Host) -> Result<String> {
        self.source.unified_installer_name(host)
    }
}
