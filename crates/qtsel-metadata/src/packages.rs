//! Views derived from the package records of one Qt version folder.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use qtsel_model::{PackageRecord, QtVersion};
use regex::Regex;

/// Module package names, capturing the module segment.
static MODULE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:preview\.)?qt\.(?:qt\d\.)?\d+\.(?:addons\.)?(.+)\.[^.]+$")
        .expect("Invalid module name regex")
});

/// Architectures published for `version`: the last segment of every package
/// with archives whose name ends in `<compact>.<arch>`. Sorted and unique.
#[must_use]
pub fn derive_architectures(records: &[PackageRecord], version: &QtVersion) -> Vec<String> {
    let compact = version.compact();
    records
        .iter()
        .filter(|record| record.has_archives())
        .filter_map(|record| match record.last_two_segments() {
            Some((ver, arch)) if ver == compact => Some(arch.to_string()),
            _ => None,
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Add-on module packages available for `version` and `arch`.
#[must_use]
pub fn derive_modules(
    records: &[PackageRecord],
    version: &QtVersion,
    arch: &str,
) -> Vec<PackageRecord> {
    let pattern = module_pattern(version, arch);
    records
        .iter()
        .filter(|record| record.has_archives())
        .filter(|record| {
            pattern
                .captures(&record.name)
                .and_then(|caps| caps.get(1))
                .is_some_and(|module| !module.as_str().is_empty())
        })
        .cloned()
        .collect()
}

fn module_pattern(version: &QtVersion, arch: &str) -> Regex {
    let pattern = format!(
        r"^(?:preview\.)?qt\.(?:qt{major}\.)?{compact}\.(?:addons\.)?(.+)\.{arch}$",
        major = version.major,
        compact = version.compact(),
        arch = regex::escape(arch),
    );
    // Every interpolated piece is digits or escaped text.
    Regex::new(&pattern).expect("Invalid module regex")
}

/// Short module name of a module package.
///
/// `qt.qt6.620.addons.qtcharts.win64_mingw81` becomes `qtcharts`. Names that
/// are not module packages come back unchanged.
#[must_use]
pub fn module_name(package_name: &str) -> &str {
    MODULE_NAME
        .captures(package_name)
        .and_then(|caps| caps.get(1))
        .map_or(package_name, |m| m.as_str())
}

/// Archive name to size for the base package of `version`/`arch` plus the
/// requested modules. Later records overwrite earlier ones for the same archive.
#[must_use]
pub fn derive_archives(
    records: &[PackageRecord],
    version: &QtVersion,
    arch: &str,
    modules: &[String],
) -> BTreeMap<String, String> {
    let compact = version.compact();
    records
        .iter()
        .filter(|record| record.has_archives())
        .filter(|record| match record.last_two_segments() {
            Some((segment, record_arch)) if record_arch == arch => {
                segment == compact || modules.iter().any(|module| module == segment)
            }
            _ => false,
        })
        .flat_map(|record| record.archive_sizes.clone())
        .collect()
}

/// Installable variants of a tool: every package with archives.
#[must_use]
pub fn derive_tool_variants(records: &[PackageRecord]) -> Vec<PackageRecord> {
    records
        .iter()
        .filter(|record| record.has_archives())
        .cloned()
        .collect()
}
