//! Locations of metadata documents.
//!
//! The mirror keeps one directory per host and target:
//!
//! ```text
//! <base>/<host>/<target>/directory.json
//! <base>/<host>/<target>/qt6_620.json
//! <base>/<host>/<target>/qt6_650_wasm_singlethread.json
//! <base>/<host>/<target>/tools_ifw.json
//! ```

use qtsel_model::{Host, QtVersion, Target};

const ANDROID_ABIS: [&str; 4] = ["arm64_v8a", "armv7", "x86", "x86_64"];
const WASM_THREADED: [&str; 3] = ["", "wasm_singlethread", "wasm_multithread"];
const WASM_LEGACY: [&str; 2] = ["", "wasm"];
const BASE_ONLY: [&str; 1] = [""];

/// Folder extensions published for a target and version. `""` is the base folder.
#[must_use]
pub fn folder_extensions(target: Target, version: &QtVersion) -> &'static [&'static str] {
    match target {
        Target::Android if version.major >= 6 => &ANDROID_ABIS,
        Target::Desktop if *version >= QtVersion::new(6, 5, 0) => &WASM_THREADED,
        Target::Desktop if *version > QtVersion::new(5, 13, 0) => &WASM_LEGACY,
        _ => &BASE_ONLY,
    }
}

/// The folder extension that holds packages for `arch`.
#[must_use]
pub fn extension_for_arch(target: Target, version: &QtVersion, arch: &str) -> &'static str {
    for wasm in ["wasm_singlethread", "wasm_multithread", "wasm"] {
        if arch.contains(wasm) {
            return wasm;
        }
    }
    if target == Target::Android
        && version.major >= 6
        && let Some(abi) = arch
            .strip_prefix("android_")
            .and_then(|abi| ANDROID_ABIS.into_iter().find(|known| *known == abi))
    {
        return abi;
    }
    ""
}

/// Folder name for a version and extension, e.g. `qt6_620` or `qt6_620_wasm`.
#[must_use]
pub fn qt_folder(version: &QtVersion, extension: &str) -> String {
    let mut folder = format!("qt{}_{}", version.major, version.compact());
    if !extension.is_empty() {
        folder.push('_');
        folder.push_str(extension);
    }
    folder
}

/// Builds document locations under a mirror base URL or cache root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataLocator {
    base: String,
}

impl MetadataLocator {
    /// Create a locator rooted at `base`. A trailing `/` is ignored.
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    /// The base URL or root path.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Location of one document inside a host/target directory.
    #[must_use]
    pub fn document(&self, host: Host, target: Target, stem: &str) -> String {
        format!("{}/{}", self.platform(host, target), document_path(stem))
    }

    /// Location of the directory listing.
    #[must_use]
    pub fn directory(&self, host: Host, target: Target) -> String {
        self.document(host, target, "directory")
    }

    fn platform(&self, host: Host, target: Target) -> String {
        format!("{}/{host}/{target}", self.base)
    }
}

/// File name of a document stem.
#[must_use]
pub fn document_path(stem: &str) -> String {
    format!("{stem}.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> QtVersion {
        s.parse().unwrap()
    }

    #[test]
    fn test_folder_extensions() {
        assert_eq!(
            folder_extensions(Target::Android, &v("6.2.0")),
            &["arm64_v8a", "armv7", "x86", "x86_64"]
        );
        assert_eq!(folder_extensions(Target::Android, &v("5.15.2")), &[""]);
        assert_eq!(
            folder_extensions(Target::Desktop, &v("6.5.0")),
            &["", "wasm_singlethread", "wasm_multithread"]
        );
        assert_eq!(folder_extensions(Target::Desktop, &v("6.2.0")), &["", "wasm"]);
        assert_eq!(folder_extensions(Target::Desktop, &v("5.13.0")), &[""]);
        assert_eq!(folder_extensions(Target::Ios, &v("6.5.0")), &[""]);
    }

    #[test]
    fn test_extension_for_arch() {
        let v650 = v("6.5.0");
        assert_eq!(
            extension_for_arch(Target::Desktop, &v650, "wasm_singlethread"),
            "wasm_singlethread"
        );
        assert_eq!(
            extension_for_arch(Target::Desktop, &v650, "wasm_multithread"),
            "wasm_multithread"
        );
        assert_eq!(extension_for_arch(Target::Desktop, &v("6.2.0"), "wasm_32"), "wasm");
        assert_eq!(
            extension_for_arch(Target::Android, &v("6.2.0"), "android_arm64_v8a"),
            "arm64_v8a"
        );
        assert_eq!(
            extension_for_arch(Target::Android, &v("6.2.0"), "android_mips"),
            ""
        );
        assert_eq!(extension_for_arch(Target::Android, &v("5.15.2"), "android"), "");
        assert_eq!(extension_for_arch(Target::Desktop, &v650, "gcc_64"), "");
    }

    #[test]
    fn test_locations() {
        let locator = MetadataLocator::new("https://mirror.test/data/");
        assert_eq!(
            locator.directory(Host::Linux, Target::Desktop),
            "https://mirror.test/data/linux/desktop/directory.json"
        );
        assert_eq!(
            locator.document(Host::Windows, Target::Desktop, &qt_folder(&v("6.2.0"), "wasm")),
            "https://mirror.test/data/windows/desktop/qt6_620_wasm.json"
        );
        assert_eq!(
            locator.document(Host::Mac, Target::Desktop, &qt_folder(&v("5.9.0"), "")),
            "https://mirror.test/data/mac/desktop/qt5_59.json"
        );
        assert_eq!(MetadataLocator::new("cache//").base(), "cache");
    }
}
