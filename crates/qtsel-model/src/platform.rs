//! Installer hosts and deployment targets.
//!
//! A host is the machine the installer runs on; a target is the platform the
//! installed SDK builds for. Each host offers a fixed set of legal targets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Operating systems the installer runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Host {
    /// Windows on x86_64.
    Windows,
    /// Windows on ARM64.
    WindowsArm64,
    /// macOS.
    Mac,
    /// Linux on x86_64.
    Linux,
    /// Linux on ARM64.
    LinuxArm64,
}

impl Host {
    /// Every supported host, in display order.
    pub const ALL: [Host; 5] = [
        Host::Windows,
        Host::WindowsArm64,
        Host::Mac,
        Host::Linux,
        Host::LinuxArm64,
    ];

    /// Detect the host matching the running machine.
    #[must_use]
    pub fn current() -> Self {
        let arm = cfg!(target_arch = "aarch64");
        if cfg!(target_os = "macos") {
            Self::Mac
        } else if cfg!(target_os = "windows") {
            if arm { Self::WindowsArm64 } else { Self::Windows }
        } else if arm {
            Self::LinuxArm64
        } else {
            Self::Linux
        }
    }

    /// Name used in metadata paths and installer commands.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::WindowsArm64 => "windows_arm64",
            Self::Mac => "mac",
            Self::Linux => "linux",
            Self::LinuxArm64 => "linux_arm64",
        }
    }

    /// Targets that can be installed from this host.
    #[must_use]
    pub const fn targets(&self) -> &'static [Target] {
        match self {
            Self::Windows => &[Target::Desktop, Target::Android, Target::Winrt],
            Self::Mac => &[Target::Desktop, Target::Android, Target::Ios],
            Self::Linux => &[Target::Desktop, Target::Android],
            Self::WindowsArm64 | Self::LinuxArm64 => &[Target::Desktop],
        }
    }

    /// Whether `target` is offered on this host.
    #[must_use]
    pub fn supports(&self, target: Target) -> bool {
        self.targets().contains(&target)
    }

    /// Returns `target` when legal on this host, otherwise the desktop target.
    #[must_use]
    pub fn legal_target_or_default(&self, target: Target) -> Target {
        if self.supports(target) {
            target
        } else {
            Target::Desktop
        }
    }

    /// Checks that `target` is offered on this host.
    pub fn check_target(&self, target: Target) -> Result<Target> {
        if self.supports(target) {
            Ok(target)
        } else {
            Err(ModelError::IllegalTarget {
                host: self.to_string(),
                target: target.to_string(),
            })
        }
    }

    /// File name of the official online installer published for this host.
    #[must_use]
    pub const fn unified_installer(&self) -> &'static str {
        match self {
            Self::Windows => "qt-unified-windows-x64-online.exe",
            Self::WindowsArm64 => "qt-unified-windows-arm64-online.exe",
            Self::Mac => "qt-unified-macOS-x64-online.dmg",
            Self::Linux => "qt-unified-linux-x64-online.run",
            Self::LinuxArm64 => "qt-unified-linux-arm64-online.run",
        }
    }

    /// Whether shell output for this host is PowerShell rather than POSIX sh.
    #[must_use]
    pub const fn is_windows(&self) -> bool {
        matches!(self, Self::Windows | Self::WindowsArm64)
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Host {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|host| host.as_str() == s.trim())
            .ok_or_else(|| ModelError::UnknownHost(s.to_string()))
    }
}

/// Platforms the installed SDK builds for.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// Desktop applications, including WebAssembly builds.
    #[default]
    Desktop,
    /// Android devices.
    Android,
    /// iOS devices.
    Ios,
    /// Universal Windows Platform.
    Winrt,
}

impl Target {
    /// Every known target.
    pub const ALL: [Target; 4] = [Target::Desktop, Target::Android, Target::Ios, Target::Winrt];

    /// Name used in metadata paths and installer commands.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Android => "android",
            Self::Ios => "ios",
            Self::Winrt => "winrt",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Target {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|target| target.as_str() == s.trim())
            .ok_or_else(|| ModelError::UnknownTarget(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_targets() {
        assert_eq!(
            Host::Windows.targets(),
            &[Target::Desktop, Target::Android, Target::Winrt]
        );
        assert_eq!(
            Host::Mac.targets(),
            &[Target::Desktop, Target::Android, Target::Ios]
        );
        assert_eq!(Host::Linux.targets(), &[Target::Desktop, Target::Android]);
        assert_eq!(Host::LinuxArm64.targets(), &[Target::Desktop]);
    }

    #[test]
    fn test_legal_target_or_default() {
        assert_eq!(
            Host::Linux.legal_target_or_default(Target::Android),
            Target::Android
        );
        assert_eq!(
            Host::Linux.legal_target_or_default(Target::Ios),
            Target::Desktop
        );
        assert!(Host::Windows.check_target(Target::Ios).is_err());
    }

    #[test]
    fn test_parse_and_display() {
        for host in Host::ALL {
            assert_eq!(host.to_string().parse::<Host>(), Ok(host));
        }
        for target in Target::ALL {
            assert_eq!(target.to_string().parse::<Target>(), Ok(target));
        }
        assert_eq!(
            "solaris".parse::<Host>(),
            Err(ModelError::UnknownHost("solaris".to_string()))
        );
        assert!("tv".parse::<Target>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Host::WindowsArm64).unwrap();
        assert_eq!(json, "\"windows_arm64\"");
        let host: Host = serde_json::from_str("\"mac\"").unwrap();
        assert_eq!(host, Host::Mac);
    }
}
