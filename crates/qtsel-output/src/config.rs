//! Settings shared by the renderers.

use std::collections::BTreeMap;

use qtsel_model::Host;
use serde::{Deserialize, Serialize};

/// Values the renderers interpolate that are not part of the selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Program name used for aqt commands.
    pub aqt_program: String,
    /// GitHub repository of the install-qt-action.
    pub action_repository: String,
    /// Where the official online installers are published.
    pub installer_base_url: String,
    /// Installer file names that differ from the published defaults.
    pub unified_installers: BTreeMap<Host, String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            aqt_program: "aqt".to_string(),
            action_repository: "jurplel/install-qt-action".to_string(),
            installer_base_url: "https://download.qt.io/official_releases/online_installers"
                .to_string(),
            unified_installers: BTreeMap::new(),
        }
    }
}

impl RenderConfig {
    /// Installer file name for `host`.
    #[must_use]
    pub fn unified_installer(&self, host: Host) -> &str {
        self.unified_installers
            .get(&host)
            .map_or(host.unified_installer(), String::as_str)
    }

    /// Override the installer file name for `host`.
    #[must_use]
    pub fn with_unified_installer(mut self, host: Host, name: impl Into<String>) -> Self {
        self.unified_installers.insert(host, name.into());
        self
    }

    /// Download URL of the installer for `host`.
    #[must_use]
    pub fn installer_url(&self, host: Host) -> String {
        format!(
            "{}/{}",
            self.installer_base_url.trim_end_matches('/'),
            self.unified_installer(host)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_installer_lookup() {
        let config = RenderConfig::default();
        assert_eq!(
            config.installer_url(Host::Linux),
            "https://download.qt.io/official_releases/online_installers/qt-unified-linux-x64-online.run"
        );

        let config = config.with_unified_installer(Host::Mac, "qt-unified-macOS-x64-4.6.1-online.dmg");
        assert_eq!(
            config.unified_installer(Host::Mac),
            "qt-unified-macOS-x64-4.6.1-online.dmg"
        );
    }

    #[test]
    fn test_partial_config_deserializes() {
        let config: RenderConfig =
            serde_json::from_str(r#"{"aqt_program": "python -m aqt"}"#).unwrap();
        assert_eq!(config.aqt_program, "python -m aqt");
        assert_eq!(config.action_repository, "jurplel/install-qt-action");
    }
}
