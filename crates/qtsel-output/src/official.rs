//! A shell script that drives the official Qt online installer.

use qtsel_model::Host;
use qtsel_state::{CompositeState, SelectableElement};

use crate::config::RenderConfig;
use crate::guard::{Readiness, SELECT_ARCHITECTURE};

/// Shown when neither a version nor a tool is chosen.
pub const SELECT_VERSION_OR_TOOL: &str =
    "Please select a version or a tool to install with the Qt online installer.";

const INSTALLER_FLAGS: [&str; 4] = [
    "--accept-licenses",
    "--default-answer",
    "--confirm-command",
    "install",
];

/// Render the download-and-install script for `state`.
///
/// Archive choices cannot be expressed to the official installer and are ignored.
#[must_use]
pub fn render_official_installer(state: &CompositeState, config: &RenderConfig) -> String {
    let mut packages = Vec::new();
    match Readiness::of(state) {
        Readiness::NothingSelected => return SELECT_VERSION_OR_TOOL.to_string(),
        Readiness::NeedsArchitecture => return SELECT_ARCHITECTURE.to_string(),
        Readiness::ToolsOnly => {}
        Readiness::Complete => {
            packages.extend(state.base_package_name());
            packages.extend(state.selected_module_packages());
        }
    }
    packages.extend(
        state
            .selected_tools()
            .values()
            .flat_map(|tool| tool.selected_variants().map(SelectableElement::name))
            .map(str::to_string),
    );

    let host = state.host();
    let installer = config.unified_installer(host);
    let url = config.installer_url(host);
    let (mut lines, program) = preamble(host, installer, &url);

    let continuation = if host.is_windows() { " `" } else { " \\" };
    let arguments: Vec<&str> = INSTALLER_FLAGS
        .into_iter()
        .chain(packages.iter().map(String::as_str))
        .collect();
    lines.push(format!("{program}{continuation}"));
    for (index, argument) in arguments.iter().enumerate() {
        let last = index + 1 == arguments.len();
        let suffix = if last { "" } else { continuation };
        lines.push(format!("    {argument}{suffix}"));
    }
    lines.join("\n")
}

/// Download commands and the path of the installer executable.
fn preamble(host: Host, installer: &str, url: &str) -> (Vec<String>, String) {
    match host {
        Host::Windows | Host::WindowsArm64 => (
            vec![format!("Invoke-WebRequest -OutFile '{installer}' '{url}'")],
            format!(".\\{installer}"),
        ),
        Host::Mac => {
            let stem = installer.strip_suffix(".dmg").unwrap_or(installer);
            (
                vec![
                    format!("curl -L -O {url}"),
                    format!("hdiutil attach {installer}"),
                ],
                format!("/Volumes/{stem}/{stem}.app/Contents/MacOS/{stem}"),
            )
        }
        Host::Linux | Host::LinuxArm64 => (
            vec![
                format!("curl -L -O {url}"),
                format!("chmod u+x {installer}"),
            ],
            format!("./{installer}"),
        ),
    }
}
