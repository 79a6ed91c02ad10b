//! `aqt install-qt` / `aqt install-tool` command lines.

use qtsel_metadata::module_name;
use qtsel_state::{CompositeState, SelectableElement, ToolData};

use crate::config::RenderConfig;
use crate::guard::{Readiness, SELECT_ARCHITECTURE};

/// Shown when neither a version nor a tool is chosen.
pub const SELECT_VERSION_OR_TOOL: &str = "Please select a version or a tool.";

/// Render the aqt commands for `state`.
#[must_use]
pub fn render_aqt_command(state: &CompositeState, config: &RenderConfig) -> String {
    match Readiness::of(state) {
        Readiness::NothingSelected => SELECT_VERSION_OR_TOOL.to_string(),
        Readiness::NeedsArchitecture => SELECT_ARCHITECTURE.to_string(),
        Readiness::ToolsOnly => tool_lines(state, config).join("\n"),
        Readiness::Complete => {
            let mut lines = vec![install_qt_line(state, config)];
            lines.extend(tool_lines(state, config));
            lines.join("\n")
        }
    }
}

fn install_qt_line(state: &CompositeState, config: &RenderConfig) -> String {
    let version = state.version().selected();
    let arch = state.arch().selected();
    let mut line = format!(
        "{} install-qt {} {} {version} {arch}",
        config.aqt_program,
        state.host(),
        state.target(),
    );

    let modules = state.modules();
    if modules.has_all_on() {
        line.push_str(" -m all");
    } else if modules.has_selections() {
        line.push_str(" -m");
        for module in modules.options_turned_on() {
            line.push(' ');
            line.push_str(module_name(module));
        }
    }

    let archives = state.archives();
    if archives.has_all_off() && !archives.is_empty() {
        line.push_str(" --noarchives");
    } else if !archives.has_all_on() && !archives.is_empty() {
        line.push_str(" --archives ");
        line.push_str(&archives.options_turned_on().join(" "));
    }
    line
}

/// One `install-tool` line per tool, or per selected variant when only some are on.
fn tool_lines(state: &CompositeState, config: &RenderConfig) -> Vec<String> {
    let prefix = format!(
        "{} install-tool {} {}",
        config.aqt_program,
        state.host(),
        state.target()
    );
    state
        .selected_tools()
        .values()
        .flat_map(|tool| tool_commands(&prefix, tool))
        .collect()
}

fn tool_commands(prefix: &str, tool: &ToolData) -> Vec<String> {
    if tool.has_all_on() {
        return vec![format!("{prefix} {}", tool.name())];
    }
    tool.selected_variants()
        .map(SelectableElement::name)
        .map(|variant| format!("{prefix} {} {variant}", tool.name()))
        .collect()
}
