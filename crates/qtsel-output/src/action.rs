//! A `jurplel/install-qt-action` workflow step.

use std::sync::LazyLock;

use qtsel_metadata::module_name;
use qtsel_state::{ActionVersion, CompositeState, SelectableElement, ToolData};
use regex::Regex;

use crate::config::RenderConfig;
use crate::guard::{Readiness, SELECT_ARCHITECTURE};

/// Shown when neither a version nor a tool is chosen.
pub const SELECT_VERSION_OR_TOOL: &str =
    "Please select a version or a tool to configure install-qt-action.";

/// Versions the v2 action can pin a tool to.
static SEMVER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+\.\d+\.\d+(?:-([0-9a-zA-Z.-]+))?(?:\+([0-9a-zA-Z.-]+))?$")
        .expect("Invalid semver regex")
});

/// Render the workflow step for `state`.
#[must_use]
pub fn render_install_qt_action(state: &CompositeState, config: &RenderConfig) -> String {
    let readiness = Readiness::of(state);
    match readiness {
        Readiness::NothingSelected => return SELECT_VERSION_OR_TOOL.to_string(),
        Readiness::NeedsArchitecture => return SELECT_ARCHITECTURE.to_string(),
        Readiness::ToolsOnly | Readiness::Complete => {}
    }

    let action = state.action_version();
    let mut step = Step::new(config, action);
    if readiness == Readiness::ToolsOnly {
        step.key("tools-only", "true");
        step.key("host", state.host().as_str());
        step.key("target", state.target().as_str());
        step.key("tools", &tools_value(state, action));
        return step.finish();
    }

    step.key("version", &state.version().selected().to_string());
    step.key("host", state.host().as_str());
    step.key("target", state.target().as_str());
    step.key("arch", &state.arch().selected().to_string());

    let modules = state.modules();
    if modules.has_selections() {
        let names: Vec<&str> = modules
            .options_turned_on()
            .into_iter()
            .map(module_name)
            .collect();
        step.key("modules", &names.join(" "));
    }

    if state.has_selected_tools() {
        step.key("tools", &tools_value(state, action));
    }

    let archives = state.archives();
    if action.supports_archives() && !archives.is_empty() && !archives.has_all_on() {
        step.key("archives", &archives.options_turned_on().join(" "));
    }
    step.finish()
}

/// Space-separated tool entries in the syntax of `action`.
fn tools_value(state: &CompositeState, action: ActionVersion) -> String {
    let entries: Vec<String> = state
        .selected_tools()
        .values()
        .flat_map(|tool| {
            if action.uses_versioned_tools() {
                versioned_entries(tool)
            } else {
                variant_entries(tool)
            }
        })
        .collect();
    entries.join(" ")
}

/// `tool,version,variant` for each selected variant with a semver version.
fn versioned_entries(tool: &ToolData) -> Vec<String> {
    tool.selected_variants()
        .filter_map(|variant| {
            let version = variant.package().map(|p| p.version.as_str())?;
            SEMVER
                .is_match(version)
                .then(|| format!("{},{version},{}", tool.name(), variant.name()))
        })
        .collect()
}

/// `tool` when every variant is on, else `tool,variant` per selected variant.
fn variant_entries(tool: &ToolData) -> Vec<String> {
    if tool.has_all_on() {
        return vec![tool.name().to_string()];
    }
    tool.selected_variants()
        .map(SelectableElement::name)
        .map(|variant| format!("{},{variant}", tool.name()))
        .collect()
}

/// Accumulates the `with:` block of one step.
struct Step {
    text: String,
}

impl Step {
    fn new(config: &RenderConfig, action: ActionVersion) -> Self {
        let text = format!(
            "    - name: Install Qt\n      uses: {}@{action}\n      with:",
            config.action_repository
        );
        Self { text }
    }

    fn key(&mut self, key: &str, value: &str) {
        self.text.push_str("\n        ");
        self.text.push_str(key);
        self.text.push_str(": '");
        self.text.push_str(&value.replace('\'', "''"));
        self.text.push('\'');
    }

    fn finish(self) -> String {
        self.text
    }
}
