//! Auxiliary tools and their selectable variants.

use std::sync::Arc;

use qtsel_model::PackageRecord;

use crate::select_many::{ElementMap, SelectableElement};

/// One added tool, e.g. `tools_ifw`, and its variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolData {
    name: String,
    is_loading: bool,
    variants: Arc<ElementMap>,
}

impl ToolData {
    /// A tool whose variants are still being fetched.
    #[must_use]
    pub fn loading(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_loading: true,
            variants: Arc::default(),
        }
    }

    /// A loaded tool with every variant turned off.
    #[must_use]
    pub fn loaded(name: impl Into<String>, variants: Vec<PackageRecord>) -> Self {
        let variants = variants
            .into_iter()
            .map(|package| {
                let element = SelectableElement::from_package(Arc::new(package), false);
                (element.name().to_string(), element)
            })
            .collect();
        Self {
            name: name.into(),
            is_loading: false,
            variants: Arc::new(variants),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub fn variants(&self) -> &ElementMap {
        &self.variants
    }

    /// Whether any variant is turned on.
    #[must_use]
    pub fn has_selections(&self) -> bool {
        self.variants.values().any(SelectableElement::is_selected)
    }

    /// True when there is at least one variant and all of them are on.
    #[must_use]
    pub fn has_all_on(&self) -> bool {
        !self.variants.is_empty() && self.variants.values().all(SelectableElement::is_selected)
    }

    /// Variants that are on, in name order.
    pub fn selected_variants(&self) -> impl Iterator<Item = &SelectableElement> {
        self.variants.values().filter(|variant| variant.is_selected())
    }

    /// Turn one existing variant on or off.
    #[must_use]
    pub fn copy_with_variant_set(&self, variant: &str, on: bool) -> Self {
        debug_assert!(
            self.variants.contains_key(variant),
            "tool {} has no variant {variant:?}",
            self.name
        );
        let mut variants = ElementMap::clone(&self.variants);
        if let Some(element) = variants.get_mut(variant) {
            *element = element.with_selected(on);
        }
        Self {
            variants: Arc::new(variants),
            ..self.clone()
        }
    }

    /// Turn every variant on or off.
    #[must_use]
    pub fn copy_with_toggled_variants(&self, on: bool) -> Self {
        let variants = self
            .variants
            .iter()
            .map(|(name, element)| (name.clone(), element.with_selected(on)))
            .collect();
        Self {
            variants: Arc::new(variants),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ifw() -> ToolData {
        let variant = |name: &str| PackageRecord {
            name: name.to_string(),
            version: "4.7.0-0-202401311154".to_string(),
            downloadable_archives: vec!["installerbase.7z".to_string()],
            ..PackageRecord::default()
        };
        ToolData::loaded("tools_ifw", vec![variant("qt.tools.ifw.47"), variant("qt.tools.ifw.46")])
    }

    #[test]
    fn test_loaded_variants_start_off() {
        let tool = ifw();
        assert!(!tool.is_loading());
        assert!(!tool.has_selections());
        let names: Vec<&str> = tool.variants().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["qt.tools.ifw.46", "qt.tools.ifw.47"]);
    }

    #[test]
    fn test_variant_set_and_toggle() {
        let tool = ifw().copy_with_variant_set("qt.tools.ifw.47", true);
        assert!(tool.has_selections());
        assert!(!tool.has_all_on());
        let selected: Vec<&str> = tool.selected_variants().map(SelectableElement::name).collect();
        assert_eq!(selected, vec!["qt.tools.ifw.47"]);

        let tool = tool.copy_with_toggled_variants(true);
        assert!(tool.has_all_on());
        let tool = tool.copy_with_toggled_variants(false);
        assert!(!tool.has_selections());
    }

    #[test]
    fn test_loading_tool_is_empty() {
        let tool = ToolData::loading("tools_cmake");
        assert!(tool.is_loading());
        assert!(tool.variants().is_empty());
        assert!(!tool.has_all_on());
    }
}
