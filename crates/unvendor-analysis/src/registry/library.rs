//! Template library: built-in templates embedded at compile time.
//!
//! Registration order is significant. Selection is first match wins, so when
//! two patterns match the same usage the earlier template is used silently.

use unvendor_core::Feature;

use super::template::MigrationTemplate;

#[derive(Debug, Clone, Default)]
pub struct TemplateLibrary {
    templates: Vec<MigrationTemplate>,
}

impl TemplateLibrary {
    /// Library from pre-built templates, in the given order.
    pub fn new(templates: Vec<MigrationTemplate>) -> Self {
        Self { templates }
    }

    /// The ten built-in templates. A template that fails to load is logged and skipped.
    pub fn with_builtins() -> Self {
        let mut templates = Vec::new();
        for (name, toml_str) in builtin_templates() {
            match MigrationTemplate::load_from_str(toml_str) {
                Ok(template) => templates.push(template),
                Err(e) => tracing::warn!(template = name, error = %e, "failed to load built-in template"),
            }
        }
        Self { templates }
    }

    /// First template, in registration order, whose pattern matches any usage string.
    pub fn find_match(&self, feature: &Feature) -> Option<&MigrationTemplate> {
        self.templates
            .iter()
            .find(|t| t.matches_usage(&feature.usage))
    }

    pub fn get(&self, name: &str) -> Option<&MigrationTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MigrationTemplate> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Built-in templates in registration order.
fn builtin_templates() -> Vec<(&'static str, &'static str)> {
    vec![
        ("crud_entity", include_str!("templates/crud_entity.toml")),
        ("ai_function", include_str!("templates/ai_function.toml")),
        ("auth", include_str!("templates/auth.toml")),
        ("react_data_hook", include_str!("templates/react_data_hook.toml")),
        ("state_store", include_str!("templates/state_store.toml")),
        ("file_upload", include_str!("templates/file_upload.toml")),
        ("realtime_subscription", include_str!("templates/realtime_subscription.toml")),
        ("search_filter", include_str!("templates/search_filter.toml")),
        ("batch_operations", include_str!("templates/batch_operations.toml")),
        ("error_handling", include_str!("templates/error_handling.toml")),
    ]
}
