//! Migration templates: TOML definitions compiled into matchable templates.

use regex::Regex;
use serde::{Deserialize, Serialize};
use unvendor_core::errors::RegistryError;
use unvendor_core::Feature;

use super::templating::{render, Placeholders};

/// On-disk template document (one per TOML file).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateSpec {
    pub template: TemplateDef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Regex matched against a feature's usage strings.
    pub pattern: String,
    /// REST endpoints the generated code targets; placeholders allowed.
    #[serde(default)]
    pub endpoints: Vec<String>,
    pub body: String,
    #[serde(default)]
    pub test: Option<String>,
    #[serde(default)]
    pub schema: Option<String>,
}

/// A compiled template, immutable once built.
#[derive(Debug, Clone)]
pub struct MigrationTemplate {
    pub name: String,
    pub description: String,
    pub pattern: Regex,
    pub endpoints: Vec<String>,
    pub body: String,
    pub test: Option<String>,
    pub schema: Option<String>,
}

impl MigrationTemplate {
    pub fn load_from_str(toml_str: &str) -> Result<Self, RegistryError> {
        let spec: TemplateSpec =
            toml::from_str(toml_str).map_err(|e| RegistryError::InvalidTemplate {
                name: "<unparsed>".to_string(),
                message: format!("TOML parse error: {e}"),
            })?;
        Self::compile(spec.template)
    }

    pub fn compile(def: TemplateDef) -> Result<Self, RegistryError> {
        let pattern = Regex::new(&def.pattern).map_err(|e| RegistryError::InvalidTemplate {
            name: def.name.clone(),
            message: e.to_string(),
        })?;
        Ok(Self {
            name: def.name,
            description: def.description,
            pattern,
            endpoints: def.endpoints,
            body: def.body,
            test: def.test,
            schema: def.schema,
        })
    }

    /// True if the pattern matches any usage string.
    pub fn matches_usage(&self, usage: &[String]) -> bool {
        usage.iter().any(|u| self.pattern.is_match(u))
    }

    /// Render body, then test scaffold, then schema, separated by blank lines.
    ///
    /// Body and test use the lower-cased feature name; the schema keeps the
    /// original casing for its type name.
    pub fn render(&self, feature: &Feature) -> String {
        let lowered = Placeholders::for_name(&feature.name.to_lowercase());
        let mut script = render(self.body.trim_end(), &lowered);

        if let Some(test) = &self.test {
            script.push_str("\n\n");
            script.push_str(&render(test.trim_end(), &lowered));
        }
        if let Some(schema) = &self.schema {
            let original = Placeholders::for_name(&feature.name);
            script.push_str("\n\n");
            script.push_str(&render(schema.trim_end(), &original));
        }

        script.push('\n');
        script
    }

    /// Endpoints with the lower-cased feature name substituted.
    pub fn render_endpoints(&self, feature: &Feature) -> Vec<String> {
        let lowered = Placeholders::for_name(&feature.name.to_lowercase());
        self.endpoints.iter().map(|e| render(e, &lowered)).collect()
    }
}
