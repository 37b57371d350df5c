//! Minimal `{{placeholder}}` rendering.
//!
//! Only the exact `{{key}}` form is a placeholder; `{{ key }}` is plain text.
//! Unknown tokens, and any text that only looks like a token, are copied
//! through unchanged, so JSX like `style={{ width: 1 }}` survives rendering.

pub const ENTITY_NAME: &str = "entityName";
pub const FUNCTION_NAME: &str = "functionName";

/// Named placeholder values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholders {
    values: Vec<(String, String)>,
}

impl Placeholders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing any previous value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.values.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.values.push((key, value)),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Both `entityName` and `functionName` set to `name`.
    ///
    /// Templates use whichever they need; the other is simply absent.
    pub fn for_name(name: &str) -> Self {
        Self::new()
            .with(ENTITY_NAME, name)
            .with(FUNCTION_NAME, name)
    }
}

/// Substitute every `{{key}}` in `template` whose key is known.
pub fn render(template: &str, placeholders: &Placeholders) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        let Some(end) = after_open.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let key = &after_open[..end];
        match placeholders.get(key) {
            Some(value) => {
                out.push_str(value);
                rest = &after_open[end + 2..];
            }
            None => {
                // Emit one brace and retry from the next one, so `{{{key}}}`
                // still finds the token that starts one brace later.
                out.push('{');
                rest = &rest[start + 1..];
            }
        }
    }

    out.push_str(rest);
    out
}
