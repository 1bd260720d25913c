use serde::{Deserialize, Serialize};

pub const DEFAULT_THEME: &str = "textmate";
pub const DEFAULT_MODE: &str = "html";

const THEME_NAMESPACE: &str = "ace/theme/";
const MODE_NAMESPACE: &str = "ace/mode/";

pub fn theme_path(theme: &str) -> String {
    format!("{THEME_NAMESPACE}{theme}")
}

pub fn mode_path(mode: &str) -> String {
    format!("{MODE_NAMESPACE}{mode}")
}

/// Syntax highlighting mode: a built-in mode by name, or a custom mode
/// definition handed to the editor session untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Mode<M> {
    Named(String),
    Custom(M),
}

impl<M> Mode<M> {
    pub fn named(name: impl Into<String>) -> Self {
        Mode::Named(name.into())
    }
}

impl<M> Default for Mode<M> {
    fn default() -> Self {
        Mode::Named(DEFAULT_MODE.to_string())
    }
}

impl<M> From<&str> for Mode<M> {
    fn from(name: &str) -> Self {
        Mode::named(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig<O, M> {
    pub options: O,
    pub theme: String,
    pub mode: Mode<M>,
    pub read_only: bool,
    /// When false, externally supplied text is ignored.
    pub auto_update_content: bool,
    /// Debounce window for outward propagation. Zero propagates synchronously.
    pub debounce_ms: u32,
}

impl<O: Default, M> Default for EditorConfig<O, M> {
    fn default() -> Self {
        Self {
            options: O::default(),
            theme: DEFAULT_THEME.to_string(),
            mode: Mode::default(),
            read_only: false,
            auto_update_content: true,
            debounce_ms: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    #[test]
    fn namespaces_names() {
        assert_eq!(mode_path("json"), "ace/mode/json");
        assert_eq!(theme_path("monokai"), "ace/theme/monokai");
    }

    #[test]
    fn mode_from_json() {
        let named: Mode<Value> = serde_json::from_value(json!("xml")).unwrap();
        assert_eq!(named, Mode::named("xml"));

        let custom: Mode<Value> =
            serde_json::from_value(json!({ "path": "ace/mode/custom" })).unwrap();
        assert_eq!(custom, Mode::Custom(json!({ "path": "ace/mode/custom" })));
    }

    #[test]
    fn defaults() {
        let config: EditorConfig<(), ()> = EditorConfig::default();
        assert_eq!(config.theme, "textmate");
        assert_eq!(config.mode, Mode::named("html"));
        assert!(!config.read_only);
        assert!(config.auto_update_content);
        assert_eq!(config.debounce_ms, 0);
    }
}
