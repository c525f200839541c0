use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_THEME: &str = "default";
pub const DEFAULT_JS_URL: &str = "https://cdn.jsdelivr.net/npm/mermaid@11/dist/mermaid.min.js";

/// Options supplied once when the plugin is registered.
///
/// Deserializes from the JSON shape `{"theme": .., "js_url": .., "css_url": ..,
/// "viewer_js_url": .., "theme_variables": {..}, "html_only": ..}`; every key is optional and
/// unknown keys are ignored. URLs are passed through unvalidated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FenceOptions {
    pub theme: String,
    pub js_url: String,
    /// Stylesheet URL. When absent the packaged stylesheet is inlined into every widget.
    pub css_url: Option<String>,
    /// Viewer script URL. When absent the viewer is inlined (and guarded) in every widget.
    pub viewer_js_url: Option<String>,
    pub theme_variables: IndexMap<String, String>,
    /// Emit only the static widget markup, without any `<style>`, `<link>` or `<script>`.
    pub html_only: bool,
}

impl Default for FenceOptions {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            js_url: DEFAULT_JS_URL.to_string(),
            css_url: None,
            viewer_js_url: None,
            theme_variables: IndexMap::new(),
            html_only: false,
        }
    }
}

impl FenceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str::<Self>(json)?.normalized())
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| Error::io(path, err))?;
        Self::from_json_str(&text)
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    pub fn with_js_url(mut self, url: impl Into<String>) -> Self {
        self.js_url = url.into();
        self
    }

    pub fn with_css_url(mut self, url: impl Into<String>) -> Self {
        self.css_url = Some(url.into());
        self
    }

    pub fn with_viewer_js_url(mut self, url: impl Into<String>) -> Self {
        self.viewer_js_url = Some(url.into());
        self
    }

    pub fn with_theme_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.theme_variables.insert(key.into(), value.into());
        self
    }

    pub fn with_html_only(mut self, html_only: bool) -> Self {
        self.html_only = html_only;
        self
    }

    /// Treats blank strings like missing values: blank theme/library URL fall back to their
    /// defaults and blank stylesheet/viewer URLs switch back to inlining.
    pub fn normalized(mut self) -> Self {
        if self.theme.trim().is_empty() {
            self.theme = DEFAULT_THEME.to_string();
        }
        if self.js_url.trim().is_empty() {
            self.js_url = DEFAULT_JS_URL.to_string();
        }
        self.css_url = self.css_url.filter(|u| !u.trim().is_empty());
        self.viewer_js_url = self.viewer_js_url.filter(|u| !u.trim().is_empty());
        self
    }
}
