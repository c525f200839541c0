//! The `mermaid` fence rule.

use crate::assets::{STYLE_CSS, VIEWER_JS};
use crate::renderer::{FenceRule, FenceToken, MarkdownRenderer, Plugin};
use crate::{DiagramId, FenceOptions, IdSource, RandomIdSource, escape_html, template};
use std::sync::Arc;

/// Fence language that selects the diagram widget.
pub const DIAGRAM_KEYWORD: &str = "mermaid";

/// Page-global entry point defined by the viewer script.
pub const INIT_FUNCTION: &str = "initMermaidDiagram";

pub fn is_diagram_fence(info: &str) -> bool {
    info.split_whitespace().next() == Some(DIAGRAM_KEYWORD)
}

/// JSON-encodes `value` for use inside an inline `<script>`; `</` is escaped so the literal
/// cannot close the script element early.
fn script_literal(value: serde_json::Value) -> String {
    value.to_string().replace("</", "<\\/")
}

#[derive(Clone)]
pub struct MermaidPlugin {
    options: Arc<FenceOptions>,
    ids: Arc<dyn IdSource>,
}

impl std::fmt::Debug for MermaidPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MermaidPlugin")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Default for MermaidPlugin {
    fn default() -> Self {
        Self::new(FenceOptions::default())
    }
}

impl MermaidPlugin {
    pub fn new(options: FenceOptions) -> Self {
        Self {
            options: Arc::new(options.normalized()),
            ids: Arc::new(RandomIdSource),
        }
    }

    /// Replaces the random id generator (e.g. with a deterministic one for snapshots).
    pub fn with_id_source(mut self, ids: impl IdSource + 'static) -> Self {
        self.ids = Arc::new(ids);
        self
    }

    pub fn options(&self) -> &FenceOptions {
        &self.options
    }

    fn style_fragment(&self) -> String {
        if self.options.html_only {
            return String::new();
        }
        match &self.options.css_url {
            Some(url) => format!("<link rel=\"stylesheet\" href=\"{}\">", escape_html(url)),
            None => format!("<style>{STYLE_CSS}</style>"),
        }
    }

    fn script_fragment(&self, id: &DiagramId) -> String {
        if self.options.html_only {
            return String::new();
        }
        let id = script_literal(id.as_str().into());
        let js_url = script_literal(self.options.js_url.as_str().into());
        let theme = script_literal(self.options.theme.as_str().into());

        match &self.options.viewer_js_url {
            Some(viewer_url) => format!(
                "<script src=\"{}\"></script><script>window.{INIT_FUNCTION}({id}, {js_url}, {theme});</script>",
                escape_html(viewer_url)
            ),
            None => {
                let vars = script_literal(serde_json::Value::Object(
                    self.options
                        .theme_variables
                        .iter()
                        .map(|(k, v)| (k.clone(), serde_json::Value::from(v.as_str())))
                        .collect(),
                ));
                format!(
                    "<script>\nif (!window.{INIT_FUNCTION}) {{\n{VIEWER_JS}\n}}\nwindow.{INIT_FUNCTION}({id}, {js_url}, {theme}, {vars});\n</script>"
                )
            }
        }
    }

    /// Renders one diagram widget for raw (unescaped) `source`.
    pub fn render_diagram(&self, source: &str) -> String {
        let id = self.ids.next_id();
        tracing::debug!(id = %id, bytes = source.len(), "rendering mermaid fence");
        let code = escape_html(source);
        template::widget_html(
            &id,
            &code,
            &self.style_fragment(),
            &self.script_fragment(&id),
        )
    }
}

impl Plugin for MermaidPlugin {
    fn install(self, renderer: &mut MarkdownRenderer) {
        let previous = renderer.rules.fence.take();
        let rule: FenceRule = Box::new(
            move |tokens: &[FenceToken], idx: usize, md: &MarkdownRenderer| -> String {
                let Some(token) = tokens.get(idx) else {
                    return String::new();
                };
                if !is_diagram_fence(&token.info) {
                    return match &previous {
                        Some(rule) => rule(tokens, idx, md),
                        None => md.render_token(tokens, idx),
                    };
                }
                self.render_diagram(&token.content)
            },
        );
        renderer.rules.fence = Some(rule);
    }
}
