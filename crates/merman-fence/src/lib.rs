#![forbid(unsafe_code)]

//! Markdown fence plugin for interactive Mermaid diagrams.
//!
//! Fenced code blocks tagged `mermaid` are rendered as a self-contained widget: the escaped
//! diagram source in a hidden `<code>` element, a toolbar with a copy control, a pan/zoom pad,
//! and the script/style needed to render the diagram in the browser. Every other code block is
//! left to whatever fence rule was installed before.
//!
//! ```
//! use merman_fence::{FenceOptions, MarkdownRenderer, MermaidPlugin};
//!
//! let mut md = MarkdownRenderer::new();
//! md.use_plugin(MermaidPlugin::new(FenceOptions::default().with_theme("forest")));
//! let html = md.render("```mermaid\ngraph TD; A-->B\n```\n");
//! assert!(html.contains("class=\"mermaid-container\""));
//! ```

pub mod assets;
pub mod error;
pub mod escape;
pub mod id;
pub mod options;
pub mod plugin;
pub mod renderer;
pub mod template;

pub use error::{Error, Result};
pub use escape::escape_html;
pub use id::{DiagramId, IdSource, RandomIdSource};
pub use options::FenceOptions;
pub use plugin::{DIAGRAM_KEYWORD, MermaidPlugin};
pub use renderer::{FenceRule, FenceToken, MarkdownRenderer, Plugin, RendererRules};

/// Renders `markdown` with a fresh renderer that has only the Mermaid plugin installed.
pub fn render_markdown(markdown: &str, options: &FenceOptions) -> String {
    let mut renderer = MarkdownRenderer::new();
    renderer.use_plugin(MermaidPlugin::new(options.clone()));
    renderer.render(markdown)
}

#[cfg(test)]
mod tests;
