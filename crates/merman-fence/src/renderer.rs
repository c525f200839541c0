//! Minimal host renderer with a pluggable fence rule, on top of `pulldown-cmark`.
//!
//! Every fenced code block becomes a [`FenceToken`]; the HTML for it comes from
//! [`RendererRules::fence`] when one is installed and from [`MarkdownRenderer::render_token`]
//! otherwise. Indented code blocks are not fences and stay with `pulldown-cmark`.

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd, html};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenceToken {
    /// Info string after the opening fence (e.g. `mermaid` or `rust,ignore`).
    pub info: String,
    /// Literal block content, including the trailing newline of the last line.
    pub content: String,
}

impl FenceToken {
    pub fn new(info: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            info: info.into(),
            content: content.into(),
        }
    }

    /// First whitespace-delimited word of the info string.
    pub fn language(&self) -> Option<&str> {
        self.info.split_whitespace().next()
    }
}

/// Fence rule: all fence tokens of the document, the index of the one to render, and the
/// renderer (for falling back to [`MarkdownRenderer::render_token`]).
pub type FenceRule = Box<dyn Fn(&[FenceToken], usize, &MarkdownRenderer) -> String + Send + Sync>;

#[derive(Default)]
pub struct RendererRules {
    pub fence: Option<FenceRule>,
}

impl std::fmt::Debug for RendererRules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RendererRules")
            .field("fence", &self.fence.as_ref().map(|_| "<rule>"))
            .finish()
    }
}

/// A renderer extension. Installation happens once, at registration time.
pub trait Plugin {
    fn install(self, renderer: &mut MarkdownRenderer);
}

enum Slot<'a> {
    Event(Event<'a>),
    Fence(usize),
}

#[derive(Debug)]
pub struct MarkdownRenderer {
    options: Options,
    pub rules: RendererRules,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::with_options(
            Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS,
        )
    }
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: Options) -> Self {
        Self {
            options,
            rules: RendererRules::default(),
        }
    }

    pub fn options(&self) -> Options {
        self.options
    }

    pub fn use_plugin<P: Plugin>(&mut self, plugin: P) -> &mut Self {
        plugin.install(self);
        self
    }

    /// Generic rendering of one fence token, identical to what `pulldown-cmark` emits for the
    /// block on its own.
    pub fn render_token(&self, tokens: &[FenceToken], idx: usize) -> String {
        let Some(token) = tokens.get(idx) else {
            return String::new();
        };
        let events = [
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(CowStr::from(
                token.info.as_str(),
            )))),
            Event::Text(CowStr::from(token.content.as_str())),
            Event::End(TagEnd::CodeBlock),
        ];
        let mut out = String::new();
        html::push_html(&mut out, events.into_iter());
        out
    }

    fn render_fence(&self, tokens: &[FenceToken], idx: usize) -> String {
        match &self.rules.fence {
            Some(rule) => rule(tokens, idx, self),
            None => self.render_token(tokens, idx),
        }
    }

    /// Collects every fenced code block of `markdown`, in document order.
    pub fn fence_tokens(&self, markdown: &str) -> Vec<FenceToken> {
        let (_, fences) = self.split(markdown);
        fences
    }

    fn split<'a>(&self, markdown: &'a str) -> (Vec<Slot<'a>>, Vec<FenceToken>) {
        let mut slots = Vec::new();
        let mut fences = Vec::new();
        let mut open: Option<FenceToken> = None;

        for event in Parser::new_ext(markdown, self.options) {
            match event {
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                    open = Some(FenceToken::new(info.to_string(), String::new()));
                }
                Event::Text(text) if open.is_some() => {
                    if let Some(token) = open.as_mut() {
                        token.content.push_str(&text);
                    }
                }
                Event::End(TagEnd::CodeBlock) if open.is_some() => {
                    if let Some(token) = open.take() {
                        slots.push(Slot::Fence(fences.len()));
                        fences.push(token);
                    }
                }
                other => slots.push(Slot::Event(other)),
            }
        }

        (slots, fences)
    }

    pub fn render(&self, markdown: &str) -> String {
        let (slots, fences) = self.split(markdown);
        let events = slots.into_iter().map(|slot| match slot {
            Slot::Event(event) => event,
            Slot::Fence(idx) => Event::Html(CowStr::from(self.render_fence(&fences, idx))),
        });

        let mut out = String::with_capacity(markdown.len() + markdown.len() / 2);
        html::push_html(&mut out, events);
        out
    }
}
