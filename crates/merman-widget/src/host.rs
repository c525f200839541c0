//! Seams to the embedding page.
//!
//! Handles follow DOM semantics: they are cheap to clone, shared, and mutate through `&self`.

use crate::ClipboardError;
use futures::future::LocalBoxFuture;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Grab,
    Grabbing,
}

impl Cursor {
    pub fn as_css(self) -> &'static str {
        match self {
            Cursor::Grab => "grab",
            Cursor::Grabbing => "grabbing",
        }
    }
}

/// The elements of one located widget (container, viewport, content, code, copy control).
pub trait WidgetElements {
    /// Text content of the hidden code element, i.e. the unescaped diagram source.
    fn source_text(&self) -> String;

    /// Appends markup to the end of the content viewport.
    fn append_content(&self, html: &str);

    fn set_content_transform(&self, transform: &str);

    fn set_viewport_cursor(&self, cursor: Cursor);

    /// Current label of the copy control, `None` when the control is missing.
    fn copy_label(&self) -> Option<String>;

    fn set_copy_label(&self, label: &str);
}

pub trait WidgetDocument {
    type Widget: WidgetElements;

    /// Looks up a widget by container id. Returns `None` when the container or any element the
    /// controller requires (view container, content viewport, code element) is missing.
    fn find_widget(&self, id: &str) -> Option<Self::Widget>;
}

pub trait Clipboard {
    fn write_text(&self, text: &str) -> LocalBoxFuture<'static, Result<(), ClipboardError>>;
}

pub trait Timer {
    fn sleep(&self, millis: u64) -> LocalBoxFuture<'static, ()>;
}
