#![forbid(unsafe_code)]

//! Viewer controller for embedded Mermaid diagram widgets.
//!
//! The controller is host-agnostic: the DOM, the clipboard, timers, and the diagram-rendering
//! library are reached through the traits in [`host`] and [`library`]. The packaged
//! `viewer.js` shipped by `merman-fence` is the browser binding of the same state machine;
//! its library acquisition takes the same branches as [`LibraryCache::acquire`]:
//!
//! | [`LibraryCache`]                      | `viewer.js`                              |
//! |---------------------------------------|------------------------------------------|
//! | load already held for the URL         | `libraryLoads` entry                     |
//! | global handle                         | `window.mermaid`                         |
//! | [`LibraryLoader::find_existing`]      | `script[src="{url}"]` already on the page |
//! | [`LibraryLoader::load`]               | new `<script>` element                   |
//!
//! Design goals:
//! - one [`ViewerState`] per widget instance, closed over its own widget handle
//! - one page-wide [`LibraryCache`] (single-flight per library URL)
//! - a shared [`ViewerAction`] enumeration instead of ad hoc class-name matching

pub mod action;
pub mod controller;
pub mod error;
pub mod host;
pub mod library;
pub mod state;

pub use action::ViewerAction;
pub use controller::{InitRequest, RenderOutcome, ViewerController, ViewerInstance, init_diagram};
pub use error::{ClipboardError, LoadError, RenderError};
pub use host::{Clipboard, Cursor, Timer, WidgetDocument, WidgetElements};
pub use library::{DiagramLibrary, LibraryCache, LibraryLoader, LibrarySettings, SharedLoad};
pub use state::{DragSession, ViewerState};

#[cfg(test)]
mod tests;
