use crate::host::{Clipboard, Cursor, Timer, WidgetDocument, WidgetElements};
use crate::library::{LibraryCache, LibrarySettings, SharedLoad};
use crate::{LoadError, RenderError, ViewerAction, ViewerState};
use futures::FutureExt;
use futures::future::LocalBoxFuture;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::Rc;

pub const COPIED_LABEL: &str = "Copied!";
pub const COPY_FEEDBACK_MILLIS: u64 = 2000;
pub const RENDER_FAILURE_PREFIX: &str = "Failed to render diagram: ";
pub const LOAD_FAILURE_PREFIX: &str = "Diagram library unavailable";

/// Arguments of the page-global `initMermaidDiagram(id, libraryUrl, theme, themeVariables?)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitRequest {
    pub id: String,
    pub library_url: String,
    pub theme: String,
    pub theme_variables: IndexMap<String, String>,
}

impl InitRequest {
    pub fn new(
        id: impl Into<String>,
        library_url: impl Into<String>,
        theme: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            library_url: library_url.into(),
            theme: theme.into(),
            theme_variables: IndexMap::new(),
        }
    }

    pub fn with_theme_variables(mut self, theme_variables: IndexMap<String, String>) -> Self {
        self.theme_variables = theme_variables;
        self
    }
}

/// Terminal state of one widget's render attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered,
    RenderFailed(RenderError),
    LoadFailed(LoadError),
}

/// Markup shown in place of the diagram when the library rejects the source.
pub fn render_failure_html(err: &RenderError) -> String {
    format!(
        "<p style=\"color: red;\">{RENDER_FAILURE_PREFIX}{}</p>",
        htmlize::escape_text(err.message.as_str())
    )
}

/// Markup shown when the library script itself never became available.
pub fn load_failure_html(err: &LoadError) -> String {
    format!(
        "<p style=\"color: red;\">{LOAD_FAILURE_PREFIX} ({}): {}</p>",
        htmlize::escape_text(err.url.as_str()),
        htmlize::escape_text(err.message.as_str())
    )
}

/// Controller for one widget instance.
pub struct ViewerController<W> {
    id: String,
    widget: W,
    state: RefCell<ViewerState>,
}

impl<W: WidgetElements> ViewerController<W> {
    pub fn new(id: impl Into<String>, widget: W) -> Self {
        Self {
            id: id.into(),
            widget,
            state: RefCell::new(ViewerState::new()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn state(&self) -> ViewerState {
        self.state.borrow().clone()
    }

    fn apply_transform(&self) {
        let transform = self.state.borrow().transform_css();
        self.widget.set_content_transform(&transform);
    }

    /// Handles a grid-panel click. Copy is asynchronous and goes through
    /// [`ViewerController::copy_source`] instead.
    pub fn click(&self, action: ViewerAction) -> bool {
        let changed = self.state.borrow_mut().apply(action);
        if changed {
            self.apply_transform();
        }
        changed
    }

    /// Event delegation entry point: resolves the clicked control from its `class` attribute.
    pub fn click_class_list(&self, class_list: &str) -> Option<ViewerAction> {
        let action = ViewerAction::from_class_list(class_list)?;
        self.click(action);
        Some(action)
    }

    pub fn pointer_down(&self, x: f64, y: f64) -> bool {
        let started = self.state.borrow_mut().begin_drag(x, y);
        if started {
            self.widget.set_viewport_cursor(Cursor::Grabbing);
        }
        started
    }

    pub fn pointer_move(&self, x: f64, y: f64) -> bool {
        let moved = self.state.borrow_mut().drag_to(x, y);
        if moved {
            self.apply_transform();
        }
        moved
    }

    pub fn pointer_up(&self) -> bool {
        let ended = self.state.borrow_mut().end_drag();
        if ended {
            self.widget.set_viewport_cursor(Cursor::Grab);
        }
        ended
    }

    /// Copies the diagram source and flashes the copy label. Clipboard failures are swallowed.
    pub async fn copy_source(&self, clipboard: &dyn Clipboard, timer: &dyn Timer) -> bool {
        let source = self.widget.source_text();
        if let Err(err) = clipboard.write_text(&source).await {
            tracing::debug!(id = %self.id, error = %err, "copy to clipboard failed");
            return false;
        }

        let original = self.widget.copy_label();
        self.widget.set_copy_label(COPIED_LABEL);
        timer.sleep(COPY_FEEDBACK_MILLIS).await;
        if let Some(original) = original {
            self.widget.set_copy_label(&original);
        }
        true
    }

    /// Waits for the shared library load and renders this widget's diagram into the viewport.
    pub async fn render(&self, load: SharedLoad) -> RenderOutcome {
        let library = match load.await {
            Ok(library) => library,
            Err(err) => {
                tracing::warn!(id = %self.id, error = %err, "diagram library failed to load");
                self.widget.append_content(&load_failure_html(&err));
                return RenderOutcome::LoadFailed(err);
            }
        };

        let svg_id = format!("{}-svg", self.id);
        let source = self.widget.source_text();
        match library.render(&svg_id, &source).await {
            Ok(svg) => {
                self.widget.append_content(&svg);
                RenderOutcome::Rendered
            }
            Err(err) => {
                tracing::warn!(id = %self.id, error = %err, "diagram rendering error");
                self.widget.append_content(&render_failure_html(&err));
                RenderOutcome::RenderFailed(err)
            }
        }
    }
}

/// A wired widget plus its pending render. The caller drives `rendering` on its executor.
pub struct ViewerInstance<W> {
    pub controller: Rc<ViewerController<W>>,
    pub rendering: LocalBoxFuture<'static, RenderOutcome>,
}

/// Initializes the widget with container id `request.id`.
///
/// Returns `None` when the container is not in the document. Interaction handling is available
/// on the returned controller immediately, independent of how rendering ends.
pub fn init_diagram<D>(
    document: &D,
    cache: &LibraryCache,
    request: InitRequest,
) -> Option<ViewerInstance<D::Widget>>
where
    D: WidgetDocument,
    D::Widget: 'static,
{
    let Some(widget) = document.find_widget(&request.id) else {
        tracing::debug!(id = %request.id, "diagram container not found; skipping");
        return None;
    };

    let controller = Rc::new(ViewerController::new(request.id, widget));
    let settings = LibrarySettings::new(request.theme, request.theme_variables);
    let load = cache.acquire(&request.library_url, &settings);

    let rendering = {
        let controller = Rc::clone(&controller);
        async move { controller.render(load).await }.boxed_local()
    };

    Some(ViewerInstance {
        controller,
        rendering,
    })
}
