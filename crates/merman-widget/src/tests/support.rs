use crate::*;
use futures::FutureExt;
use futures::channel::oneshot;
use futures::future::{self, LocalBoxFuture, Shared};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Default)]
pub struct FakeWidgetState {
    source: String,
    content: RefCell<Vec<String>>,
    transform: RefCell<Option<String>>,
    cursor: Cell<Option<Cursor>>,
    copy_label: RefCell<Option<String>>,
}

#[derive(Clone, Default)]
pub struct FakeWidget(Rc<FakeWidgetState>);

impl FakeWidget {
    pub fn new(source: &str) -> Self {
        Self(Rc::new(FakeWidgetState {
            source: source.to_string(),
            copy_label: RefCell::new(Some(ViewerAction::CopySource.label().to_string())),
            ..Default::default()
        }))
    }

    pub fn without_copy_control(source: &str) -> Self {
        Self(Rc::new(FakeWidgetState {
            source: source.to_string(),
            ..Default::default()
        }))
    }

    pub fn content(&self) -> Vec<String> {
        self.0.content.borrow().clone()
    }

    pub fn transform(&self) -> Option<String> {
        self.0.transform.borrow().clone()
    }

    pub fn cursor(&self) -> Option<Cursor> {
        self.0.cursor.get()
    }

    pub fn label(&self) -> Option<String> {
        self.0.copy_label.borrow().clone()
    }
}

impl WidgetElements for FakeWidget {
    fn source_text(&self) -> String {
        self.0.source.clone()
    }

    fn append_content(&self, html: &str) {
        self.0.content.borrow_mut().push(html.to_string());
    }

    fn set_content_transform(&self, transform: &str) {
        *self.0.transform.borrow_mut() = Some(transform.to_string());
    }

    fn set_viewport_cursor(&self, cursor: Cursor) {
        self.0.cursor.set(Some(cursor));
    }

    fn copy_label(&self) -> Option<String> {
        self.0.copy_label.borrow().clone()
    }

    fn set_copy_label(&self, label: &str) {
        let mut slot = self.0.copy_label.borrow_mut();
        if slot.is_some() {
            *slot = Some(label.to_string());
        }
    }
}

#[derive(Default)]
pub struct FakeDocument {
    widgets: HashMap<String, FakeWidget>,
}

impl FakeDocument {
    pub fn with(mut self, id: &str, widget: FakeWidget) -> Self {
        self.widgets.insert(id.to_string(), widget);
        self
    }
}

impl WidgetDocument for FakeDocument {
    type Widget = FakeWidget;

    fn find_widget(&self, id: &str) -> Option<FakeWidget> {
        self.widgets.get(id).cloned()
    }
}

/// Renders `<svg id=..>source</svg>`; sources containing `!!` are rejected as syntax errors.
#[derive(Default)]
pub struct FakeLibrary {
    pub initialized: RefCell<Vec<LibrarySettings>>,
    pub renders: Cell<usize>,
}

impl DiagramLibrary for FakeLibrary {
    fn initialize(&self, settings: &LibrarySettings) {
        self.initialized.borrow_mut().push(settings.clone());
    }

    fn render(
        &self,
        svg_id: &str,
        source: &str,
    ) -> LocalBoxFuture<'static, Result<String, RenderError>> {
        self.renders.set(self.renders.get() + 1);
        let result = if source.contains("!!") {
            Err(RenderError::new("Parse error on line 1: <unexpected>"))
        } else {
            Ok(format!("<svg id=\"{svg_id}\">{source}</svg>"))
        };
        future::ready(result).boxed_local()
    }
}

/// Loader whose fetches complete only once the test opens the gate.
///
/// URLs passed to [`GatedLoader::insert_script`] behave like a `<script src>` the page
/// added on its own: `find_existing` hands out a gated future for them.
pub struct GatedLoader {
    pub library: Rc<FakeLibrary>,
    pub loads: Cell<usize>,
    pub attached: Cell<usize>,
    pub fail: bool,
    page_scripts: RefCell<Vec<String>>,
    gate: Shared<oneshot::Receiver<()>>,
}

impl GatedLoader {
    pub fn new(library: Rc<FakeLibrary>, fail: bool) -> (Rc<Self>, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        let loader = Rc::new(Self {
            library,
            loads: Cell::new(0),
            attached: Cell::new(0),
            fail,
            page_scripts: RefCell::new(Vec::new()),
            gate: rx.shared(),
        });
        (loader, tx)
    }

    pub fn insert_script(&self, url: &str) {
        self.page_scripts.borrow_mut().push(url.to_string());
    }

    fn gated(&self, url: &str) -> LocalBoxFuture<'static, Result<Rc<dyn DiagramLibrary>, LoadError>> {
        let library: Rc<dyn DiagramLibrary> = self.library.clone();
        let url = url.to_string();
        let fail = self.fail;
        self.gate
            .clone()
            .map(move |_| {
                if fail {
                    Err(LoadError {
                        url,
                        message: "script error".to_string(),
                    })
                } else {
                    Ok(library)
                }
            })
            .boxed_local()
    }
}

impl LibraryLoader for GatedLoader {
    fn find_existing(
        &self,
        url: &str,
    ) -> Option<LocalBoxFuture<'static, Result<Rc<dyn DiagramLibrary>, LoadError>>> {
        if !self.page_scripts.borrow().iter().any(|u| u == url) {
            return None;
        }
        self.attached.set(self.attached.get() + 1);
        Some(self.gated(url))
    }

    fn load(
        &self,
        url: &str,
    ) -> LocalBoxFuture<'static, Result<Rc<dyn DiagramLibrary>, LoadError>> {
        self.loads.set(self.loads.get() + 1);
        self.gated(url)
    }
}

/// Loader that resolves immediately.
pub fn ready_cache(library: Rc<FakeLibrary>) -> (LibraryCache, Rc<GatedLoader>) {
    let (loader, tx) = GatedLoader::new(library, false);
    let _ = tx.send(());
    (LibraryCache::new(loader.clone()), loader)
}

#[derive(Default)]
pub struct RecordingClipboard {
    pub written: RefCell<Vec<String>>,
    pub deny: bool,
}

impl Clipboard for RecordingClipboard {
    fn write_text(&self, text: &str) -> LocalBoxFuture<'static, Result<(), ClipboardError>> {
        if self.deny {
            return future::ready(Err(ClipboardError {
                message: "permission denied".to_string(),
            }))
            .boxed_local();
        }
        self.written.borrow_mut().push(text.to_string());
        future::ready(Ok(())).boxed_local()
    }
}

/// Timer that fires when the test sends on the returned channel.
pub struct ManualTimer {
    pub requested: Cell<Option<u64>>,
    rx: RefCell<Option<oneshot::Receiver<()>>>,
}

impl ManualTimer {
    pub fn new() -> (Self, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                requested: Cell::new(None),
                rx: RefCell::new(Some(rx)),
            },
            tx,
        )
    }
}

impl Timer for ManualTimer {
    fn sleep(&self, millis: u64) -> LocalBoxFuture<'static, ()> {
        self.requested.set(Some(millis));
        match self.rx.borrow_mut().take() {
            Some(rx) => rx.map(|_| ()).boxed_local(),
            None => future::ready(()).boxed_local(),
        }
    }
}
