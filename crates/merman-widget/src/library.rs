//! Page-wide, single-flight access to the diagram-rendering library.

use crate::{LoadError, RenderError};
use futures::FutureExt;
use futures::future::{self, LocalBoxFuture, Shared};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

/// The external library that turns diagram source into SVG markup.
pub trait DiagramLibrary {
    fn initialize(&self, settings: &LibrarySettings);

    fn render(&self, svg_id: &str, source: &str)
    -> LocalBoxFuture<'static, Result<String, RenderError>>;
}

/// Fetches and evaluates the library script found at `url`.
pub trait LibraryLoader {
    /// A loader for `url` that the page inserted on its own (e.g. a `<script src>` that is
    /// still loading). The cache attaches to it instead of fetching `url` a second time.
    fn find_existing(
        &self,
        _url: &str,
    ) -> Option<LocalBoxFuture<'static, Result<Rc<dyn DiagramLibrary>, LoadError>>> {
        None
    }

    fn load(&self, url: &str) -> LocalBoxFuture<'static, Result<Rc<dyn DiagramLibrary>, LoadError>>;
}

/// One load of one library URL, shared by every widget that asked for it.
pub type SharedLoad = Shared<LocalBoxFuture<'static, Result<Rc<dyn DiagramLibrary>, LoadError>>>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowchartSettings {
    pub use_max_width: bool,
    pub html_labels: bool,
}

/// The object passed to the library's `initialize` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibrarySettings {
    pub start_on_load: bool,
    pub theme: String,
    pub security_level: String,
    pub font_size: u32,
    pub flowchart: FlowchartSettings,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub theme_variables: IndexMap<String, String>,
}

impl LibrarySettings {
    pub fn new(theme: impl Into<String>, theme_variables: IndexMap<String, String>) -> Self {
        Self {
            start_on_load: false,
            theme: theme.into(),
            security_level: "strict".to_string(),
            font_size: 16,
            flowchart: FlowchartSettings {
                use_max_width: true,
                html_labels: true,
            },
            theme_variables,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        // Every field is a plain string/number/bool/map of strings.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[derive(Default)]
struct CacheState {
    global: Option<Rc<dyn DiagramLibrary>>,
    /// Configure-once wrapper around `global`, shared by every URL that resolves to it.
    global_load: Option<SharedLoad>,
    loads: FxHashMap<String, SharedLoad>,
}

/// Library cache keyed by URL.
///
/// Lifecycle: created once per page with [`LibraryCache::new`], queried with
/// [`LibraryCache::lookup`], populated by [`LibraryCache::acquire`] (or up front with
/// [`LibraryCache::install_global`]). Entries are never evicted; a failed load stays failed.
#[derive(Clone)]
pub struct LibraryCache {
    state: Rc<RefCell<CacheState>>,
    loader: Rc<dyn LibraryLoader>,
}

impl std::fmt::Debug for LibraryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("LibraryCache")
            .field("has_global", &state.global.is_some())
            .field("urls", &state.loads.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl LibraryCache {
    pub fn new(loader: Rc<dyn LibraryLoader>) -> Self {
        Self {
            state: Rc::new(RefCell::new(CacheState::default())),
            loader,
        }
    }

    /// Registers a library handle that is already present on the page. Later acquisitions use
    /// it instead of fetching their URL, and it is configured once, by the first of them.
    pub fn install_global(&self, library: Rc<dyn DiagramLibrary>) {
        let mut state = self.state.borrow_mut();
        state.global = Some(library);
        state.global_load = None;
    }

    /// Returns the configured library for `url` if its load has already completed successfully.
    pub fn lookup(&self, url: &str) -> Option<Rc<dyn DiagramLibrary>> {
        let state = self.state.borrow();
        state.loads.get(url)?.peek()?.as_ref().ok().cloned()
    }

    pub fn is_pending(&self, url: &str) -> bool {
        self.state
            .borrow()
            .loads
            .get(url)
            .is_some_and(|load| load.peek().is_none())
    }

    /// Returns the shared load for `url`: a load this cache already holds for it, else the
    /// global handle, else a loader the page inserted for `url`, else a new load. The first
    /// library to finish loading becomes the global handle for later URLs.
    ///
    /// Each loaded library is configured with `settings` exactly once, by the first
    /// acquisition that reaches it; later callers get the already-configured handle.
    pub fn acquire(&self, url: &str, settings: &LibrarySettings) -> SharedLoad {
        let global = {
            let mut guard = self.state.borrow_mut();
            let state = &mut *guard;
            if let Some(load) = state.loads.get(url) {
                tracing::debug!(url, "attaching to existing diagram library load");
                return load.clone();
            }
            state.global.clone().map(|library| {
                state
                    .global_load
                    .get_or_insert_with(|| {
                        tracing::debug!(url, "using diagram library already on the page");
                        configure(&self.state, future::ready(Ok(library)).boxed_local(), settings)
                    })
                    .clone()
            })
        };

        let load = match global {
            Some(load) => load,
            None => match self.loader.find_existing(url) {
                Some(existing) => {
                    tracing::debug!(url, "attaching to diagram library loader inserted by the page");
                    configure(&self.state, existing, settings)
                }
                None => {
                    tracing::debug!(url, "loading diagram library");
                    configure(&self.state, self.loader.load(url), settings)
                }
            },
        };

        self.state
            .borrow_mut()
            .loads
            .insert(url.to_string(), load.clone());
        load
    }
}

/// Wraps `fetch` so the library is initialized once, when the fetch completes. A library
/// that loads successfully becomes the page's global handle unless one is already installed.
fn configure(
    state: &Rc<RefCell<CacheState>>,
    fetch: LocalBoxFuture<'static, Result<Rc<dyn DiagramLibrary>, LoadError>>,
    settings: &LibrarySettings,
) -> SharedLoad {
    let state = Rc::downgrade(state);
    let settings = settings.clone();
    async move {
        let library = fetch.await?;
        library.initialize(&settings);
        if let Some(state) = state.upgrade() {
            let mut state = state.borrow_mut();
            if state.global.is_none() {
                state.global = Some(library.clone());
                state.global_load =
                    Some(future::ready(Ok(library.clone())).boxed_local().shared());
            }
        }
        Ok::<_, LoadError>(library)
    }
    .boxed_local()
    .shared()
}
