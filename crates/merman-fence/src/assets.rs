//! Packaged browser assets, compiled in with `include_str!`.

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Viewer script. Defines `window.initMermaidDiagram` unless the page already has it.
pub const VIEWER_JS: &str = include_str!("../assets/viewer.js");

/// Widget stylesheet, scoped under `.mermaid-container`.
pub const STYLE_CSS: &str = include_str!("../assets/style.css");

pub const VIEWER_JS_FILE: &str = "viewer.js";
pub const STYLE_CSS_FILE: &str = "style.css";

/// Writes both assets into `dir` (created if missing) for hosting behind `viewer_js_url` and
/// `css_url`. Returns the written paths.
pub fn write_assets(dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(|err| Error::io(dir, err))?;
    let mut written = Vec::with_capacity(2);
    for (name, contents) in [(VIEWER_JS_FILE, VIEWER_JS), (STYLE_CSS_FILE, STYLE_CSS)] {
        let path = dir.join(name);
        std::fs::write(&path, contents).map_err(|err| Error::io(&path, err))?;
        written.push(path);
    }
    Ok(written)
}
