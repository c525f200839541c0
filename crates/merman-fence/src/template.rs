//! Static widget markup.
//!
//! Control class names and labels come from [`ViewerAction`]; the viewer script resolves clicks
//! through the same names.

use crate::DiagramId;
use merman_widget::ViewerAction;
use merman_widget::action::class;

// Octicons (MIT), 16px.
const ICON_UP: &str = r#"<svg version="1.1" width="16" height="16" viewBox="0 0 16 16" class="octicon octicon-chevron-up" aria-hidden="true"><path d="M3.22 10.53a.749.749 0 0 1 0-1.06l4.25-4.25a.749.749 0 0 1 1.06 0l4.25 4.25a.749.749 0 1 1-1.06 1.06L8 6.811 4.28 10.53a.749.749 0 0 1-1.06 0Z"></path></svg>"#;
const ICON_DOWN: &str = r#"<svg version="1.1" width="16" height="16" viewBox="0 0 16 16" class="octicon octicon-chevron-down" aria-hidden="true"><path d="M12.78 5.22a.749.749 0 0 1 0 1.06l-4.25 4.25a.749.749 0 0 1-1.06 0L3.22 6.28a.749.749 0 1 1 1.06-1.06L8 8.939l3.72-3.719a.749.749 0 0 1 1.06 0Z"></path></svg>"#;
const ICON_LEFT: &str = r#"<svg version="1.1" width="16" height="16" viewBox="0 0 16 16" class="octicon octicon-chevron-left" aria-hidden="true"><path d="M9.78 12.78a.75.75 0 0 1-1.06 0L4.47 8.53a.75.75 0 0 1 0-1.06l4.25-4.25a.751.751 0 0 1 1.042.018.751.751 0 0 1 .018 1.042L6.06 8l3.72 3.72a.75.75 0 0 1 0 1.06Z"></path></svg>"#;
const ICON_RIGHT: &str = r#"<svg version="1.1" width="16" height="16" viewBox="0 0 16 16" class="octicon octicon-chevron-right" aria-hidden="true"><path d="M6.22 3.22a.75.75 0 0 1 1.06 0l4.25 4.25a.75.75 0 0 1 0 1.06l-4.25 4.25a.751.751 0 0 1-1.042-.018.751.751 0 0 1-.018-1.042L9.94 8 6.22 4.28a.75.75 0 0 1 0-1.06Z"></path></svg>"#;
const ICON_ZOOM_IN: &str = r#"<svg version="1.1" width="16" height="16" viewBox="0 0 16 16" class="octicon octicon-zoom-in" aria-hidden="true"><path d="M3.75 7.5a.75.75 0 0 1 .75-.75h2.25V4.5a.75.75 0 0 1 1.5 0v2.25h2.25a.75.75 0 0 1 0 1.5H8.25v2.25a.75.75 0 0 1-1.5 0V8.25H4.5a.75.75 0 0 1-.75-.75Z"></path><path d="M7.5 0a7.5 7.5 0 0 1 5.807 12.247l2.473 2.473a.749.749 0 1 1-1.06 1.06l-2.473-2.473A7.5 7.5 0 1 1 7.5 0Zm-6 7.5a6 6 0 1 0 12 0 6 6 0 0 0-12 0Z"></path></svg>"#;
const ICON_ZOOM_OUT: &str = r#"<svg version="1.1" width="16" height="16" viewBox="0 0 16 16" class="octicon octicon-zoom-out" aria-hidden="true"><path d="M4.5 6.75h6a.75.75 0 0 1 0 1.5h-6a.75.75 0 0 1 0-1.5Z"></path><path d="M0 7.5a7.5 7.5 0 1 1 13.307 4.747l2.473 2.473a.749.749 0 1 1-1.06 1.06l-2.473-2.473A7.5 7.5 0 0 1 0 7.5Zm7.5-6a6 6 0 1 0 0 12 6 6 0 0 0 0-12Z"></path></svg>"#;
const ICON_RESET: &str = r#"<svg version="1.1" width="16" height="16" viewBox="0 0 16 16" class="octicon octicon-sync" aria-hidden="true"><path d="M1.705 8.005a.75.75 0 0 1 .834.656 5.5 5.5 0 0 0 9.592 2.97l-1.204-1.204a.25.25 0 0 1 .177-.427h3.646a.25.25 0 0 1 .25.25v3.646a.25.25 0 0 1-.427.177l-1.38-1.38A7.002 7.002 0 0 1 1.05 8.84a.75.75 0 0 1 .656-.834ZM8 2.5a5.487 5.487 0 0 0-4.131 1.869l1.204 1.204A.25.25 0 0 1 4.896 6H1.25A.25.25 0 0 1 1 5.75V2.104a.25.25 0 0 1 .427-.177l1.38 1.38A7.002 7.002 0 0 1 14.95 7.16a.75.75 0 0 1-1.49.178A5.5 5.5 0 0 0 8 2.5Z"></path></svg>"#;
const ICON_COPY: &str = r#"<svg version="1.1" width="16" height="16" viewBox="0 0 16 16" class="octicon octicon-copy" aria-hidden="true"><path d="M0 6.75C0 5.784.784 5 1.75 5h1.5a.75.75 0 0 1 0 1.5h-1.5a.25.25 0 0 0-.25.25v7.5c0 .138.112.25.25.25h7.5a.25.25 0 0 0 .25-.25v-1.5a.75.75 0 0 1 1.5 0v1.5A1.75 1.75 0 0 1 9.25 16h-7.5A1.75 1.75 0 0 1 0 14.25Z"></path><path d="M5 1.75C5 .784 5.784 0 6.75 0h7.5C15.216 0 16 .784 16 1.75v7.5A1.75 1.75 0 0 1 14.25 11h-7.5A1.75 1.75 0 0 1 5 9.25Zm1.75-.25a.25.25 0 0 0-.25.25v7.5c0 .138.112.25.25.25h7.5a.25.25 0 0 0 .25-.25v-7.5a.25.25 0 0 0-.25-.25Z"></path></svg>"#;

/// Directional pad, row by row. `None` is a filler cell.
pub const GRID_LAYOUT: [[Option<ViewerAction>; 3]; 3] = [
    [None, Some(ViewerAction::PanUp), Some(ViewerAction::ZoomIn)],
    [
        Some(ViewerAction::PanLeft),
        Some(ViewerAction::Reset),
        Some(ViewerAction::PanRight),
    ],
    [None, Some(ViewerAction::PanDown), Some(ViewerAction::ZoomOut)],
];

fn icon(action: ViewerAction) -> &'static str {
    match action {
        ViewerAction::CopySource => ICON_COPY,
        ViewerAction::PanUp => ICON_UP,
        ViewerAction::PanDown => ICON_DOWN,
        ViewerAction::PanLeft => ICON_LEFT,
        ViewerAction::PanRight => ICON_RIGHT,
        ViewerAction::ZoomIn => ICON_ZOOM_IN,
        ViewerAction::ZoomOut => ICON_ZOOM_OUT,
        ViewerAction::Reset => ICON_RESET,
    }
}

pub fn control_button(action: ViewerAction) -> String {
    format!(
        r#"<button class="{btn} {name}" aria-label="{label}" title="{label}">{icon}</button>"#,
        btn = class::BUTTON,
        name = action.class_name(),
        label = action.label(),
        icon = icon(action),
    )
}

pub fn toolbar_html() -> String {
    format!(
        "<div class=\"{}\">\n  {}\n</div>",
        class::TOOLBAR,
        control_button(ViewerAction::CopySource)
    )
}

pub fn grid_panel_html() -> String {
    let mut out = format!("<div class=\"{}\">\n", class::GRID_PANEL);
    for row in GRID_LAYOUT {
        out.push_str(&format!("  <div class=\"{}\">\n", class::GRID_ROW));
        for cell in row {
            let cell = match cell {
                Some(action) => control_button(action),
                None => format!("<div class=\"{}\"></div>", class::EMPTY_CELL),
            };
            out.push_str("    ");
            out.push_str(&cell);
            out.push('\n');
        }
        out.push_str("  </div>\n");
    }
    out.push_str("</div>");
    out
}

/// Full widget: container, optional style fragment, wrapper, optional script fragment.
///
/// `escaped_source` must already be HTML-escaped.
pub fn widget_html(id: &DiagramId, escaped_source: &str, style: &str, script: &str) -> String {
    let mut out = String::with_capacity(escaped_source.len() + style.len() + script.len() + 8192);
    out.push_str(&format!(
        "<div id=\"{id}\" class=\"{}\">\n",
        class::CONTAINER
    ));
    if !style.is_empty() {
        out.push_str(style);
        out.push('\n');
    }
    out.push_str(&format!("<div class=\"{}\">\n", class::WRAPPER));
    out.push_str(&toolbar_html());
    out.push('\n');
    out.push_str(&format!("<div class=\"{}\">\n", class::VIEW_CONTAINER));
    out.push_str(&grid_panel_html());
    out.push('\n');
    out.push_str(&format!(
        "<pre class=\"{}\"><code class=\"{}\" style=\"display: none;\">{escaped_source}</code></pre>\n",
        class::CONTENT,
        class::CODE
    ));
    out.push_str("</div>\n</div>\n");
    if !script.is_empty() {
        out.push_str(script);
        out.push('\n');
    }
    out.push_str("</div>\n");
    out
}
