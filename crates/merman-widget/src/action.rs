//! Class-name contract shared by the widget markup and the viewer controller.
//!
//! The template builder stamps [`ViewerAction::class_name`] onto each control and the
//! controller maps a clicked control back through [`ViewerAction::from_class_list`]. Neither
//! side spells the class names out on its own.

/// Structural class names of the widget markup.
pub mod class {
    pub const CONTAINER: &str = "mermaid-container";
    pub const WRAPPER: &str = "mermaid-wrapper";
    pub const TOOLBAR: &str = "mermaid-toolbar";
    pub const VIEW_CONTAINER: &str = "mermaid-view-container";
    pub const GRID_PANEL: &str = "mermaid-viewer-grid-panel";
    pub const GRID_ROW: &str = "grid-row";
    pub const EMPTY_CELL: &str = "empty-cell";
    pub const CONTENT: &str = "mermaid-content";
    pub const CODE: &str = "mermaid-code";
    pub const BUTTON: &str = "btn";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewerAction {
    CopySource,
    PanUp,
    PanDown,
    PanLeft,
    PanRight,
    ZoomIn,
    ZoomOut,
    Reset,
}

impl ViewerAction {
    pub const ALL: [ViewerAction; 8] = [
        ViewerAction::CopySource,
        ViewerAction::PanUp,
        ViewerAction::PanDown,
        ViewerAction::PanLeft,
        ViewerAction::PanRight,
        ViewerAction::ZoomIn,
        ViewerAction::ZoomOut,
        ViewerAction::Reset,
    ];

    pub fn class_name(self) -> &'static str {
        match self {
            ViewerAction::CopySource => "copy-code",
            ViewerAction::PanUp => "up",
            ViewerAction::PanDown => "down",
            ViewerAction::PanLeft => "left",
            ViewerAction::PanRight => "right",
            ViewerAction::ZoomIn => "zoom-in",
            ViewerAction::ZoomOut => "zoom-out",
            ViewerAction::Reset => "reset",
        }
    }

    /// Accessible label (`aria-label`) of the control.
    pub fn label(self) -> &'static str {
        match self {
            ViewerAction::CopySource => "Copy Code",
            ViewerAction::PanUp => "Pan up",
            ViewerAction::PanDown => "Pan down",
            ViewerAction::PanLeft => "Pan left",
            ViewerAction::PanRight => "Pan right",
            ViewerAction::ZoomIn => "Zoom in",
            ViewerAction::ZoomOut => "Zoom out",
            ViewerAction::Reset => "Reset view",
        }
    }

    pub fn from_class_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.class_name() == name)
    }

    /// Resolves a control from its full `class` attribute (e.g. `"btn zoom-in"`).
    pub fn from_class_list(class_list: &str) -> Option<Self> {
        class_list.split_whitespace().find_map(Self::from_class_name)
    }

    /// Whether the action changes the view transform (everything except copy).
    pub fn is_view_action(self) -> bool {
        !matches!(self, ViewerAction::CopySource)
    }
}
