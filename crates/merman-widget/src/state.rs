use crate::ViewerAction;

pub const ZOOM_FACTOR: f64 = 1.2;
pub const MIN_SCALE: f64 = 0.2;
pub const MAX_SCALE: f64 = 5.0;
pub const PAN_STEP: f64 = 40.0;

/// Pointer position and translation captured when a drag starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub start_x: f64,
    pub start_y: f64,
    pub origin_x: f64,
    pub origin_y: f64,
}

/// Pan/zoom state of one widget instance.
///
/// `scale` always stays within `[MIN_SCALE, MAX_SCALE]`; translation is unbounded.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerState {
    scale: f64,
    translate_x: f64,
    translate_y: f64,
    drag: Option<DragSession>,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            drag: None,
        }
    }
}

impl ViewerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn translate_x(&self) -> f64 {
        self.translate_x
    }

    pub fn translate_y(&self) -> f64 {
        self.translate_y
    }

    pub fn drag(&self) -> Option<DragSession> {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Applies a toolbar/grid action. Returns `true` when the transform must be re-applied.
    pub fn apply(&mut self, action: ViewerAction) -> bool {
        match action {
            ViewerAction::ZoomIn => self.scale = (self.scale * ZOOM_FACTOR).min(MAX_SCALE),
            ViewerAction::ZoomOut => self.scale = (self.scale / ZOOM_FACTOR).max(MIN_SCALE),
            ViewerAction::Reset => {
                self.scale = 1.0;
                self.translate_x = 0.0;
                self.translate_y = 0.0;
            }
            ViewerAction::PanUp => self.translate_y += PAN_STEP,
            ViewerAction::PanDown => self.translate_y -= PAN_STEP,
            ViewerAction::PanLeft => self.translate_x += PAN_STEP,
            ViewerAction::PanRight => self.translate_x -= PAN_STEP,
            ViewerAction::CopySource => return false,
        }
        true
    }

    /// Starts a drag session. A second press while a session is active is ignored.
    pub fn begin_drag(&mut self, x: f64, y: f64) -> bool {
        if self.drag.is_some() {
            return false;
        }
        self.drag = Some(DragSession {
            start_x: x,
            start_y: y,
            origin_x: self.translate_x,
            origin_y: self.translate_y,
        });
        true
    }

    pub fn drag_to(&mut self, x: f64, y: f64) -> bool {
        let Some(session) = self.drag else {
            return false;
        };
        self.translate_x = session.origin_x + (x - session.start_x);
        self.translate_y = session.origin_y + (y - session.start_y);
        true
    }

    pub fn end_drag(&mut self) -> bool {
        self.drag.take().is_some()
    }

    /// CSS `transform` value: scale first, then translate.
    pub fn transform_css(&self) -> String {
        format!(
            "scale({}) translate({}px, {}px)",
            self.scale, self.translate_x, self.translate_y
        )
    }
}
