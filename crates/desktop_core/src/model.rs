use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::apps::AppId;

/// First z-index handed out by a fresh desktop.
pub const INITIAL_Z_INDEX: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    pub fn clamped_min(self, min_w: i32, min_h: i32) -> Self {
        Self {
            w: self.w.max(min_w),
            h: self.h.max(min_h),
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub app: AppId,
    pub title: String,
    /// Pre-maximize geometry; retained while maximized, which only affects
    /// how the frame is rendered.
    pub rect: WindowRect,
    pub minimized: bool,
    pub maximized: bool,
    pub z_index: u64,
    /// Opaque payload handed back to the application (for example a
    /// `file_id`); the core never validates its shape.
    pub launch_params: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesktopState {
    pub windows: Vec<WindowRecord>,
    /// At most one focused window; closing or minimizing it leaves focus
    /// empty rather than promoting the next topmost window.
    pub active_window: Option<WindowId>,
    pub next_window_id: u64,
    /// Strictly increasing z counter, never compacted or reused; sorting
    /// windows by `z_index` always recovers front-to-back order.
    pub next_z_index: u64,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self {
            windows: Vec::new(),
            active_window: None,
            next_window_id: 1,
            next_z_index: INITIAL_Z_INDEX,
        }
    }
}

impl DesktopState {
    pub fn window(&self, id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == id)
    }

    /// Windows in render order, back to front.
    pub fn render_order(&self) -> Vec<&WindowRecord> {
        let mut ordered: Vec<&WindowRecord> = self.windows.iter().collect();
        ordered.sort_by_key(|w| w.z_index);
        ordered
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub window_id: WindowId,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeSession {
    pub window_id: WindowId,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Exclusive gesture state: the UI attaches pointer listeners for the
/// duration of one drag or resize, so at most one session is live.
pub struct InteractionState {
    pub dragging: Option<DragSession>,
    pub resizing: Option<ResizeSession>,
}
