//! Window lifecycle, focus, z-order, and the interactive move/resize
//! protocol.

use serde_json::Value;
use thiserror::Error;

use crate::apps::{descriptor, AppId};
use crate::model::{
    DesktopState, DragSession, InteractionState, PointerPosition, ResizeSession, WindowId,
    WindowRecord, WindowRect,
};

/// Minimum committed window width.
pub const MIN_WINDOW_WIDTH: i32 = 300;
/// Minimum committed window height.
pub const MIN_WINDOW_HEIGHT: i32 = 200;
/// Cascade offset applied per already-open window.
pub const CASCADE_STEP: i32 = 30;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// The target window id is not present in the desktop state.
    #[error("window not found")]
    WindowNotFound,
}

/// Opens a window for `app`, or focuses an existing one.
///
/// An open window for the same app is reused when the app's descriptor is
/// single-instance and, if `launch_params` carries a `file_id`, that window
/// was opened on the same file. New windows take the descriptor's default
/// size, cascade-staggered from the last opened windows, and become active
/// with a fresh z-index.
pub fn open_window(state: &mut DesktopState, app: AppId, launch_params: Value) -> WindowId {
    let config = descriptor(app);
    let requested_file = launch_params.get("file_id").cloned();

    let existing = state
        .windows
        .iter()
        .find(|w| {
            w.app == app
                && match &requested_file {
                    Some(file_id) => w.launch_params.get("file_id") == Some(file_id),
                    None => true,
                }
        })
        .map(|w| w.id);
    if let Some(id) = existing {
        if !config.multi_instance {
            // Focus never fails here: the id was just taken from the list.
            let _ = focus_window(state, id);
            return id;
        }
    }

    let id = WindowId(state.next_window_id);
    state.next_window_id = state.next_window_id.saturating_add(1);

    let stagger = state.windows.len() as i32 * CASCADE_STEP;
    let title = launch_params
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or(config.name)
        .to_string();
    let z_index = take_z_index(state);
    state.windows.push(WindowRecord {
        id,
        app,
        title,
        rect: WindowRect {
            x: 100 + stagger,
            y: 50 + stagger,
            w: config.default_width,
            h: config.default_height,
        },
        minimized: false,
        maximized: false,
        z_index,
        launch_params,
    });
    state.active_window = Some(id);
    id
}

/// Removes the window. A focused window leaves focus empty; the next topmost
/// window is deliberately not promoted.
pub fn close_window(state: &mut DesktopState, id: WindowId) -> Result<(), WindowError> {
    let before = state.windows.len();
    state.windows.retain(|w| w.id != id);
    if state.windows.len() == before {
        return Err(WindowError::WindowNotFound);
    }
    if state.active_window == Some(id) {
        state.active_window = None;
    }
    Ok(())
}

/// Focuses the window: fresh z-index, active, and un-minimized.
///
/// This doubles as the taskbar restore path; there is no separate restore
/// operation.
pub fn focus_window(state: &mut DesktopState, id: WindowId) -> Result<(), WindowError> {
    if state.window(id).is_none() {
        return Err(WindowError::WindowNotFound);
    }
    let z_index = take_z_index(state);
    let window = find_window_mut(state, id)?;
    window.z_index = z_index;
    window.minimized = false;
    state.active_window = Some(id);
    Ok(())
}

/// Hides the window from rendering; it stays in the list so its taskbar
/// affordance can restore it.
pub fn minimize_window(state: &mut DesktopState, id: WindowId) -> Result<(), WindowError> {
    let window = find_window_mut(state, id)?;
    window.minimized = true;
    if state.active_window == Some(id) {
        state.active_window = None;
    }
    Ok(())
}

/// Toggles maximized state and refocuses either way.
///
/// Stored geometry is untouched; maximized only changes how the frame is
/// rendered. Double-clicking a title bar routes here.
pub fn maximize_window(state: &mut DesktopState, id: WindowId) -> Result<(), WindowError> {
    let window = find_window_mut(state, id)?;
    window.maximized = !window.maximized;
    focus_window(state, id)
}

/// Commits a window position.
pub fn move_window(state: &mut DesktopState, id: WindowId, x: i32, y: i32) -> Result<(), WindowError> {
    let window = find_window_mut(state, id)?;
    window.rect.x = x;
    window.rect.y = y;
    Ok(())
}

/// Commits a window size, clamped to the minimum floor.
pub fn resize_window(state: &mut DesktopState, id: WindowId, w: i32, h: i32) -> Result<(), WindowError> {
    let window = find_window_mut(state, id)?;
    window.rect.w = w.max(MIN_WINDOW_WIDTH);
    window.rect.h = h.max(MIN_WINDOW_HEIGHT);
    Ok(())
}

/// Starts a drag session, capturing the pointer and the window geometry.
///
/// Maximized windows cannot be dragged; the call focuses the window but
/// leaves no session behind.
pub fn begin_move(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    id: WindowId,
    pointer: PointerPosition,
) -> Result<(), WindowError> {
    let window = state.window(id).ok_or(WindowError::WindowNotFound)?;
    let maximized = window.maximized;
    let rect_start = window.rect;
    focus_window(state, id)?;
    if maximized {
        return Ok(());
    }
    interaction.dragging = Some(DragSession {
        window_id: id,
        pointer_start: pointer,
        rect_start,
    });
    Ok(())
}

/// Computes the live preview rect for the active drag without committing it.
pub fn preview_move(interaction: &InteractionState, pointer: PointerPosition) -> Option<WindowRect> {
    let session = interaction.dragging.as_ref()?;
    let dx = pointer.x - session.pointer_start.x;
    let dy = pointer.y - session.pointer_start.y;
    Some(session.rect_start.offset(dx, dy))
}

/// Ends the active drag and commits the final position exactly once.
pub fn end_move(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    pointer: PointerPosition,
) -> Result<(), WindowError> {
    let Some(rect) = preview_move(interaction, pointer) else {
        return Ok(());
    };
    let window_id = match interaction.dragging.take() {
        Some(session) => session.window_id,
        None => return Ok(()),
    };
    move_window(state, window_id, rect.x, rect.y)
}

/// Starts a resize session from the bottom-right handle.
///
/// The handle is not rendered on maximized windows, so no maximized check is
/// needed here.
pub fn begin_resize(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    id: WindowId,
    pointer: PointerPosition,
) -> Result<(), WindowError> {
    let rect_start = state.window(id).ok_or(WindowError::WindowNotFound)?.rect;
    focus_window(state, id)?;
    interaction.resizing = Some(ResizeSession {
        window_id: id,
        pointer_start: pointer,
        rect_start,
    });
    Ok(())
}

/// Computes the live preview rect for the active resize, already clamped to
/// the minimum floor.
pub fn preview_resize(
    interaction: &InteractionState,
    pointer: PointerPosition,
) -> Option<WindowRect> {
    let session = interaction.resizing.as_ref()?;
    let dx = pointer.x - session.pointer_start.x;
    let dy = pointer.y - session.pointer_start.y;
    let rect = WindowRect {
        w: session.rect_start.w + dx,
        h: session.rect_start.h + dy,
        ..session.rect_start
    };
    Some(rect.clamped_min(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT))
}

/// Ends the active resize and commits the final size exactly once.
pub fn end_resize(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    pointer: PointerPosition,
) -> Result<(), WindowError> {
    let Some(rect) = preview_resize(interaction, pointer) else {
        return Ok(());
    };
    let window_id = match interaction.resizing.take() {
        Some(session) => session.window_id,
        None => return Ok(()),
    };
    resize_window(state, window_id, rect.w, rect.h)
}

fn take_z_index(state: &mut DesktopState) -> u64 {
    let z = state.next_z_index;
    state.next_z_index = state.next_z_index.saturating_add(1);
    z
}

fn find_window_mut(
    state: &mut DesktopState,
    id: WindowId,
) -> Result<&mut WindowRecord, WindowError> {
    state
        .windows
        .iter_mut()
        .find(|w| w.id == id)
        .ok_or(WindowError::WindowNotFound)
}
