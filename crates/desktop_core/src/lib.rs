//! Desktop core: window management, the application registry, and desktop
//! icon grid layout.
//!
//! All state transitions are synchronous and run on the UI thread; the host
//! owns a [`DesktopState`] plus an [`InteractionState`] and drives them
//! through the `window_manager` functions in response to input events.

pub mod apps;
pub mod layout;
pub mod model;
pub mod window_manager;

pub use apps::{app_registry, descriptor, AppDescriptor, AppId};
pub use layout::{DesktopGrid, SYSTEM_SLOTS};
pub use model::{
    DesktopState, DragSession, InteractionState, PointerPosition, ResizeSession, WindowId,
    WindowRecord, WindowRect, INITIAL_Z_INDEX,
};
pub use window_manager::{
    begin_move, begin_resize, close_window, end_move, end_resize, focus_window, maximize_window,
    minimize_window, move_window, open_window, preview_move, preview_resize, resize_window,
    WindowError, CASCADE_STEP, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH,
};
