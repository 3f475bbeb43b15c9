//! Platform abstraction for overlay windows
//!
//! One real backend (Win32 layered windows, where the target application
//! lives) and a headless backend so the rest of the workspace builds and
//! tests everywhere else. The platform owns the raw pixel buffer, input
//! translation, and window placement; drawing happens upstream in
//! [`crate::window::OverlayWindow`].

use sumtrack_core::anchor::WindowProbe;

#[cfg(target_os = "windows")]
mod windows;
#[cfg(target_os = "windows")]
pub use windows::{Win32Overlay as PlatformOverlay, Win32TargetProbe};

#[cfg(not(target_os = "windows"))]
mod headless;
#[cfg(not(target_os = "windows"))]
pub use headless::{HeadlessOverlay as PlatformOverlay, NullTargetProbe};

/// Window configuration for creating an overlay.
#[derive(Debug, Clone)]
pub struct OverlayConfig {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// Window name, also used as the class-instance namespace.
    pub namespace: String,
}

/// Mouse buttons the overlay distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Primary button: activate / partial deduct.
    Left,
    /// Secondary button: reset.
    Right,
}

/// A click delivered in window-local coordinates.
///
/// A left press only becomes a click if it never turned into a drag.
#[derive(Debug, Clone, Copy)]
pub struct ClickEvent {
    pub x: i32,
    pub y: i32,
    pub button: MouseButton,
}

/// One monitor of the virtual screen.
#[derive(Debug, Clone)]
pub struct MonitorInfo {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub is_primary: bool,
}

/// Errors from the platform layer.
#[derive(Debug)]
pub enum PlatformError {
    WindowCreation(String),
    BufferError(String),
    Other(String),
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WindowCreation(msg) => write!(f, "window creation failed: {msg}"),
            Self::BufferError(msg) => write!(f, "pixel buffer error: {msg}"),
            Self::Other(msg) => write!(f, "platform error: {msg}"),
        }
    }
}

impl std::error::Error for PlatformError {}

/// Construct the platform's probe for the target application window.
pub fn target_probe(title: &str) -> impl WindowProbe + use<> {
    #[cfg(target_os = "windows")]
    {
        Win32TargetProbe::new(title)
    }
    #[cfg(not(target_os = "windows"))]
    {
        NullTargetProbe::new(title)
    }
}

/// Clamp a window origin so the window stays fully inside the virtual
/// screen (union of all monitors).
pub fn clamp_to_virtual_screen(
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    monitors: &[MonitorInfo],
) -> (i32, i32) {
    if monitors.is_empty() {
        return (x, y);
    }

    let left = monitors.iter().map(|m| m.x).min().unwrap_or(0);
    let top = monitors.iter().map(|m| m.y).min().unwrap_or(0);
    let right = monitors
        .iter()
        .map(|m| m.x + m.width as i32)
        .max()
        .unwrap_or(0);
    let bottom = monitors
        .iter()
        .map(|m| m.y + m.height as i32)
        .max()
        .unwrap_or(0);

    let max_x = (right - width as i32).max(left);
    let max_y = (bottom - height as i32).max(top);

    (x.clamp(left, max_x), y.clamp(top, max_y))
}

/// Surface every platform backend provides.
pub trait OverlayPlatform {
    fn new(config: OverlayConfig) -> Result<Self, PlatformError>
    where
        Self: Sized;

    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn x(&self) -> i32;
    fn y(&self) -> i32;

    /// Move the window, clamped to the virtual screen. No resize, no focus.
    fn set_position(&mut self, x: i32, y: i32);
    /// Resize the window in place (content growth), keeping its origin.
    fn set_size(&mut self, width: u32, height: u32) -> Result<(), PlatformError>;

    /// Idempotent show without focus steal.
    fn show(&mut self);
    /// Idempotent hide.
    fn hide(&mut self);
    fn is_visible(&self) -> bool;

    /// RGBA (premultiplied) pixel buffer, row-major.
    fn pixel_buffer(&mut self) -> &mut [u8];
    /// Push the pixel buffer to the screen.
    fn commit(&mut self);

    /// Pump window events. Returns `false` once the window is gone.
    fn poll_events(&mut self) -> bool;

    /// Window moved (by drag) since last call.
    fn take_position_dirty(&mut self) -> bool;
    /// Pending click, if the last press ended without dragging.
    fn take_pending_click(&mut self) -> Option<ClickEvent>;
    /// A drag is currently in progress.
    fn is_dragging(&self) -> bool;

    fn monitors(&self) -> Vec<MonitorInfo>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_monitor() -> Vec<MonitorInfo> {
        vec![MonitorInfo {
            x: 0,
            y: 0,
            width: 1920,
            height: 1080,
            is_primary: true,
        }]
    }

    #[test]
    fn test_clamp_inside_is_identity() {
        assert_eq!(
            clamp_to_virtual_screen(100, 200, 122, 200, &single_monitor()),
            (100, 200)
        );
    }

    #[test]
    fn test_clamp_pulls_window_fully_on_screen() {
        let monitors = single_monitor();
        assert_eq!(clamp_to_virtual_screen(-50, -10, 122, 200, &monitors), (0, 0));
        assert_eq!(
            clamp_to_virtual_screen(5000, 5000, 122, 200, &monitors),
            (1920 - 122, 1080 - 200)
        );
    }

    #[test]
    fn test_clamp_spans_negative_monitor_space() {
        let monitors = vec![
            MonitorInfo {
                x: -1920,
                y: 0,
                width: 1920,
                height: 1080,
                is_primary: false,
            },
            MonitorInfo {
                x: 0,
                y: 0,
                width: 1920,
                height: 1080,
                is_primary: true,
            },
        ];
        assert_eq!(
            clamp_to_virtual_screen(-1900, 100, 122, 200, &monitors),
            (-1900, 100)
        );
        assert_eq!(
            clamp_to_virtual_screen(-5000, 100, 122, 200, &monitors),
            (-1920, 100)
        );
    }

    #[test]
    fn test_clamp_without_monitors_passes_through() {
        assert_eq!(clamp_to_virtual_screen(7, 9, 10, 10, &[]), (7, 9));
    }
}
