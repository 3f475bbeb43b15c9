//! Overlay presentation for sumtrack
//!
//! Software-rendered, frameless, always-on-top overlay window plus the
//! platform plumbing it needs: window creation, input, target-window
//! probing, and icon assets. Rendering is tiny-skia into a per-pixel-alpha
//! layered window; text goes through cosmic-text.

pub mod frame;
pub mod icons;
pub mod overlays;
pub mod platform;
pub mod widgets;
pub mod window;

pub use frame::OverlayFrame;
pub use icons::{icon_fetch_task, IconImage, IconKey};
pub use overlays::{OverlayAction, SpellTrackerOverlay, WINDOW_WIDTH};
pub use platform::{target_probe, ClickEvent, MouseButton, OverlayConfig, PlatformError};
pub use window::OverlayWindow;
