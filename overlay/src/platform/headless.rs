//! Headless platform implementation
//!
//! Used on platforms without a supported window system. Rendering goes to an
//! in-memory buffer, the target-window probe never finds anything, and the
//! overlay therefore stays hidden. This keeps the rest of the crate testable
//! everywhere.

use sumtrack_core::anchor::{TargetWindow, WindowProbe};

use super::{ClickEvent, MonitorInfo, OverlayConfig, OverlayPlatform, PlatformError};

pub struct HeadlessOverlay {
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    pixel_data: Vec<u8>,
    visible: bool,
}

impl OverlayPlatform for HeadlessOverlay {
    fn new(config: OverlayConfig) -> Result<Self, PlatformError> {
        Ok(Self {
            width: config.width,
            height: config.height,
            x: config.x,
            y: config.y,
            pixel_data: vec![0u8; (config.width * config.height * 4) as usize],
            visible: false,
        })
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn x(&self) -> i32 {
        self.x
    }

    fn y(&self) -> i32 {
        self.y
    }

    fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    fn set_size(&mut self, width: u32, height: u32) -> Result<(), PlatformError> {
        self.width = width;
        self.height = height;
        self.pixel_data.resize((width * height * 4) as usize, 0);
        Ok(())
    }

    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn pixel_buffer(&mut self) -> &mut [u8] {
        &mut self.pixel_data
    }

    fn commit(&mut self) {}

    fn poll_events(&mut self) -> bool {
        true
    }

    fn take_position_dirty(&mut self) -> bool {
        false
    }

    fn take_pending_click(&mut self) -> Option<ClickEvent> {
        None
    }

    fn is_dragging(&self) -> bool {
        false
    }

    fn monitors(&self) -> Vec<MonitorInfo> {
        Vec::new()
    }
}

/// Probe that never locates a target window.
pub struct NullTargetProbe;

impl NullTargetProbe {
    pub fn new(_title: &str) -> Self {
        Self
    }
}

impl WindowProbe for NullTargetProbe {
    fn locate(&mut self) -> Option<TargetWindow> {
        None
    }
}
