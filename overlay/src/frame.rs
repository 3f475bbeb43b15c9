//! Overlay frame abstraction
//!
//! `OverlayFrame` wraps an [`OverlayWindow`] with the chrome every overlay
//! shares: a rounded translucent background sized to the content, plus the
//! text and image helpers content rendering is built from.

use crate::platform::{ClickEvent, OverlayConfig, PlatformError};
use crate::widgets::colors;
use crate::window::OverlayWindow;
use tiny_skia::Color;

pub struct OverlayFrame {
    window: OverlayWindow,
    background_alpha: u8,
    corner_radius: f32,
}

impl OverlayFrame {
    pub fn new(config: OverlayConfig) -> Result<Self, PlatformError> {
        let window = OverlayWindow::new(config)?;

        Ok(Self {
            window,
            background_alpha: 180,
            corner_radius: 6.0,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Frame rendering
    // ─────────────────────────────────────────────────────────────────────────

    /// Begin a new frame: clear, then draw the background covering the content
    /// height. The rest of the window stays fully transparent, which reads as
    /// auto-sizing without an actual resize.
    pub fn begin_frame_with_content_height(&mut self, content_height: f32) {
        let width = self.window.width() as f32;
        let height = self.window.height() as f32;

        self.window.clear(colors::transparent());

        if self.background_alpha > 0 {
            let bg_color = Color::from_rgba8(30, 30, 30, self.background_alpha);
            self.window.fill_rounded_rect(
                0.0,
                0.0,
                width,
                content_height.min(height),
                self.corner_radius,
                bg_color,
            );
        }
    }

    /// End the frame: commit the pixmap to the screen.
    pub fn end_frame(&mut self) {
        self.window.commit();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Drawing helpers (delegate to window)
    // ─────────────────────────────────────────────────────────────────────────

    pub fn draw_text_styled(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        font_size: f32,
        color: Color,
        bold: bool,
        italic: bool,
    ) {
        self.window
            .draw_text_styled(text, x, y, font_size, color, bold, italic);
    }

    /// Draw styled text with a full surrounding dark glow for readability.
    /// Renders text at all 8 cardinal/diagonal offsets in shadow color, then the real text on top.
    pub fn draw_text_with_glow(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        font_size: f32,
        color: Color,
        bold: bool,
        italic: bool,
    ) {
        let shadow_color = colors::text_shadow();
        let d = 1.0_f32;
        for &(dx, dy) in &[
            (-d, -d),
            (0.0, -d),
            (d, -d),
            (-d, 0.0),
            (d, 0.0),
            (-d, d),
            (0.0, d),
            (d, d),
        ] {
            self.draw_text_styled(text, x + dx, y + dy, font_size, shadow_color, bold, italic);
        }
        self.draw_text_styled(text, x, y, font_size, color, bold, italic);
    }

    pub fn measure_text(&mut self, text: &str, font_size: f32) -> (f32, f32) {
        self.window.measure_text(text, font_size)
    }

    pub fn measure_text_styled(
        &mut self,
        text: &str,
        font_size: f32,
        bold: bool,
        italic: bool,
    ) -> (f32, f32) {
        self.window
            .measure_text_styled(text, font_size, bold, italic)
    }

    /// Draw an RGBA image at the specified position with scaling
    pub fn draw_image(
        &mut self,
        image_data: &[u8],
        image_width: u32,
        image_height: u32,
        dest_x: f32,
        dest_y: f32,
        dest_width: f32,
        dest_height: f32,
    ) {
        self.window.draw_image(
            image_data,
            image_width,
            image_height,
            dest_x,
            dest_y,
            dest_width,
            dest_height,
        );
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.window.fill_rect(x, y, w, h, color);
    }

    pub fn fill_rounded_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32, color: Color) {
        self.window.fill_rounded_rect(x, y, w, h, radius, color);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Window access
    // ─────────────────────────────────────────────────────────────────────────

    pub fn width(&self) -> u32 {
        self.window.width()
    }

    pub fn height(&self) -> u32 {
        self.window.height()
    }

    pub fn x(&self) -> i32 {
        self.window.x()
    }

    pub fn y(&self) -> i32 {
        self.window.y()
    }

    /// Poll for events (non-blocking), returns false if should close
    pub fn poll_events(&mut self) -> bool {
        self.window.poll_events()
    }

    pub fn take_position_dirty(&mut self) -> bool {
        self.window.take_position_dirty()
    }

    pub fn take_pending_click(&mut self) -> Option<ClickEvent> {
        self.window.take_pending_click()
    }

    pub fn is_dragging(&self) -> bool {
        self.window.is_dragging()
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.window.set_position(x, y);
    }

    pub fn set_size(&mut self, width: u32, height: u32) -> Result<(), PlatformError> {
        self.window.set_size(width, height)
    }

    pub fn show(&mut self) {
        self.window.show();
    }

    pub fn hide(&mut self) {
        self.window.hide();
    }

    pub fn is_visible(&self) -> bool {
        self.window.is_visible()
    }
}
