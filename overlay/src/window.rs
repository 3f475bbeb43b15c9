//! Overlay window with software rendering
//!
//! `OverlayWindow` owns the platform window plus the drawing state: a
//! tiny-skia pixmap the size of the window and a cosmic-text font system
//! with its glyph cache. All drawing goes into the pixmap; `commit()`
//! copies the premultiplied pixels into the platform buffer and pushes
//! them to the screen.

use cosmic_text::{Attrs, Buffer, FontSystem, Metrics, Shaping, Style, SwashCache, Weight};
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Transform};

use crate::platform::{ClickEvent, OverlayConfig, OverlayPlatform, PlatformError, PlatformOverlay};

/// Cubic approximation constant for quarter-circle arcs.
const KAPPA: f32 = 0.552_284_8;

pub struct OverlayWindow {
    platform: PlatformOverlay,
    pixmap: Pixmap,
    font_system: FontSystem,
    swash_cache: SwashCache,
}

impl OverlayWindow {
    pub fn new(config: OverlayConfig) -> Result<Self, PlatformError> {
        let platform = PlatformOverlay::new(config)?;
        let pixmap = Pixmap::new(platform.width(), platform.height())
            .ok_or_else(|| PlatformError::BufferError("zero-sized pixmap".to_string()))?;

        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        let font_system = FontSystem::new_with_locale_and_db("en-US".to_string(), db);

        Ok(Self {
            platform,
            pixmap,
            font_system,
            swash_cache: SwashCache::new(),
        })
    }

    pub fn width(&self) -> u32 {
        self.platform.width()
    }

    pub fn height(&self) -> u32 {
        self.platform.height()
    }

    pub fn x(&self) -> i32 {
        self.platform.x()
    }

    pub fn y(&self) -> i32 {
        self.platform.y()
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.platform.set_position(x, y);
    }

    /// Resize the window and its backing pixmap.
    pub fn set_size(&mut self, width: u32, height: u32) -> Result<(), PlatformError> {
        if width == self.platform.width() && height == self.platform.height() {
            return Ok(());
        }
        self.platform.set_size(width, height)?;
        self.pixmap = Pixmap::new(width, height)
            .ok_or_else(|| PlatformError::BufferError("zero-sized pixmap".to_string()))?;
        Ok(())
    }

    pub fn show(&mut self) {
        self.platform.show();
    }

    pub fn hide(&mut self) {
        self.platform.hide();
    }

    pub fn is_visible(&self) -> bool {
        self.platform.is_visible()
    }

    pub fn poll_events(&mut self) -> bool {
        self.platform.poll_events()
    }

    pub fn take_position_dirty(&mut self) -> bool {
        self.platform.take_position_dirty()
    }

    pub fn take_pending_click(&mut self) -> Option<ClickEvent> {
        self.platform.take_pending_click()
    }

    pub fn is_dragging(&self) -> bool {
        self.platform.is_dragging()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Drawing primitives
    // ─────────────────────────────────────────────────────────────────────────

    /// Fill the whole pixmap with one color.
    pub fn clear(&mut self, color: Color) {
        self.pixmap.fill(color);
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        let Some(rect) = tiny_skia::Rect::from_xywh(x, y, w, h) else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color(color);
        paint.anti_alias = false;
        self.pixmap
            .fill_rect(rect, &paint, Transform::identity(), None);
    }

    pub fn fill_rounded_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32, color: Color) {
        let Some(path) = rounded_rect_path(x, y, w, h, radius) else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color(color);
        paint.anti_alias = true;
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    /// Draw text with its top-left corner at (x, y).
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
        let mut buffer = Buffer::new(&mut self.font_system, text_metrics(font_size));
        buffer.set_size(
            &mut self.font_system,
            Some(self.pixmap.width() as f32),
            Some(self.pixmap.height() as f32),
        );
        buffer.set_text(&mut self.font_system, text, &text_attrs(bold, italic), Shaping::Advanced, None);
        buffer.shape_until_scroll(&mut self.font_system, false);

        let text_color = cosmic_text::Color::rgba(
            (color.red() * 255.0) as u8,
            (color.green() * 255.0) as u8,
            (color.blue() * 255.0) as u8,
            (color.alpha() * 255.0) as u8,
        );

        let pixmap = &mut self.pixmap;
        let font_system = &mut self.font_system;
        let swash_cache = &mut self.swash_cache;

        buffer.draw(font_system, swash_cache, text_color, |gx, gy, gw, gh, c| {
            if c.a() == 0 {
                return;
            }
            let Some(rect) = tiny_skia::Rect::from_xywh(
                x + gx as f32,
                y + gy as f32,
                gw as f32,
                gh as f32,
            ) else {
                return;
            };
            let mut paint = Paint::default();
            paint.set_color_rgba8(c.r(), c.g(), c.b(), c.a());
            paint.anti_alias = false;
            pixmap.fill_rect(rect, &paint, Transform::identity(), None);
        });
    }

    /// Measure text dimensions at the given size.
    pub fn measure_text(&mut self, text: &str, font_size: f32) -> (f32, f32) {
        self.measure_text_styled(text, font_size, false, false)
    }

    pub fn measure_text_styled(
        &mut self,
        text: &str,
        font_size: f32,
        bold: bool,
        italic: bool,
    ) -> (f32, f32) {
        let metrics = text_metrics(font_size);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        buffer.set_size(&mut self.font_system, None, None);
        buffer.set_text(&mut self.font_system, text, &text_attrs(bold, italic), Shaping::Advanced, None);
        buffer.shape_until_scroll(&mut self.font_system, false);

        let mut width = 0.0f32;
        let mut lines = 0usize;
        for run in buffer.layout_runs() {
            width = width.max(run.line_w);
            lines += 1;
        }
        (width, lines.max(1) as f32 * metrics.line_height)
    }

    /// Draw an RGBA image scaled into the destination rectangle.
    ///
    /// Source pixels are straight alpha; they get premultiplied before the
    /// over-blend into the pixmap. Nearest-neighbor sampling, which is fine
    /// for near-1:1 icon draws.
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
        if image_width == 0
            || image_height == 0
            || dest_width <= 0.0
            || dest_height <= 0.0
            || image_data.len() < (image_width * image_height * 4) as usize
        {
            return;
        }

        let pm_width = self.pixmap.width() as i32;
        let pm_height = self.pixmap.height() as i32;
        let data = self.pixmap.data_mut();

        let x0 = dest_x.floor() as i32;
        let y0 = dest_y.floor() as i32;
        let dw = dest_width.round() as i32;
        let dh = dest_height.round() as i32;

        for dy in 0..dh {
            let py = y0 + dy;
            if py < 0 || py >= pm_height {
                continue;
            }
            let sy = (dy as u32 * image_height / dh.max(1) as u32).min(image_height - 1);
            for dx in 0..dw {
                let px = x0 + dx;
                if px < 0 || px >= pm_width {
                    continue;
                }
                let sx = (dx as u32 * image_width / dw.max(1) as u32).min(image_width - 1);

                let src = ((sy * image_width + sx) * 4) as usize;
                let sa = image_data[src + 3] as u32;
                if sa == 0 {
                    continue;
                }
                let sr = image_data[src] as u32 * sa / 255;
                let sg = image_data[src + 1] as u32 * sa / 255;
                let sb = image_data[src + 2] as u32 * sa / 255;

                let dst = ((py * pm_width + px) * 4) as usize;
                let inv = 255 - sa;
                data[dst] = (sr + data[dst] as u32 * inv / 255) as u8;
                data[dst + 1] = (sg + data[dst + 1] as u32 * inv / 255) as u8;
                data[dst + 2] = (sb + data[dst + 2] as u32 * inv / 255) as u8;
                data[dst + 3] = (sa + data[dst + 3] as u32 * inv / 255) as u8;
            }
        }
    }

    /// Copy the pixmap into the platform buffer and present it.
    pub fn commit(&mut self) {
        let buffer = self.platform.pixel_buffer();
        let data = self.pixmap.data();
        let len = buffer.len().min(data.len());
        buffer[..len].copy_from_slice(&data[..len]);
        self.platform.commit();
    }
}

fn text_metrics(font_size: f32) -> Metrics {
    Metrics::new(font_size, font_size * 1.2)
}

fn text_attrs(bold: bool, italic: bool) -> Attrs<'static> {
    let mut attrs = Attrs::new();
    if bold {
        attrs = attrs.weight(Weight::BOLD);
    }
    if italic {
        attrs = attrs.style(Style::Italic);
    }
    attrs
}

fn rounded_rect_path(x: f32, y: f32, w: f32, h: f32, radius: f32) -> Option<tiny_skia::Path> {
    if w <= 0.0 || h <= 0.0 {
        return None;
    }
    let r = radius.clamp(0.0, w.min(h) / 2.0);
    let mut pb = PathBuilder::new();

    if r <= 0.0 {
        pb.push_rect(tiny_skia::Rect::from_xywh(x, y, w, h)?);
        return pb.finish();
    }

    let k = KAPPA * r;
    pb.move_to(x + r, y);
    pb.line_to(x + w - r, y);
    pb.cubic_to(x + w - r + k, y, x + w, y + r - k, x + w, y + r);
    pb.line_to(x + w, y + h - r);
    pb.cubic_to(x + w, y + h - r + k, x + w - r + k, y + h, x + w - r, y + h);
    pb.line_to(x + r, y + h);
    pb.cubic_to(x + r - k, y + h, x, y + h - r + k, x, y + h - r);
    pb.line_to(x, y + r);
    pb.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
    pb.close();
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounded_rect_path_degenerate() {
        assert!(rounded_rect_path(0.0, 0.0, 0.0, 10.0, 3.0).is_none());
        assert!(rounded_rect_path(0.0, 0.0, 10.0, 10.0, 0.0).is_some());
        // Radius larger than half the side gets clamped, not rejected
        assert!(rounded_rect_path(0.0, 0.0, 10.0, 10.0, 50.0).is_some());
    }
}
