//! Spell button widget
//!
//! A square icon tile with a cooldown veil that drains from the top as the
//! timer runs down, plus a centered countdown number while the spell is
//! unavailable.

use crate::frame::OverlayFrame;
use crate::icons::IconImage;
use crate::widgets::colors;

/// Inset of the icon inside the button background.
const ICON_INSET: f32 = 1.0;
const CORNER_RADIUS: f32 = 5.0;

pub struct SpellButton<'a> {
    icon: Option<&'a IconImage>,
    fraction_remaining: f32,
    countdown: Option<String>,
}

impl<'a> SpellButton<'a> {
    pub fn new() -> Self {
        Self {
            icon: None,
            fraction_remaining: 0.0,
            countdown: None,
        }
    }

    pub fn with_icon(mut self, icon: Option<&'a IconImage>) -> Self {
        self.icon = icon;
        self
    }

    /// Fraction of the cooldown still remaining, 0.0 (ready) to 1.0 (full).
    pub fn with_fraction_remaining(mut self, fraction: f32) -> Self {
        self.fraction_remaining = fraction.clamp(0.0, 1.0);
        self
    }

    pub fn with_countdown(mut self, text: impl Into<String>) -> Self {
        self.countdown = Some(text.into());
        self
    }

    /// Render the button with its top-left corner at (x, y).
    pub fn render(&self, frame: &mut OverlayFrame, x: f32, y: f32, size: f32, font_size: f32) {
        frame.fill_rounded_rect(x, y, size, size, CORNER_RADIUS, colors::button_background());

        let icon_size = size - 2.0 * ICON_INSET;
        match self.icon {
            Some(icon) => frame.draw_image(
                &icon.rgba,
                icon.width,
                icon.height,
                x + ICON_INSET,
                y + ICON_INSET,
                icon_size,
                icon_size,
            ),
            None => frame.fill_rounded_rect(
                x + ICON_INSET,
                y + ICON_INSET,
                icon_size,
                icon_size,
                CORNER_RADIUS - 1.0,
                colors::icon_placeholder(),
            ),
        }

        // Veil covers the bottom portion proportional to the time left, so
        // the icon is revealed top-down as the cooldown drains.
        if self.fraction_remaining > 0.0 {
            let veil_height = size * self.fraction_remaining;
            frame.fill_rect(
                x,
                y + size - veil_height,
                size,
                veil_height,
                colors::cooldown_veil(),
            );
        }

        if let Some(text) = &self.countdown {
            let (text_width, text_height) = frame.measure_text_styled(text, font_size, true, false);
            let tx = x + (size - text_width) / 2.0;
            let ty = y + (size - text_height) / 2.0;
            frame.draw_text_with_glow(
                text,
                tx,
                ty,
                font_size,
                colors::countdown_text(),
                true,
                false,
            );
        }
    }
}

impl Default for SpellButton<'_> {
    fn default() -> Self {
        Self::new()
    }
}
