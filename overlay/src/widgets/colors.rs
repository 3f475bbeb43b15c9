//! Shared color palette for overlay rendering

use tiny_skia::Color;

#[inline]
pub fn transparent() -> Color {
    Color::from_rgba8(0, 0, 0, 0)
}

#[inline]
pub fn white() -> Color {
    Color::from_rgba8(255, 255, 255, 255)
}

/// Dark shadow behind glowed text.
#[inline]
pub fn text_shadow() -> Color {
    Color::from_rgba8(0, 0, 0, 220)
}

/// Button background behind spell icons.
#[inline]
pub fn button_background() -> Color {
    Color::from_rgba8(34, 34, 34, 255)
}

/// Placeholder fill while an icon is still downloading.
#[inline]
pub fn icon_placeholder() -> Color {
    Color::from_rgba8(60, 60, 70, 255)
}

/// Bottom-up veil over an icon while its cooldown runs.
#[inline]
pub fn cooldown_veil() -> Color {
    Color::from_rgba8(0, 0, 0, 180)
}

/// Countdown number over a cooling-down spell.
#[inline]
pub fn countdown_text() -> Color {
    Color::from_rgba8(255, 255, 255, 255)
}

/// Champion name over the row header.
#[inline]
pub fn row_label() -> Color {
    Color::from_rgba8(200, 200, 200, 230)
}

/// Close button glyph.
#[inline]
pub fn close_glyph() -> Color {
    Color::from_rgba8(220, 100, 100, 255)
}
