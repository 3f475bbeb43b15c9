//! Summoner spell tracker overlay
//!
//! One row per tracked opponent: champion portrait on the left, the two
//! summoner spell buttons next to it. Cooling spells are veiled bottom-up
//! with a countdown number; clicks start, adjust, and reset the timers.

use std::collections::{HashMap, HashSet};

use tiny_skia::Color;
use tracing::debug;

use sumtrack_core::roster::SpellSlot;
use sumtrack_core::{Roster, SpellCatalog};
use sumtrack_types::formatting::{format_countdown, format_duration};

use crate::frame::OverlayFrame;
use crate::icons::{IconImage, IconKey};
use crate::platform::{MouseButton, OverlayConfig, PlatformError};
use crate::widgets::{colors, SpellButton};

/// Square size of portrait and spell buttons.
const BUTTON_SIZE: f32 = 35.0;
const PADDING: f32 = 5.0;
const ROW_SPACING: f32 = 3.0;
/// Gap between the champion portrait and the first spell button.
const ICON_SPACING: f32 = 5.0;
/// Gap between the two spell buttons.
const SLOT_SPACING: f32 = 2.0;
/// Title strip holding the close button.
const TOP_BAR: f32 = 15.0;
const CLOSE_SIZE: f32 = 15.0;
const COUNTDOWN_FONT_SIZE: f32 = 13.0;

/// Fixed window width: padding, portrait, two spell buttons, their gaps.
pub const WINDOW_WIDTH: u32 =
    (PADDING * 2.0 + BUTTON_SIZE * 3.0 + ICON_SPACING + SLOT_SPACING) as u32;

/// A left click on a running timer knocks this much off it, correcting for
/// a cast that was noticed late.
const PARTIAL_DEDUCT_SECS: u32 = 10;

/// What the click pass asks the application to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayAction {
    None,
    /// The close button was clicked.
    Close,
}

pub struct SpellTrackerOverlay {
    frame: OverlayFrame,
    icons: HashMap<IconKey, IconImage>,
    requested: HashSet<IconKey>,
    pending_requests: Vec<IconKey>,
}

impl SpellTrackerOverlay {
    pub fn new(config: OverlayConfig) -> Result<Self, PlatformError> {
        let frame = OverlayFrame::new(config)?;

        Ok(Self {
            frame,
            icons: HashMap::new(),
            requested: HashSet::new(),
            pending_requests: Vec::new(),
        })
    }

    /// Store a fetched icon for subsequent frames.
    pub fn add_icon(&mut self, key: IconKey, image: IconImage) {
        self.icons.insert(key, image);
    }

    /// Icon keys render() found missing since the last call. Each key is
    /// handed out once per run.
    pub fn take_icon_requests(&mut self) -> Vec<IconKey> {
        std::mem::take(&mut self.pending_requests)
    }

    /// Grow or shrink the window to fit the roster.
    pub fn sync_size(&mut self, rows: usize) -> Result<(), PlatformError> {
        self.frame.set_size(WINDOW_WIDTH, window_height(rows))
    }

    /// Render the roster into the window and commit.
    pub fn render(&mut self, roster: &Roster, catalog: &SpellCatalog) {
        let rows = roster.len();
        let content_height = window_height(rows) as f32;
        self.frame.begin_frame_with_content_height(content_height);

        self.draw_close_button();

        for (row, entry) in roster.entries().iter().enumerate() {
            let y = row_y(row);

            let champion_key = entry
                .champion
                .as_ref()
                .map(|name| IconKey::Champion(name.clone()));
            if let Some(key) = &champion_key {
                self.request_if_missing(key);
            }
            match champion_key.and_then(|key| self.icons.get(&key)) {
                Some(icon) => {
                    let icon = icon.clone();
                    self.frame.draw_image(
                        &icon.rgba,
                        icon.width,
                        icon.height,
                        PADDING,
                        y,
                        BUTTON_SIZE,
                        BUTTON_SIZE,
                    );
                }
                None => {
                    // Portrait still in flight: champion name as a stand-in
                    self.frame.fill_rounded_rect(
                        PADDING,
                        y,
                        BUTTON_SIZE,
                        BUTTON_SIZE,
                        5.0,
                        colors::icon_placeholder(),
                    );
                    let label: String =
                        entry.champion.as_deref().unwrap_or("?").chars().take(4).collect();
                    self.frame
                        .draw_text_styled(&label, PADDING + 2.0, y + 10.0, 10.0, colors::row_label(), false, false);
                }
            }

            for slot in SpellSlot::ALL {
                let timer = entry.spell(slot);
                let x = slot_x(slot);

                let icon_key = catalog
                    .icon_id(timer.name())
                    .map(|id| IconKey::Spell(id.to_string()));
                if let Some(key) = &icon_key {
                    self.request_if_missing(key);
                }

                // Clone keeps the frame borrow free for drawing
                let icon = icon_key.and_then(|key| self.icons.get(&key)).cloned();

                let mut button = SpellButton::new()
                    .with_icon(icon.as_ref())
                    .with_fraction_remaining(timer.fraction_remaining());
                if timer.is_running() {
                    button = button.with_countdown(format_countdown(timer.remaining()));
                }
                button.render(&mut self.frame, x, y, BUTTON_SIZE, COUNTDOWN_FONT_SIZE);
            }
        }

        self.frame.end_frame();
    }

    fn draw_close_button(&mut self) {
        let x = close_button_x();
        self.frame.fill_rounded_rect(
            x,
            0.0,
            CLOSE_SIZE,
            CLOSE_SIZE,
            3.0,
            Color::from_rgba8(50, 50, 50, 200),
        );
        let (w, h) = self.frame.measure_text("x", 11.0);
        self.frame.draw_text_styled(
            "x",
            x + (CLOSE_SIZE - w) / 2.0,
            (CLOSE_SIZE - h) / 2.0,
            11.0,
            colors::close_glyph(),
            true,
            false,
        );
    }

    fn request_if_missing(&mut self, key: &IconKey) {
        if !self.icons.contains_key(key) && self.requested.insert(key.clone()) {
            self.pending_requests.push(key.clone());
        }
    }

    /// Apply any pending click to the roster.
    ///
    /// Left on an idle spell starts its full cooldown; left on a running one
    /// deducts a few seconds; right resets it outright.
    pub fn handle_clicks(&mut self, roster: &mut Roster) -> OverlayAction {
        let mut action = OverlayAction::None;

        while let Some(click) = self.frame.take_pending_click() {
            if click.button == MouseButton::Left && hit_close_button(click.x as f32, click.y as f32)
            {
                action = OverlayAction::Close;
                continue;
            }

            let Some((row, slot)) = hit_spell_button(click.x as f32, click.y as f32, roster.len())
            else {
                continue;
            };
            let Some(entry) = roster.entries_mut().get_mut(row) else {
                continue;
            };
            let timer = entry.spell_mut(slot);

            match click.button {
                MouseButton::Left => {
                    if timer.is_running() {
                        timer.deduct(PARTIAL_DEDUCT_SECS);
                        debug!(
                            spell = timer.name(),
                            remaining = %format_duration(timer.remaining()),
                            "deducted cooldown"
                        );
                    } else {
                        timer.activate();
                        debug!(
                            spell = timer.name(),
                            duration = %format_duration(timer.remaining()),
                            "started cooldown"
                        );
                    }
                }
                MouseButton::Right => {
                    timer.reset();
                    debug!(spell = timer.name(), "reset cooldown");
                }
            }
        }

        action
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Window passthroughs
    // ─────────────────────────────────────────────────────────────────────────

    pub fn poll_events(&mut self) -> bool {
        self.frame.poll_events()
    }

    pub fn show(&mut self) {
        self.frame.show();
    }

    pub fn hide(&mut self) {
        self.frame.hide();
    }

    pub fn is_visible(&self) -> bool {
        self.frame.is_visible()
    }

    pub fn take_position_dirty(&mut self) -> bool {
        self.frame.take_position_dirty()
    }

    pub fn is_dragging(&self) -> bool {
        self.frame.is_dragging()
    }

    pub fn x(&self) -> i32 {
        self.frame.x()
    }

    pub fn y(&self) -> i32 {
        self.frame.y()
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.frame.set_position(x, y);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Layout
// ─────────────────────────────────────────────────────────────────────────────

fn window_height(rows: usize) -> u32 {
    let content = if rows == 0 {
        0.0
    } else {
        rows as f32 * BUTTON_SIZE + (rows - 1) as f32 * ROW_SPACING
    };
    (TOP_BAR + PADDING + content + PADDING) as u32
}

fn row_y(row: usize) -> f32 {
    TOP_BAR + PADDING + row as f32 * (BUTTON_SIZE + ROW_SPACING)
}

fn slot_x(slot: SpellSlot) -> f32 {
    let first = PADDING + BUTTON_SIZE + ICON_SPACING;
    match slot {
        SpellSlot::One => first,
        SpellSlot::Two => first + BUTTON_SIZE + SLOT_SPACING,
    }
}

fn close_button_x() -> f32 {
    WINDOW_WIDTH as f32 - CLOSE_SIZE
}

fn hit_close_button(x: f32, y: f32) -> bool {
    x >= close_button_x() && x < WINDOW_WIDTH as f32 && y >= 0.0 && y < CLOSE_SIZE
}

/// Map a window-local point to a spell button, if it lands on one.
fn hit_spell_button(x: f32, y: f32, rows: usize) -> Option<(usize, SpellSlot)> {
    for row in 0..rows {
        let top = row_y(row);
        if y < top || y >= top + BUTTON_SIZE {
            continue;
        }
        for slot in SpellSlot::ALL {
            let left = slot_x(slot);
            if x >= left && x < left + BUTTON_SIZE {
                return Some((row, slot));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_width_covers_three_buttons() {
        assert_eq!(WINDOW_WIDTH, 122);
    }

    #[test]
    fn test_window_height_per_rows() {
        assert_eq!(window_height(0), 25);
        assert_eq!(window_height(1), 60);
        assert_eq!(window_height(2), 98);
        assert_eq!(window_height(5), 212);
    }

    #[test]
    fn test_slot_positions_do_not_overlap() {
        let portrait_right = PADDING + BUTTON_SIZE;
        assert!(slot_x(SpellSlot::One) >= portrait_right);
        assert!(slot_x(SpellSlot::Two) >= slot_x(SpellSlot::One) + BUTTON_SIZE);
        assert!(slot_x(SpellSlot::Two) + BUTTON_SIZE + PADDING <= WINDOW_WIDTH as f32);
    }

    #[test]
    fn test_hit_spell_button() {
        // Center of row 0, slot one
        let x = slot_x(SpellSlot::One) + BUTTON_SIZE / 2.0;
        let y = row_y(0) + BUTTON_SIZE / 2.0;
        assert_eq!(hit_spell_button(x, y, 3), Some((0, SpellSlot::One)));

        // Center of row 2, slot two
        let x = slot_x(SpellSlot::Two) + 1.0;
        let y = row_y(2) + 1.0;
        assert_eq!(hit_spell_button(x, y, 3), Some((2, SpellSlot::Two)));

        // Row beyond the roster is a miss
        assert_eq!(hit_spell_button(x, row_y(4) + 1.0, 3), None);

        // Portrait column is not clickable
        assert_eq!(hit_spell_button(PADDING + 1.0, row_y(0) + 1.0, 3), None);
    }

    #[test]
    fn test_hit_close_button() {
        assert!(hit_close_button(WINDOW_WIDTH as f32 - 2.0, 2.0));
        assert!(!hit_close_button(WINDOW_WIDTH as f32 - CLOSE_SIZE - 1.0, 2.0));
        assert!(!hit_close_button(WINDOW_WIDTH as f32 - 2.0, CLOSE_SIZE + 1.0));
    }
}
