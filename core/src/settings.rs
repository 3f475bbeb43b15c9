//! Overlay settings persistence
//!
//! A small record read once at startup and written once at shutdown.
//! Load failure falls back to defaults; save failure is logged and skipped.
//! Neither blocks startup or shutdown.

use serde::{Deserialize, Serialize};
use sumtrack_types::Point;
use tracing::warn;

const APP_NAME: &str = "sumtrack";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Overlay offset relative to the target window's top-left corner.
    pub offset_x: i32,
    pub offset_y: i32,
    /// Absolute overlay position at last shutdown, used until a target
    /// window is first found.
    pub last_position: Option<(i32, i32)>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            offset_x: 10,
            offset_y: 100,
            last_position: None,
        }
    }
}

impl Settings {
    pub fn load() -> Self {
        confy::load(APP_NAME, None).unwrap_or_else(|e| {
            warn!("settings load failed, using defaults: {e}");
            Self::default()
        })
    }

    pub fn save(&self) {
        if let Err(e) = confy::store(APP_NAME, None, self) {
            warn!("settings save failed: {e}");
        }
    }

    pub fn offset(&self) -> Point {
        Point::new(self.offset_x, self.offset_y)
    }

    pub fn set_offset(&mut self, offset: Point) {
        self.offset_x = offset.x;
        self.offset_y = offset.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.offset(), Point::new(10, 100));
        assert_eq!(settings.last_position, None);
    }

    #[test]
    fn test_roundtrip_toml() {
        let mut settings = Settings::default();
        settings.set_offset(Point::new(-20, 340));
        settings.last_position = Some((1800, 60));

        let text = toml::to_string(&settings).unwrap();
        let back: Settings = toml::from_str(&text).unwrap();
        assert_eq!(back.offset(), Point::new(-20, 340));
        assert_eq!(back.last_position, Some((1800, 60)));
    }
}
