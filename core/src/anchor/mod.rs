//! Window-anchored presentation state machine
//!
//! The overlay stays visually locked to the target application's window.
//! There is no channel to that process: position and focus are inferred
//! purely from window-system queries, so the handle is treated as a weak
//! reference that the [`WindowProbe`] re-resolves every cycle.
//!
//! The state machine itself is pure. Each `observe` call returns the side
//! effects the caller must apply: at most one show/hide edge per
//! transition, and a position while anchored.

use sumtrack_types::{Point, Rect};

/// What the probe saw in one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetWindow {
    pub rect: Rect,
    /// Whether the target is the desktop's foreground window.
    pub is_foreground: bool,
}

/// Locates the target application's window by title.
///
/// Implemented by the platform layer. A returned handle is only valid for
/// the cycle that produced it.
pub trait WindowProbe {
    fn locate(&mut self) -> Option<TargetWindow>;
}

/// Observable anchor states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorState {
    Hidden,
    Anchored,
}

/// Visibility side effect fired exactly once per transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityEdge {
    Show,
    Hide,
}

/// Side effects one anchor cycle asks the caller to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnchorUpdate {
    pub edge: Option<VisibilityEdge>,
    /// Overlay origin for this cycle; present only while anchored.
    pub position: Option<Point>,
}

/// Anchor state: overlay offset relative to the target window's top-left,
/// current visibility, and the last known target origin.
#[derive(Debug, Clone)]
pub struct WindowAnchor {
    state: AnchorState,
    offset: Point,
    last_target_origin: Option<Point>,
}

impl WindowAnchor {
    pub fn new(offset: Point) -> Self {
        Self {
            state: AnchorState::Hidden,
            offset,
            last_target_origin: None,
        }
    }

    pub fn state(&self) -> AnchorState {
        self.state
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Feed one probe result through the state machine.
    pub fn observe(&mut self, target: Option<TargetWindow>) -> AnchorUpdate {
        match target {
            Some(t) if t.is_foreground => {
                self.last_target_origin = Some(t.rect.origin());
                let edge = (self.state == AnchorState::Hidden).then_some(VisibilityEdge::Show);
                self.state = AnchorState::Anchored;
                AnchorUpdate {
                    edge,
                    position: Some(Point::new(
                        t.rect.x + self.offset.x,
                        t.rect.y + self.offset.y,
                    )),
                }
            }
            other => {
                // Found-but-backgrounded still refreshes the origin so a
                // drag while hidden stays meaningful.
                if let Some(t) = other {
                    self.last_target_origin = Some(t.rect.origin());
                }
                let edge = (self.state == AnchorState::Anchored).then_some(VisibilityEdge::Hide);
                self.state = AnchorState::Hidden;
                AnchorUpdate {
                    edge,
                    position: None,
                }
            }
        }
    }

    /// Record a user-moved overlay origin.
    ///
    /// While a target window is known the offset is recomputed as
    /// `overlay_position - target_top_left`; with no target the move stands
    /// but the offset keeps its meaning relative to whatever window is
    /// found next. Returns whether the offset changed.
    pub fn note_overlay_position(&mut self, position: Point) -> bool {
        match self.last_target_origin {
            Some(origin) => {
                self.offset = Point::new(position.x - origin.x, position.y - origin.y);
                true
            }
            None => false,
        }
    }

    /// Convenience for tests and callers holding a rect.
    pub fn anchored_position(&self, target: Rect) -> Point {
        Point::new(target.x + self.offset.x, target.y + self.offset.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(x: i32, y: i32, foreground: bool) -> Option<TargetWindow> {
        Some(TargetWindow {
            rect: Rect::new(x, y, 1920, 1080),
            is_foreground: foreground,
        })
    }

    #[test]
    fn test_not_found_stays_hidden() {
        let mut anchor = WindowAnchor::new(Point::new(10, 100));
        let update = anchor.observe(None);
        assert_eq!(anchor.state(), AnchorState::Hidden);
        assert_eq!(update.edge, None, "already hidden; no edge fires");
        assert_eq!(update.position, None);
    }

    #[test]
    fn test_show_fires_exactly_once() {
        let mut anchor = WindowAnchor::new(Point::new(10, 100));

        let first = anchor.observe(found(50, 50, true));
        assert_eq!(first.edge, Some(VisibilityEdge::Show));
        assert_eq!(first.position, Some(Point::new(60, 150)));

        let second = anchor.observe(found(55, 50, true));
        assert_eq!(second.edge, None, "steady anchored state has no edge");
        assert_eq!(second.position, Some(Point::new(65, 150)));
    }

    #[test]
    fn test_background_target_hides_anchored_overlay() {
        let mut anchor = WindowAnchor::new(Point::new(0, 0));
        anchor.observe(found(0, 0, true));
        assert_eq!(anchor.state(), AnchorState::Anchored);

        let update = anchor.observe(found(0, 0, false));
        assert_eq!(anchor.state(), AnchorState::Hidden);
        assert_eq!(update.edge, Some(VisibilityEdge::Hide));
        assert_eq!(update.position, None);

        // Regaining foreground fires exactly one show
        let regained = anchor.observe(found(0, 0, true));
        assert_eq!(regained.edge, Some(VisibilityEdge::Show));
    }

    #[test]
    fn test_lost_target_hides_once() {
        let mut anchor = WindowAnchor::new(Point::new(0, 0));
        anchor.observe(found(0, 0, true));

        assert_eq!(anchor.observe(None).edge, Some(VisibilityEdge::Hide));
        assert_eq!(anchor.observe(None).edge, None, "hide is edge-triggered");
    }

    #[test]
    fn test_drag_updates_offset_against_known_target() {
        let mut anchor = WindowAnchor::new(Point::new(50, 50));
        anchor.observe(found(50, 50, true));

        // Overlay dragged from (100,100) to (150,120) while the target
        // sits at (50,50): offset becomes (100,70).
        assert!(anchor.note_overlay_position(Point::new(150, 120)));
        assert_eq!(anchor.offset(), Point::new(100, 70));

        let update = anchor.observe(found(50, 50, true));
        assert_eq!(update.position, Some(Point::new(150, 120)));
    }

    #[test]
    fn test_drag_without_target_leaves_offset() {
        let mut anchor = WindowAnchor::new(Point::new(10, 100));
        assert!(!anchor.note_overlay_position(Point::new(500, 500)));
        assert_eq!(anchor.offset(), Point::new(10, 100));
    }

    #[test]
    fn test_drag_while_hidden_uses_last_known_origin() {
        let mut anchor = WindowAnchor::new(Point::new(0, 0));
        anchor.observe(found(200, 300, false));
        assert_eq!(anchor.state(), AnchorState::Hidden);

        assert!(anchor.note_overlay_position(Point::new(250, 350)));
        assert_eq!(anchor.offset(), Point::new(50, 50));
    }
}
