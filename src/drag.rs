//! Exclusive drag-session state machine for the feeding interaction.
//!
//! A session exists only between pointer-down on a live glizzy and the matching
//! pointer-up (or a forced cancellation on resize / tab-hide). At most one
//! session is active at any time; attempts to start a second are no-ops. Every
//! path out of a drag goes through `resolve` or `cancel`, both of which take
//! the session so no dangling state can survive.

use crate::geom::{Point, Rect};

/// Identifier assigned to each glizzy sprite when it joins the pile.
pub type GlizzyId = u32;

/// State captured on pointer-down; destroyed when the drag ends.
#[derive(Clone, Copy, Debug)]
pub struct DragSession {
    pub glizzy: GlizzyId,
    /// Pointer position minus the sprite's top-left at grab time, so the
    /// sprite follows the cursor without snapping to it.
    pub grab_offset: Point,
    /// Sprite top-left before the drag, restored on a missed drop.
    pub origin: Point,
}

/// How a drag ended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragOutcome {
    /// Released inside the expanded mouth zone: the glizzy is consumed.
    Fed { glizzy: GlizzyId },
    /// Released anywhere else: the glizzy returns to where it was picked up.
    Returned { glizzy: GlizzyId, origin: Point },
    /// No session was active.
    Idle,
}

/// Owns the zero-or-one active session and the configured drop margin.
#[derive(Debug)]
pub struct DragController {
    session: Option<DragSession>,
    drop_margin: f64,
}

impl DragController {
    pub fn new(drop_margin: f64) -> Self {
        Self {
            session: None,
            drop_margin,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Starts a session for `glizzy` grabbed at `pointer` over `item`.
    /// Returns false (and changes nothing) while another drag is active.
    pub fn begin(&mut self, glizzy: GlizzyId, pointer: Point, item: Rect) -> bool {
        if self.session.is_some() {
            return false;
        }
        self.session = Some(DragSession {
            glizzy,
            grab_offset: Point::new(pointer.x - item.left, pointer.y - item.top),
            origin: Point::new(item.left, item.top),
        });
        true
    }

    /// Where the dragged sprite's top-left should sit for this pointer
    /// position. None when no drag is active. Recomputed per event, no
    /// throttling.
    pub fn drag_position(&self, pointer: Point) -> Option<Point> {
        self.session.as_ref().map(|s| {
            Point::new(pointer.x - s.grab_offset.x, pointer.y - s.grab_offset.y)
        })
    }

    /// Pure hit test: is the pointer inside the mouth rect grown by the
    /// configured margin? Visual feedback is the caller's business.
    pub fn over_zone(&self, pointer: Point, mouth: Rect) -> bool {
        mouth.expand(self.drop_margin).contains(pointer)
    }

    /// Ends the active session against the release point.
    pub fn resolve(&mut self, pointer: Point, mouth: Rect) -> DragOutcome {
        match self.session.take() {
            None => DragOutcome::Idle,
            Some(s) if mouth.expand(self.drop_margin).contains(pointer) => {
                DragOutcome::Fed { glizzy: s.glizzy }
            }
            Some(s) => DragOutcome::Returned {
                glizzy: s.glizzy,
                origin: s.origin,
            },
        }
    }

    /// Forced teardown (window resize, tab hidden). Idempotent: a second call
    /// returns None and changes nothing.
    pub fn cancel(&mut self) -> Option<DragSession> {
        self.session.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouth() -> Rect {
        Rect::new(400.0, 300.0, 60.0, 40.0)
    }

    #[test]
    fn begin_records_offset_and_origin() {
        let mut c = DragController::new(100.0);
        assert!(c.begin(7, Point::new(25.0, 35.0), Rect::new(10.0, 20.0, 40.0, 16.0)));
        let s = c.session().unwrap();
        assert_eq!(s.glizzy, 7);
        assert_eq!(s.grab_offset, Point::new(15.0, 15.0));
        assert_eq!(s.origin, Point::new(10.0, 20.0));
    }

    #[test]
    fn second_begin_is_noop_while_active() {
        let mut c = DragController::new(100.0);
        assert!(c.begin(1, Point::new(0.0, 0.0), Rect::default()));
        assert!(!c.begin(2, Point::new(5.0, 5.0), Rect::default()));
        assert_eq!(c.session().unwrap().glizzy, 1);
    }

    #[test]
    fn drag_position_follows_pointer_minus_offset() {
        let mut c = DragController::new(100.0);
        c.begin(1, Point::new(25.0, 35.0), Rect::new(10.0, 20.0, 40.0, 16.0));
        assert_eq!(
            c.drag_position(Point::new(125.0, 135.0)),
            Some(Point::new(110.0, 120.0))
        );
        c.cancel();
        assert_eq!(c.drag_position(Point::new(125.0, 135.0)), None);
    }

    #[test]
    fn release_in_expanded_zone_feeds() {
        let mut c = DragController::new(100.0);
        c.begin(3, Point::new(0.0, 0.0), Rect::default());
        // 50px left of the mouth rect, inside the 100px margin.
        let out = c.resolve(Point::new(350.0, 320.0), mouth());
        assert_eq!(out, DragOutcome::Fed { glizzy: 3 });
        assert!(!c.is_active());
    }

    #[test]
    fn release_outside_returns_to_origin() {
        let mut c = DragController::new(30.0);
        c.begin(4, Point::new(12.0, 8.0), Rect::new(10.0, 5.0, 40.0, 16.0));
        let out = c.resolve(Point::new(0.0, 0.0), mouth());
        assert_eq!(
            out,
            DragOutcome::Returned {
                glizzy: 4,
                origin: Point::new(10.0, 5.0),
            }
        );
        assert!(!c.is_active());
    }

    #[test]
    fn resolve_without_session_is_idle() {
        let mut c = DragController::new(30.0);
        assert_eq!(c.resolve(Point::new(0.0, 0.0), mouth()), DragOutcome::Idle);
    }

    #[test]
    fn cancel_is_idempotent_and_resets_fully() {
        let mut c = DragController::new(30.0);
        c.begin(9, Point::new(1.0, 1.0), Rect::default());
        assert!(c.cancel().is_some());
        assert!(!c.is_active());
        assert!(c.cancel().is_none());
        // A fresh drag can start after cancellation.
        assert!(c.begin(10, Point::new(0.0, 0.0), Rect::default()));
    }

    #[test]
    fn zone_margin_is_edge_inclusive() {
        let c = DragController::new(30.0);
        let m = mouth();
        assert!(c.over_zone(Point::new(m.left - 30.0, m.top), m));
        assert!(!c.over_zone(Point::new(m.left - 30.1, m.top), m));
    }
}
