//! Viewport geometry shared by the drag controller and the cat's gaze logic.
//! Everything here is pure so it runs under native `cargo test` without a
//! browser; the only wasm touchpoint is the `DomRect` bridge.

/// A point in viewport (client) coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in viewport coordinates, top-left anchored like
/// `getBoundingClientRect`.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn from_dom(r: &web_sys::DomRect) -> Self {
        Self::new(r.left(), r.top(), r.width(), r.height())
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Grows the rect by `margin` pixels on every side.
    pub fn expand(&self, margin: f64) -> Rect {
        Rect::new(
            self.left - margin,
            self.top - margin,
            self.width + 2.0 * margin,
            self.height + 2.0 * margin,
        )
    }

    /// Closed-interval containment: edges count as inside.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right() && p.y >= self.top && p.y <= self.bottom()
    }
}

/// Quadrant the cat faces, chosen by the dominant axis of the pointer offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Dominant-axis direction from `center` toward `p`. Ties go vertical.
    pub fn toward(center: Point, p: Point) -> Direction {
        let dx = p.x - center.x;
        let dy = p.y - center.y;
        if dx.abs() > dy.abs() {
            if dx > 0.0 { Direction::Right } else { Direction::Left }
        } else if dy > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        }
    }

    /// Sprite filename fragment (`cat_face_<dir>.png`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_grows_every_side() {
        let r = Rect::new(100.0, 200.0, 50.0, 20.0).expand(30.0);
        assert_eq!(r.left, 70.0);
        assert_eq!(r.top, 170.0);
        assert_eq!(r.right(), 180.0);
        assert_eq!(r.bottom(), 250.0);
    }

    #[test]
    fn contains_is_edge_inclusive() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(10.0, 10.0)));
        assert!(!r.contains(Point::new(10.1, 5.0)));
        assert!(!r.contains(Point::new(5.0, -0.1)));
    }

    #[test]
    fn direction_picks_dominant_axis() {
        let c = Point::new(0.0, 0.0);
        assert_eq!(Direction::toward(c, Point::new(5.0, 1.0)), Direction::Right);
        assert_eq!(Direction::toward(c, Point::new(-5.0, 1.0)), Direction::Left);
        assert_eq!(Direction::toward(c, Point::new(1.0, 5.0)), Direction::Down);
        assert_eq!(Direction::toward(c, Point::new(1.0, -5.0)), Direction::Up);
        // Equal magnitudes resolve to the vertical axis.
        assert_eq!(Direction::toward(c, Point::new(3.0, -3.0)), Direction::Up);
    }
}
