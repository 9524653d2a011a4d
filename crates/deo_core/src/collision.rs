//! 2D shapes and overlap tests.
//!
//! Everything works in logical canvas space with `glam::Vec2` points.
//! Rectangles are axis aligned with the origin at the top-left corner.

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self::new(min.x, min.y, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Shrink by `amount` on every side.
    pub fn inset(&self, amount: f32) -> Self {
        Self::new(
            self.x + amount,
            self.y + amount,
            (self.width - 2.0 * amount).max(0.0),
            (self.height - 2.0 * amount).max(0.0),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Which sides of a shape are involved in a collision (or outside bounds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sides {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl Sides {
    #[inline]
    pub fn any(&self) -> bool {
        self.left || self.right || self.top || self.bottom
    }

    #[inline]
    pub fn horizontal(&self) -> bool {
        self.left || self.right
    }

    #[inline]
    pub fn vertical(&self) -> bool {
        self.top || self.bottom
    }
}

// ── Rectangles ─────────────────────────────────────────────────────────────

pub fn check_rects(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Sides of `a` that stick out of `b` while the two overlap.
pub fn rect_sides(a: &Rect, b: &Rect) -> Sides {
    if !check_rects(a, b) {
        return Sides::default();
    }
    Sides {
        left: a.x < b.x,
        right: a.right() > b.right(),
        top: a.y < b.y,
        bottom: a.bottom() > b.bottom(),
    }
}

/// Sides of `rect` that cross the edges of `bounds`.
pub fn rect_bounds(rect: &Rect, bounds: &Rect) -> Sides {
    Sides {
        left: rect.x < bounds.x,
        right: rect.right() > bounds.right(),
        top: rect.y < bounds.y,
        bottom: rect.bottom() > bounds.bottom(),
    }
}

// ── Circles ────────────────────────────────────────────────────────────────

/// Sides of `bounds` the circle pokes through.  Typical use is bouncing a
/// ball inside the canvas rectangle.
pub fn circle_bounds(circle: &Circle, bounds: &Rect) -> Sides {
    let Circle { center, radius } = *circle;
    Sides {
        left: center.x - radius < bounds.x,
        right: center.x + radius > bounds.right(),
        top: center.y - radius < bounds.y,
        bottom: center.y + radius > bounds.bottom(),
    }
}

pub fn check_circles(a: &Circle, b: &Circle) -> bool {
    let r = a.radius + b.radius;
    a.center.distance_squared(b.center) <= r * r
}

// max/min rather than clamp: a negative-size rect must not panic
fn closest_point_on_rect(p: Vec2, rect: &Rect) -> Vec2 {
    Vec2::new(
        p.x.min(rect.right()).max(rect.x),
        p.y.min(rect.bottom()).max(rect.y),
    )
}

pub fn check_circle_rect(circle: &Circle, rect: &Rect) -> bool {
    let closest = closest_point_on_rect(circle.center, rect);
    circle.center.distance_squared(closest) <= circle.radius * circle.radius
}

/// Sides of `rect` hit by the circle, based on where the center lies.
pub fn circle_rect_sides(circle: &Circle, rect: &Rect) -> Sides {
    if !check_circle_rect(circle, rect) {
        return Sides::default();
    }
    let c = circle.center;
    Sides {
        left: c.x < rect.x,
        right: c.x > rect.right(),
        top: c.y < rect.y,
        bottom: c.y > rect.bottom(),
    }
}

/// Segment `p1`–`p2` against a circle.
pub fn check_circle_line(circle: &Circle, p1: Vec2, p2: Vec2) -> bool {
    let line = p2 - p1;
    let len_sq = line.length_squared();
    if len_sq <= f32::EPSILON {
        return p1.distance_squared(circle.center) <= circle.radius * circle.radius;
    }
    let t = ((circle.center - p1).dot(line) / len_sq).clamp(0.0, 1.0);
    let closest = p1 + line * t;
    closest.distance_squared(circle.center) <= circle.radius * circle.radius
}

// ── Points ─────────────────────────────────────────────────────────────────

/// Strict containment; points on the border are outside.
pub fn check_point_rect(p: Vec2, rect: &Rect) -> bool {
    p.x > rect.x && p.y > rect.y && p.x < rect.right() && p.y < rect.bottom()
}

pub fn check_point_circle(p: Vec2, circle: &Circle) -> bool {
    p.distance_squared(circle.center) < circle.radius * circle.radius
}

/// Barycentric test; degenerate triangles contain nothing.
pub fn check_point_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let den = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
    if den == 0.0 {
        return false;
    }
    let alpha = ((b.y - c.y) * (p.x - c.x) + (c.x - b.x) * (p.y - c.y)) / den;
    let beta = ((c.y - a.y) * (p.x - c.x) + (a.x - c.x) * (p.y - c.y)) / den;
    let gamma = 1.0 - alpha - beta;
    alpha > 0.0 && beta > 0.0 && gamma > 0.0
}

/// Segment intersection.  Returns the crossing point, `None` for parallel
/// or disjoint segments.
pub fn check_lines(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> Option<Vec2> {
    let den = (b2.y - b1.y) * (a2.x - a1.x) - (b2.x - b1.x) * (a2.y - a1.y);
    if den == 0.0 {
        return None;
    }
    let ua = ((b2.x - b1.x) * (a1.y - b1.y) - (b2.y - b1.y) * (a1.x - b1.x)) / den;
    let ub = ((a2.x - a1.x) * (a1.y - b1.y) - (a2.y - a1.y) * (a1.x - b1.x)) / den;
    if (0.0..=1.0).contains(&ua) && (0.0..=1.0).contains(&ub) {
        Some(a1 + (a2 - a1) * ua)
    } else {
        None
    }
}

/// Is `p` within `threshold` pixels of the segment `p1`–`p2`?
pub fn check_point_line(p: Vec2, p1: Vec2, p2: Vec2, threshold: f32) -> bool {
    let d = p2 - p1;
    let cross = (p - p1).perp_dot(d);
    if cross.abs() >= threshold * d.x.abs().max(d.y.abs()) {
        return false;
    }
    if d.x.abs() >= d.y.abs() {
        if d.x > 0.0 {
            p1.x <= p.x && p.x <= p2.x
        } else {
            p2.x <= p.x && p.x <= p1.x
        }
    } else if d.y > 0.0 {
        p1.y <= p.y && p.y <= p2.y
    } else {
        p2.y <= p.y && p.y <= p1.y
    }
}
