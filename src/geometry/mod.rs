// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-EPLadder-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of EPLadder and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Point and segment primitives shared by the transform, movement and linking code.
//!
//! Everything here is pure and allocation-free. Degenerate inputs (horizontal segments, zero
//! length directions) produce `None` rather than panicking because they occur routinely while
//! a mark is being dragged.

pub mod transform;

pub use transform::{RegionSpan, Viewport};

/// Tolerance used for "is this coordinate delta zero" checks.
pub const GEOMETRY_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    fn cross(self, other: Point) -> f64 {
        self.x * other.y - self.y * other.x
    }
}

/// A directed line segment running from `proximal` (top) to `distal` (bottom).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Segment {
    pub proximal: Point,
    pub distal: Point,
}

impl Segment {
    pub const fn new(proximal: Point, distal: Point) -> Self {
        Self { proximal, distal }
    }

    /// Shorthand for a vertical segment spanning a whole region at `x`.
    pub const fn vertical(x: f64) -> Self {
        Self::new(Point::new(x, 0.0), Point::new(x, 1.0))
    }

    pub fn midpoint(&self) -> Point {
        Point::new(
            (self.proximal.x + self.distal.x) / 2.0,
            (self.proximal.y + self.distal.y) / 2.0,
        )
    }

    pub fn length(&self) -> f64 {
        self.proximal.distance(self.distal)
    }

    pub fn width(&self) -> f64 {
        (self.proximal.x - self.distal.x).abs()
    }

    pub fn height(&self) -> f64 {
        (self.proximal.y - self.distal.y).abs()
    }

    pub fn is_horizontal(&self) -> bool {
        self.height() < GEOMETRY_EPSILON
    }

    /// Clamps both endpoints' y into the region-relative range `[0, 1]`.
    pub fn normalized(&self) -> Segment {
        Segment::new(
            Point::new(self.proximal.x, self.proximal.y.clamp(0.0, 1.0)),
            Point::new(self.distal.x, self.distal.y.clamp(0.0, 1.0)),
        )
    }

    /// Returns the x coordinate of the segment's line at height `y`.
    ///
    /// `y` must lie within the segment's vertical extent (endpoints included). Horizontal
    /// segments have no unique answer and return `None`.
    pub fn x_at_y(&self, y: f64) -> Option<f64> {
        let dy = self.distal.y - self.proximal.y;
        if dy.abs() < GEOMETRY_EPSILON {
            return None;
        }
        let (low, high) = if dy > 0.0 {
            (self.proximal.y, self.distal.y)
        } else {
            (self.distal.y, self.proximal.y)
        };
        if y < low - GEOMETRY_EPSILON || y > high + GEOMETRY_EPSILON {
            return None;
        }
        let t = (y - self.proximal.y) / dy;
        Some(self.proximal.x + t * (self.distal.x - self.proximal.x))
    }

    /// [`Segment::x_at_y`] at `point.y`, falling back to the x of whichever endpoint is
    /// nearest `point` when the line is horizontal or does not reach that height.
    pub fn x_at_y_or_nearest(&self, point: Point) -> f64 {
        self.x_at_y(point.y).unwrap_or_else(|| {
            if self.proximal.distance(point) <= self.distal.distance(point) {
                self.proximal.x
            } else {
                self.distal.x
            }
        })
    }

    fn direction(&self) -> Point {
        self.distal.sub(self.proximal)
    }
}

pub fn closest_point_on_segment(point: Point, segment: &Segment) -> Point {
    let dir = segment.direction();
    let len_sq = dir.dot(dir);
    if len_sq < GEOMETRY_EPSILON * GEOMETRY_EPSILON {
        return segment.proximal;
    }
    let t = (point.sub(segment.proximal).dot(dir) / len_sq).clamp(0.0, 1.0);
    Point::new(segment.proximal.x + t * dir.x, segment.proximal.y + t * dir.y)
}

pub fn distance_to_segment(point: Point, segment: &Segment) -> f64 {
    point.distance(closest_point_on_segment(point, segment))
}

/// Smallest of the four endpoint-to-segment distances between `a` and `b`.
///
/// This is what proximity linking thresholds against; unlike [`segment_distance`] it does
/// not collapse to zero for crossing segments.
pub fn endpoint_distance(a: &Segment, b: &Segment) -> f64 {
    [
        distance_to_segment(a.proximal, b),
        distance_to_segment(a.distal, b),
        distance_to_segment(b.proximal, a),
        distance_to_segment(b.distal, a),
    ]
    .into_iter()
    .fold(f64::INFINITY, f64::min)
}

pub fn segment_distance(a: &Segment, b: &Segment) -> f64 {
    if segment_intersection(a, b).is_some() {
        return 0.0;
    }
    endpoint_distance(a, b)
}

/// Intersection point of two segments, if they cross or touch.
///
/// Parallel (including collinear) segments report `None`.
pub fn segment_intersection(a: &Segment, b: &Segment) -> Option<Point> {
    let r = a.direction();
    let s = b.direction();
    let denom = r.cross(s);
    if denom.abs() < GEOMETRY_EPSILON {
        return None;
    }
    let qp = b.proximal.sub(a.proximal);
    let t = qp.cross(s) / denom;
    let u = qp.cross(r) / denom;
    let range = -GEOMETRY_EPSILON..=1.0 + GEOMETRY_EPSILON;
    if !range.contains(&t) || !range.contains(&u) {
        return None;
    }
    Some(Point::new(a.proximal.x + t * r.x, a.proximal.y + t * r.y))
}

/// Whether two segments point along the same line direction.
///
/// `epsilon` bounds the sine of the angle between them. Zero-length segments have no
/// direction and are never parallel.
pub fn are_parallel(a: &Segment, b: &Segment, epsilon: f64) -> bool {
    let r = a.direction();
    let s = b.direction();
    let norms = r.dot(r).sqrt() * s.dot(s).sqrt();
    if norms < GEOMETRY_EPSILON {
        return false;
    }
    (r.cross(s) / norms).abs() < epsilon
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(px: f64, py: f64, dx: f64, dy: f64) -> Segment {
        Segment::new(Point::new(px, py), Point::new(dx, dy))
    }

    #[test]
    fn segment_derived_measures() {
        let s = seg(0.0, 0.0, 30.0, 40.0);
        assert_eq!(s.midpoint(), Point::new(15.0, 20.0));
        assert_eq!(s.length(), 50.0);
        assert_eq!(s.width(), 30.0);
        assert_eq!(s.height(), 40.0);
    }

    #[test]
    fn normalized_clamps_y_only() {
        let s = seg(-5.0, -0.5, 12.0, 1.7).normalized();
        assert_eq!(s, seg(-5.0, 0.0, 12.0, 1.0));
    }

    #[test]
    fn x_at_y_interpolates_and_rejects_degenerate_inputs() {
        let s = seg(100.0, 0.0, 200.0, 1.0);
        assert_eq!(s.x_at_y(0.5), Some(150.0));
        assert_eq!(s.x_at_y(0.0), Some(100.0));
        assert_eq!(s.x_at_y(1.0), Some(200.0));
        assert_eq!(s.x_at_y(1.2), None);
        assert_eq!(seg(0.0, 0.4, 10.0, 0.4).x_at_y(0.4), None);

        let reversed = seg(200.0, 1.0, 100.0, 0.0);
        assert_eq!(reversed.x_at_y(0.25), Some(125.0));
    }

    #[test]
    fn x_at_y_or_nearest_falls_back_to_closest_endpoint() {
        let s = seg(100.0, 0.25, 200.0, 0.75);
        assert_eq!(s.x_at_y_or_nearest(Point::new(0.0, 0.5)), 150.0);
        assert_eq!(s.x_at_y_or_nearest(Point::new(90.0, 0.0)), 100.0);
        assert_eq!(s.x_at_y_or_nearest(Point::new(210.0, 1.0)), 200.0);

        let flat = seg(100.0, 0.5, 200.0, 0.5);
        assert_eq!(flat.x_at_y_or_nearest(Point::new(190.0, 0.5)), 200.0);
    }

    #[test]
    fn distance_to_segment_clamps_to_endpoints() {
        let s = seg(0.0, 0.0, 0.0, 10.0);
        assert_eq!(distance_to_segment(Point::new(3.0, 5.0), &s), 3.0);
        assert_eq!(distance_to_segment(Point::new(0.0, 14.0), &s), 4.0);
        assert_eq!(closest_point_on_segment(Point::new(-2.0, -1.0), &s), Point::new(0.0, 0.0));

        let point_like = seg(1.0, 1.0, 1.0, 1.0);
        assert_eq!(distance_to_segment(Point::new(4.0, 5.0), &point_like), 5.0);
    }

    #[test]
    fn intersection_of_crossing_segments() {
        let a = seg(0.0, 0.0, 10.0, 10.0);
        let b = seg(0.0, 10.0, 10.0, 0.0);
        let p = segment_intersection(&a, &b).expect("segments cross");
        assert!((p.x - 5.0).abs() < 1e-9 && (p.y - 5.0).abs() < 1e-9);
        assert_eq!(segment_distance(&a, &b), 0.0);
    }

    #[test]
    fn intersection_misses_when_segments_stop_short() {
        let a = seg(0.0, 0.0, 4.0, 4.0);
        let b = seg(0.0, 10.0, 10.0, 0.0);
        assert_eq!(segment_intersection(&a, &b), None);
        assert!(segment_distance(&a, &b) > 0.0);
        assert_eq!(segment_intersection(&a, &seg(1.0, 0.0, 5.0, 4.0)), None);
    }

    #[test]
    fn parallel_detection_uses_angle_not_offset() {
        let a = seg(0.0, 0.0, 0.0, 100.0);
        assert!(are_parallel(&a, &seg(50.0, 0.0, 50.0, 100.0), 0.01));
        assert!(are_parallel(&a, &seg(50.0, 100.0, 50.0, 0.0), 0.01));
        assert!(!are_parallel(&a, &seg(0.0, 0.0, 40.0, 100.0), 0.01));
        assert!(!are_parallel(&a, &seg(3.0, 3.0, 3.0, 3.0), 0.01));
    }

    #[test]
    fn endpoint_distance_is_minimum_of_four() {
        let a = seg(0.0, 0.0, 0.0, 10.0);
        let b = seg(7.0, 12.0, 20.0, 30.0);
        let expected = Point::new(0.0, 10.0).distance(Point::new(7.0, 12.0));
        assert!((endpoint_distance(&a, &b) - expected).abs() < 1e-9);
    }
}
