//! World-space geometry helpers.
//!
//! Points are integer-rounded at the moment they enter world space (see
//! [`Point::rounded`]); downstream comparisons can then rely on exact
//! equality without float drift.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A world-space coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a point from raw coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Creates a point rounded to the nearest integer coordinates.
    pub fn rounded(x: f64, y: f64) -> Self {
        Self {
            x: x.round(),
            y: y.round(),
        }
    }

    /// Returns this point shifted by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Euclidean distance between two points.
pub fn distance_between(a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// Rounds `value` to `places` decimal places. `places = 0` rounds to the
/// nearest integer.
pub fn round_to(value: f64, places: u32) -> f64 {
    if places == 0 {
        return value.round();
    }
    let preserve = 10f64.powi(places as i32);
    (value * preserve).round() / preserve
}

/// Ray-cast containment test: whether `point` lies inside `polygon`.
///
/// Casts a ray to the right of the point and toggles on each edge crossing.
/// Degenerate polygons (fewer than 3 vertices) contain nothing.
pub fn point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let n = polygon.len();
    let mut j = n - 1;
    for i in 0..n {
        let pi = polygon[i];
        let pj = polygon[j];

        let intersects_y = (pi.y > point.y) != (pj.y > point.y);
        if intersects_y {
            let x_intersect = pi.x + ((point.y - pi.y) * (pj.x - pi.x)) / (pj.y - pi.y);
            if x_intersect > point.x {
                inside = !inside;
            }
        }
        j = i;
    }

    inside
}

/// Area of a simple polygon via the shoelace formula. Zero for fewer than 3
/// vertices.
pub fn polygon_area(polygon: &[Point]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }

    let mut sum = 0.0;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let pi = polygon[i];
        let pj = polygon[j];
        sum += pj.x * pi.y - pi.x * pj.y;
        j = i;
    }

    sum.abs() / 2.0
}

/// Snaps a point to the nearest multiple of `snap` on each axis. A snap size
/// of zero leaves the (rounded) point unchanged.
pub fn snap_to_grid(point: Point, snap: f64) -> Point {
    let snap_axis = |value: f64| -> f64 {
        let v = value.round();
        if snap <= 0.0 {
            return v;
        }
        let rem = v.rem_euclid(snap);
        if rem == 0.0 {
            v
        } else if rem >= snap / 2.0 {
            v + snap - rem
        } else {
            v - rem
        }
    };

    Point::new(snap_axis(point.x), snap_axis(point.y))
}

/// Corner points of an axis-aligned rectangle in fixed winding order:
/// top-left, top-right, bottom-right, bottom-left.
pub fn rectangle_corners(tl_x: f64, tl_y: f64, width: f64, height: f64) -> [Point; 4] {
    [
        Point::new(tl_x, tl_y),
        Point::new(tl_x + width, tl_y),
        Point::new(tl_x + width, tl_y + height),
        Point::new(tl_x, tl_y + height),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rounded_points_have_integer_coordinates() {
        let p = Point::rounded(10.4, -3.6);
        assert_eq!(p, Point::new(10.0, -4.0));
    }

    #[test]
    fn distance_is_euclidean() {
        let d = distance_between(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert_eq!(d, 5.0);
    }

    #[test]
    fn round_to_places() {
        assert_eq!(round_to(1.005, 2), 1.0);
        assert_eq!(round_to(0.299_999_999, 2), 0.3);
        assert_eq!(round_to(2.5, 0), 3.0);
    }

    #[test]
    fn point_in_polygon_square() {
        let square = rectangle_corners(0.0, 0.0, 10.0, 10.0);
        assert!(point_in_polygon(Point::new(5.0, 5.0), &square));
        assert!(!point_in_polygon(Point::new(15.0, 5.0), &square));
        assert!(!point_in_polygon(Point::new(-1.0, 5.0), &square));
    }

    #[test]
    fn degenerate_polygon_contains_nothing() {
        let line = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        assert!(!point_in_polygon(Point::new(5.0, 0.0), &line));
        assert_eq!(polygon_area(&line), 0.0);
    }

    #[test]
    fn polygon_area_square() {
        let square = rectangle_corners(2.0, 3.0, 10.0, 4.0);
        assert_eq!(polygon_area(&square), 40.0);
    }

    #[test]
    fn snap_rounds_to_nearest_multiple() {
        assert_eq!(snap_to_grid(Point::new(49.0, 26.0), 25.0), Point::new(50.0, 25.0));
        assert_eq!(snap_to_grid(Point::new(12.0, 13.0), 25.0), Point::new(0.0, 25.0));
        assert_eq!(snap_to_grid(Point::new(7.3, 7.3), 0.0), Point::new(7.0, 7.0));
    }

    #[test]
    fn corners_wind_tl_tr_br_bl() {
        let corners = rectangle_corners(1.0, 2.0, 3.0, 4.0);
        assert_eq!(corners[0], Point::new(1.0, 2.0));
        assert_eq!(corners[1], Point::new(4.0, 2.0));
        assert_eq!(corners[2], Point::new(4.0, 6.0));
        assert_eq!(corners[3], Point::new(1.0, 6.0));
    }

    proptest! {
        #[test]
        fn snapped_points_land_on_grid(x in -10_000.0..10_000.0f64, y in -10_000.0..10_000.0f64) {
            let snapped = snap_to_grid(Point::new(x, y), 25.0);
            prop_assert_eq!(snapped.x.rem_euclid(25.0), 0.0);
            prop_assert_eq!(snapped.y.rem_euclid(25.0), 0.0);
        }

        #[test]
        fn rectangle_area_matches_width_times_height(
            x in -1_000.0..1_000.0f64,
            y in -1_000.0..1_000.0f64,
            w in 0.0..500.0f64,
            h in 0.0..500.0f64,
        ) {
            let corners = rectangle_corners(x, y, w, h);
            prop_assert!((polygon_area(&corners) - w * h).abs() < 1e-6);
        }
    }
}
