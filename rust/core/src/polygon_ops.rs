// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon and segment measurement helpers

use crate::types::Point2D;
use nalgebra::Vector2;

/// Axis-aligned bounding box over a set of points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Returns `None` for an empty point set
    pub fn from_points(points: &[Point2D]) -> Option<Bounds> {
        let first = points.first()?;
        let mut bounds = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for point in &points[1..] {
            bounds.min_x = bounds.min_x.min(point.x);
            bounds.min_y = bounds.min_y.min(point.y);
            bounds.max_x = bounds.max_x.max(point.x);
            bounds.max_y = bounds.max_y.max(point.y);
        }
        Some(bounds)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Polygon area via the shoelace formula
///
/// Works for any simple polygon, convex or not. Degenerate input (fewer than
/// three vertices, or non-finite coordinates) yields 0.
pub fn polygon_area(points: &[Point2D]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    if points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return 0.0;
    }

    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].x * points[j].y;
        area -= points[j].x * points[i].y;
    }

    (area / 2.0).abs()
}

/// Arithmetic mean of a point set; the origin for an empty set
pub fn centroid(points: &[Point2D]) -> Point2D {
    if points.is_empty() {
        return Point2D::new(0.0, 0.0);
    }
    let n = points.len() as f64;
    let cx = points.iter().map(|p| p.x).sum::<f64>() / n;
    let cy = points.iter().map(|p| p.y).sum::<f64>() / n;
    Point2D::new(cx, cy)
}

/// Distance from a point to a line segment (not the infinite line)
pub fn point_to_segment_distance(point: &Point2D, a: &Point2D, b: &Point2D) -> f64 {
    let ab = Vector2::new(b.x - a.x, b.y - a.y);
    let ap = Vector2::new(point.x - a.x, point.y - a.y);

    let length_sq = ab.norm_squared();
    if length_sq < 1e-10 {
        return point.distance_to(a);
    }

    let t = (ap.dot(&ab) / length_sq).clamp(0.0, 1.0);
    let projected = Point2D::new(a.x + t * ab.x, a.y + t * ab.y);
    point.distance_to(&projected)
}

/// Distance from a point to a polygon's boundary ring
///
/// The closing edge from the last vertex back to the first is included, so
/// the result is 0 only on the ring itself, not for interior points.
pub fn polygon_boundary_distance(point: &Point2D, polygon: &[Point2D]) -> f64 {
    match polygon.len() {
        0 => f64::INFINITY,
        1 => point.distance_to(&polygon[0]),
        n => {
            let mut min_dist = f64::INFINITY;
            for i in 0..n {
                let j = (i + 1) % n;
                let dist = point_to_segment_distance(point, &polygon[i], &polygon[j]);
                min_dist = min_dist.min(dist);
            }
            min_dist
        }
    }
}

/// Best-effort minimum distance between two polygon boundaries
///
/// Measured vertex-to-boundary in both directions; crossing edges without a
/// nearby vertex are not detected, which is acceptable for floor plan rooms.
pub fn boundary_to_boundary_distance(a: &[Point2D], b: &[Point2D]) -> f64 {
    let mut min_dist = f64::INFINITY;
    for vertex in a {
        min_dist = min_dist.min(polygon_boundary_distance(vertex, b));
    }
    for vertex in b {
        min_dist = min_dist.min(polygon_boundary_distance(vertex, a));
    }
    min_dist
}
