// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall extraction and endpoint snapping

use crate::types::{Point2D, RawWall, Wall};

/// Build wall segments from raw recognizer records
///
/// Entries with fewer than two coordinate pairs are skipped; extra pairs
/// beyond the first two are ignored.
pub fn extract_walls(wall_data: &[RawWall]) -> Vec<Wall> {
    let mut walls = Vec::new();
    for raw in wall_data {
        if raw.position.len() >= 2 {
            let start = Point2D::new(raw.position[0][0], raw.position[0][1]);
            let end = Point2D::new(raw.position[1][0], raw.position[1][1]);
            walls.push(Wall::new(start, end));
        }
    }
    walls
}

/// Snap nearby wall endpoints to their pairwise midpoint
///
/// Endpoints are flattened into one sequence, start points at even indexes.
/// Each even-index point is compared against every later point; a pair under
/// `snap_threshold` has both slots rewritten with the midpoint of the outer
/// point (as read at the start of its scan) and the later point's current
/// value. A single pass, not transitively closed: when a point qualifies
/// against several neighbors, the last write wins for its slot. Callers rely
/// on this exact ordering, so it must not be replaced with a clustering
/// merge.
pub fn snap_wall_endpoints(walls: Vec<Wall>, snap_threshold: f64) -> Vec<Wall> {
    if walls.is_empty() {
        return walls;
    }

    let mut points = Vec::with_capacity(walls.len() * 2);
    for wall in &walls {
        points.push(wall.start);
        points.push(wall.end);
    }

    for i in (0..points.len()).step_by(2) {
        let p = points[i];
        for j in (i + 1)..points.len() {
            if p.distance_to(&points[j]) < snap_threshold {
                let mid = p.midpoint(&points[j]);
                points[i] = mid;
                points[j] = mid;
            }
        }
    }

    points
        .chunks_exact(2)
        .map(|pair| Wall::new(pair[0], pair[1]))
        .collect()
}
