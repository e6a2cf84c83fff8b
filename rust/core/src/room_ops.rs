// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room extraction: vertex dedup, area and type inference

use crate::polygon_ops::polygon_area;
use crate::types::{Point2D, Room};

/// Build validated rooms from raw vertex lists
///
/// Vertex lists with fewer than three points are skipped, as are rooms left
/// with fewer than three vertices after duplicate removal. Ids are
/// positional over the raw input (`room_<index>`), so skipped entries
/// consume their index.
pub fn extract_rooms(room_data: &[Vec<Point2D>], duplicate_threshold: f64) -> Vec<Room> {
    let mut rooms = Vec::new();

    for (i, raw_vertices) in room_data.iter().enumerate() {
        if raw_vertices.len() < 3 {
            continue;
        }

        let vertices = remove_duplicate_vertices(raw_vertices, duplicate_threshold);
        if vertices.len() < 3 {
            continue;
        }

        let area = polygon_area(&vertices);
        let room_type = infer_room_type(area);

        rooms.push(Room {
            id: format!("room_{}", i),
            room_type: room_type.to_string(),
            vertices,
            area,
            doors: Vec::new(),
            windows: Vec::new(),
        });
    }

    rooms
}

/// Drop consecutive near-duplicate vertices
///
/// Each vertex is compared against the last KEPT vertex, not its raw
/// predecessor, and survives only when strictly farther than `threshold`.
pub fn remove_duplicate_vertices(vertices: &[Point2D], threshold: f64) -> Vec<Point2D> {
    let Some(first) = vertices.first() else {
        return Vec::new();
    };

    let mut cleaned = vec![*first];
    let mut last = *first;
    for vertex in &vertices[1..] {
        if vertex.distance_to(&last) > threshold {
            cleaned.push(*vertex);
            last = *vertex;
        }
    }

    cleaned
}

/// Infer a room type from its area (simple fixed thresholds)
pub fn infer_room_type(area: f64) -> &'static str {
    if area < 5000.0 {
        "bathroom"
    } else if area < 15000.0 {
        "bedroom"
    } else if area < 30000.0 {
        "living_room"
    } else {
        "unknown"
    }
}
