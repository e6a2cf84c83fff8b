// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Door/window extraction and proximity assignment to rooms

use crate::polygon_ops::{centroid, polygon_boundary_distance};
use crate::types::{Door, Point2D, RawDoor, RawWindow, Room, Window};

/// Build doors from raw bounding boxes
///
/// A record needs at least four coordinate pairs; the first four become the
/// boundary points. Width is the distance between the first two boundary
/// points, matching how the recognizer orders bbox corners.
pub fn extract_doors(door_data: &[RawDoor]) -> Vec<Door> {
    let mut doors = Vec::new();
    for raw in door_data {
        if let Some(position) = bbox_corners(&raw.bbox) {
            let width = position[0].distance_to(&position[1]);
            doors.push(Door::new(position, width));
        }
    }
    doors
}

/// Build windows from raw bounding boxes, same rules as doors
pub fn extract_windows(window_data: &[RawWindow]) -> Vec<Window> {
    let mut windows = Vec::new();
    for raw in window_data {
        if let Some(position) = bbox_corners(&raw.bbox) {
            let width = position[0].distance_to(&position[1]);
            windows.push(Window::new(position, width));
        }
    }
    windows
}

fn bbox_corners(bbox: &[[f64; 2]]) -> Option<Vec<Point2D>> {
    if bbox.len() < 4 {
        return None;
    }
    Some(
        bbox[..4]
            .iter()
            .map(|pair| Point2D::new(pair[0], pair[1]))
            .collect(),
    )
}

/// Assign each door to the room whose boundary is closest to its center
///
/// Strict `<` against the running minimum, so ties go to the first room in
/// iteration order. A door farther than `max_distance` from every boundary
/// is dropped. The winning room's id is recorded on the door before the
/// door moves into that room's list.
pub fn assign_doors_to_rooms(rooms: &mut [Room], doors: Vec<Door>, max_distance: f64) {
    for mut door in doors {
        if let Some(index) = closest_room(rooms, &door.center(), max_distance) {
            door.connects.push(rooms[index].id.clone());
            rooms[index].doors.push(door);
        }
    }
}

/// Assign windows with the same proximity rule as doors
pub fn assign_windows_to_rooms(rooms: &mut [Room], windows: Vec<Window>, max_distance: f64) {
    for window in windows {
        let center = centroid(&window.position);
        if let Some(index) = closest_room(rooms, &center, max_distance) {
            rooms[index].windows.push(window);
        }
    }
}

fn closest_room(rooms: &[Room], center: &Point2D, max_distance: f64) -> Option<usize> {
    let mut min_dist = f64::INFINITY;
    let mut closest = None;

    for (index, room) in rooms.iter().enumerate() {
        // Rooms degenerate to no polygon cannot host an opening
        if room.vertices.len() < 3 {
            continue;
        }
        let dist = polygon_boundary_distance(center, &room.vertices);
        if dist < min_dist && dist < max_distance {
            min_dist = dist;
            closest = Some(index);
        }
    }

    closest
}
