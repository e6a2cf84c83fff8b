// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Spatial edits over a cleaned floor plan
//!
//! Every edit builds a new `Floorplan` value; the input is never mutated.
//! Walls pass through unchanged and `total_area` is recomputed from the
//! updated room list.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::polygon_ops::{centroid, polygon_area, Bounds};
use crate::types::{Floorplan, Point2D, Room};

/// Errors that can occur while editing a floor plan
#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error("floor plan has no rooms")]
    EmptyFloorplan,

    #[error("no room with id {0}")]
    UnknownRoom(String),

    #[error("scale factor must be a positive number, got {0}")]
    InvalidFactor(f64),
}

/// A requested floor plan edit
///
/// Tagged so the wire form reads `{"action": "add_bedroom", ...}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Split the largest room, turning one half into a new bedroom
    AddBedroom {
        #[serde(default = "default_min_area")]
        min_area: f64,
    },
    /// Remove a room by id
    RemoveRoom { room_id: String },
    /// Uniformly scale a room about its centroid
    ResizeRoom { room_id: String, factor: f64 },
}

fn default_min_area() -> f64 {
    10000.0
}

impl Action {
    /// The `action` value recorded in the result's metadata
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddBedroom { .. } => "add_bedroom",
            Action::RemoveRoom { .. } => "remove_room",
            Action::ResizeRoom { .. } => "resize_room",
        }
    }

    pub fn apply(&self, floorplan: &Floorplan) -> Result<Floorplan, OptimizeError> {
        match self {
            Action::AddBedroom { min_area } => split_bedroom(floorplan, *min_area),
            Action::RemoveRoom { room_id } => remove_room(floorplan, room_id),
            Action::ResizeRoom { room_id, factor } => resize_room(floorplan, room_id, *factor),
        }
    }
}

/// Add a bedroom by splitting the largest room in two
///
/// The largest room (first one wins on equal areas) is replaced by the two
/// halves of its axis-aligned bounding box, cut at the midpoint of the
/// longer axis. The low-coordinate half keeps the original room type under
/// id `<id>_1`; the other half becomes a bedroom under `<id>_2_bedroom`.
/// A room whose polygon is degenerate is kept unchanged.
///
/// `min_area` is reserved for future constraint checking and is currently
/// not enforced.
pub fn split_bedroom(floorplan: &Floorplan, min_area: f64) -> Result<Floorplan, OptimizeError> {
    let _ = min_area;

    let mut largest = floorplan.rooms.first().ok_or(OptimizeError::EmptyFloorplan)?;
    for room in &floorplan.rooms[1..] {
        if room.area > largest.area {
            largest = room;
        }
    }

    let replacements = split_room(largest);

    let mut rooms: Vec<Room> = floorplan
        .rooms
        .iter()
        .filter(|r| r.id != largest.id)
        .cloned()
        .collect();
    rooms.extend(replacements);

    let total_area = rooms.iter().map(|r| r.area).sum();

    tracing::debug!(rooms = rooms.len(), total_area, "split largest room");

    Ok(Floorplan {
        rooms,
        walls: floorplan.walls.clone(),
        total_area,
        perimeter: floorplan.perimeter,
        metadata: merged_metadata(&floorplan.metadata, "add_bedroom"),
    })
}

/// Remove a room by id and recompute the aggregate area
pub fn remove_room(floorplan: &Floorplan, room_id: &str) -> Result<Floorplan, OptimizeError> {
    if !floorplan.rooms.iter().any(|r| r.id == room_id) {
        return Err(OptimizeError::UnknownRoom(room_id.to_string()));
    }

    let rooms: Vec<Room> = floorplan
        .rooms
        .iter()
        .filter(|r| r.id != room_id)
        .cloned()
        .collect();
    let total_area = rooms.iter().map(|r| r.area).sum();

    Ok(Floorplan {
        rooms,
        walls: floorplan.walls.clone(),
        total_area,
        perimeter: floorplan.perimeter,
        metadata: merged_metadata(&floorplan.metadata, "remove_room"),
    })
}

/// Uniformly scale a room about its centroid
///
/// The room's vertices move toward (factor < 1) or away from (factor > 1)
/// their centroid; its area and the floor plan total are recomputed.
pub fn resize_room(
    floorplan: &Floorplan,
    room_id: &str,
    factor: f64,
) -> Result<Floorplan, OptimizeError> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(OptimizeError::InvalidFactor(factor));
    }

    let mut rooms = floorplan.rooms.clone();
    let room = rooms
        .iter_mut()
        .find(|r| r.id == room_id)
        .ok_or_else(|| OptimizeError::UnknownRoom(room_id.to_string()))?;

    let center = centroid(&room.vertices);
    for vertex in &mut room.vertices {
        vertex.x = center.x + (vertex.x - center.x) * factor;
        vertex.y = center.y + (vertex.y - center.y) * factor;
    }
    room.area = polygon_area(&room.vertices);

    let total_area = rooms.iter().map(|r| r.area).sum();

    Ok(Floorplan {
        rooms,
        walls: floorplan.walls.clone(),
        total_area,
        perimeter: floorplan.perimeter,
        metadata: merged_metadata(&floorplan.metadata, "resize_room"),
    })
}

/// Split a room along the longer axis of its bounding box
///
/// Always produces two axis-aligned rectangles, whatever the original
/// polygon's shape. Degenerate rooms come back unchanged.
fn split_room(room: &Room) -> Vec<Room> {
    if room.vertices.len() < 3 {
        return vec![room.clone()];
    }
    let bounds = match Bounds::from_points(&room.vertices) {
        Some(bounds) => bounds,
        None => return vec![room.clone()],
    };

    let (kept_half, bedroom_half) = if bounds.width() > bounds.height() {
        let mid_x = (bounds.min_x + bounds.max_x) / 2.0;
        (
            rectangle(bounds.min_x, bounds.min_y, mid_x, bounds.max_y),
            rectangle(mid_x, bounds.min_y, bounds.max_x, bounds.max_y),
        )
    } else {
        let mid_y = (bounds.min_y + bounds.max_y) / 2.0;
        (
            rectangle(bounds.min_x, bounds.min_y, bounds.max_x, mid_y),
            rectangle(bounds.min_x, mid_y, bounds.max_x, bounds.max_y),
        )
    };

    let room_1 = Room {
        id: format!("{}_1", room.id),
        room_type: room.room_type.clone(),
        area: polygon_area(&kept_half),
        vertices: kept_half,
        doors: Vec::new(),
        windows: Vec::new(),
    };
    let room_2 = Room {
        id: format!("{}_2_bedroom", room.id),
        room_type: "bedroom".to_string(),
        area: polygon_area(&bedroom_half),
        vertices: bedroom_half,
        doors: Vec::new(),
        windows: Vec::new(),
    };

    vec![room_1, room_2]
}

fn rectangle(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Vec<Point2D> {
    vec![
        Point2D::new(min_x, min_y),
        Point2D::new(max_x, min_y),
        Point2D::new(max_x, max_y),
        Point2D::new(min_x, max_y),
    ]
}

fn merged_metadata(base: &Map<String, Value>, action: &str) -> Map<String, Value> {
    let mut metadata = base.clone();
    metadata.insert("optimized".to_string(), Value::from(true));
    metadata.insert("action".to_string(), Value::from(action));
    metadata
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Wall;

    fn room(id: &str, vertices: Vec<Point2D>) -> Room {
        Room {
            id: id.to_string(),
            room_type: "living_room".to_string(),
            area: polygon_area(&vertices),
            vertices,
            doors: Vec::new(),
            windows: Vec::new(),
        }
    }

    fn rect_room(id: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> Room {
        room(id, rectangle(x0, y0, x1, y1))
    }

    fn two_room_plan() -> Floorplan {
        let rooms = vec![
            rect_room("room_0", 0.0, 0.0, 10.0, 10.0),
            rect_room("room_1", 20.0, 0.0, 30.0, 5.0),
        ];
        let total_area = rooms.iter().map(|r| r.area).sum();
        Floorplan {
            rooms,
            walls: vec![Wall::new(Point2D::new(0.0, 0.0), Point2D::new(10.0, 0.0))],
            total_area,
            perimeter: 40.0,
            metadata: Map::new(),
        }
    }

    #[test]
    fn test_split_bedroom_replaces_largest_room() {
        let plan = two_room_plan();

        let optimized = split_bedroom(&plan, 10000.0).unwrap();

        // N rooms in, N+1 out; the largest (room_0, area 100) is gone
        assert_eq!(optimized.rooms.len(), 3);
        assert!(optimized.rooms.iter().all(|r| r.id != "room_0"));

        // 10x10 bounding box: width equals height, so the split falls to
        // the horizontal branch and yields two 50-area halves
        let room_1 = optimized.rooms.iter().find(|r| r.id == "room_0_1").unwrap();
        let room_2 = optimized
            .rooms
            .iter()
            .find(|r| r.id == "room_0_2_bedroom")
            .unwrap();
        assert!((room_1.area - 50.0).abs() < 1e-9);
        assert!((room_2.area - 50.0).abs() < 1e-9);
        assert_eq!(room_1.room_type, "living_room");
        assert_eq!(room_2.room_type, "bedroom");

        // Low-y half keeps the type; the far half is the new bedroom
        assert!(room_1.vertices.iter().all(|v| v.y <= 5.0));
        assert!(room_2.vertices.iter().all(|v| v.y >= 5.0));

        // Area conservation and metadata provenance
        assert!((optimized.total_area - 150.0).abs() < 1e-9);
        assert_eq!(optimized.metadata["optimized"], Value::from(true));
        assert_eq!(optimized.metadata["action"], Value::from("add_bedroom"));

        // Walls and perimeter pass through untouched
        assert_eq!(optimized.walls, plan.walls);
        assert_eq!(optimized.perimeter, plan.perimeter);
    }

    #[test]
    fn test_split_bedroom_wide_room_splits_vertically() {
        let rooms = vec![rect_room("room_0", 0.0, 0.0, 40.0, 10.0)];
        let plan = Floorplan {
            total_area: rooms[0].area,
            rooms,
            walls: Vec::new(),
            perimeter: 0.0,
            metadata: Map::new(),
        };

        let optimized = split_bedroom(&plan, 10000.0).unwrap();

        let room_1 = optimized.rooms.iter().find(|r| r.id == "room_0_1").unwrap();
        let room_2 = optimized
            .rooms
            .iter()
            .find(|r| r.id == "room_0_2_bedroom")
            .unwrap();

        // Left half keeps the type, right half becomes the bedroom
        assert!(room_1.vertices.iter().all(|v| v.x <= 20.0));
        assert!(room_2.vertices.iter().all(|v| v.x >= 20.0));
        assert!((room_1.area - 200.0).abs() < 1e-9);
        assert!((room_2.area - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_split_bedroom_halves_cover_bounding_box_of_odd_shape() {
        // Non-rectangular room: the split works on the bounding box, so
        // the halves sum to the box area, not the polygon area
        let triangle = room(
            "room_0",
            vec![
                Point2D::new(0.0, 0.0),
                Point2D::new(20.0, 0.0),
                Point2D::new(0.0, 10.0),
            ],
        );
        let plan = Floorplan {
            total_area: triangle.area,
            rooms: vec![triangle],
            walls: Vec::new(),
            perimeter: 0.0,
            metadata: Map::new(),
        };

        let optimized = split_bedroom(&plan, 10000.0).unwrap();

        let halves: f64 = optimized.rooms.iter().map(|r| r.area).sum();
        assert!((halves - 200.0).abs() < 1e-9);
        assert!((optimized.total_area - halves).abs() < 1e-9);
    }

    #[test]
    fn test_split_bedroom_first_max_wins_on_tie() {
        let rooms = vec![
            rect_room("room_0", 0.0, 0.0, 10.0, 10.0),
            rect_room("room_1", 20.0, 0.0, 30.0, 10.0),
        ];
        let plan = Floorplan {
            total_area: rooms.iter().map(|r| r.area).sum(),
            rooms,
            walls: Vec::new(),
            perimeter: 0.0,
            metadata: Map::new(),
        };

        let optimized = split_bedroom(&plan, 10000.0).unwrap();

        assert!(optimized.rooms.iter().any(|r| r.id == "room_1"));
        assert!(optimized.rooms.iter().all(|r| r.id != "room_0"));
    }

    #[test]
    fn test_split_bedroom_degenerate_room_is_kept_unchanged() {
        let degenerate = Room {
            id: "room_0".to_string(),
            room_type: "unknown".to_string(),
            vertices: vec![Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0)],
            area: 0.0,
            doors: Vec::new(),
            windows: Vec::new(),
        };
        let plan = Floorplan {
            rooms: vec![degenerate.clone()],
            walls: Vec::new(),
            total_area: 0.0,
            perimeter: 0.0,
            metadata: Map::new(),
        };

        let optimized = split_bedroom(&plan, 10000.0).unwrap();

        // No split happened, but the result still carries the merged
        // metadata and a recomputed total
        assert_eq!(optimized.rooms, vec![degenerate]);
        assert_eq!(optimized.metadata["action"], Value::from("add_bedroom"));
    }

    #[test]
    fn test_split_bedroom_empty_floorplan_errors() {
        let plan = Floorplan {
            rooms: Vec::new(),
            walls: Vec::new(),
            total_area: 0.0,
            perimeter: 0.0,
            metadata: Map::new(),
        };

        assert!(matches!(
            split_bedroom(&plan, 10000.0),
            Err(OptimizeError::EmptyFloorplan)
        ));
    }

    #[test]
    fn test_remove_room() {
        let plan = two_room_plan();

        let optimized = remove_room(&plan, "room_1").unwrap();

        assert_eq!(optimized.rooms.len(), 1);
        assert_eq!(optimized.rooms[0].id, "room_0");
        assert!((optimized.total_area - 100.0).abs() < 1e-9);
        assert_eq!(optimized.metadata["action"], Value::from("remove_room"));

        assert!(matches!(
            remove_room(&plan, "no_such_room"),
            Err(OptimizeError::UnknownRoom(_))
        ));
    }

    #[test]
    fn test_resize_room_scales_about_centroid() {
        let plan = two_room_plan();

        let optimized = resize_room(&plan, "room_0", 2.0).unwrap();

        let resized = optimized.rooms.iter().find(|r| r.id == "room_0").unwrap();
        // 10x10 square doubled about its center (5,5) -> 20x20 from -5 to 15
        assert!((resized.area - 400.0).abs() < 1e-9);
        assert!((resized.vertices[0].x - -5.0).abs() < 1e-9);
        assert!((resized.vertices[2].x - 15.0).abs() < 1e-9);

        // The untouched room still contributes to the recomputed total
        assert!((optimized.total_area - 450.0).abs() < 1e-9);
        assert_eq!(optimized.metadata["action"], Value::from("resize_room"));
    }

    #[test]
    fn test_resize_room_rejects_bad_factor() {
        let plan = two_room_plan();

        assert!(matches!(
            resize_room(&plan, "room_0", 0.0),
            Err(OptimizeError::InvalidFactor(_))
        ));
        assert!(matches!(
            resize_room(&plan, "room_0", -1.0),
            Err(OptimizeError::InvalidFactor(_))
        ));
        assert!(matches!(
            resize_room(&plan, "room_0", f64::NAN),
            Err(OptimizeError::InvalidFactor(_))
        ));
    }

    #[test]
    fn test_action_round_trips_through_json() {
        let action: Action =
            serde_json::from_str(r#"{"action": "add_bedroom", "min_area": 12000.0}"#).unwrap();
        assert_eq!(
            action,
            Action::AddBedroom {
                min_area: 12000.0
            }
        );

        let action: Action = serde_json::from_str(r#"{"action": "add_bedroom"}"#).unwrap();
        assert_eq!(action, Action::AddBedroom { min_area: 10000.0 });

        let action: Action =
            serde_json::from_str(r#"{"action": "resize_room", "room_id": "room_3", "factor": 0.5}"#)
                .unwrap();
        assert_eq!(action.name(), "resize_room");

        let value = serde_json::to_value(&Action::RemoveRoom {
            room_id: "room_1".to_string(),
        })
        .unwrap();
        assert_eq!(value["action"], Value::from("remove_room"));
    }

    #[test]
    fn test_apply_dispatches_by_action() {
        let plan = two_room_plan();

        let optimized = Action::AddBedroom { min_area: 10000.0 }.apply(&plan).unwrap();
        assert_eq!(optimized.rooms.len(), 3);

        let optimized = Action::RemoveRoom {
            room_id: "room_0".to_string(),
        }
        .apply(&plan)
        .unwrap();
        assert_eq!(optimized.rooms.len(), 1);
    }
}
