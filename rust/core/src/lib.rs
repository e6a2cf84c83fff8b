// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor plan cleaning and spatial editing
//!
//! This crate turns the noisy geometric JSON produced by a raster-to-vector
//! recognition backend into a validated floor plan model, and applies simple
//! spatial edits to it:
//! 1. Normalizing wall segments (endpoint snapping)
//! 2. Extracting typed rooms, doors and windows (duplicate-vertex removal,
//!    area computation, proximity assignment)
//! 3. Assembling the aggregate floor plan with derived metrics
//! 4. Editing the result, e.g. splitting the largest room to add a bedroom
//!
//! Everything here is synchronous pure computation over owned values; each
//! stage returns a fresh structure and never touches shared state. Callers
//! running several floor plans in parallel must give each invocation its own
//! input.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rasterplan_core::{clean_floorplan, split_bedroom, CleanConfig, RawFloorplan};
//!
//! let raw: RawFloorplan = serde_json::from_str(&recognizer_output)?;
//! let cleaned = clean_floorplan(&raw, &CleanConfig::default());
//! let optimized = split_bedroom(&cleaned, 10000.0)?;
//! ```

pub mod opening_ops;
pub mod optimizer;
pub mod polygon_ops;
pub mod room_ops;
pub mod types;
pub mod wall_ops;

// Re-export commonly used types and functions
pub use opening_ops::{
    assign_doors_to_rooms, assign_windows_to_rooms, extract_doors, extract_windows,
};
pub use optimizer::{remove_room, resize_room, split_bedroom, Action, OptimizeError};
pub use polygon_ops::{polygon_area, polygon_boundary_distance, Bounds};
pub use room_ops::{extract_rooms, infer_room_type, remove_duplicate_vertices};
pub use types::{
    CleanConfig, Door, Floorplan, Point2D, RawDoor, RawFloorplan, RawWall, RawWindow, Room, Wall,
    Window,
};
pub use wall_ops::{extract_walls, snap_wall_endpoints};

use serde_json::{Map, Value};

/// Clean raw recognizer output into a validated floor plan
///
/// This runs the full cleaning pipeline:
/// 1. Wall extraction + endpoint snapping
/// 2. Room extraction (dedup, area, type inference)
/// 3. Door/window extraction + assignment to the nearest room
/// 4. Aggregate metrics and provenance metadata
///
/// Malformed entities (walls or openings with too few coordinates, rooms
/// that collapse below three vertices) are silently excluded; cleaning
/// itself never fails.
pub fn clean_floorplan(raw: &RawFloorplan, config: &CleanConfig) -> Floorplan {
    // Step 1: Walls
    let walls = extract_walls(&raw.walls);
    let walls = snap_wall_endpoints(walls, config.snap_threshold);

    // Step 2: Rooms
    let mut rooms = extract_rooms(&raw.rooms, config.duplicate_threshold);

    // Step 3: Openings
    let doors = extract_doors(&raw.doors);
    let windows = extract_windows(&raw.windows);
    assign_doors_to_rooms(&mut rooms, doors, config.opening_assign_max_distance);
    assign_windows_to_rooms(&mut rooms, windows, config.opening_assign_max_distance);

    // Step 4: Aggregate metrics. The perimeter is whatever the recognizer
    // reported; it is not recomputed from the cleaned geometry.
    let total_area = rooms.iter().map(|r| r.area).sum();

    let mut metadata = Map::new();
    metadata.insert("source".to_string(), Value::from("raster-recognizer"));
    metadata.insert("cleaned".to_string(), Value::from(true));
    metadata.insert("room_count".to_string(), Value::from(rooms.len()));
    metadata.insert(
        "wall_thickness_normalized".to_string(),
        Value::from(config.wall_thickness),
    );

    tracing::debug!(
        rooms = rooms.len(),
        walls = walls.len(),
        total_area,
        "floor plan cleaned"
    );

    Floorplan {
        rooms,
        walls,
        total_area,
        perimeter: raw.perimeter,
        metadata,
    }
}
