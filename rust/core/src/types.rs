// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for floor plan cleaning and editing

use nalgebra::Point2;
use rustc_hash::FxHashMap;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::polygon_ops::boundary_to_boundary_distance;

/// A 2D point in meters (simplified for serialization)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_nalgebra(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    pub fn from_nalgebra(p: &Point2<f64>) -> Self {
        Self { x: p.x, y: p.y }
    }

    pub fn distance_to(&self, other: &Point2D) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn midpoint(&self, other: &Point2D) -> Point2D {
        Point2D::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Wall segment between two snapped endpoints
///
/// Walls carry no identity beyond their endpoints; snapping rebuilds them
/// rather than mutating in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    pub start: Point2D,
    pub end: Point2D,
}

impl Wall {
    pub fn new(start: Point2D, end: Point2D) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

// The canonical schema carries the derived length on every wall record.
impl Serialize for Wall {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Wall", 3)?;
        state.serialize_field("start", &self.start)?;
        state.serialize_field("end", &self.end)?;
        state.serialize_field("length", &self.length())?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for Wall {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Endpoints {
            start: Point2D,
            end: Point2D,
        }

        // A stored `length` field is ignored; it is always recomputed.
        let endpoints = Endpoints::deserialize(deserializer)?;
        Ok(Wall::new(endpoints.start, endpoints.end))
    }
}

/// Door with its bounding quadrilateral
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Door {
    /// Boundary points (four corners of the detected bounding box)
    pub position: Vec<Point2D>,
    pub width: f64,
    /// Ids of the rooms this door connects, filled in during assignment.
    /// Runtime-only; the canonical schema stores doors per room instead.
    #[serde(skip)]
    pub connects: Vec<String>,
}

impl Door {
    pub fn new(position: Vec<Point2D>, width: f64) -> Self {
        Self {
            position,
            width,
            connects: Vec::new(),
        }
    }

    /// Arithmetic mean of the boundary points (not area-weighted)
    pub fn center(&self) -> Point2D {
        if self.position.is_empty() {
            return Point2D::new(0.0, 0.0);
        }
        let n = self.position.len() as f64;
        let cx = self.position.iter().map(|p| p.x).sum::<f64>() / n;
        let cy = self.position.iter().map(|p| p.y).sum::<f64>() / n;
        Point2D::new(cx, cy)
    }
}

/// Window with its bounding quadrilateral
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Window {
    pub position: Vec<Point2D>,
    pub width: f64,
}

impl Window {
    pub fn new(position: Vec<Point2D>, width: f64) -> Self {
        Self { position, width }
    }
}

/// A room as a simple polygon with its owned openings
///
/// `area` is always the polygon area computed from `vertices` at the time it
/// was last set; callers recompute it instead of editing it by hand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Room {
    pub id: String,
    /// Enum-like label: bedroom, bathroom, living_room, unknown, ...
    pub room_type: String,
    pub vertices: Vec<Point2D>,
    pub area: f64,
    pub doors: Vec<Door>,
    pub windows: Vec<Window>,
}

/// Aggregate floor plan model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Floorplan {
    pub rooms: Vec<Room>,
    pub walls: Vec<Wall>,
    /// Sum of room areas; holds after every mutation that touches rooms
    pub total_area: f64,
    /// Passed through from the recognizer output, not recomputed
    pub perimeter: f64,
    /// Provenance flags: source, cleaned, optimized, action, counts
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl Floorplan {
    /// Derive which rooms touch: two rooms are adjacent when their polygon
    /// boundaries come within `tolerance` of each other.
    ///
    /// Every room gets an entry; neighbors are listed in room order.
    pub fn adjacency_graph(&self, tolerance: f64) -> FxHashMap<String, Vec<String>> {
        let mut graph: FxHashMap<String, Vec<String>> = FxHashMap::default();
        for room in &self.rooms {
            graph.insert(room.id.clone(), Vec::new());
        }

        for (i, a) in self.rooms.iter().enumerate() {
            for b in self.rooms.iter().skip(i + 1) {
                let dist = boundary_to_boundary_distance(&a.vertices, &b.vertices);
                if dist <= tolerance {
                    if let Some(neighbors) = graph.get_mut(&a.id) {
                        neighbors.push(b.id.clone());
                    }
                    if let Some(neighbors) = graph.get_mut(&b.id) {
                        neighbors.push(a.id.clone());
                    }
                }
            }
        }

        graph
    }
}

/// Raw wall segment as produced by the recognizer
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawWall {
    /// Coordinate pairs; the first two are the segment endpoints
    #[serde(default)]
    pub position: Vec<[f64; 2]>,
}

/// Raw door record as produced by the recognizer
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawDoor {
    /// Bounding box corners; at least four coordinate pairs expected
    #[serde(default)]
    pub bbox: Vec<[f64; 2]>,
}

/// Raw window record as produced by the recognizer
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawWindow {
    #[serde(default)]
    pub bbox: Vec<[f64; 2]>,
}

/// Untrusted recognizer payload, the immutable input to cleaning
///
/// Every field is optional in the wire format; missing sections clean to an
/// empty floor plan rather than failing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawFloorplan {
    /// One vertex list per detected room polygon
    #[serde(default)]
    pub rooms: Vec<Vec<Point2D>>,
    #[serde(default)]
    pub walls: Vec<RawWall>,
    #[serde(default)]
    pub doors: Vec<RawDoor>,
    #[serde(default)]
    pub windows: Vec<RawWindow>,
    #[serde(default)]
    pub perimeter: f64,
}

/// Configuration for the cleaning pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanConfig {
    /// Distance below which nearby wall endpoints snap to their midpoint
    pub snap_threshold: f64,
    /// Consecutive room vertices at or under this distance collapse into one
    pub duplicate_threshold: f64,
    /// Maximum distance from an opening center to a room boundary for
    /// the opening to be assigned to that room
    pub opening_assign_max_distance: f64,
    /// Normalized wall thickness recorded in the cleaned metadata (meters)
    pub wall_thickness: f64,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            snap_threshold: 5.0,
            duplicate_threshold: 1.0,
            opening_assign_max_distance: 20.0,
            wall_thickness: 0.15,
        }
    }
}
