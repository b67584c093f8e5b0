//! Static marker dataset loading
//!
//! The marker data ships as a JSON table of entities, each with its sampled
//! spawn locations and a pre-computed centroid. Loaded once per session and
//! never mutated afterwards; markers with coordinates outside the map image
//! are invalid data and dropped here rather than crashing rendering later.

use crate::core::geo::{MapSize, Point};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Boundary between the terrain categories on the z axis
const TERRAIN_SPLIT: f64 = 7.0;

/// Terrain category a marker's `z` coordinate classifies it into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Terrain {
    Underground,
    Mountain,
    Plains,
}

impl Terrain {
    pub fn from_z(z: f64) -> Self {
        if z > TERRAIN_SPLIT {
            Terrain::Underground
        } else if z < TERRAIN_SPLIT {
            Terrain::Mountain
        } else {
            Terrain::Plains
        }
    }
}

/// One sampled spawn location in map-space coordinates.
///
/// Immutable after load; ids are assigned sequentially during loading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    #[serde(default)]
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Marker {
    pub fn new(id: u64, x: f64, y: f64, z: f64) -> Self {
        Self { id, x, y, z }
    }

    /// The marker's map-space position
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn terrain(&self) -> Terrain {
        Terrain::from_z(self.z)
    }
}

/// All sampled locations of one entity (e.g. one creature)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityMarkers {
    pub name: String,
    #[serde(default)]
    pub dex_number: u32,
    #[serde(default)]
    pub samples: usize,
    #[serde(rename = "locations")]
    pub markers: Vec<Marker>,
    /// Pre-computed centroid of the samples, the target of center-on
    #[serde(rename = "averageLocation")]
    pub average: Option<Marker>,
}

/// Parses the dataset from a JSON string and validates it against the map
/// dimensions
pub fn from_json(json: &str, map_size: &MapSize) -> Result<Vec<EntityMarkers>> {
    let entities: Vec<EntityMarkers> = serde_json::from_str(json)?;
    Ok(validate(entities, map_size))
}

/// Parses the dataset from a reader and validates it against the map
/// dimensions
pub fn from_reader<R: Read>(reader: R, map_size: &MapSize) -> Result<Vec<EntityMarkers>> {
    let entities: Vec<EntityMarkers> = serde_json::from_reader(reader)?;
    Ok(validate(entities, map_size))
}

/// Drops markers outside the map image and assigns sequential ids
fn validate(mut entities: Vec<EntityMarkers>, map_size: &MapSize) -> Vec<EntityMarkers> {
    let mut next_id: u64 = 1;

    for entity in &mut entities {
        let before = entity.markers.len();
        entity
            .markers
            .retain(|marker| map_size.contains(&marker.position()));

        let dropped = before - entity.markers.len();
        if dropped > 0 {
            log::warn!(
                "dropped {} out-of-bounds marker(s) for '{}'",
                dropped,
                entity.name
            );
        }

        for marker in &mut entity.markers {
            marker.id = next_id;
            next_id += 1;
        }
        entity.samples = entity.markers.len();
    }

    entities
}
