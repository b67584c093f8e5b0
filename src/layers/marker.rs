//! Marker layer: viewport culling, proximity clustering and pin sprites
//!
//! Given the camera and container size the layer computes, per render pass,
//! the subset of an entity's markers that is visible (with a generous buffer
//! so pins do not pop in at the edges) and collapses near-duplicate samples
//! into clusters so overlapping pins are not drawn on top of each other.

use crate::core::camera::Camera;
use crate::core::config::MarkerConfig;
use crate::core::geo::Point;
use crate::data::dataset::{EntityMarkers, Marker, Terrain};
use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A runtime-only grouping of markers whose x/y/z all lie within the
/// clustering threshold of the representative.
///
/// The representative is the first marker of the group in input order; the
/// full member list is carried so consumers can show counts or compute a
/// centroid themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub representative: Marker,
    pub members: Vec<Marker>,
}

impl Cluster {
    fn new(representative: Marker) -> Self {
        Self {
            representative,
            members: vec![representative],
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn accepts(&self, marker: &Marker, threshold: f64) -> bool {
        (marker.x - self.representative.x).abs() < threshold
            && (marker.y - self.representative.y).abs() < threshold
            && (marker.z - self.representative.z).abs() < threshold
    }
}

/// One renderable pin: the cluster representative positioned on screen
#[derive(Debug, Clone, PartialEq)]
pub struct PinSprite {
    pub marker: Marker,
    /// Screen position, recomputed from the camera every render pass
    pub screen: Point,
    /// Number of markers collapsed into this pin
    pub cluster_size: usize,
    pub terrain: Terrain,
}

/// Click payload for a pin: the marker's raw coordinates rounded to
/// integers, ready for a tooltip or copy-to-clipboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerHit {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl fmt::Display for MarkerHit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl From<&Marker> for MarkerHit {
    fn from(marker: &Marker) -> Self {
        Self {
            x: marker.x.round() as i64,
            y: marker.y.round() as i64,
            z: marker.z.round() as i64,
        }
    }
}

/// Holds the immutable entity dataset and derives visible pin sprites from
/// the current camera
#[derive(Debug)]
pub struct MarkerLayer {
    config: MarkerConfig,
    entities: Vec<EntityMarkers>,
    by_name: FxHashMap<String, usize>,
}

impl MarkerLayer {
    pub fn new(entities: Vec<EntityMarkers>, config: MarkerConfig) -> Self {
        let by_name = entities
            .iter()
            .enumerate()
            .map(|(index, entity)| (entity.name.clone(), index))
            .collect();
        Self {
            config,
            entities,
            by_name,
        }
    }

    pub fn entities(&self) -> &[EntityMarkers] {
        &self.entities
    }

    pub fn entity(&self, name: &str) -> Option<&EntityMarkers> {
        self.by_name.get(name).map(|&index| &self.entities[index])
    }

    pub fn config(&self) -> &MarkerConfig {
        &self.config
    }

    /// Retains the markers inside the buffered viewport, in input order
    pub fn cull(&self, markers: &[Marker], camera: &Camera, container: Point) -> Vec<Marker> {
        if !camera.is_measured() {
            return Vec::new();
        }
        let bounds = camera.viewport_bounds(container, self.config.cull_buffer);
        markers
            .iter()
            .filter(|marker| bounds.contains(&marker.position()))
            .copied()
            .collect()
    }

    /// Groups markers into clusters, first-wins.
    ///
    /// Iterates in input order; a marker joins the first existing cluster
    /// whose representative is within the threshold on all of x/y/z,
    /// otherwise it starts a new cluster. Deterministic for a fixed input
    /// order and threshold, and independent of the camera.
    pub fn cluster(markers: &[Marker], threshold: f64) -> Vec<Cluster> {
        let mut clusters: Vec<Cluster> = Vec::new();

        for marker in markers {
            match clusters
                .iter_mut()
                .find(|cluster| cluster.accepts(marker, threshold))
            {
                Some(cluster) => cluster.members.push(*marker),
                None => clusters.push(Cluster::new(*marker)),
            }
        }

        clusters
    }

    /// Computes the pin sprites for one entity under the current camera:
    /// cull, cluster, then position each representative via the transform
    pub fn sprites(&self, name: &str, camera: &Camera, container: Point) -> Vec<PinSprite> {
        let entity = match self.entity(name) {
            Some(entity) => entity,
            None => return Vec::new(),
        };

        let visible = self.cull(&entity.markers, camera, container);
        Self::cluster(&visible, self.config.cluster_threshold)
            .into_iter()
            .map(|cluster| PinSprite {
                marker: cluster.representative,
                screen: camera.to_screen(cluster.representative.position()),
                cluster_size: cluster.len(),
                terrain: cluster.representative.terrain(),
            })
            .collect()
    }

    /// The payload surfaced when a pin is clicked
    pub fn hit(sprite: &PinSprite) -> MarkerHit {
        MarkerHit::from(&sprite.marker)
    }
}
