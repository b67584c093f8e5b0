//! Heat layer: density blobs over the culled marker set
//!
//! The alternate visualization mode. Every culled marker gets a radial
//! gradient blob at its projected screen position; no clustering is applied
//! so density stays visible. The radius is emitted in screen pixels, so blob
//! size stays constant across zoom levels.

use crate::core::camera::Camera;
use crate::core::config::HeatConfig;
use crate::core::geo::Point;
use crate::data::dataset::Marker;
use serde::{Deserialize, Serialize};

/// One renderable density blob: a two-stop radial gradient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatBlob {
    /// Screen-space center
    pub center: Point,
    /// On-screen radius in pixels
    pub radius: f64,
    /// RGBA at the gradient center
    pub inner_color: [u8; 4],
    /// RGBA at the gradient edge
    pub outer_color: [u8; 4],
}

/// Computes heat blobs for the current camera from an already-culled marker
/// set
#[derive(Debug, Default)]
pub struct HeatLayer {
    config: HeatConfig,
}

impl HeatLayer {
    pub fn new(config: HeatConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HeatConfig {
        &self.config
    }

    /// One blob per culled marker, positioned via the transform. All culled
    /// markers are drawn; overlap is the point.
    pub fn blobs(&self, culled: &[Marker], camera: &Camera) -> Vec<HeatBlob> {
        culled
            .iter()
            .map(|marker| HeatBlob {
                center: camera.to_screen(marker.position()),
                radius: self.config.radius,
                inner_color: self.config.inner_color,
                outer_color: self.config.outer_color,
            })
            .collect()
    }
}
