//! Configuration for camera behavior, gestures, animation and layers
//!
//! All tunable constants of the engine live here, grouped per concern, so a
//! consumer can override any of them while `MapConfig::default()` reproduces
//! the reference behavior.

use std::time::Duration;

/// Zoom limits and step factors for the camera command API
#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    /// Minimum allowed zoom level
    pub zoom_min: f64,
    /// Maximum allowed zoom level
    pub zoom_max: f64,
    /// Multiplicative step applied by `zoom_in` / `zoom_out`
    pub zoom_factor: f64,
    /// Per-wheel-notch zoom step; the applied factor is `1 + step`
    pub wheel_step: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            zoom_min: 0.3,
            zoom_max: 4.0,
            zoom_factor: 1.2,
            wheel_step: 0.1,
        }
    }
}

/// Drag gesture tuning
#[derive(Debug, Clone, PartialEq)]
pub struct GestureConfig {
    /// Minimum interval between applied drag-move updates (~60 Hz)
    pub throttle: Duration,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            throttle: Duration::from_millis(16),
        }
    }
}

/// Camera transition tuning for `center_on`
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationConfig {
    /// Total transition duration
    pub duration: Duration,
    /// Zoom level a centered entity is shown at
    pub center_zoom: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(500),
            center_zoom: 1.6,
        }
    }
}

/// Soft pan-limit tuning
#[derive(Debug, Clone, PartialEq)]
pub struct ClampConfig {
    /// Inactivity period before limits are applied
    pub debounce: Duration,
    /// Padding beyond the container, as a fraction of the larger rendered
    /// map dimension
    pub padding_ratio: f64,
    /// Extra screen-space slack past the padded range before any correction
    pub emergency_threshold: f64,
}

impl Default for ClampConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(100),
            padding_ratio: 0.8,
            emergency_threshold: 50.0,
        }
    }
}

/// Marker layer culling and clustering tuning
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerConfig {
    /// Map-space margin added around the viewport before culling
    pub cull_buffer: f64,
    /// Per-axis map-space distance within which markers merge into a cluster
    pub cluster_threshold: f64,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            cull_buffer: 500.0,
            cluster_threshold: 8.0,
        }
    }
}

/// Heat layer tuning
#[derive(Debug, Clone, PartialEq)]
pub struct HeatConfig {
    /// On-screen blob radius in pixels, constant across zoom levels
    pub radius: f64,
    /// RGBA gradient color at the blob center
    pub inner_color: [u8; 4],
    /// RGBA gradient color at the blob edge
    pub outer_color: [u8; 4],
}

impl Default for HeatConfig {
    fn default() -> Self {
        Self {
            radius: 10.0,
            inner_color: [255, 20, 147, 128],
            outer_color: [255, 20, 147, 0],
        }
    }
}

/// Aggregate configuration for a `MapView`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapConfig {
    pub camera: CameraConfig,
    pub gesture: GestureConfig,
    pub animation: AnimationConfig,
    pub clamp: ClampConfig,
    pub markers: MarkerConfig,
    pub heat: HeatConfig,
}
