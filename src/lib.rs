//! # Pinmap
//!
//! A headless viewport engine for panning, zooming and inspecting large
//! numbers of point markers over a big static map image.
//!
//! The crate owns the camera model, the gesture state machine, camera
//! animation, boundary clamping, viewport culling and proximity clustering.
//! It produces plain render primitives (pin sprites, heat blobs) and leaves
//! the actual drawing to whatever UI shell consumes it.

pub mod animation;
pub mod core;
pub mod data;
pub mod input;
pub mod layers;
pub mod prelude;

// Re-export public API
pub use crate::core::{
    bounds::Bounds,
    camera::Camera,
    config::MapConfig,
    geo::{MapSize, Point},
    map::MapView,
};

pub use crate::input::{controller::GestureController, events::InputEvent};

pub use crate::animation::{animator::CameraAnimator, easing::Easing};

pub use crate::layers::{
    heat::{HeatBlob, HeatLayer},
    marker::{MarkerHit, MarkerLayer, PinSprite},
};

pub use crate::data::dataset::{EntityMarkers, Marker, Terrain};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Unknown entity: {0}")]
    UnknownEntity(String),
}

/// Error type alias for convenience
pub type Error = MapError;
