//! Prelude module for common pinmap types and traits
//!
//! Re-exports the most commonly used types for easy importing with
//! `use pinmap::prelude::*;`

pub use crate::core::{
    bounds::Bounds,
    camera::Camera,
    config::{
        AnimationConfig, CameraConfig, ClampConfig, GestureConfig, HeatConfig, MapConfig,
        MarkerConfig,
    },
    geo::{MapSize, Point},
    limits::PanLimiter,
    map::{MapView, ViewMode},
};

pub use crate::input::{
    controller::GestureController,
    events::{InputEvent, TouchPhase, TouchPoint},
};

pub use crate::animation::{
    animator::{CameraAnimator, CameraFrame},
    easing::{Easing, Lerp},
};

pub use crate::layers::{
    heat::{HeatBlob, HeatLayer},
    marker::{Cluster, MarkerHit, MarkerLayer, PinSprite},
};

pub use crate::data::dataset::{EntityMarkers, Marker, Terrain};

pub use crate::{Error as MapError, Result};

pub use std::time::{Duration, Instant};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
