use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Discrete input messages consumed by the map.
///
/// Device specifics stay at the edge: the embedding UI translates its
/// pointer/touch/wheel events into these messages, and the gesture
/// controller owns all interpretation. The embedder is expected to call
/// `preventDefault` (or its framework's equivalent) for wheel events that
/// land inside the map container so the page does not scroll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Pointer pressed inside the container
    PanStart { position: Point },
    /// Pointer moved while pressed
    PanMove { position: Point },
    /// Pointer released or left the container
    PanEnd,
    /// Wheel input over the container; positive delta scrolls down
    WheelZoom { delta: f64, position: Point },
    /// Container was (re)measured
    Resize { size: Point },
    /// Raw touch input; single-touch maps onto the pan machine
    Touch {
        phase: TouchPhase,
        touches: Vec<TouchPoint>,
    },
}

/// Phases of a touch sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// Individual touch point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub id: u64,
    pub position: Point,
}
