use crate::animation::easing::{Easing, Lerp};
use crate::core::camera::Camera;
use crate::core::config::AnimationConfig;
use crate::core::geo::Point;
use std::time::Instant;

/// A single in-flight camera transition
#[derive(Debug, Clone, Copy)]
struct Flight {
    from: Camera,
    to: Camera,
    started: Instant,
}

/// Interpolated zoom and pan for one frame.
///
/// `base_scale` is deliberately absent: it is owned by resize handling and
/// must never be animated, so a resize landing mid-flight takes effect
/// immediately and survives the transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    pub zoom: f64,
    pub pan: Point,
}

/// Drives smooth, time-based camera transitions, independent of gesture
/// input.
///
/// At most one transition is in flight: starting a new one cancels the
/// previous, which gives single-writer-at-a-time semantics together with the
/// cancellation the map facade performs when a gesture begins. When the
/// normalized time reaches 1 the camera snaps to the exact target values,
/// not the interpolated approximation.
#[derive(Debug, Default)]
pub struct CameraAnimator {
    easing: Easing,
    flight: Option<Flight>,
}

impl CameraAnimator {
    pub fn new(easing: Easing) -> Self {
        Self {
            easing,
            flight: None,
        }
    }

    /// Starts a transition from `from` to `to`, canceling any in-flight one
    pub fn start(&mut self, from: Camera, to: Camera, now: Instant) {
        if self.flight.is_some() {
            log::debug!("camera animation superseded before completion");
        }
        self.flight = Some(Flight {
            from,
            to,
            started: now,
        });
    }

    /// Cancels the in-flight transition, if any
    pub fn cancel(&mut self) {
        if self.flight.take().is_some() {
            log::debug!("camera animation canceled");
        }
    }

    pub fn is_active(&self) -> bool {
        self.flight.is_some()
    }

    /// Advances the transition and returns the zoom/pan frame to apply.
    ///
    /// Returns `None` when idle. Pan x/y and zoom are each interpolated
    /// linearly in eased-time space.
    pub fn tick(&mut self, now: Instant, config: &AnimationConfig) -> Option<CameraFrame> {
        let flight = self.flight?;

        let elapsed = now.duration_since(flight.started);
        if elapsed >= config.duration {
            self.flight = None;
            return Some(CameraFrame {
                zoom: flight.to.zoom,
                pan: flight.to.pan,
            });
        }

        let t = elapsed.as_secs_f64() / config.duration.as_secs_f64();
        let eased = self.easing.apply(t);

        Some(CameraFrame {
            zoom: flight.from.zoom.lerp(&flight.to.zoom, eased),
            pan: flight.from.pan.lerp(&flight.to.pan, eased),
        })
    }
}
