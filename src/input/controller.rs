use crate::core::camera::Camera;
use crate::core::config::GestureConfig;
use crate::core::geo::Point;
use std::time::Instant;

/// Bookkeeping captured at drag start.
///
/// Move deltas are always measured against these values, never against the
/// previous frame, so a long drag cannot accumulate drift. The effective
/// scale is also frozen here: mid-drag zoom changes do not retroactively
/// rescale the gesture.
#[derive(Debug, Clone, Copy)]
struct DragState {
    pointer_start: Point,
    pan_start: Point,
    scale_at_start: f64,
}

/// Translates pan gesture messages into camera pan updates.
///
/// A plain Idle -> Dragging -> Idle state machine. Continuous moves are
/// throttled to roughly one update per frame; the newest unapplied position
/// is kept and flushed on drag end, so the gesture never loses its final
/// position. No inertia: panning stops exactly where the gesture ends.
#[derive(Debug)]
pub struct GestureController {
    config: GestureConfig,
    drag: Option<DragState>,
    last_applied: Option<Instant>,
    pending: Option<Point>,
}

impl GestureController {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            drag: None,
            last_applied: None,
            pending: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Enters the Dragging state, capturing the start bookkeeping.
    ///
    /// Ignored while the container is unmeasured; there is no scale to
    /// convert deltas with yet.
    pub fn on_pan_start(&mut self, position: Point, camera: &Camera) {
        if !camera.is_measured() {
            return;
        }
        self.drag = Some(DragState {
            pointer_start: position,
            pan_start: camera.pan,
            scale_at_start: camera.effective_scale(),
        });
        self.last_applied = None;
        self.pending = None;
    }

    /// Applies a move if the throttle interval has elapsed, otherwise keeps
    /// it pending. Returns true when the camera was written.
    pub fn on_pan_move(&mut self, position: Point, now: Instant, camera: &mut Camera) -> bool {
        let drag = match self.drag {
            Some(drag) => drag,
            None => return false,
        };

        if let Some(last) = self.last_applied {
            if now.duration_since(last) < self.config.throttle {
                self.pending = Some(position);
                return false;
            }
        }

        Self::apply_move(&drag, position, camera);
        self.last_applied = Some(now);
        self.pending = None;
        true
    }

    /// Leaves the Dragging state, flushing any pending move first so the
    /// final position is never dropped. Returns true when the camera was
    /// written by the flush.
    pub fn on_pan_end(&mut self, camera: &mut Camera) -> bool {
        let drag = match self.drag.take() {
            Some(drag) => drag,
            None => return false,
        };
        self.last_applied = None;

        match self.pending.take() {
            Some(position) => {
                Self::apply_move(&drag, position, camera);
                true
            }
            None => false,
        }
    }

    /// Resets all gesture state
    pub fn reset(&mut self) {
        self.drag = None;
        self.last_applied = None;
        self.pending = None;
    }

    fn apply_move(drag: &DragState, position: Point, camera: &mut Camera) {
        let delta_screen = position.subtract(&drag.pointer_start);
        camera.pan = drag
            .pan_start
            .add(&delta_screen.multiply(1.0 / drag.scale_at_start));
    }
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}
