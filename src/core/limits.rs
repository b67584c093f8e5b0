use crate::core::camera::Camera;
use crate::core::config::ClampConfig;
use crate::core::geo::{MapSize, Point};
use std::time::Instant;

/// Debounced, permissive pan limiter.
///
/// Camera writes mark the limiter dirty; after the configured inactivity
/// period the pan is checked against a generously padded range around the
/// container and only corrected once it is past an extra emergency
/// threshold. Normal interaction never feels clamped.
///
/// There is at most one pending timer: every `mark_dirty` restarts it.
#[derive(Debug)]
pub struct PanLimiter {
    config: ClampConfig,
    dirty_since: Option<Instant>,
}

impl PanLimiter {
    pub fn new(config: ClampConfig) -> Self {
        Self {
            config,
            dirty_since: None,
        }
    }

    /// Restarts the inactivity timer after a camera change
    pub fn mark_dirty(&mut self, now: Instant) {
        self.dirty_since = Some(now);
    }

    /// Whether a correction check is still pending
    pub fn is_pending(&self) -> bool {
        self.dirty_since.is_some()
    }

    /// Runs the correction once the debounce period has elapsed.
    ///
    /// Returns true if the pan was corrected.
    pub fn tick(
        &mut self,
        now: Instant,
        camera: &mut Camera,
        map_size: &MapSize,
        container: Point,
    ) -> bool {
        let since = match self.dirty_since {
            Some(since) => since,
            None => return false,
        };
        if now.duration_since(since) < self.config.debounce {
            return false;
        }
        self.dirty_since = None;
        self.apply(camera, map_size, container)
    }

    /// Applies the limits immediately, bypassing the debounce.
    ///
    /// The comparison happens in screen space: the rendered map size is
    /// `map_size * effective_scale`, the allowed pan range extends a
    /// generous padding past the container in both directions, and a
    /// correction snaps to the padded bound only when the pan is more than
    /// the emergency threshold outside it.
    pub fn apply(&self, camera: &mut Camera, map_size: &MapSize, container: Point) -> bool {
        if !camera.is_measured() {
            return false;
        }

        let scale = camera.effective_scale();
        let rendered = Point::new(map_size.width * scale, map_size.height * scale);
        let padding = rendered.x.max(rendered.y) * self.config.padding_ratio;

        let min = Point::new(-rendered.x - padding, -rendered.y - padding);
        let max = Point::new(container.x + padding, container.y + padding);

        let pan_screen = camera.pan.multiply(scale);
        let threshold = self.config.emergency_threshold;

        let corrected_x = clamp_past_threshold(pan_screen.x, min.x, max.x, threshold);
        let corrected_y = clamp_past_threshold(pan_screen.y, min.y, max.y, threshold);

        match (corrected_x, corrected_y) {
            (None, None) => false,
            (x, y) => {
                let corrected = Point::new(x.unwrap_or(pan_screen.x), y.unwrap_or(pan_screen.y));
                log::warn!(
                    "pan limit correction: {:?} -> {:?} (screen space)",
                    pan_screen,
                    corrected
                );
                camera.pan = corrected.multiply(1.0 / scale);
                true
            }
        }
    }
}

/// Snaps `value` back to `[min, max]` only when it is more than `threshold`
/// outside that range
fn clamp_past_threshold(value: f64, min: f64, max: f64, threshold: f64) -> Option<f64> {
    if value < min - threshold {
        Some(min)
    } else if value > max + threshold {
        Some(max)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_setup() -> (PanLimiter, Camera, MapSize, Point) {
        let limiter = PanLimiter::new(ClampConfig::default());
        let camera = Camera::new(0.5);
        let map_size = MapSize::new(1680.0, 3815.0);
        let container = Point::new(800.0, 600.0);
        (limiter, camera, map_size, container)
    }

    #[test]
    fn test_pan_within_range_is_untouched() {
        let (limiter, mut camera, map_size, container) = test_setup();
        camera.pan = Point::new(-300.0, -500.0);
        let before = camera.pan;

        assert!(!limiter.apply(&mut camera, &map_size, container));
        assert_eq!(camera.pan, before);
    }

    #[test]
    fn test_extreme_pan_is_snapped_to_padded_bound() {
        let (limiter, mut camera, map_size, container) = test_setup();

        // rendered = (840, 1907.5), padding = 0.8 * 1907.5 = 1526
        // min.x = -840 - 1526 = -2366 screen px; go well past it plus the
        // 50 px emergency threshold
        camera.pan = Point::new(-6000.0, 0.0);

        assert!(limiter.apply(&mut camera, &map_size, container));
        let scale = camera.effective_scale();
        assert!((camera.pan.x * scale - (-2366.0)).abs() < 1e-6);
        assert_eq!(camera.pan.y, 0.0);
    }

    #[test]
    fn test_slack_inside_emergency_threshold_is_tolerated() {
        let (limiter, mut camera, map_size, container) = test_setup();

        // Just past the padded bound but within the 50 px threshold
        let scale = camera.effective_scale();
        camera.pan = Point::new((-2366.0 - 30.0) / scale, 0.0);
        let before = camera.pan;

        assert!(!limiter.apply(&mut camera, &map_size, container));
        assert_eq!(camera.pan, before);
    }

    #[test]
    fn test_debounce_defers_and_restart_resets() {
        let (mut limiter, mut camera, map_size, container) = test_setup();
        camera.pan = Point::new(-6000.0, 0.0);

        let t0 = Instant::now();
        limiter.mark_dirty(t0);

        // Before the debounce elapses nothing happens
        assert!(!limiter.tick(t0 + Duration::from_millis(50), &mut camera, &map_size, container));
        assert!(limiter.is_pending());

        // A new change restarts the timer
        let t1 = t0 + Duration::from_millis(90);
        limiter.mark_dirty(t1);
        assert!(!limiter.tick(t1 + Duration::from_millis(50), &mut camera, &map_size, container));

        // After a full quiet period the correction fires once
        assert!(limiter.tick(t1 + Duration::from_millis(150), &mut camera, &map_size, container));
        assert!(!limiter.is_pending());
        assert!(!limiter.tick(t1 + Duration::from_millis(200), &mut camera, &map_size, container));
    }

    #[test]
    fn test_unmeasured_camera_is_ignored() {
        let limiter = PanLimiter::new(ClampConfig::default());
        let mut camera = Camera::new(0.0);
        camera.pan = Point::new(-1e9, 1e9);

        assert!(!limiter.apply(&mut camera, &MapSize::new(1680.0, 3815.0), Point::new(800.0, 600.0)));
    }
}
