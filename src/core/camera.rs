use crate::core::bounds::Bounds;
use crate::core::config::CameraConfig;
use crate::core::geo::{MapSize, Point};
use serde::{Deserialize, Serialize};

/// Effective scales below this are treated as "container not yet measured";
/// commands that would divide by the scale fall back or no-op instead.
const MIN_EFFECTIVE_SCALE: f64 = 1e-9;

/// The camera over the map image: base scale, zoom and pan.
///
/// `base_scale` is container width / map width and is written only by resize
/// handling. `zoom` stays within the configured bounds and only ever changes
/// multiplicatively. `pan` is expressed in map-space units, which makes the
/// transform a single multiply:
///
/// `screen = (map + pan) * base_scale * zoom`
///
/// Every zoom-to-cursor and center-on computation in this module derives
/// from `to_screen` / `to_map` alone, so the round-trip identity
/// `to_map(to_screen(p)) == p` carries over to all of them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub base_scale: f64,
    pub zoom: f64,
    pub pan: Point,
}

impl Camera {
    /// Creates a camera at zoom 1 with no pan
    pub fn new(base_scale: f64) -> Self {
        Self {
            base_scale,
            zoom: 1.0,
            pan: Point::new(0.0, 0.0),
        }
    }

    /// The single multiplier converting map-space distances to screen-space
    pub fn effective_scale(&self) -> f64 {
        self.base_scale * self.zoom
    }

    /// Whether the container has been measured and transforms are usable
    pub fn is_measured(&self) -> bool {
        self.effective_scale() > MIN_EFFECTIVE_SCALE
    }

    /// Projects a map-space point to screen-space
    pub fn to_screen(&self, map_point: Point) -> Point {
        map_point.add(&self.pan).multiply(self.effective_scale())
    }

    /// Unprojects a screen-space point back to map-space.
    ///
    /// Only meaningful on a measured camera; callers on the command path
    /// check `is_measured` first.
    pub fn to_map(&self, screen_point: Point) -> Point {
        screen_point
            .multiply(1.0 / self.effective_scale())
            .subtract(&self.pan)
    }

    /// Recomputes the base scale from the measured container width
    pub fn set_base_scale(&mut self, container_width: f64, map_size: &MapSize) {
        if container_width > 0.0 && map_size.is_valid() {
            self.base_scale = container_width / map_size.width;
        }
    }

    /// Zooms in by the configured factor, keeping the container center fixed
    /// when the container has been measured
    pub fn zoom_in(&mut self, config: &CameraConfig, container: Option<Point>) {
        self.zoom_by(config.zoom_factor, config, container.map(|c| c.multiply(0.5)));
    }

    /// Zooms out by the configured factor, keeping the container center fixed
    /// when the container has been measured
    pub fn zoom_out(&mut self, config: &CameraConfig, container: Option<Point>) {
        self.zoom_by(
            1.0 / config.zoom_factor,
            config,
            container.map(|c| c.multiply(0.5)),
        );
    }

    /// Wheel-driven zoom anchored at the cursor.
    ///
    /// Scroll up (negative delta) zooms in; the applied factor is
    /// `1 ± wheel_step`.
    pub fn zoom_at_cursor(&mut self, cursor: Point, wheel_delta: f64, config: &CameraConfig) {
        if wheel_delta == 0.0 {
            return;
        }
        let step = if wheel_delta > 0.0 {
            -config.wheel_step
        } else {
            config.wheel_step
        };
        self.zoom_by(1.0 + step, config, Some(cursor));
    }

    /// Multiplies the zoom by `factor`, clamped to the configured bounds.
    ///
    /// With a focal screen point on a measured camera, the map point under
    /// the focus is captured via `to_map` before the zoom change and the pan
    /// re-solved so `to_screen` of that point lands on the same pixel after.
    fn zoom_by(&mut self, factor: f64, config: &CameraConfig, focus: Option<Point>) {
        let new_zoom = (self.zoom * factor).clamp(config.zoom_min, config.zoom_max);
        if (new_zoom - self.zoom).abs() < 1e-12 {
            return;
        }

        match focus {
            Some(focus) if self.is_measured() => {
                let anchor = self.to_map(focus);
                self.zoom = new_zoom;
                // to_screen(anchor) == focus  =>  pan = focus / scale - anchor
                self.pan = focus
                    .multiply(1.0 / self.effective_scale())
                    .subtract(&anchor);
            }
            _ => {
                // Unmeasured container: plain un-anchored zoom
                self.zoom = new_zoom;
            }
        }
    }

    /// Converts a screen-space delta to map-space and adds it to the pan
    pub fn pan_by(&mut self, delta_screen: Point) {
        if !self.is_measured() {
            return;
        }
        self.pan = self
            .pan
            .add(&delta_screen.multiply(1.0 / self.effective_scale()));
    }

    /// Returns zoom and pan to their initial values
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan = Point::new(0.0, 0.0);
    }

    /// Computes the camera that shows `map_point` at the container center at
    /// `target_zoom`. Used as the animation target of a center-on request.
    pub fn centered_on(
        &self,
        map_point: Point,
        target_zoom: f64,
        container: Point,
        config: &CameraConfig,
    ) -> Camera {
        let mut target = *self;
        target.zoom = target_zoom.clamp(config.zoom_min, config.zoom_max);
        if !target.is_measured() {
            return target;
        }
        let screen_center = container.multiply(0.5);
        // to_screen(map_point) == screen_center at the target zoom
        target.pan = screen_center
            .multiply(1.0 / target.effective_scale())
            .subtract(&map_point);
        target
    }

    /// The map-space rectangle currently visible, expanded by `buffer` on
    /// every side. Derived fresh each render pass; never cache it across
    /// camera changes.
    pub fn viewport_bounds(&self, container: Point, buffer: f64) -> Bounds {
        let corners = [
            Point::new(0.0, 0.0),
            Point::new(container.x, 0.0),
            Point::new(container.x, container.y),
            Point::new(0.0, container.y),
        ];

        let mut bounds = Bounds::empty();
        for corner in corners {
            bounds.extend(&self.to_map(corner));
        }
        bounds.expanded(buffer)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(1.0)
    }
}
