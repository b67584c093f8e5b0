//! The map facade: owns the camera and every component that writes it
//!
//! `MapView` routes input messages to the gesture controller, drives the
//! animator and the debounced pan limiter from a frame tick, and derives the
//! render primitives for the current mode. It also enforces the
//! single-writer policy on the camera: a starting gesture or a new center-on
//! request cancels the in-flight animation, so two writers never interleave
//! within one tick.

use crate::animation::animator::CameraAnimator;
use crate::core::camera::Camera;
use crate::core::config::MapConfig;
use crate::core::geo::{MapSize, Point};
use crate::core::limits::PanLimiter;
use crate::data::dataset::EntityMarkers;
use crate::input::controller::GestureController;
use crate::input::events::{InputEvent, TouchPhase};
use crate::layers::heat::{HeatBlob, HeatLayer};
use crate::layers::marker::{MarkerHit, MarkerLayer, PinSprite};
use crate::{MapError, Result};
use std::time::Instant;

/// Rendering mode over the marker dataset; selects which render primitives
/// the view produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Pinpoint,
    Heatmap,
}

pub struct MapView {
    config: MapConfig,
    map_size: MapSize,
    container: Point,
    camera: Camera,
    controller: GestureController,
    animator: CameraAnimator,
    limiter: PanLimiter,
    markers: MarkerLayer,
    heat: HeatLayer,
    mode: ViewMode,
    selected: Option<String>,
}

impl MapView {
    /// Creates a view over a map image and its marker dataset.
    ///
    /// The camera starts unmeasured (base scale 0); commands that need the
    /// container degrade gracefully until the first `Resize` arrives.
    pub fn new(map_size: MapSize, entities: Vec<EntityMarkers>, config: MapConfig) -> Self {
        Self {
            camera: Camera::new(0.0),
            container: Point::new(0.0, 0.0),
            controller: GestureController::new(config.gesture.clone()),
            animator: CameraAnimator::default(),
            limiter: PanLimiter::new(config.clamp.clone()),
            markers: MarkerLayer::new(entities, config.markers.clone()),
            heat: HeatLayer::new(config.heat.clone()),
            mode: ViewMode::default(),
            selected: None,
            map_size,
            config,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn map_size(&self) -> &MapSize {
        &self.map_size
    }

    pub fn container(&self) -> Point {
        self.container
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Zoom level as a UI-ready percentage
    pub fn zoom_percent(&self) -> f64 {
        self.camera.zoom * 100.0
    }

    /// Routes one input message.
    ///
    /// Gesture starts cancel the animator before touching the camera; wheel
    /// zoom is handled outside the drag state machine.
    pub fn handle_event(&mut self, event: InputEvent, now: Instant) {
        match event {
            InputEvent::PanStart { position } => {
                self.animator.cancel();
                self.controller.on_pan_start(position, &self.camera);
            }
            InputEvent::PanMove { position } => {
                if self.controller.on_pan_move(position, now, &mut self.camera) {
                    self.limiter.mark_dirty(now);
                }
            }
            InputEvent::PanEnd => {
                self.controller.on_pan_end(&mut self.camera);
                self.limiter.mark_dirty(now);
            }
            InputEvent::WheelZoom { delta, position } => {
                self.animator.cancel();
                self.camera
                    .zoom_at_cursor(position, delta, &self.config.camera);
                self.limiter.mark_dirty(now);
            }
            InputEvent::Resize { size } => {
                self.container = size;
                self.camera.set_base_scale(size.x, &self.map_size);
                self.limiter.mark_dirty(now);
            }
            InputEvent::Touch { phase, touches } => {
                // Single touch behaves exactly like a mouse drag;
                // multi-touch pinch is not supported
                match (phase, touches.as_slice()) {
                    (TouchPhase::Start, [touch]) => {
                        self.handle_event(
                            InputEvent::PanStart {
                                position: touch.position,
                            },
                            now,
                        );
                    }
                    (TouchPhase::Move, [touch]) => {
                        self.handle_event(
                            InputEvent::PanMove {
                                position: touch.position,
                            },
                            now,
                        );
                    }
                    (TouchPhase::End | TouchPhase::Cancel, _) => {
                        self.handle_event(InputEvent::PanEnd, now);
                    }
                    _ => {}
                }
            }
        }
    }

    /// Zooms in one step around the container center
    pub fn zoom_in(&mut self, now: Instant) {
        self.animator.cancel();
        self.camera
            .zoom_in(&self.config.camera, self.measured_container());
        self.limiter.mark_dirty(now);
    }

    /// Zooms out one step around the container center
    pub fn zoom_out(&mut self, now: Instant) {
        self.animator.cancel();
        self.camera
            .zoom_out(&self.config.camera, self.measured_container());
        self.limiter.mark_dirty(now);
    }

    /// Returns the camera to zoom 1 with no pan, abandoning any in-progress
    /// drag, and clears the selection
    pub fn reset(&mut self, now: Instant) {
        self.animator.cancel();
        self.controller.reset();
        self.camera.reset();
        self.selected = None;
        self.limiter.mark_dirty(now);
    }

    /// Selects an entity and starts a smooth transition that centers its
    /// average location at the configured zoom. A second request mid-flight
    /// supersedes the first.
    pub fn center_on(&mut self, name: &str, now: Instant) -> Result<()> {
        let entity = self
            .markers
            .entity(name)
            .ok_or_else(|| MapError::UnknownEntity(name.to_string()))?;
        let anchor = match entity.average {
            Some(average) => average.position(),
            None => return Err(MapError::InvalidCoordinates(format!(
                "entity '{}' has no average location",
                name
            ))),
        };

        let target = self.camera.centered_on(
            anchor,
            self.config.animation.center_zoom,
            self.container,
            &self.config.camera,
        );
        self.animator.start(self.camera, target, now);
        self.selected = Some(name.to_string());
        Ok(())
    }

    /// Advances time-driven work: the animator writes the camera for this
    /// frame, and the limiter applies its correction once input has been
    /// quiet long enough
    pub fn tick(&mut self, now: Instant) {
        if let Some(frame) = self.animator.tick(now, &self.config.animation) {
            // Only zoom and pan are animated; base_scale belongs to resize
            // handling and a mid-flight resize must stick
            self.camera.zoom = frame.zoom;
            self.camera.pan = frame.pan;
            self.limiter.mark_dirty(now);
        }
        self.limiter
            .tick(now, &mut self.camera, &self.map_size, self.container);
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_active()
    }

    pub fn is_dragging(&self) -> bool {
        self.controller.is_dragging()
    }

    /// Pin sprites for the selected entity under the current camera.
    ///
    /// Empty unless the view is in pinpoint mode.
    pub fn pins(&self) -> Vec<PinSprite> {
        if self.mode != ViewMode::Pinpoint {
            return Vec::new();
        }
        match &self.selected {
            Some(name) => self.markers.sprites(name, &self.camera, self.container),
            None => Vec::new(),
        }
    }

    /// Heat blobs for the selected entity under the current camera.
    ///
    /// Empty unless the view is in heatmap mode.
    pub fn heat_blobs(&self) -> Vec<HeatBlob> {
        if self.mode != ViewMode::Heatmap {
            return Vec::new();
        }
        let entity = match self.selected.as_deref().and_then(|n| self.markers.entity(n)) {
            Some(entity) => entity,
            None => return Vec::new(),
        };
        let culled = self
            .markers
            .cull(&entity.markers, &self.camera, self.container);
        self.heat.blobs(&culled, &self.camera)
    }

    /// Click payload for a pin
    pub fn hit(&self, sprite: &PinSprite) -> MarkerHit {
        MarkerLayer::hit(sprite)
    }

    pub fn marker_layer(&self) -> &MarkerLayer {
        &self.markers
    }

    fn measured_container(&self) -> Option<Point> {
        if self.container.x > 0.0 && self.container.y > 0.0 {
            Some(self.container)
        } else {
            None
        }
    }
}
