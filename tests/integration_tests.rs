//! Integration tests simulating real user interactions with the viewport:
//! dragging, wheel zooming, centering on an entity and switching render
//! modes, end to end through `MapView`.

use pinmap::prelude::*;

const MAP_WIDTH: f64 = 1680.0;
const MAP_HEIGHT: f64 = 3815.0;

fn dataset() -> Vec<EntityMarkers> {
    let json = r#"[
        {
            "name": "Geodude",
            "dexNumber": 74,
            "locations": [
                { "x": 400.0, "y": 500.0, "z": 3.0 },
                { "x": 404.0, "y": 503.0, "z": 3.0 },
                { "x": 700.0, "y": 1500.0, "z": 3.0 }
            ],
            "averageLocation": { "x": 501.3, "y": 834.3, "z": 3.0 }
        },
        {
            "name": "Zubat",
            "dexNumber": 41,
            "locations": [
                { "x": 120.0, "y": 340.0, "z": 12.0 },
                { "x": 5000.0, "y": 340.0, "z": 12.0 }
            ],
            "averageLocation": { "x": 120.0, "y": 340.0, "z": 12.0 }
        }
    ]"#;

    pinmap::data::dataset::from_json(json, &MapSize::new(MAP_WIDTH, MAP_HEIGHT)).unwrap()
}

fn measured_view() -> (MapView, Instant) {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut view = MapView::new(
        MapSize::new(MAP_WIDTH, MAP_HEIGHT),
        dataset(),
        MapConfig::default(),
    );
    let t0 = Instant::now();
    view.handle_event(
        InputEvent::Resize {
            size: Point::new(800.0, 600.0),
        },
        t0,
    );
    (view, t0)
}

#[test]
fn drag_gesture_pans_and_stops_without_inertia() {
    let (mut view, t0) = measured_view();
    let scale = view.camera().effective_scale();

    view.handle_event(
        InputEvent::PanStart {
            position: Point::new(200.0, 200.0),
        },
        t0,
    );
    view.handle_event(
        InputEvent::PanMove {
            position: Point::new(260.0, 170.0),
        },
        t0 + Duration::from_millis(20),
    );
    view.handle_event(InputEvent::PanEnd, t0 + Duration::from_millis(40));

    // Screen delta (60, -30) converted at the drag-start scale
    let pan = view.camera().pan;
    assert!((pan.x - 60.0 / scale).abs() < 1e-9);
    assert!((pan.y - (-30.0) / scale).abs() < 1e-9);

    // No inertia: a later tick leaves the pan where the gesture ended
    view.tick(t0 + Duration::from_millis(60));
    assert_eq!(view.camera().pan, pan);
}

#[test]
fn throttled_drag_never_loses_the_final_position() {
    let (mut view, t0) = measured_view();
    let scale = view.camera().effective_scale();

    view.handle_event(
        InputEvent::PanStart {
            position: Point::new(0.0, 0.0),
        },
        t0,
    );

    // A burst of moves inside one frame interval; only the first applies
    // immediately, the rest coalesce
    for i in 1..=5 {
        view.handle_event(
            InputEvent::PanMove {
                position: Point::new(i as f64 * 10.0, 0.0),
            },
            t0 + Duration::from_millis(i),
        );
    }
    view.handle_event(InputEvent::PanEnd, t0 + Duration::from_millis(6));

    // The final move (50, 0) made it through the flush on drag end
    assert!((view.camera().pan.x - 50.0 / scale).abs() < 1e-9);
}

#[test]
fn wheel_zoom_keeps_the_cursor_anchored() {
    let (mut view, t0) = measured_view();

    let cursor = Point::new(640.0, 480.0);
    let anchor = view.camera().to_map(cursor);

    // Scroll up three notches, down one
    for (i, delta) in [-1.0, -1.0, -1.0, 1.0].iter().enumerate() {
        view.handle_event(
            InputEvent::WheelZoom {
                delta: *delta,
                position: cursor,
            },
            t0 + Duration::from_millis(i as u64 * 50),
        );
    }

    let projected = view.camera().to_screen(anchor);
    assert!((projected.x - cursor.x).abs() < 1e-6);
    assert!((projected.y - cursor.y).abs() < 1e-6);
    assert!(view.camera().zoom > 1.0);
}

#[test]
fn center_on_animates_to_the_exact_target_and_supersedes() {
    let (mut view, t0) = measured_view();

    view.center_on("Geodude", t0).unwrap();

    // Mid-flight the camera is between start and target
    view.tick(t0 + Duration::from_millis(250));
    assert!(view.is_animating());
    let mid_zoom = view.camera().zoom;
    assert!(mid_zoom > 1.0 && mid_zoom < 1.6);

    // A second request supersedes the first; only its target wins
    let t1 = t0 + Duration::from_millis(300);
    view.center_on("Zubat", t1).unwrap();
    view.tick(t1 + Duration::from_millis(500));

    assert!(!view.is_animating());
    assert_eq!(view.selected(), Some("Zubat"));
    assert!((view.camera().zoom - 1.6).abs() < 1e-12);

    let projected = view.camera().to_screen(Point::new(120.0, 340.0));
    assert!((projected.x - 400.0).abs() < 1e-9);
    assert!((projected.y - 300.0).abs() < 1e-9);
}

#[test]
fn resize_during_center_on_survives_the_animation() {
    let (mut view, t0) = measured_view();

    view.center_on("Geodude", t0).unwrap();
    view.tick(t0 + Duration::from_millis(100));

    // The window is resized while the flight is still in progress
    view.handle_event(
        InputEvent::Resize {
            size: Point::new(1600.0, 1200.0),
        },
        t0 + Duration::from_millis(250),
    );
    let rescaled = 1600.0 / MAP_WIDTH;

    view.tick(t0 + Duration::from_millis(300));
    assert!((view.camera().base_scale - rescaled).abs() < 1e-12);

    // The terminal snap keeps the resized scale too
    view.tick(t0 + Duration::from_millis(600));
    assert!(!view.is_animating());
    assert!((view.camera().base_scale - rescaled).abs() < 1e-12);
    assert!((view.camera().zoom - 1.6).abs() < 1e-12);
}

#[test]
fn pan_limits_only_engage_after_inactivity_and_extreme_displacement() {
    let (mut view, t0) = measured_view();

    // Fling the map absurdly far off screen with a drag
    view.handle_event(
        InputEvent::PanStart {
            position: Point::new(0.0, 0.0),
        },
        t0,
    );
    view.handle_event(
        InputEvent::PanMove {
            position: Point::new(-50_000.0, 0.0),
        },
        t0 + Duration::from_millis(20),
    );
    view.handle_event(InputEvent::PanEnd, t0 + Duration::from_millis(40));

    let flung = view.camera().pan;

    // Within the debounce window nothing is corrected
    view.tick(t0 + Duration::from_millis(80));
    assert_eq!(view.camera().pan, flung);

    // After the quiet period the emergency correction pulls the map back
    view.tick(t0 + Duration::from_millis(200));
    let corrected = view.camera().pan;
    assert!(corrected.x > flung.x);
    assert!(corrected.x.is_finite());
}

#[test]
fn moderate_pan_is_never_clamped() {
    let (mut view, t0) = measured_view();

    view.handle_event(
        InputEvent::PanStart {
            position: Point::new(0.0, 0.0),
        },
        t0,
    );
    view.handle_event(
        InputEvent::PanMove {
            position: Point::new(-300.0, -200.0),
        },
        t0 + Duration::from_millis(20),
    );
    view.handle_event(InputEvent::PanEnd, t0 + Duration::from_millis(40));

    let pan = view.camera().pan;
    view.tick(t0 + Duration::from_millis(500));
    assert_eq!(view.camera().pan, pan);
}

#[test]
fn pinpoint_mode_culls_and_clusters_the_selected_entity() {
    let (mut view, t0) = measured_view();

    view.center_on("Geodude", t0).unwrap();
    view.tick(t0 + Duration::from_millis(600));

    // Geodude has two samples 5 map units apart plus one distant one; the
    // close pair collapses into a single pin
    let pins = view.pins();
    assert_eq!(pins.len(), 2);

    let clustered = pins.iter().find(|p| p.cluster_size == 2).unwrap();
    assert_eq!(clustered.marker.x, 400.0);
    assert_eq!(clustered.terrain, Terrain::Mountain);

    // Clicking a pin surfaces rounded raw coordinates
    let hit = view.hit(clustered);
    assert_eq!(hit.to_string(), "(400, 500, 3)");
}

#[test]
fn heatmap_mode_draws_every_culled_marker() {
    let (mut view, t0) = measured_view();
    view.set_mode(ViewMode::Heatmap);

    view.center_on("Geodude", t0).unwrap();
    view.tick(t0 + Duration::from_millis(600));

    // No clustering in heat mode: all three in-bounds samples get a blob
    let blobs = view.heat_blobs();
    assert_eq!(blobs.len(), 3);
    assert!(blobs.iter().all(|b| b.radius == 10.0));
}

#[test]
fn out_of_bounds_markers_are_dropped_at_load() {
    let entities = dataset();
    let zubat = entities.iter().find(|e| e.name == "Zubat").unwrap();

    // The x=5000 sample is off the 1680-wide map
    assert_eq!(zubat.markers.len(), 1);
    assert_eq!(zubat.samples, 1);
}

#[test]
fn commands_before_the_first_resize_degrade_gracefully() {
    let mut view = MapView::new(
        MapSize::new(MAP_WIDTH, MAP_HEIGHT),
        dataset(),
        MapConfig::default(),
    );
    let t0 = Instant::now();

    view.handle_event(
        InputEvent::PanStart {
            position: Point::new(10.0, 10.0),
        },
        t0,
    );
    view.handle_event(
        InputEvent::PanMove {
            position: Point::new(500.0, 500.0),
        },
        t0 + Duration::from_millis(20),
    );
    view.handle_event(InputEvent::PanEnd, t0 + Duration::from_millis(40));
    view.zoom_in(t0 + Duration::from_millis(60));
    view.tick(t0 + Duration::from_millis(400));

    let camera = view.camera();
    assert!(camera.pan.is_finite());
    assert_eq!(camera.pan, Point::new(0.0, 0.0));
    // The un-anchored fallback still stepped the zoom
    assert!((camera.zoom - 1.2).abs() < 1e-12);
    assert!(view.pins().is_empty());
}
