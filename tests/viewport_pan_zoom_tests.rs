use approx::assert_abs_diff_eq;
use candle_viewport::core::{Point, Vector, Viewport, ZoomBounds};

fn viewport(origin: Point, zoom: f64) -> Viewport {
    Viewport::new(origin, zoom, ZoomBounds::new(0.5, 2.0).expect("bounds"), true)
        .expect("valid viewport")
}

#[test]
fn pointer_pan_without_movement_keeps_origin() {
    let mut viewport = viewport(Point::new(33.0, -12.0), 1.4);
    let pointer = Point::new(220.0, 140.0);

    viewport.begin_pointer_pan(pointer);
    viewport.update_pointer_pan(pointer);

    assert!(viewport.is_panning());
    assert_abs_diff_eq!(viewport.origin().x, 33.0, epsilon = 1e-9);
    assert_abs_diff_eq!(viewport.origin().y, -12.0, epsilon = 1e-9);
}

#[test]
fn pointer_pan_keeps_grabbed_point_under_pointer() {
    for zoom in [0.5, 1.0, 1.7, 2.0] {
        let mut viewport = viewport(Point::new(-80.0, 45.0), zoom);
        let start = Point::new(300.0, 200.0);
        let grabbed = viewport.to_data(start);

        viewport.begin_pointer_pan(start);
        for step in 1..=5 {
            let pointer = start + Vector::new(17.0 * f64::from(step), -9.0 * f64::from(step));
            viewport.update_pointer_pan(pointer);
            let under_pointer = viewport.to_pixel(grabbed);
            assert_abs_diff_eq!(under_pointer.x, pointer.x, epsilon = 1e-9);
            assert_abs_diff_eq!(under_pointer.y, pointer.y, epsilon = 1e-9);
        }
        viewport.end_pointer_pan();
        assert!(!viewport.is_panning());
    }
}

#[test]
fn pointer_pan_at_unit_zoom_moves_origin_against_pointer_delta() {
    let mut viewport = viewport(Point::ZERO, 1.0);
    viewport.begin_pointer_pan(Point::new(100.0, 100.0));
    viewport.update_pointer_pan(Point::new(150.0, 130.0));
    assert_eq!(viewport.origin(), Point::new(-50.0, -30.0));
}

#[test]
fn updates_after_pan_end_are_ignored() {
    let mut viewport = viewport(Point::ZERO, 1.0);
    viewport.begin_pointer_pan(Point::new(10.0, 10.0));
    viewport.end_pointer_pan();
    viewport.update_pointer_pan(Point::new(500.0, 500.0));
    assert_eq!(viewport.origin(), Point::ZERO);
}

#[test]
fn repeated_zoom_in_stops_at_max() {
    let mut viewport = viewport(Point::ZERO, 1.0);
    for _ in 0..50 {
        viewport.zoom_by(0.1);
        assert!(viewport.zoom() <= 2.0);
    }
    assert_eq!(viewport.zoom(), 2.0);
}

#[test]
fn repeated_zoom_out_stops_at_min() {
    let mut viewport = viewport(Point::ZERO, 1.0);
    for _ in 0..50 {
        viewport.zoom_by(-0.1);
        assert!(viewport.zoom() >= 0.5);
    }
    assert_eq!(viewport.zoom(), 0.5);
}

#[test]
fn oversized_zoom_delta_clamps_instead_of_failing() {
    let mut viewport = viewport(Point::ZERO, 1.0);
    viewport.zoom_by(1_000.0);
    assert_eq!(viewport.zoom(), 2.0);
    viewport.zoom_by(-1_000.0);
    assert_eq!(viewport.zoom(), 0.5);
    viewport.zoom_by(f64::NAN);
    assert_eq!(viewport.zoom(), 0.5);
}
