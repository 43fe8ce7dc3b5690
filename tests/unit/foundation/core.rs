use super::*;

#[test]
fn canvas_validation() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert!(Canvas::new(70_000, 10).is_err());
    let c = Canvas::new(600, 400).unwrap();
    assert_eq!(c.center(), Point::new(300.0, 200.0));
}

#[test]
fn premul_rounding() {
    let p = Rgba8Premul::from_straight_rgba(255, 128, 0, 128);
    assert_eq!(p.a, 128);
    assert_eq!(p.r, 128);
    assert_eq!(p.g, 64);
    assert_eq!(p.b, 0);
}

#[test]
fn rgba_f_maps_unit_alpha() {
    assert_eq!(Rgba8::rgba_f(1, 2, 3, 0.5).a, 128);
    assert_eq!(Rgba8::rgba_f(1, 2, 3, 2.0).a, 255);
    assert_eq!(Rgba8::rgb(1, 2, 3).with_alpha_f(0.0).a, 0);
}

#[test]
fn layer_rect_expand_and_contain() {
    let r = LayerRect::new(10.0, 10.0, 100.0, 50.0);
    let outer = r.expand(5.0);
    assert_eq!(outer, LayerRect::new(5.0, 5.0, 110.0, 60.0));
    assert!(outer.strictly_contains(r));
    assert!(!r.strictly_contains(r));
}

#[test]
fn clamp_min_size_keeps_center() {
    let r = LayerRect::new(0.0, 0.0, 10.0, 10.0).inset_raw(8.0);
    assert!(r.is_degenerate());
    let c = r.clamp_min_size();
    assert_eq!(c.width, 1.0);
    assert_eq!(c.height, 1.0);
    assert_eq!(c.center(), (5.0, 5.0));
}

#[test]
fn intersect_clips_and_rejects_disjoint() {
    let canvas = LayerRect::new(0.0, 0.0, 200.0, 150.0);
    let huge = LayerRect::new(-60_000.0, -60_000.0, 120_200.0, 120_150.0);
    assert_eq!(huge.intersect(canvas), Some(canvas));

    let partial = LayerRect::new(150.0, 100.0, 100.0, 100.0);
    assert_eq!(
        partial.intersect(canvas),
        Some(LayerRect::new(150.0, 100.0, 50.0, 50.0))
    );

    let outside = LayerRect::new(300.0, 0.0, 10.0, 10.0);
    assert_eq!(outside.intersect(canvas), None);
    // Shared edge only.
    assert_eq!(LayerRect::new(200.0, 0.0, 5.0, 5.0).intersect(canvas), None);
}
