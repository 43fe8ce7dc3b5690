use std::io::Cursor;

use super::*;
use crate::animation::clock::ManualFrameClock;
use crate::animation::scheduler::SchedulerState;
use crate::compile::plan::DrawRole;
use crate::lighting::model::LightingCondition;

fn small_opts() -> DesignerOpts {
    DesignerOpts {
        canvas: Canvas::new(200, 150).unwrap(),
        ..DesignerOpts::default()
    }
}

fn session() -> (DesignerSession, ManualFrameClock) {
    let clock = ManualFrameClock::new();
    let s = DesignerSession::new(
        ArtworkSpec::new(16.0, 20.0).unwrap(),
        Catalog::default(),
        small_opts(),
        Box::new(clock.clone()),
    )
    .unwrap();
    (s, clock)
}

fn tick(s: &mut DesignerSession, clock: &ManualFrameClock, ts: f64) -> bool {
    let token = clock.fire().expect("callback armed");
    s.on_frame(token, ts).unwrap()
}

fn png_bytes() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(4, 5, image::Rgba([200, 40, 40, 255]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

#[test]
fn default_selection_prices_frame_mat_and_mounting() {
    let (s, _) = session();
    assert_eq!(s.price(), Money(14_499));
    assert_eq!(s.breakdown().total, s.price());
}

#[test]
fn selections_are_clamped_into_catalog() {
    let (mut s, _) = session();
    s.select_frame(3);
    assert_eq!(s.selection().frame_index, 3);
    s.select_frame(99);
    assert_eq!(s.selection().frame_index, 0);
    s.select_mat(42);
    assert_eq!(s.selection().mat_index, 0);
    s.select_glass(Some(2));
    assert_eq!(s.selection().glass_index, Some(2));
    s.select_glass(None);
    assert_eq!(s.selection().glass_index, None);
}

#[test]
fn styles_animation_advances_frame_and_mat_together() {
    let (mut s, clock) = session();
    s.set_speed(100);
    s.start_animation(AnimationKind::Styles);
    assert_eq!(s.selection().animation, Some(AnimationKind::Styles));

    assert!(!tick(&mut s, &clock, 0.0));
    assert!(!tick(&mut s, &clock, 400.0));
    assert!(tick(&mut s, &clock, 501.0));
    assert_eq!(s.selection().frame_index, 1);
    assert_eq!(s.selection().mat_index, 1);
    assert!(s.raster_count() >= 1, "advance redraws");
}

#[test]
fn lighting_animation_cycles_conditions() {
    let (mut s, clock) = session();
    s.set_speed(100);
    s.toggle_animation(AnimationKind::Lighting);
    tick(&mut s, &clock, 0.0);
    tick(&mut s, &clock, 600.0);
    assert_eq!(s.selection().lighting, LightingCondition::Evening);

    s.toggle_animation(AnimationKind::Lighting);
    assert_eq!(s.selection().animation, None);
    assert_eq!(clock.pending(), None);
}

#[test]
fn switching_animation_ignores_the_old_callback() {
    let (mut s, clock) = session();
    s.start_animation(AnimationKind::Room);
    let stale = clock.pending().unwrap();
    s.start_animation(AnimationKind::Lighting);
    assert!(!s.on_frame(stale, 10_000.0).unwrap());
    assert_eq!(s.selection().animation, Some(AnimationKind::Lighting));
    assert!(clock.cancelled().contains(&stale));
}

#[test]
fn unchanged_state_is_rendered_once() {
    let (mut s, _) = session();
    s.render().unwrap();
    s.render().unwrap();
    assert_eq!(s.raster_count(), 1);

    s.select_frame(2);
    s.render().unwrap();
    assert_eq!(s.raster_count(), 2);
}

#[test]
fn artwork_slot_drives_placeholder_or_image() {
    let (mut s, _) = session();
    assert!(s.plan().find(DrawRole::Placeholder).is_some());

    s.set_artwork_pending();
    assert_eq!(s.artwork_slot(), &ArtworkSlot::Pending);
    assert!(s.plan().find(DrawRole::Placeholder).is_some());

    assert!(!s.set_artwork_bytes(b"garbage"));
    assert_eq!(s.artwork_slot(), &ArtworkSlot::Failed);
    assert!(s.plan().find(DrawRole::Placeholder).is_some());
    s.render().unwrap();

    assert!(s.set_artwork_bytes(&png_bytes()));
    let plan = s.plan();
    assert!(plan.find(DrawRole::Artwork).is_some());
    assert!(plan.find(DrawRole::Placeholder).is_none());
    s.render().unwrap();
    assert_eq!(s.raster_count(), 2);
}

#[test]
fn high_contrast_paints_black_backdrop() {
    let (mut s, _) = session();
    s.selection_mut().high_contrast = true;
    let surface = s.render().unwrap();
    assert_eq!(surface.pixel(0, 0), Some([0, 0, 0, 255]));
}

#[test]
fn glass_selection_adds_reflection() {
    let (mut s, _) = session();
    assert!(s.plan().find(DrawRole::GlassReflection).is_none());
    s.select_glass(Some(0));
    assert!(s.plan().find(DrawRole::GlassReflection).is_some());
}

#[test]
fn active_middle_mat_takes_catalog_color() {
    let (mut s, _) = session();
    s.selection_mut().use_middle_mat = true;
    s.selection_mut().middle_mat_index = Some(2);
    let plan = s.plan();
    let op = plan
        .find(DrawRole::Mat(crate::layout::geometry::LayerKind::MiddleMat))
        .expect("middle mat drawn");
    let crate::compile::plan::DrawKind::FillRect { paint, .. } = &op.kind else {
        panic!("mat is a rect fill");
    };
    assert_eq!(
        *paint,
        crate::compile::plan::Paint::Solid(crate::foundation::core::Rgba8::rgb(0xD3, 0xD3, 0xD3))
    );
}

#[test]
fn commit_returns_selected_records() {
    let (mut s, _) = session();
    s.select_frame(1);
    s.select_mat(4);
    let out = s.commit();
    assert_eq!(out.frame_style.name, "White Gallery");
    assert_eq!(out.mat_style.name, "Cream");
}

#[test]
fn reset_returns_to_defaults() {
    let (mut s, clock) = session();
    s.select_frame(5);
    s.set_artwork_bytes(&png_bytes());
    s.start_animation(AnimationKind::Room);
    s.reset();

    assert_eq!(s.selection(), &SelectionState::default());
    assert_eq!(s.artwork_slot(), &ArtworkSlot::Absent);
    assert_eq!(s.scheduler().state(), SchedulerState::Idle);
    assert_eq!(clock.pending(), None);
}

#[test]
fn teardown_is_terminal_and_drop_cancels() {
    let (mut s, clock) = session();
    s.start_animation(AnimationKind::Room);
    s.teardown();
    assert_eq!(clock.pending(), None);
    s.start_animation(AnimationKind::Lighting);
    assert_eq!(s.selection().animation, None);
    assert_eq!(s.scheduler().state(), SchedulerState::TornDown);

    let (mut s, clock) = session();
    s.start_animation(AnimationKind::Room);
    let armed = clock.pending().unwrap();
    drop(s);
    assert!(clock.cancelled().contains(&armed));
}

#[test]
fn opts_fill_missing_fields_with_defaults() {
    let opts = DesignerOpts::from_json_str(r#"{"canvas":{"width":300,"height":200}}"#).unwrap();
    assert_eq!(opts.canvas, Canvas::new(300, 200).unwrap());
    assert_eq!(opts.default_speed, DEFAULT_SPEED);
    assert_eq!(opts.pricing, PricingConfig::default());
    assert_eq!(opts.shadow, ShadowOpts::default());
}

#[test]
fn opts_reject_empty_canvas() {
    let err = DesignerOpts::from_json_str(r#"{"canvas":{"width":0,"height":200}}"#).unwrap_err();
    assert!(matches!(err, FramesmithError::Validation(_)));
}

#[test]
fn missing_caption_font_still_renders() {
    let clock = ManualFrameClock::new();
    let opts = DesignerOpts {
        caption_font: Some(PathBuf::from("/nonexistent/caption.ttf")),
        ..small_opts()
    };
    let mut s = DesignerSession::new(
        ArtworkSpec::new(10.0, 10.0).unwrap(),
        Catalog::default(),
        opts,
        Box::new(clock),
    )
    .unwrap();
    assert!(s.render().is_ok());
}

#[test]
fn restored_selection_is_clamped_and_not_animating() {
    let (mut s, _) = session();
    s.set_selection(SelectionState {
        frame_index: 500,
        glass_index: Some(77),
        animation: Some(AnimationKind::Room),
        ..SelectionState::default()
    });
    assert_eq!(s.selection().frame_index, 0);
    assert_eq!(s.selection().glass_index, Some(0));
    assert_eq!(s.selection().animation, None);
}

#[test]
fn oversized_frame_border_renders_within_canvas() {
    let payload = crate::catalog::CatalogPayload::from_json_str(
        r##"{"frames": [{"id": 1, "name": "Slab", "color": "#202020", "pricePerInch": 100, "width": 60000.0}]}"##,
    )
    .unwrap();
    let clock = ManualFrameClock::new();
    let mut s = DesignerSession::new(
        ArtworkSpec::new(16.0, 20.0).unwrap(),
        Catalog::from_payload(payload),
        small_opts(),
        Box::new(clock),
    )
    .unwrap();
    let layers = s.layers();
    assert_eq!(layers.frame(), layers.opening().expand(100.0));
    let surface = s.render().unwrap();
    assert_eq!(surface.data.len(), 200 * 150 * 4);
}

#[test]
fn unusable_caption_font_file_still_renders() {
    let path = std::env::temp_dir().join(format!(
        "framesmith-caption-{}.ttf",
        std::process::id()
    ));
    std::fs::write(&path, b"this is not a font").unwrap();
    let opts = DesignerOpts {
        caption_font: Some(path.clone()),
        ..small_opts()
    };
    let mut s = DesignerSession::new(
        ArtworkSpec::new(10.0, 10.0).unwrap(),
        Catalog::default(),
        opts,
        Box::new(ManualFrameClock::new()),
    )
    .unwrap();
    let rendered = s.render().is_ok();
    s.selection_mut().high_contrast = true;
    let rerendered = s.render().is_ok();
    let _ = std::fs::remove_file(&path);
    assert!(rendered);
    assert!(rerendered);
}
