use super::*;
use crate::compile::plan::{DrawOp, ImageKey};
use crate::foundation::core::Canvas;

fn plan(color: Rgba8) -> DrawPlan {
    DrawPlan {
        canvas: Canvas::default(),
        ops: vec![DrawOp {
            role: DrawRole::Background,
            kind: DrawKind::FillRect {
                rect: LayerRect::new(0.0, 0.0, 600.0, 400.0),
                paint: Paint::Solid(color),
                shadow: None,
            },
        }],
    }
}

#[test]
fn fingerprint_is_stable_and_content_sensitive() {
    let a = fingerprint_plan(&plan(Rgba8::rgb(1, 2, 3)));
    assert_eq!(a, fingerprint_plan(&plan(Rgba8::rgb(1, 2, 3))));
    assert_ne!(a, fingerprint_plan(&plan(Rgba8::rgb(1, 2, 4))));
}

#[test]
fn role_participates_in_fingerprint() {
    let mut p = plan(Rgba8::rgb(0, 0, 0));
    let a = fingerprint_plan(&p);
    p.ops[0].role = DrawRole::Ambient;
    assert_ne!(a, fingerprint_plan(&p));
}

#[test]
fn artwork_identity_participates_in_fingerprint() {
    let img = |k| DrawPlan {
        canvas: Canvas::default(),
        ops: vec![DrawOp {
            role: DrawRole::Artwork,
            kind: DrawKind::Image {
                dest: LayerRect::new(10.0, 10.0, 50.0, 50.0),
                image: ImageKey(k),
            },
        }],
    };
    assert_ne!(fingerprint_plan(&img(1)), fingerprint_plan(&img(2)));
}

#[test]
fn image_key_hashes_pixels_and_dimensions() {
    let px = [10u8; 16];
    assert_eq!(image_key(2, 2, &px), image_key(2, 2, &px));
    assert_ne!(image_key(2, 2, &px), image_key(4, 1, &px));
    assert_ne!(image_key(2, 2, &px), image_key(2, 2, &[11u8; 16]));
}
