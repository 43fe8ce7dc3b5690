use smallvec::smallvec;

use super::*;
use crate::assets::decode::PreparedImage;
use crate::compile::plan::{DrawOp, DrawRole, ImageKey};
use crate::foundation::core::Canvas;

fn canvas() -> Canvas {
    Canvas::new(8, 6).unwrap()
}

fn fill(role: DrawRole, rect: LayerRect, paint: Paint) -> DrawOp {
    DrawOp {
        role,
        kind: DrawKind::FillRect {
            rect,
            paint,
            shadow: None,
        },
    }
}

fn full() -> LayerRect {
    LayerRect::new(0.0, 0.0, 8.0, 6.0)
}

#[test]
fn solid_background_covers_every_pixel() {
    let plan = DrawPlan {
        canvas: canvas(),
        ops: vec![fill(
            DrawRole::Background,
            full(),
            Paint::Solid(Rgba8::rgb(10, 20, 30)),
        )],
    };
    let mut surface = RasterSurface::new(canvas());
    CpuBackend::new(CpuBackendOpts::default())
        .render_plan(&plan, None, &mut surface)
        .unwrap();
    for px in surface.data.chunks_exact(4) {
        assert_eq!(px, &[10, 20, 30, 255]);
    }
}

#[test]
fn later_ops_paint_over_earlier_ones() {
    let plan = DrawPlan {
        canvas: canvas(),
        ops: vec![
            fill(DrawRole::Background, full(), Paint::Solid(Rgba8::rgb(0, 0, 0))),
            fill(
                DrawRole::Frame,
                LayerRect::new(2.0, 2.0, 4.0, 2.0),
                Paint::Solid(Rgba8::rgb(255, 255, 255)),
            ),
        ],
    };
    let mut surface = RasterSurface::new(canvas());
    CpuBackend::new(CpuBackendOpts::default())
        .render_plan(&plan, None, &mut surface)
        .unwrap();
    assert_eq!(surface.pixel(0, 0), Some([0, 0, 0, 255]));
    assert_eq!(surface.pixel(3, 2), Some([255, 255, 255, 255]));
}

#[test]
fn artwork_is_stretched_into_destination() {
    let image = PreparedImage::from_premul_bytes(1, 1, vec![200, 0, 0, 255]).unwrap();
    let key = ImageKey(42);
    let plan = DrawPlan {
        canvas: canvas(),
        ops: vec![
            fill(DrawRole::Background, full(), Paint::Solid(Rgba8::rgb(0, 0, 0))),
            DrawOp {
                role: DrawRole::Artwork,
                kind: DrawKind::Image {
                    dest: LayerRect::new(0.0, 0.0, 8.0, 6.0),
                    image: key,
                },
            },
        ],
    };
    let mut surface = RasterSurface::new(canvas());
    CpuBackend::new(CpuBackendOpts::default())
        .render_plan(
            &plan,
            Some(ArtworkRef {
                key,
                image: &image,
            }),
            &mut surface,
        )
        .unwrap();
    assert_eq!(surface.pixel(4, 3), Some([200, 0, 0, 255]));
}

#[test]
fn missing_artwork_is_a_render_error() {
    let plan = DrawPlan {
        canvas: canvas(),
        ops: vec![DrawOp {
            role: DrawRole::Artwork,
            kind: DrawKind::Image {
                dest: full(),
                image: ImageKey(1),
            },
        }],
    };
    let mut surface = RasterSurface::new(canvas());
    let err = CpuBackend::new(CpuBackendOpts::default())
        .render_plan(&plan, None, &mut surface)
        .unwrap_err();
    assert!(matches!(err, FramesmithError::Render(_)));
}

#[test]
fn caption_without_font_is_skipped() {
    let plan = DrawPlan {
        canvas: canvas(),
        ops: vec![
            fill(DrawRole::Background, full(), Paint::Solid(Rgba8::rgb(9, 9, 9))),
            DrawOp {
                role: DrawRole::Caption,
                kind: DrawKind::Text {
                    text: "Your artwork here".to_owned(),
                    center: Point::new(4.0, 3.0),
                    size_px: 16.0,
                    color: Rgba8::rgb(0x99, 0x99, 0x99),
                },
            },
        ],
    };
    let mut surface = RasterSurface::new(canvas());
    CpuBackend::new(CpuBackendOpts::default())
        .render_plan(&plan, None, &mut surface)
        .unwrap();
    assert_eq!(surface.pixel(4, 3), Some([9, 9, 9, 255]));
}

#[test]
fn surface_size_must_match_plan() {
    let plan = DrawPlan {
        canvas: canvas(),
        ops: Vec::new(),
    };
    let mut surface = RasterSurface::new(Canvas::new(4, 4).unwrap());
    assert!(
        CpuBackend::new(CpuBackendOpts::default())
            .render_plan(&plan, None, &mut surface)
            .is_err()
    );
}

#[test]
fn linear_gradient_hits_its_stops() {
    let paint = Paint::Linear {
        start: Point::new(0.0, 0.0),
        end: Point::new(100.0, 0.0),
        stops: smallvec![
            GradientStop {
                offset: 0.0,
                color: Rgba8::rgb(255, 255, 255),
            },
            GradientStop {
                offset: 0.5,
                color: Rgba8::transparent(),
            },
            GradientStop {
                offset: 1.0,
                color: Rgba8::rgb(0, 0, 0),
            },
        ],
    };
    assert_eq!(sample_paint(&paint, Point::new(-5.0, 0.0)), [255, 255, 255, 255]);
    assert_eq!(sample_paint(&paint, Point::new(50.0, 30.0)), [0, 0, 0, 0]);
    assert_eq!(sample_paint(&paint, Point::new(150.0, 0.0)), [0, 0, 0, 255]);
    assert_eq!(sample_paint(&paint, Point::new(25.0, 0.0))[3], 128);
}

#[test]
fn radial_gradient_is_flat_inside_inner_radius() {
    let paint = Paint::Radial {
        center: Point::new(50.0, 50.0),
        inner_radius: 10.0,
        outer_radius: 110.0,
        stops: smallvec![
            GradientStop {
                offset: 0.0,
                color: Rgba8::rgb(255, 255, 255),
            },
            GradientStop {
                offset: 1.0,
                color: Rgba8::rgb(0, 0, 0),
            },
        ],
    };
    assert_eq!(sample_paint(&paint, Point::new(55.0, 50.0)), [255, 255, 255, 255]);
    assert_eq!(sample_paint(&paint, Point::new(50.0, 200.0)), [0, 0, 0, 255]);
    let mid = sample_paint(&paint, Point::new(110.0, 50.0));
    assert_eq!(mid, [128, 128, 128, 255]);
}

#[test]
fn frame_shadow_darkens_pixels_below_and_right() {
    let c = Canvas::new(64, 64).unwrap();
    let plan = DrawPlan {
        canvas: c,
        ops: vec![
            fill(
                DrawRole::Background,
                LayerRect::new(0.0, 0.0, 64.0, 64.0),
                Paint::Solid(Rgba8::rgb(255, 255, 255)),
            ),
            DrawOp {
                role: DrawRole::Frame,
                kind: DrawKind::FillRect {
                    rect: LayerRect::new(16.0, 16.0, 20.0, 20.0),
                    paint: Paint::Solid(Rgba8::rgb(255, 255, 255)),
                    shadow: Some(DropShadow {
                        color: Rgba8::rgba_f(0, 0, 0, 0.5),
                        blur_px: 4.0,
                        offset: crate::foundation::core::Vec2::new(5.0, 5.0),
                    }),
                },
            },
        ],
    };
    let mut surface = RasterSurface::new(c);
    CpuBackend::new(CpuBackendOpts::default())
        .render_plan(&plan, None, &mut surface)
        .unwrap();
    let below_right = surface.pixel(38, 38).unwrap();
    let above_left = surface.pixel(12, 12).unwrap();
    assert!(below_right[0] < 255, "shadow visible below-right");
    assert_eq!(above_left, [255, 255, 255, 255]);
}

#[test]
fn unusable_caption_font_skips_caption_on_every_render() {
    let plan = DrawPlan {
        canvas: canvas(),
        ops: vec![
            fill(DrawRole::Background, full(), Paint::Solid(Rgba8::rgb(9, 9, 9))),
            DrawOp {
                role: DrawRole::Caption,
                kind: DrawKind::Text {
                    text: "Your artwork here".to_owned(),
                    center: Point::new(4.0, 3.0),
                    size_px: 16.0,
                    color: Rgba8::rgb(0x99, 0x99, 0x99),
                },
            },
        ],
    };
    let opts = CpuBackendOpts::default()
        .with_caption_font(Some(Arc::new(b"this is not a font".to_vec())));
    let mut backend = CpuBackend::new(opts);
    for _ in 0..2 {
        let mut surface = RasterSurface::new(canvas());
        backend.render_plan(&plan, None, &mut surface).unwrap();
        assert_eq!(surface.pixel(4, 3), Some([9, 9, 9, 255]));
    }
    assert!(backend.opts.caption_font.is_none());
}

#[test]
fn huge_shadowed_gradient_rect_is_clipped_to_canvas() {
    let huge = LayerRect::new(-60_000.0, -60_000.0, 120_008.0, 120_006.0);
    let plan = DrawPlan {
        canvas: canvas(),
        ops: vec![DrawOp {
            role: DrawRole::Frame,
            kind: DrawKind::FillRect {
                rect: huge,
                paint: Paint::Linear {
                    start: Point::new(0.0, 0.0),
                    end: Point::new(8.0, 0.0),
                    stops: smallvec![
                        GradientStop {
                            offset: 0.0,
                            color: Rgba8::rgb(0, 0, 0),
                        },
                        GradientStop {
                            offset: 1.0,
                            color: Rgba8::rgb(255, 255, 255),
                        },
                    ],
                },
                shadow: Some(DropShadow {
                    color: Rgba8::rgba_f(0, 0, 0, 0.5),
                    blur_px: 1.0e9,
                    offset: crate::foundation::core::Vec2::new(5.0, 5.0),
                }),
            },
        }],
    };
    let mut surface = RasterSurface::new(canvas());
    CpuBackend::new(CpuBackendOpts::default())
        .render_plan(&plan, None, &mut surface)
        .unwrap();
    let left = surface.pixel(0, 3).unwrap();
    let right = surface.pixel(7, 3).unwrap();
    assert_eq!(left[3], 255);
    assert!(left[0] < right[0], "gradient still runs left to right");
}
