use super::*;

#[test]
fn lighting_cycle_wraps_after_four() {
    let mut c = LightingCondition::Day;
    let mut seen = Vec::new();
    for _ in 0..4 {
        seen.push(c);
        c = c.next();
    }
    assert_eq!(c, LightingCondition::Day);
    assert_eq!(seen, LightingCondition::CYCLE.to_vec());
}

#[test]
fn room_cycle_wraps_after_five() {
    let mut r = RoomStyle::Modern;
    for _ in 0..5 {
        r = r.next();
    }
    assert_eq!(r, RoomStyle::Modern);
    assert_eq!(RoomStyle::Minimalist.next(), RoomStyle::Eclectic);
}

#[test]
fn intensities_are_unit_scalars() {
    for c in LightingCondition::CYCLE {
        let p = resolve(c);
        assert!((0.0..=1.0).contains(&p.intensity));
        assert_eq!(p.condition, c);
    }
    assert_eq!(resolve(LightingCondition::Spotlight).intensity, 1.0);
    assert!((resolve(LightingCondition::Night).glass_opacity() - 0.06).abs() < 1e-6);
}

#[test]
fn only_spotlight_requests_vignette() {
    assert!(resolve(LightingCondition::Spotlight).wants_vignette());
    assert!(!resolve(LightingCondition::Day).wants_vignette());
    assert!(LightingCondition::Day.casts_glare());
    assert!(!LightingCondition::Evening.casts_glare());
}

#[test]
fn room_palettes_are_opaque_walls() {
    for r in RoomStyle::CYCLE {
        assert_eq!(r.palette().wall.a, 255);
        assert!(r.palette().shadow.a < 255);
    }
}
