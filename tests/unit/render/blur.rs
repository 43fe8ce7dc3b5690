use super::*;

fn repeat_px(px: [u8; 4], n: usize) -> Vec<u8> {
    px.iter().copied().cycle().take(n * 4).collect()
}

#[test]
fn kernel_sums_to_one_in_q16() {
    for (radius, sigma) in [(1, 0.5), (6, 2.0), (30, 10.0)] {
        let k = gaussian_kernel_q16(radius, sigma).unwrap();
        assert_eq!(k.len(), (2 * radius + 1) as usize);
        assert_eq!(k.iter().map(|&w| u64::from(w)).sum::<u64>(), 65536);
    }
}

#[test]
fn invalid_sigma_is_rejected() {
    assert!(gaussian_kernel_q16(3, 0.0).is_err());
    assert!(gaussian_kernel_q16(3, f32::NAN).is_err());
}

#[test]
fn radius_covers_three_sigma() {
    assert_eq!(radius_for_sigma(10.0), 30);
    assert_eq!(radius_for_sigma(0.0), 0);
}

#[test]
fn blur_radius_0_is_identity() {
    let src: Vec<u8> = (0..64).collect();
    let mut dst = vec![0u8; 64];
    let mut tmp = vec![0u8; 64];
    let k = gaussian_kernel_q16(0, 1.0).unwrap();
    blur_rgba8_premul_q16(&src, &mut dst, &mut tmp, 4, 4, &k);
    assert_eq!(src, dst);
}

#[test]
fn blur_constant_image_is_identity() {
    let src = repeat_px([40, 80, 120, 200], 25);
    let mut dst = vec![0u8; src.len()];
    let mut tmp = vec![0u8; src.len()];
    let k = gaussian_kernel_q16(2, 1.5).unwrap();
    blur_rgba8_premul_q16(&src, &mut dst, &mut tmp, 5, 5, &k);
    assert_eq!(src, dst);
}

#[test]
fn blur_spreads_a_single_pixel() {
    let mut src = vec![0u8; 9 * 4];
    src[4 * 4..4 * 4 + 4].copy_from_slice(&[255, 255, 255, 255]);
    let mut dst = vec![0u8; src.len()];
    let mut tmp = vec![0u8; src.len()];
    let k = gaussian_kernel_q16(1, 1.0).unwrap();
    blur_rgba8_premul_q16(&src, &mut dst, &mut tmp, 3, 3, &k);
    assert!(dst[4 * 4 + 3] < 255);
    assert!(dst[3] > 0, "corner received some alpha");
}
