use std::io::Cursor;

use super::*;

fn encode_png(w: u32, h: u32, rgba: Vec<u8>) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(w, h, rgba).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let buf = encode_png(1, 1, vec![100u8, 50u8, 200u8, 128u8]);

    let prepared = decode_image(&buf).unwrap();
    assert_eq!(prepared.width, 1);
    assert_eq!(prepared.height, 1);
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn corrupt_bytes_are_asset_load_errors() {
    let err = decode_image(b"definitely not a png").unwrap_err();
    assert!(matches!(err, FramesmithError::AssetLoad(_)));
    assert!(err.is_recoverable());
}

#[test]
fn from_premul_bytes_checks_len() {
    assert!(PreparedImage::from_premul_bytes(2, 2, vec![0; 16]).is_ok());
    assert!(PreparedImage::from_premul_bytes(2, 2, vec![0; 15]).is_err());
    assert!(PreparedImage::from_premul_bytes(0, 2, vec![]).is_err());
}

#[test]
fn unpremultiply_inverts_opaque_and_half() {
    let mut px = vec![10, 20, 30, 255, 64, 32, 0, 128];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[10, 20, 30, 255]);
    assert_eq!(&px[4..], &[128, 64, 0, 128]);
}

#[test]
fn oversize_side_is_an_asset_load_error() {
    let w = MAX_IMAGE_SIDE + 1;
    let buf = encode_png(w, 1, vec![255u8; (w as usize) * 4]);
    let err = decode_image(&buf).unwrap_err();
    assert!(matches!(err, FramesmithError::AssetLoad(_)));

    let edge = encode_png(MAX_IMAGE_SIDE, 1, vec![255u8; (MAX_IMAGE_SIDE as usize) * 4]);
    assert_eq!(decode_image(&edge).unwrap().width, MAX_IMAGE_SIDE);
}
