use super::*;

#[test]
fn lerp_endpoints() {
    assert_eq!(lerp_u8(10, 200, 0.0), 10);
    assert_eq!(lerp_u8(10, 200, 1.0), 200);
    assert_eq!(lerp_u8(0, 100, 0.5), 50);
}

#[test]
fn round_cents_half_up() {
    assert_eq!(round_cents(2.5), 3);
    assert_eq!(round_cents(2.49), 2);
    assert_eq!(round_cents(9000.0), 9000);
}
