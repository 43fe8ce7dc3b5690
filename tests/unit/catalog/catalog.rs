use super::*;
use crate::catalog::material::Pricing;
use crate::foundation::core::Rgba8;

#[test]
fn empty_payload_falls_back_to_defaults() {
    let cat = Catalog::from_payload(CatalogPayload::default());
    assert_eq!(cat.source(MaterialKind::Frame), CatalogSource::Defaults);
    assert_eq!(cat.source(MaterialKind::Mat), CatalogSource::Defaults);
    assert_eq!(cat.source(MaterialKind::Glass), CatalogSource::Defaults);
    assert_eq!(cat.len(MaterialKind::Frame), 12);
    assert_eq!(cat.len(MaterialKind::Mat), 5);
    assert_eq!(cat.get(MaterialKind::Mat, 0).pricing, Pricing::Flat(2999));
}

#[test]
fn fetched_lists_are_used_per_kind() {
    let payload = CatalogPayload::from_json_str(
        r##"{
            "frames": [
                {"id": 7, "name": "Oak", "color": "#806040", "pricePerInch": 150, "material": "Wood"},
                {"id": 7, "name": "Oak again", "color": "#806040", "pricePerInch": 999}
            ],
            "mats": [{"id": 1, "name": "Black", "color": "rgba(0,0,0,1)", "price": 4000}]
        }"##,
    )
    .unwrap();
    let cat = Catalog::from_payload(payload);

    assert_eq!(cat.source(MaterialKind::Frame), CatalogSource::Fetched);
    assert_eq!(cat.len(MaterialKind::Frame), 1);
    let oak = cat.get(MaterialKind::Frame, 0);
    assert_eq!(oak.name, "Oak");
    assert_eq!(oak.pricing, Pricing::PerInch(150));
    assert_eq!(oak.color, Rgba8::rgb(0x80, 0x60, 0x40));
    assert_eq!(oak.border_px, 25.0);

    assert_eq!(cat.source(MaterialKind::Mat), CatalogSource::Fetched);
    assert_eq!(cat.source(MaterialKind::Glass), CatalogSource::Defaults);
}

#[test]
fn unusable_records_are_skipped() {
    let payload = CatalogPayload::from_json_str(
        r##"{"mats": [
            {"id": 1, "name": "Bad", "color": "not-a-color", "price": 100},
            {"id": 2, "name": "Negative", "color": "#ffffff", "price": -5}
        ]}"##,
    )
    .unwrap();
    let cat = Catalog::from_payload(payload);
    assert_eq!(cat.source(MaterialKind::Mat), CatalogSource::Defaults);
}

#[test]
fn out_of_range_index_clamps_to_zero() {
    let cat = Catalog::default();
    assert_eq!(cat.clamp_index(MaterialKind::Frame, 3), 3);
    assert_eq!(cat.clamp_index(MaterialKind::Frame, 99), 0);
    assert_eq!(cat.get(MaterialKind::Glass, 42).id, 1);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = CatalogPayload::from_json_str("{").unwrap_err();
    assert!(matches!(err, FramesmithError::Serde(_)));
}
