use super::*;
use crate::catalog::CatalogSource;
use crate::catalog::material::MaterialKind;
use crate::lighting::model::LightingCondition;

#[test]
fn minimal_design_uses_defaults() {
    let d = DesignFile::from_json_str(r#"{"artwork":{"width":16,"height":20}}"#).unwrap();
    assert_eq!(d.artwork, ArtworkSpec::new(16.0, 20.0).unwrap());
    assert_eq!(d.selection, SelectionState::default());
    assert!(d.image.is_none());
    assert_eq!(d.catalog().source(MaterialKind::Frame), CatalogSource::Defaults);
}

#[test]
fn selection_and_partial_catalog_are_read() {
    let d = DesignFile::from_json_str(
        r##"{
            "artwork": {"width": 8, "height": 10},
            "selection": {"frame_index": 0, "lighting": "night", "glass_index": 1},
            "catalog": {"frames": [{"id": 9, "name": "Oak", "color": "#C8A165", "pricePerInch": 200}]}
        }"##,
    )
    .unwrap();
    assert_eq!(d.selection.lighting, LightingCondition::Night);
    assert_eq!(d.selection.glass_index, Some(1));
    let catalog = d.catalog();
    assert_eq!(catalog.source(MaterialKind::Frame), CatalogSource::Fetched);
    assert_eq!(catalog.source(MaterialKind::Mat), CatalogSource::Defaults);
    assert_eq!(catalog.get(MaterialKind::Frame, 0).name, "Oak");
}

#[test]
fn non_positive_artwork_is_rejected() {
    assert!(DesignFile::from_json_str(r#"{"artwork":{"width":0,"height":20}}"#).is_err());
}

#[test]
fn relative_image_resolves_against_base() {
    let d = DesignFile::from_json_str(
        r#"{"artwork":{"width":1,"height":1},"image":"art/photo.png"}"#,
    )
    .unwrap();
    assert_eq!(
        d.image_path(Path::new("/designs")),
        Some(PathBuf::from("/designs/art/photo.png"))
    );
}
