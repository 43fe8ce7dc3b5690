use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FramesmithError::geometry("x")
            .to_string()
            .contains("geometry error:")
    );
    assert!(
        FramesmithError::asset_load("x")
            .to_string()
            .contains("asset load error:")
    );
    assert!(
        FramesmithError::configuration("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        FramesmithError::scheduler("x")
            .to_string()
            .contains("scheduler error:")
    );
    assert!(
        FramesmithError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        FramesmithError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FramesmithError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn recoverable_classes() {
    assert!(FramesmithError::geometry("x").is_recoverable());
    assert!(FramesmithError::asset_load("x").is_recoverable());
    assert!(FramesmithError::configuration("x").is_recoverable());
    assert!(FramesmithError::scheduler("x").is_recoverable());
    assert!(!FramesmithError::validation("x").is_recoverable());
    assert!(!FramesmithError::render("x").is_recoverable());
}

#[test]
fn serde_json_errors_convert() {
    let err = serde_json::from_str::<u32>("nope").unwrap_err();
    let err: FramesmithError = err.into();
    assert!(matches!(err, FramesmithError::Serde(_)));
}
