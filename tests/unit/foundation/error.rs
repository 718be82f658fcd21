use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        AvgColorError::configuration("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        AvgColorError::scheduler("x")
            .to_string()
            .contains("scheduler invariant violation:")
    );
    assert!(
        AvgColorError::host("x")
            .to_string()
            .contains("host mutation failure:")
    );
    assert!(
        AvgColorError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = AvgColorError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let err: AvgColorError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, AvgColorError::Serde(_)));
    assert!(!err.is_configuration());
}
