use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        StampError::config("x")
            .to_string()
            .contains("config error:")
    );
    assert!(StampError::color("x").to_string().contains("color error:"));
    assert!(StampError::font("x").to_string().contains("font error:"));
    assert!(StampError::draw("x").to_string().contains("draw error:"));
    assert!(
        StampError::buffer("x")
            .to_string()
            .contains("buffer error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = StampError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn only_primitive_errors_are_recoverable() {
    assert!(StampError::color("x").is_recoverable());
    assert!(StampError::font("x").is_recoverable());
    assert!(StampError::draw("x").is_recoverable());

    assert!(!StampError::config("x").is_recoverable());
    assert!(!StampError::buffer("x").is_recoverable());
    assert!(!StampError::Other(anyhow::anyhow!("io")).is_recoverable());
}

#[test]
fn config_errors_use_a_distinct_exit_code() {
    assert_eq!(StampError::config("x").exit_code(), 2);
    assert_eq!(StampError::buffer("x").exit_code(), 1);
    assert_eq!(StampError::Other(anyhow::anyhow!("io")).exit_code(), 1);
}
