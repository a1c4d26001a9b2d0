use std::path::PathBuf;

use super::*;

fn doc(width: u32, height: u32) -> OverlayDocument {
    OverlayDocument {
        data_filename: PathBuf::from("frame.raw"),
        image_width: width,
        image_height: height,
        font_filename: PathBuf::from("font.ttf"),
        overlays: vec![],
    }
}

#[test]
fn validate_rejects_zero_dimensions_and_empty_paths() {
    doc(4, 3).validate().unwrap();
    assert!(matches!(doc(0, 3).validate(), Err(StampError::Config(_))));
    assert!(matches!(doc(4, 0).validate(), Err(StampError::Config(_))));

    let mut d = doc(4, 3);
    d.font_filename = PathBuf::new();
    assert!(matches!(d.validate(), Err(StampError::Config(_))));
}

#[test]
fn expected_len_is_three_bytes_per_pixel() {
    assert_eq!(doc(4, 3).expected_len(), Some(36));
}

#[test]
fn anchor_codes_parse_both_axes() {
    assert_eq!("mm".parse::<Anchor>().unwrap(), Anchor::MIDDLE);
    assert_eq!("mt".parse::<Anchor>().unwrap(), Anchor::MIDDLE_TOP);
    assert_eq!(
        "ls".parse::<Anchor>().unwrap(),
        Anchor::new(HAnchor::Left, VAnchor::Baseline)
    );
    assert_eq!(
        "rd".parse::<Anchor>().unwrap(),
        Anchor::new(HAnchor::Right, VAnchor::Descender)
    );
}

#[test]
fn anchor_names_are_aliases_for_codes() {
    assert_eq!("middle-middle".parse::<Anchor>().unwrap(), Anchor::MIDDLE);
    assert_eq!("Top-Left".parse::<Anchor>().unwrap().to_string(), "lt");
    assert_eq!("baseline_right".parse::<Anchor>().unwrap().to_string(), "rs");
}

#[test]
fn unknown_anchor_is_a_draw_error() {
    for bad in ["", "m", "xx", "mmm", "upside-down"] {
        let err = bad.parse::<Anchor>().unwrap_err();
        assert!(matches!(err, StampError::Draw(_)), "{bad:?}");
    }
}

#[test]
fn labels_identify_the_primitive() {
    let text = Overlay::Text(TextOverlay::new(1, 2, "N"));
    assert_eq!(text.kind(), "text");
    assert_eq!(text.label(), "N");

    let mut cross = CrosshairOverlay::new(10, 20, 5, 1);
    assert_eq!(Overlay::Crosshair(cross.clone()).label(), "(10, 20)");
    cross.text = "scope".to_string();
    assert_eq!(Overlay::Crosshair(cross).label(), "scope");
}
