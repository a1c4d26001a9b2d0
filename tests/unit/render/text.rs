use super::*;
use crate::test_support::{empty_font, test_font_path};

fn block(width: f32, top: f32, baseline: f32, bottom: f32) -> TextBlock {
    TextBlock {
        text: "x".to_string(),
        font: empty_font(),
        font_size: 10.0,
        glyphs: vec![],
        width,
        top,
        baseline,
        bottom,
    }
}

#[test]
fn anchor_offset_aligns_the_named_edge() {
    let b = block(40.0, 2.0, 10.0, 14.0);

    assert_eq!(b.anchor_offset(Anchor::MIDDLE), (-20.0, -8.0));
    assert_eq!(b.anchor_offset(Anchor::MIDDLE_TOP), (-20.0, -2.0));
    assert_eq!(
        b.anchor_offset(Anchor::new(HAnchor::Left, VAnchor::Baseline)),
        (0.0, -10.0)
    );
    assert_eq!(
        b.anchor_offset(Anchor::new(HAnchor::Right, VAnchor::Descender)),
        (-40.0, -14.0)
    );

    // Top and bottom share the line box edges with ascender and descender.
    assert_eq!(
        b.anchor_offset(Anchor::new(HAnchor::Left, VAnchor::Top)),
        b.anchor_offset(Anchor::new(HAnchor::Left, VAnchor::Ascender))
    );
    assert_eq!(
        b.anchor_offset(Anchor::new(HAnchor::Left, VAnchor::Bottom)),
        b.anchor_offset(Anchor::new(HAnchor::Left, VAnchor::Descender))
    );
}

#[test]
fn missing_font_is_a_cached_font_error() {
    let mut fonts = FontBook::new("target/unit_text/missing.ttf");

    let first = fonts.shape("a", 12.0).unwrap_err();
    assert!(matches!(first, StampError::Font(_)));
    assert!(first.is_recoverable());
    assert!(first.to_string().contains("missing.ttf"), "{first}");

    let second = fonts.shape("b", 12.0).unwrap_err();
    assert_eq!(first.to_string(), second.to_string());
}

#[test]
fn garbage_font_bytes_are_rejected() {
    let dir = std::path::PathBuf::from("target").join("unit_text");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("not_a_font.ttf");
    std::fs::write(&path, b"definitely not a font").unwrap();

    let err = FontBook::new(&path).shape("a", 12.0).unwrap_err();
    assert!(matches!(err, StampError::Font(_)), "{err}");
}

#[test]
fn non_positive_size_is_rejected_before_loading() {
    let mut fonts = FontBook::new("target/unit_text/missing.ttf");
    let err = fonts.shape("a", 0.0).unwrap_err();
    assert!(err.to_string().contains("font size"), "{err}");
    assert!(fonts.shape("a", f32::NAN).is_err());
}

#[test]
fn shapes_text_with_a_real_font() {
    let Some(path) = test_font_path() else {
        eprintln!("skipping: no test font found");
        return;
    };
    let mut fonts = FontBook::new(path);
    assert!(!fonts.family_name().unwrap().is_empty());

    let small = fonts.shape("Hi", 20.0).unwrap();
    assert_eq!(small.glyphs.len(), 2);
    assert!(small.width > 0.0);
    assert!(small.top < small.baseline);
    assert!(small.baseline < small.bottom);
    assert!(small.glyphs[0].x < small.glyphs[1].x);

    let large = fonts.shape("Hi", 40.0).unwrap();
    assert!(large.width > small.width);
}
