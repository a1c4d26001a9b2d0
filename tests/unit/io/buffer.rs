use std::path::PathBuf;

use super::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_buffer").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn rgb8_len_multiplies_three_channels() {
    assert_eq!(rgb8_len(4, 3), Some(36));
    assert_eq!(rgb8_len(0, 3), Some(0));
}

#[test]
fn from_bytes_rejects_length_mismatch() {
    let err = RawFrame::from_bytes(vec![0; 35], 4, 3).unwrap_err();
    assert!(matches!(err, StampError::Buffer(_)));
    assert!(err.to_string().contains("35 bytes, expected 36"), "{err}");

    assert!(RawFrame::from_bytes(vec![0; 37], 4, 3).is_err());
}

#[test]
fn pixels_are_row_major_rgb() {
    let mut bytes = vec![0u8; 2 * 2 * 3];
    // (1, 1) is the fourth pixel.
    bytes[9..12].copy_from_slice(&[10, 20, 30]);
    let frame = RawFrame::from_bytes(bytes, 2, 2).unwrap();
    assert_eq!(frame.pixel(1, 1), [10, 20, 30]);
    assert_eq!(frame.pixel(0, 1), [0, 0, 0]);
}

#[test]
fn load_and_save_round_trip_bytes() {
    let dir = scratch_dir("round_trip");
    let path = dir.join("frame.raw");
    let bytes: Vec<u8> = (0..(5 * 4 * 3)).map(|i| i as u8).collect();
    std::fs::write(&path, &bytes).unwrap();

    let mut frame = RawFrame::load(&path, 5, 4).unwrap();
    assert_eq!(frame.as_bytes(), bytes.as_slice());

    frame.as_bytes_mut()[0] = 255;
    frame.save(&path).unwrap();

    let written = std::fs::read(&path).unwrap();
    assert_eq!(written.len(), bytes.len());
    assert_eq!(written[0], 255);
    assert_eq!(&written[1..], &bytes[1..]);
}

#[test]
fn load_missing_file_is_an_io_error() {
    let err = RawFrame::load(Path::new("target/unit_buffer/missing.raw"), 1, 1).unwrap_err();
    assert!(matches!(err, StampError::Other(_)));
    assert!(err.to_string().contains("read raw frame"));
}

#[test]
fn save_png_writes_a_decodable_preview() {
    let dir = scratch_dir("preview").join("nested");
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("out.png");

    let frame = RawFrame::from_bytes(vec![200; 3 * 2 * 3], 3, 2).unwrap();
    frame.save_png(&path).unwrap();

    let decoded = image::open(&path).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (3, 2));
    assert_eq!(decoded.get_pixel(2, 1).0, [200, 200, 200]);
}
