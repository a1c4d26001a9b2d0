//! Framestamp draws text labels and crosshair markers onto raw RGB8 video frames.
//!
//! A run takes one overlay document, which names a headerless RGB8 frame on disk, its
//! dimensions, a font file and an ordered list of primitives. The frame is read once,
//! every primitive is drawn in list order and the result is written back to the same
//! path with the same size and layout.
//!
//! # Pipeline overview
//!
//! 1. **Parse**: JSON document or compact argument lists -> [`OverlayDocument`]
//! 2. **Load**: raw bytes -> [`RawFrame`], length checked against the dimensions
//! 3. **Draw**: [`render_overlays`] records each primitive on a [`CpuCanvas`]; a primitive
//!    that fails is logged and skipped
//! 4. **Composite and save**: the overlay layer is blended over the frame and the file is
//!    rewritten in place
//!
//! Configuration and buffer errors abort before the frame file is touched.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod io;
mod overlay;
mod pipeline;
mod render;

pub use foundation::color::{Rgb8, resolve_color};
pub use foundation::error::{StampError, StampResult};
pub use io::buffer::{RGB8_BYTES_PER_PIXEL, RawFrame, rgb8_len};
pub use overlay::model::{
    Anchor, CrosshairOverlay, HAnchor, Overlay, OverlayDocument, TextOverlay, VAnchor,
};
pub use overlay::parse::{
    COMPACT_DELIMITER, CompactArgs, load_document, parse_document_json, read_document,
};
pub use pipeline::{StampOptions, stamp_document, stamp_document_with, stamp_frame};
pub use render::canvas::{CpuCanvas, DrawSurface, TextPaint, over_rgb_in_place};
pub use render::renderer::{
    CAPTION_OFFSET_FACTOR, MAX_EXTENT, MAX_FONT_SIZE, OverlayFailure, OverlayReport,
    caption_position, crosshair_segments, render_overlays,
};
pub use render::text::{FontBook, PlacedGlyph, TextBlock, TextShaper};

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
mod test_support;
