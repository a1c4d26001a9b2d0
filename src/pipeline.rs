use std::path::{Path, PathBuf};

use crate::{
    foundation::error::StampResult,
    io::buffer::RawFrame,
    overlay::model::{Overlay, OverlayDocument},
    render::canvas::CpuCanvas,
    render::renderer::{OverlayReport, render_overlays},
    render::text::FontBook,
};

/// Extra outputs of a stamping run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StampOptions {
    /// Also write the stamped frame as a PNG here.
    pub preview_png: Option<PathBuf>,
}

/// Stamp every overlay of `doc` onto its raw frame, rewriting the file in place.
///
/// Configuration and buffer problems are fatal and leave the frame file untouched.
/// Per-overlay failures are logged and collected in the returned report.
pub fn stamp_document(doc: &OverlayDocument) -> StampResult<OverlayReport> {
    stamp_document_with(doc, &StampOptions::default())
}

/// [`stamp_document`] with extra outputs.
#[tracing::instrument(
    skip_all,
    fields(
        frame = %doc.data_filename.display(),
        width = doc.image_width,
        height = doc.image_height,
        overlays = doc.overlays.len(),
    )
)]
pub fn stamp_document_with(
    doc: &OverlayDocument,
    opts: &StampOptions,
) -> StampResult<OverlayReport> {
    doc.validate()?;

    let mut frame = RawFrame::load(&doc.data_filename, doc.image_width, doc.image_height)?;
    let report = stamp_frame(&mut frame, &doc.overlays, &doc.font_filename)?;
    frame.save(&doc.data_filename)?;

    if let Some(path) = &opts.preview_png {
        frame.save_png(path)?;
        tracing::debug!(preview = %path.display(), "wrote preview");
    }

    tracing::info!(
        drawn = report.drawn,
        failed = report.failures.len(),
        "stamped frame"
    );
    Ok(report)
}

/// Draw `overlays` onto an in-memory frame, loading text from `font_path` as needed.
pub fn stamp_frame(
    frame: &mut RawFrame,
    overlays: &[Overlay],
    font_path: &Path,
) -> StampResult<OverlayReport> {
    if overlays.is_empty() {
        return Ok(OverlayReport::default());
    }

    let mut canvas = CpuCanvas::for_frame(frame)?;
    let mut fonts = FontBook::new(font_path);
    let report = render_overlays(&mut canvas, &mut fonts, overlays);

    if canvas.draw_count() == 0 && !report.is_clean() {
        tracing::warn!(
            failed = report.failures.len(),
            "no overlay could be drawn; frame left unchanged"
        );
    }
    canvas.composite_into(frame)?;
    Ok(report)
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
