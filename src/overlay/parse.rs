use std::{
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    foundation::error::{StampError, StampResult},
    overlay::model::{CrosshairOverlay, Overlay, OverlayDocument, TextOverlay},
};

/// Separator for the parallel lists of the compact form. Chosen to be absent from
/// ordinary label text.
pub const COMPACT_DELIMITER: char = '~';

/// Wire shape of the structured document.
///
/// `text_overlays` and `crosshair_overlays` are the legacy per-kind arrays; `overlays` holds
/// kind-tagged primitives. Draw order is texts, then crosshairs, then tagged entries.
#[derive(serde::Deserialize)]
pub(crate) struct DocumentRepr {
    data_filename: PathBuf,
    image_width: u32,
    image_height: u32,
    font_filename: PathBuf,
    #[serde(default)]
    text_overlays: Option<Vec<TextOverlay>>,
    #[serde(default)]
    crosshair_overlays: Option<Vec<CrosshairOverlay>>,
    #[serde(default)]
    overlays: Option<Vec<Overlay>>,
}

impl TryFrom<DocumentRepr> for OverlayDocument {
    type Error = String;

    fn try_from(repr: DocumentRepr) -> Result<Self, Self::Error> {
        if repr.text_overlays.is_none() && repr.overlays.is_none() {
            return Err("missing field `text_overlays`".to_string());
        }

        let texts = repr.text_overlays.unwrap_or_default();
        let crosshairs = repr.crosshair_overlays.unwrap_or_default();
        let tagged = repr.overlays.unwrap_or_default();

        let mut overlays = Vec::with_capacity(texts.len() + crosshairs.len() + tagged.len());
        overlays.extend(texts.into_iter().map(Overlay::Text));
        overlays.extend(crosshairs.into_iter().map(Overlay::Crosshair));
        overlays.extend(tagged);

        Ok(Self {
            data_filename: repr.data_filename,
            image_width: repr.image_width,
            image_height: repr.image_height,
            font_filename: repr.font_filename,
            overlays,
        })
    }
}

/// Parse a structured overlay document from any reader (typically stdin).
pub fn read_document(reader: impl Read) -> StampResult<OverlayDocument> {
    serde_json::from_reader(reader).map_err(json_error)
}

/// Parse a structured overlay document from a JSON string.
pub fn parse_document_json(json: &str) -> StampResult<OverlayDocument> {
    serde_json::from_str(json).map_err(json_error)
}

/// Open and parse a structured overlay document file.
pub fn load_document(path: &Path) -> StampResult<OverlayDocument> {
    let f = File::open(path)
        .with_context(|| format!("open overlay document '{}'", path.display()))?;
    read_document(BufReader::new(f))
}

fn json_error(e: serde_json::Error) -> StampError {
    if e.is_io() {
        StampError::Other(anyhow::Error::new(e).context("read overlay document"))
    } else {
        StampError::config(format!("parse overlay document: {e}"))
    }
}

/// Compact command-line form: one batch of text labels sharing a style.
///
/// `x`, `y` and `text` are parallel `~`-separated lists; entry `i` of each list makes up
/// the `i`-th label, anchored on its center.
#[derive(clap::Args, Clone, Debug, PartialEq)]
pub struct CompactArgs {
    /// Raw RGB8 frame, overwritten in place.
    pub filename: PathBuf,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Font file.
    pub font: PathBuf,
    /// Labels, `~`-separated.
    pub text: String,
    /// Font size in pixels.
    pub size: i32,
    /// X coordinates, `~`-separated.
    #[arg(default_value = "0", allow_hyphen_values = true)]
    pub x: String,
    /// Y coordinates, `~`-separated.
    #[arg(default_value = "0", allow_hyphen_values = true)]
    pub y: String,
    /// Text fill color.
    #[arg(long, default_value = "#ffffff")]
    pub fill: String,
    /// Text outline color.
    #[arg(long, alias = "stroke_fill", default_value = "#000000")]
    pub stroke_fill: String,
    /// Text outline width in pixels.
    #[arg(long, alias = "stroke_width", default_value_t = 0, allow_hyphen_values = true)]
    pub stroke_width: i32,
}

impl CompactArgs {
    /// Zip the parallel lists into an [`OverlayDocument`] of text primitives.
    ///
    /// The three lists must have the same length.
    pub fn into_document(self) -> StampResult<OverlayDocument> {
        let xs = parse_coords("x", &self.x)?;
        let ys = parse_coords("y", &self.y)?;
        let texts: Vec<&str> = self.text.split(COMPACT_DELIMITER).collect();

        if xs.len() != ys.len() || xs.len() != texts.len() {
            return Err(StampError::config(format!(
                "compact lists differ in length: {} x, {} y, {} text",
                xs.len(),
                ys.len(),
                texts.len()
            )));
        }

        let overlays = xs
            .into_iter()
            .zip(ys)
            .zip(texts)
            .map(|((x, y), text)| {
                Overlay::Text(TextOverlay {
                    font_size: f64::from(self.size),
                    text_fill: self.fill.clone(),
                    stroke_fill: self.stroke_fill.clone(),
                    stroke_width: f64::from(self.stroke_width),
                    ..TextOverlay::new(x, y, text)
                })
            })
            .collect();

        Ok(OverlayDocument {
            data_filename: self.filename,
            image_width: self.width,
            image_height: self.height,
            font_filename: self.font,
            overlays,
        })
    }
}

fn parse_coords(axis: &str, list: &str) -> StampResult<Vec<i32>> {
    list.split(COMPACT_DELIMITER)
        .map(|s| {
            s.trim().parse::<i32>().map_err(|e| {
                StampError::config(format!("invalid {axis} coordinate \"{s}\": {e}"))
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/parse.rs"]
mod tests;
