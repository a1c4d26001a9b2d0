use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};

use crate::{
    foundation::error::{StampError, StampResult},
    overlay::model::{Anchor, HAnchor, VAnchor},
};

/// Turns a string into positioned glyphs at a given pixel size.
///
/// [`FontBook`] is the production implementation; the seam exists so the renderer can be
/// driven without a font file.
pub trait TextShaper {
    /// Shape `text` at `size_px`.
    fn shape(&mut self, text: &str, size_px: f32) -> StampResult<TextBlock>;
}

/// Glyph id plus pen position relative to the layout origin (top-left of the first line box).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedGlyph {
    /// Glyph id in the font.
    pub id: u32,
    /// Horizontal position in pixels.
    pub x: f32,
    /// Vertical position of the glyph baseline in pixels.
    pub y: f32,
}

/// Shaped text ready to be anchored and drawn.
///
/// Vertical metrics are in layout space, where `y = 0` is the top of the first line box.
#[derive(Clone)]
pub struct TextBlock {
    /// Source text, kept for diagnostics.
    pub text: String,
    /// Font the glyph ids refer to.
    pub font: vello_cpu::peniko::FontData,
    /// Size the glyphs were shaped at.
    pub font_size: f32,
    /// Glyphs in layout space.
    pub glyphs: Vec<PlacedGlyph>,
    /// Advance width of the widest line.
    pub width: f32,
    /// Ascender line of the first line.
    pub top: f32,
    /// Baseline of the first line.
    pub baseline: f32,
    /// Descender line of the last line.
    pub bottom: f32,
}

impl std::fmt::Debug for TextBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBlock")
            .field("text", &self.text)
            .field("font_size", &self.font_size)
            .field("glyphs", &self.glyphs.len())
            .field("width", &self.width)
            .field("top", &self.top)
            .field("baseline", &self.baseline)
            .field("bottom", &self.bottom)
            .finish()
    }
}

impl TextBlock {
    /// Offset from the anchor point to the layout origin.
    ///
    /// Drawing the block at `anchor_point + offset` puts the part of the text named by
    /// `anchor` on the anchor point.
    pub fn anchor_offset(&self, anchor: Anchor) -> (f64, f64) {
        let dx = match anchor.horizontal {
            HAnchor::Left => 0.0,
            HAnchor::Middle => -self.width / 2.0,
            HAnchor::Right => -self.width,
        };
        let dy = match anchor.vertical {
            VAnchor::Ascender | VAnchor::Top => -self.top,
            VAnchor::Middle => -(self.top + self.bottom) / 2.0,
            VAnchor::Baseline => -self.baseline,
            VAnchor::Bottom | VAnchor::Descender => -self.bottom,
        };
        (f64::from(dx), f64::from(dy))
    }
}

/// The single font of an invocation, shaped at whatever size each primitive asks for.
///
/// The file is read on first use. A load failure is remembered and reported for every
/// primitive that needs text, without re-reading the file.
pub struct FontBook {
    path: PathBuf,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    loaded: Option<Result<LoadedFont, String>>,
}

#[derive(Clone)]
struct LoadedFont {
    family: String,
    data: vello_cpu::peniko::FontData,
}

impl FontBook {
    /// Font book backed by the font file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            loaded: None,
        }
    }

    /// Font file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Family name registered from the font file, loading it if needed.
    pub fn family_name(&mut self) -> StampResult<String> {
        Ok(self.font()?.family)
    }

    fn font(&mut self) -> StampResult<LoadedFont> {
        if self.loaded.is_none() {
            let loaded = self.load().map_err(|e| e.to_string());
            if let Err(msg) = &loaded {
                tracing::warn!(font = %self.path.display(), "font unavailable: {msg}");
            }
            self.loaded = Some(loaded);
        }
        match &self.loaded {
            Some(Ok(font)) => Ok(font.clone()),
            Some(Err(msg)) => Err(StampError::font(msg.clone())),
            None => Err(StampError::font("font was not loaded")),
        }
    }

    fn load(&mut self) -> StampResult<LoadedFont> {
        let bytes = std::fs::read(&self.path).map_err(|e| {
            StampError::font(format!("read font '{}': {e}", self.path.display()))
        })?;

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            StampError::font(format!(
                "no font families registered from '{}'",
                self.path.display()
            ))
        })?;
        let family = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| StampError::font("registered font family has no name"))?
            .to_string();

        tracing::debug!(font = %self.path.display(), %family, "loaded font");
        Ok(LoadedFont {
            family,
            data: vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0),
        })
    }
}

impl TextShaper for FontBook {
    fn shape(&mut self, text: &str, size_px: f32) -> StampResult<TextBlock> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(StampError::font(format!(
                "font size must be finite and > 0 (got {size_px})"
            )));
        }
        let font = self.font()?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(font.family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);

        let mut glyphs = Vec::new();
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                glyphs.extend(run.positioned_glyphs().map(|g| PlacedGlyph {
                    id: u32::from(g.id),
                    x: g.x,
                    y: g.y,
                }));
            }
        }

        let (top, baseline) = layout
            .lines()
            .next()
            .map(|line| {
                let m = line.metrics();
                (m.baseline - m.ascent, m.baseline)
            })
            .unwrap_or((0.0, 0.0));
        let bottom = layout
            .lines()
            .last()
            .map(|line| {
                let m = line.metrics();
                m.baseline + m.descent
            })
            .unwrap_or(0.0);

        Ok(TextBlock {
            text: text.to_string(),
            font: font.data,
            font_size: size_px,
            glyphs,
            width: layout.width(),
            top,
            baseline,
            bottom,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
