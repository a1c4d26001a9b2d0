use std::{fmt, path::PathBuf, str::FromStr};

use crate::foundation::error::{StampError, StampResult};

/// One overlay job: the raw frame to stamp and the primitives to draw on it.
///
/// Built once per invocation by the config parser (see [`crate::read_document`] and
/// [`crate::CompactArgs`]) and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(try_from = "crate::overlay::parse::DocumentRepr")]
pub struct OverlayDocument {
    /// Raw RGB8 buffer, read before drawing and overwritten afterwards.
    pub data_filename: PathBuf,
    /// Frame width in pixels.
    pub image_width: u32,
    /// Frame height in pixels.
    pub image_height: u32,
    /// Font file shared by every text-bearing primitive.
    pub font_filename: PathBuf,
    /// Primitives in draw order; later entries paint over earlier ones.
    pub overlays: Vec<Overlay>,
}

impl OverlayDocument {
    /// Check document-level constraints. Runs before any buffer IO.
    pub fn validate(&self) -> StampResult<()> {
        if self.image_width == 0 || self.image_height == 0 {
            return Err(StampError::config(format!(
                "image dimensions must be > 0 (got {}x{})",
                self.image_width, self.image_height
            )));
        }
        if self.data_filename.as_os_str().is_empty() {
            return Err(StampError::config("data_filename must be non-empty"));
        }
        if self.font_filename.as_os_str().is_empty() {
            return Err(StampError::config("font_filename must be non-empty"));
        }
        Ok(())
    }

    /// Expected raw buffer length in bytes (`width * height * 3`).
    pub fn expected_len(&self) -> Option<usize> {
        crate::io::buffer::rgb8_len(self.image_width, self.image_height)
    }
}

/// A single drawable annotation.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Overlay {
    /// Free-standing text label.
    Text(TextOverlay),
    /// Cross-shaped marker with an optional caption underneath.
    Crosshair(CrosshairOverlay),
}

impl Overlay {
    /// Short variant name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Crosshair(_) => "crosshair",
        }
    }

    /// Human-readable identifier for diagnostics: the text content, or the position of an
    /// uncaptioned crosshair.
    pub fn label(&self) -> String {
        match self {
            Self::Text(t) => t.text.clone(),
            Self::Crosshair(c) if !c.text.is_empty() => c.text.clone(),
            Self::Crosshair(c) => format!("({}, {})", c.x, c.y),
        }
    }
}

/// Text label drawn at a point.
///
/// Numeric fields accept any JSON number; range checks happen when the primitive is drawn,
/// so a bad value only skips this primitive.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct TextOverlay {
    /// Anchor point x in pixels. May lie outside the frame.
    pub x: f64,
    /// Anchor point y in pixels. May lie outside the frame.
    pub y: f64,
    /// Text content.
    pub text: String,
    /// Font size in pixels.
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    /// Fill color string.
    #[serde(default = "default_fill")]
    pub text_fill: String,
    /// Anchor code, see [`Anchor`].
    #[serde(default = "default_anchor")]
    pub text_anchor: String,
    /// Outline color string.
    #[serde(default = "default_stroke_fill")]
    pub stroke_fill: String,
    /// Outline width in pixels; 0 disables the outline.
    #[serde(default)]
    pub stroke_width: f64,
}

impl TextOverlay {
    /// Text at `(x, y)` with every style field at its default.
    pub fn new(x: i32, y: i32, text: impl Into<String>) -> Self {
        Self {
            x: f64::from(x),
            y: f64::from(y),
            text: text.into(),
            font_size: default_font_size(),
            text_fill: default_fill(),
            text_anchor: default_anchor(),
            stroke_fill: default_stroke_fill(),
            stroke_width: 0.0,
        }
    }
}

/// Crosshair marker centered on a point.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct CrosshairOverlay {
    /// Center x in pixels.
    pub x: f64,
    /// Center y in pixels.
    pub y: f64,
    /// Arm half-length in pixels.
    pub size: f64,
    /// Line width in pixels.
    pub width: f64,
    /// Caption drawn below the marker; empty for none.
    #[serde(default)]
    pub text: String,
    /// Caption font size in pixels.
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    /// Caption outline color string.
    #[serde(default = "default_stroke_fill")]
    pub stroke_fill: String,
    /// Caption outline width in pixels; 0 disables the outline.
    #[serde(default)]
    pub stroke_width: f64,
    /// Line and caption fill color string.
    #[serde(default = "default_fill")]
    pub color: String,
}

impl CrosshairOverlay {
    /// Uncaptioned crosshair with default colors.
    pub fn new(x: i32, y: i32, size: i32, width: i32) -> Self {
        Self {
            x: f64::from(x),
            y: f64::from(y),
            size: f64::from(size),
            width: f64::from(width),
            text: String::new(),
            font_size: default_font_size(),
            stroke_fill: default_stroke_fill(),
            stroke_width: 0.0,
            color: default_fill(),
        }
    }
}

pub(crate) fn default_font_size() -> f64 {
    30.0
}

pub(crate) fn default_fill() -> String {
    "#ffffff".to_string()
}

pub(crate) fn default_stroke_fill() -> String {
    "#000000".to_string()
}

pub(crate) fn default_anchor() -> String {
    "mm".to_string()
}

/// Horizontal alignment of a text box relative to its anchor point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HAnchor {
    /// Point is on the left edge.
    Left,
    /// Point is on the horizontal center.
    Middle,
    /// Point is on the right edge.
    Right,
}

/// Vertical alignment of a text box relative to its anchor point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VAnchor {
    /// Point is on the ascender line of the first line.
    Ascender,
    /// Same line as [`VAnchor::Ascender`]; glyph ink bounds are not measured.
    Top,
    /// Point is halfway between ascender and descender.
    Middle,
    /// Point is on the baseline of the first line.
    Baseline,
    /// Same line as [`VAnchor::Descender`]; glyph ink bounds are not measured.
    Bottom,
    /// Point is on the descender line of the last line.
    Descender,
}

/// Parsed anchor code.
///
/// The compact form is two letters, horizontal then vertical: `l`/`m`/`r` followed by
/// `a`/`t`/`m`/`s`/`b`/`d` (e.g. `mm`, `lt`, `ms`). Named aliases such as `top-left`,
/// `middle` or `baseline-right` are accepted as well.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Anchor {
    /// Horizontal component.
    pub horizontal: HAnchor,
    /// Vertical component.
    pub vertical: VAnchor,
}

impl Anchor {
    /// Centered on both axes.
    pub const MIDDLE: Self = Self::new(HAnchor::Middle, VAnchor::Middle);
    /// Horizontally centered, hanging from the top. Used for crosshair captions.
    pub const MIDDLE_TOP: Self = Self::new(HAnchor::Middle, VAnchor::Top);

    /// Combine both components.
    pub const fn new(horizontal: HAnchor, vertical: VAnchor) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        let mut chars = code.chars();
        let (Some(h), Some(v), None) = (chars.next(), chars.next(), chars.next()) else {
            return None;
        };
        let horizontal = match h {
            'l' => HAnchor::Left,
            'm' => HAnchor::Middle,
            'r' => HAnchor::Right,
            _ => return None,
        };
        let vertical = match v {
            'a' => VAnchor::Ascender,
            't' => VAnchor::Top,
            'm' => VAnchor::Middle,
            's' => VAnchor::Baseline,
            'b' => VAnchor::Bottom,
            'd' => VAnchor::Descender,
            _ => return None,
        };
        Some(Self::new(horizontal, vertical))
    }

    fn from_name(name: &str) -> Option<Self> {
        let code = match name.replace('_', "-").as_str() {
            "top-left" => "lt",
            "top-middle" | "top-center" => "mt",
            "top-right" => "rt",
            "middle-left" => "lm",
            "middle" | "middle-middle" | "center" => "mm",
            "middle-right" => "rm",
            "baseline-left" => "ls",
            "baseline-middle" | "baseline-center" => "ms",
            "baseline-right" => "rs",
            "bottom-left" => "lb",
            "bottom-middle" | "bottom-center" => "mb",
            "bottom-right" => "rb",
            _ => return None,
        };
        Self::from_code(code)
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Self::MIDDLE
    }
}

impl FromStr for Anchor {
    type Err = StampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        Self::from_code(&s)
            .or_else(|| Self::from_name(&s))
            .ok_or_else(|| StampError::draw(format!("unknown text anchor \"{s}\"")))
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = match self.horizontal {
            HAnchor::Left => 'l',
            HAnchor::Middle => 'm',
            HAnchor::Right => 'r',
        };
        let v = match self.vertical {
            VAnchor::Ascender => 'a',
            VAnchor::Top => 't',
            VAnchor::Middle => 'm',
            VAnchor::Baseline => 's',
            VAnchor::Bottom => 'b',
            VAnchor::Descender => 'd',
        };
        write!(f, "{h}{v}")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/model.rs"]
mod tests;
