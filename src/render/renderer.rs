use kurbo::Point;

use crate::{
    foundation::color::resolve_color,
    foundation::error::{StampError, StampResult},
    overlay::model::{Anchor, CrosshairOverlay, Overlay, TextOverlay},
    render::canvas::{DrawSurface, TextPaint},
    render::text::TextShaper,
};

/// Vertical distance from a crosshair center to its caption, in arm half-lengths.
pub const CAPTION_OFFSET_FACTOR: f64 = 1.4;

/// Largest accepted coordinate magnitude, arm length or line width, in pixels.
pub const MAX_EXTENT: f64 = 1_000_000.0;

/// Largest accepted font size, in pixels.
pub const MAX_FONT_SIZE: f64 = 10_000.0;

/// A primitive that could not be drawn.
#[derive(Debug)]
pub struct OverlayFailure {
    /// Position in the document's primitive list.
    pub index: usize,
    /// Variant name (`text`, `crosshair`).
    pub kind: &'static str,
    /// Identifying text of the primitive.
    pub label: String,
    /// What went wrong.
    pub error: StampError,
}

/// Outcome of one pass over the primitive list.
#[derive(Debug, Default)]
pub struct OverlayReport {
    /// Primitives dispatched; always the length of the list.
    pub dispatched: usize,
    /// Primitives drawn successfully.
    pub drawn: usize,
    /// Primitives skipped, in document order.
    pub failures: Vec<OverlayFailure>,
}

impl OverlayReport {
    /// True when every primitive was drawn.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Draw `overlays` onto `surface` in order.
///
/// A failure in one primitive is logged, recorded in the report and skipped; it never
/// stops later primitives or undoes earlier ones. Each primitive resolves all of its
/// parameters before the first surface call, so a skipped primitive leaves no partial
/// marks.
pub fn render_overlays<D, S>(surface: &mut D, shaper: &mut S, overlays: &[Overlay]) -> OverlayReport
where
    D: DrawSurface + ?Sized,
    S: TextShaper + ?Sized,
{
    let mut report = OverlayReport::default();

    for (index, overlay) in overlays.iter().enumerate() {
        report.dispatched += 1;
        let kind = overlay.kind();

        match draw_overlay(surface, shaper, overlay) {
            Ok(()) => {
                report.drawn += 1;
                tracing::debug!(index, kind, "drew overlay");
            }
            Err(error) => {
                let label = overlay.label();
                let detail = format!("{error:#}");
                tracing::error!(index, kind, error = %detail, "error drawing {kind} overlay: {label}");
                report.failures.push(OverlayFailure {
                    index,
                    kind,
                    label,
                    error,
                });
            }
        }
    }

    report
}

fn draw_overlay<D, S>(surface: &mut D, shaper: &mut S, overlay: &Overlay) -> StampResult<()>
where
    D: DrawSurface + ?Sized,
    S: TextShaper + ?Sized,
{
    match overlay {
        Overlay::Text(t) => draw_text_overlay(surface, shaper, t),
        Overlay::Crosshair(c) => draw_crosshair_overlay(surface, shaper, c),
    }
}

fn draw_text_overlay<D, S>(surface: &mut D, shaper: &mut S, t: &TextOverlay) -> StampResult<()>
where
    D: DrawSurface + ?Sized,
    S: TextShaper + ?Sized,
{
    let at = Point::new(coordinate("x", t.x)?, coordinate("y", t.y)?);
    let paint = TextPaint {
        fill: resolve_color(&t.text_fill)?,
        stroke_width: stroke_width(t.stroke_width)?,
        stroke_fill: resolve_color(&t.stroke_fill)?,
    };
    let anchor: Anchor = t.text_anchor.parse()?;
    let block = shaper.shape(&t.text, font_size(t.font_size)?)?;

    surface.draw_text(at, &block, anchor, paint)
}

fn draw_crosshair_overlay<D, S>(
    surface: &mut D,
    shaper: &mut S,
    c: &CrosshairOverlay,
) -> StampResult<()>
where
    D: DrawSurface + ?Sized,
    S: TextShaper + ?Sized,
{
    let color = resolve_color(&c.color)?;
    coordinate("x", c.x)?;
    coordinate("y", c.y)?;
    positive_extent("crosshair size", c.size)?;
    let width = positive_extent("crosshair line width", c.width)?;

    let caption = if c.text.is_empty() {
        None
    } else {
        let paint = TextPaint {
            fill: color,
            stroke_width: stroke_width(c.stroke_width)?,
            stroke_fill: resolve_color(&c.stroke_fill)?,
        };
        Some((shaper.shape(&c.text, font_size(c.font_size)?)?, paint))
    };

    for (from, to) in crosshair_segments(c) {
        surface.draw_line(from, to, color, width)?;
    }
    if let Some((block, paint)) = caption {
        surface.draw_text(caption_position(c), &block, Anchor::MIDDLE_TOP, paint)?;
    }
    Ok(())
}

/// Horizontal then vertical arm of a crosshair.
pub fn crosshair_segments(c: &CrosshairOverlay) -> [(Point, Point); 2] {
    let (x, y, size) = (c.x, c.y, c.size);
    [
        (Point::new(x - size, y), Point::new(x + size, y)),
        (Point::new(x, y - size), Point::new(x, y + size)),
    ]
}

/// Top-center point of a crosshair's caption, clear of the lower arm.
pub fn caption_position(c: &CrosshairOverlay) -> Point {
    Point::new(c.x, c.y + CAPTION_OFFSET_FACTOR * c.size)
}

fn coordinate(axis: &str, value: f64) -> StampResult<f64> {
    if !value.is_finite() || value.abs() > MAX_EXTENT {
        return Err(StampError::draw(format!(
            "{axis} coordinate out of range (got {value})"
        )));
    }
    Ok(value)
}

fn positive_extent(what: &str, value: f64) -> StampResult<f64> {
    if !value.is_finite() || value <= 0.0 || value > MAX_EXTENT {
        return Err(StampError::draw(format!(
            "{what} must be in (0, {MAX_EXTENT}] (got {value})"
        )));
    }
    Ok(value)
}

fn font_size(size: f64) -> StampResult<f32> {
    if !size.is_finite() || size <= 0.0 || size > MAX_FONT_SIZE {
        return Err(StampError::font(format!(
            "font size must be in (0, {MAX_FONT_SIZE}] (got {size})"
        )));
    }
    Ok(size as f32)
}

fn stroke_width(width: f64) -> StampResult<f64> {
    if !width.is_finite() || !(0.0..=MAX_EXTENT).contains(&width) {
        return Err(StampError::draw(format!(
            "stroke width must be in [0, {MAX_EXTENT}] (got {width})"
        )));
    }
    Ok(width)
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
