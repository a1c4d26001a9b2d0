use kurbo::Point;

use crate::{
    foundation::color::Rgb8,
    foundation::error::{StampError, StampResult},
    io::buffer::RawFrame,
    overlay::model::Anchor,
    render::text::TextBlock,
};

/// Fill and outline of a text draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextPaint {
    /// Glyph fill.
    pub fill: Rgb8,
    /// Outline width in pixels; 0 draws no outline.
    pub stroke_width: f64,
    /// Outline color.
    pub stroke_fill: Rgb8,
}

/// Drawing operations the overlay renderer needs from a raster surface.
///
/// Coordinates are in frame pixels; anything outside the frame is clipped.
pub trait DrawSurface {
    /// Stroke a straight segment from `from` to `to`.
    fn draw_line(&mut self, from: Point, to: Point, color: Rgb8, width: f64) -> StampResult<()>;

    /// Draw shaped text so that the part named by `anchor` lands on `at`.
    fn draw_text(
        &mut self,
        at: Point,
        block: &TextBlock,
        anchor: Anchor,
        paint: TextPaint,
    ) -> StampResult<()>;
}

/// CPU canvas over a [`RawFrame`].
///
/// Draw calls are recorded into a `vello_cpu` context; [`CpuCanvas::composite_into`]
/// rasterizes them into a transparent layer and blends that layer over the frame, so
/// pixels no primitive touched keep their exact bytes.
pub struct CpuCanvas {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    draws: usize,
}

impl CpuCanvas {
    /// Canvas sized `width` x `height`.
    pub fn new(width: u32, height: u32) -> StampResult<Self> {
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| StampError::buffer(format!("canvas width {width} exceeds u16")))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| StampError::buffer(format!("canvas height {height} exceeds u16")))?;

        Ok(Self {
            width: width_u16,
            height: height_u16,
            ctx: vello_cpu::RenderContext::new(width_u16, height_u16),
            draws: 0,
        })
    }

    /// Canvas matching `frame`'s dimensions.
    pub fn for_frame(frame: &RawFrame) -> StampResult<Self> {
        Self::new(frame.width(), frame.height())
    }

    /// Number of draw calls recorded so far.
    pub fn draw_count(&self) -> usize {
        self.draws
    }

    /// Rasterize everything drawn so far and blend it over `frame`.
    pub fn composite_into(mut self, frame: &mut RawFrame) -> StampResult<()> {
        if frame.width() != u32::from(self.width) || frame.height() != u32::from(self.height) {
            return Err(StampError::buffer(format!(
                "canvas is {}x{} but frame is {}x{}",
                self.width,
                self.height,
                frame.width(),
                frame.height()
            )));
        }
        if self.draws == 0 {
            return Ok(());
        }

        self.ctx.flush();
        let mut layer = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut layer);
        over_rgb_in_place(frame.as_bytes_mut(), layer.data_as_u8_slice())
    }
}

impl DrawSurface for CpuCanvas {
    fn draw_line(&mut self, from: Point, to: Point, color: Rgb8, width: f64) -> StampResult<()> {
        if !width.is_finite() || width <= 0.0 {
            return Err(StampError::draw(format!("line width must be > 0 (got {width})")));
        }

        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(color.to_cpu());
        self.ctx.set_stroke(
            vello_cpu::kurbo::Stroke::new(width).with_caps(vello_cpu::kurbo::Cap::Butt),
        );

        let mut path = vello_cpu::kurbo::BezPath::new();
        path.move_to(pixel_center(from));
        path.line_to(pixel_center(to));
        self.ctx.stroke_path(&path);

        self.draws += 1;
        Ok(())
    }

    fn draw_text(
        &mut self,
        at: Point,
        block: &TextBlock,
        anchor: Anchor,
        paint: TextPaint,
    ) -> StampResult<()> {
        if block.glyphs.is_empty() {
            return Ok(());
        }

        let (dx, dy) = block.anchor_offset(anchor);
        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::translate((at.x + dx, at.y + dy)));

        let glyphs = || {
            block.glyphs.iter().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            })
        };

        // Outline first so the fill sits on top of its inner half.
        if paint.stroke_width > 0.0 {
            self.ctx.set_paint(paint.stroke_fill.to_cpu());
            self.ctx.set_stroke(
                vello_cpu::kurbo::Stroke::new(2.0 * paint.stroke_width)
                    .with_join(vello_cpu::kurbo::Join::Round),
            );
            self.ctx
                .glyph_run(&block.font)
                .font_size(block.font_size)
                .stroke_glyphs(glyphs());
        }

        self.ctx.set_paint(paint.fill.to_cpu());
        self.ctx
            .glyph_run(&block.font)
            .font_size(block.font_size)
            .fill_glyphs(glyphs());

        self.draws += 1;
        Ok(())
    }
}

// Integer coordinates address pixels; strokes are centered on the pixel, not its corner.
fn pixel_center(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x + 0.5, p.y + 0.5)
}

/// Source-over of a premultiplied RGBA8 layer onto opaque RGB8 pixels.
pub fn over_rgb_in_place(dst_rgb: &mut [u8], src_rgba_premul: &[u8]) -> StampResult<()> {
    if !dst_rgb.len().is_multiple_of(3)
        || !src_rgba_premul.len().is_multiple_of(4)
        || dst_rgb.len() / 3 != src_rgba_premul.len() / 4
    {
        return Err(StampError::buffer(
            "over_rgb_in_place expects rgb8 and rgba8 buffers of the same pixel count",
        ));
    }

    for (d, s) in dst_rgb
        .chunks_exact_mut(3)
        .zip(src_rgba_premul.chunks_exact(4))
    {
        let sa = s[3];
        if sa == 0 {
            continue;
        }
        let inv = 255u16 - u16::from(sa);
        for i in 0..3 {
            d[i] = s[i].saturating_add(mul_div255(u16::from(d[i]), inv));
        }
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
