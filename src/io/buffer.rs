use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{StampError, StampResult};

/// Bytes per pixel of the raw frame layout (8-bit RGB).
pub const RGB8_BYTES_PER_PIXEL: usize = 3;

/// Byte length of a `width` x `height` RGB8 frame, `None` on overflow.
pub fn rgb8_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(RGB8_BYTES_PER_PIXEL)
}

/// Headerless, row-major RGB8 frame held in memory for the duration of one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawFrame {
    image: image::RgbImage,
}

impl RawFrame {
    /// Wrap raw bytes, checking their length against the declared dimensions.
    pub fn from_bytes(bytes: Vec<u8>, width: u32, height: u32) -> StampResult<Self> {
        let expected = rgb8_len(width, height).ok_or_else(|| {
            StampError::buffer(format!("frame {width}x{height} is too large to address"))
        })?;
        if bytes.len() != expected {
            return Err(StampError::buffer(format!(
                "raw frame is {} bytes, expected {expected} for {width}x{height} RGB8",
                bytes.len()
            )));
        }

        let image = image::RgbImage::from_raw(width, height, bytes)
            .ok_or_else(|| StampError::buffer("raw frame rejected by image buffer"))?;
        Ok(Self { image })
    }

    /// Read the whole frame from `path`.
    pub fn load(path: &Path, width: u32, height: u32) -> StampResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read raw frame '{}'", path.display()))?;
        Self::from_bytes(bytes, width, height)
    }

    /// Overwrite `path` with the frame bytes.
    pub fn save(&self, path: &Path) -> StampResult<()> {
        std::fs::write(path, self.as_bytes())
            .with_context(|| format!("write raw frame '{}'", path.display()))?;
        Ok(())
    }

    /// Encode the frame as a PNG preview, creating parent directories as needed.
    pub fn save_png(&self, path: &Path) -> StampResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create preview dir '{}'", parent.display()))?;
        }
        self.image
            .save_with_format(path, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }

    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// RGB triple at `(x, y)`. Panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.image.get_pixel(x, y).0
    }

    /// Raw bytes in buffer order.
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Mutable raw bytes in buffer order.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.image
    }

    /// Give back the raw bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.image.into_raw()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/io/buffer.rs"]
mod tests;
