use std::sync::atomic::{AtomicU32, Ordering};

use crate::error::Error;

/// Fixed-size pixel buffer shared between the video observer and the
/// render loop.
///
/// Pixels are stored as `0x00RRGGBB`, row-major with a top-left origin.
/// Each pixel is an independent relaxed atomic: a reader may observe a
/// frame that is partially updated, which is acceptable for display.
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Box<[AtomicU32]>,
}

impl Framebuffer {
    /// Create a black framebuffer. Both dimensions must be non-zero.
    pub fn new(width: u32, height: u32) -> Result<Self, Error> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidFramebuffer { width, height });
        }
        let len = width as usize * height as usize;
        let pixels = (0..len).map(|_| AtomicU32::new(0)).collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Read one pixel. Out-of-range coordinates read as black.
    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        self.index(x, y)
            .map_or(0, |i| self.pixels[i].load(Ordering::Relaxed))
    }

    /// Write one pixel. Out-of-range coordinates are ignored.
    pub fn set_pixel(&self, x: u32, y: u32, rgb: u32) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i].store(rgb & 0x00FF_FFFF, Ordering::Relaxed);
        }
    }

    /// Overwrite the start of row `y` with `rgb`, truncated to the row width.
    pub fn write_row(&self, y: u32, rgb: &[u32]) {
        if y >= self.height {
            return;
        }
        let start = y as usize * self.width as usize;
        let row = &self.pixels[start..start + self.width as usize];
        for (dst, &src) in row.iter().zip(rgb) {
            dst.store(src & 0x00FF_FFFF, Ordering::Relaxed);
        }
    }

    /// Copy the whole image into an RGB24 buffer (3 bytes per pixel).
    ///
    /// The buffer must be at least `width * height * 3` bytes.
    pub fn copy_rgb24(&self, buffer: &mut [u8]) {
        for (px, out) in self.pixels.iter().zip(buffer.chunks_exact_mut(3)) {
            let rgb = px.load(Ordering::Relaxed);
            out[0] = (rgb >> 16) as u8;
            out[1] = (rgb >> 8) as u8;
            out[2] = rgb as u8;
        }
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_dimensions() {
        assert_eq!(
            Framebuffer::new(0, 768).err(),
            Some(Error::InvalidFramebuffer {
                width: 0,
                height: 768
            })
        );
        assert!(Framebuffer::new(1024, 0).is_err());
    }

    #[test]
    fn set_and_read_pixel() {
        let fb = Framebuffer::new(4, 3).unwrap();
        fb.set_pixel(3, 2, 0x123456);
        assert_eq!(fb.pixel(3, 2), 0x123456);
        assert_eq!(fb.pixel(0, 0), 0);
    }

    #[test]
    fn out_of_range_writes_are_ignored() {
        let fb = Framebuffer::new(4, 3).unwrap();
        fb.set_pixel(4, 0, 0xFFFFFF);
        fb.set_pixel(0, 3, 0xFFFFFF);
        assert_eq!(fb.pixel(4, 0), 0);
        let mut rgb = vec![0u8; 4 * 3 * 3];
        fb.copy_rgb24(&mut rgb);
        assert!(rgb.iter().all(|&b| b == 0));
    }

    #[test]
    fn write_row_truncates_to_width() {
        let fb = Framebuffer::new(2, 2).unwrap();
        fb.write_row(1, &[0xAA, 0xBB, 0xCC]);
        assert_eq!(fb.pixel(0, 1), 0xAA);
        assert_eq!(fb.pixel(1, 1), 0xBB);
        assert_eq!(fb.pixel(0, 0), 0);
    }

    #[test]
    fn copy_rgb24_splits_channels() {
        let fb = Framebuffer::new(2, 1).unwrap();
        fb.set_pixel(1, 0, 0xFF8001);
        let mut rgb = [0u8; 6];
        fb.copy_rgb24(&mut rgb);
        assert_eq!(rgb, [0, 0, 0, 0xFF, 0x80, 0x01]);
    }
}
