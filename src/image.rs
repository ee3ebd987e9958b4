//! Packed RGBA pixel buffers and PNG decoding/encoding.
//!
//! Pure Rust PNG support using the `png` crate. Every decoded image is
//! normalized to 8-bit RGBA so the extractor only ever sees one layout.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::debug;

use crate::color::Rgba;
use crate::error::{Error, Result};

/// Bytes per RGBA pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// Row-major RGBA image, 4 bytes per pixel, no row padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap packed RGBA bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero or `pixels` is not exactly
    /// `width * height * 4` bytes.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = Self::byte_len(width, height)?;
        if pixels.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a buffer filled with one color.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero.
    pub fn filled(width: u32, height: u32, color: Rgba) -> Result<Self> {
        let len = Self::byte_len(width, height)?;
        let pixels = color.to_array().iter().copied().cycle().take(len).collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    fn byte_len(width: u32, height: u32) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(width as usize * height as usize * BYTES_PER_PIXEL)
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels.
    #[must_use]
    pub const fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Raw packed RGBA bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the buffer, returning the packed RGBA bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.pixels
    }

    /// Pixel at `(x, y)`, or `None` outside the buffer.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let offset = self.offset(x, y)?;
        let px = &self.pixels[offset..offset + BYTES_PER_PIXEL];
        Some(Rgba::new(px[0], px[1], px[2], px[3]))
    }

    /// Set the pixel at `(x, y)`. Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if let Some(offset) = self.offset(x, y) {
            self.pixels[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&color.to_array());
        }
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL)
    }

    // ------------------------------------------------------------------------
    // PNG
    // ------------------------------------------------------------------------

    /// Decode a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or decoded.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let buffer = Self::decode_png(BufReader::new(file))?;
        debug!(
            path = %path.display(),
            width = buffer.width,
            height = buffer.height,
            "decoded PNG file"
        );
        Ok(buffer)
    }

    /// Decode PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a decodable PNG.
    pub fn from_png_bytes(bytes: &[u8]) -> Result<Self> {
        Self::decode_png(bytes)
    }

    fn decode_png<R: Read>(source: R) -> Result<Self> {
        let mut decoder = png::Decoder::new(source);
        // Palette -> RGB, low bit depths -> 8, tRNS -> alpha, 16-bit -> 8
        decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);

        let mut reader = decoder.read_info()?;
        let mut raw = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut raw)?;
        raw.truncate(info.buffer_size());

        if info.bit_depth != png::BitDepth::Eight {
            return Err(Error::UnsupportedImage(format!(
                "bit depth {:?} after normalization",
                info.bit_depth
            )));
        }

        // Rows are tightly packed at 8 bits per sample
        let pixels = match info.color_type {
            png::ColorType::Rgba => raw,
            png::ColorType::Rgb => raw
                .chunks_exact(3)
                .flat_map(|px| [px[0], px[1], px[2], 255])
                .collect(),
            png::ColorType::Grayscale => raw.iter().flat_map(|&v| [v, v, v, 255]).collect(),
            png::ColorType::GrayscaleAlpha => raw
                .chunks_exact(2)
                .flat_map(|px| [px[0], px[0], px[0], px[1]])
                .collect(),
            png::ColorType::Indexed => {
                return Err(Error::UnsupportedImage("indexed color was not expanded".to_string()));
            }
        };

        Self::new(info.width, info.height, pixels)
    }

    /// Write the buffer to a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if file creation or PNG encoding fails.
    pub fn write_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.encode_png(BufWriter::new(file))
    }

    /// Encode the buffer to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.encode_png(&mut buffer)?;
        Ok(buffer)
    }

    fn encode_png<W: Write>(&self, sink: W) -> Result<()> {
        let mut encoder = png::Encoder::new(sink, self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.pixels)?;
        writer.finish()?;
        Ok(())
    }
}
