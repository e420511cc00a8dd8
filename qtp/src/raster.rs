//! In-memory RGB8 pixel buffers and the binary PPM (`P6`) files they are read
//! from and written to.

use std::{
    fs::File,
    io::{BufWriter, Read, Write},
    path::Path,
};

use log::debug;

use crate::error::Error;

/// Number of bytes per pixel, one for each of red, green and blue.
pub const CHANNELS: usize = 3;

/// The only maximum channel value written out.
const MAX_VALUE: u32 = 255;

/// A single RGB8 color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

/// A dense, row-major grid of RGB8 pixels with no padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    bitmap: Vec<u8>,
}

impl Raster {
    /// Create a black raster of the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bitmap: vec![0; width as usize * height as usize * CHANNELS],
        }
    }

    /// Wrap existing RGB8 data. Any bytes past `width * height * 3` are dropped.
    pub fn from_raw(width: u32, height: u32, mut bitmap: Vec<u8>) -> Result<Self, Error> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or(Error::TooLarge)?;
        if bitmap.len() < expected {
            return Err(Error::TruncatedData {
                what: "pixel bytes",
                expected,
                found: bitmap.len(),
            });
        }
        bitmap.truncate(expected);

        Ok(Self {
            width,
            height,
            bitmap,
        })
    }

    /// Create a raster by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F: FnMut(u32, u32) -> Rgb>(width: u32, height: u32, mut f: F) -> Self {
        let mut raster = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                raster.set_pixel(x, y, f(x, y));
            }
        }

        raster
    }

    /// Width of the image in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the image in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw RGB8 bytes.
    pub fn as_raw(&self) -> &[u8] {
        &self.bitmap
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Get the pixel at `(x, y)`.
    ///
    /// # Panics
    /// If the coordinates are outside of the image.
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        let i = self.offset(x, y);
        Rgb::new(self.bitmap[i], self.bitmap[i + 1], self.bitmap[i + 2])
    }

    /// Set the pixel at `(x, y)`.
    ///
    /// # Panics
    /// If the coordinates are outside of the image.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgb) {
        let i = self.offset(x, y);
        self.bitmap[i..i + CHANNELS].copy_from_slice(&[color.red, color.green, color.blue]);
    }

    /// Fill the `size × size` block anchored at `(x, y)` with one color. The
    /// parts of the block that fall outside of the image are skipped.
    pub fn fill_block(&mut self, x: u32, y: u32, size: u32, color: Rgb) {
        let x_end = x.saturating_add(size).min(self.width);
        let y_end = y.saturating_add(size).min(self.height);

        for row in y..y_end {
            for col in x..x_end {
                self.set_pixel(col, row, color);
            }
        }
    }

    /// The image mirrored left to right.
    pub fn flip_horizontal(&self) -> Self {
        Self::from_fn(self.width, self.height, |x, y| {
            self.pixel(self.width - 1 - x, y)
        })
    }

    /// The image mirrored top to bottom.
    pub fn flip_vertical(&self) -> Self {
        Self::from_fn(self.width, self.height, |x, y| {
            self.pixel(x, self.height - 1 - y)
        })
    }

    /// The image turned by 180 degrees.
    pub fn rotate_180(&self) -> Self {
        Self::from_fn(self.width, self.height, |x, y| {
            self.pixel(self.width - 1 - x, self.height - 1 - y)
        })
    }

    /// Decode a binary PPM from anything that implements [Read].
    pub fn read_ppm<I: Read>(mut input: I) -> Result<Self, Error> {
        let mut data = Vec::new();
        input.read_to_end(&mut data)?;

        let mut pos = 0;
        let tag = next_token(&data, &mut pos).unwrap_or_default();
        if tag != b"P6" {
            return Err(Error::InvalidTag(String::from_utf8_lossy(tag).into_owned()));
        }

        let width = header_number(&data, &mut pos, "width")?;
        let height = header_number(&data, &mut pos, "height")?;
        let max_value = header_number(&data, &mut pos, "maximum color value")?;
        if max_value == 0 || max_value > MAX_VALUE {
            return Err(Error::InvalidHeader(format!(
                "unsupported maximum color value {max_value}"
            )));
        }

        // A single whitespace byte separates the header from the pixels
        pos += 1;

        data.drain(..pos.min(data.len()));
        Self::from_raw(width, height, data)
    }

    /// Encode the image as a binary PPM into anything that implements [Write].
    pub fn write_ppm<O: Write>(&self, mut output: O) -> Result<(), Error> {
        write!(output, "P6\n{} {}\n{}\n", self.width, self.height, MAX_VALUE)?;
        output.write_all(&self.bitmap)?;
        output.flush()?;

        Ok(())
    }

    /// Open a PPM file from a path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let raster = Self::read_ppm(File::open(path)?)?;
        debug!("read {}x{} image from {path:?}", raster.width, raster.height);

        Ok(raster)
    }

    /// Save the image as a PPM file to a path.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        self.write_ppm(BufWriter::new(File::create(path)?))?;
        debug!("wrote {}x{} image to {path:?}", self.width, self.height);

        Ok(())
    }
}

/// Pull the next whitespace-delimited header token, skipping `#` comments.
fn next_token<'a>(data: &'a [u8], pos: &mut usize) -> Option<&'a [u8]> {
    loop {
        while data.get(*pos).is_some_and(u8::is_ascii_whitespace) {
            *pos += 1;
        }

        if data.get(*pos) == Some(&b'#') {
            while data.get(*pos).is_some_and(|&b| b != b'\n') {
                *pos += 1;
            }
            continue;
        }

        break;
    }

    let start = *pos;
    while data.get(*pos).is_some_and(|b| !b.is_ascii_whitespace()) {
        *pos += 1;
    }

    (*pos > start).then(|| &data[start..*pos])
}

fn header_number(data: &[u8], pos: &mut usize, what: &str) -> Result<u32, Error> {
    let token = next_token(data, pos)
        .ok_or_else(|| Error::InvalidHeader(format!("missing {what}")))?;

    std::str::from_utf8(token)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| {
            Error::InvalidHeader(format!(
                "invalid {what} {:?}",
                String::from_utf8_lossy(token)
            ))
        })
}
