//! Raster records
//!
//! A raster is a row-major bitmap placed on the bed. Every image byte is an
//! intensity sample in the printable range `[33, 118]`; the sample value is
//! `(byte - 33) * 3`, giving 0-255. The bytes go to the machine verbatim in
//! `G8D` lines, and JSON carries them as a string.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Lowest valid image byte (intensity 0)
pub const RASTER_BYTE_MIN: u8 = 33;

/// Highest valid image byte (intensity 255)
pub const RASTER_BYTE_MAX: u8 = 118;

/// Decode one image byte to a 0-255 intensity
pub fn decode_intensity(byte: u8) -> u8 {
    debug_assert!((RASTER_BYTE_MIN..=RASTER_BYTE_MAX).contains(&byte));
    (byte.saturating_sub(RASTER_BYTE_MIN)).saturating_mul(3)
}

/// Encode a 0-255 intensity to an image byte
pub fn encode_intensity(value: u8) -> u8 {
    RASTER_BYTE_MIN + value / 3
}

/// Ways a raster record can break its invariants
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RasterError {
    /// `image.len() != size_px.w * size_px.h`
    #[error("image has {found} bytes, expected {expected}")]
    LengthMismatch { expected: usize, found: usize },

    /// A byte outside `[33, 118]`
    #[error("image byte {byte} at offset {offset} is outside [33, 118]")]
    ByteOutOfRange { offset: usize, byte: u8 },
}

/// Encoded raster samples
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RasterImage(Vec<u8>);

impl RasterImage {
    /// Wrap already-encoded bytes
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Encode 0-255 intensities
    pub fn from_intensities(values: &[u8]) -> Self {
        Self(values.iter().map(|&v| encode_intensity(v)).collect())
    }

    /// The encoded bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Decoded 0-255 intensities
    pub fn intensities(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().map(|&b| decode_intensity(b))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First byte outside the valid range
    fn find_out_of_range(&self) -> Option<(usize, u8)> {
        self.0
            .iter()
            .position(|b| !(RASTER_BYTE_MIN..=RASTER_BYTE_MAX).contains(b))
            .map(|i| (i, self.0[i]))
    }
}

impl Serialize for RasterImage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let text: String = self.0.iter().map(|&b| char::from(b)).collect();
        serializer.serialize_str(&text)
    }
}

impl<'de> Deserialize<'de> for RasterImage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        if !text.is_ascii() {
            return Err(D::Error::custom("raster image must be ASCII"));
        }
        Ok(Self(text.into_bytes()))
    }
}

/// A bitmap region machined by row scanning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Raster {
    /// Origin `[x, y]` in mm
    pub pos: [f64; 2],
    /// Size `[w, h]` in mm
    pub size_mm: [f64; 2],
    /// Size `[w, h]` in pixels
    pub size_px: [u32; 2],
    /// Row-major samples, `w * h` bytes
    pub image: RasterImage,
}

impl Raster {
    /// Create a raster record and check its invariants
    pub fn new(
        pos: [f64; 2],
        size_mm: [f64; 2],
        size_px: [u32; 2],
        image: RasterImage,
    ) -> Result<Self, RasterError> {
        let raster = Self {
            pos,
            size_mm,
            size_px,
            image,
        };
        raster.validate()?;
        Ok(raster)
    }

    pub fn width_px(&self) -> usize {
        self.size_px[0] as usize
    }

    pub fn height_px(&self) -> usize {
        self.size_px[1] as usize
    }

    /// Check the length and byte-range invariants
    pub fn validate(&self) -> Result<(), RasterError> {
        let expected = self.width_px() * self.height_px();
        if self.image.len() != expected {
            return Err(RasterError::LengthMismatch {
                expected,
                found: self.image.len(),
            });
        }
        if let Some((offset, byte)) = self.image.find_out_of_range() {
            return Err(RasterError::ByteOutOfRange { offset, byte });
        }
        Ok(())
    }

    /// Iterate pixel rows top to bottom, in storage order
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        let width = self.width_px();
        let bytes = self.image.as_bytes();
        (0..self.height_px()).map(move |row| &bytes[row * width..(row + 1) * width])
    }
}
