//! Image Adapter: the only component permitted to call into a host imaging
//! facility. Everything downstream of this module — the key schedule, the
//! LSB codec, the DCT watermark codec — operates on a plain [`Raster`] and
//! never touches an image-format crate directly.
//!
//! A [`Raster`] is a flat, contiguous byte buffer plus `(height, width,
//! channels)` metadata. Grayscale rasters have `channels == 1`; colour
//! rasters have `channels == 3` and store components in BGR order (matching
//! the OpenCV convention the original forensic tooling was built against).

use crate::error::StegoError;
use image::{imageops::FilterType, DynamicImage, ImageBuffer, Luma, Rgb};

/// A decoded 8-bit raster image: `(height, width)` for grayscale or
/// `(height, width, 3)` for colour (BGR channel order), stored row-major
/// with channels interleaved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    data: Vec<u8>,
    height: usize,
    width: usize,
    channels: usize,
}

impl Raster {
    /// Builds a raster from raw interleaved bytes, validating that the
    /// buffer length matches `height * width * channels` and that `channels`
    /// is a shape this crate supports (1 or 3).
    pub fn new(data: Vec<u8>, height: usize, width: usize, channels: usize) -> Result<Self, StegoError> {
        if channels != 1 && channels != 3 {
            return Err(StegoError::UnsupportedShape);
        }
        if data.len() != height * width * channels {
            return Err(StegoError::Internal {
                message: format!(
                    "raster buffer length {} does not match {}x{}x{}",
                    data.len(),
                    height,
                    width,
                    channels
                ),
            });
        }
        Ok(Self {
            data,
            height,
            width,
            channels,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Total pixel-channel slots (`height * width * channels`); the LSB
    /// codec's notion of capacity.
    pub fn capacity(&self) -> usize {
        self.height * self.width * self.channels
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize, channel: usize) -> usize {
        (row * self.width + col) * self.channels + channel
    }

    /// Reads the component at `(row, col, channel)`. `channel` must be `0`
    /// for a grayscale raster.
    #[inline]
    pub fn get(&self, row: usize, col: usize, channel: usize) -> u8 {
        self.data[self.offset(row, col, channel)]
    }

    /// Writes the component at `(row, col, channel)`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, channel: usize, value: u8) {
        let idx = self.offset(row, col, channel);
        self.data[idx] = value;
    }

    /// Decodes an encoded image (PNG/JPEG) from bytes into a raster. Images
    /// with an alpha channel are flattened to BGR; single-channel images
    /// decode to a `channels == 1` raster.
    pub fn decode(bytes: &[u8]) -> Result<Self, StegoError> {
        let img = image::load_from_memory(bytes)?;
        Ok(Self::from_dynamic_image(&img))
    }

    /// Encodes this raster as a PNG in memory.
    pub fn encode_png(&self) -> Result<Vec<u8>, StegoError> {
        let mut buf = Vec::new();
        let dynamic = self.to_dynamic_image()?;
        dynamic
            .write_with_encoder(image::codecs::png::PngEncoder::new(&mut buf))
            .map_err(StegoError::ImageCodec)?;
        Ok(buf)
    }

    /// Encodes this raster as a baseline JPEG in memory at the given quality
    /// (`1..=100`).
    pub fn encode_jpeg(&self, quality: u8) -> Result<Vec<u8>, StegoError> {
        let mut buf = Vec::new();
        let dynamic = self.to_dynamic_image()?;
        dynamic
            .write_with_encoder(image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, quality))
            .map_err(StegoError::ImageCodec)?;
        Ok(buf)
    }

    fn from_dynamic_image(img: &DynamicImage) -> Self {
        if img.color().has_color() {
            let rgb = img.to_rgb8();
            let (width, height) = rgb.dimensions();
            let mut data = vec![0u8; (width * height * 3) as usize];
            for (x, y, pixel) in rgb.enumerate_pixels() {
                let idx = ((y * width + x) * 3) as usize;
                // image gives RGB; this crate's colour convention is BGR.
                data[idx] = pixel[2];
                data[idx + 1] = pixel[1];
                data[idx + 2] = pixel[0];
            }
            Raster {
                data,
                height: height as usize,
                width: width as usize,
                channels: 3,
            }
        } else {
            let gray = img.to_luma8();
            let (width, height) = gray.dimensions();
            Raster {
                data: gray.into_raw(),
                height: height as usize,
                width: width as usize,
                channels: 1,
            }
        }
    }

    fn to_dynamic_image(&self) -> Result<DynamicImage, StegoError> {
        let buffer_error = || StegoError::Internal {
            message: "raster buffer length does not match its own declared shape".to_string(),
        };
        match self.channels {
            1 => {
                let buf: ImageBuffer<Luma<u8>, Vec<u8>> =
                    ImageBuffer::from_raw(self.width as u32, self.height as u32, self.data.clone())
                        .ok_or_else(buffer_error)?;
                Ok(DynamicImage::ImageLuma8(buf))
            }
            3 => {
                let mut rgb = vec![0u8; self.data.len()];
                for px in 0..(self.width * self.height) {
                    rgb[px * 3] = self.data[px * 3 + 2];
                    rgb[px * 3 + 1] = self.data[px * 3 + 1];
                    rgb[px * 3 + 2] = self.data[px * 3];
                }
                let buf: ImageBuffer<Rgb<u8>, Vec<u8>> =
                    ImageBuffer::from_raw(self.width as u32, self.height as u32, rgb).ok_or_else(buffer_error)?;
                Ok(DynamicImage::ImageRgb8(buf))
            }
            _ => unreachable!("Raster::new rejects channel counts other than 1 or 3"),
        }
    }

    /// Bicubic resize to `(new_height, new_width)`. Grayscale stays
    /// grayscale, colour stays colour.
    pub fn resize(&self, new_height: usize, new_width: usize) -> Result<Self, StegoError> {
        match self.channels {
            1 => {
                let buf: ImageBuffer<Luma<u8>, Vec<u8>> =
                    ImageBuffer::from_raw(self.width as u32, self.height as u32, self.data.clone()).ok_or_else(
                        || StegoError::Internal {
                            message: "raster buffer length does not match its own declared shape".to_string(),
                        },
                    )?;
                let resized =
                    image::imageops::resize(&buf, new_width as u32, new_height as u32, FilterType::CatmullRom);
                Ok(Raster {
                    data: resized.into_raw(),
                    height: new_height,
                    width: new_width,
                    channels: 1,
                })
            }
            _ => {
                let dynamic = self.to_dynamic_image()?;
                let rgb = dynamic.to_rgb8();
                let resized =
                    image::imageops::resize(&rgb, new_width as u32, new_height as u32, FilterType::CatmullRom);
                Ok(Self::from_dynamic_image(&DynamicImage::ImageRgb8(resized)))
            }
        }
    }

    /// Converts a 3-channel BGR raster to single-channel grayscale using the
    /// BT.601 full-range luma weights (matching OpenCV's `COLOR_BGR2GRAY`).
    pub fn to_grayscale(&self) -> Result<Self, StegoError> {
        if self.channels == 1 {
            return Ok(self.clone());
        }
        if self.channels != 3 {
            return Err(StegoError::UnsupportedShape);
        }
        let mut data = vec![0u8; self.height * self.width];
        for px in 0..(self.height * self.width) {
            let b = self.data[px * 3] as f32;
            let g = self.data[px * 3 + 1] as f32;
            let r = self.data[px * 3 + 2] as f32;
            let y = 0.299 * r + 0.587 * g + 0.114 * b;
            data[px] = y.round().clamp(0.0, 255.0) as u8;
        }
        Ok(Raster {
            data,
            height: self.height,
            width: self.width,
            channels: 1,
        })
    }

    /// Thresholds a grayscale raster at 128: values `>= 128` become `255`,
    /// others become `0`.
    pub fn threshold_binary(&self, threshold: u8) -> Result<Self, StegoError> {
        if self.channels != 1 {
            return Err(StegoError::UnsupportedShape);
        }
        let data = self
            .data
            .iter()
            .map(|&v| if v >= threshold { 255u8 } else { 0u8 })
            .collect();
        Ok(Raster {
            data,
            height: self.height,
            width: self.width,
            channels: 1,
        })
    }

    /// Splits a 3-channel BGR raster into its `(Y, U, V)` planes using the
    /// same analog-derived matrix as OpenCV's `COLOR_BGR2YUV`: the luma term
    /// is BT.601, but chroma is `(B-Y)*0.493` / `(R-Y)*0.877`, not the
    /// JPEG/JFIF YCbCr amplitudes.
    pub fn bgr_to_yuv_planes(&self) -> Result<(Vec<u8>, Vec<u8>, Vec<u8>), StegoError> {
        if self.channels != 3 {
            return Err(StegoError::NonColourHost);
        }
        let n = self.height * self.width;
        let mut y = vec![0u8; n];
        let mut u = vec![0u8; n];
        let mut v = vec![0u8; n];
        for px in 0..n {
            let b = self.data[px * 3] as f32;
            let g = self.data[px * 3 + 1] as f32;
            let r = self.data[px * 3 + 2] as f32;

            let yy = 0.299 * r + 0.587 * g + 0.114 * b;
            let uu = (b - yy) * 0.493 + 128.0;
            let vv = (r - yy) * 0.877 + 128.0;

            y[px] = yy.round().clamp(0.0, 255.0) as u8;
            u[px] = uu.round().clamp(0.0, 255.0) as u8;
            v[px] = vv.round().clamp(0.0, 255.0) as u8;
        }
        Ok((y, u, v))
    }

    /// Rebuilds a 3-channel BGR raster from `(Y, U, V)` planes of the given
    /// dimensions (inverse of [`Raster::bgr_to_yuv_planes`]).
    ///
    /// `R` and `B` are recovered directly from the forward chroma relations
    /// (`V = (R-Y)*0.877 + 128`, `U = (B-Y)*0.493 + 128`); `G` is then solved
    /// from the luma equation rather than from a separately-rounded
    /// published coefficient, so this is an exact algebraic inverse of
    /// [`Raster::bgr_to_yuv_planes`] rather than an approximation of one.
    pub fn yuv_planes_to_bgr(
        height: usize,
        width: usize,
        y: &[u8],
        u: &[u8],
        v: &[u8],
    ) -> Result<Self, StegoError> {
        let n = height * width;
        if y.len() != n || u.len() != n || v.len() != n {
            return Err(StegoError::Internal {
                message: "YUV plane length mismatch".to_string(),
            });
        }
        let mut data = vec![0u8; n * 3];
        for px in 0..n {
            let yy = y[px] as f32;
            let uu = u[px] as f32 - 128.0;
            let vv = v[px] as f32 - 128.0;

            let r = yy + vv / 0.877;
            let b = yy + uu / 0.493;
            let g = (yy - 0.299 * r - 0.114 * b) / 0.587;

            data[px * 3] = b.round().clamp(0.0, 255.0) as u8;
            data[px * 3 + 1] = g.round().clamp(0.0, 255.0) as u8;
            data[px * 3 + 2] = r.round().clamp(0.0, 255.0) as u8;
        }
        Ok(Raster {
            data,
            height,
            width,
            channels: 3,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(height: usize, width: usize, channels: usize, value: u8) -> Raster {
        Raster::new(vec![value; height * width * channels], height, width, channels).unwrap()
    }

    #[test]
    fn resize_preserves_channel_count() {
        let gray = solid(8, 8, 1, 100);
        let resized = gray.resize(16, 16).unwrap();
        assert_eq!(resized.channels(), 1);
        assert_eq!((resized.height(), resized.width()), (16, 16));

        let colour = solid(8, 8, 3, 100);
        let resized = colour.resize(4, 4).unwrap();
        assert_eq!(resized.channels(), 3);
    }

    #[test]
    fn grayscale_of_neutral_grey_is_close_to_input() {
        let colour = solid(4, 4, 3, 128);
        let gray = colour.to_grayscale().unwrap();
        assert_eq!(gray.channels(), 1);
        for &v in gray.as_bytes() {
            assert!((v as i32 - 128).abs() <= 1);
        }
    }

    #[test]
    fn threshold_binary_splits_at_128() {
        let raster = Raster::new(vec![0, 127, 128, 255], 1, 4, 1).unwrap();
        let thresholded = raster.threshold_binary(128).unwrap();
        assert_eq!(thresholded.as_bytes(), &[0, 0, 255, 255]);
    }

    #[test]
    fn yuv_round_trip_is_close_for_neutral_grey() {
        let bgr = solid(2, 2, 3, 128);
        let (y, u, v) = bgr.bgr_to_yuv_planes().unwrap();
        let back = Raster::yuv_planes_to_bgr(2, 2, &y, &u, &v).unwrap();
        for (a, b) in bgr.as_bytes().iter().zip(back.as_bytes().iter()) {
            assert!((*a as i32 - *b as i32).abs() <= 2);
        }
    }

    #[test]
    fn capacity_matches_shape() {
        assert_eq!(solid(10, 20, 1, 0).capacity(), 200);
        assert_eq!(solid(10, 20, 3, 0).capacity(), 600);
    }
}
