// Copyright 2025 the slate developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Texture filters, formats and the CPU-side image type.

/// The filtering mode applied when sampling a texture.
///
/// A texture carries one mode for minification and one for magnification,
/// both fixed at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterMode {
    /// Point sampling. Returns the value of the nearest texel.
    Nearest,
    /// Linear interpolation of the nearest texels.
    Linear,
}

/// The memory format of pixels in a texture.
///
/// The format is set at [`resize`](crate::traits::Texture::resize) time and
/// is fixed until the next resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    /// Four 8-bit unsigned normalized components (RGBA) in the sRGB color
    /// space.
    Rgba8UnormSrgb,
    /// Four 16-bit float components. Rendering into this format requires
    /// [`Features::FLOAT_RENDER_TARGETS`](crate::api::Features::FLOAT_RENDER_TARGETS).
    Rgba16Float,
}

impl TextureFormat {
    /// Returns the size in bytes of a single pixel for this format.
    pub fn bytes_per_pixel(&self) -> u32 {
        match self {
            TextureFormat::Rgba8UnormSrgb => 4,
            TextureFormat::Rgba16Float => 8,
        }
    }
}

/// A CPU-side RGBA image, ready to be uploaded to a texture.
///
/// Pixels are stored row-major, four bytes per pixel, with no padding
/// between rows. An upload must match the target texture's current
/// dimensions exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl CpuImage {
    /// Creates a zero-filled image of the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Creates an image from raw RGBA pixel data.
    ///
    /// # Panics
    ///
    /// Panics if `pixels.len()` is not `width * height * 4`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        assert_eq!(
            pixels.len(),
            width as usize * height as usize * 4,
            "pixel data length does not match {width}x{height} RGBA dimensions"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// The image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// The image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The size in bytes of one row of pixels.
    pub fn row_size(&self) -> usize {
        self.width as usize * 4
    }

    /// The raw RGBA pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable access to the raw RGBA pixel data.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_image_is_zeroed() {
        let img = CpuImage::new(4, 2);
        assert_eq!(img.width(), 4);
        assert_eq!(img.height(), 2);
        assert_eq!(img.pixels().len(), 32);
        assert!(img.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn row_size_is_four_bytes_per_pixel() {
        let img = CpuImage::new(7, 3);
        assert_eq!(img.row_size(), 28);
    }

    #[test]
    fn from_pixels_accepts_matching_length() {
        let img = CpuImage::from_pixels(2, 2, vec![0xff; 16]);
        assert_eq!(img.pixels()[0], 0xff);
    }

    #[test]
    #[should_panic(expected = "pixel data length")]
    fn from_pixels_rejects_wrong_length() {
        let _ = CpuImage::from_pixels(2, 2, vec![0xff; 15]);
    }

    #[test]
    fn format_pixel_sizes() {
        assert_eq!(TextureFormat::Rgba8UnormSrgb.bytes_per_pixel(), 4);
        assert_eq!(TextureFormat::Rgba16Float.bytes_per_pixel(), 8);
    }
}
