//! Toon gradient ramp.
//!
//! The ramp maps the remapped Lambert term to a brightness. It is either
//! read from the first row of a PNG or JPEG image or generated as `steps`
//! equal tones from black to white. Sampling is nearest so the bands stay
//! hard.

use std::path::Path;

use crate::error::SceneError;
use crate::gpu::texture;
use crate::options::MaterialOptions;

/// Brightness ramp, one byte per texel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradientMap {
    texels: Vec<u8>,
}

impl GradientMap {
    /// `steps` equal tones from black to white (at least two).
    #[must_use]
    pub fn stepped(steps: u32) -> Self {
        let steps = steps.max(2);
        let texels = (0..steps)
            .map(|i| (i as f32 / (steps - 1) as f32 * 255.0).round() as u8)
            .collect();
        Self { texels }
    }

    /// The ramp configured by the material options.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Io`] or [`SceneError::TextureLoad`] when a
    /// configured gradient file cannot be read or decoded.
    pub fn from_options(options: &MaterialOptions) -> Result<Self, SceneError> {
        match &options.gradient_map {
            Some(path) => Self::load(path),
            None => Ok(Self::stepped(options.gradient_steps)),
        }
    }

    /// Load a ramp from the first row of a PNG or JPEG file.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Io`] if the file cannot be read and
    /// [`SceneError::TextureLoad`] if it is not a usable image.
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let data = std::fs::read(path).map_err(SceneError::Io)?;
        let map = Self::from_image_bytes(&data)?;
        log::info!(
            "gradient map {} loaded ({} tones)",
            path.display(),
            map.texels.len()
        );
        Ok(map)
    }

    /// Decode a ramp from encoded image bytes (PNG or JPEG, detected from
    /// the data), using the luminance of the first row.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::TextureLoad`] if decoding fails or the image
    /// is empty.
    pub fn from_image_bytes(data: &[u8]) -> Result<Self, SceneError> {
        let image = image::load_from_memory(data)
            .map_err(|e| {
                SceneError::TextureLoad(format!(
                    "failed to decode gradient image: {e}"
                ))
            })?
            .to_rgb8();
        if image.width() == 0 || image.height() == 0 {
            return Err(SceneError::TextureLoad("empty gradient image".into()));
        }

        let texels = (0..image.width())
            .map(|x| {
                let [r, g, b] = image.get_pixel(x, 0).0;
                luminance(r, g, b)
            })
            .collect();
        Ok(Self { texels })
    }

    /// Ramp texels.
    #[must_use]
    pub fn texels(&self) -> &[u8] {
        &self.texels
    }

    /// Upload as a one-row `R8Unorm` texture with a nearest sampler.
    #[must_use]
    pub fn upload(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
    ) -> (wgpu::Texture, wgpu::TextureView, wgpu::Sampler) {
        let (tex, view) = texture::create_row_texture(
            device,
            queue,
            "Toon Gradient Map",
            &self.texels,
        );
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Toon Gradient Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        (tex, view, sampler)
    }
}

/// Rec. 709 luma of an 8-bit RGB triple.
fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let y = 0.2126 * f32::from(r) + 0.7152 * f32::from(g) + 0.0722 * f32::from(b);
    y.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{DynamicImage, GrayImage, ImageFormat, RgbImage};

    use super::*;

    fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        image.write_to(&mut out, format).unwrap();
        out.into_inner()
    }

    #[test]
    fn three_steps_by_default() {
        let map = GradientMap::from_options(&MaterialOptions::default()).unwrap();
        assert_eq!(map.texels(), &[0, 128, 255]);
    }

    #[test]
    fn steps_are_clamped_to_two() {
        assert_eq!(GradientMap::stepped(0).texels(), &[0, 255]);
        assert_eq!(GradientMap::stepped(5).texels(), &[0, 64, 128, 191, 255]);
    }

    #[test]
    fn grayscale_png_first_row() {
        let gray = GrayImage::from_raw(3, 2, vec![10, 20, 30, 99, 99, 99]).unwrap();
        let png = encode(DynamicImage::ImageLuma8(gray), ImageFormat::Png);
        let map = GradientMap::from_image_bytes(&png).unwrap();
        assert_eq!(map.texels(), &[10, 20, 30]);
    }

    #[test]
    fn rgb_png_uses_luminance() {
        let rgb = RgbImage::from_raw(2, 1, vec![255, 255, 255, 255, 0, 0]).unwrap();
        let png = encode(DynamicImage::ImageRgb8(rgb), ImageFormat::Png);
        let map = GradientMap::from_image_bytes(&png).unwrap();
        assert_eq!(map.texels(), &[255, 54]);
    }

    #[test]
    fn jpeg_ramp_decodes() {
        // Three flat 8-pixel bands keep the JPEG blocks free of ringing.
        let gray = GrayImage::from_fn(24, 8, |x, _| image::Luma([[0, 128, 255][x as usize / 8]]));
        let jpeg = encode(DynamicImage::ImageLuma8(gray), ImageFormat::Jpeg);
        let map = GradientMap::from_image_bytes(&jpeg).unwrap();
        assert_eq!(map.texels().len(), 24);
        for (x, &tone) in map.texels().iter().enumerate() {
            let expected = [0_i16, 128, 255][x / 8];
            assert!((i16::from(tone) - expected).abs() <= 4, "texel {x}: {tone}");
        }
    }

    #[test]
    fn garbage_is_a_texture_error() {
        let err = GradientMap::from_image_bytes(b"not an image").unwrap_err();
        assert!(matches!(err, SceneError::TextureLoad(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let options = MaterialOptions {
            gradient_map: Some("/definitely/not/here.jpg".into()),
            ..MaterialOptions::default()
        };
        let err = GradientMap::from_options(&options).unwrap_err();
        assert!(matches!(err, SceneError::Io(_)));
    }
}
