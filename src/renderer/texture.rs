//! Logo image loading and GPU upload

use std::path::Path;

use crate::error::TextureError;

/// Decoded RGBA8 pixels
#[derive(Debug, Clone, PartialEq)]
pub struct LogoImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl LogoImage {
    pub fn load(path: &Path) -> Result<Self, TextureError> {
        let image = image::open(path)?.to_rgba8();
        Self::from_rgba(image)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TextureError> {
        let image = image::load_from_memory(bytes)?.to_rgba8();
        Self::from_rgba(image)
    }

    fn from_rgba(image: image::RgbaImage) -> Result<Self, TextureError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(TextureError::Empty { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: image.into_raw(),
        })
    }

    /// Single opaque white texel; the tint alone decides the quad color
    pub fn placeholder() -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![255; 4],
        }
    }

    /// Load the logo, or fall back to the placeholder and keep going
    pub fn load_or_placeholder(path: &Path) -> Self {
        match Self::load(path) {
            Ok(image) => {
                log::info!(
                    "Loaded logo {} ({}x{})",
                    path.display(),
                    image.width,
                    image.height
                );
                image
            }
            Err(e) => {
                log::warn!("{} ({}), drawing an untextured quad", e, path.display());
                Self::placeholder()
            }
        }
    }
}

/// Logo texture resident on the GPU
pub struct LogoTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl LogoTexture {
    pub fn upload(device: &wgpu::Device, queue: &wgpu::Queue, image: &LogoImage) -> Self {
        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("logo_texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width),
                rows_per_image: Some(image.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("logo_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }
}
