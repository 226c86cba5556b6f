use std::path::Path;

use image::{DynamicImage, RgbaImage, imageops::FilterType};

/// Failures while turning an image file into a registered texture.
///
/// None of these are fatal for the scene: the texture is logged and skipped
/// and the draw calls that reference it fall back to a neutral texture.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("could not read image {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not decode image {label}: {source}")]
    Decode {
        label: String,
        #[source]
        source: image::ImageError,
    },
    #[error("not implemented to handle image {label} with {channels} channels")]
    UnsupportedChannels { label: String, channels: u8 },
    #[error("image {label} is {width}x{height}, the device allows at most {max}x{max}")]
    TooLarge {
        label: String,
        width: u32,
        height: u32,
        max: u32,
    },
    #[error("all {0} texture slots are in use")]
    SlotsExhausted(usize),
}

/// Pixels of a decoded image, flipped so the first row is the bottom of the
/// picture and expanded to RGBA.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// Channel count of the source file (3 or 4).
    pub channels: u8,
    pub rgba: RgbaImage,
}

/// Backend that turns decoded pixels into something draw calls can bind.
pub trait TextureUploader {
    type Handle;

    fn upload(&mut self, image: &DecodedImage, label: &str) -> Result<Self::Handle, TextureError>;
}

/// Refuse images with a side longer than `max` texels.
pub fn ensure_fits(image: &DecodedImage, label: &str, max: u32) -> Result<(), TextureError> {
    if image.width > max || image.height > max {
        return Err(TextureError::TooLarge {
            label: label.to_string(),
            width: image.width,
            height: image.height,
            max,
        });
    }
    Ok(())
}

pub fn load_binary(asset_dir: &Path, file_name: &str) -> Result<Vec<u8>, TextureError> {
    let path = asset_dir.join(file_name);
    std::fs::read(&path).map_err(|source| TextureError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Decode an image file and flip it vertically.
///
/// Only RGB and RGBA images are accepted.
pub fn decode_image(bytes: &[u8], label: &str) -> Result<DecodedImage, TextureError> {
    let img = image::load_from_memory(bytes).map_err(|source| TextureError::Decode {
        label: label.to_string(),
        source,
    })?;
    let channels = img.color().channel_count();
    if channels != 3 && channels != 4 {
        return Err(TextureError::UnsupportedChannels {
            label: label.to_string(),
            channels,
        });
    }
    let rgba = DynamicImage::flipv(&img).to_rgba8();
    Ok(DecodedImage {
        width: rgba.width(),
        height: rgba.height(),
        channels,
        rgba,
    })
}

/// Number of levels in a full mip pyramid for the given size.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// Every mip level from full size down to 1x1, each half the size of the previous one.
pub fn mip_chain(rgba: &RgbaImage) -> Vec<RgbaImage> {
    let levels = mip_level_count(rgba.width(), rgba.height());
    let mut chain = Vec::with_capacity(levels as usize);
    chain.push(rgba.clone());
    for _ in 1..levels {
        // the chain is never empty here
        let previous = &chain[chain.len() - 1];
        let width = (previous.width() / 2).max(1);
        let height = (previous.height() / 2).max(1);
        let level = image::imageops::resize(previous, width, height, FilterType::Triangle);
        chain.push(level);
    }
    chain
}

/// Layout of `@group(0)`: one filterable 2D texture and its sampler.
pub fn texture_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some("scene texture_bind_group_layout"),
    })
}
