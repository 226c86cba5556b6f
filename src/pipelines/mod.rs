//! Render pipelines of the scene.
//!
//! Both pipelines share one shader and one layout:
//! `@group(0)` texture, `@group(1)` camera, `@group(2)` lights and
//! `@group(3)` the per-draw object uniforms.

pub mod basic;
pub mod light;
pub mod object;
pub mod transparent;

/// The opaque and the transparent scene pipeline.
#[derive(Debug)]
pub struct Pipelines {
    pub basic: wgpu::RenderPipeline,
    pub transparent: wgpu::RenderPipeline,
}

impl Pipelines {
    pub fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        layouts: &basic::SceneLayouts,
    ) -> Self {
        Self {
            basic: basic::mk_basic_pipeline(device, color_format, layouts),
            transparent: transparent::mk_transparent_pipeline(device, color_format, layouts),
        }
    }
}
