use crate::{
    data_structures::{
        shapes::{ShapeVertex, Vertex},
        texture::Texture,
    },
    pipelines::basic::{SceneLayouts, mk_render_pipeline, mk_scene_pipeline_layout, scene_shader},
};

/**
 * Pipeline for translucent flat-coloured draws such as the glass of the salt shakers.
 *
 * Alpha blended and depth tested, but without depth writes so that objects
 * drawn later still show through.
 */
pub fn mk_transparent_pipeline(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    layouts: &SceneLayouts,
) -> wgpu::RenderPipeline {
    let render_pipeline_layout = mk_scene_pipeline_layout(device, layouts);
    mk_render_pipeline(
        device,
        &render_pipeline_layout,
        color_format,
        Some(wgpu::BlendState::ALPHA_BLENDING),
        Some(Texture::DEPTH_FORMAT),
        false,
        &[ShapeVertex::desc()],
        scene_shader(),
    )
}
