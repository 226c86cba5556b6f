//! Turns a recorded frame into a render pass.
//!
//! [`Renderer`] owns every GPU object that outlives a frame: the pipelines,
//! the camera and light uniforms, the per-draw uniform buffer, the uploaded
//! shape meshes and a white fallback texture. Each frame it stages the
//! uniforms of all recorded draws in one buffer write and replays the draws
//! in recorded order, switching to the blended pipeline for translucent ones.

use std::iter;

use crate::{
    camera::{Camera, CameraResources, Projection, default_projection},
    data_structures::{
        shapes::ShapeLibrary,
        texture::{GpuTextureUploader, SceneTexture, Texture},
    },
    pipelines::{
        Pipelines,
        basic::SceneLayouts,
        light::LightResources,
        object::{ObjectResources, ObjectUniform},
    },
    render::{FrameRecorder, TextureBinding},
    resources::{
        mesh::{ShapeMeshes, load_shape_meshes},
        texture::texture_layout,
    },
    scene::{SceneManager, lights::LightSetup},
};

#[derive(Debug)]
pub struct Renderer {
    pipelines: Pipelines,
    texture_layout: wgpu::BindGroupLayout,
    fallback: SceneTexture,
    pub camera: CameraResources,
    pub projection: Projection,
    pub lights: LightResources,
    objects: ObjectResources,
    meshes: Option<ShapeMeshes>,
    uniforms: Vec<ObjectUniform>,
}

impl Renderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        color_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let texture_layout = texture_layout(device);
        let projection = default_projection(width, height);
        let camera = CameraResources::new(device, Camera::default(), &projection);
        let lights = LightResources::new(device, &LightSetup::new());
        let objects = ObjectResources::new(device);

        let pipelines = Pipelines::new(
            device,
            color_format,
            &SceneLayouts {
                texture: &texture_layout,
                camera: &camera.bind_group_layout,
                light: &lights.bind_group_layout,
                object: &objects.bind_group_layout,
            },
        );

        let white = Texture::create_solid([255; 4], device, queue, "fallback texture");
        let fallback = SceneTexture::new(device, white, &texture_layout, "fallback_bind_group");

        Self {
            pipelines,
            texture_layout,
            fallback,
            camera,
            projection,
            lights,
            objects,
            meshes: None,
            uniforms: Vec::new(),
        }
    }

    /// Uploader creating textures compatible with the scene pipelines.
    pub fn texture_uploader<'a>(
        &'a self,
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
    ) -> GpuTextureUploader<'a> {
        GpuTextureUploader {
            device,
            queue,
            layout: &self.texture_layout,
        }
    }

    /// Upload the tessellated shapes. Call again after loading more shapes.
    pub fn upload_shapes(&mut self, device: &wgpu::Device, library: &ShapeLibrary) {
        self.meshes = load_shape_meshes(library, device);
    }

    pub fn has_meshes(&self) -> bool {
        self.meshes.is_some()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection.resize(width, height);
    }

    pub fn update_camera(&mut self, queue: &wgpu::Queue) {
        self.camera.update(queue, &self.projection);
    }

    /// Encode and submit one frame.
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        scene: &SceneManager<SceneTexture>,
        frame: &FrameRecorder,
        color_view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
        clear_colour: wgpu::Color,
    ) {
        if let Some(lighting) = frame.lighting() {
            self.lights.update(queue, *lighting);
        }
        self.update_camera(queue);

        self.uniforms.clear();
        self.uniforms
            .extend(frame.draws().iter().map(|draw| ObjectUniform::from(&draw.state)));
        self.objects.write(device, queue, &self.uniforms);

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });
        {
            let mut render_pass: wgpu::RenderPass<'_> =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: color_view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(clear_colour),
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                        view: depth_view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    }),
                    occlusion_query_set: None,
                    timestamp_writes: None,
                });

            match &self.meshes {
                Some(meshes) if !frame.draws().is_empty() => {
                    render_pass.set_vertex_buffer(0, meshes.vertex_buffer.slice(..));
                    render_pass
                        .set_index_buffer(meshes.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    render_pass.set_bind_group(1, &self.camera.bind_group, &[]);
                    render_pass.set_bind_group(2, &self.lights.bind_group, &[]);

                    let mut transparent = None;
                    for (index, draw) in frame.draws().iter().enumerate() {
                        let Some(ranges) = scene.shapes().ranges(draw.shape) else {
                            log::warn!("{:?} was drawn before its mesh was loaded", draw.shape);
                            continue;
                        };
                        let is_transparent = draw.is_transparent();
                        if transparent != Some(is_transparent) {
                            render_pass.set_pipeline(if is_transparent {
                                &self.pipelines.transparent
                            } else {
                                &self.pipelines.basic
                            });
                            transparent = Some(is_transparent);
                        }
                        render_pass.set_bind_group(
                            0,
                            &self.texture_for(scene, draw.state.texture).bind_group,
                            &[],
                        );
                        render_pass.set_bind_group(
                            3,
                            &self.objects.bind_group,
                            &[self.objects.offset(index)],
                        );
                        for range in ranges {
                            render_pass.draw_indexed(range.range(), 0, 0..1);
                        }
                    }
                }
                Some(_) => (),
                None => {
                    if !frame.draws().is_empty() {
                        log::warn!("shape meshes were never uploaded, only clearing the frame");
                    }
                }
            }
        }
        queue.submit(iter::once(encoder.finish()));
    }

    /// The texture a draw samples; the white fallback for flat colours and
    /// for textures that are not (or no longer) registered.
    fn texture_for<'a>(
        &'a self,
        scene: &'a SceneManager<SceneTexture>,
        binding: Option<TextureBinding>,
    ) -> &'a SceneTexture {
        match binding {
            Some(TextureBinding::Slot(slot)) => match scene.textures().get(slot) {
                Some(entry) => &entry.handle,
                None => {
                    log::debug!("texture slot {slot} is empty");
                    &self.fallback
                }
            },
            Some(TextureBinding::Missing) | None => &self.fallback,
        }
    }
}
