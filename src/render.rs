//! Shader uniform state and draw recording.
//!
//! The scene talks to the GPU through two small traits: [`UniformSink`] takes
//! the values a draw is parameterized with (model matrix, texture or colour,
//! material, lights) and [`MeshDrawer`] issues the draw. Like uniforms of a
//! shader program, values stay set until they are overwritten, so a draw that
//! does not push a material reuses the previous one.
//!
//! [`FrameRecorder`] implements both traits without touching the GPU: every
//! draw snapshots the current [`DrawState`]. The renderer then turns the
//! recorded frame into a render pass.
//!
//! # Key types
//!
//! - [`DrawState`] is the uniform state at the time of a draw
//! - [`RecordedDraw`] is one draw: the shape plus its state snapshot
//! - [`FrameRecorder`] collects the draws of one frame

use cgmath::{Matrix4, SquareMatrix, Vector3};

use crate::{
    data_structures::shapes::Shape,
    scene::{
        lights::{LightSetup, LightUniform},
        materials::Material,
    },
};

/// Receiver of shader uniform values.
pub trait UniformSink {
    fn set_model(&mut self, model: Matrix4<f32>);

    /// Draw with a flat colour. Turns texturing off.
    fn set_color(&mut self, rgba: [f32; 4]);

    /// Draw with the texture in `slot`. Turns texturing on; `None` means the
    /// requested texture is not registered.
    fn set_texture(&mut self, slot: Option<usize>);

    fn set_uv_scale(&mut self, u: f32, v: f32);

    fn set_material(&mut self, material: &Material);

    fn set_lighting(&mut self, lights: &LightSetup);
}

/// Receiver of draw requests.
pub trait MeshDrawer {
    fn draw(&mut self, shape: Shape);
}

/// Which texture a draw samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureBinding {
    Slot(usize),
    /// Texturing is on but the tag did not resolve to a slot.
    Missing,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DrawState {
    pub model: Matrix4<f32>,
    pub color: [f32; 4],
    /// `None` draws with the flat colour.
    pub texture: Option<TextureBinding>,
    pub uv_scale: [f32; 2],
    pub diffuse_color: Vector3<f32>,
    pub specular_color: Vector3<f32>,
    pub shininess: f32,
}

impl DrawState {
    /// A translucent flat colour needs blending and must not write depth.
    pub fn is_transparent(&self) -> bool {
        self.texture.is_none() && self.color[3] < 1.0
    }
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            model: Matrix4::identity(),
            color: [1.0; 4],
            texture: None,
            uv_scale: [1.0, 1.0],
            diffuse_color: Vector3::new(1.0, 1.0, 1.0),
            specular_color: Vector3::new(0.0, 0.0, 0.0),
            shininess: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecordedDraw {
    pub shape: Shape,
    pub state: DrawState,
}

impl RecordedDraw {
    pub fn is_transparent(&self) -> bool {
        self.state.is_transparent()
    }
}

/// Records the draws of a frame together with the uniform state each one sees.
///
/// The uniform state survives [`begin_frame`](Self::begin_frame), only the
/// recorded draws are cleared.
#[derive(Debug, Default)]
pub struct FrameRecorder {
    state: DrawState,
    lighting: Option<LightUniform>,
    draws: Vec<RecordedDraw>,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_frame(&mut self) {
        self.draws.clear();
    }

    pub fn state(&self) -> &DrawState {
        &self.state
    }

    pub fn draws(&self) -> &[RecordedDraw] {
        &self.draws
    }

    /// The last lighting pushed, if any.
    pub fn lighting(&self) -> Option<&LightUniform> {
        self.lighting.as_ref()
    }
}

impl UniformSink for FrameRecorder {
    fn set_model(&mut self, model: Matrix4<f32>) {
        self.state.model = model;
    }

    fn set_color(&mut self, rgba: [f32; 4]) {
        self.state.texture = None;
        self.state.color = rgba;
    }

    fn set_texture(&mut self, slot: Option<usize>) {
        self.state.texture = Some(match slot {
            Some(slot) => TextureBinding::Slot(slot),
            None => TextureBinding::Missing,
        });
    }

    fn set_uv_scale(&mut self, u: f32, v: f32) {
        self.state.uv_scale = [u, v];
    }

    fn set_material(&mut self, material: &Material) {
        self.state.diffuse_color = material.diffuse_color;
        self.state.specular_color = material.specular_color;
        self.state.shininess = material.shininess;
    }

    fn set_lighting(&mut self, lights: &LightSetup) {
        self.lighting = Some(lights.to_uniform());
    }
}

impl MeshDrawer for FrameRecorder {
    fn draw(&mut self, shape: Shape) {
        self.draws.push(RecordedDraw {
            shape,
            state: self.state.clone(),
        });
    }
}
