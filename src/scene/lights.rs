//! Light sources: one directional light emulating sunlight and a handful of
//! point lights, packed into a single uniform for the fragment shader.

use cgmath::Vector3;

/// Number of point lights the shader has room for.
pub const MAX_POINT_LIGHTS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    /// Direction the light travels in.
    pub direction: Vector3<f32>,
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
    pub active: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vector3<f32>,
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
    pub active: bool,
}

impl PointLight {
    pub fn new(position: [f32; 3], ambient: f32, diffuse: f32, specular: f32) -> Self {
        Self {
            position: position.into(),
            ambient: [ambient; 3].into(),
            diffuse: [diffuse; 3].into(),
            specular: [specular; 3].into(),
            active: true,
        }
    }
}

/// The complete lighting state of the scene.
///
/// With `use_lighting` off the shader outputs the unlit texture or colour.
#[derive(Clone, Debug, PartialEq)]
pub struct LightSetup {
    pub use_lighting: bool,
    pub directional: DirectionalLight,
    point_lights: Vec<PointLight>,
}

impl LightSetup {
    /// Lighting disabled, directional light inactive, no point lights.
    pub fn new() -> Self {
        Self {
            use_lighting: false,
            directional: DirectionalLight {
                direction: Vector3::new(0.0, -1.0, 0.0),
                ambient: Vector3::new(0.0, 0.0, 0.0),
                diffuse: Vector3::new(0.0, 0.0, 0.0),
                specular: Vector3::new(0.0, 0.0, 0.0),
                active: false,
            },
            point_lights: Vec::new(),
        }
    }

    /// Add a point light. Returns its index, or `None` when all slots are taken.
    pub fn add_point_light(&mut self, light: PointLight) -> Option<usize> {
        if self.point_lights.len() >= MAX_POINT_LIGHTS {
            log::warn!(
                "ignoring point light at {:?}: only {} point lights are supported",
                light.position,
                MAX_POINT_LIGHTS
            );
            return None;
        }
        self.point_lights.push(light);
        Some(self.point_lights.len() - 1)
    }

    pub fn point_lights(&self) -> &[PointLight] {
        &self.point_lights
    }

    pub fn to_uniform(&self) -> LightUniform {
        let mut points = [PointLightRaw::zeroed(); MAX_POINT_LIGHTS];
        for (raw, light) in points.iter_mut().zip(self.point_lights.iter()) {
            *raw = PointLightRaw {
                position: light.position.into(),
                active: light.active as u32,
                ambient: light.ambient.into(),
                _padding: 0,
                diffuse: light.diffuse.into(),
                _padding2: 0,
                specular: light.specular.into(),
                _padding3: 0,
            };
        }
        let directional = &self.directional;
        LightUniform {
            directional: DirectionalLightRaw {
                direction: directional.direction.into(),
                active: directional.active as u32,
                ambient: directional.ambient.into(),
                _padding: 0,
                diffuse: directional.diffuse.into(),
                _padding2: 0,
                specular: directional.specular.into(),
                _padding3: 0,
            },
            points,
            use_lighting: self.use_lighting as u32,
            _padding: [0; 3],
        }
    }
}

impl Default for LightSetup {
    fn default() -> Self {
        Self::new()
    }
}

/// Sunlight from above plus two overhead point lights and a bright specular
/// light in front of the counter.
pub fn scene_lights() -> LightSetup {
    let mut lights = LightSetup::new();
    lights.use_lighting = true;
    lights.directional = DirectionalLight {
        direction: Vector3::new(1.0, 1.0, 1.0),
        ambient: Vector3::new(0.52, 0.56, 0.5),
        diffuse: Vector3::new(0.6, 0.6, 0.6),
        specular: Vector3::new(0.0, 0.0, 0.0),
        active: true,
    };
    lights.add_point_light(PointLight::new([-4.0, 8.0, 0.0], 0.05, 0.3, 0.1));
    lights.add_point_light(PointLight::new([4.0, 8.0, 0.0], 0.05, 0.3, 0.1));
    lights.add_point_light(PointLight::new([3.8, 5.5, 4.0], 0.05, 0.2, 0.8));
    lights
}

// Uniforms require 16 byte (4 float) spacing, every vec3 is followed by a 4 byte field.

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DirectionalLightRaw {
    pub direction: [f32; 3],
    pub active: u32,
    pub ambient: [f32; 3],
    _padding: u32,
    pub diffuse: [f32; 3],
    _padding2: u32,
    pub specular: [f32; 3],
    _padding3: u32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLightRaw {
    pub position: [f32; 3],
    pub active: u32,
    pub ambient: [f32; 3],
    _padding: u32,
    pub diffuse: [f32; 3],
    _padding2: u32,
    pub specular: [f32; 3],
    _padding3: u32,
}

impl PointLightRaw {
    fn zeroed() -> Self {
        bytemuck::Zeroable::zeroed()
    }
}

/// GPU layout of [`LightSetup`], bound at `@group(2)` of the scene shader.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub directional: DirectionalLightRaw,
    pub points: [PointLightRaw; MAX_POINT_LIGHTS],
    pub use_lighting: u32,
    _padding: [u32; 3],
}
