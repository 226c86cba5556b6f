use cgmath::{Matrix, Matrix4, SquareMatrix};

use crate::render::DrawState;

/// Per-draw uniforms bound at `@group(3)` with a dynamic offset.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    model: [[f32; 4]; 4],
    // inverse transpose of `model`, for non-uniform scales
    normal: [[f32; 4]; 4],
    color: [f32; 4],
    uv_scale: [f32; 2],
    use_texture: u32,
    _padding: u32,
    diffuse_color: [f32; 3],
    shininess: f32,
    specular_color: [f32; 3],
    _padding2: f32,
}

impl ObjectUniform {
    pub fn model(&self) -> Matrix4<f32> {
        self.model.into()
    }

    pub fn normal(&self) -> Matrix4<f32> {
        self.normal.into()
    }

    pub fn uses_texture(&self) -> bool {
        self.use_texture != 0
    }
}

impl From<&DrawState> for ObjectUniform {
    fn from(state: &DrawState) -> Self {
        let normal = state
            .model
            .invert()
            .map(|inverse| inverse.transpose())
            .unwrap_or(state.model);
        Self {
            model: state.model.into(),
            normal: normal.into(),
            color: state.color,
            uv_scale: state.uv_scale,
            use_texture: state.texture.is_some() as u32,
            _padding: 0,
            diffuse_color: state.diffuse_color.into(),
            shininess: state.shininess,
            specular_color: state.specular_color.into(),
            _padding2: 0.0,
        }
    }
}

/// Distance between two draws' uniforms in the dynamic buffer.
pub fn uniform_stride(device: &wgpu::Device) -> wgpu::BufferAddress {
    let size = std::mem::size_of::<ObjectUniform>() as wgpu::BufferAddress;
    let alignment = device.limits().min_uniform_buffer_offset_alignment as wgpu::BufferAddress;
    size.div_ceil(alignment) * alignment
}

/// Dynamic-offset uniform buffer holding the uniforms of every draw of a frame.
#[derive(Debug)]
pub struct ObjectResources {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
    pub stride: wgpu::BufferAddress,
    capacity: usize,
    staging: Vec<u8>,
}

impl ObjectResources {
    const INITIAL_CAPACITY: usize = 64;

    pub fn new(device: &wgpu::Device) -> Self {
        let bind_group_layout = mk_bind_group_layout(device);
        let stride = uniform_stride(device);
        let capacity = Self::INITIAL_CAPACITY;
        let buffer = mk_buffer(device, stride, capacity);
        let bind_group = mk_bind_group(device, &bind_group_layout, &buffer);
        Self {
            buffer,
            bind_group,
            bind_group_layout,
            stride,
            capacity,
            staging: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Write one uniform block per draw, growing the buffer if the frame has
    /// more draws than fit.
    pub fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, uniforms: &[ObjectUniform]) {
        if uniforms.len() > self.capacity {
            self.capacity = uniforms.len().next_power_of_two();
            log::debug!("growing object uniform buffer to {} draws", self.capacity);
            self.buffer = mk_buffer(device, self.stride, self.capacity);
            self.bind_group = mk_bind_group(device, &self.bind_group_layout, &self.buffer);
        }
        if uniforms.is_empty() {
            return;
        }

        let stride = self.stride as usize;
        self.staging.clear();
        self.staging.resize(stride * uniforms.len(), 0);
        for (chunk, uniform) in self.staging.chunks_exact_mut(stride).zip(uniforms) {
            let bytes = bytemuck::bytes_of(uniform);
            chunk[..bytes.len()].copy_from_slice(bytes);
        }
        queue.write_buffer(&self.buffer, 0, &self.staging);
    }

    /// Dynamic offset of the `index`th draw.
    pub fn offset(&self, index: usize) -> wgpu::DynamicOffset {
        (index as wgpu::BufferAddress * self.stride) as wgpu::DynamicOffset
    }
}

fn mk_buffer(
    device: &wgpu::Device,
    stride: wgpu::BufferAddress,
    capacity: usize,
) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Object Uniform Buffer"),
        size: stride * capacity as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

pub fn mk_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: true,
                min_binding_size: wgpu::BufferSize::new(
                    std::mem::size_of::<ObjectUniform>() as wgpu::BufferAddress,
                ),
            },
            count: None,
        }],
        label: Some("object_bind_group_layout"),
    })
}

fn mk_bind_group(
    device: &wgpu::Device,
    bind_group_layout: &wgpu::BindGroupLayout,
    buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout: bind_group_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer,
                offset: 0,
                size: wgpu::BufferSize::new(
                    std::mem::size_of::<ObjectUniform>() as wgpu::BufferAddress,
                ),
            }),
        }],
        label: Some("object_bind_group"),
    })
}
