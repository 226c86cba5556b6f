use wgpu::util::DeviceExt;

use crate::data_structures::shapes::ShapeLibrary;

/// Vertex and index buffers of a whole [`ShapeLibrary`].
///
/// Every part of every loaded primitive lives in these two buffers; draws
/// select a part by its index range.
#[derive(Debug)]
pub struct ShapeMeshes {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_indices: u32,
}

/// Upload the library. Returns `None` when nothing has been tessellated yet
/// since wgpu rejects empty vertex buffers.
pub fn load_shape_meshes(library: &ShapeLibrary, device: &wgpu::Device) -> Option<ShapeMeshes> {
    if library.vertices().is_empty() || library.indices().is_empty() {
        log::warn!("no shapes loaded, nothing to upload");
        return None;
    }
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Shape Vertex Buffer"),
        contents: bytemuck::cast_slice(library.vertices()),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Shape Index Buffer"),
        contents: bytemuck::cast_slice(library.indices()),
        usage: wgpu::BufferUsages::INDEX,
    });
    log::debug!(
        "uploaded {} shape vertices and {} indices",
        library.vertices().len(),
        library.indices().len()
    );
    Some(ShapeMeshes {
        vertex_buffer,
        index_buffer,
        num_indices: library.indices().len() as u32,
    })
}
