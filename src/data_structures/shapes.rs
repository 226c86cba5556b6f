//! Primitive shape meshes.
//!
//! The scene is composed from a small set of unit primitives. Each primitive is
//! tessellated once into a shared vertex/index list; individually drawable
//! parts (the six sides of a box, the caps and sides of a cylinder) get their
//! own index range so they can be drawn on their own.
//!
//! Conventions, in model space:
//! - plane: XZ plane from -1 to 1, facing +Y
//! - box: unit cube centred on the origin
//! - sphere: radius 1, centred on the origin
//! - half sphere: upper half of the sphere, closed by a disk at y = 0
//! - cylinder: radius 1 from y = 0 to y = 1
//! - tapered cylinder: radius 1 at y = 0, radius 0.5 at y = 1
//! - torus: ring of radius 1 in the XY plane, tube radius 0.2
//!
//! Texture coordinates follow the bottom-left origin convention (`v = 1` is
//! the top of an image), matching textures uploaded bottom-up.

use std::{
    collections::{HashMap, HashSet},
    f32::consts::{FRAC_PI_2, PI, TAU},
    ops::Range,
};

const SPHERE_SEGMENTS: u32 = 36;
const SPHERE_RINGS: u32 = 18;
const CYLINDER_SEGMENTS: u32 = 36;
const TORUS_MAIN_SEGMENTS: u32 = 48;
const TORUS_TUBE_SEGMENTS: u32 = 16;
const TORUS_MAIN_RADIUS: f32 = 1.0;
const TORUS_TUBE_RADIUS: f32 = 0.2;
const TAPERED_TOP_RADIUS: f32 = 0.5;

/// Vertex buffer layouts for the shapes' vertex types.
pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShapeVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl Vertex for ShapeVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<ShapeVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// The primitive meshes the library can tessellate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Plane,
    Box,
    Sphere,
    HalfSphere,
    Cylinder,
    TaperedCylinder,
    Torus,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoxSide {
    Back,
    Bottom,
    Left,
    Right,
    Top,
    Front,
}

impl BoxSide {
    pub const ALL: [BoxSide; 6] = [
        BoxSide::Back,
        BoxSide::Bottom,
        BoxSide::Left,
        BoxSide::Right,
        BoxSide::Top,
        BoxSide::Front,
    ];
}

/// Which parts of a (tapered) cylinder to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CylinderParts {
    pub top: bool,
    pub bottom: bool,
    pub sides: bool,
}

impl CylinderParts {
    pub const ALL: CylinderParts = CylinderParts {
        top: true,
        bottom: true,
        sides: true,
    };
}

impl Default for CylinderParts {
    fn default() -> Self {
        Self::ALL
    }
}

/// A draw request for one primitive or part of one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Plane,
    Box,
    BoxSide(BoxSide),
    Sphere,
    HalfSphere,
    Cylinder(CylinderParts),
    TaperedCylinder,
    Torus,
}

impl Shape {
    pub fn cylinder() -> Self {
        Shape::Cylinder(CylinderParts::ALL)
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Plane => ShapeKind::Plane,
            Shape::Box | Shape::BoxSide(_) => ShapeKind::Box,
            Shape::Sphere => ShapeKind::Sphere,
            Shape::HalfSphere => ShapeKind::HalfSphere,
            Shape::Cylinder(_) => ShapeKind::Cylinder,
            Shape::TaperedCylinder => ShapeKind::TaperedCylinder,
            Shape::Torus => ShapeKind::Torus,
        }
    }

    fn parts(&self) -> Vec<Part> {
        match self {
            Shape::Plane | Shape::Sphere | Shape::Torus => vec![Part::Whole],
            Shape::Box => BoxSide::ALL.iter().map(|side| Part::Side(*side)).collect(),
            Shape::BoxSide(side) => vec![Part::Side(*side)],
            Shape::HalfSphere => vec![Part::Dome, Part::Bottom],
            Shape::TaperedCylinder => vec![Part::Top, Part::Bottom, Part::Sides],
            Shape::Cylinder(parts) => {
                let mut selected = Vec::new();
                if parts.top {
                    selected.push(Part::Top);
                }
                if parts.bottom {
                    selected.push(Part::Bottom);
                }
                if parts.sides {
                    selected.push(Part::Sides);
                }
                selected
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Part {
    Whole,
    Side(BoxSide),
    Dome,
    Top,
    Bottom,
    Sides,
}

/// A contiguous run of indices in the library's index list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawRange {
    pub first_index: u32,
    pub index_count: u32,
}

impl DrawRange {
    pub fn range(&self) -> Range<u32> {
        self.first_index..self.first_index + self.index_count
    }
}

/// Tessellated primitives sharing one vertex and one index list.
///
/// Indices are absolute, so a whole library can be uploaded as a single pair
/// of buffers and every part drawn with a base vertex of 0.
#[derive(Debug, Default)]
pub struct ShapeLibrary {
    vertices: Vec<ShapeVertex>,
    indices: Vec<u32>,
    parts: HashMap<(ShapeKind, Part), DrawRange>,
    loaded: HashSet<ShapeKind>,
}

impl ShapeLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tessellate a primitive. Loading the same kind twice is a no-op.
    pub fn load(&mut self, kind: ShapeKind) {
        if !self.loaded.insert(kind) {
            return;
        }
        match kind {
            ShapeKind::Plane => {
                let mesh = plane();
                self.append(kind, Part::Whole, mesh);
            }
            ShapeKind::Box => {
                for side in BoxSide::ALL {
                    self.append(kind, Part::Side(side), box_side(side));
                }
            }
            ShapeKind::Sphere => {
                let mesh = sphere(PI);
                self.append(kind, Part::Whole, mesh);
            }
            ShapeKind::HalfSphere => {
                self.append(kind, Part::Dome, sphere(FRAC_PI_2));
                self.append(kind, Part::Bottom, disk(0.0, 1.0, false));
            }
            ShapeKind::Cylinder => {
                self.append(kind, Part::Top, disk(1.0, 1.0, true));
                self.append(kind, Part::Bottom, disk(0.0, 1.0, false));
                self.append(kind, Part::Sides, frustum_sides(1.0, 1.0));
            }
            ShapeKind::TaperedCylinder => {
                self.append(kind, Part::Top, disk(1.0, TAPERED_TOP_RADIUS, true));
                self.append(kind, Part::Bottom, disk(0.0, 1.0, false));
                self.append(kind, Part::Sides, frustum_sides(1.0, TAPERED_TOP_RADIUS));
            }
            ShapeKind::Torus => {
                let mesh = torus();
                self.append(kind, Part::Whole, mesh);
            }
        }
        log::debug!(
            "loaded {:?} mesh, library now holds {} vertices",
            kind,
            self.vertices.len()
        );
    }

    pub fn is_loaded(&self, kind: ShapeKind) -> bool {
        self.loaded.contains(&kind)
    }

    /// Index ranges to draw for `shape`, or `None` if its kind was never loaded.
    pub fn ranges(&self, shape: Shape) -> Option<Vec<DrawRange>> {
        let kind = shape.kind();
        if !self.is_loaded(kind) {
            return None;
        }
        shape
            .parts()
            .into_iter()
            .map(|part| self.parts.get(&(kind, part)).copied())
            .collect()
    }

    pub fn vertices(&self) -> &[ShapeVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    fn append(&mut self, kind: ShapeKind, part: Part, mesh: MeshData) {
        let base = self.vertices.len() as u32;
        let first_index = self.indices.len() as u32;
        self.vertices.extend(mesh.vertices);
        self.indices
            .extend(mesh.indices.into_iter().map(|index| index + base));
        let index_count = self.indices.len() as u32 - first_index;
        self.parts.insert(
            (kind, part),
            DrawRange {
                first_index,
                index_count,
            },
        );
    }
}

/// Vertices and triangle-list indices local to one part.
struct MeshData {
    vertices: Vec<ShapeVertex>,
    indices: Vec<u32>,
}

fn vertex(position: [f32; 3], normal: [f32; 3], tex_coords: [f32; 2]) -> ShapeVertex {
    ShapeVertex {
        position,
        normal,
        tex_coords,
    }
}

/// Two triangles over four corners given counter-clockwise as seen from the front.
fn quad(corners: [[f32; 3]; 4], normal: [f32; 3]) -> MeshData {
    let tex_coords = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
    let vertices = corners
        .into_iter()
        .zip(tex_coords)
        .map(|(position, uv)| vertex(position, normal, uv))
        .collect();
    MeshData {
        vertices,
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

fn plane() -> MeshData {
    quad(
        [
            [-1.0, 0.0, 1.0],
            [1.0, 0.0, 1.0],
            [1.0, 0.0, -1.0],
            [-1.0, 0.0, -1.0],
        ],
        [0.0, 1.0, 0.0],
    )
}

fn box_side(side: BoxSide) -> MeshData {
    let h = 0.5;
    match side {
        BoxSide::Front => quad(
            [[-h, -h, h], [h, -h, h], [h, h, h], [-h, h, h]],
            [0.0, 0.0, 1.0],
        ),
        BoxSide::Back => quad(
            [[h, -h, -h], [-h, -h, -h], [-h, h, -h], [h, h, -h]],
            [0.0, 0.0, -1.0],
        ),
        BoxSide::Right => quad(
            [[h, -h, h], [h, -h, -h], [h, h, -h], [h, h, h]],
            [1.0, 0.0, 0.0],
        ),
        BoxSide::Left => quad(
            [[-h, -h, -h], [-h, -h, h], [-h, h, h], [-h, h, -h]],
            [-1.0, 0.0, 0.0],
        ),
        BoxSide::Top => quad(
            [[-h, h, h], [h, h, h], [h, h, -h], [-h, h, -h]],
            [0.0, 1.0, 0.0],
        ),
        BoxSide::Bottom => quad(
            [[-h, -h, -h], [h, -h, -h], [h, -h, h], [-h, -h, h]],
            [0.0, -1.0, 0.0],
        ),
    }
}

/// Unit sphere from the north pole down to polar angle `max_phi`.
fn sphere(max_phi: f32) -> MeshData {
    let rings = if max_phi < PI {
        SPHERE_RINGS / 2
    } else {
        SPHERE_RINGS
    };
    let segments = SPHERE_SEGMENTS;

    let mut vertices = Vec::with_capacity(((rings + 1) * (segments + 1)) as usize);
    for ring in 0..=rings {
        let phi = max_phi * (ring as f32 / rings as f32);
        let y = phi.cos();
        let ring_radius = phi.sin();
        for segment in 0..=segments {
            let theta = TAU * (segment as f32 / segments as f32);
            let x = ring_radius * theta.cos();
            let z = ring_radius * theta.sin();
            vertices.push(vertex(
                [x, y, z],
                [x, y, z],
                [
                    segment as f32 / segments as f32,
                    1.0 - phi / PI,
                ],
            ));
        }
    }

    MeshData {
        vertices,
        indices: grid_indices(rings, segments),
    }
}

/// Disk of `radius` at height `y`, facing +Y when `up` and -Y otherwise.
fn disk(y: f32, radius: f32, up: bool) -> MeshData {
    let segments = CYLINDER_SEGMENTS;
    let normal = if up { [0.0, 1.0, 0.0] } else { [0.0, -1.0, 0.0] };

    let mut vertices = Vec::with_capacity(segments as usize + 2);
    vertices.push(vertex([0.0, y, 0.0], normal, [0.5, 0.5]));
    for segment in 0..=segments {
        let theta = TAU * (segment as f32 / segments as f32);
        let (sin, cos) = theta.sin_cos();
        vertices.push(vertex(
            [radius * cos, y, radius * sin],
            normal,
            [0.5 + 0.5 * cos, 0.5 + 0.5 * sin],
        ));
    }

    let mut indices = Vec::with_capacity(segments as usize * 3);
    for segment in 1..=segments {
        if up {
            indices.extend([0, segment + 1, segment]);
        } else {
            indices.extend([0, segment, segment + 1]);
        }
    }
    MeshData { vertices, indices }
}

/// Open side wall from radius `bottom_radius` at y = 0 to `top_radius` at y = 1.
fn frustum_sides(bottom_radius: f32, top_radius: f32) -> MeshData {
    let segments = CYLINDER_SEGMENTS;
    // slope of the wall, pushes the normals up when the top is narrower
    let rise = bottom_radius - top_radius;

    let mut vertices = Vec::with_capacity((segments as usize + 1) * 2);
    for segment in 0..=segments {
        let u = segment as f32 / segments as f32;
        let (sin, cos) = (TAU * u).sin_cos();
        let length = (1.0 + rise * rise).sqrt();
        let normal = [cos / length, rise / length, sin / length];
        vertices.push(vertex(
            [bottom_radius * cos, 0.0, bottom_radius * sin],
            normal,
            [u, 0.0],
        ));
        vertices.push(vertex(
            [top_radius * cos, 1.0, top_radius * sin],
            normal,
            [u, 1.0],
        ));
    }

    let mut indices = Vec::with_capacity(segments as usize * 6);
    for segment in 0..segments {
        let bottom = segment * 2;
        let top = bottom + 1;
        let next_bottom = bottom + 2;
        let next_top = bottom + 3;
        indices.extend([bottom, top, next_bottom, next_bottom, top, next_top]);
    }
    MeshData { vertices, indices }
}

fn torus() -> MeshData {
    let main_segments = TORUS_MAIN_SEGMENTS;
    let tube_segments = TORUS_TUBE_SEGMENTS;

    let mut vertices = Vec::with_capacity(((main_segments + 1) * (tube_segments + 1)) as usize);
    for main in 0..=main_segments {
        let u = main as f32 / main_segments as f32;
        let (sin_u, cos_u) = (TAU * u).sin_cos();
        for tube in 0..=tube_segments {
            let v = tube as f32 / tube_segments as f32;
            let (sin_v, cos_v) = (TAU * v).sin_cos();
            let ring = TORUS_MAIN_RADIUS + TORUS_TUBE_RADIUS * cos_v;
            vertices.push(vertex(
                [ring * cos_u, ring * sin_u, TORUS_TUBE_RADIUS * sin_v],
                [cos_v * cos_u, cos_v * sin_u, sin_v],
                [u, v],
            ));
        }
    }

    let columns = tube_segments + 1;
    let mut indices = Vec::with_capacity((main_segments * tube_segments * 6) as usize);
    for main in 0..main_segments {
        for tube in 0..tube_segments {
            let a = main * columns + tube;
            let b = a + columns;
            let c = a + 1;
            let d = b + 1;
            indices.extend([a, b, c, b, d, c]);
        }
    }
    MeshData { vertices, indices }
}

/// Triangles for a (rows + 1) x (columns + 1) vertex grid laid out row by row.
fn grid_indices(rows: u32, columns: u32) -> Vec<u32> {
    let stride = columns + 1;
    let mut indices = Vec::with_capacity((rows * columns * 6) as usize);
    for row in 0..rows {
        for column in 0..columns {
            let current = row * stride + column;
            let next = current + stride;
            indices.extend([current, current + 1, next, current + 1, next + 1, next]);
        }
    }
    indices
}
