//! still-life
//!
//! Renders a static kitchen counter still life: a potted plant, a wall clock
//! and two salt shakers on a black tray in front of a tiled wall. The scene is
//! described as a fixed list of draw calls over a handful of primitive shapes,
//! shaded with Phong lighting from one directional and several point lights.
//!
//! High-level modules
//! - `camera`: fixed camera, projection and their uniform
//! - `config`: window and asset settings
//! - `context`: central GPU and window context that owns device/queue/renderer
//! - `data_structures`: primitive shape meshes and GPU textures
//! - `flow`: event loop and headless rendering
//! - `pipelines`: the opaque and transparent scene pipelines and their uniforms
//! - `render`: the uniform/draw seam between scene logic and the GPU
//! - `renderer`: turns recorded draws into render passes
//! - `resources`: helpers to load images and create GPU buffers
//! - `scene`: texture and material registries, lights and the draw list
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod pipelines;
pub mod render;
pub mod renderer;
pub mod resources;
pub mod scene;

// Re-exports commonly used types for convenience in downstream code.
pub use config::SceneConfig;
pub use flow::{render_offscreen, run};
pub use render::{FrameRecorder, MeshDrawer, UniformSink};
pub use scene::SceneManager;
