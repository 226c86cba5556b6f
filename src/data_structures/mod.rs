//! Engine data structures: primitive meshes and textures.
//!
//! - `shapes` contains the primitive tessellators and the shared shape library
//! - `texture` contains GPU texture wrapper and creation utilities

pub mod shapes;
pub mod texture;
