/**
 * This module contains all logic for loading meshes and textures and turning them into GPU resources.
 */
pub mod mesh;
pub mod texture;
