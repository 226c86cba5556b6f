//! Material presets: diffuse and specular reflectance plus a shininess
//! exponent, looked up by tag while the scene is replayed.

use cgmath::Vector3;

/// Reflectance properties pushed to the shader before a draw.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub tag: String,
    pub diffuse_color: Vector3<f32>,
    pub specular_color: Vector3<f32>,
    pub shininess: f32,
}

impl Material {
    pub fn new(tag: &str, diffuse_color: [f32; 3], specular_color: [f32; 3], shininess: f32) -> Self {
        Self {
            tag: tag.to_string(),
            diffuse_color: diffuse_color.into(),
            specular_color: specular_color.into(),
            shininess,
        }
    }
}

/// Append-only list of materials.
///
/// Tags are expected to be unique but that is not enforced: a lookup returns
/// the first material registered under the tag.
#[derive(Clone, Debug, Default)]
pub struct MaterialRegistry {
    materials: Vec<Material>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, material: Material) {
        log::debug!("defined material {}", material.tag);
        self.materials.push(material);
    }

    pub fn find_material(&self, tag: &str) -> Option<&Material> {
        self.materials.iter().find(|material| material.tag == tag)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }
}

/// The presets used by the kitchen counter scene, in definition order.
pub fn object_materials() -> Vec<Material> {
    vec![
        // plant pot
        Material::new("cement", [0.5, 0.5, 0.5], [0.4, 0.4, 0.4], 0.5),
        // backsplash
        Material::new("tile", [0.3, 0.2, 0.1], [0.4, 0.5, 0.6], 25.0),
        // black tray and countertop
        Material::new("marble", [0.6, 0.6, 0.6], [0.3, 0.4, 0.4], 28.0),
        Material::new("dirt", [0.5, 0.5, 0.5], [0.1, 0.1, 0.1], 0.3),
        Material::new("metal", [0.5, 0.4, 0.4], [0.4, 0.4, 0.4], 24.0),
        Material::new("glass", [0.9, 0.9, 0.9], [1.0, 1.0, 1.0], 95.0),
        Material::new("plastic", [0.9, 0.9, 0.9], [0.3, 0.3, 0.3], 20.0),
    ]
}
