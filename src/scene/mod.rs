//! Scene preparation and replay.
//!
//! [`SceneManager`] owns everything the still life needs: the texture and
//! material registries, the light setup, the shape library and the draw list.
//! [`prepare_scene`](SceneManager::prepare_scene) fills them once at startup;
//! [`render_scene`](SceneManager::render_scene) replays the draw list into a
//! uniform/draw sink every frame.
//!
//! - `layout`: the ordered draw list
//! - `lights`: directional and point lights and their GPU layout
//! - `materials`: material presets and their registry
//! - `textures`: tag to texture handle registry
//! - `transform`: scale/rotate/translate composition

pub mod layout;
pub mod lights;
pub mod materials;
pub mod textures;
pub mod transform;

use std::path::{Path, PathBuf};

use crate::{
    data_structures::shapes::{ShapeKind, ShapeLibrary},
    render::{MeshDrawer, UniformSink},
    resources::texture::{TextureError, TextureUploader, decode_image, load_binary},
    scene::{
        layout::{DrawCall, Surface},
        lights::LightSetup,
        materials::{Material, MaterialRegistry},
        textures::TextureRegistry,
        transform::Transform,
    },
};

/// Image files (relative to the asset directory) and the tags they are registered under.
pub const SCENE_TEXTURES: [(&str, &str); 11] = [
    ("textures/black_marble.jpg", "box"),
    ("textures/cement.jpg", "potBody"),
    ("textures/cement.jpg", "potRim"),
    ("textures/cement.jpg", "potSphereBottom"),
    ("textures/dirt.jpg", "potDirt"),
    ("textures/bricks_white_seamless.jpg", "backsplash"),
    ("textures/marble_light_seamless.jpg", "counter"),
    ("textures/green_texture.jpg", "stem"),
    ("textures/green_texture.jpg", "leaf"),
    ("textures/metal.jpg", "metal"),
    ("textures/plastic_dark_seamless.png", "plastic"),
];

/// Primitives the draw list uses. Only loaded shapes can be drawn.
pub const SCENE_SHAPES: [ShapeKind; 7] = [
    ShapeKind::Plane,
    ShapeKind::Sphere,
    ShapeKind::HalfSphere,
    ShapeKind::Cylinder,
    ShapeKind::Torus,
    ShapeKind::Box,
    ShapeKind::TaperedCylinder,
];

/// The still life: registries, lights, meshes and the draw list.
///
/// `H` is the texture handle of the backend the textures were uploaded to.
#[derive(Debug)]
pub struct SceneManager<H> {
    asset_dir: PathBuf,
    textures: TextureRegistry<H>,
    materials: MaterialRegistry,
    lights: LightSetup,
    shapes: ShapeLibrary,
    layout: Vec<DrawCall>,
}

impl<H> SceneManager<H> {
    pub fn new(asset_dir: impl Into<PathBuf>) -> Self {
        Self {
            asset_dir: asset_dir.into(),
            textures: TextureRegistry::new(),
            materials: MaterialRegistry::new(),
            lights: LightSetup::new(),
            shapes: ShapeLibrary::new(),
            layout: layout::kitchen_counter(),
        }
    }

    pub fn asset_dir(&self) -> &Path {
        &self.asset_dir
    }

    /// Load textures, materials, lights and meshes.
    ///
    /// Textures that fail to load are logged and skipped.
    pub fn prepare_scene<U>(&mut self, uploader: &mut U)
    where
        U: TextureUploader<Handle = H>,
    {
        let loaded = self.load_scene_textures(uploader);
        log::info!("{loaded} of {} scene textures loaded", SCENE_TEXTURES.len());
        self.define_object_materials();
        self.setup_scene_lights();
        for kind in SCENE_SHAPES {
            self.shapes.load(kind);
        }
    }

    /// Load every texture of the scene and return how many succeeded.
    pub fn load_scene_textures<U>(&mut self, uploader: &mut U) -> usize
    where
        U: TextureUploader<Handle = H>,
    {
        let mut loaded = 0;
        for (file_name, tag) in SCENE_TEXTURES {
            match self.create_texture(file_name, tag, uploader) {
                Ok(_) => loaded += 1,
                Err(e) => log::error!("skipping texture {tag}: {e}"),
            }
        }
        loaded
    }

    /// Read, decode and upload one image and register it under `tag`.
    pub fn create_texture<U>(
        &mut self,
        file_name: &str,
        tag: &str,
        uploader: &mut U,
    ) -> Result<usize, TextureError>
    where
        U: TextureUploader<Handle = H>,
    {
        if self.textures.is_full() {
            return Err(TextureError::SlotsExhausted(textures::MAX_TEXTURE_SLOTS));
        }
        let bytes = load_binary(&self.asset_dir, file_name)?;
        let image = decode_image(&bytes, file_name)?;
        log::info!(
            "Successfully loaded image: {file_name}, width: {}, height: {}, channels: {}",
            image.width,
            image.height,
            image.channels
        );
        let handle = uploader.upload(&image, tag)?;
        self.textures.register(tag, handle)
    }

    pub fn define_object_materials(&mut self) {
        for material in materials::object_materials() {
            self.materials.define(material);
        }
    }

    pub fn setup_scene_lights(&mut self) {
        self.lights = lights::scene_lights();
    }

    pub fn find_texture_id(&self, tag: &str) -> Option<&H> {
        self.textures.find_texture_id(tag)
    }

    pub fn find_texture_slot(&self, tag: &str) -> Option<usize> {
        self.textures.find_texture_slot(tag)
    }

    pub fn find_material(&self, tag: &str) -> Option<&Material> {
        self.materials.find_material(tag)
    }

    pub fn set_transformations<S: UniformSink>(&self, sink: &mut S, transform: &Transform) {
        sink.set_model(transform.to_matrix());
    }

    pub fn set_shader_color<S: UniformSink>(&self, sink: &mut S, rgba: [f32; 4]) {
        sink.set_color(rgba);
    }

    pub fn set_shader_texture<S: UniformSink>(&self, sink: &mut S, tag: &str) {
        let slot = self.find_texture_slot(tag);
        if slot.is_none() {
            log::warn!("no texture registered as {tag}");
        }
        sink.set_texture(slot);
    }

    pub fn set_texture_uv_scale<S: UniformSink>(&self, sink: &mut S, u: f32, v: f32) {
        sink.set_uv_scale(u, v);
    }

    /// Push the material registered as `tag`. Unknown tags push nothing.
    pub fn set_shader_material<S: UniformSink>(&self, sink: &mut S, tag: &str) {
        match self.find_material(tag) {
            Some(material) => sink.set_material(material),
            None => log::warn!("no material defined as {tag}"),
        }
    }

    /// Push the lights and replay the draw list.
    pub fn render_scene<S>(&self, sink: &mut S)
    where
        S: UniformSink + MeshDrawer,
    {
        sink.set_lighting(&self.lights);
        for call in &self.layout {
            if !self.shapes.is_loaded(call.shape.kind()) {
                log::warn!("{}: {:?} mesh is not loaded", call.label, call.shape.kind());
                continue;
            }
            self.set_transformations(sink, &call.transform);
            match call.surface {
                Some(Surface::Texture(tag)) => self.set_shader_texture(sink, tag),
                Some(Surface::Color(rgba)) => self.set_shader_color(sink, rgba),
                None => (),
            }
            if let Some(tag) = call.material {
                self.set_shader_material(sink, tag);
            }
            sink.draw(call.shape);
        }
    }

    /// Release every texture. Draws afterwards fall back to untextured rendering.
    pub fn destroy_textures(&mut self) {
        log::info!("releasing {} textures", self.textures.len());
        self.textures.clear();
    }

    pub fn textures(&self) -> &TextureRegistry<H> {
        &self.textures
    }

    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    pub fn lights(&self) -> &LightSetup {
        &self.lights
    }

    pub fn shapes(&self) -> &ShapeLibrary {
        &self.shapes
    }

    /// Mutable access, for loading shapes outside of [`prepare_scene`](Self::prepare_scene).
    pub fn shapes_mut(&mut self) -> &mut ShapeLibrary {
        &mut self.shapes
    }

    pub fn layout(&self) -> &[DrawCall] {
        &self.layout
    }
}
