#![allow(dead_code)]

use std::{io::Cursor, path::Path};

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use still_life::{
    render::{FrameRecorder, RecordedDraw},
    resources::texture::{DecodedImage, TextureError, TextureUploader, ensure_fits},
    scene::SceneManager,
};
use tempfile::TempDir;

/// What the fake backend remembers about an upload.
#[derive(Clone, Debug, PartialEq)]
pub struct FakeTexture {
    pub label: String,
    pub width: u32,
    pub height: u32,
    pub channels: u8,
}

/// Texture backend that keeps nothing but the metadata of each upload.
#[derive(Debug, Default)]
pub struct FakeUploader {
    pub uploads: usize,
    /// Largest side the fake device accepts; unlimited when `None`.
    pub max_dimension: Option<u32>,
}

impl FakeUploader {
    pub fn with_max_dimension(max: u32) -> Self {
        Self {
            uploads: 0,
            max_dimension: Some(max),
        }
    }
}

impl TextureUploader for FakeUploader {
    type Handle = FakeTexture;

    fn upload(&mut self, image: &DecodedImage, label: &str) -> Result<FakeTexture, TextureError> {
        if let Some(max) = self.max_dimension {
            ensure_fits(image, label, max)?;
        }
        self.uploads += 1;
        Ok(FakeTexture {
            label: label.to_string(),
            width: image.width,
            height: image.height,
            channels: image.channels,
        })
    }
}

/// A scratch asset directory, removed again when dropped.
pub struct TempAssets {
    dir: TempDir,
}

impl TempAssets {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::Builder::new()
            .prefix(&format!("still-life-{name}-"))
            .tempdir()
            .expect("create temp asset dir");
        std::fs::create_dir_all(dir.path().join("textures")).expect("create textures dir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `image` PNG-encoded to `file_name`, whatever its extension.
    /// Decoding sniffs the format from the content.
    pub fn write_image(&self, file_name: &str, image: &DynamicImage) {
        std::fs::write(self.path().join(file_name), encode_png(image)).expect("write image");
    }

    pub fn write_bytes(&self, file_name: &str, bytes: &[u8]) {
        std::fs::write(self.path().join(file_name), bytes).expect("write bytes");
    }

    /// Every image the kitchen counter scene references, each 4x2 RGB.
    pub fn with_scene_textures(self) -> Self {
        let mut written = std::collections::HashSet::new();
        for (file_name, _) in still_life::scene::SCENE_TEXTURES {
            if written.insert(file_name) {
                self.write_image(file_name, &rgb_image(4, 2, [200, 180, 160]));
            }
        }
        self
    }
}

pub fn encode_png(image: &DynamicImage) -> Vec<u8> {
    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, ImageFormat::Png)
        .expect("encode png");
    bytes.into_inner()
}

pub fn rgb_image(width: u32, height: u32, colour: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(colour)))
}

pub fn rgba_image(width: u32, height: u32, colour: [u8; 4]) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(colour)))
}

/// Prepare the scene against `assets` and record one frame.
pub fn record_frame(assets: &Path) -> (SceneManager<FakeTexture>, FrameRecorder) {
    let mut scene = SceneManager::new(assets);
    let mut uploader = FakeUploader::default();
    scene.prepare_scene(&mut uploader);
    let mut recorder = FrameRecorder::new();
    recorder.begin_frame();
    scene.render_scene(&mut recorder);
    (scene, recorder)
}

pub fn labelled<'a>(
    scene: &SceneManager<FakeTexture>,
    recorder: &'a FrameRecorder,
    label: &str,
) -> Vec<&'a RecordedDraw> {
    scene
        .layout()
        .iter()
        .zip(recorder.draws())
        .filter(|(call, _)| call.label == label)
        .map(|(_, draw)| draw)
        .collect()
}
