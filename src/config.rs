use std::path::{Path, PathBuf};

/// Environment variable that overrides the asset root.
pub const ASSET_DIR_ENV: &str = "STILL_LIFE_ASSETS";

/// Asset root next to the working directory.
pub const LOCAL_ASSET_DIR: &str = "./assets";

/// Copy of `assets/` made by the build script.
pub const BUNDLED_ASSET_DIR: &str = concat!(env!("OUT_DIR"), "/assets");

/// `local` when it exists, else `bundled` when that exists, else `local`.
pub fn pick_asset_dir(local: &Path, bundled: &Path) -> PathBuf {
    if !local.is_dir() && bundled.is_dir() {
        bundled.to_path_buf()
    } else {
        local.to_path_buf()
    }
}

/// The asset root used when nothing overrides it.
pub fn default_asset_dir() -> PathBuf {
    pick_asset_dir(Path::new(LOCAL_ASSET_DIR), Path::new(BUNDLED_ASSET_DIR))
}

/// Window and asset settings of the application.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub clear_colour: wgpu::Color,
    /// Root the texture file names are resolved against.
    pub asset_dir: PathBuf,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            title: "Kitchen Counter Still Life".to_string(),
            width: 1000,
            height: 800,
            clear_colour: wgpu::Color::BLACK,
            asset_dir: default_asset_dir(),
        }
    }
}

impl SceneConfig {
    /// Defaults, with the asset root taken from `STILL_LIFE_ASSETS` when set.
    pub fn from_env() -> Self {
        let config = Self::default();
        match std::env::var_os(ASSET_DIR_ENV) {
            Some(dir) if !dir.is_empty() => config.with_asset_dir(dir),
            _ => config,
        }
    }

    pub fn with_asset_dir(mut self, asset_dir: impl Into<PathBuf>) -> Self {
        self.asset_dir = asset_dir.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_clear_colour(mut self, clear_colour: wgpu::Color) -> Self {
        self.clear_colour = clear_colour;
        self
    }
}
