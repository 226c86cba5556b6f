//! Application event loop.
//!
//! Opens the window, prepares the scene once the GPU is ready and redraws the
//! still life whenever winit asks for it. The scene is static, so the only
//! events handled are resizes, redraws and closing the window.
//!
//! # Lifecycle
//!
//! 1. `resumed`: create the window and GPU context, load textures, materials,
//!    lights and meshes
//! 2. `RedrawRequested`: replay the draw list into a [`FrameRecorder`] and
//!    render it
//! 3. `CloseRequested`: release the textures and leave the loop
//!
//! [`render_offscreen`] runs the same preparation and replay without a window
//! and reads the frame back into an image.

use std::{iter, sync::Arc, time::Duration};

use anyhow::Context as _;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

use crate::{
    config::SceneConfig,
    context::{self, Context},
    data_structures::texture::{SceneTexture, Texture},
    render::FrameRecorder,
    renderer::Renderer,
    scene::SceneManager,
};

/// Application state bundle: GPU context, the prepared scene and surface status.
#[derive(Debug)]
pub struct AppState {
    pub(crate) ctx: Context,
    scene: SceneManager<SceneTexture>,
    recorder: FrameRecorder,
    is_surface_configured: bool,
}

impl AppState {
    async fn new(window: Arc<Window>, config: &SceneConfig) -> anyhow::Result<Self> {
        let mut ctx = Context::new(window, config).await?;
        let scene = prepare(&mut ctx.renderer, &ctx.device, &ctx.queue, config);
        Ok(Self {
            ctx,
            scene,
            recorder: FrameRecorder::new(),
            is_surface_configured: false,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.ctx.resize(width, height) {
            self.is_surface_configured = true;
        }
    }

    fn render(&mut self, clear_colour: wgpu::Color) -> Result<(), wgpu::SurfaceError> {
        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.recorder.begin_frame();
        self.scene.render_scene(&mut self.recorder);
        self.ctx.renderer.render(
            &self.ctx.device,
            &self.ctx.queue,
            &self.scene,
            &self.recorder,
            &view,
            &self.ctx.depth_texture.view,
            clear_colour,
        );

        output.present();
        Ok(())
    }
}

/// Load everything the scene needs and upload its meshes.
fn prepare(
    renderer: &mut Renderer,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    config: &SceneConfig,
) -> SceneManager<SceneTexture> {
    let mut scene = SceneManager::new(&config.asset_dir);
    {
        let mut uploader = renderer.texture_uploader(device, queue);
        scene.prepare_scene(&mut uploader);
    }
    renderer.upload_shapes(device, scene.shapes());
    scene
}

/// Whether `event` invalidates the last frame. The scene is static, so
/// nothing else asks for a new one.
pub fn redraws_after(event: &WindowEvent) -> bool {
    matches!(event, WindowEvent::Resized(_))
}

pub struct App {
    async_runtime: tokio::runtime::Runtime,
    config: SceneConfig,
    state: Option<AppState>,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(config: SceneConfig) -> anyhow::Result<Self> {
        let async_runtime = tokio::runtime::Runtime::new()?;
        Ok(Self {
            async_runtime,
            config,
            state: None,
            error: None,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));
        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };

        let init = AppState::new(window, &self.config);
        match self.async_runtime.block_on(init) {
            Ok(mut state) => {
                let size = state.ctx.window.inner_size();
                state.resize(size.width, size.height);
                state.ctx.window.request_redraw();
                self.state = Some(state);
            }
            Err(e) => self.fail(event_loop, e.context("cannot create the main context")),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        if redraws_after(&event) {
            state.ctx.window.request_redraw();
        }

        match event {
            WindowEvent::CloseRequested => {
                state.scene.destroy_textures();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => match state.render(self.config.clear_colour) {
                Ok(_) => (),
                // Reconfigure the surface if it's lost or outdated
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let size = state.ctx.window.inner_size();
                    state.resize(size.width, size.height);
                    state.ctx.window.request_redraw();
                }
                Err(e) => {
                    log::error!("Unable to render {}", e);
                }
            },
            _ => {}
        }
    }
}

pub fn run(config: SceneConfig) -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config)?;

    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Render one frame of the scene without a window.
///
/// The scene is prepared from `config.asset_dir` exactly as [`run`] does and
/// drawn into a `width` x `height` sRGB target that is read back row by row.
pub fn render_offscreen(
    config: &SceneConfig,
    width: u32,
    height: u32,
) -> anyhow::Result<image::RgbaImage> {
    anyhow::ensure!(width > 0 && height > 0, "cannot render a {width}x{height} image");
    let async_runtime = tokio::runtime::Runtime::new()?;
    async_runtime.block_on(render_offscreen_async(config, width, height))
}

async fn render_offscreen_async(
    config: &SceneConfig,
    width: u32,
    height: u32,
) -> anyhow::Result<image::RgbaImage> {
    const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

    let instance = context::new_instance();
    let (_adapter, device, queue) = context::request_device(&instance, None).await?;

    let mut renderer = Renderer::new(&device, &queue, FORMAT, width, height);
    let mut scene = prepare(&mut renderer, &device, &queue, config);

    let mut recorder = FrameRecorder::new();
    scene.render_scene(&mut recorder);

    let extent3d = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };
    let target = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Offscreen Output Texture"),
        size: extent3d,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: FORMAT,
        usage: wgpu::TextureUsages::COPY_SRC | wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let view = target.create_view(&wgpu::TextureViewDescriptor::default());
    let depth = Texture::create_depth_texture(&device, [width, height], "offscreen depth texture");

    renderer.render(
        &device,
        &queue,
        &scene,
        &recorder,
        &view,
        &depth.view,
        config.clear_colour,
    );

    // Copies require rows padded to 256 bytes
    let unpadded_bytes_per_row = 4 * width;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    let padded_bytes_per_row = unpadded_bytes_per_row.div_ceil(align) * align;

    let output_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        size: (padded_bytes_per_row * height) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        label: Some("Offscreen Output Buffer"),
        mapped_at_creation: false,
    });
    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("Read-back Encoder"),
    });
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            aspect: wgpu::TextureAspect::All,
            texture: &target,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &output_buffer,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded_bytes_per_row),
                rows_per_image: Some(height),
            },
        },
        extent3d,
    );
    queue.submit(iter::once(encoder.finish()));

    let pixels = {
        let (tx, rx) = futures_intrusive::channel::shared::oneshot_channel();
        let buffer_slice = output_buffer.slice(..);
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            // the receiver only goes away if mapping is abandoned
            let _ = tx.send(result);
        });
        device.poll(wgpu::PollType::Wait {
            submission_index: None,
            timeout: Some(Duration::from_secs(3)),
        })?;
        rx.receive()
            .await
            .context("the read-back buffer was never mapped")??;

        let data = buffer_slice.get_mapped_range();
        let mut pixels = Vec::with_capacity((unpadded_bytes_per_row * height) as usize);
        for row in data.chunks_exact(padded_bytes_per_row as usize) {
            pixels.extend_from_slice(&row[..unpadded_bytes_per_row as usize]);
        }
        pixels
    };
    output_buffer.unmap();

    scene.destroy_textures();

    image::RgbaImage::from_raw(width, height, pixels)
        .context("read-back buffer does not match the image size")
}
