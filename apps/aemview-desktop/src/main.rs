mod config;

use aemview_assets::{ModelBatch, TextureImage, load_models, load_textures};
use aemview_input::{Action, InputMapper, PointerButtons};
use aemview_render::{DirectionalLight, Scene, SceneTextures, SceneUniforms};
use aemview_render_wgpu::{OrbitCamera, Projection, WgpuDevice};
use anyhow::{Context, Result};
use clap::Parser;
use config::ViewerConfig;
use glam::{Mat4, Vec3};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{
    DeviceEvent, ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent,
};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "aemview-desktop", about = "Viewer for AEM model files")]
struct Cli {
    /// Model files to load, merged in the order given
    #[arg(default_value = "models/Rifle.aem")]
    models: Vec<PathBuf>,

    /// JSON viewer settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Decoded CPU-side data, dropped once the GPU copies exist.
struct LoadedAssets {
    batch: ModelBatch,
    textures: SceneTextures,
}

impl LoadedAssets {
    fn load(models: &[PathBuf], config: &ViewerConfig) -> Result<Self> {
        let batch = load_models(models).context("failed to load models")?;
        let model = load_textures(&config.textures_dir, &batch.textures)
            .context("failed to load model textures")?;
        let fallback_diffuse =
            TextureImage::open_or(config.fallback_diffuse_path(), TextureImage::fallback_diffuse)
                .context("failed to load fallback diffuse texture")?;
        let fallback_normal =
            TextureImage::open_or(config.fallback_normal_path(), TextureImage::fallback_normal)
                .context("failed to load fallback normal texture")?;
        Ok(Self {
            batch,
            textures: SceneTextures {
                model,
                fallback_diffuse,
                fallback_normal,
            },
        })
    }
}

/// Everything the viewer owns. The event loop is the only writer.
struct AppContext {
    config: ViewerConfig,
    camera: OrbitCamera,
    projection: Projection,
    light: DirectionalLight,
    input: InputMapper,
    buttons: PointerButtons,
    assets: Option<LoadedAssets>,
    window: Option<Arc<Window>>,
    device: Option<WgpuDevice>,
    scene: Option<Scene<WgpuDevice>>,
    error: Option<anyhow::Error>,
}

impl AppContext {
    fn new(config: ViewerConfig, assets: LoadedAssets) -> Self {
        let projection = Projection {
            fov_y: config.fov_y_degrees.to_radians(),
            aspect: config.window_width.max(1) as f32 / config.window_height.max(1) as f32,
            near: config.near,
            far: config.far,
        };
        Self {
            camera: OrbitCamera::new(config.camera_position, config.camera_target),
            projection,
            light: DirectionalLight::new(config.light_position),
            input: InputMapper::new(),
            buttons: PointerButtons::empty(),
            assets: Some(assets),
            window: None,
            device: None,
            scene: None,
            error: None,
            config,
        }
    }

    fn init_gpu(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title("AEM Viewer")
            .with_inner_size(PhysicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ));
        let window = Arc::new(event_loop.create_window(attrs).context("failed to create window")?);
        let size = window.inner_size();

        let mut device = WgpuDevice::new(
            window.clone(),
            size.width,
            size.height,
            self.config.clear_color,
        )
        .context("failed to initialise GPU")?;
        self.projection.resize(size.width, size.height);

        let assets = self.assets.take().context("assets already uploaded")?;
        let world = Mat4::from_scale(Vec3::splat(self.config.model_scale));
        let alignment = device.uniform_alignment();
        let scene = Scene::load(&mut device, &assets.batch, &assets.textures, alignment, world)
            .context("failed to build scene")?;

        self.window = Some(window);
        self.device = Some(device);
        self.scene = Some(scene);
        Ok(())
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Orbit { dx, dy } => self.camera.orbit(dx, dy),
            Action::Pan { dx, dy } => self.camera.pan(dx, dy),
            Action::Dolly(delta) => self.camera.dolly(delta),
            Action::OrbitLight(dx) => self.light.orbit(dx),
            Action::Noop => {}
        }
    }

    fn render(&mut self) {
        let (Some(device), Some(scene)) = (&mut self.device, &self.scene) else {
            return;
        };
        let frame = SceneUniforms::new(
            self.projection.matrix() * self.camera.view_matrix(),
            self.camera.position(),
            self.light.direction(),
        );
        scene.render(device, &frame);
    }
}

impl ApplicationHandler for AppContext {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init_gpu(event_loop) {
            tracing::error!("startup failed: {e:#}");
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(device) = &mut self.device {
                    device.resize(new_size.width, new_size.height);
                }
                self.projection.resize(new_size.width, new_size.height);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::ShiftLeft),
                        state,
                        ..
                    },
                ..
            } => {
                self.input.set_modifier(state == ElementState::Pressed);
            }
            WindowEvent::MouseInput { button, state, .. } => {
                let button = match button {
                    MouseButton::Left => PointerButtons::PRIMARY,
                    MouseButton::Right => PointerButtons::SECONDARY,
                    _ => return,
                };
                self.buttons.set(button, state == ElementState::Pressed);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32,
                };
                let action = self.input.wheel(delta);
                self.apply(action);
            }
            WindowEvent::RedrawRequested => {
                self.render();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            let action = self
                .input
                .pointer_moved(self.buttons, delta.0 as f32, delta.1 as f32);
            self.apply(action);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = match &cli.config {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    };
    tracing::info!(models = cli.models.len(), "aemview-desktop starting");

    let assets = LoadedAssets::load(&cli.models, &config)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = AppContext::new(config, assets);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
