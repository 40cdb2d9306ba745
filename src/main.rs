use std::sync::Arc;
use std::time::Instant;

use anyhow::Context as _;
use clap::Parser;
use glam::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

mod config;
mod error;
mod renderer;
mod terrain;
mod ui;

use config::{AppConfig, Cli};
use error::RenderError;
use renderer::{Camera, DirectionalLight, GpuGeometryStore, GpuState, TerrainBuffers};
use terrain::{GridParams, Material, TerrainMesh};
use ui::{PanelStats, UiActions, UiState, apply_theme, draw_help_overlay, draw_side_panel};

#[derive(Default)]
struct InputState {
    rotating: bool,
    panning: bool,
    mouse_delta: Vec2,
}

struct App {
    config: AppConfig,

    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    egui_state: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
    egui_ctx: egui::Context,

    camera: Camera,
    light: DirectionalLight,
    terrain: TerrainMesh<TerrainBuffers>,
    ui_state: UiState,
    input: InputState,

    frame_count: u32,
    fps_timer: Instant,
    fps: f32,

    fatal_error: Option<anyhow::Error>,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            window: None,
            gpu: None,
            egui_state: None,
            egui_renderer: None,
            egui_ctx: egui::Context::default(),

            camera: Camera::default(),
            light: DirectionalLight::default(),
            terrain: TerrainMesh::new(Material::default(), rng),
            ui_state: UiState::new(config.grid, config.vsync),
            input: InputState::default(),

            frame_count: 0,
            fps_timer: Instant::now(),
            fps: 0.0,

            fatal_error: None,
            config,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), RenderError> {
        let (width, height) = self.config.window_size;
        let window_attrs = Window::default_attributes()
            .with_title("Terrain")
            .with_inner_size(PhysicalSize::new(width, height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let gpu = pollster::block_on(GpuState::new(
            window.clone(),
            self.terrain.material(),
            &self.light,
            self.config.vsync,
        ))?;

        let egui_state = egui_winit::State::new(
            self.egui_ctx.clone(),
            self.egui_ctx.viewport_id(),
            &window,
            Some(window.scale_factor() as f32),
            None,
            Some(gpu.device.limits().max_texture_dimension_2d as usize),
        );

        let egui_renderer =
            egui_wgpu::Renderer::new(&gpu.device, gpu.config.format, None, 1, false);

        apply_theme(&self.egui_ctx);

        self.camera
            .set_aspect(gpu.viewport.width as f32, gpu.viewport.height as f32);
        self.terrain
            .rebuild(self.config.grid, &mut GpuGeometryStore::new(&gpu.device));

        tracing::info!(
            width = gpu.viewport.width,
            height = gpu.viewport.height,
            "renderer ready"
        );

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.egui_state = Some(egui_state);
        self.egui_renderer = Some(egui_renderer);

        Ok(())
    }

    /// Resizes the output surface to the new physical window size.
    fn resize(&mut self, width: u32, height: u32) {
        let Some(gpu) = &mut self.gpu else { return };

        if gpu.resize(width, height) {
            self.camera.aspect = gpu.viewport.aspect();
            tracing::debug!(width, height, "surface resized");
        }
    }

    fn rebuild_terrain(&mut self, params: GridParams) {
        let Some(gpu) = &self.gpu else { return };
        self.terrain
            .rebuild(params, &mut GpuGeometryStore::new(&gpu.device));
    }

    fn shutdown(&mut self) {
        if let Some(gpu) = &self.gpu {
            self.terrain.release(&mut GpuGeometryStore::new(&gpu.device));
        }
        tracing::info!(rebuilds = self.terrain.stats().rebuilds, "shutting down");
    }

    fn update(&mut self) {
        self.frame_count += 1;
        let elapsed = self.fps_timer.elapsed().as_secs_f32();
        if elapsed >= 1.0 {
            self.fps = self.frame_count as f32 / elapsed;
            self.frame_count = 0;
            self.fps_timer = Instant::now();
        }

        let delta = std::mem::take(&mut self.input.mouse_delta);
        if self.input.rotating {
            self.camera.rotate(delta);
        } else if self.input.panning {
            let viewport_height = self.gpu.as_ref().map_or(0, |gpu| gpu.viewport.height);
            self.camera.pan(delta, viewport_height as f32);
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let (Some(window), Some(egui_state)) = (&self.window, &mut self.egui_state) else {
            return Ok(());
        };

        let raw_input = egui_state.take_egui_input(window);

        let stats = PanelStats {
            fps: self.fps,
            mesh: self.terrain.stats(),
        };
        let distance = self.camera.distance;
        let mut ui_actions = UiActions::default();

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            ui_actions = draw_side_panel(ctx, &mut self.ui_state, &stats);
            if self.ui_state.show_help {
                draw_help_overlay(ctx, distance);
            }
        });

        self.handle_ui_actions(ui_actions);

        let Some(gpu) = &mut self.gpu else {
            return Ok(());
        };
        let Some(window) = &self.window else {
            return Ok(());
        };
        let Some(egui_state) = &mut self.egui_state else {
            return Ok(());
        };
        let Some(egui_renderer) = &mut self.egui_renderer else {
            return Ok(());
        };

        egui_state.handle_platform_output(window, full_output.platform_output);

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::warn!("surface lost, reconfiguring");
                gpu.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        gpu.update_camera(&self.camera);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, delta) in full_output.textures_delta.set {
            egui_renderer.update_texture(&gpu.device, &gpu.queue, id, &delta);
        }

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Main Encoder"),
            });

        egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        gpu.render_terrain(&view, &mut encoder, self.terrain.geometry());

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let mut render_pass = render_pass.forget_lifetime();
            egui_renderer.render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        for id in full_output.textures_delta.free {
            egui_renderer.free_texture(&id);
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        window.request_redraw();
        Ok(())
    }

    fn handle_ui_actions(&mut self, actions: UiActions) {
        if actions.rebuild {
            self.rebuild_terrain(self.ui_state.params);
        } else if actions.regenerate {
            if let Some(gpu) = &self.gpu {
                self.terrain
                    .regenerate(&mut GpuGeometryStore::new(&gpu.device));
            }
        }

        if actions.toggle_vsync {
            if let Some(gpu) = &mut self.gpu {
                gpu.set_vsync(self.ui_state.vsync_enabled);
                tracing::debug!(vsync = self.ui_state.vsync_enabled, "present mode changed");
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.init(event_loop) {
            tracing::error!("startup failed: {e}");
            self.fatal_error = Some(e.into());
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let (Some(egui_state), Some(window)) = (&mut self.egui_state, &self.window) {
            let response = egui_state.on_window_event(window, &event);
            let is_release = matches!(
                event,
                WindowEvent::MouseInput {
                    state: ElementState::Released,
                    ..
                }
            );
            if response.consumed && !is_release {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                self.shutdown();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => self.resize(size.width, size.height),

            WindowEvent::MouseInput { button, state, .. } => {
                let pressed = state == ElementState::Pressed;
                match button {
                    MouseButton::Left => self.input.rotating = pressed,
                    MouseButton::Right => self.input.panning = pressed,
                    _ => {}
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 50.0,
                };
                self.camera.zoom(scroll);
            }

            WindowEvent::RedrawRequested => {
                self.update();
                if let Err(e) = self.render() {
                    tracing::error!("frame failed: {e}");
                    self.shutdown();
                    self.fatal_error = Some(e.into());
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }

    fn device_event(&mut self, _: &ActiveEventLoop, _: winit::event::DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.input.rotating || self.input.panning {
                self.input.mouse_delta.x += delta.0 as f32;
                self.input.mouse_delta.y += delta.1 as f32;
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "debug,wgpu_core=warn,wgpu_hal=warn,naga=warn"
    } else {
        "info,wgpu_core=warn,wgpu_hal=warn,naga=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = AppConfig::try_from(&cli).context("invalid configuration")?;
    tracing::info!(?config, "terrain3d starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.fatal_error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
