//! Windowed application
//!
//! Creates the window and surface, seeds the simulation, and drives one
//! [`LifeSimulation::frame`] per redraw until the window is closed or Escape
//! is pressed. GPU resources are released before the event loop exits.

use std::sync::Arc;

use rand::{rngs::StdRng, SeedableRng};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes},
};

use crate::config::LifeConfig;
use crate::error::{LifeError, LifeResult};
use crate::gfx::GpuContext;
use crate::performance::FrameTimer;
use crate::simulation::{CellGrid, LifeSimulation};

pub struct LifeApp {
    event_loop: EventLoop<()>,
    app_state: AppState,
}

struct AppState {
    config: LifeConfig,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    surface_config: Option<wgpu::SurfaceConfiguration>,
    gpu: Option<GpuContext>,
    simulation: Option<LifeSimulation>,
    timer: FrameTimer,
    fatal: Option<LifeError>,
}

impl LifeApp {
    /// Validates the configuration and creates the event loop.
    ///
    /// No GPU resource exists until the window is created in `resumed`.
    pub fn new(config: LifeConfig) -> LifeResult<Self> {
        config.validate()?;
        let event_loop = EventLoop::new().map_err(|e| LifeError::window(e.to_string()))?;
        let timer = FrameTimer::new(config.fps, config.fps_display_interval);

        Ok(Self {
            event_loop,
            app_state: AppState {
                config,
                window: None,
                surface: None,
                surface_config: None,
                gpu: None,
                simulation: None,
                timer,
                fatal: None,
            },
        })
    }

    /// Run the application until quit (consumes self and starts the event loop)
    pub fn run(mut self) -> LifeResult<()> {
        self.event_loop.set_control_flow(ControlFlow::Poll);
        self.event_loop
            .run_app(&mut self.app_state)
            .map_err(|e| LifeError::window(e.to_string()))?;

        match self.app_state.fatal.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn init(&mut self, event_loop: &ActiveEventLoop) -> LifeResult<()> {
        let attributes = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ))
            .with_resizable(false);
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .map_err(|e| LifeError::window(e.to_string()))?,
        );

        let instance = GpuContext::create_instance();
        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| LifeError::Surface(e.to_string()))?;
        let gpu = pollster::block_on(GpuContext::request(instance, Some(&surface)))?;

        let capabilities = surface.get_capabilities(&gpu.adapter);
        let format = capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| capabilities.formats.first().copied())
            .ok_or_else(|| LifeError::Surface("surface reports no formats".to_string()))?;

        let (width, height) = window.inner_size().into();
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoNoVsync, // FrameTimer does the pacing
            alpha_mode: capabilities.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&gpu.device, &surface_config);

        let seed = match self.config.seed {
            Some(seed) => CellGrid::random(
                self.config.sim_width,
                self.config.sim_height,
                &mut StdRng::seed_from_u64(seed),
            ),
            None => CellGrid::random(
                self.config.sim_width,
                self.config.sim_height,
                &mut rand::rng(),
            ),
        };

        let mut simulation = LifeSimulation::new(
            gpu.device.clone(),
            gpu.queue.clone(),
            &self.config,
            format,
            &seed,
        )?;
        simulation.resize(width, height);

        // Show the dead colour instead of an uninitialised window
        if let Ok(frame) = surface.get_current_texture() {
            let view = frame
                .texture
                .create_view(&wgpu::TextureViewDescriptor::default());
            simulation.clear(&view);
            frame.present();
        }

        self.window = Some(window);
        self.surface = Some(surface);
        self.surface_config = Some(surface_config);
        self.gpu = Some(gpu);
        self.simulation = Some(simulation);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(surface), Some(simulation), Some(gpu)) = (
            self.surface.as_ref(),
            self.simulation.as_mut(),
            self.gpu.as_ref(),
        ) else {
            return;
        };

        let frame = match surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Outdated) => {
                if let Some(config) = self.surface_config.as_ref() {
                    surface.configure(&gpu.device, config);
                }
                return;
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface timeout, skipping frame");
                return;
            }
            Err(e) => {
                self.fail(event_loop, LifeError::Surface(e.to_string()));
                return;
            }
        };

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        simulation.frame(&view);
        frame.present();

        if let Some(rate) = self.timer.tick() {
            if let Some(window) = self.window.as_ref() {
                window.set_title(&format!("{}: {:.0}", self.config.title, rate));
            }
        }
        self.timer.pace();
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if let (Some(surface), Some(config), Some(gpu)) = (
            self.surface.as_ref(),
            self.surface_config.as_mut(),
            self.gpu.as_ref(),
        ) {
            config.width = width;
            config.height = height;
            surface.configure(&gpu.device, config);
        }
        if let Some(simulation) = self.simulation.as_mut() {
            simulation.resize(width, height);
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: LifeError) {
        log::error!("{}", error);
        self.fatal = Some(error);
        self.shutdown(event_loop);
    }

    /// Releases GPU resources in dependency order, then stops the loop
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.simulation = None;
        self.surface = None;
        self.surface_config = None;
        self.gpu = None;
        event_loop.exit();
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(error) = self.init(event_loop) {
            self.fail(event_loop, error);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    winit::event::KeyEvent {
                        physical_key: winit::keyboard::PhysicalKey::Code(key_code),
                        ..
                    },
                ..
            } => {
                if matches!(key_code, winit::keyboard::KeyCode::Escape) {
                    self.shutdown(event_loop);
                }
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.resize(width, height);
            }
            WindowEvent::CloseRequested => {
                self.shutdown(event_loop);
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
