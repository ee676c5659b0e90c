//! Window lifecycle and thread orchestration
//!
//! Startup order: window, GPU resources, motion state, logic thread.
//! Shutdown order: stop signal, join the logic thread, release GPU
//! resources, close the window.

use std::sync::Arc;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::clock::SystemClock;
use crate::error::AppError;
use crate::frame::FrameDriver;
use crate::renderer::{LogoImage, QuadRenderState};
use crate::settings::Settings;
use crate::sim::{LogicThread, MotionState, SharedState};

/// Everything alive between `resumed` and shutdown
struct Scene {
    shared: Arc<SharedState>,
    logic: LogicThread,
    frames: FrameDriver<Pcg32>,
    renderer: QuadRenderState,
    window: Arc<Window>,
}

pub struct App {
    settings: Settings,
    scene: Option<Scene>,
    fatal: Option<AppError>,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            scene: None,
            fatal: None,
        }
    }

    fn rng(&self) -> Pcg32 {
        match self.settings.seed {
            Some(seed) => Pcg32::seed_from_u64(seed),
            None => Pcg32::from_rng(&mut rand::rng()),
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<Scene, AppError> {
        let attrs = Window::default_attributes()
            .with_title(self.settings.window_title.clone())
            .with_inner_size(PhysicalSize::new(
                self.settings.window_width,
                self.settings.window_height,
            ));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| AppError::WindowCreation(e.to_string()))?,
        );

        let logo = LogoImage::load_or_placeholder(&self.settings.texture_path);
        let renderer = pollster::block_on(QuadRenderState::new(
            Arc::clone(&window),
            &logo,
            self.settings.half_extent,
        ))?;

        let mut rng = self.rng();
        let motion = MotionState::launch(
            &mut rng,
            self.settings.min_speed..=self.settings.max_speed,
        );
        log::info!("Launching logo with velocity {:?}", motion.velocity());
        let shared = Arc::new(SharedState::new(motion));

        let logic = LogicThread::spawn(
            Arc::clone(&shared),
            SystemClock::new(),
            self.settings.logic_config(),
        )?;

        let frames = FrameDriver::new(rng, self.settings.palette(), self.settings.initial_color);

        Ok(Scene {
            shared,
            logic,
            frames,
            renderer,
            window,
        })
    }

    fn redraw(&mut self) {
        let Some(scene) = self.scene.as_mut() else {
            return;
        };

        match scene.frames.frame(&scene.shared, &mut scene.renderer) {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                scene.renderer.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }

        scene.window.request_redraw();
    }

    /// Stop the logic thread, then release GPU resources and the window
    pub fn shutdown(&mut self) {
        let Some(scene) = self.scene.take() else {
            return;
        };
        let Scene {
            logic,
            frames,
            renderer,
            window,
            ..
        } = scene;

        logic.stop();
        log::info!("Rendered {} frames", frames.frames());
        drop(renderer);
        drop(window);
    }

    /// The fatal error that ended the event loop, if any
    pub fn take_error(&mut self) -> Option<AppError> {
        self.fatal.take()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.scene.is_some() || self.fatal.is_some() {
            return;
        }

        match self.start(event_loop) {
            Ok(scene) => {
                scene.window.request_redraw();
                self.scene = Some(scene);
            }
            Err(e) => {
                log::error!("{}", e);
                self.fatal = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                {
                    event_loop.exit();
                }
            }

            WindowEvent::Resized(size) => {
                if let Some(scene) = &mut self.scene {
                    scene.renderer.resize(size.width, size.height);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(),

            _ => {}
        }
    }
}

/// Run until the window closes
pub fn run(settings: Settings) -> Result<(), AppError> {
    let event_loop = EventLoop::new()
        .map_err(|e| AppError::WindowCreation(e.to_string()))?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(settings);
    let result = event_loop.run_app(&mut app);
    app.shutdown();

    if let Some(e) = app.take_error() {
        return Err(e);
    }
    result?;
    Ok(())
}
