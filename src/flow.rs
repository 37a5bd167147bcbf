//! Sample lifecycle and application event loop.
//!
//! A [`Sample`] is driven by the host through four calls: it is initialized
//! once by its constructor, then every frame it is updated with the elapsed
//! time and asked to render. `name()` titles the window.
//!
//! # Lifecycle
//!
//! 1. The window and the wgpu [`Context`] are created on `resumed`
//! 2. The [`SampleConstructor`] runs with an [`InitContext`] and loads its resources
//! 3. Each `RedrawRequested`: `on_update(dt)`, then `on_render` into the surface texture
//! 4. The command buffer is submitted and the frame presented

use std::{fmt::Debug, iter, pin::Pin, sync::Arc};

use instant::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use crate::{camera::SurfaceTransform, context::Context};

/// A renderable sample hosted by [`run`].
pub trait Sample {
    /// Human readable name, used as the window title.
    fn name(&self) -> &str;

    /// Called after the surface has been reconfigured to a new size.
    fn on_resize(&mut self, _ctx: &Context) {}

    /// Advance the sample by `dt`. Called once per frame before rendering.
    fn on_update(&mut self, ctx: &Context, dt: Duration);

    /// Record this frame's GPU work into `encoder`, targeting `view`.
    ///
    /// The host submits the encoder and presents afterwards.
    fn on_render(
        &self,
        ctx: &Context,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
    );
}

impl Debug for dyn Sample + 'static {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sample").field("name", &self.name()).finish()
    }
}

/// What a sample needs to create its GPU resources.
///
/// Device and queue are reference counted by wgpu, so building this from a
/// [`Context`] only clones handles.
#[derive(Clone, Debug)]
pub struct InitContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub color_format: wgpu::TextureFormat,
    pub size: (u32, u32),
    pub surface_transform: SurfaceTransform,
    pub convert_output_to_gamma: bool,
}

impl From<&Context> for InitContext {
    fn from(ctx: &Context) -> Self {
        Self {
            device: ctx.device.clone(),
            queue: ctx.queue.clone(),
            color_format: ctx.config.format,
            size: ctx.size(),
            surface_transform: ctx.surface_transform,
            convert_output_to_gamma: ctx.convert_output_to_gamma,
        }
    }
}

/// Asynchronously creates the sample once the GPU is ready.
pub type SampleConstructor =
    Box<dyn FnOnce(InitContext) -> Pin<Box<dyn Future<Output = anyhow::Result<Box<dyn Sample>>>>>>;

/// GPU context, the running sample and surface status.
#[derive(Debug)]
struct AppState {
    ctx: Context,
    sample: Box<dyn Sample>,
    is_surface_configured: bool,
}

impl AppState {
    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            log::debug!("Resizing surface to {width}x{height}");
            self.ctx.resize(width, height);
            self.is_surface_configured = true;
            self.sample.on_resize(&self.ctx);
        } else {
            log::warn!("Ignoring resize to {width}x{height}");
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        self.sample.on_render(&self.ctx, &mut encoder, &view);
        self.ctx.queue.submit(iter::once(encoder.finish()));

        output.present();
        Ok(())
    }
}

struct App {
    async_runtime: tokio::runtime::Runtime,
    state: Option<AppState>,
    // Taken on the first `resumed`
    constructor: Option<SampleConstructor>,
    last_time: Instant,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(constructor: SampleConstructor) -> anyhow::Result<Self> {
        Ok(Self {
            async_runtime: tokio::runtime::Runtime::new()?,
            state: None,
            constructor: Some(constructor),
            last_time: Instant::now(),
            error: None,
        })
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<AppState> {
        let Some(constructor) = self.constructor.take() else {
            anyhow::bail!("the sample was already constructed");
        };
        let window = Arc::new(event_loop.create_window(Window::default_attributes())?);

        let (ctx, sample) = self.async_runtime.block_on(async move {
            let ctx = Context::new(window).await?;
            let sample = constructor((&ctx).into()).await?;
            anyhow::Ok((ctx, sample))
        })?;
        ctx.window.set_title(sample.name());
        log::info!("Initialized sample '{}'", sample.name());

        let mut state = AppState {
            ctx,
            sample,
            is_surface_configured: false,
        };
        let size = state.ctx.window.inner_size();
        state.resize(size.width, size.height);
        state.ctx.window.request_redraw();
        Ok(state)
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        match self.init(event_loop) {
            Ok(state) => {
                self.last_time = Instant::now();
                self.state = Some(state);
            }
            Err(e) => {
                log::error!("Sample initialization failed: {e:#}");
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                let dt = self.last_time.elapsed();
                self.last_time = Instant::now();

                state.sample.on_update(&state.ctx, dt);
                match state.render() {
                    Ok(_) => {}
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    Err(e) => {
                        log::error!("Unable to render {}", e);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Run `constructor`'s sample until its window is closed.
pub fn run(constructor: SampleConstructor) -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let event_loop = EventLoop::new()?;
    let mut app = App::new(constructor)?;
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
