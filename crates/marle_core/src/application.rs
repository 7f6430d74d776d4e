//! Application host and lifecycle
//!
//! [`Engine`] owns a [`Platform`] (window and graphics collaborator) and a
//! client [`Application`], brings the platform up, drives the run loop and
//! tears the platform down again. Everything the client needs is passed in
//! through [`Context`]; there is no global renderer or application state.

use crate::config::{EngineConfig, WindowProps};
use crate::error::{BoxError, EngineError, FramePhase};
use crate::event::{Event, EventDispatcher, WindowCloseEvent, WindowResizeEvent};
use crate::run_loop::{LoopContext, LoopControl, LoopHost, RunLoop};
use crate::time::{SimulationTime, SystemClock, TimeSource};

/// Opaque identity of the platform window.
///
/// A stable token naming one window for its lifetime (winit's window id
/// on desktop). Not an OS handle: it cannot be used to draw into or
/// reparent the window. The core only compares and passes it around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeHandle(u64);

impl NativeHandle {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn into_raw(self) -> u64 {
        self.0
    }
}

/// Window, graphics context and input source.
///
/// The engine calls each init at most once, and calls the matching shutdown
/// exactly once if and only if the init succeeded, graphics before window.
pub trait Platform {
    fn init_window(&mut self, props: &WindowProps) -> Result<(), EngineError>;

    fn init_graphics(&mut self) -> Result<(), EngineError>;

    /// Deliver every pending platform event to `sink`, synchronously, then
    /// return.
    fn pump_events(&mut self, sink: &mut dyn FnMut(Event));

    fn shutdown_graphics(&mut self);

    fn shutdown_window(&mut self);

    /// Identity of the open window, `None` before `init_window` succeeds.
    fn native_handle(&self) -> Option<NativeHandle> {
        None
    }
}

/// Engine services available to client hooks
pub struct Context<'a, P> {
    platform: &'a mut P,
    control: &'a mut LoopControl,
    time: &'a SimulationTime,
    config: &'a EngineConfig,
}

impl<'a, P: Platform> Context<'a, P> {
    pub fn platform(&mut self) -> &mut P {
        &mut *self.platform
    }

    pub fn config(&self) -> &EngineConfig {
        self.config
    }

    pub fn time(&self) -> &SimulationTime {
        self.time
    }

    pub fn stop(&mut self) {
        self.control.stop();
    }

    pub fn is_running(&self) -> bool {
        self.control.is_running()
    }
}

/// Client side of the engine.
pub trait Application<P: Platform> {
    /// Called once after the platform is up, before the first frame.
    #[allow(unused_variables)]
    fn on_start(&mut self, ctx: &mut Context<'_, P>) -> Result<(), BoxError> {
        Ok(())
    }

    /// Advance the simulation by exactly `fixed_delta` seconds.
    fn on_update(&mut self, ctx: &mut Context<'_, P>, fixed_delta: f64) -> Result<(), BoxError>;

    /// Draw one frame blended `alpha` of the way toward the next state.
    fn on_render(&mut self, ctx: &mut Context<'_, P>, alpha: f64) -> Result<(), BoxError>;

    /// Called for every platform event before the engine's own handling.
    /// Build an [`EventDispatcher`] to route it by type.
    #[allow(unused_variables)]
    fn on_event(&mut self, event: &mut Event, control: &mut LoopControl) {}

    /// Called once after the loop exits, before the platform is torn down.
    fn on_shutdown(&mut self) {}
}

pub struct Engine<P: Platform, A: Application<P>> {
    config: EngineConfig,
    platform: P,
    app: A,
    has_run: bool,
}

impl<P: Platform, A: Application<P>> Engine<P, A> {
    pub fn new(config: EngineConfig, platform: P, app: A) -> Self {
        Self {
            config,
            platform,
            app,
            has_run: false,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn app(&self) -> &A {
        &self.app
    }

    pub fn into_parts(self) -> (P, A) {
        (self.platform, self.app)
    }

    pub fn run(&mut self) -> Result<(), EngineError> {
        self.run_with_clock(SystemClock::new())
    }

    /// Bring the platform up, run the loop to completion, tear down.
    ///
    /// An engine runs once. Teardown happens on every exit path, including
    /// errors from client hooks and panics unwinding out of them.
    pub fn run_with_clock<C: TimeSource>(&mut self, clock: C) -> Result<(), EngineError> {
        if self.has_run {
            return Err(EngineError::AlreadyRun);
        }
        self.has_run = true;
        self.config.validate()?;

        let Engine {
            config,
            platform,
            app,
            ..
        } = self;

        let mut lifecycle = Lifecycle::new(platform);
        lifecycle.init_window(&config.window)?;
        lifecycle.init_graphics()?;

        let mut run_loop = RunLoop::with_timing(clock, config.fixed_delta, config.max_frame_time)?;
        let mut host = EngineHost {
            platform: &mut *lifecycle.platform,
            app,
            config,
        };

        let result = host
            .start(run_loop.context())
            .and_then(|()| run_loop.run(&mut host));
        host.app.on_shutdown();

        drop(lifecycle);
        result
    }
}

/// Pairs every successful init with its shutdown when dropped.
struct Lifecycle<'a, P: Platform> {
    platform: &'a mut P,
    window_up: bool,
    graphics_up: bool,
}

impl<'a, P: Platform> Lifecycle<'a, P> {
    fn new(platform: &'a mut P) -> Self {
        Self {
            platform,
            window_up: false,
            graphics_up: false,
        }
    }

    fn init_window(&mut self, props: &WindowProps) -> Result<(), EngineError> {
        tracing::info!(title = %props.title, width = props.width, height = props.height, "creating window");
        self.platform.init_window(props)?;
        self.window_up = true;
        Ok(())
    }

    fn init_graphics(&mut self) -> Result<(), EngineError> {
        tracing::info!("initializing graphics");
        self.platform.init_graphics()?;
        self.graphics_up = true;
        Ok(())
    }
}

impl<P: Platform> Drop for Lifecycle<'_, P> {
    fn drop(&mut self) {
        if std::mem::take(&mut self.graphics_up) {
            tracing::info!("shutting down graphics");
            self.platform.shutdown_graphics();
        }
        if std::mem::take(&mut self.window_up) {
            tracing::info!("shutting down window");
            self.platform.shutdown_window();
        }
    }
}

/// Adapts a client application to the run loop's host interface.
struct EngineHost<'a, P: Platform, A: Application<P>> {
    platform: &'a mut P,
    app: &'a mut A,
    config: &'a EngineConfig,
}

impl<P: Platform, A: Application<P>> EngineHost<'_, P, A> {
    fn context<'b>(&'b mut self, loop_ctx: LoopContext<'b>) -> (&'b mut A, Context<'b, P>) {
        let ctx = Context {
            platform: &mut *self.platform,
            control: loop_ctx.control,
            time: loop_ctx.time,
            config: self.config,
        };
        (&mut *self.app, ctx)
    }

    fn start(&mut self, loop_ctx: LoopContext<'_>) -> Result<(), EngineError> {
        let (app, mut ctx) = self.context(loop_ctx);
        app.on_start(&mut ctx)
            .map_err(|source| EngineError::frame(FramePhase::Start, source))
    }
}

impl<P: Platform, A: Application<P>> LoopHost for EngineHost<'_, P, A> {
    fn update(&mut self, loop_ctx: LoopContext<'_>, fixed_delta: f64) -> Result<(), EngineError> {
        let (app, mut ctx) = self.context(loop_ctx);
        app.on_update(&mut ctx, fixed_delta)
            .map_err(|source| EngineError::frame(FramePhase::Update, source))
    }

    fn render(&mut self, loop_ctx: LoopContext<'_>, alpha: f64) -> Result<(), EngineError> {
        let (app, mut ctx) = self.context(loop_ctx);
        app.on_render(&mut ctx, alpha)
            .map_err(|source| EngineError::frame(FramePhase::Render, source))
    }

    fn pump_events(&mut self, control: &mut LoopControl) {
        let app = &mut *self.app;
        self.platform
            .pump_events(&mut |mut event| handle_event::<P, A>(app, &mut event, control));
    }
}

fn handle_event<P: Platform, A: Application<P>>(app: &mut A, event: &mut Event, control: &mut LoopControl) {
    tracing::trace!(%event, "event");
    app.on_event(event, control);

    let mut dispatcher = EventDispatcher::new(event);
    dispatcher.dispatch(|_: &mut WindowCloseEvent| {
        tracing::info!("window close requested");
        control.stop();
        true
    });
    dispatcher.dispatch(|e: &mut WindowResizeEvent| {
        tracing::debug!(width = e.width(), height = e.height(), "window resized");
        false
    });
}
