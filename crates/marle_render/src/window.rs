//! Window management
//!
//! Cross-platform window creation via winit. The engine owns iteration, so
//! the event loop is pumped once per frame instead of handed control.

use crate::backend::GraphicsContext;
use crate::error::RenderError;
use crate::input::InputTranslator;
use marle_core::event::WindowCloseEvent;
use marle_core::{EngineError, Event, NativeHandle, Platform, WindowProps};
use std::sync::Arc;
use std::time::Duration;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::{Window, WindowId},
};

/// Pumps allowed for the OS to deliver `resumed` during startup
const STARTUP_PUMPS: usize = 16;

/// Create window attributes from props
pub fn window_attributes(props: &WindowProps) -> winit::window::WindowAttributes {
    Window::default_attributes()
        .with_title(props.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(props.width, props.height))
}

#[derive(Default)]
struct WindowState {
    props: WindowProps,
    window: Option<Arc<Window>>,
    create_error: Option<RenderError>,
    translator: InputTranslator,
    /// Events that arrived before the engine started pumping
    pending: Vec<Event>,
}

/// Borrowed view handed to winit for the duration of one pump
struct PumpHandler<'a, S: FnMut(Event) + ?Sized> {
    state: &'a mut WindowState,
    graphics: Option<&'a mut GraphicsContext>,
    sink: &'a mut S,
}

impl<S: FnMut(Event) + ?Sized> ApplicationHandler for PumpHandler<'_, S> {
    // winit 0.30+ only allows window creation once the loop is resumed
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.window.is_some() || self.state.create_error.is_some() {
            return;
        }
        match event_loop.create_window(window_attributes(&self.state.props)) {
            Ok(window) => {
                tracing::info!(
                    title = %self.state.props.title,
                    width = self.state.props.width,
                    height = self.state.props.height,
                    "window created"
                );
                self.state.window = Some(Arc::new(window));
            }
            Err(err) => self.state.create_error = Some(err.into()),
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if let (WindowEvent::Resized(size), Some(graphics)) = (&event, self.graphics.as_deref_mut()) {
            graphics.resize(size.width, size.height);
        }
        self.state.translator.translate(&event, &mut &mut *self.sink);
    }
}

/// Desktop [`Platform`] backed by winit and wgpu
#[derive(Default)]
pub struct WinitPlatform {
    event_loop: Option<EventLoop<()>>,
    state: WindowState,
    graphics: Option<GraphicsContext>,
}

impl WinitPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn window(&self) -> Option<&Arc<Window>> {
        self.state.window.as_ref()
    }

    pub fn graphics(&self) -> Option<&GraphicsContext> {
        self.graphics.as_ref()
    }

    pub fn graphics_mut(&mut self) -> Result<&mut GraphicsContext, RenderError> {
        self.graphics
            .as_mut()
            .ok_or(RenderError::NotInitialized("graphics context"))
    }

    fn open(&mut self, props: &WindowProps) -> Result<(), RenderError> {
        let mut event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);
        self.state.props = props.clone();

        let mut buffered = Vec::new();
        for _ in 0..STARTUP_PUMPS {
            let mut sink = |event: Event| buffered.push(event);
            let mut handler = PumpHandler {
                state: &mut self.state,
                graphics: None,
                sink: &mut sink,
            };
            let status = event_loop.pump_app_events(Some(Duration::ZERO), &mut handler);

            if let Some(err) = self.state.create_error.take() {
                return Err(err);
            }
            if self.state.window.is_some() {
                break;
            }
            if let PumpStatus::Exit(_) = status {
                return Err(RenderError::NoWindow);
            }
        }

        if self.state.window.is_none() {
            return Err(RenderError::NoWindow);
        }
        self.state.pending = buffered;
        self.event_loop = Some(event_loop);
        Ok(())
    }
}

impl Platform for WinitPlatform {
    fn init_window(&mut self, props: &WindowProps) -> Result<(), EngineError> {
        self.open(props)
            .map_err(|err| EngineError::WindowCreation(err.to_string()))
    }

    fn init_graphics(&mut self) -> Result<(), EngineError> {
        let window = self
            .state
            .window
            .clone()
            .ok_or_else(|| EngineError::GraphicsInit(RenderError::NoWindow.to_string()))?;
        let graphics =
            GraphicsContext::new(window).map_err(|err| EngineError::GraphicsInit(err.to_string()))?;
        self.graphics = Some(graphics);
        Ok(())
    }

    fn pump_events(&mut self, sink: &mut dyn FnMut(Event)) {
        for event in self.state.pending.drain(..) {
            sink(event);
        }
        let Some(event_loop) = self.event_loop.as_mut() else {
            return;
        };

        let mut handler = PumpHandler {
            state: &mut self.state,
            graphics: self.graphics.as_mut(),
            sink: &mut *sink,
        };
        if let PumpStatus::Exit(code) = event_loop.pump_app_events(Some(Duration::ZERO), &mut handler) {
            tracing::debug!(code, "event loop exited");
            sink(WindowCloseEvent.into());
        }
    }

    fn shutdown_graphics(&mut self) {
        if self.graphics.take().is_some() {
            tracing::debug!("graphics context released");
        }
    }

    fn shutdown_window(&mut self) {
        self.state.window = None;
        self.state.pending.clear();
        self.event_loop = None;
        tracing::debug!("window closed");
    }

    // winit's window id, an identity rather than a raw OS handle
    fn native_handle(&self) -> Option<NativeHandle> {
        self.state
            .window
            .as_ref()
            .map(|window| NativeHandle::from_raw(u64::from(window.id())))
    }
}
