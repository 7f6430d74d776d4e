use thiserror::Error;

/// Failures inside the windowing and graphics layer.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("event loop exited before a window was created")]
    NoWindow,

    #[error("surface creation failed: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible graphics adapter found")]
    NoAdapter,

    #[error("device request failed: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,

    #[error("frame acquisition failed: {0}")]
    Frame(#[from] wgpu::SurfaceError),

    #[error("{0} is not initialized")]
    NotInitialized(&'static str),
}
