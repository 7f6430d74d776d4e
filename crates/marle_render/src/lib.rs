//! Marle Render System
//!
//! Desktop platform layer: winit windowing and input, wgpu graphics context.

pub mod backend;
pub mod error;
pub mod input;
pub mod window;

pub use backend::{BackendType, ClearColor, DeviceCapabilities, GraphicsContext};
pub use error::RenderError;
pub use window::WinitPlatform;

pub use wgpu;
pub use winit;
