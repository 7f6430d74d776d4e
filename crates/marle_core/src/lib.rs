//! Marle Engine Core
//!
//! Contains the runtime skeleton every application plugs into:
//! - Typed events and single-dispatch routing
//! - Fixed-timestep run loop with render interpolation
//! - Application host with scoped platform lifecycle
//! - Configuration and error types

pub mod application;
pub mod config;
pub mod error;
pub mod event;
pub mod input;
pub mod run_loop;
pub mod time;

pub use application::{Application, Context, Engine, NativeHandle, Platform};
pub use config::{EngineConfig, WindowProps};
pub use error::{BoxError, EngineError, FramePhase};
pub use event::{Event, EventCategory, EventDispatcher, EventType};
pub use run_loop::{FrameReport, LoopControl, LoopState, RunLoop};

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
