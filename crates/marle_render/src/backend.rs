//! Rendering backend
//!
//! wgpu picks the native API per platform; the context only owns the
//! surface, device and queue and knows how to clear and present a frame.

use crate::error::RenderError;
use std::sync::Arc;
use winit::window::Window;

/// Rendering backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    /// Metal (macOS, iOS)
    Metal,
    /// DirectX 12 (Windows)
    DirectX12,
    /// Vulkan (cross-platform)
    Vulkan,
    /// OpenGL (cross-platform, fallback)
    OpenGL,
    /// WebGPU (web)
    WebGpu,
    /// No real backend (testing)
    Empty,
}

impl From<wgpu::Backend> for BackendType {
    fn from(backend: wgpu::Backend) -> Self {
        match backend {
            wgpu::Backend::Metal => BackendType::Metal,
            wgpu::Backend::Dx12 => BackendType::DirectX12,
            wgpu::Backend::Vulkan => BackendType::Vulkan,
            wgpu::Backend::Gl => BackendType::OpenGL,
            wgpu::Backend::BrowserWebGpu => BackendType::WebGpu,
            wgpu::Backend::Empty => BackendType::Empty,
        }
    }
}

/// Capability probe result
#[derive(Debug, Clone)]
pub struct DeviceCapabilities {
    pub backend: BackendType,
    pub adapter_name: String,
    pub max_texture_size: u32,
    pub supports_compute: bool,
}

impl DeviceCapabilities {
    fn probe(adapter: &wgpu::Adapter) -> Self {
        let info = adapter.get_info();
        Self {
            backend: info.backend.into(),
            adapter_name: info.name,
            max_texture_size: adapter.limits().max_texture_dimension_2d,
            supports_compute: adapter
                .get_downlevel_capabilities()
                .flags
                .contains(wgpu::DownlevelFlags::COMPUTE_SHADERS),
        }
    }
}

/// Linear RGBA clear color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl ClearColor {
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Component-wise blend, `t = 0` gives `self`
    pub fn lerp(self, other: ClearColor, t: f64) -> ClearColor {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        ClearColor {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

impl From<ClearColor> for wgpu::Color {
    fn from(c: ClearColor) -> Self {
        wgpu::Color {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

pub struct GraphicsContext {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    capabilities: DeviceCapabilities,
}

impl GraphicsContext {
    pub fn new(window: Arc<Window>) -> Result<Self, RenderError> {
        pollster::block_on(Self::new_async(window))
    }

    async fn new_async(window: Arc<Window>) -> Result<Self, RenderError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RenderError::NoAdapter)?;

        let capabilities = DeviceCapabilities::probe(&adapter);
        tracing::info!(
            backend = ?capabilities.backend,
            adapter = %capabilities.adapter_name,
            max_texture_size = capabilities.max_texture_size,
            compute = capabilities.supports_compute,
            "graphics adapter selected"
        );

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Marle Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or(RenderError::NoSurfaceFormat)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            capabilities,
        })
    }

    pub fn capabilities(&self) -> &DeviceCapabilities {
        &self.capabilities
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Reconfigure the surface. Zero sizes (minimized windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Clear the surface to `color` and present it.
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped.
    pub fn clear(&mut self, color: ClearColor) -> Result<(), RenderError> {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::debug!("surface lost, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                tracing::warn!("surface frame timed out, skipping");
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Clear Encoder"),
            });

        {
            let _pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Clear Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(color.into()),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
