//! GPU device acquisition
//!
//! Wraps the wgpu instance/adapter/device/queue setup shared by the windowed
//! application and the headless test harness.

use std::sync::Arc;

use crate::error::{LifeError, LifeResult};

/// Instance, adapter, device and queue for one simulation
pub struct GpuContext {
    pub instance: wgpu::Instance,
    pub adapter: wgpu::Adapter,
    pub device: Arc<wgpu::Device>,
    pub queue: Arc<wgpu::Queue>,
}

impl GpuContext {
    /// Instance on every available backend
    pub fn create_instance() -> wgpu::Instance {
        wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        })
    }

    /// Requests an adapter (compatible with `surface` if given) and a device.
    ///
    /// # Errors
    /// [`LifeError::Adapter`] if no adapter matches, [`LifeError::Device`] if
    /// device creation fails.
    pub async fn request(
        instance: wgpu::Instance,
        surface: Option<&wgpu::Surface<'_>>,
    ) -> LifeResult<Self> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: surface,
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| LifeError::Adapter(e.to_string()))?;

        let info = adapter.get_info();
        log::info!(
            "GPU: {} ({:?}, {:?})",
            info.name,
            info.device_type,
            info.backend
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Life Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(|e| LifeError::Device(e.to_string()))?;

        Ok(Self {
            instance,
            adapter,
            device: Arc::new(device),
            queue: Arc::new(queue),
        })
    }

    /// Blocking device acquisition without a surface (tests, offscreen runs)
    pub fn headless() -> LifeResult<Self> {
        pollster::block_on(Self::request(Self::create_instance(), None))
    }

    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }

    /// Limits granted to the device
    pub fn limits(&self) -> wgpu::Limits {
        self.device.limits()
    }
}
