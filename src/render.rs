use behave_core::{FieldError, FrameSink, FrameUniforms, PointCloud, CLEAR_COLOR, MSAA_SAMPLES};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use web_sys as web;

use crate::dom;

mod points;
mod targets;
use points::{create_points_resources, PointsResources};
use targets::RenderTargets;

// ===================== WebGPU state =====================

pub struct GpuState {
    canvas: web::HtmlCanvasElement,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    points: PointsResources,
    targets: RenderTargets,
    clear_color: wgpu::Color,
    width: u32,
    height: u32,
    // Set by the device-lost callback; checked at the top of every frame
    device_lost: Arc<AtomicBool>,
    released: bool,
}

impl GpuState {
    /// Acquire adapter, device and surface for `canvas`, then upload `cloud`
    /// and compile the point material. Any failure here is fatal for the mount.
    pub async fn new(
        canvas: web::HtmlCanvasElement,
        cloud: &PointCloud,
        (width, height): (u32, u32),
    ) -> Result<Self, FieldError> {
        let width = width.max(1);
        let height = height.max(1);
        dom::size_canvas(&canvas, width, height);

        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| FieldError::Surface(e.to_string()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(FieldError::NoAdapter)?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: Some("behave_device"),
                },
                None,
            )
            .await
            .map_err(|e| FieldError::Device(e.to_string()))?;

        let device_lost = Arc::new(AtomicBool::new(false));
        {
            let device_lost = device_lost.clone();
            device.set_device_lost_callback(move |reason, message| {
                // `release` destroys the device itself; that is not a failure
                if matches!(reason, wgpu::DeviceLostReason::Destroyed) {
                    log::info!("[gpu] device destroyed");
                } else {
                    log::error!("[gpu] device lost ({:?}): {}", reason, message);
                }
                device_lost.store(true, Ordering::SeqCst);
            });
        }

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Rgba8Unorm
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| FieldError::Surface("no supported surface format".into()))?;
        let alpha_mode = if caps.alpha_modes.contains(&wgpu::CompositeAlphaMode::Opaque) {
            wgpu::CompositeAlphaMode::Opaque
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let sample_count = if adapter
            .get_texture_format_features(format)
            .flags
            .sample_count_supported(MSAA_SAMPLES)
        {
            MSAA_SAMPLES
        } else {
            1
        };

        // Shader compilation and pipeline creation report through the error scope
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let points = create_points_resources(&device, format, sample_count, cloud);
        if let Some(err) = device.pop_error_scope().await {
            points.destroy();
            device.destroy();
            return Err(FieldError::Shader(err.to_string()));
        }
        let targets = RenderTargets::new(&device, format, sample_count, width, height);

        log::info!(
            "[gpu] {:?} {}x{} msaa={} instances={}",
            format,
            width,
            height,
            sample_count,
            points.instance_count
        );

        Ok(Self {
            canvas,
            surface,
            device,
            queue,
            config,
            points,
            targets,
            clear_color: wgpu::Color {
                r: CLEAR_COLOR[0],
                g: CLEAR_COLOR[1],
                b: CLEAR_COLOR[2],
                a: CLEAR_COLOR[3],
            },
            width,
            height,
            device_lost,
            released: false,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 || self.released {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            dom::size_canvas(&self.canvas, width, height);
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.targets
                .recreate(&self.device, self.config.format, width, height);
            log::info!("[gpu] resized to {}x{}", width, height);
        }
    }

    pub fn render(&mut self, uniforms: &FrameUniforms) -> Result<(), FieldError> {
        if self.released {
            return Err(FieldError::Frame("renderer released".into()));
        }
        if self.device_lost.load(Ordering::SeqCst) {
            return Err(FieldError::Device("device lost".into()));
        }
        self.queue.write_buffer(
            &self.points.uniform_buffer,
            0,
            bytemuck::bytes_of(uniforms),
        );
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Err(FieldError::Frame("surface reconfigured".into()));
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                return Err(FieldError::Device("out of memory acquiring frame".into()));
            }
            Err(e) => return Err(FieldError::Frame(e.to_string())),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let (attachment, resolve_target) = self.targets.attachment(&view);
            let store = if resolve_target.is_some() {
                wgpu::StoreOp::Discard
            } else {
                wgpu::StoreOp::Store
            };
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("points_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: attachment,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.points.pipeline);
            rpass.set_bind_group(0, &self.points.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.points.instance_buffer.slice(..));
            rpass.draw(0..6, 0..self.points.instance_count);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl FrameSink for GpuState {
    fn resize(&mut self, width: u32, height: u32) {
        self.resize_if_needed(width, height);
    }

    fn draw(&mut self, uniforms: &FrameUniforms) -> Result<(), FieldError> {
        self.render(uniforms)
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.points.destroy();
        self.targets.destroy();
        self.device.destroy();
        dom::detach(&self.canvas);
        log::info!("[gpu] released");
    }
}
