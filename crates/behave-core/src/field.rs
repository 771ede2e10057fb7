//! Per-instance scene state: cloud, camera, viewport, orientation and the
//! latest pointer target. One `PointField` per mount; nothing is shared.

use crate::camera::{Camera, Viewport};
use crate::cloud::PointCloud;
use crate::constants::{POINT_COLOR, POINT_COUNT};
use crate::motion::{Orientation, OrientationParams, PointerTarget};
use glam::Mat4;

/// Runtime knobs. The host never passes any; `Default` is the tuned look.
#[derive(Clone, Debug)]
pub struct FieldConfig {
    pub point_count: usize,
    pub motion: OrientationParams,
    /// Fixed seed for reproducible clouds; `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            point_count: POINT_COUNT,
            motion: OrientationParams::default(),
            seed: None,
        }
    }
}

/// Shader-facing snapshot of one frame. Layout matches `FrameUniforms` in
/// `points.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    pub model_view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub color: [f32; 4],
    /// Backing-store size in physical pixels.
    pub resolution: [f32; 2],
    /// Seconds since mount.
    pub time: f32,
    pub _pad: f32,
}

pub struct PointField {
    cloud: PointCloud,
    camera: Camera,
    viewport: Viewport,
    orientation: Orientation,
    target: PointerTarget,
    params: OrientationParams,
    elapsed: f32,
}

impl PointField {
    pub fn new(config: &FieldConfig, viewport: Viewport) -> Self {
        let cloud = match config.seed {
            Some(seed) => PointCloud::generate_seeded(config.point_count, seed),
            None => PointCloud::generate(config.point_count, &mut rand::thread_rng()),
        };
        Self::with_cloud(cloud, config.motion, viewport)
    }

    pub fn with_cloud(cloud: PointCloud, params: OrientationParams, viewport: Viewport) -> Self {
        Self {
            cloud,
            camera: Camera::perspective(viewport.aspect()),
            viewport,
            orientation: Orientation::default(),
            target: PointerTarget::default(),
            params,
            elapsed: 0.0,
        }
    }

    /// Store a new pointer target. Ignored for a degenerate viewport.
    pub fn pointer_moved(&mut self, client_x: f32, client_y: f32) {
        if let Some(t) = PointerTarget::from_client(
            client_x,
            client_y,
            self.viewport.width,
            self.viewport.height,
        ) {
            self.target = t;
        }
    }

    /// Adopt a new viewport; returns the physical surface size to configure.
    pub fn resized(&mut self, viewport: Viewport) -> (u32, u32) {
        self.viewport = viewport;
        self.camera.set_aspect(viewport.aspect());
        viewport.physical_size()
    }

    /// One frame of motion at `elapsed_secs` since mount.
    pub fn advance(&mut self, elapsed_secs: f32) {
        self.elapsed = elapsed_secs.max(0.0);
        self.orientation.step(self.target, &self.params);
    }

    pub fn uniforms(&self) -> FrameUniforms {
        let model_view: Mat4 = self.camera.view_matrix() * self.orientation.model_matrix();
        let (w, h) = self.viewport.physical_size();
        FrameUniforms {
            model_view: model_view.to_cols_array_2d(),
            projection: self.camera.projection_matrix().to_cols_array_2d(),
            color: [POINT_COLOR[0], POINT_COLOR[1], POINT_COLOR[2], 1.0],
            resolution: [w as f32, h as f32],
            time: self.elapsed,
            _pad: 0.0,
        }
    }

    pub fn cloud(&self) -> &PointCloud {
        &self.cloud
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn target(&self) -> PointerTarget {
        self.target
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}
