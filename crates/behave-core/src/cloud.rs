//! The point cloud: positions plus the per-point twinkle attributes.
//!
//! Generated once per mount and uploaded verbatim as the GPU instance buffer,
//! so [`PointInstance`] doubles as the vertex layout read by `points.wgsl`.

use crate::constants::{CLOUD_EXTENT, POINT_SCALE_MAX, POINT_SCALE_MIN};
use rand::prelude::*;
use std::f32::consts::TAU;

/// One point of the field, laid out as the instance-rate vertex the shader reads.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointInstance {
    pub position: [f32; 3],
    /// Twinkle phase offset in radians, `[0, 2π)`.
    pub phase: f32,
    /// Size multiplier, `[POINT_SCALE_MIN, POINT_SCALE_MAX)`.
    pub scale: f32,
}

#[derive(Clone, Debug)]
pub struct PointCloud {
    instances: Vec<PointInstance>,
}

impl PointCloud {
    /// Scatter `count` points uniformly through the cube of side
    /// [`CLOUD_EXTENT`] centred on the origin.
    pub fn generate<R: Rng>(count: usize, rng: &mut R) -> Self {
        let half = CLOUD_EXTENT * 0.5;
        let instances = (0..count)
            .map(|_| PointInstance {
                position: [
                    rng.gen_range(-half..half),
                    rng.gen_range(-half..half),
                    rng.gen_range(-half..half),
                ],
                phase: rng.gen_range(0.0..TAU),
                scale: rng.gen_range(POINT_SCALE_MIN..POINT_SCALE_MAX),
            })
            .collect::<Vec<_>>();
        log::debug!("[cloud] generated {} points", instances.len());
        Self { instances }
    }

    /// Deterministic variant, used by tests and for reproducible captures.
    pub fn generate_seeded(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::generate(count, &mut rng)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn instances(&self) -> &[PointInstance] {
        &self.instances
    }

    /// Raw bytes for the instance buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}
