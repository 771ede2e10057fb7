// Host-side tests for point-cloud generation.

use behave_core::*;
use std::f32::consts::TAU;

#[test]
fn cloud_has_exact_count_and_stays_in_bounds() {
    let half = CLOUD_EXTENT * 0.5;
    for seed in [1_u64, 7, 42, 9001] {
        let cloud = PointCloud::generate_seeded(POINT_COUNT, seed);
        assert_eq!(cloud.len(), 6000);
        for p in cloud.instances() {
            for c in p.position {
                assert!(c.is_finite());
                assert!((-half..=half).contains(&c), "coordinate {c} outside cube");
            }
            assert!(p.phase >= 0.0 && p.phase < TAU, "phase {}", p.phase);
            assert!(
                p.scale >= POINT_SCALE_MIN && p.scale <= POINT_SCALE_MAX,
                "scale {}",
                p.scale
            );
        }
    }
}

#[test]
fn unseeded_field_also_allocates_full_cloud() {
    let field = PointField::new(&FieldConfig::default(), Viewport::new(800.0, 600.0, 1.0));
    assert_eq!(field.cloud().len(), POINT_COUNT);
    assert!(!field.cloud().is_empty());
}

#[test]
fn seeded_clouds_are_reproducible() {
    let a = PointCloud::generate_seeded(128, 3);
    let b = PointCloud::generate_seeded(128, 3);
    let c = PointCloud::generate_seeded(128, 4);
    assert_eq!(a.instances(), b.instances());
    assert_ne!(a.instances(), c.instances());
}

#[test]
fn cloud_actually_spreads_through_the_cube() {
    let cloud = PointCloud::generate_seeded(POINT_COUNT, 11);
    let half = CLOUD_EXTENT * 0.5;
    for axis in 0..3 {
        let min = cloud
            .instances()
            .iter()
            .map(|p| p.position[axis])
            .fold(f32::MAX, f32::min);
        let max = cloud
            .instances()
            .iter()
            .map(|p| p.position[axis])
            .fold(f32::MIN, f32::max);
        // 6000 uniform samples land close to both faces
        assert!(min < -half * 0.95, "axis {axis} min {min}");
        assert!(max > half * 0.95, "axis {axis} max {max}");
    }
}

#[test]
fn instance_bytes_match_gpu_layout() {
    assert_eq!(std::mem::size_of::<PointInstance>(), 20);
    let cloud = PointCloud::generate_seeded(10, 5);
    assert_eq!(cloud.as_bytes().len(), 10 * 20);
}

#[test]
fn empty_cloud_is_empty() {
    let cloud = PointCloud::generate_seeded(0, 1);
    assert!(cloud.is_empty());
    assert!(cloud.as_bytes().is_empty());
}
