// Tuning constants for the point-field background.
//
// Hand-tuned visual parameters; kept named so the renderer, the motion model
// and the tests agree on one set of numbers.

// Point cloud
pub const POINT_COUNT: usize = 6000;
pub const CLOUD_EXTENT: f32 = 3000.0; // side of the cube the points are scattered in
pub const POINT_SCALE_MIN: f32 = 0.6;
pub const POINT_SCALE_MAX: f32 = 2.0;

// Camera
pub const CAMERA_FOV_Y_DEG: f32 = 60.0;
pub const CAMERA_NEAR: f32 = 1.0;
pub const CAMERA_FAR: f32 = 4000.0;
pub const CAMERA_Z: f32 = 800.0; // distance back along the view axis

// Motion
pub const POINTER_TARGET_SCALE: f32 = 0.6; // normalized pointer -> target angle (radians)
pub const ROTATION_DAMPING: f32 = 0.05; // fraction of the remaining distance covered per frame
pub const AUTO_ROTATE_PER_FRAME: f32 = 0.0008; // radians added to the yaw every frame
pub const PITCH_LIMIT: f32 = 0.9; // |rotation.x| never exceeds this

// Twinkle shading (mirrored in shaders/points.wgsl)
pub const TWINKLE_SPEED: f32 = 3.0;
pub const SIZE_ATTENUATION: f32 = 300.0;
pub const ALPHA_BASE: f32 = 0.25;
pub const ALPHA_SPAN: f32 = 0.45;
pub const FADE_INNER_RADIUS: f32 = 0.32;
pub const FADE_OUTER_RADIUS: f32 = 0.5;
pub const OPACITY: f32 = 0.85;
pub const POINT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

// Rendering
pub const MSAA_SAMPLES: u32 = 4;
pub const CLEAR_COLOR: [f64; 4] = [0.0, 0.0, 0.0, 1.0];
pub const FRAME_ERROR_LOG_EVERY: u64 = 300; // dropped frames between warnings (~5 s at 60 Hz)

/// Pixel ratio used when the host reports none (or nonsense).
pub const FALLBACK_PIXEL_RATIO: f64 = 1.0;
