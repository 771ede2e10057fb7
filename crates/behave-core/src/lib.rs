pub mod camera;
pub mod cloud;
pub mod constants;
pub mod error;
pub mod field;
pub mod motion;
pub mod task;

pub use camera::*;
pub use cloud::*;
pub use constants::*;
pub use error::*;
pub use field::*;
pub use motion::*;
pub use task::*;

// Shader bundled as a string asset
pub static POINTS_WGSL: &str = include_str!("../shaders/points.wgsl");
