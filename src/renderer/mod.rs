//! Rendering module
//!
//! Geometry (camera, outlines, minimap) is plain math and builds on every
//! target. The canvas painter that draws it only exists in the WASM build.

pub mod camera;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use camera::Camera;
pub use shapes::{
    Minimap, hull_outline, iceberg_outline, rudder_line, visible_icebergs, wave_marks,
};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasPainter;
