pub mod recording_surface;
#[cfg(target_arch = "wasm32")]
pub mod canvas_renderer;

pub use recording_surface::*;
#[cfg(target_arch = "wasm32")]
pub use canvas_renderer::CanvasSurface;
