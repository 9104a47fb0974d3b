pub mod handle_input;
pub mod render_chart;

pub use handle_input::*;
pub use render_chart::*;
