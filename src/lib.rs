pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

#[cfg(target_arch = "wasm32")]
pub mod app;
#[cfg(target_arch = "wasm32")]
pub mod event_utils;
#[cfg(target_arch = "wasm32")]
pub mod presentation;

pub use application::ChartViewer;
pub use config::ViewerConfig;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Install the browser logger, clock and panic hook
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let logger = if cfg!(debug_assertions) {
        infrastructure::services::ConsoleLogger::new_development()
    } else {
        infrastructure::services::ConsoleLogger::new_production()
    };
    domain::logging::init_logger(Box::new(logger));
    domain::logging::init_time_provider(Box::new(infrastructure::services::SystemTimeProvider));

    domain::logging::get_logger().info(
        domain::logging::LogComponent::Presentation("Initialize"),
        "Candlestick viewer initialized",
    );
}
