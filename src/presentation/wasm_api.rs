use std::cell::RefCell;
use std::rc::Rc;

use leptos::*;
use wasm_bindgen::prelude::*;

use crate::{
    app::ViewerApp,
    application::ChartViewer,
    config::ViewerConfig,
    domain::logging::{LogComponent, get_logger},
};

/// Config from JSON, or defaults when absent or invalid
fn resolve_config(config_json: Option<String>) -> ViewerConfig {
    match config_json.as_deref().map(ViewerConfig::from_json) {
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            get_logger().warn(
                LogComponent::Presentation("WasmApi"),
                &format!("{}; falling back to defaults", e),
            );
            ViewerConfig::default()
        }
        None => ViewerConfig::default(),
    }
}

/// File name the host page should fetch for the configured instrument
#[wasm_bindgen(js_name = dataFileName)]
pub fn data_file_name(config_json: Option<String>) -> String {
    resolve_config(config_json).data_file().to_string_lossy().into_owned()
}

/// Load `csv_text` into a new viewer and mount it under `<body>`.
/// A malformed or empty CSV leaves an empty chart; the loop still runs.
#[wasm_bindgen(js_name = mountViewer)]
pub fn mount_viewer(csv_text: String, config_json: Option<String>) -> Result<(), JsValue> {
    let config = resolve_config(config_json);
    let mut viewer = ChartViewer::new(&config);
    if let Err(e) = viewer.load_csv_text(&csv_text) {
        get_logger().error(LogComponent::Presentation("WasmApi"), &e.to_string());
    }

    let viewer = Rc::new(RefCell::new(viewer));
    let canvas = config.canvas;
    mount_to_body(move || view! { <ViewerApp viewer=Rc::clone(&viewer) canvas=canvas /> });
    Ok(())
}
