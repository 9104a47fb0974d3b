use crate::application::use_cases::InputSettings;
use crate::domain::{
    chart::{CandlePalette, CanvasSize, DEFAULT_SCALE, MIN_SCALE, Viewport},
    errors::AppError,
    market_data::{InstrumentId, MalformedFieldPolicy},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Startup parameters. Every field has a build-time default, so an empty
/// JSON object (or no JSON at all) gives the stock AAPL viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub instrument: String,
    pub title: String,
    pub canvas: CanvasSize,
    pub show_grid: bool,
    pub initial_scale: f64,
    pub min_scale: f64,
    #[serde(flatten)]
    pub input: InputSettings,
    pub field_policy: MalformedFieldPolicy,
    /// Directory holding `<instrument>.csv` (native hosts only)
    pub data_dir: PathBuf,
    pub palette: CandlePalette,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            instrument: "AAPL".to_string(),
            title: "App - AAPL".to_string(),
            canvas: CanvasSize::default(),
            show_grid: true,
            initial_scale: DEFAULT_SCALE,
            min_scale: MIN_SCALE,
            input: InputSettings::default(),
            field_policy: MalformedFieldPolicy::default(),
            data_dir: PathBuf::from("."),
            palette: CandlePalette::default(),
        }
    }
}

impl ViewerConfig {
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        serde_json::from_str(json).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn instrument_id(&self) -> Result<InstrumentId, AppError> {
        InstrumentId::new(self.instrument.clone()).map_err(AppError::Config)
    }

    /// Path of the conventional data file, `<data_dir>/<instrument>.csv`
    pub fn data_file(&self) -> PathBuf {
        self.data_dir.join(InstrumentId::from(self.instrument.as_str()).file_name())
    }

    pub fn initial_viewport(&self) -> Viewport {
        Viewport::new(self.canvas, self.initial_scale).with_min_scale(self.min_scale)
    }
}
