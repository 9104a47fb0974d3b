use derive_more::Display;

use crate::domain::market_data::InstrumentId;

/// Root error type. Nothing in the viewer is fatal; callers log and move on.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum AppError {
    #[display(fmt = "Ingestion Error: {}", _0)]
    Ingestion(IngestionError),
    #[display(fmt = "Rendering Error: {}", _0)]
    Rendering(String),
    #[display(fmt = "Config Error: {}", _0)]
    Config(String),
}

impl std::error::Error for AppError {}

impl From<IngestionError> for AppError {
    fn from(err: IngestionError) -> Self {
        AppError::Ingestion(err)
    }
}

#[derive(Debug, Clone, PartialEq, Display)]
pub enum IngestionError {
    #[display(fmt = "series not found for {}", _0)]
    SeriesNotFound(InstrumentId),
    #[display(fmt = "cannot open data file {}: {}", path, reason)]
    SourceUnavailable { path: String, reason: String },
}

impl std::error::Error for IngestionError {}

/// Failure converting one numeric column of one row
#[derive(Debug, Clone, PartialEq, Display)]
pub enum FieldError {
    #[display(fmt = "column '{}' is missing", column)]
    Missing { column: &'static str },
    #[display(fmt = "column '{}' is not numeric: {:?}", column, raw)]
    NotNumeric { column: &'static str, raw: String },
    #[display(fmt = "column '{}' is not finite: {:?}", column, raw)]
    NotFinite { column: &'static str, raw: String },
}

impl FieldError {
    pub fn column(&self) -> &'static str {
        match self {
            FieldError::Missing { column }
            | FieldError::NotNumeric { column, .. }
            | FieldError::NotFinite { column, .. } => column,
        }
    }
}

pub type IngestionResult<T> = Result<T, IngestionError>;
pub type RenderingResult<T> = Result<T, AppError>;
