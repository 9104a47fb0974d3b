//! Chart aggregate: viewport transform, palette and candle projection.

pub mod services;
pub mod value_objects;

pub use services::*;
pub use value_objects::*;
