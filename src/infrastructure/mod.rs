pub mod data;
pub mod input;
pub mod rendering;
pub mod services;
