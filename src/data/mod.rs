//! Data module - cost record loading, caching and filtering

mod cache;
mod loader;
mod model;
mod processor;

pub use cache::{DatasetCache, DEFAULT_TTL};
pub use loader::LoadError;
pub use model::{CostRecord, Dataset};
pub use processor::{DataProcessor, Selection, ALL_MONTHS};
