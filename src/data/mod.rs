//! Data module - CSV loading and cleaning

mod loader;
mod processor;

pub use loader::DataLoader;
#[cfg(test)]
pub use loader::{LoaderError, ParseFailure};
pub use processor::{
    CleanOptions, DataProcessor, ProcessorError, DEFAULT_MARKER, DEFAULT_SENTINEL,
};
