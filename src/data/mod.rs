//! Data module - CSV loading, the sales table and row filters

mod loader;
mod processor;
mod record;

pub use loader::{DataLoader, DataSource, LoaderError};
pub use processor::{DataProcessor, ProcessorError};
pub use record::{columns, SalesRecord, SalesTable};
