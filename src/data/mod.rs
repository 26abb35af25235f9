//! Data module - dataset store, CSV loading and column classification

mod loader;
mod store;

pub use loader::{categorical_columns, load_dataset, numeric_columns, LoadedTable};
pub use store::{DatasetStore, StoreError};
