//! CSV Dataset Loader Module
//! Handles CSV loading and column classification using Polars.

use polars::prelude::*;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
}

/// A dataset materialized for the current session. Replaced wholesale
/// whenever the user switches datasets; never cached across selections.
pub struct LoadedTable {
    pub name: String,
    pub df: DataFrame,
}

/// Parse the CSV at `path` with standard dtype inference, then lower-case
/// every column name so later lookups are independent of header casing.
///
/// Malformed or unreadable files surface as a `LoaderError`, as do headers
/// that collide once lower-cased ("A" and "a").
pub fn load_dataset(path: &Path) -> Result<DataFrame, LoaderError> {
    let mut df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(10_000))
        .finish()?
        .collect()?;

    let lowered: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_lowercase())
        .collect();
    df.set_column_names(lowered)?;

    Ok(df)
}

/// Column names whose inferred dtype is numeric (integer, unsigned or float).
pub fn numeric_columns(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|col| {
            matches!(
                col.dtype(),
                DataType::Float32
                    | DataType::Float64
                    | DataType::Int8
                    | DataType::Int16
                    | DataType::Int32
                    | DataType::Int64
                    | DataType::UInt8
                    | DataType::UInt16
                    | DataType::UInt32
                    | DataType::UInt64
            )
        })
        .map(|col| col.name().to_string())
        .collect()
}

/// Column names whose inferred dtype is text or categorical. Booleans and
/// temporals belong to neither this set nor the numeric one.
pub fn categorical_columns(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|col| matches!(col.dtype(), DataType::String | DataType::Categorical(_, _)))
        .map(|col| col.name().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::store::DatasetStore;
    use std::fs;
    use tempfile::tempdir;

    fn write_csv(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn column_names_are_lower_cased() {
        let dir = tempdir().unwrap();
        let path = write_csv(dir.path(), "mixed.csv", "A,B,C_At\n1,2.5,x\n2,3.5,y\n");

        let df = load_dataset(&path).unwrap();
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, vec!["a", "b", "c_at"]);
    }

    #[test]
    fn classification_partitions_columns() {
        let dir = tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "typed.csv",
            "count,ratio,label\n1,0.5,low\n2,1.5,high\n",
        );

        let df = load_dataset(&path).unwrap();
        let numeric = numeric_columns(&df);
        let categorical = categorical_columns(&df);

        assert_eq!(numeric, vec!["count", "ratio"]);
        assert_eq!(categorical, vec!["label"]);

        let mut all: Vec<String> = numeric.into_iter().chain(categorical).collect();
        all.sort();
        let mut expected: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        expected.sort();
        assert_eq!(all, expected);
    }

    #[test]
    fn ragged_rows_fail_to_load() {
        let dir = tempdir().unwrap();
        let path = write_csv(dir.path(), "bad.csv", "a,b\n1,2,3,4\n5\n");

        assert!(load_dataset(&path).is_err());
    }

    #[test]
    fn missing_file_fails_to_load() {
        let dir = tempdir().unwrap();
        assert!(load_dataset(&dir.path().join("absent.csv")).is_err());
    }

    #[test]
    fn colliding_headers_after_lower_casing_fail() {
        let dir = tempdir().unwrap();
        let path = write_csv(dir.path(), "dupe.csv", "A,a\n1,2\n");

        assert!(load_dataset(&path).is_err());
    }

    #[test]
    fn upload_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let store = DatasetStore::new(dir.path());
        let bytes = b"Height,Width,Kind\n1.0,2.0,box\n3.5,4.5,tube\n";

        store.save_upload("shapes.csv", bytes).unwrap();
        let df = load_dataset(&store.dataset_path("shapes")).unwrap();

        assert_eq!(df.height(), 2);
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, vec!["height", "width", "kind"]);

        let heights: Vec<f64> = df
            .column("height")
            .unwrap()
            .cast(&DataType::Float64)
            .unwrap()
            .f64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(heights, vec![1.0, 3.5]);
    }
}
