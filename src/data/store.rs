//! Dataset Store Module
//! A directory of CSV files, each file stem being a dataset name.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access dataset store: {0}")]
    Io(#[from] std::io::Error),
}

/// Handles enumeration of stored datasets and persistence of uploads.
pub struct DatasetStore {
    root: PathBuf,
}

impl DatasetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[allow(dead_code)]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a dataset of the given name lives at.
    pub fn dataset_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.csv"))
    }

    /// List dataset names: the stems of all `.csv` files directly inside the
    /// store, sorted. Creates the store directory on first use. File content
    /// is not inspected; a bogus CSV still shows up here and fails at load
    /// time instead.
    pub fn list_datasets(&self) -> Result<Vec<String>, StoreError> {
        fs::create_dir_all(&self.root)?;

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let is_csv = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
            if !is_csv {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Write uploaded bytes verbatim to `root/filename`, overwriting any
    /// existing file of that name.
    pub fn save_upload(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, StoreError> {
        fs::create_dir_all(&self.root)?;
        let path = self.root.join(filename);
        fs::write(&path, bytes)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn lists_csv_stems_only() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("iris.csv"), "a,b\n1,2\n").unwrap();
        fs::write(dir.path().join("cars.csv"), "not,really,csv,content").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();

        let store = DatasetStore::new(dir.path());
        let names = store.list_datasets().unwrap();
        assert_eq!(names, vec!["cars".to_string(), "iris".to_string()]);
    }

    #[test]
    fn creates_missing_store_directory() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("store");
        let store = DatasetStore::new(&root);

        assert!(store.list_datasets().unwrap().is_empty());
        assert!(root.is_dir());
    }

    #[test]
    fn upload_appears_in_listing() {
        let dir = tempdir().unwrap();
        let store = DatasetStore::new(dir.path());
        fs::write(dir.path().join("old.csv"), "x\n1\n").unwrap();

        store.save_upload("new.csv", b"x\n2\n").unwrap();

        let names = store.list_datasets().unwrap();
        assert_eq!(names, vec!["new".to_string(), "old".to_string()]);
    }

    #[test]
    fn upload_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let store = DatasetStore::new(dir.path());

        store.save_upload("data.csv", b"first").unwrap();
        store.save_upload("data.csv", b"second").unwrap();

        let content = fs::read(store.dataset_path("data")).unwrap();
        assert_eq!(content, b"second");
    }

    #[test]
    fn dataset_path_appends_extension() {
        let store = DatasetStore::new("/some/root");
        assert_eq!(
            store.dataset_path("iris"),
            PathBuf::from("/some/root/iris.csv")
        );
    }
}
