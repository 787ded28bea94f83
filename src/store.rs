use std::fs;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};

use crate::config::{Caltech101Source, Cifar10Source, DEFAULT_DESTINATION};
use crate::error::DatasetError;

/// Path layout under the destination root.
#[derive(Debug, Clone)]
pub struct Store {
    root: Utf8PathBuf,
}

impl Default for Store {
    fn default() -> Self {
        Self::new_with_root(Utf8PathBuf::from(DEFAULT_DESTINATION))
    }
}

impl Store {
    pub fn new_with_root(root: Utf8PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn caltech_archive_path(&self, source: &Caltech101Source) -> Utf8PathBuf {
        self.root.join(&source.archive_name)
    }

    pub fn caltech_staging_dir(&self, source: &Caltech101Source) -> Utf8PathBuf {
        self.root.join(&source.staging_dir)
    }

    pub fn caltech_nested_archive_path(&self, source: &Caltech101Source) -> Utf8PathBuf {
        self.caltech_staging_dir(source).join(&source.nested_archive)
    }

    pub fn caltech_final_dir(&self, source: &Caltech101Source) -> Utf8PathBuf {
        self.root.join(&source.final_dir)
    }

    pub fn caltech_metadata_dir(&self, source: &Caltech101Source) -> Utf8PathBuf {
        self.root.join(&source.metadata_dir)
    }

    pub fn cifar_archive_path(&self, source: &Cifar10Source) -> Utf8PathBuf {
        self.root.join(&source.archive_name)
    }

    pub fn cifar_extracted_dir(&self, source: &Cifar10Source) -> Utf8PathBuf {
        self.root.join(&source.extracted_dir)
    }

    pub fn ensure_root(&self) -> Result<(), DatasetError> {
        fs::create_dir_all(self.root.as_std_path())
            .map_err(|err| DatasetError::Filesystem(format!("create {}: {err}", self.root)))
    }

    pub fn exists(&self, path: &Utf8Path) -> bool {
        path.as_std_path().exists()
    }

    pub fn remove_file(path: &Utf8Path) -> Result<(), DatasetError> {
        fs::remove_file(path.as_std_path())
            .map_err(|err| DatasetError::Filesystem(format!("remove {path}: {err}")))
    }

    /// Removes `path` and everything under it; a missing directory is fine.
    pub fn remove_dir_if_exists(path: &Utf8Path) -> Result<bool, DatasetError> {
        match fs::remove_dir_all(path.as_std_path()) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(DatasetError::Filesystem(format!("remove {path}: {err}"))),
        }
    }
}
