use std::fs;
use std::io;
use std::path::Path;

use flate2::read::GzDecoder;
use tar::Archive;
use tracing::debug;
use zip::ZipArchive;

use crate::error::DatasetError;

pub fn extract_zip(zip_path: &Path, target_dir: &Path) -> Result<(), DatasetError> {
    let file = fs::File::open(zip_path).map_err(|err| {
        DatasetError::Filesystem(format!("open zip {}: {err}", zip_path.display()))
    })?;
    let mut archive = ZipArchive::new(file).map_err(|err| DatasetError::Archive(err.to_string()))?;
    debug!(entries = archive.len(), path = %zip_path.display(), "extracting zip");

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|err| DatasetError::Archive(err.to_string()))?;
        let entry_path = match entry.enclosed_name() {
            Some(path) => target_dir.join(path),
            None => {
                return Err(DatasetError::Archive(
                    "zip entry path traversal detected".to_string(),
                ));
            }
        };

        if entry.is_dir() {
            fs::create_dir_all(&entry_path)
                .map_err(|err| DatasetError::Filesystem(err.to_string()))?;
            continue;
        }

        if let Some(parent) = entry_path.parent() {
            fs::create_dir_all(parent).map_err(|err| DatasetError::Filesystem(err.to_string()))?;
        }
        let mut outfile = fs::File::create(&entry_path)
            .map_err(|err| DatasetError::Filesystem(err.to_string()))?;
        io::copy(&mut entry, &mut outfile)
            .map_err(|err| DatasetError::Filesystem(err.to_string()))?;
    }
    Ok(())
}

pub fn extract_tar_gz(archive_path: &Path, target_dir: &Path) -> Result<(), DatasetError> {
    let file = fs::File::open(archive_path).map_err(|err| {
        DatasetError::Filesystem(format!("open archive {}: {err}", archive_path.display()))
    })?;
    debug!(path = %archive_path.display(), "extracting tar.gz");
    let mut archive = Archive::new(GzDecoder::new(file));
    archive.unpack(target_dir).map_err(|err| {
        DatasetError::Archive(format!("unpack {}: {err}", archive_path.display()))
    })
}
