use std::time::Instant;

use crate::app::{AcquireOutcome, ProgressEvent, ProgressSink};
use crate::config::Caltech101Source;
use crate::error::DatasetError;
use crate::fs_util::{extract_tar_gz, extract_zip};
use crate::http::Downloader;
use crate::store::Store;

/// Ensures `<root>/101_ObjectCategories` exists, downloading and unpacking
/// the upstream zip when it does not.
///
/// The outer zip unpacks into a staging directory holding a second tar.gz
/// with the actual categories. Both archives, the staging directory and any
/// `__MACOSX` folder are removed afterwards so the root only holds the final
/// directory.
pub fn acquire_caltech101<D: Downloader + ?Sized>(
    downloader: &D,
    store: &Store,
    source: &Caltech101Source,
    sink: &dyn ProgressSink,
) -> Result<AcquireOutcome, DatasetError> {
    let final_dir = store.caltech_final_dir(source);
    if store.exists(&final_dir) {
        sink.event(ProgressEvent::message(
            "Caltech-101 dataset already exists. Skipping download.",
        ));
        return Ok(AcquireOutcome::Skipped { path: final_dir });
    }

    store.ensure_root()?;

    let zip_path = store.caltech_archive_path(source);
    sink.event(ProgressEvent::message(format!(
        "Downloading {}...",
        source.archive_name
    )));
    let start = Instant::now();
    downloader.download(&source.url, zip_path.as_std_path())?;
    sink.event(ProgressEvent {
        message: format!("Downloaded {}", source.archive_name),
        elapsed: Some(start.elapsed()),
    });

    sink.event(ProgressEvent::message("Extracting ZIP file..."));
    extract_zip(zip_path.as_std_path(), store.root().as_std_path())?;

    let nested = store.caltech_nested_archive_path(source);
    if !store.exists(&nested) {
        return Err(DatasetError::NestedArchiveMissing(nested.into_std_path_buf()));
    }
    sink.event(ProgressEvent::message(format!(
        "Extracting {}...",
        source.nested_archive
    )));
    extract_tar_gz(nested.as_std_path(), store.root().as_std_path())?;

    sink.event(ProgressEvent::message("Cleaning up..."));
    Store::remove_file(&zip_path)?;
    Store::remove_file(&nested)?;
    Store::remove_dir_if_exists(&store.caltech_metadata_dir(source))?;
    Store::remove_dir_if_exists(&store.caltech_staging_dir(source))?;

    sink.event(ProgressEvent::message(format!(
        "Caltech-101 dataset is ready at: {final_dir}"
    )));
    Ok(AcquireOutcome::Acquired { path: final_dir })
}
