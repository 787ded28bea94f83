use std::io;
use std::path::PathBuf;
use std::time::Instant;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use crate::app::{AcquireOutcome, ProgressEvent, ProgressSink};
use crate::config::Cifar10Source;
use crate::domain::{Split, Transform};
use crate::error::DatasetError;
use crate::fs_util::extract_tar_gz;
use crate::http::Downloader;
use crate::store::Store;

/// Local handle to one extracted split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitHandle {
    pub split: Split,
    pub directory: Utf8PathBuf,
    pub batches: Vec<Utf8PathBuf>,
    pub transform: Transform,
}

/// Fetch-and-cache capability: returns the extracted split under `root`,
/// downloading and unpacking only when it is not already there.
pub trait DatasetCache {
    fn fetch_split(
        &self,
        root: &Utf8Path,
        split: Split,
        transform: Transform,
        sink: &dyn ProgressSink,
    ) -> Result<SplitHandle, DatasetError>;
}

pub struct Cifar10Cache<D: Downloader> {
    downloader: D,
    source: Cifar10Source,
}

impl<D: Downloader> Cifar10Cache<D> {
    pub fn new(downloader: D, source: Cifar10Source) -> Self {
        Self { downloader, source }
    }

    fn batch_paths(&self, directory: &Utf8Path, split: Split) -> Vec<Utf8PathBuf> {
        let names = if split.is_train() {
            &self.source.train_batches
        } else {
            &self.source.test_batches
        };
        names.iter().map(|name| directory.join(name)).collect()
    }
}

impl<D: Downloader> DatasetCache for Cifar10Cache<D> {
    fn fetch_split(
        &self,
        root: &Utf8Path,
        split: Split,
        transform: Transform,
        sink: &dyn ProgressSink,
    ) -> Result<SplitHandle, DatasetError> {
        let directory = root.join(&self.source.extracted_dir);
        let batches = self.batch_paths(&directory, split);
        let handle = |batches: Vec<Utf8PathBuf>| SplitHandle {
            split,
            directory: directory.clone(),
            batches,
            transform,
        };

        if batches.iter().all(|path| path.as_std_path().is_file()) {
            sink.event(ProgressEvent::message(format!(
                "Files already downloaded ({split} split)"
            )));
            return Ok(handle(batches));
        }

        let archive = root.join(&self.source.archive_name);
        if archive.as_std_path().is_file() {
            debug!(%archive, "reusing downloaded archive");
        } else {
            Store::new_with_root(root.to_path_buf()).ensure_root()?;
            sink.event(ProgressEvent::message(format!(
                "Downloading {} to {archive}",
                self.source.url
            )));
            let start = Instant::now();
            self.downloader.download(&self.source.url, archive.as_std_path())?;
            sink.event(ProgressEvent {
                message: format!("Downloaded {}", self.source.archive_name),
                elapsed: Some(start.elapsed()),
            });
        }

        extract_tar_gz(archive.as_std_path(), root.as_std_path())?;
        if let Some(missing) = batches.iter().find(|path| !path.as_std_path().is_file()) {
            return Err(DatasetError::MissingSplitFile(missing.clone().into_std_path_buf()));
        }
        Ok(handle(batches))
    }
}

/// Fetches both CIFAR-10 splits, then deletes the downloaded archive.
///
/// The archive is assumed to sit at `<root>/<archive_name>` once the cache
/// returns. If it is not there the run fails with
/// [`DatasetError::CleanupArchiveMissing`]; this also happens when both
/// splits were already extracted by an earlier run.
pub fn acquire_cifar10<C: DatasetCache + ?Sized>(
    cache: &C,
    store: &Store,
    source: &Cifar10Source,
    sink: &dyn ProgressSink,
) -> Result<AcquireOutcome, DatasetError> {
    sink.event(ProgressEvent::message("Downloading CIFAR-10 dataset..."));
    let train = cache.fetch_split(store.root(), Split::Train, Transform::ToTensor, sink)?;
    let test = cache.fetch_split(store.root(), Split::Test, Transform::ToTensor, sink)?;
    debug!(
        train_batches = train.batches.len(),
        test_batches = test.batches.len(),
        "splits ready"
    );
    sink.event(ProgressEvent::message(
        "CIFAR-10 downloaded and extracted successfully.",
    ));

    sink.event(ProgressEvent::message("Cleaning up..."));
    let archive = store.cifar_archive_path(source);
    match std::fs::remove_file(archive.as_std_path()) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(DatasetError::CleanupArchiveMissing(PathBuf::from(archive)));
        }
        Err(err) => {
            return Err(DatasetError::Filesystem(format!("remove {archive}: {err}")));
        }
    }

    Ok(AcquireOutcome::Acquired {
        path: store.cifar_extracted_dir(source),
    })
}
