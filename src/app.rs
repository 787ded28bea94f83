use std::time::Duration;

use camino::Utf8PathBuf;

use crate::caltech::acquire_caltech101;
use crate::cifar::{DatasetCache, acquire_cifar10};
use crate::config::{Caltech101Source, Cifar10Source};
use crate::domain::{Dataset, DatasetSelection};
use crate::error::DatasetError;
use crate::http::Downloader;
use crate::store::Store;

#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub message: String,
    pub elapsed: Option<Duration>,
}

impl ProgressEvent {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            elapsed: None,
        }
    }
}

pub trait ProgressSink {
    fn event(&self, event: ProgressEvent);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquireOutcome {
    /// The final directory was already there; nothing was touched.
    Skipped { path: Utf8PathBuf },
    Acquired { path: Utf8PathBuf },
}

impl AcquireOutcome {
    pub fn path(&self) -> &Utf8PathBuf {
        match self {
            AcquireOutcome::Skipped { path } | AcquireOutcome::Acquired { path } => path,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunItemResult {
    pub dataset: Dataset,
    pub outcome: AcquireOutcome,
}

#[derive(Debug, Clone)]
pub struct RunResult {
    pub items: Vec<RunItemResult>,
}

pub struct App<D: Downloader, C: DatasetCache> {
    store: Store,
    downloader: D,
    cache: C,
    caltech: Caltech101Source,
    cifar: Cifar10Source,
}

impl<D: Downloader, C: DatasetCache> App<D, C> {
    pub fn new(store: Store, downloader: D, cache: C) -> Self {
        Self::with_sources(
            store,
            downloader,
            cache,
            Caltech101Source::default(),
            Cifar10Source::default(),
        )
    }

    pub fn with_sources(
        store: Store,
        downloader: D,
        cache: C,
        caltech: Caltech101Source,
        cifar: Cifar10Source,
    ) -> Self {
        Self {
            store,
            downloader,
            cache,
            caltech,
            cifar,
        }
    }

    /// Runs the routines for `selection` in order, stopping at the first error.
    pub fn run(
        &self,
        selection: DatasetSelection,
        sink: &dyn ProgressSink,
    ) -> Result<RunResult, DatasetError> {
        let mut items = Vec::new();
        for dataset in selection.datasets() {
            sink.event(ProgressEvent::message(format!("=== {dataset} ===")));
            let outcome = self.acquire(dataset, sink)?;
            items.push(RunItemResult { dataset, outcome });
        }
        Ok(RunResult { items })
    }

    pub fn acquire(
        &self,
        dataset: Dataset,
        sink: &dyn ProgressSink,
    ) -> Result<AcquireOutcome, DatasetError> {
        match dataset {
            Dataset::Cifar10 => acquire_cifar10(&self.cache, &self.store, &self.cifar, sink),
            Dataset::Caltech101 => {
                acquire_caltech101(&self.downloader, &self.store, &self.caltech, sink)
            }
        }
    }
}
