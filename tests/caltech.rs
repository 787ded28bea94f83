use std::cell::{Cell, RefCell};
use std::fs;
use std::io::Write;
use std::path::Path;

use assert_matches::assert_matches;
use camino::Utf8PathBuf;
use flate2::Compression;
use flate2::write::GzEncoder;
use zip::write::SimpleFileOptions;

use coursework_datasets::app::{AcquireOutcome, ProgressEvent, ProgressSink};
use coursework_datasets::caltech::acquire_caltech101;
use coursework_datasets::config::Caltech101Source;
use coursework_datasets::error::DatasetError;
use coursework_datasets::http::Downloader;
use coursework_datasets::store::Store;

#[derive(Default)]
struct RecordingSink {
    messages: RefCell<Vec<String>>,
}

impl ProgressSink for RecordingSink {
    fn event(&self, event: ProgressEvent) {
        self.messages.borrow_mut().push(event.message);
    }
}

/// Serves a prebuilt zip instead of hitting the network.
struct ZipDownloader {
    payload: Vec<u8>,
    calls: Cell<usize>,
}

impl ZipDownloader {
    fn new(payload: Vec<u8>) -> Self {
        Self {
            payload,
            calls: Cell::new(0),
        }
    }
}

impl Downloader for ZipDownloader {
    fn download(&self, _url: &str, destination: &Path) -> Result<(), DatasetError> {
        self.calls.set(self.calls.get() + 1);
        fs::write(destination, &self.payload)
            .map_err(|err| DatasetError::Filesystem(err.to_string()))
    }
}

fn categories_tar_gz() -> Vec<u8> {
    let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
    for (path, data) in [
        ("101_ObjectCategories/accordion/image_0001.jpg", &b"jpeg-a"[..]),
        ("101_ObjectCategories/airplanes/image_0001.jpg", &b"jpeg-b"[..]),
    ] {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, path, data).unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap()
}

fn caltech_zip(include_nested: bool) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    writer.add_directory("caltech-101/", options).unwrap();
    if include_nested {
        writer
            .start_file("caltech-101/101_ObjectCategories.tar.gz", options)
            .unwrap();
        writer.write_all(&categories_tar_gz()).unwrap();
    }
    writer
        .start_file("caltech-101/show_annotation.m", options)
        .unwrap();
    writer.write_all(b"% annotations").unwrap();
    writer
        .start_file("__MACOSX/caltech-101/._101_ObjectCategories.tar.gz", options)
        .unwrap();
    writer.write_all(b"resource fork").unwrap();
    writer.finish().unwrap().into_inner()
}

fn temp_store(temp: &tempfile::TempDir) -> Store {
    Store::new_with_root(Utf8PathBuf::from_path_buf(temp.path().join("data")).unwrap())
}

fn root_entries(store: &Store) -> Vec<String> {
    let mut names = fs::read_dir(store.root().as_std_path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    names.sort();
    names
}

#[test]
fn fresh_root_leaves_only_categories_directory() {
    let temp = tempfile::tempdir().unwrap();
    let store = temp_store(&temp);
    let source = Caltech101Source::default();
    let downloader = ZipDownloader::new(caltech_zip(true));

    let outcome =
        acquire_caltech101(&downloader, &store, &source, &RecordingSink::default()).unwrap();

    assert_matches!(outcome, AcquireOutcome::Acquired { .. });
    assert_eq!(root_entries(&store), vec!["101_ObjectCategories".to_string()]);
    let final_dir = store.caltech_final_dir(&source);
    assert!(final_dir.join("accordion/image_0001.jpg").as_std_path().is_file());
    assert!(final_dir.join("airplanes").as_std_path().is_dir());
}

#[test]
fn second_run_skips_without_download() {
    let temp = tempfile::tempdir().unwrap();
    let store = temp_store(&temp);
    let source = Caltech101Source::default();
    let downloader = ZipDownloader::new(caltech_zip(true));

    acquire_caltech101(&downloader, &store, &source, &RecordingSink::default()).unwrap();
    let sink = RecordingSink::default();
    let outcome = acquire_caltech101(&downloader, &store, &source, &sink).unwrap();

    assert_matches!(outcome, AcquireOutcome::Skipped { .. });
    assert_eq!(downloader.calls.get(), 1);
    assert_eq!(
        *sink.messages.borrow(),
        vec!["Caltech-101 dataset already exists. Skipping download.".to_string()]
    );
    assert_eq!(root_entries(&store), vec!["101_ObjectCategories".to_string()]);
}

#[test]
fn existing_final_directory_is_left_alone() {
    let temp = tempfile::tempdir().unwrap();
    let store = temp_store(&temp);
    let source = Caltech101Source::default();
    let final_dir = store.caltech_final_dir(&source);
    fs::create_dir_all(final_dir.join("custom").as_std_path()).unwrap();
    let downloader = ZipDownloader::new(Vec::new());

    acquire_caltech101(&downloader, &store, &source, &RecordingSink::default()).unwrap();

    assert_eq!(downloader.calls.get(), 0);
    assert!(final_dir.join("custom").as_std_path().is_dir());
}

#[test]
fn missing_nested_archive_is_fatal() {
    let temp = tempfile::tempdir().unwrap();
    let store = temp_store(&temp);
    let source = Caltech101Source::default();
    let downloader = ZipDownloader::new(caltech_zip(false));

    let err = acquire_caltech101(&downloader, &store, &source, &RecordingSink::default())
        .unwrap_err();

    assert_matches!(err, DatasetError::NestedArchiveMissing(path) => {
        assert!(path.ends_with("caltech-101/101_ObjectCategories.tar.gz"));
    });
}

#[test]
fn progress_reports_ready_path() {
    let temp = tempfile::tempdir().unwrap();
    let store = temp_store(&temp);
    let source = Caltech101Source::default();
    let downloader = ZipDownloader::new(caltech_zip(true));
    let sink = RecordingSink::default();

    acquire_caltech101(&downloader, &store, &source, &sink).unwrap();

    let messages = sink.messages.borrow();
    assert_eq!(messages.first().unwrap(), "Downloading caltech-101.zip...");
    assert!(messages.iter().any(|m| m == "Cleaning up..."));
    assert!(
        messages
            .last()
            .unwrap()
            .ends_with("data/101_ObjectCategories")
    );
}
