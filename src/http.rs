use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

use crate::error::DatasetError;

/// Fetches a URL to a local path.
pub trait Downloader {
    fn download(&self, url: &str, destination: &Path) -> Result<(), DatasetError>;
}

impl<D: Downloader + ?Sized> Downloader for &D {
    fn download(&self, url: &str, destination: &Path) -> Result<(), DatasetError> {
        (**self).download(url, destination)
    }
}

#[derive(Clone)]
pub struct HttpDownloader {
    client: Client,
}

impl HttpDownloader {
    pub fn new() -> Result<Self, DatasetError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("fetch-datasets/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| DatasetError::Http(err.to_string()))?,
        );
        // Archives are hundreds of megabytes; no overall request timeout.
        let client = Client::builder()
            .default_headers(headers)
            .timeout(None::<Duration>)
            .build()
            .map_err(|err| DatasetError::Http(err.to_string()))?;
        Ok(Self { client })
    }

    fn write_response_to_file(
        &self,
        mut response: reqwest::blocking::Response,
        url: &str,
        destination: &Path,
    ) -> Result<(), DatasetError> {
        if !response.status().is_success() {
            return Err(DatasetError::HttpStatus {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }
        let parent = destination
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent).map_err(|err| DatasetError::Filesystem(err.to_string()))?;
        let mut temp = tempfile::Builder::new()
            .prefix("fetch-datasets")
            .tempfile_in(parent)
            .map_err(|err| DatasetError::Filesystem(err.to_string()))?;
        let written = std::io::copy(&mut response, temp.as_file_mut())
            .map_err(|err| DatasetError::Http(err.to_string()))?;
        temp.persist(destination)
            .map_err(|err| DatasetError::Filesystem(err.to_string()))?;
        debug!(bytes = written, path = %destination.display(), "download complete");
        Ok(())
    }
}

impl Downloader for HttpDownloader {
    fn download(&self, url: &str, destination: &Path) -> Result<(), DatasetError> {
        debug!(%url, "requesting");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| DatasetError::Http(err.to_string()))?;
        self.write_response_to_file(response, url, destination)
    }
}
