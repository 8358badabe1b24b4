// Result download: fetch the finished image and write it next to the
// working directory under a name no earlier run can have used.

use anyhow::{Context, Result};
use chrono::Local;
use reqwest::blocking::Client;
use std::path::PathBuf;

/// Saves a finished result image from its URL to a local file.
pub trait Downloader {
    fn download(&self, url: &str) -> Result<PathBuf>;
}

/// Real downloader: plain unauthenticated GET of the result URL. The
/// service hands out result URLs that need no API key.
pub struct HttpDownloader {
    client: Client,
}

impl HttpDownloader {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build download HTTP client")?;
        Ok(HttpDownloader { client })
    }
}

impl Downloader for HttpDownloader {
    fn download(&self, url: &str) -> Result<PathBuf> {
        let res = self
            .client
            .get(url)
            .send()
            .context("Failed to fetch result image")?;
        if !res.status().is_success() {
            anyhow::bail!("Result image fetch failed: {}", res.status());
        }
        let bytes = res.bytes().context("Reading result image body")?;

        let path = PathBuf::from(unique_filename());
        std::fs::write(&path, &bytes)
            .with_context(|| format!("Writing result image to {}", path.display()))?;
        Ok(path)
    }
}

/// Timestamped output name so older results are never overwritten.
fn unique_filename() -> String {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    format!("swapped_image_{}.jpg", timestamp)
}
