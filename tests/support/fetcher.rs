// ABOUTME: In-memory archive fetcher and tarball fabrication for buildpack tests.
// ABOUTME: Records requested URLs so tests can assert download order.

use async_trait::async_trait;
use bob_builder::buildpack::{ArchiveFetcher, FetchError};
use bytes::Bytes;
use flate2::Compression;
use flate2::write::GzEncoder;
use parking_lot::Mutex;

/// Serves one archive for every URL, or a fixed HTTP error status.
pub struct StaticFetcher {
    archive: Option<Bytes>,
    status: u16,
    urls: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn serving(archive: Bytes) -> Self {
        Self {
            archive: Some(archive),
            status: 200,
            urls: Mutex::new(Vec::new()),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            archive: None,
            status,
            urls: Mutex::new(Vec::new()),
        }
    }

    /// Serves nothing; any fetch is a test failure.
    pub fn unused() -> Self {
        Self::status(599)
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().clone()
    }
}

#[async_trait]
impl ArchiveFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
        self.urls.lock().push(url.to_string());
        match &self.archive {
            Some(archive) => Ok(archive.clone()),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: self.status,
            }),
        }
    }
}

/// A gzipped tarball holding the given files.
pub fn tarball(files: &[(&str, &str)]) -> Bytes {
    let mut data = Vec::new();
    {
        let encoder = GzEncoder::new(&mut data, Compression::default());
        let mut builder = tar::Builder::new(encoder);
        for (path, contents) in files {
            let mut header = tar::Header::new_gnu();
            header.set_size(contents.len() as u64);
            header.set_mode(0o755);
            header.set_cksum();
            builder
                .append_data(&mut header, path, contents.as_bytes())
                .unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap();
    }
    Bytes::from(data)
}

/// A minimal buildpack archive with detect and compile scripts.
pub fn buildpack_tarball() -> Bytes {
    tarball(&[
        ("bin/detect", "#!/bin/sh\necho Custom\n"),
        ("bin/compile", "#!/bin/sh\nexit 0\n"),
        ("bin/release", "#!/bin/sh\necho '--- {}'\n"),
    ])
}
