use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::pocket_api::{
    query::RetrieveRequest,
    transport::PocketTransport,
    types::{RetrieveResponse, TransportError},
};

/// Read-through file cache around another transport, for local testing.
///
/// If the cache file exists its content is returned and the inner transport is never
/// called, whatever the request. Otherwise the inner transport is called and the raw
/// body is stored for the next run.
pub struct CachingTransport<T: PocketTransport> {
    inner: T,
    cache_file: PathBuf,
}

impl<T: PocketTransport> CachingTransport<T> {
    pub fn new(inner: T, cache_file: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            cache_file: cache_file.into(),
        }
    }

    fn cache_error(&self, io_error: io::Error) -> TransportError {
        TransportError::Cache {
            path: self.cache_file.clone(),
            io_error,
        }
    }
}

impl<T: PocketTransport> PocketTransport for CachingTransport<T> {
    fn send(&self, request: &RetrieveRequest) -> Result<Vec<u8>, TransportError> {
        match fs::read(&self.cache_file) {
            Ok(body) => {
                log::info!("Loaded response from cache '{}'", self.cache_file.display());
                return Ok(body);
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!(
                    "No cache at '{}', requesting API",
                    self.cache_file.display()
                );
            }
            Err(e) => return Err(self.cache_error(e)),
        }

        let body = self.inner.send(request)?;
        // a failed cache write is not an error of the exchange
        if let Err(e) = fs::write(&self.cache_file, &body) {
            log::warn!(
                "Could not write cache '{}': {}",
                self.cache_file.display(),
                e
            );
        }
        Ok(body)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum DumpError {
    #[error("Failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Error with dump file '{}'", .path.display())]
    FileError {
        path: PathBuf,
        #[source]
        io_error: io::Error,
    },
}

/// Write the decoded response as tab-indented JSON, for inspection.
pub fn dump_response(response: &RetrieveResponse, path: impl AsRef<Path>) -> Result<(), DumpError> {
    let path = path.as_ref();
    let mut pretty = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut pretty, formatter);
    response.serialize(&mut serializer)?;
    fs::write(path, pretty).map_err(|io_error| DumpError::FileError {
        path: path.to_path_buf(),
        io_error,
    })?;
    log::debug!("Dumped response to '{}'", path.display());
    Ok(())
}
