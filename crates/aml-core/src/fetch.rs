//! Fetch-and-cache: streamed HTTP GET into the local clip cache.
//!
//! The cache is keyed purely by destination filename: if the file exists the
//! fetch is skipped with no network access and no freshness check. Failures
//! of any kind (transport, non-2xx status, filesystem) collapse into a single
//! error the pipeline turns into a keep-remote-URL fallback.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Why a fetch failed. The pipeline treats all variants identically; the
/// split exists for log messages.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("GET {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u32 },
    #[error("transfer failed: {0}")]
    Curl(#[from] curl::Error),
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// How a successful fetch was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    /// Destination already existed; no network access performed.
    Hit,
    /// Body fetched and written to the destination.
    Downloaded,
}

/// Downloads `url` to `dest` unless `dest` already exists.
///
/// On failure the partial destination file is removed best-effort so a
/// re-run does not mistake a truncated body (or an error page) for a cache
/// hit. No retries; a fixed `timeout` bounds the whole request.
pub fn fetch_and_cache(
    url: &str,
    dest: &Path,
    timeout: Duration,
) -> Result<CacheOutcome, FetchError> {
    if dest.exists() {
        tracing::debug!("cache hit: {}", dest.display());
        return Ok(CacheOutcome::Hit);
    }

    match stream_to_file(url, dest, timeout) {
        Ok(()) => Ok(CacheOutcome::Downloaded),
        Err(err) => {
            let _ = fs::remove_file(dest);
            Err(err)
        }
    }
}

/// Single GET streamed straight to `dest` as the body arrives.
fn stream_to_file(url: &str, dest: &Path, timeout: Duration) -> Result<(), FetchError> {
    let mut file = File::create(dest)?;
    let mut write_error: Option<std::io::Error> = None;

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(timeout)?;
    easy.timeout(timeout)?;

    let transfer_result = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| match file.write_all(data) {
            Ok(()) => Ok(data.len()),
            Err(err) => {
                write_error = Some(err);
                Ok(0) // abort transfer
            }
        })?;
        transfer.perform()
    };

    // A write failure surfaces from curl as an aborted transfer; report the
    // underlying io::Error instead.
    if let Some(err) = write_error {
        return Err(FetchError::Io(err));
    }
    transfer_result?;

    let status = easy.response_code()?;
    if !(200..300).contains(&status) {
        return Err(FetchError::HttpStatus {
            url: url.to_string(),
            status,
        });
    }

    file.flush()?;
    Ok(())
}
