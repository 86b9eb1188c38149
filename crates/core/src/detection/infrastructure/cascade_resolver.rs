use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::constants::{CASCADE_MODEL_NAME, CASCADE_MODEL_URL};

#[derive(Error, Debug)]
pub enum CascadeResolveError {
    #[error("cascade file not found: {0}")]
    Missing(PathBuf),
    #[error("failed to create cache directory: {0}")]
    CacheDir(#[source] std::io::Error),
    #[error("download failed for {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to write cascade to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not determine cache directory")]
    NoCacheDir,
}

/// Progress callback: `(bytes_downloaded, total_bytes)`.
/// `total_bytes` is 0 if the server didn't provide Content-Length.
pub type ProgressFn = Box<dyn Fn(u64, u64) + Send>;

/// Resolve the pretrained cascade file.
///
/// An explicit `override_path` is used as-is and must exist. Otherwise
/// the per-user cache is checked, and on a miss the published artifact
/// is downloaded into it.
pub fn resolve(
    override_path: Option<&Path>,
    progress: Option<ProgressFn>,
) -> Result<PathBuf, CascadeResolveError> {
    if let Some(path) = override_path {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        return Err(CascadeResolveError::Missing(path.to_path_buf()));
    }

    let cache_dir = cascade_cache_dir()?;
    let cached = cache_dir.join(CASCADE_MODEL_NAME);
    if cached.exists() {
        return Ok(cached);
    }

    fs::create_dir_all(&cache_dir).map_err(CascadeResolveError::CacheDir)?;
    download(CASCADE_MODEL_URL, &cached, progress)?;
    Ok(cached)
}

/// Per-user cascade cache: `<platform cache dir>/facewatch/models/`.
pub fn cascade_cache_dir() -> Result<PathBuf, CascadeResolveError> {
    dirs::cache_dir()
        .map(|d| d.join("facewatch").join("models"))
        .ok_or(CascadeResolveError::NoCacheDir)
}

/// Streams the cascade to `dest` via a `.part` temp file, which is
/// removed again on any failure.
fn download(
    url: &str,
    dest: &Path,
    progress: Option<ProgressFn>,
) -> Result<(), CascadeResolveError> {
    let temp_path = dest.with_extension("part");
    let result = fetch_to(url, &temp_path, progress).and_then(|()| {
        fs::rename(&temp_path, dest).map_err(|e| CascadeResolveError::Write {
            path: dest.to_path_buf(),
            source: e,
        })
    });
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn fetch_to(
    url: &str,
    temp_path: &Path,
    progress: Option<ProgressFn>,
) -> Result<(), CascadeResolveError> {
    let write_err = |e| CascadeResolveError::Write {
        path: temp_path.to_path_buf(),
        source: e,
    };

    let mut response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(|e| CascadeResolveError::Download {
            url: url.to_string(),
            source: e,
        })?;

    let total = response.content_length().unwrap_or(0);
    let mut file = fs::File::create(temp_path).map_err(write_err)?;

    let mut downloaded: u64 = 0;
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = response.read(&mut buf).map_err(write_err)?;
        if n == 0 {
            break;
        }
        file.write_all(&buf[..n]).map_err(write_err)?;
        downloaded += n as u64;
        if let Some(ref cb) = progress {
            cb(downloaded, total);
        }
    }
    file.flush().map_err(write_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_path_is_returned_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cascade.xml");
        fs::write(&path, "<cascade/>").unwrap();
        let resolved = resolve(Some(&path), None).unwrap();
        assert_eq!(resolved, path);
    }

    #[test]
    fn test_missing_override_path_is_an_error() {
        let result = resolve(Some(Path::new("/nonexistent/cascade.xml")), None);
        assert!(matches!(result, Err(CascadeResolveError::Missing(_))));
    }

    #[test]
    fn test_cache_dir_ends_with_models() {
        let dir = cascade_cache_dir().unwrap();
        assert!(dir.ends_with("facewatch/models"));
    }
}
