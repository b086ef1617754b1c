use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::errors::{LedgerError, Result};

/// Read and parse a JSON document. Returns `Ok(None)` if the file does not exist.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(LedgerError::PersistenceRead {
                path: path.to_path_buf(),
                detail: e.to_string(),
            });
        }
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| LedgerError::PersistenceRead {
            path: path.to_path_buf(),
            detail: format!("malformed JSON: {e}"),
        })
}

/// Write `value` as pretty-printed JSON.
///
/// The document is written to a temp file in the same directory and
/// renamed over `path`, so readers never observe a partial write.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let write_err = |detail: String| LedgerError::PersistenceWrite {
        path: path.to_path_buf(),
        detail,
    };

    let mut json = serde_json::to_string_pretty(value).map_err(|e| write_err(e.to_string()))?;
    json.push('\n');

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(|e| write_err(e.to_string()))?;
    tmp.write_all(json.as_bytes())
        .map_err(|e| write_err(e.to_string()))?;
    tmp.persist(path).map_err(|e| write_err(e.error.to_string()))?;

    Ok(())
}
