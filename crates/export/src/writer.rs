use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::ExportError;

/// Write `contents` to `path`, flushing before the file handle is dropped.
pub(crate) fn write_artifact(path: &Path, contents: &str) -> Result<u64, ExportError> {
    let write = || -> std::io::Result<()> {
        let file = fs::File::create(path)?;
        let mut buf = BufWriter::new(file);
        buf.write_all(contents.as_bytes())?;
        buf.flush()
    };
    write().map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(contents.len() as u64)
}

pub(crate) fn ensure_dir(dir: &Path) -> Result<(), ExportError> {
    fs::create_dir_all(dir).map_err(|source| ExportError::Write {
        path: dir.to_path_buf(),
        source,
    })
}
