//! Writing translated circuits next to their sources.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{BatchError, BatchResult};

/// `dir/name.qasm` → `dir/name.<extension>`.
pub fn output_path_for(input: &Path, extension: &str) -> PathBuf {
    input.with_extension(extension)
}

/// Create or truncate `path` and write exactly `bytes` to it.
///
/// If the file was created but writing fails, it is removed again so no
/// truncated output is left behind.
pub fn write_output(path: &Path, bytes: &[u8]) -> BatchResult<()> {
    let mut file = File::create(path).map_err(|e| BatchError::access(path, e))?;
    if let Err(e) = file.write_all(bytes).and_then(|()| file.flush()) {
        drop(file);
        let _ = fs::remove_file(path);
        return Err(BatchError::access(path, e));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_keeps_stem_and_dir() {
        let p = output_path_for(Path::new("/data/circuits/ghz_12.qasm"), "stim");
        assert_eq!(p, PathBuf::from("/data/circuits/ghz_12.stim"));

        let p = output_path_for(Path::new("run.v2.qasm"), "stim");
        assert_eq!(p, PathBuf::from("run.v2.stim"));
    }

    #[test]
    fn test_write_truncates_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.stim");
        fs::write(&path, "a much longer previous content\n").unwrap();

        write_output(&path, b"H 0\n").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"H 0\n");
    }

    #[test]
    fn test_write_into_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("out.stim");
        let err = write_output(&path, b"H 0\n").unwrap_err();
        assert!(matches!(err, BatchError::FileAccess { .. }));
        assert!(!path.exists());
    }
}
