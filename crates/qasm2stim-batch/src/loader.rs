//! Loading QASM sources into a contiguous byte view.

use std::fs::File;
use std::io::{self, Read};
use std::ops::Deref;
use std::path::Path;

use memmap2::Mmap;

use crate::error::{BatchError, BatchResult};

/// The bytes of one source file.
#[derive(Debug)]
pub enum SourceBuffer {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl Deref for SourceBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            SourceBuffer::Mapped(map) => &map[..],
            SourceBuffer::Owned(bytes) => bytes.as_slice(),
        }
    }
}

impl SourceBuffer {
    pub fn is_mapped(&self) -> bool {
        matches!(self, SourceBuffer::Mapped(_))
    }
}

/// Open `path` and return its full contents.
///
/// With `memory_map` set, non-empty files are mapped read-only; otherwise
/// (and for empty files, which cannot be mapped portably) the file is read
/// into an owned buffer.
pub fn load_source(path: &Path, memory_map: bool) -> BatchResult<SourceBuffer> {
    let file = File::open(path).map_err(|e| BatchError::access(path, e))?;
    let metadata = file.metadata().map_err(|e| BatchError::access(path, e))?;
    if !metadata.is_file() {
        return Err(BatchError::access(
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
        ));
    }

    let len = metadata.len();
    if memory_map && len > 0 {
        // SAFETY: the map is read-only and private to this process. If another
        // process truncates the file while it is mapped, reads may fault; inputs
        // are not expected to change during conversion.
        let map = unsafe { Mmap::map(&file) }.map_err(|e| BatchError::access(path, e))?;
        return Ok(SourceBuffer::Mapped(map));
    }

    let capacity = usize::try_from(len).map_err(|_| {
        BatchError::access(
            path,
            io::Error::new(io::ErrorKind::OutOfMemory, "file too large to buffer"),
        )
    })?;
    let mut bytes = Vec::with_capacity(capacity);
    (&file)
        .read_to_end(&mut bytes)
        .map_err(|e| BatchError::access(path, e))?;
    Ok(SourceBuffer::Owned(bytes))
}
