//! Opening the device under test.

use std::fs::{File, OpenOptions};
use std::io::{self, Seek, SeekFrom};
use std::path::Path;

use crate::config::Mode;
use crate::error::{ProbeError, Result};

/// Open a file or block device with the access the mode needs:
/// read-only, write-only, or read-write. Never creates or truncates.
pub fn open(path: &Path, mode: Mode) -> Result<File> {
    OpenOptions::new()
        .read(mode.reads())
        .write(mode.writes())
        .open(path)
        .map_err(|source| ProbeError::Open {
            path: path.to_path_buf(),
            source,
        })
}

/// Length of a seekable handle in bytes, found by seeking to the end.
///
/// The handle's position is restored afterwards. Works for regular files
/// and, on Linux, block devices.
pub fn device_len<D: Seek + ?Sized>(device: &mut D) -> io::Result<u64> {
    let pos = device.stream_position()?;
    let len = device.seek(SeekFrom::End(0))?;
    if pos != len {
        device.seek(SeekFrom::Start(pos))?;
    }
    Ok(len)
}
