use std::alloc::{Layout, alloc_zeroed, dealloc, handle_alloc_error};
use std::fs::{File, OpenOptions};
use std::io;
use std::os::fd::AsRawFd;
use std::os::unix::fs::{FileExt, FileTypeExt, OpenOptionsExt};
use std::path::{Path, PathBuf};
use std::ptr::NonNull;
use std::time::{Duration, Instant};

use nix::ioctl_read;
use thiserror::Error;

// BLKGETSIZE64: total device size in bytes, _IOR(0x12, 114, u64)
ioctl_read!(blkgetsize64, 0x12, 114, u64);

/// O_DIRECT wants sector alignment; page alignment satisfies every sector
/// size in practice.
pub const DIRECT_IO_ALIGN: usize = 4096;

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("failed to open {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to query size of {path}")]
    Size {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path} is smaller than one {block_size}-byte block")]
    TooSmall { path: PathBuf, block_size: usize },
    #[error("block size must be a positive multiple of 512, got {0}")]
    BadBlockSize(usize),
    #[error("read failed at offset {offset}")]
    Read {
        offset: u64,
        #[source]
        source: io::Error,
    },
    #[error("short read at offset {offset}: {got} of {want} bytes")]
    ShortRead { offset: u64, got: usize, want: usize },
}

// ---------------------------------------------------------------------------
// Device – the measurement target
// ---------------------------------------------------------------------------

/// An open measurement target: a block device, or a regular file for
/// dry runs and tests.
#[derive(Debug)]
pub struct Device {
    file: File,
    size: u64,
}

impl Device {
    /// Open read-only, with O_DIRECT when `direct` is set.  Filesystems that
    /// reject O_DIRECT (tmpfs) get a buffered fallback with a warning, so
    /// the page cache will skew those timings.
    pub fn open(path: &Path, direct: bool) -> Result<Self, DeviceError> {
        let open_err = |source| DeviceError::Open {
            path: path.to_path_buf(),
            source,
        };

        let file = match Self::open_with_flags(path, direct) {
            Ok(file) => file,
            Err(e) if direct && e.raw_os_error() == Some(libc::EINVAL) => {
                log::warn!(
                    "{} does not support O_DIRECT, falling back to buffered reads",
                    path.display()
                );
                Self::open_with_flags(path, false).map_err(open_err)?
            }
            Err(e) => return Err(open_err(e)),
        };

        let size = Self::query_size(&file, path)?;
        Ok(Device { file, size })
    }

    fn open_with_flags(path: &Path, direct: bool) -> io::Result<File> {
        let mut options = OpenOptions::new();
        options.read(true);
        if direct {
            options.custom_flags(libc::O_DIRECT);
        }
        options.open(path)
    }

    /// Block devices report their size via ioctl; regular files via stat.
    fn query_size(file: &File, path: &Path) -> Result<u64, DeviceError> {
        let size_err = |source| DeviceError::Size {
            path: path.to_path_buf(),
            source,
        };

        let metadata = file.metadata().map_err(size_err)?;
        if !metadata.file_type().is_block_device() {
            return Ok(metadata.len());
        }

        let mut size: u64 = 0;
        // SAFETY: the fd is open for the lifetime of `file` and the kernel
        // writes a single u64 through the pointer.
        unsafe { blkgetsize64(file.as_raw_fd(), &mut size) }
            .map_err(|errno| size_err(io::Error::from(errno)))?;
        Ok(size)
    }

    /// Total size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Read one full buffer at `offset`, returning the elapsed wall-clock
    /// time of the read call.  A partial read is an error.
    pub fn timed_read_at(
        &self,
        offset: u64,
        buf: &mut AlignedBuf,
    ) -> Result<Duration, DeviceError> {
        let slice = buf.as_mut_slice();
        let want = slice.len();

        let start = Instant::now();
        let got = self
            .file
            .read_at(slice, offset)
            .map_err(|source| DeviceError::Read { offset, source })?;
        let elapsed = start.elapsed();

        if got != want {
            return Err(DeviceError::ShortRead { offset, got, want });
        }
        Ok(elapsed)
    }
}

// ---------------------------------------------------------------------------
// AlignedBuf – sector-aligned read buffer
// ---------------------------------------------------------------------------

/// Heap buffer aligned for O_DIRECT transfers.
pub struct AlignedBuf {
    ptr: NonNull<u8>,
    layout: Layout,
}

impl AlignedBuf {
    /// `len` must be a positive multiple of 512 (the O_DIRECT transfer
    /// granularity).
    pub fn new(len: usize) -> Result<Self, DeviceError> {
        if len == 0 || len % 512 != 0 {
            return Err(DeviceError::BadBlockSize(len));
        }
        let layout = Layout::from_size_align(len, DIRECT_IO_ALIGN)
            .map_err(|_| DeviceError::BadBlockSize(len))?;

        // SAFETY: layout has non-zero size.
        let ptr = unsafe { alloc_zeroed(layout) };
        let Some(ptr) = NonNull::new(ptr) else {
            handle_alloc_error(layout)
        };
        Ok(AlignedBuf { ptr, layout })
    }

    pub fn len(&self) -> usize {
        self.layout.size()
    }

    pub fn is_empty(&self) -> bool {
        self.layout.size() == 0
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        // SAFETY: ptr is valid for layout.size() bytes and exclusively
        // borrowed through &mut self.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.layout.size()) }
    }
}

impl Drop for AlignedBuf {
    fn drop(&mut self) {
        // SAFETY: allocated in new() with this exact layout.
        unsafe { dealloc(self.ptr.as_ptr(), self.layout) }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn aligned_buf_is_aligned() {
        let mut buf = AlignedBuf::new(4096).expect("alloc");
        assert_eq!(buf.len(), 4096);
        assert_eq!(buf.as_mut_slice().as_ptr() as usize % DIRECT_IO_ALIGN, 0);
    }

    #[test]
    fn rejects_unaligned_block_sizes() {
        assert!(matches!(AlignedBuf::new(0), Err(DeviceError::BadBlockSize(0))));
        assert!(matches!(
            AlignedBuf::new(1000),
            Err(DeviceError::BadBlockSize(1000))
        ));
    }

    #[test]
    fn reads_regular_file_without_direct_io() {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(&vec![7u8; 2048]).expect("fill");

        let device = Device::open(file.path(), false).expect("open");
        assert_eq!(device.size(), 2048);

        let mut buf = AlignedBuf::new(512).expect("alloc");
        device.timed_read_at(1536, &mut buf).expect("read");
        assert!(buf.as_mut_slice().iter().all(|&b| b == 7));
    }

    #[test]
    fn short_read_past_end_is_an_error() {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(&vec![0u8; 1024]).expect("fill");

        let device = Device::open(file.path(), false).expect("open");
        let mut buf = AlignedBuf::new(512).expect("alloc");
        let err = device.timed_read_at(768, &mut buf).unwrap_err();
        assert!(matches!(err, DeviceError::ShortRead { got: 256, .. }));
    }

    #[test]
    fn missing_path_fails_to_open() {
        let err = Device::open(Path::new("/nonexistent/seekscope-dev"), false).unwrap_err();
        assert!(matches!(err, DeviceError::Open { .. }));
    }
}
