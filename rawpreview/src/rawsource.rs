use std::{
  fmt::Debug,
  fs::File,
  ops::Deref,
  path::{Path, PathBuf},
  sync::Arc,
};

use md5::Digest;
use memmap2::MmapOptions;

use crate::{
  Result,
  preview::{PreviewInfo, PreviewParams, extract_jpeg_preview_with_params, locate_jpeg_preview},
};

/// Input buffer for preview extraction, either memory mapped
/// from a file or held in memory.
pub struct RawSource {
  path: PathBuf,
  inner: RawSourceImpl,
}

enum RawSourceImpl {
  Memmap(memmap2::Mmap),
  Memory(Arc<Vec<u8>>),
}

impl RawSource {
  pub fn new(path: &Path) -> Result<Self> {
    let file = File::open(path)?;
    let path = path.canonicalize().unwrap_or_else(|_| path.to_owned());
    // Zero sized files can't be mapped
    if file.metadata()?.len() == 0 {
      return Ok(Self::new_from_shared_vec(Arc::new(Vec::new())).with_path(path));
    }
    let mmap = unsafe { MmapOptions::new().map(&file)? };
    #[cfg(unix)]
    {
      mmap.advise(memmap2::Advice::Sequential)?;
    }
    Ok(Self {
      path,
      inner: RawSourceImpl::Memmap(mmap),
    })
  }

  pub fn new_from_shared_vec(buf: Arc<Vec<u8>>) -> Self {
    Self {
      path: PathBuf::default(),
      inner: RawSourceImpl::Memory(buf),
    }
  }

  pub fn new_from_slice(buf: &[u8]) -> Self {
    Self::new_from_shared_vec(Arc::new(Vec::from(buf)))
  }

  pub fn with_path(self, path: impl AsRef<Path>) -> Self {
    Self {
      path: path.as_ref().to_owned(),
      inner: self.inner,
    }
  }

  /// Calculate digest for file
  pub fn digest(&self) -> Digest {
    md5::compute(self.buf())
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn buf(&self) -> &[u8] {
    self.deref()
  }

  pub fn locate_preview(&self, params: &PreviewParams) -> Result<Option<PreviewInfo>> {
    locate_jpeg_preview(self.buf(), params)
  }

  pub fn extract_preview(&self, params: &PreviewParams) -> Result<Option<Vec<u8>>> {
    extract_jpeg_preview_with_params(self.buf(), params)
  }
}

impl Deref for RawSource {
  type Target = [u8];

  fn deref(&self) -> &Self::Target {
    match &self.inner {
      RawSourceImpl::Memmap(mmap) => mmap.deref(),
      RawSourceImpl::Memory(mem) => mem.deref(),
    }
  }
}

impl Debug for RawSource {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("RawSource").field("path", &self.path).finish()
  }
}
