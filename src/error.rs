use std::path::{Path, PathBuf};

use thiserror::Error;

/// An error from the `apng_splice` crate.
///
/// Every one of these aborts the run. There's no partial recovery: if a frame
/// can't be read properly then the output file isn't usable anyway.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApngError {
  /// The data isn't laid out like PNG data (bad signature, bad framing, bad
  /// checksum, a missing header, and so on).
  #[error("png: invalid format: {0}")]
  Format(String),

  /// The data is fine but can't be written in PNG's wire format.
  #[error("png: unsupported feature: {0}")]
  Unsupported(String),

  /// Reading or writing failed, including running out of input early.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  /// An animation needs at least one frame.
  #[error("no frames to assemble")]
  NoFrames,

  /// Another error, tagged with the file that caused it.
  #[error("{}: {source}", .path.display())]
  InFile {
    /// The offending file.
    path: PathBuf,
    /// What went wrong with it.
    source: Box<ApngError>,
  },
}
impl ApngError {
  /// Tags this error with the file it came from.
  ///
  /// Errors that already name a file are left alone.
  #[inline]
  #[must_use]
  pub fn in_file(self, path: &Path) -> Self {
    match self {
      e @ Self::InFile { .. } => e,
      e => Self::InFile { path: path.to_path_buf(), source: Box::new(e) },
    }
  }
}

/// Shorthand for a `Result` with an [`ApngError`].
pub type ApngResult<T> = Result<T, ApngError>;

/// Lets a result be tagged with a file path in one call.
pub(crate) trait InFileExt<T> {
  fn in_file(self, path: &Path) -> ApngResult<T>;
}
impl<T, E: Into<ApngError>> InFileExt<T> for Result<T, E> {
  #[inline]
  fn in_file(self, path: &Path) -> ApngResult<T> {
    self.map_err(|e| e.into().in_file(path))
  }
}
