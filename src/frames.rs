//! Working out the frame list: which files, in what order, shown how long.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{error::InFileExt, *};

/// Delay used for any frame that doesn't get one from the delay list.
pub const DEFAULT_DELAY_MS: u32 = 100;

/// One frame of the animation: a PNG file and how long to show it.
///
/// A frame's position in the list is its position in the animation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Frame {
  /// The frame's PNG file.
  pub path: PathBuf,
  /// How long the frame shows, in milliseconds.
  pub delay_ms: u32,
}
impl Frame {
  /// A frame from a path and a delay.
  #[inline]
  #[must_use]
  pub fn new(path: impl Into<PathBuf>, delay_ms: u32) -> Self {
    Self { path: path.into(), delay_ms }
  }
}

/// Finds the `.png` files directly inside `dir`, sorted by file name.
///
/// Sub-directories aren't searched.
pub fn discover_frames(dir: &Path) -> ApngResult<Vec<PathBuf>> {
  let mut out = Vec::new();
  for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true).sort_by_file_name()
  {
    let entry = entry.map_err(std::io::Error::from).in_file(dir)?;
    if entry.file_type().is_file() && entry.file_name().to_string_lossy().ends_with(".png") {
      out.push(entry.into_path());
    }
  }
  Ok(out)
}

/// Reads a delay list: one delay in milliseconds per line.
///
/// A delay file that can't be opened just means there's no delays, which
/// gets a warning. Lines that aren't a non-negative integer are skipped.
pub fn read_delays(path: &Path) -> ApngResult<Vec<u32>> {
  let text = match std::fs::read(path) {
    Ok(bytes) => bytes,
    Err(e) => {
      log::warn!("can't open delay file {}: {e}", path.display());
      return Ok(Vec::new());
    }
  };
  Ok(parse_delays(&String::from_utf8_lossy(&text)))
}

/// Parses the text of a delay list.
#[must_use]
pub fn parse_delays(text: &str) -> Vec<u32> {
  text
    .lines()
    .filter_map(|line| match line.trim().parse::<u32>() {
      Ok(ms) => Some(ms),
      Err(e) => {
        log::debug!("skipping delay line {line:?}: {e}");
        None
      }
    })
    .collect()
}

/// Pairs each path with its delay.
///
/// Extra delays are ignored, missing ones are [`DEFAULT_DELAY_MS`].
#[must_use]
pub fn frames_with_delays(paths: Vec<PathBuf>, delays: &[u32]) -> Vec<Frame> {
  paths
    .into_iter()
    .enumerate()
    .map(|(i, path)| Frame::new(path, delays.get(i).copied().unwrap_or(DEFAULT_DELAY_MS)))
    .collect()
}
