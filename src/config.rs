//! Settings for a run, fixed once at startup.

use std::{
  fs::File,
  io::{BufWriter, Read},
  path::PathBuf,
};

use crate::{error::InFileExt, *};

/// How the animation gets put together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssembleOptions {
  /// Largest on-wire size of any chunk read or written.
  ///
  /// Input chunks past this size are a format error, output image data is
  /// cut up to stay at least [`DATA_CHUNK_OVERHEAD`] bytes under it.
  pub max_chunk_size: usize,
  /// Times the animation plays, 0 for forever.
  pub loop_count: u32,
  /// Check the CRC of every chunk read.
  pub verify_crc: bool,
}
impl Default for AssembleOptions {
  #[inline]
  #[must_use]
  fn default() -> Self {
    Self { max_chunk_size: MAX_CHUNK_SIZE, loop_count: 0, verify_crc: true }
  }
}
impl AssembleOptions {
  /// A chunk reader set up with these options.
  #[inline]
  pub fn reader<R: Read>(&self, r: R) -> ChunkReader<R> {
    ChunkReader::with_limit(r, self.max_chunk_size).verify_crc(self.verify_crc)
  }
}

/// Everything one run of the program needs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Config {
  /// Directory holding the frame PNGs.
  pub input_dir: PathBuf,
  /// Delay list, one delay in milliseconds per line.
  pub delay_file: PathBuf,
  /// Where the APNG goes.
  pub output: PathBuf,
  /// Options for the assembly itself.
  pub options: AssembleOptions,
}
impl Default for Config {
  #[inline]
  #[must_use]
  fn default() -> Self {
    Self {
      input_dir: PathBuf::from("frames"),
      delay_file: PathBuf::from("delays.txt"),
      output: PathBuf::from("output.png"),
      options: AssembleOptions::default(),
    }
  }
}
impl Config {
  /// The frames this config names, with their delays.
  pub fn frames(&self) -> ApngResult<Vec<Frame>> {
    let delays = read_delays(&self.delay_file)?;
    let paths = discover_frames(&self.input_dir)?;
    Ok(frames_with_delays(paths, &delays))
  }

  /// Does the whole run, writing the output file.
  pub fn run(&self) -> ApngResult<AssemblySummary> {
    let frames = self.frames()?;
    if frames.is_empty() {
      return Err(ApngError::NoFrames.in_file(&self.input_dir));
    }
    let out = File::create(&self.output).in_file(&self.output)?;
    assemble_files(BufWriter::new(out), &frames, &self.options)
  }
}
