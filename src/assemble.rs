//! Drives a whole run: frames in, one APNG out.

use std::{
  fs::File,
  io::{BufReader, Read, Write},
  path::Path,
};

use crate::{error::InFileExt, *};

/// What a finished run wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AssemblySummary {
  /// Frames in the animation.
  pub frames: usize,
  /// Animation chunks written, which is also the sequence numbers used.
  pub animation_chunks: u32,
  /// Image data chunks (`IDAT` and `fdAT`) written.
  pub data_chunks: usize,
  /// Canvas width, from the first frame.
  pub width: u32,
  /// Canvas height, from the first frame.
  pub height: u32,
}
impl core::fmt::Display for AssemblySummary {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    write!(
      f,
      "Wrote {} frames split up in {} animation chunks",
      self.frames, self.animation_chunks
    )
  }
}

/// Copies the signature and `IHDR` of the first frame to the output.
///
/// The header chunk goes out byte for byte, CRC included.
fn copy_header<R: Read, W: Write>(
  reader: &mut ChunkReader<R>, writer: &mut ChunkWriter<W>,
) -> ApngResult<ImageHeader> {
  reader.check_signature()?;
  writer.write_signature()?;
  let header = reader.read_header()?;
  writer.write_raw(&reader.raw_chunk())?;
  Ok(header)
}

/// Assembles frames from any source of PNG streams.
///
/// `open` is called with each frame's path whenever that frame's bytes are
/// needed. The first frame gets opened twice: once for the header, once for
/// its image data.
///
/// All frames must have the same `IHDR` as the first one. That isn't checked.
pub fn assemble_with<W, R, F>(
  out: W, frames: &[Frame], options: &AssembleOptions, mut open: F,
) -> ApngResult<AssemblySummary>
where
  W: Write,
  R: Read,
  F: FnMut(&Path) -> std::io::Result<R>,
{
  let first = frames.first().ok_or(ApngError::NoFrames)?;
  let num_frames = u32::try_from(frames.len())
    .map_err(|_| ApngError::Unsupported(format!("too many frames: {}", frames.len())))?;
  let mut writer = ChunkWriter::new(out);

  let header = {
    let mut reader = options.reader(open(&first.path).in_file(&first.path)?);
    copy_header(&mut reader, &mut writer).in_file(&first.path)?
  };
  log::info!("Image dimensions: {} x {}", header.width, header.height);
  log::debug!("{header:?}");

  writer.write_animation_control(num_frames, options.loop_count)?;

  for (index, frame) in frames.iter().enumerate() {
    log::info!("Encoding: {}", frame.path.display());
    let delay_num = try_delay_ms_to_num(frame.delay_ms).unwrap_or_else(|| {
      log::warn!("{}: delay of {} ms clamped", frame.path.display(), frame.delay_ms);
      u16::MAX
    });
    let mut reader = options.reader(open(&frame.path).in_file(&frame.path)?);
    let stats = FrameSplicer::new(&mut writer, FrameMode::for_index(index), options.max_chunk_size)?
      .splice(&mut reader, header.width, header.height, delay_num)
      .in_file(&frame.path)?;
    log::debug!(
      "{}: {} bytes in {} chunks",
      frame.path.display(),
      stats.image_bytes,
      stats.data_chunks
    );
  }

  writer.write_end()?;
  writer.flush()?;

  Ok(AssemblySummary {
    frames: frames.len(),
    animation_chunks: writer.sequence_count(),
    data_chunks: writer.data_chunk_count(),
    width: header.width,
    height: header.height,
  })
}

/// Assembles frames read from the file system.
pub fn assemble_files<W: Write>(
  out: W, frames: &[Frame], options: &AssembleOptions,
) -> ApngResult<AssemblySummary> {
  assemble_with(out, frames, options, |path| File::open(path).map(BufReader::new))
}
