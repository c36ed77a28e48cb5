//! Serializes chunks to an output stream.

use std::io::Write;

use crate::*;

/// Writes PNG chunks, computing each length and CRC as it goes.
///
/// The writer also owns the animation sequence counter. Every `fcTL` and
/// `fdAT` chunk in an APNG carries the next number of one shared sequence,
/// starting from 0, so that counter lives with the one thing that writes
/// the whole file.
#[derive(Debug)]
pub struct ChunkWriter<W> {
  w: W,
  sequence: u32,
  data_chunks: usize,
}
impl<W: Write> ChunkWriter<W> {
  /// Wraps an output stream. The sequence counter starts at 0.
  #[inline]
  pub fn new(w: W) -> Self {
    Self { w, sequence: 0, data_chunks: 0 }
  }

  /// Writes the 8 byte PNG signature.
  #[inline]
  pub fn write_signature(&mut self) -> ApngResult<()> {
    self.w.write_all(&PNG_SIGNATURE)?;
    Ok(())
  }

  /// Writes pre-framed bytes exactly as given.
  ///
  /// This is how a chunk is copied from an input file unchanged.
  #[inline]
  pub fn write_raw(&mut self, bytes: &[u8]) -> ApngResult<()> {
    self.w.write_all(bytes)?;
    Ok(())
  }

  /// Writes one chunk: length, tag, data, then the CRC of tag and data.
  pub fn write_chunk(&mut self, data: &[u8], chunk_ty: ChunkType) -> ApngResult<()> {
    let length = u32::try_from(data.len()).map_err(|_| {
      ApngError::Unsupported(format!("{chunk_ty} chunk is too large: {}", data.len()))
    })?;
    let crc = png_crc(chunk_ty.as_bytes(), data);
    self.w.write_all(&length.to_be_bytes())?;
    self.w.write_all(chunk_ty.as_bytes())?;
    self.w.write_all(data)?;
    self.w.write_all(&crc.to_be_bytes())?;
    Ok(())
  }

  /// Writes an `acTL` chunk.
  #[inline]
  pub fn write_animation_control(&mut self, num_frames: u32, num_plays: u32) -> ApngResult<()> {
    self.write_chunk(AnimationControl::new(num_frames, num_plays).as_bytes(), ChunkType::acTL)
  }

  /// Writes an `fcTL` chunk for a full-canvas frame.
  ///
  /// `delay_num` is in hundredths of a second.
  #[inline]
  pub fn write_frame_control(
    &mut self, sequence_number: u32, width: u32, height: u32, delay_num: u16,
  ) -> ApngResult<()> {
    let fctl = FrameControl::new(sequence_number, width, height, delay_num);
    self.write_chunk(fctl.as_bytes(), ChunkType::fcTL)
  }

  /// Writes a chunk of image data and counts it.
  #[inline]
  pub(crate) fn write_data_chunk(&mut self, data: &[u8], chunk_ty: ChunkType) -> ApngResult<()> {
    self.write_chunk(data, chunk_ty)?;
    self.data_chunks += 1;
    log::debug!("wrote {chunk_ty} chunk with {} bytes", data.len());
    Ok(())
  }

  /// Writes the zero-length `IEND` chunk.
  #[inline]
  pub fn write_end(&mut self) -> ApngResult<()> {
    self.write_chunk(&[], ChunkType::IEND)
  }

  /// Takes the next sequence number.
  #[inline]
  pub(crate) fn next_sequence(&mut self) -> ApngResult<u32> {
    let n = self.sequence;
    self.sequence = n
      .checked_add(1)
      .ok_or_else(|| ApngError::Unsupported("ran out of animation sequence numbers".into()))?;
    Ok(n)
  }

  /// Gives back the most recently taken sequence number.
  ///
  /// Only for a planned chunk that was never written.
  #[inline]
  pub(crate) fn give_back_sequence(&mut self) {
    self.sequence = self.sequence.saturating_sub(1);
  }

  /// How many sequence numbers have been used so far.
  #[inline]
  #[must_use]
  pub fn sequence_count(&self) -> u32 {
    self.sequence
  }

  /// How many image data chunks (`IDAT` or `fdAT`) have been written.
  #[inline]
  #[must_use]
  pub fn data_chunk_count(&self) -> usize {
    self.data_chunks
  }

  /// Flushes the underlying stream.
  #[inline]
  pub fn flush(&mut self) -> ApngResult<()> {
    self.w.flush()?;
    Ok(())
  }

  /// Unwraps the output stream.
  #[inline]
  pub fn into_inner(self) -> W {
    self.w
  }
}
