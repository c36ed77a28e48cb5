#![forbid(unsafe_code)]

//! Moves one PNG's image data into the animation stream.
//!
//! A PNG's `IDAT` chunks together form a single zlib stream, and the chunk
//! boundaries within that stream carry no meaning. That means the data can
//! be lifted out, glued back together, and cut up again at whatever sizes we
//! like, as long as the bytes stay in order.
//!
//! The first frame of an APNG is also the "default image", so its data stays
//! in `IDAT` chunks. Every later frame goes into `fdAT` chunks, which are the
//! same thing with a 4 byte sequence number on the front.

use std::io::{Read, Write};

use crate::*;

/// How a frame's image data gets chunked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameMode {
  /// The first frame: plain `IDAT` chunks.
  First,
  /// Every other frame: `fdAT` chunks that each use a sequence number.
  Subsequent,
}
impl FrameMode {
  /// The mode for the frame at a given position in the animation.
  #[inline]
  #[must_use]
  pub const fn for_index(index: usize) -> Self {
    if index == 0 {
      Self::First
    } else {
      Self::Subsequent
    }
  }

  /// The chunk type that image data goes out as.
  #[inline]
  #[must_use]
  pub const fn chunk_type(self) -> ChunkType {
    match self {
      Self::First => ChunkType::IDAT,
      Self::Subsequent => ChunkType::fdAT,
    }
  }
}

/// What splicing one frame produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FrameStats {
  /// Image data chunks written for the frame.
  pub data_chunks: usize,
  /// Compressed image bytes written for the frame.
  pub image_bytes: usize,
}

/// Splices the image data of one input file into a [`ChunkWriter`].
///
/// The splicer borrows the writer for one frame, using the writer's sequence
/// counter for the `fcTL` and for every `fdAT`.
#[derive(Debug)]
pub struct FrameSplicer<'w, W> {
  writer: &'w mut ChunkWriter<W>,
  mode: FrameMode,
  max_data_len: usize,
  buf: Vec<u8>,
  stats: FrameStats,
}
impl<'w, W: Write> FrameSplicer<'w, W> {
  /// `max_chunk_size` bounds the on-wire size of every data chunk written.
  pub fn new(
    writer: &'w mut ChunkWriter<W>, mode: FrameMode, max_chunk_size: usize,
  ) -> ApngResult<Self> {
    if max_chunk_size < MIN_CHUNK_SIZE {
      return Err(ApngError::Unsupported(format!(
        "chunk size limit of {max_chunk_size} is below the minimum of {MIN_CHUNK_SIZE}"
      )));
    }
    let max_data_len = max_chunk_size - DATA_CHUNK_OVERHEAD;
    Ok(Self { writer, mode, max_data_len, buf: Vec::new(), stats: FrameStats::default() })
  }

  /// Splices a whole PNG stream: signature, header, and every chunk up to and
  /// including `IEND`.
  ///
  /// The input's own `IHDR` is skipped, the frame uses the `width` and
  /// `height` given. `delay_num` is in hundredths of a second.
  pub fn splice<R: Read>(
    mut self, reader: &mut ChunkReader<R>, width: u32, height: u32, delay_num: u16,
  ) -> ApngResult<FrameStats> {
    reader.check_signature()?;
    reader.read_header()?;

    let seq = self.writer.next_sequence()?;
    self.writer.write_frame_control(seq, width, height, delay_num)?;

    self.begin_chunk()?;
    loop {
      let wire_size = reader.next_chunk()?;
      match reader.chunk_type() {
        ChunkType::IDAT => self.push(reader.data(), wire_size)?,
        ChunkType::IEND => break,
        _ => (),
      }
    }
    self.finish()
  }

  /// Bytes in the buffer that came from the input.
  #[inline]
  fn image_len(&self) -> usize {
    match self.mode {
      FrameMode::First => self.buf.len(),
      FrameMode::Subsequent => self.buf.len().saturating_sub(4),
    }
  }

  /// Starts a new data chunk, which means taking a sequence number for `fdAT`.
  fn begin_chunk(&mut self) -> ApngResult<()> {
    if self.mode == FrameMode::Subsequent {
      let seq = self.writer.next_sequence()?;
      self.buf.extend_from_slice(&seq.to_be_bytes());
    }
    Ok(())
  }

  fn emit(&mut self) -> ApngResult<()> {
    self.writer.write_data_chunk(&self.buf, self.mode.chunk_type())?;
    self.stats.data_chunks += 1;
    self.stats.image_bytes += self.image_len();
    self.buf.clear();
    Ok(())
  }

  /// Adds one input chunk's data, flushing first if the chunk won't fit.
  ///
  /// The fit check uses the input chunk's whole wire size, not just its data.
  fn push(&mut self, mut data: &[u8], wire_size: usize) -> ApngResult<()> {
    if self.buf.len() + wire_size > self.max_data_len && self.image_len() > 0 {
      self.emit()?;
      self.begin_chunk()?;
    }
    // a single input chunk can still be bigger than one output chunk allows
    while self.buf.len() + data.len() > self.max_data_len {
      let mut cut = self.max_data_len - self.buf.len();
      // an `IDAT` tail of 4 bytes or less would be dropped by `finish`
      let rest = data.len() - cut;
      if self.mode == FrameMode::First && rest <= 4 {
        cut -= 5 - rest;
      }
      let (head, tail) = data.split_at(cut);
      self.buf.extend_from_slice(head);
      self.emit()?;
      self.begin_chunk()?;
      data = tail;
    }
    self.buf.extend_from_slice(data);
    Ok(())
  }

  /// Writes whatever is left, unless it's 4 bytes or less.
  ///
  /// For `fdAT` that's a chunk that would hold only its sequence number, and
  /// the number is given back. For `IDAT` such a fragment is dropped.
  fn finish(mut self) -> ApngResult<FrameStats> {
    if self.buf.len() > 4 {
      self.emit()?;
    } else if self.mode == FrameMode::Subsequent {
      log::debug!("dropping empty trailing fdAT");
      self.writer.give_back_sequence();
    }
    Ok(self.stats)
  }
}

/// Gathers all the `IDAT` data of one PNG stream into a single buffer.
///
/// This is the data that [`FrameSplicer::splice`] re-chunks, without writing
/// anything.
pub fn collect_image_data<R: Read>(reader: &mut ChunkReader<R>) -> ApngResult<Vec<u8>> {
  reader.check_signature()?;
  reader.read_header()?;
  let mut out = Vec::new();
  loop {
    reader.next_chunk()?;
    match reader.chunk_type() {
      ChunkType::IDAT => out.extend_from_slice(reader.data()),
      ChunkType::IEND => return Ok(out),
      _ => (),
    }
  }
}
