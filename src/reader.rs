#![forbid(unsafe_code)]

//! Pulls chunks out of a PNG byte stream, one at a time.

use std::io::Read;

use crate::*;

/// Reads successive chunks from a PNG stream.
///
/// Unlike an iterator over an in-memory slice, this holds one chunk at a time
/// in its own buffer. The buffer grows as needed, up to the configured limit,
/// and a chunk whose declared length goes past that limit is a format error.
///
/// After a successful [`next_chunk`](Self::next_chunk) the chunk is available
/// through [`chunk_type`](Self::chunk_type) and [`data`](Self::data) until
/// the next call.
#[derive(Debug)]
pub struct ChunkReader<R> {
  r: R,
  buf: Vec<u8>,
  chunk_ty: ChunkType,
  declared_crc: u32,
  max_chunk_size: usize,
  verify_crc: bool,
}
impl<R: Read> ChunkReader<R> {
  /// A reader with the default size limit that checks CRCs.
  #[inline]
  pub fn new(r: R) -> Self {
    Self::with_limit(r, MAX_CHUNK_SIZE)
  }

  /// A reader that rejects chunks bigger than `max_chunk_size` on the wire.
  #[inline]
  pub fn with_limit(r: R, max_chunk_size: usize) -> Self {
    Self {
      r,
      buf: Vec::new(),
      chunk_ty: ChunkType::default(),
      declared_crc: 0,
      max_chunk_size,
      verify_crc: true,
    }
  }

  /// Sets if each chunk's declared CRC is checked against its contents.
  #[inline]
  #[must_use]
  pub fn verify_crc(mut self, verify: bool) -> Self {
    self.verify_crc = verify;
    self
  }

  /// Consumes the 8 byte PNG signature, which must match exactly.
  pub fn check_signature(&mut self) -> ApngResult<()> {
    let mut sig = [0_u8; 8];
    self.r.read_exact(&mut sig)?;
    if sig != PNG_SIGNATURE {
      return Err(ApngError::Format("not a PNG file".into()));
    }
    Ok(())
  }

  /// Reads the next chunk, giving its total size on the wire.
  ///
  /// That's the data length plus 12 bytes of framing (length, tag, CRC).
  pub fn next_chunk(&mut self) -> ApngResult<usize> {
    let mut head = [0_u8; 8];
    self.r.read_exact(&mut head)?;
    let [l0, l1, l2, l3, t0, t1, t2, t3] = head;
    let length = u32::from_be_bytes([l0, l1, l2, l3]) as usize;
    self.chunk_ty = ChunkType([t0, t1, t2, t3]);

    let wire_size = length.saturating_add(CHUNK_FRAMING);
    if wire_size > self.max_chunk_size {
      return Err(ApngError::Format(format!(
        "{ty} chunk of {length} bytes exceeds the {max} byte chunk limit",
        ty = self.chunk_ty,
        max = self.max_chunk_size
      )));
    }

    self.buf.clear();
    self.buf.resize(length, 0);
    self.r.read_exact(&mut self.buf)?;
    let mut crc_bytes = [0_u8; 4];
    self.r.read_exact(&mut crc_bytes)?;
    self.declared_crc = u32::from_be_bytes(crc_bytes);

    if self.verify_crc {
      let actual = png_crc(self.chunk_ty.as_bytes(), &self.buf);
      if actual != self.declared_crc {
        return Err(ApngError::Format(format!(
          "{ty} chunk CRC mismatch: declared {declared:08X}, actual {actual:08X}",
          ty = self.chunk_ty,
          declared = self.declared_crc
        )));
      }
    }
    log::trace!("{:?} chunk, {} bytes", self.chunk_ty, length);
    Ok(wire_size)
  }

  /// Type of the current chunk.
  #[inline]
  #[must_use]
  pub fn chunk_type(&self) -> ChunkType {
    self.chunk_ty
  }

  /// Data of the current chunk.
  #[inline]
  #[must_use]
  pub fn data(&self) -> &[u8] {
    &self.buf
  }

  /// CRC value stored after the current chunk.
  #[inline]
  #[must_use]
  pub fn declared_crc(&self) -> u32 {
    self.declared_crc
  }

  /// Reads the header chunk, which must come first.
  pub fn read_header(&mut self) -> ApngResult<ImageHeader> {
    self.next_chunk()?;
    if self.chunk_ty != ChunkType::IHDR {
      return Err(ApngError::Format(format!("expected IHDR first, found {}", self.chunk_ty)));
    }
    ImageHeader::try_from(self.data())
  }

  /// Re-serializes the current chunk exactly as it was read.
  #[must_use]
  pub fn raw_chunk(&self) -> Vec<u8> {
    let mut out = Vec::with_capacity(self.buf.len() + CHUNK_FRAMING);
    out.extend_from_slice(&(self.buf.len() as u32).to_be_bytes());
    out.extend_from_slice(self.chunk_ty.as_bytes());
    out.extend_from_slice(&self.buf);
    out.extend_from_slice(&self.declared_crc.to_be_bytes());
    out
  }
}
