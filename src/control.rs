//! The fixed-layout chunk payloads: `IHDR`, `acTL`, and `fcTL`.
//!
//! * [APNG Specification](https://wiki.mozilla.org/APNG_Specification)

use bytemuck::{bytes_of, Pod, Zeroable};

use crate::*;

/// Image Header
///
/// Only the dimensions matter for splicing, the rest is kept for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHeader {
  /// width in pixels
  pub width: u32,
  /// height in pixels
  pub height: u32,
  /// bits per channel
  pub bit_depth: u8,
  /// pixel color type (0, 2, 3, 4, or 6 in a valid PNG)
  pub color_type: u8,
  /// if the image data is stored interlaced.
  pub is_interlaced: bool,
}
impl TryFrom<&[u8]> for ImageHeader {
  type Error = ApngError;
  fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
    match value {
      [w0, w1, w2, w3, h0, h1, h2, h3, bit_depth, color_type, _compression_method, _filter_method, interlace_method] => {
        Ok(Self {
          width: u32::from_be_bytes([*w0, *w1, *w2, *w3]),
          height: u32::from_be_bytes([*h0, *h1, *h2, *h3]),
          bit_depth: *bit_depth,
          color_type: *color_type,
          is_interlaced: *interlace_method != 0,
        })
      }
      _ => Err(ApngError::Format(format!("IHDR payload must be 13 bytes, found {}", value.len()))),
    }
  }
}

/// Animation Control payload.
///
/// Written exactly once, before any frame data.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct AnimationControl {
  num_frames: U32BE,
  num_plays: U32BE,
}
impl AnimationControl {
  /// `num_plays` of 0 means "loop forever".
  #[inline]
  #[must_use]
  pub const fn new(num_frames: u32, num_plays: u32) -> Self {
    Self { num_frames: U32BE::from_u32(num_frames), num_plays: U32BE::from_u32(num_plays) }
  }
  /// Number of frames in the animation.
  #[inline]
  #[must_use]
  pub const fn num_frames(&self) -> u32 {
    self.num_frames.to_u32()
  }
  /// Number of times to loop the animation, 0 for infinite.
  #[inline]
  #[must_use]
  pub const fn num_plays(&self) -> u32 {
    self.num_plays.to_u32()
  }
  /// The payload bytes, as they go on the wire.
  #[inline]
  #[must_use]
  pub fn as_bytes(&self) -> &[u8] {
    bytes_of(self)
  }
}
impl TryFrom<&[u8]> for AnimationControl {
  type Error = ApngError;
  #[inline]
  fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
    bytemuck::try_pod_read_unaligned(value)
      .map_err(|_| ApngError::Format(format!("acTL payload must be 8 bytes, found {}", value.len())))
  }
}
impl core::fmt::Debug for AnimationControl {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("AnimationControl")
      .field("num_frames", &self.num_frames)
      .field("num_plays", &self.num_plays)
      .finish()
  }
}

/// Frame Control payload.
///
/// Frames spliced by this crate always cover the whole canvas, so the offsets
/// are zero, the dispose op is "none" and the blend op is "source".
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct FrameControl {
  sequence_number: U32BE,
  width: U32BE,
  height: U32BE,
  x_offset: U32BE,
  y_offset: U32BE,
  delay_num: U16BE,
  delay_den: U16BE,
  dispose_op: u8,
  blend_op: u8,
}
impl FrameControl {
  /// A full-canvas frame.
  ///
  /// The denominator is left 0, which the format treats as 100, so
  /// `delay_num` is in hundredths of a second.
  #[inline]
  #[must_use]
  pub const fn new(sequence_number: u32, width: u32, height: u32, delay_num: u16) -> Self {
    Self {
      sequence_number: U32BE::from_u32(sequence_number),
      width: U32BE::from_u32(width),
      height: U32BE::from_u32(height),
      x_offset: U32BE::from_u32(0),
      y_offset: U32BE::from_u32(0),
      delay_num: U16BE::from_u16(delay_num),
      delay_den: U16BE::from_u16(0),
      dispose_op: 0,
      blend_op: 0,
    }
  }
  /// Sequence number shared with `fdAT` chunks.
  #[inline]
  #[must_use]
  pub const fn sequence_number(&self) -> u32 {
    self.sequence_number.to_u32()
  }
  /// Frame width in pixels.
  #[inline]
  #[must_use]
  pub const fn width(&self) -> u32 {
    self.width.to_u32()
  }
  /// Frame height in pixels.
  #[inline]
  #[must_use]
  pub const fn height(&self) -> u32 {
    self.height.to_u32()
  }
  /// `(x_offset, y_offset)` on the canvas.
  #[inline]
  #[must_use]
  pub const fn offset(&self) -> (u32, u32) {
    (self.x_offset.to_u32(), self.y_offset.to_u32())
  }
  /// Delay as `(numerator, denominator)`.
  #[inline]
  #[must_use]
  pub const fn delay(&self) -> (u16, u16) {
    (self.delay_num.to_u16(), self.delay_den.to_u16())
  }
  /// `(dispose_op, blend_op)`
  #[inline]
  #[must_use]
  pub const fn ops(&self) -> (u8, u8) {
    (self.dispose_op, self.blend_op)
  }
  /// The payload bytes, as they go on the wire.
  #[inline]
  #[must_use]
  pub fn as_bytes(&self) -> &[u8] {
    bytes_of(self)
  }
}
impl TryFrom<&[u8]> for FrameControl {
  type Error = ApngError;
  #[inline]
  fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
    bytemuck::try_pod_read_unaligned(value)
      .map_err(|_| ApngError::Format(format!("fcTL payload must be 26 bytes, found {}", value.len())))
  }
}
impl core::fmt::Debug for FrameControl {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("FrameControl")
      .field("sequence_number", &self.sequence_number)
      .field("width", &self.width)
      .field("height", &self.height)
      .field("delay", &self.delay())
      .finish()
  }
}

/// Converts a delay in milliseconds into the hundredths of a second that
/// `fcTL` stores, or `None` if that's too long for a `u16`.
#[inline]
#[must_use]
pub fn try_delay_ms_to_num(delay_ms: u32) -> Option<u16> {
  u16::try_from(delay_ms / 10).ok()
}
