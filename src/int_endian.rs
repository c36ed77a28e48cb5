//! Big-endian integers with an alignment of 1.
//!
//! PNG stores every multi-byte integer big-endian. These newtypes let a
//! fixed chunk payload be described as a plain `#[repr(C)]` struct and then
//! viewed as bytes with [`bytemuck`].

use bytemuck::{Pod, Zeroable};

/// A `u16` stored as big-endian bytes.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct U16BE([u8; 2]);
impl U16BE {
  /// Convert this value to a native `u16`
  #[inline]
  #[must_use]
  pub const fn to_u16(self) -> u16 {
    u16::from_be_bytes(self.0)
  }
  /// Make a value from a native `u16`
  #[inline]
  #[must_use]
  pub const fn from_u16(u: u16) -> Self {
    Self(u.to_be_bytes())
  }
}
impl core::fmt::Debug for U16BE {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    core::fmt::Debug::fmt(&self.to_u16(), f)
  }
}

/// A `u32` stored as big-endian bytes.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct U32BE([u8; 4]);
impl U32BE {
  /// Convert this value to a native `u32`
  #[inline]
  #[must_use]
  pub const fn to_u32(self) -> u32 {
    u32::from_be_bytes(self.0)
  }
  /// Make a value from a native `u32`
  #[inline]
  #[must_use]
  pub const fn from_u32(u: u32) -> Self {
    Self(u.to_be_bytes())
  }
}
impl core::fmt::Debug for U32BE {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    core::fmt::Debug::fmt(&self.to_u32(), f)
  }
}

/// Reads a big-endian `u32` from the first four bytes.
///
/// Gives `None` if there's less than four bytes.
#[inline]
#[must_use]
pub fn u32_be(bytes: &[u8]) -> Option<u32> {
  let head: [u8; 4] = bytes.get(..4)?.try_into().ok()?;
  Some(u32::from_be_bytes(head))
}
