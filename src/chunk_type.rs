use core::fmt::{Debug, Display, Write};

/// The 4-byte type tag of a PNG chunk.
///
/// Tags are meant to be ascii letters, but nothing enforces that. The `Debug`
/// and `Display` impls just `as` cast each byte into a character, which is
/// still safe for junk bytes, you just might get odd characters.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ChunkType(pub [u8; 4]);
#[allow(nonstandard_style)]
impl ChunkType {
  /// Image header
  pub const IHDR: Self = Self(*b"IHDR");
  /// Image data
  pub const IDAT: Self = Self(*b"IDAT");
  /// Image end
  pub const IEND: Self = Self(*b"IEND");
  /// Animation control
  pub const acTL: Self = Self(*b"acTL");
  /// Frame control
  pub const fcTL: Self = Self(*b"fcTL");
  /// Frame data
  pub const fdAT: Self = Self(*b"fdAT");

  /// The tag bytes.
  #[inline]
  #[must_use]
  pub const fn as_bytes(&self) -> &[u8; 4] {
    &self.0
  }
}
impl From<[u8; 4]> for ChunkType {
  #[inline]
  #[must_use]
  fn from(array: [u8; 4]) -> Self {
    Self(array)
  }
}
impl Debug for ChunkType {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_char('\"')?;
    Display::fmt(self, f)?;
    f.write_char('\"')?;
    Ok(())
  }
}
impl Display for ChunkType {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    for ch in self.0.iter().copied().map(|u| u as char) {
      f.write_char(ch)?;
    }
    Ok(())
  }
}

#[test]
fn test_chunk_type_fmt() {
  assert_eq!(format!("{}", ChunkType::fdAT), "fdAT");
  assert_eq!(format!("{:?}", ChunkType::IHDR), "\"IHDR\"");
}
