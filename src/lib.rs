//! A crate for splicing PNG frames into an animated PNG (APNG).
//!
//! Each input PNG is never decoded. Instead, the compressed image data of
//! every frame is lifted out of its `IDAT` chunks and re-chunked into the
//! animation chunks of the [APNG extension][apng]:
//!
//! * The output starts with the PNG signature and the `IHDR` of the first
//!   frame, copied byte for byte.
//! * Then an `acTL` chunk gives the frame count and loop count.
//! * Each frame gets an `fcTL` chunk followed by its image data. The first
//!   frame keeps plain `IDAT` chunks (so non-APNG decoders still show it),
//!   every later frame uses `fdAT` chunks.
//! * An `IEND` chunk closes the stream.
//!
//! All frames must share the same `IHDR` (dimensions and pixel format). Only
//! the first frame's header is ever looked at.
//!
//! [apng]: https://wiki.mozilla.org/APNG_Specification
//!
//! ## Usage
//!
//! ```no_run
//! use apng_splice::*;
//! # fn main() -> ApngResult<()> {
//! let frames = vec![
//!   Frame::new("frames/000.png", 100),
//!   Frame::new("frames/001.png", 250),
//! ];
//! let out = std::fs::File::create("out.png")?;
//! let summary = assemble_files(out, &frames, &AssembleOptions::default())?;
//! println!("{summary}");
//! # Ok(())
//! # }
//! ```

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

pub mod chunk_type;
pub use chunk_type::*;

mod crc32;
pub use crc32::*;

pub mod int_endian;
pub use int_endian::*;

pub mod control;
pub use control::*;

pub mod error;
pub use error::*;

pub mod reader;
pub use reader::*;

pub mod writer;
pub use writer::*;

pub mod splicer;
pub use splicer::*;

pub mod assemble;
pub use assemble::*;

pub mod frames;
pub use frames::*;

pub mod config;
pub use config::*;

/// The first eight bytes of a PNG datastream should match these bytes.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Default upper bound on the on-wire size of any one chunk (1 MiB).
pub const MAX_CHUNK_SIZE: usize = 1024 * 1024;

/// Smallest chunk size limit that leaves room for any image data at all.
pub const MIN_CHUNK_SIZE: usize = 32;

/// Bytes of a data chunk that aren't image data, reserved when splitting.
///
/// That's the length, the tag, the sequence number, and the CRC, plus four
/// bytes of slack.
pub const DATA_CHUNK_OVERHEAD: usize = 5 * 4;

/// Bytes that framing adds to every chunk: length, tag, and CRC.
pub const CHUNK_FRAMING: usize = 4 + 4 + 4;
