use std::{collections::HashMap, io::Cursor, path::Path};

use super::*;

/// Runs a whole assembly over in-memory files.
fn assemble_mem(
  files: &[(&str, Vec<u8>, u32)], options: &AssembleOptions,
) -> ApngResult<(Vec<u8>, AssemblySummary)> {
  let by_name: HashMap<&Path, &Vec<u8>> =
    files.iter().map(|(name, bytes, _)| (Path::new(*name), bytes)).collect();
  let frames: Vec<Frame> =
    files.iter().map(|(name, _, delay)| Frame::new(*name, *delay)).collect();
  let mut out = Vec::new();
  let summary = assemble_with(&mut out, &frames, options, |path| match by_name.get(path) {
    Some(bytes) => Ok(Cursor::new(bytes.to_vec())),
    None => Err(std::io::ErrorKind::NotFound.into()),
  })?;
  Ok((out, summary))
}

fn fctls(chunks: &[(ChunkType, Vec<u8>)]) -> Vec<FrameControl> {
  chunks
    .iter()
    .filter(|(ty, _)| *ty == ChunkType::fcTL)
    .map(|(_, data)| FrameControl::try_from(&data[..]).unwrap())
    .collect()
}

fn noise_png(side: usize, idat_len: usize) -> Vec<u8> {
  let pixels = rand_bytes(side * side * 4);
  encode_png(side as u32, side as u32, &pixels, idat_len)
}

#[test]
fn test_single_frame() {
  let png = encode_png(2, 2, &[255; 16], 1000);
  let (out, summary) = assemble_mem(&[("a.png", png.clone(), 150)], &Default::default()).unwrap();
  let chunks = read_chunks(&out);
  let tys: Vec<ChunkType> = chunks.iter().map(|(ty, _)| *ty).collect();
  assert_eq!(
    tys,
    [ChunkType::IHDR, ChunkType::acTL, ChunkType::fcTL, ChunkType::IDAT, ChunkType::IEND]
  );
  let actl = AnimationControl::try_from(&chunks[1].1[..]).unwrap();
  assert_eq!((actl.num_frames(), actl.num_plays()), (1, 0));
  let fctl = fctls(&chunks)[0];
  assert_eq!(fctl.sequence_number(), 0);
  assert_eq!((fctl.width(), fctl.height()), (2, 2));
  assert_eq!(fctl.offset(), (0, 0));
  assert_eq!(fctl.delay(), (15, 0));
  assert_eq!(fctl.ops(), (0, 0));
  // no sequence prefix on the default image
  assert_eq!(chunks[3].1, collect_image_data(&mut ChunkReader::new(&png[..])).unwrap());
  // the header goes out untouched
  assert_eq!(out[..8 + 25], png[..8 + 25]);
  assert_eq!(summary, AssemblySummary { frames: 1, animation_chunks: 1, data_chunks: 1, width: 2, height: 2 });
}

#[test]
fn test_three_frames() {
  let files = [
    ("0.png", encode_png(2, 2, &[10; 16], 1000), 100),
    ("1.png", encode_png(2, 2, &[20; 16], 1000), 200),
    ("2.png", encode_png(2, 2, &[30; 16], 1000), 300),
  ];
  let (out, summary) = assemble_mem(&files, &Default::default()).unwrap();
  let chunks = read_chunks(&out);
  let tys: Vec<ChunkType> = chunks.iter().map(|(ty, _)| *ty).collect();
  assert_eq!(
    tys,
    [
      ChunkType::IHDR,
      ChunkType::acTL,
      ChunkType::fcTL,
      ChunkType::IDAT,
      ChunkType::fcTL,
      ChunkType::fdAT,
      ChunkType::fcTL,
      ChunkType::fdAT,
      ChunkType::IEND
    ]
  );
  assert_eq!(AnimationControl::try_from(&chunks[1].1[..]).unwrap().num_frames(), 3);
  let seqs: Vec<u32> = fctls(&chunks).iter().map(FrameControl::sequence_number).collect();
  // IDAT takes no sequence number, so frame 0's data leaves no gap
  assert_eq!(seqs, [0, 1, 3]);
  let delays: Vec<u16> = fctls(&chunks).iter().map(|f| f.delay().0).collect();
  assert_eq!(delays, [10, 20, 30]);
  assert_eq!(u32_be(&chunks[5].1), Some(2));
  assert_eq!(u32_be(&chunks[7].1), Some(4));
  for (i, fdat) in [(1, 5), (2, 7)] {
    let expected = collect_image_data(&mut ChunkReader::new(&files[i].1[..])).unwrap();
    assert_eq!(chunks[fdat].1[4..], expected[..]);
  }
  assert_eq!(summary.animation_chunks, 5);
  assert_eq!(summary.data_chunks, 3);
}

#[test]
fn test_empty_trailing_fdat_gives_back_sequence() {
  let options = AssembleOptions { max_chunk_size: 64, ..Default::default() };
  let files = [
    ("0.png", png_from_idats(2, 2, &[&[1; 10]]), 100),
    // 4 + 30 bytes buffered, then the empty IDAT (12 on the wire) overflows
    // the 44 byte data limit and the flush leaves nothing behind it.
    ("1.png", png_from_idats(2, 2, &[&[2; 30], &[]]), 100),
    ("2.png", png_from_idats(2, 2, &[&[3; 10]]), 100),
  ];
  let (out, summary) = assemble_mem(&files, &options).unwrap();
  let chunks = read_chunks(&out);
  let seqs: Vec<u32> = fctls(&chunks).iter().map(FrameControl::sequence_number).collect();
  assert_eq!(seqs, [0, 1, 3]);
  let fdats: Vec<&Vec<u8>> =
    chunks.iter().filter(|(ty, _)| *ty == ChunkType::fdAT).map(|(_, d)| d).collect();
  assert_eq!(fdats.len(), 2);
  assert_eq!(u32_be(fdats[0]), Some(2));
  assert_eq!(fdats[0][4..], [2; 30]);
  assert_eq!(u32_be(fdats[1]), Some(4));
  assert_eq!(summary.animation_chunks, 5);
}

#[test]
fn test_split_first_frame_keeps_every_byte() {
  let options = AssembleOptions { max_chunk_size: 64, ..Default::default() };
  // 60 bytes on the wire, within the read limit but over the 44 byte data limit
  let data: Vec<u8> = (0..48).collect();
  let files = [("0.png", png_from_idats(2, 2, &[&data]), 100)];
  let (out, summary) = assemble_mem(&files, &options).unwrap();
  let idat: Vec<u8> = read_chunks(&out)
    .into_iter()
    .filter(|(ty, _)| *ty == ChunkType::IDAT)
    .flat_map(|(_, d)| d)
    .collect();
  assert_eq!(idat, data);
  assert_eq!(summary.data_chunks, 2);
}

#[test]
fn test_missing_delay_file_uses_default() {
  let dir = tempfile::tempdir().unwrap();
  let frames_dir = dir.path().join("frames");
  std::fs::create_dir(&frames_dir).unwrap();
  for (name, shade) in [("a.png", 1), ("b.png", 2)] {
    std::fs::write(frames_dir.join(name), encode_png(2, 2, &[shade; 16], 1000)).unwrap();
  }
  let config = Config {
    input_dir: frames_dir,
    delay_file: dir.path().join("delays.txt"),
    output: dir.path().join("output.png"),
    options: AssembleOptions::default(),
  };
  let summary = config.run().unwrap();
  assert_eq!(summary.frames, 2);
  let chunks = read_chunks(&std::fs::read(&config.output).unwrap());
  let delays: Vec<(u16, u16)> = fctls(&chunks).iter().map(FrameControl::delay).collect();
  assert_eq!(delays, [(10, 0), (10, 0)]);
}

#[test]
fn test_delay_file_is_used() {
  let dir = tempfile::tempdir().unwrap();
  for name in ["a.png", "b.png", "c.png"] {
    std::fs::write(dir.path().join(name), encode_png(2, 2, &[7; 16], 1000)).unwrap();
  }
  let delay_file = dir.path().join("delays.txt");
  std::fs::write(&delay_file, "40\n1000\n").unwrap();
  let config = Config {
    input_dir: dir.path().to_path_buf(),
    delay_file,
    output: dir.path().join("anim.apng"),
    options: AssembleOptions { loop_count: 3, ..Default::default() },
  };
  config.run().unwrap();
  let chunks = read_chunks(&std::fs::read(&config.output).unwrap());
  let actl = AnimationControl::try_from(&chunks[1].1[..]).unwrap();
  assert_eq!((actl.num_frames(), actl.num_plays()), (3, 3));
  let delays: Vec<u16> = fctls(&chunks).iter().map(|f| f.delay().0).collect();
  assert_eq!(delays, [4, 100, 10]);
}

#[test]
fn test_large_frames_keep_invariants() {
  let max_chunk_size = 1024;
  let options = AssembleOptions { max_chunk_size, ..Default::default() };
  let files: Vec<(&str, Vec<u8>, u32)> = ["0.png", "1.png", "2.png", "3.png"]
    .into_iter()
    .map(|name| (name, noise_png(48, 300), 100))
    .collect();
  let (out, summary) = assemble_mem(&files, &options).unwrap();

  // walk the raw bytes so the CRCs and sizes are checked independently
  let mut rest = &out[8..];
  let mut chunks = Vec::new();
  while !rest.is_empty() {
    let len = u32_be(rest).unwrap() as usize;
    let ty = ChunkType(rest[4..8].try_into().unwrap());
    let data = &rest[8..8 + len];
    assert_eq!(u32_be(&rest[8 + len..]), Some(png_crc(ty.as_bytes(), data)), "{ty}");
    if matches!(ty, ChunkType::IDAT | ChunkType::fdAT) {
      assert!(len + CHUNK_FRAMING <= max_chunk_size, "{ty} of {len} bytes");
    }
    chunks.push((ty, data.to_vec()));
    rest = &rest[12 + len..];
  }

  // sequence numbers run 0, 1, 2, ... over fcTL and fdAT in order
  let seqs: Vec<u32> = chunks
    .iter()
    .filter(|(ty, _)| matches!(*ty, ChunkType::fcTL | ChunkType::fdAT))
    .map(|(_, data)| u32_be(data).unwrap())
    .collect();
  let expected: Vec<u32> = (0..seqs.len() as u32).collect();
  assert_eq!(seqs, expected);
  assert_eq!(summary.animation_chunks, seqs.len() as u32);

  // each frame's data comes back out unchanged
  let mut per_frame: Vec<Vec<u8>> = Vec::new();
  for (ty, data) in &chunks {
    match *ty {
      ChunkType::fcTL => per_frame.push(Vec::new()),
      ChunkType::IDAT => per_frame.last_mut().unwrap().extend_from_slice(data),
      ChunkType::fdAT => per_frame.last_mut().unwrap().extend_from_slice(&data[4..]),
      _ => (),
    }
  }
  assert_eq!(per_frame.len(), files.len());
  for ((_, png, _), spliced) in files.iter().zip(&per_frame) {
    let expected = collect_image_data(&mut ChunkReader::new(&png[..])).unwrap();
    assert_eq!(&expected, spliced);
  }
  assert!(summary.data_chunks > files.len());
}

#[test]
fn test_bad_frame_names_the_file() {
  let mut broken = encode_png(2, 2, &[0; 16], 1000);
  broken[1] = b'X';
  let files =
    [("good.png", encode_png(2, 2, &[0; 16], 1000), 100), ("broken.png", broken, 100)];
  match assemble_mem(&files, &Default::default()) {
    Err(ApngError::InFile { path, source }) => {
      assert_eq!(path, Path::new("broken.png"));
      assert!(matches!(*source, ApngError::Format(_)));
    }
    other => panic!("{other:?}"),
  }
}

#[test]
fn test_truncated_frame_is_fatal() {
  let mut png = encode_png(2, 2, &[0; 16], 1000);
  png.truncate(png.len() - 12); // drop the IEND
  let files = [("a.png", encode_png(2, 2, &[0; 16], 1000), 100), ("b.png", png, 100)];
  match assemble_mem(&files, &Default::default()) {
    Err(ApngError::InFile { source, .. }) => match *source {
      ApngError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof),
      other => panic!("{other:?}"),
    },
    other => panic!("{other:?}"),
  }
}

#[test]
fn test_corrupt_crc() {
  let mut png = encode_png(2, 2, &[0; 16], 1000);
  let idat_crc = png.len() - 12 - 1;
  png[idat_crc] ^= 1;
  let files = [("a.png", png, 100)];
  assert!(matches!(assemble_mem(&files, &Default::default()), Err(ApngError::InFile { .. })));
  let options = AssembleOptions { verify_crc: false, ..Default::default() };
  assert!(assemble_mem(&files, &options).is_ok());
}

#[test]
fn test_missing_frame_and_no_frames() {
  let files = [("a.png", encode_png(2, 2, &[0; 16], 1000), 100)];
  let frames = [Frame::new("a.png", 100), Frame::new("gone.png", 100)];
  let err = assemble_with(Vec::new(), &frames, &Default::default(), |path| {
    if path == Path::new("a.png") {
      Ok(Cursor::new(files[0].1.clone()))
    } else {
      Err(std::io::ErrorKind::NotFound.into())
    }
  })
  .unwrap_err();
  assert!(err.to_string().starts_with("gone.png: "), "{err}");

  assert!(matches!(assemble_mem(&[], &Default::default()), Err(ApngError::NoFrames)));
}

#[test]
fn test_ChunkReader_no_panics() {
  // random data should only ever give errors, never panic
  for _ in 0..20 {
    let v = rand_bytes(1024);
    let mut r = ChunkReader::new(&v[..]);
    while r.next_chunk().is_ok() {
      //
    }
    let mut r = ChunkReader::new(&v[..]).verify_crc(false);
    while r.next_chunk().is_ok() {
      //
    }
  }
}
