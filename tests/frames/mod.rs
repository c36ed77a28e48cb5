use std::path::PathBuf;

use super::*;

#[test]
fn test_discover_frames_sorted_and_flat() {
  let dir = tempfile::tempdir().unwrap();
  for name in ["b.png", "a.png", "10.png", "notes.txt", "c.PNG"] {
    std::fs::write(dir.path().join(name), b"").unwrap();
  }
  std::fs::create_dir(dir.path().join("sub.png")).unwrap();
  std::fs::write(dir.path().join("sub.png").join("z.png"), b"").unwrap();

  let found: Vec<PathBuf> = discover_frames(dir.path()).unwrap();
  let names: Vec<String> =
    found.iter().map(|p| p.file_name().unwrap().to_string_lossy().into_owned()).collect();
  assert_eq!(names, ["10.png", "a.png", "b.png"]);
}

#[test]
fn test_discover_frames_missing_dir() {
  let dir = tempfile::tempdir().unwrap();
  let missing = dir.path().join("nope");
  match discover_frames(&missing) {
    Err(ApngError::InFile { path, .. }) => assert_eq!(path, missing),
    other => panic!("{other:?}"),
  }
}

#[test]
fn test_read_delays() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("delays.txt");
  assert!(read_delays(&path).unwrap().is_empty());
  std::fs::write(&path, "120\n\nnot a number\n80\n").unwrap();
  assert_eq!(read_delays(&path).unwrap(), [120, 80]);
}

#[test]
fn test_run_with_empty_dir() {
  let dir = tempfile::tempdir().unwrap();
  let config = Config {
    input_dir: dir.path().to_path_buf(),
    output: dir.path().join("out.png"),
    ..Config::default()
  };
  match config.run() {
    Err(ApngError::InFile { source, .. }) => assert!(matches!(*source, ApngError::NoFrames)),
    other => panic!("{other:?}"),
  }
  assert!(!config.output.exists());
}
