use std::path::PathBuf;

use apng_splice::*;
use clap::Parser;

/// Combines a directory of PNG files into one APNG animation.
///
/// All the PNG files must be encoded the same way and have the same
/// dimensions, since only the first file's header is used.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
  /// The folder containing the source PNG files
  #[arg(short, long, default_value = "frames")]
  input: PathBuf,

  /// A text file containing the duration of each frame in milliseconds, one
  /// per line
  #[arg(short, long, default_value = "delays.txt")]
  delays: PathBuf,

  /// The destination file
  #[arg(short, long, default_value = "output.png")]
  output: PathBuf,

  /// Number of times to play the animation, 0 loops forever
  #[arg(short, long, default_value_t = 0)]
  loops: u32,

  /// Trust input chunk checksums instead of checking them
  #[arg(long)]
  no_verify_crc: bool,
}
impl From<Args> for Config {
  fn from(args: Args) -> Self {
    Config {
      input_dir: args.input,
      delay_file: args.delays,
      output: args.output,
      options: AssembleOptions {
        loop_count: args.loops,
        verify_crc: !args.no_verify_crc,
        ..AssembleOptions::default()
      },
    }
  }
}

fn main() {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  let config = Config::from(Args::parse());
  match config.run() {
    Ok(summary) => log::info!("{summary}"),
    Err(e) => {
      log::error!("{e}");
      std::process::exit(1);
    }
  }
}
