#![cfg_attr(test, allow(clippy::unwrap_used))]

mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{error::ErrorKind, ArgGroup, CommandFactory, Parser};
use env_logger::Env;
use qtp::{ops, Mirror};
use utils::{ensure_exists, threshold};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(group(ArgGroup::new("mode").required(true).args(["decompress", "compress", "mirror"])))]
struct Cli {
    /// Decompress a quadtree file into a PPM image
    #[arg(short = 'd', num_args = 2, value_names = ["COMPRESSED", "OUTPUT_PPM"])]
    decompress: Option<Vec<PathBuf>>,

    /// Compress a PPM image into a quadtree file.
    ///
    /// A higher threshold merges more blocks, 0 is lossless.
    #[arg(short = 'c', num_args = 3, value_names = ["THRESHOLD", "INPUT_PPM", "COMPRESSED"])]
    compress: Option<Vec<String>>,

    /// Mirror a PPM image after compressing it with the given threshold.
    ///
    /// Valid directions:
    ///  - h (left to right)
    ///  - v (top to bottom)
    #[arg(short = 'm', num_args = 4, value_names = ["DIRECTION", "THRESHOLD", "INPUT_PPM", "OUTPUT_PPM"], verbatim_doc_comment)]
    mirror: Option<Vec<String>>,

    /// Log progress, same as RUST_LOG=debug
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug)]
enum Mode {
    Decompress {
        input: PathBuf,
        output: PathBuf,
    },
    Compress {
        threshold: u64,
        input: PathBuf,
        output: PathBuf,
    },
    Mirror {
        mirror: Mirror,
        threshold: u64,
        input: PathBuf,
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    let mode = match mode(args) {
        Ok(mode) => mode,
        Err(e) => e.exit(),
    };

    match mode {
        Mode::Decompress { input, output } => {
            ensure_exists("Compressed", &input)?;
            ops::decompress_file(input, output)?;
        }
        Mode::Compress { threshold, input, output } => {
            ensure_exists("Input", &input)?;
            ops::compress_file(input, output, threshold)?;
        }
        Mode::Mirror { mirror, threshold, input, output } => {
            ensure_exists("Input", &input)?;
            ops::mirror_file(input, output, threshold, mirror)?;
        }
    }

    Ok(())
}

/// Turn the raw option values into a mode, reporting bad values as usage
/// errors.
fn mode(args: Cli) -> Result<Mode, clap::Error> {
    let usage = |msg: String| Cli::command().error(ErrorKind::InvalidValue, msg);

    if let Some([input, output]) = args.decompress.as_deref() {
        return Ok(Mode::Decompress {
            input: input.clone(),
            output: output.clone(),
        });
    }

    if let Some([t, input, output]) = args.compress.as_deref() {
        return Ok(Mode::Compress {
            threshold: threshold(t).map_err(usage)?,
            input: input.into(),
            output: output.into(),
        });
    }

    if let Some([direction, t, input, output]) = args.mirror.as_deref() {
        return Ok(Mode::Mirror {
            mirror: direction.parse::<Mirror>().map_err(usage)?,
            threshold: threshold(t).map_err(usage)?,
            input: input.into(),
            output: output.into(),
        });
    }

    Err(Cli::command().error(
        ErrorKind::MissingRequiredArgument,
        "one of -d, -c or -m is required",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Mode, clap::Error> {
        mode(Cli::try_parse_from(std::iter::once("qtp").chain(args.iter().copied()))?)
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn decompress() {
        let mode = parse(&["-d", "in.qtp", "out.ppm"]).unwrap();
        assert!(matches!(
            mode,
            Mode::Decompress { input, output }
                if input == PathBuf::from("in.qtp") && output == PathBuf::from("out.ppm")
        ));
    }

    #[test]
    fn compress() {
        let mode = parse(&["-c", "25", "in.ppm", "out.qtp"]).unwrap();
        assert!(matches!(mode, Mode::Compress { threshold: 25, .. }));
    }

    #[test]
    fn mirror() {
        let mode = parse(&["-m", "v", "0", "in.ppm", "out.ppm"]).unwrap();
        assert!(matches!(
            mode,
            Mode::Mirror { mirror: Mirror::Vertical, threshold: 0, .. }
        ));
    }

    #[test]
    fn usage_errors() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["-d", "in.qtp"]).is_err());
        assert!(parse(&["-c", "x", "in.ppm", "out.qtp"]).is_err());
        assert!(parse(&["-m", "d", "0", "in.ppm", "out.ppm"]).is_err());
        assert!(parse(&["-c", "1", "a", "b", "-d", "c", "d"]).is_err());
        assert!(parse(&["-x", "a", "b"]).is_err());
    }
}
