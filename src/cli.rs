// ============================================================================
// imagelab CLI — headless batch processing via command-line arguments
// ============================================================================
//
// Usage examples:
//   imagelab --input photo.png --ops grayscale,blur=5 --output result.png
//   imagelab -i photo.jpg -o out.png                  (format inferred from output ext)
//   imagelab -i "*.jpg" --ops invert --output-dir processed/ --format png
//   imagelab -i scan.png --ops rotate-cw,contrast=40 -o fixed.png
//
// All processing runs synchronously on the current thread; each input is an
// independent edit session (load → apply ops → save).

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use crate::io::{self, SaveFormat};
use crate::session::{EditSession, Operation};

// ============================================================================
// CLI argument definition (clap Derive)
// ============================================================================

/// imagelab headless image processor.
///
/// Apply editing operations to image files and convert between formats —
/// no GUI required.
#[derive(Parser, Debug)]
#[command(
    name = "imagelab",
    about = "imagelab headless batch image processor",
    long_about = "Apply edit operations to image files and convert between formats.\n\
                  Supports PNG, JPEG and BMP.\n\n\
                  Operations (comma-separated, applied in order):\n  \
                  rotate-cw, rotate-ccw, flip-h, flip-v, grayscale, invert,\n  \
                  sketch, blur=N (1-50), pixelate=N (1-100), contrast=N (-255..254)\n\n\
                  Example:\n  \
                  imagelab --input photo.png --ops grayscale,blur=5 --output result.png"
)]
pub struct CliArgs {
    /// Input file(s). Glob patterns accepted (e.g. "*.png", "shots/*.jpg").
    #[arg(short, long, required = true, num_args = 1..)]
    pub input: Vec<String>,

    /// Comma-separated operation chain applied to each input, in order.
    /// If omitted, images are only loaded and re-saved (format conversion).
    #[arg(long, value_name = "OP[,OP...]")]
    pub ops: Option<String>,

    /// Output file path. Only valid for single-file input.
    /// For batch input use --output-dir instead.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output directory for batch processing.
    /// Files are written here with the original stem and the target format's extension.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output format: png, jpeg, bmp.
    /// When omitted, the format is inferred from --output's extension, defaulting to png.
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// JPEG quality (1–100, default 90).
    #[arg(short, long, default_value_t = 90, value_name = "1-100")]
    pub quality: u8,

    /// Print per-file timing information.
    #[arg(short, long)]
    pub verbose: bool,
}

// ============================================================================
// Public entry point
// ============================================================================

/// Run all CLI processing and return an OS exit code.
/// `0` = all files succeeded, `1` = one or more files failed.
pub fn run(args: CliArgs) -> ExitCode {
    let inputs = resolve_inputs(&args.input);
    if inputs.is_empty() {
        eprintln!("error: no input files matched the given pattern(s).");
        return ExitCode::FAILURE;
    }

    if inputs.len() > 1 && args.output.is_some() && args.output_dir.is_none() {
        eprintln!(
            "error: {} input files given but --output only accepts a single file path.\n\
             Use --output-dir to specify a destination directory for batch processing.",
            inputs.len()
        );
        return ExitCode::FAILURE;
    }

    let ops = match args.ops.as_deref().map(parse_ops).transpose() {
        Ok(ops) => ops.unwrap_or_default(),
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let format = parse_format(args.format.as_deref(), args.output.as_deref());

    if let Some(dir) = &args.output_dir
        && let Err(e) = std::fs::create_dir_all(dir)
    {
        eprintln!(
            "error: could not create output directory '{}': {}",
            dir.display(),
            e
        );
        return ExitCode::FAILURE;
    }

    let total = inputs.len();
    let multi = total > 1;
    let mut any_failure = false;

    for (idx, input_path) in inputs.iter().enumerate() {
        if multi || args.verbose {
            println!("[{}/{}] {}", idx + 1, total, input_path.display());
        }

        let file_start = Instant::now();

        let output_path = match build_output_path(
            input_path,
            args.output.as_deref(),
            args.output_dir.as_deref(),
            format,
        ) {
            Some(p) => p,
            None => {
                eprintln!(
                    "  error: cannot determine output path for '{}'.",
                    input_path.display()
                );
                any_failure = true;
                continue;
            }
        };

        match run_one(input_path, &output_path, &ops, format, args.quality) {
            Ok(()) => {
                if args.verbose || multi {
                    println!(
                        "  → {} ({:.0}ms)",
                        output_path.display(),
                        file_start.elapsed().as_secs_f64() * 1000.0
                    );
                }
            }
            Err(e) => {
                eprintln!("  error: {}", e);
                log_err!("{}: {}", input_path.display(), e);
                any_failure = true;
            }
        }
    }

    if any_failure { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

// ============================================================================
// Per-file processing pipeline
// ============================================================================

fn run_one(
    input: &Path,
    output: &Path,
    ops: &[Operation],
    format: SaveFormat,
    quality: u8,
) -> Result<(), String> {
    let buffer = io::load_image(input).map_err(|e| format!("load failed: {}", e))?;

    let mut session = EditSession::new();
    session.load(buffer);

    for op in ops {
        session
            .apply_op(*op)
            .map_err(|e| format!("{:?} failed: {}", op, e))?;
    }

    let bytes = session
        .save(format, quality)
        .map_err(|e| format!("save failed: {}", e))?;
    std::fs::write(output, bytes).map_err(|e| format!("write failed: {}", e))?;
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

/// Parse a comma-separated op chain like `grayscale,blur=5,rotate-cw`.
/// Unknown names and malformed parameters are hard errors — the whole run
/// aborts before any file is touched.
pub fn parse_ops(spec: &str) -> Result<Vec<Operation>, String> {
    spec.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_op)
        .collect()
}

fn parse_op(spec: &str) -> Result<Operation, String> {
    let (name, param) = match spec.split_once('=') {
        Some((n, p)) => (n, Some(p)),
        None => (spec, None),
    };

    let parsed = match name {
        "rotate-cw" => Operation::RotateCw,
        "rotate-ccw" => Operation::RotateCcw,
        "flip-h" => Operation::FlipHorizontal,
        "flip-v" => Operation::FlipVertical,
        "grayscale" => Operation::Grayscale,
        "invert" => Operation::Invert,
        "sketch" => Operation::Sketch,
        "blur" => Operation::Blur(parse_param(spec, param)?),
        "pixelate" => Operation::Pixelate(parse_param(spec, param)?),
        "contrast" => Operation::Contrast(parse_param(spec, param)?),
        other => return Err(format!("unknown operation '{}'", other)),
    };

    if param.is_some()
        && !matches!(
            parsed,
            Operation::Blur(_) | Operation::Pixelate(_) | Operation::Contrast(_)
        )
    {
        return Err(format!("operation '{}' takes no parameter", name));
    }
    Ok(parsed)
}

fn parse_param<T: std::str::FromStr>(spec: &str, param: Option<&str>) -> Result<T, String> {
    let raw = param.ok_or_else(|| format!("'{}' requires a parameter (e.g. '{}=5')", spec, spec))?;
    raw.parse()
        .map_err(|_| format!("bad parameter in '{}'", spec))
}

/// Expand glob patterns and literal paths into a deduplicated, ordered list.
fn resolve_inputs(patterns: &[String]) -> Vec<PathBuf> {
    let mut result: Vec<PathBuf> = Vec::new();

    for pattern in patterns {
        let as_path = Path::new(pattern);

        if as_path.exists() {
            if !result.iter().any(|p| p.as_path() == as_path) {
                result.push(as_path.to_path_buf());
            }
            continue;
        }

        match glob::glob(pattern) {
            Ok(entries) => {
                let mut matched = false;
                for entry in entries.flatten() {
                    if !result.contains(&entry) {
                        result.push(entry);
                    }
                    matched = true;
                }
                if !matched {
                    eprintln!("warning: pattern '{}' matched no files.", pattern);
                }
            }
            Err(e) => {
                eprintln!("warning: invalid glob '{}': {}", pattern, e);
            }
        }
    }

    result
}

/// Choose the [`SaveFormat`] from the `--format` string or infer it from
/// the output file extension. Defaults to PNG when neither is known.
fn parse_format(format_arg: Option<&str>, output: Option<&Path>) -> SaveFormat {
    if let Some(f) = format_arg {
        return SaveFormat::from_extension(f).unwrap_or(SaveFormat::Png);
    }
    if let Some(out) = output {
        let ext = out.extension().and_then(|e| e.to_str()).unwrap_or("");
        return SaveFormat::from_extension(ext).unwrap_or(SaveFormat::Png);
    }
    SaveFormat::Png
}

/// Compute the output path for a single input file.
///
/// Priority:
/// 1. `--output` (explicit path, used for single-file input)
/// 2. `--output-dir` (batch directory, derives filename from input stem)
/// 3. Fallback: same directory as input, same stem, new extension
///    (appends `_out` to the stem if it would collide with the input path)
fn build_output_path(
    input: &Path,
    output: Option<&Path>,
    output_dir: Option<&Path>,
    format: SaveFormat,
) -> Option<PathBuf> {
    if let Some(out) = output {
        return Some(out.to_path_buf());
    }

    let ext = format.extension();
    let stem = input.file_stem()?.to_string_lossy().into_owned();

    if let Some(dir) = output_dir {
        return Some(dir.join(format!("{}.{}", stem, ext)));
    }

    let parent = input.parent().unwrap_or(Path::new("."));
    let candidate = parent.join(format!("{}.{}", stem, ext));

    if candidate == input {
        Some(parent.join(format!("{}_out.{}", stem, ext)))
    } else {
        Some(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_chain_in_order() {
        let ops = parse_ops("grayscale, blur=5,rotate-cw,contrast=-40").unwrap();
        assert_eq!(
            ops,
            vec![
                Operation::Grayscale,
                Operation::Blur(5),
                Operation::RotateCw,
                Operation::Contrast(-40),
            ]
        );
    }

    #[test]
    fn rejects_unknown_and_malformed_specs() {
        assert!(parse_ops("sharpen").is_err());
        assert!(parse_ops("blur").is_err());
        assert!(parse_ops("blur=five").is_err());
        assert!(parse_ops("invert=1").is_err());
    }

    #[test]
    fn format_inference_prefers_explicit_flag() {
        assert_eq!(
            parse_format(Some("jpeg"), Some(Path::new("x.bmp"))),
            SaveFormat::Jpeg
        );
        assert_eq!(parse_format(None, Some(Path::new("x.bmp"))), SaveFormat::Bmp);
        assert_eq!(parse_format(None, None), SaveFormat::Png);
    }
}
