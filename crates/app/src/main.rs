//! huffpack: Huffman file compressor
//!
//! Usage:
//!   huffpack compress --in book.txt --out book.huff
//!   huffpack uncompress --in book.huff --out book.txt
//!   huffpack roundtrip --seed 42

mod config;
mod input_gen;

use config::{Command, Config};
use huffpack_core::metrics::Metrics;
use huffpack_core::{Error, Processor, ProgressSink, Result};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Where the data to compress comes from.
enum Source {
    File(PathBuf),
    Sample(Vec<u8>),
}

impl Source {
    fn resolve(config: &Config) -> Result<Self> {
        match &config.input_file {
            Some(path) => Ok(Source::File(path.clone())),
            None => {
                let data = input_gen::generate_sample(config.seed, config.sample_bytes)
                    .map_err(|e| Error::Config(format!("sample generation failed: {}", e)))?;
                Ok(Source::Sample(data))
            }
        }
    }

    /// Run `f` over a fresh reader positioned at the start of the input.
    fn with_reader<T>(&self, f: impl FnOnce(&mut dyn Read) -> Result<T>) -> Result<T> {
        match self {
            Source::File(path) => f(&mut BufReader::new(File::open(path)?)),
            Source::Sample(data) => f(&mut &data[..]),
        }
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        match self {
            Source::File(path) => Ok(fs::read(path)?),
            Source::Sample(data) => Ok(data.clone()),
        }
    }
}

/// Prints progress lines to stderr so stdout stays clean for summaries.
struct StatusPrinter {
    quiet: bool,
}

impl ProgressSink for StatusPrinter {
    fn update(&mut self, message: &str) {
        if !self.quiet {
            eprintln!("[huffpack] {}", message);
        }
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", Error::Config(e));
            eprintln!("Run with --help for usage.");
            return ExitCode::from(2);
        }
    };

    if config.print_config {
        config.print();
    }

    match run(&config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Execute the configured command. `Ok(false)` means a roundtrip mismatch.
fn run(config: &Config) -> Result<bool> {
    reject_same_path(config)?;
    let mut processor = Processor::new(StatusPrinter { quiet: config.quiet });

    match config.command {
        Command::Compress => {
            let source = Source::resolve(config)?;
            if config.input_file.is_none() && !config.quiet {
                eprintln!(
                    "[huffpack] Generated {} bytes of sample input (seed {})",
                    config.sample_bytes, config.seed
                );
            }
            let out = output_path(config)?;
            let metrics = write_output(out, |writer| compress(&mut processor, &source, writer, config.force))?;
            report(config, &metrics);
            Ok(true)
        }
        Command::Uncompress => {
            let Some(input) = &config.input_file else {
                return Err(Error::Config("uncompress requires --in".to_string()));
            };
            let out = output_path(config)?;
            let metrics = write_output(out, |writer| {
                processor.uncompress(BufReader::new(File::open(input)?), writer)
            })?;
            report(config, &metrics);
            Ok(true)
        }
        Command::Roundtrip => roundtrip(config, &mut processor),
    }
}

/// Two passes over `source`: preprocess, then write the compressed form.
fn compress<S: ProgressSink>(
    processor: &mut Processor<S>,
    source: &Source,
    output: impl std::io::Write,
    force: bool,
) -> Result<Metrics> {
    source.with_reader(|input| processor.preprocess_compress(input))?;
    source.with_reader(|input| processor.compress(input, output, force))
}

/// Compress and uncompress in memory and compare against the input.
fn roundtrip<S: ProgressSink>(config: &Config, processor: &mut Processor<S>) -> Result<bool> {
    let source = Source::resolve(config)?;
    let original = source.to_bytes()?;

    let mut packed = Vec::new();
    let compressed = compress(processor, &source, &mut packed, config.force)?;
    report(config, &compressed);

    if let Some(path) = &config.output_file {
        fs::write(path, &packed)?;
    }

    let mut restored = Vec::new();
    let uncompressed = processor.uncompress(&packed[..], &mut restored)?;
    report(config, &uncompressed);

    let verified = restored == original;
    println!(
        "Verification: {} ({} bytes -> {} bytes -> {} bytes)",
        if verified { "PASSED" } else { "FAILED" },
        original.len(),
        packed.len(),
        restored.len()
    );
    Ok(verified)
}

fn output_path(config: &Config) -> Result<&Path> {
    config
        .output_file
        .as_deref()
        .ok_or_else(|| Error::Config("no output file".to_string()))
}

/// Refuse to overwrite the input with the output.
fn reject_same_path(config: &Config) -> Result<()> {
    let (Some(input), Some(output)) = (&config.input_file, &config.output_file) else {
        return Ok(());
    };
    let same = match (fs::canonicalize(input), fs::canonicalize(output)) {
        (Ok(a), Ok(b)) => a == b,
        _ => input == output,
    };
    if same {
        return Err(Error::Config(format!(
            "input and output are the same file: {}",
            input.display()
        )));
    }
    Ok(())
}

/// Sibling of `path` that output is staged in until it is complete.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    path.with_file_name(name)
}

/// Hand a buffered writer to `f` and move its output to `path` only once
/// `f` succeeds. On failure nothing is left at `path`, and an existing file
/// there is untouched.
fn write_output<F>(path: &Path, f: F) -> Result<Metrics>
where
    F: FnOnce(BufWriter<File>) -> Result<Metrics>,
{
    let staged = staging_path(path);
    let result = File::create(&staged)
        .map_err(Error::from)
        .and_then(|file| f(BufWriter::new(file)))
        .and_then(|metrics| {
            fs::rename(&staged, path)?;
            Ok(metrics)
        });

    if result.is_err() && staged.exists() {
        if let Err(e) = fs::remove_file(&staged) {
            eprintln!("Warning: could not remove partial output {}: {}", staged.display(), e);
        }
    }
    result
}

fn report(config: &Config, metrics: &Metrics) {
    if config.print_metrics {
        metrics.print_summary();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use huffpack_core::error::FormatError;

    /// Fresh scratch directory for one test.
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("huffpack-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn config(args: &[&str]) -> Config {
        let mut args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        args.push("--quiet".to_string());
        args.push("--no-metrics".to_string());
        Config::from_args(&args).unwrap()
    }

    fn path_arg(path: &Path) -> &str {
        path.to_str().unwrap()
    }

    fn leftovers(dir: &Path) -> Vec<String> {
        fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".partial"))
            .collect()
    }

    #[test]
    fn test_compress_then_uncompress_files() {
        let dir = scratch_dir("files");
        let book = dir.join("book.txt");
        let packed = dir.join("book.huff");
        let restored = dir.join("book.out");
        let text = b"the rain in spain stays mainly in the plain. ".repeat(200);
        fs::write(&book, &text).unwrap();

        let compress = config(&["compress", "--in", path_arg(&book), "--out", path_arg(&packed)]);
        assert!(run(&compress).unwrap());
        assert!(fs::metadata(&packed).unwrap().len() < text.len() as u64);

        let uncompress = config(&["uncompress", "--in", path_arg(&packed), "--out", path_arg(&restored)]);
        assert!(run(&uncompress).unwrap());
        assert_eq!(fs::read(&restored).unwrap(), text);
        assert!(leftovers(&dir).is_empty());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_bad_magic_leaves_no_output() {
        let dir = scratch_dir("bad-magic");
        let bogus = dir.join("bogus.huff");
        let out = dir.join("bogus.out");
        fs::write(&bogus, [0u8; 2000]).unwrap();

        let uncompress = config(&["uncompress", "--in", path_arg(&bogus), "--out", path_arg(&out)]);
        let result = run(&uncompress);

        assert!(matches!(result, Err(Error::Format(FormatError::BadMagic { .. }))));
        assert!(!out.exists());
        assert!(leftovers(&dir).is_empty());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_truncated_input_keeps_existing_output() {
        let dir = scratch_dir("truncated");
        let packed = dir.join("short.huff");
        let out = dir.join("short.out");
        let full = huffpack_core::compress_bytes(&b"cut me off early ".repeat(400), false).unwrap();
        fs::write(&packed, &full[..full.len() - 1]).unwrap();
        fs::write(&out, b"previous contents").unwrap();

        let uncompress = config(&["uncompress", "--in", path_arg(&packed), "--out", path_arg(&out)]);
        let result = run(&uncompress);

        assert!(matches!(
            result,
            Err(Error::Format(FormatError::MissingEndMarker { .. }))
        ));
        assert_eq!(fs::read(&out).unwrap(), b"previous contents");
        assert!(leftovers(&dir).is_empty());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_size_regression_leaves_no_output() {
        let dir = scratch_dir("regression");
        let tiny = dir.join("tiny.txt");
        let out = dir.join("tiny.huff");
        fs::write(&tiny, b"tiny").unwrap();

        let compress = config(&["compress", "--in", path_arg(&tiny), "--out", path_arg(&out)]);
        assert!(matches!(run(&compress), Err(Error::SizeRegression { .. })));
        assert!(!out.exists());
        assert!(leftovers(&dir).is_empty());

        let forced = config(&["compress", "--in", path_arg(&tiny), "--out", path_arg(&out), "--force"]);
        assert!(run(&forced).unwrap());
        assert!(out.exists());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_same_input_and_output_is_refused() {
        let dir = scratch_dir("same-path");
        let book = dir.join("book.txt");
        let text = b"do not overwrite me with my own archive ".repeat(500);
        fs::write(&book, &text).unwrap();

        let direct = config(&["compress", "--in", path_arg(&book), "--out", path_arg(&book), "--force"]);
        assert!(matches!(run(&direct), Err(Error::Config(_))));

        let dotted = dir.join(".").join("book.txt");
        let aliased = config(&["uncompress", "--in", path_arg(&book), "--out", path_arg(&dotted)]);
        assert!(matches!(run(&aliased), Err(Error::Config(_))));

        assert_eq!(fs::read(&book).unwrap(), text);
        assert!(leftovers(&dir).is_empty());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_roundtrip_sample() {
        let roundtrip = config(&["roundtrip", "--seed", "7", "--sample-bytes", "40000", "--force"]);
        assert!(run(&roundtrip).unwrap());
    }
}
