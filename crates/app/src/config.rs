//! Configuration for the huffpack command line tool.
//!
//! Handles parsing command-line arguments and resolving defaults. When no
//! input file is given to `compress` or `roundtrip`, a sample input is
//! generated from a seed; the seed is printed so the run can be repeated.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;

/// What the tool should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Input file (or generated sample) -> compressed file
    Compress,
    /// Compressed file -> original data
    Uncompress,
    /// Compress and uncompress in memory, then verify
    Roundtrip,
}

impl Command {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "compress" | "c" => Some(Command::Compress),
            "uncompress" | "decompress" | "u" | "d" => Some(Command::Uncompress),
            "roundtrip" | "verify" => Some(Command::Roundtrip),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Compress => "compress",
            Command::Uncompress => "uncompress",
            Command::Roundtrip => "roundtrip",
        }
    }
}

/// Complete configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub command: Command,

    // === Files ===
    /// Input file path (None = generate sample)
    pub input_file: Option<PathBuf>,

    /// Output file path (None = keep the result in memory)
    pub output_file: Option<PathBuf>,

    // === Sample input ===
    /// Seed for the generated sample
    pub seed: u64,

    /// Size of the generated sample in bytes
    pub sample_bytes: usize,

    // === Behavior ===
    /// Keep the compressed output even when it is larger than the input
    pub force: bool,

    /// Suppress progress lines
    pub quiet: bool,

    /// Whether to print detailed config
    pub print_config: bool,

    /// Whether to print detailed metrics summary
    pub print_metrics: bool,
}

impl Config {
    /// Parse configuration from command-line arguments (without the program
    /// name).
    ///
    /// The first argument is the command. If --seed is not provided, a
    /// time-based seed is used for the sample input.
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let Some(first) = args.first() else {
            return Err("missing command (compress, uncompress or roundtrip)".to_string());
        };
        if first == "--help" || first == "-h" {
            print_help();
            std::process::exit(0);
        }
        let command = Command::parse(first).ok_or_else(|| format!("unknown command: {}", first))?;

        let mut input_file: Option<PathBuf> = None;
        let mut output_file: Option<PathBuf> = None;
        let mut seed: Option<u64> = None;
        let mut sample_bytes: Option<usize> = None;
        let mut force = false;
        let mut quiet = false;
        let mut print_config = false;
        let mut print_metrics = true;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--in" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--in requires a path".to_string());
                    }
                    input_file = Some(PathBuf::from(&args[i]));
                }
                "--out" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--out requires a path".to_string());
                    }
                    output_file = Some(PathBuf::from(&args[i]));
                }
                "--seed" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--seed requires a number".to_string());
                    }
                    seed = Some(args[i].parse().map_err(|_| "invalid seed")?);
                }
                "--sample-bytes" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--sample-bytes requires a number".to_string());
                    }
                    sample_bytes = Some(args[i].parse().map_err(|_| "invalid sample-bytes")?);
                }
                "--force" | "-f" => {
                    force = true;
                }
                "--quiet" | "-q" => {
                    quiet = true;
                }
                "--print-config" => {
                    print_config = true;
                }
                "--no-metrics" => {
                    print_metrics = false;
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                _ => {
                    return Err(format!("unknown argument: {}", args[i]));
                }
            }
            i += 1;
        }

        if command == Command::Uncompress && input_file.is_none() {
            return Err("uncompress requires --in".to_string());
        }

        let output_file = output_file.or_else(|| match command {
            Command::Compress => Some(PathBuf::from("./out.huff")),
            Command::Uncompress => Some(PathBuf::from("./out.bin")),
            Command::Roundtrip => None,
        });

        // Determine seed (explicit or time-based)
        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        Ok(Config {
            command,
            input_file,
            output_file,
            seed,
            sample_bytes: sample_bytes.unwrap_or_else(|| rng.gen_range(16 * 1024..=256 * 1024)),
            force,
            quiet,
            print_config,
            print_metrics,
        })
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        println!("Command:     {}", self.command.as_str());
        match &self.input_file {
            Some(path) => println!("Input file:  {}", path.display()),
            None => println!(
                "Input file:  (generated sample, {} bytes, seed {})",
                self.sample_bytes, self.seed
            ),
        }
        match &self.output_file {
            Some(path) => println!("Output file: {}", path.display()),
            None => println!("Output file: (none)"),
        }
        println!("Force:       {}", self.force);
        println!();
    }
}

fn print_help() {
    println!("huffpack: Huffman file compressor");
    println!();
    println!("USAGE:");
    println!("    huffpack <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    compress, c             Compress a file (or a generated sample)");
    println!("    uncompress, d           Restore a compressed file");
    println!("    roundtrip, verify       Compress and uncompress in memory, then compare");
    println!();
    println!("OPTIONS:");
    println!("    --in <PATH>             Input file (default: generate sample)");
    println!("    --out <PATH>            Output file (default: ./out.huff or ./out.bin)");
    println!("    --force, -f             Keep output even if it is larger than the input");
    println!();
    println!("    --seed <N>              Seed for the generated sample");
    println!("    --sample-bytes <N>      Size of the generated sample (default: random 16-256 KiB)");
    println!();
    println!("    --quiet, -q             Don't print progress");
    println!("    --print-config          Print resolved configuration");
    println!("    --no-metrics            Don't print metrics summary");
    println!("    --help, -h              Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    huffpack compress --in book.txt --out book.huff");
    println!("    huffpack uncompress --in book.huff --out book.txt");
    println!("    huffpack roundtrip --seed 42              # Deterministic sample");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_compress_defaults() {
        let config = Config::from_args(&args(&["compress", "--seed", "5"])).unwrap();

        assert_eq!(config.command, Command::Compress);
        assert!(config.input_file.is_none());
        assert_eq!(config.output_file, Some(PathBuf::from("./out.huff")));
        assert!(!config.force);
        assert!(config.print_metrics);
        assert!((16 * 1024..=256 * 1024).contains(&config.sample_bytes));
    }

    #[test]
    fn test_seeded_defaults_are_reproducible() {
        let a = Config::from_args(&args(&["roundtrip", "--seed", "77"])).unwrap();
        let b = Config::from_args(&args(&["roundtrip", "--seed", "77"])).unwrap();
        assert_eq!(a.sample_bytes, b.sample_bytes);
        assert!(a.output_file.is_none());
    }

    #[test]
    fn test_explicit_options() {
        let config = Config::from_args(&args(&[
            "uncompress", "--in", "a.huff", "--out", "a.txt", "-q", "--no-metrics",
        ]))
        .unwrap();

        assert_eq!(config.command, Command::Uncompress);
        assert_eq!(config.input_file, Some(PathBuf::from("a.huff")));
        assert_eq!(config.output_file, Some(PathBuf::from("a.txt")));
        assert!(config.quiet);
        assert!(!config.print_metrics);
    }

    #[test]
    fn test_force_flag() {
        let config = Config::from_args(&args(&["c", "--force", "--sample-bytes", "10"])).unwrap();
        assert!(config.force);
        assert_eq!(config.sample_bytes, 10);
    }

    #[test]
    fn test_errors() {
        assert!(Config::from_args(&[]).is_err());
        assert!(Config::from_args(&args(&["explode"])).is_err());
        assert!(Config::from_args(&args(&["compress", "--in"])).is_err());
        assert!(Config::from_args(&args(&["compress", "--seed", "x"])).is_err());
        assert!(Config::from_args(&args(&["compress", "--bogus"])).is_err());
        assert!(Config::from_args(&args(&["uncompress"])).is_err());
    }
}
