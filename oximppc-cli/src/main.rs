//! OxiMPPC CLI - MPPC stream decompression
//!
//! Decodes raw MPPC (Microsoft Point-to-Point Compression) streams and
//! reports decoder statistics.

mod commands;
mod utils;

use clap::{ArgAction, Parser, Subcommand};
use commands::{DecodeOptions, cmd_decompress, cmd_stats};
use oximppc::DEFAULT_CHUNK_SIZE;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oximppc")]
#[command(author, version, about = "Pure Rust MPPC stream decompressor")]
#[command(long_about = "
OxiMPPC decodes raw MPPC streams: the bit-packed literal and backward-copy
format used by PPP compression and RDP bulk compression.

Examples:
  oximppc decompress capture.mppc -o capture.bin
  oximppc decompress - < capture.mppc > capture.bin
  oximppc decompress capture.mppc --chunk-size 1500 -P -o capture.bin
  oximppc stats capture.mppc --json
")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decompress a raw MPPC stream
    #[command(alias = "d")]
    Decompress {
        /// Compressed input file ("-" for stdin)
        input: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Compressed bytes fed to the decoder per update
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,

        /// Start with a zero-filled history window
        #[arg(long)]
        zero_primed: bool,

        /// Show progress bar
        #[arg(short = 'P', long)]
        progress: bool,
    },

    /// Decode a stream and print decoder statistics
    #[command(alias = "s")]
    Stats {
        /// Compressed input file ("-" for stdin)
        input: PathBuf,

        /// Compressed bytes fed to the decoder per update
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,

        /// Start with a zero-filled history window
        #[arg(long)]
        zero_primed: bool,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    utils::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Decompress {
            input,
            output,
            chunk_size,
            zero_primed,
            progress,
        } => cmd_decompress(
            &input,
            output.as_deref(),
            &DecodeOptions {
                chunk_size,
                zero_primed,
            },
            progress,
        ),
        Commands::Stats {
            input,
            chunk_size,
            zero_primed,
            json,
        } => cmd_stats(
            &input,
            &DecodeOptions {
                chunk_size,
                zero_primed,
            },
            json,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
