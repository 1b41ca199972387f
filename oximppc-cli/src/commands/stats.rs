//! Stats command implementation.

use super::DecodeOptions;
use crate::utils::open_input;
use log::debug;
use oximppc::MppcDecoder;
use serde::{Deserialize, Serialize};
use std::io::{self, Read};
use std::path::Path;

/// JSON serializable decoder statistics.
#[derive(Debug, Serialize, Deserialize)]
struct StatsJson {
    input: String,
    input_bytes: u64,
    output_bytes: u64,
    ratio: f64,
    literals: u64,
    copies: u64,
    copied_bytes: u64,
    truncated_copies: u64,
    alignment_resets: u64,
    history_trims: u64,
    history_len: usize,
    history_limit: usize,
    zero_prefill: usize,
    pending_bits: usize,
    codeword_boundary: bool,
}

impl StatsJson {
    fn from_decoder(input: &Path, decoder: &MppcDecoder) -> Self {
        let stats = decoder.stats();
        let ratio = if stats.output_bytes > 0 {
            stats.input_bytes as f64 / stats.output_bytes as f64
        } else {
            0.0
        };

        Self {
            input: input.display().to_string(),
            input_bytes: stats.input_bytes,
            output_bytes: stats.output_bytes,
            ratio,
            literals: stats.literals,
            copies: stats.copies,
            copied_bytes: stats.copied_bytes,
            truncated_copies: stats.truncated_copies,
            alignment_resets: stats.alignment_resets,
            history_trims: stats.history_trims,
            history_len: decoder.history_len(),
            history_limit: decoder.config().history_limit,
            zero_prefill: decoder.config().zero_prefill,
            pending_bits: decoder.pending_bits(),
            codeword_boundary: decoder.is_at_codeword_boundary(),
        }
    }
}

/// Feed `source` through `decoder` in chunks, discarding the output.
fn drain_into(
    decoder: &mut MppcDecoder,
    mut source: impl Read,
    chunk_size: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut input = vec![0u8; chunk_size.max(1)];
    let mut output = Vec::new();

    loop {
        let n = match source.read(&mut input) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        output.clear();
        decoder.update_into(&input[..n], &mut output)?;
        debug!("chunk of {} bytes decoded to {} bytes", n, output.len());
    }
    Ok(())
}

pub fn cmd_stats(
    input: &Path,
    options: &DecodeOptions,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (source, _) = open_input(input)?;
    let mut decoder = options.decoder()?;
    drain_into(&mut decoder, source, options.chunk_size)?;

    let report = StatsJson::from_decoder(input, &decoder);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Stream Statistics");
    println!("=================");
    println!("File: {}", report.input);
    println!("Compressed: {} bytes", report.input_bytes);
    println!("Decompressed: {} bytes", report.output_bytes);
    if report.output_bytes > 0 {
        println!("Ratio: {:.1}%", report.ratio * 100.0);
    }
    println!();
    println!("Codewords:");
    println!("  Literals: {}", report.literals);
    println!("  Copies: {} ({} bytes)", report.copies, report.copied_bytes);
    println!("  Truncated copies: {}", report.truncated_copies);
    println!("  Alignment markers: {}", report.alignment_resets);
    println!();
    println!("Decoder:");
    println!("  History trims: {}", report.history_trims);
    println!(
        "  History length: {} bytes (limit {}, {} zero-primed)",
        report.history_len, report.history_limit, report.zero_prefill
    );
    println!("  Pending bits: {}", report.pending_bits);
    println!(
        "  Ended on codeword boundary: {}",
        if report.codeword_boundary { "yes" } else { "no" }
    );

    Ok(())
}
