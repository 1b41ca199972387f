//! Decompress command implementation.

use super::DecodeOptions;
use crate::utils::{create_progress_bar, open_input};
use log::{info, warn};
use oximppc::MppcReader;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub fn cmd_decompress(
    input: &Path,
    output: Option<&Path>,
    options: &DecodeOptions,
    progress: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (source, len) = open_input(input)?;

    // No bar for stdin, and none when the decoded data goes to stdout.
    let show = progress && len.is_some() && output.is_some();
    let pb = create_progress_bar(len.unwrap_or(0), show);
    pb.set_message("compressed");

    let mut reader = MppcReader::with_decoder(pb.wrap_read(source), options.decoder()?)
        .with_chunk_size(options.chunk_size);

    let written = match output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            let n = io::copy(&mut reader, &mut writer)?;
            writer.flush()?;
            n
        }
        None => {
            let mut writer = BufWriter::new(io::stdout().lock());
            let n = io::copy(&mut reader, &mut writer)?;
            writer.flush()?;
            n
        }
    };
    pb.finish_with_message("Done");

    let decoder = reader.decoder();
    let stats = decoder.stats();
    info!(
        "decoded {} bytes from {} compressed bytes ({} literals, {} copies)",
        written, stats.input_bytes, stats.literals, stats.copies
    );
    if stats.truncated_copies > 0 {
        warn!(
            "{} copies reached before the start of history",
            stats.truncated_copies
        );
    }
    if !decoder.is_at_codeword_boundary() {
        warn!(
            "input ended inside a codeword ({:?}); output may be incomplete",
            decoder.phase()
        );
    }

    Ok(())
}
