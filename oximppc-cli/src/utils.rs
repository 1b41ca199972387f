//! Utility functions for the CLI.

use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Create a progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}")
    {
        pb.set_style(style.progress_chars("█▓▒░ "));
    }
    pb
}

/// Map the number of `-v` flags to a log level.
pub fn level_filter(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the terminal logger on stderr.
pub fn init_logging(verbosity: u8) {
    if let Err(e) = TermLogger::init(
        level_filter(verbosity),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Warning: logging disabled: {}", e);
    }
}

/// Open `path` for reading, or stdin for `-`.
///
/// Also returns the input length when it is known up front.
pub fn open_input(path: &Path) -> io::Result<(Box<dyn Read>, Option<u64>)> {
    if path.as_os_str() == "-" {
        let stdin: Box<dyn Read> = Box::new(io::stdin().lock());
        return Ok((stdin, None));
    }

    let file = File::open(path)?;
    let len = file.metadata()?.len();
    let reader: Box<dyn Read> = Box::new(BufReader::new(file));
    Ok((reader, Some(len)))
}
