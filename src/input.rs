//! Input assembly: log files, gzip logs and standard input.
//!
//! Sources are opened up front so a missing file fails the run before any
//! output. Their lines are then chained in command-line order.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use log::debug;

use crate::error::{Error, Result};

/// Extension that marks a gzip-compressed log.
pub const GZIP_EXTENSION: &str = "gz";

/// True if `path` names a gzip-compressed log.
pub fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == GZIP_EXTENSION)
}

/// Open one log file, decompressing `.gz` files transparently.
pub fn open(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    if is_gzip(path) {
        debug!("Opened {} (gzip)", path.display());
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        debug!("Opened {}", path.display());
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Open every path in order; standard input when `paths` is empty.
pub fn open_all(paths: &[PathBuf]) -> Result<Vec<Box<dyn BufRead>>> {
    if paths.is_empty() {
        debug!("No log files given, reading standard input");
        return Ok(vec![Box::new(io::stdin().lock())]);
    }
    paths.iter().map(|p| open(p)).collect()
}

/// Raw lines of one reader without their `\n` terminator.
///
/// Bytes are passed through untouched: a `\r` before the newline stays, and
/// invalid UTF-8 is left for the analyzer to reject.
pub fn lines<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<Vec<u8>>> {
    reader.split(b'\n')
}

/// Lines of all sources, one after another.
///
/// Each source ends its own last line, so a file without a trailing newline
/// never merges with the next one.
pub fn chain_lines(sources: Vec<Box<dyn BufRead>>) -> impl Iterator<Item = io::Result<Vec<u8>>> {
    sources.into_iter().flat_map(lines)
}
