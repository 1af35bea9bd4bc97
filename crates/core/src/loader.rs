use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::record::{LineError, SignalRecord};

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("unable to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed record on line {line} (`{content}`): {reason}")]
    Malformed {
        line: usize,
        content: String,
        #[source]
        reason: LineError,
    },
    #[error("read failed on line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },
}

/// Reads every record from `path`. Any bad line discards the whole batch.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<SignalRecord>, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_records(BufReader::new(file))?;
    info!(path = %path.display(), records = records.len(), "loaded signal records");
    Ok(records)
}

pub fn parse_records<R: BufRead>(reader: R) -> Result<Vec<SignalRecord>, LoadError> {
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| LoadError::Read {
            line: line_no,
            source,
        })?;
        match SignalRecord::parse_line(&line) {
            Ok(record) => records.push(record),
            Err(reason) => {
                warn!(line = line_no, %reason, "rejecting input batch");
                return Err(LoadError::Malformed {
                    line: line_no,
                    content: line,
                    reason,
                });
            }
        }
    }
    Ok(records)
}

pub fn parse_str(input: &str) -> Result<Vec<SignalRecord>, LoadError> {
    parse_records(input.as_bytes())
}
