use std::ops::Range;
use std::sync::Arc;

use cw_core::SignalRecord;

use crate::error::PipelineError;

/// A contiguous, read-only view of the loaded records owned by one worker.
#[derive(Debug, Clone)]
pub struct Shard {
    index: usize,
    records: Arc<[SignalRecord]>,
    range: Range<usize>,
}

impl Shard {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// The full record collection this shard is a view into.
    pub fn source(&self) -> Arc<[SignalRecord]> {
        Arc::clone(&self.records)
    }

    pub fn records(&self) -> &[SignalRecord] {
        &self.records[self.range.clone()]
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// Splits `0..len` into `workers` contiguous ranges whose sizes differ by at most one.
/// The first `len % workers` ranges take the remainder.
pub fn shard_ranges(len: usize, workers: usize) -> Vec<Range<usize>> {
    if workers == 0 {
        return Vec::new();
    }
    let base = len / workers;
    let extra = len % workers;
    let mut start = 0;
    (0..workers)
        .map(|i| {
            let size = base + usize::from(i < extra);
            let range = start..start + size;
            start += size;
            range
        })
        .collect()
}

pub fn partition(records: Arc<[SignalRecord]>, workers: usize) -> Result<Vec<Shard>, PipelineError> {
    if workers == 0 {
        return Err(PipelineError::NoWorkers);
    }
    Ok(shard_ranges(records.len(), workers)
        .into_iter()
        .enumerate()
        .map(|(index, range)| Shard {
            index,
            records: Arc::clone(&records),
            range,
        })
        .collect())
}
