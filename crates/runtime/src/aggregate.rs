use cw_core::GroupedIndex;
use tracing::debug;

use crate::worker::WorkerOutput;

/// Merges worker outputs into one index. The result's per-timestamp multisets do
/// not depend on the order of `outputs`.
pub fn aggregate<I>(outputs: I) -> GroupedIndex
where
    I: IntoIterator<Item = WorkerOutput>,
{
    let mut index = GroupedIndex::new();
    for output in outputs {
        match output {
            WorkerOutput::Forwarded(records) => index.extend(records),
            WorkerOutput::Grouped(partial) => index.merge(partial),
        }
    }
    debug!(
        groups = index.group_count(),
        records = index.record_count(),
        "merged worker outputs"
    );
    index
}
