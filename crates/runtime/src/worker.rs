use std::any::Any;
use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use timely::communication::allocator::Allocate;
use timely::dataflow::operators::probe::{Handle as ProbeHandle, Probe};
use timely::dataflow::operators::{Inspect, ToStream};
use timely::worker::Worker;
use tracing::debug;

use cw_core::{GroupedIndex, SignalRecord};

use crate::partition::Shard;

/// What a worker hands back to the coordinator for its shard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkerMode {
    /// Return the shard's records untouched; the coordinator groups them.
    PassThrough,
    /// Group the shard locally so the coordinator only unions partial indices.
    #[default]
    LocalGroup,
}

#[derive(Debug, Clone)]
pub enum WorkerOutput {
    Forwarded(Vec<SignalRecord>),
    Grouped(GroupedIndex),
}

impl WorkerOutput {
    pub fn record_count(&self) -> usize {
        match self {
            WorkerOutput::Forwarded(records) => records.len(),
            WorkerOutput::Grouped(index) => index.record_count(),
        }
    }
}

/// Streams the shard's positions through a worker-local dataflow and collects
/// the records they address.
pub fn run_shard<A: Allocate>(
    worker: &mut Worker<A>,
    shard: &Shard,
    mode: WorkerMode,
) -> Result<WorkerOutput, String> {
    debug!(worker = shard.index(), records = shard.len(), ?mode, "processing shard");
    match mode {
        WorkerMode::PassThrough => {
            let sink = Rc::new(RefCell::new(Vec::with_capacity(shard.len())));
            let collect = Rc::clone(&sink);
            drive(worker, shard, move |record| collect.borrow_mut().push(record.clone()))?;
            let forwarded = sink.take();
            Ok(WorkerOutput::Forwarded(forwarded))
        }
        WorkerMode::LocalGroup => {
            let sink = Rc::new(RefCell::new(GroupedIndex::new()));
            let collect = Rc::clone(&sink);
            drive(worker, shard, move |record| collect.borrow_mut().insert(record.clone()))?;
            let grouped = sink.take();
            Ok(WorkerOutput::Grouped(grouped))
        }
    }
}

/// Feeds every record of `shard` to `sink` from inside a timely dataflow.
///
/// The dataflow is always built and stepped to completion. A panic in `sink`
/// is caught, the remaining records are skipped, and the panic message comes
/// back as `Err` once the dataflow is done, so peers never wait on a
/// capability this worker stopped reporting.
pub fn drive<A, F>(worker: &mut Worker<A>, shard: &Shard, mut sink: F) -> Result<(), String>
where
    A: Allocate,
    F: FnMut(&SignalRecord) + 'static,
{
    let records = shard.source();
    let failure: Rc<RefCell<Option<String>>> = Rc::default();
    let failed = Rc::clone(&failure);
    let mut probe = ProbeHandle::new();
    worker.dataflow::<u64, _, _>(|scope| {
        shard
            .range()
            .to_stream(scope)
            .inspect(move |&position| {
                if failed.borrow().is_some() {
                    return;
                }
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| sink(&records[position])));
                if let Err(payload) = outcome {
                    *failed.borrow_mut() = Some(panic_message(payload.as_ref()));
                }
            })
            .probe_with(&mut probe);
    });
    worker.step_while(|| !probe.done());

    match failure.take() {
        Some(reason) => Err(reason),
        None => Ok(()),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        String::from("worker panicked")
    }
}
