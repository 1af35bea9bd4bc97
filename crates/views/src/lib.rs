//! Top-K congestion ranking over a grouped index.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use cw_core::{GroupedIndex, SignalRecord};

pub const DEFAULT_TOP_K: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopKConfig {
    pub k: usize,
}

impl Default for TopKConfig {
    fn default() -> Self {
        Self { k: DEFAULT_TOP_K }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankOutcome {
    /// The timestamp has no group at all.
    NoData,
    Ranked(Vec<SignalRecord>),
}

impl RankOutcome {
    pub fn records(&self) -> Option<&[SignalRecord]> {
        match self {
            RankOutcome::NoData => None,
            RankOutcome::Ranked(records) => Some(records),
        }
    }
}

/// Most congested first; equal counts fall back to the lower signal id.
pub fn congestion_order(a: &SignalRecord, b: &SignalRecord) -> Ordering {
    b.car_count
        .cmp(&a.car_count)
        .then_with(|| a.signal_id.cmp(&b.signal_id))
}

pub fn rank_top_k(index: &GroupedIndex, timestamp: &str, cfg: &TopKConfig) -> RankOutcome {
    match index.get(timestamp) {
        None => RankOutcome::NoData,
        Some(group) => RankOutcome::Ranked(top_k(group, cfg.k)),
    }
}

/// Selects the `k` leading records under [`congestion_order`], in that order.
pub fn top_k(group: &[SignalRecord], k: usize) -> Vec<SignalRecord> {
    if k == 0 {
        return Vec::new();
    }
    let mut vals = group.to_vec();
    if k < vals.len() {
        vals.select_nth_unstable_by(k - 1, congestion_order);
        vals.truncate(k);
    }
    vals.sort_by(congestion_order);
    vals
}
