use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::record::SignalRecord;

/// Records grouped by timestamp.
///
/// Group order inside a key carries no meaning; consumers that need an order
/// (ranking, comparison) sort on read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupedIndex {
    groups: BTreeMap<String, Vec<SignalRecord>>,
}

impl GroupedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: SignalRecord) {
        match self.groups.get_mut(&record.timestamp) {
            Some(group) => group.push(record),
            None => {
                self.groups.insert(record.timestamp.clone(), vec![record]);
            }
        }
    }

    /// Folds `other` into `self`; colliding timestamps concatenate.
    pub fn merge(&mut self, other: GroupedIndex) {
        for (timestamp, mut records) in other.groups {
            self.groups.entry(timestamp).or_default().append(&mut records);
        }
    }

    pub fn get(&self, timestamp: &str) -> Option<&[SignalRecord]> {
        self.groups.get(timestamp).map(Vec::as_slice)
    }

    pub fn timestamps(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn record_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Same keys and, per key, the same multiset of records.
    pub fn equivalent(&self, other: &GroupedIndex) -> bool {
        self.canonical() == other.canonical()
    }

    fn canonical(&self) -> BTreeMap<&str, Vec<&SignalRecord>> {
        self.groups
            .iter()
            .map(|(timestamp, records)| {
                let mut sorted: Vec<&SignalRecord> = records.iter().collect();
                sorted.sort();
                (timestamp.as_str(), sorted)
            })
            .collect()
    }
}

impl FromIterator<SignalRecord> for GroupedIndex {
    fn from_iter<I: IntoIterator<Item = SignalRecord>>(iter: I) -> Self {
        let mut index = GroupedIndex::new();
        for record in iter {
            index.insert(record);
        }
        index
    }
}

impl Extend<SignalRecord> for GroupedIndex {
    fn extend<I: IntoIterator<Item = SignalRecord>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}
