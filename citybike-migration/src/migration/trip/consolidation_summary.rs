use std::{collections::BTreeMap, fmt::Display};

use serde::Serialize;

use super::TripValidity;

/// counts from a trip consolidation run
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct ConsolidationSummary {
    pub files: usize,
    pub rows_read: usize,
    pub rows_written: usize,
    pub dropped: BTreeMap<TripValidity, usize>,
}

impl ConsolidationSummary {
    pub fn record(&mut self, validity: TripValidity) {
        self.rows_read += 1;
        if validity.is_valid() {
            self.rows_written += 1;
        } else {
            *self.dropped.entry(validity).or_default() += 1;
        }
    }

    pub fn rows_dropped(&self) -> usize {
        self.dropped.values().sum()
    }

    pub fn dropped_for(&self, validity: TripValidity) -> usize {
        self.dropped.get(&validity).copied().unwrap_or_default()
    }
}

impl Display for ConsolidationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} trip files, {} rows read, {} kept, {} dropped",
            self.files,
            self.rows_read,
            self.rows_written,
            self.rows_dropped()
        )?;
        for (reason, count) in self.dropped.iter() {
            write!(f, "\n  {reason}: {count}")?;
        }
        Ok(())
    }
}
