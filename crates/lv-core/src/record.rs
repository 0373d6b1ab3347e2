//! Record model and dataset storage
//!
//! Records carry a stable slot id for the lifetime of a loaded dataset.
//! Selection and analytics always refer to records by [`RecordId`],
//! never by value equality, since two records may share identical
//! coordinates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stable identifier for a record within one dataset generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(pub u32);

impl RecordId {
    /// Slot index into the dataset's record vector
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One data element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub x: f64,
    pub y: f64,
    /// Present when the x axis is temporal
    pub time: Option<NaiveDate>,
    pub category: String,
    /// Optional weight driving size/width encoding
    pub weight: Option<f64>,
}

impl Record {
    pub fn new(x: f64, y: f64, category: impl Into<String>) -> Self {
        Self {
            x,
            y,
            time: None,
            category: category.into(),
            weight: None,
        }
    }

    /// Squared Euclidean distance to another record, in data space
    pub fn distance_sq(&self, other: &Record) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Axis selector for scale construction and value extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// The records currently loaded for display.
///
/// A reload replaces the record list wholesale and bumps the generation
/// counter; callers holding `RecordId`s from an earlier generation must
/// drop them (views clear their selection on reload).
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
    generation: u64,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            generation: 0,
        }
    }

    /// Replace the dataset contents. No incremental merge.
    pub fn replace(&mut self, records: Vec<Record>) {
        self.records = records;
        self.generation += 1;
        tracing::debug!(
            generation = self.generation,
            records = self.records.len(),
            "dataset replaced"
        );
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.get(id.index())
    }

    /// Iterate records together with their stable ids
    pub fn iter(&self) -> impl Iterator<Item = (RecordId, &Record)> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, r)| (RecordId(i as u32), r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reload_bumps_generation_and_replaces_records() {
        let mut ds = Dataset::new(vec![Record::new(1.0, 1.0, "A")]);
        assert_eq!(ds.generation(), 0);
        assert_eq!(ds.len(), 1);

        ds.replace(vec![Record::new(2.0, 2.0, "B"), Record::new(3.0, 3.0, "B")]);
        assert_eq!(ds.generation(), 1);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.get(RecordId(0)).unwrap().category, "B");
    }

    #[test]
    fn ids_are_stable_slot_indices() {
        let ds = Dataset::new(vec![
            Record::new(1.0, 1.0, "A"),
            Record::new(1.0, 1.0, "A"),
        ]);
        // Identical coordinates, distinct identities.
        let ids: Vec<_> = ds.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![RecordId(0), RecordId(1)]);
    }
}
