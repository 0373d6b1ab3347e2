//! Spatial analytics derived from a selection
//!
//! Pure functions over data-space coordinates, recomputed on demand.
//! Dataset sizes in this domain make O(n log n) per interaction cheaper
//! than maintaining incremental state that can go stale.

use lv_core::{Dataset, Record, RecordId};
use ordered_float::OrderedFloat;

/// Default neighbor count for probe highlighting
pub const DEFAULT_NEIGHBOR_K: usize = 5;

/// Quadrant of a record relative to the origin record. Records exactly
/// on an axis through the origin belong to the positive side, so every
/// record is classifiable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// x >= origin.x, y >= origin.y
    PosPos = 0,
    /// x < origin.x, y >= origin.y
    NegPos = 1,
    /// x < origin.x, y < origin.y
    NegNeg = 2,
    /// x >= origin.x, y < origin.y
    PosNeg = 3,
}

impl Quadrant {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Classify one record relative to an origin record.
pub fn classify_quadrant(record: &Record, origin: &Record) -> Quadrant {
    match (record.x >= origin.x, record.y >= origin.y) {
        (true, true) => Quadrant::PosPos,
        (false, true) => Quadrant::NegPos,
        (false, false) => Quadrant::NegNeg,
        (true, false) => Quadrant::PosNeg,
    }
}

/// Partition the whole dataset into the four quadrants around the
/// origin. With no origin the result is empty: analytics without a
/// selection target are a no-op, never an error.
pub fn quadrant_partition(dataset: &Dataset, origin: Option<RecordId>) -> [Vec<RecordId>; 4] {
    let mut partition: [Vec<RecordId>; 4] = Default::default();
    let Some(origin) = origin.and_then(|id| dataset.get(id)) else {
        return partition;
    };
    for (id, record) in dataset.iter() {
        partition[classify_quadrant(record, origin).index()].push(id);
    }
    partition
}

/// The up-to-`k` records nearest the probe, ordered by ascending
/// Euclidean distance in data space (invariant to zoom/pan). The probe
/// itself is excluded. Distance ties keep dataset order (stable sort).
pub fn nearest_neighbors(
    dataset: &Dataset,
    probe: Option<RecordId>,
    k: usize,
) -> Vec<(RecordId, f64)> {
    let Some(probe_id) = probe else {
        return Vec::new();
    };
    let Some(probe_record) = dataset.get(probe_id) else {
        return Vec::new();
    };

    let mut neighbors: Vec<(RecordId, f64)> = dataset
        .iter()
        .filter(|(id, _)| *id != probe_id)
        .map(|(id, r)| (id, r.distance_sq(probe_record)))
        .collect();
    neighbors.sort_by_key(|(_, d)| OrderedFloat(*d));
    neighbors.truncate(k);
    for (_, d) in &mut neighbors {
        *d = d.sqrt();
    }
    neighbors
}
