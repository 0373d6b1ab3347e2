//! Data <-> screen coordinate mapping
//!
//! A [`Scale`] is a pair-free, single-axis monotonic mapping from a data
//! domain to a pixel range. It is a pure value: rebuilt whenever the
//! dataset or the canvas geometry changes, and invertible so brush and
//! zoom gestures can be mapped back into data space.

use chrono::{NaiveDate, NaiveTime};

use crate::error::EngineError;
use crate::record::{Axis, Dataset, Record};

/// Amount a degenerate (zero-width) domain is widened on each side
const DEGENERATE_WIDEN: f64 = 1.0;

/// How a scale interprets its axis values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleKind {
    /// Numeric min/max domain
    Linear,
    /// Date domain in epoch milliseconds, with a forward padding margin
    /// so the most recent points are not flush against the range edge
    Temporal { forward_pad_days: i64 },
}

impl ScaleKind {
    /// Default forward padding for temporal axes, in days
    pub const DEFAULT_FORWARD_PAD_DAYS: i64 = 500;

    pub fn temporal() -> Self {
        Self::Temporal {
            forward_pad_days: Self::DEFAULT_FORWARD_PAD_DAYS,
        }
    }
}

/// Epoch-millisecond representation of a date, used as the temporal
/// domain coordinate
pub fn date_to_domain(date: NaiveDate) -> f64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis() as f64
}

/// The domain-space value of a record on one axis, under a given scale
/// kind. Returns `None` for a temporal axis when the record has no date.
pub fn axis_value(record: &Record, axis: Axis, kind: ScaleKind) -> Option<f64> {
    match (axis, kind) {
        (Axis::X, ScaleKind::Temporal { .. }) => record.time.map(date_to_domain),
        (Axis::X, ScaleKind::Linear) => Some(record.x),
        (Axis::Y, _) => Some(record.y),
    }
}

/// A monotonic, invertible mapping from a data domain to a pixel range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl Scale {
    /// Build a scale over explicit domain bounds. A degenerate domain is
    /// widened deterministically instead of dividing by zero later.
    pub fn with_domain(domain: (f64, f64), range: (f64, f64)) -> Self {
        let mut scale = Self {
            domain: (0.0, 1.0),
            range,
        };
        scale.set_domain(domain);
        scale
    }

    /// Build a scale for one axis of a dataset.
    ///
    /// Fails with [`EngineError::EmptyDataset`] when no record supplies a
    /// finite value for the axis, so callers report the condition instead
    /// of propagating NaN domains into every dependent view.
    pub fn build(
        dataset: &Dataset,
        axis: Axis,
        kind: ScaleKind,
        range: (f64, f64),
    ) -> Result<Self, EngineError> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for (_, record) in dataset.iter() {
            if let Some(v) = axis_value(record, axis, kind) {
                if v.is_finite() {
                    min = min.min(v);
                    max = max.max(v);
                }
            }
        }
        if min > max {
            return Err(EngineError::EmptyDataset);
        }
        if let ScaleKind::Temporal { forward_pad_days } = kind {
            max += forward_pad_days as f64 * MILLIS_PER_DAY;
        }
        Ok(Self::with_domain((min, max), range))
    }

    /// Map a domain value to a pixel position
    pub fn to_screen(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Map a pixel position back to a domain value
    pub fn to_domain(&self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        d0 + (pixel - r0) / (r1 - r0) * (d1 - d0)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Replace the domain, widening it if degenerate. Used on the focus
    /// scale when a brush assigns a new domain window.
    pub fn set_domain(&mut self, domain: (f64, f64)) {
        self.domain = if domain.0 == domain.1 {
            (domain.0 - DEGENERATE_WIDEN, domain.1 + DEGENERATE_WIDEN)
        } else {
            domain
        };
    }
}

const MILLIS_PER_DAY: f64 = 86_400_000.0;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    fn dataset(points: &[(f64, f64)]) -> Dataset {
        Dataset::new(
            points
                .iter()
                .map(|&(x, y)| Record::new(x, y, "A"))
                .collect(),
        )
    }

    #[test]
    fn endpoints_map_to_range_bounds() {
        let ds = dataset(&[(1.0, 2.0), (5.0, 8.0)]);
        let scale = Scale::build(&ds, Axis::X, ScaleKind::Linear, (0.0, 100.0)).unwrap();
        assert_eq!(scale.to_screen(1.0), 0.0);
        assert_eq!(scale.to_screen(5.0), 100.0);
    }

    #[test]
    fn inverted_range_matches_screen_y_convention() {
        // d3-style y scale: range (height, 0)
        let ds = dataset(&[(0.0, 0.0), (0.0, 10.0)]);
        let scale = Scale::build(&ds, Axis::Y, ScaleKind::Linear, (400.0, 0.0)).unwrap();
        assert_eq!(scale.to_screen(0.0), 400.0);
        assert_eq!(scale.to_screen(10.0), 0.0);
    }

    #[test]
    fn round_trip_within_tolerance() {
        let ds = dataset(&[(-3.5, 0.0), (12.25, 1.0)]);
        let scale = Scale::build(&ds, Axis::X, ScaleKind::Linear, (40.0, 760.0)).unwrap();
        for v in [-3.5, 0.0, 4.75, 12.25] {
            let back = scale.to_domain(scale.to_screen(v));
            assert!((back - v).abs() < 1e-9, "{back} vs {v}");
        }
    }

    #[test]
    fn degenerate_domain_is_widened() {
        let ds = dataset(&[(7.0, 1.0), (7.0, 2.0)]);
        let scale = Scale::build(&ds, Axis::X, ScaleKind::Linear, (0.0, 100.0)).unwrap();
        assert_eq!(scale.domain(), (6.0, 8.0));
        assert!(scale.to_screen(7.0).is_finite());
    }

    #[test]
    fn empty_dataset_is_an_explicit_error() {
        let ds = Dataset::default();
        assert!(matches!(
            Scale::build(&ds, Axis::X, ScaleKind::Linear, (0.0, 1.0)),
            Err(EngineError::EmptyDataset)
        ));
    }

    #[test]
    fn temporal_domain_gets_forward_padding() {
        let mut records = vec![Record::new(0.0, 1.0, "A"), Record::new(0.0, 2.0, "A")];
        records[0].time = NaiveDate::from_ymd_opt(2000, 1, 1);
        records[1].time = NaiveDate::from_ymd_opt(2000, 12, 31);
        let ds = Dataset::new(records);

        let kind = ScaleKind::Temporal {
            forward_pad_days: 10,
        };
        let scale = Scale::build(&ds, Axis::X, kind, (0.0, 100.0)).unwrap();

        let last = date_to_domain(NaiveDate::from_ymd_opt(2000, 12, 31).unwrap());
        // Latest point sits short of the range edge.
        assert!(scale.to_screen(last) < 100.0);
        assert_eq!(scale.domain().1, last + 10.0 * MILLIS_PER_DAY);
    }

    #[test]
    fn records_without_dates_are_ignored_on_temporal_axes() {
        let mut records = vec![Record::new(0.0, 1.0, "A"), Record::new(0.0, 2.0, "A")];
        records[0].time = NaiveDate::from_ymd_opt(2010, 6, 1);
        let ds = Dataset::new(records);

        let scale = Scale::build(&ds, Axis::X, ScaleKind::temporal(), (0.0, 100.0)).unwrap();
        let only = date_to_domain(NaiveDate::from_ymd_opt(2010, 6, 1).unwrap());
        assert_eq!(scale.to_screen(only), 0.0);
    }
}
