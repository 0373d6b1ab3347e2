//! Delimited-text point loader

use std::io::Read;

use chrono::NaiveDate;
use csv::ReaderBuilder;
use lv_core::{Dataset, Record};
use tracing::{debug, info, warn};

use super::{DataError, DATE_FORMAT};

/// Column positions resolved from the header row, falling back to the
/// conventional `x,y,category[,date][,weight]` order when headers do not
/// name them.
struct ColumnMap {
    x: usize,
    y: usize,
    category: usize,
    date: Option<usize>,
    weight: Option<usize>,
}

impl ColumnMap {
    fn resolve(headers: &csv::StringRecord) -> Self {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        Self {
            x: find("x").unwrap_or(0),
            y: find("y").unwrap_or(1),
            category: find("category").unwrap_or(2),
            date: find("date"),
            weight: find("weight"),
        }
    }
}

/// Load a point dataset from delimited text.
///
/// The first row is a header. Rows with non-numeric coordinates or a
/// missing category are excluded from the dataset; the load itself only
/// fails on I/O or CSV-structure errors.
pub fn read_points_csv<R: Read>(reader: R) -> Result<Dataset, DataError> {
    let mut csv = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = ColumnMap::resolve(csv.headers()?);

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for (row_idx, row) in csv.records().enumerate() {
        let row = row?;
        match parse_row(&row, &columns) {
            Some(record) => records.push(record),
            None => {
                dropped += 1;
                debug!(row = row_idx + 1, "dropped malformed record");
            }
        }
    }

    if dropped > 0 {
        warn!(dropped, kept = records.len(), "some records were malformed");
    }
    info!(records = records.len(), "loaded point dataset");
    Ok(Dataset::new(records))
}

fn parse_row(row: &csv::StringRecord, columns: &ColumnMap) -> Option<Record> {
    let x = parse_finite(row.get(columns.x)?)?;
    let y = parse_finite(row.get(columns.y)?)?;
    let category = row.get(columns.category)?;
    if category.is_empty() {
        return None;
    }

    // Optional fields degrade to absence, never to a dropped row.
    let time = columns
        .date
        .and_then(|i| row.get(i))
        .and_then(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).ok());
    let weight = columns
        .weight
        .and_then(|i| row.get(i))
        .and_then(parse_finite);

    Some(Record {
        x,
        y,
        time,
        category: category.to_string(),
        weight,
    })
}

fn parse_finite(field: &str) -> Option<f64> {
    field.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_rows_are_dropped_not_fatal() {
        let csv = "\
x,y,category
1.0,1.0,A
oops,2.0,A
3.0,,B
5.0,5.0,B
";
        let ds = read_points_csv(csv.as_bytes()).unwrap();
        assert_eq!(ds.len(), 2);
        let cats: Vec<_> = ds.iter().map(|(_, r)| r.category.as_str()).collect();
        assert_eq!(cats, vec!["A", "B"]);
    }

    #[test]
    fn missing_category_drops_the_row() {
        let csv = "x,y,category\n1.0,2.0,\n";
        let ds = read_points_csv(csv.as_bytes()).unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn optional_date_and_weight_columns() {
        let csv = "\
date,x,y,category,weight
2011-03-11,0.0,9.1,quake,15894
not-a-date,0.0,6.3,quake,bad
";
        let ds = read_points_csv(csv.as_bytes()).unwrap();
        assert_eq!(ds.len(), 2);

        let first = ds.get(lv_core::RecordId(0)).unwrap();
        assert_eq!(
            first.time,
            NaiveDate::from_ymd_opt(2011, 3, 11)
        );
        assert_eq!(first.weight, Some(15894.0));

        // Unparsable optional fields degrade to None.
        let second = ds.get(lv_core::RecordId(1)).unwrap();
        assert_eq!(second.time, None);
        assert_eq!(second.weight, None);
    }

    #[test]
    fn positional_fallback_without_named_headers() {
        let csv = "a,b,c\n1.5,2.5,A\n";
        let ds = read_points_csv(csv.as_bytes()).unwrap();
        assert_eq!(ds.len(), 1);
        let r = ds.get(lv_core::RecordId(0)).unwrap();
        assert_eq!((r.x, r.y), (1.5, 2.5));
    }
}
