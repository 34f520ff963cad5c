//! CSV loading of [`HorseRecord`]s.
//!
//! Expected header: `age,sps_avg,sl_avg,distance`. Column order follows the
//! header, extra columns are ignored.

use super::HorseRecord;
use crate::error::DatasetError;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Loads horse records from a CSV file.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<HorseRecord>, DatasetError> {
    let file = File::open(path.as_ref())?;
    let records = from_reader(BufReader::new(file))?;
    log::info!(
        "loaded {} records from {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(records)
}

/// Reads horse records from any CSV source.
///
/// # Errors
/// - [`DatasetError::Csv`] for malformed rows or missing columns
/// - [`DatasetError::NonFinite`] for NaN or infinite measurements
///
/// ```rust
/// use stride_regression::dataset::from_reader;
///
/// let csv = "age,sps_avg,sl_avg,distance\n3,2.31,7.42,8.0\n4,2.25,7.80,10.0\n";
/// let records = from_reader(csv.as_bytes()).unwrap();
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[1].age, 4);
/// ```
pub fn from_reader<R: Read>(reader: R) -> Result<Vec<HorseRecord>, DatasetError> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = rdr.headers()?.clone();

    let mut records = Vec::new();
    let mut raw = StringRecord::new();
    while rdr.read_record(&mut raw)? {
        let line = raw.position().map(|p| p.line()).unwrap_or_default();
        let record: HorseRecord = raw.deserialize(Some(&headers))?;
        check_finite(&record, line)?;
        records.push(record);
    }
    Ok(records)
}

fn check_finite(record: &HorseRecord, line: u64) -> Result<(), DatasetError> {
    let fields = [
        ("sps_avg", record.sps_avg),
        ("sl_avg", record.sl_avg),
        ("distance", record.distance),
    ];
    match fields.iter().find(|(_, v)| !v.is_finite()) {
        Some((field, _)) => Err(DatasetError::NonFinite {
            line,
            field: *field,
        }),
        None => Ok(()),
    }
}
