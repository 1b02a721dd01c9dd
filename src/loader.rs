use crate::errors::BenchError;
use crate::row::Row;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Loads the whole dataset from a JSON file holding a top-level array of rows.
///
/// # Errors
/// Returns `BenchError::Io` if the file cannot be opened or read, `Json` if it is not
/// valid JSON, `NotAnArray` if the top-level value is not an array. Elements of any
/// kind are kept as rows.
pub fn load_rows<P: AsRef<Path>>(path: P) -> Result<Vec<Row>, BenchError> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| BenchError::Io(format!("cannot open {}: {}", path.display(), e)))?;
    let rows = rows_from_reader(file).map_err(|e| match e {
        BenchError::Io(msg) => BenchError::Io(format!("cannot read {}: {}", path.display(), msg)),
        other => other,
    })?;
    log::info!("loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// # Errors
/// See [`load_rows`].
pub fn rows_from_reader<R: Read>(reader: R) -> Result<Vec<Row>, BenchError> {
    // Read entire content; the dataset is held in memory anyway
    let mut s = String::new();
    BufReader::new(reader)
        .read_to_string(&mut s)
        .map_err(|e| BenchError::Io(e.to_string()))?;
    rows_from_str(&s)
}

/// # Errors
/// See [`load_rows`].
pub fn rows_from_str(s: &str) -> Result<Vec<Row>, BenchError> {
    let Value::Array(items) = serde_json::from_str::<Value>(s)? else {
        return Err(BenchError::NotAnArray);
    };
    Ok(items.into_iter().map(Row::from).collect())
}
