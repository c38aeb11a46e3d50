use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use serde_json::Value;

use crate::{
    data::record::RawRow,
    foundation::error::{RaceError, RaceResult},
};

/// Parse rows from a JSON array of flat objects.
///
/// Strings are kept as-is, numbers and booleans are stringified and `null` fields are dropped.
pub fn rows_from_reader<R: std::io::Read>(r: R) -> RaceResult<Vec<RawRow>> {
    let value: Value =
        serde_json::from_reader(r).map_err(|e| RaceError::serde(format!("parse rows JSON: {e}")))?;
    rows_from_value(value)
}

/// Parse rows from a JSON string.
pub fn rows_from_json_str(s: &str) -> RaceResult<Vec<RawRow>> {
    let value: Value =
        serde_json::from_str(s).map_err(|e| RaceError::serde(format!("parse rows JSON: {e}")))?;
    rows_from_value(value)
}

/// Parse rows from a JSON file on disk.
pub fn rows_from_path(path: impl AsRef<Path>) -> RaceResult<Vec<RawRow>> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open rows JSON '{}'", path.display()))?;
    rows_from_reader(BufReader::new(f))
}

fn rows_from_value(value: Value) -> RaceResult<Vec<RawRow>> {
    let Value::Array(items) = value else {
        return Err(RaceError::serde("rows JSON must be an array of objects"));
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let Value::Object(fields) = item else {
                return Err(RaceError::serde(format!("row {index}: expected an object")));
            };
            let mut row = RawRow::new();
            for (key, v) in fields {
                let text = match v {
                    Value::Null => continue,
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    Value::Array(_) | Value::Object(_) => {
                        return Err(RaceError::serde(format!(
                            "row {index}: field '{key}' must be a scalar"
                        )));
                    }
                };
                row.insert(key, text);
            }
            Ok(row)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/data/rows.rs"]
mod tests;
