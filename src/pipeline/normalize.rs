use std::collections::BTreeMap;

use crate::{
    config::accessors::RowAccessors,
    data::observation::Observation,
    data::record::{FieldValue, RawRow, Record},
    foundation::error::RaceResult,
};

/// Turn one raw row into an [`Observation`].
///
/// Besides the accessor-driven core fields, every numeric field whose text differs from the id
/// is copied into `extras`.
pub fn normalize_row(
    row: &RawRow,
    index: usize,
    accessors: &dyn RowAccessors,
) -> RaceResult<Observation> {
    let id = accessors.id(row, index);
    let label = accessors.label(row, index);
    let step = accessors.step(row, index)?;
    let value = accessors.value(row, index);
    let raw = Record::from_row(row);

    let mut extras = BTreeMap::new();
    for (key, field) in raw.iter() {
        if row.get(key).is_some_and(|text| *text == id) {
            continue;
        }
        if let FieldValue::Number(n) = field {
            extras.insert(key.to_owned(), *n);
        }
    }

    Ok(Observation {
        id: id.into(),
        label: label.into(),
        value,
        step,
        alpha: if value.is_nan() { 0.0 } else { 1.0 },
        up: false,
        raw,
        extras,
    })
}

/// Normalize every row. The first row whose step cannot be read aborts the run.
pub fn normalize_rows(rows: &[RawRow], accessors: &dyn RowAccessors) -> RaceResult<Vec<Observation>> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| normalize_row(row, i, accessors))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/normalize.rs"]
mod tests;
