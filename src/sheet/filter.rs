//! Row filtering (keep / drop).

use crate::sheet::model::{FilterSpec, Sheet};

/// Retain only rows matched by `spec`.
pub fn keep_objects(sheet: &mut Sheet, spec: &FilterSpec) {
    retain_rows(sheet, |matched| matched, spec);
}

/// Remove every row matched by `spec`.
pub fn drop_objects(sheet: &mut Sheet, spec: &FilterSpec) {
    retain_rows(sheet, |matched| !matched, spec);
}

fn retain_rows(sheet: &mut Sheet, keep: impl Fn(bool) -> bool, spec: &FilterSpec) {
    let before = sheet.data.len();
    sheet.data.retain(|row| keep(spec.matches(row)));

    // limit/total describe the rows actually present now
    let count = sheet.data.len() as i64;
    sheet.limit = Some(count);
    sheet.total = Some(count);

    tracing::debug!(before, after = sheet.data.len(), "Filtered rows");
}
