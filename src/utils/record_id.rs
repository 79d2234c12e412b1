use surrealdb::RecordId;

use crate::errors::{Error, Result};

/// Parses a `table:key` path segment into a record id.
pub fn record_id_from_str(val: &str) -> Result<RecordId> {
    let (table, key) = val
        .trim()
        .split_once(':')
        .ok_or_else(|| Error::Validation(format!("malformed record id `{val}`")))?;
    if table.is_empty() || key.is_empty() {
        return Err(Error::Validation(format!("malformed record id `{val}`")));
    }
    Ok(RecordId::from_table_key(table, key))
}
