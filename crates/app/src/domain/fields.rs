//! Row decoding helpers shared by the repositories.

use std::str::FromStr;

use sqlx::{Row, postgres::PgRow};
use thiserror::Error;

/// A text column held a value outside the expected set.
#[derive(Debug, Error)]
#[error("unrecognized {field} value {value:?}")]
pub struct UnknownValue {
    pub field: &'static str,
    pub value: String,
}

impl UnknownValue {
    #[must_use]
    pub fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}

/// Decode a `BIGINT` column into the non-negative amount it represents.
pub(crate) fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

/// Decode a `BIGINT` column into a quantity.
pub(crate) fn try_get_quantity(row: &PgRow, col: &str) -> Result<u32, sqlx::Error> {
    let quantity_i64: i64 = row.try_get(col)?;

    u32::try_from(quantity_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

/// Decode a text column by parsing it into a domain enum.
pub(crate) fn try_parse_col<T>(row: &PgRow, col: &str) -> Result<T, sqlx::Error>
where
    T: FromStr<Err = UnknownValue>,
{
    let raw: String = row.try_get(col)?;

    raw.parse().map_err(|e: UnknownValue| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}
