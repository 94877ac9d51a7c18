//! Rider demographics.
//!
//! Every sub-report depends on a column some cities do not publish. A sub-report whose column is
//! absent from the source is `None` and is skipped entirely when serialized, which is distinct
//! from an empty mapping (column present, no matching rows).

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{BikeshareError, BikeshareResult};
use crate::processing::{min_max, mode, value_counts};
use crate::types::{OptionalColumn, TripTable};

/// Birth-year extremes and mode, truncated to whole years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    /// Earliest birth year.
    pub oldest: i64,
    /// Latest birth year.
    pub youngest: i64,
    pub most_common: i64,
}

/// Demographic breakdown of a trip table; `None` where the source lacks the column.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct UserStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_user_type: Option<BTreeMap<String, usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_gender: Option<BTreeMap<String, usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<BirthYearStats>,
}

/// Grouped user-type and gender counts plus birth-year extremes and mode.
///
/// Counts skip rows whose cell is missing. Birth-year figures are truncated to whole years; when
/// the column exists but holds no values (including a zero-row table) the call fails with
/// [`BikeshareError::EmptyTable`].
pub fn user_stats(table: &TripTable) -> BikeshareResult<UserStats> {
    let rows = table.rows();

    let by_user_type = table.has(OptionalColumn::UserType).then(|| {
        counts(rows.iter().filter_map(|r| r.user_type.as_deref()))
    });
    let by_gender = table
        .has(OptionalColumn::Gender)
        .then(|| counts(rows.iter().filter_map(|r| r.gender.as_deref())));

    let birth_year = if table.has(OptionalColumn::BirthYear) {
        let years: Vec<f64> = rows.iter().filter_map(|r| r.birth_year).collect();
        Some(birth_year_stats(&years)?)
    } else {
        None
    };

    Ok(UserStats {
        by_user_type,
        by_gender,
        birth_year,
    })
}

fn counts<'a>(values: impl Iterator<Item = &'a str>) -> BTreeMap<String, usize> {
    value_counts(values)
        .into_iter()
        .map(|(k, n)| (k.to_string(), n))
        .collect()
}

fn birth_year_stats(years: &[f64]) -> BikeshareResult<BirthYearStats> {
    let empty = || BikeshareError::EmptyTable {
        statistic: "birth year",
    };
    let (oldest, youngest) = min_max(years.iter().copied()).ok_or_else(empty)?;
    let most_common = mode(years.iter().map(|y| y.trunc() as i64)).ok_or_else(empty)?;
    Ok(BirthYearStats {
        oldest: oldest.trunc() as i64,
        youngest: youngest.trunc() as i64,
        most_common,
    })
}
