//! Type inference and the final type-safety coercion pass.

use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::report::DtypeChange;
use crate::table::{Cell, Column, ColumnData, Table};

use super::{ColumnOutcome, SkipReason};

/// Commit ratio for the numeric attempt during inference.
const NUMERIC_COMMIT_RATIO: f64 = 0.9;
/// Stricter ratio the finalizer retries both attempts at.
const FINAL_COMMIT_RATIO: f64 = 0.95;

/// Cheap gate before full date parsing: a separator among `/ - .` or an
/// alphabetic run of length >= 3 (month names).
static DATE_LIKE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[/.\-]|[A-Za-z]{3,}").unwrap());

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Run the inferencer over every column.
pub fn apply(table: &mut Table, date_thresh: f64, changes: &mut IndexMap<String, DtypeChange>) {
    for column in table.columns_mut() {
        infer_column(column, date_thresh, changes);
    }
}

/// Attempt a numeric commit, then a gated datetime commit, for one column.
/// Ratios are over the total row count, so missing cells count against a
/// commit. Records a `{from, to}` entry whenever a commit happens.
pub fn infer_column(
    column: &mut Column,
    date_thresh: f64,
    changes: &mut IndexMap<String, DtypeChange>,
) {
    let rows = column.data.len();
    if rows == 0 || column.data.non_null_count() == 0 {
        return;
    }
    let from = column.data.kind_name();

    let numbers: Vec<Option<f64>> = (0..rows)
        .map(|row| parse_number(&column.data.get(row)))
        .collect();
    let parsed = numbers.iter().flatten().count();
    if parsed as f64 / rows as f64 >= NUMERIC_COMMIT_RATIO {
        column.data = ColumnData::Number(numbers);
        changes.insert(
            column.name.clone(),
            DtypeChange {
                from: from.to_string(),
                to: "numeric".to_string(),
            },
        );
        return;
    }

    if !passes_date_gate(column, date_thresh) {
        return;
    }
    let stamps: Vec<Option<NaiveDateTime>> = (0..rows)
        .map(|row| parse_datetime(&column.data.get(row)))
        .collect();
    let parsed = stamps.iter().flatten().count();
    if parsed as f64 / rows as f64 >= date_thresh {
        column.data = ColumnData::Timestamp(stamps);
        changes.insert(
            column.name.clone(),
            DtypeChange {
                from: from.to_string(),
                to: "datetime".to_string(),
            },
        );
    }
}

/// Run the finalizer over every column. Always on: downstream serialization
/// of a mixed-type column is unsafe, so this is a consistency guarantee
/// rather than a user-visible transform, and it emits no report entries.
pub fn finalize(table: &mut Table) {
    for column in table.columns_mut() {
        let _ = finalize_column(column);
    }
}

/// Give one still-mixed column an unambiguous representation: numeric at
/// 0.95, else a gated datetime attempt at 0.95, else every value coerced to
/// explicit text. Committed columns are already unambiguous.
pub fn finalize_column(column: &mut Column) -> ColumnOutcome {
    if !matches!(column.data, ColumnData::Mixed(_)) {
        return ColumnOutcome::Skipped(SkipReason::NotApplicable);
    }
    let rows = column.data.len();

    let numbers: Vec<Option<f64>> = (0..rows)
        .map(|row| parse_number(&column.data.get(row)))
        .collect();
    let parsed = numbers.iter().flatten().count();
    if parsed as f64 / rows.max(1) as f64 >= FINAL_COMMIT_RATIO {
        column.data = ColumnData::Number(numbers);
        return ColumnOutcome::Applied { cells: rows };
    }

    if passes_date_gate(column, FINAL_COMMIT_RATIO) {
        let stamps: Vec<Option<NaiveDateTime>> = (0..rows)
            .map(|row| parse_datetime(&column.data.get(row)))
            .collect();
        let parsed = stamps.iter().flatten().count();
        if parsed as f64 / rows.max(1) as f64 >= FINAL_COMMIT_RATIO {
            column.data = ColumnData::Timestamp(stamps);
            return ColumnOutcome::Applied { cells: rows };
        }
    }

    let texts: Vec<Option<String>> = (0..rows)
        .map(|row| column.data.get(row).to_text())
        .collect();
    column.data = ColumnData::Text(texts);
    ColumnOutcome::Applied { cells: rows }
}

/// Fraction of non-missing values that look date-like must reach `thresh`
/// before full date parsing is attempted.
fn passes_date_gate(column: &Column, thresh: f64) -> bool {
    let mut non_null = 0usize;
    let mut date_like = 0usize;
    for row in 0..column.data.len() {
        let Some(text) = column.data.get(row).to_text() else {
            continue;
        };
        non_null += 1;
        if DATE_LIKE.is_match(&text) {
            date_like += 1;
        }
    }
    non_null > 0 && date_like as f64 / non_null as f64 >= thresh
}

/// Parse one cell as a number; missing and unparsable both yield `None`.
fn parse_number(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Null => None,
        Cell::Number(n) => Some(*n),
        Cell::Text(s) => s.trim().parse::<f64>().ok().filter(|n| !n.is_nan()),
        Cell::Timestamp(_) => None,
    }
}

/// Parse one cell as a date/time; missing and unparsable both yield `None`.
fn parse_datetime(cell: &Cell) -> Option<NaiveDateTime> {
    match cell {
        Cell::Null => None,
        Cell::Timestamp(t) => Some(*t),
        Cell::Text(s) => parse_datetime_str(s.trim()),
        Cell::Number(_) => None,
    }
}

/// Try datetime formats first, then date-only formats at midnight.
pub(crate) fn parse_datetime_str(value: &str) -> Option<NaiveDateTime> {
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(value, format) {
            return parsed.and_hms_opt(0, 0, 0);
        }
    }
    None
}
