//! Outlier detection and removal over numeric columns.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{CleanConfig, OutlierAction, OutlierMethod};
use crate::report::OutlierSummary;
use crate::table::{ColumnData, Table};

/// Identifier-like columns never take part in outlier analysis.
static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(?:^id$|_id$|^id_)").unwrap());

/// True for names like `id`, `user_id`, `id_number`.
pub fn is_identifier_column(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// Detect, and under `drop` remove, outliers in eligible numeric columns.
/// Every eligible column gets a summary entry, even when nothing is
/// flagged. Returns the rows removed.
pub fn apply(
    table: &mut Table,
    config: &CleanConfig,
    outliers: &mut IndexMap<String, OutlierSummary>,
) -> usize {
    let rows = table.row_count();
    let threshold = config.effective_outlier_threshold();
    let mut removal = vec![false; rows];

    for column in table.columns() {
        let ColumnData::Number(values) = &column.data else {
            continue;
        };
        if is_identifier_column(&column.name) {
            continue;
        }

        let sample: Vec<f64> = values.iter().flatten().copied().collect();
        let mask = if sample.is_empty() {
            vec![false; rows]
        } else {
            match config.outlier_method {
                OutlierMethod::Iqr => iqr_mask(values, &sample, threshold),
                OutlierMethod::Zscore => zscore_mask(values, &sample, threshold),
            }
        };

        let count = mask.iter().filter(|m| **m).count();
        outliers.insert(
            column.name.clone(),
            OutlierSummary {
                count,
                percent: count as f64 / rows.max(1) as f64,
            },
        );

        if config.outlier_action == OutlierAction::Drop {
            for (slot, flagged) in removal.iter_mut().zip(&mask) {
                *slot |= *flagged;
            }
        }
    }

    // Identifier columns are purged even if one slipped into the report.
    outliers.retain(|name, _| !is_identifier_column(name));

    if config.outlier_action != OutlierAction::Drop {
        return 0;
    }
    let removed = removal.iter().filter(|r| **r).count();
    if removed > 0 {
        let keep: Vec<bool> = removal.iter().map(|r| !r).collect();
        table.retain_rows(&keep);
    }
    removed
}

/// Flag values outside `[Q1 - k*IQR, Q3 + k*IQR]`; missing cells are never
/// flagged.
fn iqr_mask(values: &[Option<f64>], sample: &[f64], multiplier: f64) -> Vec<bool> {
    let mut sorted = sample.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let q1 = quantile(&sorted, 0.25);
    let q3 = quantile(&sorted, 0.75);
    let iqr = q3 - q1;
    let lower = q1 - multiplier * iqr;
    let upper = q3 + multiplier * iqr;

    values
        .iter()
        .map(|v| matches!(v, Some(x) if *x < lower || *x > upper))
        .collect()
}

/// Flag values whose population z-score exceeds the cutoff. A zero or
/// undefined standard deviation flags nothing.
fn zscore_mask(values: &[Option<f64>], sample: &[f64], threshold: f64) -> Vec<bool> {
    let n = sample.len() as f64;
    let mean = sample.iter().sum::<f64>() / n;
    let variance = sample.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let std = variance.sqrt();
    if std == 0.0 || !std.is_finite() {
        return vec![false; values.len()];
    }

    values
        .iter()
        .map(|v| matches!(v, Some(x) if ((x - mean) / std).abs() > threshold))
        .collect()
}

/// Quantile by linear interpolation over sorted values.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    if sorted.len() == 1 {
        return sorted[0];
    }
    let position = p * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Column, Table};

    fn numeric_table(name: &str, values: Vec<Option<f64>>) -> Table {
        Table::new(vec![Column {
            name: name.to_string(),
            data: ColumnData::Number(values),
        }])
        .unwrap()
    }

    #[test]
    fn test_identifier_pattern() {
        assert!(is_identifier_column("id"));
        assert!(is_identifier_column("ID"));
        assert!(is_identifier_column("user_id"));
        assert!(is_identifier_column("id_number"));
        assert!(!is_identifier_column("idea"));
        assert!(!is_identifier_column("valid"));
    }

    #[test]
    fn test_quantile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.25), 1.75);
        assert_eq!(quantile(&sorted, 0.5), 2.5);
        assert_eq!(quantile(&sorted, 0.75), 3.25);
    }

    #[test]
    fn test_iqr_report_counts() {
        let mut values: Vec<Option<f64>> = vec![Some(10.0); 20];
        values.push(Some(1000.0));
        let mut table = numeric_table("value", values);
        let config = CleanConfig {
            detect_outliers: true,
            ..CleanConfig::default()
        };
        let mut report = IndexMap::new();

        let removed = apply(&mut table, &config, &mut report);

        assert_eq!(removed, 0);
        assert_eq!(table.row_count(), 21);
        assert_eq!(report.get("value").map(|s| s.count), Some(1));
    }

    #[test]
    fn test_zscore_zero_std_flags_nothing() {
        let mut table = numeric_table("flat", vec![Some(5.0); 10]);
        let config = CleanConfig {
            detect_outliers: true,
            outlier_method: OutlierMethod::Zscore,
            ..CleanConfig::default()
        };
        let mut report = IndexMap::new();

        apply(&mut table, &config, &mut report);

        assert_eq!(report.get("flat").map(|s| s.count), Some(0));
    }

    #[test]
    fn test_all_missing_column_reports_zero() {
        let mut table = numeric_table("empty", vec![None, None, None]);
        let config = CleanConfig {
            detect_outliers: true,
            ..CleanConfig::default()
        };
        let mut report = IndexMap::new();

        apply(&mut table, &config, &mut report);

        assert_eq!(
            report.get("empty"),
            Some(&OutlierSummary {
                count: 0,
                percent: 0.0
            })
        );
    }

    #[test]
    fn test_drop_unions_masks_across_columns() {
        let mut table = Table::new(vec![
            Column {
                name: "a".to_string(),
                data: ColumnData::Number(
                    (0..20)
                        .map(|_| Some(10.0))
                        .chain([Some(1000.0), Some(10.0)])
                        .collect(),
                ),
            },
            Column {
                name: "b".to_string(),
                data: ColumnData::Number(
                    (0..21)
                        .map(|_| Some(3.0))
                        .chain([Some(900.0)])
                        .collect(),
                ),
            },
        ])
        .unwrap();
        let config = CleanConfig {
            detect_outliers: true,
            outlier_action: OutlierAction::Drop,
            ..CleanConfig::default()
        };
        let mut report = IndexMap::new();

        let removed = apply(&mut table, &config, &mut report);

        assert_eq!(removed, 2);
        assert_eq!(table.row_count(), 20);
    }

    #[test]
    fn test_identifier_columns_never_flagged_or_dropped() {
        let mut table = Table::new(vec![
            Column {
                name: "user_id".to_string(),
                data: ColumnData::Number(vec![Some(1_000_000.0), Some(2.0), Some(3.0)]),
            },
            Column {
                name: "value".to_string(),
                data: ColumnData::Number(vec![Some(10.0), Some(12.0), Some(11.0)]),
            },
        ])
        .unwrap();
        let config = CleanConfig {
            detect_outliers: true,
            outlier_method: OutlierMethod::Zscore,
            outlier_threshold: Some(3.0),
            outlier_action: OutlierAction::Drop,
            ..CleanConfig::default()
        };
        let mut report = IndexMap::new();

        let removed = apply(&mut table, &config, &mut report);

        assert_eq!(removed, 0);
        assert_eq!(table.row_count(), 3);
        assert!(!report.contains_key("user_id"));
        assert!(report.contains_key("value"));
    }
}
