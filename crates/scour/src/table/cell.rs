//! Tagged scalar cell values.

use chrono::NaiveDateTime;

/// A single cell value. `Null` is the distinguished missing marker and is
/// never rendered as literal text.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Missing data.
    Null,
    /// A numeric value.
    Number(f64),
    /// A textual value.
    Text(String),
    /// A date/time value.
    Timestamp(NaiveDateTime),
}

impl Cell {
    /// Returns true for the missing marker.
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Render the cell as text. `Null` has no textual form.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Cell::Null => None,
            Cell::Number(n) => Some(render_number(*n)),
            Cell::Text(s) => Some(s.clone()),
            Cell::Timestamp(t) => Some(t.format("%Y-%m-%d %H:%M:%S").to_string()),
        }
    }

    /// Hashable projection for exact-duplicate comparison. Two nulls compare
    /// equal; numbers compare by bit pattern.
    pub(crate) fn key(&self) -> CellKey {
        match self {
            Cell::Null => CellKey::Null,
            Cell::Number(n) => CellKey::Number(n.to_bits()),
            Cell::Text(s) => CellKey::Text(s.clone()),
            Cell::Timestamp(t) => CellKey::Timestamp(*t),
        }
    }
}

/// Hashable form of a [`Cell`] used when deduplicating rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum CellKey {
    Null,
    Number(u64),
    Text(String),
    Timestamp(NaiveDateTime),
}

/// Whole numbers render without a trailing `.0` so a numeric cell survives a
/// stringify/re-parse round trip unchanged.
pub(crate) fn render_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Cell::Number(n as f64)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<NaiveDateTime> for Cell {
    fn from(t: NaiveDateTime) -> Self {
        Cell::Timestamp(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_whole_numbers_without_fraction() {
        assert_eq!(render_number(30.0), "30");
        assert_eq!(render_number(-2.0), "-2");
        assert_eq!(render_number(2.5), "2.5");
    }

    #[test]
    fn test_null_has_no_textual_form() {
        assert_eq!(Cell::Null.to_text(), None);
    }

    #[test]
    fn test_null_keys_compare_equal() {
        assert_eq!(Cell::Null.key(), Cell::Null.key());
        assert_ne!(Cell::Null.key(), Cell::Text(String::new()).key());
    }
}
