use std::fmt;

use super::schema::{ColumnKind, ColumnLayout};

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring common dataframe dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    /// No valid value for this cell. Distinct from zero.
    Absent,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) if v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{v:.0}"),
            CellValue::Float(v) => write!(f, "{v:.4}"),
            CellValue::Absent => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Numeric view of the cell, `None` for text and absent cells.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Parse raw cell text according to the column kind.
    pub fn parse(raw: &str, kind: ColumnKind) -> Self {
        match kind {
            ColumnKind::Text if is_missing_marker(raw) => CellValue::Absent,
            ColumnKind::Text => CellValue::Text(raw.to_string()),
            ColumnKind::Numeric => clean_numeric(raw),
            ColumnKind::Inferred => infer(raw),
        }
    }
}

/// Strip thousands separators and parse as a float.
///
/// Anything that is not a finite number afterwards (`N/A`, blanks, `nan`)
/// becomes [`CellValue::Absent`].
pub fn clean_numeric(raw: &str) -> CellValue {
    let stripped: String = raw.chars().filter(|&c| c != ',').collect();
    match stripped.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => CellValue::Float(v),
        _ => CellValue::Absent,
    }
}

/// Tokens a dataframe reader treats as a missing value in any column.
const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing_marker(raw: &str) -> bool {
    MISSING_MARKERS.contains(&raw)
}

fn infer(raw: &str) -> CellValue {
    if is_missing_marker(raw) {
        return CellValue::Absent;
    }
    if let Ok(i) = raw.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = raw.parse::<f64>() {
        return CellValue::Float(f);
    }
    CellValue::Text(raw.to_string())
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// Header of one column, with the kind it was parsed as.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

/// One row of the source file; `cells[i]` belongs to `columns[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub cells: Vec<CellValue>,
}

/// The full parsed table. Never mutated after load.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
    /// Distinct `Artist` values in order of first appearance; absent
    /// artists are not listed.
    pub artists: Vec<String>,
    layout: ColumnLayout,
}

impl Dataset {
    /// Build the artist index from parsed rows.
    pub fn from_rows(columns: Vec<Column>, rows: Vec<Row>, layout: ColumnLayout) -> Self {
        let mut artists: Vec<String> = Vec::new();
        for row in &rows {
            let Some(artist) = row.cells[layout.artist].as_str() else {
                continue;
            };
            if !artists.iter().any(|a| a == artist) {
                artists.push(artist.to_string());
            }
        }
        Dataset { columns, rows, artists, layout }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn track(&self, row: usize) -> &str {
        cell_text(&self.rows[row].cells[self.layout.track])
    }

    pub fn artist(&self, row: usize) -> &str {
        cell_text(&self.rows[row].cells[self.layout.artist])
    }

    pub fn spotify_streams(&self, row: usize) -> Option<f64> {
        self.layout
            .spotify_streams
            .and_then(|col| self.rows[row].cells[col].as_f64())
    }

    pub fn tiktok_views(&self, row: usize) -> Option<f64> {
        self.layout
            .tiktok_views
            .and_then(|col| self.rows[row].cells[col].as_f64())
    }
}

fn cell_text(cell: &CellValue) -> &str {
    cell.as_str().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn thousands_separators_are_stripped() {
        assert_eq!(clean_numeric("1,234,567"), CellValue::Float(1_234_567.0));
        assert_eq!(clean_numeric("1234567"), clean_numeric("1,234,567"));
        assert_eq!(clean_numeric(" 42 "), CellValue::Float(42.0));
    }

    #[test]
    fn unparseable_numbers_are_absent() {
        assert_eq!(clean_numeric("N/A"), CellValue::Absent);
        assert_eq!(clean_numeric(""), CellValue::Absent);
        assert_eq!(clean_numeric("nan"), CellValue::Absent);
        assert_eq!(clean_numeric("inf"), CellValue::Absent);
    }

    #[test]
    fn absent_is_not_zero() {
        assert_ne!(clean_numeric("0"), CellValue::Absent);
        assert_eq!(CellValue::Absent.as_f64(), None);
    }

    #[test]
    fn inferred_cells_follow_dataframe_dtypes() {
        assert_eq!(CellValue::parse("12", ColumnKind::Inferred), CellValue::Integer(12));
        assert_eq!(CellValue::parse("0.5", ColumnKind::Inferred), CellValue::Float(0.5));
        assert_eq!(CellValue::parse("", ColumnKind::Inferred), CellValue::Absent);
        assert_eq!(
            CellValue::parse("1,200", ColumnKind::Inferred),
            CellValue::Text("1,200".to_string())
        );
        assert_eq!(CellValue::parse("42", ColumnKind::Text), CellValue::Text("42".to_string()));
    }

    #[test]
    fn missing_markers_in_text_columns_are_absent() {
        assert_eq!(CellValue::parse("", ColumnKind::Text), CellValue::Absent);
        assert_eq!(CellValue::parse("N/A", ColumnKind::Text), CellValue::Absent);
        assert_eq!(CellValue::parse("NULL", ColumnKind::Inferred), CellValue::Absent);
        // Only exact tokens count; surrounding text is kept.
        assert_eq!(
            CellValue::parse("N/A Remix", ColumnKind::Text),
            CellValue::Text("N/A Remix".to_string())
        );
    }

    #[test]
    fn whole_floats_display_without_fraction() {
        assert_eq!(CellValue::Float(3_703_895_074.0).to_string(), "3703895074");
        assert_eq!(CellValue::Float(0.25).to_string(), "0.2500");
        assert_eq!(CellValue::Absent.to_string(), "<null>");
    }
}
