//! In-memory workbook: every sheet as a grid of loosely typed cells.
//!
//! Nothing here assumes a header row or fixed coordinates; the row parser
//! works that out later.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use tracing::debug;

use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Trimmed display text of the cell.
    pub fn text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(n) => crate::model::format_sparks(*n),
            Cell::Bool(b) => b.to_string(),
        }
    }

    /// Numeric value, accepting text like `"850,000"`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => {
                let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
                if cleaned.is_empty() {
                    return None;
                }
                cleaned.parse::<f64>().ok()
            }
            _ => None,
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        if s.trim().is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { name: name.into(), rows }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// Decode a binary spreadsheet (`xlsx`, `xls`, `xlsb` or `ods`).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut book = open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(Error::malformed)?;

        let mut sheets = Vec::new();
        for name in book.sheet_names() {
            let range = book.worksheet_range(&name).map_err(Error::malformed)?;
            let rows: Vec<Vec<Cell>> = range
                .rows()
                .map(|row| row.iter().map(cell_from_data).collect())
                .collect();
            debug!("sheet {:?}: {} rows", name, rows.len());
            sheets.push(Sheet::new(name, rows));
        }

        Self::non_empty(sheets)
    }

    /// Read a CSV export as a one-sheet workbook.
    pub fn from_csv(text: &str, sheet_name: &str) -> Result<Self> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(Error::malformed)?;
            rows.push(record.iter().map(Cell::from).collect());
        }
        if rows.is_empty() {
            return Err(Error::malformed("CSV document has no rows"));
        }
        Self::non_empty(vec![Sheet::new(sheet_name, rows)])
    }

    fn non_empty(sheets: Vec<Sheet>) -> Result<Self> {
        if sheets.is_empty() {
            return Err(Error::malformed("no sheets found in the workbook"));
        }
        Ok(Self { sheets })
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::from(s.as_str()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::from(s.as_str()),
        // #N/A, #REF! and friends
        _ => Cell::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_coercion_strips_commas() {
        assert_eq!(Cell::from("850,000").as_number(), Some(850_000.0));
        assert_eq!(Cell::from(" 1200 ").as_number(), Some(1200.0));
        assert_eq!(Cell::Number(12.5).as_number(), Some(12.5));
        assert_eq!(Cell::from("n/a").as_number(), None);
        assert_eq!(Cell::Empty.as_number(), None);
        assert_eq!(Cell::Bool(true).as_number(), None);
    }

    #[test]
    fn test_blank_text_is_empty() {
        assert!(Cell::from("   ").is_empty());
        assert!(Cell::Empty.is_empty());
        assert!(!Cell::Number(0.0).is_empty());
    }

    #[test]
    fn test_csv_becomes_single_sheet() {
        let csv = "\u{feff}Time period: week 1,\nAddress,Sparks 🔥\n0xAAA,\"1,200\"\n";
        let book = Workbook::from_csv(csv, "Leaderboard").unwrap();
        assert_eq!(book.sheet_names(), vec!["Leaderboard"]);
        let sheet = book.sheet("Leaderboard").unwrap();
        assert_eq!(sheet.rows.len(), 3);
        assert_eq!(sheet.rows[1][0], Cell::Text("Address".into()));
        assert_eq!(sheet.rows[2][1].as_number(), Some(1200.0));
    }

    #[test]
    fn test_empty_csv_is_malformed() {
        let err = Workbook::from_csv("", "Leaderboard").unwrap_err();
        assert!(matches!(err, Error::MalformedWorkbook(_)));
    }

    #[test]
    fn test_garbage_bytes_are_malformed() {
        let err = Workbook::from_bytes(b"definitely not a spreadsheet").unwrap_err();
        assert!(matches!(err, Error::MalformedWorkbook(_)));
    }
}
