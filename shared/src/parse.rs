//! Row parser for loosely structured leaderboard sheets.
//!
//! Sheets drift over time: a "time period" banner row may or may not sit
//! above the header, and columns move around between weeks. Columns are
//! therefore located by header text, using one small table per period kind.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::Error;
use crate::model::{LeaderboardEntry, PeriodKind};
use crate::workbook::{Cell, Sheet};

/// Marker the sheets put next to score headers.
pub const SCORE_MARKER: &str = "🔥";

/// How many non-empty leading rows may hold the header.
pub const HEADER_SCAN_ROWS: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Address,
    Sparks,
    Verification,
    NftCollection,
    ReferralBonus,
}

/// Header text test, compared case-insensitively on trimmed text.
#[derive(Clone, Copy, Debug)]
pub enum Matcher {
    Exact(&'static str),
    Contains(&'static [&'static str]),
}

impl Matcher {
    pub fn matches(&self, header: &str) -> bool {
        let header = header.trim().to_lowercase();
        match self {
            Matcher::Exact(word) => header == *word,
            Matcher::Contains(words) => words.iter().any(|w| header.contains(w)),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub field: Field,
    pub matcher: Matcher,
}

const ADDRESS: FieldRule = FieldRule { field: Field::Address, matcher: Matcher::Exact("address") };
const SPARKS: FieldRule = FieldRule {
    field: Field::Sparks,
    matcher: Matcher::Contains(&["sparks", SCORE_MARKER]),
};
const VERIFICATION: FieldRule = FieldRule {
    field: Field::Verification,
    matcher: Matcher::Contains(&["sloth", "verification"]),
};
const NFT: FieldRule = FieldRule {
    field: Field::NftCollection,
    matcher: Matcher::Contains(&["nft", "collection"]),
};
const REFERRAL: FieldRule = FieldRule {
    field: Field::ReferralBonus,
    matcher: Matcher::Contains(&["referral"]),
};

static OVERALL_LAYOUT: [FieldRule; 2] = [ADDRESS, SPARKS];
static VERIFICATION_LAYOUT: [FieldRule; 3] = [ADDRESS, SPARKS, VERIFICATION];
static NFT_LAYOUT: [FieldRule; 3] = [ADDRESS, SPARKS, NFT];
static BONUS_LAYOUT: [FieldRule; 3] = [ADDRESS, SPARKS, REFERRAL];

/// Columns a sheet of this kind is expected to carry.
pub fn layout_for(kind: PeriodKind) -> &'static [FieldRule] {
    match kind {
        PeriodKind::Overall => &OVERALL_LAYOUT,
        PeriodKind::VerificationWeek => &VERIFICATION_LAYOUT,
        PeriodKind::NftWeek => &NFT_LAYOUT,
        PeriodKind::BonusWeek => &BONUS_LAYOUT,
    }
}

/// Where the header sits and which column holds each field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnMap {
    pub header_row: usize,
    pub columns: HashMap<Field, usize>,
}

impl ColumnMap {
    pub fn get(&self, field: Field) -> Option<usize> {
        self.columns.get(&field).copied()
    }
}

/// Find the header among the first non-empty rows and map fields to columns.
///
/// A row counts as the header only if both the address and score columns
/// are present. Each column is claimed by at most one field, in rule order.
pub fn detect_columns(rows: &[Vec<Cell>], rules: &[FieldRule]) -> Option<ColumnMap> {
    let candidates = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row.iter().any(|c| !c.is_empty()))
        .take(HEADER_SCAN_ROWS);

    for (index, row) in candidates {
        let headers: Vec<String> = row.iter().map(Cell::text).collect();
        let mut columns = HashMap::new();
        for rule in rules {
            let found = headers.iter().enumerate().find(|(col, text)| {
                !text.is_empty()
                    && !columns.values().any(|taken| taken == col)
                    && rule.matcher.matches(text)
            });
            if let Some((col, _)) = found {
                columns.insert(rule.field, col);
            }
        }
        if columns.contains_key(&Field::Address) && columns.contains_key(&Field::Sparks) {
            debug!("header found on row {}: {:?}", index + 1, columns);
            return Some(ColumnMap { header_row: index, columns });
        }
    }
    None
}

/// Result of parsing one sheet.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedSheet {
    pub entries: Vec<LeaderboardEntry>,
    pub header: Option<ColumnMap>,
    pub skipped_rows: usize,
}

/// Turn a sheet into normalized entries for a period of the given kind.
///
/// Rows with an empty address, a score that is not a finite non-negative
/// number, or an address already seen on this sheet are dropped. A sheet
/// without a recognizable header yields no entries.
pub fn parse_sheet(sheet: &Sheet, kind: PeriodKind) -> ParsedSheet {
    let Some(map) = detect_columns(&sheet.rows, layout_for(kind)) else {
        debug!("sheet {:?} has no recognizable header", sheet.name);
        return ParsedSheet::default();
    };

    let mut entries = Vec::new();
    let mut seen = HashSet::new();
    let mut skipped_rows = 0;

    for (index, row) in sheet.rows.iter().enumerate().skip(map.header_row + 1) {
        if row.iter().all(Cell::is_empty) {
            continue;
        }
        match parse_row(row, &map, &mut seen) {
            Ok(entry) => entries.push(entry),
            Err(reason) => {
                skipped_rows += 1;
                debug!(sheet = %sheet.name, "{}", Error::RowParseSkip { row: index + 1, reason });
            }
        }
    }

    ParsedSheet { entries, header: Some(map), skipped_rows }
}

fn parse_row(
    row: &[Cell],
    map: &ColumnMap,
    seen: &mut HashSet<String>,
) -> Result<LeaderboardEntry, String> {
    let cell = |field: Field| map.get(field).and_then(|col| row.get(col));

    let address = cell(Field::Address).map(Cell::text).unwrap_or_default();
    if address.is_empty() {
        return Err("empty address".to_string());
    }

    let raw = cell(Field::Sparks).cloned().unwrap_or(Cell::Empty);
    let sparks = match raw.as_number() {
        Some(n) if n.is_finite() && n >= 0.0 => n,
        Some(n) => return Err(format!("score out of range: {n}")),
        None => return Err(format!("non-numeric score {:?}", raw.text())),
    };

    if !seen.insert(address.to_lowercase()) {
        return Err(format!("duplicate address {address}"));
    }

    let optional = |field: Field| cell(field).filter(|c| !c.is_empty()).map(Cell::text);

    Ok(LeaderboardEntry {
        address,
        sparks,
        nft_collection: optional(Field::NftCollection),
        hot_sloth_verification: optional(Field::Verification),
        referral_bonus: optional(Field::ReferralBonus),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<Cell> {
        cells.iter().map(|c| Cell::from(*c)).collect()
    }

    fn sheet(rows: Vec<Vec<Cell>>) -> Sheet {
        Sheet::new("test", rows)
    }

    #[test]
    fn test_header_after_banner_row() {
        let rows = vec![
            row(&["Time period: Jan 6 - Jan 13"]),
            row(&["Address", "Sparks 🔥"]),
            row(&["0xAAA", "10"]),
        ];
        let map = detect_columns(&rows, layout_for(PeriodKind::Overall)).unwrap();
        assert_eq!(map.header_row, 1);
        assert_eq!(map.get(Field::Address), Some(0));
        assert_eq!(map.get(Field::Sparks), Some(1));
    }

    #[test]
    fn test_header_on_first_row() {
        let rows = vec![row(&["Rank", "🔥", "address"]), row(&["1", "5", "0xAAA"])];
        let map = detect_columns(&rows, layout_for(PeriodKind::Overall)).unwrap();
        assert_eq!(map.header_row, 0);
        assert_eq!(map.get(Field::Address), Some(2));
        assert_eq!(map.get(Field::Sparks), Some(1));
    }

    #[test]
    fn test_header_beyond_scan_window_is_ignored() {
        let rows = vec![
            row(&["Firewall Genesis"]),
            row(&["Time period"]),
            row(&["Address", "Sparks"]),
        ];
        assert!(detect_columns(&rows, layout_for(PeriodKind::Overall)).is_none());
    }

    #[test]
    fn test_optional_columns_per_kind() {
        let rows = vec![row(&["Address", "Hot Sloth Verification", "Sparks", "Referral Bonus"])];
        let week1 = detect_columns(&rows, layout_for(PeriodKind::VerificationWeek)).unwrap();
        assert_eq!(week1.get(Field::Verification), Some(1));
        assert_eq!(week1.get(Field::ReferralBonus), None);

        let week3 = detect_columns(&rows, layout_for(PeriodKind::BonusWeek)).unwrap();
        assert_eq!(week3.get(Field::ReferralBonus), Some(3));
        assert_eq!(week3.get(Field::Verification), None);
    }

    #[test]
    fn test_thousands_separators_are_stripped() {
        let parsed = parse_sheet(
            &sheet(vec![
                row(&["Address", "Sparks"]),
                row(&["0xAAA", "1200"]),
                row(&["0xBBB", "850,000"]),
            ]),
            PeriodKind::Overall,
        );
        assert_eq!(
            parsed.entries,
            vec![
                LeaderboardEntry::new("0xAAA", 1200.0),
                LeaderboardEntry::new("0xBBB", 850_000.0),
            ]
        );
        assert_eq!(parsed.skipped_rows, 0);
    }

    #[test]
    fn test_no_header_gives_empty_list() {
        let parsed = parse_sheet(
            &sheet(vec![row(&["0xAAA", "1200"]), row(&["0xBBB", "850"])]),
            PeriodKind::Overall,
        );
        assert!(parsed.entries.is_empty());
        assert!(parsed.header.is_none());

        let empty = parse_sheet(&sheet(Vec::new()), PeriodKind::BonusWeek);
        assert!(empty.entries.is_empty());
    }

    #[test]
    fn test_bad_rows_are_skipped() {
        let parsed = parse_sheet(
            &sheet(vec![
                row(&["Address", "Sparks"]),
                row(&["", "10"]),
                row(&["0xAAA", "lots"]),
                row(&["0xBBB", ""]),
                row(&["0xCCC", "-5"]),
                row(&["", ""]),
                row(&["0xDDD", "7"]),
            ]),
            PeriodKind::Overall,
        );
        assert_eq!(parsed.entries, vec![LeaderboardEntry::new("0xDDD", 7.0)]);
        assert_eq!(parsed.skipped_rows, 4);
    }

    #[test]
    fn test_first_seen_duplicate_wins() {
        let parsed = parse_sheet(
            &sheet(vec![
                row(&["Address", "Sparks"]),
                row(&["0xAAA", "10"]),
                row(&["0xaaa", "99"]),
            ]),
            PeriodKind::Overall,
        );
        assert_eq!(parsed.entries, vec![LeaderboardEntry::new("0xAAA", 10.0)]);
        assert_eq!(parsed.skipped_rows, 1);
    }

    #[test]
    fn test_week_fields_are_carried() {
        let parsed = parse_sheet(
            &sheet(vec![
                row(&["Week 2"]),
                row(&["Address", "NFT Collection", "Sparks 🔥"]),
                row(&["0xAAA", "Sloths", "300"]),
                row(&["0xBBB", "", "200"]),
            ]),
            PeriodKind::NftWeek,
        );
        assert_eq!(parsed.entries[0].nft_collection.as_deref(), Some("Sloths"));
        assert_eq!(parsed.entries[1].nft_collection, None);
        assert_eq!(parsed.entries[1].sparks, 200.0);
    }

    #[test]
    fn test_numeric_cells_are_accepted() {
        let parsed = parse_sheet(
            &sheet(vec![
                row(&["Address", "Sparks", "Referral"]),
                vec![Cell::from("0xAAA"), Cell::Number(42.0), Cell::Number(5.0)],
            ]),
            PeriodKind::BonusWeek,
        );
        assert_eq!(parsed.entries[0].sparks, 42.0);
        assert_eq!(parsed.entries[0].referral_bonus.as_deref(), Some("5"));
    }
}
