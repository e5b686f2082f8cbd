//! The parsed workbook: one ranked board per period.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{info, warn};

use crate::error::Error;
use crate::model::{LeaderboardEntry, LeaderboardPage, PageRequest, Period, Standing, ITEMS_PER_PAGE};
use crate::parse::parse_sheet;
use crate::rank::{self, select};
use crate::resolve::{discover_weeks, resolve_sheet};
use crate::workbook::Workbook;

/// Weeks shown when the workbook names none higher.
pub const DEFAULT_WEEKS: u32 = 7;

/// One period's board, already in rank order.
#[derive(Clone, Debug, PartialEq)]
pub struct PeriodBoard {
    pub period: Period,
    /// Workbook sheet the board came from, `None` when nothing resolved.
    pub sheet: Option<String>,
    /// Entries in spreadsheet order.
    pub entries: Vec<LeaderboardEntry>,
    pub standings: Vec<Standing>,
    pub skipped_rows: usize,
}

impl PeriodBoard {
    fn missing(period: Period) -> Self {
        Self { period, sheet: None, entries: Vec::new(), standings: Vec::new(), skipped_rows: 0 }
    }

    /// Why this board is empty, if it is because its sheet is absent.
    pub fn issue(&self) -> Option<Error> {
        self.sheet.is_none().then_some(Error::SheetNotFound { period: self.period })
    }

    pub fn rank_of(&self, address: &str) -> Option<usize> {
        self.standings
            .iter()
            .find(|s| s.entry.matches_address(address))
            .map(|s| s.rank)
    }

    pub fn find(&self, address: &str) -> Option<&Standing> {
        self.standings.iter().find(|s| s.entry.matches_address(address))
    }
}

/// Every period of one load. Built fresh per load; nothing is cached.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Leaderboard {
    boards: Vec<PeriodBoard>,
}

/// Period key to page, one per period.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LeaderboardSnapshot {
    #[serde(flatten)]
    pub pages: BTreeMap<Period, LeaderboardPage<Standing>>,
}

impl Leaderboard {
    /// Resolve and parse overall plus weeks `1..=weeks`, followed by any
    /// higher week that has a sheet of its own. Gaps above `weeks` stay out.
    pub fn from_workbook(book: &Workbook, weeks: u32) -> Self {
        let names = book.sheet_names();
        let extra_weeks = discover_weeks(&names)
            .into_iter()
            .filter(|&n| n > weeks && resolve_sheet(&names, Period::Week(n)).is_some());

        let periods = std::iter::once(Period::Overall)
            .chain((1..=weeks).chain(extra_weeks).map(Period::Week));
        let boards = periods
            .map(|period| {
                let Some(name) = resolve_sheet(&names, period) else {
                    warn!("no sheet for {}", period.label());
                    return PeriodBoard::missing(period);
                };
                let Some(sheet) = book.sheet(name) else {
                    return PeriodBoard::missing(period);
                };
                let parsed = parse_sheet(sheet, period.kind());
                info!(
                    "{} <- sheet {:?}: {} entries, {} rows skipped",
                    period.label(),
                    name,
                    parsed.entries.len(),
                    parsed.skipped_rows
                );
                PeriodBoard {
                    period,
                    sheet: Some(name.to_string()),
                    standings: rank::standings(&parsed.entries),
                    entries: parsed.entries,
                    skipped_rows: parsed.skipped_rows,
                }
            })
            .collect();

        Self { boards }
    }

    pub fn periods(&self) -> Vec<Period> {
        self.boards.iter().map(|b| b.period).collect()
    }

    pub fn boards(&self) -> &[PeriodBoard] {
        &self.boards
    }

    pub fn board(&self, period: Period) -> Option<&PeriodBoard> {
        self.boards.iter().find(|b| b.period == period)
    }

    /// Full ranked standings of a period; empty for unknown periods.
    pub fn standings(&self, period: Period) -> &[Standing] {
        self.board(period).map(|b| b.standings.as_slice()).unwrap_or(&[])
    }

    pub fn page(&self, period: Period, request: PageRequest) -> LeaderboardPage<Standing> {
        select(self.standings(period), request, ITEMS_PER_PAGE)
    }

    /// Matching standings of a period, paginated after filtering.
    pub fn search(&self, period: Period, term: &str, request: PageRequest) -> LeaderboardPage<Standing> {
        let hits = rank::search(self.standings(period), term);
        select(&hits, request, ITEMS_PER_PAGE)
    }

    /// The same page of every period.
    pub fn snapshot(&self, request: PageRequest) -> LeaderboardSnapshot {
        let pages = self
            .boards
            .iter()
            .map(|b| (b.period, select(&b.standings, request, ITEMS_PER_PAGE)))
            .collect();
        LeaderboardSnapshot { pages }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::{Cell, Sheet};

    fn sheet(name: &str, header: &[&str], rows: &[(&str, f64)]) -> Sheet {
        let mut grid = vec![header.iter().map(|h| Cell::from(*h)).collect::<Vec<_>>()];
        for (address, sparks) in rows {
            grid.push(vec![Cell::from(*address), Cell::Number(*sparks)]);
        }
        Sheet::new(name, grid)
    }

    fn book() -> Workbook {
        Workbook {
            sheets: vec![
                sheet("Leaderboard", &["Address", "Sparks 🔥"], &[("0xaaa", 10.0), ("0xbbb", 30.0)]),
                sheet("Week 1", &["Address", "Sparks"], &[("0xbbb", 5.0)]),
                sheet("week 9", &["Address", "Sparks"], &[("0xccc", 1.0)]),
            ],
        }
    }

    #[test]
    fn test_periods_extend_to_discovered_weeks() {
        let board = Leaderboard::from_workbook(&book(), 7);
        let periods = board.periods();
        assert_eq!(periods.first(), Some(&Period::Overall));
        assert_eq!(periods.last(), Some(&Period::Week(9)));
        assert_eq!(periods.len(), 9);
        assert!(board.board(Period::Week(8)).is_none());
        assert_eq!(board.standings(Period::Week(9)).len(), 1);
    }

    #[test]
    fn test_year_in_sheet_name_adds_one_week_only() {
        let book = Workbook {
            sheets: vec![
                sheet("Leaderboard", &["Address", "Sparks"], &[("0xaaa", 10.0)]),
                sheet("Week 2025 recap", &["Address", "Sparks"], &[("0xaaa", 3.0)]),
            ],
        };
        let board = Leaderboard::from_workbook(&book, 7);
        let periods = board.periods();
        assert_eq!(periods.len(), 1 + 7 + 1);
        assert_eq!(periods.last(), Some(&Period::Week(2025)));
        assert!(board.board(Period::Week(100)).is_none());
        assert_eq!(board.board(Period::Week(2025)).unwrap().sheet.as_deref(), Some("Week 2025 recap"));
    }

    #[test]
    fn test_missing_week_is_empty_with_issue() {
        let board = Leaderboard::from_workbook(&book(), 7);
        let week3 = board.board(Period::Week(3)).unwrap();
        assert!(week3.entries.is_empty());
        assert!(matches!(week3.issue(), Some(Error::SheetNotFound { period: Period::Week(3) })));
        assert_eq!(board.page(Period::Week(3), PageRequest::Page(1)).total_pages, 0);
        assert!(board.board(Period::Overall).unwrap().issue().is_none());
    }

    #[test]
    fn test_page_is_ranked() {
        let board = Leaderboard::from_workbook(&book(), 2);
        let page = board.page(Period::Overall, PageRequest::Page(1));
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.data[0].entry.address, "0xbbb");
        assert_eq!(page.data[0].rank, 1);
        assert_eq!(board.board(Period::Overall).unwrap().rank_of("0XAAA"), Some(2));
    }

    #[test]
    fn test_search_keeps_full_sheet_rank() {
        let board = Leaderboard::from_workbook(&book(), 2);
        let hits = board.search(Period::Overall, "AAA", PageRequest::Page(1));
        assert_eq!(hits.data.len(), 1);
        assert_eq!(hits.data[0].rank, 2);
    }

    #[test]
    fn test_snapshot_keys() {
        let board = Leaderboard::from_workbook(&book(), 2);
        let snapshot = board.snapshot(PageRequest::Full);
        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json.get("overall").is_some());
        assert!(json.get("week1").is_some());
        assert!(json.get("week9").is_some());
        assert_eq!(json["overall"]["data"][0]["rank"], 1);
    }
}
