use serde::Serialize;

use crate::board::Leaderboard;
use crate::model::{LeaderboardEntry, Period};

/// One address's result on one period's board.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PeriodResult {
    pub period: Period,
    pub entry: Option<LeaderboardEntry>,
    pub rank: Option<usize>,
}

impl PeriodResult {
    pub fn sparks(&self) -> f64 {
        self.entry.as_ref().map_or(0.0, |e| e.sparks)
    }
}

/// An address across the overall board and every week.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UserBreakdown {
    /// Address as stored on the first board that has it.
    pub address: String,
    pub overall: PeriodResult,
    pub weeks: Vec<PeriodResult>,
}

impl UserBreakdown {
    /// Sparks summed over the week boards.
    pub fn weekly_total(&self) -> f64 {
        self.weeks.iter().map(PeriodResult::sparks).sum()
    }

    pub fn weeks_ranked(&self) -> usize {
        self.weeks.iter().filter(|w| w.rank.is_some()).count()
    }
}

/// Look `address` up on every board, case-insensitively.
///
/// Ranks come from each board's full standings. Returns `None` when the
/// address is on no board at all.
pub fn breakdown(board: &Leaderboard, address: &str) -> Option<UserBreakdown> {
    let lookup = |period: Period| {
        let found = board.board(period).and_then(|b| b.find(address));
        PeriodResult {
            period,
            entry: found.map(|s| s.entry.clone()),
            rank: found.map(|s| s.rank),
        }
    };

    let overall = lookup(Period::Overall);
    let weeks: Vec<PeriodResult> = board
        .periods()
        .into_iter()
        .filter(|p| *p != Period::Overall)
        .map(lookup)
        .collect();

    let stored = std::iter::once(&overall)
        .chain(weeks.iter())
        .find_map(|r| r.entry.as_ref())
        .map(|e| e.address.clone())?;

    Some(UserBreakdown { address: stored, overall, weeks })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::{Cell, Sheet, Workbook};

    fn sheet(name: &str, rows: &[(&str, f64)]) -> Sheet {
        let mut grid = vec![vec![Cell::from("Address"), Cell::from("Sparks")]];
        for (address, sparks) in rows {
            grid.push(vec![Cell::from(*address), Cell::Number(*sparks)]);
        }
        Sheet::new(name, grid)
    }

    fn board() -> Leaderboard {
        let book = Workbook {
            sheets: vec![
                sheet("Leaderboard", &[("0xbbb", 50.0), ("0xaaa111", 40.0)]),
                sheet("week 1", &[("0xaaa111", 15.0), ("0xbbb", 20.0)]),
                sheet("week 2", &[("0xccc", 1.0)]),
                sheet("week 3", &[("0xAAA111", 25.0)]),
            ],
        };
        Leaderboard::from_workbook(&book, 3)
    }

    #[test]
    fn test_breakdown_is_case_insensitive() {
        let user = breakdown(&board(), "0xAAA111").unwrap();
        assert_eq!(user.address, "0xaaa111");
        assert_eq!(user.overall.rank, Some(2));
        assert_eq!(user.weeks.len(), 3);
        assert_eq!(user.weeks[0].rank, Some(2));
        assert_eq!(user.weeks[1].rank, None);
        assert!(user.weeks[1].entry.is_none());
        assert_eq!(user.weeks[2].rank, Some(1));
        assert_eq!(user.weekly_total(), 40.0);
        assert_eq!(user.weeks_ranked(), 2);
    }

    #[test]
    fn test_unknown_address_is_not_found() {
        assert!(breakdown(&board(), "0xdead").is_none());
    }

    #[test]
    fn test_address_only_in_a_week() {
        let user = breakdown(&board(), "0xccc").unwrap();
        assert!(user.overall.entry.is_none());
        assert_eq!(user.weeks[1].period, Period::Week(2));
        assert_eq!(user.weeks[1].rank, Some(1));
    }
}
