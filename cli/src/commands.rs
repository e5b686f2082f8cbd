use std::path::PathBuf;

use anyhow::Context;
use sparks_shared::{
    breakdown, format_sparks, Leaderboard, LeaderboardPage, PageRequest, Period, ShareCard,
    Standing, UserBreakdown,
};
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing::info;

/// Commands.
#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Print one page (or all) of a period's leaderboard.
    Board {
        /// `overall`, `week3`, `week 3` or `3`.
        #[arg(long, short, default_value = "overall")]
        period: Period,
        /// 1-based page number.
        #[arg(long, default_value_t = 1, conflicts_with = "all")]
        page: usize,
        /// Print every entry instead of one page.
        #[arg(long)]
        all: bool,
        /// Only addresses containing this text (case-insensitive).
        #[arg(long, short)]
        search: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Score and rank of one address across every period.
    User {
        address: String,
        #[arg(long)]
        json: bool,
    },
    /// Write an address's share card as SVG and print the share link.
    Card {
        address: String,
        /// Output file, defaults to `sparks-<address>.svg`.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Show how workbook sheets map onto periods.
    Sheets,
}

impl Commands {
    pub async fn execute(&self, board: &Leaderboard) -> anyhow::Result<()> {
        match self {
            Commands::Board { period, page, all, search, json } => {
                let request = if *all { PageRequest::Full } else { PageRequest::Page(*page) };
                let result = board.search(*period, search.as_deref().unwrap_or_default(), request);
                if *json {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                } else {
                    print_board(*period, request, &result);
                }
            }
            Commands::User { address, json } => {
                let Some(user) = breakdown(board, address) else {
                    anyhow::bail!("address {address} is not on any board");
                };
                if *json {
                    println!("{}", serde_json::to_string_pretty(&user)?);
                } else {
                    print_breakdown(&user);
                }
            }
            Commands::Card { address, output } => {
                let user = breakdown(board, address)
                    .with_context(|| format!("address {address} is not on any board"))?;
                let card = ShareCard::new(user.overall.sparks(), user.address.clone(), user.overall.rank);
                let path = output.clone().unwrap_or_else(|| PathBuf::from(card.file_name("svg")));
                tokio::fs::write(&path, card.to_svg())
                    .await
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!("wrote share card to {}", path.display());
                println!("{}", path.display());
                println!("{}", card.intent_url());
            }
            Commands::Sheets => print_sheets(board),
        }
        Ok(())
    }
}

#[derive(Tabled)]
struct BoardRow {
    #[tabled(rename = "Rank")]
    rank: usize,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Sparks")]
    sparks: String,
    #[tabled(rename = "Extra")]
    extra: String,
}

impl From<&Standing> for BoardRow {
    fn from(s: &Standing) -> Self {
        Self {
            rank: s.rank,
            address: s.entry.address.clone(),
            sparks: format_sparks(s.entry.sparks),
            extra: s.entry.extra().map(|(_, v)| v.to_string()).unwrap_or_default(),
        }
    }
}

fn print_board(period: Period, request: PageRequest, page: &LeaderboardPage<Standing>) {
    println!("{}", period.title());
    if page.data.is_empty() {
        println!("(no entries)");
    } else {
        let rows: Vec<BoardRow> = page.data.iter().map(BoardRow::from).collect();
        println!("{}", Table::new(rows).with(Style::rounded()));
    }
    if let PageRequest::Page(n) = request {
        println!("page {n} of {}", page.total_pages);
    }
}

#[derive(Tabled)]
struct PeriodRow {
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Sparks")]
    sparks: String,
    #[tabled(rename = "Rank")]
    rank: String,
    #[tabled(rename = "Extra")]
    extra: String,
}

fn period_row(result: &sparks_shared::PeriodResult) -> PeriodRow {
    PeriodRow {
        period: result.period.label(),
        sparks: result
            .entry
            .as_ref()
            .map(|e| format_sparks(e.sparks))
            .unwrap_or_else(|| "-".to_string()),
        rank: result
            .rank
            .map(|r| format!("#{r}"))
            .unwrap_or_else(|| "Not ranked".to_string()),
        extra: result
            .entry
            .as_ref()
            .and_then(|e| e.extra().map(|(label, value)| format!("{label}: {value}")))
            .unwrap_or_default(),
    }
}

fn print_breakdown(user: &UserBreakdown) {
    println!("{}", user.address);
    let rows: Vec<PeriodRow> = std::iter::once(&user.overall)
        .chain(user.weeks.iter())
        .map(period_row)
        .collect();
    println!("{}", Table::new(rows).with(Style::rounded()));
    println!(
        "weekly total {} Sparks, ranked in {} of {} weeks",
        format_sparks(user.weekly_total()),
        user.weeks_ranked(),
        user.weeks.len()
    );
}

#[derive(Tabled)]
struct SheetRow {
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Sheet")]
    sheet: String,
    #[tabled(rename = "Entries")]
    entries: usize,
    #[tabled(rename = "Skipped rows")]
    skipped: usize,
}

fn print_sheets(board: &Leaderboard) {
    let rows: Vec<SheetRow> = board
        .boards()
        .iter()
        .map(|b| SheetRow {
            period: b.period.key(),
            sheet: b.sheet.clone().unwrap_or_else(|| "(missing)".to_string()),
            entries: b.entries.len(),
            skipped: b.skipped_rows,
        })
        .collect();
    println!("{}", Table::new(rows).with(Style::rounded()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparks_shared::{LeaderboardEntry, PeriodResult};

    #[test]
    fn test_board_row_shows_extra_column() {
        let mut entry = LeaderboardEntry::new("0xabc", 1500.0);
        entry.referral_bonus = Some("250".into());
        let row = BoardRow::from(&Standing { rank: 4, entry });
        assert_eq!(row.rank, 4);
        assert_eq!(row.sparks, "1500");
        assert_eq!(row.extra, "250");
    }

    #[test]
    fn test_period_row_for_missing_week() {
        let row = period_row(&PeriodResult { period: Period::Week(5), entry: None, rank: None });
        assert_eq!(row.period, "Week 5");
        assert_eq!(row.sparks, "-");
        assert_eq!(row.rank, "Not ranked");
        assert!(row.extra.is_empty());
    }
}
