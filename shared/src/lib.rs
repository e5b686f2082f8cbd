//! Spreadsheet-to-leaderboard pipeline shared by the browser dashboard and the CLI.
//!
//! Load a workbook from the first usable [`Source`], resolve each period's
//! sheet, parse rows into entries, then rank and paginate.

pub mod board;
pub mod breakdown;
pub mod error;
pub mod model;
pub mod parse;
pub mod rank;
pub mod resolve;
pub mod sequence;
pub mod share;
pub mod source;
pub mod workbook;

pub use board::{Leaderboard, LeaderboardSnapshot, PeriodBoard, DEFAULT_WEEKS};
pub use breakdown::{breakdown, PeriodResult, UserBreakdown};
pub use error::{Error, Result};
pub use model::{
    format_sparks, truncate_address, LeaderboardEntry, LeaderboardPage, PageRequest, Period,
    PeriodKind, Standing, ITEMS_PER_PAGE,
};
pub use sequence::{RequestSequencer, Ticket};
pub use share::ShareCard;
#[cfg(feature = "http")]
pub use source::HttpFetch;
pub use source::{load_workbook, Fetch, FetchResponse, Source, SourceConfig};
pub use workbook::Workbook;
