use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Rows per page on every board.
pub const ITEMS_PER_PAGE: usize = 50;

/// A scoring period: the cumulative sheet or a single week.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Period {
    Overall,
    Week(u32),
}

/// Which optional column a period's sheet carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PeriodKind {
    Overall,
    VerificationWeek,
    NftWeek,
    BonusWeek,
}

impl Period {
    pub fn kind(&self) -> PeriodKind {
        match self {
            Period::Overall => PeriodKind::Overall,
            Period::Week(1) => PeriodKind::VerificationWeek,
            Period::Week(2) => PeriodKind::NftWeek,
            Period::Week(_) => PeriodKind::BonusWeek,
        }
    }

    /// Stable identifier used as snapshot key and tab id (`overall`, `week3`).
    pub fn key(&self) -> String {
        match self {
            Period::Overall => "overall".to_string(),
            Period::Week(n) => format!("week{n}"),
        }
    }

    /// Human label for tabs and cards.
    pub fn label(&self) -> String {
        match self {
            Period::Overall => "Overall".to_string(),
            Period::Week(n) => format!("Week {n}"),
        }
    }

    pub fn title(&self) -> String {
        match self {
            Period::Overall => "Firewall Sparks Leaderboard".to_string(),
            Period::Week(n) => format!("Week {n} Leaderboard"),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl FromStr for Period {
    type Err = String;

    /// Accepts `overall`, `week3`, `week 3` and `3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        if lower == "overall" {
            return Ok(Period::Overall);
        }
        let digits = lower.strip_prefix("week").unwrap_or(&lower).trim();
        match digits.parse::<u32>() {
            Ok(n) if n > 0 => Ok(Period::Week(n)),
            _ => Err(format!("unknown period `{s}`")),
        }
    }
}

impl From<Period> for String {
    fn from(p: Period) -> Self {
        p.key()
    }
}

impl TryFrom<String> for Period {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// One participant's row on one sheet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub address: String,
    pub sparks: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nft_collection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hot_sloth_verification: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral_bonus: Option<String>,
}

impl LeaderboardEntry {
    pub fn new(address: impl Into<String>, sparks: f64) -> Self {
        Self {
            address: address.into(),
            sparks,
            nft_collection: None,
            hot_sloth_verification: None,
            referral_bonus: None,
        }
    }

    pub fn matches_address(&self, address: &str) -> bool {
        self.address.eq_ignore_ascii_case(address.trim())
    }

    /// The period-specific extra column, labelled, if this row has one.
    pub fn extra(&self) -> Option<(&'static str, &str)> {
        if let Some(v) = &self.hot_sloth_verification {
            return Some(("Hot Sloth Verification", v));
        }
        if let Some(v) = &self.nft_collection {
            return Some(("NFT Collection", v));
        }
        self.referral_bonus
            .as_deref()
            .map(|v| ("Referral Bonus", v))
    }
}

/// An entry paired with its rank in the full sheet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub rank: usize,
    #[serde(flatten)]
    pub entry: LeaderboardEntry,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardPage<T = LeaderboardEntry> {
    pub data: Vec<T>,
    pub total_pages: usize,
}

impl<T> LeaderboardPage<T> {
    pub fn empty() -> Self {
        Self { data: Vec::new(), total_pages: 0 }
    }
}

/// Slice one page, or hand back everything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageRequest {
    Page(usize),
    Full,
}

/// Render a score without a trailing `.0` for whole numbers.
pub fn format_sparks(sparks: f64) -> String {
    if sparks.fract() == 0.0 && sparks.abs() < 1e15 {
        format!("{}", sparks as i64)
    } else {
        let s = format!("{sparks:.2}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// `0x1234567890abcdef` -> `0x1234…cdef`. Short values are returned as-is.
pub fn truncate_address(address: &str, head: usize, tail: usize) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= head + tail + 1 {
        return address.to_string();
    }
    let start: String = chars[..head].iter().collect();
    let end: String = chars[chars.len() - tail..].iter().collect();
    format!("{start}…{end}")
}
