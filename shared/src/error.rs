use serde::Serialize;

use crate::model::Period;

/// One candidate source that could not be used.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SourceFailure {
    pub origin: String,
    pub reason: String,
}

impl std::fmt::Display for SourceFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.origin, self.reason)
    }
}

/// Error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// None of the candidate locations produced a usable body.
    #[error("no data source available ({})", join_failures(.failures))]
    DataSourceUnavailable { failures: Vec<SourceFailure> },
    /// The body could not be read as a spreadsheet, or it holds no sheets.
    #[error("malformed workbook: {0}")]
    MalformedWorkbook(String),
    /// A logical period has no matching sheet in the workbook.
    #[error("no sheet found for {period}")]
    SheetNotFound { period: Period },
    /// A data row was dropped while parsing.
    #[error("row {row} skipped: {reason}")]
    RowParseSkip { row: usize, reason: String },
    /// Rendering the share card or opening the share intent failed.
    #[error("share failed: {0}")]
    ShareExportFailure(String),
}

impl Error {
    /// Source-level errors block the whole load; the rest degrade to empty states.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::DataSourceUnavailable { .. } | Error::MalformedWorkbook(_)
        )
    }

    pub fn malformed(msg: impl ToString) -> Self {
        Self::MalformedWorkbook(msg.to_string())
    }
}

fn join_failures(failures: &[SourceFailure]) -> String {
    if failures.is_empty() {
        return "no candidates configured".to_string();
    }
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_lists_every_failure() {
        let err = Error::DataSourceUnavailable {
            failures: vec![
                SourceFailure { origin: "/a.xlsx".into(), reason: "HTTP 404".into() },
                SourceFailure { origin: "/b.xlsx".into(), reason: "empty body".into() },
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("/a.xlsx: HTTP 404"));
        assert!(msg.contains("/b.xlsx: empty body"));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_sheet_level_errors_are_not_fatal() {
        assert!(!Error::SheetNotFound { period: Period::Week(9) }.is_fatal());
        assert!(!Error::RowParseSkip { row: 3, reason: "empty address".into() }.is_fatal());
        assert!(Error::malformed("zero sheets").is_fatal());
    }
}
