//! Spreadsheet loader: try candidate sources in order, first usable body wins.

use std::future::Future;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result, SourceFailure};
use crate::workbook::Workbook;

pub const DEFAULT_FILE_NAME: &str = "Firewall Sparks Leaderboard.xlsx";

/// Sheet name given to a CSV export, which carries a single sheet.
pub const CSV_SHEET_NAME: &str = "Leaderboard";

/// Where a workbook may be fetched from, and how to read it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Source {
    /// Binary spreadsheet (`xlsx`, `xls`, `ods`).
    Workbook { location: String },
    /// CSV text, read as one sheet called `sheet`.
    Csv { location: String, sheet: String },
}

impl Source {
    pub fn workbook(location: impl Into<String>) -> Self {
        Source::Workbook { location: location.into() }
    }

    pub fn csv(location: impl Into<String>, sheet: impl Into<String>) -> Self {
        Source::Csv { location: location.into(), sheet: sheet.into() }
    }

    pub fn location(&self) -> &str {
        match self {
            Source::Workbook { location } | Source::Csv { location, .. } => location,
        }
    }

    /// Same source at a different location.
    pub fn with_location(&self, location: String) -> Self {
        match self {
            Source::Workbook { .. } => Source::Workbook { location },
            Source::Csv { sheet, .. } => Source::Csv { location, sheet: sheet.clone() },
        }
    }
}

pub struct FetchResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Transport used by the loader. The browser, the CLI and tests each bring one.
pub trait Fetch {
    fn fetch(&self, location: &str) -> impl Future<Output = Result<FetchResponse, String>>;
}

/// A fetched body, tagged with the source that produced it.
pub struct Loaded {
    pub origin: Source,
    pub body: Vec<u8>,
}

impl Loaded {
    pub fn into_workbook(self) -> Result<Workbook> {
        match &self.origin {
            Source::Workbook { .. } => Workbook::from_bytes(&self.body),
            Source::Csv { sheet, .. } => {
                Workbook::from_csv(&String::from_utf8_lossy(&self.body), sheet)
            }
        }
    }
}

/// Try each candidate in order; the first HTTP 200 with a non-empty body wins.
pub async fn fetch_first<F: Fetch>(fetcher: &F, candidates: &[Source]) -> Result<Loaded> {
    let mut failures = Vec::new();

    for source in candidates {
        let location = source.location();
        info!("fetching spreadsheet from {}", location);
        let reason = match fetcher.fetch(location).await {
            Ok(resp) if resp.status != 200 => format!("HTTP {}", resp.status),
            Ok(resp) if resp.body.is_empty() => "empty body".to_string(),
            Ok(resp) => {
                info!("loaded {} bytes from {}", resp.body.len(), location);
                return Ok(Loaded { origin: source.clone(), body: resp.body });
            }
            Err(e) => e,
        };
        warn!("could not use {}: {}", location, reason);
        failures.push(SourceFailure { origin: location.to_string(), reason });
    }

    Err(Error::DataSourceUnavailable { failures })
}

/// Fetch the first usable candidate and decode it.
pub async fn load_workbook<F: Fetch>(fetcher: &F, candidates: &[Source]) -> Result<(Workbook, Source)> {
    let loaded = fetch_first(fetcher, candidates).await?;
    let origin = loaded.origin.clone();
    let workbook = loaded.into_workbook()?;
    info!("workbook from {} has sheets {:?}", origin.location(), workbook.sheet_names());
    Ok((workbook, origin))
}

/// Build-time or environment configuration, resolved into candidates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// User-supplied path, tried before anything else.
    pub custom_path: Option<String>,
    /// Deployment prefix, e.g. `/Firewall_Sparks_Leaderboard`.
    pub base_path: String,
    pub file_name: String,
    pub google_sheet_id: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            custom_path: None,
            base_path: String::new(),
            file_name: DEFAULT_FILE_NAME.to_string(),
            google_sheet_id: None,
        }
    }
}

impl SourceConfig {
    /// Ordered, de-duplicated candidate list.
    pub fn candidates(&self) -> Vec<Source> {
        let mut out: Vec<Source> = Vec::new();
        let mut push = |source: Source| {
            if !out.contains(&source) {
                out.push(source);
            }
        };

        if let Some(path) = self.custom_path.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            push(source_for_path(path));
        }

        if let Some(id) = self.google_sheet_id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
            push(Source::workbook(google_export_url(id, "xlsx")));
            push(Source::csv(google_export_url(id, "csv"), CSV_SHEET_NAME));
        }

        let file = &self.file_name;
        let base = self.base_path.trim_end_matches('/');
        push(Source::workbook(format!("{base}/assets/{file}")));
        for path in [
            format!("public/{file}"),
            format!("/{file}"),
            format!("/assets/{file}"),
            format!("./{file}"),
            format!("./assets/{file}"),
            file.to_string(),
        ] {
            push(Source::workbook(path));
        }

        out
    }
}

/// Export URL of a Google Sheet document (`xlsx` or `csv`).
pub fn google_export_url(sheet_id: &str, format: &str) -> String {
    format!("https://docs.google.com/spreadsheets/d/{sheet_id}/export?format={format}")
}

fn source_for_path(path: &str) -> Source {
    if path.to_lowercase().ends_with(".csv") {
        Source::csv(path, CSV_SHEET_NAME)
    } else {
        Source::workbook(path)
    }
}

/// Whether `location` is on `origin` (`scheme://host[:port]`). Relative
/// locations always are; without an origin everything counts.
pub fn same_origin(origin: Option<&str>, location: &str) -> bool {
    let Some(origin) = origin.map(|o| o.trim_end_matches('/')) else {
        return true;
    };
    if !location.contains("://") {
        return true;
    }
    location
        .strip_prefix(origin)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(['/', '?', '#']))
}

/// `reqwest`-backed transport; works natively and in the browser.
///
/// Cache-busting headers only go to locations on `origin` when one is set,
/// since in the browser they turn a cross-origin GET into a preflighted one.
#[cfg(feature = "http")]
#[derive(Clone, Debug, Default)]
pub struct HttpFetch {
    client: reqwest::Client,
    origin: Option<String>,
}

#[cfg(feature = "http")]
impl HttpFetch {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client, origin: None }
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }
}

#[cfg(feature = "http")]
impl Fetch for HttpFetch {
    async fn fetch(&self, location: &str) -> Result<FetchResponse, String> {
        use reqwest::header::{CACHE_CONTROL, PRAGMA};

        let mut req = self.client.get(location);
        if same_origin(self.origin.as_deref(), location) {
            req = req
                .header(CACHE_CONTROL, "no-cache, no-store, must-revalidate")
                .header(PRAGMA, "no-cache");
        } else {
            tracing::debug!("{location}: cross-origin, no cache headers");
        }
        let resp = req.send().await.map_err(|e| e.to_string())?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await.map_err(|e| e.to_string())?;
        Ok(FetchResponse { status, body: body.to_vec() })
    }
}
