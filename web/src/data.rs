use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use reqwest::Url;
use sparks_shared::{load_workbook, Error, HttpFetch, Leaderboard, RequestSequencer, Source};
use web_sys::console;

use crate::config;

#[derive(Clone, Debug, PartialEq)]
pub enum LoadState {
    Loading,
    Ready(Arc<Leaderboard>),
    Failed(LoadFailure),
}

/// A load error flattened into something the error panel can render.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadFailure {
    pub message: String,
    pub details: Vec<String>,
}

impl From<Error> for LoadFailure {
    fn from(err: Error) -> Self {
        match err {
            Error::DataSourceUnavailable { failures } => Self {
                message: "None of the spreadsheet locations could be read.".to_string(),
                details: failures.iter().map(ToString::to_string).collect(),
            },
            other => Self { message: other.to_string(), details: Vec::new() },
        }
    }
}

/// Fetch, parse and rank the whole workbook.
pub async fn load_leaderboard() -> Result<Leaderboard, Error> {
    let candidates = absolute(config::source_config().candidates());
    let fetcher = match page_origin() {
        Some(origin) => HttpFetch::default().with_origin(origin),
        None => HttpFetch::default(),
    };
    let (book, origin) = load_workbook(&fetcher, &candidates).await?;
    console::log_1(&format!("loaded leaderboard from {}", origin.location()).into());
    Ok(Leaderboard::from_workbook(&book, config::weeks()))
}

/// Start a load; its result lands in `set_state` only if no newer load (or
/// a cancel) happened in the meantime.
pub fn spawn_load(loads: RequestSequencer, set_state: WriteSignal<LoadState>) {
    let ticket = loads.begin();
    set_state.set(LoadState::Loading);
    spawn_local(async move {
        let result = load_leaderboard().await;
        if !ticket.is_current() {
            console::log_1(&format!("discarding stale load #{}", ticket.id()).into());
            return;
        }
        match result {
            Ok(board) => set_state.set(LoadState::Ready(Arc::new(board))),
            Err(err) => {
                console::error_1(&err.to_string().into());
                set_state.set(LoadState::Failed(err.into()));
            }
        }
    });
}

// The browser fetch backend only takes absolute URLs.
fn absolute(candidates: Vec<Source>) -> Vec<Source> {
    let Some(base) = document_base().and_then(|b| Url::parse(&b).ok()) else {
        return candidates;
    };
    let mut out: Vec<Source> = Vec::with_capacity(candidates.len());
    for source in candidates {
        let resolved = match base.join(source.location()) {
            Ok(url) => source.with_location(url.to_string()),
            Err(_) => source,
        };
        if !out.contains(&resolved) {
            out.push(resolved);
        }
    }
    out
}

fn document_base() -> Option<String> {
    let window = web_sys::window()?;
    window
        .document()
        .and_then(|doc| doc.base_uri().ok().flatten())
        .or_else(|| window.location().href().ok())
}

fn page_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparks_shared::error::SourceFailure;

    #[test]
    fn test_unavailable_source_lists_each_failure() {
        let failure = LoadFailure::from(Error::DataSourceUnavailable {
            failures: vec![
                SourceFailure { origin: "/a.xlsx".into(), reason: "HTTP 404".into() },
                SourceFailure { origin: "/b.xlsx".into(), reason: "empty body".into() },
            ],
        });
        assert_eq!(failure.details, vec!["/a.xlsx: HTTP 404", "/b.xlsx: empty body"]);
    }

    #[test]
    fn test_malformed_workbook_has_no_details() {
        let failure = LoadFailure::from(Error::malformed("zip error"));
        assert_eq!(failure.message, "malformed workbook: zip error");
        assert!(failure.details.is_empty());
    }
}
