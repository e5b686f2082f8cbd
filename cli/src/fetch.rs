use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;
use sparks_shared::{Fetch, FetchResponse, HttpFetch};
use tracing::debug;

/// Reads URLs over HTTP and everything else from disk.
///
/// Relative candidates resolve against `base_url` when one is set (a deployed
/// dashboard), otherwise against `root` on the local filesystem.
pub struct CliFetch {
    http: HttpFetch,
    root: PathBuf,
    base_url: Option<Url>,
}

impl CliFetch {
    pub fn new(root: PathBuf, base_url: Option<Url>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("sparks-cli/0.1")
            .timeout(Duration::from_secs(20))
            .build()?;
        Ok(Self { http: HttpFetch::new(client), root, base_url })
    }

    fn local_path(&self, location: &str) -> PathBuf {
        let direct = Path::new(location);
        if direct.is_absolute() && direct.exists() {
            return direct.to_path_buf();
        }
        let relative = location.trim_start_matches("./").trim_start_matches('/');
        self.root.join(relative)
    }
}

fn is_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

impl Fetch for CliFetch {
    async fn fetch(&self, location: &str) -> Result<FetchResponse, String> {
        if is_url(location) {
            return self.http.fetch(location).await;
        }
        if let Some(base) = &self.base_url {
            let url = base.join(location).map_err(|e| e.to_string())?;
            return self.http.fetch(url.as_str()).await;
        }

        let path = self.local_path(location);
        debug!("reading {}", path.display());
        match tokio::fs::read(&path).await {
            Ok(body) => Ok(FetchResponse { status: 200, body }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(FetchResponse { status: 404, body: Vec::new() }),
            Err(e) => Err(format!("{}: {e}", path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_relative_candidates_under_root() {
        let root = std::env::temp_dir().join(format!("sparks-cli-{}", std::process::id()));
        tokio::fs::create_dir_all(root.join("assets")).await.unwrap();
        tokio::fs::write(root.join("assets/board.csv"), "Address,Sparks\n0xa,1\n").await.unwrap();

        let fetch = CliFetch::new(root.clone(), None).unwrap();
        let found = fetch.fetch("/assets/board.csv").await.unwrap();
        assert_eq!(found.status, 200);
        assert!(!found.body.is_empty());

        let dotted = fetch.fetch("./assets/board.csv").await.unwrap();
        assert_eq!(dotted.status, 200);

        let missing = fetch.fetch("public/board.csv").await.unwrap();
        assert_eq!(missing.status, 404);

        tokio::fs::remove_dir_all(&root).await.unwrap();
    }

    #[test]
    fn test_is_url() {
        assert!(is_url("https://docs.google.com/spreadsheets/d/x/export?format=csv"));
        assert!(!is_url("/assets/board.xlsx"));
    }
}
