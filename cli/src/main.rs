mod commands;
mod fetch;

use std::path::PathBuf;

use clap::Parser;
use reqwest::Url;
use sparks_shared::source::DEFAULT_FILE_NAME;
use sparks_shared::{load_workbook, Leaderboard, SourceConfig, DEFAULT_WEEKS};
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::Commands;
use fetch::CliFetch;

/// Firewall Sparks leaderboard from the terminal.
#[derive(Debug, Parser)]
#[command(name = "sparks", version, about)]
struct Cli {
    /// Workbook path or URL, tried before every other candidate.
    #[arg(long, global = true, env = "SPARKS_SOURCE")]
    source: Option<String>,
    /// Google Sheet document id; its xlsx and CSV exports are tried next.
    #[arg(long, global = true, env = "SPARKS_GOOGLE_SHEET_ID")]
    sheet_id: Option<String>,
    /// Weeks shown even when the workbook has no sheet for them.
    #[arg(long, global = true, env = "SPARKS_WEEKS", default_value_t = DEFAULT_WEEKS)]
    weeks: u32,
    /// Deployment prefix used for `<base>/assets/<file>`.
    #[arg(long, global = true, env = "SPARKS_BASE_PATH", default_value = "")]
    base_path: String,
    #[arg(long, global = true, env = "SPARKS_FILE_NAME", default_value = DEFAULT_FILE_NAME)]
    file_name: String,
    /// Resolve relative candidates against a deployed dashboard instead of disk.
    #[arg(long, global = true, env = "SPARKS_BASE_URL")]
    base_url: Option<Url>,
    /// Directory relative candidates are read from.
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn source_config(&self) -> SourceConfig {
        SourceConfig {
            custom_path: self.source.clone(),
            base_path: self.base_path.clone(),
            file_name: self.file_name.clone(),
            google_sheet_id: self.sheet_id.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let fetcher = CliFetch::new(cli.root.clone(), cli.base_url.clone())?;
    let candidates = cli.source_config().candidates();

    let (book, origin) = load_workbook(&fetcher, &candidates).await?;
    info!("using {}", origin.location());
    let board = Leaderboard::from_workbook(&book, cli.weeks);

    cli.command.execute(&board).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparks_shared::Period;

    #[test]
    fn test_cli_parses_board_flags() {
        let cli = Cli::try_parse_from([
            "sparks", "--source", "mine.csv", "--weeks", "9", "board", "--period", "week 3", "--page", "2",
        ])
        .unwrap();
        assert_eq!(cli.weeks, 9);
        assert_eq!(cli.source_config().custom_path.as_deref(), Some("mine.csv"));
        match cli.command {
            Commands::Board { period, page, all, .. } => {
                assert_eq!(period, Period::Week(3));
                assert_eq!(page, 2);
                assert!(!all);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_page_conflicts_with_all() {
        assert!(Cli::try_parse_from(["sparks", "board", "--page", "2", "--all"]).is_err());
    }
}
