use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use reqwest::Client;
use tokio::{fs, io::AsyncWriteExt};

use crate::merge::inner_join;
use crate::parse::{extract_league_tables, RecordSet};
use crate::{info_time, request, robots, Error, Result, OUT_DIR, REQUEST_TIMEOUT_SECS};

/// Drives the whole pipeline for one league page at a time:
/// robots check, page request, table extraction, join, CSV dump.
pub struct Scraper {
    client: Client,
    ignore_robots: bool,
}

impl Scraper {
    /// `ignore_robots` downgrades a crawling-policy denial from a hard
    /// stop to a logged warning.
    pub fn new(ignore_robots: bool) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            ignore_robots,
        })
    }

    /// Scrapes one league page and writes its dated CSV.
    /// Nothing is written if any earlier step fails.
    pub async fn scrape(&self, url: &str) -> Result<()> {
        let start_time = Local::now();
        let league = league_name(url)?;

        robots::check(&self.client, url, self.ignore_robots).await?;
        let html = request::fetch_page(&self.client, url).await?;
        let (standings, team_stats) = extract_league_tables(Arc::new(html)).await?;
        let merged = inner_join(&standings, &team_stats);

        let path = write_csv(&merged, league).await?;
        info_time!(start_time, "Finished {}, wrote: {}", url, path);
        Ok(())
    }
}

/// League display name, taken from the fixed `-de-<LeagueName>` url suffix.
fn league_name(url: &str) -> Result<&str> {
    url.split_once("-de-")
        .map(|(_, name)| name)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| Error::BadUrl(url.into()))
}

/// Writes the records under `data/` as `final_table_<league>_<date>`,
/// overwriting any previous run for the same day. An empty record set
/// still produces a header-only file.
async fn write_csv(records: &RecordSet, league: &str) -> Result<String> {
    let date = Local::now().format("%Y_%m_%d");
    let file_name = format!("final_table_{league}_{date}.csv")
        .replace('-', "_")
        .to_lowercase();
    let path = format!("{OUT_DIR}/{file_name}");

    info_time!("Saving data to: {}", path);
    fs::create_dir_all(OUT_DIR).await?;
    let mut file = fs::File::create(&path).await?;
    file.write_all(to_csv(records).as_bytes()).await?;
    Ok(path)
}

/// Renders the records as comma-separated lines, header first.
pub fn to_csv(records: &RecordSet) -> String {
    let mut out = records.columns.join(",");
    out.push('\n');
    for row in &records.rows {
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}
