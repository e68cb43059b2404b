use chrono::Local;
use ligascrape::{info_time, process::Scraper, warn_time, Result};

/// One standings page per league; the league name rides on the
/// `-de-<LeagueName>` suffix.
const LEAGUE_URLS: &[&str] = &[
    "https://fbref.com/es/comps/12/Estadisticas-de-La-Liga",
    "https://fbref.com/es/comps/9/Estadisticas-de-Premier-League",
    "https://fbref.com/es/comps/11/Estadisticas-de-Serie-A",
    "https://fbref.com/es/comps/20/Estadisticas-de-Bundesliga",
    "https://fbref.com/es/comps/13/Estadisticas-de-Ligue-1",
];

#[tokio::main]
async fn main() -> Result<()> {
    let start_time = Local::now();
    let scraper = Scraper::new(false)?;

    // One league at a time; a failed league is logged and skipped, the
    // rest of the list still runs.
    let mut failed = 0;
    for url in LEAGUE_URLS {
        if let Err(e) = scraper.scrape(url).await {
            warn_time!("Skipping {}: {}", url, e);
            failed += 1;
        }
    }

    info_time!(
        start_time,
        "Done: {} leagues written, {} failed.",
        LEAGUE_URLS.len() - failed,
        failed
    );
    Ok(())
}
