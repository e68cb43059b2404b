use chrono::Local;
use reqwest::{header::USER_AGENT, Client};

use crate::{info_time, Result, USER_AGENTS};

/// Requests a league page and returns the raw HTML.
/// The shared client carries the request timeout; hitting it surfaces as
/// `Error::Unavailable`, there is no retry.
pub(crate) async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    info_time!("Getting data from website: {}", url);
    let res = client
        .get(url)
        .header(USER_AGENT, pick_user_agent())
        .send()
        .await?
        .error_for_status()?;
    let html = res.text().await?;
    Ok(html)
}

/// Picks one identifying string from the pool, so successive requests
/// don't all look alike.
fn pick_user_agent() -> &'static str {
    USER_AGENTS[fastrand::usize(..USER_AGENTS.len())]
}
