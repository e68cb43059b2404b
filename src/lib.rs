//! LEAGUE TABLE SCRAPER
//! Fetches the standings and squad-stats tables for a fixed set of league
//! pages, joins them on the team name and dumps one dated CSV per league.

mod error;
mod macros;
pub mod merge;
pub mod parse;
pub mod process;
mod request;
mod robots;

pub use error::{Error, Result};

/// Where the per-league CSV files end up.
const OUT_DIR: &str = "data";
/// Hard cap on how long a single page request may take, in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// One of these is picked at random for every request.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/111.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:109.0) Gecko/20100101 Firefox/112.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/112.0.0.0 Safari/537.36 Edg/112.0.1722.46",
];

/// `data-stat` names of the standings table, in output order.
const STANDINGS_COLUMNS: &[&str] = &[
    "team",
    "games",
    "points",
    "wins",
    "ties",
    "losses",
    "goals_for",
    "goals_against",
    "goal_diff",
    "xg_for",
    "xg_against",
    "xg_diff",
];

/// `data-stat` names of the squad-stats table, in output order.
/// `team` is rendered as a row header there, the rest are plain data cells.
const TEAM_STATS_COLUMNS: &[&str] = &[
    "team",
    "players_used",
    "avg_age",
    "possession",
    "games",
    "games_starts",
    "minutes",
    "minutes_90s",
    "assists",
    "goals_assists",
    "goals_pens",
    "pens_made",
    "pens_att",
    "cards_yellow",
    "cards_red",
];
