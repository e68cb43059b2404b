//! Full extraction-to-CSV pipeline against a fixed three-table page.

use std::sync::Arc;

use ligascrape::{merge::inner_join, parse::extract_league_tables, process::to_csv};

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

fn standings_row(team: &str, games: &str, points: &str) -> String {
    let mut row = String::from(r#"<tr><th scope="row" class="rank">1</th>"#);
    for col in STANDINGS_COLUMNS {
        let value = match *col {
            "team" => team,
            "games" => games,
            "points" => points,
            _ => "0",
        };
        row.push_str(&format!(r#"<td data-stat="{col}">{value}</td>"#));
    }
    row.push_str("</tr>");
    row
}

fn stats_row(team: &str, possession: &str) -> String {
    let mut row = format!(r#"<tr><th scope="row" data-stat="team">{team}</th>"#);
    for col in TEAM_STATS_COLUMNS.iter().filter(|c| **c != "team") {
        let value = if *col == "possession" { possession } else { "0" };
        row.push_str(&format!(r#"<td data-stat="{col}">{value}</td>"#));
    }
    row.push_str("</tr>");
    row
}

fn league_page() -> String {
    format!(
        "<html><body>\
         <table><tbody>{}{}</tbody></table>\
         <table><tbody><tr><td>fixtures, not stats</td></tr></tbody></table>\
         <table><tbody>{}{}{}</tbody></table>\
         </body></html>",
        standings_row("Real Madrid", "10", "30"),
        standings_row("Barcelona", "10", "28"),
        stats_row("Real Madrid", "60"),
        stats_row("Barcelona", "55"),
        stats_row("Valencia", "50"),
    )
}

#[tokio::test]
async fn merges_both_tables_into_one_record_per_team() {
    let html = Arc::new(league_page());
    let (standings, team_stats) = extract_league_tables(html).await.unwrap();
    let merged = inner_join(&standings, &team_stats);

    // Valencia only appears in the squad-stats table and is dropped.
    let teams: Vec<_> = merged
        .rows
        .iter()
        .map(|r| r[merged.column_index("team").unwrap()].as_str())
        .collect();
    assert_eq!(teams, ["Real Madrid", "Barcelona"]);

    assert_eq!(merged.get(0, "games"), Some("10"));
    assert_eq!(merged.get(0, "points"), Some("30"));
    assert_eq!(merged.get(0, "possession"), Some("60"));
    assert_eq!(merged.get(1, "points"), Some("28"));
    assert_eq!(merged.get(1, "possession"), Some("55"));

    // Standings columns first, then the non-colliding squad-stats columns.
    let expected_columns: Vec<&str> = STANDINGS_COLUMNS
        .iter()
        .chain(TEAM_STATS_COLUMNS.iter().filter(|c| {
            !STANDINGS_COLUMNS.contains(c)
        }))
        .copied()
        .collect();
    assert_eq!(merged.columns, expected_columns);
}

#[tokio::test]
async fn rerunning_on_identical_input_yields_identical_output() {
    let html = Arc::new(league_page());

    let (s1, t1) = extract_league_tables(html.clone()).await.unwrap();
    let (s2, t2) = extract_league_tables(html).await.unwrap();

    let first = to_csv(&inner_join(&s1, &t1));
    let second = to_csv(&inner_join(&s2, &t2));
    assert_eq!(first, second);
}
