use std::collections::HashMap;

use crate::parse::RecordSet;

/// Inner-joins the standings records with the squad-stats records on the
/// `team` column.
///
/// The result keeps every standings column followed by the squad-stats
/// columns whose names don't collide with a standings column; on a
/// collision the standings value wins and the stats value is dropped.
/// Teams present in only one of the two sets are left out on purpose,
/// only teams with complete data in both tables get reported. An empty
/// intersection yields an empty row set under the full merged header.
pub fn inner_join(standings: &RecordSet, team_stats: &RecordSet) -> RecordSet {
    let kept: Vec<usize> = team_stats
        .columns
        .iter()
        .enumerate()
        .filter(|(_, col)| standings.column_index(col).is_none())
        .map(|(i, _)| i)
        .collect();

    let mut columns = standings.columns.clone();
    columns.extend(kept.iter().map(|&i| team_stats.columns[i].clone()));

    let mut rows = Vec::new();
    let (Some(s_team), Some(t_team)) = (
        standings.column_index("team"),
        team_stats.column_index("team"),
    ) else {
        return RecordSet { columns, rows };
    };

    // Post-extraction team names are unique per set, so a plain map works
    // as the join index.
    let by_team: HashMap<&str, &Vec<String>> = team_stats
        .rows
        .iter()
        .map(|row| (row[t_team].as_str(), row))
        .collect();

    for row in &standings.rows {
        let Some(stats_row) = by_team.get(row[s_team].as_str()) else {
            continue;
        };
        let mut merged = row.clone();
        merged.extend(kept.iter().map(|&i| stats_row[i].clone()));
        rows.push(merged);
    }

    RecordSet { columns, rows }
}
