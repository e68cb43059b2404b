use std::sync::Arc;

use chrono::Local;
use scraper::{ElementRef, Html, Selector};
use tokio::task::spawn_blocking;

use crate::{info_time, Error, Result, STANDINGS_COLUMNS, TEAM_STATS_COLUMNS};

/// Tabular records with a fixed column set, one row per team.
/// Column order follows the extraction schema, row order the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RecordSet {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Value of `column` in row `row`, if both exist.
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.column_index(column)?;
        self.rows.get(row)?.get(col).map(String::as_str)
    }
}

/// Which kind of cell a column is looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellRole {
    /// `<th data-stat="..">`
    Header,
    /// `<td data-stat="..">`
    Data,
}

/// Parses a league page and extracts `(standings, team_stats)`.
/// Runs on the blocking pool, `scraper`'s DOM isn't `Send` and a full
/// league page takes a while to parse.
pub async fn extract_league_tables(html: Arc<String>) -> Result<(RecordSet, RecordSet)> {
    let records = spawn_blocking({
        let html = html.clone();
        move || -> Result<(RecordSet, RecordSet)> {
            let doc = parse_cleaned(&html);
            let tables = locate_tables(&doc)?;

            // The source layout puts the standings table first and the squad
            // stats table third. Positional, guarded by locate_tables above.
            let standings = extract_table(tables[0], STANDINGS_COLUMNS, |_| CellRole::Data)?;
            let team_stats = extract_table(tables[2], TEAM_STATS_COLUMNS, |col| {
                if col == "team" {
                    CellRole::Header
                } else {
                    CellRole::Data
                }
            })?;
            Ok((standings, team_stats))
        }
    })
    .await??;

    Ok(records)
}

/// Parses the page with HTML comment delimiters stripped out.
/// The site ships some of its tables commented out and unhides them with JS,
/// dropping the delimiters makes those visible to the table scan.
fn parse_cleaned(html: &str) -> Html {
    let cleaned = html.replace("<!--", "").replace("-->", "");
    Html::parse_document(&cleaned)
}

/// All `tbody` blocks in document order.
/// At least 3 must be present for the positional table contract to hold.
fn locate_tables(doc: &Html) -> Result<Vec<ElementRef<'_>>> {
    let tbody_selector = create_selector("tbody")?;
    let tables: Vec<_> = doc.select(&tbody_selector).collect();
    if tables.len() < 3 {
        return Err(Error::NotEnoughTables {
            found: tables.len(),
        });
    }
    Ok(tables)
}

/// Extracts one record per data row of `table`, using `schema` as the
/// ordered column list and `role_for` to decide which cell kind each
/// column is read from.
///
/// A row counts as a data row only if it carries a `th[scope="row"]` cell;
/// sub-header and summary rows interleaved in the markup don't. Every
/// schema column must be present in every data row or the whole
/// extraction fails.
fn extract_table(
    table: ElementRef,
    schema: &[&str],
    role_for: impl Fn(&str) -> CellRole,
) -> Result<RecordSet> {
    let row_selector = create_selector("tr")?;
    let row_marker = create_selector(r#"th[scope="row"]"#)?;

    let mut rows = Vec::new();
    for row in table.select(&row_selector) {
        if row.select(&row_marker).next().is_none() {
            continue;
        }
        let mut record = Vec::with_capacity(schema.len());
        for col in schema {
            match lookup(row, col, role_for(col))? {
                Some(value) => record.push(value),
                None => {
                    return Err(Error::MissingField {
                        column: col.to_string(),
                        row: rows.len(),
                    })
                }
            }
        }
        rows.push(record);
    }

    info_time!("Extracted {} rows, {} columns", rows.len(), schema.len());
    Ok(RecordSet {
        columns: schema.iter().map(|c| c.to_string()).collect(),
        rows,
    })
}

/// Looks up the cell tagged `data-stat="column"` among the row's cells of
/// the given role and returns its trimmed text, or `None` if the row has
/// no such cell.
fn lookup(row: ElementRef, column: &str, role: CellRole) -> Result<Option<String>> {
    let tag = match role {
        CellRole::Header => "th",
        CellRole::Data => "td",
    };
    let cell_selector = create_selector(&format!(r#"{tag}[data-stat="{column}"]"#))?;
    let text = row
        .select(&cell_selector)
        .next()
        .map(|cell| cell.text().collect::<String>().trim().to_string());
    Ok(text)
}

#[inline]
fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::BadSelector(sel_str.into()))
}
