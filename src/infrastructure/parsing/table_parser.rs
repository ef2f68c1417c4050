//! Positional row parser
//!
//! Reads each `tr` of a table fragment, takes identity values from fixed
//! `td` positions (or from the row's `th.team-name` link), then walks the
//! schema columns from the layout's statistics offset, decoding each cell
//! by its [`FieldRule`].

use once_cell::sync::OnceCell;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::TableParser;
use crate::domain::{ColumnSpec, FieldRule, PartialRecord, RawTable, RowLayout, TableSchema};
use crate::error::ParseError;
use crate::infrastructure::normalize::{
    ParseOutcome, clean, last_segment, parse_clock, slash_first, split_counter, strip_percent,
    strip_thousands,
};

/// Compiled selectors shared by every row parser
struct RowSelectors {
    row: Selector,
    cell: Selector,
    marked_name: Selector,
    link: Selector,
}

static SELECTORS: OnceCell<RowSelectors> = OnceCell::new();

impl RowSelectors {
    fn get() -> Result<&'static Self, ParseError> {
        SELECTORS.get_or_try_init(|| {
            Ok(Self {
                row: compile_selector("tr")?,
                cell: compile_selector("td")?,
                marked_name: compile_selector("th.team-name")?,
                link: compile_selector("a")?,
            })
        })
    }
}

fn compile_selector(selector: &str) -> Result<Selector, ParseError> {
    Selector::parse(selector).map_err(|e| ParseError::selector(selector, e))
}

fn element_text(element: &ElementRef<'_>) -> String {
    clean(&element.text().collect::<String>())
}

/// Turns table rows into partial records for one layout and schema
#[derive(Debug, Clone)]
pub struct RowParser {
    layout: RowLayout,
    schema: TableSchema,
}

impl RowParser {
    pub fn new(layout: RowLayout, schema: TableSchema) -> Result<Self, ParseError> {
        RowSelectors::get()?;
        Ok(Self { layout, schema })
    }

    pub const fn schema(&self) -> &TableSchema {
        &self.schema
    }

    fn parse_row(
        &self,
        row: ElementRef<'_>,
        selectors: &RowSelectors,
    ) -> Option<PartialRecord> {
        let cells: Vec<String> = row
            .select(&selectors.cell)
            .map(|cell| element_text(&cell))
            .collect();
        if cells.len() < self.layout.min_cells() {
            return None;
        }

        let mut record = PartialRecord::new();
        if let Some(column) = &self.layout.marked_name {
            let name = row
                .select(&selectors.marked_name)
                .next()
                .and_then(|header| header.select(&selectors.link).next())
                .map(|link| element_text(&link));
            if let Some(name) = name {
                record.insert(column.as_str(), name);
            }
        }

        for field in &self.layout.identity {
            record.insert(field.name.as_str(), cells[field.cell].as_str());
        }

        for (column, raw) in self
            .schema
            .columns
            .iter()
            .zip(cells.iter().skip(self.layout.stats_offset))
        {
            decode_cell(column, raw, &mut record);
        }
        Some(record)
    }
}

impl TableParser for RowParser {
    type Output = Vec<PartialRecord>;

    /// Rows with fewer cells than the layout needs are skipped; a row shorter
    /// than the schema yields only the columns it has
    fn parse_table(&self, table: &RawTable) -> Self::Output {
        let selectors = match RowSelectors::get() {
            Ok(selectors) => selectors,
            Err(e) => {
                debug!("Row selectors unavailable: {}", e);
                return Vec::new();
            }
        };
        let fragment = Html::parse_fragment(table.markup());
        let records: Vec<PartialRecord> = fragment
            .select(&selectors.row)
            .skip(self.layout.header_rows)
            .filter_map(|row| self.parse_row(row, selectors))
            .collect();
        debug!(
            "Parsed {} rows against {} schema columns",
            records.len(),
            self.schema.len()
        );
        records
    }
}

/// Writes the output fields of one cell into `record`
///
/// Composite values that fail to decode keep their raw text.
fn decode_cell(column: &ColumnSpec, raw: &str, record: &mut PartialRecord) {
    let name = column.name.as_str();
    match &column.rule {
        FieldRule::Plain => record.insert(name, strip_percent(raw)),
        FieldRule::Counter { derived } => {
            match ParseOutcome::from_result(split_counter(raw), raw) {
                ParseOutcome::Parsed((made, attempted)) => {
                    record.insert(name, made.to_string());
                    record.insert(derived.as_str(), attempted.to_string());
                }
                ParseOutcome::Fallback(text) => {
                    debug!("Keeping raw counter value '{}' for {}", text, name);
                    record.insert(name, text);
                }
            }
        }
        FieldRule::Triple { second, third } => {
            let parts: Vec<&str> = raw.split('-').collect();
            if let [first, middle, last] = parts.as_slice() {
                record.insert(name, *first);
                record.insert(second.as_str(), *middle);
                record.insert(third.as_str(), *last);
            } else {
                record.insert(name, raw);
            }
        }
        FieldRule::LastSegment => record.insert(name, last_segment(raw)),
        FieldRule::Thousands => record.insert(name, strip_thousands(raw)),
        FieldRule::Clock => match ParseOutcome::from_result(parse_clock(raw), raw) {
            ParseOutcome::Parsed(minutes) => record.insert(name, minutes.to_string()),
            ParseOutcome::Fallback(text) => record.insert(name, text),
        },
        FieldRule::SlashFirst => record.insert(name, slash_first(raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ColumnType, IdentityField};

    fn team_layout() -> RowLayout {
        RowLayout::positional(
            1,
            vec![
                IdentityField::new("team_name", 1, ColumnType::Text),
                IdentityField::new("games_played", 2, ColumnType::Int),
            ],
            3,
        )
    }

    fn table(rows: &[&str]) -> RawTable {
        RawTable::new(format!("<table>{}</table>", rows.concat()))
    }

    #[test]
    fn test_parses_positional_rows() {
        let parser = RowParser::new(
            team_layout(),
            TableSchema::new(vec![
                ColumnSpec::made("field_goal_made"),
                ColumnSpec::float("field_goal_percentage"),
            ]),
        )
        .unwrap();

        let records = parser.parse_table(&table(&[
            "<tr><th>#</th><th>Team</th></tr>",
            "<tr><td>1</td><td> Carleton\n Ravens </td><td>10</td><td>300-650</td><td>46.2%</td></tr>",
        ]));

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.get("team_name"), Some("Carleton Ravens"));
        assert_eq!(record.get("games_played"), Some("10"));
        assert_eq!(record.get("field_goal_made"), Some("300"));
        assert_eq!(record.get("field_goal_attempted"), Some("650"));
        assert_eq!(record.get("field_goal_percentage"), Some("46.2"));
    }

    #[test]
    fn test_short_rows_are_skipped_and_truncated() {
        let parser = RowParser::new(
            team_layout(),
            TableSchema::new(vec![ColumnSpec::int("points"), ColumnSpec::int("rebounds")]),
        )
        .unwrap();

        let records = parser.parse_table(&table(&[
            "<tr><th>header</th></tr>",
            "<tr><td>1</td><td>Ottawa</td></tr>",
            "<tr><td>2</td><td>Laval</td><td>8</td><td>700</td></tr>",
        ]));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("points"), Some("700"));
        assert_eq!(records[0].get("rebounds"), None);
    }

    #[test]
    fn test_malformed_counter_keeps_raw_text() {
        let parser = RowParser::new(team_layout(), TableSchema::new(vec![ColumnSpec::made("goals_made")])).unwrap();
        let records = parser.parse_table(&table(&[
            "<tr><th>h</th></tr>",
            "<tr><td>1</td><td>UBC</td><td>3</td><td>-</td></tr>",
        ]));
        assert_eq!(records[0].get("goals_made"), Some("-"));
        assert_eq!(records[0].get("goals_attempted"), None);
    }

    #[test]
    fn test_marked_name_rows() {
        let parser = RowParser::new(
            RowLayout::marked("team_name"),
            TableSchema::new(vec![ColumnSpec::int("games_played"), ColumnSpec::int("total_wins")]),
        )
        .unwrap();

        let records = parser.parse_table(&table(&[
            "<tr><th>Team</th><th>GP</th><th>W</th></tr>",
            "<tr><th class=\"team-name\"><a href=\"#\">Queen's</a></th><td>12</td><td>9</td></tr>",
            "<tr><th class=\"other\">Totals</th><td>24</td><td>18</td></tr>",
        ]));

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("team_name"), Some("Queen's"));
        assert_eq!(records[0].get("total_wins"), Some("9"));
        assert_eq!(records[1].get("team_name"), None);
    }

    #[test]
    fn test_composite_rules() {
        let parser = RowParser::new(
            team_layout(),
            TableSchema::new(vec![
                ColumnSpec::triple("pass_completions", "pass_attempts", "pass_interceptions"),
                ColumnSpec::last_segment("interception_yards"),
                ColumnSpec::thousands("total_attendance"),
                ColumnSpec::clock("time_of_possession"),
                ColumnSpec::slash_first("goalie_shutouts"),
            ]),
        )
        .unwrap();

        let records = parser.parse_table(&table(&[
            "<tr><th>h</th></tr>",
            "<tr><td>1</td><td>Laval</td><td>8</td><td>150-250-7</td><td>4-61</td><td>12,500</td><td>31:30</td><td>2/0</td></tr>",
        ]));

        let record = &records[0];
        assert_eq!(record.get("pass_completions"), Some("150"));
        assert_eq!(record.get("pass_attempts"), Some("250"));
        assert_eq!(record.get("pass_interceptions"), Some("7"));
        assert_eq!(record.get("interception_yards"), Some("61"));
        assert_eq!(record.get("total_attendance"), Some("12500"));
        assert_eq!(record.get("time_of_possession"), Some("31.5"));
        assert_eq!(record.get("goalie_shutouts"), Some("2"));
    }
}
