//! Page-level table extraction and selection

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, warn};

use crate::domain::{RawTable, TableSelection};

static TABLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table").expect("table selector is valid"));

/// Every `<table>` element of a document, in document order, with newlines
/// and tabs removed from the markup
pub fn extract_tables(html: &str) -> Vec<RawTable> {
    let document = Html::parse_document(html);
    let tables: Vec<RawTable> = document
        .select(&TABLE_SELECTOR)
        .map(|table| RawTable::new(table.html().replace(['\n', '\t'], "")))
        .collect();
    debug!("Extracted {} tables from page", tables.len());
    tables
}

/// Tables a page group reads, paired in order with its schema indices
///
/// The page is sliced like `tables[start..start + schema_count]`, where
/// `start` counts back from the end for [`TableSelection::FromEnd`]. Both
/// bounds clamp to the page, so a short page pairs the tables it has with
/// the leading schemas and the rest are skipped with a warning.
pub fn select_tables(
    selection: TableSelection,
    tables: &[RawTable],
    schema_count: usize,
) -> Vec<(usize, &RawTable)> {
    let len = tables.len();
    let (start, end) = match selection {
        TableSelection::All => return tables.iter().map(|table| (0, table)).collect(),
        TableSelection::FromStart(index) => (index.min(len), index.saturating_add(schema_count).min(len)),
        TableSelection::FromEnd(count) => (
            len.saturating_sub(count),
            (len + schema_count).saturating_sub(count).min(len),
        ),
    };

    let selected: Vec<(usize, &RawTable)> = tables
        .get(start..end)
        .unwrap_or_default()
        .iter()
        .enumerate()
        .collect();

    if selected.len() < schema_count {
        warn!(
            "Page has {} tables, expected {} at {:?}; missing tables skipped",
            len, schema_count, selection
        );
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables(count: usize) -> Vec<RawTable> {
        (0..count).map(|i| RawTable::new(format!("<table id=\"t{i}\"></table>"))).collect()
    }

    #[test]
    fn test_extract_tables_strips_whitespace_markup() {
        let html = "<html><body><p>x</p><table>\n\t<tr><td>1</td></tr></table><table><tr><td>2</td></tr></table></body></html>";
        let extracted = extract_tables(html);
        assert_eq!(extracted.len(), 2);
        assert!(!extracted[0].markup().contains('\n'));
        assert!(extracted[1].markup().contains("<td>2</td>"));
    }

    #[test]
    fn test_extract_tables_on_page_without_tables() {
        assert!(extract_tables("<html><body>No data</body></html>").is_empty());
    }

    #[test]
    fn test_select_from_start() {
        let all = tables(6);
        let selected = select_tables(TableSelection::FromStart(3), &all, 3);
        assert_eq!(selected.len(), 3);
        assert_eq!(selected[0].0, 0);
        assert!(selected[0].1.markup().contains("t3"));
        assert!(selected[2].1.markup().contains("t5"));
    }

    #[test]
    fn test_select_from_start_skips_missing_tables() {
        let all = tables(4);
        let selected = select_tables(TableSelection::FromStart(3), &all, 3);
        assert_eq!(selected.len(), 1);
    }

    #[test]
    fn test_select_from_end() {
        let all = tables(7);
        let selected = select_tables(TableSelection::FromEnd(2), &all, 2);
        assert_eq!(selected.len(), 2);
        assert!(selected[0].1.markup().contains("t5"));
        assert!(selected[1].1.markup().contains("t6"));
    }

    #[test]
    fn test_select_from_end_window() {
        let all = tables(8);
        let selected = select_tables(TableSelection::FromEnd(5), &all, 3);
        let ids: Vec<_> = selected.iter().map(|(_, t)| t.markup().to_string()).collect();
        assert!(ids[0].contains("t3"));
        assert!(ids[2].contains("t5"));
    }

    #[test]
    fn test_select_from_end_on_short_page() {
        let all = tables(1);
        let selected = select_tables(TableSelection::FromEnd(2), &all, 2);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].0, 0);
        assert!(selected[0].1.markup().contains("t0"));
    }

    #[test]
    fn test_select_from_end_window_on_short_page() {
        let all = tables(4);
        let selected = select_tables(TableSelection::FromEnd(5), &all, 3);
        let pairs: Vec<(usize, bool)> = selected
            .iter()
            .map(|(schema, table)| (*schema, table.markup().contains(&format!("t{schema}"))))
            .collect();
        assert_eq!(pairs, vec![(0, true), (1, true)]);
    }

    #[test]
    fn test_select_from_end_on_page_without_tables() {
        assert!(select_tables(TableSelection::FromEnd(2), &[], 2).is_empty());
        assert!(select_tables(TableSelection::FromStart(3), &tables(2), 3).is_empty());
    }

    #[test]
    fn test_select_all_uses_first_schema() {
        let all = tables(3);
        let selected = select_tables(TableSelection::All, &all, 1);
        assert!(selected.iter().all(|(schema, _)| *schema == 0));
        assert_eq!(selected.len(), 3);
    }
}
