use scraper::{ElementRef, Html, Selector};

use crate::{
    error::{Result, ScrapeError},
    types::RowRecord,
    utils::{capture_timestamp, extract_team_id},
};

/// Rows at the top of each table that hold headers and decoration.
const HEADER_ROWS: usize = 3;

pub fn parse_page(html: &str) -> Html {
    Html::parse_document(html)
}

/// Finds `<table id="...">`, failing if the page does not carry it.
pub fn locate_table<'a>(document: &'a Html, id: &'static str) -> Result<ElementRef<'a>> {
    let table_selector = Selector::parse(&format!("table#{}", id)).unwrap();
    document
        .select(&table_selector)
        .next()
        .ok_or(ScrapeError::TableNotFound { id })
}

/// Extracts rows with a fresh capture timestamp shared by the whole table.
pub fn extract_rows(table: ElementRef<'_>) -> Vec<RowRecord> {
    extract_rows_at(table, &capture_timestamp())
}

pub fn extract_rows_at(table: ElementRef<'_>, captured_at: &str) -> Vec<RowRecord> {
    let row_selector = Selector::parse("tr").unwrap();
    let cell_selector = Selector::parse("td").unwrap();
    let link_selector = Selector::parse("a").unwrap();

    let mut rows = Vec::new();

    for row in table.select(&row_selector).skip(HEADER_ROWS) {
        let mut cells = vec![captured_at.to_string()];

        // First cell is the rank column
        for cell in row.select(&cell_selector).skip(1) {
            cells.push(cell.text().collect::<String>().trim().to_string());
            for link in cell.select(&link_selector) {
                if let Some(team_id) = link.value().attr("href").and_then(extract_team_id) {
                    cells.push(team_id);
                }
            }
        }

        rows.push(drop_empty_cells(cells));
    }

    rows
}

pub fn drop_empty_cells(cells: RowRecord) -> RowRecord {
    cells.into_iter().filter(|cell| !cell.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const STAMP: &str = "2016-05-01 09:30:00.000000";

    fn table_html(rows: usize) -> String {
        let mut html = String::from(r#"<html><body><table id="statsTable">"#);
        for i in 0..rows {
            html.push_str(&format!("<tr><td>{}</td><td>row{}</td></tr>", i, i));
        }
        html.push_str("</table></body></html>");
        html
    }

    fn rows_of(html: &str, id: &'static str) -> Vec<RowRecord> {
        let document = parse_page(html);
        let table = locate_table(&document, id).unwrap();
        extract_rows_at(table, STAMP)
    }

    #[test]
    fn test_skips_three_header_rows() {
        assert_eq!(rows_of(&table_html(5), "statsTable").len(), 2);
        assert_eq!(rows_of(&table_html(3), "statsTable").len(), 0);
        assert_eq!(rows_of(&table_html(1), "statsTable").len(), 0);
    }

    #[test]
    fn test_rank_cell_is_dropped() {
        let rows = rows_of(&table_html(4), "statsTable");
        assert_eq!(rows, vec![vec![STAMP.to_string(), "row3".to_string()]]);
    }

    #[test]
    fn test_team_link_adds_team_id_cell() {
        let html = r#"<table id="standingsTable">
            <tr><th>h</th></tr><tr><th>h</th></tr><tr><th>h</th></tr>
            <tr>
              <td>1</td>
              <td><a href="/flb/clubhouse?seasonId=2016&amp;teamId=12345">Sluggers</a></td>
              <td><a href="/flb/trades">no id</a></td>
              <td>88.5</td>
            </tr>
        </table>"#;

        let rows = rows_of(html, "standingsTable");
        assert_eq!(
            rows,
            vec![vec![
                STAMP.to_string(),
                "Sluggers".to_string(),
                "12345".to_string(),
                "no id".to_string(),
                "88.5".to_string(),
            ]]
        );
    }

    #[test]
    fn test_empty_cells_removed() {
        let cells = vec![
            "2020-01-01".to_string(),
            String::new(),
            "TeamA".to_string(),
            String::new(),
        ];
        assert_eq!(drop_empty_cells(cells), vec!["2020-01-01".to_string(), "TeamA".to_string()]);
    }

    #[test]
    fn test_missing_table_is_reported() {
        let document = parse_page(&table_html(4));
        match locate_table(&document, "standingsTable") {
            Err(ScrapeError::TableNotFound { id }) => assert_eq!(id, "standingsTable"),
            other => panic!("expected TableNotFound, got {:?}", other.map(|t| t.html())),
        }
    }

    #[test]
    fn test_timestamp_shared_across_rows() {
        let document = parse_page(&table_html(6));
        let table = locate_table(&document, "statsTable").unwrap();
        let rows = extract_rows(table);
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row[0] == rows[0][0]));
    }
}
