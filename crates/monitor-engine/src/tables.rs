//! Table-based extraction of the monthly payment series from the
//! "Приложение 2 к Таблице 7" annex.
//!
//! This is a best-effort heuristic scan: grids that do not look like the
//! annex table are skipped, malformed grids are skipped, and the scan
//! never fails the analysis.

use report_types::{Page, TableEvidence};
use tracing::debug;

/// Expected annex table shape, with tolerance (the nominal layout is
/// roughly 6 rows by 7 columns).
const ROW_BAND: std::ops::RangeInclusive<usize> = 5..=10;
const COL_BAND: std::ops::RangeInclusive<usize> = 5..=8;

/// Cells at or below this magnitude are row indices, month numbers and
/// other non-monetary noise, not payment amounts.
const MIN_CELL_VALUE: f64 = 100_000.0;

/// The classifier needs exactly three chronological months.
pub const MONTHS_REQUIRED: usize = 3;

/// Locate the annex table and pull the three most recent monthly
/// payment amounts, returned oldest first.
///
/// Returns `None` unless a full triple is found, signaling the caller
/// to fall back to the narrative-percentage strategy; a partial series
/// is never reported.
pub fn find_monthly_values(pages: &[Page]) -> Option<(Vec<f64>, TableEvidence)> {
    for page in pages {
        if !has_annex_marker(&page.text) {
            continue;
        }

        for (table_index, grid) in page.tables.iter().enumerate() {
            let rows = grid.len();
            let cols = grid.first().map_or(0, |row| row.len());
            if !ROW_BAND.contains(&rows) || !COL_BAND.contains(&cols) {
                debug!(
                    page = page.number,
                    table_index, rows, cols, "skipping grid outside expected annex shape"
                );
                continue;
            }

            let mut cells = collect_numeric_cells(grid);
            if cells.len() < MONTHS_REQUIRED {
                continue;
            }

            // Most recent values sit in the lowest, rightmost cells:
            // sort by (row, col) descending, take three, then restore
            // chronological order.
            cells.sort_by(|a, b| (b.row, b.col).cmp(&(a.row, a.col)));
            let mut values: Vec<f64> = cells
                .iter()
                .take(MONTHS_REQUIRED)
                .map(|cell| cell.value)
                .collect();
            values.reverse();

            return Some((
                values.clone(),
                TableEvidence {
                    page: page.number,
                    table_index,
                    source: "Приложение 2 к Таблице 7".to_string(),
                    values,
                    note: "Месячные поступления по ДДУ из таблицы (в тыс.тг или млн.тг)"
                        .to_string(),
                },
            ));
        }
    }

    None
}

/// Acceptable phrasings of the annex marker.
fn has_annex_marker(text: &str) -> bool {
    let lower = text.to_lowercase();
    (lower.contains("приложение") && lower.contains("таблица 7"))
        || lower.contains("приложение 2")
        || (lower.contains("таблица") && lower.contains("дду"))
}

struct NumericCell {
    row: usize,
    col: usize,
    value: f64,
}

/// Every cell that parses as a number above the magnitude threshold,
/// after normalizing thousands separators and decimal commas. Ragged
/// rows and absent cells are simply skipped.
fn collect_numeric_cells(grid: &[Vec<Option<String>>]) -> Vec<NumericCell> {
    let mut cells = Vec::new();
    for (row, cols) in grid.iter().enumerate() {
        for (col, cell) in cols.iter().enumerate() {
            let Some(raw) = cell else { continue };
            let normalized = raw
                .trim()
                .replace([' ', '\u{a0}'], "")
                .replace(',', ".");
            if let Ok(value) = normalized.parse::<f64>() {
                if value > MIN_CELL_VALUE {
                    cells.push(NumericCell { row, col, value });
                }
            }
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use report_types::TableGrid;

    fn cell(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    /// 6x7 grid shaped like the annex: narrow header cells plus monthly
    /// amounts growing down the rightmost columns.
    fn annex_grid() -> TableGrid {
        vec![
            vec![cell("Месяц"), cell("1"), cell("2"), cell("3"), cell("4"), cell("5"), cell("6")],
            vec![cell("План"), cell("10"), cell("20"), cell("30"), cell("40"), cell("50"), cell("60")],
            vec![cell("Факт"), cell("1"), cell("2"), cell("3"), cell("4"), cell("5"), cell("6")],
            vec![cell("x"), cell("x"), cell("x"), cell("x"), cell("x"), cell("x"), cell("150 000")],
            vec![cell("x"), cell("x"), cell("x"), cell("x"), cell("x"), cell("x"), cell("250 000,50")],
            vec![cell("x"), cell("x"), cell("x"), cell("x"), cell("x"), cell("x"), cell("350 000")],
        ]
    }

    fn annex_page(tables: Vec<TableGrid>) -> Page {
        Page::with_tables(3, "Приложение 2 к Таблице 7. Поступления по ДДУ.", tables)
    }

    #[test]
    fn extracts_three_most_recent_values_in_chronological_order() {
        let pages = vec![annex_page(vec![annex_grid()])];
        let (values, evidence) = find_monthly_values(&pages).unwrap();

        assert_eq!(values, vec![150_000.0, 250_000.5, 350_000.0]);
        assert_eq!(evidence.page, 3);
        assert_eq!(evidence.table_index, 0);
        assert_eq!(evidence.values, values);
    }

    #[test]
    fn page_without_marker_is_ignored() {
        let page = Page::with_tables(1, "Обычная страница без приложения.", vec![annex_grid()]);
        assert!(find_monthly_values(&[page]).is_none());
    }

    #[test]
    fn grid_outside_shape_band_is_skipped() {
        // 3 rows: below the row band even though values are plausible.
        let small: TableGrid = vec![
            vec![cell("200000"), cell("300000"), cell("400000"), cell("1"), cell("2")],
            vec![cell("1"), cell("2"), cell("3"), cell("4"), cell("5")],
            vec![cell("1"), cell("2"), cell("3"), cell("4"), cell("5")],
        ];
        let pages = vec![annex_page(vec![small])];
        assert!(find_monthly_values(&pages).is_none());
    }

    #[test]
    fn small_numbers_are_filtered_out() {
        // Shape fits but every cell is below the magnitude threshold.
        let grid: TableGrid = (0..6)
            .map(|_| (0..6).map(|i| cell(&i.to_string())).collect())
            .collect();
        let pages = vec![annex_page(vec![grid])];
        assert!(find_monthly_values(&pages).is_none());
    }

    #[test]
    fn fewer_than_three_values_yields_none() {
        let mut grid = annex_grid();
        // Drop one of the three amounts; a 2-element series must not be
        // reported.
        grid[5][6] = cell("нет данных");
        let pages = vec![annex_page(vec![grid])];
        assert!(find_monthly_values(&pages).is_none());
    }

    #[test]
    fn malformed_grids_are_skipped_not_fatal() {
        let ragged: TableGrid = vec![
            vec![cell("x")],
            vec![],
            vec![None, None, cell("мусор"), None, cell("—")],
            vec![cell("x"), None],
            vec![cell("x"), cell("y"), cell("z"), cell("w"), cell("v")],
        ];
        // A broken grid first, the real annex grid second.
        let pages = vec![annex_page(vec![ragged, annex_grid()])];
        let (values, evidence) = find_monthly_values(&pages).unwrap();
        assert_eq!(values.len(), 3);
        assert_eq!(evidence.table_index, 1);
    }

    #[test]
    fn ordering_follows_grid_position_not_magnitude() {
        let mut grid = annex_grid();
        // Put the largest amount in the oldest slot; chronological order
        // must be preserved regardless of magnitude.
        grid[3][6] = cell("900 000");
        let pages = vec![annex_page(vec![grid])];
        let (values, _) = find_monthly_values(&pages).unwrap();
        assert_eq!(values, vec![900_000.0, 250_000.5, 350_000.0]);
    }
}
