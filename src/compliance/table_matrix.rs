//! Header association check for tagged tables.
//!
//! Lays the cells of one table out on a rows x columns grid, records which
//! slots are labelled by some header scope, and then decides for every data
//! cell whether an assistive technology could find its header
//! (ISO 14289-1:2014 Section 7.5, ISO 14289-2 Section 8.2.5.26).

use super::types::PdfUaLevel;
use super::violation::{CellLocation, ConformanceViolation};
use crate::structure::{CellScope, TableCell, TableLayout};
use std::collections::HashSet;
use std::ops::Range;

/// One table's cells on a flat grid.
///
/// Both grids are indexed by `row * columns + col`.
pub struct TableResultMatrix<I> {
    layout: TableLayout,
    level: PdfUaLevel,
    cells: I,
    placed: Vec<TableCell>,
    cell_matrix: Vec<Option<usize>>,
    scope_matrix: Vec<bool>,
    known_ids: HashSet<String>,
    has_unknown_headers: bool,
}

impl<I> TableResultMatrix<I>
where
    I: Iterator<Item = TableCell>,
{
    /// Prepare a check over `cells`, which must come in document order.
    pub fn new(layout: TableLayout, level: PdfUaLevel, cells: I) -> Self {
        let slots = layout.rows() * layout.columns;
        Self {
            layout,
            level,
            cells,
            placed: Vec::new(),
            cell_matrix: vec![None; slots],
            scope_matrix: vec![false; slots],
            known_ids: HashSet::new(),
            has_unknown_headers: false,
        }
    }

    /// Run the check.
    ///
    /// A cell with a role other than TH/TD and a slot no cell covers are
    /// reported as soon as they are found. Data cells without a header are
    /// collected and reported together once the whole table is scanned.
    pub fn check_valid_table_tagging(mut self) -> Result<(), ConformanceViolation> {
        while let Some(cell) = self.cells.next() {
            let index = self.placed.len();
            self.place(&cell, index);

            if cell.has_role("TH") {
                self.register_header(&cell);
            } else if !cell.has_role("TD") {
                let (section, row) = self.layout.section_of(cell.row);
                return Err(ConformanceViolation::InvalidCellRole {
                    row,
                    col: cell.col,
                    section,
                    role: cell.role.clone().unwrap_or_default(),
                });
            }
            self.placed.push(cell);
        }

        self.check_no_empty_slots()?;

        let invalid = self.unlabelled_data_cells();
        if invalid.is_empty() {
            Ok(())
        } else {
            Err(ConformanceViolation::UndeterminableCellHeader { cells: invalid })
        }
    }

    fn place(&mut self, cell: &TableCell, index: usize) {
        for row in self.rows_from(cell.row, cell.row_span) {
            for col in self.cols_from(cell.col, cell.col_span) {
                let slot = self.slot(row, col);
                self.cell_matrix[slot] = Some(index);
            }
        }
    }

    fn register_header(&mut self, cell: &TableCell) {
        if let Some(id) = &cell.id {
            self.known_ids.insert(id.clone());
        }

        let all_rows = 0..self.layout.rows();
        let all_cols = 0..self.layout.columns;
        let own_rows = self.rows_from(cell.row, cell.row_span);
        let own_cols = self.cols_from(cell.col, cell.col_span);

        match cell.scope {
            CellScope::Column => self.mark(all_rows, own_cols),
            CellScope::Row => self.mark(own_rows, all_cols),
            CellScope::Both => {
                self.mark(all_rows, own_cols);
                self.mark(own_rows, all_cols);
            },
            CellScope::None | CellScope::Unset => {
                self.has_unknown_headers = true;
                if self.level.assumes_default_header_scope() {
                    self.apply_default_scope(cell);
                }
            },
        }
    }

    /// Assumed scope of a header without one, for left-to-right,
    /// top-to-bottom tables: the first row labels downwards, the first column
    /// labels rightwards, and the corner or any interior header labels both
    /// ways to the end of the table.
    fn apply_default_scope(&mut self, cell: &TableCell) {
        let down = cell.row..self.layout.rows();
        let right = cell.col..self.layout.columns;
        let own_rows = self.rows_from(cell.row, cell.row_span);
        let own_cols = self.cols_from(cell.col, cell.col_span);

        if (cell.row == 0) == (cell.col == 0) {
            self.mark(down, own_cols);
            self.mark(own_rows, right);
        } else if cell.row == 0 {
            self.mark(down, own_cols);
        } else {
            self.mark(own_rows, right);
        }
    }

    fn check_no_empty_slots(&self) -> Result<(), ConformanceViolation> {
        for row in 0..self.layout.rows() {
            for col in 0..self.layout.columns {
                if self.cell_matrix[self.slot(row, col)].is_none() {
                    let (section, row) = self.layout.section_of(row);
                    return Err(ConformanceViolation::EmptyTableCell { row, col, section });
                }
            }
        }
        Ok(())
    }

    fn unlabelled_data_cells(&self) -> Vec<CellLocation> {
        let mut invalid = Vec::new();
        for row in 0..self.layout.rows() {
            for col in 0..self.layout.columns {
                let slot = self.slot(row, col);
                let Some(index) = self.cell_matrix[slot] else {
                    continue;
                };
                let cell = &self.placed[index];
                // Each cell is judged once, at its origin slot.
                if cell.row != row || cell.col != col || !cell.has_role("TD") {
                    continue;
                }

                let valid = if cell.headers.is_empty() {
                    self.scope_matrix[slot] || !self.has_unknown_headers
                } else {
                    cell.headers.iter().all(|id| self.known_ids.contains(id))
                };
                if !valid {
                    let (section, row) = self.layout.section_of(row);
                    log::debug!("No header for cell at row {} ({}), column {}", row, section, col);
                    invalid.push(CellLocation { row, col, section });
                }
            }
        }
        invalid
    }

    fn mark(&mut self, rows: Range<usize>, cols: Range<usize>) {
        for row in rows {
            for col in cols.clone() {
                let slot = self.slot(row, col);
                self.scope_matrix[slot] = true;
            }
        }
    }

    fn rows_from(&self, start: usize, span: usize) -> Range<usize> {
        let end = self.layout.rows();
        start.min(end)..start.saturating_add(span).min(end)
    }

    fn cols_from(&self, start: usize, span: usize) -> Range<usize> {
        let end = self.layout.columns;
        start.min(end)..start.saturating_add(span).min(end)
    }

    fn slot(&self, row: usize, col: usize) -> usize {
        row * self.layout.columns + col
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::TableSection;

    fn check(
        layout: TableLayout,
        level: PdfUaLevel,
        cells: Vec<TableCell>,
    ) -> Result<(), ConformanceViolation> {
        TableResultMatrix::new(layout, level, cells.into_iter()).check_valid_table_tagging()
    }

    #[test]
    fn test_column_headers_cover_data() {
        let cells = vec![
            TableCell::new("TH", 0, 0).with_scope(CellScope::Column),
            TableCell::new("TH", 0, 1).with_scope(CellScope::Column),
            TableCell::new("TD", 1, 0),
            TableCell::new("TD", 1, 1),
        ];
        assert!(check(TableLayout::new(1, 1, 0, 2), PdfUaLevel::Ua1, cells).is_ok());
    }

    #[test]
    fn test_missing_slot_is_empty_cell() {
        let cells = vec![
            TableCell::new("TH", 0, 0).with_scope(CellScope::Column),
            TableCell::new("TH", 0, 1).with_scope(CellScope::Column),
            TableCell::new("TD", 1, 0),
        ];
        assert_eq!(
            check(TableLayout::new(1, 1, 0, 2), PdfUaLevel::Ua1, cells),
            Err(ConformanceViolation::EmptyTableCell {
                row: 0,
                col: 1,
                section: TableSection::Body,
            })
        );
    }

    #[test]
    fn test_invalid_role_stops_immediately() {
        // The Span comes before a slot that would be empty; the role error wins.
        let cells = vec![
            TableCell::new("TH", 0, 0).with_scope(CellScope::Column),
            TableCell::new("Span", 0, 1),
            TableCell::new("TD", 1, 0),
        ];
        assert_eq!(
            check(TableLayout::new(0, 2, 0, 2), PdfUaLevel::Ua1, cells),
            Err(ConformanceViolation::InvalidCellRole {
                row: 0,
                col: 1,
                section: TableSection::Body,
                role: "Span".to_string(),
            })
        );
    }

    #[test]
    fn test_unscoped_header_base_level() {
        let cells = vec![
            TableCell::new("TH", 0, 0),
            TableCell::new("TD", 1, 0),
        ];
        assert_eq!(
            check(TableLayout::new(1, 1, 0, 1), PdfUaLevel::Ua1, cells),
            Err(ConformanceViolation::UndeterminableCellHeader {
                cells: vec![CellLocation {
                    row: 0,
                    col: 0,
                    section: TableSection::Body,
                }],
            })
        );
    }

    #[test]
    fn test_unscoped_header_extended_level_uses_default() {
        let cells = vec![
            TableCell::new("TH", 0, 0),
            TableCell::new("TD", 1, 0),
        ];
        assert!(check(TableLayout::new(1, 1, 0, 1), PdfUaLevel::Ua2, cells).is_ok());
    }

    #[test]
    fn test_headers_attribute_takes_precedence() {
        let cells = vec![
            TableCell::new("TH", 0, 0).with_id("name"),
            TableCell::new("TD", 1, 0).with_headers(["name"]),
        ];
        assert!(check(TableLayout::new(1, 1, 0, 1), PdfUaLevel::Ua1, cells).is_ok());
    }

    #[test]
    fn test_header_ids_label_cells_outside_assumed_scope() {
        // The unscoped TH sits bottom right, so its assumed scope reaches
        // none of the data cells; only their Headers lists label them.
        let layout = TableLayout::new(0, 2, 0, 2);
        let by_id = vec![
            TableCell::new("TD", 0, 0).with_headers(["total"]),
            TableCell::new("TD", 0, 1).with_headers(["total"]),
            TableCell::new("TD", 1, 0).with_headers(["total"]),
            TableCell::new("TH", 1, 1).with_id("total"),
        ];
        assert!(check(layout, PdfUaLevel::Ua2, by_id).is_ok());

        let unlabelled = vec![
            TableCell::new("TD", 0, 0).with_headers(["total"]),
            TableCell::new("TD", 0, 1),
            TableCell::new("TD", 1, 0).with_headers(["total"]),
            TableCell::new("TH", 1, 1).with_id("total"),
        ];
        assert!(matches!(
            check(layout, PdfUaLevel::Ua2, unlabelled),
            Err(ConformanceViolation::UndeterminableCellHeader { cells }) if cells.len() == 1
        ));
    }

    #[test]
    fn test_unknown_header_id_is_invalid_even_if_covered() {
        let cells = vec![
            TableCell::new("TH", 0, 0).with_id("name").with_scope(CellScope::Column),
            TableCell::new("TD", 1, 0).with_headers(["nmae"]),
        ];
        assert!(matches!(
            check(TableLayout::new(1, 1, 0, 1), PdfUaLevel::Ua1, cells),
            Err(ConformanceViolation::UndeterminableCellHeader { .. })
        ));
    }

    #[test]
    fn test_no_headers_at_all_is_fine() {
        // Without any ambiguous header there is nothing to disambiguate.
        let cells = vec![TableCell::new("TD", 0, 0), TableCell::new("TD", 0, 1)];
        assert!(check(TableLayout::new(0, 1, 0, 2), PdfUaLevel::Ua1, cells).is_ok());
    }

    #[test]
    fn test_row_scope_covers_whole_row() {
        // TH(row) TD TD
        // TH      TD TD   <- second header has no scope, so coverage matters
        let cells = vec![
            TableCell::new("TH", 0, 0).with_scope(CellScope::Row),
            TableCell::new("TD", 0, 1),
            TableCell::new("TD", 0, 2),
            TableCell::new("TH", 1, 0),
            TableCell::new("TD", 1, 1),
            TableCell::new("TD", 1, 2),
        ];
        assert_eq!(
            check(TableLayout::new(0, 2, 0, 3), PdfUaLevel::Ua1, cells),
            Err(ConformanceViolation::UndeterminableCellHeader {
                cells: vec![
                    CellLocation {
                        row: 1,
                        col: 1,
                        section: TableSection::Body,
                    },
                    CellLocation {
                        row: 1,
                        col: 2,
                        section: TableSection::Body,
                    },
                ],
            })
        );
    }

    #[test]
    fn test_default_scope_first_row_labels_downward_only() {
        // Row 0: TD TH   (TH at row 0, col 1 -> column coverage)
        // Row 1: TD TD
        // Column 0 has no header, so both column-0 data cells fail.
        let cells = vec![
            TableCell::new("TD", 0, 0),
            TableCell::new("TH", 0, 1),
            TableCell::new("TD", 1, 0),
            TableCell::new("TD", 1, 1),
        ];
        let err = check(TableLayout::new(0, 2, 0, 2), PdfUaLevel::Ua2, cells).unwrap_err();
        match err {
            ConformanceViolation::UndeterminableCellHeader { cells } => {
                let positions: Vec<_> = cells.iter().map(|c| (c.row, c.col)).collect();
                assert_eq!(positions, vec![(0, 0), (1, 0)]);
            },
            other => panic!("unexpected violation: {other}"),
        }
    }

    #[test]
    fn test_default_scope_first_column_labels_rightward_only() {
        // Row 0: TD TD
        // Row 1: TH TD   (TH at row 1, col 0 -> row coverage)
        let cells = vec![
            TableCell::new("TD", 0, 0),
            TableCell::new("TD", 0, 1),
            TableCell::new("TH", 1, 0),
            TableCell::new("TD", 1, 1),
        ];
        let err = check(TableLayout::new(0, 2, 0, 2), PdfUaLevel::Ua2, cells).unwrap_err();
        match err {
            ConformanceViolation::UndeterminableCellHeader { cells } => {
                let positions: Vec<_> = cells.iter().map(|c| (c.row, c.col)).collect();
                assert_eq!(positions, vec![(0, 0), (0, 1)]);
            },
            other => panic!("unexpected violation: {other}"),
        }
    }

    #[test]
    fn test_default_scope_interior_labels_both_ways() {
        // Row 0: TD TD TD
        // Row 1: TD TH TD
        // Row 2: TD TD TD
        // Interior TH covers (1..3, 1) and (1, 1..3).
        let mut cells = Vec::new();
        for row in 0..3 {
            for col in 0..3 {
                let role = if (row, col) == (1, 1) { "TH" } else { "TD" };
                cells.push(TableCell::new(role, row, col));
            }
        }
        let err = check(TableLayout::new(0, 3, 0, 3), PdfUaLevel::Ua2, cells).unwrap_err();
        match err {
            ConformanceViolation::UndeterminableCellHeader { cells } => {
                let positions: Vec<_> = cells.iter().map(|c| (c.row, c.col)).collect();
                assert_eq!(positions, vec![(0, 0), (0, 1), (0, 2), (1, 0), (2, 0), (2, 2)]);
            },
            other => panic!("unexpected violation: {other}"),
        }
    }

    #[test]
    fn test_spanning_cell_fills_slots_and_is_judged_once() {
        // TH(col, colspan 2)
        // TD(colspan 2)
        let cells = vec![
            TableCell::new("TH", 0, 0)
                .with_span(1, 2)
                .with_scope(CellScope::Column),
            TableCell::new("TD", 1, 0).with_span(1, 2),
            TableCell::new("TH", 2, 0).with_span(1, 2),
            TableCell::new("TD", 3, 0).with_span(1, 2),
        ];
        // The unscoped TH at row 2 makes coverage matter; the column scope
        // from the first header covers everything, so no cell fails.
        assert!(check(TableLayout::new(1, 3, 0, 2), PdfUaLevel::Ua1, cells).is_ok());
    }

    #[test]
    fn test_footer_rows_numbered_from_zero() {
        let cells = vec![
            TableCell::new("TH", 0, 0),
            TableCell::new("TD", 1, 0).with_headers(["missing"]),
            TableCell::new("TD", 2, 0),
        ];
        let err = check(TableLayout::new(1, 1, 1, 1), PdfUaLevel::Ua1, cells).unwrap_err();
        match err {
            ConformanceViolation::UndeterminableCellHeader { cells } => {
                assert_eq!(
                    cells,
                    vec![
                        CellLocation {
                            row: 0,
                            col: 0,
                            section: TableSection::Body,
                        },
                        CellLocation {
                            row: 0,
                            col: 0,
                            section: TableSection::Footer,
                        },
                    ]
                );
            },
            other => panic!("unexpected violation: {other}"),
        }
    }

    #[test]
    fn test_span_past_matrix_is_clipped() {
        let cells = vec![
            TableCell::new("TH", 0, 0).with_span(5, 1).with_scope(CellScope::Row),
            TableCell::new("TD", 0, 1),
            TableCell::new("TD", 1, 1),
        ];
        assert!(check(TableLayout::new(0, 2, 0, 2), PdfUaLevel::Ua1, cells).is_ok());
    }
}
