//! Cell iteration over tagged tables.
//!
//! Turns a `Table` structure element into a flat, positioned list of cells
//! (ISO 32000-1:2008 Section 14.8.4.3.4 and Table 349 for the attributes).

use super::types::{AttributeKey, AttributeOwner, NodeId, NodeRef, StructElem};
use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;

/// Row group a table row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TableSection {
    /// Rows inside `THead`
    Header,
    /// Rows inside `TBody` or directly under `Table`
    Body,
    /// Rows inside `TFoot`
    Footer,
}

impl fmt::Display for TableSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableSection::Header => write!(f, "Header"),
            TableSection::Body => write!(f, "Body"),
            TableSection::Footer => write!(f, "Footer"),
        }
    }
}

/// Scope declared on a header cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellScope {
    /// A `Scope` attribute with an unrecognized value
    None,
    /// Header for its row
    Row,
    /// Header for its column
    Column,
    /// Header for both
    Both,
    /// No `Scope` attribute
    Unset,
}

impl CellScope {
    /// Parse from the `Scope` attribute value.
    pub fn from_pdf_name(name: &str) -> Self {
        match name {
            "Row" => Self::Row,
            "Column" => Self::Column,
            "Both" => Self::Both,
            _ => Self::None,
        }
    }
}

/// A positioned table cell.
#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    /// Structure element of the cell
    pub node: Option<NodeId>,
    /// Resolved standard role (expected `TH` or `TD`)
    pub role: Option<String>,
    /// Absolute row in the table matrix
    pub row: usize,
    /// Column in the table matrix
    pub col: usize,
    /// Rows covered, at least 1
    pub row_span: usize,
    /// Columns covered, at least 1
    pub col_span: usize,
    /// Element id (`/ID`)
    pub id: Option<String>,
    /// Explicit header ids (`Headers` attribute)
    pub headers: Vec<String>,
    /// Declared scope
    pub scope: CellScope,
}

impl TableCell {
    /// A 1x1 cell with no id, no header references and no scope.
    pub fn new(role: impl Into<String>, row: usize, col: usize) -> Self {
        Self {
            node: None,
            role: Some(role.into()),
            row,
            col,
            row_span: 1,
            col_span: 1,
            id: None,
            headers: Vec::new(),
            scope: CellScope::Unset,
        }
    }

    /// Set spans (values below 1 are raised to 1).
    pub fn with_span(mut self, row_span: usize, col_span: usize) -> Self {
        self.row_span = row_span.max(1);
        self.col_span = col_span.max(1);
        self
    }

    /// Set the element id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the explicit header ids.
    pub fn with_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers = headers.into_iter().map(Into::into).collect();
        self
    }

    /// Set the scope.
    pub fn with_scope(mut self, scope: CellScope) -> Self {
        self.scope = scope;
        self
    }

    /// True if the resolved role is `role`.
    pub fn has_role(&self, role: &str) -> bool {
        self.role.as_deref() == Some(role)
    }
}

/// Row counts per section and column count of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableLayout {
    /// Rows in the header section
    pub header_rows: usize,
    /// Rows in the body section
    pub body_rows: usize,
    /// Rows in the footer section
    pub footer_rows: usize,
    /// Columns
    pub columns: usize,
}

impl TableLayout {
    /// Create a layout.
    pub fn new(header_rows: usize, body_rows: usize, footer_rows: usize, columns: usize) -> Self {
        Self {
            header_rows,
            body_rows,
            footer_rows,
            columns,
        }
    }

    /// Total row count.
    pub fn rows(&self) -> usize {
        self.header_rows + self.body_rows + self.footer_rows
    }

    /// Section of an absolute row and the row index within that section.
    pub fn section_of(&self, row: usize) -> (TableSection, usize) {
        if row < self.header_rows {
            (TableSection::Header, row)
        } else if row < self.header_rows + self.body_rows {
            (TableSection::Body, row - self.header_rows)
        } else {
            (TableSection::Footer, row - self.header_rows - self.body_rows)
        }
    }
}

/// Widest grid a table may span. Wider `ColSpan` layouts are rejected.
pub const MAX_TABLE_COLUMNS: usize = 1_000;

/// Iterates the cells of a `Table` element.
///
/// Rows are taken from `THead` (header), `TBody` or bare `TR` children
/// (body) and `TFoot` (footer). Cells come out header rows first, then body,
/// then footer, each row left to right. Column positions skip slots still
/// covered by a row span from above.
pub struct StructTableIterator {
    layout: TableLayout,
    cells: std::vec::IntoIter<TableCell>,
}

impl StructTableIterator {
    /// Collect the cells of `table`. `resolve` maps a node to its standard role.
    ///
    /// Fails with `Error::InvalidStructure` if the column spans reach past
    /// [`MAX_TABLE_COLUMNS`].
    pub fn new<F>(table: NodeRef<'_>, resolve: F) -> Result<Self>
    where
        F: Fn(NodeRef<'_>) -> Option<String>,
    {
        let mut header = Vec::new();
        let mut body = Vec::new();
        let mut footer = Vec::new();

        for child in table.children() {
            match resolve(child).as_deref() {
                Some("THead") => collect_rows(child, &resolve, &mut header),
                Some("TBody") => collect_rows(child, &resolve, &mut body),
                Some("TFoot") => collect_rows(child, &resolve, &mut footer),
                Some("TR") => body.push(child),
                _ => {},
            }
        }

        let mut cells = Vec::new();
        let mut carry: Vec<usize> = Vec::new();
        let mut columns = 0;

        for (row, tr) in header.iter().chain(body.iter()).chain(footer.iter()).enumerate() {
            let mut col = 0;
            for cell_node in tr.children() {
                let Some(elem) = cell_node.as_elem() else {
                    continue;
                };
                while col < carry.len() && carry[col] > 0 {
                    col += 1;
                }
                let row_span = span_attribute(elem, AttributeKey::RowSpan);
                let col_span = span_attribute(elem, AttributeKey::ColSpan);
                let end = col
                    .checked_add(col_span)
                    .filter(|&end| end <= MAX_TABLE_COLUMNS)
                    .ok_or_else(|| {
                        Error::InvalidStructure(format!(
                            "table {} cell {} spans past {} columns",
                            table.id(),
                            cell_node.id(),
                            MAX_TABLE_COLUMNS
                        ))
                    })?;
                if carry.len() < end {
                    carry.resize(end, 0);
                }
                for slot in &mut carry[col..end] {
                    *slot = row_span;
                }
                cells.push(TableCell {
                    node: Some(cell_node.id()),
                    role: resolve(cell_node),
                    row,
                    col,
                    row_span,
                    col_span,
                    id: elem.id.clone(),
                    headers: elem
                        .attribute(&AttributeKey::Headers, Some(&AttributeOwner::Table))
                        .map(|v| v.to_string_list())
                        .unwrap_or_default(),
                    scope: elem
                        .attribute(&AttributeKey::Scope, Some(&AttributeOwner::Table))
                        .map(|v| v.as_str().map(CellScope::from_pdf_name).unwrap_or(CellScope::None))
                        .unwrap_or(CellScope::Unset),
                });
                col = end;
            }
            columns = columns.max(carry.iter().rposition(|&c| c > 0).map_or(0, |p| p + 1));
            for slot in carry.iter_mut() {
                *slot = slot.saturating_sub(1);
            }
        }

        let layout = TableLayout::new(header.len(), body.len(), footer.len(), columns);
        log::debug!(
            "Table {} layout: {}+{}+{} rows, {} columns, {} cells",
            table.id(),
            layout.header_rows,
            layout.body_rows,
            layout.footer_rows,
            layout.columns,
            cells.len()
        );

        Ok(Self {
            layout,
            cells: cells.into_iter(),
        })
    }

    /// Row and column counts of the table.
    pub fn layout(&self) -> TableLayout {
        self.layout
    }
}

impl Iterator for StructTableIterator {
    type Item = TableCell;

    fn next(&mut self) -> Option<TableCell> {
        self.cells.next()
    }
}

fn collect_rows<'a, F>(group: NodeRef<'a>, resolve: &F, rows: &mut Vec<NodeRef<'a>>)
where
    F: Fn(NodeRef<'_>) -> Option<String>,
{
    rows.extend(group.children().filter(|c| resolve(*c).as_deref() == Some("TR")));
}

fn span_attribute(elem: &StructElem, key: AttributeKey) -> usize {
    elem.attribute(&key, Some(&AttributeOwner::Table))
        .and_then(|v| v.as_integer())
        .map(|n| usize::try_from(n.max(1)).unwrap_or(usize::MAX))
        .unwrap_or(1)
}
