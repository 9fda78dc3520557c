use crate::compliance::table_matrix::TableResultMatrix;
use crate::compliance::ValidationContext;
use crate::error::Result;
use crate::structure::{NodeRef, StructTableIterator, StructureHandler};

/// Runs the header association check on every `Table` element.
pub struct TableChecker<'a> {
    context: &'a ValidationContext<'a>,
}

impl<'a> TableChecker<'a> {
    /// Create the checker.
    pub fn new(context: &'a ValidationContext<'a>) -> Self {
        Self { context }
    }
}

impl StructureHandler for TableChecker<'_> {
    fn name(&self) -> &'static str {
        "TableChecker"
    }

    fn accept(&self, node: NodeRef<'_>) -> bool {
        self.context.has_role(node, "Table")
    }

    fn process(&mut self, node: NodeRef<'_>) -> Result<()> {
        let context = self.context;
        let cells = StructTableIterator::new(node, |n| context.resolve_role(n))?;
        let layout = cells.layout();
        context.record(|stats| stats.tables_checked += 1);

        TableResultMatrix::new(layout, context.level(), cells).check_valid_table_tagging()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::checkers::test_support::{document, run};
    use crate::compliance::{ConformanceViolation, PdfUaLevel};
    use crate::error::Error;
    use crate::structure::{
        AttributeKey, AttributeOwner, AttributeSet, AttributeValue, NodeId, StructElem,
        StructTreeBuilder, TableSection,
    };

    fn scoped(role: &str, scope: &str) -> StructElem {
        StructElem::new(role).with_attributes(
            AttributeSet::new(AttributeOwner::Table)
                .with(AttributeKey::Scope, AttributeValue::Name(scope.to_string())),
        )
    }

    fn row(b: &mut StructTreeBuilder, parent: NodeId, cells: Vec<StructElem>) {
        let tr = b.add_elem(parent, StructElem::new("TR")).unwrap();
        for cell in cells {
            b.add_elem(tr, cell).unwrap();
        }
    }

    #[test]
    fn test_tagged_table_passes() {
        let mut b = StructTreeBuilder::new();
        let root = b.root();
        let table = b.add_elem(root, StructElem::new("Table")).unwrap();
        let head = b.add_elem(table, StructElem::new("THead")).unwrap();
        let body = b.add_elem(table, StructElem::new("TBody")).unwrap();
        row(&mut b, head, vec![scoped("TH", "Column"), scoped("TH", "Column")]);
        row(&mut b, body, vec![StructElem::new("TD"), StructElem::new("TD")]);
        let doc = document(b.build());

        assert!(run(&doc, PdfUaLevel::Ua1, |c| Box::new(TableChecker::new(c))).is_ok());
    }

    #[test]
    fn test_body_row_reported_relative_to_section() {
        let mut b = StructTreeBuilder::new();
        let root = b.root();
        let table = b.add_elem(root, StructElem::new("Table")).unwrap();
        let head = b.add_elem(table, StructElem::new("THead")).unwrap();
        let body = b.add_elem(table, StructElem::new("TBody")).unwrap();
        row(&mut b, head, vec![StructElem::new("TH"), StructElem::new("TH")]);
        row(&mut b, body, vec![StructElem::new("TD"), StructElem::new("Span")]);
        row(&mut b, body, vec![StructElem::new("TD"), StructElem::new("TD")]);
        let doc = document(b.build());

        let err = run(&doc, PdfUaLevel::Ua1, |c| Box::new(TableChecker::new(c))).unwrap_err();
        match err {
            Error::Conformance(ConformanceViolation::InvalidCellRole { row, col, section, .. }) => {
                assert_eq!((row, col, section), (0, 1, TableSection::Body));
            },
            other => panic!("unexpected error: {other}"),
        }
    }
}
