//! Integration tests for table header association.

use pdf_ua_structure::compliance::{
    CellLocation, ConformanceViolation, PdfUaLevel, PdfUaValidator, TableResultMatrix,
    ValidationTarget,
};
use pdf_ua_structure::config::ValidatorOptions;
use pdf_ua_structure::document::{DocumentInfo, TaggedDocument};
use pdf_ua_structure::structure::{
    AttributeKey, AttributeOwner, AttributeSet, AttributeValue, CellScope, NodeId, RoleMapping,
    StructElem, StructTreeBuilder, TableCell, TableLayout, TableSection,
};
use pdf_ua_structure::Error;

fn table_attrs(entries: Vec<(AttributeKey, AttributeValue)>) -> AttributeSet {
    entries
        .into_iter()
        .fold(AttributeSet::new(AttributeOwner::Table), |set, (k, v)| set.with(k, v))
}

fn th(scope: Option<&str>) -> StructElem {
    match scope {
        Some(scope) => StructElem::new("TH").with_attributes(table_attrs(vec![(
            AttributeKey::Scope,
            AttributeValue::Name(scope.to_string()),
        )])),
        None => StructElem::new("TH"),
    }
}

fn td() -> StructElem {
    StructElem::new("TD")
}

fn add_row(b: &mut StructTreeBuilder, parent: NodeId, cells: Vec<StructElem>) {
    let tr = b.add_elem(parent, StructElem::new("TR")).unwrap();
    for cell in cells {
        b.add_elem(tr, cell).unwrap();
    }
}

fn finish(b: StructTreeBuilder) -> TaggedDocument {
    TaggedDocument::new(DocumentInfo::accessible("en", "Tables"), b.build())
}

fn validate(doc: &TaggedDocument, level: PdfUaLevel) -> pdf_ua_structure::Result<()> {
    PdfUaValidator::new(ValidatorOptions::new(level)).validate(doc, ValidationTarget::Document)
}

fn violation(result: pdf_ua_structure::Result<()>) -> ConformanceViolation {
    match result {
        Err(Error::Conformance(v)) => v,
        other => panic!("expected a conformance violation, got {:?}", other),
    }
}

#[test]
fn test_column_headers_happy_path() {
    let mut b = StructTreeBuilder::new();
    let root = b.root();
    let table = b.add_elem(root, StructElem::new("Table")).unwrap();
    add_row(&mut b, table, vec![th(Some("Column")), th(Some("Column"))]);
    add_row(&mut b, table, vec![td(), td()]);
    let doc = finish(b);

    let validator = PdfUaValidator::default();
    let result = validator.check(&doc).unwrap();
    assert!(result.is_compliant, "{:?}", result.violation);
    assert_eq!(result.stats.tables_checked, 1);
}

#[test]
fn test_missing_cell_is_malformed() {
    let mut b = StructTreeBuilder::new();
    let root = b.root();
    let table = b.add_elem(root, StructElem::new("Table")).unwrap();
    add_row(&mut b, table, vec![th(Some("Column")), th(Some("Column"))]);
    add_row(&mut b, table, vec![td()]);
    let doc = finish(b);

    assert_eq!(
        violation(validate(&doc, PdfUaLevel::Ua1)),
        ConformanceViolation::EmptyTableCell {
            row: 1,
            col: 1,
            section: TableSection::Body,
        }
    );
}

#[test]
fn test_row_span_fills_slot_below() {
    // | TH(row, rowspan 2) | TD |
    // |                    | TD |
    let mut b = StructTreeBuilder::new();
    let root = b.root();
    let table = b.add_elem(root, StructElem::new("Table")).unwrap();
    let spanning = StructElem::new("TH").with_attributes(table_attrs(vec![
        (AttributeKey::Scope, AttributeValue::Name("Row".to_string())),
        (AttributeKey::RowSpan, AttributeValue::Integer(2)),
    ]));
    add_row(&mut b, table, vec![spanning, td()]);
    add_row(&mut b, table, vec![td()]);
    let doc = finish(b);

    assert!(validate(&doc, PdfUaLevel::Ua1).is_ok());
}

#[test]
fn test_defect_in_first_body_row_reported_as_body_row_zero() {
    let mut b = StructTreeBuilder::new();
    let root = b.root();
    let table = b.add_elem(root, StructElem::new("Table")).unwrap();
    let head = b.add_elem(table, StructElem::new("THead")).unwrap();
    let body = b.add_elem(table, StructElem::new("TBody")).unwrap();
    add_row(&mut b, head, vec![th(None), th(None)]);
    add_row(&mut b, body, vec![td(), td()]);
    add_row(&mut b, body, vec![td(), td()]);
    let doc = finish(b);

    let v = violation(validate(&doc, PdfUaLevel::Ua1));
    let message = v.to_string();
    assert!(message.starts_with("Cannot determine the header cell for the following table cells:"));
    assert!(message.contains("Row: 0, Column: 0, Section: Body"));
    assert!(message.contains("Row: 1, Column: 1, Section: Body"));
    assert!(!message.contains("Row: 2"));
    assert_eq!(v.code(), "UA-TBL-004");
}

#[test]
fn test_same_table_passes_at_level_two() {
    let mut b = StructTreeBuilder::new();
    let root = b.root();
    let table = b.add_elem(root, StructElem::new("Table")).unwrap();
    let head = b.add_elem(table, StructElem::new("THead")).unwrap();
    let body = b.add_elem(table, StructElem::new("TBody")).unwrap();
    add_row(&mut b, head, vec![th(None), th(None)]);
    add_row(&mut b, body, vec![td(), td()]);
    add_row(&mut b, body, vec![td(), td()]);
    let doc = finish(b);

    assert!(validate(&doc, PdfUaLevel::Ua2).is_ok());
}

#[test]
fn test_header_ids_resolve_ambiguity() {
    let mut b = StructTreeBuilder::new();
    let root = b.root();
    let table = b.add_elem(root, StructElem::new("Table")).unwrap();
    add_row(
        &mut b,
        table,
        vec![StructElem::new("TD"), StructElem::new("TH").with_id("price")],
    );
    let headers = |ids: &[&str]| {
        td().with_attributes(table_attrs(vec![(
            AttributeKey::Headers,
            AttributeValue::Array(ids.iter().map(|s| AttributeValue::Text(s.to_string())).collect()),
        )]))
    };
    add_row(&mut b, table, vec![headers(&["price"][..]), headers(&["price"][..])]);
    let doc = finish(b);

    // The first-row TD has neither ids nor coverage.
    assert_eq!(
        violation(validate(&doc, PdfUaLevel::Ua2)),
        ConformanceViolation::UndeterminableCellHeader {
            cells: vec![CellLocation {
                row: 0,
                col: 0,
                section: TableSection::Body,
            }],
        }
    );
}

#[test]
fn test_role_mapped_cells() {
    let mut b = StructTreeBuilder::new();
    b.map_role(None, "DataTable", RoleMapping::new("Table")).unwrap();
    b.map_role(None, "Row", RoleMapping::new("TR")).unwrap();
    b.map_role(None, "Head", RoleMapping::new("TH")).unwrap();
    b.map_role(None, "Cell", RoleMapping::new("TD")).unwrap();
    let root = b.root();
    let table = b.add_elem(root, StructElem::new("DataTable")).unwrap();
    for cells in [["Head", "Head"], ["Cell", "Cell"]] {
        let tr = b.add_elem(table, StructElem::new("Row")).unwrap();
        for role in cells {
            let mut elem = StructElem::new(role);
            if role == "Head" {
                elem = elem.with_attributes(table_attrs(vec![(
                    AttributeKey::Scope,
                    AttributeValue::Name("Column".to_string()),
                )]));
            }
            b.add_elem(tr, elem).unwrap();
        }
    }
    let doc = finish(b);

    assert!(validate(&doc, PdfUaLevel::Ua1).is_ok());
}

#[test]
fn test_non_cell_in_row() {
    let mut b = StructTreeBuilder::new();
    let root = b.root();
    let table = b.add_elem(root, StructElem::new("Table")).unwrap();
    add_row(&mut b, table, vec![th(Some("Column")), StructElem::new("P")]);
    let doc = finish(b);

    assert_eq!(
        violation(validate(&doc, PdfUaLevel::Ua1)),
        ConformanceViolation::InvalidCellRole {
            row: 0,
            col: 1,
            section: TableSection::Body,
            role: "P".to_string(),
        }
    );
}

#[test]
fn test_huge_column_span_is_invalid_structure() {
    let mut b = StructTreeBuilder::new();
    let root = b.root();
    let table = b.add_elem(root, StructElem::new("Table")).unwrap();
    let wide = td().with_attributes(table_attrs(vec![(
        AttributeKey::ColSpan,
        AttributeValue::Integer(i64::MAX),
    )]));
    add_row(&mut b, table, vec![td(), wide]);
    let doc = finish(b);

    for level in [PdfUaLevel::Ua1, PdfUaLevel::Ua2] {
        assert!(matches!(validate(&doc, level), Err(Error::InvalidStructure(_))));
    }
    let checked = PdfUaValidator::new(ValidatorOptions::new(PdfUaLevel::Ua2)).check(&doc);
    assert!(matches!(checked, Err(Error::InvalidStructure(_))));
}

#[test]
fn test_matrix_over_hand_built_cells() {
    // Header row with a Both-scoped corner, footer row labelled by a row header.
    let cells = vec![
        TableCell::new("TH", 0, 0).with_scope(CellScope::Both),
        TableCell::new("TH", 0, 1).with_scope(CellScope::Column),
        TableCell::new("TD", 1, 1),
        TableCell::new("TH", 1, 0).with_scope(CellScope::Row),
        TableCell::new("TH", 2, 0).with_scope(CellScope::Row),
        TableCell::new("TD", 2, 1),
    ];
    let layout = TableLayout::new(1, 1, 1, 2);
    assert!(TableResultMatrix::new(layout, PdfUaLevel::Ua1, cells.into_iter())
        .check_valid_table_tagging()
        .is_ok());
}
