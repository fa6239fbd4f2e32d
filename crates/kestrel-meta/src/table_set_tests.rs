use kestrel_core::QName;

use crate::{
    ExprId, ExprRecord, Interface, NameId, NameRecord, RhoId, RhoRecord, SigmaId, SigmaRecord,
    StructuralError, Table, TableSet, TauId, TauRecord,
};

fn identity() -> TableSet {
    TableSet {
        taus: vec![TauRecord::kind_type(), TauRecord::var("a", TauId(0))],
        rhos: vec![
            RhoRecord::tau(vec![], TauId(1)),
            RhoRecord::fun(vec![], SigmaId(0), RhoId(0)),
        ],
        sigmas: vec![
            SigmaRecord::new(vec![], vec![], RhoId(0)),
            SigmaRecord::new(vec!["a".into()], vec![TauId(0)], RhoId(1)),
        ],
        contexts: vec![],
        exprs: vec![ExprRecord::DEFAULT],
        names: vec![NameRecord::from_qname(&QName::value("p", "id"))],
    }
}

#[test]
fn accessors_return_records_in_bounds() {
    let tables = identity();
    assert_eq!(tables.tau(TauId(1)), Ok(&TauRecord::var("a", TauId(0))));
    assert_eq!(tables.rho(RhoId(0)), Ok(&RhoRecord::tau(vec![], TauId(1))));
    assert!(tables.sigma(SigmaId(1)).is_ok());
    assert_eq!(tables.expr(ExprId::PLACEHOLDER), Ok(&ExprRecord::DEFAULT));
    assert!(tables.name(NameId(0)).is_ok());
}

#[test]
fn accessors_report_table_and_length() {
    let tables = identity();
    assert_eq!(
        tables.tau(TauId(2)),
        Err(StructuralError::IndexOutOfBounds {
            table: Table::Tau,
            index: 2,
            len: 2
        })
    );
    assert_eq!(
        tables.context(crate::ContextId(0)),
        Err(StructuralError::IndexOutOfBounds {
            table: Table::Context,
            index: 0,
            len: 0
        })
    );
    assert!(matches!(
        tables.name(NameId(u32::MAX)),
        Err(StructuralError::IndexOutOfBounds {
            table: Table::Name,
            ..
        })
    ));
}

#[test]
fn record_count_sums_all_tables() {
    let tables = identity();
    assert_eq!(tables.record_count(), 8);
    assert!(!tables.is_empty());
    assert!(TableSet::new().is_empty());

    let interface = Interface::new(tables, vec![]);
    assert_eq!(interface.record_count(), 8);
}

#[test]
fn out_of_bounds_error_message() {
    let err = TableSet::new().rho(RhoId(3)).unwrap_err();
    insta::assert_snapshot!(err, @"rho index 3 out of bounds (table has 0 records)");
}
