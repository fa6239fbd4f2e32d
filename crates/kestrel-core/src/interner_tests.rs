use crate::{Interner, Symbol};

#[test]
fn new_interner_holds_empty_string() {
    let interner = Interner::new();

    assert_eq!(interner.len(), 1);
    assert!(interner.is_empty());
    assert_eq!(interner.resolve(Symbol::EMPTY), "");
}

#[test]
fn intern_deduplicates() {
    let mut interner = Interner::new();

    let a = interner.intern("Maybe");
    let b = interner.intern("Maybe");
    let c = interner.intern("Either");

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(interner.len(), 3);
}

#[test]
fn interning_empty_string_returns_reserved_symbol() {
    let mut interner = Interner::new();

    assert_eq!(interner.intern(""), Symbol::EMPTY);
    assert_eq!(interner.len(), 1);
}

#[test]
fn get_does_not_insert() {
    let mut interner = Interner::new();
    let sym = interner.intern("a");

    assert_eq!(interner.get("a"), Some(sym));
    assert_eq!(interner.get("b"), None);
    assert_eq!(interner.len(), 2);
}

#[test]
fn symbol_ordering_is_insertion_order() {
    let mut interner = Interner::new();

    let z = interner.intern("z");
    let a = interner.intern("a");

    assert!(z < a);
}

#[test]
fn try_resolve_out_of_range() {
    let interner = Interner::new();

    assert_eq!(interner.try_resolve(Symbol::from_raw(7)), None);
}

#[test]
fn to_blob_includes_empty_string_first() {
    let mut interner = Interner::new();
    interner.intern("id");
    interner.intern("foo");

    let (blob, offsets) = interner.to_blob();

    assert_eq!(blob, b"idfoo");
    assert_eq!(offsets, vec![0, 0, 2, 5]);
}

#[test]
fn iter_yields_all_strings() {
    let mut interner = Interner::new();
    let a = interner.intern("alpha");
    let b = interner.intern("beta");

    let items: Vec<_> = interner.iter().collect();
    assert_eq!(items, vec![(Symbol::EMPTY, ""), (a, "alpha"), (b, "beta")]);
}
