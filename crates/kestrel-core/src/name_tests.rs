use crate::{NameKind, QName};

#[test]
fn name_kind_from_u8_is_closed() {
    for v in 0..=4u8 {
        assert_eq!(NameKind::from_u8(v).map(|k| k as u8), Some(v));
    }
    assert_eq!(NameKind::from_u8(5), None);
    assert_eq!(NameKind::from_u8(255), None);
}

#[test]
fn display_qualifies_with_package() {
    assert_eq!(QName::ty("kestrel.Prelude", "Maybe").to_string(), "kestrel.Prelude.Maybe");
    assert_eq!(QName::ty("", "->").to_string(), "->");
    assert_eq!(
        QName::member("kestrel.Prelude", "Eq", "==").to_string(),
        "kestrel.Prelude.Eq.=="
    );
}

#[test]
fn short_prefers_member() {
    assert_eq!(QName::value("p", "map").short(), "map");
    assert_eq!(QName::member("p", "Show", "show").short(), "show");
}

#[test]
fn well_formedness_ties_member_to_kind() {
    assert!(QName::class("p", "Eq").is_well_formed());
    assert!(QName::member("p", "Eq", "==").is_well_formed());

    let mut broken = QName::value("p", "x");
    broken.member = Some("y".into());
    assert!(!broken.is_well_formed());

    let mut memberless = QName::member("p", "Eq", "==");
    memberless.member = None;
    assert!(!memberless.is_well_formed());
}

#[test]
fn well_formedness_rejects_empty_parts() {
    assert!(QName::ty("", "->").is_well_formed());
    assert!(!QName::value("p", "").is_well_formed());
    assert!(!QName::member("p", "Eq", "").is_well_formed());
    assert!(!QName::member("p", "", "==").is_well_formed());
}

#[test]
fn ordering_is_total_and_kind_first() {
    let a = QName::ty("p", "Z");
    let b = QName::value("p", "A");

    assert!(a < b);
}
