use crate::tags::{KIND_TAGS, TYPE_TAGS};
use crate::{ExprKind, LitKind, TagRange, TauTag};

#[test]
fn tau_tag_ranges_are_disjoint() {
    for v in 0..=u8::MAX {
        assert!(!(TYPE_TAGS.contains(&v) && KIND_TAGS.contains(&v)));
    }
}

#[test]
fn every_tau_tag_lands_in_its_range() {
    let tags = [
        TauTag::TypeApp,
        TauTag::TypeCon,
        TauTag::TypeVar,
        TauTag::KindApp,
        TauTag::KindType,
        TauTag::KindVar,
        TauTag::KindGen,
    ];
    for tag in tags {
        assert_eq!(TauTag::from_u8(tag as u8), Some(tag));
        match tag.range() {
            TagRange::Type => assert!(TYPE_TAGS.contains(&(tag as u8))),
            TagRange::Kind => assert!(KIND_TAGS.contains(&(tag as u8))),
        }
    }
}

#[test]
fn tau_tag_classification() {
    assert!(TauTag::TypeVar.is_type());
    assert!(!TauTag::TypeVar.is_kind());
    assert!(TauTag::KindGen.is_kind());
    assert_eq!(TauTag::from_u8(3), None);
    assert_eq!(TauTag::from_u8(12), None);
}

#[test]
fn expr_kind_from_u8_is_closed() {
    for v in 0..=11u8 {
        assert_eq!(ExprKind::from_u8(v).map(|k| k as u8), Some(v));
    }
    assert_eq!(ExprKind::from_u8(12), None);
}

#[test]
fn expr_kind_names() {
    assert!(ExprKind::Global.has_name());
    assert!(ExprKind::Field.has_name());
    assert!(!ExprKind::Local.has_name());
    assert_eq!(ExprKind::Placeholder.mnemonic(), "Nop");
}

#[test]
fn lit_kind_zero_is_none() {
    assert_eq!(LitKind::from_u8(LitKind::NONE), None);
    assert_eq!(LitKind::from_u8(4), Some(LitKind::Int));
    assert_eq!(LitKind::from_u8(9), None);
}
