//! Integration tests for value types, categories and helpers

use fgdkit_foundation::{
    CATEGORY_ORDER, EntityCategory, HelperKind, TYPE_ORDER, ValueType, eq_folded, fold_case,
};

#[test]
fn every_type_round_trips_through_its_keyword() {
    for ty in TYPE_ORDER {
        assert_eq!(ValueType::from_keyword(ty.keyword()), Some(ty));
        assert_eq!(ValueType::from_keyword(&ty.keyword().to_uppercase()), Some(ty));
    }
}

#[test]
fn type_synonyms() {
    assert_eq!(ValueType::from_keyword("bool"), Some(ValueType::Bool));
    assert_eq!(ValueType::from_keyword("INT"), Some(ValueType::Int));
    assert_eq!(ValueType::from_keyword("invalidtype"), None);
}

#[test]
fn type_indices_are_dense() {
    for (index, ty) in TYPE_ORDER.iter().enumerate() {
        assert_eq!(usize::from(ty.index()), index);
        assert_eq!(ValueType::from_index(ty.index()), Some(*ty));
    }
    assert!(ValueType::from_index(0x7F).is_none());
}

#[test]
fn only_choices_and_flags_have_lists() {
    let listed: Vec<_> = TYPE_ORDER.iter().filter(|ty| ty.has_list()).collect();
    assert_eq!(listed, [&ValueType::Choices, &ValueType::Flags]);
}

#[test]
fn categories() {
    assert_eq!(CATEGORY_ORDER.len(), 7);
    assert_eq!(EntityCategory::from_keyword("PointClass"), Some(EntityCategory::Point));
    assert_eq!(EntityCategory::from_keyword("NPCClass"), Some(EntityCategory::Npc));
    assert_eq!(EntityCategory::from_keyword("brushclass"), None);
    assert_eq!(EntityCategory::from_index(2), Some(EntityCategory::Solid));
    assert_eq!(EntityCategory::from_index(7), None);
}

#[test]
fn helpers() {
    assert_eq!(HelperKind::from_keyword("studio"), Some(HelperKind::Model));
    assert_eq!(HelperKind::from_keyword("IconSprite"), Some(HelperKind::IconSprite));
    assert_eq!(HelperKind::from_keyword("base"), Some(HelperKind::Inherit));
    assert_eq!(HelperKind::from_keyword("nonsense"), None);
}

#[test]
fn case_folding() {
    assert_eq!(fold_case("Info_Target"), "info_target");
    assert!(eq_folded("SpawnFlags", "spawnflags"));
    assert!(!eq_folded("spawnflags", "spawnflag"));
}
