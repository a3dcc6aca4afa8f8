//! Integration tests for the entity registry

use fgdkit_foundation::{EntityCategory, ValueType};
use fgdkit_schema::{Choice, EntityDef, Fgd, FlagBit, FlagEntry, KeyValue, ValueList};

fn point(classname: &str) -> EntityDef {
    EntityDef::new(EntityCategory::Point, classname)
}

#[test]
fn lookup_ignores_case() {
    let mut fgd = Fgd::new();
    fgd.insert(point("Info_Player_Start"));

    assert!(fgd.contains("info_player_start"));
    assert!(fgd.contains("INFO_PLAYER_START"));
    let ent = fgd.get("info_PLAYER_start").unwrap();
    assert_eq!(ent.classname(), "Info_Player_Start");
}

#[test]
fn redefinition_keeps_id_and_order() {
    let mut fgd = Fgd::new();
    let first = fgd.insert(point("a"));
    fgd.insert(point("b"));
    let mut replacement = point("A");
    replacement.description = "second".into();
    let again = fgd.insert(replacement);

    assert_eq!(first, again);
    assert_eq!(fgd.len(), 2);
    let names: Vec<_> = fgd.iter().map(|ent| ent.classname().to_string()).collect();
    assert_eq!(names, ["A", "b"]);
    assert_eq!(fgd.get("a").unwrap().description(), "second");
}

#[test]
fn keyvalue_names_fold() {
    let mut ent = point("light");
    ent.insert_keyvalue(KeyValue::new("Brightness", ValueType::Color255));
    ent.insert_keyvalue(KeyValue::new("brightness", ValueType::String));
    assert_eq!(ent.keyvalues.len(), 1);
    assert_eq!(ent.keyvalues["brightness"].value_type, ValueType::String);
}

#[test]
fn flag_defaults_combine() {
    let kv = KeyValue::new("spawnflags", ValueType::Flags)
        .with_flag(FlagEntry::new(FlagBit::from_value(1).unwrap(), "A", true))
        .with_flag(FlagEntry::new(FlagBit::from_value(4).unwrap(), "B", false))
        .with_flag(FlagEntry::new(FlagBit::from_value(8).unwrap(), "C", true));
    assert_eq!(kv.default_flags(), 9);
    assert_eq!(kv.flags().len(), 3);
    assert!(kv.choices().is_empty());
}

#[test]
fn flag_bits() {
    assert_eq!(FlagBit::from_value(1 << 40).unwrap().power(), 40);
    assert!(FlagBit::from_value(3).is_none());
    assert!(FlagBit::from_value(0).is_none());
    assert_eq!(FlagBit::from_power(127).unwrap().value(), 1u128 << 127);
    assert!(FlagBit::from_power(128).is_none());
}

#[test]
fn choices_keep_order() {
    let kv = KeyValue::new("skin", ValueType::Choices)
        .with_choice(Choice::new("1", "One"))
        .with_choice(Choice::new("0", "Zero"));
    let values: Vec<_> = kv.choices().iter().map(|c| c.value.as_str()).collect();
    assert_eq!(values, ["1", "0"]);
    assert_eq!(ValueList::empty_for(ValueType::String), None);
}

#[test]
fn include_identities() {
    let mut fgd = Fgd::new();
    assert!(fgd.begin_file("base.fgd"));
    assert!(!fgd.begin_file("base.fgd"));
    assert!(fgd.has_file("base.fgd"));
    assert!(!fgd.has_file("other.fgd"));
    assert_eq!(fgd.files().collect::<Vec<_>>(), ["base.fgd"]);
}
