//! Integration tests for encode and decode

use fgdkit_binary::{FORMAT_VERSION, MAGIC, decode, encode};
use fgdkit_foundation::{CapacityError, EntityCategory, ErrorKind, FormatError};
use fgdkit_language::parse_str;
use fgdkit_schema::{EntityDef, Fgd};

const SOURCE: &str = r#"
@mapsize(-16384, 16384)
@BaseClass = Targetname [
    targetname(target_source) : "Name" : : "The name other entities use"
    input Kill(void) : "Removes the entity"
]
@PointClass base(Targetname) iconsprite("editor/info_target.vmt") = info_target : "A generic target"
[
    health(integer) readonly : "Health" : 100 : "Hit points"
    spawnflags(flags) =
    [
        1 : "Start disabled" : 0
        2 : "Fancy" : 1
    ]
    skin(choices) : "Skin" : 1 : "Which skin" =
    [
        0 : "Plain"
        1 : "Striped"
    ]
    output OnUser1(void) : "Fired on input"
]
"#;

#[test]
fn header_starts_with_magic_and_version() {
    let bytes = encode(&parse_str(SOURCE).unwrap()).unwrap();
    assert_eq!(&bytes[..3], MAGIC);
    assert_eq!(bytes[3], FORMAT_VERSION);
    assert_eq!(&bytes[4..12], &(-16384.0f64).to_be_bytes());
    assert_eq!(&bytes[12..20], &16384.0f64.to_be_bytes());
    assert_eq!(&bytes[20..24], &[0, 0, 0, 2]);
}

#[test]
fn round_trip_keeps_structure_and_drops_descriptions() {
    let original = parse_str(SOURCE).unwrap();
    let decoded = decode(&encode(&original).unwrap()).unwrap();

    assert_eq!(decoded.len(), original.len());
    assert_eq!((decoded.map_size_min, decoded.map_size_max), (-16384, 16384));

    for before in original.iter() {
        let after = decoded.get(before.classname()).unwrap();
        assert_eq!(after.category(), before.category());
        assert_eq!(after.base_names(), before.base_names());
        assert_eq!(after.description(), "");
        assert!(after.helpers().is_empty());

        let own_before = &before.def().keyvalues;
        let own_after = &after.def().keyvalues;
        assert_eq!(own_before.len(), own_after.len());
        for (key, kv) in own_before {
            let got = &own_after[key];
            assert_eq!(got.name, kv.name);
            assert_eq!(got.value_type, kv.value_type);
            assert_eq!(got.display_name, kv.display_name);
            assert_eq!(got.readonly, kv.readonly);
            assert_eq!(got.values, kv.values);
            assert_eq!(got.description, "");
        }
        for (key, io) in &before.def().inputs {
            assert_eq!(after.def().inputs[key].value_type, io.value_type);
            assert_eq!(after.def().inputs[key].description, "");
        }
        for (key, io) in &before.def().outputs {
            assert_eq!(after.def().outputs[key].name, io.name);
        }
    }

    let target = decoded.get("info_target").unwrap();
    assert_eq!(target.keyvalues().get("health").unwrap().default, "100");
    assert!(target.keyvalues().get("health").unwrap().readonly);
    assert_eq!(target.keyvalues().get("skin").unwrap().default, "1");
    assert!(target.is_a("targetname"));
    assert!(target.inputs().contains("kill"));
}

#[test]
fn empty_database() {
    let bytes = encode(&Fgd::new()).unwrap();
    assert_eq!(bytes.len(), 3 + 1 + 8 + 8 + 4 + 4);
    assert!(decode(&bytes).unwrap().is_empty());
}

#[test]
fn wrong_magic() {
    let mut bytes = encode(&Fgd::new()).unwrap();
    bytes[0] = b'X';
    assert_eq!(decode(&bytes).unwrap_err().kind, ErrorKind::Format(FormatError::BadMagic));
    assert_eq!(decode(b"").unwrap_err().kind, ErrorKind::Format(FormatError::BadMagic));
}

#[test]
fn future_version() {
    let mut bytes = encode(&Fgd::new()).unwrap();
    bytes[3] = FORMAT_VERSION + 1;
    assert_eq!(
        decode(&bytes).unwrap_err().kind,
        ErrorKind::Format(FormatError::UnknownVersion(FORMAT_VERSION + 1))
    );
}

#[test]
fn truncated_body() {
    let bytes = encode(&parse_str(SOURCE).unwrap()).unwrap();
    for len in [10, 30, bytes.len() - 1] {
        let err = decode(&bytes[..len]).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Format(_)), "length {len}");
    }
}

#[test]
fn dictionary_overflow() {
    let mut fgd = Fgd::new();
    // One more distinct classname than a 16-bit id can address.
    for i in 0..=usize::from(u16::MAX) + 1 {
        fgd.insert(EntityDef::new(EntityCategory::Point, format!("ent_{i}")));
    }
    let err = encode(&fgd).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::Capacity(CapacityError::DictionaryOverflow { .. })
    ));
}
