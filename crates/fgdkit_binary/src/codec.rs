//! Encoding and decoding of whole databases.
//!
//! Layout, all integers big-endian:
//!
//! ```text
//! file      := "FGD" version:u8 map_min:f64 map_max:f64 entity_count:u32
//!              dictionary entity*
//! entity    := category:u8 base_count:u8 kv_count:u8 in_count:u8 out_count:u8
//!              classname:id base:id* keyvalue* input* output*
//! keyvalue  := name:id display:id type:u8   (0x80 = readonly)
//!              flags   -> count:u8 (power:u8 (0x80 = default on), label:id)*
//!              other   -> default:id
//!              choices -> default:id count:u16 (value:id label:id)*
//! io        := name:id type:u8
//! ```
//!
//! Descriptions and helpers are not stored.

use fgdkit_foundation::{
    CapacityError, EntityCategory, Error, FormatError, Result, SemanticError, ValueType,
};
use fgdkit_schema::{
    BaseRef, Choice, EntityDef, EntityRef, Fgd, FlagBit, FlagEntry, IoDef, KeyValue, ValueList,
};
use tracing::debug;

use crate::dictionary::{DictionaryReader, StringDictionary};
use crate::reader::Reader;

/// Leading bytes of every encoded file.
pub const MAGIC: &[u8; 3] = b"FGD";

/// Newest format version this crate reads and the one it writes.
pub const FORMAT_VERSION: u8 = 1;

const READONLY_BIT: u8 = 0x80;
const FLAG_DEFAULT_BIT: u8 = 0x80;
const LOW_BITS: u8 = 0x7F;

/// Encodes a database.
///
/// # Errors
///
/// Returns a [`CapacityError`] when a count or the string table outgrows its
/// field, or [`SemanticError::ListTypeForIo`] for an input or output with a
/// list-bearing type.
pub fn encode(fgd: &Fgd) -> Result<Vec<u8>> {
    let mut dict = StringDictionary::new();
    let mut body = Vec::new();
    for entity in fgd.iter() {
        encode_entity(fgd, entity, &mut dict, &mut body)?;
    }

    let entity_count = u32::try_from(fgd.len()).map_err(|_| {
        too_many("entity", fgd.len(), u32::MAX as usize, "")
    })?;

    let mut out = Vec::with_capacity(24 + body.len());
    out.extend_from_slice(MAGIC);
    out.push(FORMAT_VERSION);
    out.extend_from_slice(&map_bound(fgd.map_size_min).to_be_bytes());
    out.extend_from_slice(&map_bound(fgd.map_size_max).to_be_bytes());
    out.extend_from_slice(&entity_count.to_be_bytes());
    dict.serialize(&mut out)?;
    out.extend_from_slice(&body);

    debug!(
        entities = fgd.len(),
        strings = dict.len(),
        bytes = out.len(),
        "encoded database"
    );
    Ok(out)
}

/// Decodes a database and links its base classes.
///
/// Every description is empty and every helper list is empty.
///
/// # Errors
///
/// Returns a [`FormatError`] for malformed input, or
/// [`SemanticError::UnknownBase`] if a base names a class not in the data.
pub fn decode(data: &[u8]) -> Result<Fgd> {
    let mut reader = Reader::new(data);
    if reader.take(MAGIC.len()).ok() != Some(MAGIC.as_slice()) {
        return Err(Error::format(FormatError::BadMagic));
    }
    let version = reader.read_u8()?;
    if version > FORMAT_VERSION {
        return Err(Error::format(FormatError::UnknownVersion(version)));
    }

    let mut fgd = Fgd::new();
    let min = reader.read_f64()?;
    let max = reader.read_f64()?;
    fgd.set_map_size(map_bound_from(min), map_bound_from(max));

    let entity_count = reader.read_u32()?;
    let dict = DictionaryReader::read(&mut reader)?;
    for _ in 0..entity_count {
        let entity = decode_entity(&mut reader, &dict)?;
        fgd.insert(entity);
    }
    fgd.resolve_bases()?;

    debug!(
        entities = fgd.len(),
        strings = dict.len(),
        bytes = data.len(),
        "decoded database"
    );
    Ok(fgd)
}

fn encode_entity(
    fgd: &Fgd,
    entity: EntityRef<'_>,
    dict: &mut StringDictionary,
    out: &mut Vec<u8>,
) -> Result<()> {
    let def = entity.def();
    let name = &def.classname;

    out.push(def.category.index());
    out.push(count_u8("base", def.bases.len(), name)?);
    out.push(count_u8("keyvalue", def.keyvalues.len(), name)?);
    out.push(count_u8("input", def.inputs.len(), name)?);
    out.push(count_u8("output", def.outputs.len(), name)?);

    put_string(dict, out, name)?;
    for base in &def.bases {
        let base_name = match base {
            BaseRef::Resolved(id) => fgd
                .def(*id)
                .map(|base| base.classname.as_str())
                .ok_or_else(|| {
                    Error::semantic(SemanticError::DanglingBase {
                        id: id.index(),
                        entity: name.clone(),
                    })
                })?,
            BaseRef::Unresolved(base_name) => base_name.as_str(),
        };
        put_string(dict, out, base_name)?;
    }

    for keyvalue in def.keyvalues.values() {
        encode_keyvalue(keyvalue, name, dict, out)?;
    }
    for io in def.inputs.values().chain(def.outputs.values()) {
        encode_io(io, dict, out)?;
    }
    Ok(())
}

fn encode_keyvalue(
    keyvalue: &KeyValue,
    entity: &str,
    dict: &mut StringDictionary,
    out: &mut Vec<u8>,
) -> Result<()> {
    put_string(dict, out, &keyvalue.name)?;
    put_string(dict, out, &keyvalue.display_name)?;

    let mut type_byte = keyvalue.value_type.index() & LOW_BITS;
    if keyvalue.readonly {
        type_byte |= READONLY_BIT;
    }
    out.push(type_byte);

    match keyvalue.value_type {
        ValueType::Flags => {
            let flags = keyvalue.flags();
            out.push(count_u8("flag", flags.len(), entity)?);
            for flag in flags {
                let mut power = flag.bit.power() & LOW_BITS;
                if flag.default {
                    power |= FLAG_DEFAULT_BIT;
                }
                out.push(power);
                put_string(dict, out, &flag.label)?;
            }
        }
        ValueType::Choices => {
            put_string(dict, out, &keyvalue.default)?;
            let choices = keyvalue.choices();
            let count = u16::try_from(choices.len())
                .map_err(|_| too_many("choice", choices.len(), u16::MAX as usize, entity))?;
            out.extend_from_slice(&count.to_be_bytes());
            for choice in choices {
                put_string(dict, out, &choice.value)?;
                put_string(dict, out, &choice.label)?;
            }
        }
        _ => put_string(dict, out, &keyvalue.default)?,
    }
    Ok(())
}

fn encode_io(io: &IoDef, dict: &mut StringDictionary, out: &mut Vec<u8>) -> Result<()> {
    if io.value_type.has_list() {
        return Err(Error::semantic(SemanticError::ListTypeForIo(io.value_type)));
    }
    put_string(dict, out, &io.name)?;
    out.push(io.value_type.index());
    Ok(())
}

fn decode_entity(reader: &mut Reader<'_>, dict: &DictionaryReader) -> Result<EntityDef> {
    let category_index = reader.read_u8()?;
    let category = EntityCategory::from_index(category_index)
        .ok_or_else(|| Error::format(FormatError::InvalidCategory(category_index)))?;
    let base_count = reader.read_u8()?;
    let keyvalue_count = reader.read_u8()?;
    let input_count = reader.read_u8()?;
    let output_count = reader.read_u8()?;

    let mut entity = EntityDef::new(category, dict.read_string(reader)?);
    for _ in 0..base_count {
        entity.add_base(dict.lookup(reader.read_u16()?)?);
    }
    for _ in 0..keyvalue_count {
        entity.insert_keyvalue(decode_keyvalue(reader, dict)?);
    }
    for _ in 0..input_count {
        entity.insert_input(decode_io(reader, dict)?);
    }
    for _ in 0..output_count {
        entity.insert_output(decode_io(reader, dict)?);
    }
    Ok(entity)
}

fn decode_keyvalue(reader: &mut Reader<'_>, dict: &DictionaryReader) -> Result<KeyValue> {
    let name = dict.read_string(reader)?;
    let display_name = dict.read_string(reader)?;
    let type_byte = reader.read_u8()?;
    let value_type = decode_value_type(type_byte & LOW_BITS)?;

    let mut keyvalue = KeyValue::new(name, value_type).with_display_name(display_name);
    keyvalue.readonly = type_byte & READONLY_BIT != 0;

    match value_type {
        ValueType::Flags => {
            let count = reader.read_u8()?;
            let mut flags = Vec::with_capacity(usize::from(count));
            for _ in 0..count {
                let packed = reader.read_u8()?;
                let label = dict.read_string(reader)?;
                let power = packed & LOW_BITS;
                let bit = FlagBit::from_power(power)
                    .ok_or_else(|| Error::format(FormatError::InvalidFlagPower(power)))?;
                flags.push(FlagEntry::new(bit, label, packed & FLAG_DEFAULT_BIT != 0));
            }
            keyvalue.values = Some(ValueList::Flags(flags));
        }
        ValueType::Choices => {
            keyvalue.default = dict.read_string(reader)?;
            let count = reader.read_u16()?;
            let mut choices = Vec::new();
            for _ in 0..count {
                let value = dict.read_string(reader)?;
                let label = dict.read_string(reader)?;
                choices.push(Choice::new(value, label));
            }
            keyvalue.values = Some(ValueList::Choices(choices));
        }
        _ => keyvalue.default = dict.read_string(reader)?,
    }
    Ok(keyvalue)
}

fn decode_io(reader: &mut Reader<'_>, dict: &DictionaryReader) -> Result<IoDef> {
    let name = dict.read_string(reader)?;
    let value_type = decode_value_type(reader.read_u8()?)?;
    if value_type.has_list() {
        return Err(Error::format(FormatError::ListTypeForIo(value_type)));
    }
    Ok(IoDef::new(name, value_type))
}

fn decode_value_type(index: u8) -> Result<ValueType> {
    ValueType::from_index(index).ok_or_else(|| Error::format(FormatError::InvalidValueType(index)))
}

fn put_string(dict: &mut StringDictionary, out: &mut Vec<u8>, text: &str) -> Result<()> {
    let id = dict.index_of(text)?;
    out.extend_from_slice(&id.to_be_bytes());
    Ok(())
}

fn count_u8(what: &'static str, count: usize, entity: &str) -> Result<u8> {
    u8::try_from(count).map_err(|_| too_many(what, count, u8::MAX as usize, entity))
}

fn too_many(what: &'static str, count: usize, limit: usize, entity: &str) -> Error {
    Error::capacity(CapacityError::TooManyItems {
        what,
        count,
        limit,
        entity: entity.to_string(),
    })
}

/// Map bounds are stored as doubles.
#[allow(clippy::cast_precision_loss)]
fn map_bound(value: i64) -> f64 {
    value as f64
}

#[allow(clippy::cast_possible_truncation)]
fn map_bound_from(value: f64) -> i64 {
    value as i64
}
