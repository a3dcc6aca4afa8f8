//! Parser for entity class blocks.
//!
//! The parser consumes the tokens following an `@Category` keyword, up to
//! and including the closing `]` of the class body:
//!
//! ```text
//! @PointClass base(Targetname) size(-8 -8 -8, 8 8 8) = info_target : "Help" +
//!     " text" [
//!     health(integer) : "Health" : 100 : "Hit points"
//!     spawnflags(flags) = [ 1 : "Start off" : 0 ]
//!     input Kill(void) : "Removes the entity"
//! ]
//! ```

use fgdkit_foundation::{EntityCategory, HelperKind, Result, SemanticError, ValueType};
use fgdkit_schema::{Choice, EntityDef, FlagBit, FlagEntry, Helper, IoDef, KeyValue, ValueList};
use tracing::trace;

use crate::stream::TokenStream;
use crate::token::TokenKind;

/// Parses one entity block from the token after the `@Category` keyword.
///
/// # Errors
///
/// Returns a syntax error for tokens the grammar does not allow, or a
/// semantic error for unknown helpers and types, bad attribute counts and
/// invalid value lists.
pub fn parse_entity<S: TokenStream>(tokens: &mut S, category: EntityCategory) -> Result<EntityDef> {
    let mut entity = parse_entity_head(tokens, category)?;
    parse_entity_body(tokens, &mut entity)?;
    Ok(entity)
}

/// Parses the header, classname and description of a block, through its
/// opening `[`.
///
/// The returned definition has no members yet. Pass it to
/// [`parse_entity_body`] to read them.
///
/// # Errors
///
/// Returns an error for unknown helpers or a malformed header or title.
pub fn parse_entity_head<S: TokenStream>(tokens: &mut S, category: EntityCategory) -> Result<EntityDef> {
    let mut entity = EntityDef::new(category, String::new());
    let mut parser = EntityParser {
        tokens,
        entity: &mut entity,
    };
    parser.parse_header()?;
    parser.parse_title()?;
    Ok(entity)
}

/// Parses keyvalue and IO lines into `entity`, through the closing `]`.
///
/// Members read before an error stay in `entity`.
///
/// # Errors
///
/// Returns an error for a malformed line or an unterminated body.
pub fn parse_entity_body<S: TokenStream>(tokens: &mut S, entity: &mut EntityDef) -> Result<()> {
    EntityParser {
        tokens,
        entity: &mut *entity,
    }
    .parse_body()?;

    trace!(
        classname = %entity.classname,
        category = %entity.category,
        keyvalues = entity.keyvalues.len(),
        inputs = entity.inputs.len(),
        outputs = entity.outputs.len(),
        "parsed entity"
    );
    Ok(())
}

/// Parser state for a single entity block.
struct EntityParser<'t, 'e, S> {
    /// The token source.
    tokens: &'t mut S,
    /// The definition being built.
    entity: &'e mut EntityDef,
}

impl<S: TokenStream> EntityParser<'_, '_, S> {
    /// Reads `helper(args) helper ...` up to the `=`.
    fn parse_header(&mut self) -> Result<()> {
        let mut pending: Option<HelperKind> = None;
        loop {
            let token = self.tokens.next_token()?;
            match token.kind {
                TokenKind::Newline => {}
                TokenKind::String => {
                    if let Some(kind) = pending.take() {
                        self.push_helper(kind, Vec::new());
                    }
                    let kind = HelperKind::from_keyword(&token.text).ok_or_else(|| {
                        self.tokens
                            .semantic_error(SemanticError::UnknownHelper(token.text.clone()))
                    })?;
                    pending = Some(kind);
                }
                TokenKind::ParenArgs => {
                    let Some(kind) = pending.take() else {
                        return Err(self
                            .tokens
                            .syntax_error(format!("arguments without helper type ({})", token.text)));
                    };
                    let args = split_args(&token.text);
                    if kind == HelperKind::Inherit {
                        for base in &args {
                            self.entity.add_base(base);
                        }
                    } else {
                        self.push_helper(kind, args);
                    }
                }
                TokenKind::Equals => break,
                TokenKind::Eof => return Err(self.tokens.syntax_error("entity header never ended")),
                _ => return Err(self.tokens.unexpected(&token)),
            }
        }
        if let Some(kind) = pending {
            self.push_helper(kind, Vec::new());
        }
        Ok(())
    }

    fn push_helper(&mut self, kind: HelperKind, args: Vec<String>) {
        // A bare `base` inherits from nothing.
        if kind != HelperKind::Inherit {
            self.entity.helpers.push(Helper::new(kind, args));
        }
    }

    /// Reads the classname and optional `: "description" + "..."` up to `[`.
    fn parse_title(&mut self) -> Result<()> {
        self.entity.classname = self.tokens.expect(TokenKind::String)?.trim().to_string();

        let mut description: Option<Vec<String>> = None;
        loop {
            let token = self.tokens.next_token()?;
            match token.kind {
                TokenKind::Newline => {}
                TokenKind::Colon => {
                    if description.is_some() {
                        return Err(self.tokens.syntax_error("two colons in entity description"));
                    }
                    description = Some(Vec::new());
                }
                TokenKind::String => match &mut description {
                    Some(parts) if parts.is_empty() => parts.push(token.text),
                    _ => return Err(self.tokens.unexpected(&token)),
                },
                TokenKind::Plus => match &mut description {
                    Some(parts) if !parts.is_empty() => {
                        let more = self.tokens.expect(TokenKind::String)?;
                        parts.push(more);
                    }
                    _ => return Err(self.tokens.syntax_error("'+' without a string before it")),
                },
                TokenKind::BracketOpen => break,
                _ => return Err(self.tokens.unexpected(&token)),
            }
        }
        if let Some(parts) = description {
            self.entity.description = parts.concat();
        }
        Ok(())
    }

    /// Reads keyvalue and IO lines up to the closing `]`.
    fn parse_body(&mut self) -> Result<()> {
        loop {
            let token = self.tokens.next_token()?;
            let closed = match token.kind {
                TokenKind::BracketClose => return Ok(()),
                TokenKind::Newline => false,
                TokenKind::Eof => {
                    return Err(self.tokens.syntax_error(format!(
                        "body of \"{}\" never ended",
                        self.entity.classname
                    )));
                }
                TokenKind::String => {
                    let folded = token.text.to_lowercase();
                    match folded.as_str() {
                        "input" => self.parse_io(true)?,
                        "output" => self.parse_io(false)?,
                        _ => self.parse_keyvalue(token.text)?,
                    }
                }
                _ => return Err(self.tokens.unexpected(&token)),
            };
            if closed {
                return Ok(());
            }
        }
    }

    /// Reads the `(type)` after a member name.
    fn parse_value_type(&mut self) -> Result<ValueType> {
        let raw = self.tokens.expect(TokenKind::ParenArgs)?;
        let raw = raw.trim();
        ValueType::from_keyword(raw).ok_or_else(|| {
            self.tokens
                .semantic_error(SemanticError::UnknownValueType(raw.to_string()))
        })
    }

    /// Reads `Name(type) : "description"` after `input`/`output`.
    ///
    /// Returns true if the line also closed the body.
    fn parse_io(&mut self, is_input: bool) -> Result<bool> {
        let name = self.tokens.expect(TokenKind::String)?;
        let value_type = self.parse_value_type()?;
        if value_type.has_list() {
            return Err(self
                .tokens
                .semantic_error(SemanticError::ListTypeForIo(value_type)));
        }

        let (mut attrs, end) = read_colon_list(&mut *self.tokens, false)?;
        if end == TokenKind::Equals {
            return Err(self.tokens.syntax_error(format!("unexpected {end}")));
        }
        if attrs.len() > 1 {
            return Err(self
                .tokens
                .semantic_error(SemanticError::TooManyIoAttributes(name)));
        }

        let def = IoDef::new(name, value_type).with_description(attrs.pop().unwrap_or_default());
        if is_input {
            self.entity.insert_input(def);
        } else {
            self.entity.insert_output(def);
        }
        Ok(end == TokenKind::BracketClose)
    }

    /// Reads `name(type) [readonly] : display : default : description`,
    /// plus the `= [ ... ]` list for list-bearing types.
    ///
    /// Returns true if the line also closed the body.
    fn parse_keyvalue(&mut self, name: String) -> Result<bool> {
        let value_type = self.parse_value_type()?;

        let mut readonly = false;
        let token = self.tokens.next_token()?;
        let (attrs, end) = match token.kind {
            TokenKind::String => {
                // `report` and other markers are accepted and ignored.
                readonly = token.text.eq_ignore_ascii_case("readonly");
                read_colon_list(&mut *self.tokens, false)?
            }
            TokenKind::Colon => read_colon_list(&mut *self.tokens, true)?,
            TokenKind::Equals | TokenKind::Newline | TokenKind::BracketClose => {
                (Vec::new(), token.kind)
            }
            _ => return Err(self.tokens.unexpected(&token)),
        };

        let count = attrs.len();
        if count > 3 {
            return Err(self
                .tokens
                .semantic_error(SemanticError::TooManyAttributes { name, count }));
        }
        let mut attrs = attrs.into_iter();
        let display_name = attrs.next().unwrap_or_else(|| name.clone());
        let default = attrs.next().unwrap_or_default();
        let description = attrs.next().unwrap_or_default();

        let mut keyvalue = KeyValue::new(name, value_type)
            .with_display_name(display_name)
            .with_default(default)
            .with_description(description);
        keyvalue.readonly = readonly;

        let closed = if value_type.has_list() {
            if end != TokenKind::Equals {
                return Err(self.tokens.semantic_error(SemanticError::MissingValueList {
                    name: keyvalue.name,
                    value_type,
                }));
            }
            keyvalue.values = Some(self.parse_value_list(&keyvalue.name, value_type)?);
            false
        } else {
            if end == TokenKind::Equals {
                return Err(self.tokens.semantic_error(SemanticError::UnexpectedValueList {
                    name: keyvalue.name,
                    value_type,
                }));
            }
            end == TokenKind::BracketClose
        };

        self.entity.insert_keyvalue(keyvalue);
        Ok(closed)
    }

    /// Reads `[ value : "label" [: default] ... ]`.
    fn parse_value_list(&mut self, key: &str, value_type: ValueType) -> Result<ValueList> {
        self.tokens.expect(TokenKind::BracketOpen)?;

        let mut flags = Vec::new();
        let mut choices = Vec::new();
        loop {
            let token = self.tokens.next_token()?;
            match token.kind {
                TokenKind::Newline => continue,
                TokenKind::BracketClose => break,
                TokenKind::String => {}
                TokenKind::Eof => {
                    return Err(self
                        .tokens
                        .syntax_error(format!("value list of \"{key}\" never ended")));
                }
                _ => return Err(self.tokens.unexpected(&token)),
            }

            let value = token.text;
            let (fields, end) = read_colon_list(&mut *self.tokens, false)?;
            if end == TokenKind::Equals {
                return Err(self.tokens.syntax_error(format!("unexpected {end}")));
            }
            let max_fields = if value_type == ValueType::Flags { 2 } else { 1 };
            if fields.is_empty() {
                return Err(self.tokens.syntax_error(format!(
                    "expected a label for list entry \"{value}\" of \"{key}\""
                )));
            }
            if fields.len() > max_fields {
                return Err(self.tokens.semantic_error(SemanticError::BadListEntry {
                    key: key.to_string(),
                    value,
                    count: fields.len(),
                }));
            }

            let mut fields = fields.into_iter();
            let label = fields.next().unwrap_or_default();
            if value_type == ValueType::Flags {
                let bit = self.parse_flag_bit(&value)?;
                let default = fields.next().is_some_and(|text| flag_default(&text));
                flags.push(FlagEntry::new(bit, label, default));
            } else {
                choices.push(Choice::new(value, label));
            }

            if end == TokenKind::BracketClose {
                break;
            }
        }

        Ok(if value_type == ValueType::Flags {
            ValueList::Flags(flags)
        } else {
            ValueList::Choices(choices)
        })
    }

    fn parse_flag_bit(&self, value: &str) -> Result<FlagBit> {
        let text = value.trim();
        let entity = self.entity.classname.clone();
        match text.parse::<u128>() {
            Ok(number) => FlagBit::from_value(number).ok_or_else(|| {
                self.tokens.semantic_error(SemanticError::FlagNotPowerOfTwo {
                    value: text.to_string(),
                    entity,
                })
            }),
            Err(_) if text.strip_prefix('-').is_some_and(is_digits) => {
                Err(self.tokens.semantic_error(SemanticError::FlagNotPowerOfTwo {
                    value: text.to_string(),
                    entity,
                }))
            }
            Err(_) if is_digits(text.strip_prefix('+').unwrap_or(text)) => {
                Err(self.tokens.semantic_error(SemanticError::FlagOutOfRange {
                    value: text.to_string(),
                    entity,
                }))
            }
            Err(_) => Err(self.tokens.semantic_error(SemanticError::FlagNotInteger {
                value: text.to_string(),
                entity,
            })),
        }
    }
}

/// Reads colon-separated strings up to the end of the line.
///
/// `had_colon` says whether a colon was already consumed. Returns the strings
/// and the kind of the token that ended the list.
fn read_colon_list<S: TokenStream>(tokens: &mut S, had_colon: bool) -> Result<(Vec<String>, TokenKind)> {
    let mut strings: Vec<String> = Vec::new();
    let mut ready = had_colon;
    loop {
        let token = tokens.next_token()?;
        match token.kind {
            TokenKind::String => {
                if !ready {
                    return Err(tokens.syntax_error(format!("too many strings (\"{}\")", token.text)));
                }
                strings.push(token.text);
                ready = false;
            }
            TokenKind::Colon => {
                // `: :` leaves an empty attribute.
                if ready {
                    strings.push(String::new());
                }
                ready = true;
            }
            TokenKind::Plus => {
                let Some(last) = strings.last_mut().filter(|_| !ready) else {
                    return Err(tokens.syntax_error("'+' without a string before it"));
                };
                let more = tokens.expect(TokenKind::String)?;
                last.push_str(&more);
            }
            TokenKind::Newline if ready => {}
            TokenKind::Eof => return Err(tokens.unexpected(&token)),
            kind => {
                if ready {
                    return Err(tokens.unexpected(&token));
                }
                return Ok((strings, kind));
            }
        }
    }
}

/// Splits helper arguments on commas, trimming each.
fn split_args(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    text.split(',').map(|arg| arg.trim().to_string()).collect()
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Whether a flag's default field turns the bit on.
fn flag_default(text: &str) -> bool {
    let text = text.trim();
    match text.parse::<i64>() {
        Ok(number) => number != 0,
        Err(_) => !text.is_empty(),
    }
}
