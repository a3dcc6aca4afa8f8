//! The entity definition registry.

use fgdkit_foundation::{Error, Result, SemanticError, fold_case};
use indexmap::{IndexMap, IndexSet};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::entity::{BaseRef, EntityDef, EntityId};
use crate::view::EntityRef;

/// A set of entity definitions for a game, possibly read from many files.
///
/// Classes are keyed by folded classname. Entities are only ever added or
/// redefined in place, so an [`EntityId`] stays valid for the registry's
/// lifetime.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fgd {
    entities: IndexMap<String, EntityDef>,
    /// Lower map bound from `@mapsize`.
    pub map_size_min: i64,
    /// Upper map bound from `@mapsize`.
    pub map_size_max: i64,
    included: IndexSet<String>,
}

impl Fgd {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a definition, replacing any class with the same folded name.
    ///
    /// A replaced class keeps its id, so links to it stay valid.
    pub fn insert(&mut self, entity: EntityDef) -> EntityId {
        let key = fold_case(&entity.classname);
        let (index, _) = self.entities.insert_full(key, entity);
        to_id(index)
    }

    /// Adds a definition like [`insert`](Self::insert) and returns the stored
    /// copy so the caller can keep filling it in.
    pub fn insert_mut(&mut self, entity: EntityDef) -> &mut EntityDef {
        let key = fold_case(&entity.classname);
        let (index, _) = self.entities.insert_full(key, entity);
        &mut self.entities[index]
    }

    /// Looks up a class by name, ignoring case.
    #[must_use]
    pub fn get(&self, classname: &str) -> Option<EntityRef<'_>> {
        self.id_of(classname).and_then(|id| self.entity(id))
    }

    /// Returns the id of a class, ignoring case.
    #[must_use]
    pub fn id_of(&self, classname: &str) -> Option<EntityId> {
        self.entities.get_index_of(&fold_case(classname)).map(to_id)
    }

    /// Returns the entity with the given id.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<EntityRef<'_>> {
        self.def(id).map(|def| EntityRef::new(self, id, def))
    }

    /// Returns the raw definition with the given id.
    #[must_use]
    pub fn def(&self, id: EntityId) -> Option<&EntityDef> {
        self.entities.get_index(id.0 as usize).map(|(_, def)| def)
    }

    /// Returns the raw definition of a class for modification.
    pub fn def_mut(&mut self, classname: &str) -> Option<&mut EntityDef> {
        self.entities.get_mut(&fold_case(classname))
    }

    /// Returns true if a class with this name exists.
    #[must_use]
    pub fn contains(&self, classname: &str) -> bool {
        self.entities.contains_key(&fold_case(classname))
    }

    /// Iterates over every class in definition order.
    pub fn iter(&self) -> impl Iterator<Item = EntityRef<'_>> {
        self.entities
            .values()
            .enumerate()
            .map(move |(index, def)| EntityRef::new(self, to_id(index), def))
    }

    /// Returns the number of classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if no classes are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Sets both map bounds.
    pub fn set_map_size(&mut self, min: i64, max: i64) {
        self.map_size_min = min;
        self.map_size_max = max;
    }

    /// Records that a file is being consumed.
    ///
    /// Returns false if the file was already seen, in which case it must be
    /// skipped.
    pub fn begin_file(&mut self, identity: impl Into<String>) -> bool {
        self.included.insert(identity.into())
    }

    /// Returns true if a file with this identity was already consumed.
    #[must_use]
    pub fn has_file(&self, identity: &str) -> bool {
        self.included.contains(identity)
    }

    /// Returns the identities of every file consumed so far.
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.included.iter().map(String::as_str)
    }

    /// Links every by-name base to the entity it names.
    ///
    /// Already linked bases are kept as they are, so running this again
    /// after adding more classes is harmless.
    ///
    /// # Errors
    ///
    /// Returns [`SemanticError::UnknownBase`] if a base names a class that
    /// does not exist.
    pub fn resolve_bases(&mut self) -> Result<()> {
        let mut linked = 0usize;
        for index in 0..self.entities.len() {
            let resolved = {
                let Some((_, def)) = self.entities.get_index(index) else {
                    continue;
                };
                if def.bases.iter().all(BaseRef::is_resolved) {
                    continue;
                }
                def.bases
                    .iter()
                    .map(|base| match base {
                        BaseRef::Resolved(id) => Ok(BaseRef::Resolved(*id)),
                        BaseRef::Unresolved(name) => {
                            linked += 1;
                            self.id_of(name).map(BaseRef::Resolved).ok_or_else(|| {
                                Error::semantic(SemanticError::UnknownBase {
                                    base: name.clone(),
                                    entity: def.classname.clone(),
                                })
                            })
                        }
                    })
                    .collect::<Result<Vec<_>>>()?
            };
            if let Some((_, def)) = self.entities.get_index_mut(index) {
                def.bases = resolved;
            }
        }
        debug!(entities = self.entities.len(), linked, "resolved base classes");
        Ok(())
    }
}

#[allow(clippy::cast_possible_truncation)]
fn to_id(index: usize) -> EntityId {
    EntityId(index as u32)
}
