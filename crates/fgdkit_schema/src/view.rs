//! Read-only views that merge an entity with everything it inherits.
//!
//! Lookups check the entity's own map first, then each base depth-first
//! in declaration order. Each class is visited at most once per walk, so a
//! cyclic base chain terminates instead of recursing forever.

use std::collections::HashSet;

use fgdkit_foundation::{EntityCategory, fold_case};
use indexmap::IndexMap;

use crate::entity::{BaseRef, EntityDef, EntityId, Helper};
use crate::fgd::Fgd;
use crate::io::IoDef;
use crate::keyvalue::KeyValue;

/// A borrowed entity together with the registry it lives in.
#[derive(Clone, Copy)]
pub struct EntityRef<'a> {
    fgd: &'a Fgd,
    id: EntityId,
    def: &'a EntityDef,
}

impl<'a> EntityRef<'a> {
    pub(crate) fn new(fgd: &'a Fgd, id: EntityId, def: &'a EntityDef) -> Self {
        Self { fgd, id, def }
    }

    /// Returns the entity's id.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Returns the raw definition, without inherited members.
    #[must_use]
    pub const fn def(&self) -> &'a EntityDef {
        self.def
    }

    /// Returns the classname as written in the source.
    #[must_use]
    pub fn classname(&self) -> &'a str {
        &self.def.classname
    }

    /// Returns the entity category.
    #[must_use]
    pub const fn category(&self) -> EntityCategory {
        self.def.category
    }

    /// Returns the help text.
    #[must_use]
    pub fn description(&self) -> &'a str {
        &self.def.description
    }

    /// Returns the header helpers.
    #[must_use]
    pub fn helpers(&self) -> &'a [Helper] {
        &self.def.helpers
    }

    /// Iterates over the directly inherited classes that have been linked.
    pub fn bases(&self) -> impl Iterator<Item = EntityRef<'a>> + use<'a> {
        let fgd = self.fgd;
        self.def.bases.iter().filter_map(move |base| match base {
            BaseRef::Resolved(id) => fgd.entity(*id),
            BaseRef::Unresolved(_) => None,
        })
    }

    /// Returns the names of the direct bases, linked or not.
    #[must_use]
    pub fn base_names(&self) -> Vec<&'a str> {
        self.def
            .bases
            .iter()
            .filter_map(|base| match base {
                BaseRef::Resolved(id) => self.fgd.def(*id).map(|def| def.classname.as_str()),
                BaseRef::Unresolved(name) => Some(name.as_str()),
            })
            .collect()
    }

    /// Returns true if this class is, or inherits from, `classname`.
    #[must_use]
    pub fn is_a(&self, classname: &str) -> bool {
        let folded = fold_case(classname);
        self.lineage().iter().any(|def| fold_case(&def.classname) == folded)
    }

    /// Keyvalues of this class and its bases.
    #[must_use]
    pub fn keyvalues(&self) -> MergedView<'a, KeyValue> {
        MergedView::new(*self, |def| &def.keyvalues)
    }

    /// Inputs of this class and its bases.
    #[must_use]
    pub fn inputs(&self) -> MergedView<'a, IoDef> {
        MergedView::new(*self, |def| &def.inputs)
    }

    /// Outputs of this class and its bases.
    #[must_use]
    pub fn outputs(&self) -> MergedView<'a, IoDef> {
        MergedView::new(*self, |def| &def.outputs)
    }

    /// This definition followed by every inherited one, depth-first.
    fn lineage(&self) -> Vec<&'a EntityDef> {
        let mut seen = HashSet::new();
        let mut order = Vec::new();
        self.collect_lineage(self.id, self.def, &mut seen, &mut order);
        order
    }

    fn collect_lineage(
        &self,
        id: EntityId,
        def: &'a EntityDef,
        seen: &mut HashSet<EntityId>,
        order: &mut Vec<&'a EntityDef>,
    ) {
        if !seen.insert(id) {
            return;
        }
        order.push(def);
        for base in &def.bases {
            if let BaseRef::Resolved(base_id) = base {
                if let Some(base_def) = self.fgd.def(*base_id) {
                    self.collect_lineage(*base_id, base_def, seen, order);
                }
            }
        }
    }
}

impl std::fmt::Debug for EntityRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityRef")
            .field("id", &self.id)
            .field("classname", &self.def.classname)
            .finish()
    }
}

/// Case-insensitive lookup over one member map of an entity and its bases.
pub struct MergedView<'a, T: 'a> {
    entity: EntityRef<'a>,
    select: fn(&EntityDef) -> &IndexMap<String, T>,
}

impl<'a, T: 'a> MergedView<'a, T> {
    fn new(entity: EntityRef<'a>, select: fn(&EntityDef) -> &IndexMap<String, T>) -> Self {
        Self { entity, select }
    }

    fn maps(&self) -> impl Iterator<Item = &'a IndexMap<String, T>> + use<'a, T> {
        let select = self.select;
        self.entity.lineage().into_iter().map(move |def| select(def))
    }

    /// Returns the member with this name, preferring the closest definition.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a T> {
        let folded = fold_case(name);
        self.maps().find_map(|map| map.get(&folded))
    }

    /// Returns true if the entity or any base defines this name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates over `(folded name, member)` pairs, each name once.
    ///
    /// Own members come first, in definition order, then inherited ones.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a T)> + use<'a, T> {
        let mut seen = HashSet::new();
        self.maps()
            .flat_map(|map| map.iter())
            .filter(move |&(key, _)| seen.insert(key.as_str()))
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Iterates over the folded names, each once.
    pub fn keys(&self) -> impl Iterator<Item = &'a str> + use<'a, T> {
        self.iter().map(|(key, _)| key)
    }

    /// Returns the number of distinct names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns true if nothing is defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.maps().all(|map| map.is_empty())
    }
}

impl<'a, T: 'a> std::fmt::Debug for MergedView<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.keys()).finish()
    }
}
