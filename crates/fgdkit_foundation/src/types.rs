//! Fixed registries of value types, entity categories and header helpers.
//!
//! [`TYPE_ORDER`] and [`CATEGORY_ORDER`] define the index each variant is
//! written as in the binary format. Both are append-only: new variants go
//! at the end with the next discriminant.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The type of a keyvalue or IO parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum ValueType {
    /// No value.
    Void = 0,
    /// One of a preset list of values.
    Choices = 1,
    /// Bitfield of independently toggled flags.
    Flags = 2,

    /// Arbitrary text.
    String = 3,
    /// `0` or `1`.
    Bool = 4,
    /// Integer.
    Int = 5,
    /// Floating point number.
    Float = 6,
    /// Offset or position.
    Vector = 7,
    /// Rotation.
    Angles = 8,

    /// The targetname of another entity.
    TargetDest = 9,
    /// A targetname or a classname.
    TargetDestClass = 10,
    /// The `targetname` keyvalue itself.
    TargetSource = 11,
    /// Targetnames restricted to NPC entities.
    TargetNpcClass = 12,
    /// Targetnames restricted to point entities.
    TargetPointClass = 13,
    /// Targetnames of filter entities.
    TargetFilterName = 14,
    /// Name of a node.
    TargetNodeDest = 15,
    /// This node's own name.
    TargetNodeSource = 16,

    /// Choreographed scene file.
    Scene = 17,
    /// Sound file or soundscript.
    Sound = 18,
    /// Particle system name.
    Particle = 19,
    /// Sprite material.
    Sprite = 20,
    /// Decal material.
    Decal = 21,
    /// Material.
    Material = 22,
    /// Model.
    Model = 23,
    /// Space separated list of scripts.
    ScriptList = 24,

    /// Angles with an inverted pitch.
    AngleNegativePitch = 25,
    /// Absolute vector drawn as a line from the origin.
    VecLine = 26,
    /// The `origin` keyvalue.
    Origin = 27,
    /// Axis defined by two points.
    Axis = 28,
    /// RGB colour in 0-1 plus extra.
    Color1 = 29,
    /// RGB colour in 0-255 plus extra.
    Color255 = 30,
    /// Space separated list of brush sides.
    SideList = 31,

    /// Instance map file.
    InstanceFile = 32,
    /// Instance `$fixup` definition.
    InstanceParm = 33,
    /// Instance `$fixup` usage.
    InstanceVariable = 34,
}

/// Every [`ValueType`], in binary encoding order.
pub const TYPE_ORDER: [ValueType; 35] = [
    ValueType::Void,
    ValueType::Choices,
    ValueType::Flags,
    ValueType::String,
    ValueType::Bool,
    ValueType::Int,
    ValueType::Float,
    ValueType::Vector,
    ValueType::Angles,
    ValueType::TargetDest,
    ValueType::TargetDestClass,
    ValueType::TargetSource,
    ValueType::TargetNpcClass,
    ValueType::TargetPointClass,
    ValueType::TargetFilterName,
    ValueType::TargetNodeDest,
    ValueType::TargetNodeSource,
    ValueType::Scene,
    ValueType::Sound,
    ValueType::Particle,
    ValueType::Sprite,
    ValueType::Decal,
    ValueType::Material,
    ValueType::Model,
    ValueType::ScriptList,
    ValueType::AngleNegativePitch,
    ValueType::VecLine,
    ValueType::Origin,
    ValueType::Axis,
    ValueType::Color1,
    ValueType::Color255,
    ValueType::SideList,
    ValueType::InstanceFile,
    ValueType::InstanceParm,
    ValueType::InstanceVariable,
];

// The type byte keeps its high bit for the readonly flag.
const _: () = {
    assert!(TYPE_ORDER.len() < 127, "too many value types for the packed type byte");
    let mut i = 0;
    while i < TYPE_ORDER.len() {
        assert!(TYPE_ORDER[i] as usize == i, "TYPE_ORDER out of sync with discriminants");
        i += 1;
    }
};

impl ValueType {
    /// Returns the keyword used for this type in FGD source.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Choices => "choices",
            Self::Flags => "flags",
            Self::String => "string",
            Self::Bool => "boolean",
            Self::Int => "integer",
            Self::Float => "float",
            Self::Vector => "vector",
            Self::Angles => "angle",
            Self::TargetDest => "target_destination",
            Self::TargetDestClass => "target_name_or_class",
            Self::TargetSource => "target_source",
            Self::TargetNpcClass => "npcclass",
            Self::TargetPointClass => "pointentityclass",
            Self::TargetFilterName => "filterclass",
            Self::TargetNodeDest => "node_dest",
            Self::TargetNodeSource => "node_id",
            Self::Scene => "scene",
            Self::Sound => "sound",
            Self::Particle => "particlesystem",
            Self::Sprite => "sprite",
            Self::Decal => "decal",
            Self::Material => "material",
            Self::Model => "studio",
            Self::ScriptList => "scriptlist",
            Self::AngleNegativePitch => "angle_negative_pitch",
            Self::VecLine => "vecline",
            Self::Origin => "origin",
            Self::Axis => "axis",
            Self::Color1 => "color1",
            Self::Color255 => "color255",
            Self::SideList => "sidelist",
            Self::InstanceFile => "instance_file",
            Self::InstanceParm => "instance_parm",
            Self::InstanceVariable => "instance_variable",
        }
    }

    /// Looks up a type keyword, ignoring case.
    ///
    /// Accepts the synonyms `bool` and `int`.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let folded = keyword.trim().to_lowercase();
        match folded.as_str() {
            "bool" => return Some(Self::Bool),
            "int" => return Some(Self::Int),
            _ => {}
        }
        TYPE_ORDER.iter().copied().find(|ty| ty.keyword() == folded)
    }

    /// Returns true for `choices` and `flags`, which carry a value list.
    #[must_use]
    pub const fn has_list(self) -> bool {
        matches!(self, Self::Choices | Self::Flags)
    }

    /// Returns the binary encoding index of this type.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the type at the given encoding index.
    #[must_use]
    pub fn from_index(index: u8) -> Option<Self> {
        TYPE_ORDER.get(usize::from(index)).copied()
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// The kind of entity a definition block declares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum EntityCategory {
    /// Not placeable; other classes inherit from it.
    Base = 0,
    /// Point entity.
    Point = 1,
    /// Brush entity.
    Solid = 2,
    /// Rope keyframes.
    Keyframe = 3,
    /// Track and path movement.
    Move = 4,
    /// Filter entity.
    Filter = 5,
    /// NPC.
    Npc = 6,
}

/// Every [`EntityCategory`], in binary encoding order.
pub const CATEGORY_ORDER: [EntityCategory; 7] = [
    EntityCategory::Base,
    EntityCategory::Point,
    EntityCategory::Solid,
    EntityCategory::Keyframe,
    EntityCategory::Move,
    EntityCategory::Filter,
    EntityCategory::Npc,
];

const _: () = {
    assert!(CATEGORY_ORDER.len() < 255, "too many entity categories for one byte");
    let mut i = 0;
    while i < CATEGORY_ORDER.len() {
        assert!(CATEGORY_ORDER[i] as usize == i, "CATEGORY_ORDER out of sync with discriminants");
        i += 1;
    }
};

impl EntityCategory {
    /// Returns the keyword after the `@`, e.g. `pointclass`.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Base => "baseclass",
            Self::Point => "pointclass",
            Self::Solid => "solidclass",
            Self::Keyframe => "keyframeclass",
            Self::Move => "moveclass",
            Self::Filter => "filterclass",
            Self::Npc => "npcclass",
        }
    }

    /// Looks up a category keyword (without the `@`), ignoring case.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let folded = keyword.trim().to_lowercase();
        CATEGORY_ORDER.iter().copied().find(|cat| cat.keyword() == folded)
    }

    /// Returns the binary encoding index of this category.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the category at the given encoding index.
    #[must_use]
    pub fn from_index(index: u8) -> Option<Self> {
        CATEGORY_ORDER.get(usize::from(index)).copied()
    }
}

impl fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Editor display helpers that may appear in an entity header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HelperKind {
    /// `base(...)`: inherit from other classes.
    Inherit,
    /// Snap to half the grid size. Takes no arguments.
    HalfGridSnap,
    /// Size of the placeholder cube.
    Size,
    /// Bounding box.
    BBox,
    /// Tint colour.
    Color,
    /// Sphere with a radius keyvalue.
    Sphere,
    /// Line to another entity.
    Line,
    /// Light frustum.
    Frustum,
    /// Cylinder between entities.
    Cylinder,
    /// Highlight brush sides.
    BrushSides,
    /// Box between two vector keyvalues.
    WireBox,
    /// Icon sprite.
    IconSprite,
    /// Model.
    Model,
    /// Model with prop behaviour.
    ModelProp,
    /// Model using a separate pitch keyvalue.
    LightProp,
    /// Entity sprite.
    Sprite,
    /// Instance preview.
    Instance,
    /// Decal preview.
    Decal,
    /// Overlay preview.
    Overlay,
    /// Water overlay transition.
    OverlayTransition,
    /// Light preview.
    Light,
    /// Light cone preview.
    LightCone,
    /// Rope keyframe.
    Keyframe,
    /// Track animator.
    Animator,
    /// Breakable surface corners.
    QuadBounds,
}

impl HelperKind {
    const ALL: [Self; 25] = [
        Self::Inherit,
        Self::HalfGridSnap,
        Self::Size,
        Self::BBox,
        Self::Color,
        Self::Sphere,
        Self::Line,
        Self::Frustum,
        Self::Cylinder,
        Self::BrushSides,
        Self::WireBox,
        Self::IconSprite,
        Self::Model,
        Self::ModelProp,
        Self::LightProp,
        Self::Sprite,
        Self::Instance,
        Self::Decal,
        Self::Overlay,
        Self::OverlayTransition,
        Self::Light,
        Self::LightCone,
        Self::Keyframe,
        Self::Animator,
        Self::QuadBounds,
    ];

    /// Returns the helper's name as written in a header.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Inherit => "base",
            Self::HalfGridSnap => "halfgridsnap",
            Self::Size => "size",
            Self::BBox => "bbox",
            Self::Color => "color",
            Self::Sphere => "sphere",
            Self::Line => "line",
            Self::Frustum => "frustum",
            Self::Cylinder => "cylinder",
            Self::BrushSides => "sidelist",
            Self::WireBox => "wirebox",
            Self::IconSprite => "iconsprite",
            Self::Model => "studio",
            Self::ModelProp => "studioprop",
            Self::LightProp => "lightprop",
            Self::Sprite => "sprite",
            Self::Instance => "instance",
            Self::Decal => "decal",
            Self::Overlay => "overlay",
            Self::OverlayTransition => "overlay_transition",
            Self::Light => "light",
            Self::LightCone => "lightcone",
            Self::Keyframe => "keyframe",
            Self::Animator => "animator",
            Self::QuadBounds => "quadbounds",
        }
    }

    /// Looks up a helper name, ignoring case.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let folded = keyword.trim().to_lowercase();
        Self::ALL.iter().copied().find(|kind| kind.keyword() == folded)
    }
}

impl fmt::Display for HelperKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
