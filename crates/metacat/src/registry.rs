//! The field registry: per-type descriptor tables built once from
//! declarative type definitions.
//!
//! The platform's model is a single-rooted inheritance hierarchy; here it is
//! flattened at build time into one descriptor table per concrete type, so
//! serde never walks a hierarchy at runtime. A subtype redeclaring a wire
//! field name replaces the inherited descriptor (most-derived wins).

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::RegistryError;
use crate::typedefs::{BUILTIN_TYPES, FALLBACK_TYPE_NAME};

/// Scalar payload kinds an attribute can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Text,
    Bool,
    Int,
    Float,
    /// Closed string enum; decoding an unlisted variant is a structural error.
    Enum(&'static [&'static str]),
}

/// Element shape of a list or set attribute.
///
/// Deliberately non-recursive: an element is a scalar, struct, or reference,
/// never another collection. Nested arrays are thereby unrepresentable in
/// the model and rejected on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElemShape {
    Scalar(ScalarKind),
    Struct(&'static str),
    Reference,
}

/// Declared value shape of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    Scalar(ScalarKind),
    /// Ordered list; never deduplicated.
    List(ElemShape),
    /// Ordered unique set; always deduplicated.
    Set(ElemShape),
    /// Free-form string-keyed map.
    Map,
    /// Embedded struct of the named struct type.
    Struct(&'static str),
    /// Singular relationship reference.
    Reference,
}

impl ValueShape {
    /// True for list/set shapes; a cleared collection field serializes as
    /// `[]` where a cleared scalar serializes as `null`.
    pub fn is_collection(self) -> bool {
        matches!(self, ValueShape::List(_) | ValueShape::Set(_))
    }

    /// Human-readable shape name for error messages.
    pub fn expected_name(self) -> &'static str {
        match self {
            ValueShape::Scalar(ScalarKind::Text) => "text",
            ValueShape::Scalar(ScalarKind::Bool) => "bool",
            ValueShape::Scalar(ScalarKind::Int) => "int",
            ValueShape::Scalar(ScalarKind::Float) => "float",
            ValueShape::Scalar(ScalarKind::Enum(_)) => "enum text",
            ValueShape::List(_) => "array",
            ValueShape::Set(_) => "array",
            ValueShape::Map => "object",
            ValueShape::Struct(_) => "struct object",
            ValueShape::Reference => "reference object",
        }
    }
}

/// Which envelope bucket a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Plain attribute under `attributes`.
    Attribute,
    /// Singular relationship reference.
    RelationshipSingle,
    /// Relationship reference collection.
    RelationshipCollection,
    /// The custom-metadata carrier; excluded from ordinary field iteration.
    CustomMetadataCarrier,
    /// Lives at the envelope root, outside all buckets.
    TopLevel,
}

/// Extra translation step a field requires beyond its structural shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTranslation {
    None,
    /// A single internal tag id carried as text; translated to the readable
    /// tag name in memory.
    TagName,
    /// A set/list of internal tag ids; each element translated.
    TagNameList,
    /// Percent-encoded text on the wire; decoded after assembly and
    /// re-encoded before emission.
    EncodedText,
}

/// One field row of a declarative type definition.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub shape: ValueShape,
    pub translation: FieldTranslation,
}

impl FieldSpec {
    /// Plain attribute row with no extra translation.
    pub const fn attr(name: &'static str, shape: ValueShape) -> Self {
        Self {
            name,
            kind: FieldKind::Attribute,
            shape,
            translation: FieldTranslation::None,
        }
    }

    /// Singular relationship row.
    pub const fn relation(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::RelationshipSingle,
            shape: ValueShape::Reference,
            translation: FieldTranslation::None,
        }
    }

    /// Relationship-collection row.
    pub const fn relations(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::RelationshipCollection,
            shape: ValueShape::List(ElemShape::Reference),
            translation: FieldTranslation::None,
        }
    }
}

/// One type row of a declarative type definition table.
#[derive(Debug, Clone, Copy)]
pub struct TypeDef {
    pub type_name: &'static str,
    pub super_type: Option<&'static str>,
    pub fields: &'static [FieldSpec],
}

/// A resolved field descriptor: the `FieldSpec` plus which type in the
/// flattened chain contributed it.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
    pub shape: ValueShape,
    pub translation: FieldTranslation,
    /// The most-derived type that declared this field.
    pub declared_by: &'static str,
}

/// The flattened descriptor table of one concrete type.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    type_name: &'static str,
    /// Supertype chain, root first.
    super_types: Vec<&'static str>,
    fields: FxHashMap<&'static str, FieldDescriptor>,
}

impl TypeDescriptor {
    /// The type discriminator.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Supertype chain, root first (empty for the root type).
    pub fn super_types(&self) -> &[&'static str] {
        &self.super_types
    }

    /// Looks up the descriptor for a wire field name.
    ///
    /// Absent means "not part of the compiled model"; callers must retain
    /// such values as opaque leftover data, not fail.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(name)
    }

    /// Classifies a field name into its envelope bucket.
    pub fn classify(&self, name: &str) -> Option<FieldKind> {
        self.fields.get(name).map(|f| f.kind)
    }

    /// Iterates over all resolved descriptors (order unspecified).
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.values()
    }

    /// True when `name` is this type or anywhere in its supertype chain.
    pub fn is_a(&self, name: &str) -> bool {
        self.type_name == name || self.super_types.iter().any(|s| *s == name)
    }
}

/// Immutable map from type discriminator to flattened descriptor table.
///
/// Built once, read-only afterwards; safe to share across threads and
/// concurrent serde calls.
#[derive(Debug)]
pub struct TypeRegistry {
    types: FxHashMap<&'static str, TypeDescriptor>,
    fallback: &'static str,
}

impl TypeRegistry {
    /// Builds a registry from declarative definitions.
    ///
    /// `fallback` names the catch-all type substituted for unknown
    /// discriminators; it must itself be defined.
    pub fn from_defs(
        defs: &'static [TypeDef],
        fallback: &'static str,
    ) -> Result<TypeRegistry, RegistryError> {
        let mut by_name: FxHashMap<&'static str, &TypeDef> = FxHashMap::default();
        for def in defs {
            if by_name.insert(def.type_name, def).is_some() {
                return Err(RegistryError::DuplicateTypeName {
                    type_name: def.type_name,
                });
            }
        }

        let mut types = FxHashMap::default();
        for def in defs {
            // Resolve the supertype chain leaf-to-root, bounded by the
            // table size to catch cycles.
            let mut chain: Vec<&TypeDef> = vec![def];
            let mut cursor = def;
            while let Some(super_name) = cursor.super_type {
                let parent = by_name.get(super_name).copied().ok_or(
                    RegistryError::UnknownSuperType {
                        type_name: cursor.type_name,
                        super_type: super_name,
                    },
                )?;
                chain.push(parent);
                if chain.len() > defs.len() {
                    return Err(RegistryError::SuperTypeCycle {
                        type_name: def.type_name,
                    });
                }
                cursor = parent;
            }
            chain.reverse();

            let mut fields: FxHashMap<&'static str, FieldDescriptor> = FxHashMap::default();
            for link in &chain {
                for spec in link.fields {
                    // Later (more derived) links overwrite inherited rows.
                    fields.insert(
                        spec.name,
                        FieldDescriptor {
                            name: spec.name,
                            kind: spec.kind,
                            shape: spec.shape,
                            translation: spec.translation,
                            declared_by: link.type_name,
                        },
                    );
                }
            }

            let super_types = chain[..chain.len() - 1]
                .iter()
                .map(|d| d.type_name)
                .collect();
            types.insert(
                def.type_name,
                TypeDescriptor {
                    type_name: def.type_name,
                    super_types,
                    fields,
                },
            );
        }

        if !types.contains_key(fallback) {
            return Err(RegistryError::UnknownFallback {
                type_name: fallback,
            });
        }

        Ok(TypeRegistry { types, fallback })
    }

    /// The shared registry over the builtin type tables.
    pub fn builtin() -> &'static TypeRegistry {
        lazy_static! {
            static ref BUILTIN: TypeRegistry =
                TypeRegistry::from_defs(BUILTIN_TYPES, FALLBACK_TYPE_NAME)
                    .expect("builtin type definitions are well-formed");
        }
        &BUILTIN
    }

    /// Looks up a type by discriminator.
    pub fn get(&self, type_name: &str) -> Option<&TypeDescriptor> {
        self.types.get(type_name)
    }

    /// Resolves a discriminator, substituting the fallback type for unknown
    /// names. The platform's type system may be ahead of this SDK's tables;
    /// an unknown discriminator is tolerated, never an error.
    pub fn resolve(&self, type_name: &str) -> &TypeDescriptor {
        if let Some(descriptor) = self.types.get(type_name) {
            descriptor
        } else {
            debug!(type_name, "unknown type discriminator, using fallback");
            self.fallback()
        }
    }

    /// The registered catch-all type.
    pub fn fallback(&self) -> &TypeDescriptor {
        &self.types[self.fallback]
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// True when no types are registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
