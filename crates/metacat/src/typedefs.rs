//! Builtin type definition tables.
//!
//! The full platform model has hundreds of generated asset types; this table
//! carries a representative slice of the hierarchy, declared row-by-row and
//! flattened by [`TypeRegistry`](crate::registry::TypeRegistry) at init.
//! Adding a type is adding one `TypeDef` row; nothing else in the crate
//! changes.

use crate::registry::{
    ElemShape, FieldKind, FieldSpec, FieldTranslation, ScalarKind, TypeDef, ValueShape,
};

/// The catch-all type substituted for unknown discriminators.
pub const FALLBACK_TYPE_NAME: &str = "Indistinct";

/// Certificate states an asset can carry.
pub const CERTIFICATE_STATUSES: &[&str] = &["VERIFIED", "DRAFT", "DEPRECATED"];

/// Announcement banner kinds.
pub const ANNOUNCEMENT_TYPES: &[&str] = &["information", "warning", "issue"];

const TEXT: ValueShape = ValueShape::Scalar(ScalarKind::Text);
const BOOL: ValueShape = ValueShape::Scalar(ScalarKind::Bool);
const INT: ValueShape = ValueShape::Scalar(ScalarKind::Int);
const FLOAT: ValueShape = ValueShape::Scalar(ScalarKind::Float);
const TEXT_SET: ValueShape = ValueShape::Set(ElemShape::Scalar(ScalarKind::Text));

/// Builtin type table, root first.
pub static BUILTIN_TYPES: &[TypeDef] = &[
    TypeDef {
        type_name: "Referenceable",
        super_type: None,
        fields: &[
            FieldSpec::attr("qualifiedName", TEXT),
            FieldSpec {
                name: "businessAttributes",
                kind: FieldKind::CustomMetadataCarrier,
                shape: ValueShape::Map,
                translation: FieldTranslation::None,
            },
        ],
    },
    TypeDef {
        type_name: "Asset",
        super_type: Some("Referenceable"),
        fields: &[
            FieldSpec::attr("name", TEXT),
            FieldSpec::attr("displayName", TEXT),
            FieldSpec::attr("description", TEXT),
            FieldSpec::attr("userDescription", TEXT),
            FieldSpec::attr(
                "certificateStatus",
                ValueShape::Scalar(ScalarKind::Enum(CERTIFICATE_STATUSES)),
            ),
            FieldSpec::attr("certificateUpdatedBy", TEXT),
            FieldSpec::attr("certificateUpdatedAt", INT),
            FieldSpec::attr(
                "announcementType",
                ValueShape::Scalar(ScalarKind::Enum(ANNOUNCEMENT_TYPES)),
            ),
            FieldSpec::attr("announcementTitle", TEXT),
            FieldSpec::attr("announcementMessage", TEXT),
            FieldSpec::attr("ownerUsers", TEXT_SET),
            FieldSpec::attr("ownerGroups", TEXT_SET),
            FieldSpec::attr("adminUsers", TEXT_SET),
            FieldSpec::attr("adminGroups", TEXT_SET),
            FieldSpec::attr("sourceCreatedAt", INT),
            FieldSpec::attr("sourceUpdatedAt", INT),
            FieldSpec::attr("sourceUrl", TEXT),
            FieldSpec::attr("isDiscoverable", BOOL),
            FieldSpec::attr("isEditable", BOOL),
            FieldSpec::attr("popularityScore", FLOAT),
            FieldSpec::attr("assetTags", TEXT_SET),
            FieldSpec::relation("readme"),
            FieldSpec::relations("links"),
        ],
    },
    TypeDef {
        type_name: "Catalog",
        super_type: Some("Asset"),
        fields: &[],
    },
    TypeDef {
        type_name: "SQL",
        super_type: Some("Catalog"),
        fields: &[
            FieldSpec::attr("databaseName", TEXT),
            FieldSpec::attr("schemaName", TEXT),
            FieldSpec::attr("queryCount", INT),
            FieldSpec::attr("queryCountUpdatedAt", INT),
            FieldSpec::attr("lastProfiledAt", INT),
        ],
    },
    TypeDef {
        type_name: "Database",
        super_type: Some("SQL"),
        fields: &[
            FieldSpec::attr("schemaCount", INT),
            FieldSpec::relations("schemas"),
        ],
    },
    TypeDef {
        type_name: "Schema",
        super_type: Some("SQL"),
        fields: &[
            FieldSpec::attr("tableCount", INT),
            FieldSpec::attr("viewCount", INT),
            FieldSpec::relation("database"),
            FieldSpec::relations("tables"),
            FieldSpec::relations("views"),
        ],
    },
    TypeDef {
        type_name: "Table",
        super_type: Some("SQL"),
        fields: &[
            FieldSpec::attr("columnCount", INT),
            FieldSpec::attr("rowCount", INT),
            FieldSpec::attr("sizeBytes", INT),
            FieldSpec::attr("isPartitioned", BOOL),
            FieldSpec::attr("partitionStrategy", TEXT),
            FieldSpec::attr("externalLocation", TEXT),
            FieldSpec::relation("atlanSchema"),
            FieldSpec::relations("columns"),
        ],
    },
    TypeDef {
        type_name: "View",
        super_type: Some("SQL"),
        fields: &[
            FieldSpec::attr("definition", TEXT),
            FieldSpec::attr("columnCount", INT),
            FieldSpec::relation("atlanSchema"),
            FieldSpec::relations("columns"),
        ],
    },
    TypeDef {
        type_name: "Column",
        super_type: Some("SQL"),
        fields: &[
            FieldSpec::attr("dataType", TEXT),
            FieldSpec::attr("order", INT),
            FieldSpec::attr("isPrimary", BOOL),
            FieldSpec::attr("isNullable", BOOL),
            FieldSpec::attr("precision", INT),
            FieldSpec::attr("numericScale", FLOAT),
            FieldSpec::attr("maxLength", INT),
            FieldSpec::attr("columnDistinctValuesCount", INT),
            FieldSpec::attr("columnHistogram", ValueShape::Struct("Histogram")),
            FieldSpec::relation("table"),
            FieldSpec::relation("view"),
        ],
    },
    TypeDef {
        type_name: "Process",
        super_type: Some("Asset"),
        fields: &[
            FieldSpec::attr("code", TEXT),
            FieldSpec::attr("sql", TEXT),
            FieldSpec::relations("inputs"),
            FieldSpec::relations("outputs"),
        ],
    },
    TypeDef {
        type_name: "Resource",
        super_type: Some("Asset"),
        fields: &[
            FieldSpec::attr("link", TEXT),
            FieldSpec::attr("isGlobal", BOOL),
            FieldSpec::attr("reference", TEXT),
            FieldSpec::attr("resourceMetadata", ValueShape::Map),
        ],
    },
    TypeDef {
        type_name: "Link",
        super_type: Some("Resource"),
        fields: &[FieldSpec::relation("asset")],
    },
    TypeDef {
        type_name: "Readme",
        super_type: Some("Resource"),
        fields: &[
            // Redeclares the inherited description: readme bodies travel
            // percent-encoded on the wire.
            FieldSpec {
                name: "description",
                kind: FieldKind::Attribute,
                shape: TEXT,
                translation: FieldTranslation::EncodedText,
            },
            FieldSpec::relation("asset"),
        ],
    },
    TypeDef {
        type_name: "Glossary",
        super_type: Some("Asset"),
        fields: &[
            FieldSpec::attr("shortDescription", TEXT),
            FieldSpec::attr("longDescription", TEXT),
            FieldSpec::attr("language", TEXT),
            FieldSpec::attr("usage", TEXT),
            FieldSpec::relations("terms"),
            FieldSpec::relations("categories"),
        ],
    },
    TypeDef {
        type_name: "GlossaryTerm",
        super_type: Some("Asset"),
        fields: &[
            FieldSpec::attr("shortDescription", TEXT),
            FieldSpec::attr("longDescription", TEXT),
            FieldSpec::attr("examples", TEXT_SET),
            FieldSpec::attr("abbreviation", TEXT),
            FieldSpec::attr("usage", TEXT),
            FieldSpec::relation("anchor"),
            FieldSpec::relations("categories"),
            FieldSpec::relations("seeAlso"),
        ],
    },
    TypeDef {
        type_name: "GlossaryCategory",
        super_type: Some("Asset"),
        fields: &[
            FieldSpec::attr("shortDescription", TEXT),
            FieldSpec::attr("longDescription", TEXT),
            FieldSpec::relation("anchor"),
            FieldSpec::relation("parentCategory"),
            FieldSpec::relations("terms"),
        ],
    },
    TypeDef {
        type_name: "AccessControl",
        super_type: Some("Asset"),
        fields: &[
            FieldSpec::attr("isAccessControlEnabled", BOOL),
            FieldSpec::attr("denyCustomMetadataGuids", TEXT_SET),
            FieldSpec::attr("denyAssetTabs", TEXT_SET),
            FieldSpec::relations("policies"),
        ],
    },
    TypeDef {
        type_name: "Persona",
        super_type: Some("AccessControl"),
        fields: &[
            FieldSpec::attr("personaGroups", TEXT_SET),
            FieldSpec::attr("personaUsers", TEXT_SET),
            FieldSpec::attr("roleId", TEXT),
        ],
    },
    TypeDef {
        type_name: "Purpose",
        super_type: Some("AccessControl"),
        fields: &[
            // Travels as internal tag ids; readable names in memory.
            FieldSpec {
                name: "purposeClassifications",
                kind: FieldKind::Attribute,
                shape: TEXT_SET,
                translation: FieldTranslation::TagNameList,
            },
        ],
    },
    TypeDef {
        type_name: "SourceTag",
        super_type: Some("Catalog"),
        fields: &[
            FieldSpec::attr("tagId", TEXT),
            FieldSpec::attr("tagAllowedValues", TEXT_SET),
            // A single internal tag id mapping this source tag to a
            // platform tag.
            FieldSpec {
                name: "mappedTagName",
                kind: FieldKind::Attribute,
                shape: TEXT,
                translation: FieldTranslation::TagName,
            },
        ],
    },
    TypeDef {
        type_name: FALLBACK_TYPE_NAME,
        super_type: Some("Referenceable"),
        fields: &[],
    },
];
