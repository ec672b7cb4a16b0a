//! Field descriptors of a target doctype.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Field type as declared by the doctype schema.
///
/// Types outside the known set are kept verbatim in [`FieldType::Other`]
/// so schemas round-trip without loss.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Data,
    Phone,
    Link,
    Select,
    Int,
    Float,
    Date,
    Datetime,
    Check,
    Text,
    SmallText,
    Table,
    DynamicLink,
    Other(String),
}

impl FieldType {
    /// Types a source form field can be mapped onto.
    pub const MAPPABLE: [FieldType; 7] = [
        FieldType::Data,
        FieldType::Phone,
        FieldType::Link,
        FieldType::Select,
        FieldType::Int,
        FieldType::Float,
        FieldType::Date,
    ];

    /// Returns true if a source value can be mapped onto a field of this type.
    pub fn is_mappable(&self) -> bool {
        Self::MAPPABLE.contains(self)
    }

    /// Returns the schema name of this type.
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Data => "Data",
            FieldType::Phone => "Phone",
            FieldType::Link => "Link",
            FieldType::Select => "Select",
            FieldType::Int => "Int",
            FieldType::Float => "Float",
            FieldType::Date => "Date",
            FieldType::Datetime => "Datetime",
            FieldType::Check => "Check",
            FieldType::Text => "Text",
            FieldType::SmallText => "Small Text",
            FieldType::Table => "Table",
            FieldType::DynamicLink => "Dynamic Link",
            FieldType::Other(name) => name,
        }
    }
}

impl From<&str> for FieldType {
    fn from(name: &str) -> Self {
        match name {
            "Data" => FieldType::Data,
            "Phone" => FieldType::Phone,
            "Link" => FieldType::Link,
            "Select" => FieldType::Select,
            "Int" => FieldType::Int,
            "Float" => FieldType::Float,
            "Date" => FieldType::Date,
            "Datetime" => FieldType::Datetime,
            "Check" => FieldType::Check,
            "Text" => FieldType::Text,
            "Small Text" => FieldType::SmallText,
            "Table" => FieldType::Table,
            "Dynamic Link" => FieldType::DynamicLink,
            other => FieldType::Other(other.to_string()),
        }
    }
}

impl From<String> for FieldType {
    fn from(name: String) -> Self {
        FieldType::from(name.as_str())
    }
}

impl From<FieldType> for String {
    fn from(ty: FieldType) -> Self {
        ty.as_str().to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field of a target doctype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name
    #[serde(alias = "fieldname")]
    pub name: String,
    /// Declared field type
    #[serde(rename = "type", alias = "fieldtype")]
    pub field_type: FieldType,
    /// Whether the doctype requires a value for this field
    #[serde(default, alias = "reqd", deserialize_with = "deserialize_flag")]
    pub required: bool,
}

impl FieldDescriptor {
    /// Creates a new field descriptor.
    pub fn new(name: impl Into<String>, field_type: FieldType, required: bool) -> Self {
        Self {
            name: name.into(),
            field_type,
            required,
        }
    }
}

/// Accepts `true`/`false` as well as the `0`/`1` integers doctype exports use.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(i) => i != 0,
    })
}
