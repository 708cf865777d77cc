use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// JSON value kinds understood by schema-constrained generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    String,
    Number,
    Array,
    Object,
}

/// Response-shape contract sent alongside a structured prompt.
///
/// Serializes to the OpenAPI subset accepted by `generationConfig.responseSchema`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "type")]
    pub kind: SchemaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub property_ordering: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
}

impl Schema {
    fn of(kind: SchemaType) -> Self {
        Self {
            kind,
            items: None,
            properties: BTreeMap::new(),
            property_ordering: Vec::new(),
            required: Vec::new(),
            enum_values: Vec::new(),
        }
    }

    pub fn string() -> Self {
        Self::of(SchemaType::String)
    }

    pub fn number() -> Self {
        Self::of(SchemaType::Number)
    }

    /// A string restricted to a closed set of values
    pub fn string_enum(values: &[&str]) -> Self {
        let mut schema = Self::of(SchemaType::String);
        schema.enum_values = values.iter().map(|v| v.to_string()).collect();
        schema
    }

    pub fn array(items: Schema) -> Self {
        let mut schema = Self::of(SchemaType::Array);
        schema.items = Some(Box::new(items));
        schema
    }

    /// An object whose fields are all required, kept in declaration order
    pub fn object(fields: Vec<(&str, Schema)>) -> Self {
        let mut schema = Self::of(SchemaType::Object);
        for (name, field) in fields {
            schema.property_ordering.push(name.to_string());
            schema.required.push(name.to_string());
            schema.properties.insert(name.to_string(), field);
        }
        schema
    }
}
