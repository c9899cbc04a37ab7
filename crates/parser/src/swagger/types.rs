//! Swagger 1.2 type definitions
//!
//! A description is split over a resource listing and one API
//! declaration per listed resource. Only what the translator consumes is
//! modelled; unknown fields are ignored.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Resource listing (top-level document)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceListing {
    /// Swagger version (e.g., "1.2")
    #[serde(default)]
    pub swagger_version: Option<String>,

    /// API version
    #[serde(default)]
    pub api_version: Option<String>,

    /// Referenced API declarations, in listing order
    #[serde(default)]
    pub apis: Vec<ResourceReference>,

    /// API metadata
    #[serde(default)]
    pub info: Option<ApiInfo>,

    /// Authorization schemes, kept opaque
    #[serde(default)]
    pub authorizations: Option<IndexMap<String, serde_json::Value>>,
}

/// Entry of the resource listing pointing at an API declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceReference {
    /// Path relative to the listing (e.g., "/pets")
    pub path: String,

    #[serde(default)]
    pub description: Option<String>,
}

impl ResourceReference {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            description: None,
        }
    }
}

/// API information
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiInfo {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub terms_of_service_url: Option<String>,

    #[serde(default)]
    pub contact: Option<String>,

    #[serde(default)]
    pub license: Option<String>,

    #[serde(default)]
    pub license_url: Option<String>,
}

/// API declaration (one per listed resource)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDeclaration {
    #[serde(default)]
    pub swagger_version: Option<String>,

    #[serde(default)]
    pub api_version: Option<String>,

    /// Root URL serving the API
    #[serde(default)]
    pub base_path: Option<String>,

    /// Path of this resource relative to the base path
    #[serde(default)]
    pub resource_path: Option<String>,

    #[serde(default)]
    pub produces: Vec<String>,

    #[serde(default)]
    pub consumes: Vec<String>,

    /// APIs (paths) of the resource
    #[serde(default)]
    pub apis: Vec<Api>,

    /// Models keyed by id, in document order
    #[serde(default)]
    pub models: IndexMap<String, Model>,
}

/// Path and its operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Api {
    pub path: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub operations: Vec<Operation>,
}

/// HTTP operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// HTTP method
    pub method: String,

    /// Unique operation name
    #[serde(default)]
    pub nickname: Option<String>,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,

    /// Return type ("void", a primitive, "array" or a model id)
    #[serde(rename = "type")]
    #[serde(default)]
    pub type_name: Option<String>,

    #[serde(default)]
    pub format: Option<String>,

    /// Item type when `type_name` is "array"
    #[serde(default)]
    pub items: Option<Items>,

    #[serde(default)]
    pub parameters: Vec<Parameter>,

    #[serde(default)]
    pub response_messages: Vec<ResponseMessage>,

    #[serde(default)]
    pub produces: Vec<String>,

    #[serde(default)]
    pub consumes: Vec<String>,

    #[serde(default, deserialize_with = "de::flag")]
    pub deprecated: bool,
}

/// Operation parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    /// Location: path, query, body, header, form
    pub param_type: String,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "de::flag")]
    pub required: bool,

    #[serde(default, deserialize_with = "de::flag")]
    pub allow_multiple: bool,

    #[serde(rename = "type")]
    #[serde(default)]
    pub type_name: Option<String>,

    #[serde(default)]
    pub format: Option<String>,

    #[serde(rename = "$ref")]
    #[serde(default)]
    pub ref_path: Option<String>,

    #[serde(default)]
    pub items: Option<Items>,

    #[serde(default, deserialize_with = "de::scalar_text")]
    pub default_value: Option<String>,

    #[serde(rename = "enum")]
    #[serde(default, deserialize_with = "de::scalar_list")]
    pub enum_values: Vec<String>,

    #[serde(default, deserialize_with = "de::scalar_text")]
    pub minimum: Option<String>,

    #[serde(default, deserialize_with = "de::scalar_text")]
    pub maximum: Option<String>,
}

/// Item type of an array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Items {
    #[serde(rename = "type")]
    #[serde(default)]
    pub type_name: Option<String>,

    #[serde(default)]
    pub format: Option<String>,

    #[serde(rename = "$ref")]
    #[serde(default)]
    pub ref_path: Option<String>,
}

/// Response message of an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMessage {
    pub code: u16,

    #[serde(default)]
    pub message: Option<String>,

    /// Model id of the response body
    #[serde(default)]
    pub response_model: Option<String>,
}

/// Data model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Model id; the `models` map key is used when absent
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Names of required properties
    #[serde(default)]
    pub required: Vec<String>,

    /// Properties in document order
    #[serde(default)]
    pub properties: IndexMap<String, Property>,

    /// Ids of models extending this one
    #[serde(default)]
    pub sub_types: Vec<String>,

    #[serde(default)]
    pub discriminator: Option<String>,
}

/// Model property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(rename = "type")]
    #[serde(default)]
    pub type_name: Option<String>,

    #[serde(default)]
    pub format: Option<String>,

    #[serde(rename = "$ref")]
    #[serde(default)]
    pub ref_path: Option<String>,

    #[serde(default)]
    pub items: Option<Items>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(rename = "enum")]
    #[serde(default, deserialize_with = "de::scalar_list")]
    pub enum_values: Vec<String>,

    #[serde(default, deserialize_with = "de::scalar_text")]
    pub minimum: Option<String>,

    #[serde(default, deserialize_with = "de::scalar_text")]
    pub maximum: Option<String>,

    #[serde(default, deserialize_with = "de::scalar_text")]
    pub default_value: Option<String>,

    #[serde(default, deserialize_with = "de::flag")]
    pub unique_items: bool,
}

/// Lenient deserializers for fields producers disagree on
mod de {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Accepts a string, number or boolean and keeps its text
    pub fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => Some(other.to_string()),
        })
    }

    /// Accepts a list of scalars, keeping the text of each
    pub fn scalar_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Vec<Value>>::deserialize(deserializer)?
            .unwrap_or_default()
            .into_iter()
            .filter_map(|value| match value {
                Value::Null => None,
                Value::String(s) => Some(s),
                other => Some(other.to_string()),
            })
            .collect())
    }

    /// Accepts `true`/`false` or `"true"`/`"false"`
    pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Bool(b)) => b,
            Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        })
    }
}
