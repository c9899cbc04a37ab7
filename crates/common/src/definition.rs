//! Canonical API definition
//!
//! Format-independent description of an API: its contract (resources,
//! operations, representations) and the endpoints it is served from.
//! Scalar types are named with the canonical vocabulary (`string`,
//! `byte`, `short`, `integer`, `long`, `float`, `double`, `boolean`,
//! `date`) or by representation name.

use serde::{Deserialize, Serialize};

/// Root of the canonical model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    /// API version
    #[serde(default)]
    pub version: Option<String>,

    /// The API contract
    pub contract: Contract,

    /// Base addresses the API is served from
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,

    /// Terms of service URL
    #[serde(default)]
    pub terms_of_service: Option<String>,

    /// Contact address
    #[serde(default)]
    pub contact: Option<String>,

    /// License
    #[serde(default)]
    pub license: Option<License>,
}

/// API contract
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    /// Contract name
    pub name: String,

    /// Description
    #[serde(default)]
    pub description: Option<String>,

    /// Sections grouping resources, one per resource listing entry
    #[serde(default)]
    pub sections: Vec<Section>,

    /// Resources in declaration order
    #[serde(default)]
    pub resources: Vec<Resource>,

    /// Representations (data models) in declaration order
    #[serde(default)]
    pub representations: Vec<Representation>,
}

impl Contract {
    pub fn resource(&self, path: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.path == path)
    }

    pub fn representation(&self, name: &str) -> Option<&Representation> {
        self.representations.iter().find(|r| r.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub url: String,
}

/// Group of resources coming from one declaration document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Addressable resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Resource path (e.g., "/pets/{petId}")
    pub path: String,

    /// Description
    #[serde(default)]
    pub description: Option<String>,

    /// Sections this resource belongs to
    #[serde(default)]
    pub sections: Vec<String>,

    /// Path variables, collected from all operations
    #[serde(default)]
    pub path_variables: Vec<PathVariable>,

    /// Operations in declaration order
    #[serde(default)]
    pub operations: Vec<Operation>,
}

impl Resource {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            description: None,
            sections: Vec::new(),
            path_variables: Vec::new(),
            operations: Vec::new(),
        }
    }

    pub fn operation(&self, method: &str) -> Option<&Operation> {
        self.operations
            .iter()
            .find(|op| op.method.eq_ignore_ascii_case(method))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathVariable {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// HTTP operation on a resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Upper-case HTTP method
    pub method: String,

    /// Operation name (nickname)
    pub name: String,

    /// Description (summary, then notes)
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub deprecated: bool,

    #[serde(default)]
    pub query_parameters: Vec<Parameter>,

    #[serde(default)]
    pub headers: Vec<Parameter>,

    #[serde(default)]
    pub form_parameters: Vec<Parameter>,

    /// Media types accepted in the request body
    #[serde(default)]
    pub consumes: Vec<String>,

    /// Media types returned in the response body
    #[serde(default)]
    pub produces: Vec<String>,

    /// Request body
    #[serde(default)]
    pub input_payload: Option<PayloadType>,

    /// Responses
    #[serde(default)]
    pub responses: Vec<Response>,
}

/// Query, header or form parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub allow_multiple: bool,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub possible_values: Vec<String>,
}

/// Body type of a request or response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadType {
    /// Canonical scalar name or representation name
    #[serde(rename = "type")]
    pub type_name: String,

    /// Whether the body is a list of `type_name`
    #[serde(default)]
    pub array: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub code: u16,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub output_payload: Option<PayloadType>,
}

/// Data model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Representation {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Name of the representation this one extends
    #[serde(default)]
    pub parent_type: Option<String>,
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl Representation {
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// Property of a representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    /// Whether the property holds a list of `type_name`
    #[serde(default)]
    pub list: bool,
    #[serde(default)]
    pub unique_items: bool,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub min: Option<String>,
    #[serde(default)]
    pub max: Option<String>,
    #[serde(default)]
    pub possible_values: Vec<String>,
}
