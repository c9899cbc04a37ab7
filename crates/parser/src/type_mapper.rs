//! Scalar type mapping between the canonical vocabulary and Swagger
//!
//! Canonical names (`string`, `byte`, `short`, `integer`, `long`,
//! `float`, `double`, `boolean`, `date`) map to Swagger `{type, format}`
//! pairs and back. The two directions are not inverses: `short` comes
//! back as `integer` and `float` comes back as `Float`.

use serde::{Deserialize, Serialize};

/// A Swagger `{type, format}` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwaggerTypeFormat {
    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default)]
    pub format: Option<String>,
}

impl SwaggerTypeFormat {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            format: None,
        }
    }

    pub fn with_format(type_name: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            format: Some(format.into()),
        }
    }
}

/// Maps scalar types between the canonical model and Swagger
pub struct TypeMapper;

impl TypeMapper {
    /// Map a canonical type name to a Swagger `{type, format}` pair
    ///
    /// Unrecognized names pass through unchanged with no format.
    ///
    /// # Examples
    /// ```
    /// use swagger_import_parser::{SwaggerTypeFormat, TypeMapper};
    ///
    /// assert_eq!(
    ///     TypeMapper::to_swagger_type("long"),
    ///     SwaggerTypeFormat::with_format("integer", "int64")
    /// );
    /// assert_eq!(TypeMapper::to_swagger_type("Pet"), SwaggerTypeFormat::new("Pet"));
    /// ```
    pub fn to_swagger_type(data_type: &str) -> SwaggerTypeFormat {
        match data_type {
            "string" => SwaggerTypeFormat::new("string"),
            "byte" => SwaggerTypeFormat::with_format("string", "byte"),
            "short" | "integer" => SwaggerTypeFormat::with_format("integer", "int32"),
            "long" => SwaggerTypeFormat::with_format("integer", "int64"),
            "float" => SwaggerTypeFormat::with_format("number", "float"),
            "double" => SwaggerTypeFormat::with_format("number", "double"),
            "boolean" => SwaggerTypeFormat::new("boolean"),
            "date" => SwaggerTypeFormat::with_format("string", "date"),
            other => SwaggerTypeFormat::new(other),
        }
    }

    /// Map a Swagger `{type, format}` pair to a canonical type name
    ///
    /// # Examples
    /// ```
    /// use swagger_import_parser::{SwaggerTypeFormat, TypeMapper};
    ///
    /// let pair = SwaggerTypeFormat::with_format("number", "float");
    /// assert_eq!(TypeMapper::to_definition_type(&pair), "Float");
    /// ```
    pub fn to_definition_type(type_format: &SwaggerTypeFormat) -> String {
        Self::map_swagger_type(&type_format.type_name, type_format.format.as_deref())
    }

    /// Same as [`TypeMapper::to_definition_type`] on borrowed parts
    pub fn map_swagger_type(type_name: &str, format: Option<&str>) -> String {
        let mapped = match (type_name, format) {
            ("string", Some("date")) => "date",
            ("string", Some("byte")) => "byte",
            ("string", _) => "string",
            ("integer", Some("int64")) => "long",
            ("integer", _) => "integer",
            // Capitalized on purpose, existing consumers expect it
            ("number", Some("float")) => "Float",
            ("number", _) => "double",
            ("boolean", _) => "boolean",
            (other, _) => other,
        };
        mapped.to_string()
    }
}
