//! Converts a Swagger 1.2 resource listing and its declarations into a Definition

use super::declarations::{DeclarationMap, KeyConvention};
use super::types::{
    ApiDeclaration, Items, Model, Operation as SwaggerOperation, Parameter as SwaggerParameter,
    ResourceListing, ResourceReference,
};
use crate::type_mapper::TypeMapper;
use indexmap::IndexMap;
use std::collections::HashSet;
use swagger_import_common::{
    Contract, Definition, Endpoint, ImportError, License, Operation, Parameter, PathVariable,
    PayloadType, Property, Representation, Resource, Response, Result, Section,
};
use tracing::{debug, info, warn};

/// Contract name used when the listing carries no title
const DEFAULT_CONTRACT_NAME: &str = "Swagger API";

/// Convert a resource listing and its declarations into a Definition
///
/// Declarations are visited in listing order; a reference without a
/// declaration is an error. Resources sharing a path across declarations
/// are merged, but declaring the same method twice on a path is an error.
/// For models sharing an id, the first one wins.
pub fn translate(listing: &ResourceListing, declarations: &DeclarationMap) -> Result<Definition> {
    let mut builder = ContractBuilder::default();

    for reference in &listing.apis {
        let declaration = declarations.lookup(&reference.path).ok_or_else(|| {
            ImportError::translation(format!(
                "No API declaration found for resource {} (key \"{}\")",
                reference.path,
                declarations.key_for(&reference.path)
            ))
        })?;

        builder.add_declaration(reference, declaration)?;
    }

    let referenced: HashSet<String> = listing
        .apis
        .iter()
        .map(|r| declarations.key_for(&r.path))
        .collect();
    for key in declarations.keys().filter(|k| !referenced.contains(*k)) {
        debug!("Ignoring API declaration not referenced by the listing: {}", key);
    }

    let definition = builder.build(listing);
    info!(
        "Translated {} resources and {} representations",
        definition.contract.resources.len(),
        definition.contract.representations.len()
    );

    Ok(definition)
}

/// Accumulates contract parts across declarations, in first-seen order
#[derive(Default)]
struct ContractBuilder {
    sections: Vec<Section>,
    endpoints: Vec<Endpoint>,
    resources: IndexMap<String, Resource>,
    representations: IndexMap<String, Representation>,
    /// (parent, sub type) pairs resolved once every model is known
    sub_types: Vec<(String, String)>,
}

impl ContractBuilder {
    fn add_declaration(
        &mut self,
        reference: &ResourceReference,
        declaration: &ApiDeclaration,
    ) -> Result<()> {
        let section = KeyConvention::StripSeparators.key_for(&reference.path);
        self.sections.push(Section {
            name: section.clone(),
            description: reference.description.clone(),
        });

        if let Some(ref base_path) = declaration.base_path {
            if !self.endpoints.iter().any(|e| &e.url == base_path) {
                self.endpoints.push(Endpoint {
                    url: base_path.clone(),
                });
            }
        }

        for api in &declaration.apis {
            let resource = self
                .resources
                .entry(api.path.clone())
                .or_insert_with(|| Resource::new(api.path.clone()));

            if resource.description.is_none() {
                resource.description = api.description.clone();
            }
            if !resource.sections.contains(&section) {
                resource.sections.push(section.clone());
            }

            for swagger_op in &api.operations {
                let (operation, path_variables) = convert_operation(swagger_op, declaration);

                if resource.operation(&operation.method).is_some() {
                    return Err(ImportError::translation(format!(
                        "Operation {} {} is declared more than once",
                        operation.method, api.path
                    )));
                }

                for variable in path_variables {
                    if !resource
                        .path_variables
                        .iter()
                        .any(|v| v.name == variable.name)
                    {
                        resource.path_variables.push(variable);
                    }
                }
                resource.operations.push(operation);
            }
        }

        for (key, model) in &declaration.models {
            let name = if model.id.is_empty() { key } else { &model.id };
            if self.representations.contains_key(name) {
                warn!(
                    "Model {} from {} already defined, keeping the first definition",
                    name, reference.path
                );
                continue;
            }

            for sub_type in &model.sub_types {
                self.sub_types.push((name.clone(), sub_type.clone()));
            }
            self.representations
                .insert(name.clone(), convert_model(name, model));
        }

        Ok(())
    }

    fn build(mut self, listing: &ResourceListing) -> Definition {
        for (parent, sub_type) in &self.sub_types {
            match self.representations.get_mut(sub_type) {
                Some(representation) if representation.parent_type.is_none() => {
                    representation.parent_type = Some(parent.clone());
                }
                Some(_) => {}
                None => debug!("Sub type {} of {} has no model", sub_type, parent),
            }
        }

        let info = listing.info.clone().unwrap_or_default();

        Definition {
            version: listing.api_version.clone(),
            contract: Contract {
                name: info
                    .title
                    .unwrap_or_else(|| DEFAULT_CONTRACT_NAME.to_string()),
                description: info.description,
                sections: self.sections,
                resources: self.resources.into_values().collect(),
                representations: self.representations.into_values().collect(),
            },
            endpoints: self.endpoints,
            terms_of_service: info.terms_of_service_url,
            contact: info.contact,
            license: info.license.map(|name| License {
                name,
                url: info.license_url,
            }),
        }
    }
}

/// Convert an operation; path parameters are returned separately
fn convert_operation(
    op: &SwaggerOperation,
    declaration: &ApiDeclaration,
) -> (Operation, Vec<PathVariable>) {
    let method = op.method.to_uppercase();

    let mut operation = Operation {
        method: method.clone(),
        name: op
            .nickname
            .clone()
            .unwrap_or_else(|| method.to_lowercase()),
        description: join_description(op.summary.as_deref(), op.notes.as_deref()),
        deprecated: op.deprecated,
        query_parameters: Vec::new(),
        headers: Vec::new(),
        form_parameters: Vec::new(),
        consumes: non_empty_or(&op.consumes, &declaration.consumes),
        produces: non_empty_or(&op.produces, &declaration.produces),
        input_payload: None,
        responses: Vec::new(),
    };
    let mut path_variables = Vec::new();

    for param in &op.parameters {
        match param.param_type.as_str() {
            "path" => path_variables.push(PathVariable {
                name: param.name.clone(),
                type_name: resolve_parameter_type(param).0,
                description: param.description.clone(),
            }),
            "query" => operation.query_parameters.push(convert_parameter(param)),
            "header" => operation.headers.push(convert_parameter(param)),
            "form" => operation.form_parameters.push(convert_parameter(param)),
            "body" => {
                let (type_name, array) = resolve_parameter_type(param);
                operation.input_payload = Some(PayloadType { type_name, array });
            }
            other => warn!(
                "Skipping parameter {} of {} with unknown paramType {}",
                param.name, operation.name, other
            ),
        }
    }

    let output = match op.type_name.as_deref() {
        None | Some("void") => None,
        Some(type_name) => {
            let (type_name, array) =
                resolve_type(Some(type_name), op.format.as_deref(), None, op.items.as_ref());
            Some(PayloadType { type_name, array })
        }
    };

    for message in &op.response_messages {
        let output_payload = match message.response_model.as_deref() {
            Some(model) => Some(PayloadType {
                type_name: TypeMapper::map_swagger_type(model_name(model), None),
                array: false,
            }),
            None if is_success(message.code) => output.clone(),
            None => None,
        };
        operation.responses.push(Response {
            code: message.code,
            message: message.message.clone(),
            output_payload,
        });
    }

    if output.is_some() && !operation.responses.iter().any(|r| is_success(r.code)) {
        operation.responses.insert(
            0,
            Response {
                code: 200,
                message: Some("Success".to_string()),
                output_payload: output,
            },
        );
    }

    (operation, path_variables)
}

fn convert_parameter(param: &SwaggerParameter) -> Parameter {
    let (type_name, array) = resolve_parameter_type(param);
    Parameter {
        name: param.name.clone(),
        type_name,
        description: param.description.clone(),
        required: param.required,
        allow_multiple: param.allow_multiple || array,
        default_value: param.default_value.clone(),
        possible_values: param.enum_values.clone(),
    }
}

fn resolve_parameter_type(param: &SwaggerParameter) -> (String, bool) {
    resolve_type(
        param.type_name.as_deref(),
        param.format.as_deref(),
        param.ref_path.as_deref(),
        param.items.as_ref(),
    )
}

fn convert_model(name: &str, model: &Model) -> Representation {
    let properties = model
        .properties
        .iter()
        .map(|(prop_name, prop)| {
            let (type_name, list) = resolve_type(
                prop.type_name.as_deref(),
                prop.format.as_deref(),
                prop.ref_path.as_deref(),
                prop.items.as_ref(),
            );

            Property {
                name: prop_name.clone(),
                type_name,
                description: prop.description.clone(),
                required: model.required.contains(prop_name),
                list,
                unique_items: prop.unique_items,
                default_value: prop.default_value.clone(),
                min: prop.minimum.clone(),
                max: prop.maximum.clone(),
                possible_values: prop.enum_values.clone(),
            }
        })
        .collect();

    Representation {
        name: name.to_string(),
        description: model.description.clone(),
        parent_type: None,
        properties,
    }
}

/// Canonical type of a Swagger field and whether it is an array
///
/// Untyped fields default to `string`.
fn resolve_type(
    type_name: Option<&str>,
    format: Option<&str>,
    ref_path: Option<&str>,
    items: Option<&Items>,
) -> (String, bool) {
    match (type_name, ref_path) {
        (Some("array"), _) => {
            let item_type = items
                .map(|i| {
                    let (item_type, _) = resolve_type(
                        i.type_name.as_deref(),
                        i.format.as_deref(),
                        i.ref_path.as_deref(),
                        None,
                    );
                    item_type
                })
                .unwrap_or_else(|| "string".to_string());
            (item_type, true)
        }
        (Some(type_name), _) => (TypeMapper::map_swagger_type(type_name, format), false),
        (None, Some(ref_path)) => (model_name(ref_path).to_string(), false),
        (None, None) => ("string".to_string(), false),
    }
}

/// Model id from a `$ref` ("Pet" or "#/models/Pet")
fn model_name(ref_path: &str) -> &str {
    ref_path.rsplit('/').next().unwrap_or(ref_path)
}

fn is_success(code: u16) -> bool {
    (200..300).contains(&code)
}

fn non_empty_or(values: &[String], fallback: &[String]) -> Vec<String> {
    if values.is_empty() {
        fallback.to_vec()
    } else {
        values.to_vec()
    }
}

fn join_description(summary: Option<&str>, notes: Option<&str>) -> Option<String> {
    match (summary, notes) {
        (Some(summary), Some(notes)) if !notes.is_empty() => {
            Some(format!("{}\n\n{}", summary, notes))
        }
        (Some(summary), _) => Some(summary.to_string()),
        (None, notes) => notes.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swagger::types::ApiInfo;

    fn listing(paths: &[&str]) -> ResourceListing {
        ResourceListing {
            api_version: Some("1.0.0".to_string()),
            apis: paths.iter().map(|p| ResourceReference::new(*p)).collect(),
            ..Default::default()
        }
    }

    fn declaration(json: &str) -> ApiDeclaration {
        serde_json::from_str(json).unwrap()
    }

    const PETS: &str = r#"{
        "basePath": "http://api.example.com/v1",
        "produces": ["application/json"],
        "apis": [
            {
                "path": "/pets/{petId}",
                "description": "Single pet",
                "operations": [
                    {
                        "method": "get",
                        "nickname": "getPet",
                        "summary": "Find pet by id",
                        "type": "Pet",
                        "parameters": [
                            { "paramType": "path", "name": "petId", "type": "integer", "format": "int64", "required": true },
                            { "paramType": "query", "name": "weight", "type": "number", "format": "float" },
                            { "paramType": "header", "name": "X-Trace", "type": "string" }
                        ],
                        "responseMessages": [ { "code": 404, "message": "Pet not found" } ]
                    },
                    {
                        "method": "PUT",
                        "nickname": "updatePet",
                        "type": "void",
                        "consumes": ["application/xml"],
                        "parameters": [
                            { "paramType": "path", "name": "petId", "type": "integer", "format": "int64" },
                            { "paramType": "body", "name": "body", "type": "Pet" }
                        ]
                    }
                ]
            }
        ],
        "models": {
            "Pet": {
                "id": "Pet",
                "required": ["id"],
                "subTypes": ["Cat"],
                "properties": {
                    "id": { "type": "integer", "format": "int64" },
                    "born": { "type": "string", "format": "date" },
                    "tags": { "type": "array", "items": { "$ref": "Tag" }, "uniqueItems": true },
                    "owner": { "$ref": "Owner" }
                }
            },
            "Cat": { "id": "Cat", "properties": { "lives": { "type": "integer", "format": "int32" } } }
        }
    }"#;

    const OWNERS: &str = r#"{
        "basePath": "http://api.example.com/v1",
        "apis": [
            {
                "path": "/owners",
                "operations": [
                    { "method": "GET", "nickname": "listOwners", "type": "array", "items": { "$ref": "Owner" } }
                ]
            }
        ],
        "models": {
            "Owner": { "id": "Owner", "properties": { "name": { "type": "string" } } },
            "Pet": { "id": "Pet", "description": "shadowed" }
        }
    }"#;

    fn pets_and_owners(convention: KeyConvention) -> DeclarationMap {
        let mut map = DeclarationMap::new(convention);
        map.insert("/pets", declaration(PETS));
        map.insert("/owners", declaration(OWNERS));
        map
    }

    #[test]
    fn test_translate_operations_and_parameters() {
        let definition = translate(
            &listing(&["/pets", "/owners"]),
            &pets_and_owners(KeyConvention::Raw),
        )
        .unwrap();

        let resource = definition.contract.resource("/pets/{petId}").unwrap();
        assert_eq!(resource.description.as_deref(), Some("Single pet"));
        assert_eq!(resource.path_variables.len(), 1);
        assert_eq!(resource.path_variables[0].type_name, "long");

        let get = resource.operation("GET").unwrap();
        assert_eq!(get.name, "getPet");
        assert_eq!(get.query_parameters[0].type_name, "Float");
        assert_eq!(get.headers[0].name, "X-Trace");
        assert_eq!(get.produces, vec!["application/json".to_string()]);
        assert_eq!(get.responses.len(), 2);
        assert_eq!(get.responses[0].code, 200);
        assert_eq!(
            get.responses[0].output_payload,
            Some(PayloadType {
                type_name: "Pet".to_string(),
                array: false
            })
        );
        assert_eq!(get.responses[1].code, 404);

        let put = resource.operation("PUT").unwrap();
        assert_eq!(put.consumes, vec!["application/xml".to_string()]);
        assert_eq!(put.input_payload.as_ref().unwrap().type_name, "Pet");
        assert!(put.responses.is_empty());
    }

    #[test]
    fn test_translate_models() {
        let definition = translate(
            &listing(&["/pets", "/owners"]),
            &pets_and_owners(KeyConvention::Raw),
        )
        .unwrap();
        let contract = &definition.contract;

        let names: Vec<&str> = contract
            .representations
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["Pet", "Cat", "Owner"]);

        let pet = contract.representation("Pet").unwrap();
        assert_eq!(pet.description, None, "first definition wins");
        assert!(pet.property("id").unwrap().required);
        assert_eq!(pet.property("id").unwrap().type_name, "long");
        assert_eq!(pet.property("born").unwrap().type_name, "date");
        let tags = pet.property("tags").unwrap();
        assert!(tags.list && tags.unique_items);
        assert_eq!(tags.type_name, "Tag");
        assert_eq!(pet.property("owner").unwrap().type_name, "Owner");

        let cat = contract.representation("Cat").unwrap();
        assert_eq!(cat.parent_type.as_deref(), Some("Pet"));
        assert_eq!(cat.property("lives").unwrap().type_name, "integer");
    }

    #[test]
    fn test_translate_sections_and_endpoints() {
        let definition = translate(
            &listing(&["/pets", "/owners"]),
            &pets_and_owners(KeyConvention::StripSeparators),
        )
        .unwrap();

        assert_eq!(definition.version.as_deref(), Some("1.0.0"));
        assert_eq!(definition.contract.name, DEFAULT_CONTRACT_NAME);
        let sections: Vec<&str> = definition
            .contract
            .sections
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(sections, vec!["pets", "owners"]);
        assert_eq!(definition.endpoints.len(), 1);

        let owners = definition.contract.resource("/owners").unwrap();
        let list = owners.operation("GET").unwrap();
        assert_eq!(
            list.responses[0].output_payload,
            Some(PayloadType {
                type_name: "Owner".to_string(),
                array: true
            })
        );
    }

    #[test]
    fn test_missing_declaration_is_translation_error() {
        let mut map = DeclarationMap::new(KeyConvention::StripSeparators);
        map.insert("/pets", declaration(PETS));

        let err = translate(&listing(&["/pets", "/owners"]), &map).unwrap_err();
        assert!(matches!(err, ImportError::Translation { .. }));
        assert!(err.message().contains("/owners"));
    }

    #[test]
    fn test_duplicate_operation_is_rejected() {
        let mut map = DeclarationMap::new(KeyConvention::Raw);
        map.insert("/pets", declaration(PETS));
        map.insert("/pets2", declaration(PETS));

        let err = translate(&listing(&["/pets", "/pets2"]), &map).unwrap_err();
        assert!(err.message().contains("GET /pets/{petId}"));
    }

    #[test]
    fn test_translation_is_deterministic() {
        let listing = listing(&["/pets", "/owners"]);
        let map = pets_and_owners(KeyConvention::Raw);

        assert_eq!(
            translate(&listing, &map).unwrap(),
            translate(&listing, &map).unwrap()
        );
    }

    #[test]
    fn test_contract_metadata_from_info() {
        let mut listing = listing(&[]);
        listing.info = Some(ApiInfo {
            title: Some("Petstore".to_string()),
            description: Some("Sample".to_string()),
            license: Some("Apache 2.0".to_string()),
            license_url: Some("http://www.apache.org/licenses/LICENSE-2.0".to_string()),
            ..Default::default()
        });

        let definition = translate(&listing, &DeclarationMap::new(KeyConvention::Raw)).unwrap();
        assert_eq!(definition.contract.name, "Petstore");
        assert_eq!(definition.license.unwrap().name, "Apache 2.0");
        assert!(definition.contract.resources.is_empty());
    }

    #[test]
    fn test_translate_loosely_typed_declaration() {
        let mut map = DeclarationMap::new(KeyConvention::Raw);
        map.insert(
            "/levels",
            declaration(
                r#"{
                "apis": [
                    {
                        "path": "/levels",
                        "operations": [
                            {
                                "method": "GET",
                                "parameters": [
                                    { "paramType": "query", "name": "level", "type": "integer", "required": "true", "enum": [1, 2, 3] }
                                ]
                            }
                        ]
                    }
                ],
                "models": { "Level": { "properties": { "rank": { "type": "integer" } } } }
            }"#,
            ),
        );

        let definition = translate(&listing(&["/levels"]), &map).unwrap();

        let get = definition
            .contract
            .resource("/levels")
            .and_then(|r| r.operation("GET"))
            .unwrap();
        assert!(get.query_parameters[0].required);
        assert_eq!(get.query_parameters[0].possible_values, vec!["1", "2", "3"]);

        let level = definition.contract.representation("Level").unwrap();
        assert_eq!(level.property("rank").unwrap().type_name, "integer");
    }

    #[test]
    fn test_join_description() {
        assert_eq!(join_description(Some("a"), Some("b")).as_deref(), Some("a\n\nb"));
        assert_eq!(join_description(Some("a"), None).as_deref(), Some("a"));
        assert_eq!(join_description(None, Some("b")).as_deref(), Some("b"));
        assert_eq!(join_description(None, None), None);
    }
}
