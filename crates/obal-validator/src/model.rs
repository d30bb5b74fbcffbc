//! Reduced models for the two sides of the comparison. Parsing a full
//! OpenAPI document or Ballerina source is out of scope; callers hand in
//! these already-reduced descriptions (YAML or JSON).

use indexmap::IndexMap;
use serde::Deserialize;

use crate::diagnostics::Span;
use crate::error::ModelError;

/// The contract side: operations with their declared responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ContractModel {
    pub operations: Vec<ContractOperation>,
}

/// One contract operation, addressed by `(method, path)`.
#[derive(Debug, Clone, Deserialize)]
pub struct ContractOperation {
    pub method: String,
    pub path: String,
    /// Declared status codes, each with its media types and payloads.
    #[serde(default)]
    pub responses: IndexMap<u16, ContractResponse>,
}

/// The response declared for one status code.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContractResponse {
    /// Media type → payload schema.
    #[serde(default)]
    pub content: IndexMap<String, PayloadSchema>,
}

/// A payload schema, reduced to a named record with typed fields or a
/// primitive type name.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PayloadSchema {
    Record(RecordSchema),
    Primitive(String),
}

/// A named record with `field name → type name` entries.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordSchema {
    pub record: String,
    #[serde(default)]
    pub fields: IndexMap<String, String>,
}

/// The implementation side: one service file with its resources and record
/// declarations.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceModel {
    /// Source file name used in diagnostics.
    pub file: String,
    /// Span of the service declaration, anchor for resource-missing findings.
    #[serde(default)]
    pub span: Span,
    #[serde(default)]
    pub resources: Vec<ServiceResource>,
    #[serde(default)]
    pub records: Vec<ServiceRecord>,
}

impl ServiceModel {
    pub fn find_resource(&self, method: &str, path: &str) -> Option<&ServiceResource> {
        self.resources
            .iter()
            .find(|r| r.method.eq_ignore_ascii_case(method) && r.path == path)
    }

    pub fn find_record(&self, name: &str) -> Option<&ServiceRecord> {
        self.records.iter().find(|r| r.name == name)
    }
}

/// One service resource with its return-type description.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceResource {
    pub method: String,
    pub path: String,
    /// Span of the resource signature.
    #[serde(default)]
    pub signature_span: Span,
    /// Span of the resource body.
    #[serde(default)]
    pub body_span: Span,
    /// Union branches of the declared return type. Empty means the resource
    /// declares no return type.
    #[serde(default)]
    pub returns: Vec<ReturnBranch>,
}

/// One branch of a resource return type.
///
/// The short string form covers `"error"`, the nil type `"()"`, and bare
/// payload types; the detailed form names an explicit status code and,
/// optionally, a media type and body.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ReturnBranch {
    Simple(String),
    Detailed(DetailedBranch),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailedBranch {
    pub status: Option<u16>,
    pub media_type: Option<String>,
    pub body: Option<String>,
}

/// A record declared in the service file; fields carry their source spans.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceRecord {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<ServiceField>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub span: Span,
}

/// Parse a contract model from YAML.
pub fn contract_from_yaml(input: &str) -> Result<ContractModel, ModelError> {
    Ok(serde_yaml_ng::from_str(input)?)
}

/// Parse a contract model from JSON.
pub fn contract_from_json(input: &str) -> Result<ContractModel, ModelError> {
    Ok(serde_json::from_str(input)?)
}

/// Parse a service model from YAML.
pub fn service_from_yaml(input: &str) -> Result<ServiceModel, ModelError> {
    Ok(serde_yaml_ng::from_str(input)?)
}

/// Parse a service model from JSON.
pub fn service_from_json(input: &str) -> Result<ServiceModel, ModelError> {
    Ok(serde_json::from_str(input)?)
}
