//! Pairs contract operations with service resources and reports structural
//! mismatches. Every finding kind is emitted at most once per direction per
//! resource, listing all offending elements in ascending order.

use std::collections::BTreeSet;

use crate::diagnostics::{Diagnostic, DiagnosticBus, Span};
use crate::model::{ContractModel, ContractOperation, PayloadSchema, ServiceModel, ServiceResource};
use crate::normalize::{NormalizedReturn, normalize_return};

/// Validate a service implementation against a contract, reporting findings
/// to the bus in contract declaration order.
pub fn validate_service(contract: &ContractModel, service: &ServiceModel, bus: &mut DiagnosticBus) {
    for operation in &contract.operations {
        match service.find_resource(&operation.method, &operation.path) {
            Some(resource) => check_operation(operation, resource, service, bus),
            None => {
                bus.report(Diagnostic::error(
                    &service.file,
                    service.span,
                    format!(
                        "missing ballerina service resource for the method '{}' that associated \
                         with the path '{}'.",
                        operation.method.to_ascii_lowercase(),
                        operation.path
                    ),
                ));
            }
        }
    }
}

fn check_operation(
    operation: &ContractOperation,
    resource: &ServiceResource,
    service: &ServiceModel,
    bus: &mut DiagnosticBus,
) {
    let method = operation.method.to_ascii_lowercase();
    let implemented = normalize_return(resource);

    let contract_codes: BTreeSet<u16> = operation.responses.keys().copied().collect();
    let impl_codes: BTreeSet<u16> = implemented.codes.keys().copied().collect();

    let undefined: Vec<u16> = impl_codes.difference(&contract_codes).copied().collect();
    if !undefined.is_empty() {
        bus.report(Diagnostic::error(
            &service.file,
            resource.body_span,
            format!(
                "undefined status code/s '{}' for return type in the counterpart ballerina \
                 service resource (method: '{}', path: '{}')",
                format_codes(&undefined),
                method,
                operation.path
            ),
        ));
    }

    let missing: Vec<u16> = contract_codes.difference(&impl_codes).copied().collect();
    if !missing.is_empty() {
        bus.report(Diagnostic::error(
            &service.file,
            resource.signature_span,
            format!(
                "missing implementation for return code/s '{}' in the counterpart ballerina \
                 service resource (method: '{}', path: '{}')",
                format_codes(&missing),
                method,
                operation.path
            ),
        ));
    }

    for code in contract_codes.intersection(&impl_codes) {
        check_media_types(operation, resource, service, &implemented, *code, &method, bus);
    }
}

fn check_media_types(
    operation: &ContractOperation,
    resource: &ServiceResource,
    service: &ServiceModel,
    implemented: &NormalizedReturn,
    code: u16,
    method: &str,
    bus: &mut DiagnosticBus,
) {
    let contract_content = &operation.responses[&code].content;
    let impl_content = &implemented.codes[&code];

    let contract_media: BTreeSet<&str> = contract_content.keys().map(String::as_str).collect();
    let impl_media: BTreeSet<&str> = impl_content.keys().map(String::as_str).collect();

    let undefined: Vec<&str> = impl_media.difference(&contract_media).copied().collect();
    if !undefined.is_empty() {
        bus.report(Diagnostic::error(
            &service.file,
            resource.body_span,
            format!(
                "undefined resource return mediaType/s '{}' for return status code '{}' in the \
                 counterpart ballerina service resource (method: '{}', path: '{}')",
                format_list(&undefined),
                code,
                method,
                operation.path
            ),
        ));
    }

    let missing: Vec<&str> = contract_media.difference(&impl_media).copied().collect();
    if !missing.is_empty() {
        bus.report(Diagnostic::error(
            &service.file,
            resource.signature_span,
            format!(
                "missing implementation for return mediaType/s '{}' for return code '{}' in the \
                 http method '{}' that associated with the path '{}'.",
                format_list(&missing),
                code,
                method,
                operation.path
            ),
        ));
    }

    for media in contract_media.intersection(&impl_media) {
        let PayloadSchema::Record(expected) = &contract_content[*media] else {
            continue;
        };
        let Some(record) = impl_content[*media]
            .as_deref()
            .and_then(|name| service.find_record(name))
        else {
            continue;
        };
        check_record_fields(expected, record, service, bus);
    }
}

fn check_record_fields(
    expected: &crate::model::RecordSchema,
    record: &crate::model::ServiceRecord,
    service: &ServiceModel,
    bus: &mut DiagnosticBus,
) {
    for (field_name, contract_type) in &expected.fields {
        let Some(field) = record.fields.iter().find(|f| &f.name == field_name) else {
            continue;
        };
        if &field.field_type != contract_type {
            bus.report(field_type_mismatch(
                &service.file,
                field.span,
                contract_type,
                &field.field_type,
                field_name,
                &record.name,
            ));
        }
    }
}

fn field_type_mismatch(
    file: &str,
    span: Span,
    expected: &str,
    found: &str,
    field: &str,
    record: &str,
) -> Diagnostic {
    Diagnostic::error(
        file,
        span,
        format!(
            "implementation type does not match with openapi contract type (expected '{expected}', \
             found '{found}') for the field '{field}' of type '{record}'"
        ),
    )
}

fn format_codes(codes: &[u16]) -> String {
    let rendered: Vec<String> = codes.iter().map(u16::to_string).collect();
    format!("[{}]", rendered.join(", "))
}

fn format_list(items: &[&str]) -> String {
    format!("[{}]", items.join(", "))
}
