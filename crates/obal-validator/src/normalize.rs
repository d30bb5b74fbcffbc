//! Return-type normalisation. A resource return type is a union of
//! branches; this flattens it to `status code → media type → payload` so
//! the matcher can compute set differences.
//!
//! Normalisation table:
//!
//! | branch                    | code | media type                 |
//! |---------------------------|------|----------------------------|
//! | `error`                   | 500  | text/plain                 |
//! | `()` / no return type     | 202  | —                          |
//! | bare payload type `T`     | 200  | inferred from `T`          |
//! | explicit `status`/`media` | as given, media inferred from body when absent |
//!
//! Media inference follows the HTTP payload rules: `string` → text/plain,
//! `xml` → application/xml, `byte[]` → application/octet-stream, anything
//! else (records, json, maps, numerics) → application/json.

use std::collections::BTreeMap;

use crate::model::{ReturnBranch, ServiceResource};

const STATUS_OK: u16 = 200;
const STATUS_ACCEPTED: u16 = 202;
const STATUS_INTERNAL_ERROR: u16 = 500;

const MEDIA_TEXT_PLAIN: &str = "text/plain";
const MEDIA_APPLICATION_JSON: &str = "application/json";
const MEDIA_APPLICATION_XML: &str = "application/xml";
const MEDIA_OCTET_STREAM: &str = "application/octet-stream";

/// A flattened return type: `status code → media type → payload schema`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedReturn {
    pub codes: BTreeMap<u16, BTreeMap<String, Option<String>>>,
}

impl NormalizedReturn {
    fn add(&mut self, code: u16, media: Option<(String, Option<String>)>) {
        let entry = self.codes.entry(code).or_default();
        if let Some((media_type, schema)) = media {
            entry.insert(media_type, schema);
        }
    }
}

/// The media type the host infers for a payload type.
pub fn infer_media_type(payload: &str) -> &'static str {
    match payload {
        "string" => MEDIA_TEXT_PLAIN,
        "xml" => MEDIA_APPLICATION_XML,
        "byte[]" => MEDIA_OCTET_STREAM,
        _ => MEDIA_APPLICATION_JSON,
    }
}

/// Flatten a resource return type to its status codes and media types.
pub fn normalize_return(resource: &ServiceResource) -> NormalizedReturn {
    let mut normalized = NormalizedReturn::default();

    if resource.returns.is_empty() {
        normalized.add(STATUS_ACCEPTED, None);
        return normalized;
    }

    for branch in &resource.returns {
        match branch {
            ReturnBranch::Simple(name) => match name.as_str() {
                "error" => normalized.add(
                    STATUS_INTERNAL_ERROR,
                    Some((MEDIA_TEXT_PLAIN.to_string(), None)),
                ),
                "()" | "nil" => normalized.add(STATUS_ACCEPTED, None),
                payload => normalized.add(
                    STATUS_OK,
                    Some((
                        infer_media_type(payload).to_string(),
                        Some(payload.to_string()),
                    )),
                ),
            },
            ReturnBranch::Detailed(branch) => {
                let code = branch.status.unwrap_or(if branch.body.is_some() {
                    STATUS_OK
                } else {
                    STATUS_ACCEPTED
                });
                let media = match (&branch.media_type, &branch.body) {
                    (Some(media), body) => Some((media.clone(), body.clone())),
                    (None, Some(body)) => {
                        Some((infer_media_type(body).to_string(), Some(body.clone())))
                    }
                    (None, None) => None,
                };
                normalized.add(code, media);
            }
        }
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Span;
    use crate::model::DetailedBranch;

    fn resource(returns: Vec<ReturnBranch>) -> ServiceResource {
        ServiceResource {
            method: "get".to_string(),
            path: "/".to_string(),
            signature_span: Span::default(),
            body_span: Span::default(),
            returns,
        }
    }

    fn simple(name: &str) -> ReturnBranch {
        ReturnBranch::Simple(name.to_string())
    }

    fn status(code: u16) -> ReturnBranch {
        ReturnBranch::Detailed(DetailedBranch {
            status: Some(code),
            media_type: None,
            body: None,
        })
    }

    #[test]
    fn no_return_type_maps_to_accepted() {
        let normalized = normalize_return(&resource(vec![]));
        assert_eq!(normalized.codes.keys().copied().collect::<Vec<_>>(), vec![202]);
        assert!(normalized.codes[&202].is_empty());
    }

    #[test]
    fn error_maps_to_internal_error_with_text_plain() {
        let normalized = normalize_return(&resource(vec![simple("error")]));
        assert_eq!(normalized.codes.keys().copied().collect::<Vec<_>>(), vec![500]);
        assert!(normalized.codes[&500].contains_key("text/plain"));
    }

    #[test]
    fn nil_maps_to_accepted() {
        let normalized = normalize_return(&resource(vec![simple("()")]));
        assert!(normalized.codes.contains_key(&202));
    }

    #[test]
    fn bare_payload_maps_to_ok_with_inferred_media() {
        let normalized = normalize_return(&resource(vec![simple("string")]));
        assert_eq!(
            normalized.codes[&200].get("text/plain"),
            Some(&Some("string".to_string()))
        );

        let normalized = normalize_return(&resource(vec![simple("Pet")]));
        assert_eq!(
            normalized.codes[&200].get("application/json"),
            Some(&Some("Pet".to_string()))
        );
    }

    #[test]
    fn union_branches_flatten_and_merge() {
        let normalized = normalize_return(&resource(vec![
            status(200),
            status(400),
            status(401),
            status(404),
            status(200),
        ]));
        assert_eq!(
            normalized.codes.keys().copied().collect::<Vec<_>>(),
            vec![200, 400, 401, 404]
        );
    }

    #[test]
    fn explicit_media_type_wins_over_inference() {
        let normalized = normalize_return(&resource(vec![ReturnBranch::Detailed(
            DetailedBranch {
                status: Some(201),
                media_type: Some("application/xml".to_string()),
                body: Some("Pet".to_string()),
            },
        )]));
        assert_eq!(
            normalized.codes[&201].get("application/xml"),
            Some(&Some("Pet".to_string()))
        );
    }

    #[test]
    fn media_inference_table() {
        assert_eq!(infer_media_type("string"), "text/plain");
        assert_eq!(infer_media_type("xml"), "application/xml");
        assert_eq!(infer_media_type("byte[]"), "application/octet-stream");
        assert_eq!(infer_media_type("json"), "application/json");
        assert_eq!(infer_media_type("Pet"), "application/json");
    }
}
