//! Synthesizes the client utility module. The selection of functions is
//! driven entirely by the capability fingerprint; bodies come verbatim from
//! the bundled template, type declarations are built fresh.

use indexmap::IndexSet;
use obal_syntax::{
    EnumDeclaration, EnumMember, Expression, ImportDeclaration, IntersectionTypeDescriptor,
    MarkdownDocumentation, Metadata, ModuleMember, ModulePart, ModuleVariableDeclaration,
    RecordFieldWithDefault, RecordTypeDescriptor, SeparatedList, SimpleNameReference, SyntaxError,
    Token, TokenKind, TypeDefinition, TypeDescriptor,
};

use crate::capabilities::ClientCapabilities;
use crate::error::GenerateError;
use crate::template;

pub const CREATE_FORM_URLENCODED_REQUEST_BODY: &str = "createFormURLEncodedRequestBody";
pub const GET_DEEP_OBJECT_STYLE_REQUEST: &str = "getDeepObjectStyleRequest";
pub const GET_FORM_STYLE_REQUEST: &str = "getFormStyleRequest";
pub const GET_SERIALIZED_ARRAY: &str = "getSerializedArray";
pub const GET_ENCODED_URI: &str = "getEncodedUri";
pub const GET_ORIGINAL_KEY: &str = "getOriginalKey";
pub const GET_PATH_FOR_QUERY_PARAM: &str = "getPathForQueryParam";
pub const GET_MAP_FOR_HEADERS: &str = "getMapForHeaders";
pub const GET_SERIALIZED_RECORD_ARRAY: &str = "getSerializedRecordArray";

/// Names of the utility functions the client needs, in first-offer order.
pub fn selected_functions(caps: &ClientCapabilities) -> IndexSet<&'static str> {
    let mut selected = IndexSet::new();
    if caps.request_body_encoding_found() {
        selected.extend([
            CREATE_FORM_URLENCODED_REQUEST_BODY,
            GET_DEEP_OBJECT_STYLE_REQUEST,
            GET_FORM_STYLE_REQUEST,
            GET_ENCODED_URI,
            GET_ORIGINAL_KEY,
            GET_SERIALIZED_ARRAY,
            GET_SERIALIZED_RECORD_ARRAY,
        ]);
    }
    if caps.query_params_found() {
        selected.extend([
            GET_DEEP_OBJECT_STYLE_REQUEST,
            GET_FORM_STYLE_REQUEST,
            GET_ENCODED_URI,
            GET_ORIGINAL_KEY,
            GET_SERIALIZED_ARRAY,
            GET_PATH_FOR_QUERY_PARAM,
            GET_SERIALIZED_RECORD_ARRAY,
        ]);
    }
    if caps.headers_found() {
        selected.insert(GET_MAP_FOR_HEADERS);
    }
    selected
}

/// Synthesize the utility module for the given capability fingerprint.
///
/// Member order is fixed: the type preamble (when any encoding-aware
/// function is selected), then template functions in template declaration
/// order. Output is byte-identical across runs for the same fingerprint.
pub fn generate_utils_module(caps: &ClientCapabilities) -> Result<ModulePart, GenerateError> {
    let selected = selected_functions(caps);

    let mut members: Vec<ModuleMember> = Vec::new();
    if caps.request_body_encoding_found() || caps.query_params_found() {
        members.push(encoding_record()?);
        members.push(style_enum()?);
        members.push(simple_basic_type()?);
        members.push(default_encoding()?);
    }

    let template = template::load_utility_template()?;
    for member in template.members {
        if let ModuleMember::Function(func) = member
            && selected.contains(func.name.as_str())
        {
            members.push(ModuleMember::Function(func));
        }
    }

    let mut imports = Vec::new();
    let only_headers = selected.len() == 1 && selected.contains(GET_MAP_FOR_HEADERS);
    if !selected.is_empty() && !only_headers {
        imports.push(ImportDeclaration::new(
            Token::identifier("ballerina")?,
            Token::identifier("url")?,
        )?);
    }

    Ok(ModulePart::new(imports, members, Token::of(TokenKind::Eof)?)?)
}

fn doc(text: &str) -> Result<Metadata, SyntaxError> {
    Ok(Metadata::new(Some(MarkdownDocumentation::new(vec![
        text.to_string(),
    ])?)))
}

/// `Encoding` record with defaulted `style` and `explode` fields.
fn encoding_record() -> Result<ModuleMember, SyntaxError> {
    let style_field = RecordFieldWithDefault::new(
        Some(doc("Defines how multiple values are delimited")?),
        Token::of(TokenKind::StringKeyword)?,
        Token::identifier("style")?,
        Expression::name_reference(Token::identifier("FORM")?)?,
    )?;
    let explode_field = RecordFieldWithDefault::new(
        Some(doc(
            "Specifies whether arrays and objects should generate as separate fields",
        )?),
        Token::of(TokenKind::BooleanKeyword)?,
        Token::identifier("explode")?,
        Expression::name_reference(Token::identifier("true")?)?,
    )?;
    let definition = TypeDefinition::new(
        Some(doc("Represents encoding mechanism details.")?),
        Token::identifier("Encoding")?,
        TypeDescriptor::Record(RecordTypeDescriptor::new(vec![style_field, explode_field])),
    )?;
    Ok(ModuleMember::Type(definition))
}

/// `EncodingStyle` enum with the four delimiting styles.
fn style_enum() -> Result<ModuleMember, SyntaxError> {
    let members = vec![
        EnumMember::new(Token::identifier("DEEPOBJECT")?)?,
        EnumMember::new(Token::identifier("FORM")?)?,
        EnumMember::new(Token::identifier("SPACEDELIMITED")?)?,
        EnumMember::new(Token::identifier("PIPEDELIMITED")?)?,
    ];
    let comma = Token::of(TokenKind::Comma)?;
    let separators = vec![comma.clone(), comma.clone(), comma];
    let declaration = EnumDeclaration::new(
        None,
        Token::identifier("EncodingStyle")?,
        SeparatedList::new(members, separators)?,
    )?;
    Ok(ModuleMember::Enum(declaration))
}

/// `type SimpleBasicType string|boolean|int|float|decimal;`
fn simple_basic_type() -> Result<ModuleMember, SyntaxError> {
    let descriptor = TypeDescriptor::Singleton(SimpleNameReference::new(Token::identifier(
        "string|boolean|int|float|decimal",
    )?)?);
    let definition = TypeDefinition::new(None, Token::identifier("SimpleBasicType")?, descriptor)?;
    Ok(ModuleMember::Type(definition))
}

/// `final Encoding & readonly defaultEncoding = {};`
fn default_encoding() -> Result<ModuleMember, SyntaxError> {
    let descriptor = TypeDescriptor::Intersection(Box::new(IntersectionTypeDescriptor::new(
        TypeDescriptor::SimpleName(SimpleNameReference::new(Token::identifier("Encoding")?)?),
        TypeDescriptor::SimpleName(SimpleNameReference::new(Token::of(
            TokenKind::ReadonlyKeyword,
        )?)?),
    )));
    let variable = ModuleVariableDeclaration::new(
        vec![Token::of(TokenKind::FinalKeyword)?],
        descriptor,
        Token::identifier("defaultEncoding")?,
        Expression::EmptyMapLiteral,
    )?;
    Ok(ModuleMember::Variable(variable))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(query: bool, headers: bool, body: bool) -> ClientCapabilities {
        let mut caps = ClientCapabilities::new();
        if query {
            caps.set_query_params_found(true).unwrap();
        }
        if headers {
            caps.set_headers_found(true).unwrap();
        }
        if body {
            caps.set_request_body_encoding_found(true).unwrap();
        }
        caps
    }

    #[test]
    fn selection_is_deduplicated_in_first_offer_order() {
        let selected = selected_functions(&caps(true, false, true));
        let names: Vec<&str> = selected.into_iter().collect();
        assert_eq!(
            names,
            vec![
                CREATE_FORM_URLENCODED_REQUEST_BODY,
                GET_DEEP_OBJECT_STYLE_REQUEST,
                GET_FORM_STYLE_REQUEST,
                GET_ENCODED_URI,
                GET_ORIGINAL_KEY,
                GET_SERIALIZED_ARRAY,
                GET_SERIALIZED_RECORD_ARRAY,
                GET_PATH_FOR_QUERY_PARAM,
            ]
        );
    }

    #[test]
    fn headers_only_selects_the_header_helper() {
        let selected = selected_functions(&caps(false, true, false));
        let names: Vec<&str> = selected.into_iter().collect();
        assert_eq!(names, vec![GET_MAP_FOR_HEADERS]);
    }

    #[test]
    fn empty_fingerprint_selects_nothing() {
        assert!(selected_functions(&caps(false, false, false)).is_empty());
    }
}
