//! Deterministic source writer. Nodes carry no positions; layout (and with
//! it every span) is resolved here, so identical trees serialize to
//! byte-identical text.

use crate::node::{
    EnumDeclaration, Expression, Metadata, ModuleMember, ModulePart, ModuleVariableDeclaration,
    RecordTypeDescriptor, TypeDefinition, TypeDescriptor,
};

const INDENT: &str = "    ";

/// Serialize a module part to Ballerina source.
pub fn write_module(module: &ModulePart) -> String {
    let mut blocks: Vec<String> = Vec::new();

    if !module.imports.is_empty() {
        let imports = module
            .imports
            .iter()
            .map(|import| format!("import {}/{};", import.org.render(), import.module.render()))
            .collect::<Vec<_>>()
            .join("\n");
        blocks.push(imports);
    }

    for member in &module.members {
        blocks.push(write_member(member));
    }

    if blocks.is_empty() {
        return String::new();
    }

    let mut out = blocks.join("\n\n");
    out.push('\n');
    out
}

fn write_member(member: &ModuleMember) -> String {
    match member {
        ModuleMember::Type(def) => write_type_definition(def),
        ModuleMember::Enum(decl) => write_enum(decl),
        ModuleMember::Variable(var) => write_variable(var),
        ModuleMember::Function(func) => func.text.trim_end().to_string(),
    }
}

fn write_doc_lines(out: &mut String, metadata: &Option<Metadata>, indent: &str) {
    if let Some(meta) = metadata
        && let Some(ref doc) = meta.documentation
    {
        for line in doc.lines() {
            out.push_str(indent);
            out.push_str("# ");
            out.push_str(line);
            out.push('\n');
        }
    }
}

fn write_type_definition(def: &TypeDefinition) -> String {
    let mut out = String::new();
    write_doc_lines(&mut out, &def.metadata, "");
    out.push_str("type ");
    out.push_str(&def.name.render());
    out.push(' ');
    out.push_str(&write_type_descriptor(&def.descriptor));
    out.push(';');
    out
}

fn write_type_descriptor(descriptor: &TypeDescriptor) -> String {
    match descriptor {
        TypeDescriptor::Record(record) => write_record(record),
        TypeDescriptor::Singleton(reference) | TypeDescriptor::SimpleName(reference) => {
            reference.name.render()
        }
        TypeDescriptor::Intersection(intersection) => format!(
            "{} & {}",
            write_type_descriptor(&intersection.left),
            write_type_descriptor(&intersection.right)
        ),
    }
}

fn write_record(record: &RecordTypeDescriptor) -> String {
    let mut out = String::from("record {\n");
    for field in &record.fields {
        write_doc_lines(&mut out, &field.metadata, INDENT);
        out.push_str(INDENT);
        out.push_str(&field.type_token.render());
        out.push(' ');
        out.push_str(&field.name.render());
        out.push_str(" = ");
        out.push_str(&write_expression(&field.default));
        out.push_str(";\n");
    }
    out.push('}');
    out
}

fn write_enum(decl: &EnumDeclaration) -> String {
    let mut out = String::new();
    write_doc_lines(&mut out, &decl.metadata, "");
    out.push_str("enum ");
    out.push_str(&decl.name.render());
    out.push_str(" {\n");
    for (index, member) in decl.members.items().iter().enumerate() {
        out.push_str(INDENT);
        out.push_str(&member.name.render());
        if let Some(separator) = decl.members.separators().get(index) {
            out.push_str(&separator.render());
        }
        out.push('\n');
    }
    out.push('}');
    out
}

fn write_variable(var: &ModuleVariableDeclaration) -> String {
    let mut out = String::new();
    for qualifier in &var.qualifiers {
        out.push_str(&qualifier.render());
        out.push(' ');
    }
    out.push_str(&write_type_descriptor(&var.type_descriptor));
    out.push(' ');
    out.push_str(&var.name.render());
    out.push_str(" = ");
    out.push_str(&write_expression(&var.initializer));
    out.push(';');
    out
}

fn write_expression(expression: &Expression) -> String {
    match expression {
        Expression::NameReference(token) => token.render(),
        Expression::EmptyMapLiteral => "{}".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{
        EnumMember, FunctionDefinition, ImportDeclaration, IntersectionTypeDescriptor,
        MarkdownDocumentation, RecordFieldWithDefault, SeparatedList, SimpleNameReference,
    };
    use crate::token::{Token, TokenKind};

    fn eof() -> Token {
        Token::of(TokenKind::Eof).unwrap()
    }

    #[test]
    fn empty_module_serializes_to_nothing() {
        let module = ModulePart::new(vec![], vec![], eof()).unwrap();
        assert_eq!(write_module(&module), "");
    }

    #[test]
    fn import_line() {
        let import = ImportDeclaration::new(
            Token::identifier("ballerina").unwrap(),
            Token::identifier("url").unwrap(),
        )
        .unwrap();
        let module = ModulePart::new(vec![import], vec![], eof()).unwrap();
        assert_eq!(write_module(&module), "import ballerina/url;\n");
    }

    #[test]
    fn documented_record_type() {
        let field = RecordFieldWithDefault::new(
            Some(Metadata::new(Some(
                MarkdownDocumentation::new(vec!["Defines how multiple values are delimited"
                    .to_string()])
                .unwrap(),
            ))),
            Token::of(TokenKind::StringKeyword).unwrap(),
            Token::identifier("style").unwrap(),
            Expression::name_reference(Token::identifier("FORM").unwrap()).unwrap(),
        )
        .unwrap();
        let def = TypeDefinition::new(
            Some(Metadata::new(Some(
                MarkdownDocumentation::new(vec!["Represents encoding mechanism details."
                    .to_string()])
                .unwrap(),
            ))),
            Token::identifier("Encoding").unwrap(),
            TypeDescriptor::Record(RecordTypeDescriptor::new(vec![field])),
        )
        .unwrap();
        let module = ModulePart::new(vec![], vec![ModuleMember::Type(def)], eof()).unwrap();
        assert_eq!(
            write_module(&module),
            "# Represents encoding mechanism details.\n\
             type Encoding record {\n    \
             # Defines how multiple values are delimited\n    \
             string style = FORM;\n\
             };\n"
        );
    }

    #[test]
    fn enum_members_are_comma_separated() {
        let comma = Token::of(TokenKind::Comma).unwrap();
        let members = SeparatedList::new(
            vec![
                EnumMember::new(Token::identifier("DEEPOBJECT").unwrap()).unwrap(),
                EnumMember::new(Token::identifier("FORM").unwrap()).unwrap(),
            ],
            vec![comma],
        )
        .unwrap();
        let decl =
            EnumDeclaration::new(None, Token::identifier("EncodingStyle").unwrap(), members)
                .unwrap();
        let module = ModulePart::new(vec![], vec![ModuleMember::Enum(decl)], eof()).unwrap();
        assert_eq!(
            write_module(&module),
            "enum EncodingStyle {\n    DEEPOBJECT,\n    FORM\n}\n"
        );
    }

    #[test]
    fn intersection_variable() {
        let descriptor = TypeDescriptor::Intersection(Box::new(IntersectionTypeDescriptor::new(
            TypeDescriptor::SimpleName(
                SimpleNameReference::new(Token::identifier("Encoding").unwrap()).unwrap(),
            ),
            TypeDescriptor::SimpleName(
                SimpleNameReference::new(Token::of(TokenKind::ReadonlyKeyword).unwrap()).unwrap(),
            ),
        )));
        let var = ModuleVariableDeclaration::new(
            vec![Token::of(TokenKind::FinalKeyword).unwrap()],
            descriptor,
            Token::identifier("defaultEncoding").unwrap(),
            Expression::EmptyMapLiteral,
        )
        .unwrap();
        let module = ModulePart::new(vec![], vec![ModuleMember::Variable(var)], eof()).unwrap();
        assert_eq!(
            write_module(&module),
            "final Encoding & readonly defaultEncoding = {};\n"
        );
    }

    #[test]
    fn function_text_is_verbatim_and_blocks_are_blank_line_separated() {
        let func = FunctionDefinition::new("getMapForHeaders", "function getMapForHeaders() {\n}\n")
            .unwrap();
        let var = ModuleVariableDeclaration::new(
            vec![Token::of(TokenKind::FinalKeyword).unwrap()],
            TypeDescriptor::SimpleName(
                SimpleNameReference::new(Token::identifier("Encoding").unwrap()).unwrap(),
            ),
            Token::identifier("defaultEncoding").unwrap(),
            Expression::EmptyMapLiteral,
        )
        .unwrap();
        let module = ModulePart::new(
            vec![],
            vec![
                ModuleMember::Variable(var),
                ModuleMember::Function(func),
            ],
            eof(),
        )
        .unwrap();
        assert_eq!(
            write_module(&module),
            "final Encoding defaultEncoding = {};\n\nfunction getMapForHeaders() {\n}\n"
        );
    }
}
