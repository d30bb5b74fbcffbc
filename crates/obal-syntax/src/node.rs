//! Tagged-variant syntax nodes. One sum type per syntactic category; each
//! constructor validates child arity and token kinds and fails with
//! [`SyntaxError::MalformedTree`] on violation.

use crate::error::SyntaxError;
use crate::token::{Token, TokenKind};

/// Markdown documentation attached to a declaration, one `#` line per entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownDocumentation {
    lines: Vec<String>,
}

impl MarkdownDocumentation {
    pub fn new(lines: Vec<String>) -> Result<Self, SyntaxError> {
        if lines.iter().any(|line| line.contains('\n')) {
            return Err(SyntaxError::MalformedTree(
                "documentation lines must not contain newlines".to_string(),
            ));
        }
        Ok(Self { lines })
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// Declaration metadata: documentation now, annotations reserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub documentation: Option<MarkdownDocumentation>,
}

impl Metadata {
    pub fn new(documentation: Option<MarkdownDocumentation>) -> Self {
        Self { documentation }
    }
}

/// An expression slot. Only the forms the synthesizer emits are modelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// A plain name reference, e.g. a default value identifier.
    NameReference(Token),
    /// The empty mapping constructor `{}`.
    EmptyMapLiteral,
}

impl Expression {
    pub fn name_reference(token: Token) -> Result<Self, SyntaxError> {
        if token.kind() != TokenKind::Identifier {
            return Err(SyntaxError::MalformedTree(format!(
                "name reference expects an identifier token, got {:?}",
                token.kind()
            )));
        }
        Ok(Expression::NameReference(token))
    }
}

/// A reference to a name, e.g. `Encoding` or the `readonly` keyword used in
/// type position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleNameReference {
    pub name: Token,
}

impl SimpleNameReference {
    pub fn new(name: Token) -> Result<Self, SyntaxError> {
        match name.kind() {
            TokenKind::Identifier | TokenKind::ReadonlyKeyword => Ok(Self { name }),
            other => Err(SyntaxError::MalformedTree(format!(
                "simple name reference expects an identifier or `readonly`, got {other:?}"
            ))),
        }
    }
}

/// `left & right`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntersectionTypeDescriptor {
    pub left: TypeDescriptor,
    pub right: TypeDescriptor,
}

impl IntersectionTypeDescriptor {
    pub fn new(left: TypeDescriptor, right: TypeDescriptor) -> Self {
        Self { left, right }
    }
}

/// A type descriptor slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    Record(RecordTypeDescriptor),
    /// A singleton descriptor whose shape is carried verbatim, e.g. a union
    /// of basic types.
    Singleton(SimpleNameReference),
    Intersection(Box<IntersectionTypeDescriptor>),
    SimpleName(SimpleNameReference),
}

/// `record { ...fields... }` where every field carries a default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTypeDescriptor {
    pub fields: Vec<RecordFieldWithDefault>,
}

impl RecordTypeDescriptor {
    pub fn new(fields: Vec<RecordFieldWithDefault>) -> Self {
        Self { fields }
    }
}

/// `string style = FORM;` with optional documentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFieldWithDefault {
    pub metadata: Option<Metadata>,
    pub type_token: Token,
    pub name: Token,
    pub default: Expression,
}

impl RecordFieldWithDefault {
    pub fn new(
        metadata: Option<Metadata>,
        type_token: Token,
        name: Token,
        default: Expression,
    ) -> Result<Self, SyntaxError> {
        if !type_token.kind().is_keyword() && type_token.kind() != TokenKind::Identifier {
            return Err(SyntaxError::MalformedTree(format!(
                "record field type expects a type keyword or identifier, got {:?}",
                type_token.kind()
            )));
        }
        if name.kind() != TokenKind::Identifier {
            return Err(SyntaxError::MalformedTree(format!(
                "record field name expects an identifier, got {:?}",
                name.kind()
            )));
        }
        Ok(Self {
            metadata,
            type_token,
            name,
            default,
        })
    }
}

/// An ordered list with explicit separator tokens. The separator count is
/// one less than the element count (zero for an empty list).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeparatedList<T> {
    items: Vec<T>,
    separators: Vec<Token>,
}

impl<T> SeparatedList<T> {
    pub fn new(items: Vec<T>, separators: Vec<Token>) -> Result<Self, SyntaxError> {
        let expected = items.len().saturating_sub(1);
        if separators.len() != expected {
            return Err(SyntaxError::MalformedTree(format!(
                "separated list expects {} separator(s) for {} element(s), got {}",
                expected,
                items.len(),
                separators.len()
            )));
        }
        Ok(Self { items, separators })
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn separators(&self) -> &[Token] {
        &self.separators
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A single enum member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    pub name: Token,
}

impl EnumMember {
    pub fn new(name: Token) -> Result<Self, SyntaxError> {
        if name.kind() != TokenKind::Identifier {
            return Err(SyntaxError::MalformedTree(format!(
                "enum member name expects an identifier, got {:?}",
                name.kind()
            )));
        }
        Ok(Self { name })
    }
}

/// `enum Name { A, B }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDeclaration {
    pub metadata: Option<Metadata>,
    pub name: Token,
    pub members: SeparatedList<EnumMember>,
}

impl EnumDeclaration {
    pub fn new(
        metadata: Option<Metadata>,
        name: Token,
        members: SeparatedList<EnumMember>,
    ) -> Result<Self, SyntaxError> {
        if name.kind() != TokenKind::Identifier {
            return Err(SyntaxError::MalformedTree(format!(
                "enum name expects an identifier, got {:?}",
                name.kind()
            )));
        }
        Ok(Self {
            metadata,
            name,
            members,
        })
    }
}

/// `type Name <descriptor>;`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDefinition {
    pub metadata: Option<Metadata>,
    pub name: Token,
    pub descriptor: TypeDescriptor,
}

impl TypeDefinition {
    pub fn new(
        metadata: Option<Metadata>,
        name: Token,
        descriptor: TypeDescriptor,
    ) -> Result<Self, SyntaxError> {
        if name.kind() != TokenKind::Identifier {
            return Err(SyntaxError::MalformedTree(format!(
                "type definition name expects an identifier, got {:?}",
                name.kind()
            )));
        }
        Ok(Self {
            metadata,
            name,
            descriptor,
        })
    }
}

/// A module-level variable, e.g. `final Encoding & readonly defaultEncoding = {};`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleVariableDeclaration {
    pub qualifiers: Vec<Token>,
    pub type_descriptor: TypeDescriptor,
    pub name: Token,
    pub initializer: Expression,
}

impl ModuleVariableDeclaration {
    pub fn new(
        qualifiers: Vec<Token>,
        type_descriptor: TypeDescriptor,
        name: Token,
        initializer: Expression,
    ) -> Result<Self, SyntaxError> {
        if let Some(bad) = qualifiers.iter().find(|q| !q.kind().is_keyword()) {
            return Err(SyntaxError::MalformedTree(format!(
                "variable qualifier expects a keyword token, got {:?}",
                bad.kind()
            )));
        }
        if name.kind() != TokenKind::Identifier {
            return Err(SyntaxError::MalformedTree(format!(
                "variable name expects an identifier, got {:?}",
                name.kind()
            )));
        }
        Ok(Self {
            qualifiers,
            type_descriptor,
            name,
            initializer,
        })
    }
}

/// `import org/module;`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDeclaration {
    pub org: Token,
    pub module: Token,
}

impl ImportDeclaration {
    pub fn new(org: Token, module: Token) -> Result<Self, SyntaxError> {
        for token in [&org, &module] {
            if token.kind() != TokenKind::Identifier {
                return Err(SyntaxError::MalformedTree(format!(
                    "import declaration expects identifier tokens, got {:?}",
                    token.kind()
                )));
            }
        }
        Ok(Self { org, module })
    }
}

/// A function definition carried verbatim, e.g. out of the bundled template.
/// The text includes any attached documentation lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDefinition {
    pub name: String,
    pub text: String,
}

impl FunctionDefinition {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Result<Self, SyntaxError> {
        let name = name.into();
        if name.is_empty() {
            return Err(SyntaxError::MalformedTree(
                "function definition needs a name".to_string(),
            ));
        }
        Ok(Self {
            name,
            text: text.into(),
        })
    }
}

/// A top-level module member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleMember {
    Type(TypeDefinition),
    Enum(EnumDeclaration),
    Variable(ModuleVariableDeclaration),
    Function(FunctionDefinition),
}

impl ModuleMember {
    /// The declared name of this member.
    pub fn name(&self) -> &str {
        match self {
            ModuleMember::Type(def) => def.name.text(),
            ModuleMember::Enum(decl) => decl.name.text(),
            ModuleMember::Variable(var) => var.name.text(),
            ModuleMember::Function(func) => &func.name,
        }
    }
}

/// The root of a module: imports, members, and the end-of-file token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModulePart {
    pub imports: Vec<ImportDeclaration>,
    pub members: Vec<ModuleMember>,
    pub eof: Token,
}

impl ModulePart {
    pub fn new(
        imports: Vec<ImportDeclaration>,
        members: Vec<ModuleMember>,
        eof: Token,
    ) -> Result<Self, SyntaxError> {
        if eof.kind() != TokenKind::Eof {
            return Err(SyntaxError::MalformedTree(format!(
                "module part expects an EOF token, got {:?}",
                eof.kind()
            )));
        }
        Ok(Self {
            imports,
            members,
            eof,
        })
    }

    /// Names of the members in declaration order.
    pub fn member_names(&self) -> Vec<&str> {
        self.members.iter().map(ModuleMember::name).collect()
    }
}
