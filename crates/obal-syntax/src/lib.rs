pub mod error;
pub mod node;
pub mod scan;
pub mod token;
pub mod writer;

pub use error::SyntaxError;
pub use node::{
    EnumDeclaration, EnumMember, Expression, FunctionDefinition, ImportDeclaration,
    IntersectionTypeDescriptor, MarkdownDocumentation, Metadata, ModuleMember, ModulePart,
    ModuleVariableDeclaration, RecordFieldWithDefault, RecordTypeDescriptor, SeparatedList,
    SimpleNameReference, TypeDefinition, TypeDescriptor,
};
pub use scan::{ScannedMember, scan_module_members};
pub use token::{Token, TokenKind};
pub use writer::write_module;
