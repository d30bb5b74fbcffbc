use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, error};
use obal_syntax::{
    FunctionDefinition, ModuleMember, ModulePart, ScannedMember, Token, TokenKind,
    scan_module_members,
};

use crate::error::TemplateError;

/// Canonical implementation of every utility function, bundled at build time.
static UTILS_TEMPLATE: &str = include_str!("../templates/utils.bal");

/// Load the bundled utility template as a parsed module part.
///
/// The resource is staged through a uniquely named temporary directory and
/// read back from disk; the syntax facility works against project-rooted
/// paths, not in-memory bytes. The directory is released before returning;
/// a failed release is logged and suppressed. Non-function declarations in
/// the template are ignored.
pub fn load_utility_template() -> Result<ModulePart, TemplateError> {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();
    let dir = tempfile::Builder::new()
        .prefix(&format!(".utils-tmp{nanos}-"))
        .tempdir()?;
    let path = dir.path().join("utils.bal");
    fs::write(&path, UTILS_TEMPLATE)?;
    let source = fs::read_to_string(&path)?;
    debug!("staged utility template at {}", path.display());

    let mut members = Vec::new();
    for member in scan_module_members(&source) {
        if let ScannedMember::Function { name, text } = member {
            members.push(ModuleMember::Function(FunctionDefinition::new(name, text)?));
        }
    }
    if members.is_empty() {
        return Err(TemplateError::Empty);
    }

    if let Err(err) = dir.close() {
        error!("unable to delete the temporary template directory: {err}");
    }

    Ok(ModulePart::new(vec![], members, Token::of(TokenKind::Eof)?)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_exposes_the_full_catalog_in_order() {
        let template = load_utility_template().unwrap();
        assert_eq!(
            template.member_names(),
            vec![
                "createFormURLEncodedRequestBody",
                "getDeepObjectStyleRequest",
                "getFormStyleRequest",
                "getEncodedUri",
                "getOriginalKey",
                "getSerializedArray",
                "getPathForQueryParam",
                "getSerializedRecordArray",
                "getMapForHeaders",
            ]
        );
    }

    #[test]
    fn template_has_no_imports_of_its_own() {
        let template = load_utility_template().unwrap();
        assert!(template.imports.is_empty());
    }

    #[test]
    fn function_members_keep_their_documentation() {
        let template = load_utility_template().unwrap();
        let ModuleMember::Function(func) = &template.members[3] else {
            panic!("expected a function member");
        };
        assert_eq!(func.name, "getEncodedUri");
        assert!(func.text.starts_with('#'));
        assert!(func.text.contains("url:encode"));
    }
}
