use thiserror::Error;

#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("capability flag `{0}` cannot be lowered once raised")]
    IllegalTransition(&'static str),
}

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("utility template is unavailable: {0}")]
    Unavailable(#[from] std::io::Error),

    #[error("utility template declares no functions")]
    Empty,

    #[error(transparent)]
    Syntax(#[from] obal_syntax::SyntaxError),
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Syntax(#[from] obal_syntax::SyntaxError),
}
