pub mod diagnostics;
pub mod error;
pub mod matcher;
pub mod model;
pub mod normalize;

pub use diagnostics::{Diagnostic, DiagnosticBus, Severity, Span, sort_diagnostics};
pub use error::ModelError;
pub use matcher::validate_service;
pub use model::{ContractModel, ServiceModel};
