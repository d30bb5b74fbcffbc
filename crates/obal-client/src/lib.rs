pub mod capabilities;
pub mod error;
pub mod template;
pub mod utils_generator;

pub use capabilities::ClientCapabilities;
pub use error::{CapabilityError, GenerateError, TemplateError};
pub use template::load_utility_template;
pub use utils_generator::{generate_utils_module, selected_functions};
