pub mod use_cases;

pub use use_cases::import_engine::{ImportEngine, ImportOptions, ImportOutcome};
pub use use_cases::template_generator::generate_template;
