pub mod aggregate;
pub mod debounce;

pub use aggregate::{EngineError, TranslationEngine};
pub use debounce::Debouncer;
