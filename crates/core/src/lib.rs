pub mod candidate;
pub mod config;
pub mod errors;
pub mod stage;
pub mod transcript;
pub mod validate;

pub use candidate::{CandidateField, CandidateRecord};
pub use config::{AppConfig, ConfigError, ConfigOverrides, LlmConfig, LoadOptions, LogFormat};
pub use errors::ApplicationError;
pub use stage::Stage;
pub use transcript::{Role, Transcript, Turn};
pub use validate::{is_valid_email, is_valid_phone, sanitize_input};
