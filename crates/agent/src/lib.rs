//! Screening agent: conversation flow, prompt catalog, field extraction,
//! and the Gemini client behind the [`Oracle`] seam.
//!
//! `scout-core` holds the passive domain types; this crate holds everything
//! that talks to the model or drives the session forward.

pub mod controller;
pub mod extract;
pub mod gemini;
pub mod oracle;
pub mod prompts;

pub use controller::{is_exit_command, Conversation, APOLOGY, EXIT_KEYWORDS};
pub use extract::extract_and_merge;
pub use gemini::GeminiClient;
pub use oracle::{Oracle, OracleError};
pub use prompts::{PromptCatalog, PromptError};
