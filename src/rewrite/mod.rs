// Formal-register rewriting of raw notes via the Gemini API

mod client;
mod prompt;
mod types;

pub use client::{RewriteClient, RewriteError, STATUS_REWRITING};
pub use prompt::{build_prompt, TEMPERATURE, TOP_P};
