//! Seam for the external text-generation collaborator.
//!
//! The crate never performs network I/O itself. Callers inject an
//! implementation of [`TextGenerator`]; the dispatcher hands it a system
//! prompt, a user prompt, and a budget, and takes back plain text.

use thiserror::Error;

/// Token budget handed to the collaborator for a single rewrite.
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// LLM calls can be slow; the collaborator should enforce this deadline.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Errors the collaborator can surface. All are recoverable from the
/// caller's point of view; none should abort a batch.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("generation timed out after {0}s")]
    Timeout(u64),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("generator returned no content")]
    Empty,

    #[error("{0}")]
    Other(String),
}

/// Blocking text generation. Implementations own transport, auth, and
/// timeout enforcement.
pub trait TextGenerator {
    fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        max_tokens: u32,
        timeout_secs: u64,
    ) -> Result<String, GenerateError>;
}
