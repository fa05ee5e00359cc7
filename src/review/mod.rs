//! Review invocation and report parsing.
//!
//! The harness talks to the reviewing agent through the narrow
//! [`ReviewBackend`] trait and turns whatever free-form report comes back
//! into a structured [`FindingsSet`].

pub mod backend;
pub mod extract;

pub use backend::{
    ClaudeBackend, DEFAULT_REVIEW_CMD, DEFAULT_REVIEW_TIMEOUT_SECS, REVIEW_INSTRUCTION,
    ReviewBackend,
};
pub use extract::{FindingsSet, Section, extract_findings};
