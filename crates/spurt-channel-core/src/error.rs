//! Error types for the channel builder boundary.
//!
//! Selection operations themselves are total. These errors only come from
//! parsing input at the edges: identifiers read from the page, configuration
//! supplied by the host, and event bus registration.

use smol_str::SmolStr;
use thiserror::Error;

/// Errors raised at the edges of the selection core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SelectionError {
    /// A category identifier was empty or whitespace only.
    #[error("category identifier must not be empty")]
    EmptyCategoryId,

    /// A configuration field failed validation.
    #[error("invalid channel config `{field}`: {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },

    /// The event bus refused a binding.
    #[error("failed to bind `{selector}`: {reason}")]
    Bind { selector: SmolStr, reason: String },

    /// A field label broke the leading-character rule.
    #[error("invalid label: {0}")]
    InvalidLabel(&'static str),
}
