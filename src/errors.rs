//! Unified error type for the expansion pipeline.
//!
//! The taxonomy is deliberately small: host evaluator failures propagate
//! with the offending expression attached, unknown custom types are a
//! lookup failure, and everything else (unresolved references, cyclic
//! tag references) is an internal defect that must fail loudly rather
//! than silently truncate output.

use miette::Diagnostic;
use thiserror::Error;

/// Error type hosts return from their collaborator implementations.
pub type HostError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// All failure modes of the expansion engine.
#[derive(Debug, Error, Diagnostic)]
pub enum UtteranceError {
    /// The host expression evaluator rejected an embedded `{=...}` body.
    #[error("expression evaluation failed for `{code}`")]
    #[diagnostic(
        code(utterance::eval),
        help("the expression body is passed to the host evaluator verbatim; check the binding environment")
    )]
    Eval {
        code: String,
        #[source]
        source: HostError,
    },

    /// A `{+TypeName}` reference named a type the registry does not know.
    #[error("unknown custom type `{name}`")]
    #[diagnostic(
        code(utterance::unknown_custom_type),
        help("register the type with the custom-type registry before expanding")
    )]
    UnknownCustomType { name: String },

    /// A defect in the expansion itself: an unresolved reference or a
    /// reduction that failed to reach its fixed point.
    #[error("internal expansion error: {message}")]
    #[diagnostic(code(utterance::internal))]
    Internal { message: String },
}

impl UtteranceError {
    pub(crate) fn internal(message: impl Into<String>) -> Self {
        UtteranceError::Internal {
            message: message.into(),
        }
    }
}
