//! Host collaborator interfaces and the implementations shipped with the
//! crate.
//!
//! The engine never executes host code itself. Embedded `{=...}`
//! expressions go through an [`ExpressionEvaluator`], and `{+TypeName}`
//! references go through a [`CustomTypeRegistry`]. Both are synchronous
//! and side-effect-free from the engine's point of view.

use std::collections::HashMap;

use serde::Deserialize;

use crate::errors::HostError;
use crate::value::Value;

/// Evaluates the body of an `{=code}` placeholder to a scalar or list.
///
/// Errors are propagated to the expansion caller unmodified, chained as
/// the source of an [`crate::UtteranceError::Eval`].
pub trait ExpressionEvaluator {
    fn evaluate(&self, code: &str) -> Result<Value, HostError>;
}

/// Supplies the ordered member list of a named custom type.
///
/// Members are themselves mini-templates: a returned string may contain
/// any placeholder syntax the tokenizer understands, and it is expanded
/// within the same call.
pub trait CustomTypeRegistry {
    /// Returns the members of `type_name`, or `None` when unregistered.
    fn custom_type_values(&self, type_name: &str) -> Option<Vec<String>>;
}

/// Identifier → value binding environment.
///
/// This is the evaluator shipped with the crate: an expression body is
/// trimmed and either taken as a single- or double-quoted string literal
/// or looked up as a binding name. Hosts that need real expression
/// evaluation implement [`ExpressionEvaluator`] themselves.
#[derive(Debug, Default, Clone)]
pub struct Bindings {
    entries: HashMap<String, Value>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(name.into(), value.into());
    }
}

impl ExpressionEvaluator for Bindings {
    fn evaluate(&self, code: &str) -> Result<Value, HostError> {
        let code = code.trim();
        if let Some(literal) = quoted_literal(code) {
            return Ok(Value::Scalar(literal.to_string()));
        }
        self.entries
            .get(code)
            .cloned()
            .ok_or_else(|| format!("undefined binding `{code}`").into())
    }
}

fn quoted_literal(code: &str) -> Option<&str> {
    for quote in ['"', '\''] {
        if code.len() >= 2 && code.starts_with(quote) && code.ends_with(quote) {
            return Some(&code[1..code.len() - 1]);
        }
    }
    None
}

/// In-memory custom-type registry keyed by type name.
///
/// Deserializes from a JSON object of name → member arrays, so a registry
/// can be loaded from a file:
///
/// ```json
/// { "fruit": ["apple", "golden delicious", "banana"] }
/// ```
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(transparent)]
pub struct StaticRegistry {
    types: HashMap<String, Vec<String>>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(
        &mut self,
        name: impl Into<String>,
        members: impl IntoIterator<Item = impl Into<String>>,
    ) {
        self.types
            .insert(name.into(), members.into_iter().map(Into::into).collect());
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl CustomTypeRegistry for StaticRegistry {
    fn custom_type_values(&self, type_name: &str) -> Option<Vec<String>> {
        self.types.get(type_name).cloned()
    }
}
