//! Core value model for the expansion engine.
//!
//! Placeholders resolve to either a single string or an ordered list of
//! strings; both shapes are modeled explicitly as [`Value`] rather than
//! inspected at runtime. [`Utterances`] is the matching input shape for
//! the batch operations.

use clap::ValueEnum;

/// A resolved placeholder value or expansion result: a single string or
/// an ordered list of strings.
///
/// A template expands to `Scalar` only when no placeholder anywhere in it
/// resolved to a list; a single list-valued placeholder makes the whole
/// result a `List`, even a one-element one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Scalar(String),
    List(Vec<String>),
}

impl Value {
    /// Flattens the value into a vector: a scalar becomes one element.
    pub fn into_strings(self) -> Vec<String> {
        match self {
            Value::Scalar(text) => vec![text],
            Value::List(items) => items,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Scalar(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Scalar(text)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}

/// Template input accepted by the batch operations: one template or an
/// ordered batch of them.
#[derive(Debug, Clone)]
pub enum Utterances {
    One(String),
    Many(Vec<String>),
}

impl Utterances {
    /// Views the input uniformly as a slice of templates.
    pub fn as_slice(&self) -> &[String] {
        match self {
            Utterances::One(template) => std::slice::from_ref(template),
            Utterances::Many(templates) => templates,
        }
    }
}

impl From<&str> for Utterances {
    fn from(template: &str) -> Self {
        Utterances::One(template.to_string())
    }
}

impl From<String> for Utterances {
    fn from(template: String) -> Self {
        Utterances::One(template)
    }
}

impl From<Vec<String>> for Utterances {
    fn from(templates: Vec<String>) -> Self {
        Utterances::Many(templates)
    }
}

/// Target platform for intent export. Only Alexa has an export format;
/// the exporter yields no result for the others rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Platform {
    Alexa,
    Cortana,
}
