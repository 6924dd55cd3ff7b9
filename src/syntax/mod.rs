//! Template syntax machinery: tag segments and the tokenizer.
//!
//! Tokenization rewrites a template into a skeleton of literal and tag
//! segments, with every recognized construct's raw value recorded in a
//! call-scoped tag table. Tags are table indices, not marker substrings,
//! so template text can never collide with one.

mod tags;
mod tokenizer;

pub(crate) use tags::{Fragment, Segment, TagId, TagTable, TagValue};
pub(crate) use tokenizer::tokenize;
