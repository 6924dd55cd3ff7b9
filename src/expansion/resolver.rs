//! Value resolution: custom-type substitution and nested-tag reduction.
//!
//! After tokenization the tag table holds raw values. Resolution rewrites
//! it to its fixed point, where every entry is a plain string or flat
//! list of strings with no remaining tag references. The same fragment
//! reduction is then applied once more to the skeleton itself; that is
//! the whole substitution engine.

use crate::errors::UtteranceError;
use crate::expansion::{combine, ExpansionContext, MAX_REDUCTION_DEPTH, MAX_TABLE_ENTRIES};
use crate::syntax::{tokenize, Segment, TagId, TagTable, TagValue};
use crate::value::Value;

/// Replaces every deferred custom-type reference with the registry's
/// member list.
///
/// Members are mini-templates and are tokenized into the same call
/// context, so placeholders inside them resolve through the general
/// reduction. Tokenizing may append further raw entries, including more
/// custom-type references, so the scan runs over the growing table.
pub(crate) fn resolve_custom_types(ctx: &mut ExpansionContext) -> Result<(), UtteranceError> {
    let mut index = 0;
    while index < ctx.table.len() {
        if ctx.table.len() > MAX_TABLE_ENTRIES {
            return Err(UtteranceError::internal(
                "custom-type expansion did not reach a fixed point; cyclic type definition",
            ));
        }
        let type_name = match ctx.table.value_at(index) {
            TagValue::CustomRef(name) => Some(name.clone()),
            _ => None,
        };
        if let Some(name) = type_name {
            let members = ctx
                .registry
                .custom_type_values(&name)
                .ok_or(UtteranceError::UnknownCustomType { name })?;
            let mut fragments = Vec::with_capacity(members.len());
            for member in &members {
                fragments.push(tokenize(member, ctx)?);
            }
            ctx.table.replace_at(index, TagValue::Fragments(fragments));
        }
        index += 1;
    }
    Ok(())
}

/// Rewrites every table entry in insertion order with its normalized
/// form. Entries may reference tags in either direction; the reduction
/// always reads the table's current state and recurses until no tag
/// reference remains.
pub(crate) fn normalize_table(ctx: &mut ExpansionContext) -> Result<(), UtteranceError> {
    for index in 0..ctx.table.len() {
        if matches!(
            ctx.table.value_at(index),
            TagValue::Text(_) | TagValue::Expanded(_)
        ) {
            continue;
        }
        let normalized = match reduce_tag(TagId(index), &ctx.table, 0)? {
            Value::Scalar(text) => TagValue::Text(text),
            Value::List(items) => TagValue::Expanded(items),
        };
        ctx.table.replace_at(index, normalized);
    }
    Ok(())
}

/// Reduces one fragment to a tag-free value.
///
/// Literal segments concatenate; a scalar-valued tag splices its text in
/// place. A list-valued tag fans out through the combiner: every list
/// member heads its own copy of the accumulated prefix, and the rest of
/// the fragment is reduced once and appended to each head, so members
/// vary slower than anything to their right.
pub(crate) fn reduce_fragment(
    fragment: &[Segment],
    table: &TagTable,
    depth: usize,
) -> Result<Value, UtteranceError> {
    if depth > MAX_REDUCTION_DEPTH {
        return Err(UtteranceError::internal(
            "tag reduction exceeded the depth limit; cyclic tag reference",
        ));
    }

    let mut text = String::new();
    for (index, segment) in fragment.iter().enumerate() {
        match segment {
            Segment::Literal(piece) => text.push_str(piece),
            Segment::Tag(id) => match reduce_tag(*id, table, depth)? {
                Value::Scalar(replacement) => text.push_str(&replacement),
                Value::List(members) => {
                    let suffixes =
                        reduce_fragment(&fragment[index + 1..], table, depth + 1)?.into_strings();
                    let heads = combine(&[text], &members);
                    let mut fanned = Vec::with_capacity(heads.len() * suffixes.len());
                    for head in heads {
                        fanned.extend(combine(&[head], &suffixes));
                    }
                    return Ok(Value::List(fanned));
                }
            },
        }
    }
    Ok(Value::Scalar(text))
}

/// Reduces one tag to its value. Alternatives reduce independently and
/// flatten exactly one level; they never produce doubly nested lists
/// because each alternative is reduced before concatenation.
fn reduce_tag(id: TagId, table: &TagTable, depth: usize) -> Result<Value, UtteranceError> {
    match table.get(id) {
        TagValue::Text(text) => Ok(Value::Scalar(text.clone())),
        TagValue::Expanded(items) => Ok(Value::List(items.clone())),
        TagValue::Fragments(alternatives) => {
            let mut flat = Vec::with_capacity(alternatives.len());
            for alternative in alternatives {
                flat.extend(reduce_fragment(alternative, table, depth + 1)?.into_strings());
            }
            Ok(Value::List(flat))
        }
        TagValue::CustomRef(name) => Err(UtteranceError::internal(format!(
            "custom type `{name}` reached reduction unresolved"
        ))),
    }
}
