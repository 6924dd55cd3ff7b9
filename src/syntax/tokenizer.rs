//! Four-pass tokenizer for the utterance template syntax.
//!
//! Each pass scans literal text left to right, non-overlapping, and
//! replaces every match with a freshly allocated tag segment, recording
//! the captured raw value in the call's tag table. Pass order is
//! load-bearing: slot, expression and custom-type syntaxes are more
//! specific subsets of the generic brace syntax that alternative lists
//! use, so they must be taken out of the text first.

use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::UtteranceError;
use crate::expansion::ExpansionContext;
use crate::syntax::tags::{Fragment, Segment, TagId, TagValue};
use crate::value::Value;

lazy_static! {
    /// Pass-through slot `{Identifier}`; content excludes `{ } = | +`.
    static ref SLOT: Regex = Regex::new(r"\{[^{}=|+]+\}").unwrap();
    /// Host expression `{=code}`; code excludes `{ } |`.
    static ref EXPRESSION: Regex = Regex::new(r"\{=[^{}|]+\}").unwrap();
    /// Custom-type reference `{+TypeName}`; name excludes `{ } | =`.
    static ref CUSTOM_TYPE: Regex = Regex::new(r"\{\+[^{}|=]+\}").unwrap();
}

/// Tokenizes `template` into a skeleton of literal and tag segments.
///
/// Stray braces that never form a recognizable group are literal text and
/// survive into the skeleton untouched, which keeps expansion the
/// identity on strings with no recognized syntax. Tags are table indices
/// carried in the segments themselves, so no substring of the template
/// (or of any collaborator-returned value) can ever be mistaken for one.
pub(crate) fn tokenize(
    template: &str,
    ctx: &mut ExpansionContext,
) -> Result<Fragment, UtteranceError> {
    let mut fragment = vec![Segment::Literal(template.to_string())];

    // Slots are no-op markers: the raw value is the matched text itself,
    // braces included, so the slot survives expansion unchanged.
    fragment = replace_in_literals(fragment, &SLOT, |matched| {
        Ok(ctx.record(TagValue::Text(matched.to_string())))
    })?;

    fragment = replace_in_literals(fragment, &EXPRESSION, |matched| {
        let code = &matched[2..matched.len() - 1];
        let value = ctx
            .evaluator
            .evaluate(code)
            .map_err(|source| UtteranceError::Eval {
                code: code.to_string(),
                source,
            })?;
        Ok(ctx.record(match value {
            Value::Scalar(text) => TagValue::Text(text),
            Value::List(items) => TagValue::Expanded(items),
        }))
    })?;

    // Custom-type resolution needs the external registry and is deferred;
    // only the trimmed type name is recorded for the resolver to pick up.
    fragment = replace_in_literals(fragment, &CUSTOM_TYPE, |matched| {
        let name = matched[2..matched.len() - 1].trim();
        Ok(ctx.record(TagValue::CustomRef(name.to_string())))
    })?;

    Ok(tokenize_alternatives(fragment, ctx))
}

/// Left-to-right, non-overlapping replacement within the literal
/// segments of a fragment; tag segments pass through opaque. Replaced
/// text is never rescanned within the same pass.
fn replace_in_literals(
    fragment: Fragment,
    pattern: &Regex,
    mut replacer: impl FnMut(&str) -> Result<TagId, UtteranceError>,
) -> Result<Fragment, UtteranceError> {
    let mut output = Fragment::with_capacity(fragment.len());
    for segment in fragment {
        let Segment::Literal(text) = segment else {
            output.push(segment);
            continue;
        };
        let mut last = 0;
        for found in pattern.find_iter(&text) {
            push_literal(&mut output, &text[last..found.start()]);
            output.push(Segment::Tag(replacer(found.as_str())?));
            last = found.end();
        }
        push_literal(&mut output, &text[last..]);
    }
    Ok(output)
}

/// Tokenizes every alternative-list group, innermost first.
///
/// Earlier passes replaced the more specific brace syntaxes with tag
/// segments, so any group found here is an alternative list; its content
/// may span literal and tag segments but never contains a raw brace.
/// Each extraction removes one brace pair, so the scan terminates.
fn tokenize_alternatives(mut fragment: Fragment, ctx: &mut ExpansionContext) -> Fragment {
    while let Some((open, close)) = find_innermost_group(&fragment) {
        let (mut before, content, after) = split_group(fragment, open, close);
        let tag = ctx.record(TagValue::Fragments(split_alternatives(content)));
        before.push(Segment::Tag(tag));
        before.extend(after);
        fragment = before;
    }
    fragment
}

/// Position of one brace character: segment index plus byte offset
/// within that literal segment.
type BracePos = (usize, usize);

/// Finds an innermost brace group: a `{` whose next brace is a `}` with
/// non-empty content between them. An empty `{}` is not a construct and
/// neither of its braces can open or close any other group, so both are
/// skipped.
fn find_innermost_group(fragment: &[Segment]) -> Option<(BracePos, BracePos)> {
    let mut last_open: Option<BracePos> = None;
    for (seg_idx, segment) in fragment.iter().enumerate() {
        let Segment::Literal(text) = segment else {
            continue;
        };
        for (byte_idx, ch) in text.char_indices() {
            match ch {
                '{' => last_open = Some((seg_idx, byte_idx)),
                '}' => {
                    if let Some((open_seg, open_byte)) = last_open {
                        if open_seg == seg_idx && open_byte + 1 == byte_idx {
                            last_open = None;
                        } else {
                            return Some(((open_seg, open_byte), (seg_idx, byte_idx)));
                        }
                    }
                }
                _ => {}
            }
        }
    }
    None
}

/// Splits a fragment around a brace group into the segments before the
/// `{`, the content between the braces, and the segments after the `}`.
fn split_group(
    fragment: Fragment,
    open: BracePos,
    close: BracePos,
) -> (Fragment, Fragment, Fragment) {
    let (open_seg, open_byte) = open;
    let (close_seg, close_byte) = close;
    let mut before = Fragment::new();
    let mut content = Fragment::new();
    let mut after = Fragment::new();

    for (idx, segment) in fragment.into_iter().enumerate() {
        if idx < open_seg {
            before.push(segment);
        } else if idx > close_seg {
            after.push(segment);
        } else if idx == open_seg || idx == close_seg {
            let Segment::Literal(text) = segment else {
                continue;
            };
            if idx == open_seg {
                push_literal(&mut before, &text[..open_byte]);
            }
            let start = if idx == open_seg { open_byte + 1 } else { 0 };
            let end = if idx == close_seg { close_byte } else { text.len() };
            push_literal(&mut content, &text[start..end]);
            if idx == close_seg {
                push_literal(&mut after, &text[close_byte + 1..]);
            }
        } else {
            content.push(segment);
        }
    }
    (before, content, after)
}

/// Splits group content on `|` into alternatives, preserving whitespace
/// and empty segments verbatim. Pipes only occur in literal segments;
/// tag segments always belong to the current alternative.
fn split_alternatives(content: Fragment) -> Vec<Fragment> {
    let mut alternatives = Vec::new();
    let mut current = Fragment::new();
    for segment in content {
        let Segment::Literal(text) = segment else {
            current.push(segment);
            continue;
        };
        let mut pieces = text.split('|');
        if let Some(first) = pieces.next() {
            push_literal(&mut current, first);
        }
        for piece in pieces {
            alternatives.push(std::mem::take(&mut current));
            push_literal(&mut current, piece);
        }
    }
    alternatives.push(current);
    alternatives
}

fn push_literal(fragment: &mut Fragment, text: &str) {
    if !text.is_empty() {
        fragment.push(Segment::Literal(text.to_string()));
    }
}
