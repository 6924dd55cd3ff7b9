//! Call-scoped tag bookkeeping.
//!
//! A tag is an index into the call's tag table, substituted for one
//! recognized syntactic element during tokenization and replaced by that
//! element's resolved value at the end of the pipeline. Tags live out of
//! band in [`Segment::Tag`] rather than as marker substrings, so literal
//! text can never collide with one. The table lives exactly as long as
//! one top-level expansion call; nothing is shared across calls.

/// Opaque handle for one tokenized element, unique within a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TagId(pub(crate) usize);

/// One piece of tokenized template text: literal text or a tag standing
/// in for a recognized construct.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Segment {
    Literal(String),
    Tag(TagId),
}

/// Tokenized text: an ordered run of literal and tag segments.
pub(crate) type Fragment = Vec<Segment>;

/// The value a tag stands for, raw or normalized.
///
/// `Text` and `Expanded` are final forms with no embedded tags anywhere;
/// `Fragments` holds ordered alternatives whose fragments may still
/// reference other tags; `CustomRef` is a deferred registry lookup that
/// resolution rewrites to `Fragments`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TagValue {
    Text(String),
    Expanded(Vec<String>),
    Fragments(Vec<Fragment>),
    CustomRef(String),
}

/// Insertion-ordered tag table. Inserting assigns the next [`TagId`], so
/// two tags in one call can never alias; raw values recorded by the
/// tokenizer are overwritten in place with their normalized forms during
/// resolution.
#[derive(Debug, Default)]
pub(crate) struct TagTable {
    entries: Vec<TagValue>,
}

impl TagTable {
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn insert(&mut self, value: TagValue) -> TagId {
        self.entries.push(value);
        TagId(self.entries.len() - 1)
    }

    pub(crate) fn get(&self, id: TagId) -> &TagValue {
        &self.entries[id.0]
    }

    pub(crate) fn value_at(&self, index: usize) -> &TagValue {
        &self.entries[index]
    }

    pub(crate) fn replace_at(&mut self, index: usize, value: TagValue) {
        self.entries[index] = value;
    }
}
