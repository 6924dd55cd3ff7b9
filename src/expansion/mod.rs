//! The expansion pipeline and its public front end.
//!
//! A template flows through four stages: tokenization into a skeleton
//! plus a raw tag table, custom-type resolution, normalization of the
//! table to its tag-free fixed point, and substitution of the skeleton
//! against the normalized table. All intermediate state lives in an
//! [`ExpansionContext`] constructed fresh for every top-level call;
//! nothing is shared across calls.

mod combine;
mod resolver;

pub use combine::combine;

use crate::errors::UtteranceError;
use crate::host::{CustomTypeRegistry, ExpressionEvaluator};
use crate::syntax::{tokenize, TagId, TagTable, TagValue};
use crate::value::{Platform, Utterances, Value};

/// Reduction depth past which a cyclic tag reference is assumed. Cycles
/// are defects, not runtime conditions; the engine fails loudly.
pub(crate) const MAX_REDUCTION_DEPTH: usize = 64;
/// Tag table entries allowed during custom-type resolution.
pub(crate) const MAX_TABLE_ENTRIES: usize = 65_536;

/// Call-scoped expansion state: the tag table and borrows of the two
/// host collaborators.
pub(crate) struct ExpansionContext<'h> {
    pub(crate) evaluator: &'h dyn ExpressionEvaluator,
    pub(crate) registry: &'h dyn CustomTypeRegistry,
    pub(crate) table: TagTable,
}

impl<'h> ExpansionContext<'h> {
    pub(crate) fn new(
        evaluator: &'h dyn ExpressionEvaluator,
        registry: &'h dyn CustomTypeRegistry,
    ) -> Self {
        Self {
            evaluator,
            registry,
            table: TagTable::default(),
        }
    }

    /// Records a raw value under a fresh tag.
    pub(crate) fn record(&mut self, value: TagValue) -> TagId {
        self.table.insert(value)
    }
}

/// Front end over the expansion engine, borrowing the host's expression
/// evaluator and custom-type registry.
///
/// ```
/// use utterance_engine::{Bindings, Expander, StaticRegistry, Value};
///
/// let env = Bindings::new();
/// let registry = StaticRegistry::new();
/// let expander = Expander::new(&env, &registry);
///
/// let result = expander
///     .unfold_utterance_string("turn the light {on|off}")
///     .unwrap();
/// assert_eq!(
///     result,
///     Value::List(vec![
///         "turn the light on".to_string(),
///         "turn the light off".to_string(),
///     ])
/// );
/// ```
pub struct Expander<'h> {
    evaluator: &'h dyn ExpressionEvaluator,
    registry: &'h dyn CustomTypeRegistry,
}

impl<'h> Expander<'h> {
    pub fn new(
        evaluator: &'h dyn ExpressionEvaluator,
        registry: &'h dyn CustomTypeRegistry,
    ) -> Self {
        Self {
            evaluator,
            registry,
        }
    }

    /// Expands one template into the concrete strings it denotes.
    ///
    /// The result is [`Value::Scalar`] when no placeholder resolved to a
    /// list; otherwise an ordered [`Value::List`] whose order follows the
    /// combiner rule applied in left-to-right tag-discovery order.
    /// Expansion is the identity on strings with no recognized syntax,
    /// and slots (`{Name}`) survive unchanged.
    pub fn unfold_utterance_string(&self, template: &str) -> Result<Value, UtteranceError> {
        let mut ctx = ExpansionContext::new(self.evaluator, self.registry);
        let skeleton = tokenize(template, &mut ctx)?;
        resolver::resolve_custom_types(&mut ctx)?;
        resolver::normalize_table(&mut ctx)?;
        resolver::reduce_fragment(&skeleton, &ctx.table, 0)
    }

    /// Expands a batch, flattening each template's expansions one level.
    fn unfold_all(&self, utterances: &Utterances) -> Result<Vec<String>, UtteranceError> {
        let mut expanded = Vec::new();
        for template in utterances.as_slice() {
            expanded.extend(self.unfold_utterance_string(template)?.into_strings());
        }
        Ok(expanded)
    }

    /// Checks a batch of templates for duplicates among all expansions.
    ///
    /// Duplicates are detected batch-wide: all expansions are flattened
    /// together, sorted, and compared pairwise. Absent input is a fast
    /// `false` without invoking the engine; evaluator failures propagate.
    pub fn validate_utterances(
        &self,
        utterances: Option<&Utterances>,
    ) -> Result<bool, UtteranceError> {
        let Some(utterances) = utterances else {
            return Ok(false);
        };
        let mut expanded = self.unfold_all(utterances)?;
        expanded.sort();
        Ok(!expanded.windows(2).any(|pair| pair[0] == pair[1]))
    }

    /// Expands a batch and prefixes every result with `intent_name` and a
    /// space, in the platform's export format.
    ///
    /// Unsupported platforms and absent input yield `Ok(None)`: "not
    /// applicable", not an error.
    pub fn export_intent_utterance_strings(
        &self,
        intent_name: &str,
        utterances: Option<&Utterances>,
        platform: Platform,
    ) -> Result<Option<Vec<String>>, UtteranceError> {
        if platform != Platform::Alexa {
            return Ok(None);
        }
        let Some(utterances) = utterances else {
            return Ok(None);
        };
        let expanded = self.unfold_all(utterances)?;
        Ok(Some(
            expanded
                .into_iter()
                .map(|utterance| format!("{intent_name} {utterance}"))
                .collect(),
        ))
    }
}
