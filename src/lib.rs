pub use crate::errors::{HostError, UtteranceError};
pub use crate::expansion::{combine, Expander};
pub use crate::host::{Bindings, CustomTypeRegistry, ExpressionEvaluator, StaticRegistry};
pub use crate::value::{Platform, Utterances, Value};

pub mod cli;
pub mod errors;
pub mod expansion;
pub mod host;
mod syntax;
pub mod value;
