//! Message texts
//!
//! Everything a participant reads during a run: the rules intro, option
//! descriptions, per-item prompts and the closing messages. Closing and
//! notification texts are overridable per run through [`CollectionTexts`].

mod template;
mod texts;

pub use template::{MessageTemplate, RulesFormatter};
pub use texts::{
    CollectionTexts, DEFAULT_ALL_COMPLETED_TEXT, DEFAULT_INVALID_RESPONSE_TEXT,
    DEFAULT_MAX_RESPONSES_TEXT, DEFAULT_TIMEOUT_TEXT,
};
