//! Rule-based natural-language translation for tern.
//!
//! A fully offline, best-effort mapping from informal phrasing to one
//! line of canonical command syntax. The rule catalogue is data, not
//! code: an ordered list of (regex, template) pairs evaluated
//! first-match-wins.

mod rules;
mod translator;

pub use rules::{TranslationRule, rule_catalogue};
pub use translator::Translator;
