//! The translator: a natural-language gate plus first-match-wins
//! rule application.

use crate::rules::{TranslationRule, rule_catalogue};

/// Words that mark an interrogative query.
const QUESTION_WORDS: &[&str] = &["what", "where", "how", "why", "when", "who", "which"];

/// Conversational phrase markers.
const NL_PHRASES: &[&str] = &["show me", "can you", "i want to", "please", "help me"];

/// Common function words. Checked by containment, so they also hit as
/// substrings; that keeps the gate deliberately permissive — a false
/// positive just falls through translation and the original text is
/// dispatched literally.
const FUNCTION_WORDS: &[&str] = &["the", "a", "an", "to", "in", "of"];

/// Best-effort, fully offline translator from informal phrasing to
/// canonical command syntax. Constructed once at startup; immutable
/// and shareable across sessions afterwards.
pub struct Translator {
    rules: Vec<TranslationRule>,
}

impl Translator {
    pub fn new() -> Self {
        Self {
            rules: rule_catalogue(),
        }
    }

    /// Heuristic gate: does `text` read like natural language rather
    /// than a command?
    pub fn looks_natural(&self, text: &str) -> bool {
        let text = text.trim().to_lowercase();

        if QUESTION_WORDS.iter().any(|w| text.starts_with(w)) {
            return true;
        }
        if NL_PHRASES.iter().any(|p| text.contains(p)) {
            return true;
        }
        if text.contains(' ') && FUNCTION_WORDS.iter().any(|w| text.contains(w)) {
            return true;
        }
        false
    }

    /// Translate `query` to a command line, or `None` when no rule
    /// matches. Rules are tried in catalogue order; a rule whose
    /// template cannot be populated is skipped and matching continues.
    pub fn translate(&self, query: &str) -> Option<String> {
        let query = query.trim().to_lowercase();

        for rule in &self.rules {
            if let Some(caps) = rule.pattern.captures(&query) {
                match rule.expand(&caps) {
                    Some(command) => {
                        log::info!("nlp: '{query}' -> '{command}'");
                        return Some(command);
                    }
                    None => continue,
                }
            }
        }
        None
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_words_gate_true() {
        let t = Translator::new();
        assert!(t.looks_natural("where am i?"));
        assert!(t.looks_natural("What is my current directory"));
        assert!(t.looks_natural("how do i list files"));
    }

    #[test]
    fn conversational_phrases_gate_true() {
        let t = Translator::new();
        assert!(t.looks_natural("show me all files"));
        assert!(t.looks_natural("can you delete the file x"));
        assert!(t.looks_natural("please list processes"));
    }

    #[test]
    fn space_plus_function_word_gates_true() {
        let t = Translator::new();
        assert!(t.looks_natural("go to the folder src"));
        assert!(t.looks_natural("delete the file junk.tmp"));
    }

    #[test]
    fn bare_commands_gate_false() {
        let t = Translator::new();
        assert!(!t.looks_natural("ls"));
        assert!(!t.looks_natural("pwd"));
        assert!(!t.looks_natural("ps"));
    }

    #[test]
    fn translate_folder_creation() {
        let t = Translator::new();
        assert_eq!(
            t.translate("create a new folder called logs").as_deref(),
            Some("mkdir logs")
        );
    }

    #[test]
    fn translate_where_am_i() {
        let t = Translator::new();
        assert_eq!(t.translate("where am i?").as_deref(), Some("pwd"));
    }

    #[test]
    fn translate_no_match() {
        let t = Translator::new();
        assert_eq!(t.translate("asdkjhasd"), None);
    }

    #[test]
    fn translate_lowercases_and_trims() {
        let t = Translator::new();
        assert_eq!(
            t.translate("  CREATE A FOLDER CALLED Logs  ").as_deref(),
            Some("mkdir logs")
        );
    }

    #[test]
    fn translate_two_captures() {
        let t = Translator::new();
        assert_eq!(
            t.translate("copy the file a.txt to b.txt").as_deref(),
            Some("cp a.txt b.txt")
        );
    }
}
