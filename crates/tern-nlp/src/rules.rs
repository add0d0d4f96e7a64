//! The translation rule catalogue.
//!
//! Rules are evaluated in the order listed; the first matching rule
//! wins, so order is the only tie-break. Reordering changes
//! translation outcomes — treat this list as versioned data and test
//! each rule directly.

use regex::{Captures, Regex};

/// One (pattern, template) translation rule.
///
/// Patterns are anchored at the start of the (lower-cased, trimmed)
/// query. Captured groups substitute positionally into the template
/// at `\1`, `\2`, ... after trimming.
pub struct TranslationRule {
    pub pattern: Regex,
    pub template: &'static str,
}

impl TranslationRule {
    fn new(pattern: &str, template: &'static str) -> Self {
        Self {
            // Catalogue patterns are static literals; a failure to
            // compile is a programming error caught by the rule tests.
            pattern: Regex::new(pattern).expect("catalogue rule pattern must compile"),
            template,
        }
    }

    /// Populate the template from a match. Returns `None` when a
    /// capture the template needs is absent, in which case the caller
    /// skips this rule and keeps matching.
    pub fn expand(&self, caps: &Captures<'_>) -> Option<String> {
        let mut out = self.template.to_string();
        for i in 1..caps.len() {
            let group = caps.get(i)?.as_str().trim();
            out = out.replace(&format!("\\{i}"), group);
        }
        Some(out)
    }
}

/// Build the ordered rule catalogue.
pub fn rule_catalogue() -> Vec<TranslationRule> {
    vec![
        // Directory operations
        TranslationRule::new(
            r"^create (?:a )?(?:new )?(?:folder|directory) (?:called |named )?(.+)",
            r"mkdir \1",
        ),
        TranslationRule::new(
            r"^make (?:a )?(?:new )?(?:folder|directory) (?:called |named )?(.+)",
            r"mkdir \1",
        ),
        TranslationRule::new(r"^go to (?:the )?(?:folder|directory) (.+)", r"cd \1"),
        TranslationRule::new(r"^change to (?:the )?(?:folder|directory) (.+)", r"cd \1"),
        TranslationRule::new(r"^navigate to (.+)", r"cd \1"),
        // File operations
        TranslationRule::new(
            r"^show (?:me )?(?:the )?contents? of (?:the )?file (.+)",
            r"cat \1",
        ),
        TranslationRule::new(r"^display (?:the )?file (.+)", r"cat \1"),
        TranslationRule::new(r"^read (?:the )?file (.+)", r"cat \1"),
        TranslationRule::new(r"^copy (?:the )?file (.+) to (.+)", r"cp \1 \2"),
        TranslationRule::new(r"^move (?:the )?file (.+) (?:to|into) (.+)", r"mv \1 \2"),
        TranslationRule::new(r"^rename (?:the )?file (.+) to (.+)", r"mv \1 \2"),
        TranslationRule::new(r"^delete (?:the )?file (.+)", r"rm \1"),
        TranslationRule::new(r"^remove (?:the )?file (.+)", r"rm \1"),
        // Listing operations
        TranslationRule::new(
            r"^show (?:me )?(?:all )?(?:the )?files?(?: in (?:the )?(?:current )?(?:folder|directory))?",
            r"ls",
        ),
        TranslationRule::new(
            r"^list (?:all )?(?:the )?files?(?: in (?:the )?(?:current )?(?:folder|directory))?",
            r"ls",
        ),
        TranslationRule::new(
            r"^what(?:'s| is) in (?:this|the current) (?:folder|directory)",
            r"ls",
        ),
        TranslationRule::new(r"^show (?:me )?(?:the )?files in (.+)", r"ls \1"),
        TranslationRule::new(r"^list (?:the )?files in (.+)", r"ls \1"),
        // Location operations
        TranslationRule::new(r"^where am i\??", r"pwd"),
        TranslationRule::new(
            r"^what(?:'s| is) (?:my )?current (?:folder|directory|location)\??",
            r"pwd",
        ),
        TranslationRule::new(
            r"^show (?:me )?(?:my )?current (?:folder|directory|location)",
            r"pwd",
        ),
        // Search operations
        TranslationRule::new(
            r"^find (?:all )?files? (?:called |named )?(.+)",
            r"find . -name \1",
        ),
        TranslationRule::new(
            r"^search for (?:files? )?(?:called |named )?(.+)",
            r"find . -name \1",
        ),
        TranslationRule::new(r"^look for (.+) in (?:the )?file (.+)", r"grep \1 \2"),
        TranslationRule::new(r"^search for (.+) in (?:the )?file (.+)", r"grep \1 \2"),
        // Process operations
        TranslationRule::new(r"^show (?:me )?(?:all )?(?:running )?processes", r"ps"),
        TranslationRule::new(r"^list (?:all )?(?:running )?processes", r"ps"),
        TranslationRule::new(r"^what processes are running\??", r"ps"),
        TranslationRule::new(r"^show (?:me )?system (?:info|information|resources)", r"top"),
        TranslationRule::new(r"^kill (?:the )?process (\d+)", r"kill \1"),
        TranslationRule::new(r"^terminate (?:the )?process (\d+)", r"kill \1"),
        // Help operations
        TranslationRule::new(r"^help(?: me)?", r"help"),
        TranslationRule::new(r"^what can (?:i|you) do\??", r"help"),
        TranslationRule::new(r"^show (?:me )?(?:available )?commands", r"help"),
        // Echo operations
        TranslationRule::new(r"^say (.+)", r"echo \1"),
        TranslationRule::new(r"^print (.+)", r"echo \1"),
    ]
}
