//! Display-only scrambling of sensitive identifiers in raw log text.
//!
//! Runs on a copy of the input text after analysis and never feeds back
//! into the analyzer. Each replacement gets a fresh random base-36 suffix.

use once_cell::sync::Lazy;
use rand::Rng;
use regex::{Captures, Regex};

const BASE36: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Placeholder label and suffix length, rendered as `[LABEL-XXXX]`.
#[derive(Debug, Clone, Copy)]
struct Placeholder {
    label: &'static str,
    len: usize,
}

impl Placeholder {
    const fn new(label: &'static str, len: usize) -> Self {
        Self { label, len }
    }

    fn render<R: Rng>(&self, rng: &mut R) -> String {
        let suffix: String = (0..self.len)
            .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
            .collect();
        format!("[{}-{}]", self.label, suffix)
    }
}

#[derive(Debug, Clone, Copy)]
enum Replacement {
    /// Keep group 1, replace group 2. A `code` word followed by `is` (group 3)
    /// is left for the code pair rules.
    Prefixed(Placeholder),
    /// Keep groups 1 and 3, replace groups 2 and 4.
    CodePair(Placeholder),
    /// Replace the whole quoted token, re-quoted with double quotes.
    Quoted(Placeholder),
}

struct RedactionRule {
    name: &'static str,
    regex: Regex,
    replacement: Replacement,
}

impl RedactionRule {
    fn new(name: &'static str, pattern: &str, replacement: Replacement) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).expect("Invalid regex pattern"),
            replacement,
        }
    }

    /// Apply this rule, returning the new text and the number of substitutions.
    fn apply<R: Rng>(&self, text: &str, rng: &mut R) -> (String, usize) {
        let mut replaced = 0usize;
        let output = self.regex.replace_all(text, |caps: &Captures| match self.replacement {
            Replacement::Prefixed(placeholder) => {
                let is_code_phrase = caps.get(3).is_some() && caps[2].eq_ignore_ascii_case("code");
                if is_code_phrase {
                    return caps[0].to_string();
                }
                let value = placeholder.render(rng);
                replaced += 1;
                format!("{}{}{}", &caps[1], value, caps.get(3).map_or("", |m| m.as_str()))
            }
            Replacement::CodePair(placeholder) => {
                let old_code = placeholder.render(rng);
                let new_code = placeholder.render(rng);
                replaced += 2;
                format!("{}{}{}{}", &caps[1], old_code, &caps[3], new_code)
            }
            Replacement::Quoted(placeholder) => {
                replaced += 1;
                format!("\"{}\"", placeholder.render(rng))
            }
        });

        (output.into_owned(), replaced)
    }
}

/// Redaction rules, applied in order.
static REDACTION_RULES: Lazy<Vec<RedactionRule>> = Lazy::new(|| {
    vec![
        RedactionRule::new(
            "workflow name",
            r"(?i)(\bProcessing\s+Workflow\s+)([0-9A-Za-z_]+)",
            Replacement::Prefixed(Placeholder::new("WORKFLOW", 6)),
        ),
        RedactionRule::new(
            "workstep name",
            r"(?i)(\bWorkstep\s+)([0-9A-Za-z_]+)(\s+is\b)?",
            Replacement::Prefixed(Placeholder::new("STEP", 6)),
        ),
        RedactionRule::new(
            "work action",
            r"(?i)(\bWorkAction\s+)([0-9A-Za-z_]+)",
            Replacement::Prefixed(Placeholder::new("ACTION", 4)),
        ),
        RedactionRule::new(
            "case id",
            r"(?i)(\bcase\s+id\s*[-–]\s*)([0-9]+)",
            Replacement::Prefixed(Placeholder::new("CASE", 8)),
        ),
        RedactionRule::new(
            "workflow code pair",
            r"(?i)(\bold\s+workflow\s+code\s+is\s+)([0-9A-Za-z_]+)(\s+new\s+workflow\s+code\s+is\s+)([0-9A-Za-z_]+)",
            Replacement::CodePair(Placeholder::new("WF", 4)),
        ),
        RedactionRule::new(
            "workstep code pair",
            r"(?i)(\bold\s+workstep\s+code\s+is\s+)([0-9A-Za-z_]+)(\s+new\s+workstep\s+code\s+is\s+)([0-9A-Za-z_]+)",
            Replacement::CodePair(Placeholder::new("STEP", 4)),
        ),
        RedactionRule::new(
            "quoted identifier",
            r#"'[A-Z][A-Z0-9_]+'|"[A-Z][A-Z0-9_]+""#,
            Replacement::Quoted(Placeholder::new("DATA", 6)),
        ),
    ]
});

/// Scrambled copy of a log text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redaction {
    pub text: String,
    pub replacements: usize,
}

/// Scramble sensitive identifiers in log text.
pub struct Redactor<R: Rng> {
    rng: R,
}

impl Redactor<rand::rngs::ThreadRng> {
    pub fn new() -> Self {
        Self { rng: rand::thread_rng() }
    }
}

impl Default for Redactor<rand::rngs::ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Redactor<R> {
    /// Use a specific RNG, e.g. a seeded `StdRng` for reproducible output.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Return a scrambled copy of `text`; the input is left untouched.
    pub fn scramble(&mut self, text: &str) -> Redaction {
        let mut output = text.to_string();
        let mut replacements = 0usize;

        for rule in REDACTION_RULES.iter() {
            let (next, count) = rule.apply(&output, &mut self.rng);
            if count > 0 {
                log::debug!("Redacted {} {} value(s)", count, rule.name);
            }
            output = next;
            replacements += count;
        }

        Redaction {
            text: output,
            replacements,
        }
    }
}
