//! Recognize workflow/workstep pairs in individual log lines.
//!
//! Supports the following line formats, tried in priority order:
//! - *Domain*: `Processing Workflow ORDR Workstep VALIDATE WorkAction Default`
//! - *Verb + quoted*: `Started workflow 'Billing' workstep 'Charge'`
//! - *Pipe-delimited*: `Processing workflow: Billing | Step: Charge`
//! - *Bracketed*: `Workflow [Billing] - Step [Charge]`
//! - *Abbreviated key-value*: `WF: Billing, WS: Charge`
//! - *Dotted identifier*: `billing.charge.retry`
//! - *Generic quoted*: `job "Billing" moved to "Charge"`
//! - *Key-value with separators*: `wf=Billing; step=Charge`

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::normalize::normalize_text;
use super::types::UNKNOWN_WORKSTEP;

static DOMAIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Processing\s+Workflow\s+([0-9A-Za-z_]+)\s+Workstep\s+([0-9A-Za-z_]+)\s+WorkAction")
        .expect("invalid domain pattern")
});

static VERB_QUOTED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)(?:started|completed|processing|executing)\s+workflow\s+['"]([^'"]+)['"]\s+workstep\s+['"]([^'"]+)['"]"#,
    )
    .expect("invalid verb/quoted pattern")
});

static PIPE_DELIMITED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:processing|executing)\s+workflow:\s*([^|]+)\s*\|\s*(?:step|workstep):\s*(.+)")
        .expect("invalid pipe-delimited pattern")
});

static BRACKETED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)workflow\s*\[([^\]]+)\]\s*-\s*(?:step|workstep)\s*\[([^\]]+)\]")
        .expect("invalid bracketed pattern")
});

static ABBREVIATED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:wf|workflow):\s*([^,]+),\s*(?:ws|workstep):\s*(.+)").expect("invalid abbreviated pattern")
});

static DOTTED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*\.[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*)\s*$")
        .expect("invalid dotted pattern")
});

static GENERIC_QUOTED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"['"]([^'"]+)['"].*['"]([^'"]+)['"]"#).expect("invalid generic quoted pattern"));

static KEY_VALUE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:workflow|wf)\s*[:=]\s*([^,;\s]+)[\s,;]+(?:workstep|step|ws)\s*[:=]\s*(.+)")
        .expect("invalid key-value pattern")
});

/// The recognition rules, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternRule {
    Domain,
    VerbQuoted,
    PipeDelimited,
    Bracketed,
    Abbreviated,
    Dotted,
    GenericQuoted,
    KeyValue,
}

impl PatternRule {
    /// Every rule, highest priority first.
    pub const ALL: [PatternRule; 8] = [
        PatternRule::Domain,
        PatternRule::VerbQuoted,
        PatternRule::PipeDelimited,
        PatternRule::Bracketed,
        PatternRule::Abbreviated,
        PatternRule::Dotted,
        PatternRule::GenericQuoted,
        PatternRule::KeyValue,
    ];

    /// Attempt this rule alone against a trimmed line.
    ///
    /// Returns the raw, not yet normalized, captures.
    pub fn extract<'a>(&self, line: &'a str) -> Option<RawMatch<'a>> {
        match self {
            PatternRule::Domain => extract_pair(&DOMAIN_RE, line),
            PatternRule::VerbQuoted => extract_pair(&VERB_QUOTED_RE, line),
            PatternRule::PipeDelimited => extract_pair(&PIPE_DELIMITED_RE, line),
            PatternRule::Bracketed => extract_pair(&BRACKETED_RE, line),
            PatternRule::Abbreviated => extract_pair(&ABBREVIATED_RE, line),
            PatternRule::Dotted => extract_dotted(line),
            PatternRule::GenericQuoted => extract_pair(&GENERIC_QUOTED_RE, line),
            PatternRule::KeyValue => extract_pair(&KEY_VALUE_RE, line),
        }
    }
}

impl std::fmt::Display for PatternRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternRule::Domain => write!(f, "domain"),
            PatternRule::VerbQuoted => write!(f, "verb-quoted"),
            PatternRule::PipeDelimited => write!(f, "pipe-delimited"),
            PatternRule::Bracketed => write!(f, "bracketed"),
            PatternRule::Abbreviated => write!(f, "abbreviated"),
            PatternRule::Dotted => write!(f, "dotted"),
            PatternRule::GenericQuoted => write!(f, "generic-quoted"),
            PatternRule::KeyValue => write!(f, "key-value"),
        }
    }
}

/// Raw text captured by a single rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch<'a> {
    pub workflow: &'a str,
    /// Owned because the dotted rule rejoins segments.
    pub workstep: String,
}

/// A line accepted by the matcher: normalized values plus the rule that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch {
    pub rule: PatternRule,
    pub workflow: String,
    pub workstep: String,
}

/// Match a trimmed, non-empty line against the rules in priority order.
///
/// The first rule whose captures both survive normalization wins. A rule that
/// matches but normalizes to an empty value falls through to the next rule.
///
/// # Returns
///
/// `Some(LineMatch)` for a recognized line, `None` otherwise.
pub fn match_line(line: &str) -> Option<LineMatch> {
    PatternRule::ALL.iter().find_map(|rule| {
        let raw = rule.extract(line)?;
        let workflow = normalize_text(raw.workflow);
        let workstep = normalize_text(&raw.workstep);

        if workflow.is_empty() || workstep.is_empty() {
            return None;
        }

        Some(LineMatch {
            rule: *rule,
            workflow,
            workstep,
        })
    })
}

/// Capture group 1 as workflow, group 2 as workstep (or "Unknown" when absent).
fn extract_pair<'a>(re: &Regex, line: &'a str) -> Option<RawMatch<'a>> {
    let caps: Captures<'a> = re.captures(line)?;
    let workflow = caps.get(1)?.as_str();
    let workstep = caps.get(2).map_or(UNKNOWN_WORKSTEP, |m| m.as_str());

    Some(RawMatch {
        workflow,
        workstep: workstep.to_string(),
    })
}

/// First segment as workflow, the remaining segments rejoined with `.` as workstep.
fn extract_dotted(line: &str) -> Option<RawMatch<'_>> {
    let chain = DOTTED_RE.captures(line)?.get(1)?.as_str();
    let mut segments = chain.split('.');
    let workflow = segments.next()?;
    let rest: Vec<&str> = segments.collect();

    if rest.is_empty() {
        return None;
    }

    Some(RawMatch {
        workflow,
        workstep: rest.join("."),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(line: &str) -> (PatternRule, String, String) {
        let m = match_line(line).unwrap_or_else(|| panic!("expected a match for {:?}", line));
        (m.rule, m.workflow, m.workstep)
    }

    #[test]
    fn test_domain_form() {
        let (rule, wf, ws) = matched("2024-01-01 INFO Processing Workflow ORDR Workstep VALIDATE WorkAction Default");
        assert_eq!(rule, PatternRule::Domain);
        assert_eq!(wf, "ORDR");
        assert_eq!(ws, "VALIDATE");
    }

    #[test]
    fn test_domain_form_is_case_insensitive() {
        let (rule, wf, ws) = matched("processing workflow ordr workstep ship workaction x");
        assert_eq!(rule, PatternRule::Domain);
        assert_eq!((wf.as_str(), ws.as_str()), ("ordr", "ship"));
    }

    #[test]
    fn test_verb_quoted_form() {
        let (rule, wf, ws) = matched("Started workflow 'Billing' workstep 'Charge'");
        assert_eq!(rule, PatternRule::VerbQuoted);
        assert_eq!((wf.as_str(), ws.as_str()), ("Billing", "Charge"));

        let (rule, wf, ws) = matched(r#"EXECUTING Workflow "Order Intake" Workstep "Review""#);
        assert_eq!(rule, PatternRule::VerbQuoted);
        assert_eq!((wf.as_str(), ws.as_str()), ("Order Intake", "Review"));
    }

    #[test]
    fn test_pipe_delimited_form() {
        let (rule, wf, ws) = matched("Processing workflow: Billing  | Step: Charge card");
        assert_eq!(rule, PatternRule::PipeDelimited);
        assert_eq!((wf.as_str(), ws.as_str()), ("Billing", "Charge card"));

        let (_, _, ws) = matched("executing workflow:Billing|workstep:Refund");
        assert_eq!(ws, "Refund");
    }

    #[test]
    fn test_bracketed_form() {
        let (rule, wf, ws) = matched("Workflow [Billing] - Step [Charge]");
        assert_eq!(rule, PatternRule::Bracketed);
        assert_eq!((wf.as_str(), ws.as_str()), ("Billing", "Charge"));

        let (rule, _, ws) = matched("workflow[Billing]-workstep[Refund  Card]");
        assert_eq!(rule, PatternRule::Bracketed);
        assert_eq!(ws, "Refund Card");
    }

    #[test]
    fn test_abbreviated_form() {
        let (rule, wf, ws) = matched("WF: Billing, WS: Charge");
        assert_eq!(rule, PatternRule::Abbreviated);
        assert_eq!((wf.as_str(), ws.as_str()), ("Billing", "Charge"));

        let (rule, wf, ws) = matched("workflow: Billing, workstep: Charge");
        assert_eq!(rule, PatternRule::Abbreviated);
        assert_eq!((wf.as_str(), ws.as_str()), ("Billing", "Charge"));
    }

    #[test]
    fn test_dotted_form() {
        let (rule, wf, ws) = matched("billing.charge");
        assert_eq!(rule, PatternRule::Dotted);
        assert_eq!((wf.as_str(), ws.as_str()), ("billing", "charge"));

        let (_, wf, ws) = matched("billing.charge.retry_2");
        assert_eq!((wf.as_str(), ws.as_str()), ("billing", "charge.retry_2"));
    }

    #[test]
    fn test_dotted_form_requires_whole_line() {
        assert_eq!(PatternRule::Dotted.extract("see billing.charge"), None);
        assert_eq!(PatternRule::Dotted.extract("billing"), None);
        assert_eq!(PatternRule::Dotted.extract("1billing.charge"), None);
        assert!(match_line("version 1.2.3").is_none());
    }

    #[test]
    fn test_generic_quoted_form() {
        let (rule, wf, ws) = matched(r#"job "Billing" moved to "Charge""#);
        assert_eq!(rule, PatternRule::GenericQuoted);
        assert_eq!((wf.as_str(), ws.as_str()), ("Billing", "Charge"));
    }

    #[test]
    fn test_generic_quoted_takes_last_span() {
        let (_, wf, ws) = matched("'a' then 'b' then 'c'");
        assert_eq!((wf.as_str(), ws.as_str()), ("a", "c"));
    }

    #[test]
    fn test_key_value_form() {
        let (rule, wf, ws) = matched("wf=Billing; step=Charge");
        assert_eq!(rule, PatternRule::KeyValue);
        assert_eq!((wf.as_str(), ws.as_str()), ("Billing", "Charge"));

        let (rule, wf, ws) = matched("workflow:Billing ws: Charge now");
        assert_eq!(rule, PatternRule::KeyValue);
        assert_eq!((wf.as_str(), ws.as_str()), ("Billing", "Charge now"));
    }

    #[test]
    fn test_domain_wins_over_generic_quoted() {
        let line = r#"Processing Workflow ORDR Workstep SHIP WorkAction Default "x" "y""#;
        assert!(PatternRule::GenericQuoted.extract(line).is_some());
        let (rule, wf, ws) = matched(line);
        assert_eq!(rule, PatternRule::Domain);
        assert_eq!((wf.as_str(), ws.as_str()), ("ORDR", "SHIP"));
    }

    #[test]
    fn test_empty_normalization_falls_through() {
        // The bracketed rule captures only wrapper characters here, so a
        // later rule gets the line instead.
        let line = r#"workflow [''] - step [""] wf=Billing step=Charge"#;
        assert!(PatternRule::Bracketed.extract(line).is_some());
        let (rule, wf, ws) = matched(line);
        assert_eq!(rule, PatternRule::KeyValue);
        assert_eq!((wf.as_str(), ws.as_str()), ("Billing", "Charge"));
    }

    #[test]
    fn test_unrecognized_line() {
        assert!(match_line("random unrelated text").is_none());
        assert!(match_line("Processing Workflow ORDR").is_none());
    }
}
