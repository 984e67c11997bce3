//! Cleanup of raw service drafts
//!
//! Drafts often arrive wrapped in assistant chatter: greetings, disclaimers,
//! "let me know if..." tails and markdown decoration. [`clean_legal_document`]
//! strips that down to the document itself.

use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Marker the service prefixes to a finished draft
pub const DRAFT_COMPLETE_MARKER: &str = "DRAFT_COMPLETE:";

/// Whether the response carries the finished-draft marker
pub fn is_draft_complete(text: &str) -> bool {
    text.contains(DRAFT_COMPLETE_MARKER)
}

/// Remove the finished-draft marker and surrounding whitespace
pub fn strip_draft_marker(text: &str) -> String {
    text.replace(DRAFT_COMPLETE_MARKER, "").trim().to_string()
}

/// Assistant phrases removed wherever they occur (per line)
const CHATTER_PATTERNS: &[&str] = &[
    r"(?im)Understood\.\s*",
    r"(?im)Below is a draft\s+.*?\.\s*",
    r"(?im)Please review it and let me know.*?\.\s*",
    r"(?im)if you'd like any modifications.*?\.\s*",
    r"(?im)if you'd like to replace.*?\.\s*",
    r"(?im)Here is.*?draft.*?:\s*",
    r"(?im)I'll help you create.*?\.\s*",
    r"(?im)Let me draft.*?for you\.\s*",
    r"(?im)Here's a.*?document.*?:\s*",
    r"(?im)I've prepared.*?document.*?\.\s*",
    r"(?im)This document.*?placeholder.*?\.\s*",
    r"(?im)Note:.*?placeholder.*?\.\s*",
    r"(?im)Please note.*?placeholder.*?\.\s*",
    r"(?im)\*\*Note:.*?\*\*\s*",
    r"(?im)---+\s*",
    r"(?im)^\s*\*\*.*?\*\*\s*$",
    r"(?im)based on fictitious details.*?\.\s*",
    r"(?im)This is for illustrative purposes only.*?\.\s*",
    r"(?im)should not be used as a legally binding document.*?\.\s*",
    r"(?im)without review by a qualified legal professional.*?\.\s*",
    r"(?im)This is a template.*?\.\s*",
    r"(?im)For a legally binding document.*?\.\s*",
    r"(?im)consult a lawyer.*?\.\s*",
    r"(?im)to tailor it to your specific needs.*?\.\s*",
    r"(?im)Let me know.*$",
    r"(?im)If you need.*?modifications.*?\.\s*",
    r"(?im)Please let me know.*?\.\s*",
    r"(?im)Feel free to.*?\.\s*",
    r"(?im)This template.*?\.\s*",
    r"(?im)Disclaimer:.*?\.\s*",
    r"(?im)\*\*Disclaimer:.*?\*\*\s*",
    r"(?im)Important:.*?\.\s*",
    r"(?im)\*\*Important:.*?\*\*\s*",
];

/// Phrases that end the document: everything from them on is dropped
const TAIL_PATTERNS: &[&str] = &[
    r"(?is)This is a template.*$",
    r"(?is)For a legally binding document.*$",
    r"(?is)consult a lawyer.*$",
    r"(?is)Let me know.*$",
    r"(?is)If you need.*$",
    r"(?is)Please let me know.*$",
    r"(?is)Feel free to.*$",
    r"(?is)This template.*$",
    r"(?is)Disclaimer:.*$",
    r"(?is)Important:.*$",
];

const SIGNATURE_BLOCK_PATTERN: &str = r"(?s)Employee Signature:.*?Date:.*?_______________";

/// Document titles, most specific first; text before the first hit is dropped
const TITLE_PATTERNS: &[&str] = &[
    r"(?i)EMPLOYMENT CONTRACT|EMPLOYMENT AGREEMENT",
    r"(?i)PROPERTY TRANSFER AGREEMENT|PROPERTY TRANSFER",
    r"(?i)NON-DISCLOSURE AGREEMENT|\bNDA\b",
    r"(?i)SERVICE AGREEMENT|SERVICE CONTRACT",
    r"(?i)LEASE AGREEMENT|RENTAL AGREEMENT",
    r"(?i)PARTNERSHIP AGREEMENT",
    r"(?i)CONTRACT|AGREEMENT",
];

/// `(pattern, replacement)` pairs applied after trimming, in order
const FORMAT_RULES: &[(&str, &str)] = &[
    // markdown bold, headers and bullets
    (r"\*\*(.*?)\*\*", "${1}"),
    (r"###\s*\*\*\s*", ""),
    (r"###\s*", ""),
    (r"\*\s*", ""),
    (r"(?m)^\s*-\s*", ""),
    // spacing
    (r"[ \t]+", " "),
    (r"\s([.,;:])", "${1}"),
    (r"\n\s*\n\s*\n+", "\n\n"),
    (r"^\s*\n+", ""),
    (r"\n+\s*$", ""),
    (r":([A-Z])", ": ${1}"),
    (r"\.([A-Z])", ". ${1}"),
    // section layout
    (r"\n([A-Z][^.]*:)", "\n\n${1}"),
    (r"(\d+\.)\s*([A-Z])", "\n${1} ${2}"),
];

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|pattern| match Regex::new(pattern) {
            Ok(re) => Some(re),
            Err(e) => {
                warn!("Skipping cleanup pattern {:?}: {}", pattern, e);
                None
            }
        })
        .collect()
}

fn chatter_regexes() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| compile(CHATTER_PATTERNS))
}

fn tail_regexes() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| compile(TAIL_PATTERNS))
}

fn signature_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| compile(&[SIGNATURE_BLOCK_PATTERN])).first()
}

fn title_regexes() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| compile(TITLE_PATTERNS))
}

fn format_rules() -> &'static [(Regex, &'static str)] {
    static RE: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RE.get_or_init(|| {
        FORMAT_RULES
            .iter()
            .filter_map(|(pattern, replacement)| {
                compile(&[*pattern]).pop().map(|re| (re, *replacement))
            })
            .collect()
    })
}

/// Strip assistant chatter and markdown from a generated legal document
///
/// The result starts at the first recognised document title, ends after an
/// employee signature block when there is one, and has normalised spacing.
pub fn clean_legal_document(raw_text: &str) -> String {
    let mut text = raw_text.trim().to_string();
    let original_len = text.len();

    for re in chatter_regexes().iter().chain(tail_regexes()) {
        text = re.replace_all(&text, "").into_owned();
    }

    if let Some(end) = signature_regex().and_then(|re| re.find(&text)).map(|m| m.end()) {
        text.truncate(end);
    }

    if let Some(start) = title_regexes()
        .iter()
        .find_map(|re| re.find(&text))
        .map(|m| m.start())
    {
        text.drain(..start);
    }

    for (re, replacement) in format_rules() {
        text = re.replace_all(&text, *replacement).into_owned();
    }

    let cleaned = text.trim().to_string();
    debug!("Cleaned draft from {} to {} chars", original_len, cleaned.len());
    cleaned
}
