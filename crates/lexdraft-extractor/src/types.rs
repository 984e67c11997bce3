//! Result types for extraction

use lexdraft_domain::DetailRecord;
use std::fmt;

/// Which parser stage produced a detail record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseStage {
    /// A JSON object was found and decoded
    StrictJson,
    /// `key: value` / `key - value` lines were picked up
    HeuristicLines,
    /// Nothing usable; synthesized from the document itself
    Fallback,
}

impl ParseStage {
    /// Short lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseStage::StrictJson => "json",
            ParseStage::HeuristicLines => "lines",
            ParseStage::Fallback => "fallback",
        }
    }
}

impl fmt::Display for ParseStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Details pulled from one service response
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Extracted key/value pairs, in response order
    pub details: DetailRecord,

    /// Stage that produced `details`
    pub stage: ParseStage,
}
