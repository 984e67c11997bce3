//! Document module - the draft under review

use crate::details::DetailRecord;
use std::fmt;

/// Unique identifier for a document, backed by a UUIDv7
///
/// UUIDv7 keeps identifiers chronologically sortable, so documents created
/// later in a session always compare greater than earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(u128);

impl DocumentId {
    /// Generate a new UUIDv7-based DocumentId
    ///
    /// # Examples
    ///
    /// ```
    /// use lexdraft_domain::DocumentId;
    ///
    /// let id = DocumentId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a DocumentId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a DocumentId from its hyphenated string form
    ///
    /// # Examples
    ///
    /// ```
    /// use lexdraft_domain::DocumentId;
    ///
    /// let id = DocumentId::new();
    /// let parsed = DocumentId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid document id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Milliseconds since the Unix epoch encoded in the id
    pub fn timestamp(&self) -> u64 {
        // UUIDv7: top 48 bits are the Unix millisecond timestamp
        (self.0 >> 80) as u64
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// A generated legal document
///
/// Owned by the calling context. Only `content` is rewritten during a
/// preview session (by refinement and by saved manual edits).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    /// Unique identifier
    pub id: DocumentId,

    /// Raw markdown body as produced by the generation service
    pub content: String,

    /// Presentation-ready rendering of `content`, if the host produced one
    pub formatted_content: Option<String>,

    /// Detected document type (e.g. "Property Transfer Agreement")
    pub document_type: Option<String>,

    /// Details already known for this document
    pub details: Option<DetailRecord>,
}

impl Document {
    /// Create a document with a fresh id and the given content
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: DocumentId::new(),
            content: content.into(),
            formatted_content: None,
            document_type: None,
            details: None,
        }
    }

    /// Set the detected document type
    pub fn with_document_type(mut self, document_type: impl Into<String>) -> Self {
        self.document_type = Some(document_type.into());
        self
    }

    /// Attach previously known details
    pub fn with_details(mut self, details: DetailRecord) -> Self {
        self.details = Some(details);
        self
    }

    /// Text shown to the reader: the formatted rendering when present
    pub fn display_text(&self) -> &str {
        self.formatted_content
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.content)
    }

    /// Whether the document has any body text
    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: id ordering matches the underlying u128 ordering
        #[test]
        fn test_id_ordering_property(a: u128, b: u128) {
            let id_a = DocumentId::from_value(a);
            let id_b = DocumentId::from_value(b);
            prop_assert_eq!(id_a < id_b, a < b);
            prop_assert_eq!(id_a == id_b, a == b);
        }

        /// Property: string round-trip preserves the id
        #[test]
        fn test_id_string_roundtrip(value: u128) {
            let id = DocumentId::from_value(value);
            match DocumentId::from_string(&id.to_string()) {
                Ok(parsed) => prop_assert_eq!(id, parsed),
                Err(e) => return Err(TestCaseError::fail(e)),
            }
        }
    }
}
