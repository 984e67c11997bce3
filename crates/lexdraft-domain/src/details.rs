//! Detail records - ordered key/value facts about a document

/// Key that names the document type; rendered on its own and never bucketed
pub const DOCUMENT_TYPE_KEY: &str = "Document Type";

/// Document type used when nothing better is known
pub const DEFAULT_DOCUMENT_TYPE: &str = "Legal Document";

/// Seed values shown before anything has been extracted
pub const DEFAULT_DETAILS: &[(&str, &str)] = &[
    ("Party 1 Name", "John Smith"),
    ("Party 2 Name", "Jane Doe"),
    ("Effective Date", "2024-01-01"),
    ("Property Address", "123 Main Street"),
    ("Consideration", "$100,000"),
    ("Governing Law", "State of California"),
];

/// Ordered mapping from detail key to value
///
/// Keys are unique and keep their insertion position: overwriting an existing
/// key changes its value in place, new keys are appended.
///
/// # Examples
///
/// ```
/// use lexdraft_domain::DetailRecord;
///
/// let mut record = DetailRecord::new();
/// record.insert("Party 1 Name", "Alice");
/// record.insert("Effective Date", "2024-05-01");
/// record.insert("Party 1 Name", "Alicia");
///
/// assert_eq!(record.get("Party 1 Name"), Some("Alicia"));
/// assert_eq!(record.keys().next(), Some("Party 1 Name"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailRecord {
    entries: Vec<(String, String)>,
}

impl DetailRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Record seeded with the default detail set
    ///
    /// `document_type` falls back to [`DEFAULT_DOCUMENT_TYPE`] when absent or empty.
    pub fn with_defaults(document_type: Option<&str>) -> Self {
        let mut record = Self::new();
        let doc_type = document_type
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_DOCUMENT_TYPE);
        record.insert(DOCUMENT_TYPE_KEY, doc_type);
        for (key, value) in DEFAULT_DETAILS {
            record.insert(*key, *value);
        }
        record
    }

    /// Insert or overwrite a value, returning the previous one
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Look up a value by exact key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Remove a key, returning its value
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    /// Overlay `other` on top of this record
    ///
    /// Keys in `other` overwrite matching keys here; unknown keys are appended;
    /// keys `other` does not mention are left untouched.
    pub fn merge(&mut self, other: &DetailRecord) {
        for (key, value) in other.iter() {
            self.insert(key, value);
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the record has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K, V> FromIterator<(K, V)> for DetailRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = DetailRecord::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

impl IntoIterator for DetailRecord {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
