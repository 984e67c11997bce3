//! Categorization of details into display buckets
//!
//! Buckets are assigned by an ordered rule table evaluated top to bottom; the
//! first rule whose needles occur in the (lowercased) key wins. Order matters:
//! `Property Address` hits the `address` needle of the parties rule before the
//! property rule is ever consulted.

use crate::details::{DetailRecord, DOCUMENT_TYPE_KEY};
use std::fmt;

/// Semantic grouping a detail is displayed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Names, addresses and relationships of the parties
    Parties,

    /// Dates, periods and durations
    Dates,

    /// Property descriptions and subject matter
    Property,

    /// Governing law, consideration and transfer terms
    Legal,

    /// Everything else
    Other,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 5] = [
        Category::Parties,
        Category::Dates,
        Category::Property,
        Category::Legal,
        Category::Other,
    ];

    /// Get the category name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Parties => "parties",
            Category::Dates => "dates",
            Category::Property => "property",
            Category::Legal => "legal",
            Category::Other => "other",
        }
    }

    /// Human-readable heading for the bucket
    pub fn heading(&self) -> &'static str {
        match self {
            Category::Parties => "Parties Information",
            Category::Dates => "Dates & Duration",
            Category::Property => "Property Details",
            Category::Legal => "Legal Terms",
            Category::Other => "Other Details",
        }
    }

    /// Parse a category name
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "parties" => Some(Category::Parties),
            "dates" => Some(Category::Dates),
            "property" => Some(Category::Property),
            "legal" => Some(Category::Legal),
            "other" => Some(Category::Other),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a rule tests a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMatcher {
    /// Key equals the given string exactly (case-sensitive)
    Exact(&'static str),

    /// Lowercased key contains any of the given needles
    ContainsAny(&'static [&'static str]),

    /// Matches every key
    Any,
}

impl KeyMatcher {
    /// Test a key against this matcher
    pub fn matches(&self, key: &str) -> bool {
        match self {
            KeyMatcher::Exact(expected) => key == *expected,
            KeyMatcher::ContainsAny(needles) => {
                let lowered = key.to_lowercase();
                needles.iter().any(|needle| lowered.contains(needle))
            }
            KeyMatcher::Any => true,
        }
    }
}

/// Where a matched key goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Kept out of every bucket
    Excluded,

    /// Placed in the given bucket
    Bucket(Category),
}

/// One row of the categorization table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRule {
    /// Predicate on the key
    pub matcher: KeyMatcher,

    /// Destination when the predicate holds
    pub placement: Placement,
}

/// Ordered categorization rules; first match wins
pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        matcher: KeyMatcher::Exact(DOCUMENT_TYPE_KEY),
        placement: Placement::Excluded,
    },
    CategoryRule {
        matcher: KeyMatcher::ContainsAny(&["party", "name", "relationship", "address"]),
        placement: Placement::Bucket(Category::Parties),
    },
    CategoryRule {
        matcher: KeyMatcher::ContainsAny(&["date", "period", "duration"]),
        placement: Placement::Bucket(Category::Dates),
    },
    CategoryRule {
        matcher: KeyMatcher::ContainsAny(&["property", "legal description", "subject"]),
        placement: Placement::Bucket(Category::Property),
    },
    CategoryRule {
        matcher: KeyMatcher::ContainsAny(&["governing", "law", "consideration", "transfer type"]),
        placement: Placement::Bucket(Category::Legal),
    },
    CategoryRule {
        matcher: KeyMatcher::Any,
        placement: Placement::Bucket(Category::Other),
    },
];

/// Placement of a single key under [`CATEGORY_RULES`]
///
/// Returns `None` for keys that are excluded from every bucket.
///
/// # Examples
///
/// ```
/// use lexdraft_domain::{classify, Category};
///
/// assert_eq!(classify("Property Address"), Some(Category::Parties));
/// assert_eq!(classify("Legal Description"), Some(Category::Property));
/// assert_eq!(classify("Document Type"), None);
/// ```
pub fn classify(key: &str) -> Option<Category> {
    let rule = CATEGORY_RULES.iter().find(|rule| rule.matcher.matches(key));
    match rule.map(|r| r.placement) {
        Some(Placement::Bucket(category)) => Some(category),
        Some(Placement::Excluded) => None,
        // The table ends with a catch-all, so this only happens if it is edited away
        None => Some(Category::Other),
    }
}

/// Details partitioned into the five buckets
///
/// Derived view; every bucket is always present, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorizedDetails {
    /// Parties bucket
    pub parties: DetailRecord,
    /// Dates bucket
    pub dates: DetailRecord,
    /// Property bucket
    pub property: DetailRecord,
    /// Legal bucket
    pub legal: DetailRecord,
    /// Other bucket
    pub other: DetailRecord,
}

impl CategorizedDetails {
    /// Borrow one bucket
    pub fn get(&self, category: Category) -> &DetailRecord {
        match category {
            Category::Parties => &self.parties,
            Category::Dates => &self.dates,
            Category::Property => &self.property,
            Category::Legal => &self.legal,
            Category::Other => &self.other,
        }
    }

    fn get_mut(&mut self, category: Category) -> &mut DetailRecord {
        match category {
            Category::Parties => &mut self.parties,
            Category::Dates => &mut self.dates,
            Category::Property => &mut self.property,
            Category::Legal => &mut self.legal,
            Category::Other => &mut self.other,
        }
    }

    /// Buckets in display order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &DetailRecord)> {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// Non-empty buckets in display order
    pub fn non_empty(&self) -> impl Iterator<Item = (Category, &DetailRecord)> {
        self.iter().filter(|(_, bucket)| !bucket.is_empty())
    }

    /// Total number of categorized details
    pub fn total(&self) -> usize {
        self.iter().map(|(_, bucket)| bucket.len()).sum()
    }
}

/// Partition a record into buckets
pub fn categorize(details: &DetailRecord) -> CategorizedDetails {
    let mut categorized = CategorizedDetails::default();
    for (key, value) in details.iter() {
        if let Some(category) = classify(key) {
            categorized.get_mut(category).insert(key, value);
        }
    }
    categorized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> DetailRecord {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_scenario_buckets() {
        let details = record(&[
            ("Party 1 Name", "Alice"),
            ("Property Address", "1 Elm St"),
            ("Effective Date", "2024-05-01"),
            ("Consideration", "$50,000"),
            ("Governing Law", "State of NY"),
        ]);

        let categorized = categorize(&details);

        assert_eq!(
            categorized.parties.keys().collect::<Vec<_>>(),
            vec!["Party 1 Name", "Property Address"]
        );
        assert_eq!(categorized.dates.keys().collect::<Vec<_>>(), vec!["Effective Date"]);
        assert!(categorized.property.is_empty());
        assert_eq!(
            categorized.legal.keys().collect::<Vec<_>>(),
            vec!["Consideration", "Governing Law"]
        );
        assert!(categorized.other.is_empty());
    }

    #[test]
    fn test_address_beats_property() {
        assert_eq!(classify("Property Address"), Some(Category::Parties));
        assert_eq!(classify("address of the PROPERTY"), Some(Category::Parties));
        assert_eq!(classify("Property"), Some(Category::Property));
    }

    #[test]
    fn test_document_type_excluded() {
        let details = DetailRecord::with_defaults(None);
        let categorized = categorize(&details);

        assert_eq!(categorized.total(), details.len() - 1);
        assert!(categorized.iter().all(|(_, b)| !b.contains_key(DOCUMENT_TYPE_KEY)));
    }

    #[test]
    fn test_document_type_exclusion_is_exact() {
        assert_eq!(classify("document type"), Some(Category::Other));
        assert_eq!(classify("Document Type "), Some(Category::Other));
    }

    #[test]
    fn test_rule_precedence() {
        // "name" beats "date"
        assert_eq!(classify("Name Change Date"), Some(Category::Parties));
        // "date" beats "law"
        assert_eq!(classify("Law Effective Date"), Some(Category::Dates));
        // "subject" beats "governing"
        assert_eq!(classify("Subject Governing Terms"), Some(Category::Property));
        assert_eq!(classify("Transfer Type"), Some(Category::Legal));
        assert_eq!(classify("Relationship"), Some(Category::Parties));
        assert_eq!(classify("Lease Period"), Some(Category::Dates));
        assert_eq!(classify("Content Preview"), Some(Category::Other));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("GOVERNING LAW"), Some(Category::Legal));
        assert_eq!(classify("termination DURATION"), Some(Category::Dates));
    }

    #[test]
    fn test_empty_record() {
        let categorized = categorize(&DetailRecord::new());
        assert_eq!(categorized.total(), 0);
        assert_eq!(categorized.iter().count(), 5);
        assert_eq!(categorized.non_empty().count(), 0);
    }

    #[test]
    fn test_bucket_preserves_insertion_order() {
        let details = record(&[("Party 2 Name", "B"), ("Party 1 Name", "A")]);
        let categorized = categorize(&details);
        assert_eq!(
            categorized.parties.iter().collect::<Vec<_>>(),
            vec![("Party 2 Name", "B"), ("Party 1 Name", "A")]
        );
    }

    #[test]
    fn test_category_parse_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.as_str()), Some(category));
        }
        assert_eq!(Category::parse("unknown"), None);
    }
}
