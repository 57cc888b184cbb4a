//! Dwelling Directory
//!
//! Static mapping from the names guests see to upstream listing ids.

use std::collections::HashMap;

/// Known dwellings and their Hostaway listing ids.
pub const DWELLINGS: [(&str, u64); 6] = [
    ("Cantwell Lodge", 124502),
    ("3BR Bungalow", 297337),
    ("2BR Bungalow 1", 182391),
    ("2BR Bungalow 2", 182427),
    ("2BR Bungalow 3", 182428),
    ("Bungalow Buyout", 182431),
];

/// Immutable name → listing id lookup, built once at startup.
///
/// Matching is exact: case-sensitive, with spaces significant.
#[derive(Debug, Clone)]
pub struct DwellingDirectory {
    listings: HashMap<String, u64>,
}

impl DwellingDirectory {
    /// Builds a directory from `(name, listing_id)` pairs.
    pub fn new<'a>(entries: impl IntoIterator<Item = (&'a str, u64)>) -> Self {
        Self {
            listings: entries
                .into_iter()
                .map(|(name, id)| (name.to_string(), id))
                .collect(),
        }
    }

    /// Listing id for `name`, if it is a known dwelling.
    pub fn listing_id(&self, name: &str) -> Option<u64> {
        self.listings.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

impl Default for DwellingDirectory {
    fn default() -> Self {
        Self::new(DWELLINGS)
    }
}
