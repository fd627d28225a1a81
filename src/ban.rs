//! User-maintained exclusion rules for single-photo draws.
//!
//! A ban entry pairs an attribute with a value. Matching is deliberately
//! asymmetric:
//!
//! | Attribute | Compared against | Test |
//! |-----------|------------------|------|
//! | `Description` | `photo.description` | case-insensitive **containment** |
//! | `Photographer` | `photo.user.name` | case-insensitive **equality** |
//! | `Location` | `photo.location.title` | case-insensitive **equality** |
//!
//! Banning photographer "Jane" therefore does not exclude "Jane Doe", while
//! banning description "fog" excludes "Foggy harbour".

use crate::types::Photo;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BanAttribute {
    Description,
    Photographer,
    Location,
}

impl fmt::Display for BanAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Description => "description",
            Self::Photographer => "photographer",
            Self::Location => "location",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BanEntry {
    pub attribute: BanAttribute,
    pub value: String,
}

impl BanEntry {
    fn same_key(&self, value: &str, attribute: BanAttribute) -> bool {
        self.attribute == attribute && self.value.to_lowercase() == value.to_lowercase()
    }

    pub fn matches(&self, photo: &Photo) -> bool {
        let value = self.value.to_lowercase();
        match self.attribute {
            BanAttribute::Description => photo.description.to_lowercase().contains(&value),
            BanAttribute::Photographer => photo.user.name.to_lowercase() == value,
            BanAttribute::Location => photo.location.title.to_lowercase() == value,
        }
    }
}

/// Result of [`BanList::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BanToggle {
    Added,
    Removed,
    /// Empty values are never banned.
    Ignored,
}

/// Ordered set of ban entries, unique by (attribute, lowercase value).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BanList {
    entries: Vec<BanEntry>,
}

impl BanList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove the matching entry if present, otherwise add it.
    pub fn toggle(&mut self, value: &str, attribute: BanAttribute) -> BanToggle {
        if value.is_empty() {
            return BanToggle::Ignored;
        }
        if self.contains(value, attribute) {
            self.entries.retain(|e| !e.same_key(value, attribute));
            BanToggle::Removed
        } else {
            self.entries.push(BanEntry {
                attribute,
                value: value.to_string(),
            });
            BanToggle::Added
        }
    }

    pub fn contains(&self, value: &str, attribute: BanAttribute) -> bool {
        self.entries.iter().any(|e| e.same_key(value, attribute))
    }

    pub fn is_banned(&self, photo: &Photo) -> bool {
        self.entries.iter().any(|e| e.matches(photo))
    }

    /// The first entry excluding `photo`, for logging.
    pub fn matching_entry(&self, photo: &Photo) -> Option<&BanEntry> {
        self.entries.iter().find(|e| e.matches(photo))
    }

    pub fn entries(&self) -> &[BanEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
