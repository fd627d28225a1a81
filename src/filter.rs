//! Client-side filtering of the photo collection.
//!
//! [`apply`] keeps a photo only if every predicate passes (logical AND).
//! Predicates whose criterion sits at its default value always pass, so a
//! default [`FilterCriteria`] returns the input unchanged.
//!
//! | Criterion | Test |
//! |-----------|------|
//! | `search_query` | every whitespace-separated term is a substring of the search text |
//! | `location` | substring of `location.searchable` |
//! | `likes` | inclusive [`Range`] |
//! | `photographer` | substring of `user.username` |
//! | `orientation` | strict width/height comparison, squares match only `All` |
//! | `dimensions` | width and height each within their own [`Range`] |
//! | `categories` | any selected category equals a photo category or tag title |
//!
//! All text comparisons are case-insensitive. `date_range` is carried in the
//! criteria (and persisted, and clearable) but no predicate reads it.

use crate::types::Photo;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// =============================================================================
// Bounds
// =============================================================================

/// Upper end of a numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bound {
    /// No upper limit; every value is admitted.
    #[default]
    Unbounded,
    /// Inclusive limit.
    AtMost(u64),
}

impl Bound {
    pub fn admits(&self, value: u64) -> bool {
        match self {
            Self::Unbounded => true,
            Self::AtMost(max) => value <= *max,
        }
    }

    /// `None` maps to `Unbounded`.
    pub fn from_option(max: Option<u64>) -> Self {
        max.map_or(Self::Unbounded, Self::AtMost)
    }
}

/// Inclusive `min..=max` range where `max` may be unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Range {
    pub min: u64,
    pub max: Bound,
}

impl Range {
    pub fn new(min: u64, max: Option<u64>) -> Self {
        Self {
            min,
            max: Bound::from_option(max),
        }
    }

    pub fn contains(&self, value: u64) -> bool {
        value >= self.min && self.max.admits(value)
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

// =============================================================================
// Criteria
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    All,
    Landscape,
    Portrait,
}

impl Orientation {
    pub fn matches(&self, photo: &Photo) -> bool {
        match self {
            Self::All => true,
            Self::Landscape => photo.is_landscape(),
            Self::Portrait => photo.is_portrait(),
        }
    }
}

/// Upload-date window. Stored with the criteria; not applied by [`apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRange {
    #[default]
    All,
    Today,
    Week,
    Month,
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: Range,
    pub height: Range,
}

/// Every filter the user can set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub search_query: String,
    pub location: String,
    pub likes: Range,
    pub photographer: String,
    pub orientation: Orientation,
    pub date_range: DateRange,
    pub categories: BTreeSet<String>,
    pub dimensions: Dimensions,
}

/// Names one criterion for [`FilterCriteria::clear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Search,
    Location,
    Likes,
    Photographer,
    Orientation,
    DateRange,
    Categories,
    Dimensions,
}

impl FilterCriteria {
    /// Restore a single criterion to its default.
    pub fn clear(&mut self, field: FilterField) {
        let defaults = Self::default();
        match field {
            FilterField::Search => self.search_query = defaults.search_query,
            FilterField::Location => self.location = defaults.location,
            FilterField::Likes => self.likes = defaults.likes,
            FilterField::Photographer => self.photographer = defaults.photographer,
            FilterField::Orientation => self.orientation = defaults.orientation,
            FilterField::DateRange => self.date_range = defaults.date_range,
            FilterField::Categories => self.categories = defaults.categories,
            FilterField::Dimensions => self.dimensions = defaults.dimensions,
        }
    }

    /// True when no criterion differs from its default.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether `photo` passes every predicate.
    pub fn matches(&self, photo: &Photo) -> bool {
        matches_search(&self.search_query, photo)
            && contains_ci(&photo.location.searchable, &self.location)
            && self.likes.contains(photo.likes)
            && contains_ci(&photo.user.username, &self.photographer)
            && self.orientation.matches(photo)
            && self.dimensions.width.contains(u64::from(photo.width))
            && self.dimensions.height.contains(u64::from(photo.height))
            && matches_categories(&self.categories, photo)
    }
}

/// Order-preserving subset of `photos` passing `criteria`.
pub fn apply(criteria: &FilterCriteria, photos: &[Photo]) -> Vec<Photo> {
    photos
        .iter()
        .filter(|p| criteria.matches(p))
        .cloned()
        .collect()
}

// =============================================================================
// Predicates
// =============================================================================

/// Case-insensitive substring test. A blank needle always matches.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn search_text(photo: &Photo) -> String {
    [
        photo.description.as_str(),
        photo.user.name.as_str(),
        photo.user.username.as_str(),
        photo.location.searchable.as_str(),
        photo.user.bio.as_str(),
        photo.alt_description.as_deref().unwrap_or_default(),
    ]
    .join(" ")
    .to_lowercase()
}

/// Conjunctive multi-term search: every term must appear.
fn matches_search(query: &str, photo: &Photo) -> bool {
    if query.trim().is_empty() {
        return true;
    }
    let text = search_text(photo);
    query
        .split_whitespace()
        .all(|term| text.contains(&term.to_lowercase()))
}

fn matches_categories(selected: &BTreeSet<String>, photo: &Photo) -> bool {
    if selected.is_empty() {
        return true;
    }
    let labels: Vec<String> = photo
        .categories
        .iter()
        .map(|c| c.to_lowercase())
        .chain(photo.tags.iter().map(|t| t.title.to_lowercase()))
        .collect();
    selected
        .iter()
        .any(|wanted| labels.contains(&wanted.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    fn ids(photos: &[Photo]) -> Vec<&str> {
        photos.iter().map(|p| p.id.as_str()).collect()
    }

    // =========================================================================
    // Defaults
    // =========================================================================

    #[test]
    fn default_criteria_return_input_unchanged() {
        let photos = sample_collection();
        let result = apply(&FilterCriteria::default(), &photos);
        assert_eq!(result, photos);
    }

    #[test]
    fn default_criteria_on_empty_input() {
        assert!(apply(&FilterCriteria::default(), &[]).is_empty());
    }

    #[test]
    fn default_criteria_are_empty() {
        assert!(FilterCriteria::default().is_empty());
    }

    // =========================================================================
    // Search
    // =========================================================================

    #[test]
    fn search_is_conjunctive() {
        let lake = PhotoBuilder::new("lake")
            .description("Calm lake at dusk")
            .build();
        let criteria = FilterCriteria {
            search_query: "mountain lake".into(),
            ..Default::default()
        };
        assert!(!criteria.matches(&lake));

        let criteria = FilterCriteria {
            search_query: "LAKE dusk".into(),
            ..Default::default()
        };
        assert!(criteria.matches(&lake));
    }

    #[test]
    fn search_covers_user_location_bio_and_alt_description() {
        let photo = PhotoBuilder::new("p")
            .description("untitled")
            .user("Jane Doe", "alpine_jane")
            .bio("Climber")
            .location("Lake Bled", "lake bled slovenia")
            .alt_description("white boat")
            .build();
        for query in ["jane", "ALPINE", "slovenia", "climber", "boat"] {
            let criteria = FilterCriteria {
                search_query: query.into(),
                ..Default::default()
            };
            assert!(criteria.matches(&photo), "query '{query}' should match");
        }
    }

    #[test]
    fn whitespace_query_matches_everything() {
        let criteria = FilterCriteria {
            search_query: "   ".into(),
            ..Default::default()
        };
        assert_eq!(apply(&criteria, &sample_collection()).len(), 4);
    }

    // =========================================================================
    // Location / photographer
    // =========================================================================

    #[test]
    fn location_is_substring_of_searchable() {
        let photo = PhotoBuilder::new("p")
            .location("Lake Bled", "lake bled bled slovenia")
            .build();
        let criteria = FilterCriteria {
            location: "Slovenia".into(),
            ..Default::default()
        };
        assert!(criteria.matches(&photo));

        let criteria = FilterCriteria {
            location: "Italy".into(),
            ..Default::default()
        };
        assert!(!criteria.matches(&photo));
    }

    #[test]
    fn photographer_matches_username_substring_only() {
        let photo = PhotoBuilder::new("p").user("Jane Doe", "alpine_jane").build();
        let by_username = FilterCriteria {
            photographer: "Alpine".into(),
            ..Default::default()
        };
        assert!(by_username.matches(&photo));

        let by_name = FilterCriteria {
            photographer: "Doe".into(),
            ..Default::default()
        };
        assert!(!by_name.matches(&photo));
    }

    // =========================================================================
    // Ranges
    // =========================================================================

    #[test]
    fn likes_range_inclusive() {
        let photo = PhotoBuilder::new("p").likes(50).build();
        assert!(Range::new(50, Some(50)).contains(photo.likes));
        assert!(!Range::new(51, None).contains(photo.likes));
        assert!(!Range::new(0, Some(49)).contains(photo.likes));
    }

    #[test]
    fn unbounded_max_admits_everything() {
        assert!(Bound::Unbounded.admits(u64::MAX));
        assert!(Range::new(10, None).contains(u64::MAX));
    }

    #[test]
    fn likes_filter_applies_to_collection() {
        let criteria = FilterCriteria {
            likes: Range::new(10, Some(200)),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&criteria, &sample_collection())), vec!["mountain", "city"]);
    }

    #[test]
    fn dimension_bounds_are_independent() {
        let photo = PhotoBuilder::new("p").size(1920, 1080).build();
        let criteria = FilterCriteria {
            dimensions: Dimensions {
                width: Range::new(1900, None),
                height: Range::new(0, Some(1000)),
            },
            ..Default::default()
        };
        assert!(!criteria.matches(&photo));

        let criteria = FilterCriteria {
            dimensions: Dimensions {
                width: Range::new(1900, None),
                height: Range::new(0, Some(1080)),
            },
            ..Default::default()
        };
        assert!(criteria.matches(&photo));
    }

    // =========================================================================
    // Orientation
    // =========================================================================

    #[test]
    fn landscape_photo_orientation() {
        let photo = PhotoBuilder::new("p").size(1920, 1080).build();
        assert!(Orientation::Landscape.matches(&photo));
        assert!(!Orientation::Portrait.matches(&photo));
        assert!(Orientation::All.matches(&photo));
    }

    #[test]
    fn square_photo_matches_only_all() {
        let photo = PhotoBuilder::new("p").size(500, 500).build();
        assert!(!Orientation::Landscape.matches(&photo));
        assert!(!Orientation::Portrait.matches(&photo));
        assert!(Orientation::All.matches(&photo));
    }

    // =========================================================================
    // Categories
    // =========================================================================

    #[test]
    fn categories_match_tags_or_categories() {
        let photo = PhotoBuilder::new("p")
            .tags(&["Mountain", "snow"])
            .categories(&["Nature"])
            .build();
        let pick = |names: &[&str]| FilterCriteria {
            categories: names.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        };
        assert!(pick(&["mountain"]).matches(&photo));
        assert!(pick(&["NATURE"]).matches(&photo));
        assert!(pick(&["city", "snow"]).matches(&photo));
        assert!(!pick(&["city"]).matches(&photo));
        // Equality, not containment.
        assert!(!pick(&["moun"]).matches(&photo));
    }

    // =========================================================================
    // Combination, order, clearing
    // =========================================================================

    #[test]
    fn all_predicates_must_pass_and_order_is_kept() {
        let criteria = FilterCriteria {
            orientation: Orientation::Landscape,
            likes: Range::new(1, None),
            ..Default::default()
        };
        assert_eq!(
            ids(&apply(&criteria, &sample_collection())),
            vec!["mountain", "beach"]
        );
    }

    #[test]
    fn date_range_does_not_filter() {
        let criteria = FilterCriteria {
            date_range: DateRange::Today,
            ..Default::default()
        };
        assert_eq!(apply(&criteria, &sample_collection()).len(), 4);
    }

    #[test]
    fn clear_restores_only_that_field() {
        let mut criteria = FilterCriteria {
            search_query: "lake".into(),
            location: "bled".into(),
            likes: Range::new(5, Some(10)),
            orientation: Orientation::Portrait,
            ..Default::default()
        };
        criteria.clear(FilterField::Search);
        assert_eq!(criteria.search_query, "");
        assert_eq!(criteria.location, "bled");

        criteria.clear(FilterField::Likes);
        assert!(criteria.likes.is_default());
        assert_eq!(criteria.orientation, Orientation::Portrait);

        criteria.clear(FilterField::Location);
        criteria.clear(FilterField::Orientation);
        assert!(criteria.is_empty());
    }
}
