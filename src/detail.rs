//! Per-photo analytics for the detail view.
//!
//! Everything here is derived from a single [`Photo`]:
//!
//! - engagement rate (`likes / views`, percent, two decimals) and its label
//! - composition and popularity labels
//! - short insight sentences triggered by thresholds
//! - suggested filters that find similar photos
//! - technical facts (resolution, aspect ratio, color, location)

use crate::filter::{FilterCriteria, Orientation, Range};
use crate::types::Photo;
use std::fmt;

/// Likes above this mark a photo as trending and well engaged.
const TRENDING_LIKES: u64 = 100;
/// Downloads above this suggest commercial appeal.
const COMMERCIAL_DOWNLOADS: u64 = 50;
/// More tags than this count as well tagged.
const WELL_TAGGED: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngagementLevel {
    High,
    Average,
    Low,
}

impl EngagementLevel {
    /// High above 5%, Average above 2%.
    pub fn from_rate(rate: f64) -> Self {
        if rate > 5.0 {
            Self::High
        } else if rate > 2.0 {
            Self::Average
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for EngagementLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::High => "High",
            Self::Average => "Average",
            Self::Low => "Low",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popularity {
    Trending,
    Growing,
}

impl fmt::Display for Popularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Trending => "Trending",
            Self::Growing => "Growing",
        })
    }
}

/// A filter that would surface photos similar to this one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestedFilter {
    Orientation(Orientation),
    Likes { min: u64, max: u64 },
    Location(String),
}

impl SuggestedFilter {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Orientation(_) => "Orientation",
            Self::Likes { .. } => "Likes Range",
            Self::Location(_) => "Location",
        }
    }

    pub fn value(&self) -> String {
        match self {
            Self::Orientation(Orientation::Portrait) => "Portrait".to_string(),
            Self::Orientation(_) => "Landscape".to_string(),
            Self::Likes { min, max } => format!("{min} - {max}"),
            Self::Location(title) => title.clone(),
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            Self::Orientation(_) => "Find similar composition styles",
            Self::Likes { .. } => "Discover similarly popular photos",
            Self::Location(_) => "Explore more from this location",
        }
    }

    /// Write this suggestion into `criteria`, leaving other fields alone.
    pub fn apply_to(&self, criteria: &mut FilterCriteria) {
        match self {
            Self::Orientation(o) => criteria.orientation = *o,
            Self::Likes { min, max } => criteria.likes = Range::new(*min, Some(*max)),
            Self::Location(title) => criteria.location = title.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhotoDetail {
    /// Percent, rounded to two decimals.
    pub engagement_rate: f64,
    pub engagement: EngagementLevel,
    pub composition: Orientation,
    pub popularity: Popularity,
    pub insights: Vec<&'static str>,
    pub suggestions: Vec<SuggestedFilter>,
    pub resolution: (u32, u32),
    /// Rounded to two decimals.
    pub aspect_ratio: f64,
    pub color: String,
    pub location: String,
}

impl PhotoDetail {
    pub fn from_photo(photo: &Photo) -> Self {
        let engagement_rate = round2(photo.likes as f64 / photo.views.max(1) as f64 * 100.0);
        // Squares read as portrait here; there is no third composition label.
        let composition = if photo.is_landscape() {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        };

        Self {
            engagement_rate,
            engagement: EngagementLevel::from_rate(engagement_rate),
            composition,
            popularity: if photo.likes > TRENDING_LIKES {
                Popularity::Trending
            } else {
                Popularity::Growing
            },
            insights: insights(photo),
            suggestions: suggestions(photo, composition),
            resolution: (photo.width, photo.height),
            aspect_ratio: round2(photo.aspect_ratio()),
            color: photo
                .color
                .clone()
                .unwrap_or_else(|| "Standard".to_string()),
            location: photo.location.title.clone(),
        }
    }
}

fn insights(photo: &Photo) -> Vec<&'static str> {
    let mut out = Vec::new();
    if photo.likes > TRENDING_LIKES {
        out.push("This photo is performing well in terms of engagement!");
    }
    if photo.downloads > COMMERCIAL_DOWNLOADS {
        out.push("High download rate indicates strong commercial appeal.");
    }
    if photo.tags.len() > WELL_TAGGED {
        out.push("Well-tagged photo improves discoverability.");
    }
    out
}

fn suggestions(photo: &Photo, composition: Orientation) -> Vec<SuggestedFilter> {
    // floor(0.8 * likes) .. ceil(1.2 * likes), in integer arithmetic.
    let likes = photo.likes;
    let mut out = vec![
        SuggestedFilter::Orientation(composition),
        SuggestedFilter::Likes {
            min: likes.saturating_mul(4) / 5,
            max: likes.saturating_mul(6).saturating_add(4) / 5,
        },
    ];
    if photo.location.is_specified() {
        out.push(SuggestedFilter::Location(photo.location.title.clone()));
    }
    out
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter;
    use crate::test_helpers::*;

    #[test]
    fn engagement_rate_from_likes_and_views() {
        let photo = PhotoBuilder::new("p").likes(30).views(1000).build();
        let detail = PhotoDetail::from_photo(&photo);
        assert_eq!(detail.engagement_rate, 3.0);
        assert_eq!(detail.engagement, EngagementLevel::Average);
    }

    #[test]
    fn zero_views_treated_as_one() {
        let photo = PhotoBuilder::new("p").likes(2).views(0).build();
        let detail = PhotoDetail::from_photo(&photo);
        assert_eq!(detail.engagement_rate, 200.0);
        assert_eq!(detail.engagement, EngagementLevel::High);
    }

    #[test]
    fn engagement_level_thresholds_are_exclusive() {
        assert_eq!(EngagementLevel::from_rate(5.0), EngagementLevel::Average);
        assert_eq!(EngagementLevel::from_rate(5.01), EngagementLevel::High);
        assert_eq!(EngagementLevel::from_rate(2.0), EngagementLevel::Low);
    }

    #[test]
    fn popularity_and_insights() {
        let photo = PhotoBuilder::new("p")
            .likes(101)
            .downloads(51)
            .tags(&["a", "b", "c", "d", "e", "f"])
            .build();
        let detail = PhotoDetail::from_photo(&photo);
        assert_eq!(detail.popularity, Popularity::Trending);
        assert_eq!(detail.insights.len(), 3);

        let quiet = PhotoDetail::from_photo(&PhotoBuilder::new("q").likes(100).build());
        assert_eq!(quiet.popularity, Popularity::Growing);
        assert!(quiet.insights.is_empty());
    }

    #[test]
    fn suggestions_cover_orientation_likes_location() {
        let photo = PhotoBuilder::new("p")
            .size(1080, 1920)
            .likes(55)
            .location("Lake Bled", "lake bled")
            .build();
        let detail = PhotoDetail::from_photo(&photo);
        assert_eq!(detail.suggestions, vec![
            SuggestedFilter::Orientation(Orientation::Portrait),
            SuggestedFilter::Likes { min: 44, max: 66 },
            SuggestedFilter::Location("Lake Bled".into()),
        ]);
        assert_eq!(detail.suggestions[1].value(), "44 - 66");
    }

    #[test]
    fn unspecified_location_not_suggested() {
        let detail = PhotoDetail::from_photo(&PhotoBuilder::new("p").build());
        assert_eq!(detail.suggestions.len(), 2);
        assert_eq!(detail.color, "Standard");
    }

    #[test]
    fn applying_suggestions_finds_the_source_photo() {
        let photos = sample_collection();
        let mountain = &photos[0];
        let mut criteria = FilterCriteria::default();
        for suggestion in PhotoDetail::from_photo(mountain).suggestions {
            suggestion.apply_to(&mut criteria);
        }
        let ids: Vec<String> = filter::apply(&criteria, &photos)
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["mountain"]);
    }

    #[test]
    fn technical_facts() {
        let photo = PhotoBuilder::new("p").size(1920, 1080).build();
        let detail = PhotoDetail::from_photo(&photo);
        assert_eq!(detail.resolution, (1920, 1080));
        assert_eq!(detail.aspect_ratio, 1.78);
        assert_eq!(detail.composition, Orientation::Landscape);
    }
}
