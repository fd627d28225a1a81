//! Shared types used across the fetch, filter, and stats stages.
//!
//! Two families live here:
//!
//! - **Raw records** (`RawPhoto` and friends) mirror the Unsplash wire format.
//!   Every field is optional or defaulted so a sparse response never fails to
//!   deserialize.
//! - **Normalized records** (`Photo` and friends) are what the rest of the
//!   crate works with. They are produced only by [`crate::normalize`] and are
//!   serialized into the session file between commands.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// Raw wire records
// =============================================================================

/// A photo exactly as returned by `GET /photos/random`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPhoto {
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub color: Option<String>,
    pub likes: Option<u64>,
    pub downloads: Option<u64>,
    pub views: Option<u64>,
    pub description: Option<String>,
    pub alt_description: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub user: RawUser,
    #[serde(deserialize_with = "null_as_default")]
    pub location: RawLocation,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<RawTitled>,
    #[serde(deserialize_with = "null_as_default")]
    pub categories: Vec<RawTitled>,
    #[serde(deserialize_with = "null_as_default")]
    pub urls: RawUrls,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawUser {
    pub name: Option<String>,
    pub username: Option<String>,
    pub bio: Option<String>,
    pub total_photos: Option<u64>,
    pub total_collections: Option<u64>,
    #[serde(deserialize_with = "null_as_default")]
    pub profile_image: RawProfileImage,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawProfileImage {
    pub small: Option<String>,
    pub medium: Option<String>,
    pub large: Option<String>,
}

/// Location sub-record. Any or all parts may be null.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawLocation {
    pub title: Option<String>,
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

/// `{ "title": ... }` entries used by both `tags` and `categories`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTitled {
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawUrls {
    pub raw: Option<String>,
    pub full: Option<String>,
    pub regular: Option<String>,
    pub small: Option<String>,
    pub thumb: Option<String>,
}

/// Treat an explicit JSON `null` the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Normalized records
// =============================================================================

/// Canonical photo shape consumed by filtering, stats, bans, and output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    /// Never empty: raw description → alt description → placeholder.
    pub description: String,
    /// Kept separately because search covers it even when `description` won.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_description: Option<String>,
    pub user: User,
    pub location: Location,
    pub likes: u64,
    pub downloads: u64,
    pub views: u64,
    /// Always at least 1.
    pub width: u32,
    /// Always at least 1.
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    pub image_urls: ImageUrls,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub username: String,
    pub bio: String,
    pub total_photos: u64,
    pub total_collections: u64,
    pub avatar_url: String,
}

/// Display and search forms of a photo location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Display string; falls back to [`crate::normalize::LOCATION_PLACEHOLDER`].
    pub title: String,
    /// Lowercase space-join of every raw location part. Empty when the raw
    /// record carried no location at all.
    pub searchable: String,
}

impl Location {
    /// Whether the upstream record carried any location information.
    pub fn is_specified(&self) -> bool {
        !self.searchable.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageUrls {
    pub thumb: String,
    pub small: String,
    pub regular: String,
}

impl Photo {
    /// Landscape when strictly wider than tall.
    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }

    /// Portrait when strictly taller than wide. Squares are neither.
    pub fn is_portrait(&self) -> bool {
        self.width < self.height
    }

    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}
