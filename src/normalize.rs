//! Raw record → canonical [`Photo`] conversion.
//!
//! Normalization is total: every field of [`RawPhoto`] is optional and each
//! derived field has a fallback chain. The first non-empty source wins.
//!
//! ```text
//! description:        description → alt_description → "No description available"
//! location.title:     title → name → "city, state, country" → "Location not specified"
//! location.searchable lowercase join of every non-empty raw part
//! avatar_url:         medium → large → small
//! ```
//!
//! `location.searchable` is built from the raw parts rather than from the
//! derived title, so a search for a city still hits a photo whose display
//! title is a landmark name.

use crate::types::{ImageUrls, Location, Photo, RawLocation, RawPhoto, Tag, User};

/// Shown when a photo has neither a description nor an alt description.
pub const DESCRIPTION_PLACEHOLDER: &str = "No description available";

/// Shown when a photo carries no location parts at all.
pub const LOCATION_PLACEHOLDER: &str = "Location not specified";

/// Return the first source that is present and not blank, trimmed.
pub fn resolve(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .filter_map(|opt| {
            opt.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
        .next()
}

/// Convert one raw API record into the canonical shape.
pub fn normalize(raw: RawPhoto) -> Photo {
    let description = resolve(&[raw.description.as_deref(), raw.alt_description.as_deref()])
        .unwrap_or_else(|| DESCRIPTION_PLACEHOLDER.to_string());
    let alt_description = resolve(&[raw.alt_description.as_deref()]);

    let profile = &raw.user.profile_image;
    let user = User {
        name: resolve(&[raw.user.name.as_deref()]).unwrap_or_default(),
        username: resolve(&[raw.user.username.as_deref()]).unwrap_or_default(),
        bio: resolve(&[raw.user.bio.as_deref()]).unwrap_or_default(),
        total_photos: raw.user.total_photos.unwrap_or(0),
        total_collections: raw.user.total_collections.unwrap_or(0),
        avatar_url: resolve(&[
            profile.medium.as_deref(),
            profile.large.as_deref(),
            profile.small.as_deref(),
        ])
        .unwrap_or_default(),
    };

    let tags = raw
        .tags
        .iter()
        .filter_map(|t| resolve(&[t.title.as_deref()]))
        .map(|title| Tag { title })
        .collect();
    let categories = raw
        .categories
        .iter()
        .filter_map(|c| resolve(&[c.title.as_deref()]))
        .collect();

    let image_urls = ImageUrls {
        thumb: resolve(&[raw.urls.thumb.as_deref()]).unwrap_or_default(),
        small: resolve(&[raw.urls.small.as_deref()]).unwrap_or_default(),
        regular: resolve(&[raw.urls.regular.as_deref()]).unwrap_or_default(),
    };

    Photo {
        id: raw.id,
        description,
        alt_description,
        user,
        location: normalize_location(&raw.location),
        likes: raw.likes.unwrap_or(0),
        downloads: raw.downloads.unwrap_or(0),
        views: raw.views.unwrap_or(0),
        width: raw.width.unwrap_or(0).max(1),
        height: raw.height.unwrap_or(0).max(1),
        created_at: raw.created_at,
        color: resolve(&[raw.color.as_deref()]),
        tags,
        categories,
        image_urls,
    }
}

/// Normalize a batch, preserving upstream order.
pub fn normalize_all(raws: Vec<RawPhoto>) -> Vec<Photo> {
    raws.into_iter().map(normalize).collect()
}

fn normalize_location(raw: &RawLocation) -> Location {
    let parts = |fields: &[&Option<String>]| -> Vec<String> {
        fields
            .iter()
            .filter_map(|f| resolve(&[f.as_deref()]))
            .collect()
    };

    let place = parts(&[&raw.city, &raw.state, &raw.country]);
    let joined_place = (!place.is_empty()).then(|| place.join(", "));

    let title = resolve(&[
        raw.title.as_deref(),
        raw.name.as_deref(),
        joined_place.as_deref(),
    ])
    .unwrap_or_else(|| LOCATION_PLACEHOLDER.to_string());

    let searchable = parts(&[&raw.title, &raw.name, &raw.city, &raw.state, &raw.country])
        .join(" ")
        .to_lowercase();

    Location { title, searchable }
}
