//! Shared test utilities for the photo-scout test suite.
//!
//! Provides a [`PhotoBuilder`] for normalized photos, a small fixed
//! collection, and a scripted [`PhotoSource`] that never touches the network.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let photo = PhotoBuilder::new("p1")
//!     .user("Jane Doe", "alpine_jane")
//!     .size(1920, 1080)
//!     .likes(42)
//!     .build();
//! ```

use std::collections::VecDeque;

use crate::fetch::{FetchError, PhotoSource};
use crate::normalize::{DESCRIPTION_PLACEHOLDER, LOCATION_PLACEHOLDER};
use crate::types::{ImageUrls, Location, Photo, RawLocation, RawPhoto, RawUser, Tag, User};

// =========================================================================
// Normalized photo builder
// =========================================================================

pub struct PhotoBuilder {
    photo: Photo,
}

impl PhotoBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            photo: Photo {
                id: id.to_string(),
                description: DESCRIPTION_PLACEHOLDER.to_string(),
                alt_description: None,
                user: User::default(),
                location: Location {
                    title: LOCATION_PLACEHOLDER.to_string(),
                    searchable: String::new(),
                },
                likes: 0,
                downloads: 0,
                views: 0,
                width: 1200,
                height: 800,
                created_at: None,
                color: None,
                tags: Vec::new(),
                categories: Vec::new(),
                image_urls: ImageUrls::default(),
            },
        }
    }

    pub fn description(mut self, text: &str) -> Self {
        self.photo.description = text.to_string();
        self
    }

    pub fn alt_description(mut self, text: &str) -> Self {
        self.photo.alt_description = Some(text.to_string());
        self
    }

    pub fn user(mut self, name: &str, username: &str) -> Self {
        self.photo.user.name = name.to_string();
        self.photo.user.username = username.to_string();
        self
    }

    pub fn bio(mut self, bio: &str) -> Self {
        self.photo.user.bio = bio.to_string();
        self
    }

    /// Set the display title and the pre-lowercased searchable form.
    pub fn location(mut self, title: &str, searchable: &str) -> Self {
        self.photo.location = Location {
            title: title.to_string(),
            searchable: searchable.to_string(),
        };
        self
    }

    pub fn likes(mut self, likes: u64) -> Self {
        self.photo.likes = likes;
        self
    }

    pub fn downloads(mut self, downloads: u64) -> Self {
        self.photo.downloads = downloads;
        self
    }

    pub fn views(mut self, views: u64) -> Self {
        self.photo.views = views;
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.photo.width = width;
        self.photo.height = height;
        self
    }

    pub fn tags(mut self, titles: &[&str]) -> Self {
        self.photo.tags = titles
            .iter()
            .map(|t| Tag {
                title: t.to_string(),
            })
            .collect();
        self
    }

    pub fn categories(mut self, names: &[&str]) -> Self {
        self.photo.categories = names.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn build(self) -> Photo {
        self.photo
    }
}

/// Four photos covering landscape, portrait, and square shapes.
///
/// | id | size | likes | photographer | location |
/// |----|------|-------|--------------|----------|
/// | mountain | 1920×1080 | 120 | Jane Doe | Lake Bled |
/// | beach | 4000×3000 | 500 | Sam Sand | Bondi Beach |
/// | city | 1080×1920 | 15 | Jane Doe | Lake Bled |
/// | square | 500×500 | 0 | Ola Grid | (unspecified) |
pub fn sample_collection() -> Vec<Photo> {
    vec![
        PhotoBuilder::new("mountain")
            .description("Mountain lake at dawn")
            .user("Jane Doe", "alpine_jane")
            .location("Lake Bled", "lake bled bled slovenia")
            .size(1920, 1080)
            .likes(120)
            .downloads(40)
            .build(),
        PhotoBuilder::new("beach")
            .description("Surfers at sunset")
            .user("Sam Sand", "samsand")
            .location("Bondi Beach", "bondi beach sydney australia")
            .size(4000, 3000)
            .likes(500)
            .downloads(90)
            .build(),
        PhotoBuilder::new("city")
            .description("Night streets")
            .user("Jane Doe", "alpine_jane")
            .location("Lake Bled", "lake bled")
            .size(1080, 1920)
            .likes(15)
            .downloads(5)
            .build(),
        PhotoBuilder::new("square")
            .user("Ola Grid", "olagrid")
            .size(500, 500)
            .build(),
    ]
}

// =========================================================================
// Raw records and scripted source
// =========================================================================

/// Minimal raw record with an id, photographer name, and description.
pub fn raw_photo(id: &str, name: &str, description: &str) -> RawPhoto {
    RawPhoto {
        id: id.to_string(),
        width: Some(1200),
        height: Some(800),
        description: Some(description.to_string()),
        user: RawUser {
            name: Some(name.to_string()),
            username: Some(name.to_lowercase().replace(' ', "_")),
            ..Default::default()
        },
        location: RawLocation {
            city: Some("Bled".to_string()),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Replays queued responses in order and counts calls.
#[derive(Default)]
pub struct ScriptedSource {
    responses: VecDeque<Result<Vec<RawPhoto>, FetchError>>,
    pub calls: usize,
    pub requested_counts: Vec<u32>,
    /// Refused before any request, like a client with no access key.
    pub not_ready: Option<FetchError>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then_ok(mut self, photos: Vec<RawPhoto>) -> Self {
        self.responses.push_back(Ok(photos));
        self
    }

    pub fn then_err(mut self, error: FetchError) -> Self {
        self.responses.push_back(Err(error));
        self
    }

    pub fn refusing(mut self, error: FetchError) -> Self {
        self.not_ready = Some(error);
        self
    }
}

impl PhotoSource for ScriptedSource {
    fn ready(&self) -> Result<(), FetchError> {
        match &self.not_ready {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn fetch_random(&mut self, count: u32) -> Result<Vec<RawPhoto>, FetchError> {
        self.calls += 1;
        self.requested_counts.push(count);
        self.responses
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected fetch #{} (script exhausted)", self.calls))
    }
}
