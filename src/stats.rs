//! Descriptive statistics over the photo collection.
//!
//! [`compute`] is a pure projection: the controller calls it whenever the
//! collection is replaced and keeps the result alongside the photos. Nothing
//! mutates a [`Stats`] afterwards.
//!
//! ## Median and quartiles
//!
//! Positions are taken straight from the ascending like counts without
//! interpolation:
//!
//! ```text
//! median = sorted[n / 2]          (upper-middle element when n is even)
//! q1     = sorted[floor(n * 0.25)]
//! q3     = sorted[floor(n * 0.75)]
//! ```
//!
//! These are not the textbook definitions. Downstream output relies on the
//! exact values, so they stay as they are.

use crate::types::Photo;
use std::collections::HashSet;

/// How many locations [`Stats::top_locations`] keeps.
pub const TOP_LOCATIONS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationCount {
    pub title: String,
    pub count: usize,
}

/// Aggregate view of a collection. All zero/empty for an empty collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stats {
    pub total_items: usize,
    pub average_likes: u64,
    pub median_likes: u64,
    pub q1_likes: u64,
    pub q3_likes: u64,
    /// Mean of width/height, rounded to two decimals.
    pub average_aspect_ratio: f64,
    pub landscape_count: usize,
    pub portrait_count: usize,
    pub top_locations: Vec<LocationCount>,
    pub photographer_count: usize,
    pub total_downloads: u64,
    pub average_downloads: u64,
}

pub fn compute(photos: &[Photo]) -> Stats {
    if photos.is_empty() {
        return Stats::default();
    }
    let count = photos.len();

    let mut likes: Vec<u64> = photos.iter().map(|p| p.likes).collect();
    likes.sort_unstable();
    // Upstream counts are unbounded; sum wide so nothing overflows.
    let total_likes: u128 = likes.iter().map(|&l| u128::from(l)).sum();
    let total_downloads: u128 = photos.iter().map(|p| u128::from(p.downloads)).sum();

    let aspect_sum: f64 = photos.iter().map(Photo::aspect_ratio).sum();

    let photographer_count = photos
        .iter()
        .map(|p| p.user.username.as_str())
        .collect::<HashSet<_>>()
        .len();

    Stats {
        total_items: count,
        average_likes: rounded_mean(total_likes, count),
        median_likes: likes[count / 2],
        q1_likes: likes[count / 4],
        q3_likes: likes[count * 3 / 4],
        average_aspect_ratio: round2(aspect_sum / count as f64),
        landscape_count: photos.iter().filter(|p| p.is_landscape()).count(),
        portrait_count: photos.iter().filter(|p| p.is_portrait()).count(),
        top_locations: top_locations(photos),
        photographer_count,
        total_downloads: u64::try_from(total_downloads).unwrap_or(u64::MAX),
        average_downloads: rounded_mean(total_downloads, count),
    }
}

/// `total / count` rounded half up. The mean never exceeds the largest
/// element, so it always fits back into `u64`.
fn rounded_mean(total: u128, count: usize) -> u64 {
    let count = count as u128;
    let mean = (total * 2 + count) / (count * 2);
    u64::try_from(mean).unwrap_or(u64::MAX)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Most frequent specified location titles; ties keep first-seen order.
fn top_locations(photos: &[Photo]) -> Vec<LocationCount> {
    let mut counts: Vec<LocationCount> = Vec::new();
    for photo in photos.iter().filter(|p| p.location.is_specified()) {
        match counts.iter_mut().find(|c| c.title == photo.location.title) {
            Some(entry) => entry.count += 1,
            None => counts.push(LocationCount {
                title: photo.location.title.clone(),
                count: 1,
            }),
        }
    }
    // Stable sort keeps first-encountered order among equal counts.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(TOP_LOCATIONS);
    counts
}
