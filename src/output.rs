//! CLI output formatting.
//!
//! Every command prints through a `format_*` function that returns
//! `Vec<String>` (pure, testable) and a `print_lines` wrapper that writes to
//! stdout.
//!
//! # Entity Display Contract
//!
//! Photos follow a two-level pattern, like every list in this tool:
//!
//! 1. **Header line**: positional index + description
//! 2. **Context lines**: indented photographer, location, size and counts
//!
//! ```text
//! 001 Mountain lake at dawn
//!     Id: mountain
//!     Photographer: Jane Doe (@alpine_jane) [banned]
//!     Location: Lake Bled
//!     1920×1080 landscape · 120 likes · 40 downloads
//! ```
//!
//! Attributes that match an entry in the ban list carry a `[banned]` marker.

use chrono::{DateTime, Utc};

use crate::app::{DrawOutcome, Settings};
use crate::ban::{BanAttribute, BanList};
use crate::detail::{PhotoDetail, SuggestedFilter};
use crate::filter::{Bound, DateRange, FilterCriteria, Orientation, Range};
use crate::stats::Stats;
use crate::throttle::{Throttle, format_remaining};
use crate::types::Photo;

/// Descriptions longer than this are cut in list views.
const LIST_DESCRIPTION_CHARS: usize = 60;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut.trim_end())
    }
}

fn banned_marker(bans: &BanList, value: &str, attribute: BanAttribute) -> &'static str {
    if bans.contains(value, attribute) {
        " [banned]"
    } else {
        ""
    }
}

fn shape(photo: &Photo) -> &'static str {
    if photo.is_landscape() {
        "landscape"
    } else if photo.is_portrait() {
        "portrait"
    } else {
        "square"
    }
}

fn format_range(range: &Range) -> String {
    match range.max {
        Bound::Unbounded => format!("{}+", range.min),
        Bound::AtMost(max) => format!("{}-{}", range.min, max),
    }
}

/// Header plus context lines for one photo.
fn photo_block(index: usize, photo: &Photo, bans: &BanList) -> Vec<String> {
    let ctx = indent(1);
    vec![
        format!(
            "{} {}{}",
            format_index(index),
            truncate_desc(&photo.description, LIST_DESCRIPTION_CHARS),
            banned_marker(bans, &photo.description, BanAttribute::Description)
        ),
        format!("{ctx}Id: {}", photo.id),
        format!(
            "{ctx}Photographer: {} (@{}){}",
            photo.user.name,
            photo.user.username,
            banned_marker(bans, &photo.user.name, BanAttribute::Photographer)
        ),
        format!(
            "{ctx}Location: {}{}",
            photo.location.title,
            banned_marker(bans, &photo.location.title, BanAttribute::Location)
        ),
        format!(
            "{ctx}{}×{} {} · {} likes · {} downloads",
            photo.width,
            photo.height,
            shape(photo),
            photo.likes,
            photo.downloads
        ),
    ]
}

// ============================================================================
// Collection
// ============================================================================

/// Format the filtered collection, noting how many were hidden.
pub fn format_photo_list(visible: &[Photo], total: usize, bans: &BanList) -> Vec<String> {
    if total == 0 {
        return vec!["No photos yet. Run 'photo-scout fetch' first.".to_string()];
    }
    let mut lines = Vec::new();
    for (i, photo) in visible.iter().enumerate() {
        lines.extend(photo_block(i + 1, photo, bans));
    }
    if visible.is_empty() {
        lines.push("No photos match the current filters.".to_string());
    }
    lines.push(String::new());
    lines.push(format!("Showing {} of {} photos", visible.len(), total));
    lines
}

/// Format discovery history, most recent first.
pub fn format_history(history: &[Photo]) -> Vec<String> {
    if history.is_empty() {
        return vec!["No discoveries yet.".to_string()];
    }
    history
        .iter()
        .rev()
        .enumerate()
        .map(|(i, p)| {
            format!(
                "{} {} — {} ({})",
                format_index(i + 1),
                truncate_desc(&p.description, LIST_DESCRIPTION_CHARS),
                p.user.name,
                p.id
            )
        })
        .collect()
}

/// Format the result of `discover`.
pub fn format_draw(outcome: &DrawOutcome, bans: &BanList) -> Vec<String> {
    match outcome {
        DrawOutcome::Found(photo) => {
            let mut lines = photo_block(1, photo, bans);
            if !photo.image_urls.regular.is_empty() {
                lines.push(format!("{}Image: {}", indent(1), photo.image_urls.regular));
            }
            lines
        }
        DrawOutcome::Exhausted { attempts } => vec![format!(
            "Every photo drawn in {attempts} attempts was banned. Loosen the ban list and try again."
        )],
    }
}

// ============================================================================
// Stats
// ============================================================================

pub fn format_stats(stats: &Stats) -> Vec<String> {
    if stats.total_items == 0 {
        return vec!["No photos to summarize.".to_string()];
    }
    let ctx = indent(1);
    let mut lines = vec![
        "Collection".to_string(),
        format!("{ctx}Photos: {}", stats.total_items),
        format!("{ctx}Photographers: {}", stats.photographer_count),
        format!(
            "{ctx}Landscape: {} · Portrait: {}",
            stats.landscape_count, stats.portrait_count
        ),
        format!("{ctx}Average aspect ratio: {:.2}", stats.average_aspect_ratio),
        "Likes".to_string(),
        format!("{ctx}Average: {}", stats.average_likes),
        format!("{ctx}Median: {}", stats.median_likes),
        format!("{ctx}Q1: {} · Q3: {}", stats.q1_likes, stats.q3_likes),
        "Downloads".to_string(),
        format!("{ctx}Total: {}", stats.total_downloads),
        format!("{ctx}Average: {}", stats.average_downloads),
    ];
    if !stats.top_locations.is_empty() {
        lines.push("Top locations".to_string());
        for (i, loc) in stats.top_locations.iter().enumerate() {
            lines.push(format!(
                "{ctx}{} {} ({})",
                format_index(i + 1),
                loc.title,
                loc.count
            ));
        }
    }
    lines
}

// ============================================================================
// Detail
// ============================================================================

pub fn format_detail(photo: &Photo, detail: &PhotoDetail, bans: &BanList) -> Vec<String> {
    let ctx = indent(1);
    let mut lines = vec![photo.description.clone()];
    if let Some(created) = photo.created_at {
        lines.push(format!("{ctx}Published: {}", created.format("%Y-%m-%d")));
    }

    lines.push("Photographer".to_string());
    lines.push(format!(
        "{ctx}{} (@{}){}",
        photo.user.name,
        photo.user.username,
        banned_marker(bans, &photo.user.name, BanAttribute::Photographer)
    ));
    if !photo.user.bio.is_empty() {
        lines.push(format!("{ctx}{}", photo.user.bio));
    }
    lines.push(format!(
        "{ctx}Total photos: {} · Total collections: {}",
        photo.user.total_photos, photo.user.total_collections
    ));

    lines.push("Analytics".to_string());
    lines.push(format!(
        "{ctx}Engagement rate: {:.2}% ({} engagement)",
        detail.engagement_rate, detail.engagement
    ));
    lines.push(format!("{ctx}Downloads: {}", photo.downloads));
    lines.push(format!("{ctx}Popularity: {}", detail.popularity));

    if !detail.insights.is_empty() {
        lines.push("Insights".to_string());
        for insight in &detail.insights {
            lines.push(format!("{ctx}{insight}"));
        }
    }

    lines.push("Suggested filters".to_string());
    for s in &detail.suggestions {
        lines.push(format!("{ctx}{}: {} — {}", s.label(), s.value(), s.reason()));
    }

    lines.push("Technical".to_string());
    lines.push(format!(
        "{ctx}Resolution: {}×{}",
        detail.resolution.0, detail.resolution.1
    ));
    lines.push(format!("{ctx}Aspect ratio: {:.2}", detail.aspect_ratio));
    lines.push(format!("{ctx}Color: {}", detail.color));
    lines.push(format!(
        "{ctx}Location: {}{}",
        detail.location,
        banned_marker(bans, &photo.location.title, BanAttribute::Location)
    ));

    if !photo.tags.is_empty() {
        let tags: Vec<&str> = photo.tags.iter().map(|t| t.title.as_str()).collect();
        lines.push(format!("Tags: {}", tags.join(", ")));
    }
    lines
}

// ============================================================================
// Bans, criteria, status
// ============================================================================

pub fn format_bans(bans: &BanList) -> Vec<String> {
    if bans.is_empty() {
        return vec!["No banned items yet".to_string()];
    }
    bans.entries()
        .iter()
        .enumerate()
        .map(|(i, e)| format!("{} {}: {}", format_index(i + 1), e.attribute, e.value))
        .collect()
}

pub fn format_criteria(criteria: &FilterCriteria) -> Vec<String> {
    if criteria.is_empty() {
        return vec!["No filters set".to_string()];
    }
    let ctx = indent(1);
    let mut lines = vec!["Filters".to_string()];
    if !criteria.search_query.is_empty() {
        lines.push(format!("{ctx}search: {}", criteria.search_query));
    }
    if !criteria.location.is_empty() {
        lines.push(format!("{ctx}location: {}", criteria.location));
    }
    if !criteria.likes.is_default() {
        lines.push(format!("{ctx}likes: {}", format_range(&criteria.likes)));
    }
    if !criteria.photographer.is_empty() {
        lines.push(format!("{ctx}photographer: {}", criteria.photographer));
    }
    match criteria.orientation {
        Orientation::All => {}
        Orientation::Landscape => lines.push(format!("{ctx}orientation: landscape")),
        Orientation::Portrait => lines.push(format!("{ctx}orientation: portrait")),
    }
    if criteria.date_range != DateRange::All {
        lines.push(format!(
            "{ctx}date range: {:?} (not applied)",
            criteria.date_range
        ));
    }
    if !criteria.categories.is_empty() {
        let cats: Vec<&str> = criteria.categories.iter().map(String::as_str).collect();
        lines.push(format!("{ctx}categories: {}", cats.join(", ")));
    }
    if !criteria.dimensions.width.is_default() {
        lines.push(format!(
            "{ctx}width: {}",
            format_range(&criteria.dimensions.width)
        ));
    }
    if !criteria.dimensions.height.is_default() {
        lines.push(format!(
            "{ctx}height: {}",
            format_range(&criteria.dimensions.height)
        ));
    }
    lines
}

/// Suggestions just written into the filters.
pub fn format_suggestions(applied: &[SuggestedFilter]) -> Vec<String> {
    applied
        .iter()
        .map(|s| format!("Applied {}: {}", s.label(), s.value()))
        .collect()
}

pub fn format_status(throttle: &Throttle, settings: &Settings, now: DateTime<Utc>) -> Vec<String> {
    let mut lines = Vec::new();
    match throttle.cooldown_remaining(now) {
        Some(remaining) => lines.push(format!(
            "Rate limited. Try again in {}.",
            format_remaining(remaining)
        )),
        None => lines.push("Fetching available.".to_string()),
    }
    let remaining = throttle.budget_remaining(now, settings.max_requests_per_hour);
    let mut budget = format!(
        "Requests left this hour: {} of {}",
        remaining, settings.max_requests_per_hour
    );
    if let Some(resets_at) = throttle.budget_resets_at(now) {
        budget.push_str(&format!(" (resets in {})", format_remaining(resets_at - now)));
    }
    lines.push(budget);
    lines
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use chrono::{TimeDelta, TimeZone};

    #[test]
    fn index_is_zero_padded() {
        assert_eq!(format_index(7), "007");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_desc("short", 10), "short");
        assert_eq!(truncate_desc("Café au lait", 4), "Café...");
    }

    #[test]
    fn photo_list_shows_blocks_and_summary() {
        let photos = sample_collection();
        let lines = format_photo_list(&photos[..1], photos.len(), &BanList::new());
        assert_eq!(lines[0], "001 Mountain lake at dawn");
        assert_eq!(lines[1], "    Id: mountain");
        assert_eq!(lines[2], "    Photographer: Jane Doe (@alpine_jane)");
        assert_eq!(lines[4], "    1920×1080 landscape · 120 likes · 40 downloads");
        assert_eq!(lines.last().unwrap(), "Showing 1 of 4 photos");
    }

    #[test]
    fn photo_list_marks_banned_attributes() {
        let photos = sample_collection();
        let mut bans = BanList::new();
        bans.toggle("jane doe", BanAttribute::Photographer);
        let lines = format_photo_list(&photos[..1], 1, &bans);
        assert_eq!(lines[2], "    Photographer: Jane Doe (@alpine_jane) [banned]");
    }

    #[test]
    fn photo_list_empty_states() {
        assert_eq!(
            format_photo_list(&[], 0, &BanList::new()),
            vec!["No photos yet. Run 'photo-scout fetch' first."]
        );
        let lines = format_photo_list(&[], 3, &BanList::new());
        assert!(lines.contains(&"No photos match the current filters.".to_string()));
    }

    #[test]
    fn stats_lines_include_quartiles_and_locations() {
        let stats = crate::stats::compute(&sample_collection());
        let lines = format_stats(&stats);
        assert!(lines.contains(&"    Photos: 4".to_string()));
        assert!(lines.contains(&"    Q1: 15 · Q3: 500".to_string()));
        assert!(lines.contains(&"    001 Lake Bled (2)".to_string()));
    }

    #[test]
    fn empty_stats_message() {
        assert_eq!(
            format_stats(&Stats::default()),
            vec!["No photos to summarize."]
        );
    }

    #[test]
    fn bans_listing() {
        let mut bans = BanList::new();
        assert_eq!(format_bans(&bans), vec!["No banned items yet"]);
        bans.toggle("fog", BanAttribute::Description);
        assert_eq!(format_bans(&bans), vec!["001 description: fog"]);
    }

    #[test]
    fn criteria_listing_shows_only_active_fields() {
        let mut criteria = FilterCriteria::default();
        assert_eq!(format_criteria(&criteria), vec!["No filters set"]);

        criteria.likes = Range::new(10, None);
        criteria.orientation = Orientation::Landscape;
        assert_eq!(format_criteria(&criteria), vec![
            "Filters",
            "    likes: 10+",
            "    orientation: landscape"
        ]);
    }

    #[test]
    fn status_shows_cooldown_countdown() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        let mut throttle = Throttle::default();
        throttle.record_request(now);
        throttle.enter_cooldown(now, 90);
        let lines = format_status(&throttle, &Settings::default(), now + TimeDelta::seconds(30));
        assert_eq!(lines[0], "Rate limited. Try again in 1m 00s.");
        assert_eq!(
            lines[1],
            "Requests left this hour: 49 of 50 (resets in 59m 30s)"
        );
    }

    #[test]
    fn exhausted_draw_message() {
        let lines = format_draw(&DrawOutcome::Exhausted { attempts: 3 }, &BanList::new());
        assert!(lines[0].contains("3 attempts"));
    }

    #[test]
    fn detail_lists_suggestions() {
        let photo = &sample_collection()[0];
        let detail = PhotoDetail::from_photo(photo);
        let lines = format_detail(photo, &detail, &BanList::new());
        assert_eq!(lines[0], "Mountain lake at dawn");
        assert!(lines.contains(
            &"    Likes Range: 96 - 144 — Discover similarly popular photos".to_string()
        ));
        assert!(lines.contains(&"    Aspect ratio: 1.78".to_string()));
    }

    #[test]
    fn suggestions_listing() {
        let applied = vec![
            SuggestedFilter::Orientation(Orientation::Landscape),
            SuggestedFilter::Likes { min: 96, max: 144 },
        ];
        assert_eq!(format_suggestions(&applied), vec![
            "Applied Orientation: Landscape",
            "Applied Likes Range: 96 - 144"
        ]);
    }

    #[test]
    fn history_most_recent_first() {
        let history = vec![
            PhotoBuilder::new("a").description("first").user("A", "a").build(),
            PhotoBuilder::new("b").description("second").user("B", "b").build(),
        ];
        let lines = format_history(&history);
        assert_eq!(lines[0], "001 second — B (b)");
    }
}
