//! Static HTML report.
//!
//! Renders the current collection into a single self-contained HTML file:
//! stats summary, top locations, the active ban list, and a thumbnail grid
//! of the photos that pass the stored filters.
//!
//! The stylesheet is embedded at compile time from `static/report.css` so
//! the file can be opened straight from disk. Markup comes from
//! [maud](https://maud.lambda.xyz/); every interpolated value is escaped.

use chrono::{DateTime, Utc};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::ban::BanList;
use crate::stats::Stats;
use crate::types::Photo;

const CSS: &str = include_str!("../static/report.css");

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything the report shows, borrowed from the controller.
pub struct ReportView<'a> {
    pub stats: &'a Stats,
    pub bans: &'a BanList,
    /// Photos after filtering.
    pub visible: &'a [Photo],
    pub generated_at: DateTime<Utc>,
}

pub fn render(view: &ReportView) -> Markup {
    let content = html! {
        h1 { "Photo Scout" }
        p.meta { "Generated " (view.generated_at.format("%Y-%m-%d %H:%M UTC").to_string()) }
        (stats_summary(view.stats))
        (top_locations(view.stats))
        (ban_list(view.bans))
        h2 { "Photos (" (view.visible.len()) ")" }
        @if view.visible.is_empty() {
            p.empty { "No photos match the current filters." }
        } @else {
            div.photo-grid {
                @for photo in view.visible {
                    (photo_card(photo))
                }
            }
        }
    };
    base_document("Photo Scout report", content)
}

/// Render and write the report, creating parent directories.
pub fn write(path: &Path, view: &ReportView) -> Result<(), ReportError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render(view).into_string())?;
    log::info!("wrote report to {}", path.display());
    Ok(())
}

fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                (content)
            }
        }
    }
}

fn stats_summary(stats: &Stats) -> Markup {
    let cells: [(&str, String); 8] = [
        ("Photos", stats.total_items.to_string()),
        ("Photographers", stats.photographer_count.to_string()),
        ("Average likes", stats.average_likes.to_string()),
        ("Median likes", stats.median_likes.to_string()),
        (
            "Likes Q1 / Q3",
            format!("{} / {}", stats.q1_likes, stats.q3_likes),
        ),
        (
            "Landscape / Portrait",
            format!("{} / {}", stats.landscape_count, stats.portrait_count),
        ),
        (
            "Aspect ratio",
            format!("{:.2}", stats.average_aspect_ratio),
        ),
        ("Downloads", stats.total_downloads.to_string()),
    ];
    html! {
        h2 { "Summary" }
        dl.summary {
            @for (label, value) in &cells {
                div {
                    dt { (label) }
                    dd { (value) }
                }
            }
        }
    }
}

fn top_locations(stats: &Stats) -> Markup {
    html! {
        @if !stats.top_locations.is_empty() {
            h2 { "Top locations" }
            ol.locations {
                @for loc in &stats.top_locations {
                    li { (loc.title) " (" (loc.count) ")" }
                }
            }
        }
    }
}

fn ban_list(bans: &BanList) -> Markup {
    html! {
        h2 { "Banned" }
        @if bans.is_empty() {
            p.empty { "No banned items yet" }
        } @else {
            ul.bans {
                @for entry in bans.entries() {
                    li { (entry.attribute.to_string()) ": " (entry.value) }
                }
            }
        }
    }
}

fn photo_card(photo: &Photo) -> Markup {
    let thumb = if photo.image_urls.small.is_empty() {
        &photo.image_urls.thumb
    } else {
        &photo.image_urls.small
    };
    let alt = photo
        .alt_description
        .as_deref()
        .unwrap_or(&photo.description);
    html! {
        figure.photo-card {
            @if !thumb.is_empty() {
                img src=(thumb) alt=(alt) loading="lazy";
            }
            figcaption {
                div { (photo.description) }
                div.meta { (photo.user.name) " · " (photo.location.title) }
                div.meta { (photo.likes) " likes" }
            }
        }
    }
}
