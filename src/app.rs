//! Application controller.
//!
//! [`App`] owns the [`Session`] and the derived [`Stats`] and is the only
//! place either changes. Every transition is a method; stats are recomputed
//! whenever the collection is replaced and at no other time.
//!
//! ## Discovery
//!
//! [`App::discover`] draws one photo at a time and discards draws the ban
//! list excludes. The loop is bounded by `max_attempts`; when every draw was
//! banned it reports [`DrawOutcome::Exhausted`] instead of retrying forever.
//! Fetch errors end the loop immediately and are not retried.

use chrono::{DateTime, Utc};

use crate::ban::{BanAttribute, BanList, BanToggle};
use crate::config::ScoutConfig;
use crate::detail::{PhotoDetail, SuggestedFilter};
use crate::fetch::{FetchError, PhotoSource};
use crate::filter::{self, FilterCriteria, FilterField};
use crate::normalize::{normalize, normalize_all};
use crate::session::Session;
use crate::stats::{self, Stats};
use crate::throttle::Throttle;
use crate::types::{Photo, RawPhoto};

/// The subset of configuration the controller acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub count: u32,
    pub max_requests_per_hour: u32,
    pub cooldown_secs: u64,
    pub max_attempts: u32,
}

impl From<&ScoutConfig> for Settings {
    fn from(config: &ScoutConfig) -> Self {
        Self {
            count: config.fetch.count,
            max_requests_per_hour: config.fetch.max_requests_per_hour,
            cooldown_secs: config.fetch.cooldown_secs,
            max_attempts: config.discover.max_attempts,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from(&ScoutConfig::default())
    }
}

/// Result of a single-photo draw.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOutcome {
    Found(Photo),
    /// Every attempt produced a banned (or empty) result.
    Exhausted { attempts: u32 },
}

pub struct App<S: PhotoSource> {
    source: S,
    settings: Settings,
    session: Session,
    stats: Stats,
}

impl<S: PhotoSource> App<S> {
    pub fn new(source: S, settings: Settings, session: Session) -> Self {
        let stats = stats::compute(&session.photos);
        Self {
            source,
            settings,
            session,
            stats,
        }
    }

    // =========================================================================
    // Fetch transitions
    // =========================================================================

    /// Replace the collection with a fresh batch. Returns the batch size.
    pub fn refresh(&mut self, now: DateTime<Utc>) -> Result<usize, FetchError> {
        let raws = self.guarded_fetch(self.settings.count, now)?;
        self.set_photos(normalize_all(raws));
        Ok(self.session.photos.len())
    }

    /// Draw single photos until one is not banned or attempts run out.
    pub fn discover(&mut self, now: DateTime<Utc>) -> Result<DrawOutcome, FetchError> {
        let max_attempts = self.settings.max_attempts;
        for attempt in 1..=max_attempts {
            let Some(raw) = self.guarded_fetch(1, now)?.into_iter().next() else {
                log::warn!("draw {attempt}/{max_attempts}: empty response");
                continue;
            };
            let photo = normalize(raw);
            if let Some(entry) = self.session.bans.matching_entry(&photo) {
                log::info!(
                    "draw {attempt}/{max_attempts}: skipping {} (banned {} '{}')",
                    photo.id,
                    entry.attribute,
                    entry.value
                );
                continue;
            }
            self.session.push_history(photo.clone());
            self.session.selected = Some(photo.clone());
            return Ok(DrawOutcome::Found(photo));
        }
        log::warn!("all {max_attempts} draws were banned");
        Ok(DrawOutcome::Exhausted {
            attempts: max_attempts,
        })
    }

    /// One throttled request. A rate-limit answer starts the cooldown.
    /// Requests the source refuses locally are not counted.
    fn guarded_fetch(
        &mut self,
        count: u32,
        now: DateTime<Utc>,
    ) -> Result<Vec<RawPhoto>, FetchError> {
        self.source.ready()?;
        self.session
            .throttle
            .check(now, self.settings.max_requests_per_hour)?;
        self.session.throttle.record_request(now);

        match self.source.fetch_random(count) {
            Err(FetchError::RateLimited) => {
                let until = self
                    .session
                    .throttle
                    .enter_cooldown(now, self.settings.cooldown_secs);
                log::warn!("rate limited upstream, pausing until {until}");
                Err(FetchError::RateLimited)
            }
            result => result,
        }
    }

    fn set_photos(&mut self, photos: Vec<Photo>) {
        self.session.photos = photos;
        self.stats = stats::compute(&self.session.photos);
    }

    // =========================================================================
    // Local transitions
    // =========================================================================

    pub fn toggle_ban(&mut self, value: &str, attribute: BanAttribute) -> BanToggle {
        self.session.bans.toggle(value, attribute)
    }

    pub fn criteria_mut(&mut self) -> &mut FilterCriteria {
        &mut self.session.criteria
    }

    pub fn clear_filter(&mut self, field: FilterField) {
        self.session.criteria.clear(field);
    }

    /// Make the photo with `id` (from the collection or history) the selection.
    pub fn select(&mut self, id: &str) -> Option<&Photo> {
        let found = self.find(id)?.clone();
        self.session.selected = Some(found);
        self.session.selected.as_ref()
    }

    /// Narrow the criteria to photos like `id` (or the selection when `None`).
    /// Returns the suggestions applied, or `None` when there is no such photo.
    pub fn apply_suggestions(&mut self, id: Option<&str>) -> Option<Vec<SuggestedFilter>> {
        let photo = match id {
            Some(id) => self.find(id)?,
            None => self.session.selected.as_ref()?,
        };
        let suggestions = PhotoDetail::from_photo(photo).suggestions;
        for suggestion in &suggestions {
            suggestion.apply_to(&mut self.session.criteria);
        }
        Some(suggestions)
    }

    fn find(&self, id: &str) -> Option<&Photo> {
        self.session
            .photos
            .iter()
            .chain(self.session.history.iter())
            .find(|p| p.id == id)
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// The collection after applying the stored criteria.
    pub fn visible(&self) -> Vec<Photo> {
        filter::apply(&self.session.criteria, &self.session.photos)
    }

    pub fn photos(&self) -> &[Photo] {
        &self.session.photos
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.session.criteria
    }

    pub fn bans(&self) -> &BanList {
        &self.session.bans
    }

    pub fn selected(&self) -> Option<&Photo> {
        self.session.selected.as_ref()
    }

    pub fn history(&self) -> &[Photo] {
        &self.session.history
    }

    pub fn throttle(&self) -> &Throttle {
        &self.session.throttle
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_session(self) -> Session {
        self.session
    }
}
