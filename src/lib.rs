//! # Photo Scout
//!
//! A command-line companion for the Unsplash random-photo endpoint. Fetch a
//! batch, narrow it with filters, read collection statistics, and draw
//! single photos that skip anything on your ban list.
//!
//! # Architecture: Load, Transition, Save
//!
//! Every invocation of the binary runs one transition against a persisted
//! session:
//!
//! ```text
//! session.json ─► Session::load ─► App::<transition>(now) ─► Session::save
//!                                        │
//!                                        └─► output::format_* ─► stdout
//! ```
//!
//! The controller is generic over [`fetch::PhotoSource`], so every
//! transition is testable with a scripted source and a fixed clock.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`fetch`] | Unsplash client, error classification, the `PhotoSource` seam |
//! | [`throttle`] | Persisted cooldown and hourly request budget |
//! | [`normalize`] | Raw API records to display-ready [`types::Photo`] values |
//! | [`filter`] | Filter criteria and the conjunctive filter pass |
//! | [`stats`] | Collection statistics, recomputed on every collection change |
//! | [`ban`] | Exclusion rules for single-photo draws |
//! | [`detail`] | Per-photo engagement analytics and suggested filters |
//! | [`app`] | The controller owning session state and transitions |
//! | [`session`] | Versioned JSON persistence of the controller state |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`types`] | Wire records and the normalized photo model |
//! | [`output`] | CLI output formatting |
//! | [`report`] | Static HTML report rendered with Maud |
//!
//! # Design Decisions
//!
//! ## Normalize Once
//!
//! Raw records are optional-everything. The normalizer resolves fallbacks
//! and placeholders exactly once, so filters, stats, bans, and output never
//! deal with missing fields. The searchable location string is lowercased
//! at the same time.
//!
//! ## Explicit Recompute
//!
//! Stats are a pure function of the collection and are recomputed only when
//! the collection is replaced. Filters never touch stats.
//!
//! ## Bounded Discovery
//!
//! A single-photo draw retries only when the ban list rejects the result,
//! and only up to `max_attempts` times. Errors are never retried.

pub mod app;
pub mod ban;
pub mod config;
pub mod detail;
pub mod fetch;
pub mod filter;
pub mod normalize;
pub mod output;
pub mod report;
pub mod session;
pub mod stats;
pub mod throttle;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
