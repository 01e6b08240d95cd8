//! Deterministic daily digest selection with history deduplication.
//!
//! `digest-core` picks one item per content category from pre-scored
//! candidate lists. Stories picked in the recent past are skipped, the same
//! title or URL is never picked twice in one run, and selected categories
//! claim topics so later categories cover something else. Picks are recorded
//! in a rolling JSON history that feeds the next day's run.
//!
//! Identical candidates, history and run date always produce the same
//! selection. Nothing here reads the clock except the informational
//! `fetched_at` stamp on [`digest::DailyDigest`].

pub mod config;
pub mod digest;
pub mod history;
pub mod selection;
pub mod topics;
pub mod types;
