//! Core types for eventfinder.
//!
//! This crate provides everything the `eventfinder` CLI and the
//! `eventfinder-notify` daemon share:
//! - `event` for Ticketmaster event records
//! - `cluster` and `geo` for turning search results into map markers and a
//!   camera region
//! - `store`, `bookmarks`, `reminders` and `scheduler` for local persistence
//! - `search_state` and `sync` for sharing the latest search between views

pub mod bookmarks;
pub mod cluster;
pub mod config;
pub mod error;
pub mod event;
mod file_lock;
pub mod geo;
pub mod map;
pub mod reminders;
pub mod scheduler;
pub mod search_state;
pub mod store;
pub mod sync;
pub mod ticketmaster;

pub use error::{FinderError, FinderResult};
pub use event::Event;
