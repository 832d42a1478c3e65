//! Adapter utilities for the `pageflow` crate.
//!
//! The `pageflow` crate owns paging state and decides when to fetch. This crate provides the
//! small, framework-neutral pieces an adapter needs around it:
//!
//! - Render dispatch (status → branch, row slots with a trailing indicator)
//! - A fetch-collaborator trait plus an in-memory slice source
//! - A `Listing` driver that runs render passes and delivers fetched pages
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod listing;
mod render;
mod source;

#[cfg(test)]
mod tests;

pub use listing::Listing;
pub use render::{Footer, RenderBranch, Slot, slot_at, slot_count};
pub use source::{PageSource, SliceSource};
