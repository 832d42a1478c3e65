//! A headless incremental-loading engine for paged listings.
//!
//! For render dispatch and fetch drivers, see the `pageflow-adapter` crate.
//!
//! This crate decides *when* an infinitely scrolling list should fetch its next page, and keeps
//! the aggregate loading/error/completion state of every page fetched so far:
//! - [`PagingState`]: items, next page key, last error, loading flag
//! - [`classify`]: derives one of six mutually exclusive [`PagingStatus`] values
//! - [`PagingController`]: owns the state, applies fetch results, notifies listeners
//! - [`FetchTrigger`]: fires at most one request per trigger position
//!
//! It is UI-agnostic and performs no I/O. A rendering layer is expected to:
//! - call [`PagingController::on_item_materialized`] for every index it builds
//! - forward page requests to a fetch collaborator and deliver results back, tagged with the
//!   request's [`Generation`]
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod key;
mod options;
mod state;
mod status;
mod trigger;
mod types;


pub use controller::PagingController;
pub use key::PageKey;
pub use options::{
    DEFAULT_INVISIBLE_ITEMS_THRESHOLD, PageRequestListener, PagingOptions, StateListener,
    StatusListener,
};
pub use state::PagingState;
pub use status::{PagingStatus, classify};
pub use trigger::FetchTrigger;
pub use types::{Delivery, FetchError, Generation, ListenerId, PageRequest, PageResult};
