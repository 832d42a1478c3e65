use alloc::vec::Vec;

use crate::{FetchError, PagingStatus};

/// The aggregate of everything fetched so far for one listing.
///
/// Only [`crate::PagingController`] mutates this; observers see it through `&PagingState` during
/// notification or as an owned clone from [`crate::PagingController::snapshot`].
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PagingState<K, T, E = FetchError> {
    /// Items in page order, then in-page order.
    pub items: Vec<T>,
    /// Key of the next page. `None` means "no more pages" once a fetch has completed, and
    /// "not yet known" before that.
    pub next_page_key: Option<K>,
    /// The last fetch error. Cleared by every successful fetch.
    pub error: Option<E>,
    pub is_loading: bool,
    /// Set once any fetch (success or error) has resolved since construction or the last
    /// refresh. Separates "nothing attempted yet" from "attempted and got zero items".
    pub has_completed_first_fetch: bool,
}

impl<K, T, E> Default for PagingState<K, T, E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_page_key: None,
            error: None,
            is_loading: false,
            has_completed_first_fetch: false,
        }
    }
}

impl<K, T, E> PagingState<K, T, E> {
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Whether continuing the listing is possible without user intervention.
    pub fn has_next_page(&self) -> bool {
        self.next_page_key.is_some() && self.error.is_none()
    }

    /// Derives the status. Never cached; always recomputed from the fields.
    pub fn status(&self) -> PagingStatus {
        crate::classify(self)
    }
}
