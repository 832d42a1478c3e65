use alloc::sync::Arc;

use crate::{FetchError, PageRequest, PagingState, PagingStatus};

/// A callback fired with the full state after every published mutation.
pub type StateListener<K, T, E = FetchError> = Arc<dyn Fn(&PagingState<K, T, E>) + Send + Sync>;

/// A callback fired when the derived status changes.
pub type StatusListener = Arc<dyn Fn(PagingStatus) + Send + Sync>;

/// A callback fired for every page request the controller issues.
///
/// This is the event stream a fetch collaborator listens to. It runs synchronously inside the
/// controller, so it must not call back into the controller; queue the request and deliver the
/// result afterwards on the controller's execution context.
pub type PageRequestListener<K> = Arc<dyn Fn(&PageRequest<K>) + Send + Sync>;

pub const DEFAULT_INVISIBLE_ITEMS_THRESHOLD: usize = 3;

/// Configuration for [`crate::PagingController`].
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PagingOptions<K> {
    /// Key used for the very first fetch and after every refresh.
    pub first_page_key: K,
    /// How many items before the end of the loaded list the next fetch is requested.
    pub invisible_items_threshold: usize,
}

impl<K> PagingOptions<K> {
    pub fn new(first_page_key: K) -> Self {
        Self {
            first_page_key,
            invisible_items_threshold: DEFAULT_INVISIBLE_ITEMS_THRESHOLD,
        }
    }

    pub fn with_first_page_key(mut self, first_page_key: K) -> Self {
        self.first_page_key = first_page_key;
        self
    }

    pub fn with_invisible_items_threshold(mut self, threshold: usize) -> Self {
        self.invisible_items_threshold = threshold;
        self
    }
}

impl<K: Default> Default for PagingOptions<K> {
    fn default() -> Self {
        Self::new(K::default())
    }
}
