use alloc::string::String;
use alloc::vec::Vec;

/// Monotonic tag attached to every page request.
///
/// Results must be delivered with the generation of the request they answer. Anything older
/// than the request currently in flight (including everything issued before a
/// [`crate::PagingController::refresh`]) is discarded as stale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Generation(pub u64);

impl Generation {
    pub(crate) fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// A page-request event, as observed by the fetch collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageRequest<K> {
    pub key: K,
    pub generation: Generation,
}

/// The outcome of fetching one page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageResult<K, T, E = FetchError> {
    /// A page followed by more pages.
    Next { items: Vec<T>, next_key: K },
    /// The final page.
    Last { items: Vec<T> },
    Error(E),
}

/// What happened to a delivered result.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delivery {
    /// The result answered the request in flight and was applied.
    Applied,
    /// The result answered a superseded request and was dropped.
    Stale,
}

impl Delivery {
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Handle returned by listener registration, used to unregister.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub(crate) u64);

/// Default error payload for failed page fetches.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{message}")]
pub struct FetchError {
    pub message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
