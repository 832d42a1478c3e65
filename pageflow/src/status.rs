use crate::PagingState;

/// The six mutually exclusive states a listing can be in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PagingStatus {
    /// No items yet; the first fetch is in flight or has not been issued.
    LoadingFirstPage,
    /// No items yet; the last fetch failed.
    FirstPageError,
    /// The first fetch succeeded with zero items.
    Empty,
    /// Items loaded and more may follow.
    Ongoing,
    /// Items loaded; fetching a further page failed.
    SubsequentPageError,
    /// Items loaded and no further pages exist.
    Completed,
}

impl PagingStatus {
    /// Whether the listing has nothing to show but an indicator.
    pub fn is_first_page(self) -> bool {
        matches!(
            self,
            Self::LoadingFirstPage | Self::FirstPageError | Self::Empty
        )
    }

    pub fn is_error(self) -> bool {
        matches!(self, Self::FirstPageError | Self::SubsequentPageError)
    }
}

/// Maps a state to its status. Pure and total; the first matching rule wins.
///
/// An empty listing that has never resolved a fetch classifies as
/// [`PagingStatus::LoadingFirstPage`] even before the first request is issued. An empty listing
/// that resolved successfully classifies as [`PagingStatus::Empty`] regardless of the next key,
/// since there is no item index left to trigger a follow-up fetch from.
pub fn classify<K, T, E>(state: &PagingState<K, T, E>) -> PagingStatus {
    let has_items = !state.items.is_empty();
    let has_error = state.error.is_some();

    if !has_items {
        if has_error {
            return PagingStatus::FirstPageError;
        }
        if state.is_loading || !state.has_completed_first_fetch {
            return PagingStatus::LoadingFirstPage;
        }
        return PagingStatus::Empty;
    }

    if has_error {
        PagingStatus::SubsequentPageError
    } else if state.next_page_key.is_none() {
        PagingStatus::Completed
    } else {
        PagingStatus::Ongoing
    }
}
