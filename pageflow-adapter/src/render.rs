use pageflow::{PagingState, PagingStatus};

/// What the trailing row of a non-empty listing shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Footer {
    /// More pages may follow.
    NewPageProgress,
    /// The listing is complete.
    NoMoreItems,
}

/// The rendering branch for a listing status.
///
/// The first three replace the whole listing with a single indicator; the last two render the
/// items followed by one trailing row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderBranch {
    FirstPageProgress,
    FirstPageError,
    NoItemsFound,
    ItemList { footer: Footer },
    /// Items followed by an inline error row (tap-to-retry).
    ItemListWithError,
}

impl RenderBranch {
    pub fn for_status(status: PagingStatus) -> Self {
        match status {
            PagingStatus::LoadingFirstPage => Self::FirstPageProgress,
            PagingStatus::FirstPageError => Self::FirstPageError,
            PagingStatus::Empty => Self::NoItemsFound,
            PagingStatus::Ongoing => Self::ItemList {
                footer: Footer::NewPageProgress,
            },
            PagingStatus::Completed => Self::ItemList {
                footer: Footer::NoMoreItems,
            },
            PagingStatus::SubsequentPageError => Self::ItemListWithError,
        }
    }

    pub fn for_state<K, T, E>(state: &PagingState<K, T, E>) -> Self {
        Self::for_status(state.status())
    }

    pub fn shows_items(self) -> bool {
        matches!(self, Self::ItemList { .. } | Self::ItemListWithError)
    }
}

/// One renderable row of a listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Slot {
    Item(usize),
    NewPageProgress,
    NewPageError,
    NoMoreItems,
    /// The single full-listing indicator of a first-page branch.
    Indicator(RenderBranch),
}

/// Number of rows to lay out: the items plus the trailing row, or one indicator row.
pub fn slot_count<K, T, E>(state: &PagingState<K, T, E>) -> usize {
    if RenderBranch::for_state(state).shows_items() {
        state.items.len().saturating_add(1)
    } else {
        1
    }
}

/// Resolves a row index into what to render there.
///
/// Returns `None` for `index >= slot_count(state)`.
pub fn slot_at<K, T, E>(state: &PagingState<K, T, E>, index: usize) -> Option<Slot> {
    let branch = RenderBranch::for_state(state);
    let count = state.items.len();
    match branch {
        RenderBranch::FirstPageProgress
        | RenderBranch::FirstPageError
        | RenderBranch::NoItemsFound => (index == 0).then_some(Slot::Indicator(branch)),
        _ if index < count => Some(Slot::Item(index)),
        _ if index > count => None,
        RenderBranch::ItemList {
            footer: Footer::NewPageProgress,
        } => Some(Slot::NewPageProgress),
        RenderBranch::ItemList {
            footer: Footer::NoMoreItems,
        } => Some(Slot::NoMoreItems),
        RenderBranch::ItemListWithError => Some(Slot::NewPageError),
    }
}
