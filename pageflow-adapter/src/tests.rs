use crate::*;

use alloc::string::String;
use alloc::vec::Vec;
use pageflow::{FetchError, PageResult, PagingOptions, PagingState, PagingStatus};

type SliceListing = Listing<usize, u32, SliceSource<u32>>;

fn slice_listing(len: u32, page_size: usize, threshold: usize) -> SliceListing {
    Listing::new(
        PagingOptions::new(0).with_invisible_items_threshold(threshold),
        SliceSource::new((0..len).collect(), page_size),
    )
}

fn state(items: usize, next: Option<usize>, error: bool, loading: bool) -> PagingState<usize, u32> {
    PagingState {
        items: (0..items as u32).collect(),
        next_page_key: next,
        error: error.then(|| FetchError::new("x")),
        is_loading: loading,
        has_completed_first_fetch: true,
    }
}

#[test]
fn render_branch_covers_every_status() {
    use PagingStatus::*;

    assert_eq!(RenderBranch::for_status(LoadingFirstPage), RenderBranch::FirstPageProgress);
    assert_eq!(RenderBranch::for_status(FirstPageError), RenderBranch::FirstPageError);
    assert_eq!(RenderBranch::for_status(Empty), RenderBranch::NoItemsFound);
    assert_eq!(
        RenderBranch::for_status(Ongoing),
        RenderBranch::ItemList {
            footer: Footer::NewPageProgress
        }
    );
    assert_eq!(
        RenderBranch::for_status(Completed),
        RenderBranch::ItemList {
            footer: Footer::NoMoreItems
        }
    );
    assert_eq!(
        RenderBranch::for_status(SubsequentPageError),
        RenderBranch::ItemListWithError
    );
}

#[test]
fn slots_append_one_trailing_row_to_item_lists() {
    let ongoing = state(3, Some(3), false, false);
    assert_eq!(slot_count(&ongoing), 4);
    assert_eq!(slot_at(&ongoing, 0), Some(Slot::Item(0)));
    assert_eq!(slot_at(&ongoing, 2), Some(Slot::Item(2)));
    assert_eq!(slot_at(&ongoing, 3), Some(Slot::NewPageProgress));
    assert_eq!(slot_at(&ongoing, 4), None);

    let failed = state(2, Some(2), true, false);
    assert_eq!(slot_count(&failed), 3);
    assert_eq!(slot_at(&failed, 2), Some(Slot::NewPageError));

    let done = state(2, None, false, false);
    assert_eq!(slot_at(&done, 2), Some(Slot::NoMoreItems));
}

#[test]
fn first_page_branches_render_a_single_indicator() {
    let empty = state(0, None, false, false);
    assert_eq!(slot_count(&empty), 1);
    assert_eq!(
        slot_at(&empty, 0),
        Some(Slot::Indicator(RenderBranch::NoItemsFound))
    );
    assert_eq!(slot_at(&empty, 1), None);

    let failed = state(0, None, true, false);
    assert_eq!(
        slot_at(&failed, 0),
        Some(Slot::Indicator(RenderBranch::FirstPageError))
    );

    let initial: PagingState<usize, u32> = PagingState::default();
    assert_eq!(
        slot_at(&initial, 0),
        Some(Slot::Indicator(RenderBranch::FirstPageProgress))
    );
}

#[test]
fn slice_source_pages_by_offset() {
    let mut s = SliceSource::new((0..5u32).collect(), 2);
    assert_eq!(
        s.fetch_page(&0),
        PageResult::Next {
            items: alloc::vec![0, 1],
            next_key: 2
        }
    );
    assert_eq!(
        s.fetch_page(&2),
        PageResult::Next {
            items: alloc::vec![2, 3],
            next_key: 4
        }
    );
    assert_eq!(
        s.fetch_page(&4),
        PageResult::Last {
            items: alloc::vec![4]
        }
    );
    assert_eq!(s.fetch_page(&9), PageResult::Last { items: Vec::new() });
    assert_eq!(s.fetches(), 4);
}

#[test]
fn slice_source_fails_once_at_configured_offset() {
    let mut s = SliceSource::new((0..4u32).collect(), 2).with_failure_at(2);
    assert!(matches!(s.fetch_page(&2), PageResult::Error(_)));
    assert!(matches!(s.fetch_page(&2), PageResult::Last { .. }));
}

#[test]
fn closures_are_page_sources() {
    let mut calls = 0u32;
    let mut f = |key: &u32| -> PageResult<u32, String> {
        calls += 1;
        PageResult::Next {
            items: alloc::vec![alloc::format!("page {key}")],
            next_key: key + 1,
        }
    };
    assert_eq!(
        PageSource::fetch_page(&mut f, &7),
        PageResult::Next {
            items: alloc::vec![String::from("page 7")],
            next_key: 8
        }
    );
    assert_eq!(calls, 1);
}

#[test]
fn listing_loads_first_page_on_first_render() {
    let mut l = slice_listing(50, 20, 3);
    assert_eq!(l.render_branch(), RenderBranch::FirstPageProgress);
    assert!(l.render_pass(0..0));
    assert_eq!(l.pending(), 1);
    assert!(!l.render_pass(0..0));

    assert_eq!(l.pump(), 1);
    assert_eq!(l.items().len(), 20);
    assert_eq!(l.status(), PagingStatus::Ongoing);
}

#[test]
fn listing_triggers_next_page_at_threshold() {
    let mut l = slice_listing(50, 20, 3);
    l.render_pass(0..0);
    l.pump();

    assert!(!l.render_pass(0..17));
    assert!(l.render_pass(17..20));
    assert!(!l.render_pass(0..20));
    assert_eq!(l.pending(), 1);
    assert_eq!(l.pump(), 1);
    assert_eq!(l.items().len(), 40);

    assert!(l.render_pass(30..40));
    l.pump();
    assert_eq!(l.items().len(), 50);
    assert_eq!(l.status(), PagingStatus::Completed);
    assert_eq!(l.slot(50), Some(Slot::NoMoreItems));
    assert!(!l.render_pass(0..50));
    assert_eq!(l.source().fetches(), 3);
}

#[test]
fn listing_threshold_zero_fetches_from_the_trailing_row() {
    let mut l = slice_listing(50, 20, 0);
    l.render_pass(0..0);
    l.pump();
    assert_eq!(l.items().len(), 20);

    assert!(!l.render_pass(0..20));
    assert_eq!(l.slot(20), Some(Slot::NewPageProgress));
    assert!(l.render_pass(15..21));
    assert!(!l.render_pass(15..21));
    assert_eq!(l.pump(), 1);
    assert_eq!(l.items().len(), 40);

    for _ in 0..5 {
        let end = l.slot_count();
        l.render_pass(0..end);
        l.pump();
    }
    assert_eq!(l.items().len(), 50);
    assert_eq!(l.status(), PagingStatus::Completed);
    assert_eq!(l.source().fetches(), 3);
}

#[test]
fn listing_trailing_error_row_does_not_refetch() {
    let mut l: SliceListing = Listing::new(
        PagingOptions::new(0).with_invisible_items_threshold(0),
        SliceSource::new((0..10).collect(), 5).with_failure_at(5),
    );
    l.render_pass(0..0);
    l.pump();
    assert!(l.render_pass(0..6));
    l.pump();

    assert_eq!(l.slot(5), Some(Slot::NewPageError));
    assert!(!l.render_pass(0..6));
    assert_eq!(l.source().fetches(), 2);
}

#[test]
fn listing_retry_recovers_subsequent_page_error() {
    let mut l: SliceListing = Listing::new(
        PagingOptions::new(0),
        SliceSource::new((0..10).collect(), 5).with_failure_at(5),
    );
    l.render_pass(0..0);
    l.pump();
    l.render_pass(0..5);
    l.pump();

    assert_eq!(l.status(), PagingStatus::SubsequentPageError);
    assert_eq!(l.render_branch(), RenderBranch::ItemListWithError);
    assert_eq!(l.items().len(), 5);
    assert!(!l.render_pass(0..5));

    assert!(l.retry());
    assert_eq!(l.status(), PagingStatus::Ongoing);
    l.pump();
    assert_eq!(l.items(), &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    assert_eq!(l.status(), PagingStatus::Completed);
}

#[test]
fn listing_refresh_drops_superseded_requests() {
    let mut l = slice_listing(30, 10, 3);
    l.render_pass(0..0);
    l.pump();
    assert!(l.render_pass(7..8));

    assert!(l.refresh());
    assert_eq!(l.pending(), 2);
    assert_eq!(l.status(), PagingStatus::LoadingFirstPage);

    assert_eq!(l.pump(), 1);
    assert_eq!(l.items(), &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    assert_eq!(l.source().fetches(), 2);
}

#[test]
fn listing_first_page_error_then_retry() {
    let mut l: SliceListing = Listing::new(
        PagingOptions::new(0),
        SliceSource::new((0..3).collect(), 5).with_failure_at(0),
    );
    l.render_pass(0..0);
    l.pump();
    assert_eq!(l.render_branch(), RenderBranch::FirstPageError);
    assert!(!l.render_pass(0..0));

    assert!(l.retry());
    l.pump();
    assert_eq!(l.items(), &[0, 1, 2]);
    assert_eq!(l.status(), PagingStatus::Completed);
}

#[test]
fn listing_over_empty_source_is_no_items_found() {
    let mut l = slice_listing(0, 10, 3);
    l.render_pass(0..0);
    l.pump();
    assert_eq!(l.render_branch(), RenderBranch::NoItemsFound);
    assert_eq!(l.slot_count(), 1);
}

#[test]
fn example_listing_sim_smoke() {
    let mut l = slice_listing(95, 20, 5);
    let viewport = 8usize;
    let mut top = 0usize;
    let mut frames = 0;

    while l.status() != PagingStatus::Completed && frames < 100 {
        let end = (top + viewport).min(l.slot_count());
        l.render_pass(top..end);
        l.pump();
        top = (top + viewport / 2).min(l.items().len().saturating_sub(1));
        frames += 1;
    }

    assert_eq!(l.items().len(), 95);
    assert_eq!(l.source().fetches(), 5);
    let (c, _) = l.into_parts();
    assert_eq!(c.status(), PagingStatus::Completed);
}
