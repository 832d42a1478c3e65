use alloc::collections::VecDeque;
use core::ops::Range;

use pageflow::{
    FetchError, PageKey, PageRequest, PagingController, PagingOptions, PagingState, PagingStatus,
};

use crate::{PageSource, RenderBranch, Slot, slot_at, slot_count};

/// A framework-neutral driver that wires a [`PageSource`] to a `pageflow::PagingController`.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `render_pass(range)` with the indexes materialized this frame
/// - `pump()` once the frame is done, to fetch queued pages and deliver the results
/// - `refresh()` / `retry()` on user gestures
///
/// Requests are queued rather than fetched inline so results are always delivered on the
/// listing's own execution context, never from inside a render pass.
#[derive(Clone, Debug)]
pub struct Listing<K, T, S, E = FetchError> {
    c: PagingController<K, T, E>,
    source: S,
    queue: VecDeque<PageRequest<K>>,
}

impl<K: PageKey, T, S, E> Listing<K, T, S, E>
where
    S: PageSource<K, T, E>,
{
    pub fn new(options: PagingOptions<K>, source: S) -> Self {
        Self::from_controller(PagingController::new(options), source)
    }

    pub fn from_controller(c: PagingController<K, T, E>, source: S) -> Self {
        Self {
            c,
            source,
            queue: VecDeque::new(),
        }
    }

    pub fn controller(&self) -> &PagingController<K, T, E> {
        &self.c
    }

    pub fn controller_mut(&mut self) -> &mut PagingController<K, T, E> {
        &mut self.c
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_parts(self) -> (PagingController<K, T, E>, S) {
        (self.c, self.source)
    }

    pub fn state(&self) -> &PagingState<K, T, E> {
        self.c.state()
    }

    pub fn items(&self) -> &[T] {
        self.c.items()
    }

    pub fn status(&self) -> PagingStatus {
        self.c.status()
    }

    pub fn render_branch(&self) -> RenderBranch {
        RenderBranch::for_status(self.c.status())
    }

    pub fn slot_count(&self) -> usize {
        slot_count(self.c.state())
    }

    pub fn slot(&self, index: usize) -> Option<Slot> {
        slot_at(self.c.state(), index)
    }

    /// Requests queued but not yet fetched.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    fn enqueue(&mut self, request: Option<PageRequest<K>>) -> bool {
        match request {
            Some(r) => {
                self.queue.push_back(r);
                true
            }
            None => false,
        }
    }

    /// Materializes `range` through the fetch trigger.
    ///
    /// Item rows are passed by index. A visible trailing `NewPageProgress` row is passed as
    /// position `item_count`, which is where a threshold of 0 triggers. An idle listing that has
    /// not loaded anything yet also queues its first page here. Returns `true` when a request
    /// was queued.
    pub fn render_pass(&mut self, range: Range<usize>) -> bool {
        let first = self.c.request_first_page();
        let mut queued = self.enqueue(first);

        let count = self.c.item_count();
        let end = range.end.min(count);
        for index in range.start..end {
            let request = self.c.on_item_materialized(index);
            queued |= self.enqueue(request);
        }

        if range.contains(&count) && slot_at(self.c.state(), count) == Some(Slot::NewPageProgress)
        {
            let request = self.c.on_item_materialized(count);
            queued |= self.enqueue(request);
        }
        queued
    }

    /// Fetches every queued request through the source and delivers the results.
    ///
    /// Requests superseded by a refresh are dropped without being fetched. Returns the number
    /// of results applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0usize;
        while let Some(request) = self.queue.pop_front() {
            if self.c.in_flight() != Some(&request) {
                atrace!(generation = request.generation.0, "dropping superseded request");
                continue;
            }
            adebug!(key = ?request.key, generation = request.generation.0, "fetching page");
            let result = self.source.fetch_page(&request.key);
            if self.c.complete(request.generation, result).is_applied() {
                applied = applied.saturating_add(1);
            }
        }
        applied
    }

    /// Pull-to-refresh: discards loaded items and queues the first page again.
    pub fn refresh(&mut self) -> bool {
        let request = self.c.refresh();
        self.enqueue(request)
    }

    /// Tap-to-retry: re-queues the failed request, keeping loaded items.
    pub fn retry(&mut self) -> bool {
        let request = self.c.retry_last_request();
        self.enqueue(request)
    }
}
