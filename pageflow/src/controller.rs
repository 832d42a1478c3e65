use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::key::PageKey;
use crate::{
    Delivery, FetchError, FetchTrigger, Generation, ListenerId, PageRequest, PageRequestListener,
    PageResult, PagingOptions, PagingState, PagingStatus, StateListener, StatusListener,
};

/// Owns a listing's [`PagingState`] and drives it through fetch results.
///
/// The controller never performs I/O. It emits [`PageRequest`] events to page-request listeners
/// and expects the fetch collaborator to deliver the outcome back through
/// [`append_page`](Self::append_page), [`append_last_page`](Self::append_last_page),
/// [`report_error`](Self::report_error) or [`complete`](Self::complete), tagged with the
/// request's [`Generation`].
///
/// Threading: all methods take `&mut self` and there is no internal locking. Drive a controller
/// from one execution context; when it has to be shared across threads, wrap the whole
/// controller in a single `Mutex` and deliver results through that lock.
///
/// Invariants:
/// - At most one fetch is in flight. `request_page` while loading is a no-op.
/// - Every published mutation delivers the full state to listeners, synchronously, in
///   registration order. Listeners only ever see `&PagingState`.
/// - Results tagged with a generation superseded by [`refresh`](Self::refresh) are dropped.
///   Any other result that does not answer the request in flight is a protocol defect.
#[derive(Clone)]
pub struct PagingController<K, T, E = FetchError> {
    options: PagingOptions<K>,
    state: PagingState<K, T, E>,
    trigger: FetchTrigger,

    generation: Generation,
    /// Every generation up to this one was superseded by a refresh.
    superseded_through: Generation,
    in_flight: Option<PageRequest<K>>,

    listeners: Vec<(ListenerId, StateListener<K, T, E>)>,
    status_listeners: Vec<(ListenerId, StatusListener)>,
    page_request_listeners: Vec<(ListenerId, PageRequestListener<K>)>,
    next_listener_id: u64,
    last_status: PagingStatus,

    notify_depth: usize,
    notify_pending: bool,
}

impl<K: PageKey, T, E> PagingController<K, T, E> {
    /// Creates a controller in the initial `LoadingFirstPage` state.
    ///
    /// No request is issued here; call [`request_first_page`](Self::request_first_page) once
    /// the fetch collaborator is listening.
    pub fn new(options: PagingOptions<K>) -> Self {
        pdebug!(
            first_page_key = ?options.first_page_key,
            threshold = options.invisible_items_threshold,
            "PagingController::new"
        );
        let state = PagingState::default();
        let last_status = state.status();
        Self {
            options,
            state,
            trigger: FetchTrigger::new(),
            generation: Generation::default(),
            superseded_through: Generation::default(),
            in_flight: None,
            listeners: Vec::new(),
            status_listeners: Vec::new(),
            page_request_listeners: Vec::new(),
            next_listener_id: 0,
            last_status,
            notify_depth: 0,
            notify_pending: false,
        }
    }

    pub fn options(&self) -> &PagingOptions<K> {
        &self.options
    }

    pub fn set_invisible_items_threshold(&mut self, threshold: usize) {
        self.options.invisible_items_threshold = threshold;
    }

    pub fn state(&self) -> &PagingState<K, T, E> {
        &self.state
    }

    /// Returns an owned copy of the current state.
    pub fn snapshot(&self) -> PagingState<K, T, E>
    where
        T: Clone,
        E: Clone,
    {
        self.state.clone()
    }

    pub fn items(&self) -> &[T] {
        &self.state.items
    }

    pub fn item_count(&self) -> usize {
        self.state.items.len()
    }

    pub fn next_page_key(&self) -> Option<&K> {
        self.state.next_page_key.as_ref()
    }

    pub fn error(&self) -> Option<&E> {
        self.state.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    pub fn has_next_page(&self) -> bool {
        self.state.has_next_page()
    }

    pub fn status(&self) -> PagingStatus {
        self.state.status()
    }

    /// The request currently awaiting a result.
    pub fn in_flight(&self) -> Option<&PageRequest<K>> {
        self.in_flight.as_ref()
    }

    /// The generation of the most recently issued request.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn trigger(&self) -> &FetchTrigger {
        &self.trigger
    }

    // ---------------------------------------------------------------------
    // Listeners
    // ---------------------------------------------------------------------

    fn next_id(&mut self) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id = self.next_listener_id.wrapping_add(1);
        id
    }

    /// Registers a state listener. Read [`state`](Self::state) for the current snapshot; the
    /// listener only fires on subsequent mutations.
    pub fn add_listener(
        &mut self,
        f: impl Fn(&PagingState<K, T, E>) + Send + Sync + 'static,
    ) -> ListenerId {
        let id = self.next_id();
        self.listeners.push((id, Arc::new(f)));
        id
    }

    /// Registers a state listener and immediately hands it the current state.
    pub fn add_listener_and_replay(
        &mut self,
        f: impl Fn(&PagingState<K, T, E>) + Send + Sync + 'static,
    ) -> ListenerId {
        f(&self.state);
        self.add_listener(f)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        remove_by_id(&mut self.listeners, id)
    }

    pub fn add_status_listener(
        &mut self,
        f: impl Fn(PagingStatus) + Send + Sync + 'static,
    ) -> ListenerId {
        let id = self.next_id();
        self.status_listeners.push((id, Arc::new(f)));
        id
    }

    pub fn remove_status_listener(&mut self, id: ListenerId) -> bool {
        remove_by_id(&mut self.status_listeners, id)
    }

    pub fn add_page_request_listener(
        &mut self,
        f: impl Fn(&PageRequest<K>) + Send + Sync + 'static,
    ) -> ListenerId {
        let id = self.next_id();
        self.page_request_listeners.push((id, Arc::new(f)));
        id
    }

    pub fn remove_page_request_listener(&mut self, id: ListenerId) -> bool {
        remove_by_id(&mut self.page_request_listeners, id)
    }

    fn publish_now(&mut self) {
        let status = self.state.status();
        if status == PagingStatus::LoadingFirstPage {
            self.trigger.reset();
        }

        for (_, cb) in &self.listeners {
            cb(&self.state);
        }

        if status != self.last_status {
            ptrace!(from = ?self.last_status, to = ?status, "status changed");
            self.last_status = status;
            for (_, cb) in &self.status_listeners {
                cb(status);
            }
        }
    }

    fn publish(&mut self) {
        if self.notify_depth > 0 {
            self.notify_pending = true;
            return;
        }
        self.publish_now();
    }

    /// Batches multiple mutations into a single state publication.
    ///
    /// Page-request events are still emitted as they happen.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        self.notify_depth = self.notify_depth.saturating_add(1);

        f(self);

        debug_assert!(self.notify_depth > 0, "notify_depth underflow");
        self.notify_depth = self.notify_depth.saturating_sub(1);

        if self.notify_depth == 0 && core::mem::take(&mut self.notify_pending) {
            self.publish_now();
        }
    }

    // ---------------------------------------------------------------------
    // Requests
    // ---------------------------------------------------------------------

    /// Asks the fetch collaborator to load the page identified by `key`.
    ///
    /// Returns the issued request, or `None` when a fetch is already in flight.
    pub fn request_page(&mut self, key: K) -> Option<PageRequest<K>> {
        if let Some(current) = &self.in_flight {
            if current.key != key {
                pwarn!(
                    requested = ?key,
                    in_flight = ?current.key,
                    "request_page ignored: another fetch is in flight"
                );
            }
            return None;
        }

        self.generation = self.generation.next();
        let request = PageRequest {
            key,
            generation: self.generation,
        };
        pdebug!(key = ?request.key, generation = request.generation.0, "request_page");

        self.in_flight = Some(request.clone());
        self.state.is_loading = true;

        for (_, cb) in &self.page_request_listeners {
            cb(&request);
        }
        self.publish();
        Some(request)
    }

    /// Issues the initial request if the listing has not started loading yet.
    pub fn request_first_page(&mut self) -> Option<PageRequest<K>> {
        if self.state.is_loading || self.status() != PagingStatus::LoadingFirstPage {
            return None;
        }
        let key = self.options.first_page_key.clone();
        self.request_page(key)
    }

    /// Re-issues the request that failed, keeping the loaded items.
    ///
    /// The error is cleared in the same publication, so the listing reads as loading again
    /// (`LoadingFirstPage` or `Ongoing`) while the retry is in flight. A failed first page is
    /// retried with the first page key. `Empty` and `Completed` listings are left alone.
    pub fn retry_last_request(&mut self) -> Option<PageRequest<K>> {
        if self.state.is_loading {
            return None;
        }
        let key = match &self.state.next_page_key {
            Some(key) => key.clone(),
            None if self.state.items.is_empty() && self.state.error.is_some() => {
                self.options.first_page_key.clone()
            }
            None => {
                pwarn!(status = ?self.status(), "retry_last_request ignored: nothing left to load");
                return None;
            }
        };

        let mut issued = None;
        self.batch_update(|c| {
            if c.state.error.take().is_some() {
                c.publish();
            }
            issued = c.request_page(key);
        });
        issued
    }

    /// Discards everything loaded so far and starts again from the first page key.
    ///
    /// Any fetch in flight is superseded: its result will be reported as
    /// [`Delivery::Stale`]. Observers see one publication, already in the loading state.
    pub fn refresh(&mut self) -> Option<PageRequest<K>> {
        pdebug!(generation = self.generation.0, "refresh");
        let mut issued = None;
        self.batch_update(|c| {
            c.state.items.clear();
            c.state.next_page_key = None;
            c.state.error = None;
            c.state.is_loading = false;
            c.state.has_completed_first_fetch = false;
            c.in_flight = None;
            c.generation = c.generation.next();
            c.superseded_through = c.generation;
            c.trigger.reset();
            c.publish();

            let key = c.options.first_page_key.clone();
            issued = c.request_page(key);
        });
        issued
    }

    /// Render-boundary hook, called once per index as it is materialized.
    ///
    /// Runs the fetch trigger against the current item count and threshold and requests the
    /// next page when it fires.
    pub fn on_item_materialized(&mut self, index: usize) -> Option<PageRequest<K>> {
        let fire = self.trigger.should_trigger(
            index,
            self.state.items.len(),
            self.options.invisible_items_threshold,
            self.state.has_next_page(),
        );
        if !fire {
            return None;
        }
        let key = self.state.next_page_key.clone()?;
        self.request_page(key)
    }

    // ---------------------------------------------------------------------
    // Results
    // ---------------------------------------------------------------------

    /// Checks that `generation` answers the request in flight and clears it.
    ///
    /// # Panics
    ///
    /// When `generation` was never issued, or when it answers a request that already resolved
    /// and no refresh has superseded it since. Both are protocol defects in the fetch
    /// collaborator.
    fn accept(&mut self, generation: Generation) -> Delivery {
        if self
            .in_flight
            .as_ref()
            .is_some_and(|r| r.generation == generation)
        {
            self.in_flight = None;
            return Delivery::Applied;
        }

        assert!(
            generation <= self.generation,
            "pageflow: result delivered for generation {} which was never issued (latest is {})",
            generation.0,
            self.generation.0,
        );
        assert!(
            generation <= self.superseded_through,
            "pageflow: result delivered for generation {} but no fetch is in flight for it",
            generation.0,
        );

        pwarn!(
            generation = generation.0,
            current = self.generation.0,
            "discarding stale page result"
        );
        Delivery::Stale
    }

    /// Appends a successful page. `next_key = None` marks it as the last page.
    ///
    /// # Panics
    ///
    /// See [`complete`](Self::complete).
    pub fn append_page(
        &mut self,
        generation: Generation,
        items: impl IntoIterator<Item = T>,
        next_key: Option<K>,
    ) -> Delivery {
        let delivery = self.accept(generation);
        if delivery == Delivery::Stale {
            return delivery;
        }

        self.state.items.extend(items);
        ptrace!(
            total = self.state.items.len(),
            next_key = ?next_key,
            "append_page"
        );
        self.state.next_page_key = next_key;
        self.state.error = None;
        self.state.is_loading = false;
        self.state.has_completed_first_fetch = true;
        self.publish();
        delivery
    }

    /// Appends the final page.
    ///
    /// # Panics
    ///
    /// See [`complete`](Self::complete).
    pub fn append_last_page(
        &mut self,
        generation: Generation,
        items: impl IntoIterator<Item = T>,
    ) -> Delivery {
        self.append_page(generation, items, None)
    }

    /// Records a failed fetch. Items and the next key stay untouched so a retry resumes from
    /// the same position.
    ///
    /// # Panics
    ///
    /// See [`complete`](Self::complete).
    pub fn report_error(&mut self, generation: Generation, error: E) -> Delivery {
        let delivery = self.accept(generation);
        if delivery == Delivery::Stale {
            return delivery;
        }

        ptrace!(items = self.state.items.len(), "report_error");
        self.state.error = Some(error);
        self.state.is_loading = false;
        self.state.has_completed_first_fetch = true;
        self.publish();
        delivery
    }

    /// Delivers a fetch outcome for the request tagged `generation`.
    ///
    /// # Panics
    ///
    /// When `generation` was never issued, or when its request already resolved and no refresh
    /// superseded it since.
    pub fn complete(&mut self, generation: Generation, result: PageResult<K, T, E>) -> Delivery {
        match result {
            PageResult::Next { items, next_key } => {
                self.append_page(generation, items, Some(next_key))
            }
            PageResult::Last { items } => self.append_last_page(generation, items),
            PageResult::Error(error) => self.report_error(generation, error),
        }
    }
}

fn remove_by_id<F>(list: &mut Vec<(ListenerId, F)>, id: ListenerId) -> bool {
    let len = list.len();
    list.retain(|(i, _)| *i != id);
    list.len() != len
}

impl<K: core::fmt::Debug, T, E: core::fmt::Debug> core::fmt::Debug for PagingController<K, T, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PagingController")
            .field("options", &self.options)
            .field("item_count", &self.state.items.len())
            .field("next_page_key", &self.state.next_page_key)
            .field("error", &self.state.error)
            .field("is_loading", &self.state.is_loading)
            .field("generation", &self.generation)
            .field("superseded_through", &self.superseded_through)
            .field("in_flight", &self.in_flight)
            .field("trigger", &self.trigger)
            .finish_non_exhaustive()
    }
}
