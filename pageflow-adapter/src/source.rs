use alloc::vec::Vec;

use pageflow::{FetchError, PageResult};

/// The fetch collaborator: loads the page identified by a key.
///
/// Closures `FnMut(&K) -> PageResult<K, T, E>` implement this trait, so simple adapters can pass
/// a function directly.
pub trait PageSource<K, T, E = FetchError> {
    fn fetch_page(&mut self, key: &K) -> PageResult<K, T, E>;
}

impl<K, T, E, F> PageSource<K, T, E> for F
where
    F: FnMut(&K) -> PageResult<K, T, E>,
{
    fn fetch_page(&mut self, key: &K) -> PageResult<K, T, E> {
        self(key)
    }
}

/// An in-memory source that serves an owned `Vec` in fixed-size pages.
///
/// Keys are item offsets; the first page key is `0`. Useful for demos, tests and for listings
/// whose data is already local but expensive to materialize.
#[derive(Clone, Debug)]
pub struct SliceSource<T> {
    items: Vec<T>,
    page_size: usize,
    fail_once: Vec<usize>,
    fetches: usize,
}

impl<T> SliceSource<T> {
    /// A `page_size` of zero is treated as one.
    pub fn new(items: Vec<T>, page_size: usize) -> Self {
        Self {
            items,
            page_size: page_size.max(1),
            fail_once: Vec::new(),
            fetches: 0,
        }
    }

    /// Makes the next fetch of `offset` fail once with a [`FetchError`].
    pub fn with_failure_at(mut self, offset: usize) -> Self {
        self.fail_once.push(offset);
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// How many fetches have been served, failures included.
    pub fn fetches(&self) -> usize {
        self.fetches
    }
}

impl<T: Clone> PageSource<usize, T> for SliceSource<T> {
    fn fetch_page(&mut self, key: &usize) -> PageResult<usize, T> {
        let offset = *key;
        self.fetches = self.fetches.saturating_add(1);

        if let Some(pos) = self.fail_once.iter().position(|&o| o == offset) {
            self.fail_once.swap_remove(pos);
            return PageResult::Error(FetchError::new(alloc::format!(
                "failed to fetch page at offset {offset}"
            )));
        }

        let start = offset.min(self.items.len());
        let end = start.saturating_add(self.page_size).min(self.items.len());
        let items = self.items[start..end].to_vec();
        if end < self.items.len() {
            PageResult::Next {
                items,
                next_key: end,
            }
        } else {
            PageResult::Last { items }
        }
    }
}
