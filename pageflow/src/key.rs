/// Bound for page keys (cursors, offsets, page numbers).
///
/// Keys are cloned into every [`crate::PageRequest`] and compared when checking whether a
/// request is already in flight.
pub trait PageKey: Clone + PartialEq + core::fmt::Debug {}
impl<K: Clone + PartialEq + core::fmt::Debug> PageKey for K {}
