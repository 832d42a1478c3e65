/// Decides when a materialized index should request the next page.
///
/// The trigger position is `item_count - threshold`. A fetch fires when the rendering layer
/// materializes exactly that index, or any index when the threshold exceeds the item count.
/// Only the most recent trigger position is remembered, so repeated evaluation (re-renders)
/// fires at most once per position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FetchTrigger {
    last_handled: Option<isize>,
}

impl FetchTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the trigger position for a list of `item_count` items.
    ///
    /// Negative when `threshold > item_count`.
    pub fn trigger_index(item_count: usize, threshold: usize) -> isize {
        let count = isize::try_from(item_count).unwrap_or(isize::MAX);
        let threshold = isize::try_from(threshold).unwrap_or(isize::MAX);
        count.saturating_sub(threshold)
    }

    /// Evaluates the trigger for `index` and records the position when it fires.
    pub fn should_trigger(
        &mut self,
        index: usize,
        item_count: usize,
        threshold: usize,
        has_next_page: bool,
    ) -> bool {
        let trigger_index = Self::trigger_index(item_count, threshold);
        let eligible =
            trigger_index < 0 || isize::try_from(index).is_ok_and(|i| i == trigger_index);
        let already_handled = self.last_handled == Some(trigger_index);

        if !(has_next_page && eligible && !already_handled) {
            return false;
        }

        // Recorded before the caller issues the request so a synchronous re-render in the same
        // pass sees the position as handled.
        self.last_handled = Some(trigger_index);
        ptrace!(index, item_count, threshold, trigger_index, "fetch trigger fired");
        true
    }

    /// The last trigger position that fired, if any.
    pub fn last_handled(&self) -> Option<isize> {
        self.last_handled
    }

    /// Forgets the last handled position so a fresh listing can trigger again.
    pub fn reset(&mut self) {
        self.last_handled = None;
    }
}
