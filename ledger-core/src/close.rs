//! Per-handle close subscriptions.
//!
//! Each open view owns an ordered list of subscribers. When the host reports
//! the view closed, the list is taken out whole and run in registration
//! order, so a second report for the same handle finds nothing to run.

use crate::view::{SingletonKind, ViewHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseSubscriber {
    DecrementCounter,
    ReleaseSlot(SingletonKind),
}

#[derive(Debug, Clone, Default)]
pub struct CloseSubscriptions {
    entries: Vec<(ViewHandle, Vec<CloseSubscriber>)>,
}

impl CloseSubscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `subscriber` to the end of `handle`'s list.
    pub fn subscribe(
        &mut self,
        handle: ViewHandle,
        subscriber: CloseSubscriber,
    ) {
        match self.entries.iter_mut().find(|(h, _)| *h == handle) {
            Some((_, subscribers)) => subscribers.push(subscriber),
            None => self.entries.push((handle, vec![subscriber])),
        }
    }

    /// Remove and return `handle`'s subscribers, `None` if it is not tracked.
    pub fn take(
        &mut self,
        handle: ViewHandle,
    ) -> Option<Vec<CloseSubscriber>> {
        let index = self.entries.iter().position(|(h, _)| *h == handle)?;
        Some(self.entries.remove(index).1)
    }

    /// Tracked handles in the order they were first subscribed.
    pub fn handles(&self) -> Vec<ViewHandle> {
        self.entries.iter().map(|(h, _)| *h).collect()
    }

    pub fn is_tracked(
        &self,
        handle: ViewHandle,
    ) -> bool {
        self.entries.iter().any(|(h, _)| *h == handle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn subscribers_come_back_in_registration_order() {
        let handle = ViewHandle::new(1);
        let mut subs = CloseSubscriptions::new();
        subs.subscribe(handle, CloseSubscriber::DecrementCounter);
        subs.subscribe(handle, CloseSubscriber::ReleaseSlot(SingletonKind::NewIncome));

        assert_eq!(
            subs.take(handle),
            Some(vec![
                CloseSubscriber::DecrementCounter,
                CloseSubscriber::ReleaseSlot(SingletonKind::NewIncome)
            ])
        );
    }

    #[test]
    fn second_take_finds_nothing() {
        let handle = ViewHandle::new(4);
        let mut subs = CloseSubscriptions::new();
        subs.subscribe(handle, CloseSubscriber::DecrementCounter);

        assert!(subs.take(handle).is_some());
        assert_eq!(subs.take(handle), None);
        assert!(subs.is_empty());
    }

    #[test]
    fn handles_keep_first_subscription_order() {
        let mut subs = CloseSubscriptions::new();
        for raw in [3, 1, 2] {
            subs.subscribe(ViewHandle::new(raw), CloseSubscriber::DecrementCounter);
        }
        subs.subscribe(ViewHandle::new(3), CloseSubscriber::DecrementCounter);

        assert_eq!(
            subs.handles(),
            vec![ViewHandle::new(3), ViewHandle::new(1), ViewHandle::new(2)]
        );
        assert_eq!(subs.len(), 3);
    }
}
