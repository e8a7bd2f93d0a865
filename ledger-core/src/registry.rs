use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::close::{CloseSubscriber, CloseSubscriptions};
use crate::counter::ChildWindowCounter;
use crate::error::CreationError;
use crate::host::WindowHost;
use crate::view::{SingletonKind, ViewHandle};

/// Result of [`SingletonViewRegistry::open_or_focus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// A new view was built.
    Opened(ViewHandle),
    /// The kind was already open and its view was brought to the front.
    Focused(ViewHandle),
}

impl OpenOutcome {
    pub fn handle(&self) -> ViewHandle {
        match self {
            Self::Opened(handle) | Self::Focused(handle) => *handle,
        }
    }

    pub fn is_opened(&self) -> bool {
        matches!(self, Self::Opened(_))
    }
}

/// One slot per [`SingletonKind`]. A kind is present in the map exactly
/// while its view is open.
#[derive(Debug, Clone, Default)]
pub struct SingletonViewRegistry {
    slots: BTreeMap<SingletonKind, ViewHandle>,
}

impl SingletonViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Focus the open view of `kind`, or build one with `factory`.
    ///
    /// On a fresh open the handle gets two close subscribers, slot release
    /// first and the counter decrement second, and the counter is
    /// incremented. If `factory`
    /// fails nothing is recorded and the slot stays empty.
    pub fn open_or_focus<H, F>(
        &mut self,
        kind: SingletonKind,
        host: &mut H,
        counter: &mut ChildWindowCounter,
        subscriptions: &mut CloseSubscriptions,
        factory: F,
    ) -> Result<OpenOutcome, CreationError>
    where
        H: WindowHost + ?Sized,
        F: FnOnce(&mut H) -> Result<ViewHandle, CreationError>,
    {
        if let Some(&handle) = self.slots.get(&kind) {
            debug!(%kind, %handle, "singleton already open, focusing");
            host.focus(handle);
            return Ok(OpenOutcome::Focused(handle));
        }

        let handle = factory(host)?;
        self.slots.insert(kind, handle);
        subscriptions.subscribe(handle, CloseSubscriber::ReleaseSlot(kind));
        subscriptions.subscribe(handle, CloseSubscriber::DecrementCounter);
        host.subscribe_close(handle);
        let open = counter.increment();
        info!(%kind, %handle, open, "opened singleton view");

        Ok(OpenOutcome::Opened(handle))
    }

    /// Empty the slot of `kind` if it still holds `handle`.
    ///
    /// Returns whether anything was cleared; calling it again for the same
    /// close is a no-op.
    pub fn release(
        &mut self,
        kind: SingletonKind,
        handle: ViewHandle,
    ) -> bool {
        match self.slots.get(&kind) {
            Some(&held) if held == handle => {
                self.slots.remove(&kind);
                true
            }
            _ => false,
        }
    }

    pub fn handle(
        &self,
        kind: SingletonKind,
    ) -> Option<ViewHandle> {
        self.slots.get(&kind).copied()
    }

    pub fn is_open(
        &self,
        kind: SingletonKind,
    ) -> bool {
        self.slots.contains_key(&kind)
    }

    pub fn open_kinds(&self) -> Vec<SingletonKind> {
        self.slots.keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::UnderflowPolicy;
    use crate::host::testing::RecordingHost;
    use crate::view::ViewKind;
    use pretty_assertions::assert_eq;

    struct Fixture {
        registry: SingletonViewRegistry,
        host: RecordingHost,
        counter: ChildWindowCounter,
        subs: CloseSubscriptions,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                registry: SingletonViewRegistry::new(),
                host: RecordingHost::default(),
                counter: ChildWindowCounter::new(UnderflowPolicy::Reject),
                subs: CloseSubscriptions::new(),
            }
        }

        fn open(
            &mut self,
            kind: SingletonKind,
        ) -> Result<OpenOutcome, CreationError> {
            self.registry.open_or_focus(
                kind,
                &mut self.host,
                &mut self.counter,
                &mut self.subs,
                |host| host.create(ViewKind::Singleton(kind), &kind.params()),
            )
        }
    }

    #[test]
    fn second_open_focuses_the_first_view() {
        let mut fx = Fixture::new();
        let first = fx.open(SingletonKind::NewIncome).unwrap();
        let second = fx.open(SingletonKind::NewIncome).unwrap();

        assert!(first.is_opened());
        assert_eq!(second, OpenOutcome::Focused(first.handle()));
        assert_eq!(fx.host.created(), 1);
        assert_eq!(fx.host.focused(), vec![first.handle()]);
        assert_eq!(fx.counter.current(), 1);
    }

    #[test]
    fn open_subscribes_slot_release_before_counter() {
        let mut fx = Fixture::new();
        let handle = fx.open(SingletonKind::PaymentCategory).unwrap().handle();

        assert_eq!(
            fx.subs.take(handle),
            Some(vec![
                CloseSubscriber::ReleaseSlot(SingletonKind::PaymentCategory),
                CloseSubscriber::DecrementCounter,
            ])
        );
    }

    #[test]
    fn failed_factory_leaves_slot_empty_for_retry() {
        let mut fx = Fixture::new();
        fx.host.fail_next = Some("no room".to_string());

        let err = fx.open(SingletonKind::NewExpense).unwrap_err();
        assert_eq!(err, CreationError::new(SingletonKind::NewExpense, "no room"));
        assert!(!fx.registry.is_open(SingletonKind::NewExpense));
        assert_eq!(fx.counter.current(), 0);
        assert!(fx.subs.is_empty());

        let retry = fx.open(SingletonKind::NewExpense).unwrap();
        assert!(retry.is_opened());
        assert_eq!(fx.counter.current(), 1);
    }

    #[test]
    fn release_is_idempotent_and_checks_the_handle() {
        let mut fx = Fixture::new();
        let handle = fx.open(SingletonKind::IncomeCategory).unwrap().handle();

        assert!(!fx.registry.release(SingletonKind::IncomeCategory, ViewHandle::new(99)));
        assert!(fx.registry.release(SingletonKind::IncomeCategory, handle));
        assert!(!fx.registry.release(SingletonKind::IncomeCategory, handle));
        assert_eq!(fx.registry.handle(SingletonKind::IncomeCategory), None);
    }

    #[test]
    fn kinds_are_tracked_independently() {
        let mut fx = Fixture::new();
        for kind in SingletonKind::ALL {
            assert!(fx.open(kind).unwrap().is_opened());
        }
        assert_eq!(fx.registry.open_kinds(), SingletonKind::ALL.to_vec());
        assert_eq!(fx.counter.current(), 7);
    }
}
