use std::fmt;
use std::future::Future;
use std::pin::Pin;

use bevy::tasks::{block_on, futures_lite::future::poll_once};
use parking_lot::Mutex;
use thiserror::Error;

use super::ItemProvider;
use crate::item::ItemStack;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider could not be loaded: {0}")]
    Failed(String),
}

pub type ProviderFuture = Pin<Box<dyn Future<Output = Result<ItemProvider, ProviderError>> + Send>>;

/// Outcome of polling an [`AsyncItem`] once.
#[derive(Debug)]
pub enum AsyncPoll {
    Pending,
    Resolved,
    Failed(ProviderError),
}

/// Shows a placeholder until its future yields the real provider.
///
/// The future is polled on the owning tick, never from another thread, so the
/// resolved provider is installed on the same context that renders it.
pub struct AsyncItem {
    placeholder: Option<ItemStack>,
    pending: Option<Mutex<ProviderFuture>>,
    resolved: Option<Box<ItemProvider>>,
}

impl AsyncItem {
    pub fn new<F>(placeholder: Option<ItemStack>, future: F) -> Self
    where
        F: Future<Output = Result<ItemProvider, ProviderError>> + Send + 'static,
    {
        Self {
            placeholder,
            pending: Some(Mutex::new(Box::pin(future))),
            resolved: None,
        }
    }

    pub fn placeholder(&self) -> Option<&ItemStack> {
        self.placeholder.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn resolved(&self) -> Option<&ItemProvider> {
        self.resolved.as_deref()
    }

    pub fn resolved_mut(&mut self) -> Option<&mut ItemProvider> {
        self.resolved.as_deref_mut()
    }

    /// Polls the future once without blocking.
    pub fn poll(&mut self) -> AsyncPoll {
        let Some(pending) = self.pending.as_mut() else {
            return AsyncPoll::Pending;
        };
        let ready = block_on(poll_once(&mut *pending.get_mut()));
        match ready {
            None => AsyncPoll::Pending,
            Some(result) => {
                self.pending = None;
                match result {
                    Ok(provider) => {
                        self.resolved = Some(Box::new(provider));
                        AsyncPoll::Resolved
                    }
                    Err(err) => AsyncPoll::Failed(err),
                }
            }
        }
    }

    /// Drops the pending future; the resolved provider, if any, stays.
    pub fn abandon(&mut self) {
        self.pending = None;
    }
}

impl fmt::Debug for AsyncItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncItem")
            .field("placeholder", &self.placeholder)
            .field("pending", &self.pending.is_some())
            .field("resolved", &self.resolved)
            .finish()
    }
}

impl ItemProvider {
    pub fn async_item<F>(placeholder: Option<ItemStack>, future: F) -> Self
    where
        F: Future<Output = Result<ItemProvider, ProviderError>> + Send + 'static,
    {
        Self::Async(AsyncItem::new(placeholder, future))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::fixtures::{Gate, gated};

    #[test]
    fn stays_pending_until_the_gate_opens() {
        let gate = Gate::new();
        let mut item = AsyncItem::new(
            Some(ItemStack::new("clock", 1)),
            gated(&gate, || Ok(ItemProvider::simple(ItemStack::new("diamond", 1)))),
        );

        assert!(matches!(item.poll(), AsyncPoll::Pending));
        assert!(item.is_pending());
        assert!(item.resolved().is_none());

        gate.open();
        assert!(matches!(item.poll(), AsyncPoll::Resolved));
        assert!(!item.is_pending());
        assert!(matches!(item.resolved(), Some(ItemProvider::Simple(_))));
    }

    #[test]
    fn failure_keeps_the_placeholder() {
        let mut item = AsyncItem::new(Some(ItemStack::new("clock", 1)), async {
            Err(ProviderError::Failed("offline".into()))
        });

        assert!(matches!(item.poll(), AsyncPoll::Failed(ProviderError::Failed(_))));
        assert!(item.resolved().is_none());
        assert_eq!(item.placeholder().unwrap().item_id, "clock");
        assert!(matches!(item.poll(), AsyncPoll::Pending));
    }

    #[test]
    fn abandoned_future_never_resolves() {
        let gate = Gate::new();
        let mut item = AsyncItem::new(
            None,
            gated(&gate, || Ok(ItemProvider::simple(ItemStack::new("diamond", 1)))),
        );

        item.abandon();
        gate.open();

        assert!(matches!(item.poll(), AsyncPoll::Pending));
        assert!(item.resolved().is_none());
    }
}
