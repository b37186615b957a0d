//! Ties in-flight loads to the lifetime of whatever consumes their results.
//!
//! The consumer owns a [`ViewScope`]; loads receive [`CancelSignal`]s from it. Cancelling
//! or dropping the scope makes every outstanding load resolve to `None` instead of
//! delivering results nobody will render.

use std::future::Future;
use tokio::sync::watch;

#[derive(Debug)]
pub struct ViewScope {
    tx: watch::Sender<bool>,
}

#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

impl ViewScope {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    pub fn signal(&self) -> CancelSignal {
        CancelSignal {
            rx: self.tx.subscribe(),
        }
    }

    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelSignal {
    /// A signal that never fires, for callers without a scope.
    pub fn never() -> Self {
        // A closed channel that was never cancelled stays live in `cancelled`.
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once the scope is cancelled or dropped. Never resolves for
    /// [`CancelSignal::never`].
    pub async fn cancelled(&mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }

    /// Runs `fut` unless the scope is cancelled first. Results that arrive after
    /// cancellation are discarded.
    pub async fn run<F: Future>(&mut self, fut: F) -> Option<F::Output> {
        if self.is_cancelled() {
            return None;
        }
        let out = tokio::select! {
            biased;
            _ = self.cancelled() => None,
            out = fut => Some(out),
        };
        out.filter(|_| !self.is_cancelled())
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn live_scope_lets_results_through() {
        let scope = ViewScope::new();
        let mut signal = scope.signal();
        assert_eq!(signal.run(async { 7 }).await, Some(7));
    }

    #[tokio::test]
    async fn cancelled_scope_discards_results() {
        let scope = ViewScope::new();
        let mut signal = scope.signal();
        scope.cancel();
        assert!(signal.is_cancelled());
        assert_eq!(signal.run(async { 7 }).await, None);
    }

    #[tokio::test]
    async fn cancel_interrupts_pending_work() {
        let scope = ViewScope::new();
        let mut signal = scope.signal();
        let handle = tokio::spawn(async move { signal.run(std::future::pending::<()>()).await });
        tokio::task::yield_now().await;
        drop(scope);
        assert_eq!(handle.await.unwrap(), None);
    }

    #[tokio::test]
    async fn never_signal_does_not_fire() {
        let mut signal = CancelSignal::never();
        assert!(!signal.is_cancelled());
        assert_eq!(signal.run(async { "ok" }).await, Some("ok"));
    }
}
