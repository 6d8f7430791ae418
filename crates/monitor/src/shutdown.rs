//! Cooperative shutdown signalling between the monitor's public surface
//! and its event loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// A set-once flag with async waiters.
///
/// `send` may be called from any task. `wait` resolves once the flag is
/// set, including when it was set before the call.
#[derive(Clone, Debug, Default)]
pub(crate) struct ShutdownSignal {
    inner: Arc<SignalInner>,
}

#[derive(Debug, Default)]
struct SignalInner {
    set: AtomicBool,
    notify: Notify,
}

impl ShutdownSignal {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn send(&self) {
        self.inner.set.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    pub(crate) fn is_set(&self) -> bool {
        self.inner.set.load(Ordering::SeqCst)
    }

    pub(crate) async fn wait(&self) {
        loop {
            // Register before checking so a send between the check and the
            // await cannot be missed.
            let notified = self.inner.notify.notified();
            if self.is_set() {
                return;
            }
            notified.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn wait_resolves_after_send() {
        let signal = ShutdownSignal::new();
        let waiter = {
            let signal = signal.clone();
            tokio::spawn(async move { signal.wait().await })
        };
        signal.send();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should resolve")
            .unwrap();
    }

    #[tokio::test]
    async fn wait_resolves_when_already_sent() {
        let signal = ShutdownSignal::new();
        signal.send();
        tokio::time::timeout(Duration::from_secs(1), signal.wait())
            .await
            .expect("wait should resolve immediately");
        assert!(signal.is_set());
    }
}
