//! Cooperative cancellation.
//!
//! The token is threaded into every provider call. The aggregator never
//! checks it; providers decide whether and when to stop early.

use std::sync::Arc;
use tokio::sync::watch;

/// A cloneable, cooperative cancellation signal.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    inner: Option<Arc<watch::Sender<bool>>>,
}

/// Owner side of a token. Dropping the source does not cancel.
#[derive(Debug)]
pub struct CancellationSource {
    sender: Arc<watch::Sender<bool>>,
}

impl CancellationToken {
    /// A token that can never be cancelled.
    pub fn none() -> Self {
        Self { inner: None }
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.inner.as_ref().is_some_and(|tx| *tx.borrow())
    }

    /// Resolves once cancellation is requested; pends forever for `none()`.
    pub async fn cancelled(&self) {
        let Some(sender) = &self.inner else {
            return std::future::pending().await;
        };
        let mut rx = sender.subscribe();
        // The sender lives inside this token, so the channel cannot close.
        let closed = rx.wait_for(|cancelled| *cancelled).await.is_err();
        if closed {
            std::future::pending::<()>().await;
        }
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::none()
    }
}

impl CancellationSource {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Returns a token observing this source.
    pub fn token(&self) -> CancellationToken {
        CancellationToken {
            inner: Some(Arc::clone(&self.sender)),
        }
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }
}

impl Default for CancellationSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_none_is_never_cancelled() {
        assert!(!CancellationToken::none().is_cancelled());
        assert!(!CancellationToken::default().is_cancelled());
    }

    #[test]
    fn test_cancel_is_observed_by_all_tokens() {
        let source = CancellationSource::new();
        let a = source.token();
        let b = a.clone();
        assert!(!a.is_cancelled());

        source.cancel();
        source.cancel();
        assert!(a.is_cancelled());
        assert!(b.is_cancelled());
    }

    #[tokio::test]
    async fn test_cancelled_future_wakes() {
        let source = CancellationSource::new();
        let token = source.token();

        let waiter = tokio::spawn(async move { token.cancelled().await });
        tokio::time::sleep(Duration::from_millis(10)).await;
        source.cancel();

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("cancelled() should resolve after cancel")
            .unwrap();
    }

    #[tokio::test]
    async fn test_none_token_pends() {
        let token = CancellationToken::none();
        let result = tokio::time::timeout(Duration::from_millis(20), token.cancelled()).await;
        assert!(result.is_err());
    }
}
