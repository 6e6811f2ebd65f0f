//! Out-of-band reporting for provider failures.

use crate::error::ProviderError;
use std::sync::Mutex;
use tracing::warn;

/// Receives provider failures that were swallowed during resolution.
///
/// Implementations must not panic or block.
pub trait ErrorSink: Send + Sync {
    fn report(&self, error: &ProviderError);
}

/// Logs provider failures through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingErrorSink;

impl ErrorSink for TracingErrorSink {
    fn report(&self, error: &ProviderError) {
        warn!(provider = error.provider(), "{}", error);
    }
}

/// Keeps every reported failure in memory.
#[derive(Debug, Default)]
pub struct CollectingErrorSink {
    errors: Mutex<Vec<ProviderError>>,
}

impl CollectingErrorSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the failures reported so far.
    pub fn errors(&self) -> Vec<ProviderError> {
        self.errors
            .lock()
            .map(|e| e.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn len(&self) -> usize {
        self.errors().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ErrorSink for CollectingErrorSink {
    fn report(&self, error: &ProviderError) {
        let mut errors = self.errors.lock().unwrap_or_else(|e| e.into_inner());
        errors.push(error.clone());
    }
}

/// Forwards every failure to each inner sink in turn.
pub struct FanoutErrorSink {
    sinks: Vec<std::sync::Arc<dyn ErrorSink>>,
}

impl FanoutErrorSink {
    pub fn new(sinks: Vec<std::sync::Arc<dyn ErrorSink>>) -> Self {
        Self { sinks }
    }
}

impl ErrorSink for FanoutErrorSink {
    fn report(&self, error: &ProviderError) {
        for sink in &self.sinks {
            sink.report(error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_collecting_sink() {
        let sink = CollectingErrorSink::new();
        assert!(sink.is_empty());

        sink.report(&ProviderError::failed("a", "boom"));
        sink.report(&ProviderError::failed("b", "bang"));

        let errors = sink.errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].provider(), "a");
        assert_eq!(errors[1].provider(), "b");
    }

    #[test]
    fn test_fanout_sink() {
        let first = Arc::new(CollectingErrorSink::new());
        let second = Arc::new(CollectingErrorSink::new());
        let sinks: Vec<Arc<dyn ErrorSink>> = vec![
            first.clone() as Arc<dyn ErrorSink>,
            second.clone() as Arc<dyn ErrorSink>,
            Arc::new(TracingErrorSink) as Arc<dyn ErrorSink>,
        ];
        let fanout = FanoutErrorSink::new(sinks);

        fanout.report(&ProviderError::failed("x", "oops"));

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
    }
}
