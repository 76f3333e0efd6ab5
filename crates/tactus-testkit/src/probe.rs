//! Settlement capture.

use parking_lot::Mutex;
use std::sync::Arc;

/// Captures every settlement delivered to a binding's callback.
#[derive(Debug)]
pub struct SettlementProbe<R> {
    settled: Arc<Mutex<Vec<Option<R>>>>,
}

impl<R> Default for SettlementProbe<R> {
    fn default() -> Self {
        Self {
            settled: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<R: Send + 'static> SettlementProbe<R> {
    /// Create an empty probe.
    pub fn new() -> Self {
        Self::default()
    }

    /// A settlement callback feeding this probe. Suitable for
    /// `ClickBinding::on_settled` or a bare `SettleFn`.
    pub fn hook(&self) -> impl Fn(Option<R>) + Send + Sync + 'static {
        let settled = Arc::clone(&self.settled);
        move |result| settled.lock().push(result)
    }

    /// How many settlements have been captured.
    pub fn count(&self) -> usize {
        self.settled.lock().len()
    }
}

impl<R: Clone + Send + 'static> SettlementProbe<R> {
    /// All captured results, in settlement order.
    pub fn results(&self) -> Vec<Option<R>> {
        self.settled.lock().clone()
    }

    /// The most recent result, if any settlement happened.
    pub fn last(&self) -> Option<Option<R>> {
        self.settled.lock().last().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captures_in_order() {
        let probe: SettlementProbe<u32> = SettlementProbe::new();
        let hook = probe.hook();
        hook(Some(1));
        hook(None);
        assert_eq!(probe.count(), 2);
        assert_eq!(probe.results(), vec![Some(1), None]);
        assert_eq!(probe.last(), Some(None));
    }
}
