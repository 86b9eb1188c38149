use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable stop handle shared between the loop and its controller.
///
/// Cancellation is cooperative: the loop polls the flag at the top of
/// each iteration, so at most one extra frame may complete after a
/// stop request.
#[derive(Clone, Debug, Default)]
pub struct StopFlag {
    inner: Arc<AtomicBool>,
}

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_stop(&self) {
        self.inner.store(true, Ordering::Relaxed);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.inner.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_unset() {
        assert!(!StopFlag::new().is_stop_requested());
    }

    #[test]
    fn test_request_is_visible_through_clones() {
        let flag = StopFlag::new();
        let handle = flag.clone();
        handle.request_stop();
        assert!(flag.is_stop_requested());
    }
}
