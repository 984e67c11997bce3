//! Single-flight guard for service calls

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared "operation in flight" flag
///
/// At most one [`BusyToken`] exists per flag at a time. Clones share the
/// same flag.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag {
    busy: Arc<AtomicBool>,
}

impl BusyFlag {
    /// Create an idle flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the flag, or `None` if a token is already out
    pub fn try_acquire(&self) -> Option<BusyToken> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyToken {
                busy: Arc::clone(&self.busy),
            })
    }

    /// Whether a token is currently alive
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Proof that the holder owns the flag; releases it on drop
#[derive(Debug)]
pub struct BusyToken {
    busy: Arc<AtomicBool>,
}

impl Drop for BusyToken {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_token() {
        let flag = BusyFlag::new();
        assert!(!flag.is_busy());

        let token = flag.try_acquire().unwrap();
        assert!(flag.is_busy());
        assert!(flag.try_acquire().is_none());
        assert!(flag.clone().try_acquire().is_none());

        drop(token);
        assert!(!flag.is_busy());
        assert!(flag.try_acquire().is_some());
    }

    #[test]
    fn test_independent_flags() {
        let a = BusyFlag::new();
        let b = BusyFlag::new();
        let _token = a.try_acquire().unwrap();
        assert!(b.try_acquire().is_some());
    }
}
