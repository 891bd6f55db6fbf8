//! Trailing-edge debounce on the virtual clock

/// Keeps only the latest call and releases it once `wait_ms` passed without another
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    wait_ms: u64,
    pending: Option<(u64, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(wait_ms: u64) -> Self {
        Self {
            wait_ms,
            pending: None,
        }
    }

    pub fn wait_ms(&self) -> u64 {
        self.wait_ms
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Record a call at `now`, replacing any earlier one; returns its deadline
    pub fn call(&mut self, now: u64, value: T) -> u64 {
        let deadline = now.saturating_add(self.wait_ms);
        self.pending = Some((deadline, value));
        deadline
    }

    /// Take the pending call if its deadline has passed
    pub fn poll(&mut self, now: u64) -> Option<T> {
        match self.pending {
            Some((deadline, _)) if deadline <= now => self.pending.take().map(|(_, v)| v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_call_is_released() {
        let mut debouncer = Debouncer::new(200);
        debouncer.call(0, "1");
        debouncer.call(150, "12");
        assert_eq!(debouncer.poll(200), None);
        assert_eq!(debouncer.poll(350), Some("12"));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(1000), None);
    }

    #[test]
    fn test_zero_wait_releases_immediately() {
        let mut debouncer = Debouncer::new(0);
        assert_eq!(debouncer.call(42, ()), 42);
        assert_eq!(debouncer.poll(42), Some(()));
    }
}
