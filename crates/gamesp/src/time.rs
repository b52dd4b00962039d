//! Millisecond clock abstraction

/// Monotonic millisecond clock.
///
/// Implemented by the board layer over whatever tick source it has; tests
/// substitute a hand-advanced fake. Readings only ever move forward.
pub trait Clock {
    /// Milliseconds since an arbitrary epoch.
    fn now_ms(&self) -> u64;
}

impl<C: Clock> Clock for &C {
    fn now_ms(&self) -> u64 {
        (*self).now_ms()
    }
}
