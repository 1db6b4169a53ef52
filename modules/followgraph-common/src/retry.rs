use std::time::Duration;

/// Decides what happens after a failed attempt of a retryable operation.
///
/// `attempt` is the number of failures so far (starting at 1). Returning
/// `Some(delay)` means wait that long (possibly zero) and try again;
/// `None` means give up and surface the error.
pub trait RetryPolicy: Send + Sync {
    fn next_delay(&self, attempt: u32) -> Option<Duration>;
}

/// Retry immediately, forever, with no backoff.
///
/// This is the production policy for unclassified transient faults: the
/// only thing that terminates the loop is the lifecycle closing. Starving
/// on a permanently broken dependency is an accepted trade-off; the
/// process owner resolves it by shutting down.
pub struct RetryForever;

impl RetryPolicy for RetryForever {
    fn next_delay(&self, _attempt: u32) -> Option<Duration> {
        Some(Duration::ZERO)
    }
}

/// Retry forever with a fixed pause between attempts.
pub struct FixedDelay(pub Duration);

impl RetryPolicy for FixedDelay {
    fn next_delay(&self, _attempt: u32) -> Option<Duration> {
        Some(self.0)
    }
}

/// Stop retrying after a fixed number of failures. Test policy: lets a
/// retry loop be observed without running unbounded.
pub struct GiveUpAfter(pub u32);

impl RetryPolicy for GiveUpAfter {
    fn next_delay(&self, attempt: u32) -> Option<Duration> {
        if attempt < self.0 {
            Some(Duration::ZERO)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_forever_never_gives_up() {
        assert_eq!(RetryForever.next_delay(1), Some(Duration::ZERO));
        assert_eq!(RetryForever.next_delay(u32::MAX), Some(Duration::ZERO));
    }

    #[test]
    fn give_up_after_limits_attempts() {
        let policy = GiveUpAfter(3);
        assert_eq!(policy.next_delay(1), Some(Duration::ZERO));
        assert_eq!(policy.next_delay(2), Some(Duration::ZERO));
        assert_eq!(policy.next_delay(3), None);
    }
}
