//! Time source used for issuance and expiry checks

use std::sync::Arc;

use chrono::{DateTime, Utc};

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<C> Clock for Arc<C>
where
    C: Clock + ?Sized,
{
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

#[cfg(any(test, feature = "test-util"))]
pub use manual::ManualClock;

#[cfg(any(test, feature = "test-util"))]
mod manual {
    use std::sync::atomic::{AtomicI64, Ordering};

    use chrono::{DateTime, Duration, Utc};

    use super::Clock;

    /// A clock that only moves when told to
    ///
    /// Millisecond resolution. Share it through an `Arc` to advance time
    /// under a running service. Only built for tests and with the
    /// `test-util` feature.
    #[derive(Debug)]
    pub struct ManualClock {
        millis: AtomicI64,
    }

    impl ManualClock {
        pub fn new(start: DateTime<Utc>) -> Self {
            Self {
                millis: AtomicI64::new(start.timestamp_millis()),
            }
        }

        /// Starts at the current wall-clock time
        pub fn starting_now() -> Self {
            Self::new(Utc::now())
        }

        pub fn set(&self, now: DateTime<Utc>) {
            self.millis.store(now.timestamp_millis(), Ordering::SeqCst);
        }

        pub fn advance(&self, by: Duration) {
            self.millis.fetch_add(by.num_milliseconds(), Ordering::SeqCst);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            DateTime::from_timestamp_millis(self.millis.load(Ordering::SeqCst)).unwrap_or_default()
        }
    }
}
