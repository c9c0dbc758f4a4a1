//! Record identifier synthesis.
//!
//! Ids are a one-letter kind prefix followed by digits: the unix-millis
//! stamp and a two-digit random tie-breaker. Stamps handed out by one
//! generator strictly increase even when the wall clock stalls or steps back.

use rand::Rng;
use std::sync::atomic::{AtomicI64, Ordering};

/// Monotonic id generator shared by all collections of a store.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last_stamp: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next stamp: the current time in millis, or one past the previous
    /// stamp if the clock has not moved forward.
    fn next_stamp(&self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        let mut last = self.last_stamp.load(Ordering::SeqCst);
        loop {
            let next = now.max(last + 1);
            match self
                .last_stamp
                .compare_exchange(last, next, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return next,
                Err(actual) => last = actual,
            }
        }
    }

    /// Generate an id with the given prefix.
    pub fn next_id(&self, prefix: char) -> String {
        let stamp = self.next_stamp();
        let tie_breaker: u8 = rand::thread_rng().gen_range(0..100);
        format!("{}{}{:02}", prefix, stamp, tie_breaker)
    }
}
