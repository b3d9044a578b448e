use crate::utils::error::{DeckviewError, Result};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// AnkiConnect documents a hard ceiling of 5 concurrent requests;
/// exceeding it risks rejection or throttling.
pub const DEFAULT_CONCURRENT_REQUESTS: usize = 5;

/// Caps the number of in-flight remote calls. Waiters queue FIFO, so
/// freed slots are handed to callers in arrival order.
#[derive(Debug, Clone)]
pub struct RequestLimiter {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

impl RequestLimiter {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(DeckviewError::InvalidConfigValue {
                field: "concurrent_requests".to_string(),
                value: "0".to_string(),
                reason: "Concurrency cap must be at least 1".to_string(),
            });
        }
        Ok(Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    pub(crate) fn semaphore(&self) -> Arc<Semaphore> {
        Arc::clone(&self.semaphore)
    }
}
