//! Single-slot admission gate for upstream API calls.
//!
//! Every request made through one [`GitHubClient`](crate::github::GitHubClient)
//! passes through its gate, so at most one call against the shared credential
//! is in flight at any time. Waiters are admitted in FIFO order.

use std::future::Future;
use std::time::Duration;

use tokio::sync::{Semaphore, SemaphorePermit};
use tokio_util::sync::CancellationToken;

use crate::error::{GetReleaseError, Result};

#[derive(Debug)]
pub struct ConcurrencyGate {
    slot: Semaphore,
}

/// Proof of holding the gate. The slot is handed back when this is dropped,
/// whether the guarded call succeeded, failed or was abandoned.
#[derive(Debug)]
pub struct GatePermit<'a> {
    _permit: SemaphorePermit<'a>,
}

impl Default for ConcurrencyGate {
    fn default() -> Self {
        Self::new()
    }
}

impl ConcurrencyGate {
    pub fn new() -> Self {
        Self {
            slot: Semaphore::new(1),
        }
    }

    /// Wait for the slot, giving up as soon as `cancel` fires.
    ///
    /// An already-cancelled token never takes the slot, even if it is free.
    pub async fn acquire(&self, cancel: &CancellationToken) -> Result<GatePermit<'_>> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::warn!("Cancelled while waiting for the upstream slot");
                Err(GetReleaseError::Cancelled)
            }
            permit = self.slot.acquire() => {
                // The semaphore is never closed.
                let permit = permit.map_err(|_| GetReleaseError::Cancelled)?;
                Ok(GatePermit { _permit: permit })
            }
        }
    }

    /// Run `call` while holding the slot. Cancellation is honoured both while
    /// waiting for the slot and while `call` is outstanding.
    pub async fn run<F, T>(&self, cancel: &CancellationToken, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let _permit = self.acquire(cancel).await?;
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::warn!("Cancelled while an upstream call was in flight");
                Err(GetReleaseError::Cancelled)
            }
            result = call => result,
        }
    }

    /// Whether nobody currently holds the slot.
    pub fn is_idle(&self) -> bool {
        self.slot.available_permits() == 1
    }
}

/// Build a token that cancels itself once `timeout` has elapsed.
///
/// A zero timeout yields a token that is already cancelled. Must be called
/// from within a tokio runtime.
pub fn deadline_token(timeout: Duration) -> CancellationToken {
    let token = CancellationToken::new();
    if timeout.is_zero() {
        token.cancel();
        return token;
    }

    let timer = token.clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = tokio::time::sleep(timeout) => timer.cancel(),
            _ = timer.cancelled() => {}
        }
    });
    token
}
