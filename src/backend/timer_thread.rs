//! Thread-backed board timers.
//!
//! Each timer owns a worker thread that waits on a cancellation channel with
//! `recv_timeout`. Dropping the handle disconnects the channel, which stops
//! the worker on its next wake-up. Handles never join on drop, so a timer's
//! own callback may drop it.

use super::{BackendError, Callback};
use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use log::debug;
use std::thread;
use std::time::Duration;

/// Periodic timer running a callback every `period`
#[derive(Debug)]
pub struct ThreadTicker {
    _cancel: Sender<()>,
    period: Duration,
}

impl ThreadTicker {
    /// Spawn a ticker thread
    pub fn spawn(name: &str, period: Duration, callback: Callback) -> Result<Self, BackendError> {
        if period.is_zero() {
            return Err(BackendError::Timer("ticker period must be non-zero".into()));
        }

        let (cancel, cancelled) = bounded::<()>(1);
        let thread_name = name.to_string();

        thread::Builder::new()
            .name(thread_name.clone())
            .spawn(move || {
                debug!("Ticker '{}' started ({:?})", thread_name, period);
                loop {
                    match cancelled.recv_timeout(period) {
                        Err(RecvTimeoutError::Timeout) => callback(),
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                debug!("Ticker '{}' stopped", thread_name);
            })
            .map_err(|e| BackendError::Timer(format!("failed to spawn ticker: {}", e)))?;

        Ok(Self { _cancel: cancel, period })
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Stop the ticker
    pub fn cancel(self) {
        drop(self);
    }
}

/// One-shot timer running a callback once after `delay`
#[derive(Debug)]
pub struct ThreadTimeout {
    _cancel: Sender<()>,
}

impl ThreadTimeout {
    /// Spawn a timeout thread
    pub fn spawn(name: &str, delay: Duration, callback: Callback) -> Result<Self, BackendError> {
        let (cancel, cancelled) = bounded::<()>(1);
        let thread_name = name.to_string();

        thread::Builder::new()
            .name(thread_name.clone())
            .spawn(move || match cancelled.recv_timeout(delay) {
                Err(RecvTimeoutError::Timeout) => {
                    debug!("Timeout '{}' fired after {:?}", thread_name, delay);
                    callback();
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                    debug!("Timeout '{}' cancelled", thread_name);
                }
            })
            .map_err(|e| BackendError::Timer(format!("failed to spawn timeout: {}", e)))?;

        Ok(Self { _cancel: cancel })
    }

    /// Cancel the timeout if it has not fired yet
    pub fn cancel(self) {
        drop(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counter() -> (Arc<AtomicUsize>, Callback) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let callback: Callback = Arc::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        (count, callback)
    }

    #[test]
    fn ticker_runs_until_cancelled() {
        let (count, callback) = counter();
        let ticker = ThreadTicker::spawn("test-ticker", Duration::from_millis(5), callback).unwrap();

        thread::sleep(Duration::from_millis(100));
        ticker.cancel();
        let after_cancel = count.load(Ordering::SeqCst);
        assert!(after_cancel > 0);

        thread::sleep(Duration::from_millis(50));
        // At most one tick can race with the cancel
        assert!(count.load(Ordering::SeqCst) <= after_cancel + 1);
    }

    #[test]
    fn ticker_rejects_zero_period() {
        let (_, callback) = counter();
        assert!(ThreadTicker::spawn("zero", Duration::ZERO, callback).is_err());
    }

    #[test]
    fn timeout_fires_once() {
        let (count, callback) = counter();
        let _timeout = ThreadTimeout::spawn("test-timeout", Duration::from_millis(10), callback).unwrap();

        thread::sleep(Duration::from_millis(100));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn cancelled_timeout_never_fires() {
        let (count, callback) = counter();
        let timeout = ThreadTimeout::spawn("cancel-timeout", Duration::from_millis(200), callback).unwrap();
        timeout.cancel();

        thread::sleep(Duration::from_millis(300));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
