//! Debouncing for free-text filter edits bound for a remote collaborator.
//!
//! Every submission waits out the window; only the submission that is still
//! the newest when its window closes fires.

use log::debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebounceOutcome<T> {
    Fire(T),
    Superseded,
}

#[derive(Clone)]
pub struct TextFilterDebouncer {
    window: Duration,
    generation: Arc<AtomicU64>,
}

impl TextFilterDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn submit<T>(&self, value: T) -> DebounceOutcome<T> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.window).await;

        if self.generation.load(Ordering::SeqCst) == ticket {
            DebounceOutcome::Fire(value)
        } else {
            debug!("⌨️ DEBOUNCE: Edit {} superseded", ticket);
            DebounceOutcome::Superseded
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_single_edit_fires() {
        let debouncer = TextFilterDebouncer::new(Duration::from_millis(10));
        assert_eq!(debouncer.submit("pad").await, DebounceOutcome::Fire("pad"));
    }

    #[tokio::test]
    async fn test_rapid_edits_coalesce_to_last() {
        let debouncer = TextFilterDebouncer::new(Duration::from_millis(100));
        let mut handles = Vec::new();

        for text in ["p", "pa", "pad"] {
            let debouncer = debouncer.clone();
            handles.push(tokio::spawn(async move { debouncer.submit(text.to_string()).await }));
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        let mut outcomes = Vec::new();
        for handle in handles {
            outcomes.push(handle.await.unwrap());
        }

        assert_eq!(
            outcomes,
            vec![
                DebounceOutcome::Superseded,
                DebounceOutcome::Superseded,
                DebounceOutcome::Fire("pad".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_edits_outside_window_both_fire() {
        let debouncer = TextFilterDebouncer::new(Duration::from_millis(10));
        assert_eq!(debouncer.submit(1).await, DebounceOutcome::Fire(1));
        assert_eq!(debouncer.submit(2).await, DebounceOutcome::Fire(2));
    }
}
