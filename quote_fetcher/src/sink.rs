//! Owned result state and change notification.
//!
//! `ResultSink` holds the latest quote batch and the latest load error. Observers
//! either poll with [`ResultSink::snapshot`] or call [`ResultSink::subscribe`] and get
//! a `SinkEvent` on every change. Each subscriber owns its own unbounded
//! `crossbeam_channel`; a subscriber whose receiver was dropped is removed on the
//! next notification.
//!
//! State and subscriber list share one mutex, so events reach every subscriber in the
//! same order the state changed.
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::debug;
use quote_common::QuoteBatch;
use serde::Serialize;

/// Point-in-time copy of the sink state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SinkSnapshot {
    /// Latest delivered batch; empty until the first delivery.
    pub quotes: QuoteBatch,
    /// Latest load error message, if the most recent load failed.
    pub error: Option<String>,
    /// When `quotes` was last replaced.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Change notification sent to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    /// A batch replaced the previous one.
    BatchDelivered(SinkSnapshot),
    /// The error message was set or cleared.
    ErrorChanged(Option<String>),
}

#[derive(Default)]
struct Inner {
    state: SinkSnapshot,
    subscribers: Vec<Sender<SinkEvent>>,
}

impl Inner {
    fn notify(&mut self, event: SinkEvent) {
        let before = self.subscribers.len();
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        let gone = before - self.subscribers.len();
        if gone > 0 {
            debug!("Removed {} disconnected sink subscribers", gone);
        }
    }
}

/// Latest batch and error, written by the pipeline and read by observers.
#[derive(Default)]
pub struct ResultSink {
    inner: Mutex<Inner>,
}

impl ResultSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers an observer. Only changes after this call are sent.
    pub fn subscribe(&self) -> Receiver<SinkEvent> {
        let (tx, rx) = unbounded();
        self.lock().subscribers.push(tx);
        rx
    }

    /// Copies the current batch and error.
    pub fn snapshot(&self) -> SinkSnapshot {
        self.lock().state.clone()
    }

    /// Replaces the current batch. An empty batch is a normal delivery.
    pub fn publish_batch(&self, quotes: QuoteBatch) {
        let mut inner = self.lock();
        inner.state.quotes = quotes;
        inner.state.updated_at = Some(Utc::now());
        let event = SinkEvent::BatchDelivered(inner.state.clone());
        inner.notify(event);
    }

    /// Sets the error message; the current batch is left as it was.
    pub fn publish_error(&self, message: impl Into<String>) {
        let mut inner = self.lock();
        let message = Some(message.into());
        inner.state.error = message.clone();
        inner.notify(SinkEvent::ErrorChanged(message));
    }

    /// Clears the error message. Does nothing if none is set.
    pub fn clear_error(&self) {
        let mut inner = self.lock();
        if inner.state.error.take().is_some() {
            inner.notify(SinkEvent::ErrorChanged(None));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::dec;
    use quote_common::{Quote, Symbol};

    fn quote(symbol: &str, price: &str) -> Quote {
        Quote::new(Symbol::new(symbol), dec(price)).unwrap()
    }

    #[test]
    fn starts_empty() {
        let sink = ResultSink::new();
        assert_eq!(sink.snapshot(), SinkSnapshot::default());
    }

    #[test]
    fn batch_replaces_previous_batch() {
        let sink = ResultSink::new();
        sink.publish_batch(vec![quote("AAPL", "150"), quote("MSFT", "300")]);
        sink.publish_batch(vec![quote("NVDA", "900")]);

        let snapshot = sink.snapshot();
        assert_eq!(snapshot.quotes, vec![quote("NVDA", "900")]);
        assert!(snapshot.updated_at.is_some());
        assert!(snapshot.error.is_none());
    }

    #[test]
    fn empty_batch_is_delivered_like_any_other() {
        let sink = ResultSink::new();
        let rx = sink.subscribe();
        sink.publish_batch(vec![quote("AAPL", "150")]);
        sink.publish_batch(Vec::new());

        assert!(matches!(rx.try_recv(), Ok(SinkEvent::BatchDelivered(_))));
        match rx.try_recv() {
            Ok(SinkEvent::BatchDelivered(snapshot)) => {
                assert!(snapshot.quotes.is_empty());
                assert!(snapshot.error.is_none());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn error_leaves_batch_untouched() {
        let sink = ResultSink::new();
        sink.publish_batch(vec![quote("AAPL", "150")]);
        sink.publish_error("Ticker file not found: tickers.json");

        let snapshot = sink.snapshot();
        assert_eq!(snapshot.quotes, vec![quote("AAPL", "150")]);
        assert_eq!(
            snapshot.error.as_deref(),
            Some("Ticker file not found: tickers.json")
        );
    }

    #[test]
    fn clear_error_notifies_only_on_change() {
        let sink = ResultSink::new();
        let rx = sink.subscribe();

        sink.clear_error();
        assert!(rx.try_recv().is_err());

        sink.publish_error("boom");
        sink.clear_error();
        assert_eq!(
            rx.try_recv().unwrap(),
            SinkEvent::ErrorChanged(Some("boom".to_string()))
        );
        assert_eq!(rx.try_recv().unwrap(), SinkEvent::ErrorChanged(None));
        assert!(sink.snapshot().error.is_none());
    }

    #[test]
    fn every_subscriber_sees_every_event() {
        let sink = ResultSink::new();
        let first = sink.subscribe();
        let second = sink.subscribe();

        sink.publish_batch(vec![quote("AAPL", "150")]);

        for rx in [&first, &second] {
            match rx.try_recv().unwrap() {
                SinkEvent::BatchDelivered(snapshot) => assert_eq!(snapshot.quotes.len(), 1),
                other => panic!("unexpected event: {other:?}"),
            }
        }
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let sink = ResultSink::new();
        let kept = sink.subscribe();
        drop(sink.subscribe());

        sink.publish_error("first");
        sink.publish_error("second");

        assert_eq!(sink.lock().subscribers.len(), 1);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn late_subscriber_gets_only_new_events() {
        let sink = ResultSink::new();
        sink.publish_error("old");
        let rx = sink.subscribe();
        assert!(rx.try_recv().is_err());
        assert_eq!(sink.snapshot().error.as_deref(), Some("old"));
    }
}
