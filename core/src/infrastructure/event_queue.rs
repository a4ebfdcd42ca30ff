// Event Queue - bounded hand-off of adoption lifecycle events
//
// One queue is constructed at startup; the dispatcher half is handed to the
// request path and the receiver half to the notification worker. Delivery is
// best-effort and at-most-once: the request path never blocks or fails on a
// full queue, it just drops the event.

use crate::domain::events::AdoptionEvent;
use tokio::sync::mpsc;
use tracing::debug;

/// Default queue capacity, matching the buffer the worker was sized for.
pub const DEFAULT_CAPACITY: usize = 100;

/// Create a bounded queue, returning the producer and consumer halves.
pub fn bounded(capacity: usize) -> (EventDispatcher, mpsc::Receiver<AdoptionEvent>) {
    let (sender, receiver) = mpsc::channel(capacity);
    (EventDispatcher { sender }, receiver)
}

/// Create a queue with the default capacity.
pub fn with_default_capacity() -> (EventDispatcher, mpsc::Receiver<AdoptionEvent>) {
    bounded(DEFAULT_CAPACITY)
}

/// Producer half of the lifecycle event queue. Cheap to clone; every clone
/// feeds the same consumer.
#[derive(Clone)]
pub struct EventDispatcher {
    sender: mpsc::Sender<AdoptionEvent>,
}

impl EventDispatcher {
    /// Enqueue an event without blocking.
    ///
    /// A full queue drops the event silently (lossy-under-load by design);
    /// a missing consumer makes this a no-op. Neither case is an error and
    /// neither is visible to the caller.
    pub fn publish(&self, event: AdoptionEvent) {
        match self.sender.try_send(event) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(event)) => {
                debug!(request_id = ?event.request_id, "event queue full, dropping lifecycle event");
            }
            Err(mpsc::error::TrySendError::Closed(event)) => {
                debug!(request_id = ?event.request_id, "no notification consumer attached, dropping lifecycle event");
            }
        }
    }

    /// Dispatcher with no consumer; every publish is a silent no-op.
    /// Useful for tests and tooling that do not care about notifications.
    pub fn disconnected() -> Self {
        let (sender, _) = mpsc::channel(1);
        Self { sender }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::adoption::AdoptionRequest;
    use crate::domain::events::AdoptionEvent;
    use crate::domain::pet::PetId;
    use crate::domain::user::UserId;

    fn event() -> AdoptionEvent {
        let request = AdoptionRequest::new(UserId::new(), PetId::new(), None);
        AdoptionEvent::requested(&request)
    }

    #[tokio::test]
    async fn publishes_in_order_up_to_capacity() {
        let (dispatcher, mut receiver) = bounded(10);

        let events: Vec<AdoptionEvent> = (0..5).map(|_| event()).collect();
        for e in &events {
            dispatcher.publish(e.clone());
        }

        for expected in &events {
            let got = receiver.try_recv().unwrap();
            assert_eq!(got.request_id, expected.request_id);
        }
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn overflow_is_dropped_without_blocking() {
        let (dispatcher, mut receiver) = bounded(2);

        let first = event();
        let second = event();
        dispatcher.publish(first.clone());
        dispatcher.publish(second.clone());
        dispatcher.publish(event()); // over capacity, dropped

        assert_eq!(receiver.try_recv().unwrap().request_id, first.request_id);
        assert_eq!(receiver.try_recv().unwrap().request_id, second.request_id);
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn publish_without_consumer_is_a_no_op() {
        let dispatcher = EventDispatcher::disconnected();
        dispatcher.publish(event());

        let (dispatcher, receiver) = bounded(4);
        drop(receiver);
        dispatcher.publish(event());
    }
}
