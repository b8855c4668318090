//! Topic-keyed publish/subscribe hub.
//!
//! Every [Listener] owns an unbounded queue; the hub keeps the sending half of each queue
//! in registration order per topic. [EventHub::publish] pushes into those queues while
//! holding the hub lock, so all listeners of a topic observe events in the same order and
//! a publish never waits on a slow consumer.
//!
//! Listeners only see events published after they subscribed. Dropping a listener (for
//! example when a WebSocket client disconnects) unregisters it.

use std::collections::HashMap;
use std::fmt;
use std::pin::Pin;
use std::sync::{Arc, Weak};
use std::task::{Context, Poll};

use futures::Stream;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, trace};

use super::topic::Topic;

/// An event delivered to listeners
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event<T> {
    pub topic: Topic,
    /// Position of this event within its topic, starting at 1
    pub sequence: u64,
    pub payload: T,
}

struct Registration<T> {
    id: u64,
    tx: mpsc::UnboundedSender<Event<T>>,
}

struct TopicState<T> {
    sequence: u64,
    listeners: Vec<Registration<T>>,
}

impl<T> Default for TopicState<T> {
    fn default() -> Self {
        Self {
            sequence: 0,
            listeners: Vec::new(),
        }
    }
}

struct HubState<T> {
    topics: HashMap<Topic, TopicState<T>>,
    next_listener_id: u64,
    closed: bool,
}

impl<T> Default for HubState<T> {
    fn default() -> Self {
        Self {
            topics: HashMap::new(),
            next_listener_id: 1,
            closed: false,
        }
    }
}

impl<T> HubState<T> {
    fn detach(&mut self, topic: Topic, id: u64) -> bool {
        let Some(state) = self.topics.get_mut(&topic) else {
            return false;
        };
        let before = state.listeners.len();
        state.listeners.retain(|r| r.id != id);
        before != state.listeners.len()
    }
}

/// Process-wide broadcaster keyed by [Topic]. Clones share the same registrations.
pub struct EventHub<T> {
    state: Arc<Mutex<HubState<T>>>,
}

impl<T> Clone for EventHub<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T> Default for EventHub<T> {
    fn default() -> Self {
        Self {
            state: Arc::new(Mutex::new(HubState::default())),
        }
    }
}

impl<T: Clone + Send + 'static> EventHub<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `payload` to every listener currently registered on `topic`.
    ///
    /// A `None` payload is skipped without error. Returns the number of listeners the
    /// event was queued for.
    pub fn publish(&self, topic: Topic, payload: Option<T>) -> usize {
        let Some(payload) = payload else {
            trace!(topic = %topic, "Skipping publish of empty payload");
            return 0;
        };

        let mut state = self.state.lock();
        if state.closed {
            return 0;
        }
        let topic_state = state.topics.entry(topic).or_default();
        topic_state.sequence += 1;
        let sequence = topic_state.sequence;

        // Receivers that went away without unsubscribing are pruned here.
        topic_state.listeners.retain(|r| {
            r.tx
                .send(Event {
                    topic,
                    sequence,
                    payload: payload.clone(),
                })
                .is_ok()
        });

        let delivered = topic_state.listeners.len();
        trace!(topic = %topic, sequence, delivered, "Event published");
        delivered
    }

    /// Register a new listener on `topic`. It starts empty; nothing published earlier is
    /// replayed.
    pub fn subscribe(&self, topic: Topic) -> Listener<T> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = self.state.lock();
        let id = state.next_listener_id;
        state.next_listener_id += 1;

        if state.closed {
            // Sender dropped here, so the listener terminates on first poll.
            debug!(topic = %topic, listener_id = id, "Subscribe after shutdown");
        } else {
            state
                .topics
                .entry(topic)
                .or_default()
                .listeners
                .push(Registration { id, tx });
            debug!(topic = %topic, listener_id = id, "Listener subscribed");
        }

        Listener {
            id,
            topic,
            rx,
            hub: Arc::downgrade(&self.state),
            closed: false,
        }
    }

    /// Remove `listener` from its topic. Its stream ends and any events still buffered for
    /// it are dropped. Returns `false` if it was already detached or was opened on a
    /// different hub, which is left untouched.
    pub fn unsubscribe(&self, listener: &mut Listener<T>) -> bool {
        if !Weak::ptr_eq(&listener.hub, &Arc::downgrade(&self.state)) {
            return false;
        }
        listener.close()
    }

    /// Number of listeners registered on `topic`
    pub fn listener_count(&self, topic: Topic) -> usize {
        self.state
            .lock()
            .topics
            .get(&topic)
            .map(|t| t.listeners.len())
            .unwrap_or(0)
    }

    /// Drop every registration and refuse new ones. Open listener streams end once their
    /// buffered events are consumed.
    pub fn shutdown(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        let listeners: usize = state.topics.values().map(|t| t.listeners.len()).sum();
        state.topics.clear();
        debug!(listeners, "Event hub shut down");
    }
}

/// One subscriber's view of a topic: a lazy, unbounded sequence of [Event]s.
pub struct Listener<T> {
    id: u64,
    topic: Topic,
    rx: mpsc::UnboundedReceiver<Event<T>>,
    hub: Weak<Mutex<HubState<T>>>,
    closed: bool,
}

impl<T> Listener<T> {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn topic(&self) -> Topic {
        self.topic
    }

    /// Wait for the next event. Returns `None` once the listener is closed or the hub has
    /// shut down.
    pub async fn recv(&mut self) -> Option<Event<T>> {
        if self.closed {
            return None;
        }
        self.rx.recv().await
    }

    /// Take the next buffered event without waiting
    pub fn try_recv(&mut self) -> Option<Event<T>> {
        if self.closed {
            return None;
        }
        self.rx.try_recv().ok()
    }

    /// Unregister from the hub. Buffered events are discarded.
    pub fn close(&mut self) -> bool {
        if self.closed {
            return false;
        }
        self.closed = true;
        self.rx.close();
        let detached = match self.hub.upgrade() {
            Some(state) => state.lock().detach(self.topic, self.id),
            None => false,
        };
        if detached {
            debug!(topic = %self.topic, listener_id = self.id, "Listener unsubscribed");
        }
        detached
    }
}

impl<T> fmt::Debug for Listener<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("id", &self.id)
            .field("topic", &self.topic)
            .field("closed", &self.closed)
            .finish()
    }
}

impl<T> Drop for Listener<T> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<T> Stream for Listener<T> {
    type Item = Event<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.closed {
            return Poll::Ready(None);
        }
        this.rx.poll_recv(cx)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures::StreamExt;
    use pretty_assertions::assert_eq;
    use tokio_test::{assert_pending, assert_ready};

    use super::*;

    fn payloads(listener: &mut Listener<&'static str>) -> Vec<&'static str> {
        std::iter::from_fn(|| listener.try_recv())
            .map(|e| e.payload)
            .collect()
    }

    #[test]
    fn test_publish_reaches_all_listeners_in_order() {
        let hub = EventHub::new();
        let mut a = hub.subscribe(Topic::BookReviewAdded);
        let mut b = hub.subscribe(Topic::BookReviewAdded);

        assert_eq!(hub.publish(Topic::BookReviewAdded, Some("p1")), 2);
        assert_eq!(hub.publish(Topic::BookReviewAdded, Some("p2")), 2);

        assert_eq!(payloads(&mut a), vec!["p1", "p2"]);
        assert_eq!(payloads(&mut b), vec!["p1", "p2"]);
    }

    #[test]
    fn test_late_listener_sees_only_later_events() {
        let hub = EventHub::new();
        let mut early = hub.subscribe(Topic::BookReviewAdded);
        hub.publish(Topic::BookReviewAdded, Some("p1"));
        let mut late = hub.subscribe(Topic::BookReviewAdded);
        hub.publish(Topic::BookReviewAdded, Some("p2"));

        assert_eq!(payloads(&mut early), vec!["p1", "p2"]);
        assert_eq!(payloads(&mut late), vec!["p2"]);
    }

    #[test]
    fn test_sequence_is_shared_by_all_listeners_of_a_topic() {
        let hub = EventHub::new();
        let mut a = hub.subscribe(Topic::AuthorReviewUpdated);
        hub.publish(Topic::AuthorReviewUpdated, Some("p1"));
        let mut b = hub.subscribe(Topic::AuthorReviewUpdated);
        hub.publish(Topic::AuthorReviewUpdated, Some("p2"));

        assert_eq!(a.try_recv().map(|e| e.sequence), Some(1));
        assert_eq!(a.try_recv().map(|e| e.sequence), Some(2));
        assert_eq!(b.try_recv().map(|e| e.sequence), Some(2));
    }

    #[test]
    fn test_none_payload_is_not_published() {
        let hub: EventHub<&'static str> = EventHub::new();
        let mut l = hub.subscribe(Topic::BookReviewDeleted);
        assert_eq!(hub.publish(Topic::BookReviewDeleted, None), 0);
        assert!(l.try_recv().is_none());
        hub.publish(Topic::BookReviewDeleted, Some("gone"));
        assert_eq!(l.try_recv().map(|e| e.sequence), Some(1));
    }

    #[test]
    fn test_topics_are_independent() {
        let hub = EventHub::new();
        let mut added = hub.subscribe(Topic::BookReviewAdded);
        let mut deleted = hub.subscribe(Topic::AuthorReviewDeleted);

        hub.publish(Topic::BookReviewAdded, Some("a"));

        assert_eq!(payloads(&mut added), vec!["a"]);
        assert!(payloads(&mut deleted).is_empty());
    }

    #[test]
    fn test_unsubscribe_stops_delivery_and_drops_buffer() {
        let hub = EventHub::new();
        let mut l = hub.subscribe(Topic::BookReviewAdded);
        hub.publish(Topic::BookReviewAdded, Some("buffered"));

        assert!(hub.unsubscribe(&mut l));
        assert!(!hub.unsubscribe(&mut l));
        assert_eq!(hub.listener_count(Topic::BookReviewAdded), 0);

        assert_eq!(hub.publish(Topic::BookReviewAdded, Some("after")), 0);
        assert!(l.try_recv().is_none());
    }

    #[test]
    fn test_listener_is_unpin_without_pinning() {
        fn assert_unpin<U: Unpin>() {}
        assert_unpin::<Listener<String>>();
        assert_unpin::<Listener<std::marker::PhantomPinned>>();
    }

    #[test]
    fn test_unsubscribe_ignores_listener_of_another_hub() {
        let hub = EventHub::new();
        let other: EventHub<&'static str> = EventHub::new();
        let mut l = hub.subscribe(Topic::BookReviewAdded);

        assert!(!other.unsubscribe(&mut l));
        assert_eq!(hub.listener_count(Topic::BookReviewAdded), 1);

        hub.publish(Topic::BookReviewAdded, Some("still here"));
        assert_eq!(payloads(&mut l), vec!["still here"]);
        assert!(hub.unsubscribe(&mut l));
    }

    #[test]
    fn test_dropping_listener_unregisters_it() {
        let hub: EventHub<&'static str> = EventHub::new();
        let l = hub.subscribe(Topic::BookReviewAdded);
        let _other = hub.subscribe(Topic::BookReviewAdded);
        assert_eq!(hub.listener_count(Topic::BookReviewAdded), 2);
        drop(l);
        assert_eq!(hub.listener_count(Topic::BookReviewAdded), 1);
    }

    #[tokio::test]
    async fn test_stream_waits_for_next_event() {
        let hub = EventHub::new();
        let mut l = hub.subscribe(Topic::BookReviewUpdated);

        let publisher = hub.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            publisher.publish(Topic::BookReviewUpdated, Some("late"));
        });

        let event = tokio::time::timeout(Duration::from_secs(2), l.next())
            .await
            .expect("listener should wake up")
            .expect("stream should still be open");
        assert_eq!(event.payload, "late");
        assert_eq!(event.topic, Topic::BookReviewUpdated);
    }

    #[test]
    fn test_listener_is_woken_by_publish() {
        let hub = EventHub::new();
        let mut l = hub.subscribe(Topic::BookReviewAdded);
        let mut next = tokio_test::task::spawn(l.next());

        assert_pending!(next.poll());
        hub.publish(Topic::BookReviewAdded, Some("wake"));
        assert!(next.is_woken());

        let event = assert_ready!(next.poll()).expect("event");
        assert_eq!(event.payload, "wake");
    }

    #[tokio::test]
    async fn test_closed_stream_ends() {
        let hub: EventHub<&'static str> = EventHub::new();
        let mut l = hub.subscribe(Topic::BookReviewUpdated);
        l.close();
        assert!(l.next().await.is_none());
        assert!(l.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_shutdown_ends_open_streams() {
        let hub: EventHub<&'static str> = EventHub::new();
        let mut l = hub.subscribe(Topic::AuthorReviewAdded);
        hub.shutdown();

        assert!(l.recv().await.is_none());
        assert_eq!(hub.publish(Topic::AuthorReviewAdded, Some("x")), 0);

        let mut after = hub.subscribe(Topic::AuthorReviewAdded);
        assert!(after.recv().await.is_none());
    }
}
