//! Subscription name to topic mapping
//!
//! Each incoming subscription gets its own fresh [Listener]; there is no per-client
//! filtering, every subscriber of a name sees every event on its topic.

use tracing::debug;

use crate::error::{ReviewError, ReviewResult};

use super::hub::{EventHub, Listener};
use super::topic::Topic;

/// Opens listeners for named subscriptions
pub struct SubscriptionRegistrar<T> {
    hub: EventHub<T>,
}

impl<T: Clone + Send + 'static> SubscriptionRegistrar<T> {
    pub fn new(hub: EventHub<T>) -> Self {
        Self { hub }
    }

    /// Open a listener for the subscription `name`
    pub fn open(&self, name: &str) -> ReviewResult<Listener<T>> {
        let topic = Topic::from_subscription_name(name)
            .ok_or_else(|| ReviewError::invalid(format!("unknown subscription: {name}")))?;
        let listener = self.hub.subscribe(topic);
        debug!(
            subscription = name,
            topic = %topic,
            listener_id = listener.id(),
            "Subscription opened"
        );
        Ok(listener)
    }
}
