//! Mutation notifications: topics, the publish/subscribe hub and the subscription registrar

pub mod hub;
pub mod registrar;
pub mod topic;

pub use hub::{Event, EventHub, Listener};
pub use registrar::SubscriptionRegistrar;
pub use topic::{ReviewChange, Topic};

use crate::db::ReviewRecord;

/// Hub carrying review records
pub type ReviewEventHub = EventHub<ReviewRecord>;

/// Registrar handing out review listeners to GraphQL subscriptions
pub type ReviewRegistrar = SubscriptionRegistrar<ReviewRecord>;
