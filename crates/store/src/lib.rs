//! # Screenplay Store
//!
//! Persistence layer for the screenplay model: one durable JSON file per
//! entity kind, an order-preserving in-memory cache, and a synchronous
//! change-event feed.
//!
//! Every mutating operation validates, writes the kind's whole
//! collection via temp-file-plus-rename, and only then notifies
//! subscribers, so a change event always describes state that is already
//! durable.

mod bus;
mod collection;
mod store;

pub use bus::{EventBus, SubscriptionId};
pub use collection::Collection;
pub use store::{ModelStore, Stored};
