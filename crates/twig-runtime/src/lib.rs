//! Application glue for Twig: a subscribable state store, a named event
//! bus and a hash router that renders through the reconciler.

mod bus;
mod router;
mod store;

pub use bus::{EventBus, HandlerId};
pub use router::{href, normalize_path, Router, View, NOT_FOUND_TEXT};
pub use store::{Store, Subscription};
