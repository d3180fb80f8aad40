//! Feed store and the pure logic around it.
//!
//! # Responsibility
//! - Own the notification/message feed state behind one store type.
//! - Keep filtering, search and relative-time labels deterministic.
//! - Define the load boundary consumed from external data sources.

pub mod load;
pub mod relative_time;
pub mod search;
pub mod store;
pub mod tab;
