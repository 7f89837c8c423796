//! Query engine over the loaded note collection.
//!
//! # Responsibility
//! - Filter notes by case-insensitive substring over title and body.
//! - Order the filtered notes by one of the supported sort orders.
//!
//! # Invariants
//! - Queries are pure: input collections are never mutated.
//! - Unknown sort values keep persisted order.

pub mod engine;
