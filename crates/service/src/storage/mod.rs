//! Storage abstractions for service layer
//!
//! Holds the generic in-memory collection engine shared by every resource
//! shape, so users and products run through one implementation.

pub mod resource_store;

/// First identifier handed out by a fresh collection.
pub const FIRST_ID: i64 = 104;
