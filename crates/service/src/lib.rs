//! Service layer holding the in-memory resource collections.
//! - `storage` is the generic collection engine (ids, locking, CRUD contract).
//! - `resources` defines the record shapes it is instantiated with.
//! - `seed` provides the demo records loaded at startup.

pub mod errors;
pub mod resources;
pub mod seed;
pub mod storage;

pub use errors::ServiceError;
pub use resources::{product::Product, user::User, Resource};
pub use storage::resource_store::ResourceStore;
