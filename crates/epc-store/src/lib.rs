//! Tag Population Store
//!
//! This crate defines the persistence boundary between the simulation engine
//! and whatever owns the simulated tag population. The engine is a pure
//! consumer of the [`HardwareStore`] trait: it issues one read per inventory
//! round and one update per successful mutation, addressed by a session id.
//!
//! [`MemoryStore`] is the bundled in-memory implementation used by tests and
//! embedders that do not need their own backing store.
//!
//! # Example
//!
//! ```rust
//! use epc_store::{HardwareStore, MemoryStore, StoreEntities, StoreQuery};
//! use epc_tag::Tag;
//!
//! let mut store = MemoryStore::new();
//! store.create_session("default").unwrap();
//! store
//!     .update("default", StoreEntities::Tags(vec![Tag::new("tag-1")]))
//!     .unwrap();
//!
//! let StoreEntities::Tags(tags) = store.read("default", StoreQuery::Tags).unwrap() else {
//!     unreachable!();
//! };
//! assert_eq!(tags.len(), 1);
//! ```

pub mod error;
pub mod memory;
pub mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use store::{Antenna, HardwareStore, StoreEntities, StoreQuery};
