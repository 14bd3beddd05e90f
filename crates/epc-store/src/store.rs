//! Store trait and entity types

use epc_tag::Tag;
use serde::{Deserialize, Serialize};

use crate::StoreError;

/// One antenna port known to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Antenna {
    /// Antenna port number
    pub id: u16,
}

impl Antenna {
    /// Create an antenna record
    pub fn new(id: u16) -> Self {
        Antenna { id }
    }
}

/// What a read or delete request addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreQuery {
    /// The tag population
    Tags,
    /// The antenna set
    Antennas,
}

/// Entities flowing across the store boundary
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEntities {
    /// Tag records
    Tags(Vec<Tag>),
    /// Antenna records
    Antennas(Vec<Antenna>),
}

/// Session-addressed persistence for tag and antenna populations
///
/// Implementations own the population; the simulation engine only ever hands
/// back mutated copies via [`update`](HardwareStore::update). `update` has
/// upsert semantics keyed on entity id, so a caller can both seed and persist
/// through the same call.
pub trait HardwareStore {
    /// Create a session; creating an existing session is a no-op
    fn create_session(&mut self, session_id: &str) -> Result<(), StoreError>;

    /// Read all entities the query addresses
    fn read(&mut self, session_id: &str, query: StoreQuery) -> Result<StoreEntities, StoreError>;

    /// Insert or replace entities by id
    fn update(&mut self, session_id: &str, entities: StoreEntities) -> Result<(), StoreError>;

    /// Remove all entities the query addresses
    fn delete(&mut self, session_id: &str, query: StoreQuery) -> Result<(), StoreError>;
}
