//! In-memory store implementation

use std::collections::HashMap;

use epc_tag::Tag;
use tracing::debug;

use crate::store::{Antenna, HardwareStore, StoreEntities, StoreQuery};
use crate::StoreError;

#[derive(Debug, Default)]
struct Session {
    /// Tags in insertion order; updates replace in place
    tags: Vec<Tag>,
    antennas: Vec<Antenna>,
}

/// In-memory [`HardwareStore`]
///
/// Holds each session's population in plain vectors, preserving insertion
/// order so inventory reports are deterministic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sessions: HashMap<String, Session>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Seed a session with antenna ids, creating the session if needed
    pub fn seed_antennas(&mut self, session_id: &str, antenna_ids: &[u16]) {
        let session = self.sessions.entry(session_id.to_string()).or_default();
        for &id in antenna_ids {
            if !session.antennas.iter().any(|a| a.id == id) {
                session.antennas.push(Antenna::new(id));
            }
        }
    }

    /// Seed a session with a tag, creating the session if needed
    pub fn seed_tag(&mut self, session_id: &str, tag: Tag) {
        let session = self.sessions.entry(session_id.to_string()).or_default();
        upsert_tag(&mut session.tags, tag);
    }

    /// Direct access to a stored tag, mainly for test assertions
    pub fn tag(&self, session_id: &str, tag_id: &str) -> Option<&Tag> {
        self.sessions
            .get(session_id)?
            .tags
            .iter()
            .find(|t| t.id == tag_id)
    }

    fn session_mut(&mut self, session_id: &str) -> Result<&mut Session, StoreError> {
        self.sessions
            .get_mut(session_id)
            .ok_or_else(|| StoreError::UnknownSession(session_id.to_string()))
    }
}

fn upsert_tag(tags: &mut Vec<Tag>, tag: Tag) {
    match tags.iter_mut().find(|t| t.id == tag.id) {
        Some(existing) => *existing = tag,
        None => tags.push(tag),
    }
}

impl HardwareStore for MemoryStore {
    fn create_session(&mut self, session_id: &str) -> Result<(), StoreError> {
        self.sessions.entry(session_id.to_string()).or_default();
        debug!("session {} ready", session_id);
        Ok(())
    }

    fn read(&mut self, session_id: &str, query: StoreQuery) -> Result<StoreEntities, StoreError> {
        let session = self.session_mut(session_id)?;
        Ok(match query {
            StoreQuery::Tags => StoreEntities::Tags(session.tags.clone()),
            StoreQuery::Antennas => StoreEntities::Antennas(session.antennas.clone()),
        })
    }

    fn update(&mut self, session_id: &str, entities: StoreEntities) -> Result<(), StoreError> {
        let session = self.session_mut(session_id)?;
        match entities {
            StoreEntities::Tags(tags) => {
                for tag in tags {
                    upsert_tag(&mut session.tags, tag);
                }
            }
            StoreEntities::Antennas(antennas) => {
                for antenna in antennas {
                    if !session.antennas.iter().any(|a| a.id == antenna.id) {
                        session.antennas.push(antenna);
                    }
                }
            }
        }
        Ok(())
    }

    fn delete(&mut self, session_id: &str, query: StoreQuery) -> Result<(), StoreError> {
        let session = self.session_mut(session_id)?;
        match query {
            StoreQuery::Tags => session.tags.clear(),
            StoreQuery::Antennas => session.antennas.clear(),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use epc_tag::MemoryBank;

    #[test]
    fn test_unknown_session_is_an_error() {
        let mut store = MemoryStore::new();
        assert_eq!(
            store.read("nope", StoreQuery::Tags),
            Err(StoreError::UnknownSession("nope".to_string()))
        );
    }

    #[test]
    fn test_create_session_is_idempotent() {
        let mut store = MemoryStore::new();
        store.create_session("s").unwrap();
        store.seed_tag("s", Tag::new("tag-1"));
        // re-creating must not wipe the population
        store.create_session("s").unwrap();

        let StoreEntities::Tags(tags) = store.read("s", StoreQuery::Tags).unwrap() else {
            panic!("expected tags");
        };
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn test_update_upserts_by_id() {
        let mut store = MemoryStore::new();
        store.create_session("s").unwrap();
        store.seed_tag("s", Tag::new("tag-1"));
        store.seed_tag("s", Tag::new("tag-2"));

        let mut changed = Tag::new("tag-1");
        changed.set_bank(MemoryBank::User, hex::decode("aaaa").unwrap());
        store
            .update("s", StoreEntities::Tags(vec![changed]))
            .unwrap();

        let StoreEntities::Tags(tags) = store.read("s", StoreQuery::Tags).unwrap() else {
            panic!("expected tags");
        };
        assert_eq!(tags.len(), 2);
        // order preserved, contents replaced
        assert_eq!(tags[0].id, "tag-1");
        assert_eq!(tags[0].bank(MemoryBank::User), Some(&hex::decode("aaaa").unwrap()[..]));
    }

    #[test]
    fn test_seed_antennas_deduplicates() {
        let mut store = MemoryStore::new();
        store.seed_antennas("s", &[1, 2]);
        store.seed_antennas("s", &[2, 3]);

        let StoreEntities::Antennas(antennas) = store.read("s", StoreQuery::Antennas).unwrap()
        else {
            panic!("expected antennas");
        };
        assert_eq!(antennas.len(), 3);
    }

    #[test]
    fn test_delete_clears_only_the_addressed_kind() {
        let mut store = MemoryStore::new();
        store.seed_antennas("s", &[1]);
        store.seed_tag("s", Tag::new("tag-1"));

        store.delete("s", StoreQuery::Tags).unwrap();

        let StoreEntities::Tags(tags) = store.read("s", StoreQuery::Tags).unwrap() else {
            panic!("expected tags");
        };
        assert!(tags.is_empty());

        let StoreEntities::Antennas(antennas) = store.read("s", StoreQuery::Antennas).unwrap()
        else {
            panic!("expected antennas");
        };
        assert_eq!(antennas.len(), 1);
    }
}
