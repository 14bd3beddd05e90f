//! EPC Gen2 Tag Model Library
//!
//! This crate provides the data model and pure logic for simulated EPC
//! Class-1 Generation-2 RFID tags:
//!
//! - **Tag**: per-tag memory banks, antenna observations, lock table, kill flag
//! - **Lock semantics**: the four-state lock/permalock transition machine
//! - **Operations & results**: the closed set of tag operations (read, write,
//!   lock, kill, request) and their per-kind result codes
//! - **Filters**: bit-range selection filters with mask decomposition, as used
//!   during an inventory round
//!
//! # Architecture
//!
//! Everything in this crate is synchronous and side-effect free: operations on
//! a [`Tag`] mutate the value they are handed and report outcomes as result
//! codes, never as Rust errors. Executing operations against a population of
//! tags (including password checks and lock enforcement) lives in the
//! `epc-sim` crate; persistence lives in `epc-store`.
//!
//! # Example
//!
//! ```rust
//! use epc_tag::{MemoryBank, Tag};
//!
//! let mut tag = Tag::new("tag-1");
//! tag.set_bank(MemoryBank::Epc, vec![0x12, 0x34, 0x34, 0x00, 0xAA, 0xBB]);
//! tag.observe(1, -42);
//!
//! assert_eq!(tag.bank(MemoryBank::Epc).map(|d| d.len()), Some(6));
//! assert_eq!(tag.access_password(), 0);
//! ```

pub mod bank;
pub mod bits;
pub mod error;
pub mod filter;
pub mod identity;
pub mod lock;
pub mod operation;
pub mod result;
pub mod tag;

pub use bank::MemoryBank;
pub use error::TagError;
pub use filter::{matches, RssiFilter, TagFilter};
pub use identity::TagSummary;
pub use lock::{LockField, LockState, LockTransitionError, Privilege};
pub use operation::{
    KillOperation, LockOperation, ReadOperation, RequestOperation, TagOperation, WriteOperation,
};
pub use result::{
    KillResult, KillStatus, LockResult, LockStatus, OperationResult, ReadResult, ReadStatus,
    WriteResult, WriteStatus,
};
pub use tag::Tag;
