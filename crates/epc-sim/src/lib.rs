//! EPC Gen2 Tag Simulation Engine
//!
//! This crate provides a simulated RFID reader back-end for testing reader
//! software without physical RF hardware. It includes:
//!
//! - **VirtualReader**: runs inventory rounds over a stored tag population
//!   and executes read/write/lock/kill operation batches against each
//!   matching tag, enforcing password and lock rules
//! - **Access layer**: the per-operation semantics (password resolution,
//!   lock-field resolution, word-addressed memory splicing)
//! - **Reader task**: an async actor owning a `VirtualReader`, driven over a
//!   command channel, with the simulated acquisition delay before each round
//!
//! # Example
//!
//! ```rust
//! use epc_sim::{VirtualReader, VirtualReaderConfig};
//! use epc_store::MemoryStore;
//! use epc_tag::{MemoryBank, Tag};
//!
//! let mut store = MemoryStore::new();
//! store.seed_antennas("default", &[1]);
//! let mut tag = Tag::new("tag-1");
//! tag.set_bank(MemoryBank::Epc, vec![0x12, 0x34, 0x34, 0x00, 0xAA, 0xBB]);
//! tag.observe(1, -40);
//! store.seed_tag("default", tag);
//!
//! let mut reader = VirtualReader::new(store, VirtualReaderConfig::default());
//! reader.connect().unwrap();
//!
//! let reports = reader.execute(&[0], &[], &[], None).unwrap();
//! assert_eq!(reports.len(), 1);
//! assert_eq!(reports[0].summary.epc, vec![0xAA, 0xBB]);
//! ```

pub mod access;
pub mod error;
pub mod filter;
pub mod reader;
pub mod task;

pub use error::SimError;
pub use filter::include_tag;
pub use reader::{
    OperationConsumer, TagReport, VirtualReader, VirtualReaderConfig, ANTENNA_WILDCARD,
    DEFAULT_REGION, UNSPECIFIED_REGION,
};
pub use task::{run_reader_task, ReaderCommand, ReaderEvent};
