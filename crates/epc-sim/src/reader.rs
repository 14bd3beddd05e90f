//! Virtual reader engine
//!
//! The core engine that runs inventory rounds against a stored tag
//! population and dispatches operation batches per tag. Each round issues one
//! store read; each successful write, lock or kill pushes one store update.

use epc_store::{HardwareStore, StoreEntities, StoreQuery};
use epc_tag::{
    KillResult, LockResult, OperationResult, ReadResult, RssiFilter, Tag, TagError, TagFilter,
    TagOperation, TagSummary, WriteResult,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::access;
use crate::error::SimError;
use crate::filter::include_tag;

/// Region id assigned on connect when none was configured
pub const DEFAULT_REGION: &str = "ETSI_EN_302208";

/// Region id that disables execution: rounds complete with an empty report
pub const UNSPECIFIED_REGION: &str = "Unspecified";

/// Antenna id that selects every connected antenna
pub const ANTENNA_WILDCARD: u16 = 0;

/// Configuration for creating a virtual reader
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VirtualReaderConfig {
    /// Store session the reader operates in
    pub session_id: String,
    /// Regulatory region; defaults on connect when None
    pub region: Option<String>,
    /// Simulated acquisition delay before each inventory round (actor only)
    pub inventory_delay_ms: u64,
}

impl Default for VirtualReaderConfig {
    fn default() -> Self {
        Self {
            session_id: "default".to_string(),
            region: None,
            inventory_delay_ms: 50,
        }
    }
}

/// Consumer callback expanding a compound request operation
///
/// Invoked once per tag whose operation list contains a request operation;
/// the returned operations are dispatched in its place, under the same
/// per-tag error accumulator.
pub trait OperationConsumer {
    /// Produce follow-up operations for the given tag
    fn operations_for(&self, summary: &TagSummary) -> Vec<TagOperation>;
}

/// Per-tag slice of an execution report
#[derive(Debug, Clone, PartialEq)]
pub struct TagReport {
    /// Identity of the tag the results belong to
    pub summary: TagSummary,
    /// One result per non-compound operation, in dispatch order
    pub results: Vec<OperationResult>,
}

/// The virtual reader engine
///
/// Synchronous single-writer core: one call mutates one tag population.
/// Wrap it in [`run_reader_task`](crate::task::run_reader_task) for
/// channel-driven use with the simulated acquisition delay.
pub struct VirtualReader<S: HardwareStore> {
    config: VirtualReaderConfig,
    store: S,
    connected: bool,
    connected_antennas: Vec<u16>,
    region: Option<String>,
    rssi_filter: RssiFilter,
    /// Monotonic id for store requests, scoped to this reader's session
    next_request_id: u64,
}

impl<S: HardwareStore> VirtualReader<S> {
    /// Create a reader over a store with the given configuration
    pub fn new(store: S, config: VirtualReaderConfig) -> Self {
        Self {
            store,
            config,
            connected: false,
            connected_antennas: Vec::new(),
            region: None,
            rssi_filter: RssiFilter::default(),
            next_request_id: 0,
        }
    }

    /// The reader's configuration
    pub fn config(&self) -> &VirtualReaderConfig {
        &self.config
    }

    /// Open the session and load the connected antenna set
    pub fn connect(&mut self) -> Result<(), SimError> {
        let request = self.next_request_id();
        self.store.create_session(&self.config.session_id)?;

        let antennas = match self
            .store
            .read(&self.config.session_id, StoreQuery::Antennas)?
        {
            StoreEntities::Antennas(antennas) => antennas,
            StoreEntities::Tags(_) => Vec::new(),
        };
        self.connected_antennas = antennas.iter().map(|a| a.id).collect();

        self.region = Some(
            self.config
                .region
                .clone()
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
        );
        self.connected = true;

        info!(
            "reader connected (session {}, request {}, {} antenna(s))",
            self.config.session_id,
            request,
            self.connected_antennas.len()
        );
        Ok(())
    }

    /// Drop the session state
    pub fn disconnect(&mut self) {
        self.connected = false;
        self.connected_antennas.clear();
        self.region = None;
        info!("reader disconnected (session {})", self.config.session_id);
    }

    /// Whether connect() has succeeded
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Ids of the currently connected antennas
    pub fn connected_antenna_ids(&self) -> &[u16] {
        &self.connected_antennas
    }

    /// Connect or disconnect a single antenna port
    pub fn set_antenna_connected(&mut self, antenna_id: u16, connected: bool) {
        if connected {
            if !self.connected_antennas.contains(&antenna_id) {
                self.connected_antennas.push(antenna_id);
            }
        } else {
            self.connected_antennas.retain(|&id| id != antenna_id);
        }
    }

    /// The active regulatory region
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Change the regulatory region
    pub fn set_region(&mut self, region: impl Into<String>) {
        self.region = Some(region.into());
    }

    /// The RSSI filter applied during inventory
    pub fn rssi_filter(&self) -> RssiFilter {
        self.rssi_filter
    }

    /// Change the RSSI filter applied during inventory
    pub fn set_rssi_filter(&mut self, filter: RssiFilter) {
        self.rssi_filter = filter;
    }

    /// Run one inventory round and execute the operation batch per tag
    ///
    /// Tags are selected on the requested antennas (id 0 selects every
    /// connected antenna), gated by the RSSI filter and the filter list, and
    /// reported in store order. Operations run strictly left to right per
    /// tag; after the first failure the remaining operations degrade to
    /// mapped error results without touching the tag.
    pub fn execute(
        &mut self,
        antennas: &[u16],
        filters: &[TagFilter],
        operations: &[TagOperation],
        consumer: Option<&dyn OperationConsumer>,
    ) -> Result<Vec<TagReport>, SimError> {
        if !self.connected {
            return Err(SimError::NotConnected);
        }
        let region = self.region.clone().ok_or(SimError::NoRegion)?;
        if region == UNSPECIFIED_REGION {
            debug!("region is {}, skipping execution", UNSPECIFIED_REGION);
            return Ok(Vec::new());
        }

        let effective = self.effective_antennas(antennas);
        if effective.is_empty() {
            debug!("no effective antennas, skipping execution");
            return Ok(Vec::new());
        }

        let mut tags = self.inventory(&effective, filters)?;
        let mut reports = Vec::with_capacity(tags.len());

        for tag in &mut tags {
            let summary = TagSummary::from_tag(tag);
            let mut results = Vec::new();
            let mut tag_error = None;
            for operation in operations {
                tag_error =
                    self.dispatch(operation, tag, &summary, tag_error, consumer, &mut results)?;
            }
            reports.push(TagReport { summary, results });
        }

        Ok(reports)
    }

    /// Resolve the requested antenna list against the connected set
    fn effective_antennas(&self, antennas: &[u16]) -> Vec<u16> {
        match antennas.first() {
            None => Vec::new(),
            Some(&ANTENNA_WILDCARD) => self.connected_antennas.clone(),
            Some(_) => antennas
                .iter()
                .copied()
                .filter(|id| self.connected_antennas.contains(id))
                .collect(),
        }
    }

    /// Select the tags visible in this round
    fn inventory(
        &mut self,
        antennas: &[u16],
        filters: &[TagFilter],
    ) -> Result<Vec<Tag>, SimError> {
        let request = self.next_request_id();
        let StoreEntities::Tags(mut tags) =
            self.store.read(&self.config.session_id, StoreQuery::Tags)?
        else {
            return Ok(Vec::new());
        };

        tags.retain(|tag| {
            !tag.killed && include_tag(tag, antennas, filters, &self.rssi_filter)
        });

        debug!(
            "inventory round (request {}) returned {} tag(s)",
            request,
            tags.len()
        );
        Ok(tags)
    }

    /// Dispatch one operation against one tag
    ///
    /// Returns the (possibly newly set) per-tag error. A request operation
    /// expands through the consumer and dispatches the produced operations
    /// with the consumer stripped, so expansion cannot nest.
    fn dispatch(
        &mut self,
        operation: &TagOperation,
        tag: &mut Tag,
        summary: &TagSummary,
        mut tag_error: Option<TagError>,
        consumer: Option<&dyn OperationConsumer>,
        results: &mut Vec<OperationResult>,
    ) -> Result<Option<TagError>, SimError> {
        match operation {
            TagOperation::Read(op) => {
                let result = match tag_error {
                    None => {
                        let result = access::read(tag, op);
                        if result.status != epc_tag::ReadStatus::Success {
                            tag_error = Some(TagError::NonSpecificTag);
                        }
                        result
                    }
                    Some(err) => ReadResult {
                        operation_id: op.id.clone(),
                        data: Vec::new(),
                        status: err.into(),
                    },
                };
                debug!("read {} -> {:?}", op.id, result.status);
                results.push(OperationResult::Read(result));
            }

            TagOperation::Write(op) => {
                let result = match tag_error {
                    None => {
                        let result = access::write(tag, op);
                        if result.status == epc_tag::WriteStatus::Success {
                            self.commit(tag)?;
                        } else {
                            tag_error = Some(TagError::NonSpecificTag);
                        }
                        result
                    }
                    Some(err) => WriteResult {
                        operation_id: op.id.clone(),
                        words_written: 0,
                        status: err.into(),
                    },
                };
                debug!("write {} -> {:?}", op.id, result.status);
                results.push(OperationResult::Write(result));
            }

            TagOperation::Lock(op) => {
                let result = match tag_error {
                    None => {
                        let result = access::lock(tag, op);
                        if result.status == epc_tag::LockStatus::Success {
                            self.commit(tag)?;
                        } else {
                            tag_error = Some(TagError::NonSpecificTag);
                        }
                        result
                    }
                    Some(err) => LockResult {
                        operation_id: op.id.clone(),
                        status: err.into(),
                    },
                };
                debug!("lock {} -> {:?}", op.id, result.status);
                results.push(OperationResult::Lock(result));
            }

            TagOperation::Kill(op) => {
                let result = match tag_error {
                    None => {
                        let result = access::kill(tag, op);
                        if result.status == epc_tag::KillStatus::Success {
                            self.commit(tag)?;
                        } else {
                            tag_error = Some(TagError::NonSpecificTag);
                        }
                        result
                    }
                    Some(err) => KillResult {
                        operation_id: op.id.clone(),
                        status: err.into(),
                    },
                };
                debug!("kill {} -> {:?}", op.id, result.status);
                results.push(OperationResult::Kill(result));
            }

            TagOperation::Request(op) => {
                let Some(consumer) = consumer else {
                    warn!("request {} without a consumer, skipping", op.id);
                    return Ok(tag_error);
                };
                let additional = consumer.operations_for(summary);
                debug!("request {} expanded into {} operation(s)", op.id, additional.len());
                for extra in &additional {
                    tag_error = self.dispatch(extra, tag, summary, tag_error, None, results)?;
                }
            }
        }

        Ok(tag_error)
    }

    /// Persist a mutated tag
    fn commit(&mut self, tag: &Tag) -> Result<(), SimError> {
        let request = self.next_request_id();
        debug!("committing tag {} (request {})", tag.id, request);
        self.store.update(
            &self.config.session_id,
            StoreEntities::Tags(vec![tag.clone()]),
        )?;
        Ok(())
    }

    /// Next store request id, monotonically increasing per reader
    fn next_request_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }
}
