//! Reader actor task
//!
//! This module provides a pure async task that owns a [`VirtualReader`] and
//! communicates via channels. Each execute command waits out the simulated
//! acquisition delay (emulating hardware turnaround time) before the
//! inventory round runs; the delay is skipped only by shutting the task
//! down, never cancelled per request.

use std::time::Duration;

use epc_store::HardwareStore;
use epc_tag::{RssiFilter, TagFilter, TagOperation};
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::error::SimError;
use crate::reader::{OperationConsumer, TagReport, VirtualReader};

/// Commands that can be sent to a reader actor
pub enum ReaderCommand {
    /// Run one inventory/operation round and reply with the per-tag reports
    Execute {
        /// Requested antennas; id 0 selects every connected antenna
        antennas: Vec<u16>,
        /// Inventory filters
        filters: Vec<TagFilter>,
        /// Operation batch applied to every matching tag
        operations: Vec<TagOperation>,
        /// Consumer expanding compound request operations
        consumer: Option<Box<dyn OperationConsumer + Send>>,
        /// Reply channel
        reply: oneshot::Sender<Result<Vec<TagReport>, SimError>>,
    },
    /// Change the RSSI filter for subsequent rounds
    SetRssiFilter(RssiFilter),
    /// Connect or disconnect an antenna port
    SetAntennaConnected {
        /// Antenna port number
        antenna_id: u16,
        /// Desired connection state
        connected: bool,
    },
    /// Shutdown the reader actor
    Shutdown,
}

impl std::fmt::Debug for ReaderCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReaderCommand::Execute { antennas, filters, operations, .. } => f
                .debug_struct("Execute")
                .field("antennas", antennas)
                .field("filters", &filters.len())
                .field("operations", &operations.len())
                .finish_non_exhaustive(),
            ReaderCommand::SetRssiFilter(filter) => {
                f.debug_tuple("SetRssiFilter").field(filter).finish()
            }
            ReaderCommand::SetAntennaConnected { antenna_id, connected } => f
                .debug_struct("SetAntennaConnected")
                .field("antenna_id", antenna_id)
                .field("connected", connected)
                .finish(),
            ReaderCommand::Shutdown => f.write_str("Shutdown"),
        }
    }
}

/// Event emitted after each completed round
#[derive(Debug, Clone)]
pub enum ReaderEvent {
    /// An inventory/operation round finished
    RoundComplete {
        /// Number of tags in the report
        tags: usize,
    },
}

/// Run the reader actor task
///
/// The task owns the reader, connects it on startup and processes commands
/// until the channel closes or a shutdown command arrives. Round completions
/// are emitted via the broadcast channel for UI subscription.
pub async fn run_reader_task<S>(
    mut reader: VirtualReader<S>,
    mut cmd_rx: mpsc::Receiver<ReaderCommand>,
    event_tx: broadcast::Sender<ReaderEvent>,
) -> Result<(), SimError>
where
    S: HardwareStore,
{
    reader.connect()?;
    let delay = Duration::from_millis(reader.config().inventory_delay_ms);
    info!("reader task started (acquisition delay {:?})", delay);

    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            ReaderCommand::Execute { antennas, filters, operations, consumer, reply } => {
                tokio::time::sleep(delay).await;

                let result = match &consumer {
                    Some(consumer) => {
                        reader.execute(&antennas, &filters, &operations, Some(&**consumer))
                    }
                    None => reader.execute(&antennas, &filters, &operations, None),
                };
                if let Ok(reports) = &result {
                    let _ = event_tx.send(ReaderEvent::RoundComplete { tags: reports.len() });
                }
                if reply.send(result).is_err() {
                    warn!("execute reply dropped before delivery");
                }
            }
            ReaderCommand::SetRssiFilter(filter) => {
                debug!("rssi filter set to {:?}", filter);
                reader.set_rssi_filter(filter);
            }
            ReaderCommand::SetAntennaConnected { antenna_id, connected } => {
                debug!("antenna {} connected = {}", antenna_id, connected);
                reader.set_antenna_connected(antenna_id, connected);
            }
            ReaderCommand::Shutdown => {
                info!("shutdown requested for reader task");
                break;
            }
        }
    }

    reader.disconnect();
    info!("reader task ended");
    Ok(())
}
