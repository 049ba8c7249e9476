//! Snapshot acquisition boundary.

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::RawEmployeeRow;

/// Produces the employee snapshot a batch run operates on.
///
/// The engine treats the snapshot as a point-in-time export: it is
/// fetched once per run, processed, and discarded. Implementations that
/// hold connections or file handles should acquire them inside
/// [`fetch_snapshot`](Self::fetch_snapshot) and release them before
/// returning, so a run never pins resources across the processing
/// stages.
pub trait SnapshotSource {
    /// Fetches every row of the current snapshot.
    ///
    /// A fetch failure is fatal to the run; there is no partial
    /// processing of a snapshot the source could not deliver whole.
    fn fetch_snapshot(&mut self) -> EngineResult<Vec<RawEmployeeRow>>;
}

/// An in-memory source backed by a fixed set of rows.
///
/// Used in tests and rehearsal runs where the snapshot is prepared
/// up front.
#[derive(Debug, Clone, Default)]
pub struct FixedSnapshot {
    rows: Vec<RawEmployeeRow>,
}

impl FixedSnapshot {
    /// Wraps the given rows as a snapshot.
    pub fn new(rows: Vec<RawEmployeeRow>) -> Self {
        Self { rows }
    }

    /// Parses a snapshot from a JSON array of rows, the shape the HR
    /// system's export endpoint produces.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let rows: Vec<RawEmployeeRow> =
            serde_json::from_str(json).map_err(|e| EngineError::SnapshotFetch {
                message: format!("invalid snapshot JSON: {e}"),
            })?;
        Ok(Self { rows })
    }
}

impl SnapshotSource for FixedSnapshot {
    fn fetch_snapshot(&mut self) -> EngineResult<Vec<RawEmployeeRow>> {
        info!(rows = self.rows.len(), "serving fixed snapshot");
        Ok(self.rows.clone())
    }
}
