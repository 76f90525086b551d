//! Boundary to the external visualization shell.

use crate::sim::Snapshot;

/// Consumer of per-step snapshots.
///
/// The driver polls `stop_requested` once per iteration and hands every
/// snapshot to `present`. Any mapping to display space happens on this side.
pub trait Renderer {
    type Error;

    /// User-requested termination.
    fn stop_requested(&mut self) -> bool;

    /// Draw or record one snapshot.
    fn present(&mut self, snapshot: &Snapshot<'_>) -> Result<(), Self::Error>;
}
