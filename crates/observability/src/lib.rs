//! Tracing and logging setup shared by whatever process hosts the inventory.

/// Tracing configuration (filters, layers).
pub mod tracing;

/// Initialize process-wide tracing.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}
