// ============================================================================
// Logging Setup
// Installs a tracing subscriber for binaries, demos and benchmarks
// ============================================================================

use tracing::Level;

/// Install a global fmt subscriber at `level`.
///
/// Returns `false` if a global subscriber was already set; the existing
/// one stays active.
pub fn init_tracing(level: Level) -> bool {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(true)
        .try_init()
        .is_ok()
}
