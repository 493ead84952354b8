//! Default values for the local configuration.

/// UI tick cadence in milliseconds.
pub(crate) const DEFAULT_TICK_RATE_MS: u64 = 100;

/// Number of calls retained in the history view.
pub(crate) const DEFAULT_HISTORY_LIMIT: usize = 200;

/// Seconds between synthetic calls from the demo source.
pub(crate) const DEFAULT_DEMO_CALL_INTERVAL_SECS: u64 = 3;
