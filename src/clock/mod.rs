//! Playhead clock: where in the graph each sample reads from.

/// Phase accumulator, free-running or locked to the host transport.
pub mod playhead;
/// Musical rate table.
pub mod rate;
/// Host transport snapshot.
pub mod transport;

pub use playhead::{ClockMode, Playhead};
pub use rate::{ratio_at, ratio_at_index, FREE_RUNNING_BAR_HZ, RATE_TABLE};
pub use transport::TransportInfo;
