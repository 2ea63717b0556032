pub mod cli;
pub mod config;
pub mod error;
pub mod flow;
pub mod logging;
pub mod lookup;
pub mod pipeline;
pub mod protocol;
pub mod report;
pub mod tally;

pub use error::FlowtagError;

/// Hash map used for the lookup table and the per-run counters.
pub type FastMap<K, V> = std::collections::HashMap<K, V, ahash::RandomState>;
