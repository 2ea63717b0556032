//! Protocol number resolution.
//!
//! Flow logs carry the IP protocol as a number. Lookup tables name it
//! (`tcp`, `udp`, ...). A [`ProtocolRegistry`] is an immutable snapshot of
//! number -> name mappings that gets handed to the matcher, so tests can pin
//! a fixed registry instead of depending on whatever the host knows about.

mod iana;
mod registry;

pub use iana::IANA_PROTOCOL_NUMBERS;
pub use registry::{ProtocolRegistry, ProtocolResolver, UNKNOWN_PROTOCOL};
