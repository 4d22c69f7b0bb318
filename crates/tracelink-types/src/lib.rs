// Core data model for the tracelink resolution engine
//
// Value and time types shared by the resolvers: captured values with
// their logical timestamps, the before/after snapshot pair observed
// around one pipeline stage, and the bidirectional correspondence a
// resolver produces from such a pair.

pub mod correspondence;
pub mod element;
pub mod snapshot;

pub use correspondence::{Correspondence, CorrespondenceBuilder, ElementMap};
pub use element::{CapturedValue, TraceElement, ValueKey};
pub use snapshot::{RecordedTrace, TraceInfo};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
