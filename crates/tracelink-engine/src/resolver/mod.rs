// Resolution strategies, one per family of pipeline stage kinds
//
// Every resolver consumes a snapshot pair and reconstructs the
// bidirectional correspondence between its two sides. Resolvers are
// stateless unit structs selected through the registry.

pub mod registry;

mod concat;
mod filter;
mod grouping;
mod identity;
mod map;
mod pair_map;
mod recorded;
mod terminal;
mod windowed;

pub use concat::{AppendResolver, PrependResolver};
pub use filter::FilterResolver;
pub use grouping::{ChunkedResolver, FilteredMapResolver};
pub use identity::IdentityResolver;
pub use map::MapResolver;
pub use pair_map::PairMapResolver;
pub use recorded::RecordedTraceResolver;
pub use terminal::{AllToResultResolver, EmptyResolver, OptionalResultResolver};
pub use windowed::{CollapseResolver, IntervalMapResolver};

use tracelink_error::ResolveResult;
use tracelink_types::{Correspondence, TraceInfo};

/// A correspondence-resolution strategy for one family of stage kinds.
///
/// `resolve` is a pure function of the snapshot pair: no mutation of the
/// input, no I/O, deterministic given equal inputs. Implementations are
/// stateless, so one instance serves concurrent resolutions of different
/// stages.
pub trait TraceResolver: Send + Sync {
    /// Reconstruct the bidirectional correspondence for one stage.
    fn resolve(&self, pair: &TraceInfo) -> ResolveResult<Correspondence>;
}
