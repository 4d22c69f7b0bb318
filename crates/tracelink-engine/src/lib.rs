// Trace resolution engine
//
// Given the before/after snapshots captured around each stage of a data
// pipeline, this crate reconstructs which output value(s) each input
// value produced, one resolution strategy per stage kind selected
// through an explicit registry, and composes the per-stage results into
// a traversable whole-pipeline chain. The engine is purely inferential:
// it never re-executes the pipeline and sees nothing but the captured
// values and their logical timestamps.

pub mod chain;
pub mod resolver;

pub use chain::{CallOutcome, ChainResolver, ResolvedCall, ResolvedChain, Stage, StageCapture};
pub use resolver::registry::{ResolverKind, ResolverRegistry, DEFAULT_RESOLVERS};
pub use resolver::{
    AllToResultResolver, AppendResolver, ChunkedResolver, CollapseResolver, EmptyResolver,
    FilterResolver, FilteredMapResolver, IdentityResolver, IntervalMapResolver, MapResolver,
    OptionalResultResolver, PairMapResolver, PrependResolver, RecordedTraceResolver,
    TraceResolver,
};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
