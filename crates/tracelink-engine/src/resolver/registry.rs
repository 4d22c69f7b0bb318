// Stage-kind registry: the single coupling point between the kind string
// a capture reports and the algorithm that resolves it

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracelink_error::{ResolveResult, StructuralViolation};
use tracelink_types::{Correspondence, TraceInfo};
use tracing::debug;

use super::{
    AllToResultResolver, AppendResolver, ChunkedResolver, CollapseResolver, EmptyResolver,
    FilterResolver, FilteredMapResolver, IdentityResolver, IntervalMapResolver, MapResolver,
    OptionalResultResolver, PairMapResolver, PrependResolver, RecordedTraceResolver,
    TraceResolver,
};

/// The correspondence algorithm behind a stage kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverKind {
    Identity,
    Filter,
    Map,
    PairMap,
    Append,
    Prepend,
    Chunked,
    FilteredMap,
    Collapse,
    IntervalMap,
    AllToResult,
    OptionalResult,
    Recorded,
    Empty,
}

impl ResolverKind {
    /// Instantiate the resolver implementing this algorithm.
    pub fn instantiate(self) -> Arc<dyn TraceResolver> {
        match self {
            ResolverKind::Identity => Arc::new(IdentityResolver),
            ResolverKind::Filter => Arc::new(FilterResolver),
            ResolverKind::Map => Arc::new(MapResolver),
            ResolverKind::PairMap => Arc::new(PairMapResolver),
            ResolverKind::Append => Arc::new(AppendResolver),
            ResolverKind::Prepend => Arc::new(PrependResolver),
            ResolverKind::Chunked => Arc::new(ChunkedResolver),
            ResolverKind::FilteredMap => Arc::new(FilteredMapResolver),
            ResolverKind::Collapse => Arc::new(CollapseResolver),
            ResolverKind::IntervalMap => Arc::new(IntervalMapResolver),
            ResolverKind::AllToResult => Arc::new(AllToResultResolver),
            ResolverKind::OptionalResult => Arc::new(OptionalResultResolver),
            ResolverKind::Recorded => Arc::new(RecordedTraceResolver),
            ResolverKind::Empty => Arc::new(EmptyResolver),
        }
    }
}

/// Stage kinds wired into the default registry and the algorithm each one
/// runs. Plain data, so the kind-to-algorithm mapping can be inspected
/// and tested in isolation.
pub const DEFAULT_RESOLVERS: &[(&str, ResolverKind)] = &[
    // dropping stages
    ("filter", ResolverKind::Filter),
    ("limit", ResolverKind::Filter),
    ("skip", ResolverKind::Filter),
    ("takeWhile", ResolverKind::Filter),
    ("dropWhile", ResolverKind::Filter),
    // one-to-one transforms
    ("map", ResolverKind::Map),
    ("mapToInt", ResolverKind::Map),
    ("mapToLong", ResolverKind::Map),
    ("mapToDouble", ResolverKind::Map),
    ("mapToObj", ResolverKind::Map),
    // value-preserving, possibly reordering
    ("peek", ResolverKind::Identity),
    ("sorted", ResolverKind::Identity),
    ("boxed", ResolverKind::Identity),
    ("onClose", ResolverKind::Identity),
    // grouping and fused stages
    ("flatMap", ResolverKind::Chunked),
    ("mapMulti", ResolverKind::Chunked),
    ("filteredMap", ResolverKind::FilteredMap),
    // sliding and splicing stages
    ("pairMap", ResolverKind::PairMap),
    ("append", ResolverKind::Append),
    ("prepend", ResolverKind::Prepend),
    // windowed reductions
    ("collapse", ResolverKind::Collapse),
    ("intervalMap", ResolverKind::IntervalMap),
    // capture-recorded correspondence
    ("distinct", ResolverKind::Recorded),
    // terminals
    ("reduce", ResolverKind::AllToResult),
    ("count", ResolverKind::AllToResult),
    ("sum", ResolverKind::AllToResult),
    ("min", ResolverKind::AllToResult),
    ("max", ResolverKind::AllToResult),
    ("average", ResolverKind::AllToResult),
    ("collect", ResolverKind::AllToResult),
    ("toArray", ResolverKind::AllToResult),
    ("toList", ResolverKind::AllToResult),
    ("findFirst", ResolverKind::OptionalResult),
    ("findAny", ResolverKind::OptionalResult),
    ("forEach", ResolverKind::Empty),
    ("forEachOrdered", ResolverKind::Empty),
    ("anyMatch", ResolverKind::Empty),
    ("allMatch", ResolverKind::Empty),
    ("noneMatch", ResolverKind::Empty),
];

/// Maps stage-kind identifiers to the resolver instance that implements
/// their correspondence semantics.
///
/// Constructed once at session start and passed explicitly to whoever
/// resolves stages; there is no process-global instance.
#[derive(Default, Clone)]
pub struct ResolverRegistry {
    resolvers: HashMap<String, Arc<dyn TraceResolver>>,
}

impl ResolverRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        ResolverRegistry { resolvers: HashMap::new() }
    }

    /// Create a registry pre-populated from [`DEFAULT_RESOLVERS`].
    pub fn with_default_resolvers() -> Self {
        let mut registry = Self::new();
        for (kind, resolver) in DEFAULT_RESOLVERS {
            registry.register(*kind, resolver.instantiate());
        }
        registry
    }

    /// Register a resolver for a stage kind, replacing any existing one.
    pub fn register(&mut self, kind: impl Into<String>, resolver: Arc<dyn TraceResolver>) {
        self.resolvers.insert(kind.into(), resolver);
    }

    /// The resolver registered for a stage kind.
    pub fn get(&self, kind: &str) -> Option<Arc<dyn TraceResolver>> {
        self.resolvers.get(kind).cloned()
    }

    /// Whether a resolver is registered for the stage kind.
    pub fn contains(&self, kind: &str) -> bool {
        self.resolvers.contains_key(kind)
    }

    /// All registered stage kinds, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.resolvers.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    /// Look up the resolver for `kind` and run it on the pair.
    pub fn resolve(&self, kind: &str, pair: &TraceInfo) -> ResolveResult<Correspondence> {
        let resolver = self
            .resolvers
            .get(kind)
            .ok_or_else(|| StructuralViolation::UnknownStageKind(kind.to_string()))?;
        debug!(kind, before = pair.before_len(), after = pair.after_len(), "resolving stage");
        resolver.resolve(pair)
    }
}

impl fmt::Debug for ResolverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}
